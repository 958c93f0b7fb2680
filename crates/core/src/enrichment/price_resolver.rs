//! Ordered fallback cascade for the current market price.

use rust_decimal::Decimal;

use crate::holdings::PriceSource;

/// Pick the current market price for one holding.
///
/// Candidates in trust order, highest first: the live structured quote,
/// the price scraped by the fundamentals source, the statically-known
/// price carried on the holding record, and finally the purchase price.
/// The last candidate is always present, so this function is total - a
/// holding always ends up priced, however degraded.
pub fn resolve_price(
    quote_price: Option<Decimal>,
    fundamentals_price: Option<Decimal>,
    carried_price: Option<Decimal>,
    purchase_price: Decimal,
) -> (Decimal, PriceSource) {
    if let Some(price) = quote_price {
        return (price, PriceSource::Quote);
    }
    if let Some(price) = fundamentals_price {
        return (price, PriceSource::Fundamentals);
    }
    if let Some(price) = carried_price {
        return (price, PriceSource::Carried);
    }
    (purchase_price, PriceSource::Purchase)
}
