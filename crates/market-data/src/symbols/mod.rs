//! Display-name to provider-symbol normalization.
//!
//! Portfolio spreadsheets carry free-text company names ("HDFC Bank",
//! "Dmart"), while the providers want exchange tickers ("HDFCBANK",
//! "DMART"). The mapping is a static exact-match table: no fuzzy matching,
//! and a miss falls through to the trimmed input unchanged.

use std::collections::HashMap;

use log::{debug, warn};

/// Known display-name to NSE-ticker mappings.
///
/// Entries are case-sensitive. Known trailing-whitespace variants of the
/// same name are listed explicitly rather than normalized away, so the
/// table stays an exact mirror of what the source spreadsheets contain.
const DEFAULT_SYMBOL_TABLE: &[(&str, &str)] = &[
    // Financial Sector
    ("HDFC Bank", "HDFCBANK"),
    ("Bajaj Finance", "BAJFINANCE"),
    ("ICICI Bank", "ICICIBANK"),
    ("Bajaj Housing", "BAJAJHFL"),
    ("Savani Financials", "SAVANIFINANCIA"),
    // Tech Sector
    ("Affle India", "AFFLE"),
    ("LTI Mindtree", "LTIM"),
    ("KPIT Tech", "KPITTECH"),
    ("Tata Tech", "TATATECH"),
    ("BLS E-Services", "BLSE"),
    ("Tanla", "TANLA"),
    ("Tanla ", "TANLA"), // trailing-space variant seen in source files
    // Consumer Sector
    ("Dmart", "DMART"),
    ("Tata Consumer", "TATACONSUM"),
    ("Pidilite", "PIDILITIND"),
    // Power Sector
    ("Tata Power", "TATAPOWER"),
    ("KPI Green", "KPIGREEN"),
    ("Suzlon", "SUZLON"),
    ("Gensol", "GENSOLENG"),
    // Infrastructure / Pipes
    ("Hariom Pipes", "HARIOMPIPE"),
    ("Astral", "ASTRAL"),
    ("Polycab", "POLYCAB"),
    // Others
    ("Clean Science", "CLEANSCIENCE"),
    ("Deepak Nitrite", "DEEPAKNTR"),
    ("Fine Organic", "FINEORG"),
    ("Gravita", "GRAVITA"),
    ("SBI Life", "SBILIFE"),
    ("Infy", "INFY"),
    ("Happeist Mind", "HAPPSTMNDS"),
    ("Easemytrip", "EASEMYTRIP"),
];

/// Exact-match symbol normalizer.
///
/// The table is immutable after construction and injected rather than
/// global, so tests can swap in their own mappings.
pub struct SymbolMapper {
    table: HashMap<String, String>,
}

impl SymbolMapper {
    /// Create a mapper over a custom table.
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    /// Normalize a free-text holding name to a provider symbol.
    ///
    /// Trims surrounding whitespace, then looks the trimmed name up in the
    /// table. A miss returns the trimmed input unchanged; that pass-through
    /// is logged as an observable event, not treated as an error.
    pub fn normalize(&self, name: &str) -> String {
        let clean = name.trim();

        if let Some(symbol) = self.table.get(clean) {
            debug!("Mapped '{}' -> '{}'", clean, symbol);
            return symbol.clone();
        }

        warn!("No symbol mapping for '{}', using name as symbol", clean);
        clean.to_string()
    }
}

impl Default for SymbolMapper {
    /// Mapper over the built-in display-name table.
    fn default() -> Self {
        Self::new(
            DEFAULT_SYMBOL_TABLE
                .iter()
                .map(|(name, symbol)| (name.to_string(), symbol.to_string()))
                .collect(),
        )
    }
}
