use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single selectable instrument: the name shown to the user and the
/// provider ticker it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub display_name: String,
    pub symbol: String,
}

impl CatalogEntry {
    pub fn new(display_name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            symbol: symbol.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown instrument: {0}")]
    NotFound(String),

    #[error("duplicate instrument name: {0}")]
    DuplicateName(String),

    #[error("instrument {0} has an empty symbol")]
    EmptySymbol(String),
}

/// Immutable name → ticker table, built once at startup and shared by reference.
///
/// Entries keep their definition order, which is the order the dashboard
/// lists them in.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate display names and empty symbols.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            if entry.symbol.trim().is_empty() {
                return Err(CatalogError::EmptySymbol(entry.display_name.clone()));
            }
            if index.insert(entry.display_name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateName(entry.display_name.clone()));
            }
        }

        Ok(Self { entries, index })
    }

    /// Resolves a display name to its provider symbol.
    pub fn lookup(&self, display_name: &str) -> Result<&str, CatalogError> {
        self.index
            .get(display_name)
            .map(|&i| self.entries[i].symbol.as_str())
            .ok_or_else(|| CatalogError::NotFound(display_name.to_string()))
    }

    /// Display names in definition order.
    pub fn list_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.display_name.as_str()).collect()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The NSE large-cap list the dashboard ships with.
    pub fn nse_default() -> Self {
        let entries = NSE_DEFAULT
            .iter()
            .map(|(name, symbol)| CatalogEntry::new(*name, *symbol))
            .collect();

        // The static table is known to be valid.
        Self::from_entries(entries).unwrap_or_else(|_| Self {
            entries: Vec::new(),
            index: HashMap::new(),
        })
    }
}

const NSE_DEFAULT: &[(&str, &str)] = &[
    ("Reliance Industries", "RELIANCE.NS"),
    ("TCS", "TCS.NS"),
    ("HDFC Bank", "HDFCBANK.NS"),
    ("Infosys", "INFY.NS"),
    ("ICICI Bank", "ICICIBANK.NS"),
    ("Larsen & Toubro", "LT.NS"),
    ("SBI", "SBIN.NS"),
    ("Axis Bank", "AXISBANK.NS"),
    ("ITC", "ITC.NS"),
    ("Maruti Suzuki", "MARUTI.NS"),
    ("ONGC", "ONGC.NS"),
    ("Silver ETF", "SILVERBEES.NS"),
    ("Bharti Airtel", "BHARTIARTL.NS"),
    ("HCL Technologies", "HCLTECH.NS"),
    ("Asian Paints", "ASIANPAINT.NS"),
    ("Bajaj Finance", "BAJFINANCE.NS"),
    ("Wipro", "WIPRO.NS"),
    ("Adani Enterprises", "ADANIENT.NS"),
    ("UltraTech Cement", "ULTRACEMCO.NS"),
    ("Titan Company", "TITAN.NS"),
];
