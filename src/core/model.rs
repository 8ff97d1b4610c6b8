//! Ledger addressing types and boundary parsing

use crate::core::error::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Signed unit count. Inventory goes negative on shortfall.
pub type Quantity = i64;

/// Product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Builds an identifier, rejecting blank names.
    pub fn new(id: impl Into<String>) -> LedgerResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(LedgerError::validation("product name cannot be empty"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RowKind {
    Supply,
    Demand,
    Inventory,
}

impl RowKind {
    /// Display order of the three rows of a product.
    pub const ALL: [RowKind; 3] = [RowKind::Supply, RowKind::Demand, RowKind::Inventory];
}

impl Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RowKind::Supply => "Supply",
                RowKind::Demand => "Demand",
                RowKind::Inventory => "Inventory",
            }
        )
    }
}

impl FromStr for RowKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supply" => Ok(RowKind::Supply),
            "demand" => Ok(RowKind::Demand),
            "inventory" => Ok(RowKind::Inventory),
            _ => Err(LedgerError::validation(format!("invalid row kind: {s}"))),
        }
    }
}

/// Zero-based week index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(pub usize);

impl Period {
    pub fn index(self) -> usize {
        self.0
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Week {}", self.0)
    }
}

impl FromStr for Period {
    type Err = LedgerError;

    /// Accepts `Week 3`, `week3`, `W3` or a bare `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let digits = lower
            .strip_prefix("week")
            .or_else(|| lower.strip_prefix('w'))
            .unwrap_or(lower.as_str())
            .trim();
        digits
            .parse::<usize>()
            .map(Period)
            .map_err(|_| LedgerError::validation(format!("invalid period: {s}")))
    }
}

/// Composite address of a single ledger cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub product: ProductId,
    pub kind: RowKind,
    pub period: Period,
}

impl CellKey {
    pub fn new(product: ProductId, kind: RowKind, period: Period) -> Self {
        Self {
            product,
            kind,
            period,
        }
    }
}

pub fn parse_quantity(s: &str) -> LedgerResult<Quantity> {
    s.trim()
        .parse::<Quantity>()
        .map_err(|_| LedgerError::validation(format!("quantity must be an integer: {s}")))
}

/// Parses a non-negative decimal amount (unit cost or threshold).
pub fn parse_amount(s: &str) -> LedgerResult<Decimal> {
    let value = Decimal::from_str(s.trim())
        .map_err(|_| LedgerError::validation(format!("amount must be a number: {s}")))?;
    ensure_non_negative(value)
}

pub fn ensure_non_negative(value: Decimal) -> LedgerResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(LedgerError::validation(format!(
            "amount must not be negative: {value}"
        )));
    }
    Ok(value)
}
