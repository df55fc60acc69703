//! Tradable instruments as listed in a provider catalog.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Provider-side instrument identifier (a FIGI for T-Invest).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Catalog section an instrument was listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum InstrumentKind {
    /// Common or preferred shares.
    Share,
    /// Government or corporate bonds.
    Bond,
    /// Exchange-traded funds.
    Etf,
}

impl InstrumentKind {
    /// Stable lowercase identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Share => "share",
            Self::Bond => "bond",
            Self::Etf => "etf",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved instrument: identifier, exchange ticker, kind, and display name.
///
/// The display name labels the instrument's price column in a wide table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    /// Identifier used for candle requests.
    pub id: InstrumentId,
    /// Exchange ticker the user asks for.
    pub ticker: String,
    /// Catalog section.
    pub kind: InstrumentKind,
    /// Human-readable name.
    pub name: String,
}

impl Instrument {
    /// Convenience constructor.
    pub fn new(
        id: impl Into<InstrumentId>,
        ticker: impl Into<String>,
        kind: InstrumentKind,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            ticker: ticker.into(),
            kind,
            name: name.into(),
        }
    }
}
