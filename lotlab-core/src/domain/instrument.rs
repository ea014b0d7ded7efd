//! Instrument metadata: lot size, margin fraction, slippage rate.

use serde::{Deserialize, Serialize};

/// Contract terms for one tradeable instrument.
///
/// `lot_size` is the minimum tradeable unit multiplier; PnL scales
/// linearly with lot count × lot size. `margin_fraction` is the fraction
/// of notional required as capital per lot. `slippage_rate` inflates the
/// execution price relative to the quoted close (unfavorable fill).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub lot_size: u32,
    pub margin_fraction: f64,
    pub slippage_rate: f64,
}

impl Instrument {
    pub fn new(symbol: &str, lot_size: u32, margin_fraction: f64, slippage_rate: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            lot_size,
            margin_fraction,
            slippage_rate,
        }
    }

    /// Nifty index futures: 75-unit lots, 20% margin, 1bp slippage.
    pub fn nifty() -> Self {
        Self::new("nifty", 75, 0.20, 0.0001)
    }

    /// Bank Nifty index futures: 25-unit lots, 20% margin, 1bp slippage.
    pub fn banknifty() -> Self {
        Self::new("banknifty", 25, 0.20, 0.0001)
    }

    /// Look up a built-in preset by symbol name.
    pub fn preset(symbol: &str) -> Option<Self> {
        match symbol {
            "nifty" => Some(Self::nifty()),
            "banknifty" => Some(Self::banknifty()),
            _ => None,
        }
    }
}
