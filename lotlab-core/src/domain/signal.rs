//! SignalSeries — a validated 0/1 desired-position sequence.

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One value in {0, 1} per bar: 1 = hold long, 0 = flat.
///
/// The generating rule is responsible for lagging the signal so it is free
/// of lookahead; the simulator applies a second one-bar lag on top as a
/// defensive guard. Values are clamped to {0, 1} at construction, so the
/// invariant holds by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSeries(Vec<u8>);

impl SignalSeries {
    /// Build from raw values, clamping anything nonzero to 1.
    pub fn new(values: Vec<u8>) -> Self {
        Self(values.into_iter().map(|v| u8::from(v != 0)).collect())
    }

    pub fn from_bools(values: &[bool]) -> Self {
        Self(values.iter().map(|&v| u8::from(v)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[u8] {
        &self.0
    }

    /// Check 1:1 alignment with a bar sequence.
    pub fn check_alignment(&self, bar_len: usize) -> Result<(), DataError> {
        if self.0.len() != bar_len {
            return Err(DataError::SignalLengthMismatch {
                signal_len: self.0.len(),
                bar_len,
            });
        }
        Ok(())
    }
}
