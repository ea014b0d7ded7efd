//! Domain types: bars, signal series, instruments.

pub mod bar;
pub mod instrument;
pub mod signal;

pub use bar::{validate_bars, Bar};
pub use instrument::Instrument;
pub use signal::SignalSeries;
