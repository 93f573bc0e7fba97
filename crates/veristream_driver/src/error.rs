//! Driver error types.
//!
//! All failures that can occur while driving a simulation are variants of
//! [`DriverError`]. No error is recovered internally: every failure aborts
//! the in-progress call, leaving the simulation handle at whatever state the
//! last applied edge produced. Callers must reset before reuse.

use num_bigint::BigInt;
use veristream_backend::BackendError;

/// Errors that can occur while driving a simulation.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// Neither the exact nor the lowercase form of a signal name exists
    /// among the simulator's ports.
    #[error("signal not found: {name}")]
    SignalNotFound {
        /// The requested signal name.
        name: String,
    },

    /// A negative value was written to a signal. Two's-complement encoding
    /// is not implemented.
    #[error("cannot write negative value {value} to '{name}': two's-complement encoding is not implemented")]
    NegativeValue {
        /// The resolved signal name.
        name: String,
        /// The rejected value.
        value: BigInt,
    },

    /// A port's current value could not be parsed as unsigned binary.
    #[error("malformed value on port '{name}': {value:?}")]
    MalformedPortValue {
        /// The resolved signal name.
        name: String,
        /// The unparsable value string.
        value: String,
    },

    /// The liveness threshold was reached with no output progress.
    #[error("simulation stalled: no output progress for {threshold} consecutive cycles (after {cycles} cycles total); consider a larger liveness threshold")]
    Stalled {
        /// The configured liveness threshold.
        threshold: u64,
        /// Total cycles elapsed when the stall was declared.
        cycles: u64,
    },

    /// The simulation backend failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
