//! Backend error types.
//!
//! All failures a simulation backend can report are variants of
//! [`BackendError`].

/// Errors reported by a simulation backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The named port does not exist on the simulation handle.
    #[error("unknown port '{name}'")]
    UnknownPort {
        /// The requested port name.
        name: String,
    },

    /// A written value's bit width does not match the port's width.
    #[error("width mismatch on port '{name}': port is {expected} bits, value is {got} bits")]
    WidthMismatch {
        /// The port name.
        name: String,
        /// The port's declared width.
        expected: usize,
        /// The width of the rejected value.
        got: usize,
    },

    /// A written value contains characters other than '0' and '1'.
    #[error("invalid bit string for port '{name}': {value:?}")]
    InvalidBitString {
        /// The port name.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// The underlying simulation engine failed.
    #[error("simulation engine error: {reason}")]
    Engine {
        /// Description of the engine failure.
        reason: String,
    },
}
