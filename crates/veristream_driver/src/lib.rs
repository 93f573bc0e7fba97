//! Cycle-accurate ready/valid stream handshake driver for RTL simulations.
//!
//! This crate drives an externally compiled digital design, exposed through
//! the [`SimBackend`](veristream_backend::SimBackend) capability trait,
//! through a streaming handshake protocol: one named channel per data
//! stream, each bound to `TVALID`/`TREADY`/`TDATA` signals by a naming
//! convention. Input words are pushed and output words drained cycle by
//! cycle until a target output count is reached, with a liveness timeout
//! detecting designs that stop making forward progress.
//!
//! # Usage
//!
//! ```ignore
//! use num_bigint::BigInt;
//! use veristream_driver::{reset, Clock, StreamIo, StreamRun};
//!
//! let clock = Clock::default();
//! reset(&mut sim, &clock, "ap_rst_n", true)?;
//!
//! let mut io = StreamIo::new();
//! io.add_input("in0", [BigInt::from(5), BigInt::from(7)]);
//! io.add_output("out0");
//!
//! let cycles = StreamRun::new().run(&mut sim, &mut io, 2)?;
//! println!("completed in {cycles} cycles: {:?}", io.output("out0"));
//! ```
//!
//! # Modules
//!
//! - `error` — Driver error types
//! - `signal` — Signal name resolution and unsigned value access
//! - `clock` — Clock edge toggling and the reset sequence
//! - `stream` — The streaming handshake engine

#![warn(missing_docs)]

pub mod clock;
pub mod error;
pub mod signal;
pub mod stream;

pub use clock::{reset, reset_from_config, Clock, PendingWrites, DEFAULT_HALF_PERIOD};
pub use error::DriverError;
pub use signal::{read_signal, resolve_signal, write_signal};
pub use stream::{StreamIo, StreamRun};

// Re-exported so callers configuring a run by hand need not depend on the
// config crate directly.
pub use veristream_config::StreamSuffix;
