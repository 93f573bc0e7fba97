//! Simulation backend abstraction for the veristream RTL stream driver.
//!
//! The driver never talks to a simulator directly. It goes through the
//! [`SimBackend`] trait, which captures the four capabilities an external
//! simulation handle must provide: enumerate ports, read a port's current
//! value as a fixed-width binary string, write a port from such a string,
//! and advance simulated time. Any engine that can expose its top-level
//! ports this way (Vivado XSI, a behavioral model, a replay log) can be
//! driven without touching the handshake engine.
//!
//! # Modules
//!
//! - `error` — Backend error types
//! - `mock` — An in-memory behavioral backend for tests and prototyping

pub mod error;
pub mod mock;

pub use error::BackendError;
pub use mock::MockSim;

/// Capability interface over a live simulation handle.
///
/// Port values are exchanged as fixed-width binary strings, most significant
/// bit first, exactly as the underlying simulator represents them. The string
/// length of a port's current value is authoritative for its bit width.
///
/// The backend is a shared mutable resource: a driver invocation is its sole
/// writer for the duration of a call, and callers must not interleave other
/// drivers of the same handle.
pub trait SimBackend {
    /// Returns the number of top-level ports.
    fn port_count(&self) -> usize;

    /// Returns the name of the port at `index`, or `None` if out of range.
    fn port_name(&self, index: usize) -> Option<&str>;

    /// Returns the current value of the named port as a binary string.
    fn port_value(&self, name: &str) -> Result<String, BackendError>;

    /// Sets the named port from a binary string of exactly its width.
    fn set_port_value(&mut self, name: &str, value: &str) -> Result<(), BackendError>;

    /// Advances simulated time by `duration` simulator time units.
    fn advance(&mut self, duration: u64) -> Result<(), BackendError>;
}

/// Collects all port names of a backend into a vector, in index order.
pub fn port_names<B: SimBackend + ?Sized>(sim: &B) -> Vec<String> {
    (0..sim.port_count())
        .filter_map(|i| sim.port_name(i).map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_names_in_index_order() {
        let mut sim = MockSim::new();
        sim.add_port("ap_clk", 1);
        sim.add_port("ap_rst_n", 1);
        sim.add_port("in0_V_V_TDATA", 8);
        assert_eq!(
            port_names(&sim),
            vec!["ap_clk", "ap_rst_n", "in0_V_V_TDATA"]
        );
    }

    #[test]
    fn port_names_empty_backend() {
        let sim = MockSim::new();
        assert!(port_names(&sim).is_empty());
    }
}
