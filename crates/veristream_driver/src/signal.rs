//! Signal name resolution and unsigned value access.
//!
//! Port values cross the backend boundary as fixed-width binary strings;
//! this module converts between those strings and arbitrary-precision
//! integers, and resolves logical signal names against the simulator's
//! actual port names (exact match first, then the lowercased name, since
//! some netlisting flows lowercase all identifiers).
//!
//! Every call re-resolves the name: nothing is cached across calls, so a
//! backend whose port list changes between calls stays consistent.

use num_bigint::{BigInt, BigUint, Sign};
use veristream_backend::SimBackend;

use crate::error::DriverError;

/// Resolves a logical signal name to the simulator's actual port name.
///
/// Tries the name as given, then its lowercase form. Fails with
/// [`DriverError::SignalNotFound`] if neither exists among the ports.
pub fn resolve_signal<B: SimBackend + ?Sized>(sim: &B, name: &str) -> Result<String, DriverError> {
    let count = sim.port_count();
    if (0..count).any(|i| sim.port_name(i) == Some(name)) {
        return Ok(name.to_string());
    }
    let lower = name.to_lowercase();
    if (0..count).any(|i| sim.port_name(i) == Some(lower.as_str())) {
        return Ok(lower);
    }
    Err(DriverError::SignalNotFound {
        name: name.to_string(),
    })
}

/// Reads a signal's current value as an unsigned integer.
///
/// The port's binary string is interpreted as unsigned big-endian binary.
/// A value containing anything but '0' and '1' (an uninitialized or
/// tristated net) fails with [`DriverError::MalformedPortValue`].
pub fn read_signal<B: SimBackend + ?Sized>(sim: &B, name: &str) -> Result<BigInt, DriverError> {
    let actual = resolve_signal(sim, name)?;
    let bits = sim.port_value(&actual)?;
    match BigUint::parse_bytes(bits.as_bytes(), 2) {
        Some(magnitude) => Ok(BigInt::from(magnitude)),
        None => Err(DriverError::MalformedPortValue {
            name: actual,
            value: bits,
        }),
    }
}

/// Writes an unsigned integer to a signal.
///
/// The target width is taken from the length of the port's current value
/// string. The value is rendered as binary, zero-padded to that width; a
/// value too wide for the port keeps only its low bits. The truncation is
/// intentional, preserved legacy behavior.
///
/// Negative values fail with [`DriverError::NegativeValue`] before anything
/// is written: two's-complement encoding is not implemented.
pub fn write_signal<B: SimBackend + ?Sized>(
    sim: &mut B,
    name: &str,
    value: &BigInt,
) -> Result<(), DriverError> {
    let actual = resolve_signal(sim, name)?;
    let width = sim.port_value(&actual)?.len();
    if value.sign() == Sign::Minus {
        return Err(DriverError::NegativeValue {
            name: actual,
            value: value.clone(),
        });
    }
    let rendered = value.magnitude().to_str_radix(2);
    let bits = if rendered.len() >= width {
        rendered[rendered.len() - width..].to_string()
    } else {
        let mut padded = String::with_capacity(width);
        padded.extend(std::iter::repeat('0').take(width - rendered.len()));
        padded.push_str(&rendered);
        padded
    };
    sim.set_port_value(&actual, &bits)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use veristream_backend::{BackendError, MockSim};

    fn sim_with(name: &str, width: usize) -> MockSim {
        let mut sim = MockSim::new();
        sim.add_port(name, width);
        sim
    }

    // -- Resolution tests --

    #[test]
    fn resolve_exact_name() {
        let sim = sim_with("ap_clk", 1);
        assert_eq!(resolve_signal(&sim, "ap_clk").unwrap(), "ap_clk");
    }

    #[test]
    fn resolve_lowercase_fallback() {
        let sim = sim_with("ap_clk", 1);
        assert_eq!(resolve_signal(&sim, "AP_CLK").unwrap(), "ap_clk");
        assert_eq!(resolve_signal(&sim, "Ap_Clk").unwrap(), "ap_clk");
    }

    #[test]
    fn resolve_prefers_exact_over_lowercase() {
        let mut sim = MockSim::new();
        sim.add_port("Data", 8);
        sim.add_port("data", 8);
        assert_eq!(resolve_signal(&sim, "Data").unwrap(), "Data");
    }

    #[test]
    fn resolve_mixed_case_without_lowercase_port_fails() {
        // The fallback lowercases the query, not the port list: a port
        // registered in upper case is only reachable by its exact name.
        let sim = sim_with("AP_CLK", 1);
        assert!(matches!(
            resolve_signal(&sim, "Ap_Clk"),
            Err(DriverError::SignalNotFound { .. })
        ));
        assert_eq!(resolve_signal(&sim, "AP_CLK").unwrap(), "AP_CLK");
    }

    #[test]
    fn resolve_missing_signal_fails() {
        let sim = sim_with("ap_clk", 1);
        let err = resolve_signal(&sim, "ap_rst_n").unwrap_err();
        assert_eq!(err.to_string(), "signal not found: ap_rst_n");
    }

    // -- Read/write tests --

    #[test]
    fn write_then_read_round_trips() {
        let mut sim = sim_with("data", 8);
        for v in [0u32, 1, 5, 127, 255] {
            write_signal(&mut sim, "data", &BigInt::from(v)).unwrap();
            assert_eq!(read_signal(&sim, "data").unwrap(), BigInt::from(v));
        }
    }

    #[test]
    fn write_round_trips_wide_values() {
        let mut sim = sim_with("data", 100);
        let v = BigInt::from(1u8) << 99;
        write_signal(&mut sim, "data", &v).unwrap();
        assert_eq!(read_signal(&sim, "data").unwrap(), v);
    }

    #[test]
    fn write_pads_to_port_width() {
        let mut sim = sim_with("data", 8);
        write_signal(&mut sim, "data", &BigInt::from(5)).unwrap();
        assert_eq!(sim.port_value("data").unwrap(), "00000101");
    }

    #[test]
    fn write_truncates_to_low_bits() {
        // 0x1f into a 4-bit port keeps the low nibble. Intentional.
        let mut sim = sim_with("data", 4);
        write_signal(&mut sim, "data", &BigInt::from(0x1f)).unwrap();
        assert_eq!(read_signal(&sim, "data").unwrap(), BigInt::from(0xf));
        assert_eq!(sim.port_value("data").unwrap(), "1111");
    }

    #[test]
    fn write_negative_fails_without_writing() {
        let mut sim = sim_with("data", 8);
        write_signal(&mut sim, "data", &BigInt::from(42)).unwrap();
        let err = write_signal(&mut sim, "data", &BigInt::from(-1)).unwrap_err();
        assert!(matches!(err, DriverError::NegativeValue { .. }));
        // The previous value is untouched.
        assert_eq!(read_signal(&sim, "data").unwrap(), BigInt::from(42));
    }

    #[test]
    fn write_resolves_case_insensitively() {
        let mut sim = sim_with("in0_v_v_tdata", 8);
        write_signal(&mut sim, "in0_V_V_TDATA", &BigInt::from(9)).unwrap();
        assert_eq!(
            read_signal(&sim, "in0_V_V_TDATA").unwrap(),
            BigInt::from(9)
        );
    }

    // -- Malformed value handling --

    /// A backend whose single port reports a tristated value.
    struct TristatedSim;

    impl SimBackend for TristatedSim {
        fn port_count(&self) -> usize {
            1
        }

        fn port_name(&self, index: usize) -> Option<&str> {
            (index == 0).then_some("data")
        }

        fn port_value(&self, name: &str) -> Result<String, BackendError> {
            if name == "data" {
                Ok("zz01".to_string())
            } else {
                Err(BackendError::UnknownPort {
                    name: name.to_string(),
                })
            }
        }

        fn set_port_value(&mut self, _name: &str, _value: &str) -> Result<(), BackendError> {
            Ok(())
        }

        fn advance(&mut self, _duration: u64) -> Result<(), BackendError> {
            Ok(())
        }
    }

    #[test]
    fn read_non_binary_value_fails() {
        let sim = TristatedSim;
        let err = read_signal(&sim, "data").unwrap_err();
        assert!(matches!(err, DriverError::MalformedPortValue { .. }));
        assert_eq!(err.to_string(), "malformed value on port 'data': \"zz01\"");
    }
}
