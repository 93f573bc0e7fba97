//! Clock edge toggling and the reset sequence.
//!
//! [`Clock`] advances the simulation one half period at a time. The rising
//! edge accepts a map of staged writes that are applied strictly after the
//! edge, one delta cycle later, so values read at the edge and values
//! written for the next cycle never interleave.

use std::collections::BTreeMap;

use num_bigint::BigInt;
use veristream_backend::SimBackend;
use veristream_config::DriverConfig;

use crate::error::DriverError;
use crate::signal::write_signal;

/// Default half clock period in simulator time units.
pub const DEFAULT_HALF_PERIOD: u64 = 5000;

/// Signal writes staged for application one delta cycle after a rising edge.
///
/// An ordered map so the writes apply in a deterministic order. Callers
/// construct a fresh map per call; the toggler never retains one.
pub type PendingWrites = BTreeMap<String, BigInt>;

/// A clock signal with a fixed half period.
#[derive(Clone, Debug)]
pub struct Clock {
    /// The clock signal name.
    pub name: String,
    /// Half clock period in simulator time units.
    pub half_period: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            name: "ap_clk".to_string(),
            half_period: DEFAULT_HALF_PERIOD,
        }
    }
}

impl Clock {
    /// Creates a clock with the given signal name and half period.
    pub fn new(name: &str, half_period: u64) -> Self {
        Self {
            name: name.to_string(),
            half_period,
        }
    }

    /// Creates a clock from a driver configuration section.
    pub fn from_config(config: &DriverConfig) -> Self {
        Self::new(&config.clock, config.half_period)
    }

    /// Drives the clock low and advances one half period.
    ///
    /// No other signal is touched.
    pub fn neg_edge<B: SimBackend>(&self, sim: &mut B) -> Result<(), DriverError> {
        write_signal(sim, &self.name, &BigInt::from(0))?;
        sim.advance(self.half_period)?;
        Ok(())
    }

    /// Drives the clock high, advances one half period, then applies every
    /// staged write.
    ///
    /// The staged writes land one delta cycle after the rising edge, so
    /// logic sampling at the edge sees the pre-edge values.
    pub fn pos_edge<B: SimBackend>(
        &self,
        sim: &mut B,
        pending: &PendingWrites,
    ) -> Result<(), DriverError> {
        write_signal(sim, &self.name, &BigInt::from(1))?;
        sim.advance(self.half_period)?;
        for (name, value) in pending {
            write_signal(sim, name, value)?;
        }
        Ok(())
    }

    /// One full clock cycle: falling edge, then rising edge with `pending`
    /// applied after it.
    pub fn toggle<B: SimBackend>(
        &self,
        sim: &mut B,
        pending: &PendingWrites,
    ) -> Result<(), DriverError> {
        self.neg_edge(sim)?;
        self.pos_edge(sim, pending)
    }
}

/// Drives the startup reset sequence.
///
/// Drives the clock low and `reset_name` to its asserted level (`0` if
/// `active_low`, else `1`), holds it across two full clock cycles, releases
/// it at the rising edge of a third cycle, and runs one final cycle with the
/// released value visible. The design under test therefore observes the
/// reset asserted for at least one full stable cycle before release,
/// regardless of its own reset synchronization.
pub fn reset<B: SimBackend>(
    sim: &mut B,
    clock: &Clock,
    reset_name: &str,
    active_low: bool,
) -> Result<(), DriverError> {
    write_signal(sim, &clock.name, &BigInt::from(0))?;
    let asserted = BigInt::from(u8::from(!active_low));
    write_signal(sim, reset_name, &asserted)?;
    for _ in 0..2 {
        clock.toggle(sim, &PendingWrites::new())?;
    }

    let released = BigInt::from(u8::from(active_low));
    let mut release = PendingWrites::new();
    release.insert(reset_name.to_string(), released);
    clock.toggle(sim, &release)?;
    clock.toggle(sim, &PendingWrites::new())?;
    Ok(())
}

/// Runs [`reset`] with the clock and reset taken from a driver
/// configuration section.
pub fn reset_from_config<B: SimBackend>(
    sim: &mut B,
    config: &DriverConfig,
) -> Result<(), DriverError> {
    let clock = Clock::from_config(config);
    reset(sim, &clock, &config.reset, config.active_low)
}
