//! The streaming handshake engine.
//!
//! [`StreamRun::run`] pushes queued input words into a live simulation and
//! drains produced output words, cycle by cycle, across any number of named
//! ready/valid/data channels, until a target output count is reached or no
//! progress is observed for a configured number of cycles.
//!
//! Each cycle is split into a strict read phase and a write-prep phase.
//! Handshake signals are read at a stable pre-edge snapshot; the writes
//! decided from that snapshot are staged and applied only after the next
//! rising edge. Reading everything before writing anything keeps one
//! channel's `TVALID` update from leaking into another channel's same-cycle
//! handshake decision.
//!
//! Channel `X` with suffix `S` binds the signals `XSTVALID`, `XSTREADY`,
//! and `XSTDATA`. Every output channel's `TREADY` is driven high once at
//! setup and never varied: this engine always accepts and cannot model a
//! consumer exerting backpressure.

use std::collections::{BTreeMap, VecDeque};

use num_bigint::BigInt;
use veristream_backend::SimBackend;
use veristream_config::{DriverConfig, StreamSuffix};

use crate::clock::{Clock, PendingWrites};
use crate::error::DriverError;
use crate::signal::{read_signal, write_signal};

/// The pending input queues and received output buffers of one run.
///
/// Input queues are consumed from the head as the design accepts words;
/// output buffers grow at the tail as the design produces them. The same
/// value can be inspected after the run for the drained results.
#[derive(Debug, Default)]
pub struct StreamIo {
    /// Pending words per input channel, head first.
    pub inputs: BTreeMap<String, VecDeque<BigInt>>,
    /// Received words per output channel, in arrival order.
    pub outputs: BTreeMap<String, Vec<BigInt>>,
}

impl StreamIo {
    /// Creates an empty I/O description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an input channel with its pending words.
    pub fn add_input<I>(&mut self, channel: &str, words: I)
    where
        I: IntoIterator<Item = BigInt>,
    {
        self.inputs
            .insert(channel.to_string(), words.into_iter().collect());
    }

    /// Adds an output channel with an empty receive buffer.
    pub fn add_output(&mut self, channel: &str) {
        self.outputs.insert(channel.to_string(), Vec::new());
    }

    /// Returns the received words of an output channel, if it exists.
    pub fn output(&self, channel: &str) -> Option<&[BigInt]> {
        self.outputs.get(channel).map(Vec::as_slice)
    }
}

/// Observation hook invoked between cycle phases.
type Hook<'h, B> = Box<dyn FnMut(&mut B) + 'h>;

/// A configured streaming handshake run.
///
/// Built with defaults (clock `ap_clk`, suffix `_V_V_`, liveness threshold
/// 10000) and adjusted through the `with_*` methods. Hooks may observe
/// simulator state but must not drive the engine-owned handshake signals.
///
/// # Usage
///
/// ```
/// use num_bigint::BigInt;
/// use veristream_backend::MockSim;
/// use veristream_driver::{StreamIo, StreamRun};
///
/// # fn run(mut sim: MockSim) -> Result<(), veristream_driver::DriverError> {
/// let mut io = StreamIo::new();
/// io.add_input("in0", [BigInt::from(5), BigInt::from(7)]);
/// io.add_output("out0");
///
/// let cycles = StreamRun::new().run(&mut sim, &mut io, 2)?;
/// assert_eq!(io.output("out0").unwrap().len(), 2);
/// # let _ = cycles;
/// # Ok(())
/// # }
/// ```
pub struct StreamRun<'h, B: SimBackend> {
    clock: Clock,
    suffix: StreamSuffix,
    liveness_threshold: u64,
    pre_clk: Option<Hook<'h, B>>,
    post_clk: Option<Hook<'h, B>>,
}

impl<B: SimBackend> Default for StreamRun<'_, B> {
    fn default() -> Self {
        Self {
            clock: Clock::default(),
            suffix: StreamSuffix::Standard,
            liveness_threshold: 10_000,
            pre_clk: None,
            post_clk: None,
        }
    }
}

impl<'h, B: SimBackend> StreamRun<'h, B> {
    /// Creates a run with default clock, suffix, and liveness threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a run configured from a driver configuration section.
    pub fn from_config(config: &DriverConfig) -> Self {
        Self {
            clock: Clock::from_config(config),
            suffix: config.suffix,
            liveness_threshold: config.liveness_threshold,
            pre_clk: None,
            post_clk: None,
        }
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the stream-signal suffix.
    pub fn with_suffix(mut self, suffix: StreamSuffix) -> Self {
        self.suffix = suffix;
        self
    }

    /// Replaces the liveness threshold (consecutive no-progress cycles
    /// tolerated before the run fails).
    pub fn with_liveness_threshold(mut self, threshold: u64) -> Self {
        self.liveness_threshold = threshold;
        self
    }

    /// Installs a hook invoked before each cycle starts.
    pub fn with_pre_clk_hook<F: FnMut(&mut B) + 'h>(mut self, hook: F) -> Self {
        self.pre_clk = Some(Box::new(hook));
        self
    }

    /// Installs a hook invoked after each rising edge, once the staged
    /// writes are visible.
    pub fn with_post_clk_hook<F: FnMut(&mut B) + 'h>(mut self, hook: F) -> Self {
        self.post_clk = Some(Box::new(hook));
        self
    }

    /// Drives `io` against the simulation until `num_out_values` output
    /// words have been received in total, returning the number of clock
    /// cycles consumed.
    ///
    /// Output buffers in `io` are filled in place; input queues are drained
    /// as the design accepts words. At least one full cycle always runs.
    ///
    /// Fails with [`DriverError::Stalled`] once the total output count has
    /// not grown for the configured number of consecutive cycles. On any
    /// failure the simulation is left at the last applied edge; callers
    /// must reset before reusing the handle.
    pub fn run(
        &mut self,
        sim: &mut B,
        io: &mut StreamIo,
        num_out_values: usize,
    ) -> Result<u64, DriverError> {
        let suffix = self.suffix.as_str();

        // This engine always accepts: every output channel's TREADY is
        // driven high once and never varied.
        for channel in io.outputs.keys() {
            write_signal(sim, &format!("{channel}{suffix}TREADY"), &BigInt::from(1))?;
        }

        let mut total_cycles: u64 = 0;
        let mut output_count: usize = 0;
        let mut old_output_count: usize = 0;
        let mut no_change_cycles: u64 = 0;

        loop {
            if let Some(hook) = self.pre_clk.as_mut() {
                hook(sim);
            }

            // Falling edge: a stable snapshot of all handshake signals.
            self.clock.neg_edge(sim)?;

            // Read phase. Signals are only read here; acting on anything
            // written in the same cycle would corrupt the handshake when
            // channels share edge timing.
            for (channel, queue) in io.inputs.iter_mut() {
                if read_bit(sim, &format!("{channel}{suffix}TREADY"))?
                    && read_bit(sim, &format!("{channel}{suffix}TVALID"))?
                {
                    queue.pop_front();
                }
            }
            for (channel, buffer) in io.outputs.iter_mut() {
                if read_bit(sim, &format!("{channel}{suffix}TREADY"))?
                    && read_bit(sim, &format!("{channel}{suffix}TVALID"))?
                {
                    buffer.push(read_signal(sim, &format!("{channel}{suffix}TDATA"))?);
                    output_count += 1;
                }
            }

            // Write-prep phase: stage the next cycle's input-side signals,
            // applying nothing yet.
            let mut pending = PendingWrites::new();
            for (channel, queue) in io.inputs.iter() {
                pending.insert(
                    format!("{channel}{suffix}TVALID"),
                    BigInt::from(u8::from(!queue.is_empty())),
                );
                pending.insert(
                    format!("{channel}{suffix}TDATA"),
                    queue.front().cloned().unwrap_or_else(|| BigInt::from(0)),
                );
            }

            // Rising edge; the staged writes land a delta cycle after it.
            self.clock.pos_edge(sim, &pending)?;
            if let Some(hook) = self.post_clk.as_mut() {
                hook(sim);
            }

            total_cycles += 1;

            if output_count == old_output_count {
                no_change_cycles += 1;
            } else {
                no_change_cycles = 0;
                old_output_count = output_count;
            }

            if output_count == num_out_values {
                return Ok(total_cycles);
            }

            if no_change_cycles == self.liveness_threshold {
                return Err(DriverError::Stalled {
                    threshold: self.liveness_threshold,
                    cycles: total_cycles,
                });
            }
        }
    }
}

/// Reads a 1-bit handshake signal, treating exactly 1 as high.
fn read_bit<B: SimBackend>(sim: &B, name: &str) -> Result<bool, DriverError> {
    Ok(read_signal(sim, name)? == BigInt::from(1))
}
