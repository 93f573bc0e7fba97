//! In-memory behavioral simulation backend.
//!
//! [`MockSim`] implements [`SimBackend`](crate::SimBackend) over a flat port
//! table, with optional rising-edge callbacks that model sequential logic.
//! It exists so driver code can be exercised without an external simulator:
//! register the top-level ports, nominate a clock, and attach closures that
//! run at every rising clock edge with mutable access to the port table.
//!
//! Edge callbacks observe port values as they were when the clock was
//! driven high, before any delta-cycle writes the driver applies after the
//! edge — the same ordering a real registered design would see.

use crate::error::BackendError;
use crate::SimBackend;

/// The flat port table an edge callback operates on.
///
/// Ports hold fixed-width binary strings, most significant bit first.
#[derive(Debug, Default)]
pub struct PortTable {
    ports: Vec<(String, String)>,
}

impl PortTable {
    fn index_of(&self, name: &str) -> Option<usize> {
        self.ports.iter().position(|(n, _)| n == name)
    }

    /// Returns the named port's current bit string.
    ///
    /// # Panics
    ///
    /// Panics if the port does not exist. Edge callbacks are test fixtures;
    /// a missing port there is a bug in the fixture, not a runtime condition.
    pub fn bits(&self, name: &str) -> &str {
        match self.index_of(name) {
            Some(i) => &self.ports[i].1,
            None => panic!("mock port not registered: {name}"),
        }
    }

    /// Overwrites the named port with `bits`, which must match its width.
    ///
    /// # Panics
    ///
    /// Panics if the port does not exist or the width differs.
    pub fn set_bits(&mut self, name: &str, bits: &str) {
        let i = match self.index_of(name) {
            Some(i) => i,
            None => panic!("mock port not registered: {name}"),
        };
        assert_eq!(
            self.ports[i].1.len(),
            bits.len(),
            "width mismatch writing mock port {name}"
        );
        self.ports[i].1 = bits.to_string();
    }

    /// Reads the named port as an unsigned integer (width at most 64 bits).
    ///
    /// # Panics
    ///
    /// Panics if the port does not exist or holds non-binary characters.
    pub fn get_u64(&self, name: &str) -> u64 {
        let bits = self.bits(name);
        match u64::from_str_radix(bits, 2) {
            Ok(v) => v,
            Err(_) => panic!("mock port {name} holds non-binary value {bits:?}"),
        }
    }

    /// Writes `value` to the named port, truncated to the port's width.
    ///
    /// # Panics
    ///
    /// Panics if the port does not exist.
    pub fn set_u64(&mut self, name: &str, value: u64) {
        let width = self.bits(name).len();
        let full = format!("{value:0width$b}");
        let bits = full[full.len() - width..].to_string();
        self.set_bits(name, &bits);
    }
}

/// Callback invoked at each rising clock edge.
type EdgeFn = Box<dyn FnMut(&mut PortTable)>;

/// An in-memory behavioral simulation backend.
///
/// # Usage
///
/// ```
/// use veristream_backend::{MockSim, SimBackend};
///
/// let mut sim = MockSim::new();
/// sim.add_port("ap_clk", 1);
/// sim.add_port("count", 4);
/// sim.set_clock("ap_clk");
/// sim.on_rising_edge(|ports| {
///     let c = ports.get_u64("count");
///     ports.set_u64("count", c + 1);
/// });
///
/// // One full clock cycle: low then high.
/// sim.set_port_value("ap_clk", "0").unwrap();
/// sim.advance(5000).unwrap();
/// sim.set_port_value("ap_clk", "1").unwrap();
/// sim.advance(5000).unwrap();
/// assert_eq!(sim.port_value("count").unwrap(), "0001");
/// ```
#[derive(Default)]
pub struct MockSim {
    table: PortTable,
    clock: Option<String>,
    last_clk: Option<char>,
    behaviors: Vec<EdgeFn>,
    time: u64,
}

impl MockSim {
    /// Creates an empty backend with no ports.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a top-level port of the given bit width, initialized to zero.
    pub fn add_port(&mut self, name: &str, width: usize) {
        self.table
            .ports
            .push((name.to_string(), "0".repeat(width)));
    }

    /// Nominates the clock port watched for rising edges.
    pub fn set_clock(&mut self, name: &str) {
        self.clock = Some(name.to_string());
    }

    /// Attaches a callback run at every rising edge of the nominated clock.
    pub fn on_rising_edge<F: FnMut(&mut PortTable) + 'static>(&mut self, f: F) {
        self.behaviors.push(Box::new(f));
    }

    /// Returns the total simulated time elapsed, in time units.
    pub fn elapsed(&self) -> u64 {
        self.time
    }

    fn clk_level(&self) -> Option<char> {
        let clock = self.clock.as_deref()?;
        let i = self.table.index_of(clock)?;
        self.table.ports[i].1.chars().next()
    }
}

impl SimBackend for MockSim {
    fn port_count(&self) -> usize {
        self.table.ports.len()
    }

    fn port_name(&self, index: usize) -> Option<&str> {
        self.table.ports.get(index).map(|(n, _)| n.as_str())
    }

    fn port_value(&self, name: &str) -> Result<String, BackendError> {
        match self.table.index_of(name) {
            Some(i) => Ok(self.table.ports[i].1.clone()),
            None => Err(BackendError::UnknownPort {
                name: name.to_string(),
            }),
        }
    }

    fn set_port_value(&mut self, name: &str, value: &str) -> Result<(), BackendError> {
        let i = self
            .table
            .index_of(name)
            .ok_or_else(|| BackendError::UnknownPort {
                name: name.to_string(),
            })?;
        let expected = self.table.ports[i].1.len();
        if value.len() != expected {
            return Err(BackendError::WidthMismatch {
                name: name.to_string(),
                expected,
                got: value.len(),
            });
        }
        if !value.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(BackendError::InvalidBitString {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        self.table.ports[i].1 = value.to_string();
        Ok(())
    }

    fn advance(&mut self, duration: u64) -> Result<(), BackendError> {
        self.time += duration;
        let now = self.clk_level();
        let rising = self.last_clk == Some('0') && now == Some('1');
        self.last_clk = now;
        if rising {
            for behavior in &mut self.behaviors {
                behavior(&mut self.table);
            }
        }
        Ok(())
    }
}
