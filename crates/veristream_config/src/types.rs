//! Configuration types deserialized from `veristream.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// The top-level project configuration parsed from `veristream.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Design-under-test metadata (name, top module, HDL sources).
    pub project: ProjectMeta,
    /// Handshake-driver settings (clock, reset, suffix, liveness).
    #[serde(default)]
    pub driver: DriverConfig,
    /// Simulation-object compilation settings.
    #[serde(default)]
    pub compile: CompileConfig,
}

/// Design-under-test metadata required in every `veristream.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// The top-level module name of the design under test.
    pub top: String,
    /// Paths to the HDL source files (`.v` or `.vhd`).
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Handshake-driver settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// The clock signal name.
    pub clock: String,
    /// The reset signal name.
    pub reset: String,
    /// Whether the reset is active-low.
    pub active_low: bool,
    /// Half clock period in simulator time units. Must be greater than zero.
    pub half_period: u64,
    /// The stream-signal naming suffix.
    pub suffix: StreamSuffix,
    /// Consecutive no-progress cycles tolerated before declaring a stall.
    /// Must be at least 1.
    pub liveness_threshold: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            clock: "ap_clk".to_string(),
            reset: "ap_rst_n".to_string(),
            active_low: true,
            half_period: 5000,
            suffix: StreamSuffix::Standard,
            liveness_threshold: 10_000,
        }
    }
}

/// Simulation-object compilation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Output directory for the compiled simulation object.
    pub out_dir: String,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            out_dir: "xsim_out".to_string(),
        }
    }
}

/// The naming-convention token joining a channel name to its handshake
/// signals, so channel `X` binds `X<suffix>TVALID`, `X<suffix>TREADY`,
/// and `X<suffix>TDATA`.
///
/// The set of recognized tokens is closed: `_V_V_` (the standard
/// interface-generation convention) and `_V_` (the alternate convention
/// used by some toolchains). Any other token fails deserialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamSuffix {
    /// The `_V_V_` convention.
    #[default]
    Standard,
    /// The `_V_` convention.
    Alternate,
}

impl StreamSuffix {
    /// Returns the suffix token as it appears in signal names.
    pub fn as_str(self) -> &'static str {
        match self {
            StreamSuffix::Standard => "_V_V_",
            StreamSuffix::Alternate => "_V_",
        }
    }

    /// Parses a suffix token, returning `None` for unrecognized tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "_V_V_" => Some(StreamSuffix::Standard),
            "_V_" => Some(StreamSuffix::Alternate),
            _ => None,
        }
    }
}

impl fmt::Display for StreamSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StreamSuffix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SuffixVisitor;

        impl Visitor<'_> for SuffixVisitor {
            type Value = StreamSuffix;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a stream suffix token, \"_V_V_\" or \"_V_\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<StreamSuffix, E> {
                StreamSuffix::from_token(v)
                    .ok_or_else(|| E::custom(format!("unrecognized stream suffix '{v}'")))
            }
        }

        deserializer.deserialize_str(SuffixVisitor)
    }
}
