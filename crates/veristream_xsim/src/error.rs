//! Compilation error types.

use std::path::PathBuf;

/// Errors that can occur while compiling a simulation object.
#[derive(Debug, thiserror::Error)]
pub enum XsimError {
    /// A source file has an extension the project file cannot classify.
    /// Only `.v` (Verilog) and `.vhd` (VHDL-2008) are recognized.
    #[error("unknown source extension for project file: {path}")]
    UnknownSourceExtension {
        /// The offending source path.
        path: String,
    },

    /// The compiler process could not be started.
    #[error("failed to launch simulation compiler '{program}': {source}")]
    CompilerLaunch {
        /// The compiler program name.
        program: String,
        /// The underlying launch failure.
        #[source]
        source: std::io::Error,
    },

    /// The compiler ran but exited unsuccessfully.
    #[error("simulation compiler exited with {status}")]
    CompilerFailed {
        /// The compiler's exit status.
        status: std::process::ExitStatus,
        /// Captured standard error output.
        stderr: String,
    },

    /// The compiler reported success but produced no simulation object.
    #[error("compiled simulation object not found at {path}")]
    MissingSimObject {
        /// Where the object was expected.
        path: PathBuf,
    },

    /// An I/O error occurred while writing the project file.
    #[error("project file I/O error: {0}")]
    Io(#[from] std::io::Error),
}
