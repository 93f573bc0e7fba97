//! Vivado XSI simulation-object compilation plumbing.
//!
//! Thin process-and-filesystem glue around `xelab`: generates the `.prj`
//! project file listing the HDL sources, invokes the compiler, and locates
//! the resulting `xsimk.so` shared object. The handshake driver itself
//! never touches this crate; it only ever sees a live simulation handle
//! through the backend trait. Loading the compiled object into a running
//! simulator is the embedding tool's concern.
//!
//! # Modules
//!
//! - `error` — Compilation error types
//! - `project` — `.prj` project-file generation
//! - `compile` — `xelab` invocation and output location

pub mod compile;
pub mod error;
pub mod project;

pub use compile::{CompiledSim, XsimCompiler};
pub use error::XsimError;
pub use project::write_project_file;
