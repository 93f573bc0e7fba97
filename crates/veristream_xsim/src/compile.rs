//! `xelab` invocation and simulation-object location.
//!
//! Compiles the project's HDL sources into a loadable shared object by
//! launching `xelab` in the simulation output directory. The compiler is
//! expected to be on `PATH`; tests substitute a stand-in program.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::XsimError;
use crate::project::{write_project_file, PROJECT_FILE_NAME};

/// Simulation libraries passed to `xelab`, as used by HLS co-simulation.
const XELAB_LIBRARIES: &[&str] = &[
    "smartconnect_v1_0",
    "axi_protocol_checker_v1_1_12",
    "axi_protocol_checker_v1_1_13",
    "axis_protocol_checker_v1_1_11",
    "axis_protocol_checker_v1_1_12",
    "xil_defaultlib",
    "unisims_ver",
    "xpm",
    "floating_point_v7_1_16",
    "floating_point_v7_0_21",
];

/// A successfully compiled simulation object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSim {
    /// The simulation output directory the compiler ran in.
    pub sim_dir: PathBuf,
    /// The shared object's path relative to `sim_dir`
    /// (`xsim.dir/<top>/xsimk.so`).
    pub object_relative: PathBuf,
}

impl CompiledSim {
    /// Returns the absolute path of the compiled shared object.
    pub fn object_path(&self) -> PathBuf {
        self.sim_dir.join(&self.object_relative)
    }
}

/// Compiles HDL sources into a simulation object via `xelab`.
#[derive(Debug, Clone)]
pub struct XsimCompiler {
    /// The compiler program to invoke.
    pub program: String,
    /// Simulation libraries passed with `-L`.
    pub libraries: Vec<String>,
}

impl Default for XsimCompiler {
    fn default() -> Self {
        Self {
            program: "xelab".to_string(),
            libraries: XELAB_LIBRARIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl XsimCompiler {
    /// Creates a compiler invoking the given program with the standard
    /// library list.
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
            ..Self::default()
        }
    }

    /// Compiles `sources` for `top_module` inside `out_dir`.
    ///
    /// Writes the `.prj` project file, runs the compiler in `out_dir`, and
    /// verifies that `xsim.dir/<top_module>/xsimk.so` was produced.
    pub fn compile(
        &self,
        top_module: &str,
        sources: &[String],
        out_dir: &Path,
    ) -> Result<CompiledSim, XsimError> {
        write_project_file(sources, out_dir)?;

        let output = self
            .command(top_module)
            .current_dir(out_dir)
            .output()
            .map_err(|source| XsimError::CompilerLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(XsimError::CompilerFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let object_relative = PathBuf::from(format!("xsim.dir/{top_module}/xsimk.so"));
        let compiled = CompiledSim {
            sim_dir: out_dir.to_path_buf(),
            object_relative,
        };
        if !compiled.object_path().is_file() {
            return Err(XsimError::MissingSimObject {
                path: compiled.object_path(),
            });
        }
        Ok(compiled)
    }

    /// Compiles the design described by a project configuration.
    ///
    /// Creates the configured output directory if needed, then compiles the
    /// project's sources for its top module.
    pub fn compile_project(
        &self,
        config: &veristream_config::ProjectConfig,
    ) -> Result<CompiledSim, XsimError> {
        let out_dir = Path::new(&config.compile.out_dir);
        std::fs::create_dir_all(out_dir)?;
        self.compile(&config.project.top, &config.project.sources, out_dir)
    }

    /// Builds the compiler command line for `top_module`.
    fn command(&self, top_module: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(format!("work.{top_module}"))
            .arg("-relax")
            .arg("-prj")
            .arg(PROJECT_FILE_NAME)
            .arg("-debug")
            .arg("all")
            .arg("-dll")
            .arg("-s")
            .arg(top_module);
        for lib in &self.libraries {
            cmd.arg("-L").arg(lib);
        }
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> Vec<String> {
        vec!["top.v".to_string()]
    }

    #[test]
    fn command_line_shape() {
        let compiler = XsimCompiler::default();
        let cmd = compiler.command("add_top");
        assert_eq!(cmd.get_program(), "xelab");
        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            &args[..9],
            &[
                "work.add_top",
                "-relax",
                "-prj",
                "rtlsim.prj",
                "-debug",
                "all",
                "-dll",
                "-s",
                "add_top"
            ]
        );
        // Every library appears as an -L pair.
        let l_count = args.iter().filter(|a| *a == "-L").count();
        assert_eq!(l_count, XELAB_LIBRARIES.len());
        assert!(args.iter().any(|a| a == "xil_defaultlib"));
    }

    #[test]
    fn launch_failure_when_program_missing() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = XsimCompiler::with_program("veristream-no-such-compiler");
        let err = compiler.compile("top", &sources(), dir.path()).unwrap_err();
        match err {
            XsimError::CompilerLaunch { program, .. } => {
                assert_eq!(program, "veristream-no-such-compiler");
            }
            other => panic!("expected CompilerLaunch, got {other}"),
        }
    }

    #[test]
    fn nonzero_exit_is_compiler_failed() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = XsimCompiler::with_program("false");
        let err = compiler.compile("top", &sources(), dir.path()).unwrap_err();
        assert!(matches!(err, XsimError::CompilerFailed { .. }));
    }

    #[test]
    fn successful_exit_without_object_is_missing_object() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = XsimCompiler::with_program("true");
        let err = compiler.compile("top", &sources(), dir.path()).unwrap_err();
        match err {
            XsimError::MissingSimObject { path } => {
                assert!(path.ends_with("xsim.dir/top/xsimk.so"));
            }
            other => panic!("expected MissingSimObject, got {other}"),
        }
    }

    #[test]
    fn compile_succeeds_when_object_exists() {
        let dir = tempfile::tempdir().unwrap();
        let object_dir = dir.path().join("xsim.dir/add_top");
        std::fs::create_dir_all(&object_dir).unwrap();
        std::fs::write(object_dir.join("xsimk.so"), b"").unwrap();

        let compiler = XsimCompiler::with_program("true");
        let compiled = compiler.compile("add_top", &sources(), dir.path()).unwrap();
        assert_eq!(compiled.sim_dir, dir.path());
        assert_eq!(
            compiled.object_relative,
            PathBuf::from("xsim.dir/add_top/xsimk.so")
        );
        assert!(compiled.object_path().is_file());
        // The project file was written alongside.
        assert!(dir.path().join(PROJECT_FILE_NAME).exists());
    }

    #[test]
    fn compile_project_uses_configured_paths() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("xsim_out");
        let object_dir = out_dir.join("xsim.dir/add_top");
        std::fs::create_dir_all(&object_dir).unwrap();
        std::fs::write(object_dir.join("xsimk.so"), b"").unwrap();

        let config = veristream_config::load_config_from_str(&format!(
            r#"
[project]
name = "addstream"
top = "add_top"
sources = ["top.v"]

[compile]
out_dir = "{}"
"#,
            out_dir.display()
        ))
        .unwrap();

        let compiler = XsimCompiler::with_program("true");
        let compiled = compiler.compile_project(&config).unwrap();
        assert_eq!(compiled.sim_dir, out_dir);
    }

    #[test]
    fn unknown_extension_aborts_before_launch() {
        let dir = tempfile::tempdir().unwrap();
        // Program would fail if launched; the classification error comes first.
        let compiler = XsimCompiler::with_program("veristream-no-such-compiler");
        let err = compiler
            .compile("top", &["top.sv".to_string()], dir.path())
            .unwrap_err();
        assert!(matches!(err, XsimError::UnknownSourceExtension { .. }));
    }
}
