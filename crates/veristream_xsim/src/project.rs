//! `.prj` project-file generation.
//!
//! `xelab` consumes a project file with one line per HDL source, tagged
//! with its language. `.v` sources compile as Verilog, `.vhd` as
//! VHDL-2008, both into the `work` library. Anything else is a
//! configuration error, surfaced before the compiler is ever launched.

use std::path::{Path, PathBuf};

use crate::error::XsimError;

/// The project file name written into the simulation output directory.
pub const PROJECT_FILE_NAME: &str = "rtlsim.prj";

/// Renders the project-file contents for the given sources.
pub fn project_file_contents(sources: &[String]) -> Result<String, XsimError> {
    let mut contents = String::new();
    for source in sources {
        if source.ends_with(".v") {
            contents.push_str(&format!("verilog work {source}\n"));
        } else if source.ends_with(".vhd") {
            contents.push_str(&format!("vhdl2008 work {source}\n"));
        } else {
            return Err(XsimError::UnknownSourceExtension {
                path: source.clone(),
            });
        }
    }
    Ok(contents)
}

/// Writes the `.prj` project file into `out_dir`, returning its path.
pub fn write_project_file(sources: &[String], out_dir: &Path) -> Result<PathBuf, XsimError> {
    let contents = project_file_contents(sources)?;
    let path = out_dir.join(PROJECT_FILE_NAME);
    std::fs::write(&path, contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verilog_sources_are_tagged_verilog() {
        let contents = project_file_contents(&["hdl/top.v".to_string()]).unwrap();
        assert_eq!(contents, "verilog work hdl/top.v\n");
    }

    #[test]
    fn vhdl_sources_are_tagged_vhdl2008() {
        let contents = project_file_contents(&["hdl/fifo.vhd".to_string()]).unwrap();
        assert_eq!(contents, "vhdl2008 work hdl/fifo.vhd\n");
    }

    #[test]
    fn mixed_sources_keep_order() {
        let sources = vec!["a.v".to_string(), "b.vhd".to_string(), "c.v".to_string()];
        let contents = project_file_contents(&sources).unwrap();
        assert_eq!(
            contents,
            "verilog work a.v\nvhdl2008 work b.vhd\nverilog work c.v\n"
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = project_file_contents(&["top.sv".to_string()]).unwrap_err();
        assert!(matches!(err, XsimError::UnknownSourceExtension { .. }));
        assert!(err.to_string().contains("top.sv"));
    }

    #[test]
    fn empty_source_list_renders_empty_file() {
        assert_eq!(project_file_contents(&[]).unwrap(), "");
    }

    #[test]
    fn write_project_file_creates_rtlsim_prj() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            write_project_file(&["hdl/top.v".to_string()], dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), PROJECT_FILE_NAME);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "verilog work hdl/top.v\n");
    }

    #[test]
    fn write_project_file_propagates_classification_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_project_file(&["top.xdc".to_string()], dir.path()).unwrap_err();
        assert!(matches!(err, XsimError::UnknownSourceExtension { .. }));
        // Nothing was written.
        assert!(!dir.path().join(PROJECT_FILE_NAME).exists());
    }
}
