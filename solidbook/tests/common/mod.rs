//! Shared integration-test harness for running the `solidbook` binary.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// A scratch working directory for one `solidbook` invocation.
///
/// Running inside a fresh directory keeps a stray `solidbook.yaml` in the
/// repository from leaking into tests.
pub struct SolidbookProcess {
    dir: TempDir,
}

impl SolidbookProcess {
    /// Creates an empty working directory.
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Working directory of spawned commands.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `name` inside the working directory.
    #[allow(clippy::missing_panics_doc)]
    pub fn write_file(&self, name: &str, contents: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(path, contents).expect("failed to write file");
    }

    /// Runs `solidbook` with `args` to completion.
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_solidbook"))
            .args(args)
            .current_dir(self.dir.path())
            .env_remove("SOLIDBOOK_CONFIG")
            .env_remove("SOLIDBOOK_CONTENT_DIR")
            .env_remove("SOLIDBOOK_OUT_DIR")
            .env_remove("SOLIDBOOK_BIND")
            .env("SOLIDBOOK_COLOR", "never")
            .output()
            .expect("failed to run solidbook")
    }

    /// Runs `solidbook` and asserts it exited successfully.
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn run_ok(&self, args: &[&str]) -> Output {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "solidbook {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }
}

impl Default for SolidbookProcess {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a command's stdout as JSON.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout is not valid JSON: {e}\n{stdout}"))
}
