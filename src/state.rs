use std::io;
use std::path::{Path, PathBuf};
use crate::executor::JobTable;

/// Everything the shell carries from one line to the next.
///
/// The working directory lives here instead of in the process: children get
/// it through `current_dir` when spawned, so `cd` only affects processes
/// launched after it.
#[derive(Debug)]
pub struct ShellState {
    cwd: PathBuf,
    pub jobs: JobTable,
}

impl ShellState {
    pub fn new() -> io::Result<Self> {
        Ok(Self::with_cwd(std::env::current_dir()?))
    }

    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        ShellState {
            cwd: cwd.into(),
            jobs: JobTable::new(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }

    /// `path` as seen from the shell's working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }
}
