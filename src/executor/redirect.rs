use std::fs::{File, OpenOptions};
use std::path::Path;
use crate::error::ShellError;
use crate::state::ShellState;

pub fn open_input(path: &Path, state: &ShellState) -> Result<File, ShellError> {
    let full = state.resolve_path(path);
    File::open(&full).map_err(|source| ShellError::FileOpen { path: path.to_path_buf(), source })
}

/// Created if absent, truncated if present.
pub fn open_output(path: &Path, state: &ShellState) -> Result<File, ShellError> {
    let full = state.resolve_path(path);
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&full)
        .map_err(|source| ShellError::FileOpen { path: path.to_path_buf(), source })
}
