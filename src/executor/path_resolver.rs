use std::env;
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Finds the executable for `argv[0]` on the search path.
pub struct PathResolver {
    search_path: Option<OsString>,
}

impl PathResolver {
    pub fn from_env() -> Self {
        PathResolver { search_path: env::var_os("PATH") }
    }

    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        PathResolver { search_path: Some(search_path.into()) }
    }

    /// Names containing `/` are taken as paths (relative to `cwd`) and
    /// skip the search. Relative `PATH` entries are relative to `cwd` too.
    pub fn resolve(&self, command: &str, cwd: &Path) -> Option<PathBuf> {
        if command.is_empty() {
            return None;
        }
        if command.contains('/') {
            let path = cwd.join(command);
            return is_executable(&path).then_some(path);
        }

        let paths = self.search_path.as_ref()?;
        env::split_paths(paths)
            .map(|dir| cwd.join(dir).join(command))
            .find(|candidate| is_executable(candidate))
    }
}

fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
