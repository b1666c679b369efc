use std::io;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use log::info;
use nix::errno::Errno;
use crate::error::ShellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessGroup {
    /// Stay in the shell's group (foreground).
    Inherit,
    /// Start a new group led by the child.
    NewLeader,
    Join(u32),
}

/// Spawns single programs with their standard streams already wired.
pub struct ProcessLauncher<'a> {
    cwd: &'a Path,
}

impl<'a> ProcessLauncher<'a> {
    pub fn new(cwd: &'a Path) -> Self {
        ProcessLauncher { cwd }
    }

    /// `program` is the resolved executable; `argv[0]` is passed through
    /// as typed. The parent's copies of `stdin` and `stdout` are closed
    /// when this returns.
    pub fn spawn(
        &self,
        program: &Path,
        argv: &[String],
        stdin: Stdio,
        stdout: Stdio,
        group: ProcessGroup,
    ) -> Result<Child, ShellError> {
        let (arg0, args) = argv.split_first().ok_or_else(|| ShellError::Exec {
            program: program.display().to_string(),
            reason: "empty argument list".to_string(),
        })?;

        let mut command = Command::new(program);
        command
            .arg0(arg0)
            .args(args)
            .current_dir(self.cwd)
            .stdin(stdin)
            .stdout(stdout);
        match group {
            ProcessGroup::Inherit => {}
            ProcessGroup::NewLeader => {
                command.process_group(0);
            }
            ProcessGroup::Join(pgid) => {
                command.process_group(pgid as i32);
            }
        }

        let child = command.spawn().map_err(|source| spawn_error(arg0, source))?;
        info!("spawned {} (pid {}, {:?})", arg0, child.id(), group);
        Ok(child)
    }
}

// Failures to run the program image itself are exec errors; anything else
// means no process could be set up.
fn spawn_error(program: &str, source: io::Error) -> ShellError {
    let exec_failed = matches!(source.kind(), io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied)
        || source.raw_os_error() == Some(Errno::ENOEXEC as i32);
    if exec_failed {
        ShellError::Exec { program: program.to_string(), reason: source.to_string() }
    } else {
        ShellError::ProcessCreation { program: program.to_string(), source }
    }
}
