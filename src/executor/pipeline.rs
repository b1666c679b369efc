use std::fs::File;
use std::os::fd::OwnedFd;
use std::path::PathBuf;
use std::process::{Child, Stdio};
use log::{debug, info};
use crate::ast::{Command, Pipeline};
use crate::error::ShellError;
use crate::state::ShellState;
use super::job::Job;
use super::launcher::{ProcessGroup, ProcessLauncher};
use super::path_resolver::PathResolver;
use super::redirect::{open_input, open_output};

/// A stage whose program is found and whose redirection files are open.
struct PreparedStage<'a> {
    command: &'a Command,
    program: PathBuf,
    stdin: Option<File>,
    stdout: Option<File>,
}

pub struct PipelineRunner {
    resolver: PathResolver,
}

impl Default for PipelineRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineRunner {
    pub fn new() -> Self {
        PipelineRunner { resolver: PathResolver::from_env() }
    }

    /// Launch every stage, connecting stage i's stdout to stage i+1's stdin.
    ///
    /// Redirections win over pipe ends. Nothing is started unless every
    /// program resolves and every redirection opens. Foreground jobs are
    /// waited for before returning; background jobs come back running.
    pub fn run(&self, pipeline: &Pipeline, command_line: &str, state: &ShellState) -> Result<Job, ShellError> {
        let stages = self.prepare(&pipeline.commands, state)?;

        let background = pipeline.is_background();
        let launcher = ProcessLauncher::new(state.cwd());
        let last = stages.len() - 1;
        let mut children: Vec<Child> = Vec::with_capacity(stages.len());
        let mut pgid: Option<u32> = None;
        let mut upstream: Option<OwnedFd> = None;

        for (i, stage) in stages.into_iter().enumerate() {
            let (downstream, pipe_write) = if i < last {
                match cloexec_pipe() {
                    Ok((read, write)) => (Some(read), Some(write)),
                    Err(e) => {
                        drop(upstream);
                        Job::new(children, pgid, background, command_line).abandon();
                        return Err(e.into());
                    }
                }
            } else {
                (None, None)
            };

            let stdin = match (stage.stdin, upstream.take()) {
                (Some(file), _) => Stdio::from(file),
                (None, Some(fd)) => Stdio::from(fd),
                (None, None) => Stdio::inherit(),
            };
            let stdout = match (stage.stdout, pipe_write) {
                (Some(file), _) => Stdio::from(file),
                (None, Some(fd)) => Stdio::from(fd),
                (None, None) => Stdio::inherit(),
            };
            let group = match (background, pgid) {
                (false, _) => ProcessGroup::Inherit,
                (true, None) => ProcessGroup::NewLeader,
                (true, Some(leader)) => ProcessGroup::Join(leader),
            };

            // the write end handed over in `stdout` is closed in the parent once spawn returns
            match launcher.spawn(&stage.program, &stage.command.argv, stdin, stdout, group) {
                Ok(child) => {
                    if background && pgid.is_none() {
                        pgid = Some(child.id());
                    }
                    children.push(child);
                }
                Err(e) => {
                    drop(downstream);
                    Job::new(children, pgid, background, command_line).abandon();
                    return Err(e);
                }
            }
            upstream = downstream;
        }

        let mut job = Job::new(children, pgid, background, command_line);
        if background {
            info!("background job {:?} started: {}", job.pids(), command_line);
        } else {
            let outcome = job.wait()?;
            debug!("foreground job {:?} ended: {:?}", job.pids(), outcome);
        }
        Ok(job)
    }

    /// Resolve every program, then open every input, and only then create
    /// the output files, so a stage that cannot run never truncates anything.
    fn prepare<'a>(&self, commands: &'a [Command], state: &ShellState) -> Result<Vec<PreparedStage<'a>>, ShellError> {
        let programs = commands
            .iter()
            .map(|cmd| {
                let name = cmd.program();
                self.resolver.resolve(name, state.cwd()).ok_or_else(|| ShellError::Exec {
                    program: name.to_string(),
                    reason: "command not found".to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let inputs = commands
            .iter()
            .map(|cmd| cmd.input.as_deref().map(|p| open_input(p, state)).transpose())
            .collect::<Result<Vec<_>, _>>()?;
        let outputs = commands
            .iter()
            .map(|cmd| cmd.output.as_deref().map(|p| open_output(p, state)).transpose())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(commands
            .iter()
            .zip(programs)
            .zip(inputs.into_iter().zip(outputs))
            .map(|((command, program), (stdin, stdout))| PreparedStage { command, program, stdin, stdout })
            .collect())
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn cloexec_pipe() -> nix::Result<(OwnedFd, OwnedFd)> {
    nix::unistd::pipe2(nix::fcntl::OFlag::O_CLOEXEC)
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn cloexec_pipe() -> nix::Result<(OwnedFd, OwnedFd)> {
    use std::os::fd::AsRawFd;
    use nix::fcntl::{fcntl, FcntlArg, FdFlag};

    let (read, write) = nix::unistd::pipe()?;
    for fd in [&read, &write] {
        fcntl(fd.as_raw_fd(), FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))?;
    }
    Ok((read, write))
}
