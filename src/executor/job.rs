use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, ExitStatus};
use log::{info, warn};
use nix::sys::signal::Signal;
use crate::error::ShellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    ForegroundRunning,
    BackgroundDetached,
    Exited(i32),
    Signaled(Signal),
}

impl JobState {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return JobState::Exited(code);
        }
        match status.signal().map(Signal::try_from) {
            Some(Ok(sig)) => JobState::Signaled(sig),
            // a signal nix has no name for
            _ => JobState::Exited(128 + status.signal().unwrap_or(0)),
        }
    }
}

/// The processes of one launched pipeline, in stage order.
#[derive(Debug)]
pub struct Job {
    children: Vec<Child>,
    pgid: Option<u32>,
    state: JobState,
    command_line: String,
}

impl Job {
    pub fn new(children: Vec<Child>, pgid: Option<u32>, background: bool, command_line: impl Into<String>) -> Self {
        let state = if background { JobState::BackgroundDetached } else { JobState::ForegroundRunning };
        Job {
            children,
            pgid,
            state,
            command_line: command_line.into(),
        }
    }

    pub fn pids(&self) -> Vec<u32> {
        self.children.iter().map(Child::id).collect()
    }

    /// Process group shared by the stages of a background job.
    pub fn pgid(&self) -> Option<u32> {
        self.pgid
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Block until every stage has terminated. The job's final state is the
    /// last stage's outcome.
    pub fn wait(&mut self) -> Result<JobState, ShellError> {
        let mut first_err = None;
        let mut last = None;
        for child in &mut self.children {
            match child.wait() {
                Ok(status) => last = Some(status),
                Err(source) => {
                    warn!("wait for pid {} failed: {}", child.id(), source);
                    first_err.get_or_insert(ShellError::Wait { source });
                }
            }
        }
        if let Some(err) = first_err {
            return Err(err);
        }
        if let Some(status) = last {
            self.state = JobState::from_status(status);
        }
        Ok(self.state)
    }

    /// Poll without blocking; `Some` once every stage has terminated.
    pub fn try_reap(&mut self) -> Result<Option<JobState>, ShellError> {
        let mut last = None;
        for child in &mut self.children {
            match child.try_wait().map_err(|source| ShellError::Wait { source })? {
                Some(status) => last = Some(status),
                None => return Ok(None),
            }
        }
        if let Some(status) = last {
            self.state = JobState::from_status(status);
        }
        Ok(Some(self.state))
    }

    /// Kill whatever is still running and reap it. Used when a pipeline
    /// cannot be completed.
    pub fn abandon(mut self) {
        for child in &mut self.children {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedJob {
    pub id: usize,
    pub state: JobState,
    pub command_line: String,
}

impl fmt::Display for FinishedJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            JobState::Exited(0) => write!(f, "[{}] Done\t{}", self.id, self.command_line),
            JobState::Exited(code) => write!(f, "[{}] Exit {}\t{}", self.id, code, self.command_line),
            JobState::Signaled(sig) => write!(f, "[{}] Killed ({})\t{}", self.id, sig, self.command_line),
            _ => write!(f, "[{}] Running\t{}", self.id, self.command_line),
        }
    }
}

/// Background jobs that have been launched but not yet reported.
#[derive(Debug, Default)]
pub struct JobTable {
    jobs: Vec<(usize, Job)>,
}

impl JobTable {
    pub fn new() -> Self {
        JobTable { jobs: Vec::new() }
    }

    /// Ids count up from 1 and restart once the table is empty.
    pub fn push(&mut self, job: Job) -> usize {
        let id = self.jobs.last().map_or(1, |(id, _)| id + 1);
        self.jobs.push((id, job));
        id
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Job> {
        self.jobs.iter().find(|(i, _)| *i == id).map(|(_, job)| job)
    }

    /// Remove and return every job whose processes have all terminated.
    pub fn reap(&mut self) -> Vec<FinishedJob> {
        let mut finished = Vec::new();
        self.jobs.retain_mut(|(id, job)| match job.try_reap() {
            Ok(Some(state)) => {
                info!("job [{}] finished: {:?}", id, state);
                finished.push(FinishedJob {
                    id: *id,
                    state,
                    command_line: job.command_line().to_string(),
                });
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("dropping job [{}]: {}", id, e);
                false
            }
        });
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::{Command, Stdio};
    use std::thread;
    use std::time::{Duration, Instant};

    fn spawn(program: &str, args: &[&str]) -> Child {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .unwrap()
    }

    #[test]
    fn test_wait_takes_last_stage_status() {
        let mut job = Job::new(vec![spawn("false", &[]), spawn("true", &[])], None, false, "false | true");
        assert_eq!(job.state(), JobState::ForegroundRunning);
        assert_eq!(job.wait().unwrap(), JobState::Exited(0));

        let mut job = Job::new(vec![spawn("true", &[]), spawn("sh", &["-c", "exit 3"])], None, false, "x");
        assert_eq!(job.wait().unwrap(), JobState::Exited(3));
    }

    #[test]
    fn test_signal_termination() {
        let mut child = spawn("sleep", &["30"]);
        child.kill().unwrap();
        let mut job = Job::new(vec![child], None, false, "sleep 30");
        assert_eq!(job.wait().unwrap(), JobState::Signaled(Signal::SIGKILL));
    }

    #[test]
    fn test_table_reaps_finished_jobs() {
        let mut table = JobTable::new();
        let quick = table.push(Job::new(vec![spawn("true", &[])], None, true, "true &"));
        let slow = table.push(Job::new(vec![spawn("sleep", &["30"])], None, true, "sleep 30 &"));
        assert_eq!((quick, slow), (1, 2));
        assert_eq!(table.get(slow).unwrap().state(), JobState::BackgroundDetached);

        let deadline = Instant::now() + Duration::from_secs(10);
        let finished = loop {
            let done = table.reap();
            if !done.is_empty() || Instant::now() > deadline {
                break done;
            }
            thread::sleep(Duration::from_millis(20));
        };
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].to_string(), "[1] Done\ttrue &");
        assert_eq!(table.len(), 1);

        let (_, job) = table.jobs.pop().unwrap();
        job.abandon();
        assert!(table.is_empty());
    }

    #[test]
    fn test_finished_job_display() {
        let exit = FinishedJob { id: 2, state: JobState::Exited(1), command_line: "grep x".into() };
        assert_eq!(exit.to_string(), "[2] Exit 1\tgrep x");
        let killed = FinishedJob { id: 3, state: JobState::Signaled(Signal::SIGTERM), command_line: "yes".into() };
        assert_eq!(killed.to_string(), "[3] Killed (SIGTERM)\tyes");
    }
}
