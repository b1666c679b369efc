use std::io::{self, BufRead, Write};
use log::{debug, warn};
use crate::ast::Command;
use crate::config::Config;
use crate::error::ShellError;
use crate::executor::{open_input, open_output, BuiltinManager, BuiltinOutcome, PipelineRunner};
use crate::io::LineReader;
use crate::lexer::{split_pipeline, Tokenizer};
use crate::parser::{parse_pipeline, ParseError, RedirectionResolver};
use crate::prompt::ShellPrompt;
use crate::state::ShellState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The read-split-tokenize-dispatch loop.
///
/// Prompt, builtin output and job notices go to `out`; diagnostics go to
/// `err`. Launched programs inherit the process's own stdout and stderr.
pub struct Shell<W: Write, E: Write> {
    state: ShellState,
    prompt: ShellPrompt,
    builtins: BuiltinManager,
    runner: PipelineRunner,
    out: W,
    err: E,
}

impl Shell<io::Stdout, io::Stderr> {
    pub fn new(config: &Config) -> io::Result<Self> {
        Ok(Self::with_io(config, ShellState::new()?, io::stdout(), io::stderr()))
    }
}

impl<W: Write, E: Write> Shell<W, E> {
    pub fn with_io(config: &Config, state: ShellState, out: W, err: E) -> Self {
        Shell {
            state,
            prompt: ShellPrompt::new(config.prompt.clone()),
            builtins: BuiltinManager::new(),
            runner: PipelineRunner::new(),
            out,
            err,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Run until end of input or `exit`. Only fatal errors are returned.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), ShellError> {
        let mut reader = LineReader::new(input);
        loop {
            self.report_finished_jobs();
            // a broken prompt sink is not a reason to stop reading
            let _ = self.prompt.show_prompt(&mut self.out);

            let line = match reader.read_line()? {
                Some(line) => line,
                None => {
                    let _ = writeln!(self.out);
                    break;
                }
            };

            match self.eval_line(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => self.report(&e),
            }
        }
        let _ = self.out.flush();
        Ok(())
    }

    /// Run one line. Errors are for the caller to report; none of them are
    /// fatal.
    pub fn eval_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        let stages: Vec<Vec<String>> = split_pipeline(line).into_iter().map(Tokenizer::tokenize).collect();

        if let [argv] = stages.as_slice() {
            if argv.is_empty() {
                return Ok(Flow::Continue);
            }
            if self.builtins.is_builtin(&argv[0]) {
                let command = RedirectionResolver::resolve(argv.clone())?;
                return self.run_builtin(&command);
            }
        } else if let Some(name) = stages
            .iter()
            .filter_map(|argv| argv.first())
            .find(|name| self.builtins.is_builtin(name))
        {
            return Err(ParseError::BuiltinInPipeline(name.to_string()).into());
        }

        let pipeline = parse_pipeline(stages)?;
        debug!("running {} stage(s): {:?}", pipeline.len(), line);
        let job = self.runner.run(&pipeline, line.trim(), &self.state)?;

        if pipeline.is_background() {
            let last_pid = job.pids().last().copied().unwrap_or_default();
            let id = self.state.jobs.push(job);
            let _ = writeln!(self.out, "[{}] {}", id, last_pid);
        }
        Ok(Flow::Continue)
    }

    /// Builtins run in the shell itself: `&` is dropped, `<` only has to
    /// open, and `>` takes the builtin's output.
    fn run_builtin(&mut self, command: &Command) -> Result<Flow, ShellError> {
        if let Some(path) = &command.input {
            open_input(path, &self.state)?;
        }
        let result = match &command.output {
            Some(path) => {
                let mut file = open_output(path, &self.state)?;
                self.builtins.execute(&command.argv, &mut self.state, &mut file)
            }
            None => self.builtins.execute(&command.argv, &mut self.state, &mut self.out),
        };
        match result.transpose()? {
            Some(BuiltinOutcome::Exit) => Ok(Flow::Exit),
            Some(BuiltinOutcome::Continue) | None => Ok(Flow::Continue),
        }
    }

    fn report_finished_jobs(&mut self) {
        for finished in self.state.jobs.reap() {
            let _ = writeln!(self.out, "{}", finished);
        }
    }

    fn report(&mut self, e: &ShellError) {
        warn!("{}", e);
        let _ = writeln!(self.err, "pipesh: {}", e);
    }
}
