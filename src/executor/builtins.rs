use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use log::info;
use crate::error::ShellError;
use crate::state::ShellState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    Continue,
    Exit,
}

pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn run(&self, args: &[String], state: &mut ShellState, out: &mut dyn Write) -> Result<BuiltinOutcome, ShellError>;
}

pub struct BuiltinManager {
    commands: HashMap<&'static str, Box<dyn BuiltinCommand>>,
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: HashMap::new(),
        };
        mgr.register(Box::new(HelpCommand));
        mgr.register(Box::new(CdCommand));
        mgr.register(Box::new(ExitCommand));
        mgr
    }

    pub fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.insert(cmd.name(), cmd);
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Run `argv[0]` as a builtin; `None` if it is not one.
    pub fn execute(
        &self,
        argv: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Option<Result<BuiltinOutcome, ShellError>> {
        let (name, args) = argv.split_first()?;
        let cmd = self.commands.get(name.as_str())?;
        Some(cmd.run(args, state, out))
    }
}

pub struct HelpCommand;

impl BuiltinCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }
    fn run(&self, _args: &[String], _state: &mut ShellState, out: &mut dyn Write) -> Result<BuiltinOutcome, ShellError> {
        const HELP: &str = "\
SHELL HELP
These are the built-in commands:
    - help
    - cd <path>
    - exit
Commands may be joined with '|', redirected with '<' and '>',
and run in the background with a trailing '&'.
Type man to know about other commands
";
        // a closed stdout is not worth failing the builtin over
        let _ = out.write_all(HELP.as_bytes()).and_then(|_| out.flush());
        Ok(BuiltinOutcome::Continue)
    }
}

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn run(&self, args: &[String], state: &mut ShellState, _out: &mut dyn Write) -> Result<BuiltinOutcome, ShellError> {
        let target = match args {
            [] => return Err(ShellError::Directory("no path directory specified".to_string())),
            [target] => target,
            _ => return Err(ShellError::Directory("too many arguments".to_string())),
        };

        let full = state.resolve_path(Path::new(target));
        let dir = fs::canonicalize(&full).map_err(|e| ShellError::Directory(format!("{}: {}", target, e)))?;
        if !dir.is_dir() {
            return Err(ShellError::Directory(format!("{}: Not a directory", target)));
        }
        info!("cd {} -> {}", target, dir.display());
        state.set_cwd(dir);
        Ok(BuiltinOutcome::Continue)
    }
}

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn run(&self, _args: &[String], _state: &mut ShellState, out: &mut dyn Write) -> Result<BuiltinOutcome, ShellError> {
        let _ = writeln!(out, "Exiting...").and_then(|_| out.flush());
        Ok(BuiltinOutcome::Exit)
    }
}
