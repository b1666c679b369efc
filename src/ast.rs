use std::path::PathBuf;

/// One resolved pipeline stage: the argv handed to the program plus its
/// redirections. Redirection and background tokens never reach `argv`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Command {
    pub argv: Vec<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub background: bool,
}

impl Command {
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub commands: Vec<Command>,
}

impl Pipeline {
    /// `commands` must be non-empty.
    pub fn new(commands: Vec<Command>) -> Self {
        debug_assert!(!commands.is_empty());
        Pipeline { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    // Only the last stage's `&` decides; earlier ones are dropped from argv and ignored.
    pub fn is_background(&self) -> bool {
        self.commands.last().is_some_and(|c| c.background)
    }
}
