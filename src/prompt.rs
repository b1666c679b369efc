use std::io::{self, Write};

pub struct ShellPrompt {
    text: String,
}

impl ShellPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        ShellPrompt { text: text.into() }
    }

    pub fn show_prompt(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{}", self.text)?;
        out.flush()
    }
}
