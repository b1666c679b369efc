mod redirect;

use thiserror::Error;
use crate::ast::Pipeline;

pub use redirect::RedirectionResolver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing file name after '{0}'")]
    MissingRedirectTarget(char),
    #[error("redirection without a command")]
    MissingCommand,
    #[error("empty command at pipeline stage {0}")]
    EmptyStage(usize),
    #[error("builtin '{0}' cannot be part of a pipeline")]
    BuiltinInPipeline(String),
}

/// Turn the token lists of every stage into a pipeline.
pub fn parse_pipeline(stages: Vec<Vec<String>>) -> Result<Pipeline, ParseError> {
    let mut commands = Vec::with_capacity(stages.len());
    for (i, tokens) in stages.into_iter().enumerate() {
        if tokens.is_empty() {
            return Err(ParseError::EmptyStage(i + 1));
        }
        commands.push(RedirectionResolver::resolve(tokens)?);
    }
    if commands.is_empty() {
        return Err(ParseError::MissingCommand);
    }
    Ok(Pipeline::new(commands))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{split_pipeline, Tokenizer};

    fn parse(line: &str) -> Result<Pipeline, ParseError> {
        let stages = split_pipeline(line).into_iter().map(Tokenizer::tokenize).collect();
        parse_pipeline(stages)
    }

    #[test]
    fn test_full_line() {
        let pipeline = parse("cmd1 < inputFile.txt | cmd2 | cmd3 arg1 arg2 &").unwrap();
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.commands[0].argv, vec!["cmd1"]);
        assert_eq!(pipeline.commands[0].input.as_deref(), Some(std::path::Path::new("inputFile.txt")));
        assert_eq!(pipeline.commands[1].argv, vec!["cmd2"]);
        assert_eq!(pipeline.commands[2].argv, vec!["cmd3", "arg1", "arg2"]);
        assert!(pipeline.is_background());
    }

    #[test]
    fn test_ampersand_on_earlier_stage_does_not_background() {
        let pipeline = parse("sleep 1 & | cat").unwrap();
        assert_eq!(pipeline.commands[0].argv, vec!["sleep", "1"]);
        assert!(!pipeline.is_background());
    }

    #[test]
    fn test_quoted_pipe_stays_in_argument() {
        let pipeline = parse("echo 'a | b' | tr a-z A-Z").unwrap();
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.commands[0].argv, vec!["echo", "a | b"]);
    }

    #[test]
    fn test_empty_stage_rejected() {
        assert_eq!(parse("ls || wc"), Err(ParseError::EmptyStage(2)));
        assert_eq!(parse("| wc"), Err(ParseError::EmptyStage(1)));
        assert_eq!(parse("ls |"), Err(ParseError::EmptyStage(2)));
    }
}
