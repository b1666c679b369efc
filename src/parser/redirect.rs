use std::path::PathBuf;
use log::debug;
use crate::ast::Command;
use super::ParseError;

pub struct RedirectionResolver;

impl RedirectionResolver {
    /// Pull `<`, `>` and `&` (and the operands of the first two) out of a
    /// token list. Files are not opened here; the executor opens them right
    /// before launching so a failure aborts only that launch.
    pub fn resolve(tokens: Vec<String>) -> Result<Command, ParseError> {
        let mut cmd = Command::default();
        let mut iter = tokens.into_iter();

        while let Some(token) = iter.next() {
            match token.as_str() {
                "<" => {
                    let path = iter.next().ok_or(ParseError::MissingRedirectTarget('<'))?;
                    cmd.input = Some(PathBuf::from(path));
                }
                ">" => {
                    let path = iter.next().ok_or(ParseError::MissingRedirectTarget('>'))?;
                    cmd.output = Some(PathBuf::from(path));
                }
                "&" => cmd.background = true,
                _ => cmd.argv.push(token),
            }
        }

        if cmd.argv.is_empty() {
            return Err(ParseError::MissingCommand);
        }
        debug!("resolved {:?}", cmd);
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_command_untouched() {
        let cmd = RedirectionResolver::resolve(words(&["ls", "-l"])).unwrap();
        assert_eq!(cmd.argv, words(&["ls", "-l"]));
        assert_eq!(cmd.input, None);
        assert_eq!(cmd.output, None);
        assert!(!cmd.background);
    }

    #[test]
    fn test_background_marker_stripped() {
        let cmd = RedirectionResolver::resolve(words(&["cmd3", "arg1", "arg2", "&"])).unwrap();
        assert_eq!(cmd.argv, words(&["cmd3", "arg1", "arg2"]));
        assert!(cmd.background);
    }

    #[test]
    fn test_both_redirections() {
        let cmd = RedirectionResolver::resolve(words(&["sort", "<", "in.txt", ">", "out.txt"])).unwrap();
        assert_eq!(cmd.argv, words(&["sort"]));
        assert_eq!(cmd.input, Some(PathBuf::from("in.txt")));
        assert_eq!(cmd.output, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_directives_anywhere_are_removed() {
        let cmd = RedirectionResolver::resolve(words(&["wc", "&", ">", "o", "-l"])).unwrap();
        assert_eq!(cmd.argv, words(&["wc", "-l"]));
        assert!(cmd.background);
        assert_eq!(cmd.output, Some(PathBuf::from("o")));
    }

    #[test]
    fn test_last_redirection_wins() {
        let cmd = RedirectionResolver::resolve(words(&["echo", ">", "a", ">", "b"])).unwrap();
        assert_eq!(cmd.output, Some(PathBuf::from("b")));
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            RedirectionResolver::resolve(words(&["cat", "<"])),
            Err(ParseError::MissingRedirectTarget('<'))
        );
        assert_eq!(
            RedirectionResolver::resolve(words(&["echo", "hi", ">"])),
            Err(ParseError::MissingRedirectTarget('>'))
        );
    }

    #[test]
    fn test_redirection_without_command() {
        assert_eq!(
            RedirectionResolver::resolve(words(&[">", "out.txt"])),
            Err(ParseError::MissingCommand)
        );
        assert_eq!(RedirectionResolver::resolve(words(&["&"])), Err(ParseError::MissingCommand));
    }
}
