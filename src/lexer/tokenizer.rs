use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InSingleQuote,
    InDoubleQuote,
}

fn is_delimiter(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Control character for `\<ch>` inside quotes, if `ch` is in the table.
fn escape_char(ch: char) -> Option<char> {
    let mapped = match ch {
        'n' => '\n',
        't' => '\t',
        'v' => '\x0b',
        'b' => '\x08',
        'r' => '\r',
        'f' => '\x0c',
        'a' => '\x07',
        '0' => '\0',
        '\\' => '\\',
        _ => return None,
    };
    Some(mapped)
}

pub struct Tokenizer;

impl Tokenizer {
    /// Split one command segment into argument tokens.
    ///
    /// Never fails: an unterminated quote or a trailing backslash leaves the
    /// buffered text as the last token. Zero tokens means a blank segment.
    pub fn tokenize(segment: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut buf = String::new();
        // `''` and `""` still produce an (empty) token
        let mut in_token = false;
        let mut state = State::Normal;
        let mut chars = segment.chars();

        while let Some(ch) = chars.next() {
            match (state, ch) {
                (State::Normal, c) if is_delimiter(c) => {
                    if in_token {
                        tokens.push(std::mem::take(&mut buf));
                        in_token = false;
                    }
                }
                (State::Normal, '\'') => {
                    state = State::InSingleQuote;
                    in_token = true;
                }
                (State::Normal, '"') => {
                    state = State::InDoubleQuote;
                    in_token = true;
                }
                (State::Normal, '\\') => {
                    in_token = true;
                    match chars.next() {
                        Some(next) => buf.push(next),
                        None => buf.push('\\'),
                    }
                }
                (State::InSingleQuote, '\'') | (State::InDoubleQuote, '"') => {
                    state = State::Normal;
                }
                (State::InSingleQuote | State::InDoubleQuote, '\\') => match chars.next() {
                    Some(next) => buf.push(escape_char(next).unwrap_or(next)),
                    None => buf.push('\\'),
                },
                (_, c) => {
                    in_token = true;
                    buf.push(c);
                }
            }
        }

        if state != State::Normal {
            debug!("unterminated quote in {:?}, keeping buffered text", segment);
        }
        if in_token {
            tokens.push(buf);
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(src: &str) -> Vec<String> {
        Tokenizer::tokenize(src)
    }

    #[test]
    fn test_double_quoted_argument() {
        assert_eq!(toks("echo \"Hello, world!\""), vec!["echo", "Hello, world!"]);
    }

    #[test]
    fn test_background_marker_is_a_token() {
        assert_eq!(toks("cmd3 arg1 arg2 &"), vec!["cmd3", "arg1", "arg2", "&"]);
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(toks("  ls \t -l   -a  "), vec!["ls", "-l", "-a"]);
        assert!(toks("").is_empty());
        assert!(toks(" \t ").is_empty());
    }

    #[test]
    fn test_single_quotes_keep_double_quotes() {
        assert_eq!(toks("echo 'say \"hi\"'"), vec!["echo", "say \"hi\""]);
        assert_eq!(toks("echo \"it's\""), vec!["echo", "it's"]);
    }

    #[test]
    fn test_quotes_join_adjacent_text() {
        assert_eq!(toks("pre\"mid dle\"post"), vec!["premid dlepost"]);
    }

    #[test]
    fn test_empty_quotes_make_empty_token() {
        assert_eq!(toks("echo \"\""), vec!["echo", ""]);
        assert_eq!(toks("echo '' x"), vec!["echo", "", "x"]);
    }

    #[test]
    fn test_backslash_outside_quotes_escapes() {
        assert_eq!(toks("touch my\\ file"), vec!["touch", "my file"]);
        assert_eq!(toks("echo \\\"q\\\""), vec!["echo", "\"q\""]);
        assert_eq!(toks("echo a\\|b"), vec!["echo", "a|b"]);
        assert_eq!(toks("echo \\n"), vec!["echo", "n"]);
    }

    #[test]
    fn test_escape_table_inside_quotes() {
        assert_eq!(toks("\"a\\tb\\nc\""), vec!["a\tb\nc"]);
        assert_eq!(toks("'\\v\\b\\r\\f\\a'"), vec!["\x0b\x08\r\x0c\x07"]);
        assert_eq!(toks("\"nul\\0\""), vec!["nul\0"]);
        assert_eq!(toks("\"back\\\\slash\""), vec!["back\\slash"]);
    }

    #[test]
    fn test_unknown_escape_inside_quotes_drops_backslash() {
        assert_eq!(toks("echo \"The price is \\$10.\""), vec!["echo", "The price is $10."]);
        assert_eq!(toks("\"say \\\"hi\\\"\""), vec!["say \"hi\""]);
    }

    #[test]
    fn test_unterminated_quote_keeps_text() {
        assert_eq!(toks("echo \"open ended"), vec!["echo", "open ended"]);
        assert_eq!(toks("echo 'x"), vec!["echo", "x"]);
    }

    #[test]
    fn test_trailing_backslash_kept_verbatim() {
        assert_eq!(toks("echo abc\\"), vec!["echo", "abc\\"]);
        assert_eq!(toks("echo \"abc\\"), vec!["echo", "abc\\"]);
    }
}
