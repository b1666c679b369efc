use std::io::{self, BufRead};
use crate::error::ShellError;

/// Reads one line at a time, with no upper bound on its length.
pub struct LineReader<R> {
    inner: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        LineReader { inner }
    }

    /// Next line without its `\n`, or `None` at end of input when nothing
    /// was read. A final line lacking a terminator is still returned.
    pub fn read_line(&mut self) -> Result<Option<String>, ShellError> {
        let mut bytes: Vec<u8> = Vec::new();
        let mut read_any = false;

        loop {
            let available = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ShellError::Input(e)),
            };
            if available.is_empty() {
                if !read_any {
                    return Ok(None);
                }
                break;
            }
            read_any = true;

            let (chunk, consumed, done) = match available.iter().position(|&b| b == b'\n') {
                Some(i) => (&available[..i], i + 1, true),
                None => (available, available.len(), false),
            };
            bytes.try_reserve(chunk.len())?;
            bytes.extend_from_slice(chunk);
            self.inner.consume(consumed);
            if done {
                break;
            }
        }

        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}
