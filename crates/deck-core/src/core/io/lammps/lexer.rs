use super::error::{ParseErrorKind, ScriptError};
use std::io::BufRead;

/// One command after comment stripping and `&` continuation joining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based number of the first physical line of the command.
    pub line: usize,
    pub tokens: Vec<String>,
}

impl LogicalLine {
    pub fn keyword(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }
}

/// Splits a script into logical lines, dropping blank and comment-only lines.
pub fn read_logical_lines(reader: &mut impl BufRead) -> Result<Vec<LogicalLine>, ScriptError> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line_num = idx + 1;

        let (start, mut buffer) = pending.take().unwrap_or((line_num, String::new()));
        let trimmed = line.trim_end();
        if let Some(head) = trimmed.strip_suffix('&') {
            buffer.push_str(head);
            buffer.push(' ');
            pending = Some((start, buffer));
            continue;
        }
        buffer.push_str(trimmed);

        let tokens = tokenize(&buffer).map_err(|kind| ScriptError::parse(start, kind))?;
        if !tokens.is_empty() {
            lines.push(LogicalLine {
                line: start,
                tokens,
            });
        }
    }

    if let Some((start, buffer)) = pending {
        let tokens = tokenize(&buffer).map_err(|kind| ScriptError::parse(start, kind))?;
        if !tokens.is_empty() {
            lines.push(LogicalLine {
                line: start,
                tokens,
            });
        }
    }

    Ok(lines)
}

/// Whitespace tokenizer that keeps quoted text together and stops at `#`.
///
/// Quote characters are kept in the token so pass-through commands are
/// written back exactly as they were read.
fn tokenize(text: &str) -> Result<Vec<String>, ParseErrorKind> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '#' {
            break;
        }

        let mut token = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '#' {
                break;
            }
            chars.next();
            token.push(c);
            if c == '"' || c == '\'' {
                let mut closed = false;
                for inner in chars.by_ref() {
                    token.push(inner);
                    if inner == c {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(ParseErrorKind::UnterminatedQuote { token });
                }
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}
