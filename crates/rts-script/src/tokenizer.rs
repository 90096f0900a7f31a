//! Line splicing and tokenizing
//!
//! Source text is first cut into logical lines (`\` at the end of a line
//! joins it with the next), then each logical line is split into tokens.

use crate::define::DefineTable;
use thiserror::Error;

/// A logical source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Line number of the first physical line (1-based)
    pub line: usize,
    pub text: String,
}

/// Why a line could not be tokenized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("unterminated string")]
    UnterminatedString,

    #[error("unbalanced parenthesis")]
    UnbalancedParen,
}

/// Split source into logical lines, joining `\` continuations
pub fn splice_lines(source: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (index, raw) in source.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let (body, continues) = match raw.strip_suffix('\\') {
            Some(body) => (body, true),
            None => (raw, false),
        };

        let mut line = pending.take().unwrap_or(LogicalLine {
            line: index + 1,
            text: String::new(),
        });
        if !line.text.is_empty() {
            line.text.push(' ');
        }
        line.text.push_str(body);

        if continues {
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }
    if let Some(line) = pending {
        lines.push(line);
    }
    lines
}

const DEFINE_KEYWORD: &str = "#DEFINE";

/// Split one logical line into tokens and apply `#DEFINE` substitution
///
/// - whitespace separates tokens outside strings and parentheses
/// - `"..."` is one token, quotes included; `\n` inside becomes a newline
/// - `(...)` nests and stays inside the surrounding token
/// - `;` or `//` outside strings and parentheses ends the line
pub fn tokenize(text: &str, defines: &DefineTable) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut depth = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_string {
            match ch {
                '"' => {
                    current.push(ch);
                    in_string = false;
                }
                '\\' if chars.peek() == Some(&'n') => {
                    chars.next();
                    current.push('\n');
                }
                _ => current.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                current.push(ch);
                in_string = true;
            }
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                if depth == 0 {
                    return Err(TokenizeError::UnbalancedParen);
                }
                depth -= 1;
                current.push(ch);
            }
            ';' if depth == 0 => break,
            '/' if depth == 0 && chars.peek() == Some(&'/') => break,
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if in_string {
        return Err(TokenizeError::UnterminatedString);
    }
    if depth > 0 {
        return Err(TokenizeError::UnbalancedParen);
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    // The name being (re)defined is never itself substituted
    let is_define = tokens
        .first()
        .is_some_and(|t| t.eq_ignore_ascii_case(DEFINE_KEYWORD));
    Ok(tokens
        .into_iter()
        .enumerate()
        .map(|(i, t)| if is_define && i < 2 { t } else { defines.substitute(t) })
        .collect())
}
