//! Splits one line of UCI text into words.
//!
//! Words are separated by whitespace. A word may mix bare text,
//! `'single quoted'` text (taken literally) and `"double quoted"` text
//! (backslash escapes the next character); adjacent fragments concatenate.
//! A `#` at the start of a word comments out the rest of the line.

use std::iter::Peekable;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LexError {
    #[error("unterminated {0} quote")]
    UnterminatedQuote(&'static str),

    #[error("trailing backslash escapes nothing")]
    TrailingEscape,
}

pub(crate) fn tokenize(line: &str) -> Result<Vec<String>, LexError> {
    let mut words = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            _ = chars.next();
        }
        match chars.peek() {
            None | Some('#') => break,
            Some(_) => words.push(read_word(&mut chars)?),
        }
    }

    Ok(words)
}

fn read_word<C>(chars: &mut Peekable<C>) -> Result<String, LexError>
where
    C: Iterator<Item = char>,
{
    let mut word = String::new();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => break,
            '\'' => {
                _ = chars.next();
                read_single_quoted(chars, &mut word)?;
            }
            '"' => {
                _ = chars.next();
                read_double_quoted(chars, &mut word)?;
            }
            '\\' => {
                _ = chars.next();
                word.push(chars.next().ok_or(LexError::TrailingEscape)?);
            }
            c => {
                _ = chars.next();
                word.push(c);
            }
        }
    }

    Ok(word)
}

fn read_single_quoted<C>(chars: &mut C, word: &mut String) -> Result<(), LexError>
where
    C: Iterator<Item = char>,
{
    for c in chars.by_ref() {
        if c == '\'' {
            return Ok(());
        }
        word.push(c);
    }
    Err(LexError::UnterminatedQuote("single"))
}

fn read_double_quoted<C>(chars: &mut C, word: &mut String) -> Result<(), LexError>
where
    C: Iterator<Item = char>,
{
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(()),
            '\\' => word.push(chars.next().ok_or(LexError::TrailingEscape)?),
            c => word.push(c),
        }
    }
    Err(LexError::UnterminatedQuote("double"))
}
