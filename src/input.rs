//! Turns user-supplied text into a reference sequence and a frame count.
//!
//! The engine never sees text; everything here runs before a simulation is
//! built.

use clap::ValueEnum;
use thiserror::Error;

use crate::page::Page;

pub const DEFAULT_MAX_LENGTH: usize = 2000;
pub const MIN_FRAMES: usize = 1;
pub const MAX_FRAMES: usize = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("reference string is empty; enter page numbers separated by spaces or commas")]
    Empty,

    #[error("reference string too long ({len} entries), at most {max} allowed")]
    TooLong { len: usize, max: usize },

    #[error("invalid token '{token}' at position {position}; use non-negative integers")]
    InvalidToken { token: String, position: usize },

    #[error("page number '{token}' at position {position} is too large")]
    Overflow { token: String, position: usize },

    #[error("frames must be an integer, got '{0}'")]
    InvalidFrames(String),

    #[error("frames must be between {min} and {max}, got {value}")]
    FramesOutOfRange { value: i64, min: usize, max: usize },
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

/// Parses page numbers separated by whitespace and/or commas.
pub fn parse_reference_string(text: &str, max_length: usize) -> Result<Vec<Page>, ParseError> {
    let tokens: Vec<&str> = tokenize(text).collect();
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    if tokens.len() > max_length {
        return Err(ParseError::TooLong {
            len: tokens.len(),
            max: max_length,
        });
    }

    tokens
        .into_iter()
        .enumerate()
        .map(|(idx, token)| {
            let position = idx + 1;
            // Digits only: rejects signs, so "-1" is an invalid token rather than a negative page.
            if !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::InvalidToken {
                    token: token.to_string(),
                    position,
                });
            }
            token.parse::<Page>().map_err(|_| ParseError::Overflow {
                token: token.to_string(),
                position,
            })
        })
        .collect()
}

pub fn validate_frames(text: &str, min: usize, max: usize) -> Result<usize, ParseError> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidFrames(text.to_string()))?;
    match usize::try_from(value) {
        Ok(frames) if (min..=max).contains(&frames) => Ok(frames),
        _ => Err(ParseError::FramesOutOfRange { value, min, max }),
    }
}

/// Parses both inputs with the default limits.
pub fn parse_and_validate(reference: &str, frames: &str) -> Result<(Vec<Page>, usize), ParseError> {
    let pages = parse_reference_string(reference, DEFAULT_MAX_LENGTH)?;
    let frames = validate_frames(frames, MIN_FRAMES, MAX_FRAMES)?;
    Ok((pages, frames))
}

/// Canned reference strings showing typical access patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Standard,
    Thrashing,
    Locality,
    Sequential,
    Belady,
}

impl Preset {
    pub fn reference(self) -> &'static str {
        match self {
            Preset::Standard => "7 0 1 2 0 3 0 4 2 3 0 3",
            Preset::Thrashing => "1 2 3 4 5 1 2 3 4 5",
            Preset::Locality => "1 2 1 2 1 2 1 2",
            Preset::Sequential => "1 2 3 4 5 6 7 8 9 10",
            Preset::Belady => "1 2 3 4 1 2 5 1 2 3 4 5",
        }
    }

    pub fn pages(self) -> Vec<Page> {
        tokenize(self.reference())
            .filter_map(|token| token.parse().ok())
            .collect()
    }
}
