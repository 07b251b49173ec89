use crate::error::{AppError, Result};

use std::borrow::Cow;
use std::ffi::OsString;
use std::str::FromStr;

use palette::Srgb;

/// Parses `0x1E2761`, `#1E2761` or `1E2761`. Short `#abc` forms are rejected,
/// tricolor only understands six digits.
pub fn parse_hex_color(token: &str) -> Result<Srgb<u8>> {
    let hex = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .or_else(|| token.strip_prefix('#'))
        .unwrap_or(token);

    if hex.len() != 6 {
        return Err(AppError::InvalidColor {
            token: token.to_string(),
            reason: format!("expected 6 hex digits, found {}", hex.len()),
        });
    }
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(AppError::InvalidColor {
            token: token.to_string(),
            reason: format!("'{}' is not a hex digit", c),
        });
    }

    Srgb::<u8>::from_str(hex).map_err(|e| AppError::InvalidColor {
        token: token.to_string(),
        reason: e.to_string(),
    })
}

/// Renders a command line the way a user would type it into a POSIX shell.
/// Arguments that are not valid UTF-8 are shown lossily.
pub fn render_command(program: &str, args: &[OsString]) -> String {
    std::iter::once(Cow::Borrowed(program))
        .chain(args.iter().map(|arg| arg.to_string_lossy()))
        .map(|word| shell_quote(&word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));

    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
