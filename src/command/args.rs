//! Argument validation and verbatim forwarding shared by all commands.

use crate::error::Error;

/// Longest argument that will be forwarded to the radio. 64 bit addresses
/// split into DH/DL need 8 hex digits; the rest is headroom.
pub const MAX_ARG_LEN: usize = 20;

/// Sample count ceiling accepted by `ATIT`.
pub const MAX_SAMPLES: u32 = 0x44;

/// An argument accepted for forwarding, already cut at its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arg<'a>(&'a [u8]);

impl<'a> Arg<'a> {
    pub fn new(raw: &'a str) -> Result<Self, Error> {
        forward(raw.as_bytes()).map(Arg)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// First character, the only one some commands transmit.
    pub fn first(&self) -> Option<u8> {
        self.0.first().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Arg<'static> {
    /// For constants known to be valid; skips the scan.
    pub(crate) const fn from_static(bytes: &'static [u8]) -> Self {
        Arg(bytes)
    }
}

/// Scan `raw` until a NUL byte or the end of the slice, whichever comes
/// first. The scan is bounded; anything longer than [`MAX_ARG_LEN`] is
/// rejected rather than truncated.
pub fn forward(raw: &[u8]) -> Result<&[u8], Error> {
    let end = raw
        .iter()
        .take(MAX_ARG_LEN + 1)
        .position(|&b| b == 0)
        .unwrap_or(raw.len());

    if end > MAX_ARG_LEN {
        return Err(Error::InvalidArgument);
    }

    Ok(&raw[..end])
}

/// Zero or one argument, the query/set shape.
pub fn optional_one<'a>(args: &[&'a str]) -> Result<Option<Arg<'a>>, Error> {
    match args {
        [] => Ok(None),
        [value] => Arg::new(*value).map(Some),
        _ => Err(Error::InvalidArgumentCount),
    }
}

/// `arg` must be exactly one of `allowed`.
pub fn one_of<'a>(arg: Arg<'a>, allowed: &[&str]) -> Result<Arg<'a>, Error> {
    if allowed.iter().any(|a| a.as_bytes() == arg.as_bytes()) {
        Ok(arg)
    } else {
        Err(Error::InvalidArgument)
    }
}

/// Parse a hexadecimal value with an optional `0x`/`0X` prefix.
pub fn parse_hex(arg: &[u8]) -> Option<u32> {
    let digits = match arg {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        _ => arg,
    };

    if digits.is_empty() || digits.len() > 8 {
        return None;
    }

    digits.iter().try_fold(0u32, |acc, &c| {
        let nibble = (c as char).to_digit(16)?;
        Some((acc << 4) | nibble)
    })
}
