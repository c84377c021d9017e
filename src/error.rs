use embedded_io::ErrorKind;

/// Status code reported to the command processor on success.
pub const STATUS_OK: i32 = 0;

/// Status code reported to the command processor for any failed command.
pub const STATUS_FAILED: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Wrong number of positional arguments for the mnemonic.
    InvalidArgumentCount,
    /// An argument value was rejected (illegal character, out of range, too long).
    InvalidArgument,
    /// The serial transport or display channel failed.
    Io(ErrorKind),
    /// The encoded frame does not fit the transmit buffer.
    Overflow,
    /// A typed command refused the empty response it is handed after sending.
    Parse,
    /// The response listener was invoked while already draining.
    Busy,
}

impl Error {
    /// Fixed operator-facing message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            Error::InvalidArgumentCount => "Error: invalid number of arguments, try again\n",
            Error::InvalidArgument => "Error: invalid input, try again\n",
            Error::Io(_) => "Error: serial transfer failed\n",
            Error::Overflow => "Error: command too long\n",
            Error::Parse => "Error: unexpected response\n",
            Error::Busy => "Error: listener busy\n",
        }
    }

    /// Return code propagated to the dispatcher. Failure subtypes are not
    /// distinguished.
    pub fn code(&self) -> i32 {
        STATUS_FAILED
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::Io(kind)
    }
}

/// Collapse an encoder result into the dispatcher return code.
pub fn status_code(result: &Result<(), Error>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(e) => e.code(),
    }
}

pub(crate) fn io<E: embedded_io::Error>(e: E) -> Error {
    Error::Io(e.kind())
}
