//! Line-oriented operator console.
//!
//! Lines are split into at most [`MAX_TOKENS`] whitespace separated tokens;
//! the first names a [`COMMANDS`] entry and the rest become its arguments.

use embedded_hal::delay::DelayNs;
use embedded_io::{ErrorKind, Write, WriteFmtError};

use crate::blocking::XBeeClient;
use crate::command::table::{self, Action, COMMANDS};
use crate::command::Invocation;
use crate::error::{Error, STATUS_FAILED};

/// Tokens per line, mnemonic included.
pub const MAX_TOKENS: usize = 8;

/// Operator line buffer size.
pub const LINE_BUF_SIZE: usize = 64;

pub const PROMPT: &str = "\n> ";
pub const HELP_HEADER: &str = "\nAvailable commands\n------------------\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// First token is not in the command table.
    BadCommand,
    /// More than [`MAX_TOKENS`] tokens on the line.
    TooManyArgs,
    /// The command was found but failed.
    Command(Error),
    /// Writing to the display failed.
    Io(ErrorKind),
}

impl ConsoleError {
    pub fn code(&self) -> i32 {
        match self {
            ConsoleError::Command(e) => e.code(),
            _ => STATUS_FAILED,
        }
    }

    /// Line printed by the main loop after a failed command.
    pub fn report(&self) -> &'static str {
        match self {
            ConsoleError::BadCommand => "Bad command!\n",
            ConsoleError::TooManyArgs => "Too many arguments for command processor!\n",
            ConsoleError::Command(_) | ConsoleError::Io(_) => "Command returned error code\n",
        }
    }
}

impl From<Error> for ConsoleError {
    fn from(e: Error) -> Self {
        ConsoleError::Command(e)
    }
}

fn display_err<E: embedded_io::Error>(e: E) -> ConsoleError {
    ConsoleError::Io(e.kind())
}

fn fmt_err<E: embedded_io::Error>(e: WriteFmtError<E>) -> ConsoleError {
    match e {
        WriteFmtError::Other(e) => display_err(e),
        _ => ConsoleError::Io(ErrorKind::Other),
    }
}

/// Whitespace separated tokens of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a>(heapless::Vec<&'a str, MAX_TOKENS>);

impl<'a> Tokens<'a> {
    pub fn as_slice(&self) -> &[&'a str] {
        &self.0
    }

    /// `None` for a blank line.
    pub fn invocation(&self) -> Option<Invocation<'_>> {
        let (mnemonic, args) = self.0.split_first()?;
        Some(Invocation::new(mnemonic, args))
    }
}

pub fn tokenize(line: &str) -> Result<Tokens<'_>, ConsoleError> {
    let mut tokens = heapless::Vec::new();
    for token in line.split([' ', '\t']).filter(|t| !t.is_empty()) {
        tokens.push(token).map_err(|_| ConsoleError::TooManyArgs)?;
    }
    Ok(Tokens(tokens))
}

/// Operator console writing to `display`.
pub struct Console<O> {
    display: O,
}

impl<O: Write> Console<O> {
    pub fn new(display: O) -> Self {
        Self { display }
    }

    pub fn prompt(&mut self) -> Result<(), ConsoleError> {
        self.display
            .write_all(PROMPT.as_bytes())
            .map_err(display_err)?;
        self.display.flush().map_err(display_err)
    }

    /// List every table entry with its help text.
    pub fn help(&mut self) -> Result<(), ConsoleError> {
        self.display
            .write_all(HELP_HEADER.as_bytes())
            .map_err(display_err)?;
        for entry in COMMANDS {
            writeln!(self.display, "{:>6}: {}", entry.mnemonic, entry.help).map_err(fmt_err)?;
        }
        Ok(())
    }

    /// Tokenize, look up and run one line.
    ///
    /// A failing command has its error message written to the display
    /// before the error is returned.
    pub fn process_line<W, D>(
        &mut self,
        line: &str,
        xbee: &mut XBeeClient<W, D>,
    ) -> Result<(), ConsoleError>
    where
        W: Write,
        D: DelayNs,
    {
        let tokens = tokenize(line)?;
        let Some(invocation) = tokens.invocation() else {
            return Ok(());
        };

        let entry = table::lookup(invocation.mnemonic).ok_or(ConsoleError::BadCommand)?;
        match entry.action {
            Action::Help => self.help(),
            Action::Encode(_) => match xbee.execute(&invocation) {
                Ok(()) => Ok(()),
                Err(e) => {
                    debug!("{} failed: {:?}", entry.mnemonic, e);
                    self.display
                        .write_all(e.message().as_bytes())
                        .map_err(display_err)?;
                    Err(ConsoleError::Command(e))
                }
            },
        }
    }

    /// Print the main loop's verdict for a processed line. Nothing is
    /// printed on success.
    pub fn report(&mut self, result: &Result<(), ConsoleError>) -> Result<(), ConsoleError> {
        if let Err(e) = result {
            self.display
                .write_all(e.report().as_bytes())
                .map_err(display_err)?;
        }
        Ok(())
    }

    pub fn release(self) -> O {
        self.display
    }
}

/// Accumulates operator bytes into lines.
///
/// `\r` or `\n` completes a line; a `\n` straight after `\r` is swallowed so
/// CRLF terminals do not produce blank lines. Backspace and DEL erase the
/// last byte, other control bytes are ignored and bytes past capacity are
/// dropped.
#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize = LINE_BUF_SIZE> {
    buf: heapless::Vec<u8, N>,
    complete: bool,
    last_was_cr: bool,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
            complete: false,
            last_was_cr: false,
        }
    }

    /// Feed one byte; returns the line once it is complete.
    pub fn push(&mut self, byte: u8) -> Option<&str> {
        if self.complete {
            self.buf.clear();
            self.complete = false;
        }

        let after_cr = core::mem::replace(&mut self.last_was_cr, byte == b'\r');
        match byte {
            b'\n' if after_cr => {}
            b'\r' | b'\n' => {
                self.complete = true;
                return Some(self.line());
            }
            0x08 | 0x7F => {
                self.buf.pop();
            }
            0x20..=0x7E => {
                if self.buf.push(byte).is_err() {
                    trace!("Line buffer full, dropping byte");
                }
            }
            _ => {}
        }
        None
    }

    /// Bytes collected so far.
    pub fn line(&self) -> &str {
        // Only printable ASCII is ever stored
        core::str::from_utf8(&self.buf).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.complete = false;
        self.last_was_cr = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_helpers::{setup, EventLog, MockDelay, MockSerial};

    struct Fixture {
        console: Console<MockSerial>,
        xbee: XBeeClient<MockSerial, MockDelay>,
        display: EventLog,
        radio: EventLog,
    }

    fn fixture() -> Fixture {
        let (tx, delay, radio) = setup();
        let display = EventLog::default();
        Fixture {
            console: Console::new(MockSerial::new(display.clone())),
            xbee: XBeeClient::new(tx, delay),
            display,
            radio,
        }
    }

    #[test]
    fn tokenizer_splits_on_whitespace() {
        let tokens = tokenize("  ATD\t3  4 ").unwrap();
        assert_eq!(tokens.as_slice(), &["ATD", "3", "4"]);

        let inv = tokens.invocation().unwrap();
        assert_eq!(inv.mnemonic, "ATD");
        assert_eq!(inv.args, &["3", "4"]);

        assert!(tokenize("   ").unwrap().invocation().is_none());
    }

    #[test]
    fn tokenizer_limit() {
        assert!(tokenize("a b c d e f g h").is_ok());
        assert_eq!(
            tokenize("a b c d e f g h i"),
            Err(ConsoleError::TooManyArgs)
        );
    }

    #[test]
    fn runs_command() {
        let mut f = fixture();

        f.console.process_line("ATID 3332", &mut f.xbee).unwrap();

        assert_eq!(f.radio.written(), b"ATID 3332\r");
        assert!(f.display.written().is_empty());
    }

    #[test]
    fn blank_line_is_ignored() {
        let mut f = fixture();

        assert_eq!(f.console.process_line("", &mut f.xbee), Ok(()));
        assert!(f.radio.events().is_empty());
        assert!(f.display.events().is_empty());
    }

    #[test]
    fn unknown_mnemonic() {
        let mut f = fixture();

        let res = f.console.process_line("ATXX 1", &mut f.xbee);
        assert_eq!(res, Err(ConsoleError::BadCommand));
        assert!(f.radio.events().is_empty());

        f.console.report(&res).unwrap();
        assert_eq!(f.display.written_str(), "Bad command!\n");
    }

    #[test]
    fn too_many_tokens() {
        let mut f = fixture();

        let res = f.console.process_line("ATID 1 2 3 4 5 6 7 8", &mut f.xbee);
        assert_eq!(res, Err(ConsoleError::TooManyArgs));
        assert!(f.radio.events().is_empty());

        f.console.report(&res).unwrap();
        assert_eq!(
            f.display.written_str(),
            "Too many arguments for command processor!\n"
        );
    }

    #[test]
    fn failing_command_prints_its_message() {
        let mut f = fixture();

        let res = f.console.process_line("ATMY 1 2", &mut f.xbee);
        assert_eq!(res, Err(ConsoleError::Command(Error::InvalidArgumentCount)));
        assert_eq!(res.unwrap_err().code(), 1);
        assert!(f.radio.events().is_empty());

        f.console.report(&res).unwrap();
        assert_eq!(
            f.display.written_str(),
            "Error: invalid number of arguments, try again\nCommand returned error code\n"
        );
    }

    #[test]
    fn too_few_arguments_message() {
        let mut f = fixture();

        let res = f.console.process_line("ATD 3", &mut f.xbee);
        assert_eq!(res, Err(ConsoleError::Command(Error::InvalidArgumentCount)));
        assert!(f.radio.events().is_empty());
        assert_eq!(
            f.display.written_str(),
            "Error: invalid number of arguments, try again\n"
        );
    }

    #[test]
    fn invalid_value_message() {
        let mut f = fixture();

        let res = f.console.process_line("ATPR 2", &mut f.xbee);
        assert_eq!(res, Err(ConsoleError::Command(Error::InvalidArgument)));
        assert_eq!(f.display.written_str(), "Error: invalid input, try again\n");
    }

    #[test]
    fn help_lists_every_entry() {
        let mut f = fixture();

        f.console.process_line("?", &mut f.xbee).unwrap();

        let out = f.display.written_str();
        assert!(out.starts_with(HELP_HEADER));
        assert_eq!(out.lines().count(), 3 + COMMANDS.len());
        assert!(out.contains("  help: Display list of commands\n"));
        assert!(out.contains("   +++: Enter XBee Command Mode\n"));
        assert!(out.contains("  ATID: "));
        assert!(f.radio.events().is_empty());
    }

    #[test]
    fn prompt() {
        let mut f = fixture();
        f.console.prompt().unwrap();
        assert_eq!(f.display.written_str(), "\n> ");
    }

    #[test]
    fn line_buffer_collects_a_line() {
        let mut buf: LineBuffer = LineBuffer::new();

        for &b in b"ATID 12" {
            assert_eq!(buf.push(b), None);
        }
        assert_eq!(buf.push(b'\r'), Some("ATID 12"));

        // Swallowed LF, then the buffer starts over
        assert_eq!(buf.push(b'\n'), None);
        assert_eq!(buf.push(b'A'), None);
        assert_eq!(buf.push(b'\n'), Some("A"));
    }

    #[test]
    fn line_buffer_editing() {
        let mut buf: LineBuffer = LineBuffer::new();

        for &b in b"ATIDX\x08 1\x7F2\x1b" {
            buf.push(b);
        }
        assert_eq!(buf.line(), "ATID 2");

        buf.clear();
        assert_eq!(buf.line(), "");
    }

    #[test]
    fn line_buffer_drops_overflow() {
        let mut buf: LineBuffer<4> = LineBuffer::new();

        for &b in b"ABCDEF" {
            buf.push(b);
        }
        assert_eq!(buf.push(b'\r'), Some("ABCD"));
    }
}
