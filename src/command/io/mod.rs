//! ### I/O Commands
//! Configure the module's digital/analog lines and the I/O sampling that
//! sends their state to a remote radio. Pin configuration on the XBee 802.15.4
//! modules is split between `ATD0`..`ATD7` (DIO0..DIO7) and `ATP0`/`ATP1`
//! (the PWM pins 10 and 11).
pub mod types;

use crate::command::args::{self, Arg, MAX_SAMPLES};
use crate::command::{query_or_set_command, write_frame, NoResponse, SEPARATOR, TERMINATOR};
use crate::error::Error;
use types::*;

/// DIO Configuration D0..D7
///
/// Sent as `ATD<pin> <mode>`. Only the first character of each argument is
/// transmitted and neither is range checked: the valid modes differ per pin
/// and module, see the product manual before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DioConfig {
    /// ASCII pin digit
    pub pin: u8,
    /// ASCII mode digit
    pub mode: u8,
}

impl DioConfig {
    pub const MNEMONIC: &'static str = "ATD";

    pub fn new(pin: u8, mode: DioMode) -> Result<Self, Error> {
        Ok(Self {
            pin: dio_pin(pin)?,
            mode: digit(mode as u8),
        })
    }

    /// Arguments are not length checked, only their first characters are
    /// looked at.
    pub fn from_args(args: &[&str]) -> Result<Self, Error> {
        let [pin, mode] = args else {
            return Err(Error::InvalidArgumentCount);
        };
        Ok(Self {
            pin: first_char(pin)?,
            mode: first_char(mode)?,
        })
    }
}

impl atat::AtatCmd for DioConfig {
    type Response = NoResponse;

    const MAX_LEN: usize = Self::MNEMONIC.len() + 4;

    const EXPECTS_RESPONSE_CODE: bool = false;

    fn write(&self, buf: &mut [u8]) -> usize {
        write_frame(
            buf,
            &[
                Self::MNEMONIC.as_bytes(),
                &[self.pin, SEPARATOR, self.mode, TERMINATOR],
            ],
        )
    }

    fn parse(
        &self,
        _resp: Result<&[u8], atat::InternalError>,
    ) -> core::result::Result<Self::Response, atat::Error> {
        Ok(NoResponse)
    }
}

/// PWM Configuration P0/P1
///
/// Both the pin (`0`, `1`) and the mode (`0`..`2`) are validated, but only
/// the pin is sent: the frame is `ATP<pin>`, which reads the pin's current
/// configuration back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmConfig {
    /// ASCII pin digit
    pub pin: u8,
    /// ASCII mode digit
    pub mode: u8,
}

impl PwmConfig {
    pub const MNEMONIC: &'static str = "ATP";

    const PINS: [&'static str; 2] = ["0", "1"];
    const MODES: [&'static str; 3] = ["0", "1", "2"];

    pub fn new(pin: PwmPin, mode: PwmMode) -> Self {
        Self {
            pin: digit(pin as u8),
            mode: digit(mode as u8),
        }
    }

    /// Any violation, including the argument count, is `InvalidArgument`.
    pub fn from_args(args: &[&str]) -> Result<Self, Error> {
        let [pin, mode] = args else {
            return Err(Error::InvalidArgument);
        };
        let pin = args::one_of(Arg::new(*pin)?, &Self::PINS)?;
        let mode = args::one_of(Arg::new(*mode)?, &Self::MODES)?;

        Ok(Self {
            pin: pin.first().ok_or(Error::InvalidArgument)?,
            mode: mode.first().ok_or(Error::InvalidArgument)?,
        })
    }
}

impl atat::AtatCmd for PwmConfig {
    type Response = NoResponse;

    const MAX_LEN: usize = Self::MNEMONIC.len() + 2;

    const EXPECTS_RESPONSE_CODE: bool = false;

    fn write(&self, buf: &mut [u8]) -> usize {
        write_frame(buf, &[Self::MNEMONIC.as_bytes(), &[self.pin, TERMINATOR]])
    }

    fn parse(
        &self,
        _resp: Result<&[u8], atat::InternalError>,
    ) -> core::result::Result<Self::Response, atat::Error> {
        Ok(NoResponse)
    }
}

query_or_set_command!(
    /// Sample Rate IR
    ///
    /// Interval between I/O samples in ms, hex. `0` turns periodic sampling off.
    IoSampleRate,
    "ATIR"
);

query_or_set_command!(
    /// I/O Input Address IA
    ///
    /// Address of the remote radio allowed to drive this module's outputs.
    /// `0xFFFFFFFFFFFFFFFF` disables remote updates.
    InputAddress,
    "ATIA"
);

/// Samples before TX IT
///
/// Number of samples (hex) to collect before transmitting, at most
/// [`MAX_SAMPLES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleCount<'a> {
    pub value: Option<Arg<'a>>,
}

impl<'a> SampleCount<'a> {
    pub const MNEMONIC: &'static str = "ATIT";

    pub fn query() -> Self {
        Self { value: None }
    }

    pub fn set(value: &'a str) -> Result<Self, Error> {
        let value = Arg::new(value)?;
        match args::parse_hex(value.as_bytes()) {
            Some(count) if count <= MAX_SAMPLES => Ok(Self { value: Some(value) }),
            _ => Err(Error::InvalidArgument),
        }
    }

    pub fn from_args(args: &[&'a str]) -> Result<Self, Error> {
        match args {
            [] => Ok(Self::query()),
            [value] => Self::set(*value),
            _ => Err(Error::InvalidArgument),
        }
    }
}

impl atat::AtatCmd for SampleCount<'_> {
    type Response = NoResponse;

    const MAX_LEN: usize = Self::MNEMONIC.len() + 1 + args::MAX_ARG_LEN + 1;

    const EXPECTS_RESPONSE_CODE: bool = false;

    fn write(&self, buf: &mut [u8]) -> usize {
        match self.value {
            None => write_frame(buf, &[Self::MNEMONIC.as_bytes(), &[TERMINATOR]]),
            Some(value) => write_frame(
                buf,
                &[
                    Self::MNEMONIC.as_bytes(),
                    &[SEPARATOR],
                    value.as_bytes(),
                    &[TERMINATOR],
                ],
            ),
        }
    }

    fn parse(
        &self,
        _resp: Result<&[u8], atat::InternalError>,
    ) -> core::result::Result<Self::Response, atat::Error> {
        Ok(NoResponse)
    }
}

/// Pull-up Resistor Enable PR
///
/// `1` enables the internal 30 kΩ pull-ups on all input pins, `0` disables
/// them. Without a value nothing is sent at all; use the typed API with an
/// explicit value to change the setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullUp<'a> {
    pub value: Option<Arg<'a>>,
}

impl<'a> PullUp<'a> {
    pub const MNEMONIC: &'static str = "ATPR";

    const VALUES: [&'static str; 2] = ["0", "1"];

    pub fn set(enabled: bool) -> PullUp<'static> {
        let value = if enabled { b"1" } else { b"0" };
        PullUp {
            value: Some(Arg::from_static(value)),
        }
    }

    pub fn from_args(args: &[&'a str]) -> Result<Self, Error> {
        match args {
            [] => Ok(Self { value: None }),
            [value] => Ok(Self {
                value: Some(args::one_of(Arg::new(*value)?, &Self::VALUES)?),
            }),
            _ => Err(Error::InvalidArgument),
        }
    }
}

impl atat::AtatCmd for PullUp<'_> {
    type Response = NoResponse;

    const MAX_LEN: usize = Self::MNEMONIC.len() + 3;

    const EXPECTS_RESPONSE_CODE: bool = false;

    fn write(&self, buf: &mut [u8]) -> usize {
        match self.value {
            None => 0,
            Some(value) => write_frame(
                buf,
                &[
                    Self::MNEMONIC.as_bytes(),
                    &[SEPARATOR],
                    value.as_bytes(),
                    &[TERMINATOR],
                ],
            ),
        }
    }

    fn parse(
        &self,
        _resp: Result<&[u8], atat::InternalError>,
    ) -> core::result::Result<Self::Response, atat::Error> {
        Ok(NoResponse)
    }
}
