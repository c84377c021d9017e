//! AT Commands for XBee modules in transparent mode
//! Following the Digi XBee/XBee-PRO RF Modules product manual (90000982), "AT Commands" chapter
//!
//! Frames are the mnemonic, an optional space separated parameter and a single
//! carriage return. The only exception is the `+++` escape sequence, which
//! has no terminator and must be surrounded by guard times.

pub mod args;
pub mod general;
pub mod io;
pub mod network;
pub mod table;

use atat::atat_derive::AtatResp;

use crate::error::Error;

pub use general::{
    Attention, EnterCommandMode, ExitCommandMode, RestoreDefaults, SerialNumberHigh,
    SerialNumberLow, SupplyVoltage, WriteSettings,
};
pub use io::{DioConfig, InputAddress, IoSampleRate, PullUp, PwmConfig, SampleCount};
pub use network::{DestinationHigh, DestinationLow, MyAddress, PanId};

/// Command terminator, carriage return only.
pub const TERMINATOR: u8 = b'\r';

/// Separator between mnemonic and parameter.
pub const SEPARATOR: u8 = b' ';

/// Large enough for the longest mnemonic, a separator, a full
/// [`args::MAX_ARG_LEN`] parameter and the terminator.
pub const MAX_FRAME_LEN: usize = 32;

/// The radio answers on its own schedule; nothing is parsed back.
#[derive(Debug, Clone, PartialEq, AtatResp)]
pub struct NoResponse;

/// Copy `parts` back to back into `buf`, returning the frame length.
pub(crate) fn write_frame(buf: &mut [u8], parts: &[&[u8]]) -> usize {
    let mut len = 0;
    for part in parts {
        buf[len..len + part.len()].copy_from_slice(part);
        len += part.len();
    }
    len
}

/// Commands that take no parameter. Any arguments are ignored.
macro_rules! fixed_command {
    ($(#[$meta:meta])* $name:ident, $mnemonic:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl $name {
            pub const MNEMONIC: &'static str = $mnemonic;

            pub fn from_args(_args: &[&str]) -> Result<Self, $crate::error::Error> {
                Ok($name)
            }
        }

        impl atat::AtatCmd for $name {
            type Response = $crate::command::NoResponse;

            const MAX_LEN: usize = $mnemonic.len() + 1;

            const EXPECTS_RESPONSE_CODE: bool = false;

            fn write(&self, buf: &mut [u8]) -> usize {
                $crate::command::write_frame(
                    buf,
                    &[Self::MNEMONIC.as_bytes(), &[$crate::command::TERMINATOR]],
                )
            }

            fn parse(
                &self,
                _resp: Result<&[u8], atat::InternalError>,
            ) -> core::result::Result<Self::Response, atat::Error> {
                Ok($crate::command::NoResponse)
            }
        }
    };
}

/// Commands that read a register without a parameter and write it with one.
macro_rules! query_or_set_command {
    ($(#[$meta:meta])* $name:ident, $mnemonic:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'a> {
            pub value: Option<$crate::command::args::Arg<'a>>,
        }

        impl<'a> $name<'a> {
            pub const MNEMONIC: &'static str = $mnemonic;

            pub fn query() -> Self {
                Self { value: None }
            }

            pub fn set(value: &'a str) -> Result<Self, $crate::error::Error> {
                Ok(Self {
                    value: Some($crate::command::args::Arg::new(value)?),
                })
            }

            pub fn from_args(args: &[&'a str]) -> Result<Self, $crate::error::Error> {
                Ok(Self {
                    value: $crate::command::args::optional_one(args)?,
                })
            }
        }

        impl atat::AtatCmd for $name<'_> {
            type Response = $crate::command::NoResponse;

            const MAX_LEN: usize = $mnemonic.len() + 1 + $crate::command::args::MAX_ARG_LEN + 1;

            const EXPECTS_RESPONSE_CODE: bool = false;

            fn write(&self, buf: &mut [u8]) -> usize {
                use $crate::command::{write_frame, SEPARATOR, TERMINATOR};

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
                Ok($crate::command::NoResponse)
            }
        }
    };
}

pub(crate) use fixed_command;
pub(crate) use query_or_set_command;

/// One operator request: a mnemonic and its positional arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub mnemonic: &'a str,
    pub args: &'a [&'a str],
}

impl<'a> Invocation<'a> {
    pub fn new(mnemonic: &'a str, args: &'a [&'a str]) -> Self {
        Self { mnemonic, args }
    }

    /// Look the mnemonic up and validate the arguments against it.
    ///
    /// `None` when the mnemonic is not an encoder (unknown, or `help`).
    pub fn encode(&self) -> Option<Result<Command<'a>, Error>> {
        match table::lookup(self.mnemonic)?.action {
            table::Action::Encode(encode) => Some(encode(self.args)),
            table::Action::Help => None,
        }
    }
}

/// A validated command, ready to be written to the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    EnterCommandMode(EnterCommandMode),
    Attention(Attention),
    PanId(PanId<'a>),
    SerialNumberHigh(SerialNumberHigh),
    SerialNumberLow(SerialNumberLow),
    DestinationHigh(DestinationHigh<'a>),
    DestinationLow(DestinationLow<'a>),
    ExitCommandMode(ExitCommandMode),
    WriteSettings(WriteSettings),
    MyAddress(MyAddress<'a>),
    DioConfig(DioConfig),
    PwmConfig(PwmConfig),
    IoSampleRate(IoSampleRate<'a>),
    SampleCount(SampleCount<'a>),
    InputAddress(InputAddress<'a>),
    SupplyVoltage(SupplyVoltage),
    PullUp(PullUp<'a>),
    RestoreDefaults(RestoreDefaults),
}

impl Command<'_> {
    /// Encode into `buf`, which must hold at least [`MAX_FRAME_LEN`] bytes.
    ///
    /// A zero length means there is nothing to transmit. For
    /// `EnterCommandMode` only the escape sequence is produced, the guard
    /// times are up to the caller.
    pub fn write(&self, buf: &mut [u8]) -> usize {
        use atat::AtatCmd;

        match self {
            Command::EnterCommandMode(c) => c.write(buf),
            Command::Attention(c) => c.write(buf),
            Command::PanId(c) => c.write(buf),
            Command::SerialNumberHigh(c) => c.write(buf),
            Command::SerialNumberLow(c) => c.write(buf),
            Command::DestinationHigh(c) => c.write(buf),
            Command::DestinationLow(c) => c.write(buf),
            Command::ExitCommandMode(c) => c.write(buf),
            Command::WriteSettings(c) => c.write(buf),
            Command::MyAddress(c) => c.write(buf),
            Command::DioConfig(c) => c.write(buf),
            Command::PwmConfig(c) => c.write(buf),
            Command::IoSampleRate(c) => c.write(buf),
            Command::SampleCount(c) => c.write(buf),
            Command::InputAddress(c) => c.write(buf),
            Command::SupplyVoltage(c) => c.write(buf),
            Command::PullUp(c) => c.write(buf),
            Command::RestoreDefaults(c) => c.write(buf),
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Command::EnterCommandMode(_) => EnterCommandMode::MNEMONIC,
            Command::Attention(_) => Attention::MNEMONIC,
            Command::PanId(_) => PanId::MNEMONIC,
            Command::SerialNumberHigh(_) => SerialNumberHigh::MNEMONIC,
            Command::SerialNumberLow(_) => SerialNumberLow::MNEMONIC,
            Command::DestinationHigh(_) => DestinationHigh::MNEMONIC,
            Command::DestinationLow(_) => DestinationLow::MNEMONIC,
            Command::ExitCommandMode(_) => ExitCommandMode::MNEMONIC,
            Command::WriteSettings(_) => WriteSettings::MNEMONIC,
            Command::MyAddress(_) => MyAddress::MNEMONIC,
            Command::DioConfig(_) => DioConfig::MNEMONIC,
            Command::PwmConfig(_) => PwmConfig::MNEMONIC,
            Command::IoSampleRate(_) => IoSampleRate::MNEMONIC,
            Command::SampleCount(_) => SampleCount::MNEMONIC,
            Command::InputAddress(_) => InputAddress::MNEMONIC,
            Command::SupplyVoltage(_) => SupplyVoltage::MNEMONIC,
            Command::PullUp(_) => PullUp::MNEMONIC,
            Command::RestoreDefaults(_) => RestoreDefaults::MNEMONIC,
        }
    }
}

#[cfg(test)]
pub(crate) fn encode(mnemonic: &str, args: &[&str]) -> Result<heapless::Vec<u8, MAX_FRAME_LEN>, Error> {
    let cmd = Invocation::new(mnemonic, args)
        .encode()
        .expect("known mnemonic")?;
    let mut buf = [0u8; MAX_FRAME_LEN];
    let len = cmd.write(&mut buf);
    Ok(heapless::Vec::from_slice(&buf[..len]).unwrap())
}
