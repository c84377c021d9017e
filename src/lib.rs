//! Driver for Digi XBee 802.15.4 radios configured over their transparent
//! serial link.
//!
//! Operator commands are validated and encoded as AT frames
//! ([`command`]), written through a blocking or async client, and whatever
//! the radio sends back is drained and rendered by the
//! [`ResponseListener`] or the async [`asynch::ResponseRunner`].

#![cfg_attr(not(test), no_std)]

mod fmt;

#[cfg(feature = "async")]
pub mod asynch;

pub mod blocking;
pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod listener;

#[cfg(test)]
mod test_helpers;

pub use atat;

pub use config::{Config, GuardTimes};
pub use error::Error;
pub use listener::{ResponseListener, RxSource};

/// Factory baud rate of the radio's serial interface.
pub const DEFAULT_BAUD_RATE: u32 = 9600;
