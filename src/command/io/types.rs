//! Argument types used by I/O Commands

use crate::error::Error;

/// Configuration of DIO0..DIO7, the parameter of `ATD<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DioMode {
    Disabled = 0,
    /// Built-in function, where the pin has one
    BuiltIn = 1,
    /// Analog input, pins 0-3 only
    AnalogInput = 2,
    DigitalInput = 3,
    DigitalOutputLow = 4,
    DigitalOutputHigh = 5,
}

/// Configuration of PWM0/PWM1 (pins 10 and 11).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PwmMode {
    Disabled = 0,
    BuiltIn = 1,
    AnalogInput = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PwmPin {
    Pwm0 = 0,
    Pwm1 = 1,
}

/// ASCII digit for a small register value.
pub(crate) const fn digit(value: u8) -> u8 {
    b'0' + value
}

/// First byte of an argument. Empty arguments, or ones that start with the
/// NUL terminator, are rejected.
pub(crate) fn first_char(arg: &str) -> Result<u8, Error> {
    match arg.as_bytes().first() {
        Some(&c) if c != 0 => Ok(c),
        _ => Err(Error::InvalidArgument),
    }
}

pub(crate) fn dio_pin(pin: u8) -> Result<u8, Error> {
    if pin <= 7 {
        Ok(digit(pin))
    } else {
        Err(Error::InvalidArgument)
    }
}
