//! ### Command mode and diagnostics
//! Commands that take no parameter. They are sent as the bare mnemonic and a
//! carriage return; anything typed after the mnemonic is ignored.
//!
//! Before any of these the radio has to be in command mode, see
//! [`EnterCommandMode`]. It drops out again on its own after `CT` (10 s by
//! default) without a command, or on [`ExitCommandMode`].

use crate::command::{fixed_command, NoResponse};
use crate::error::Error;

/// Escape sequence `+++`
///
/// Switches the radio from transparent to command mode. There is no
/// terminator and the radio only recognizes the sequence when the line is
/// silent for the guard time before and after it. On success the radio
/// answers `OK\r`; this is not checked, send [`Attention`] and look at the
/// response stream to confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnterCommandMode;

impl EnterCommandMode {
    pub const MNEMONIC: &'static str = "+++";

    pub const SEQUENCE: &'static [u8] = b"+++";

    pub fn from_args(_args: &[&str]) -> Result<Self, Error> {
        Ok(EnterCommandMode)
    }
}

impl atat::AtatCmd for EnterCommandMode {
    type Response = NoResponse;

    const MAX_LEN: usize = 3;

    const EXPECTS_RESPONSE_CODE: bool = false;

    fn write(&self, buf: &mut [u8]) -> usize {
        buf[..Self::SEQUENCE.len()].copy_from_slice(Self::SEQUENCE);
        Self::SEQUENCE.len()
    }

    fn parse(
        &self,
        _resp: Result<&[u8], atat::InternalError>,
    ) -> core::result::Result<Self::Response, atat::Error> {
        Ok(NoResponse)
    }
}

fixed_command!(
    /// Attention AT
    ///
    /// Answers `OK` while in command mode. No answer means command mode has
    /// to be entered again.
    Attention,
    "AT"
);

fixed_command!(
    /// Serial Number High SH
    ///
    /// Upper 32 bits of the 64 bit IEEE address, in hex.
    SerialNumberHigh,
    "ATSH"
);

fixed_command!(
    /// Serial Number Low SL
    ///
    /// Lower 32 bits of the 64 bit IEEE address, in hex.
    SerialNumberLow,
    "ATSL"
);

fixed_command!(
    /// Exit Command Mode CN
    ExitCommandMode,
    "ATCN"
);

fixed_command!(
    /// Write WR
    ///
    /// Stores the current parameter values in non-volatile memory so they
    /// survive a power cycle.
    WriteSettings,
    "ATWR"
);

fixed_command!(
    /// Supply Voltage %V
    ///
    /// Supply voltage in hex mV, `ERROR` when the module cannot measure it.
    SupplyVoltage,
    "AT%V"
);

fixed_command!(
    /// Restore Defaults RE
    ///
    /// Restores factory parameter values. Not persisted until [`WriteSettings`].
    RestoreDefaults,
    "ATRE"
);
