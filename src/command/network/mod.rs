//! ### Networking and addressing
//! Registers that are read by sending the mnemonic alone and written by
//! sending it with one parameter. Values are hex strings and are forwarded
//! verbatim; the radio does the range checking and answers `ERROR` for a bad
//! value.

use crate::command::query_or_set_command;

query_or_set_command!(
    /// PAN ID ID
    ///
    /// Personal area network identifier, up to 4 hex digits. Radios only
    /// talk to each other with matching IDs.
    PanId,
    "ATID"
);

query_or_set_command!(
    /// Destination Address High DH
    ///
    /// Upper 32 bits of the 64 bit destination address. `0` with a `DL`
    /// below `0xFFFF` selects 16 bit addressing.
    DestinationHigh,
    "ATDH"
);

query_or_set_command!(
    /// Destination Address Low DL
    ///
    /// Lower 32 bits of the 64 bit destination address. `0xFFFF` broadcasts.
    DestinationLow,
    "ATDL"
);

query_or_set_command!(
    /// 16-bit Source Address MY
    ///
    /// `0xFFFF` or `0xFFFE` disables 16 bit addressing for receive.
    MyAddress,
    "ATMY"
);
