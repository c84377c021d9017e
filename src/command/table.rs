//! Static mnemonic table shared by the console and [`Invocation::encode`].
//!
//! [`Invocation::encode`]: super::Invocation::encode

use super::*;

/// Builds a validated [`Command`] from positional arguments.
pub type Encoder = for<'a> fn(&[&'a str]) -> Result<Command<'a>, Error>;

/// How many positional arguments a mnemonic takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Arity {
    /// Arguments are ignored.
    None,
    /// Query with none, set with one.
    OptionalOne,
    ExactlyTwo,
    AtMostOne,
    Any,
}

#[derive(Clone, Copy)]
pub enum Action {
    Help,
    Encode(Encoder),
}

#[derive(Clone, Copy)]
pub struct CommandDescriptor {
    pub mnemonic: &'static str,
    pub arity: Arity,
    pub help: &'static str,
    pub action: Action,
}

impl core::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("mnemonic", &self.mnemonic)
            .field("arity", &self.arity)
            .finish()
    }
}

const fn entry(
    mnemonic: &'static str,
    arity: Arity,
    action: Action,
    help: &'static str,
) -> CommandDescriptor {
    CommandDescriptor {
        mnemonic,
        arity,
        help,
        action,
    }
}

pub static COMMANDS: &[CommandDescriptor] = &[
    entry("help", Arity::Any, Action::Help, "Display list of commands"),
    entry("h", Arity::Any, Action::Help, "alias for help"),
    entry("?", Arity::Any, Action::Help, "alias for help"),
    entry(
        "+++",
        Arity::None,
        Action::Encode(|args| EnterCommandMode::from_args(args).map(Command::EnterCommandMode)),
        "Enter XBee Command Mode",
    ),
    entry(
        "AT",
        Arity::None,
        Action::Encode(|args| Attention::from_args(args).map(Command::Attention)),
        "Attention Command: returns 'OK' when in Command Mode",
    ),
    entry(
        "ATID",
        Arity::OptionalOne,
        Action::Encode(|args| PanId::from_args(args).map(Command::PanId)),
        "ATID Command: Return / Set PAN ID",
    ),
    entry(
        "ATSH",
        Arity::None,
        Action::Encode(|args| SerialNumberHigh::from_args(args).map(Command::SerialNumberHigh)),
        "ATSH Command: Return Hex High half of XBee Serial Number",
    ),
    entry(
        "ATSL",
        Arity::None,
        Action::Encode(|args| SerialNumberLow::from_args(args).map(Command::SerialNumberLow)),
        "ATSL Command: Return Hex Low half of XBee Serial Number",
    ),
    entry(
        "ATDH",
        Arity::OptionalOne,
        Action::Encode(|args| DestinationHigh::from_args(args).map(Command::DestinationHigh)),
        "ATDH Command: Return / Set Hex High Destination Address",
    ),
    entry(
        "ATDL",
        Arity::OptionalOne,
        Action::Encode(|args| DestinationLow::from_args(args).map(Command::DestinationLow)),
        "ATDL Command: Return / Set Hex Low Destination Address",
    ),
    entry(
        "ATCN",
        Arity::None,
        Action::Encode(|args| ExitCommandMode::from_args(args).map(Command::ExitCommandMode)),
        "Null Command: Use to drop out of Command Mode",
    ),
    entry(
        "ATWR",
        Arity::None,
        Action::Encode(|args| WriteSettings::from_args(args).map(Command::WriteSettings)),
        "Write Command: Write current config to firmware (make current config default)",
    ),
    entry(
        "ATMY",
        Arity::OptionalOne,
        Action::Encode(|args| MyAddress::from_args(args).map(Command::MyAddress)),
        "My ID Command: Return XBee 16bit Address (non-hex)",
    ),
    entry(
        "ATD",
        Arity::ExactlyTwo,
        Action::Encode(|args| DioConfig::from_args(args).map(Command::DioConfig)),
        "Config I/O pins 0-7: usage: ATD <pin#> <command>",
    ),
    entry(
        "ATP",
        Arity::ExactlyTwo,
        Action::Encode(|args| PwmConfig::from_args(args).map(Command::PwmConfig)),
        "Config I/O pins 10-11: usage: ATP <pin#> <command>",
    ),
    entry(
        "ATIR",
        Arity::OptionalOne,
        Action::Encode(|args| IoSampleRate::from_args(args).map(Command::IoSampleRate)),
        "I/O Rate Set: Hex Value sets rate in milliseconds, 0 turns off",
    ),
    entry(
        "ATIT",
        Arity::AtMostOne,
        Action::Encode(|args| SampleCount::from_args(args).map(Command::SampleCount)),
        "Iteration Tailor: Set number of samples (hex) taken before transmit (max 0x44): ATIT <hex #>",
    ),
    entry(
        "ATIA",
        Arity::OptionalOne,
        Action::Encode(|args| InputAddress::from_args(args).map(Command::InputAddress)),
        "Input Address allows updates from given XBee address: ATIA <address>",
    ),
    entry(
        "AT%V",
        Arity::None,
        Action::Encode(|args| SupplyVoltage::from_args(args).map(Command::SupplyVoltage)),
        "% Voltage Command: Returns supply voltage, useful for tracking battery",
    ),
    entry(
        "ATPR",
        Arity::AtMostOne,
        Action::Encode(|args| PullUp::from_args(args).map(Command::PullUp)),
        "Pull Up Resistor: ATPR <1=on, 0=off>",
    ),
    entry(
        "ATRE",
        Arity::None,
        Action::Encode(|args| RestoreDefaults::from_args(args).map(Command::RestoreDefaults)),
        "Reset Command: Reset all configs to factory presets",
    ),
];

/// Exact, case sensitive mnemonic lookup.
pub fn lookup(mnemonic: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.mnemonic == mnemonic)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mnemonics_are_unique() {
        for (i, a) in COMMANDS.iter().enumerate() {
            for b in &COMMANDS[i + 1..] {
                assert_ne!(a.mnemonic, b.mnemonic);
            }
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert!(lookup("ATID").is_some());
        assert!(lookup("atid").is_none());
        assert!(lookup("ATI").is_none());
        assert_eq!(lookup("?").map(|c| c.mnemonic), Some("?"));
    }

    #[test]
    fn encoders_agree_with_table_mnemonics() {
        for c in COMMANDS {
            if let Action::Encode(encode) = c.action {
                let args: &[&str] = match c.arity {
                    Arity::ExactlyTwo => &["0", "1"],
                    _ => &[],
                };
                let cmd = encode(args).unwrap();
                assert_eq!(cmd.mnemonic(), c.mnemonic);
            }
        }
    }
}
