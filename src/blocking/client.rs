use atat::AtatCmd;
use embedded_hal::delay::DelayNs;
use embedded_io::Write;

use crate::command::{Command, EnterCommandMode, Invocation, MAX_FRAME_LEN};
use crate::config::Config;
use crate::error::{io, Error};

/// Blocking command encoder for an XBee on a transparent serial link.
///
/// Every command is one frame written with `write_all` and flushed. Nothing
/// is read back; responses arrive on the receive line and are handled by
/// [`ResponseListener`](crate::ResponseListener).
pub struct XBeeClient<W, D> {
    tx: W,
    delay: D,
    config: Config,
}

impl<W, D> XBeeClient<W, D>
where
    W: Write,
    D: DelayNs,
{
    pub fn new(tx: W, delay: D) -> Self {
        Self::with_config(tx, delay, Config::default())
    }

    pub fn with_config(tx: W, delay: D, config: Config) -> Self {
        Self { tx, delay, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send the `+++` escape sequence surrounded by the guard times.
    ///
    /// Blocks for the full guard time before and after. Success only means
    /// the bytes were written; send [`Attention`](crate::command::Attention)
    /// and watch the response stream to confirm the radio switched.
    pub fn enter_command_mode(&mut self) -> Result<(), Error> {
        let guard = self.config.guard_times;
        debug!("Entering command mode");

        self.delay.delay_ms(guard.before_ms);
        self.write_frame(EnterCommandMode::SEQUENCE)?;
        self.delay.delay_ms(guard.after_ms);

        Ok(())
    }

    /// Encode and transmit a typed command.
    pub fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<Cmd::Response, Error> {
        if Cmd::MAX_LEN > MAX_FRAME_LEN {
            return Err(Error::Overflow);
        }

        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = cmd.write(&mut buf);
        self.write_frame(&buf[..len])?;

        cmd.parse(Ok(&[])).map_err(|_| Error::Parse)
    }

    /// Transmit a validated command, honouring the guard times for `+++`.
    pub fn dispatch(&mut self, cmd: &Command<'_>) -> Result<(), Error> {
        if let Command::EnterCommandMode(_) = cmd {
            return self.enter_command_mode();
        }

        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = cmd.write(&mut buf);
        if len == 0 {
            debug!("{} has nothing to send", cmd.mnemonic());
            return Ok(());
        }

        self.write_frame(&buf[..len])
    }

    /// Validate and transmit an operator invocation.
    ///
    /// Unknown mnemonics are `InvalidArgument`; the console rejects them
    /// before getting here.
    pub fn execute(&mut self, invocation: &Invocation<'_>) -> Result<(), Error> {
        let cmd = invocation.encode().ok_or(Error::InvalidArgument)??;
        self.dispatch(&cmd)
    }

    pub fn release(self) -> (W, D) {
        (self.tx, self.delay)
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Error> {
        trace!("Sending frame: {:?}", atat::helpers::LossyStr(frame));

        self.tx.write_all(frame).map_err(io)?;
        self.tx.flush().map_err(io)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::command::{PanId, PullUp};
    use crate::config::GuardTimes;
    use crate::test_helpers::{setup, Event, MockDelay, MockSerial};
    use embedded_io::ErrorKind;

    fn client() -> (XBeeClient<MockSerial, MockDelay>, crate::test_helpers::EventLog) {
        let (tx, delay, log) = setup();
        (XBeeClient::new(tx, delay), log)
    }

    #[test]
    fn enter_command_mode_is_guarded() {
        let (mut xbee, log) = client();

        xbee.enter_command_mode().unwrap();

        assert_eq!(
            log.events(),
            vec![
                Event::Delay(2000),
                Event::Write(b"+++".to_vec()),
                Event::Flush,
                Event::Delay(1000),
            ]
        );
    }

    #[test]
    fn escape_sequence_ignores_arguments() {
        let (mut xbee, log) = client();

        xbee.execute(&Invocation::new("+++", &["now", "please"]))
            .unwrap();

        assert_eq!(log.written(), b"+++");
        assert_eq!(log.delays(), vec![2000, 1000]);
    }

    #[test]
    fn guard_times_follow_config() {
        let (tx, delay, log) = setup();
        let config = Config::new().guard_times(GuardTimes {
            before_ms: 1100,
            after_ms: 1200,
        });
        let mut xbee = XBeeClient::with_config(tx, delay, config);

        xbee.enter_command_mode().unwrap();

        assert_eq!(log.delays(), vec![1100, 1200]);
    }

    #[test]
    fn execute_writes_one_frame() {
        let (mut xbee, log) = client();

        xbee.execute(&Invocation::new("ATID", &["3332"])).unwrap();
        xbee.execute(&Invocation::new("AT", &[])).unwrap();

        assert_eq!(log.written(), b"ATID 3332\rAT\r");
        assert!(log.delays().is_empty());
    }

    #[test]
    fn failed_validation_sends_nothing() {
        let (mut xbee, log) = client();

        assert_eq!(
            xbee.execute(&Invocation::new("ATDL", &["1", "2"])),
            Err(Error::InvalidArgumentCount)
        );
        assert_eq!(
            xbee.execute(&Invocation::new("ATP", &["2", "0"])),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            xbee.execute(&Invocation::new("ATIT", &["45"])),
            Err(Error::InvalidArgument)
        );

        assert!(log.events().is_empty());
    }

    #[test]
    fn pull_up_without_value_sends_nothing() {
        let (mut xbee, log) = client();

        assert_eq!(xbee.execute(&Invocation::new("ATPR", &[])), Ok(()));
        assert!(log.events().is_empty());
    }

    #[test]
    fn typed_send() {
        let (mut xbee, log) = client();

        xbee.send(&PanId::set("7FFF").unwrap()).unwrap();
        xbee.send(&PullUp::set(true)).unwrap();

        assert_eq!(log.written(), b"ATID 7FFF\rATPR 1\r");
    }

    #[test]
    fn transport_errors_propagate() {
        let (tx, delay, log) = setup();
        let mut xbee = XBeeClient::new(tx.failing(ErrorKind::TimedOut), delay);

        assert_eq!(
            xbee.execute(&Invocation::new("ATSH", &[])),
            Err(Error::Io(ErrorKind::TimedOut))
        );
        assert!(log.written().is_empty());
    }
}
