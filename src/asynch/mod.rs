pub mod runner;

pub use runner::ResponseRunner;

use atat::AtatCmd;
use embassy_sync::{blocking_mutex::raw::NoopRawMutex, mutex::Mutex};
use embassy_time::Timer;
use embedded_io_async::Write;

use crate::command::{Command, EnterCommandMode, Invocation, MAX_FRAME_LEN};
use crate::config::Config;
use crate::error::{io, Error};

/// Async command encoder sharing the transmit half with other tasks.
///
/// The transmitter lock is held for one frame, or for the whole guarded
/// `+++` sequence so nothing else reaches the radio inside the guard times.
pub struct XBeeClient<'d, W: Write> {
    tx: &'d Mutex<NoopRawMutex, W>,
    config: Config,
}

impl<'d, W: Write> XBeeClient<'d, W> {
    pub fn new(tx: &'d Mutex<NoopRawMutex, W>) -> Self {
        Self::with_config(tx, Config::default())
    }

    pub fn with_config(tx: &'d Mutex<NoopRawMutex, W>, config: Config) -> Self {
        Self { tx, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn enter_command_mode(&self) -> Result<(), Error> {
        let guard = self.config.guard_times;
        let mut tx = self.tx.lock().await;
        debug!("Entering command mode");

        Timer::after_millis(guard.before_ms.into()).await;
        Self::write_frame(&mut *tx, EnterCommandMode::SEQUENCE).await?;
        Timer::after_millis(guard.after_ms.into()).await;

        Ok(())
    }

    pub async fn send<Cmd: AtatCmd>(&self, cmd: &Cmd) -> Result<Cmd::Response, Error> {
        if Cmd::MAX_LEN > MAX_FRAME_LEN {
            return Err(Error::Overflow);
        }

        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = cmd.write(&mut buf);
        Self::write_frame(&mut *self.tx.lock().await, &buf[..len]).await?;

        cmd.parse(Ok(&[])).map_err(|_| Error::Parse)
    }

    pub async fn dispatch(&self, cmd: &Command<'_>) -> Result<(), Error> {
        if let Command::EnterCommandMode(_) = cmd {
            return self.enter_command_mode().await;
        }

        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = cmd.write(&mut buf);
        if len == 0 {
            debug!("{} has nothing to send", cmd.mnemonic());
            return Ok(());
        }

        Self::write_frame(&mut *self.tx.lock().await, &buf[..len]).await
    }

    pub async fn execute(&self, invocation: &Invocation<'_>) -> Result<(), Error> {
        let cmd = invocation.encode().ok_or(Error::InvalidArgument)??;
        self.dispatch(&cmd).await
    }

    async fn write_frame(tx: &mut W, frame: &[u8]) -> Result<(), Error> {
        trace!("Sending frame: {:?}", atat::helpers::LossyStr(frame));

        tx.write_all(frame).await.map_err(io)?;
        tx.flush().await.map_err(io)
    }
}
