//! Recording doubles for the serial link and the delay provider.

use core::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Once;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_io::ErrorKind;

use crate::listener::RxSource;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .is_test(true)
            .try_init();
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Delay(u32),
    Write(Vec<u8>),
    Flush,
    Acknowledge,
}

/// Ordered record shared by every double created from one [`setup`].
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// All written bytes concatenated.
    pub fn written(&self) -> Vec<u8> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Write(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    pub fn written_str(&self) -> std::string::String {
        std::string::String::from_utf8_lossy(&self.written()).into_owned()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }
}

/// Serial port double. Writes are recorded, reads come from a queue that
/// tests can keep feeding through [`MockSerial::inbound`].
#[derive(Debug, Clone)]
pub struct MockSerial {
    log: EventLog,
    rx: Rc<RefCell<VecDeque<u8>>>,
    fail: Option<ErrorKind>,
    fail_when_drained: Option<ErrorKind>,
}

impl MockSerial {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            rx: Rc::default(),
            fail: None,
            fail_when_drained: None,
        }
    }

    pub fn with_rx(self, bytes: &[u8]) -> Self {
        self.rx.borrow_mut().extend(bytes.iter().copied());
        self
    }

    /// Every transfer fails with `kind` and nothing is recorded.
    pub fn failing(mut self, kind: ErrorKind) -> Self {
        self.fail = Some(kind);
        self
    }

    /// Queued bytes are delivered, then polling the empty receive line fails
    /// with `kind`.
    pub fn failing_when_drained(mut self, kind: ErrorKind) -> Self {
        self.fail_when_drained = Some(kind);
        self
    }

    pub fn inbound(&self) -> Rc<RefCell<VecDeque<u8>>> {
        self.rx.clone()
    }

    fn check(&self) -> Result<(), ErrorKind> {
        match self.fail {
            Some(kind) => Err(kind),
            None => Ok(()),
        }
    }

    fn record_write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
        self.check()?;
        self.log.push(Event::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn record_flush(&mut self) -> Result<(), ErrorKind> {
        self.check()?;
        self.log.push(Event::Flush);
        Ok(())
    }

    fn pop(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        self.check()?;
        let mut rx = self.rx.borrow_mut();
        let mut n = 0;
        while n < buf.len() {
            match rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = ErrorKind;
}

impl embedded_io::Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.record_write(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.record_flush()
    }
}

impl embedded_io::Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.pop(buf)
    }
}

impl embedded_io::ReadReady for MockSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        self.check()?;
        let empty = self.rx.borrow().is_empty();
        match self.fail_when_drained {
            Some(kind) if empty => Err(kind),
            _ => Ok(!empty),
        }
    }
}

#[cfg(feature = "async")]
impl embedded_io_async::Write for MockSerial {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.record_write(buf)
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.record_flush()
    }
}

#[cfg(feature = "async")]
impl embedded_io_async::Read for MockSerial {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.pop(buf)
    }
}

impl RxSource for MockSerial {
    fn acknowledge(&mut self) {
        self.log.push(Event::Acknowledge);
    }
}

/// Records requested delays instead of sleeping.
#[derive(Debug, Clone)]
pub struct MockDelay {
    log: EventLog,
}

impl MockDelay {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::Delay(ms));
    }
}

pub fn setup() -> (MockSerial, MockDelay, EventLog) {
    init_logger();

    let log = EventLog::default();
    (
        MockSerial::new(log.clone()),
        MockDelay::new(log.clone()),
        log,
    )
}
