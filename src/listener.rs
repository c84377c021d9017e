//! Receive-line drain that renders whatever the radio sent back.
//!
//! The radio answers commands (`OK\r`, register values, `ERROR\r`) on its own
//! schedule. Each drain cycle reads every byte available at that moment and
//! writes it to a display channel as one `Response:'...'\n` block, with
//! unprintable bytes spelled out as `/` and their decimal value.

use core::fmt::Write as _;

use embedded_io::{Read, ReadReady, Write};
use portable_atomic::{AtomicBool, Ordering};

use crate::error::{io, Error};

pub const RESPONSE_PREFIX: &[u8] = b"Response:'";
pub const RESPONSE_SUFFIX: &[u8] = b"'\n";

/// Receive half of the serial link as seen from the interrupt handler.
pub trait RxSource: Read + ReadReady {
    /// Clear the pending receive notification. Called once per drain cycle
    /// before any byte is read.
    fn acknowledge(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ListenerState {
    Idle,
    Draining,
}

/// Textual form of one received byte: printable ASCII as is, anything else
/// as `/` followed by the decimal value.
pub fn render_byte(byte: u8) -> heapless::String<4> {
    let mut out = heapless::String::new();
    if (0x20..=0x7E).contains(&byte) {
        // Capacity covers the longest form, "/255"
        let _ = out.push(byte as char);
    } else {
        let _ = write!(out, "/{}", byte);
    }
    out
}

/// Drains the receive line from the RX interrupt handler.
///
/// Meant to live in a `static` shared between the handler and the rest of
/// the firmware; a nested invocation while a drain is in progress is
/// rejected with [`Error::Busy`] and leaves the receive line alone.
pub struct ResponseListener {
    draining: AtomicBool,
}

impl Default for ResponseListener {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseListener {
    pub const fn new() -> Self {
        Self {
            draining: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ListenerState {
        if self.draining.load(Ordering::Acquire) {
            ListenerState::Draining
        } else {
            ListenerState::Idle
        }
    }

    /// Run one drain cycle and return the number of bytes drained.
    ///
    /// Never waits for bytes that have not arrived yet; an empty receive
    /// buffer still produces `Response:''\n`.
    pub fn on_interrupt<R, O>(&self, rx: &mut R, display: &mut O) -> Result<usize, Error>
    where
        R: RxSource,
        O: Write,
    {
        if self
            .draining
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            warn!("Receive interrupt while already draining");
            return Err(Error::Busy);
        }

        let res = Self::drain(rx, display);
        self.draining.store(false, Ordering::Release);
        res
    }

    /// The block is closed even when the drain fails part way; the first
    /// error is returned.
    fn drain<R: RxSource, O: Write>(rx: &mut R, display: &mut O) -> Result<usize, Error> {
        rx.acknowledge();
        display.write_all(RESPONSE_PREFIX).map_err(io)?;

        let drained = Self::render_available(rx, display);
        let closed = display
            .write_all(RESPONSE_SUFFIX)
            .and_then(|_| display.flush())
            .map_err(io);

        let count = drained?;
        closed?;

        trace!("Drained {} bytes", count);
        Ok(count)
    }

    fn render_available<R: RxSource, O: Write>(
        rx: &mut R,
        display: &mut O,
    ) -> Result<usize, Error> {
        let mut count = 0;
        let mut byte = [0u8; 1];
        while rx.read_ready().map_err(io)? {
            if rx.read(&mut byte).map_err(io)? == 0 {
                break;
            }
            display
                .write_all(render_byte(byte[0]).as_bytes())
                .map_err(io)?;
            count += 1;
        }
        Ok(count)
    }
}
