use embedded_io_async::{Read, ReadReady, Write};

use crate::error::{io, Error};
use crate::listener::{render_byte, RESPONSE_PREFIX, RESPONSE_SUFFIX};

/// Background task draining the receive half of the radio link.
///
/// You must call `.run()` in a background task for responses to be shown.
pub struct ResponseRunner<R, O> {
    rx: R,
    display: O,
}

impl<R, O> ResponseRunner<R, O>
where
    R: Read + ReadReady,
    O: Write,
{
    pub fn new(rx: R, display: O) -> Self {
        Self { rx, display }
    }

    /// Wait for the first byte, then drain whatever else is already buffered
    /// into one `Response:'...'` block. Returns the number of bytes drained.
    pub async fn drain_cycle(&mut self) -> Result<usize, Error> {
        let mut byte = [0u8; 1];
        if self.rx.read(&mut byte).await.map_err(io)? == 0 {
            return Ok(0);
        }

        self.display.write_all(RESPONSE_PREFIX).await.map_err(io)?;

        // Close the block even if the drain fails part way
        let drained = self.render_available(byte[0]).await;
        let closed = match self.display.write_all(RESPONSE_SUFFIX).await {
            Ok(()) => self.display.flush().await,
            Err(e) => Err(e),
        }
        .map_err(io);

        let count = drained?;
        closed?;

        trace!("Drained {} bytes", count);
        Ok(count)
    }

    async fn render_available(&mut self, first: u8) -> Result<usize, Error> {
        self.display
            .write_all(render_byte(first).as_bytes())
            .await
            .map_err(io)?;

        let mut count = 1;
        let mut byte = [0u8; 1];
        while self.rx.read_ready().map_err(io)? {
            if self.rx.read(&mut byte).await.map_err(io)? == 0 {
                break;
            }
            self.display
                .write_all(render_byte(byte[0]).as_bytes())
                .await
                .map_err(io)?;
            count += 1;
        }
        Ok(count)
    }

    pub async fn run(mut self) -> ! {
        loop {
            if let Err(e) = self.drain_cycle().await {
                warn!("Response drain failed: {:?}", e);
            }
        }
    }

    pub fn release(self) -> (R, O) {
        (self.rx, self.display)
    }
}
