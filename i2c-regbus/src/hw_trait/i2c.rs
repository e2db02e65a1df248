//! I2C bus abstraction trait.

use crate::error::Result;

/// A bus bound to a single target device.
///
/// Every call blocks until the transfer completes or fails. Nothing is
/// retried. Implementations are not expected to be shared between threads
/// without external locking: a register read is two calls, and another
/// caller's transfer landing between them moves the device's read pointer.
pub trait I2cBus {
    /// 7-bit address of the bound target.
    fn address(&self) -> u8;

    /// Read up to `buffer.len()` bytes from the target.
    ///
    /// Returns the number of bytes actually read, which may be short.
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Write `data` to the target, returning the number of bytes written.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize>;

    /// Write then read as one transaction (repeated start, no stop between).
    ///
    /// All-or-nothing: on success returns `(write.len(), read.len())`.
    fn write_then_read(&mut self, write: &[u8], read: &mut [u8]) -> Result<(usize, usize)>;

    /// Release the underlying resource.
    fn close(&mut self) -> Result<()>;
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    fn address(&self) -> u8 {
        (**self).address()
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize> {
        (**self).read_bytes(buffer)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<usize> {
        (**self).write_bytes(data)
    }

    fn write_then_read(&mut self, write: &[u8], read: &mut [u8]) -> Result<(usize, usize)> {
        (**self).write_then_read(write, read)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
