//! Linux i2c-dev bus handle.
//!
//! A [`BusHandle`] owns one open `/dev/i2c-N` descriptor with a target
//! address bound through I2C_SLAVE. Plain reads and writes go to that
//! target; [`BusHandle::write_then_read`] uses I2C_RDWR so the write and the
//! read share one transaction with a repeated start instead of a stop.
//!
//! Closing is explicit and happens once. After [`BusHandle::close`] every
//! operation, including a second close, fails with [`Error::Closed`] without
//! touching the device. Dropping an open handle releases the descriptor and
//! discards any close error.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::{AsRawFd, IntoRawFd, OwnedFd};
use std::path::{Path, PathBuf};

use nix::errno::Errno;

use super::abi::{self, Message};
use crate::config::{BusConfig, MAX_ADDRESS};
use crate::error::{Error, Result};
use crate::hw_trait::I2cBus;
use crate::tracing::prelude::*;

/// An open I2C bus with one bound target device.
pub struct BusHandle {
    address: u8,
    path: PathBuf,
    file: Option<File>,
}

impl BusHandle {
    /// Open `path` read-write and bind `address` for subsequent transfers.
    pub fn open(address: u8, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| Error::Open {
                path: path.clone(),
                source,
            })?;

        bind(&file, address).map_err(|source| Error::AddressBind {
            address,
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), address, "Opened I2C bus");

        Ok(Self {
            address,
            path,
            file: Some(file),
        })
    }

    /// Open the bus and target named by `config`.
    pub fn open_config(config: &BusConfig) -> Result<Self> {
        Self::open(config.address, &config.device)
    }

    /// 7-bit address of the bound target.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Path of the bus device node.
    pub fn device_path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Read up to `buffer.len()` bytes from the target.
    ///
    /// Returns the count actually read; a short read is not an error here.
    pub fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let n = self.file_mut()?.read(buffer)?;
        trace!(address = self.address, requested = buffer.len(), "rx {:02x?}", &buffer[..n]);
        Ok(n)
    }

    /// Write `data` to the target, returning the count written.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<usize> {
        let n = self.file_mut()?.write(data)?;
        trace!(address = self.address, written = n, "tx {:02x?}", data);
        Ok(n)
    }

    /// Write `write` then fill `read` in one I2C_RDWR transaction.
    ///
    /// No stop condition is sent between the two segments. Either both
    /// complete and `(write.len(), read.len())` is returned, or the call
    /// fails as a whole.
    pub fn write_then_read(&mut self, write: &[u8], read: &mut [u8]) -> Result<(usize, usize)> {
        let fd = self.file_mut()?.as_raw_fd();
        let counts = (write.len(), read.len());

        let mut msgs = [
            Message::write(self.address, write)?,
            Message::read(self.address, read)?,
        ];
        let done = abi::transfer(fd, &mut msgs)?;
        if done != msgs.len() {
            return Err(io::Error::other(format!(
                "combined transfer completed {done} of {} messages",
                msgs.len()
            ))
            .into());
        }

        trace!(address = self.address, "tx {:02x?} rx {:02x?}", write, read);
        Ok(counts)
    }

    /// Release the descriptor.
    ///
    /// Fails with [`Error::Closed`] if the handle was already closed, and
    /// with [`Error::Io`] if the kernel reports an error while closing (the
    /// descriptor is released regardless).
    pub fn close(&mut self) -> Result<()> {
        let file = self.file.take().ok_or(Error::Closed)?;
        let fd: OwnedFd = file.into();
        nix::unistd::close(fd.into_raw_fd())?;
        debug!(path = %self.path.display(), address = self.address, "Closed I2C bus");
        Ok(())
    }

    fn file_mut(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(Error::Closed)
    }

    /// Wrap an already-open file without binding an address.
    #[cfg(test)]
    pub(crate) fn from_file(file: File, address: u8, path: impl Into<PathBuf>) -> Self {
        Self {
            address,
            path: path.into(),
            file: Some(file),
        }
    }
}

fn bind(file: &File, address: u8) -> std::result::Result<(), Errno> {
    if address > MAX_ADDRESS {
        return Err(Errno::EINVAL);
    }
    abi::bind_address(file.as_raw_fd(), address)
}

impl fmt::Debug for BusHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusHandle")
            .field("path", &self.path)
            .field("address", &format_args!("0x{:02x}", self.address))
            .field("open", &!self.is_closed())
            .finish()
    }
}

impl I2cBus for BusHandle {
    fn address(&self) -> u8 {
        BusHandle::address(self)
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize> {
        BusHandle::read_bytes(self, buffer)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<usize> {
        BusHandle::write_bytes(self, data)
    }

    fn write_then_read(&mut self, write: &[u8], read: &mut [u8]) -> Result<(usize, usize)> {
        BusHandle::write_then_read(self, write, read)
    }

    fn close(&mut self) -> Result<()> {
        BusHandle::close(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // /dev/null opens read-write, reads as empty, swallows writes and
    // rejects every i2c ioctl with ENOTTY.
    const NULL_DEVICE: &str = "/dev/null";

    fn null_handle(address: u8) -> BusHandle {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(NULL_DEVICE)
            .expect("open /dev/null");
        BusHandle::from_file(file, address, NULL_DEVICE)
    }

    #[test]
    fn open_missing_device_is_open_error() {
        let err = BusHandle::open(0x48, "/dev/i2c-does-not-exist").unwrap_err();
        match err {
            Error::Open { path, source } => {
                assert_eq!(path, PathBuf::from("/dev/i2c-does-not-exist"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn open_non_i2c_device_is_bind_error() {
        let err = BusHandle::open(0x48, NULL_DEVICE).unwrap_err();
        match err {
            Error::AddressBind { address, source, .. } => {
                assert_eq!(address, 0x48);
                assert_eq!(source, Errno::ENOTTY);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn open_rejects_eight_bit_address_before_ioctl() {
        let err = BusHandle::open(0x80, NULL_DEVICE).unwrap_err();
        assert!(matches!(
            err,
            Error::AddressBind {
                address: 0x80,
                source: Errno::EINVAL,
                ..
            }
        ));
    }

    #[test]
    fn open_config_reports_configured_path() {
        let config = BusConfig::new("/dev/i2c-does-not-exist", 0x20).unwrap();
        let err = BusHandle::open_config(&config).unwrap_err();
        assert!(matches!(err, Error::Open { path, .. } if path == config.device));
    }

    #[test]
    fn accessors() {
        let handle = null_handle(0x1d);
        assert_eq!(handle.address(), 0x1d);
        assert_eq!(handle.device_path(), Path::new(NULL_DEVICE));
        assert!(!handle.is_closed());
        assert!(format!("{handle:?}").contains("0x1d"));
    }

    #[test]
    fn raw_write_reports_bytes_written() {
        let mut handle = null_handle(0x48);
        assert_eq!(handle.write_bytes(&[0x10, 0x01, 0x02]).unwrap(), 3);
    }

    #[test]
    fn raw_read_may_be_short() {
        let mut handle = null_handle(0x48);
        let mut buf = [0xAA; 4];
        assert_eq!(handle.read_bytes(&mut buf).unwrap(), 0);
    }

    #[test]
    fn rejected_combined_transfer_is_io_error() {
        let mut handle = null_handle(0x48);
        let mut buf = [0u8; 2];
        let err = handle.write_then_read(&[0x05], &mut buf).unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.raw_os_error(), Some(Errno::ENOTTY as i32)),
            other => panic!("unexpected error: {other:?}"),
        }
        // A failed call leaves the handle open.
        assert!(!handle.is_closed());
    }

    #[test]
    fn oversized_combined_transfer_fails_before_ioctl() {
        let mut handle = null_handle(0x48);
        let big = vec![0u8; 70_000];
        let mut buf = [0u8; 1];
        let err = handle.write_then_read(&big, &mut buf).unwrap_err();
        assert!(matches!(err, Error::Io(e) if e.kind() == io::ErrorKind::InvalidInput));
    }

    #[test]
    fn close_releases_once() {
        let mut handle = null_handle(0x48);
        handle.close().unwrap();
        assert!(handle.is_closed());
        assert!(matches!(handle.close(), Err(Error::Closed)));
    }

    #[test]
    fn operations_after_close_fail_closed() {
        let mut handle = null_handle(0x48);
        handle.close().unwrap();

        let mut buf = [0u8; 2];
        assert!(matches!(handle.read_bytes(&mut buf), Err(Error::Closed)));
        assert!(matches!(handle.write_bytes(&[0x01]), Err(Error::Closed)));
        assert!(matches!(handle.write_then_read(&[0x01], &mut buf), Err(Error::Closed)));
        // Accessors still work.
        assert_eq!(handle.address(), 0x48);
    }
}
