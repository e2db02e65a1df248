//! Linux I2C userspace ABI.
//!
//! Values from `<linux/i2c-dev.h>` and `<linux/i2c.h>`. They are fixed by
//! the kernel and must not be changed.

use std::io;
use std::marker::PhantomData;
use std::os::fd::RawFd;

use nix::libc::c_int;

/// Bind the 7-bit target address used by plain read()/write().
pub const I2C_SLAVE: u16 = 0x0703;

/// Run an array of messages as one combined transaction.
pub const I2C_RDWR: u16 = 0x0707;

/// Message flag: read from target to master.
pub const I2C_M_RD: u16 = 0x0001;

/// `struct i2c_msg`
#[repr(C)]
#[derive(Debug)]
pub struct RawMessage {
    pub addr: u16,
    pub flags: u16,
    pub len: u16,
    pub buf: *mut u8,
}

/// `struct i2c_rdwr_ioctl_data`
#[repr(C)]
#[derive(Debug)]
pub struct RdwrData {
    pub msgs: *mut RawMessage,
    pub nmsgs: u32,
}

nix::ioctl_write_int_bad!(set_target_address, I2C_SLAVE);
nix::ioctl_readwrite_bad!(rdwr, I2C_RDWR, RdwrData);

/// One segment of a combined transaction.
///
/// Borrows its payload for `'a`, so the buffer outlives the ioctl that
/// reads or fills it.
#[repr(transparent)]
#[derive(Debug)]
pub struct Message<'a> {
    raw: RawMessage,
    _buf: PhantomData<&'a mut [u8]>,
}

impl<'a> Message<'a> {
    /// Master-to-target segment.
    pub fn write(addr: u8, data: &'a [u8]) -> io::Result<Self> {
        // The kernel never writes through a segment without I2C_M_RD.
        Self::new(addr, 0, data.as_ptr().cast_mut(), data.len())
    }

    /// Target-to-master segment filling `buffer`.
    pub fn read(addr: u8, buffer: &'a mut [u8]) -> io::Result<Self> {
        Self::new(addr, I2C_M_RD, buffer.as_mut_ptr(), buffer.len())
    }

    fn new(addr: u8, flags: u16, buf: *mut u8, len: usize) -> io::Result<Self> {
        let len = u16::try_from(len).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("I2C message of {len} bytes exceeds {} byte limit", u16::MAX),
            )
        })?;
        Ok(Self {
            raw: RawMessage {
                addr: addr.into(),
                flags,
                len,
                buf,
            },
            _buf: PhantomData,
        })
    }

    pub fn flags(&self) -> u16 {
        self.raw.flags
    }

    pub fn len(&self) -> usize {
        self.raw.len.into()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.len == 0
    }
}

/// Bind `address` on the open bus `fd`.
pub fn bind_address(fd: RawFd, address: u8) -> nix::Result<()> {
    // SAFETY: I2C_SLAVE takes the address by value; no memory is shared.
    unsafe { set_target_address(fd, c_int::from(address)) }.map(drop)
}

/// Submit `msgs` as a single I2C_RDWR transaction.
///
/// Returns the number of messages the kernel reports as transferred.
pub fn transfer(fd: RawFd, msgs: &mut [Message<'_>]) -> nix::Result<usize> {
    let mut data = RdwrData {
        msgs: msgs.as_mut_ptr().cast::<RawMessage>(),
        nmsgs: msgs.len() as u32,
    };
    // SAFETY: Message is repr(transparent) over RawMessage, and every
    // descriptor borrows a live buffer of at least `len` bytes for the
    // duration of this call.
    let done = unsafe { rdwr(fd, &mut data) }?;
    Ok(done as usize)
}
