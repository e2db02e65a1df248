//! Typed register reads and writes over an [`I2cBus`].
//!
//! Reads select the register with a one-byte write, then read the value
//! with a separate raw read. Writes send the register address and the value
//! in a single write. Any failing step ends the operation with that step's
//! error; there is nothing to roll back.

use std::io;

use super::codec;
use crate::error::{Error, Result};
use crate::hw_trait::I2cBus;

/// Register-level access to one target device.
///
/// Holds no state beyond the bus. Register reads are two bus calls, so a
/// transport must have a single owner, or the caller must serialize access,
/// for the device's read pointer to stay consistent.
#[derive(Debug)]
pub struct RegisterTransport<B> {
    bus: B,
}

impl<B: I2cBus> RegisterTransport<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_inner(self) -> B {
        self.bus
    }

    /// 7-bit address of the target device.
    pub fn address(&self) -> u8 {
        self.bus.address()
    }

    /// Close the underlying bus.
    pub fn close(&mut self) -> Result<()> {
        self.bus.close()
    }

    // Read section

    pub fn read_reg_byte(&mut self, register: u8) -> Result<u8> {
        let [value] = self.read_reg_array::<1>(register)?;
        Ok(value)
    }

    pub fn read_reg_u16_be(&mut self, register: u8) -> Result<u16> {
        self.read_reg_array(register).map(codec::decode_u16_be)
    }

    pub fn read_reg_u16_le(&mut self, register: u8) -> Result<u16> {
        self.read_reg_array(register).map(codec::decode_u16_le)
    }

    pub fn read_reg_i16_be(&mut self, register: u8) -> Result<i16> {
        self.read_reg_array(register).map(codec::decode_i16_be)
    }

    pub fn read_reg_i16_le(&mut self, register: u8) -> Result<i16> {
        self.read_reg_array(register).map(codec::decode_i16_le)
    }

    pub fn read_reg_u32_be(&mut self, register: u8) -> Result<u32> {
        self.read_reg_array(register).map(codec::decode_u32_be)
    }

    /// Read up to `count` bytes starting at `register`.
    ///
    /// The bytes are returned undecoded. If the device returns fewer than
    /// `count`, the shorter sequence is returned.
    pub fn read_reg_bytes(&mut self, register: u8, count: usize) -> Result<Vec<u8>> {
        self.select(register)?;
        let mut buffer = vec![0u8; count];
        let n = self.bus.read_bytes(&mut buffer)?;
        buffer.truncate(n);
        Ok(buffer)
    }

    /// Read `count` bytes starting at `register` in a single transaction.
    ///
    /// Unlike [`Self::read_reg_bytes`], the register select and the read
    /// are joined by a repeated start, for devices that reset their read
    /// pointer on a stop condition.
    pub fn read_reg_bytes_no_stop(&mut self, register: u8, count: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; count];
        self.bus.write_then_read(&[register], &mut buffer)?;
        Ok(buffer)
    }

    // Write section

    pub fn write_reg_byte(&mut self, register: u8, value: u8) -> Result<()> {
        self.write_frame(&[register, value])
    }

    pub fn write_reg_u16_be(&mut self, register: u8, value: u16) -> Result<()> {
        self.write_frame(&codec::register_frame(register, &codec::encode_u16_be(value)))
    }

    pub fn write_reg_u16_le(&mut self, register: u8, value: u16) -> Result<()> {
        self.write_frame(&codec::register_frame(register, &codec::encode_u16_le(value)))
    }

    pub fn write_reg_i16_be(&mut self, register: u8, value: i16) -> Result<()> {
        self.write_frame(&codec::register_frame(register, &codec::encode_i16_be(value)))
    }

    pub fn write_reg_i16_le(&mut self, register: u8, value: i16) -> Result<()> {
        self.write_frame(&codec::register_frame(register, &codec::encode_i16_le(value)))
    }

    /// Write the low 24 bits of `value`, most significant byte first.
    pub fn write_reg_u24_be(&mut self, register: u8, value: u32) -> Result<()> {
        self.write_frame(&codec::register_frame(register, &codec::encode_u24_be(value)))
    }

    pub fn write_reg_u32_be(&mut self, register: u8, value: u32) -> Result<()> {
        self.write_frame(&codec::register_frame(register, &codec::encode_u32_be(value)))
    }

    /// Write `payload` unmodified after the register address.
    ///
    /// Returns the number of bytes put on the bus, register byte included.
    pub fn write_reg_bytes(&mut self, register: u8, payload: &[u8]) -> Result<usize> {
        self.bus.write_bytes(&codec::register_frame(register, payload))
    }

    /// Pass-through to the bus's combined write-then-read.
    ///
    /// No register byte is added; `write` goes out as given.
    pub fn write_then_read_bytes(&mut self, write: &[u8], read: &mut [u8]) -> Result<(usize, usize)> {
        self.bus.write_then_read(write, read)
    }

    // Helpers

    fn select(&mut self, register: u8) -> Result<()> {
        self.write_frame(&[register])
    }

    fn read_reg_array<const N: usize>(&mut self, register: u8) -> Result<[u8; N]> {
        self.select(register)?;
        let mut buffer = [0u8; N];
        let n = self.bus.read_bytes(&mut buffer)?;
        if n != N {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("register 0x{register:02x}: read {n} of {N} bytes"),
            )));
        }
        Ok(buffer)
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        let n = self.bus.write_bytes(frame)?;
        if n != frame.len() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("wrote {n} of {} bytes", frame.len()),
            )));
        }
        Ok(())
    }
}
