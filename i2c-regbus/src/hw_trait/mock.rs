//! Recording bus for unit tests.
//!
//! Every primitive call is appended to `calls`; reads are served from a
//! queue of scripted responses.

use std::collections::VecDeque;
use std::io;

use super::I2cBus;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Write(Vec<u8>),
    Read(usize),
    WriteRead { write: Vec<u8>, read_len: usize },
    Close,
}

#[derive(Debug, Default)]
pub struct MockBus {
    pub address: u8,
    pub calls: Vec<Call>,
    responses: VecDeque<Vec<u8>>,
    fail_writes: bool,
    fail_reads: bool,
    closed: bool,
}

impl MockBus {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            ..Default::default()
        }
    }

    /// Queue bytes the next read (or combined transfer) will return.
    pub fn respond(mut self, bytes: &[u8]) -> Self {
        self.responses.push_back(bytes.to_vec());
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn writes(&self) -> Vec<&[u8]> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Write(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    fn serve(&mut self, buffer: &mut [u8]) -> usize {
        let response = self.responses.pop_front().unwrap_or_default();
        let n = response.len().min(buffer.len());
        buffer[..n].copy_from_slice(&response[..n]);
        n
    }
}

impl I2cBus for MockBus {
    fn address(&self) -> u8 {
        self.address
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize> {
        if self.closed {
            return Err(Error::Closed);
        }
        self.calls.push(Call::Read(buffer.len()));
        if self.fail_reads {
            return Err(io::Error::from(io::ErrorKind::TimedOut).into());
        }
        Ok(self.serve(buffer))
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<usize> {
        if self.closed {
            return Err(Error::Closed);
        }
        self.calls.push(Call::Write(data.to_vec()));
        if self.fail_writes {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe).into());
        }
        Ok(data.len())
    }

    fn write_then_read(&mut self, write: &[u8], read: &mut [u8]) -> Result<(usize, usize)> {
        if self.closed {
            return Err(Error::Closed);
        }
        self.calls.push(Call::WriteRead {
            write: write.to_vec(),
            read_len: read.len(),
        });
        self.serve(read);
        Ok((write.len(), read.len()))
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::Closed);
        }
        self.calls.push(Call::Close);
        self.closed = true;
        Ok(())
    }
}
