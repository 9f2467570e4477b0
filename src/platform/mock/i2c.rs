//! Mock I2C implementation for testing
//!
//! Emulates the register view of a u-blox DDC port: a write-read of register
//! `0xFD` returns the pending byte count (big-endian), a write-read of `0xFF`
//! drains the message stream and yields `0xFF` once it is empty.

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::I2cInterface,
    Result,
};
use std::collections::VecDeque;
use std::vec::Vec;

/// Register holding the number of bytes ready to read (2 bytes, big-endian)
const REG_BYTES_AVAILABLE: u8 = 0xFD;
/// Register streaming the pending bytes
const REG_STREAM: u8 = 0xFF;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Read transaction
    Read { addr: u8, len: usize },
    /// Write-Read transaction
    WriteRead {
        addr: u8,
        write_data: Vec<u8>,
        read_len: usize,
    },
}

/// Mock I2C implementation
///
/// Records all transactions for test verification. Bytes queued with
/// [`push_stream`](Self::push_stream) are served through the DDC registers,
/// and [`on_write`](Self::on_write) lets a test answer a command frame the
/// moment the driver sends it.
#[derive(Debug, Default)]
pub struct MockI2c {
    transactions: Vec<I2cTransaction>,
    stream: VecDeque<u8>,
    responders: Vec<(Vec<u8>, Vec<u8>)>,
    available_limit: Option<u16>,
    write_error: Option<I2cError>,
    read_error: Option<I2cError>,
}

impl MockI2c {
    /// Create a new mock I2C with an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> &[I2cTransaction] {
        &self.transactions
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Payloads of every plain write, in order
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.transactions
            .iter()
            .filter_map(|t| match t {
                I2cTransaction::Write { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Append bytes to the receiver output stream
    pub fn push_stream(&mut self, data: &[u8]) {
        self.stream.extend(data.iter().copied());
    }

    /// Bytes still waiting in the stream
    pub fn pending(&self) -> usize {
        self.stream.len()
    }

    /// Queue `response` every time exactly `trigger` is written
    pub fn on_write(&mut self, trigger: &[u8], response: &[u8]) {
        self.responders.push((trigger.to_vec(), response.to_vec()));
    }

    /// Cap the count reported by the bytes-available register
    pub fn limit_available(&mut self, limit: u16) {
        self.available_limit = Some(limit);
    }

    /// Make every write fail with `error`
    pub fn fail_writes(&mut self, error: I2cError) {
        self.write_error = Some(error);
    }

    /// Make every read and write-read fail with `error`
    pub fn fail_reads(&mut self, error: I2cError) {
        self.read_error = Some(error);
    }

    fn available(&self) -> u16 {
        let len = self.stream.len().min(u16::MAX as usize) as u16;
        match self.available_limit {
            Some(limit) => len.min(limit),
            None => len,
        }
    }

    fn drain_into(&mut self, buffer: &mut [u8]) {
        for slot in buffer.iter_mut() {
            *slot = self.stream.pop_front().unwrap_or(REG_STREAM);
        }
    }
}

impl I2cInterface for MockI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::Write {
            addr,
            data: data.to_vec(),
        });

        if let Some(error) = self.write_error {
            return Err(PlatformError::I2c(error));
        }

        let responses: Vec<u8> = self
            .responders
            .iter()
            .filter(|(trigger, _)| trigger.as_slice() == data)
            .flat_map(|(_, response)| response.iter().copied())
            .collect();
        self.stream.extend(responses);

        Ok(())
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::Read {
            addr,
            len: buffer.len(),
        });

        if let Some(error) = self.read_error {
            return Err(PlatformError::I2c(error));
        }

        self.drain_into(buffer);
        Ok(())
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::WriteRead {
            addr,
            write_data: write_data.to_vec(),
            read_len: read_buffer.len(),
        });

        if let Some(error) = self.read_error {
            return Err(PlatformError::I2c(error));
        }

        match write_data.first() {
            Some(&REG_BYTES_AVAILABLE) => {
                let count = self.available().to_be_bytes();
                for (slot, byte) in read_buffer.iter_mut().zip(count.iter()) {
                    *slot = *byte;
                }
            }
            _ => self.drain_into(read_buffer),
        }

        Ok(())
    }
}
