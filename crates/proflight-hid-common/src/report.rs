//! HID report parsing and building helpers

use crate::{ProflightHidError, ProflightHidResult};

pub struct ReportParser<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ReportParser<'a> {
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self {
            buffer: data,
            position: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    pub fn read_u8(&mut self) -> ProflightHidResult<u8> {
        let value = self
            .buffer
            .get(self.position)
            .copied()
            .ok_or_else(|| ProflightHidError::InvalidReport("Unexpected end of data".to_string()))?;
        self.position += 1;
        Ok(value)
    }

    pub fn read_bytes(&mut self, count: usize) -> ProflightHidResult<&'a [u8]> {
        let end = self.position.saturating_add(count);
        let slice = self
            .buffer
            .get(self.position..end)
            .ok_or_else(|| ProflightHidError::InvalidReport("Unexpected end of data".to_string()))?;
        self.position = end;
        Ok(slice)
    }

    pub fn skip(&mut self, count: usize) {
        self.position = (self.position + count).min(self.buffer.len());
    }
}

pub struct ReportBuilder {
    buffer: Vec<u8>,
}

impl ReportBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(data);
        self
    }

    /// Zero-fill up to `len` bytes. Does nothing if the buffer is already longer.
    pub fn pad_to(&mut self, len: usize) -> &mut Self {
        while self.buffer.len() < len {
            self.buffer.push(0);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::with_capacity(32)
    }
}
