//! Line accumulation for the serial command stream.
//!
//! The host writes commands as text lines, but the UART hands them over in
//! whatever fragments happen to be buffered: half a line, one byte, or three
//! lines at once. [`LineAccumulator`] keeps the partial line between polls
//! and emits a [`Line`] each time a terminator arrives.
//!
//! Buffering is bounded by [`MAX_LINE_LEN`]. A host that never sends a
//! terminator cannot grow memory; the runaway line is reported once and
//! discarded up to the next terminator.

use heapless::Vec;

/// Byte that ends a logical line
pub const LINE_TERMINATOR: u8 = b'\n';

/// Maximum number of bytes buffered for one line (terminator excluded)
///
/// Real hosts send at most `"255, 255, 255"`; anything this long without a
/// terminator is noise.
pub const MAX_LINE_LEN: usize = 64;

/// Errors reported while accumulating lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`] without a terminator
    Overflow,
}

/// A complete logical line, terminator removed and whitespace trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8, MAX_LINE_LEN>,
}

impl Line {
    fn trimmed(raw: &[u8]) -> Self {
        let mut bytes = Vec::new();
        // Cannot fail: `raw` is the accumulator buffer of the same capacity
        let _ = bytes.extend_from_slice(trim_ascii_whitespace(raw));
        Self { bytes }
    }

    /// Raw line content
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Line content as text, or `None` if it is not valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    /// True for a blank line (only whitespace before the terminator)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Length in bytes after trimming
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

fn trim_ascii_whitespace(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if first.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    while let [rest @ .., last] = bytes {
        if last.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    bytes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccumulateState {
    /// Appending bytes to the current line
    Collecting,
    /// Dropping the tail of an overflowed line until the next terminator
    Discarding,
}

/// Assembles logical lines from a fragmented byte stream
///
/// Feeding never blocks and never waits for a terminator; bytes of an
/// unfinished line simply stay buffered until the next call.
#[derive(Debug, Clone)]
pub struct LineAccumulator {
    state: AccumulateState,
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl Default for LineAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            state: AccumulateState::Collecting,
            buffer: Vec::new(),
        }
    }

    /// Drop any partial line and resume collecting
    pub fn reset(&mut self) {
        self.state = AccumulateState::Collecting;
        self.buffer.clear();
    }

    /// Number of bytes buffered for the line in progress
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// True while the tail of an overflowed line is being thrown away
    pub fn is_discarding(&self) -> bool {
        self.state == AccumulateState::Discarding
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when `byte` completes a line (empty lines
    /// included), `Ok(None)` when more bytes are needed, or
    /// `Err(LineError::Overflow)` the moment the current line outgrows the
    /// buffer.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match self.state {
            AccumulateState::Discarding => {
                if byte == LINE_TERMINATOR {
                    self.state = AccumulateState::Collecting;
                }
                Ok(None)
            }
            AccumulateState::Collecting => {
                if byte == LINE_TERMINATOR {
                    let line = Line::trimmed(&self.buffer);
                    self.buffer.clear();
                    return Ok(Some(line));
                }

                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.state = AccumulateState::Discarding;
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
        }
    }

    /// Feed a chunk of bytes, yielding every line it completes in order
    ///
    /// Bytes after the last terminator stay buffered. The iterator must be
    /// driven to the end for all of `bytes` to be consumed.
    pub fn lines<'a>(&'a mut self, bytes: &'a [u8]) -> Lines<'a> {
        Lines {
            accumulator: self,
            bytes: bytes.iter(),
        }
    }
}

/// Iterator over the lines completed by one chunk of input
///
/// Created by [`LineAccumulator::lines`].
pub struct Lines<'a> {
    accumulator: &'a mut LineAccumulator,
    bytes: core::slice::Iter<'a, u8>,
}

impl Iterator for Lines<'_> {
    type Item = Result<Line, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        for &byte in self.bytes.by_ref() {
            match self.accumulator.feed(byte) {
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
