use heapless::Vec;

use crate::{MAX_INPUT, error::CalcError};

/// Digits typed since the last commit, earliest digit first
#[derive(Clone, Debug, Default)]
pub struct InputBuffer {
    digits: Vec<u8, MAX_INPUT>,
}

impl InputBuffer {
    pub const fn new() -> Self {
        Self { digits: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.digits.is_full()
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Appends a digit. A full buffer or a value above 9 leaves the buffer
    /// untouched and returns InputOverflow
    pub fn record_digit(&mut self, digit: u8) -> Result<(), CalcError> {
        if digit > 9 {
            warn!("Rejected non-decimal digit {}", digit);
            return Err(CalcError::InputOverflow);
        }
        self.digits.push(digit).map_err(|_| {
            warn!("Input buffer full, dropped digit {}", digit);
            CalcError::InputOverflow
        })
    }

    /// Removes the last digit. Returns false if there was nothing to remove
    pub fn backspace(&mut self) -> bool {
        self.digits.pop().is_some()
    }

    /// Interprets the buffer as a base 10 number with the earliest digit most
    /// significant, then clears it. Values past i32 wrap modulo 2^32.
    pub fn drain_to_integer(&mut self) -> i32 {
        let value = self
            .digits
            .iter()
            .fold(0i32, |acc, &d| acc.wrapping_mul(10).wrapping_add(d as i32));
        self.clear();
        value
    }

    pub fn clear(&mut self) {
        self.digits.fill(0);
        self.digits.clear();
    }
}
