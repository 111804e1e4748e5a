use heapless::Vec;

use crate::{STACK_SIZE, codes::Operator, error::CalcError};

/// Bounded LIFO of signed 32-bit values. Arithmetic wraps on overflow.
#[derive(Clone, Debug, Default)]
pub struct Stack {
    values: Vec<i32, STACK_SIZE>,
}

impl Stack {
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn depth(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values bottom to top
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Pushes a value. A full stack keeps its entries and the value is dropped
    pub fn push(&mut self, value: i32) -> Result<(), CalcError> {
        self.values.push(value).map_err(|v| {
            warn!("Stack full, dropped {}", v);
            CalcError::StackOverflow
        })
    }

    pub fn pop(&mut self) -> Option<i32> {
        self.values.pop()
    }

    pub fn peek(&self) -> Result<i32, CalcError> {
        self.values.last().copied().ok_or(CalcError::EmptyStack)
    }

    /// Lazy top to bottom walk over every entry
    pub fn list(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.iter().rev().copied()
    }

    fn require(&self, depth: usize, op: Operator) -> Result<(), CalcError> {
        if self.depth() < depth {
            Err(CalcError::StackUnderflow { op })
        } else {
            Ok(())
        }
    }

    /// Pops b then a and pushes f(a, b). Caller has checked the depth
    fn binary(&mut self, f: impl FnOnce(i32, i32) -> i32) -> i32 {
        let n = self.values.len();
        let result = f(self.values[n - 2], self.values[n - 1]);
        self.values.truncate(n - 1);
        self.values[n - 2] = result;
        result
    }

    pub fn add(&mut self) -> Result<i32, CalcError> {
        self.require(2, Operator::Add)?;
        Ok(self.binary(i32::wrapping_add))
    }

    pub fn sub(&mut self) -> Result<i32, CalcError> {
        self.require(2, Operator::Sub)?;
        Ok(self.binary(i32::wrapping_sub))
    }

    pub fn mul(&mut self) -> Result<i32, CalcError> {
        self.require(2, Operator::Mul)?;
        Ok(self.binary(i32::wrapping_mul))
    }

    /// Truncating division. A zero divisor leaves both operands in place
    pub fn div(&mut self) -> Result<i32, CalcError> {
        self.require(2, Operator::Div)?;
        if self.peek()? == 0 {
            return Err(CalcError::DivisionByZero);
        }
        Ok(self.binary(i32::wrapping_div))
    }

    pub fn neg(&mut self) -> Result<i32, CalcError> {
        let top = self
            .values
            .last_mut()
            .ok_or(CalcError::StackUnderflow { op: Operator::Neg })?;
        *top = top.wrapping_neg();
        Ok(*top)
    }

    pub fn dup(&mut self) -> Result<i32, CalcError> {
        self.require(1, Operator::Dup)?;
        let top = self.peek()?;
        self.push(top)?;
        Ok(top)
    }

    /// Exchanges the top two entries
    pub fn swap(&mut self) -> Result<(), CalcError> {
        self.require(2, Operator::Swap)?;
        let n = self.values.len();
        self.values.swap(n - 1, n - 2);
        Ok(())
    }
}
