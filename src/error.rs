use core::fmt;

use crate::codes::Operator;

/// Conditions a key event can run into. All of them are recovered inside
/// the key handler after being echoed to the transcript.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalcError {
    /// Digit typed while the input buffer was full, or not a decimal digit
    InputOverflow,
    /// Push onto a full stack. The value is discarded
    StackOverflow,
    /// Operator needs more entries than the stack holds
    StackUnderflow { op: Operator },
    /// Pop, peek or list on an empty stack
    EmptyStack,
    DivisionByZero,
}

impl CalcError {
    /// Transcript wording. Underflow is followed by the operator symbol
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InputOverflow => "input full",
            Self::StackOverflow => "stack full",
            Self::StackUnderflow { .. } => "can't",
            Self::EmptyStack => "empty",
            Self::DivisionByZero => "division by zero",
        }
    }

    pub const fn operator(&self) -> Option<Operator> {
        match self {
            Self::StackUnderflow { op } => Some(*op),
            _ => None,
        }
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())?;
        if let Some(op) = self.operator() {
            write!(f, " {}", op.symbol())?;
        }
        Ok(())
    }
}
