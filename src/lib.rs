//! Firmware core for a keyboard that doubles as an RPN calculator.
//!
//! Key events come in through [`calculator::Calculator::on_key_event`]; results
//! and the running transcript go out as synthesized keystrokes through a
//! [`output::KeystrokeSink`] supplied by the host firmware.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod calculator;
pub mod codes;
pub mod error;
pub mod format;
pub mod input;
pub mod output;
pub mod report;
pub mod stack;

mod config {
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}

pub use config::{MAX_INPUT, OUTPUT_QUEUE_SIZE, STACK_SIZE};
