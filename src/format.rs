use heapless::String;

use crate::{
    codes::{KeyCodes, Keystroke},
    output::KeystrokeSink,
};

/// Longest rendering of an i32: a sign and ten digits
pub const MAX_INT_LEN: usize = 11;

/// Renders a value in base 10 with a leading minus for negatives and no
/// zero padding
pub fn format_integer(value: i32) -> String<MAX_INT_LEN> {
    let mut digits = [0u8; 10];
    let mut len = 0;
    let mut magnitude = value.unsigned_abs();
    loop {
        digits[len] = (magnitude % 10) as u8;
        magnitude /= 10;
        len += 1;
        if magnitude == 0 {
            break;
        }
    }

    let mut out = String::new();
    if value < 0 {
        // Capacity covers the sign plus every u32 digit
        let _ = out.push('-');
    }
    for &d in digits[..len].iter().rev() {
        let _ = out.push((b'0' + d) as char);
    }
    out
}

/// Keystrokes that type out a value, one per character
pub fn integer_keystrokes(value: i32) -> impl Iterator<Item = Keystroke> {
    format_integer(value).into_bytes().into_iter().filter_map(|c| match c {
        b'-' => Some(Keystroke::plain(KeyCodes::KeyboardDashUnderscore)),
        b'0'..=b'9' => KeyCodes::from_digit(c - b'0').map(Keystroke::plain),
        _ => None,
    })
}

pub async fn send_integer(sink: &mut impl KeystrokeSink, value: i32) {
    for stroke in integer_keystrokes(value) {
        sink.emit_keystroke(stroke).await;
    }
}
