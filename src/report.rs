use usbd_hid::descriptor::KeyboardReport;

use crate::codes::Keystroke;

const LEFT_SHIFT_BIT: u8 = 1;

fn set_bit(num: &mut u8, bit: u8, pos: u8) {
    let mask = 1 << pos;
    if bit == 1 {
        *num |= mask
    } else {
        *num &= !mask
    }
}

const fn empty_report() -> KeyboardReport {
    KeyboardReport {
        modifier: 0,
        reserved: 0,
        leds: 0,
        keycodes: [0; 6],
    }
}

/// Press then release report for one synthesized tap
pub struct KeystrokeReports {
    press: KeyboardReport,
    release: KeyboardReport,
}

impl KeystrokeReports {
    pub fn new(stroke: Keystroke) -> Self {
        let mut press = empty_report();
        set_bit(&mut press.modifier, stroke.shift as u8, LEFT_SHIFT_BIT);
        press.keycodes[0] = stroke.code.into();
        Self {
            press,
            release: empty_report(),
        }
    }

    pub fn press(&self) -> &KeyboardReport {
        &self.press
    }

    pub fn release(&self) -> &KeyboardReport {
        &self.release
    }

    /// Reports in the order they go on the wire
    pub fn iter(&self) -> impl Iterator<Item = &KeyboardReport> {
        [&self.press, &self.release].into_iter()
    }
}
