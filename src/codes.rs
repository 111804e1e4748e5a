use num_enum::{IntoPrimitive, TryFromPrimitive};

/// First logical code handed to the calculator. Sits above the HID usage
/// table so host keymaps can mix calculator keys with ordinary keys.
pub const RPN_KEY_BASE: u16 = 0x7E00;

/// HID keyboard usage IDs the calculator types out
#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum KeyCodes {
    KeyboardAa = 0x04,
    KeyboardBb = 0x05,
    KeyboardCc = 0x06,
    KeyboardDd = 0x07,
    KeyboardEe = 0x08,
    KeyboardFf = 0x09,
    KeyboardGg = 0x0A,
    KeyboardHh = 0x0B,
    KeyboardIi = 0x0C,
    KeyboardJj = 0x0D,
    KeyboardKk = 0x0E,
    KeyboardLl = 0x0F,
    KeyboardMm = 0x10,
    KeyboardNn = 0x11,
    KeyboardOo = 0x12,
    KeyboardPp = 0x13,
    KeyboardQq = 0x14,
    KeyboardRr = 0x15,
    KeyboardSs = 0x16,
    KeyboardTt = 0x17,
    KeyboardUu = 0x18,
    KeyboardVv = 0x19,
    KeyboardWw = 0x1A,
    KeyboardXx = 0x1B,
    KeyboardYy = 0x1C,
    KeyboardZz = 0x1D,
    Keyboard1Exclamation = 0x1E,
    Keyboard2At = 0x1F,
    Keyboard3Hash = 0x20,
    Keyboard4Dollar = 0x21,
    Keyboard5Percent = 0x22,
    Keyboard6Caret = 0x23,
    Keyboard7Ampersand = 0x24,
    Keyboard8Asterisk = 0x25,
    Keyboard9OpenParens = 0x26,
    Keyboard0CloseParens = 0x27,
    KeyboardEnter = 0x28,
    KeyboardBackspace = 0x2A,
    KeyboardTab = 0x2B,
    KeyboardSpacebar = 0x2C,
    KeyboardDashUnderscore = 0x2D,
    KeyboardEqualPlus = 0x2E,
    KeyboardOpenBracketBrace = 0x2F,
    KeyboardCloseBracketBrace = 0x30,
    KeyboardBackslashBar = 0x31,
    KeyboardSemiColon = 0x33,
    KeyboardSingleDoubleQuote = 0x34,
    KeyboardBacktickTilde = 0x35,
    KeyboardCommaLess = 0x36,
    KeyboardPeriodGreater = 0x37,
    KeyboardSlashQuestion = 0x38,
}

const DIGIT_CODES: [KeyCodes; 10] = [
    KeyCodes::Keyboard0CloseParens,
    KeyCodes::Keyboard1Exclamation,
    KeyCodes::Keyboard2At,
    KeyCodes::Keyboard3Hash,
    KeyCodes::Keyboard4Dollar,
    KeyCodes::Keyboard5Percent,
    KeyCodes::Keyboard6Caret,
    KeyCodes::Keyboard7Ampersand,
    KeyCodes::Keyboard8Asterisk,
    KeyCodes::Keyboard9OpenParens,
];

const LETTER_CODES: [KeyCodes; 26] = [
    KeyCodes::KeyboardAa,
    KeyCodes::KeyboardBb,
    KeyCodes::KeyboardCc,
    KeyCodes::KeyboardDd,
    KeyCodes::KeyboardEe,
    KeyCodes::KeyboardFf,
    KeyCodes::KeyboardGg,
    KeyCodes::KeyboardHh,
    KeyCodes::KeyboardIi,
    KeyCodes::KeyboardJj,
    KeyCodes::KeyboardKk,
    KeyCodes::KeyboardLl,
    KeyCodes::KeyboardMm,
    KeyCodes::KeyboardNn,
    KeyCodes::KeyboardOo,
    KeyCodes::KeyboardPp,
    KeyCodes::KeyboardQq,
    KeyCodes::KeyboardRr,
    KeyCodes::KeyboardSs,
    KeyCodes::KeyboardTt,
    KeyCodes::KeyboardUu,
    KeyCodes::KeyboardVv,
    KeyCodes::KeyboardWw,
    KeyCodes::KeyboardXx,
    KeyCodes::KeyboardYy,
    KeyCodes::KeyboardZz,
];

impl KeyCodes {
    /// Usage for a decimal digit. Returns None for anything above 9
    pub const fn from_digit(digit: u8) -> Option<Self> {
        if digit < 10 {
            Some(DIGIT_CODES[digit as usize])
        } else {
            None
        }
    }
}

/// A single synthesized key tap, optionally with shift held
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Keystroke {
    pub code: KeyCodes,
    pub shift: bool,
}

impl Keystroke {
    pub const fn plain(code: KeyCodes) -> Self {
        Self { code, shift: false }
    }

    pub const fn shifted(code: KeyCodes) -> Self {
        Self { code, shift: true }
    }
}

/// Maps a printable ASCII character to the keystroke that types it on a US
/// layout. Returns None for characters with no single-key equivalent.
pub fn ascii_keystroke(c: char) -> Option<Keystroke> {
    use KeyCodes::*;
    let stroke = match c {
        'a'..='z' => Keystroke::plain(LETTER_CODES[(c as u8 - b'a') as usize]),
        'A'..='Z' => Keystroke::shifted(LETTER_CODES[(c as u8 - b'A') as usize]),
        '0'..='9' => Keystroke::plain(DIGIT_CODES[(c as u8 - b'0') as usize]),
        '\n' => Keystroke::plain(KeyboardEnter),
        '\t' => Keystroke::plain(KeyboardTab),
        ' ' => Keystroke::plain(KeyboardSpacebar),
        '!' => Keystroke::shifted(Keyboard1Exclamation),
        '@' => Keystroke::shifted(Keyboard2At),
        '#' => Keystroke::shifted(Keyboard3Hash),
        '$' => Keystroke::shifted(Keyboard4Dollar),
        '%' => Keystroke::shifted(Keyboard5Percent),
        '^' => Keystroke::shifted(Keyboard6Caret),
        '&' => Keystroke::shifted(Keyboard7Ampersand),
        '*' => Keystroke::shifted(Keyboard8Asterisk),
        '(' => Keystroke::shifted(Keyboard9OpenParens),
        ')' => Keystroke::shifted(Keyboard0CloseParens),
        '-' => Keystroke::plain(KeyboardDashUnderscore),
        '_' => Keystroke::shifted(KeyboardDashUnderscore),
        '=' => Keystroke::plain(KeyboardEqualPlus),
        '+' => Keystroke::shifted(KeyboardEqualPlus),
        '[' => Keystroke::plain(KeyboardOpenBracketBrace),
        '{' => Keystroke::shifted(KeyboardOpenBracketBrace),
        ']' => Keystroke::plain(KeyboardCloseBracketBrace),
        '}' => Keystroke::shifted(KeyboardCloseBracketBrace),
        '\\' => Keystroke::plain(KeyboardBackslashBar),
        '|' => Keystroke::shifted(KeyboardBackslashBar),
        ';' => Keystroke::plain(KeyboardSemiColon),
        ':' => Keystroke::shifted(KeyboardSemiColon),
        '\'' => Keystroke::plain(KeyboardSingleDoubleQuote),
        '"' => Keystroke::shifted(KeyboardSingleDoubleQuote),
        '`' => Keystroke::plain(KeyboardBacktickTilde),
        '~' => Keystroke::shifted(KeyboardBacktickTilde),
        ',' => Keystroke::plain(KeyboardCommaLess),
        '<' => Keystroke::shifted(KeyboardCommaLess),
        '.' => Keystroke::plain(KeyboardPeriodGreater),
        '>' => Keystroke::shifted(KeyboardPeriodGreater),
        '/' => Keystroke::plain(KeyboardSlashQuestion),
        '?' => Keystroke::shifted(KeyboardSlashQuestion),
        _ => return None,
    };
    Some(stroke)
}

/// Logical calculator keys, in the order the keymap assigns them
#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum RpnKey {
    Digit0 = 0x7E00,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Enter,
    Backspace,
    Add,
    Sub,
    Neg,
    Div,
    Mul,
    Dup,
    Pop,
    Peek,
    Swap,
    List,
}

/// Operator keys. Each one commits pending input before it runs
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operator {
    Add,
    Sub,
    Neg,
    Mul,
    Div,
    Dup,
    Swap,
    Pop,
    Peek,
    List,
}

impl Operator {
    /// Name used in the "can't <op>" transcript line
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Neg => "negate",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Dup => "dup",
            Self::Swap => "swap",
            Self::Pop => "pop",
            Self::Peek => "peek",
            Self::List => "list",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCategory {
    Digit(u8),
    Enter,
    Backspace,
    Operator(Operator),
}

impl RpnKey {
    pub const fn category(&self) -> KeyCategory {
        match self {
            Self::Enter => KeyCategory::Enter,
            Self::Backspace => KeyCategory::Backspace,
            Self::Add => KeyCategory::Operator(Operator::Add),
            Self::Sub => KeyCategory::Operator(Operator::Sub),
            Self::Neg => KeyCategory::Operator(Operator::Neg),
            Self::Div => KeyCategory::Operator(Operator::Div),
            Self::Mul => KeyCategory::Operator(Operator::Mul),
            Self::Dup => KeyCategory::Operator(Operator::Dup),
            Self::Pop => KeyCategory::Operator(Operator::Pop),
            Self::Peek => KeyCategory::Operator(Operator::Peek),
            Self::Swap => KeyCategory::Operator(Operator::Swap),
            Self::List => KeyCategory::Operator(Operator::List),
            // Digits occupy the first ten codes
            digit => KeyCategory::Digit((*digit as u16 - RPN_KEY_BASE) as u8),
        }
    }
}
