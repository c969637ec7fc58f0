use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Deserialize;

/// KeyCode is the logical key a line is bound to.
///
/// Discriminants are the Linux input event codes (`KEY_*` in
/// `linux/input-event-codes.h`), which is what the synthetic keyboard emits.
/// Keymap files refer to keys by variant name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromPrimitive, IntoPrimitive, Deserialize)]
#[repr(u16)]
pub enum KeyCode {
    Escape = 1,
    Kc1 = 2,
    Kc2 = 3,
    Kc3 = 4,
    Kc4 = 5,
    Kc5 = 6,
    Kc6 = 7,
    Kc7 = 8,
    Kc8 = 9,
    Kc9 = 10,
    Kc0 = 11,
    Minus = 12,
    Equal = 13,
    Backspace = 14,
    Tab = 15,
    Q = 16,
    W = 17,
    E = 18,
    R = 19,
    T = 20,
    Y = 21,
    U = 22,
    I = 23,
    O = 24,
    P = 25,
    LeftBracket = 26,
    RightBracket = 27,
    Enter = 28,
    LCtrl = 29,
    A = 30,
    S = 31,
    D = 32,
    F = 33,
    G = 34,
    H = 35,
    J = 36,
    K = 37,
    L = 38,
    Semicolon = 39,
    Quote = 40,
    Grave = 41,
    LShift = 42,
    Backslash = 43,
    Z = 44,
    X = 45,
    C = 46,
    V = 47,
    B = 48,
    N = 49,
    M = 50,
    Comma = 51,
    Dot = 52,
    Slash = 53,
    RShift = 54,
    KpAsterisk = 55,
    LAlt = 56,
    Space = 57,
    CapsLock = 58,
    F1 = 59,
    F2 = 60,
    F3 = 61,
    F4 = 62,
    F5 = 63,
    F6 = 64,
    F7 = 65,
    F8 = 66,
    F9 = 67,
    F10 = 68,
    NumLock = 69,
    ScrollLock = 70,
    F11 = 87,
    F12 = 88,
    RCtrl = 97,
    RAlt = 100,
    Home = 102,
    Up = 103,
    PageUp = 104,
    Left = 105,
    Right = 106,
    End = 107,
    Down = 108,
    PageDown = 109,
    Insert = 110,
    Delete = 111,
    Power = 116,
    Pause = 119,
    LGui = 125,
    RGui = 126,
}

impl KeyCode {
    /// The Linux input event code of the key
    pub fn code(self) -> u16 {
        self.into()
    }
}
