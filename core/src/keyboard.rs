use crate::constants::KEY_COUNT;

/// # Keypad layout
/// Chip-8 input is generated with a hexadecimal keypad, laid out as:
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
/// Hosts map their own keys onto this grid by position.
pub const KEYPAD_LAYOUT: [[u8; 4]; 4] = [
    [0x1, 0x2, 0x3, 0xC],
    [0x4, 0x5, 0x6, 0xD],
    [0x7, 0x8, 0x9, 0xE],
    [0xA, 0x0, 0xB, 0xF],
];

/// Logical key for a register value; only the low nibble names a key
pub fn logical_key(value: u8) -> u8 {
    value & 0xF
}

/// What the CPU needs to know about the keypad.
///
/// Key-down state is level-triggered; `take_next_press` is edge-triggered and
/// hands out each press at most once.
pub trait Keyboard {
    fn is_key_pressed(&self, key: u8) -> bool;

    /// Every logical key currently held down, in ascending order
    fn keys_down(&self) -> Vec<u8> {
        (0..KEY_COUNT as u8)
            .filter(|&key| self.is_key_pressed(key))
            .collect()
    }

    /// The first key pressed since the last call, if any
    fn take_next_press(&mut self) -> Option<u8>;
}

/// Tracks the pressed status of keys 0..F
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Keypad {
    pressed_keys: [bool; KEY_COUNT],
    next_press: Option<u8>,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the logical key (0x0..0xF) that was pressed
    pub fn key_press(&mut self, key: u8) {
        let key = logical_key(key);
        if !self.pressed_keys[usize::from(key)] && self.next_press.is_none() {
            self.next_press = Some(key);
        }
        self.pressed_keys[usize::from(key)] = true;
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the logical key (0x0..0xF) that was released
    pub fn key_release(&mut self, key: u8) {
        self.pressed_keys[usize::from(logical_key(key))] = false;
    }

    pub fn release_all(&mut self) {
        self.pressed_keys = [false; KEY_COUNT];
        self.next_press = None;
    }
}

impl Keyboard for Keypad {
    fn is_key_pressed(&self, key: u8) -> bool {
        self.pressed_keys[usize::from(logical_key(key))]
    }

    fn take_next_press(&mut self) -> Option<u8> {
        self.next_press.take()
    }
}
