use sdl2::keyboard::Keycode;

use chip8_core::KEYPAD_LAYOUT;

/// Host keys laid out in the same grid positions as the Chip-8 keypad
const HOST_LAYOUT: [[Keycode; 4]; 4] = [
    [Keycode::Num1, Keycode::Num2, Keycode::Num3, Keycode::Num4],
    [Keycode::Q, Keycode::W, Keycode::E, Keycode::R],
    [Keycode::A, Keycode::S, Keycode::D, Keycode::F],
    [Keycode::Z, Keycode::X, Keycode::C, Keycode::V],
];

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: Keycode) -> Option<u8> {
    HOST_LAYOUT
        .iter()
        .flatten()
        .zip(KEYPAD_LAYOUT.iter().flatten())
        .find(|&(&host, _)| host == key)
        .map(|(_, &logical)| logical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_by_position() {
        assert_eq!(keymap(Keycode::Num1), Some(0x1));
        assert_eq!(keymap(Keycode::Num4), Some(0xC));
        assert_eq!(keymap(Keycode::X), Some(0x0));
        assert_eq!(keymap(Keycode::F), Some(0xE));
        assert_eq!(keymap(Keycode::V), Some(0xF));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(keymap(Keycode::P), None);
        assert_eq!(keymap(Keycode::Space), None);
    }
}
