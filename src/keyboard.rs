pub const KEY_COUNT: usize = 16;

/// The 16-key hex keypad. The host writes it between cycles; the machine only
/// reads it and never releases a key itself.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_COUNT],
        }
    }

    pub fn set(&mut self, key: u8, pressed: bool) {
        self.keys[(key & 0xF) as usize] = pressed;
    }

    // VX may hold any byte; only the low nibble names a key
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// Lowest-numbered key currently held, if any.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        keypad.set(0xB, true);
        keypad.set(0x4, true);
        assert!(keypad.is_pressed(0xB));
        assert_eq!(keypad.first_pressed(), Some(0x4));
        keypad.set(0x4, false);
        assert_eq!(keypad.first_pressed(), Some(0xB));
        keypad.set(0xB, false);
        assert_eq!(keypad.first_pressed(), None);
    }

    #[test]
    fn only_low_nibble_selects_key() {
        let mut keypad = Keypad::new();
        keypad.set(0x3, true);
        assert!(keypad.is_pressed(0x13));
    }
}
