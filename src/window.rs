use anyhow::{Context, Result};
use chipcore::display::{FrameBuffer, HEIGHT, WIDTH};
use chipcore::keyboard::Keypad;
use minifb::{Key, Scale, Window, WindowOptions};

use crate::config::WindowScale;

const TITLE: &str = "chipcore - ESC to exit";
const ON: u32 = from_u8_rgb(0, 127, 255);
const OFF: u32 = from_u8_rgb(0, 0, 0);

// 1 2 3 C       1 2 3 4
// 4 5 6 D  <->  Q W E R
// 7 8 9 E       A S D F
// A 0 B F       Z X C V
const KEYMAP: [(Key, u8); 16] = [
    (Key::Key1, 0x1),
    (Key::Key2, 0x2),
    (Key::Key3, 0x3),
    (Key::Key4, 0xC),
    (Key::Q, 0x4),
    (Key::W, 0x5),
    (Key::E, 0x6),
    (Key::R, 0xD),
    (Key::A, 0x7),
    (Key::S, 0x8),
    (Key::D, 0x9),
    (Key::F, 0xE),
    (Key::Z, 0xA),
    (Key::X, 0x0),
    (Key::C, 0xB),
    (Key::V, 0xF),
];

const fn from_u8_rgb(r: u8, g: u8, b: u8) -> u32 {
    let (r, g, b) = (r as u32, g as u32, b as u32);
    (r << 16) | (g << 8) | b
}

fn to_minifb_scale(scale: WindowScale) -> Scale {
    match scale {
        WindowScale::X1 => Scale::X1,
        WindowScale::X2 => Scale::X2,
        WindowScale::X4 => Scale::X4,
        WindowScale::X8 => Scale::X8,
        WindowScale::X16 => Scale::X16,
        WindowScale::X32 => Scale::X32,
    }
}

/// The minifb window the host renders into and polls keys from.
pub struct Screen {
    pixel_buffer: Vec<u32>,
    window: Window,
    beeping: bool,
}

impl Screen {
    pub fn new(scale: WindowScale) -> Result<Self> {
        let mut window = Window::new(
            TITLE,
            WIDTH,
            HEIGHT,
            WindowOptions {
                scale: to_minifb_scale(scale),
                ..WindowOptions::default()
            },
        )
        .context("failed to open window")?;
        // Limit to max ~60 fps update rate
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600)));
        Ok(Self {
            pixel_buffer: vec![OFF; WIDTH * HEIGHT],
            window,
            beeping: false,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Mirrors the keys currently held into `keypad`.
    pub fn poll_keys(&self, keypad: &mut Keypad) {
        for (key, slot) in KEYMAP {
            keypad.set(slot, self.window.is_key_down(key));
        }
    }

    pub fn show_sound(&mut self, active: bool) {
        if active != self.beeping {
            self.beeping = active;
            let title = if active {
                format!("{TITLE} [beep]")
            } else {
                TITLE.to_string()
            };
            self.window.set_title(&title);
        }
    }

    /// Pushes the frame buffer to the window if it changed, otherwise just
    /// pumps window events.
    pub fn sync(&mut self, fb: &FrameBuffer, dirty: bool) -> Result<()> {
        if dirty {
            for (pixel, &on) in self.pixel_buffer.iter_mut().zip(fb.pixels()) {
                *pixel = if on { ON } else { OFF };
            }
            self.window
                .update_with_buffer(&self.pixel_buffer, WIDTH, HEIGHT)
                .context("failed to draw frame")?;
        } else {
            self.window.update();
        }
        Ok(())
    }
}
