pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// Monochrome 64x32 pixel grid, row-major. Only the machine's CLS and DRW
/// change it; the host gets a shared reference.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    bit_buffer: [bool; WIDTH * HEIGHT],
    dirty: bool,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            bit_buffer: [false; WIDTH * HEIGHT],
            dirty: false,
        }
    }

    pub(crate) fn clear_buffer(&mut self) {
        self.bit_buffer = [false; WIDTH * HEIGHT];
        self.dirty = true;
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bit_buffer[(y % HEIGHT) * WIDTH + (x % WIDTH)]
    }

    /// Row-major pixel states.
    pub fn pixels(&self) -> &[bool] {
        &self.bit_buffer
    }

    pub fn is_blank(&self) -> bool {
        self.bit_buffer.iter().all(|&p| !p)
    }

    /// Returns whether anything changed since the last call.
    pub(crate) fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// XORs `sprite` onto the grid with its top-left corner at (`x`, `y`), one
    /// byte per row and the most significant bit leftmost. The origin and
    /// every pixel wrap around both edges independently. Returns true when any
    /// lit pixel was switched off.
    pub(crate) fn paint(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let (x, y) = (x as usize % WIDTH, y as usize % HEIGHT);
        let mut vf = false;
        for (i, row) in sprite.iter().enumerate() {
            let ny = (y + i) % HEIGHT;
            for j in 0..8 {
                if (row >> (7 - j)) & 1 == 0 {
                    continue;
                }
                let nx = (x + j) % WIDTH;
                let index = ny * WIDTH + nx;
                vf |= self.bit_buffer[index];
                self.bit_buffer[index] ^= true;
            }
        }
        self.dirty = true;
        vf
    }
}
