use tracing::debug;

use crate::error::{Result, VmError};
use crate::registers::{IndexRegister, ProgramCounter};

pub type TypeAddr = u16; // in reality u12
type FontBytes = [u8; FONT_GLYPH_SIZE * 16];

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: TypeAddr = 0x200;
pub const FONT_BASE: TypeAddr = 0x50;
pub const FONT_GLYPH_SIZE: usize = 5;
pub const STACK_DEPTH: usize = 16;

const ADDR_MASK: TypeAddr = 0x0FFF;

pub const DEFAULT_FONT: FontBytes = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Address of the glyph for hex digit `digit`.
pub fn glyph_addr(digit: u8) -> TypeAddr {
    FONT_BASE + digit as TypeAddr * FONT_GLYPH_SIZE as TypeAddr
}

pub struct Memory {
    // 4k bytes
    // font data stored from 050 -> 09F (000 -> 04F is empty by convention)
    bytes: [u8; MEMORY_SIZE],
    pub pc: ProgramCounter,
    pub index: IndexRegister,
    pub stack: Stack,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font_start = FONT_BASE as usize;
        bytes[font_start..font_start + DEFAULT_FONT.len()].copy_from_slice(&DEFAULT_FONT);

        Self {
            bytes,
            pc: ProgramCounter(PROGRAM_START),
            index: IndexRegister(0x0),
            stack: Stack::new(),
        }
    }

    // instruction addresses only ever see the low 12 bits
    pub fn set(&mut self, addr: TypeAddr, val: u8) {
        self.bytes[(addr & ADDR_MASK) as usize] = val;
    }

    pub fn get(&self, addr: TypeAddr) -> u8 {
        self.bytes[(addr & ADDR_MASK) as usize]
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reads the big-endian word at the program counter without moving it.
    pub fn peek_instruction(&self) -> u16 {
        let addr = self.pc.0;
        let (l, r) = (self.get(addr), self.get(addr.wrapping_add(1)));
        ((l as u16) << 8) | r as u16
    }

    pub fn set_pc(&mut self, addr: TypeAddr) {
        self.pc.set_addr(addr);
    }

    pub fn set_index(&mut self, addr: TypeAddr) {
        self.index.set_addr(addr);
    }

    /// Copies a program image to [`PROGRAM_START`]. An image that does not fit
    /// is rejected whole and memory is left untouched.
    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<()> {
        let start_index = PROGRAM_START as usize;
        let capacity = MEMORY_SIZE - start_index;
        if bytes.len() > capacity {
            return Err(VmError::LoadOutOfRange {
                size: bytes.len(),
                capacity,
            });
        }

        self.bytes[start_index..start_index + bytes.len()].copy_from_slice(bytes);
        debug!(size = bytes.len(), entry = PROGRAM_START, "loaded program image");
        Ok(())
    }
}

/// Fixed-depth return address stack. `pointer` is the number of live entries.
#[derive(Debug)]
pub struct Stack {
    addresses: [TypeAddr; STACK_DEPTH],
    pointer: usize,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    pub fn new() -> Self {
        Self {
            addresses: [0; STACK_DEPTH],
            pointer: 0,
        }
    }

    /// `target` is only used to describe the failing call.
    pub fn push(&mut self, addr: TypeAddr, target: TypeAddr) -> Result<()> {
        if self.pointer == STACK_DEPTH {
            return Err(VmError::StackOverflow { address: target });
        }
        self.addresses[self.pointer] = addr;
        self.pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<TypeAddr> {
        if self.pointer == 0 {
            return Err(VmError::StackUnderflow);
        }
        self.pointer -= 1;
        Ok(self.addresses[self.pointer])
    }

    pub(crate) fn len(&self) -> usize {
        self.pointer
    }
}
