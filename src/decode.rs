use std::fmt;

use crate::error::{Result, VmError};
use crate::memory::TypeAddr;

/// A fetched 16-bit instruction word with accessors for its operand fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInstruction {
    code: u16,
}

impl RawInstruction {
    pub fn new(code: u16) -> Self {
        RawInstruction { code }
    }

    // n is starting digit (1-based, most significant first), m is length
    pub fn nth_m_digits(&self, n: u8, m: u8) -> u16 {
        // 0110 1100 1111 0001
        // -------------------
        // 1111 1111 1111 1111
        //      1111 1111 1111
        //           1111 1111
        //                1111
        let shift_places = (4 - m - (n - 1)) * 4;
        let mask: u16 = if m >= 4 { 0xFFFF } else { (1 << (m * 4)) - 1 };
        (self.code >> shift_places) & mask
    }

    pub fn family(&self) -> u8 {
        self.nth_m_digits(1, 1) as u8
    }

    pub fn x(&self) -> u8 {
        self.nth_m_digits(2, 1) as u8
    }

    pub fn y(&self) -> u8 {
        self.nth_m_digits(3, 1) as u8
    }

    pub fn n(&self) -> u8 {
        self.nth_m_digits(4, 1) as u8
    }

    pub fn kk(&self) -> u8 {
        self.nth_m_digits(3, 2) as u8
    }

    pub fn addr(&self) -> TypeAddr {
        self.nth_m_digits(2, 3)
    }
}

impl PartialEq<u16> for RawInstruction {
    fn eq(&self, ins: &u16) -> bool {
        ins.eq(&self.code)
    }
}

#[test]
fn test_bit_manip() {
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(2, 1), 0xC);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(3, 1), 0xE);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(1, 1), 0x4);

    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(1, 2), 0x4C);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(2, 2), 0xCE);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(2, 3), 0xCEE);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(1, 4), 0x4CEE);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCodes {
    // 00E0
    // turn all pixels to 0
    ClearScreen,
    // 00EE
    PopSubroutine,
    // 1NNN
    // set PC to address NNN, "jump" to memory location
    Jump(TypeAddr),
    // 2NNN
    PushSubroutine(TypeAddr),

    // 3XKK
    SkipEqualConstant(u8, u8),
    // 4XKK
    SkipNotEqualConstant(u8, u8),
    // 5XY0
    SkipEqualRegister(u8, u8),
    // 9XY0
    SkipNotEqualRegister(u8, u8),

    // 6XKK
    SetRegister(u8, u8),
    // 7XKK
    // add KK to VX, carry is dropped
    AddToRegister(u8, u8),

    // 8XY0
    CopyRegister(u8, u8),
    // 8XY1
    Or(u8, u8),
    // 8XY2
    And(u8, u8),
    // 8XY3
    XOr(u8, u8),
    // 8XY4
    Add(u8, u8),
    // 8XY5
    SubtractForward(u8, u8),
    // 8XY6
    RightShift(u8),
    // 8XY7
    SubtractBackward(u8, u8),
    // 8XYE
    LeftShift(u8),

    // ANNN
    SetIndexRegister(TypeAddr),
    // BNNN
    JumpWithOffset(TypeAddr),
    // CXKK
    Random(u8, u8),
    // DXYN (hardest)
    // draw an N pixel tall sprite starting at I
    // at coordinates (VX, VY)
    // XOR pixels on screen using sprite data
    // if pixels on screen were switched OFF: VF set to 1
    Draw(u8, u8, u8),

    // EX9E
    SkipIfPressed(u8),
    // EXA1
    SkipIfNotPressed(u8),

    // FX07
    CopyDelayToRegister(u8),
    // FX0A
    GetKey(u8),
    // FX15
    CopyRegisterToDelay(u8),
    // FX18
    CopyRegisterToSound(u8),
    // FX1E
    AddToIndex(u8),
    // FX29
    PointChar(u8),
    // FX33
    ToDecimal(u8),
    // FX55
    StoreRegisterToMemory(u8),
    // FX65
    LoadRegisterFromMemory(u8),
}

impl OpCodes {
    /// Decodes one instruction word. The leading nibble picks the family; the
    /// `0x0`, `0x8`, `0xE` and `0xF` families are resolved again on their low
    /// nibble or byte. Anything left over is an [`VmError::UnknownOpcode`].
    pub fn decode_raw(ins: u16) -> Result<Self> {
        let raw = RawInstruction::new(ins);
        let unknown = || VmError::UnknownOpcode { opcode: ins };
        let (x, y) = (raw.x(), raw.y());

        let op = match raw.family() {
            0x0 => match ins {
                0x00E0 => Self::ClearScreen,
                0x00EE => Self::PopSubroutine,
                _ => return Err(unknown()),
            },
            0x1 => Self::Jump(raw.addr()),
            0x2 => Self::PushSubroutine(raw.addr()),
            0x3 => Self::SkipEqualConstant(x, raw.kk()),
            0x4 => Self::SkipNotEqualConstant(x, raw.kk()),
            0x5 if raw.n() == 0 => Self::SkipEqualRegister(x, y),
            0x6 => Self::SetRegister(x, raw.kk()),
            0x7 => Self::AddToRegister(x, raw.kk()),
            0x8 => Self::decode_alu(raw).ok_or_else(unknown)?,
            0x9 if raw.n() == 0 => Self::SkipNotEqualRegister(x, y),
            0xA => Self::SetIndexRegister(raw.addr()),
            0xB => Self::JumpWithOffset(raw.addr()),
            0xC => Self::Random(x, raw.kk()),
            0xD => Self::Draw(x, y, raw.n()),
            0xE => match raw.kk() {
                0x9E => Self::SkipIfPressed(x),
                0xA1 => Self::SkipIfNotPressed(x),
                _ => return Err(unknown()),
            },
            0xF => Self::decode_misc(raw).ok_or_else(unknown)?,
            _ => return Err(unknown()),
        };
        Ok(op)
    }

    fn decode_alu(raw: RawInstruction) -> Option<Self> {
        let (x, y) = (raw.x(), raw.y());
        let op = match raw.n() {
            0x0 => Self::CopyRegister(x, y),
            0x1 => Self::Or(x, y),
            0x2 => Self::And(x, y),
            0x3 => Self::XOr(x, y),
            0x4 => Self::Add(x, y),
            0x5 => Self::SubtractForward(x, y),
            0x6 => Self::RightShift(x),
            0x7 => Self::SubtractBackward(x, y),
            0xE => Self::LeftShift(x),
            _ => return None,
        };
        Some(op)
    }

    fn decode_misc(raw: RawInstruction) -> Option<Self> {
        let x = raw.x();
        let op = match raw.kk() {
            0x07 => Self::CopyDelayToRegister(x),
            0x0A => Self::GetKey(x),
            0x15 => Self::CopyRegisterToDelay(x),
            0x18 => Self::CopyRegisterToSound(x),
            0x1E => Self::AddToIndex(x),
            0x29 => Self::PointChar(x),
            0x33 => Self::ToDecimal(x),
            0x55 => Self::StoreRegisterToMemory(x),
            0x65 => Self::LoadRegisterFromMemory(x),
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for OpCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ClearScreen => write!(f, "CLS"),
            Self::PopSubroutine => write!(f, "RET"),
            Self::Jump(addr) => write!(f, "JP {addr:#05X}"),
            Self::PushSubroutine(addr) => write!(f, "CALL {addr:#05X}"),
            Self::SkipEqualConstant(x, kk) => write!(f, "SE V{x:X}, {kk:#04X}"),
            Self::SkipNotEqualConstant(x, kk) => write!(f, "SNE V{x:X}, {kk:#04X}"),
            Self::SkipEqualRegister(x, y) => write!(f, "SE V{x:X}, V{y:X}"),
            Self::SkipNotEqualRegister(x, y) => write!(f, "SNE V{x:X}, V{y:X}"),
            Self::SetRegister(x, kk) => write!(f, "LD V{x:X}, {kk:#04X}"),
            Self::AddToRegister(x, kk) => write!(f, "ADD V{x:X}, {kk:#04X}"),
            Self::CopyRegister(x, y) => write!(f, "LD V{x:X}, V{y:X}"),
            Self::Or(x, y) => write!(f, "OR V{x:X}, V{y:X}"),
            Self::And(x, y) => write!(f, "AND V{x:X}, V{y:X}"),
            Self::XOr(x, y) => write!(f, "XOR V{x:X}, V{y:X}"),
            Self::Add(x, y) => write!(f, "ADD V{x:X}, V{y:X}"),
            Self::SubtractForward(x, y) => write!(f, "SUB V{x:X}, V{y:X}"),
            Self::RightShift(x) => write!(f, "SHR V{x:X}"),
            Self::SubtractBackward(x, y) => write!(f, "SUBN V{x:X}, V{y:X}"),
            Self::LeftShift(x) => write!(f, "SHL V{x:X}"),
            Self::SetIndexRegister(addr) => write!(f, "LD I, {addr:#05X}"),
            Self::JumpWithOffset(addr) => write!(f, "JP V0, {addr:#05X}"),
            Self::Random(x, kk) => write!(f, "RND V{x:X}, {kk:#04X}"),
            Self::Draw(x, y, n) => write!(f, "DRW V{x:X}, V{y:X}, {n}"),
            Self::SkipIfPressed(x) => write!(f, "SKP V{x:X}"),
            Self::SkipIfNotPressed(x) => write!(f, "SKNP V{x:X}"),
            Self::CopyDelayToRegister(x) => write!(f, "LD V{x:X}, DT"),
            Self::GetKey(x) => write!(f, "LD V{x:X}, K"),
            Self::CopyRegisterToDelay(x) => write!(f, "LD DT, V{x:X}"),
            Self::CopyRegisterToSound(x) => write!(f, "LD ST, V{x:X}"),
            Self::AddToIndex(x) => write!(f, "ADD I, V{x:X}"),
            Self::PointChar(x) => write!(f, "LD F, V{x:X}"),
            Self::ToDecimal(x) => write!(f, "LD B, V{x:X}"),
            Self::StoreRegisterToMemory(x) => write!(f, "LD [I], V{x:X}"),
            Self::LoadRegisterFromMemory(x) => write!(f, "LD V{x:X}, [I]"),
        }
    }
}
