use crate::memory::TypeAddr;

pub const FLAG_REGISTER: u8 = 0xF;

/// V0 to VF. VF doubles as the carry/borrow/collision flag.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Registers {
    registers: [u8; 16],
}

impl Registers {
    pub fn new() -> Self {
        Self { registers: [0; 16] }
    }

    // register operands come from a single nibble
    pub fn set_register(&mut self, reg_num: u8, value: u8) {
        self.registers[(reg_num & 0xF) as usize] = value;
    }

    pub fn add_to_register(&mut self, reg_num: u8, value: u8) {
        let total = self.get(reg_num).wrapping_add(value);
        self.set_register(reg_num, total);
    }

    pub fn set_flag(&mut self, on: bool) {
        self.set_register(FLAG_REGISTER, on as u8);
    }

    pub fn get(&self, reg_num: u8) -> u8 {
        self.registers[(reg_num & 0xF) as usize]
    }
}

// Special registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramCounter(pub TypeAddr);

impl ProgramCounter {
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(2);
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.wrapping_sub(2);
    }

    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRegister(pub TypeAddr);

impl IndexRegister {
    pub fn set_addr(&mut self, addr: TypeAddr) {
        self.0 = addr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_wraps_without_flag() {
        let mut regs = Registers::new();
        regs.set_register(0x3, 0xFF);
        regs.set_register(FLAG_REGISTER, 0x7);
        regs.add_to_register(0x3, 0x02);
        assert_eq!(regs.get(0x3), 0x01);
        assert_eq!(regs.get(FLAG_REGISTER), 0x7);
    }

    #[test]
    fn flag_is_zero_or_one() {
        let mut regs = Registers::new();
        regs.set_flag(true);
        assert_eq!(regs.get(0xF), 1);
        regs.set_flag(false);
        assert_eq!(regs.get(0xF), 0);
    }

    #[test]
    fn program_counter_steps_by_two() {
        let mut pc = ProgramCounter(0x200);
        pc.increment();
        assert_eq!(pc.0, 0x202);
        pc.decrement();
        pc.decrement();
        assert_eq!(pc.0, 0x1FE);
    }
}
