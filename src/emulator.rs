use tracing::trace;

use crate::{
    decode::OpCodes,
    display::FrameBuffer,
    error::Result,
    keyboard::Keypad,
    memory::{glyph_addr, Memory, TypeAddr},
    random::{RandomSource, ThreadRandom},
    registers::Registers,
    timer::Timer,
};

/// The whole machine. Every instruction runs against `&mut self`; the host
/// reads the frame buffer and writes the keypad between calls.
pub struct Emulator<R = ThreadRandom> {
    fb: FrameBuffer,
    regs: Registers,
    mem: Memory,
    keypad: Keypad,
    delay_timer: Timer,
    sound_timer: Timer,
    random: R,
}

impl Emulator<ThreadRandom> {
    pub fn with_thread_rng() -> Self {
        Self::new(ThreadRandom::new())
    }
}

impl<R: RandomSource> Emulator<R> {
    pub fn new(random: R) -> Self {
        Self {
            fb: FrameBuffer::new(),
            regs: Registers::new(),
            mem: Memory::new(),
            keypad: Keypad::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            random,
        }
    }

    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<()> {
        self.mem.load_rom(bytes)
    }

    /// Decodes the instruction at the program counter without consuming it.
    pub fn fetch_decode(&self) -> Result<OpCodes> {
        OpCodes::decode_raw(self.mem.peek_instruction())
    }

    /// One instruction followed by one timer tick.
    pub fn cycle(&mut self) -> Result<()> {
        self.step()?;
        self.tick_timers();
        Ok(())
    }

    /// One instruction, timers untouched. On error the machine is left as it
    /// was before the call.
    pub fn step(&mut self) -> Result<()> {
        let pc = self.mem.pc;
        let operation = self.fetch_decode()?;
        trace!(pc = pc.0, op = %operation, "execute");

        self.mem.pc.increment();
        if let Err(err) = self.execute_ins(operation) {
            self.mem.pc = pc;
            return Err(err);
        }
        Ok(())
    }

    pub fn tick_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
    }

    /// Runs an already decoded instruction. The program counter is expected to
    /// point past it.
    pub fn execute_ins(&mut self, ins: OpCodes) -> Result<()> {
        match ins {
            OpCodes::ClearScreen => {
                self.fb.clear_buffer();
            }
            OpCodes::PopSubroutine => {
                let addr = self.mem.stack.pop()?;
                self.mem.set_pc(addr);
            }
            OpCodes::Jump(addr) => {
                self.mem.set_pc(addr);
            }
            OpCodes::PushSubroutine(addr) => {
                // return address is the instruction after the call
                self.mem.stack.push(self.mem.pc.0, addr)?;
                self.mem.set_pc(addr);
            }
            OpCodes::SkipEqualConstant(vx, kk) => {
                self.skip_if(self.regs.get(vx) == kk);
            }
            OpCodes::SkipNotEqualConstant(vx, kk) => {
                self.skip_if(self.regs.get(vx) != kk);
            }
            OpCodes::SkipEqualRegister(vx, vy) => {
                self.skip_if(self.regs.get(vx) == self.regs.get(vy));
            }
            OpCodes::SkipNotEqualRegister(vx, vy) => {
                self.skip_if(self.regs.get(vx) != self.regs.get(vy));
            }
            OpCodes::SetRegister(vx, kk) => {
                self.regs.set_register(vx, kk);
            }
            OpCodes::AddToRegister(vx, kk) => {
                self.regs.add_to_register(vx, kk);
            }
            OpCodes::CopyRegister(vx, vy) => {
                self.regs.set_register(vx, self.regs.get(vy));
            }
            OpCodes::Or(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) | self.regs.get(vy));
            }
            OpCodes::And(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) & self.regs.get(vy));
            }
            OpCodes::XOr(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) ^ self.regs.get(vy));
            }
            // VF is written after VX in every flag-setting op so the flag
            // survives when X is F.
            OpCodes::Add(vx, vy) => {
                let (sum, carry) = self.regs.get(vx).overflowing_add(self.regs.get(vy));
                self.regs.set_register(vx, sum);
                self.regs.set_flag(carry);
            }
            OpCodes::SubtractForward(vx, vy) => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_register(vx, x.wrapping_sub(y));
                self.regs.set_flag(x > y); // no borrow
            }
            OpCodes::SubtractBackward(vx, vy) => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_register(vx, y.wrapping_sub(x));
                self.regs.set_flag(y > x); // no borrow
            }
            OpCodes::RightShift(vx) => {
                let vx_value = self.regs.get(vx);
                self.regs.set_register(vx, vx_value >> 1);
                self.regs.set_flag(vx_value & 1 == 1);
            }
            OpCodes::LeftShift(vx) => {
                let vx_value = self.regs.get(vx);
                self.regs.set_register(vx, vx_value << 1);
                self.regs.set_flag((vx_value >> 7) & 1 == 1);
            }
            OpCodes::SetIndexRegister(addr) => self.mem.set_index(addr),
            OpCodes::JumpWithOffset(addr) => {
                self.mem.set_pc(addr + self.regs.get(0) as TypeAddr);
            }
            OpCodes::Random(vx, kk) => {
                let ransuu = self.random.next_byte();
                self.regs.set_register(vx, ransuu & kk);
            }
            OpCodes::Draw(reg_x, reg_y, height) => {
                let (x, y) = (self.regs.get(reg_x), self.regs.get(reg_y));
                let index = self.mem.index.0;
                // one byte per row, 8 pixels wide
                let sprite: Vec<u8> = (0..height as TypeAddr)
                    .map(|row| self.mem.get(index.wrapping_add(row)))
                    .collect();

                let collided = self.fb.paint(x, y, &sprite);
                self.regs.set_flag(collided);
            }
            OpCodes::SkipIfPressed(vx) => {
                self.skip_if(self.keypad.is_pressed(self.regs.get(vx)));
            }
            OpCodes::SkipIfNotPressed(vx) => {
                self.skip_if(!self.keypad.is_pressed(self.regs.get(vx)));
            }
            OpCodes::CopyDelayToRegister(vx) => self.regs.set_register(vx, self.delay_timer.count),
            OpCodes::CopyRegisterToDelay(vx) => self.delay_timer.set(self.regs.get(vx)),
            OpCodes::CopyRegisterToSound(vx) => self.sound_timer.set(self.regs.get(vx)),
            OpCodes::GetKey(vx) => match self.keypad.first_pressed() {
                Some(key) => self.regs.set_register(vx, key),
                None => {
                    // nothing held: run this instruction again next cycle
                    trace!(pc = self.mem.pc.0, "waiting for key");
                    self.mem.pc.decrement();
                }
            },
            OpCodes::AddToIndex(vx) => {
                self.mem
                    .set_index(self.mem.index.0.wrapping_add(self.regs.get(vx) as TypeAddr));
            }
            OpCodes::PointChar(vx) => {
                self.mem.set_index(glyph_addr(self.regs.get(vx)));
            }
            OpCodes::ToDecimal(vx) => {
                let value = self.regs.get(vx);
                let index = self.mem.index.0;
                let digits = [value / 100, (value / 10) % 10, value % 10];
                for (i, digit) in digits.into_iter().enumerate() {
                    self.mem.set(index.wrapping_add(i as TypeAddr), digit);
                }
            }
            OpCodes::StoreRegisterToMemory(vx) => {
                let index = self.mem.index.0;
                for reg in 0..=vx {
                    self.mem
                        .set(index.wrapping_add(reg as TypeAddr), self.regs.get(reg));
                }
            }
            OpCodes::LoadRegisterFromMemory(vx) => {
                let index = self.mem.index.0;
                for reg in 0..=vx {
                    let reg_val = self.mem.get(index.wrapping_add(reg as TypeAddr));
                    self.regs.set_register(reg, reg_val);
                }
            }
        }
        Ok(())
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.mem.pc.increment();
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Whether CLS or DRW ran since the last call. Clears the flag.
    pub fn take_frame_dirty(&mut self) -> bool {
        self.fb.take_dirty()
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn memory(&self) -> &[u8] {
        self.mem.bytes()
    }

    pub fn program_counter(&self) -> TypeAddr {
        self.mem.pc.0
    }

    pub fn index(&self) -> TypeAddr {
        self.mem.index.0
    }

    pub fn stack_depth(&self) -> usize {
        self.mem.stack.len()
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer.count
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer.count
    }

    /// Whether the host should be beeping.
    pub fn sound_active(&self) -> bool {
        self.sound_timer.is_active()
    }
}
