// 16 8-bit data registers named V0 to VF
// I -> address register (12 bits)
//
// Stack of 16 return addresses
//
// Delay timer & Sound timer: count down to 0, one tick per cycle or at 60 Hz
// when the host drives them
//
// Display res: 64 width, 32 height
//
// 35 opcodes, each are 2 bytes (big-endian)
//      NNN: address
//      KK: 8-bit constant
//      N: 4-bit constant
//      X and Y: 4-bit register identifier

pub mod decode;
pub mod display;
pub mod emulator;
pub mod error;
pub mod keyboard;
pub mod memory;
pub mod random;
pub mod registers;
pub mod timer;

pub use emulator::Emulator;
pub use error::{Result, VmError};
