use thiserror::Error;

/// Failures the core reports to its host. None of these are recoverable from
/// inside the machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    #[error("unknown opcode: {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("stack overflow: call to {address:#05X} with 16 return addresses already pushed")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("program image is {size} bytes, only {capacity} bytes fit above the entry address")]
    LoadOutOfRange { size: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, VmError>;
