use std::fmt;

use crate::swf::error::DecodeError;

/// Aborts the action block being executed. The timeline driver logs it and
/// carries on with the next block.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptError {
    UnknownOpcode { code: u8, pc: usize },
    /// An instruction or its operands ran past the end of the block.
    Decode(DecodeError),
    StackUnderflow { code: u8 },
    Unsupported(String),
    BadJump { pc: usize, offset: i16 },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::UnknownOpcode { code, pc } => {
                write!(f, "unknown action 0x{:02X} at offset {}", code, pc)
            }
            ScriptError::Decode(err) => write!(f, "malformed action: {}", err),
            ScriptError::StackUnderflow { code } => {
                write!(f, "action 0x{:02X} popped an empty stack", code)
            }
            ScriptError::Unsupported(what) => write!(f, "unsupported: {}", what),
            ScriptError::BadJump { pc, offset } => {
                write!(f, "jump by {} from offset {} leaves the block", offset, pc)
            }
        }
    }
}

impl std::error::Error for ScriptError {}

impl From<DecodeError> for ScriptError {
    fn from(err: DecodeError) -> Self {
        ScriptError::Decode(err)
    }
}
