use num_derive::{FromPrimitive, ToPrimitive};

use crate::swf::bit_stream::BitStream;

/// Action codes understood by the interpreter. Codes of 0x80 and above carry
/// a 16-bit operand length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u8)]
pub enum ActionCode {
    End = 0x00,
    NextFrame = 0x04,
    PrevFrame = 0x05,
    Play = 0x06,
    Stop = 0x07,
    ToggleQuality = 0x08,
    StopSounds = 0x09,
    Add = 0x0A,
    Subtract = 0x0B,
    Multiply = 0x0C,
    Divide = 0x0D,
    Equals = 0x0E,
    Less = 0x0F,
    And = 0x10,
    Or = 0x11,
    Not = 0x12,
    StringEquals = 0x13,
    StringLength = 0x14,
    StringExtract = 0x15,
    Pop = 0x17,
    ToInteger = 0x18,
    GetVariable = 0x1C,
    SetVariable = 0x1D,
    StringAdd = 0x21,
    StringLess = 0x29,
    MbStringLength = 0x31,
    CharToAscii = 0x32,
    AsciiToChar = 0x33,
    MbStringExtract = 0x35,
    MbCharToAscii = 0x36,
    MbAsciiToChar = 0x37,
    GotoFrame = 0x81,
    GetUrl = 0x83,
    WaitForFrame = 0x8A,
    SetTarget = 0x8B,
    GotoLabel = 0x8C,
    Push = 0x96,
    Jump = 0x99,
    If = 0x9D,
    Call = 0x9E,
}

impl ActionCode {
    pub fn has_operands(code: u8) -> bool {
        code >= 0x80
    }
}

/// One decoded instruction. `pc` is the offset of the opcode byte.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    pub code: u8,
    pub pc: usize,
    pub data: Vec<u8>,
}

impl ActionRecord {
    pub fn operands(&self) -> BitStream {
        BitStream::new(&self.data)
    }
}
