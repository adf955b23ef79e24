use std::fmt;

/// Fatal format errors. Any of these aborts the whole parse; only tag
/// boundaries are trusted for resynchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    OutOfRange { pos: usize, wanted: usize, len: usize },
    BadSignature([u8; 3]),
    Compressed,
    UnsupportedFillStyle(u8),
    IllegalNewStyles { shape_type: u8 },
    InvalidBitCount(u32),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::OutOfRange { pos, wanted, len } => write!(
                f,
                "read of {} bytes at {} exceeds buffer of {} bytes",
                wanted, pos, len
            ),
            DecodeError::BadSignature(sig) => write!(
                f,
                "invalid signature {:?}",
                String::from_utf8_lossy(sig)
            ),
            DecodeError::Compressed => write!(f, "compressed movies are not supported"),
            DecodeError::UnsupportedFillStyle(kind) => {
                write!(f, "fill style 0x{:02X} is not supported", kind)
            }
            DecodeError::IllegalNewStyles { shape_type } => write!(
                f,
                "new styles record in shape type {} (requires type 2 or later)",
                shape_type
            ),
            DecodeError::InvalidBitCount(count) => write!(f, "invalid bit field width {}", count),
        }
    }
}

impl std::error::Error for DecodeError {}
