use log::debug;
use num::FromPrimitive;
use num_derive::{FromPrimitive, ToPrimitive};

use super::{bit_stream::BitStream, error::DecodeError, types::Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u16)]
pub enum TagCode {
    End = 0,
    ShowFrame = 1,
    DefineShape = 2,
    PlaceObject = 4,
    RemoveObject = 5,
    SetBackgroundColor = 9,
    DoAction = 12,
    DefineShape2 = 22,
    PlaceObject2 = 26,
    RemoveObject2 = 28,
    DefineShape3 = 32,
    DefineSprite = 39,
    FrameLabel = 43,
    FileAttributes = 69,
    PlaceObject3 = 70,
    DefineSceneAndFrameLabelData = 86,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub compressed: bool,
    pub version: u8,
    pub file_size: u32,
    pub frame_size: Rect,
    pub frame_rate: f32,
    pub frame_count: u16,
}

impl Header {
    pub fn read(stream: &mut BitStream) -> Result<Header, DecodeError> {
        let signature = [stream.read_u8()?, stream.read_u8()?, stream.read_u8()?];
        let compressed = match signature[0] {
            b'F' => false,
            b'C' => true,
            _ => return Err(DecodeError::BadSignature(signature)),
        };
        if signature[1] != b'W' || signature[2] != b'S' {
            return Err(DecodeError::BadSignature(signature));
        }
        if compressed {
            return Err(DecodeError::Compressed);
        }

        let version = stream.read_u8()?;
        let file_size = stream.read_u32()?;
        let frame_size = stream.read_rect()?;
        let frame_rate = stream.read_fixed8()?;
        // Some movies declare 0 frames; they play as if they had one.
        let frame_count = stream.read_u16()?.max(1);

        debug!(
            "SWF header: version={} size={} frames={} rate={}",
            version, file_size, frame_count, frame_rate
        );

        Ok(Header {
            compressed,
            version,
            file_size,
            frame_size,
            frame_rate,
            frame_count,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub raw_code: u16,
    pub code: Option<TagCode>,
    pub size: u32,
    /// Position right after the tag body. Parsing always resumes here no
    /// matter how much of the body was consumed.
    pub end_pos: usize,
}

impl TagHeader {
    pub fn read(stream: &mut BitStream) -> Result<TagHeader, DecodeError> {
        let word = stream.read_u16()?;
        let raw_code = word >> 6;
        let mut size = (word & 0x3F) as u32;

        // Tags of 63 bytes or longer store their size in a following u32.
        if size == 0x3F {
            size = stream.read_u32()?;
        }

        let pos = stream.position();
        let end_pos = pos
            .checked_add(size as usize)
            .filter(|end| *end <= stream.len())
            .ok_or(DecodeError::OutOfRange {
                pos,
                wanted: size as usize,
                len: stream.len(),
            })?;

        Ok(TagHeader {
            raw_code,
            code: TagCode::from_u16(raw_code),
            size,
            end_pos,
        })
    }
}
