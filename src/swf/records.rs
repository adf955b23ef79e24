use super::{
    bit_stream::BitStream,
    error::DecodeError,
    types::{ColorTransform, Matrix, Rgba},
};

const PLACE_HAS_MOVE: u8 = 0x01;
const PLACE_HAS_CHARACTER: u8 = 0x02;
const PLACE_HAS_MATRIX: u8 = 0x04;
const PLACE_HAS_CXFORM: u8 = 0x08;
const PLACE_HAS_RATIO: u8 = 0x10;
const PLACE_HAS_NAME: u8 = 0x20;
const PLACE_HAS_CLIP_DEPTH: u8 = 0x40;

const PLACE3_HAS_CLASS_NAME: u8 = 0x08;
const PLACE3_HAS_IMAGE: u8 = 0x10;

/// One entry of a frame's display list program, replayed in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    Place(PlaceObject),
    Remove(RemoveObject),
}

impl DisplayCommand {
    pub fn depth(&self) -> u16 {
        match self {
            DisplayCommand::Place(place) => place.depth,
            DisplayCommand::Remove(remove) => remove.depth,
        }
    }
}

/// PlaceObject / PlaceObject2 / PlaceObject3. Matrix translation is in twips.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceObject {
    pub is_move: bool,
    pub character_id: Option<u16>,
    pub depth: u16,
    pub matrix: Option<Matrix>,
    pub cxform: Option<ColorTransform>,
    pub ratio: Option<u16>,
    pub name: Option<String>,
    pub clip_depth: Option<u16>,
    pub class_name: Option<String>,
}

impl PlaceObject {
    /// Original PlaceObject: the color transform is only present when the tag
    /// has bytes left after the matrix.
    pub fn read(stream: &mut BitStream, tag_end: usize) -> Result<PlaceObject, DecodeError> {
        let character_id = stream.read_u16()?;
        let depth = stream.read_u16()?;
        let matrix = stream.read_matrix()?;
        let cxform = if stream.position() < tag_end {
            Some(stream.read_cxform_rgb()?)
        } else {
            None
        };

        Ok(PlaceObject {
            is_move: false,
            character_id: Some(character_id),
            depth,
            matrix: Some(matrix),
            cxform,
            ..Default::default()
        })
    }

    pub fn read_v2(stream: &mut BitStream) -> Result<PlaceObject, DecodeError> {
        let mask = stream.read_u8()?;
        let depth = stream.read_u16()?;
        Self::read_fields(stream, mask, depth, None)
    }

    pub fn read_v3(stream: &mut BitStream) -> Result<PlaceObject, DecodeError> {
        let mask = stream.read_u8()?;
        let mask3 = stream.read_u8()?;
        let depth = stream.read_u16()?;

        let has_class_name = mask3 & PLACE3_HAS_CLASS_NAME != 0
            || (mask3 & PLACE3_HAS_IMAGE != 0 && mask & PLACE_HAS_CHARACTER != 0);
        let class_name = if has_class_name {
            Some(stream.read_string()?)
        } else {
            None
        };

        // Filters, blend mode, bitmap caching and clip actions follow; the
        // tag's end position skips them.
        Self::read_fields(stream, mask, depth, class_name)
    }

    fn read_fields(
        stream: &mut BitStream,
        mask: u8,
        depth: u16,
        class_name: Option<String>,
    ) -> Result<PlaceObject, DecodeError> {
        let character_id = if mask & PLACE_HAS_CHARACTER != 0 {
            Some(stream.read_u16()?)
        } else {
            None
        };
        let matrix = if mask & PLACE_HAS_MATRIX != 0 {
            Some(stream.read_matrix()?)
        } else {
            None
        };
        let cxform = if mask & PLACE_HAS_CXFORM != 0 {
            Some(stream.read_cxform_rgba()?)
        } else {
            None
        };
        let ratio = if mask & PLACE_HAS_RATIO != 0 {
            Some(stream.read_u16()?)
        } else {
            None
        };
        let name = if mask & PLACE_HAS_NAME != 0 {
            Some(stream.read_string()?)
        } else {
            None
        };
        let clip_depth = if mask & PLACE_HAS_CLIP_DEPTH != 0 {
            Some(stream.read_u16()?)
        } else {
            None
        };

        Ok(PlaceObject {
            is_move: mask & PLACE_HAS_MOVE != 0,
            character_id,
            depth,
            matrix,
            cxform,
            ratio,
            name,
            clip_depth,
            class_name,
        })
    }
}

/// RemoveObject carries the character id of the removed instance,
/// RemoveObject2 only the depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveObject {
    pub character_id: Option<u16>,
    pub depth: u16,
}

impl RemoveObject {
    pub fn read(stream: &mut BitStream) -> Result<RemoveObject, DecodeError> {
        let character_id = stream.read_u16()?;
        let depth = stream.read_u16()?;
        Ok(RemoveObject {
            character_id: Some(character_id),
            depth,
        })
    }

    pub fn read_v2(stream: &mut BitStream) -> Result<RemoveObject, DecodeError> {
        Ok(RemoveObject {
            character_id: None,
            depth: stream.read_u16()?,
        })
    }
}

pub fn read_background_color(stream: &mut BitStream) -> Result<Rgba, DecodeError> {
    stream.read_rgb()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLabel {
    pub name: String,
    pub named_anchor: bool,
}

impl FrameLabel {
    pub fn read(stream: &mut BitStream, tag_end: usize) -> Result<FrameLabel, DecodeError> {
        let name = stream.read_string()?;
        let named_anchor = stream.position() < tag_end && stream.read_u8()? != 0;
        Ok(FrameLabel { name, named_anchor })
    }
}

pub fn read_file_attributes(stream: &mut BitStream) -> Result<u32, DecodeError> {
    stream.read_u32()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneLabel {
    pub frame_offset: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SceneAndFrameLabelData {
    pub scenes: Vec<SceneLabel>,
    pub frame_labels: Vec<SceneLabel>,
}

impl SceneAndFrameLabelData {
    pub fn read(stream: &mut BitStream) -> Result<SceneAndFrameLabelData, DecodeError> {
        let mut data = SceneAndFrameLabelData::default();

        let scene_count = stream.read_encoded_u32()?;
        for _ in 0..scene_count {
            let frame_offset = stream.read_encoded_u32()?;
            let name = stream.read_string()?;
            data.scenes.push(SceneLabel { frame_offset, name });
        }

        let label_count = stream.read_encoded_u32()?;
        for _ in 0..label_count {
            let frame_offset = stream.read_encoded_u32()?;
            let name = stream.read_string()?;
            data.frame_labels.push(SceneLabel { frame_offset, name });
        }

        Ok(data)
    }
}
