use std::rc::Rc;

use log::debug;

use super::{
    bit_stream::BitStream,
    character::{Character, CharacterDictionary, Frame, SpriteDefinition},
    error::DecodeError,
    header::{Header, TagCode, TagHeader},
    records::{
        read_background_color, read_file_attributes, DisplayCommand, FrameLabel, PlaceObject,
        RemoveObject, SceneAndFrameLabelData,
    },
    shape::ShapeDefinition,
    types::Rgba,
};

/// A fully decoded movie: header, character dictionary and main timeline.
#[derive(Debug, Clone)]
pub struct SwfFile {
    pub header: Header,
    pub background_color: Option<Rgba>,
    pub file_attributes: Option<u32>,
    pub scene_data: Option<SceneAndFrameLabelData>,
    pub dictionary: CharacterDictionary,
    pub timeline: Rc<SpriteDefinition>,
}

impl SwfFile {
    pub fn parse(bytes: &[u8]) -> Result<SwfFile, DecodeError> {
        let mut stream = BitStream::new(bytes);
        let header = Header::read(&mut stream)?;

        let mut parser = FileParser {
            frame_rate: header.frame_rate,
            dictionary: CharacterDictionary::default(),
            background_color: None,
            file_attributes: None,
            scene_data: None,
        };
        let end = stream.len();
        let frames = parser.read_timeline(&mut stream, true, end)?;
        let timeline = SpriteDefinition::new(0, header.frame_rate, frames, header.frame_count);

        debug!(
            "Parsed movie: {} characters, {} frames",
            parser.dictionary.len(),
            timeline.frame_count()
        );

        Ok(SwfFile {
            header,
            background_color: parser.background_color,
            file_attributes: parser.file_attributes,
            scene_data: parser.scene_data,
            dictionary: parser.dictionary,
            timeline: Rc::new(timeline),
        })
    }
}

struct FileParser {
    frame_rate: f32,
    dictionary: CharacterDictionary,
    background_color: Option<Rgba>,
    file_attributes: Option<u32>,
    scene_data: Option<SceneAndFrameLabelData>,
}

impl FileParser {
    /// Reads tags until End, or until a tag boundary at or past `end`.
    /// Definition tags are only honored on the main timeline; inside a
    /// sprite they are skipped like any unknown tag.
    fn read_timeline(
        &mut self,
        stream: &mut BitStream,
        is_root: bool,
        end: usize,
    ) -> Result<Vec<Frame>, DecodeError> {
        let mut frames = Vec::new();
        let mut current = Frame::default();

        loop {
            if stream.position() >= end {
                debug!("Tag stream ended at {} without an End tag", end);
                break;
            }

            let tag = TagHeader::read(stream)?;
            match tag.code {
                Some(TagCode::End) => break,
                Some(TagCode::ShowFrame) => frames.push(std::mem::take(&mut current)),
                Some(TagCode::PlaceObject) => {
                    let place = PlaceObject::read(stream, tag.end_pos)?;
                    current.commands.push(DisplayCommand::Place(place));
                }
                Some(TagCode::PlaceObject2) => {
                    let place = PlaceObject::read_v2(stream)?;
                    current.commands.push(DisplayCommand::Place(place));
                }
                Some(TagCode::PlaceObject3) => {
                    let place = PlaceObject::read_v3(stream)?;
                    current.commands.push(DisplayCommand::Place(place));
                }
                Some(TagCode::RemoveObject) => {
                    let remove = RemoveObject::read(stream)?;
                    current.commands.push(DisplayCommand::Remove(remove));
                }
                Some(TagCode::RemoveObject2) => {
                    let remove = RemoveObject::read_v2(stream)?;
                    current.commands.push(DisplayCommand::Remove(remove));
                }
                Some(TagCode::DoAction) => {
                    let bytes = stream.read_bytes(tag.size as usize)?;
                    current.actions.push(Rc::from(bytes));
                }
                Some(TagCode::FrameLabel) => {
                    let label = FrameLabel::read(stream, tag.end_pos)?;
                    current.label = Some(label.name);
                }
                Some(TagCode::DefineShape) if is_root => self.define_shape(stream, 1)?,
                Some(TagCode::DefineShape2) if is_root => self.define_shape(stream, 2)?,
                Some(TagCode::DefineShape3) if is_root => self.define_shape(stream, 3)?,
                Some(TagCode::DefineSprite) if is_root => {
                    self.define_sprite(stream, tag.end_pos)?
                }
                Some(TagCode::SetBackgroundColor) if is_root => {
                    self.background_color = Some(read_background_color(stream)?);
                }
                Some(TagCode::FileAttributes) if is_root => {
                    self.file_attributes = Some(read_file_attributes(stream)?);
                }
                Some(TagCode::DefineSceneAndFrameLabelData) if is_root => {
                    self.scene_data = Some(SceneAndFrameLabelData::read(stream)?);
                }
                _ => {
                    debug!("Skipping tag {} ({} bytes)", tag.raw_code, tag.size);
                }
            }

            stream.set_position(tag.end_pos);
        }

        if !current.is_empty() {
            frames.push(current);
        }
        Ok(frames)
    }

    fn define_shape(&mut self, stream: &mut BitStream, shape_type: u8) -> Result<(), DecodeError> {
        let shape = ShapeDefinition::read(stream, shape_type)?;
        self.dictionary.define(Character::Shape(Rc::new(shape)));
        Ok(())
    }

    fn define_sprite(&mut self, stream: &mut BitStream, end: usize) -> Result<(), DecodeError> {
        let character_id = stream.read_u16()?;
        let frame_count = stream.read_u16()?;
        let frames = self.read_timeline(stream, false, end)?;
        let sprite = SpriteDefinition::new(character_id, self.frame_rate, frames, frame_count);

        debug!(
            "DefineSprite id={} frames={}",
            character_id,
            sprite.frame_count()
        );
        self.dictionary.define(Character::Sprite(Rc::new(sprite)));
        Ok(())
    }
}
