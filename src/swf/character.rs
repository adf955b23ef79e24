use std::rc::Rc;

use fxhash::FxHashMap;
use log::warn;
use nohash_hasher::IntMap;

use super::{records::DisplayCommand, shape::ShapeDefinition};

/// Display list commands and action blocks of one frame. Commands always run
/// before actions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub commands: Vec<DisplayCommand>,
    pub actions: Vec<Rc<[u8]>>,
    pub label: Option<String>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.actions.is_empty() && self.label.is_none()
    }
}

/// A timeline definition: the main movie (character id 0) or a DefineSprite.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDefinition {
    pub character_id: u16,
    pub frame_rate: f32,
    frames: Vec<Frame>,
    labels: FxHashMap<String, u16>,
}

impl SpriteDefinition {
    /// Frames shorter than `declared_frames` are padded with empty frames, so
    /// the definition always has at least one frame. Frames past `u16::MAX`
    /// are dropped.
    pub fn new(
        character_id: u16,
        frame_rate: f32,
        mut frames: Vec<Frame>,
        declared_frames: u16,
    ) -> SpriteDefinition {
        if frames.len() > u16::MAX as usize {
            warn!(
                "Sprite {} has {} frames, keeping the first {}",
                character_id,
                frames.len(),
                u16::MAX
            );
            frames.truncate(u16::MAX as usize);
        }

        let frame_count = (declared_frames.max(1) as usize).max(frames.len());
        frames.resize_with(frame_count, Frame::default);

        let mut labels = FxHashMap::default();
        for (index, frame) in frames.iter().enumerate() {
            if let Some(label) = &frame.label {
                labels.entry(label.clone()).or_insert(index as u16 + 1);
            }
        }

        SpriteDefinition {
            character_id,
            frame_rate,
            frames,
            labels,
        }
    }

    pub fn frame_count(&self) -> u16 {
        self.frames.len() as u16
    }

    /// 1-based frame lookup.
    pub fn frame(&self, frame: u16) -> Option<&Frame> {
        (frame as usize)
            .checked_sub(1)
            .and_then(|index| self.frames.get(index))
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_for_label(&self, label: &str) -> Option<u16> {
        self.labels.get(label).copied()
    }
}

#[derive(Debug, Clone)]
pub enum Character {
    Shape(Rc<ShapeDefinition>),
    Sprite(Rc<SpriteDefinition>),
}

impl Character {
    pub fn character_id(&self) -> u16 {
        match self {
            Character::Shape(shape) => shape.character_id,
            Character::Sprite(sprite) => sprite.character_id,
        }
    }
}

/// Definitions keyed by character id. Read-only once parsing is done.
#[derive(Debug, Clone, Default)]
pub struct CharacterDictionary {
    characters: IntMap<u16, Character>,
}

impl CharacterDictionary {
    pub fn define(&mut self, character: Character) {
        let id = character.character_id();
        if self.characters.insert(id, character).is_some() {
            warn!("Character {} defined twice, keeping the latest definition", id);
        }
    }

    pub fn get(&self, character_id: u16) -> Option<&Character> {
        self.characters.get(&character_id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
