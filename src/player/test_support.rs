//! Builders for runtime tests: hand-made definitions, frames and action
//! byte streams, without going through the file parser.

use std::rc::Rc;

use crate::swf::{
    character::{Character, CharacterDictionary, Frame, SpriteDefinition},
    records::{DisplayCommand, PlaceObject, RemoveObject},
    shape::ShapeDefinition,
    types::Rect,
};

use super::{config::PlayerConfig, context::MovieContext, movie_clip::MovieClipNode};

pub fn shape(character_id: u16) -> Character {
    Character::Shape(Rc::new(ShapeDefinition {
        character_id,
        bounds: Rect::default(),
        fill_styles: vec![],
        line_styles: vec![],
        paths: vec![],
    }))
}

pub fn sprite(character_id: u16, frames: Vec<Frame>) -> Character {
    Character::Sprite(Rc::new(SpriteDefinition::new(
        character_id,
        24.0,
        frames,
        0,
    )))
}

pub fn context_with(characters: Vec<Character>) -> Rc<MovieContext> {
    let mut dictionary = CharacterDictionary::default();
    for character in characters {
        dictionary.define(character);
    }
    Rc::new(MovieContext::new(dictionary, PlayerConfig::default(), 6))
}

/// A root clip (character id 0) playing `frames` at 24 fps.
pub fn root_clip(frames: Vec<Frame>, characters: Vec<Character>) -> MovieClipNode {
    let definition = Rc::new(SpriteDefinition::new(0, 24.0, frames, 0));
    MovieClipNode::new(definition, context_with(characters))
}

pub fn frame(commands: Vec<DisplayCommand>) -> Frame {
    Frame {
        commands,
        ..Default::default()
    }
}

pub fn frame_with_actions(commands: Vec<DisplayCommand>, actions: Vec<Vec<u8>>) -> Frame {
    Frame {
        commands,
        actions: actions.into_iter().map(Rc::from).collect(),
        label: None,
    }
}

pub fn labeled(mut frame: Frame, label: &str) -> Frame {
    frame.label = Some(label.to_string());
    frame
}

pub fn place(depth: u16, character_id: u16) -> DisplayCommand {
    DisplayCommand::Place(PlaceObject {
        character_id: Some(character_id),
        depth,
        ..Default::default()
    })
}

pub fn place_named(depth: u16, character_id: u16, name: &str) -> DisplayCommand {
    DisplayCommand::Place(PlaceObject {
        character_id: Some(character_id),
        depth,
        name: Some(name.to_string()),
        ..Default::default()
    })
}

pub fn remove(depth: u16) -> DisplayCommand {
    DisplayCommand::Remove(RemoveObject {
        character_id: None,
        depth,
    })
}

/// Assembles action records.
#[derive(Default)]
pub struct ActionWriter {
    bytes: Vec<u8>,
}

impl ActionWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn op(mut self, code: u8) -> Self {
        self.bytes.push(code);
        self
    }

    pub fn op_with(mut self, code: u8, operands: &[u8]) -> Self {
        self.bytes.push(code);
        self.bytes
            .extend_from_slice(&(operands.len() as u16).to_le_bytes());
        self.bytes.extend_from_slice(operands);
        self
    }

    pub fn push_str(self, value: &str) -> Self {
        let mut operands = vec![0u8];
        operands.extend_from_slice(value.as_bytes());
        operands.push(0);
        self.op_with(0x96, &operands)
    }

    pub fn push_number(self, value: f64) -> Self {
        let bits = value.to_bits();
        let mut operands = vec![6u8];
        // Doubles are stored high word first.
        operands.extend_from_slice(&((bits >> 32) as u32).to_le_bytes());
        operands.extend_from_slice(&(bits as u32).to_le_bytes());
        self.op_with(0x96, &operands)
    }

    pub fn push_bool(self, value: bool) -> Self {
        self.op_with(0x96, &[5, value as u8])
    }

    pub fn jump(self, code: u8, offset: i16) -> Self {
        self.op_with(code, &offset.to_le_bytes())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn end(self) -> Vec<u8> {
        self.op(0x00).bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
