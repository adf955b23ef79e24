use std::rc::Rc;

use crate::swf::{
    character::Character,
    shape::ShapeDefinition,
    types::{ColorTransform, Matrix},
};

use super::{context::MovieContext, movie_clip::MovieClipNode, render::RenderBackend};

/// One live child in a display list. The transform fields are written by
/// place commands; `matrix` is already in pixels.
#[derive(Debug)]
pub struct DisplayObject {
    pub instance_id: u32,
    pub character_id: u16,
    pub matrix: Matrix,
    pub cxform: ColorTransform,
    pub name: Option<String>,
    pub ratio: u16,
    pub clip_depth: Option<u16>,
    pub kind: DisplayObjectKind,
}

#[derive(Debug)]
pub enum DisplayObjectKind {
    Shape(Rc<ShapeDefinition>),
    MovieClip(Box<MovieClipNode>),
}

impl DisplayObject {
    /// Creates an instance of `character_id`, or `None` when the dictionary
    /// has no such character or the sprite would end up inside itself.
    pub fn instantiate(context: &Rc<MovieContext>, character_id: u16) -> Option<DisplayObject> {
        let kind = match context.character(character_id)? {
            Character::Shape(shape) => DisplayObjectKind::Shape(shape.clone()),
            Character::Sprite(sprite) => {
                if !context.begin_instantiation(character_id) {
                    return None;
                }
                let clip = MovieClipNode::new(sprite.clone(), context.clone());
                context.end_instantiation();
                DisplayObjectKind::MovieClip(Box::new(clip))
            }
        };

        Some(DisplayObject {
            instance_id: context.alloc_instance_id(),
            character_id,
            matrix: Matrix::IDENTITY,
            cxform: ColorTransform::IDENTITY,
            name: None,
            ratio: 0,
            clip_depth: None,
            kind,
        })
    }

    pub fn as_movie_clip(&self) -> Option<&MovieClipNode> {
        match &self.kind {
            DisplayObjectKind::MovieClip(clip) => Some(clip),
            DisplayObjectKind::Shape(_) => None,
        }
    }

    pub fn as_movie_clip_mut(&mut self) -> Option<&mut MovieClipNode> {
        match &mut self.kind {
            DisplayObjectKind::MovieClip(clip) => Some(clip),
            DisplayObjectKind::Shape(_) => None,
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    pub fn update(&mut self, dt: f32) {
        if let DisplayObjectKind::MovieClip(clip) = &mut self.kind {
            clip.update(dt);
        }
    }

    pub fn render(
        &self,
        backend: &mut dyn RenderBackend,
        matrix: &Matrix,
        cxform: &ColorTransform,
    ) {
        let matrix = *matrix * self.matrix;
        let cxform = *cxform * self.cxform;
        match &self.kind {
            DisplayObjectKind::Shape(shape) => backend.draw_shape(shape, &matrix, &cxform),
            DisplayObjectKind::MovieClip(clip) => clip.render(backend, &matrix, &cxform),
        }
    }
}
