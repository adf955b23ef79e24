pub mod avm;
pub mod config;
pub mod context;
pub mod display_list;
pub mod display_object;
pub mod movie_clip;
pub mod render;

#[cfg(test)]
pub mod test_support;

use std::rc::Rc;

use itertools::Itertools;
use log::debug;

use crate::swf::{
    error::DecodeError,
    file::SwfFile,
    header::Header,
    types::{ColorTransform, Matrix, PixelRect, Rgba},
};

use self::{
    config::PlayerConfig, context::MovieContext, movie_clip::MovieClipNode, render::RenderBackend,
};

/// A loaded movie: its header, the shared context and the root clip.
#[derive(Debug)]
pub struct Player {
    header: Header,
    background_color: Rgba,
    file_attributes: Option<u32>,
    context: Rc<MovieContext>,
    root: MovieClipNode,
}

impl Player {
    pub fn load(bytes: &[u8], config: PlayerConfig) -> Result<Player, DecodeError> {
        let file = SwfFile::parse(bytes)?;
        Ok(Player::from_file(file, config))
    }

    pub fn from_file(file: SwfFile, config: PlayerConfig) -> Player {
        let context = Rc::new(MovieContext::new(
            file.dictionary,
            config,
            file.header.version,
        ));
        let root = MovieClipNode::new(file.timeline, context.clone());

        debug!(
            "Player ready: {} frames, root children [{}]",
            root.frame_count(),
            root.display_list()
                .iter()
                .map(|(depth, child)| format!("{}:{}", depth, child.character_id))
                .join(", ")
        );

        Player {
            header: file.header,
            background_color: file.background_color.unwrap_or(Rgba::rgb(255, 255, 255)),
            file_attributes: file.file_attributes,
            context,
            root,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn stage_rect(&self) -> PixelRect {
        self.header.frame_size.to_pixel()
    }

    pub fn background_color(&self) -> Rgba {
        self.background_color
    }

    pub fn file_attributes(&self) -> Option<u32> {
        self.file_attributes
    }

    pub fn context(&self) -> &Rc<MovieContext> {
        &self.context
    }

    pub fn root(&self) -> &MovieClipNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut MovieClipNode {
        &mut self.root
    }

    pub fn current_frame(&self) -> u16 {
        self.root.current_frame()
    }

    pub fn frame_count(&self) -> u16 {
        self.root.frame_count()
    }

    pub fn is_playing(&self) -> bool {
        self.root.is_playing()
    }

    /// Advances the whole tree by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.root.update(dt);
    }

    pub fn render(&self, backend: &mut dyn RenderBackend) {
        self.root
            .render(backend, &Matrix::IDENTITY, &ColorTransform::IDENTITY);
    }

    pub fn goto_and_play(&mut self, frame: u16) {
        self.root.goto_and_play(frame);
    }

    pub fn goto_and_stop(&mut self, frame: u16) {
        self.root.goto_and_stop(frame);
    }

    pub fn play(&mut self) {
        self.root.play();
    }

    pub fn stop(&mut self) {
        self.root.stop();
    }

    pub fn reset(&mut self) {
        self.root.reset();
    }

    pub fn set_trace_actions(&self, enabled: bool) {
        self.context.set_trace_actions(enabled);
    }
}
