use std::rc::Rc;

use fxhash::FxHashMap;
use log::{debug, error, warn};

use crate::swf::{
    character::SpriteDefinition,
    records::{DisplayCommand, PlaceObject},
    types::{ColorTransform, Matrix},
};

use super::{
    avm::{ScriptEnvironment, ScriptError, Value},
    context::MovieContext,
    display_list::DisplayList,
    render::RenderBackend,
};

const MAX_CALL_DEPTH: u32 = 32;

/// A live instance of a timeline definition: the main movie or a sprite.
#[derive(Debug)]
pub struct MovieClipNode {
    definition: Rc<SpriteDefinition>,
    context: Rc<MovieContext>,
    display_list: DisplayList,
    /// 1-based; 0 until the first frame has been stepped to.
    current_frame: u16,
    frame_timer: f32,
    frame_delta: f32,
    paused: bool,
    variables: FxHashMap<String, Value>,
}

impl MovieClipNode {
    /// New instances start playing at frame 1, so frame 1 commands and
    /// actions have already run when this returns.
    pub fn new(definition: Rc<SpriteDefinition>, context: Rc<MovieContext>) -> MovieClipNode {
        let frame_rate = context.config().frame_rate_or_default(definition.frame_rate);
        let mut clip = MovieClipNode {
            definition,
            context,
            display_list: DisplayList::new(),
            current_frame: 0,
            frame_timer: 0.0,
            frame_delta: 1.0 / frame_rate,
            paused: false,
            variables: FxHashMap::default(),
        };
        clip.goto_and_play(1);
        clip
    }

    pub fn character_id(&self) -> u16 {
        self.definition.character_id
    }

    pub fn definition(&self) -> &Rc<SpriteDefinition> {
        &self.definition
    }

    pub fn context(&self) -> &Rc<MovieContext> {
        &self.context
    }

    pub fn current_frame(&self) -> u16 {
        self.current_frame
    }

    pub fn frame_count(&self) -> u16 {
        self.definition.frame_count()
    }

    pub fn is_playing(&self) -> bool {
        !self.paused
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.display_list
    }

    pub fn display_list_mut(&mut self) -> &mut DisplayList {
        &mut self.display_list
    }

    pub fn get_variable(&self, name: &str) -> Value {
        self.variables.get(name).cloned().unwrap_or(Value::Undefined)
    }

    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    /// Replays frames forward until `target` (clamped to at least 1) or the
    /// last frame is reached. A backward target parks every child and
    /// replays from the start so unchanged children keep their state.
    ///
    /// A goto issued by a replayed frame's actions takes precedence over
    /// `target`: replay stops at whatever frame that goto reached.
    pub fn step_to_frame(&mut self, target: u16) {
        let target = target.max(1);
        if target == self.current_frame {
            return;
        }

        if target < self.current_frame {
            self.display_list.deprecate_all();
            self.current_frame = 0;
        }

        let definition = self.definition.clone();
        while self.current_frame < target && self.current_frame < definition.frame_count() {
            self.current_frame += 1;
            let frame_number = self.current_frame;
            let frame = match definition.frame(frame_number) {
                Some(frame) => frame,
                None => break,
            };

            for command in &frame.commands {
                self.run_command(command);
            }
            for actions in &frame.actions {
                if let Err(err) = self.execute_actions(actions, 0) {
                    error!(
                        "Actions of frame {} in clip {} aborted: {}",
                        frame_number,
                        self.character_id(),
                        err
                    );
                }
            }

            // A goto issued by the frame's actions has already replayed
            // the timeline to its own target.
            if self.current_frame != frame_number {
                break;
            }
        }

        self.display_list.clear_deprecated();
    }

    /// Advances by every whole frame interval the timer has passed, wrapping
    /// after the last frame. Non-finite or negative `dt` is ignored.
    pub fn update(&mut self, dt: f32) {
        if !self.paused && dt.is_finite() && dt >= 0.0 {
            self.frame_timer += dt;
            if self.frame_timer > self.frame_delta {
                // Intervals are consumed while the timer strictly exceeds one.
                let steps = ((self.frame_timer / self.frame_delta).ceil() - 1.0).max(1.0);
                self.frame_timer = (self.frame_timer - steps * self.frame_delta)
                    .max(0.0)
                    .min(self.frame_delta);
                let frame = advance_frame(self.current_frame, steps as u64, self.frame_count());
                self.step_to_frame(frame);
            }
        }

        // Children advance even while this clip is stopped.
        for (_, child) in self.display_list.iter_mut() {
            child.update(dt);
        }
    }

    pub fn goto_and_play(&mut self, frame: u16) {
        self.paused = false;
        self.step_to_frame(frame);
        self.update(0.0);
    }

    pub fn goto_and_stop(&mut self, frame: u16) {
        self.paused = true;
        self.step_to_frame(frame);
        self.update(0.0);
    }

    /// Seeks without touching the play state.
    pub fn goto_frame(&mut self, frame: u16) {
        self.step_to_frame(frame);
        self.update(0.0);
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.step_to_frame(1);
        self.update(0.0);
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    pub fn stop(&mut self) {
        self.paused = true;
    }

    pub fn next_frame(&mut self) {
        if self.current_frame < self.frame_count() {
            self.goto_and_stop(self.current_frame + 1);
        } else {
            self.stop();
        }
    }

    pub fn prev_frame(&mut self) {
        if self.current_frame > 1 {
            self.goto_and_stop(self.current_frame - 1);
        } else {
            self.stop();
        }
    }

    /// Returns false when the label is not defined on this timeline.
    pub fn goto_label(&mut self, label: &str) -> bool {
        match self.definition.frame_for_label(label) {
            Some(frame) => {
                self.goto_frame(frame);
                true
            }
            None => {
                debug!(
                    "Clip {} has no frame labeled {:?}",
                    self.character_id(),
                    label
                );
                false
            }
        }
    }

    /// Runs the action blocks of `frame` against this clip without moving
    /// the playhead.
    pub fn call_frame(&mut self, frame: u16, call_depth: u32) -> Result<(), ScriptError> {
        if call_depth >= MAX_CALL_DEPTH {
            return Err(ScriptError::Unsupported(format!(
                "Call nested deeper than {} frames",
                MAX_CALL_DEPTH
            )));
        }

        let definition = self.definition.clone();
        let frame = match definition.frame(frame) {
            Some(frame) => frame,
            None => {
                debug!("Call to missing frame {} ignored", frame);
                return Ok(());
            }
        };
        for actions in &frame.actions {
            self.execute_actions(actions, call_depth + 1)?;
        }
        Ok(())
    }

    pub fn execute_actions(&mut self, bytes: &[u8], call_depth: u32) -> Result<(), ScriptError> {
        let context = self.context.clone();
        let mut env = ScriptEnvironment::new(bytes, self).with_call_depth(call_depth);
        context.interpreter().run(&mut env)
    }

    pub fn render(&self, backend: &mut dyn RenderBackend, matrix: &Matrix, cxform: &ColorTransform) {
        for (_, child) in self.display_list.iter() {
            child.render(backend, matrix, cxform);
        }
    }

    fn run_command(&mut self, command: &DisplayCommand) {
        match command {
            DisplayCommand::Place(place) => self.place_object(place),
            DisplayCommand::Remove(remove) => {
                self.display_list.erase(remove.depth);
            }
        }
    }

    fn place_object(&mut self, place: &PlaceObject) {
        let object = match place.character_id {
            Some(character_id) => {
                let object = self.display_list.set(place.depth, character_id, &self.context);
                if object.is_none() {
                    warn!(
                        "Character {} could not be placed at depth {}",
                        character_id, place.depth
                    );
                }
                object
            }
            None => self.display_list.get(place.depth),
        };
        let object = match object {
            Some(object) => object,
            None => return,
        };

        if let Some(matrix) = &place.matrix {
            object.matrix = matrix.to_pixel();
        }
        if let Some(cxform) = place.cxform {
            object.cxform = cxform;
        }
        if let Some(ratio) = place.ratio {
            object.ratio = ratio;
        }
        if let Some(name) = &place.name {
            object.name = Some(name.clone());
        }
        if let Some(clip_depth) = place.clip_depth {
            object.clip_depth = Some(clip_depth);
        }
    }
}

/// Frame reached after `steps` advances from `frame`, wrapping from
/// `frame_count` back to 1. Frame 0 advances to 1.
fn advance_frame(frame: u16, steps: u64, frame_count: u16) -> u16 {
    let count = frame_count.max(1) as u64;
    let frame = (frame as u64).min(count);
    ((frame + steps % count + count - 1) % count + 1) as u16
}
