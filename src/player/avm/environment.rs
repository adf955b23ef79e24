use log::debug;

use crate::{player::movie_clip::MovieClipNode, swf::bit_stream::BitStream};

use super::{error::ScriptError, value::Value};

/// Execution state of one action block: the instruction stream (its
/// position is the program counter), the value stack and the clip the block
/// belongs to. The clip is borrowed for the duration of the block.
pub struct ScriptEnvironment<'a> {
    stream: BitStream,
    stack: Vec<Value>,
    base: &'a mut MovieClipNode,
    /// Set by SetTarget; `None` means the block's own clip.
    target_path: Option<String>,
    version: u8,
    trace: bool,
    call_depth: u32,
    current_code: u8,
}

impl<'a> ScriptEnvironment<'a> {
    pub fn new(bytes: &[u8], target: &'a mut MovieClipNode) -> ScriptEnvironment<'a> {
        let version = target.context().version();
        let trace = target.context().trace_actions();
        ScriptEnvironment {
            stream: BitStream::new(bytes),
            stack: Vec::new(),
            base: target,
            target_path: None,
            version,
            trace,
            call_depth: 0,
            current_code: 0,
        }
    }

    pub fn with_call_depth(mut self, call_depth: u32) -> Self {
        self.call_depth = call_depth;
        self
    }

    pub fn pc(&self) -> usize {
        self.stream.position()
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn trace(&self) -> bool {
        self.trace
    }

    pub fn call_depth(&self) -> u32 {
        self.call_depth
    }

    pub fn is_exhausted(&self) -> bool {
        self.stream.is_eof()
    }

    pub(super) fn stream_mut(&mut self) -> &mut BitStream {
        &mut self.stream
    }

    pub(super) fn set_current_code(&mut self, code: u8) {
        self.current_code = code;
    }

    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    pub fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    pub fn pop(&mut self) -> Result<Value, ScriptError> {
        self.stack.pop().ok_or(ScriptError::StackUnderflow {
            code: self.current_code,
        })
    }

    /// Moves the program counter by `offset` bytes from the end of the
    /// current instruction. Landing exactly on the end of the block is
    /// allowed and halts execution.
    pub fn jump(&mut self, offset: i16) -> Result<(), ScriptError> {
        let pc = self.stream.position();
        let destination = pc as i64 + offset as i64;
        if destination < 0 || destination > self.stream.len() as i64 {
            return Err(ScriptError::BadJump { pc, offset });
        }
        self.stream.set_position(destination as usize);
        Ok(())
    }

    /// Clip that frame actions apply to, or `None` when SetTarget named a
    /// path that does not resolve.
    pub fn target(&mut self) -> Option<&mut MovieClipNode> {
        match &self.target_path {
            None => Some(&mut *self.base),
            Some(path) => resolve_path(&mut *self.base, path),
        }
    }

    /// An empty path restores the block's own clip.
    pub fn set_target(&mut self, path: &str) {
        if path.is_empty() {
            self.target_path = None;
            return;
        }

        self.target_path = Some(path.to_string());
        if self.target().is_none() {
            debug!("SetTarget: {:?} does not resolve", path);
        }
    }

    /// Splits `clip/path:name` into the owning clip and the variable name.
    /// Names without a path belong to the current target.
    pub fn variable_owner<'n>(
        &mut self,
        name: &'n str,
    ) -> Option<(&mut MovieClipNode, &'n str)> {
        match name.rsplit_once(':') {
            Some((path, variable)) => {
                let target = self.target()?;
                Some((resolve_path(target, path)?, variable))
            }
            None => Some((self.target()?, name)),
        }
    }
}

/// Walks slash-separated instance names down from `node`. There is no
/// parent link, so absolute paths are taken relative to `node` too.
pub fn resolve_path<'n>(
    mut node: &'n mut MovieClipNode,
    path: &str,
) -> Option<&'n mut MovieClipNode> {
    for segment in path.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        node = node
            .display_list_mut()
            .get_by_name_mut(segment)?
            .as_movie_clip_mut()?;
    }
    Some(node)
}
