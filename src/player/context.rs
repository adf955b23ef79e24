use std::cell::{Cell, RefCell};

use log::warn;

use crate::swf::character::{Character, CharacterDictionary};

use super::{avm::Interpreter, config::PlayerConfig};

/// Deepest chain of clips instantiated inside one another.
pub const MAX_CLIP_NESTING: usize = 64;

/// Everything a clip instance needs from its movie, shared read-only by all
/// instances: the character dictionary, the action dispatch table and the
/// host config. Nodes hold an `Rc` to it and never mutate through it, apart
/// from drawing fresh instance ids and toggling action tracing.
#[derive(Debug)]
pub struct MovieContext {
    dictionary: CharacterDictionary,
    interpreter: Interpreter,
    config: PlayerConfig,
    version: u8,
    trace_actions: Cell<bool>,
    next_instance_id: Cell<u32>,
    /// Sprite ids whose instances are being built, outermost first.
    instantiating: RefCell<Vec<u16>>,
}

impl MovieContext {
    pub fn new(dictionary: CharacterDictionary, config: PlayerConfig, version: u8) -> MovieContext {
        let version = config.swf_version_override.unwrap_or(version);
        MovieContext {
            dictionary,
            interpreter: Interpreter::new(),
            trace_actions: Cell::new(config.trace_actions),
            config,
            version,
            next_instance_id: Cell::new(1),
            instantiating: RefCell::new(Vec::new()),
        }
    }

    pub fn character(&self, character_id: u16) -> Option<&Character> {
        self.dictionary.get(character_id)
    }

    pub fn dictionary(&self) -> &CharacterDictionary {
        &self.dictionary
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Version used for script value semantics.
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn trace_actions(&self) -> bool {
        self.trace_actions.get()
    }

    pub fn set_trace_actions(&self, enabled: bool) {
        self.trace_actions.set(enabled);
    }

    pub fn alloc_instance_id(&self) -> u32 {
        let id = self.next_instance_id.get();
        self.next_instance_id.set(id.wrapping_add(1));
        id
    }

    /// Marks `character_id` as being instantiated. Refused when an instance
    /// of the same sprite is already being built further up, or when the
    /// chain is `MAX_CLIP_NESTING` deep. Pair with `end_instantiation`.
    pub fn begin_instantiation(&self, character_id: u16) -> bool {
        let mut stack = self.instantiating.borrow_mut();
        if stack.contains(&character_id) {
            warn!(
                "Sprite {} contains itself ({:?}), not instantiating",
                character_id, stack
            );
            return false;
        }
        if stack.len() >= MAX_CLIP_NESTING {
            warn!(
                "Sprite {} nested deeper than {} clips, not instantiating",
                character_id, MAX_CLIP_NESTING
            );
            return false;
        }
        stack.push(character_id);
        true
    }

    pub fn end_instantiation(&self) {
        self.instantiating.borrow_mut().pop();
    }

    pub fn instantiation_depth(&self) -> usize {
        self.instantiating.borrow().len()
    }
}
