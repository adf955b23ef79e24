use std::fmt;

use itertools::Itertools;
use log::debug;
use num::FromPrimitive;

use super::{
    environment::ScriptEnvironment,
    error::ScriptError,
    handlers::{
        arithmetic::ArithmeticActionHandlers, control::ControlActionHandlers,
        stack::StackActionHandlers, string::StringActionHandlers,
        variables::VariableActionHandlers,
    },
    opcode::{ActionCode, ActionRecord},
};

pub type ActionHandler = fn(&mut ScriptEnvironment, &ActionRecord) -> Result<(), ScriptError>;

/// Opcode dispatch. The table is filled once in `new` and never changes, so
/// a single instance is shared by every clip of a movie.
pub struct Interpreter {
    handlers: [Option<ActionHandler>; 256],
}

impl Interpreter {
    pub fn new() -> Interpreter {
        let mut interpreter = Interpreter {
            handlers: [None; 256],
        };
        ControlActionHandlers::register(&mut interpreter);
        StackActionHandlers::register(&mut interpreter);
        ArithmeticActionHandlers::register(&mut interpreter);
        StringActionHandlers::register(&mut interpreter);
        VariableActionHandlers::register(&mut interpreter);
        interpreter
    }

    pub fn register(&mut self, code: ActionCode, handler: ActionHandler) {
        self.handlers[code as usize] = Some(handler);
    }

    pub fn handles(&self, code: u8) -> bool {
        self.handlers[code as usize].is_some()
    }

    /// Decodes and runs one instruction. Returns false once the block ends,
    /// either on the End action or when the bytes run out.
    pub fn execute(&self, env: &mut ScriptEnvironment) -> Result<bool, ScriptError> {
        if env.is_exhausted() {
            return Ok(false);
        }

        let pc = env.pc();
        let code = env.stream_mut().read_u8()?;
        if code == ActionCode::End as u8 {
            return Ok(false);
        }

        let data = if ActionCode::has_operands(code) {
            let stream = env.stream_mut();
            let length = stream.read_u16()?;
            stream.read_bytes(length as usize)?
        } else {
            Vec::new()
        };

        if env.trace() {
            let stack = env.stack().iter().join(", ");
            match ActionCode::from_u8(code) {
                Some(action) => debug!("[{:04}] {:?} stack=[{}]", pc, action, stack),
                None => debug!("[{:04}] 0x{:02X} stack=[{}]", pc, code, stack),
            }
        }

        let handler = self.handlers[code as usize].ok_or(ScriptError::UnknownOpcode { code, pc })?;
        env.set_current_code(code);
        handler(env, &ActionRecord { code, pc, data })?;
        Ok(true)
    }

    /// Runs instructions until the block halts or fails.
    pub fn run(&self, env: &mut ScriptEnvironment) -> Result<(), ScriptError> {
        while self.execute(env)? {}
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered = self.handlers.iter().filter(|handler| handler.is_some()).count();
        f.debug_struct("Interpreter")
            .field("registered", &registered)
            .finish()
    }
}
