//! Stack machine for frame actions.

pub mod environment;
pub mod error;
pub mod handlers;
pub mod interpreter;
pub mod opcode;
pub mod value;

pub use environment::ScriptEnvironment;
pub use error::ScriptError;
pub use interpreter::{ActionHandler, Interpreter};
pub use opcode::{ActionCode, ActionRecord};
pub use value::Value;
