pub mod arithmetic;
pub mod control;
pub mod stack;
pub mod string;
pub mod variables;

use super::{environment::ScriptEnvironment, error::ScriptError, value::Value};

/// Pops the right operand then the left one and pushes `op(left, right)`.
pub(super) fn binary_op(
    env: &mut ScriptEnvironment,
    op: impl FnOnce(Value, Value, u8) -> Value,
) -> Result<(), ScriptError> {
    let right = env.pop()?;
    let left = env.pop()?;
    let result = op(left, right, env.version());
    env.push(result);
    Ok(())
}
