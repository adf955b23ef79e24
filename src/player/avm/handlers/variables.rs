use log::debug;

use crate::player::avm::{
    environment::ScriptEnvironment,
    error::ScriptError,
    interpreter::Interpreter,
    opcode::{ActionCode, ActionRecord},
    value::Value,
};

pub struct VariableActionHandlers {}

impl VariableActionHandlers {
    pub fn register(interpreter: &mut Interpreter) {
        interpreter.register(ActionCode::GetVariable, Self::get_variable);
        interpreter.register(ActionCode::SetVariable, Self::set_variable);
    }

    /// Names may carry a target path: `clip/inner:name`.
    pub fn get_variable(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let name = env.pop()?.coerce_to_string(env.version());
        let value = match env.variable_owner(&name) {
            Some((clip, variable)) => clip.get_variable(variable),
            None => {
                debug!("GetVariable {:?}: path does not resolve", name);
                Value::Undefined
            }
        };
        env.push(value);
        Ok(())
    }

    pub fn set_variable(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let value = env.pop()?;
        let name = env.pop()?.coerce_to_string(env.version());
        match env.variable_owner(&name) {
            Some((clip, variable)) => clip.set_variable(variable, value),
            None => debug!("SetVariable {:?}: path does not resolve", name),
        }
        Ok(())
    }
}
