use crate::player::avm::{
    environment::ScriptEnvironment,
    error::ScriptError,
    interpreter::Interpreter,
    opcode::{ActionCode, ActionRecord},
    value::Value,
};

const PUSH_STRING: u8 = 0;
const PUSH_FLOAT: u8 = 1;
const PUSH_NULL: u8 = 2;
const PUSH_UNDEFINED: u8 = 3;
const PUSH_REGISTER: u8 = 4;
const PUSH_BOOLEAN: u8 = 5;
const PUSH_DOUBLE: u8 = 6;
const PUSH_INTEGER: u8 = 7;
const PUSH_CONSTANT8: u8 = 8;
const PUSH_CONSTANT16: u8 = 9;

pub struct StackActionHandlers {}

impl StackActionHandlers {
    pub fn register(interpreter: &mut Interpreter) {
        interpreter.register(ActionCode::Push, Self::push);
        interpreter.register(ActionCode::Pop, Self::pop);
    }

    /// Push carries any number of typed values, pushed in order.
    pub fn push(env: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        let mut operands = action.operands();
        while !operands.is_eof() {
            let kind = operands.read_u8()?;
            let value = match kind {
                PUSH_STRING => Value::Str(operands.read_string()?),
                PUSH_FLOAT => Value::Number(f32::from_bits(operands.read_u32()?) as f64),
                PUSH_NULL | PUSH_UNDEFINED => Value::Undefined,
                PUSH_BOOLEAN => Value::Boolean(operands.read_u8()? != 0),
                PUSH_DOUBLE => {
                    // High word first.
                    let high = operands.read_u32()? as u64;
                    let low = operands.read_u32()? as u64;
                    Value::Number(f64::from_bits((high << 32) | low))
                }
                PUSH_INTEGER => Value::Number(operands.read_i32()? as f64),
                PUSH_REGISTER | PUSH_CONSTANT8 | PUSH_CONSTANT16 => {
                    return Err(ScriptError::Unsupported(format!(
                        "push of register/constant pool value (type {})",
                        kind
                    )))
                }
                _ => {
                    return Err(ScriptError::Unsupported(format!(
                        "push of value type {}",
                        kind
                    )))
                }
            };
            env.push(value);
        }
        Ok(())
    }

    pub fn pop(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        env.pop()?;
        Ok(())
    }
}
