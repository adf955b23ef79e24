use crate::player::avm::{
    environment::ScriptEnvironment,
    error::ScriptError,
    interpreter::Interpreter,
    opcode::{ActionCode, ActionRecord},
    value::Value,
};

use super::binary_op;

pub struct ArithmeticActionHandlers {}

impl ArithmeticActionHandlers {
    pub fn register(interpreter: &mut Interpreter) {
        interpreter.register(ActionCode::Add, Self::add);
        interpreter.register(ActionCode::Subtract, Self::subtract);
        interpreter.register(ActionCode::Multiply, Self::multiply);
        interpreter.register(ActionCode::Divide, Self::divide);
        interpreter.register(ActionCode::Equals, Self::equals);
        interpreter.register(ActionCode::Less, Self::less);
        interpreter.register(ActionCode::And, Self::and);
        interpreter.register(ActionCode::Or, Self::or);
        interpreter.register(ActionCode::Not, Self::not);
        interpreter.register(ActionCode::ToInteger, Self::to_integer);
    }

    pub fn add(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        binary_op(env, |a, b, _| Value::Number(a.to_number() + b.to_number()))
    }

    pub fn subtract(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        binary_op(env, |a, b, _| Value::Number(a.to_number() - b.to_number()))
    }

    pub fn multiply(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        binary_op(env, |a, b, _| Value::Number(a.to_number() * b.to_number()))
    }

    /// Division by zero yields the "#ERROR#" string before version 5.
    pub fn divide(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        binary_op(env, |a, b, version| {
            let divisor = b.to_number();
            if divisor == 0.0 && version < 5 {
                Value::from("#ERROR#")
            } else {
                Value::Number(a.to_number() / divisor)
            }
        })
    }

    pub fn equals(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        binary_op(env, |a, b, version| {
            Value::from_bool(a.to_number() == b.to_number(), version)
        })
    }

    pub fn less(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        binary_op(env, |a, b, version| {
            Value::from_bool(a.to_number() < b.to_number(), version)
        })
    }

    pub fn and(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        binary_op(env, |a, b, version| {
            Value::from_bool(a.to_bool() && b.to_bool(), version)
        })
    }

    pub fn or(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        binary_op(env, |a, b, version| {
            Value::from_bool(a.to_bool() || b.to_bool(), version)
        })
    }

    pub fn not(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let value = env.pop()?;
        env.push(Value::from_bool(!value.to_bool(), env.version()));
        Ok(())
    }

    pub fn to_integer(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let number = env.pop()?.to_number();
        let truncated = if number.is_nan() { 0.0 } else { number.trunc() };
        env.push(Value::Number(truncated));
        Ok(())
    }
}
