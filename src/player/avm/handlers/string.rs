use crate::player::avm::{
    environment::ScriptEnvironment,
    error::ScriptError,
    interpreter::Interpreter,
    opcode::{ActionCode, ActionRecord},
    value::Value,
};

use super::binary_op;

pub struct StringActionHandlers {}

/// `count` items starting at the 1-based `index`; a negative count runs to
/// the end.
fn substring<T>(items: &[T], index: f64, count: f64) -> &[T] {
    let start = ((index.max(1.0) as usize) - 1).min(items.len());
    let end = if count < 0.0 {
        items.len()
    } else {
        start.saturating_add(count as usize).min(items.len())
    };
    &items[start..end]
}

impl StringActionHandlers {
    pub fn register(interpreter: &mut Interpreter) {
        interpreter.register(ActionCode::StringEquals, Self::string_equals);
        interpreter.register(ActionCode::StringLength, Self::string_length);
        interpreter.register(ActionCode::StringExtract, Self::string_extract);
        interpreter.register(ActionCode::StringAdd, Self::string_add);
        interpreter.register(ActionCode::StringLess, Self::string_less);
        interpreter.register(ActionCode::MbStringLength, Self::mb_string_length);
        interpreter.register(ActionCode::MbStringExtract, Self::mb_string_extract);
        interpreter.register(ActionCode::CharToAscii, Self::char_to_ascii);
        interpreter.register(ActionCode::AsciiToChar, Self::ascii_to_char);
        interpreter.register(ActionCode::MbCharToAscii, Self::mb_char_to_ascii);
        interpreter.register(ActionCode::MbAsciiToChar, Self::mb_ascii_to_char);
    }

    fn pop_string(env: &mut ScriptEnvironment) -> Result<String, ScriptError> {
        let value = env.pop()?;
        Ok(value.coerce_to_string(env.version()))
    }

    pub fn string_equals(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        binary_op(env, |a, b, version| {
            Value::from_bool(a.coerce_to_string(version) == b.coerce_to_string(version), version)
        })
    }

    pub fn string_less(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        binary_op(env, |a, b, version| {
            Value::from_bool(a.coerce_to_string(version) < b.coerce_to_string(version), version)
        })
    }

    pub fn string_add(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        binary_op(env, |a, b, version| {
            let mut joined = a.coerce_to_string(version);
            joined.push_str(&b.coerce_to_string(version));
            Value::Str(joined)
        })
    }

    /// Length in bytes.
    pub fn string_length(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let string = Self::pop_string(env)?;
        env.push(Value::Number(string.len() as f64));
        Ok(())
    }

    pub fn mb_string_length(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let string = Self::pop_string(env)?;
        env.push(Value::Number(string.chars().count() as f64));
        Ok(())
    }

    pub fn string_extract(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let count = env.pop()?.to_number();
        let index = env.pop()?.to_number();
        let string = Self::pop_string(env)?;
        let bytes = substring(string.as_bytes(), index, count);
        env.push(Value::Str(String::from_utf8_lossy(bytes).into_owned()));
        Ok(())
    }

    pub fn mb_string_extract(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let count = env.pop()?.to_number();
        let index = env.pop()?.to_number();
        let chars: Vec<char> = Self::pop_string(env)?.chars().collect();
        let extracted: String = substring(&chars, index, count).iter().collect();
        env.push(Value::Str(extracted));
        Ok(())
    }

    pub fn char_to_ascii(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let string = Self::pop_string(env)?;
        let code = string.bytes().next().unwrap_or(0);
        env.push(Value::Number(code as f64));
        Ok(())
    }

    pub fn mb_char_to_ascii(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let string = Self::pop_string(env)?;
        let code = string.chars().next().map_or(0, |c| c as u32);
        env.push(Value::Number(code as f64));
        Ok(())
    }

    pub fn ascii_to_char(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let code = env.pop()?.to_number() as u32 as u8;
        env.push(Value::Str(char::from(code).to_string()));
        Ok(())
    }

    pub fn mb_ascii_to_char(env: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        let code = env.pop()?.to_number() as u32;
        let character = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
        env.push(Value::Str(character.to_string()));
        Ok(())
    }
}
