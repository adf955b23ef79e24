use std::fmt;

/// A stack value. Only the primitive kinds of the early action model are
/// represented; there are no objects, so nothing needs collecting.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Number(f64),
    Str(String),
    Boolean(bool),
}

impl Value {
    /// Comparison results are numbers before version 5 and booleans after.
    pub fn from_bool(value: bool, version: u8) -> Value {
        if version >= 5 {
            Value::Boolean(value)
        } else {
            Value::Number(if value { 1.0 } else { 0.0 })
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => 0.0,
            Value::Number(value) => *value,
            Value::Boolean(value) => {
                if *value {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Str(value) => value.trim().parse::<f64>().unwrap_or(0.0),
        }
    }

    pub fn to_bool(&self) -> bool {
        match self {
            Value::Boolean(value) => *value,
            other => {
                let number = other.to_number();
                number != 0.0 && !number.is_nan()
            }
        }
    }

    pub fn coerce_to_string(&self, version: u8) -> String {
        match self {
            Value::Undefined if version >= 7 => "undefined".to_string(),
            Value::Undefined => String::new(),
            Value::Number(value) => format_number(*value),
            Value::Str(value) => value.clone(),
            Value::Boolean(value) if version >= 5 => value.to_string(),
            Value::Boolean(value) => (if *value { "1" } else { "0" }).to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Number(value) => write!(f, "{}", format_number(*value)),
            Value::Str(value) => write!(f, "\"{}\"", value),
            Value::Boolean(value) => write!(f, "{}", value),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
