// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Object, String};
use crate::{
    SmallInteger,
    ecmascript::{
        builtins::{Array, error::Error, ordinary::OrdinaryObject, proxy::Proxy},
        execution::Agent,
    },
};

/// ### [6.1 ECMAScript Language Types](https://tc39.es/ecma262/#sec-ecmascript-language-types)
///
/// Equality through `PartialEq` compares Numbers with `f64` semantics, so
/// `NaN != NaN`. Use [`Value::is_identical`] to compare bit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value {
    /// ### [6.1.1 The Undefined Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-undefined-type)
    #[default]
    Undefined,

    /// ### [6.1.2 The Null Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-null-type)
    Null,

    /// ### [6.1.3 The Boolean Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-boolean-type)
    Boolean(bool),

    /// ### [6.1.4 The String Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-string-type)
    String(String),

    /// ### [6.1.6.1 The Number Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-number-type)
    Integer(SmallInteger),
    Number(f64),

    /// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
    Object(OrdinaryObject),
    Array(Array),
    Proxy(Proxy),
    Error(Error),
}

impl Value {
    /// Creates a Number value, preferring the integer-tagged form whenever
    /// `value` is a safe integer other than -0.
    pub fn from_f64(value: f64) -> Self {
        match SmallInteger::try_from(value) {
            Ok(integer) => Self::Integer(integer),
            Err(()) => Self::Number(value),
        }
    }

    pub fn from_str(agent: &mut Agent, str: &str) -> Self {
        Self::String(String::from_str(agent, str))
    }

    pub fn nan() -> Self {
        Self::Number(f64::NAN)
    }

    pub fn is_object(self) -> bool {
        matches!(
            self,
            Value::Object(_) | Value::Array(_) | Value::Proxy(_) | Value::Error(_)
        )
    }

    /// The mathematical value of a Number, or None for non-Numbers.
    pub fn to_f64(self) -> Option<f64> {
        match self {
            Value::Integer(integer) => Some(integer.into_f64()),
            Value::Number(number) => Some(number),
            _ => None,
        }
    }

    /// Compares two values by identity, with Numbers compared by their
    /// `f64` bit pattern. Unlike SameValue this tells NaN payloads apart.
    pub fn is_identical(self, other: Value) -> bool {
        match (self.to_f64(), other.to_f64()) {
            (Some(a), Some(b)) => a.to_bits() == b.to_bits(),
            (None, None) => self == other,
            _ => false,
        }
    }

    /// Short human readable rendering, used by error messages and the CLI.
    pub fn display(self, agent: &Agent) -> std::string::String {
        match self {
            Value::Undefined => "undefined".to_owned(),
            Value::Null => "null".to_owned(),
            Value::Boolean(boolean) => boolean.to_string(),
            Value::String(string) => format!("{:?}", string.as_str(agent)),
            Value::Integer(integer) => integer.to_string(),
            Value::Number(number) => {
                let mut buffer = ryu_js::Buffer::new();
                buffer.format(number).to_owned()
            }
            Value::Object(_) => "[object Object]".to_owned(),
            Value::Array(array) => format!("[object Array({})]", array.len(agent)),
            Value::Proxy(_) => "[object Proxy]".to_owned(),
            Value::Error(error) => error.display(agent),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<SmallInteger> for Value {
    fn from(value: SmallInteger) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(SmallInteger::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(SmallInteger::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::from_f64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        match value {
            Object::Object(object) => Value::Object(object),
            Object::Array(array) => Value::Array(array),
            Object::Proxy(proxy) => Value::Proxy(proxy),
            Object::Error(error) => Value::Error(error),
        }
    }
}

impl From<OrdinaryObject> for Value {
    fn from(value: OrdinaryObject) -> Self {
        Value::Object(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Proxy> for Value {
    fn from(value: Proxy) -> Self {
        Value::Proxy(value)
    }
}

impl From<Error> for Value {
    fn from(value: Error) -> Self {
        Value::Error(value)
    }
}
