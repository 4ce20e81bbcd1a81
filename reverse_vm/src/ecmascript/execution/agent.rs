// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    ecmascript::{
        builtins::error::ErrorHeapData,
        types::Value,
    },
    heap::Heap,
};

#[derive(Debug, Default)]
pub struct Options {
    /// Print engine internals, such as the strategy chosen by builtins, to
    /// stderr.
    pub print_internals: bool,
    /// Never take the packed Array fast paths; always run the generic,
    /// property-by-property algorithms.
    pub disable_array_fast_paths: bool,
}

pub type JsResult<T> = std::result::Result<T, JsError>;

/// A thrown ECMAScript value.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct JsError(Value);

impl JsError {
    /// Throws an arbitrary value. Host-defined traps use this to abort an
    /// operation with their own value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(self) -> Value {
        self.0
    }

    /// The kind of the thrown Error object, or None if a non-Error value was
    /// thrown.
    pub fn kind(self, agent: &Agent) -> Option<ExceptionType> {
        match self.0 {
            Value::Error(error) => Some(agent[error].kind),
            _ => None,
        }
    }

    /// The message of the thrown Error object, or None if a non-Error value
    /// was thrown.
    pub fn message(self, agent: &Agent) -> Option<&str> {
        match self.0 {
            Value::Error(error) => Some(agent[error].message.as_str(agent)),
            _ => None,
        }
    }

    pub fn to_string(self, agent: &Agent) -> String {
        self.0.display(agent)
    }
}

/// ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)
#[derive(Debug)]
pub struct Agent {
    pub(crate) heap: Heap,
    pub(crate) options: Options,
}

impl Agent {
    pub fn new(options: Options) -> Self {
        Self {
            heap: Heap::new(),
            options,
        }
    }

    /// ### [5.2.3.2 Throw an Exception](https://tc39.es/ecma262/#sec-throw-an-exception)
    pub fn throw_exception_with_static_message(
        &mut self,
        kind: ExceptionType,
        message: &'static str,
    ) -> JsError {
        self.throw_exception(kind, message)
    }

    pub fn throw_exception(&mut self, kind: ExceptionType, message: &str) -> JsError {
        let error = ErrorHeapData::create(self, kind, message);
        JsError(Value::Error(error))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionType {
    Error,
    RangeError,
    TypeError,
}

impl ExceptionType {
    pub fn name(self) -> &'static str {
        match self {
            ExceptionType::Error => "Error",
            ExceptionType::RangeError => "RangeError",
            ExceptionType::TypeError => "TypeError",
        }
    }
}
