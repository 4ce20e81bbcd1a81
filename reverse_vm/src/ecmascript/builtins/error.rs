// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [20.5 Error Objects](https://tc39.es/ecma262/#sec-error-objects)

use std::ops::{Index, IndexMut};

use crate::{
    ecmascript::{
        builtins::ordinary::{ObjectHeapData, OrdinaryObject},
        execution::{Agent, ExceptionType, JsResult},
        types::{
            BUILTIN_STRING_MEMORY, DataProperty, InternalMethods, Object, PropertyDescriptor,
            PropertyKey, String, Value,
        },
    },
    heap::{CreateHeapData, indexes::ErrorIndex},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Error(pub(crate) ErrorIndex);

#[derive(Debug, Clone)]
pub struct ErrorHeapData {
    pub(crate) kind: ExceptionType,
    pub(crate) message: String,
    /// Own properties; holds the `message` data property.
    pub(crate) object: OrdinaryObject,
}

impl ErrorHeapData {
    /// Allocates a new Error object of the given kind with an own,
    /// non-enumerable `message` property.
    pub(crate) fn create(agent: &mut Agent, kind: ExceptionType, message: &str) -> Error {
        let message = String::from_str(agent, message);
        let mut object = ObjectHeapData::new(None);
        object.insert(
            PropertyKey::String(BUILTIN_STRING_MEMORY.message),
            DataProperty {
                enumerable: false,
                ..DataProperty::new(message.into())
            },
        );
        let object: OrdinaryObject = agent.heap.create(object);
        agent.heap.create(ErrorHeapData {
            kind,
            message,
            object,
        })
    }
}

impl Error {
    pub fn kind(self, agent: &Agent) -> ExceptionType {
        agent[self].kind
    }

    /// `"<name>: <message>"`, as Error.prototype.toString would render it.
    pub fn display(self, agent: &Agent) -> std::string::String {
        let data = &agent[self];
        let message = data.message.as_str(agent);
        if message.is_empty() {
            data.kind.name().to_owned()
        } else {
            format!("{}: {}", data.kind.name(), message)
        }
    }

    pub fn into_value(self) -> Value {
        self.into()
    }
}

impl Index<Error> for Agent {
    type Output = ErrorHeapData;

    fn index(&self, index: Error) -> &Self::Output {
        &self.heap.errors[index.0.into_index()]
    }
}

impl IndexMut<Error> for Agent {
    fn index_mut(&mut self, index: Error) -> &mut Self::Output {
        &mut self.heap.errors[index.0.into_index()]
    }
}

impl InternalMethods for Error {
    fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>> {
        agent[self].object.internal_get_prototype_of(agent)
    }

    fn internal_set_prototype_of(
        self,
        agent: &mut Agent,
        prototype: Option<Object>,
    ) -> JsResult<bool> {
        agent[self].object.internal_set_prototype_of(agent, prototype)
    }

    fn internal_is_extensible(self, agent: &mut Agent) -> JsResult<bool> {
        agent[self].object.internal_is_extensible(agent)
    }

    fn internal_prevent_extensions(self, agent: &mut Agent) -> JsResult<bool> {
        agent[self].object.internal_prevent_extensions(agent)
    }

    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        agent[self]
            .object
            .internal_get_own_property(agent, property_key)
    }

    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        agent[self]
            .object
            .internal_define_own_property(agent, property_key, property_descriptor)
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        agent[self].object.internal_delete(agent, property_key)
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        agent[self].object.internal_own_property_keys(agent)
    }
}
