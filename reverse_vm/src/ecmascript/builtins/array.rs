// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### 10.4.2 Array Exotic Objects
//!
//! https://tc39.es/ecma262/#sec-array-exotic-objects

pub(crate) mod abstract_operations;
mod data;

use std::ops::{Index, IndexMut};

use crate::{
    ecmascript::{
        builtins::{
            array::abstract_operations::array_set_length,
            ordinary::{
                ObjectHeapData, OrdinaryObject, ordinary_define_own_property, ordinary_delete,
                ordinary_set_prototype_of_check,
            },
        },
        execution::{Agent, JsResult},
        types::{
            BUILTIN_STRING_MEMORY, InternalMethods, Object, PropertyDescriptor,
            PropertyKey, Value, validate_and_apply_property_descriptor,
        },
    },
    heap::{
        CreateHeapData, ElementsKind, ElementsRepresentation, element_array::ElementStorage,
        indexes::ArrayIndex,
    },
};

pub use data::ArrayHeapData;
pub(crate) use data::ElementAttributes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Array(pub(crate) ArrayIndex);

impl Array {
    /// Creates a new array with the given elements.
    ///
    /// This is equal to the [CreateArrayFromList](https://tc39.es/ecma262/#sec-createarrayfromlist)
    /// abstract operation.
    pub fn from_slice(agent: &mut Agent, elements: &[Value]) -> Self {
        agent
            .heap
            .create(ArrayHeapData::new(ElementStorage::from_values(elements)))
    }

    /// Creates a new array where `None` entries are holes.
    pub fn from_elements(agent: &mut Agent, elements: &[Option<Value>]) -> Self {
        agent.heap.create(ArrayHeapData::new(
            ElementStorage::from_optional_values(elements),
        ))
    }

    /// Creates a new array that shares this array's element storage until
    /// either of them is written to.
    pub fn copy_on_write_clone(self, agent: &mut Agent) -> Self {
        let data = &agent[self];
        let clone = ArrayHeapData {
            elements: data.elements.clone(),
            descriptors: data.descriptors.clone(),
            prototype: data.prototype,
            ..ArrayHeapData::new(ElementStorage::default())
        };
        agent.heap.create(clone)
    }

    pub fn len(self, agent: &Agent) -> u32 {
        agent[self].elements.len()
    }

    pub fn is_empty(self, agent: &Agent) -> bool {
        self.len(agent) == 0
    }

    pub fn length_writable(self, agent: &Agent) -> bool {
        agent[self].len_writable
    }

    pub fn elements_kind(self, agent: &Agent) -> ElementsKind {
        agent[self].elements.kind()
    }

    /// True if the element storage is currently shared with another Array.
    pub fn has_shared_elements(self, agent: &Agent) -> bool {
        agent[self].elements.is_shared()
    }

    /// Snapshot of the elements, with holes as `None`.
    pub fn to_vec(self, agent: &Agent) -> Vec<Option<Value>> {
        let elements = &agent[self].elements;
        (0..elements.len()).map(|index| elements.get(index)).collect()
    }

    /// Reports which packed representation, if any, the element storage is
    /// in. Shared storage is detached first so that an eligible report always
    /// means the storage may be written in place.
    pub fn packed_representation(self, agent: &mut Agent) -> ElementsRepresentation {
        let data = &mut agent[self];
        if data.descriptors.is_some() {
            return ElementsRepresentation::Ineligible;
        }
        let representation = match data.elements.kind() {
            ElementsKind::PackedSmi => ElementsRepresentation::IntegerPacked,
            ElementsKind::PackedDouble => ElementsRepresentation::DoublePacked,
            ElementsKind::Packed => ElementsRepresentation::ReferencePacked,
            ElementsKind::Holey | ElementsKind::Dictionary => {
                return ElementsRepresentation::Ineligible;
            }
        };
        data.elements.make_exclusive();
        representation
    }

    pub fn into_object(self) -> Object {
        self.into()
    }

    pub fn into_value(self) -> Value {
        self.into()
    }

    fn get_or_create_backing_object(self, agent: &mut Agent) -> OrdinaryObject {
        if let Some(backing_object) = agent[self].backing_object {
            return backing_object;
        }
        let mut data = ObjectHeapData::new(None);
        data.extensible = agent[self].extensible;
        let backing_object: OrdinaryObject = agent.heap.create(data);
        agent[self].backing_object = Some(backing_object);
        backing_object
    }
}

impl Index<Array> for Agent {
    type Output = ArrayHeapData;

    fn index(&self, index: Array) -> &Self::Output {
        &self.heap.arrays[index.0.into_index()]
    }
}

impl IndexMut<Array> for Agent {
    fn index_mut(&mut self, index: Array) -> &mut Self::Output {
        &mut self.heap.arrays[index.0.into_index()]
    }
}

fn is_length_key(property_key: PropertyKey) -> bool {
    property_key == PropertyKey::String(BUILTIN_STRING_MEMORY.length)
}

impl InternalMethods for Array {
    fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>> {
        Ok(agent[self].prototype)
    }

    fn internal_set_prototype_of(
        self,
        agent: &mut Agent,
        prototype: Option<Object>,
    ) -> JsResult<bool> {
        let current = agent[self].prototype;
        let extensible = agent[self].extensible;
        if !ordinary_set_prototype_of_check(agent, self.into(), current, extensible, prototype)? {
            return Ok(false);
        }
        agent[self].prototype = prototype;
        Ok(true)
    }

    fn internal_is_extensible(self, agent: &mut Agent) -> JsResult<bool> {
        Ok(agent[self].extensible)
    }

    fn internal_prevent_extensions(self, agent: &mut Agent) -> JsResult<bool> {
        agent[self].extensible = false;
        if let Some(backing_object) = agent[self].backing_object {
            agent[backing_object].extensible = false;
        }
        Ok(true)
    }

    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        let data = &agent[self];
        if let Some(index) = property_key.as_array_index() {
            return Ok(data.elements.get(index).map(|value| {
                data.element_attributes(index)
                    .with_value(value)
                    .to_descriptor()
            }));
        }
        if is_length_key(property_key) {
            return Ok(Some(PropertyDescriptor {
                value: Some(Value::from(data.elements.len())),
                writable: Some(data.len_writable),
                enumerable: Some(false),
                configurable: Some(false),
            }));
        }
        let backing_object = data.backing_object;
        match backing_object {
            Some(backing_object) => backing_object.internal_get_own_property(agent, property_key),
            None => Ok(None),
        }
    }

    /// ### [10.4.2.1 \[\[DefineOwnProperty\]\] ( P, Desc )](https://tc39.es/ecma262/#sec-array-exotic-objects-defineownproperty-p-desc)
    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        // 1. If P is "length", then
        if is_length_key(property_key) {
            // a. Return ? ArraySetLength(A, Desc).
            return array_set_length(agent, self, property_descriptor);
        }
        // 2. Else if P is an array index, then
        if let Some(index) = property_key.as_array_index() {
            let data = &mut agent[self];
            // b. Let length be lengthDesc.[[Value]].
            let length = data.elements.len();
            // f. If index ≥ length and lengthDesc.[[Writable]] is false, return false.
            if index >= length && !data.len_writable {
                return Ok(false);
            }
            // g. Let succeeded be ! OrdinaryDefineOwnProperty(A, P, Desc).
            let current = data
                .elements
                .get(index)
                .map(|value| data.element_attributes(index).with_value(value));
            // h. If succeeded is false, return false.
            let Some(property) =
                validate_and_apply_property_descriptor(data.extensible, property_descriptor, current)
            else {
                return Ok(false);
            };
            // i. If index ≥ length, then
            //    i. Set lengthDesc.[[Value]] to index + 1𝔽.
            data.elements.set(index, property.value);
            data.set_element_attributes(index, ElementAttributes::from(property));
            // j. Return true.
            return Ok(true);
        }
        // 3. Return ? OrdinaryDefineOwnProperty(A, P, Desc).
        if agent[self].backing_object.is_none() && !agent[self].extensible {
            return Ok(false);
        }
        let backing_object = self.get_or_create_backing_object(agent);
        Ok(ordinary_define_own_property(
            agent,
            backing_object,
            property_key,
            property_descriptor,
        ))
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        if let Some(index) = property_key.as_array_index() {
            let data = &mut agent[self];
            if data.elements.get(index).is_none() {
                return Ok(true);
            }
            if !data.element_attributes(index).configurable {
                return Ok(false);
            }
            data.elements.delete(index);
            data.set_element_attributes(index, ElementAttributes::DEFAULT);
            return Ok(true);
        }
        if is_length_key(property_key) {
            return Ok(false);
        }
        let backing_object = agent[self].backing_object;
        match backing_object {
            Some(backing_object) => Ok(ordinary_delete(agent, backing_object, property_key)),
            None => Ok(true),
        }
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        let data = &agent[self];
        let mut keys = data
            .elements
            .present_indexes()
            .into_iter()
            .map(PropertyKey::from)
            .collect::<Vec<_>>();
        keys.push(PropertyKey::String(BUILTIN_STRING_MEMORY.length));
        if let Some(backing_object) = data.backing_object {
            keys.extend(agent[backing_object].keys());
        }
        Ok(keys)
    }
}
