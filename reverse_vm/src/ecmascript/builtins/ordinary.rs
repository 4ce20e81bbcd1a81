// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.1 Ordinary Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots)

use std::ops::{Index, IndexMut};

use ahash::AHashMap;

use crate::{
    ecmascript::{
        abstract_operations::operations_on_objects::create_data_property,
        execution::{Agent, JsResult},
        types::{
            DataProperty, InternalMethods, Object, PropertyDescriptor, PropertyKey, Value,
            validate_and_apply_property_descriptor,
        },
    },
    heap::{CreateHeapData, indexes::ObjectIndex},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrdinaryObject(pub(crate) ObjectIndex);

#[derive(Debug, Clone, Copy)]
struct ObjectEntry {
    property: DataProperty,
    /// Creation order, used to order string keys.
    order: u32,
}

#[derive(Debug, Clone)]
pub struct ObjectHeapData {
    pub(crate) extensible: bool,
    pub(crate) prototype: Option<Object>,
    properties: AHashMap<PropertyKey, ObjectEntry>,
    next_order: u32,
}

impl ObjectHeapData {
    pub(crate) fn new(prototype: Option<Object>) -> Self {
        Self {
            extensible: true,
            prototype,
            properties: AHashMap::default(),
            next_order: 0,
        }
    }

    pub(crate) fn get(&self, key: PropertyKey) -> Option<DataProperty> {
        self.properties.get(&key).map(|entry| entry.property)
    }

    /// Inserts or overwrites a property. Overwriting keeps the original
    /// creation order.
    pub(crate) fn insert(&mut self, key: PropertyKey, property: DataProperty) {
        if let Some(entry) = self.properties.get_mut(&key) {
            entry.property = property;
            return;
        }
        let order = self.next_order;
        self.next_order += 1;
        self.properties.insert(key, ObjectEntry { property, order });
    }

    pub(crate) fn remove(&mut self, key: PropertyKey) {
        self.properties.remove(&key);
    }

    /// ### [10.1.11.1 OrdinaryOwnPropertyKeys ( O )](https://tc39.es/ecma262/#sec-ordinaryownpropertykeys)
    ///
    /// Array index keys in ascending numeric order, then every other key in
    /// ascending chronological order of property creation.
    pub(crate) fn keys(&self) -> Vec<PropertyKey> {
        let mut indexes = Vec::new();
        let mut others = Vec::new();
        for (key, entry) in self.properties.iter() {
            match key.as_array_index() {
                Some(index) => indexes.push((index, *key)),
                None => others.push((entry.order, *key)),
            }
        }
        indexes.sort_unstable_by_key(|(index, _)| *index);
        others.sort_unstable_by_key(|(order, _)| *order);
        indexes
            .into_iter()
            .chain(others)
            .map(|(_, key)| key)
            .collect()
    }
}

impl OrdinaryObject {
    /// ### [10.1.12 OrdinaryObjectCreate ( proto )](https://tc39.es/ecma262/#sec-ordinaryobjectcreate)
    pub fn create(agent: &mut Agent, prototype: Option<Object>) -> Self {
        agent.heap.create(ObjectHeapData::new(prototype))
    }

    pub fn into_object(self) -> Object {
        self.into()
    }

    pub fn into_value(self) -> Value {
        self.into()
    }
}

impl Index<OrdinaryObject> for Agent {
    type Output = ObjectHeapData;

    fn index(&self, index: OrdinaryObject) -> &Self::Output {
        &self.heap.objects[index.0.into_index()]
    }
}

impl IndexMut<OrdinaryObject> for Agent {
    fn index_mut(&mut self, index: OrdinaryObject) -> &mut Self::Output {
        &mut self.heap.objects[index.0.into_index()]
    }
}

impl InternalMethods for OrdinaryObject {
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
        Ok(true)
    }

    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        Ok(agent[self]
            .get(property_key)
            .map(DataProperty::to_descriptor))
    }

    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        Ok(ordinary_define_own_property(
            agent,
            self,
            property_key,
            property_descriptor,
        ))
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        Ok(ordinary_delete(agent, self, property_key))
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        Ok(agent[self].keys())
    }
}

/// ### [10.1.6.1 OrdinaryDefineOwnProperty ( O, P, Desc )](https://tc39.es/ecma262/#sec-ordinarydefineownproperty)
pub(crate) fn ordinary_define_own_property(
    agent: &mut Agent,
    object: OrdinaryObject,
    property_key: PropertyKey,
    descriptor: PropertyDescriptor,
) -> bool {
    let data = &mut agent[object];
    // 1. Let current be ? O.[[GetOwnProperty]](P).
    let current = data.get(property_key);
    // 2. Let extensible be ? IsExtensible(O).
    // 3. Return ValidateAndApplyPropertyDescriptor(O, P, extensible, Desc, current).
    match validate_and_apply_property_descriptor(data.extensible, descriptor, current) {
        Some(property) => {
            data.insert(property_key, property);
            true
        }
        None => false,
    }
}

/// ### [10.1.10.1 OrdinaryDelete ( O, P )](https://tc39.es/ecma262/#sec-ordinarydelete)
pub(crate) fn ordinary_delete(
    agent: &mut Agent,
    object: OrdinaryObject,
    property_key: PropertyKey,
) -> bool {
    let data = &mut agent[object];
    match data.get(property_key) {
        None => true,
        Some(property) if property.configurable => {
            data.remove(property_key);
            true
        }
        Some(_) => false,
    }
}

/// ### [10.1.2.1 OrdinarySetPrototypeOf ( O, V )](https://tc39.es/ecma262/#sec-ordinarysetprototypeof)
///
/// Steps 1 through 8: returns true if `object`'s prototype may be replaced
/// with `prototype`.
pub(crate) fn ordinary_set_prototype_of_check(
    agent: &mut Agent,
    object: Object,
    current: Option<Object>,
    extensible: bool,
    prototype: Option<Object>,
) -> JsResult<bool> {
    // 3. If SameValue(V, current) is true, return true.
    if prototype == current {
        return Ok(true);
    }
    // 5. If extensible is false, return false.
    if !extensible {
        return Ok(false);
    }
    // 6. Let p be V.
    let mut p = prototype;
    // 8. Repeat, while done is false,
    while let Some(parent) = p {
        // b. Else if SameValue(p, O) is true, return false.
        if parent == object {
            return Ok(false);
        }
        // c. i. If p.[[GetPrototypeOf]] is not the ordinary object internal
        //       method defined in 10.1.1, set done to true.
        if matches!(parent, Object::Proxy(_)) {
            break;
        }
        // c. ii. Else, set p to p.[[Prototype]].
        p = parent.internal_get_prototype_of(agent)?;
    }
    Ok(true)
}

/// ### [10.1.7.1 OrdinaryHasProperty ( O, P )](https://tc39.es/ecma262/#sec-ordinaryhasproperty)
pub(crate) fn ordinary_has_property(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
) -> JsResult<bool> {
    // 1. Let hasOwn be ? O.[[GetOwnProperty]](P).
    let has_own = object.internal_get_own_property(agent, property_key)?;
    // 2. If hasOwn is not undefined, return true.
    if has_own.is_some() {
        return Ok(true);
    }
    // 3. Let parent be ? O.[[GetPrototypeOf]]().
    // 4. If parent is not null, then
    if let Some(parent) = object.internal_get_prototype_of(agent)? {
        // a. Return ? parent.[[HasProperty]](P).
        return parent.internal_has_property(agent, property_key);
    }
    // 5. Return false.
    Ok(false)
}

/// ### [10.1.8.1 OrdinaryGet ( O, P, Receiver )](https://tc39.es/ecma262/#sec-ordinaryget)
pub(crate) fn ordinary_get(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    receiver: Value,
) -> JsResult<Value> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let Some(descriptor) = object.internal_get_own_property(agent, property_key)? else {
        // 2. If desc is undefined, then
        // a. Let parent be ? O.[[GetPrototypeOf]]().
        // b. If parent is null, return undefined.
        let Some(parent) = object.internal_get_prototype_of(agent)? else {
            return Ok(Value::Undefined);
        };
        // c. Return ? parent.[[Get]](P, Receiver).
        return parent.internal_get(agent, property_key, receiver);
    };
    // 3. If IsDataDescriptor(desc) is true, return desc.[[Value]].
    Ok(descriptor.value.unwrap_or(Value::Undefined))
}

/// ### [10.1.9.1 OrdinarySet ( O, P, V, Receiver )](https://tc39.es/ecma262/#sec-ordinaryset)
pub(crate) fn ordinary_set(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
    receiver: Value,
) -> JsResult<bool> {
    // 1. Let ownDesc be ? O.[[GetOwnProperty]](P).
    let own_descriptor = object.internal_get_own_property(agent, property_key)?;
    // 2. Return ? OrdinarySetWithOwnDescriptor(O, P, V, Receiver, ownDesc).
    ordinary_set_with_own_descriptor(agent, object, property_key, value, receiver, own_descriptor)
}

/// ### [10.1.9.2 OrdinarySetWithOwnDescriptor ( O, P, V, Receiver, ownDesc )](https://tc39.es/ecma262/#sec-ordinarysetwithowndescriptor)
pub(crate) fn ordinary_set_with_own_descriptor(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
    receiver: Value,
    own_descriptor: Option<PropertyDescriptor>,
) -> JsResult<bool> {
    // 1. If ownDesc is undefined, then
    let own_descriptor = match own_descriptor {
        Some(own_descriptor) => own_descriptor,
        None => {
            // a. Let parent be ? O.[[GetPrototypeOf]]().
            // b. If parent is not null, then
            if let Some(parent) = object.internal_get_prototype_of(agent)? {
                // i. Return ? parent.[[Set]](P, V, Receiver).
                return parent.internal_set(agent, property_key, value, receiver);
            }
            // c. Else, set ownDesc to the PropertyDescriptor { [[Value]]: undefined, [[Writable]]: true, [[Enumerable]]: true, [[Configurable]]: true }.
            PropertyDescriptor::new_data_descriptor(Value::Undefined)
        }
    };
    // 2. If IsDataDescriptor(ownDesc) is true, then
    // a. If ownDesc.[[Writable]] is false, return false.
    if own_descriptor.writable == Some(false) {
        return Ok(false);
    }
    // b. If Receiver is not an Object, return false.
    let Ok(receiver) = Object::try_from(receiver) else {
        return Ok(false);
    };
    // c. Let existingDescriptor be ? Receiver.[[GetOwnProperty]](P).
    // d. If existingDescriptor is not undefined, then
    if let Some(existing) = receiver.internal_get_own_property(agent, property_key)? {
        // ii. If existingDescriptor.[[Writable]] is false, return false.
        if existing.writable == Some(false) {
            return Ok(false);
        }
        // iii. Let valueDesc be the PropertyDescriptor { [[Value]]: V }.
        let value_descriptor = PropertyDescriptor {
            value: Some(value),
            ..Default::default()
        };
        // iv. Return ? Receiver.[[DefineOwnProperty]](P, valueDesc).
        return receiver.internal_define_own_property(agent, property_key, value_descriptor);
    }
    // e. Else,
    // i. Assert: Receiver does not currently have a property P.
    // ii. Return ? CreateDataProperty(Receiver, P, V).
    create_data_property(agent, receiver, property_key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::execution::Options;

    #[test]
    fn own_keys_order() {
        let mut agent = Agent::new(Options::default());
        let object = OrdinaryObject::create(&mut agent, None);
        let b = PropertyKey::from_str(&mut agent, "b");
        let a = PropertyKey::from_str(&mut agent, "a");
        for key in [b, PropertyKey::from(2u32), a, PropertyKey::from(0u32)] {
            assert!(
                object
                    .internal_define_own_property(
                        &mut agent,
                        key,
                        PropertyDescriptor::new_data_descriptor(Value::Null)
                    )
                    .unwrap()
            );
        }
        assert_eq!(
            object.internal_own_property_keys(&mut agent).unwrap(),
            vec![PropertyKey::from(0u32), PropertyKey::from(2u32), b, a]
        );
    }

    #[test]
    fn inherited_properties_are_visible_but_not_own() {
        let mut agent = Agent::new(Options::default());
        let prototype = OrdinaryObject::create(&mut agent, None);
        let object = OrdinaryObject::create(&mut agent, Some(prototype.into()));
        let key = PropertyKey::from(1u32);
        prototype
            .internal_define_own_property(
                &mut agent,
                key,
                PropertyDescriptor::new_data_descriptor(Value::from(9)),
            )
            .unwrap();
        assert!(object.internal_has_property(&mut agent, key).unwrap());
        assert_eq!(
            object
                .internal_get(&mut agent, key, object.into_value())
                .unwrap(),
            Value::from(9)
        );
        assert_eq!(object.internal_get_own_property(&mut agent, key).unwrap(), None);
        // Setting through the receiver shadows the inherited property.
        assert!(
            object
                .internal_set(&mut agent, key, Value::from(3), object.into_value())
                .unwrap()
        );
        assert_eq!(
            prototype
                .internal_get(&mut agent, key, prototype.into_value())
                .unwrap(),
            Value::from(9)
        );
        assert_eq!(
            object
                .internal_get(&mut agent, key, object.into_value())
                .unwrap(),
            Value::from(3)
        );
    }

    #[test]
    fn prototype_cycles_are_rejected() {
        let mut agent = Agent::new(Options::default());
        let a = OrdinaryObject::create(&mut agent, None);
        let b = OrdinaryObject::create(&mut agent, Some(a.into()));
        assert!(!a.internal_set_prototype_of(&mut agent, Some(b.into())).unwrap());
        assert!(a.internal_prevent_extensions(&mut agent).unwrap());
        // Non-extensible objects only accept their current prototype.
        assert!(a.internal_set_prototype_of(&mut agent, None).unwrap());
        let c = OrdinaryObject::create(&mut agent, None);
        assert!(!a.internal_set_prototype_of(&mut agent, Some(c.into())).unwrap());
    }
}
