// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::testing_and_comparison::same_value, types::Value,
};

/// ### [6.2.6 The Property Descriptor Specification Type](https://tc39.es/ecma262/#sec-property-descriptor-specification-type)
///
/// Only data descriptors exist in this engine; there are no accessor
/// properties.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropertyDescriptor {
    /// \[\[Value]]
    pub value: Option<Value>,

    /// \[\[Writable]]
    pub writable: Option<bool>,

    /// \[\[Enumerable]]
    pub enumerable: Option<bool>,

    /// \[\[Configurable]]
    pub configurable: Option<bool>,
}

impl PropertyDescriptor {
    /// A writable, enumerable and configurable data property.
    pub fn new_data_descriptor(value: Value) -> Self {
        Self {
            value: Some(value),
            writable: Some(true),
            enumerable: Some(true),
            configurable: Some(true),
        }
    }
}

/// A fully populated own data property, as stored on the heap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DataProperty {
    pub(crate) value: Value,
    pub(crate) writable: bool,
    pub(crate) enumerable: bool,
    pub(crate) configurable: bool,
}

impl DataProperty {
    pub(crate) fn new(value: Value) -> Self {
        Self {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    pub(crate) fn to_descriptor(self) -> PropertyDescriptor {
        PropertyDescriptor {
            value: Some(self.value),
            writable: Some(self.writable),
            enumerable: Some(self.enumerable),
            configurable: Some(self.configurable),
        }
    }
}

/// ### [10.1.6.3 ValidateAndApplyPropertyDescriptor ( O, P, extensible, Desc, current )](https://tc39.es/ecma262/#sec-validateandapplypropertydescriptor)
///
/// Returns the property as it should be stored after applying `desc`, or
/// None if the definition must be rejected.
pub(crate) fn validate_and_apply_property_descriptor(
    extensible: bool,
    desc: PropertyDescriptor,
    current: Option<DataProperty>,
) -> Option<DataProperty> {
    // 2. If current is undefined, then
    let Some(current) = current else {
        // a. If extensible is false, return false.
        if !extensible {
            return None;
        }
        // c. Create an own data property; absent fields default to false.
        return Some(DataProperty {
            value: desc.value.unwrap_or(Value::Undefined),
            writable: desc.writable.unwrap_or(false),
            enumerable: desc.enumerable.unwrap_or(false),
            configurable: desc.configurable.unwrap_or(false),
        });
    };
    // 5. If current.[[Configurable]] is false, then
    if !current.configurable {
        // a. If Desc has a [[Configurable]] field and Desc.[[Configurable]] is true, return false.
        if desc.configurable == Some(true) {
            return None;
        }
        // b. If Desc has an [[Enumerable]] field and SameValue(Desc.[[Enumerable]], current.[[Enumerable]]) is false, return false.
        if desc.enumerable.is_some_and(|enumerable| enumerable != current.enumerable) {
            return None;
        }
        // e. Else if current.[[Writable]] is false, then
        if !current.writable {
            // i. If Desc has a [[Writable]] field and Desc.[[Writable]] is true, return false.
            if desc.writable == Some(true) {
                return None;
            }
            // ii. If Desc has a [[Value]] field, return SameValue(Desc.[[Value]], current.[[Value]]).
            if desc
                .value
                .is_some_and(|value| !same_value(value, current.value))
            {
                return None;
            }
        }
    }
    // 6. Set the fields of the property to the fields present in Desc.
    Some(DataProperty {
        value: desc.value.unwrap_or(current.value),
        writable: desc.writable.unwrap_or(current.writable),
        enumerable: desc.enumerable.unwrap_or(current.enumerable),
        configurable: desc.configurable.unwrap_or(current.configurable),
    })
}
