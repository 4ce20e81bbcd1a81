// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ahash::AHashMap;

use crate::{
    ecmascript::{
        builtins::ordinary::OrdinaryObject,
        types::{DataProperty, Object, Value},
    },
    heap::element_array::ElementStorage,
};

/// Attributes of an element that differ from the default
/// writable, enumerable and configurable triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ElementAttributes {
    pub(crate) writable: bool,
    pub(crate) enumerable: bool,
    pub(crate) configurable: bool,
}

impl ElementAttributes {
    pub(crate) const DEFAULT: Self = Self {
        writable: true,
        enumerable: true,
        configurable: true,
    };

    pub(crate) fn with_value(self, value: Value) -> DataProperty {
        DataProperty {
            value,
            writable: self.writable,
            enumerable: self.enumerable,
            configurable: self.configurable,
        }
    }
}

impl From<DataProperty> for ElementAttributes {
    fn from(property: DataProperty) -> Self {
        Self {
            writable: property.writable,
            enumerable: property.enumerable,
            configurable: property.configurable,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArrayHeapData {
    pub(crate) elements: ElementStorage,
    /// Per-element attributes; only elements with non-default attributes
    /// have an entry.
    pub(crate) descriptors: Option<AHashMap<u32, ElementAttributes>>,
    pub(crate) len_writable: bool,
    pub(crate) extensible: bool,
    pub(crate) prototype: Option<Object>,
    /// Holds every own property that is neither an element nor `length`.
    pub(crate) backing_object: Option<OrdinaryObject>,
}

impl ArrayHeapData {
    pub(crate) fn new(elements: ElementStorage) -> Self {
        Self {
            elements,
            descriptors: None,
            len_writable: true,
            extensible: true,
            prototype: None,
            backing_object: None,
        }
    }

    pub(crate) fn element_attributes(&self, index: u32) -> ElementAttributes {
        self.descriptors
            .as_ref()
            .and_then(|descriptors| descriptors.get(&index).copied())
            .unwrap_or(ElementAttributes::DEFAULT)
    }

    pub(crate) fn set_element_attributes(&mut self, index: u32, attributes: ElementAttributes) {
        if attributes == ElementAttributes::DEFAULT {
            if let Some(descriptors) = &mut self.descriptors {
                descriptors.remove(&index);
                if descriptors.is_empty() {
                    self.descriptors = None;
                }
            }
        } else {
            self.descriptors
                .get_or_insert_with(AHashMap::default)
                .insert(index, attributes);
        }
    }

    /// Drops the attributes of every element at or past `len`.
    pub(crate) fn truncate_descriptors(&mut self, len: u32) {
        if let Some(descriptors) = &mut self.descriptors {
            descriptors.retain(|index, _| *index < len);
            if descriptors.is_empty() {
                self.descriptors = None;
            }
        }
    }
}
