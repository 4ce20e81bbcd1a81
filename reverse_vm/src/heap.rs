// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub(crate) mod element_array;
pub mod indexes;

use ahash::AHashMap;

pub use element_array::{ElementsKind, ElementsRepresentation};

use self::indexes::{ArrayIndex, ErrorIndex, ObjectIndex, ProxyIndex, StringIndex};
use crate::ecmascript::{
    builtins::{
        Array, ArrayHeapData,
        error::{Error, ErrorHeapData},
        ordinary::{ObjectHeapData, OrdinaryObject},
        proxy::{Proxy, ProxyHeapData},
    },
    types::{BUILTIN_STRINGS_LIST, String, StringHeapData},
};

/// Owner of all heap-allocated engine data.
///
/// Every kind of heap data lives in its own vector and is addressed through
/// a typed index. Nothing is ever freed: this engine has no garbage
/// collector.
#[derive(Debug)]
pub struct Heap {
    pub(crate) arrays: Vec<ArrayHeapData>,
    pub(crate) errors: Vec<ErrorHeapData>,
    pub(crate) objects: Vec<ObjectHeapData>,
    pub(crate) proxies: Vec<ProxyHeapData>,
    pub(crate) strings: Vec<StringHeapData>,
    string_lookup: AHashMap<Box<str>, StringIndex>,
}

pub trait CreateHeapData<T, F> {
    /// Creates a [`Value`](crate::ecmascript::types::Value) from the given
    /// data. Allocating the data is **not** guaranteed.
    fn create(&mut self, data: T) -> F;
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    pub fn new() -> Heap {
        let mut heap = Heap {
            arrays: Vec::with_capacity(64),
            errors: Vec::with_capacity(16),
            objects: Vec::with_capacity(64),
            proxies: Vec::new(),
            strings: Vec::with_capacity(BUILTIN_STRINGS_LIST.len() + 64),
            string_lookup: AHashMap::with_capacity(BUILTIN_STRINGS_LIST.len() + 64),
        };
        for builtin_string in BUILTIN_STRINGS_LIST {
            heap.intern_str(builtin_string);
        }
        heap
    }

    /// Returns the interned heap string with the given contents, allocating
    /// it if it does not exist yet.
    pub(crate) fn intern_str(&mut self, data: &str) -> String {
        if let Some(index) = self.string_lookup.get(data) {
            return String(*index);
        }
        self.strings.push(StringHeapData {
            data: data.into(),
        });
        let index = StringIndex::last(&self.strings);
        self.string_lookup.insert(data.into(), index);
        String(index)
    }
}

impl CreateHeapData<ArrayHeapData, Array> for Heap {
    fn create(&mut self, data: ArrayHeapData) -> Array {
        self.arrays.push(data);
        Array(ArrayIndex::last(&self.arrays))
    }
}

impl CreateHeapData<ErrorHeapData, Error> for Heap {
    fn create(&mut self, data: ErrorHeapData) -> Error {
        self.errors.push(data);
        Error(ErrorIndex::last(&self.errors))
    }
}

impl CreateHeapData<ObjectHeapData, OrdinaryObject> for Heap {
    fn create(&mut self, data: ObjectHeapData) -> OrdinaryObject {
        self.objects.push(data);
        OrdinaryObject(ObjectIndex::last(&self.objects))
    }
}

impl CreateHeapData<ProxyHeapData, Proxy> for Heap {
    fn create(&mut self, data: ProxyHeapData) -> Proxy {
        self.proxies.push(data);
        Proxy(ProxyIndex::last(&self.proxies))
    }
}
