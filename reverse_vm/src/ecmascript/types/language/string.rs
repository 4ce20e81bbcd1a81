// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::Index;

use crate::{
    ecmascript::execution::Agent,
    heap::indexes::StringIndex,
};

/// ### [6.1.4 The String Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-string-type)
///
/// Strings are interned on the heap, so two Strings with equal contents are
/// always the same String.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct String(pub(crate) StringIndex);

#[derive(Debug, Clone)]
pub struct StringHeapData {
    pub(crate) data: Box<str>,
}

impl String {
    pub fn from_str(agent: &mut Agent, str: &str) -> Self {
        agent.heap.intern_str(str)
    }

    pub fn as_str(self, agent: &Agent) -> &str {
        &agent[self].data
    }

    pub fn len(self, agent: &Agent) -> usize {
        self.as_str(agent).encode_utf16().count()
    }

    pub fn is_empty(self, agent: &Agent) -> bool {
        self.as_str(agent).is_empty()
    }
}

impl Index<String> for Agent {
    type Output = StringHeapData;

    fn index(&self, index: String) -> &Self::Output {
        &self.heap.strings[index.0.into_index()]
    }
}

/// Strings the engine itself needs, interned in this order when the heap is
/// created.
pub(crate) const BUILTIN_STRINGS_LIST: [&str; 3] = ["length", "message", "name"];

pub struct BuiltinStrings {
    pub length: String,
    pub message: String,
    pub name: String,
}

pub const BUILTIN_STRING_MEMORY: BuiltinStrings = BuiltinStrings {
    length: String(StringIndex::from_u32_index(0)),
    message: String(StringIndex::from_u32_index(1)),
    name: String(StringIndex::from_u32_index(2)),
};
