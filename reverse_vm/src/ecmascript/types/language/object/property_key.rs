// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    SmallInteger,
    ecmascript::{execution::Agent, types::String},
};

/// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
///
/// Property keys in canonical form: any String that is the canonical
/// rendering of a safe integer is stored as [`PropertyKey::Integer`]. This
/// keeps `"3"` and `3` the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Integer(SmallInteger),
    String(String),
}

/// Largest valid array index, 2^32 - 2.
pub(crate) const MAX_ARRAY_INDEX: u32 = u32::MAX - 1;

impl PropertyKey {
    pub fn from_str(agent: &mut Agent, str: &str) -> Self {
        if let Some(integer) = parse_canonical_integer(str) {
            return PropertyKey::Integer(integer);
        }
        PropertyKey::String(String::from_str(agent, str))
    }

    /// Property key of `ToString(𝔽(value))`.
    pub fn from_f64(agent: &mut Agent, value: f64) -> Self {
        if value == 0.0 {
            // Both +0 and -0 stringify as "0".
            return PropertyKey::Integer(SmallInteger::zero());
        }
        if let Ok(integer) = SmallInteger::try_from(value) {
            return PropertyKey::Integer(integer);
        }
        let mut buffer = ryu_js::Buffer::new();
        let str = buffer.format(value);
        PropertyKey::String(String::from_str(agent, str))
    }

    /// Returns the key as an array index, if it is one.
    pub fn as_array_index(self) -> Option<u32> {
        match self {
            PropertyKey::Integer(integer) => u32::try_from(integer.into_i64())
                .ok()
                .filter(|index| *index <= MAX_ARRAY_INDEX),
            PropertyKey::String(_) => None,
        }
    }

    pub fn display(self, agent: &Agent) -> std::string::String {
        match self {
            PropertyKey::Integer(integer) => integer.to_string(),
            PropertyKey::String(string) => string.as_str(agent).to_owned(),
        }
    }
}

fn parse_canonical_integer(str: &str) -> Option<SmallInteger> {
    let integer = str.parse::<i64>().ok()?;
    // Reject "+1", "01", "-0" and friends: only the exact output of
    // Number::toString maps to an integer key.
    if integer.to_string() != str {
        return None;
    }
    SmallInteger::try_from(integer).ok()
}

impl From<SmallInteger> for PropertyKey {
    fn from(value: SmallInteger) -> Self {
        PropertyKey::Integer(value)
    }
}

impl From<u32> for PropertyKey {
    fn from(value: u32) -> Self {
        PropertyKey::Integer(value.into())
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        PropertyKey::String(value)
    }
}
