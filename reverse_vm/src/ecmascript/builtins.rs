// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [10 Ordinary and Exotic Objects Behaviours](https://tc39.es/ecma262/#sec-ordinary-and-exotic-objects-behaviours)
//!
//! ## [20 Fundamental Objects](https://tc39.es/ecma262/#sec-fundamental-objects)

pub mod array;
pub mod error;
pub mod indexed_collections;
pub mod ordinary;
pub mod proxy;

pub use array::{Array, ArrayHeapData};
pub use indexed_collections::array_objects::array_prototype::ArrayPrototype;

use crate::ecmascript::types::Value;

/// The arguments a builtin function was called with.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentsList<'a>(pub &'a [Value]);
