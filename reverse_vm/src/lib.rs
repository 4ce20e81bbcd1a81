// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A small ECMAScript object model built around `Array.prototype.reverse`.
//!
//! Packed arrays are reversed with a representation-specialised in-place
//! swap; everything else goes through the trap-driven generic algorithm of
//! [23.1.3.26 Array.prototype.reverse](https://tc39.es/ecma262/#sec-array.prototype.reverse).

pub mod ecmascript;
pub mod engine;
pub mod heap;

pub use engine::small_integer::SmallInteger;
