// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [6.2 ECMAScript Specification Types](https://tc39.es/ecma262/#sec-ecmascript-specification-types)

mod property_descriptor;

pub(crate) use property_descriptor::{DataProperty, validate_and_apply_property_descriptor};
pub use property_descriptor::PropertyDescriptor;
