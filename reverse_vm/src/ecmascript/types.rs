// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod language;
mod spec;

pub use language::{
    BUILTIN_STRING_MEMORY, InternalMethods, Object, PropertyKey, String, Value,
};
pub(crate) use language::{BUILTIN_STRINGS_LIST, StringHeapData};
pub use spec::PropertyDescriptor;
pub(crate) use spec::{DataProperty, validate_and_apply_property_descriptor};
