// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::type_conversion::{to_number, to_uint32},
    builtins::Array,
    execution::{Agent, ExceptionType, JsResult},
    types::PropertyDescriptor,
};

/// ### [10.4.2.4 ArraySetLength ( A, Desc )](https://tc39.es/ecma262/#sec-arraysetlength)
///
/// The abstract operation ArraySetLength takes arguments A (an Array) and
/// Desc (a Property Descriptor) and returns either a normal completion
/// containing a Boolean or a throw completion.
pub(crate) fn array_set_length(
    agent: &mut Agent,
    a: Array,
    desc: PropertyDescriptor,
) -> JsResult<bool> {
    // 1. If Desc does not have a [[Value]] field, then
    let Some(desc_value) = desc.value else {
        // a. Return ! OrdinaryDefineOwnProperty(A, "length", Desc).
        if desc.configurable == Some(true) || desc.enumerable == Some(true) {
            return Ok(false);
        }
        let array_heap_data = &mut agent[a];
        if !array_heap_data.len_writable {
            // Length is already frozen.
            return Ok(desc.writable != Some(true));
        }
        if desc.writable == Some(false) {
            array_heap_data.len_writable = false;
        }
        return Ok(true);
    };
    // 2. Let newLenDesc be a copy of Desc.
    // 13. If newLenDesc does not have a [[Writable]] field or newLenDesc.[[Writable]] is true, then
    // a. Let newWritable be true.
    let new_writable = desc.writable.unwrap_or(true);
    // 3. Let newLen be ? ToUint32(Desc.[[Value]]).
    let new_len = to_uint32(agent, desc_value)?;
    // 4. Let numberLen be ? ToNumber(Desc.[[Value]]).
    let number_len = to_number(agent, desc_value)?;
    // 5. If SameValueZero(newLen, numberLen) is false, throw a RangeError exception.
    if f64::from(new_len) != number_len {
        return Err(
            agent.throw_exception_with_static_message(ExceptionType::RangeError, "Invalid array length")
        );
    }
    // 15. Let succeeded be ! OrdinaryDefineOwnProperty(A, "length", newLenDesc).
    // 16. If succeeded is false, return false.
    if desc.configurable == Some(true) || desc.enumerable == Some(true) {
        return Ok(false);
    }
    let array_heap_data = &mut agent[a];
    // 7. Let oldLenDesc be OrdinaryGetOwnProperty(A, "length").
    // 10. Let oldLen be oldLenDesc.[[Value]].
    let old_len = array_heap_data.elements.len();
    // 12. If oldLenDesc.[[Writable]] is false, return false.
    if !array_heap_data.len_writable {
        return Ok(new_len == old_len && desc.writable != Some(true));
    }
    // 11. If newLen ≥ oldLen, then
    if new_len >= old_len {
        // a. Return ! OrdinaryDefineOwnProperty(A, "length", newLenDesc).
        if new_len > old_len {
            array_heap_data.elements.set_len(new_len);
        }
        array_heap_data.len_writable = new_writable;
        return Ok(true);
    }
    // 17. For each own property key P of A such that P is an array index and
    //     ! ToUint32(P) ≥ newLen, in descending numeric index order, do
    let doomed = array_heap_data
        .elements
        .present_indexes()
        .into_iter()
        .rev()
        .take_while(|index| *index >= new_len)
        .collect::<Vec<_>>();
    for index in doomed {
        // a. Let deleteSucceeded be ! A.[[Delete]](P).
        // b. If deleteSucceeded is false, then
        if !array_heap_data.element_attributes(index).configurable {
            // i. Set newLenDesc.[[Value]] to ! ToUint32(P) + 1𝔽.
            array_heap_data.elements.set_len(index + 1);
            array_heap_data.truncate_descriptors(index + 1);
            // ii. If newWritable is false, set newLenDesc.[[Writable]] to false.
            if !new_writable {
                array_heap_data.len_writable = false;
            }
            // iv. Return false.
            return Ok(false);
        }
    }
    array_heap_data.elements.set_len(new_len);
    array_heap_data.truncate_descriptors(new_len);
    // 18. If newWritable is false, then
    if !new_writable {
        // a. Set succeeded to ! OrdinaryDefineOwnProperty(A, "length", PropertyDescriptor { [[Writable]]: false }).
        array_heap_data.len_writable = false;
    }
    // 19. Return true.
    Ok(true)
}
