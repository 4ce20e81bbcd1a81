// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{
                delete_property_or_throw, get, has_property, length_of_array_like, set,
            },
            type_conversion::to_object,
        },
        builtins::ArgumentsList,
        execution::{Agent, JsResult},
        types::{Object, PropertyKey, Value},
    },
    heap::ElementsRepresentation,
};

pub struct ArrayPrototype;

impl ArrayPrototype {
    /// ### [23.1.3.26 Array.prototype.reverse ( )](https://tc39.es/ecma262/#sec-array.prototype.reverse)
    ///
    /// This method rearranges the elements of the array so as to reverse
    /// their order. It returns the object as the result of the call.
    ///
    /// > ### Note
    /// >
    /// > This method is intentionally generic; it does not require that its
    /// > this value be an Array. Therefore it can be transferred to other
    /// > kinds of objects for use as a method.
    pub fn reverse(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = to_object(agent, this_value)?;
        if let Object::Array(array) = o {
            if !agent.options.disable_array_fast_paths {
                // Fast path: the elements are packed and carry no
                // descriptors, so no property lookups can observe the swaps.
                let representation = array.packed_representation(agent);
                if representation != ElementsRepresentation::Ineligible {
                    let len = array.len(agent);
                    if agent.options.print_internals {
                        eprintln!(
                            "Array.prototype.reverse: packed fast path ({representation:?}, {len} elements)"
                        );
                    }
                    let reversed = agent[array].elements.reverse_packed(representation);
                    debug_assert!(reversed);
                    return Ok(o.into_value());
                }
            }
        }
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = length_of_array_like(agent, o)?;
        if agent.options.print_internals {
            eprintln!("Array.prototype.reverse: generic path (length {len})");
        }
        reverse_generic(agent, o, len)?;
        // 6. Return O.
        Ok(o.into_value())
    }
}

/// Steps 3 to 5 of Array.prototype.reverse, run against any object through
/// its internal methods.
///
/// Each iteration re-reads presence and values from the live object. Only the
/// cursors and `len` carry over between iterations, so traps are free to
/// mutate the object mid-way. An error leaves every completed swap in place.
pub(crate) fn reverse_generic(agent: &mut Agent, o: Object, len: f64) -> JsResult<()> {
    // 3. Let middle be floor(len / 2).
    // 4. Let lower be 0.
    let mut lower = 0.0f64;
    let mut upper = len - 1.0;
    // 5. Repeat, while lower ≠ middle,
    while lower < upper {
        // a. Let upper be len - lower - 1.
        // b. Let upperP be ! ToString(𝔽(upper)).
        let upper_p = PropertyKey::from_f64(agent, upper);
        // c. Let lowerP be ! ToString(𝔽(lower)).
        let lower_p = PropertyKey::from_f64(agent, lower);
        // d. Let lowerExists be ? HasProperty(O, lowerP).
        let lower_exists = has_property(agent, o, lower_p)?;
        // e. If lowerExists is true, then
        //    i. Let lowerValue be ? Get(O, lowerP).
        let lower_value = if lower_exists {
            Some(get(agent, o, lower_p)?)
        } else {
            None
        };
        // f. Let upperExists be ? HasProperty(O, upperP).
        let upper_exists = has_property(agent, o, upper_p)?;
        // g. If upperExists is true, then
        //    i. Let upperValue be ? Get(O, upperP).
        let upper_value = if upper_exists {
            Some(get(agent, o, upper_p)?)
        } else {
            None
        };
        match (lower_value, upper_value) {
            // h. If lowerExists is true and upperExists is true, then
            (Some(lower_value), Some(upper_value)) => {
                // i. Perform ? Set(O, lowerP, upperValue, true).
                set(agent, o, lower_p, upper_value, true)?;
                // ii. Perform ? Set(O, upperP, lowerValue, true).
                set(agent, o, upper_p, lower_value, true)?;
            }
            // i. Else if lowerExists is false and upperExists is true, then
            (None, Some(upper_value)) => {
                // i. Perform ? Set(O, lowerP, upperValue, true).
                set(agent, o, lower_p, upper_value, true)?;
                // ii. Perform ? DeletePropertyOrThrow(O, upperP).
                delete_property_or_throw(agent, o, upper_p)?;
            }
            // j. Else if lowerExists is true and upperExists is false, then
            (Some(lower_value), None) => {
                // i. Perform ? DeletePropertyOrThrow(O, lowerP).
                delete_property_or_throw(agent, o, lower_p)?;
                // ii. Perform ? Set(O, upperP, lowerValue, true).
                set(agent, o, upper_p, lower_value, true)?;
            }
            // k. Else,
            //    i. Assert: lowerExists and upperExists are both false.
            //    ii. NOTE: No action is required.
            (None, None) => {}
        }
        // l. Set lower to lower + 1.
        lower += 1.0;
        upper -= 1.0;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ecmascript::{
            builtins::{Array, ordinary::OrdinaryObject},
            execution::{ExceptionType, Options},
            types::{BUILTIN_STRING_MEMORY, InternalMethods},
        },
        heap::ElementsKind,
    };

    fn ints(values: &[i32]) -> Vec<Value> {
        values.iter().map(|v| Value::from(*v)).collect()
    }

    #[test]
    fn fast_path_reverses_in_place() {
        let mut agent = Agent::new(Options::default());
        let array = Array::from_slice(&mut agent, &ints(&[1, 2, 3, 4, 5]));
        let result =
            ArrayPrototype::reverse(&mut agent, array.into_value(), ArgumentsList::default())
                .unwrap();
        assert_eq!(result, array.into_value());
        assert_eq!(array.elements_kind(&agent), ElementsKind::PackedSmi);
        assert_eq!(
            array.to_vec(&agent),
            ints(&[5, 4, 3, 2, 1]).into_iter().map(Some).collect::<Vec<_>>()
        );
    }

    #[test]
    fn generic_path_moves_holes() {
        let mut agent = Agent::new(Options::default());
        let array = Array::from_elements(
            &mut agent,
            &[Some(Value::from(1)), None, Some(Value::from(3)), None],
        );
        ArrayPrototype::reverse(&mut agent, array.into_value(), ArgumentsList::default())
            .unwrap();
        assert_eq!(
            array.to_vec(&agent),
            vec![None, Some(Value::from(3)), None, Some(Value::from(1))]
        );
        assert_eq!(array.len(&agent), 4);
    }

    #[test]
    fn array_likes_are_reversed_through_properties() {
        let mut agent = Agent::new(Options::default());
        let object = OrdinaryObject::create(&mut agent, None);
        let length = PropertyKey::String(BUILTIN_STRING_MEMORY.length);
        for (key, value) in [(0u32, 10), (2, 30)] {
            set(&mut agent, object, key.into(), Value::from(value), true).unwrap();
        }
        set(&mut agent, object, length, Value::from(3), true).unwrap();
        ArrayPrototype::reverse(&mut agent, object.into_value(), ArgumentsList::default())
            .unwrap();
        assert_eq!(
            get(&mut agent, object, 0u32.into()).unwrap(),
            Value::from(30)
        );
        assert_eq!(
            get(&mut agent, object, 2u32.into()).unwrap(),
            Value::from(10)
        );
        assert!(!object.internal_has_property(&mut agent, 1u32.into()).unwrap());
    }

    #[test]
    fn undefined_receiver_throws() {
        let mut agent = Agent::new(Options::default());
        let error = ArrayPrototype::reverse(&mut agent, Value::Undefined, ArgumentsList::default())
            .unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    }

    #[test]
    fn lone_lower_element_moves_to_the_mirror_index() {
        let mut agent = Agent::new(Options::default());
        let object = OrdinaryObject::create(&mut agent, None);
        set(&mut agent, object, 0u32.into(), Value::from(1), true).unwrap();
        reverse_generic(&mut agent, object.into(), 2.0).unwrap();
        assert!(!object.internal_has_property(&mut agent, 0u32.into()).unwrap());
        assert_eq!(get(&mut agent, object, 1u32.into()).unwrap(), Value::from(1));
    }
}
