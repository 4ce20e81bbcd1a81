// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.1 Type Conversion](https://tc39.es/ecma262/#sec-type-conversion)
//!
//! The ECMAScript language implicitly performs automatic type conversion as
//! needed. To clarify the semantics of certain constructs it is useful to
//! define a set of conversion abstract operations. The conversion abstract
//! operations are polymorphic; they can accept a value of any ECMAScript
//! language type. But no other specification types are used with these
//! operations.

use num_traits::ToPrimitive;

use crate::{
    ecmascript::{
        builtins::ordinary::{ObjectHeapData, OrdinaryObject},
        execution::{Agent, ExceptionType, JsResult},
        types::{BUILTIN_STRING_MEMORY, DataProperty, Object, PropertyKey, String, Value},
    },
    heap::CreateHeapData,
};

/// ### [7.1.4 ToNumber ( argument )](https://tc39.es/ecma262/#sec-tonumber)
///
/// Objects have no callable `valueOf` or `toString` in this engine, so
/// converting one to a Number always throws a TypeError.
pub fn to_number(agent: &mut Agent, argument: Value) -> JsResult<f64> {
    match argument {
        // 2. If argument is either a Symbol or a BigInt, throw a TypeError exception.
        // 3. If argument is undefined, return NaN.
        Value::Undefined => Ok(f64::NAN),
        // 4. If argument is either null or false, return +0𝔽.
        Value::Null | Value::Boolean(false) => Ok(0.0),
        // 5. If argument is true, return 1𝔽.
        Value::Boolean(true) => Ok(1.0),
        // 6. If argument is a String, return StringToNumber(argument).
        Value::String(string) => Ok(string_to_number(string.as_str(agent))),
        // 1. If argument is a Number, return argument.
        Value::Integer(integer) => Ok(integer.into_f64()),
        Value::Number(number) => Ok(number),
        // 7. Assert: argument is an Object.
        // 8. Let primValue be ? ToPrimitive(argument, NUMBER).
        Value::Object(_) | Value::Array(_) | Value::Proxy(_) | Value::Error(_) => Err(agent
            .throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Cannot convert object to primitive value",
            )),
    }
}

/// ### [12.2 White Space](https://tc39.es/ecma262/#sec-white-space)
/// ### [12.3 Line Terminators](https://tc39.es/ecma262/#sec-line-terminators)
///
/// WhiteSpace and LineTerminator code points, which StringToNumber trims.
/// The USP entries are the Unicode "Space_Separator" (Zs) code points.
fn is_trimmable_whitespace(c: char) -> bool {
    matches!(
        c,
        // <TAB>, <LF>, <VT>, <FF>, <CR>
        '\u{0009}'..='\u{000D}'
            // <SP>, <NBSP>
            | '\u{0020}'
            | '\u{00A0}'
            // <USP>
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            // <LS>, <PS>
            | '\u{2028}'
            | '\u{2029}'
            // <ZWNBSP>
            | '\u{FEFF}'
    )
}

/// ### [7.1.4.1.1 StringToNumber ( str )](https://tc39.es/ecma262/#sec-stringtonumber)
pub(crate) fn string_to_number(str: &str) -> f64 {
    let trimmed = str.trim_matches(is_trimmable_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // NonDecimalIntegerLiteral; no sign allowed.
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        let mut result = 0.0f64;
        for c in digits.chars() {
            let Some(digit) = c.to_digit(radix) else {
                return f64::NAN;
            };
            result = result * f64::from(radix) + f64::from(digit);
        }
        return result;
    }
    // fast_float also accepts "inf" and "nan" spellings, which are not
    // StrDecimalLiterals.
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    fast_float::parse::<f64, _>(trimmed).unwrap_or(f64::NAN)
}

/// ### [7.1.5 ToIntegerOrInfinity ( argument )](https://tc39.es/ecma262/#sec-tointegerorinfinity)
pub fn to_integer_or_infinity(agent: &mut Agent, argument: Value) -> JsResult<f64> {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    // 2. If number is one of NaN, +0𝔽, or -0𝔽, return 0.
    if number.is_nan() || number == 0.0 {
        return Ok(0.0);
    }
    // 3. If number is +∞𝔽, return +∞.
    // 4. If number is -∞𝔽, return -∞.
    // 5. Return truncate(ℝ(number)).
    Ok(number.trunc())
}

/// ### [7.1.7 ToUint32 ( argument )](https://tc39.es/ecma262/#sec-touint32)
pub fn to_uint32(agent: &mut Agent, argument: Value) -> JsResult<u32> {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    // 2. If number is not finite or number is either +0𝔽 or -0𝔽, return +0𝔽.
    if !number.is_finite() || number == 0.0 {
        return Ok(0);
    }
    // 3. Let int be truncate(ℝ(number)).
    // 4. Let int32bit be int modulo 2^32.
    // 5. Return 𝔽(int32bit).
    let int = number.trunc();
    let int32bit = int.rem_euclid(4294967296.0);
    Ok(int32bit.to_u32().unwrap_or(0))
}

/// ### [7.1.20 ToLength ( argument )](https://tc39.es/ecma262/#sec-tolength)
pub fn to_length(agent: &mut Agent, argument: Value) -> JsResult<f64> {
    // 1. Let len be ? ToIntegerOrInfinity(argument).
    let len = to_integer_or_infinity(agent, argument)?;
    // 2. If len ≤ 0, return +0𝔽.
    if len <= 0.0 {
        return Ok(0.0);
    }
    // 3. Return 𝔽(min(len, 2^53 - 1)).
    Ok(len.min(9007199254740991.0))
}

/// ### [7.1.18 ToObject ( argument )](https://tc39.es/ecma262/#sec-toobject)
///
/// The abstract operation ToObject takes argument argument (an ECMAScript
/// language value) and returns either a normal completion containing an Object
/// or a throw completion. It converts argument to a value of type Object
/// according to [Table 13](https://tc39.es/ecma262/#table-toobject-conversions):
pub fn to_object(agent: &mut Agent, argument: Value) -> JsResult<Object> {
    match argument {
        // Throw a TypeError exception.
        Value::Undefined | Value::Null => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert undefined or null to object",
        )),
        // Return a new Boolean object whose [[BooleanData]] internal slot is set to argument.
        // Return a new Number object whose [[NumberData]] internal slot is set to argument.
        Value::Boolean(_) | Value::Integer(_) | Value::Number(_) => {
            Ok(OrdinaryObject::create(agent, None).into())
        }
        // Return a new String object whose [[StringData]] internal slot is set to argument.
        Value::String(string) => Ok(create_string_wrapper(agent, string).into()),
        Value::Object(object) => Ok(object.into()),
        Value::Array(array) => Ok(array.into()),
        Value::Proxy(proxy) => Ok(proxy.into()),
        Value::Error(error) => Ok(error.into()),
    }
}

/// ### [10.4.3.4 StringCreate ( value, prototype )](https://tc39.es/ecma262/#sec-stringcreate)
///
/// String exotic objects are modelled as ordinary objects carrying one
/// read-only, enumerable property per UTF-16 code unit plus a read-only
/// `length`. Surrogate code units are stored as U+FFFD.
fn create_string_wrapper(agent: &mut Agent, string: String) -> OrdinaryObject {
    let code_units = string.as_str(agent).encode_utf16().collect::<Vec<_>>();
    let mut data = ObjectHeapData::new(None);
    for (index, unit) in code_units.iter().copied().enumerate() {
        let unit_string = std::string::String::from_utf16_lossy(&[unit]);
        let value = Value::from_str(agent, &unit_string);
        data.insert(
            PropertyKey::from(index as u32),
            DataProperty {
                writable: false,
                configurable: false,
                ..DataProperty::new(value)
            },
        );
    }
    data.insert(
        PropertyKey::String(BUILTIN_STRING_MEMORY.length),
        DataProperty {
            value: Value::from(code_units.len() as u32),
            writable: false,
            enumerable: false,
            configurable: false,
        },
    );
    agent.heap.create(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::{execution::Options, types::InternalMethods};

    #[test]
    fn string_to_number_grammar() {
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("  \n42\t"), 42.0);
        assert_eq!(string_to_number("-1.5e3"), -1500.0);
        assert_eq!(string_to_number(".5"), 0.5);
        assert_eq!(string_to_number("0x1F"), 31.0);
        assert_eq!(string_to_number("0b101"), 5.0);
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
        assert!(string_to_number("inf").is_nan());
        assert!(string_to_number("NaN").is_nan());
        assert!(string_to_number("-0x10").is_nan());
        assert!(string_to_number("12px").is_nan());
    }

    #[test]
    fn string_to_number_trims_only_ecmascript_whitespace() {
        assert_eq!(string_to_number("\u{3000}5\u{2029}"), 5.0);
        assert_eq!(string_to_number("\u{FEFF}\u{A0}5\u{B}\u{C}"), 5.0);
        // NEL is Unicode whitespace but neither WhiteSpace nor LineTerminator.
        assert!(string_to_number("\u{85}5").is_nan());
        assert!(string_to_number("5\u{180E}").is_nan());
        let mut agent = Agent::new(Options::default());
        let length = Value::from_str(&mut agent, "\u{85}5");
        assert_eq!(to_length(&mut agent, length).unwrap(), 0.0);
    }

    #[test]
    fn to_length_clamps() {
        let mut agent = Agent::new(Options::default());
        assert_eq!(to_length(&mut agent, Value::from_f64(-3.0)).unwrap(), 0.0);
        assert_eq!(to_length(&mut agent, Value::nan()).unwrap(), 0.0);
        assert_eq!(to_length(&mut agent, Value::from_f64(2.9)).unwrap(), 2.0);
        assert_eq!(
            to_length(&mut agent, Value::Number(f64::INFINITY)).unwrap(),
            9007199254740991.0
        );
        let string = Value::from_str(&mut agent, "7");
        assert_eq!(to_length(&mut agent, string).unwrap(), 7.0);
    }

    #[test]
    fn to_uint32_wraps() {
        let mut agent = Agent::new(Options::default());
        assert_eq!(to_uint32(&mut agent, Value::from_f64(-1.0)).unwrap(), u32::MAX);
        assert_eq!(to_uint32(&mut agent, Value::from_f64(4294967296.0)).unwrap(), 0);
        assert_eq!(to_uint32(&mut agent, Value::from_f64(3.7)).unwrap(), 3);
        assert_eq!(to_uint32(&mut agent, Value::Number(f64::NAN)).unwrap(), 0);
    }

    #[test]
    fn to_object_wraps_primitives() {
        let mut agent = Agent::new(Options::default());
        let error = to_object(&mut agent, Value::Undefined).unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
        let string = Value::from_str(&mut agent, "ab");
        let object = to_object(&mut agent, string).unwrap();
        let length = object
            .internal_get(
                &mut agent,
                PropertyKey::String(BUILTIN_STRING_MEMORY.length),
                object.into_value(),
            )
            .unwrap();
        assert_eq!(length, Value::from(2));
        let first = object
            .internal_get(&mut agent, 0u32.into(), object.into_value())
            .unwrap();
        assert_eq!(first, Value::from_str(&mut agent, "a"));
        assert!(
            !object
                .internal_set(&mut agent, 0u32.into(), Value::Null, object.into_value())
                .unwrap()
        );
        let to_number_error = to_number(&mut agent, object.into_value()).unwrap_err();
        assert_eq!(to_number_error.kind(&agent), Some(ExceptionType::TypeError));
    }
}
