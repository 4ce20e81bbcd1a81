// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.2 Testing and Comparison Operations](https://tc39.es/ecma262/#sec-testing-and-comparison-operations)

use crate::ecmascript::types::Value;

/// ### [7.2.9 SameValue ( x, y )](https://tc39.es/ecma262/#sec-samevalue)
///
/// The abstract operation SameValue takes arguments x (an ECMAScript language
/// value) and y (an ECMAScript language value) and returns a Boolean. It
/// determines whether or not the two arguments are the same value.
pub(crate) fn same_value(x: Value, y: Value) -> bool {
    // 1. If Type(x) is not Type(y), return false.
    // 2. If x is a Number, then
    if let (Some(x), Some(y)) = (x.to_f64(), y.to_f64()) {
        // a. Return Number::sameValue(x, y).
        return number_same_value(x, y);
    }
    // 3. Return SameValueNonNumber(x, y).
    x == y
}

/// ### [6.1.6.1.14 Number::sameValue ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-number-sameValue)
fn number_same_value(x: f64, y: f64) -> bool {
    // 1. If x is NaN and y is NaN, return true.
    if x.is_nan() && y.is_nan() {
        return true;
    }
    // 2. If x is +0𝔽 and y is -0𝔽, return false.
    // 3. If x is -0𝔽 and y is +0𝔽, return false.
    // 4. If x is y, return true.
    x == y && x.is_sign_negative() == y.is_sign_negative()
}

#[test]
fn same_value_distinguishes_zeros() {
    assert!(same_value(Value::Number(f64::NAN), Value::nan()));
    assert!(!same_value(Value::from(0), Value::Number(-0.0)));
    assert!(same_value(Value::from(2), Value::Number(2.0)));
    assert!(!same_value(Value::Null, Value::Undefined));
}
