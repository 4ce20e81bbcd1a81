// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use reverse_vm::{
    ecmascript::{
        abstract_operations::operations_on_objects::{
            get,
            integrity::{Frozen, Sealed},
            set, set_integrity_level,
        },
        builtins::{
            ArgumentsList, Array, ArrayPrototype,
            ordinary::OrdinaryObject,
            proxy::{Proxy, ProxyHandler},
        },
        execution::{Agent, ExceptionType, JsError, JsResult, Options},
        types::{BUILTIN_STRING_MEMORY, InternalMethods, Object, PropertyKey, Value},
    },
    heap::ElementsKind,
};

fn reverse(agent: &mut Agent, this_value: Value) -> JsResult<Value> {
    ArrayPrototype::reverse(agent, this_value, ArgumentsList::default())
}

fn ints(values: &[i32]) -> Vec<Option<Value>> {
    values.iter().map(|v| Some(Value::from(*v))).collect()
}

fn int(value: i32) -> Option<Value> {
    Some(Value::from(value))
}

#[test]
fn dense_integers() {
    let mut agent = Agent::new(Options::default());
    let array = Array::from_elements(&mut agent, &ints(&[1, 2, 3, 4, 5]));
    assert_eq!(array.elements_kind(&agent), ElementsKind::PackedSmi);
    let result = reverse(&mut agent, array.into_value()).unwrap();
    assert_eq!(result, array.into_value());
    assert_eq!(array.to_vec(&agent), ints(&[5, 4, 3, 2, 1]));
}

#[test]
fn sparse_with_middle_hole() {
    let mut agent = Agent::new(Options::default());
    let array = Array::from_elements(&mut agent, &[int(1), None, int(3)]);
    reverse(&mut agent, array.into_value()).unwrap();
    assert_eq!(array.to_vec(&agent), vec![int(3), None, int(1)]);
}

#[test]
fn sparse_with_leading_hole() {
    let mut agent = Agent::new(Options::default());
    let array = Array::from_elements(&mut agent, &[None, int(2), int(3)]);
    reverse(&mut agent, array.into_value()).unwrap();
    assert_eq!(array.to_vec(&agent), vec![int(3), int(2), None]);
    assert_eq!(array.len(&agent), 3);
}

#[test]
fn holes_at_both_ends() {
    let mut agent = Agent::new(Options::default());
    let array = Array::from_elements(&mut agent, &[None, int(1), int(2), None]);
    reverse(&mut agent, array.into_value()).unwrap();
    assert_eq!(array.to_vec(&agent), vec![None, int(2), int(1), None]);
}

#[test]
fn shared_storage_is_detached_before_reversing() {
    let mut agent = Agent::new(Options::default());
    let original = Array::from_slice(&mut agent, &[Value::from(1), Value::from(2), Value::from(3)]);
    let copy = original.copy_on_write_clone(&mut agent);
    assert!(copy.has_shared_elements(&agent));
    reverse(&mut agent, copy.into_value()).unwrap();
    assert_eq!(copy.to_vec(&agent), ints(&[3, 2, 1]));
    assert_eq!(original.to_vec(&agent), ints(&[1, 2, 3]));
    assert!(!original.has_shared_elements(&agent));
}

#[test]
fn double_bit_patterns_survive() {
    let values = [-0.0, f64::NAN, f64::INFINITY, 1.5, f64::MIN_POSITIVE];
    for disable_array_fast_paths in [false, true] {
        let mut agent = Agent::new(Options {
            disable_array_fast_paths,
            ..Default::default()
        });
        let elements = values.map(Value::from_f64);
        let array = Array::from_slice(&mut agent, &elements);
        assert_eq!(array.elements_kind(&agent), ElementsKind::PackedDouble);
        reverse(&mut agent, array.into_value()).unwrap();
        let reversed = array
            .to_vec(&agent)
            .into_iter()
            .map(|value| value.and_then(Value::to_f64).map(f64::to_bits))
            .collect::<Vec<_>>();
        let expected = values
            .iter()
            .rev()
            .map(|value| Some(value.to_bits()))
            .collect::<Vec<_>>();
        assert_eq!(reversed, expected);
    }
}

#[test]
fn mixed_values_use_the_reference_representation() {
    let mut agent = Agent::new(Options::default());
    let string = Value::from_str(&mut agent, "x");
    let object = OrdinaryObject::create(&mut agent, None).into_value();
    let array = Array::from_slice(&mut agent, &[string, Value::Null, object, Value::Undefined]);
    assert_eq!(array.elements_kind(&agent), ElementsKind::Packed);
    reverse(&mut agent, array.into_value()).unwrap();
    assert_eq!(
        array.to_vec(&agent),
        vec![
            Some(Value::Undefined),
            Some(object),
            Some(Value::Null),
            Some(string)
        ]
    );
}

#[test]
fn dictionary_elements_use_the_generic_path() {
    let mut agent = Agent::new(Options::default());
    let array = Array::from_slice(&mut agent, &[Value::from(1)]);
    set(&mut agent, array, 5000u32.into(), Value::from(2), true).unwrap();
    assert_eq!(array.elements_kind(&agent), ElementsKind::Dictionary);
    reverse(&mut agent, array.into_value()).unwrap();
    assert_eq!(array.len(&agent), 5001);
    assert_eq!(get(&mut agent, array, 0u32.into()).unwrap(), Value::from(2));
    assert_eq!(get(&mut agent, array, 5000u32.into()).unwrap(), Value::from(1));
    assert!(
        !array
            .internal_has_property(&mut agent, 4999u32.into())
            .unwrap()
    );
}

#[test]
fn frozen_arrays_throw_and_stay_unchanged() {
    let mut agent = Agent::new(Options::default());
    let array = Array::from_slice(&mut agent, &[Value::from(1), Value::from(2)]);
    assert!(set_integrity_level::<Frozen>(&mut agent, array.into()).unwrap());
    let error = reverse(&mut agent, array.into_value()).unwrap_err();
    assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    assert_eq!(array.to_vec(&agent), ints(&[1, 2]));

    // Nothing to swap, so nothing to reject.
    let single = Array::from_slice(&mut agent, &[Value::from(1)]);
    assert!(set_integrity_level::<Frozen>(&mut agent, single.into()).unwrap());
    reverse(&mut agent, single.into_value()).unwrap();
}

#[test]
fn primitive_receivers() {
    let mut agent = Agent::new(Options::default());
    for receiver in [Value::Undefined, Value::Null] {
        let error = reverse(&mut agent, receiver).unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
        assert_eq!(
            error.message(&agent),
            Some("Cannot convert undefined or null to object")
        );
    }
    // Number wrappers have no length.
    let result = reverse(&mut agent, Value::from(5)).unwrap();
    assert!(result.is_object());
    // String wrappers have read-only indexes.
    let single = Value::from_str(&mut agent, "a");
    reverse(&mut agent, single).unwrap();
    let string = Value::from_str(&mut agent, "ab");
    let error = reverse(&mut agent, string).unwrap_err();
    assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
}

#[test]
fn inherited_indexes_count_as_present() {
    let mut agent = Agent::new(Options::default());
    let prototype = OrdinaryObject::create(&mut agent, None);
    let inherited = Value::from_str(&mut agent, "inherited");
    set(&mut agent, prototype, 0u32.into(), inherited, true).unwrap();
    let array = Array::from_elements(&mut agent, &[None, int(2)]);
    assert!(
        array
            .internal_set_prototype_of(&mut agent, Some(prototype.into()))
            .unwrap()
    );
    reverse(&mut agent, array.into_value()).unwrap();
    assert_eq!(array.to_vec(&agent), vec![int(2), Some(inherited)]);
    // The prototype is not written to.
    assert_eq!(get(&mut agent, prototype, 0u32.into()).unwrap(), inherited);
}

#[test]
fn array_like_with_fractional_length() {
    let mut agent = Agent::new(Options::default());
    let object = OrdinaryObject::create(&mut agent, None);
    let length = PropertyKey::String(BUILTIN_STRING_MEMORY.length);
    set(&mut agent, object, length, Value::from_f64(3.7), true).unwrap();
    set(&mut agent, object, 0u32.into(), Value::from(1), true).unwrap();
    set(&mut agent, object, 1u32.into(), Value::from(2), true).unwrap();
    reverse(&mut agent, object.into_value()).unwrap();
    assert!(!object.internal_has_property(&mut agent, 0u32.into()).unwrap());
    assert_eq!(get(&mut agent, object, 1u32.into()).unwrap(), Value::from(2));
    assert_eq!(get(&mut agent, object, 2u32.into()).unwrap(), Value::from(1));
    // The length itself is untouched.
    assert_eq!(
        get(&mut agent, object, length).unwrap(),
        Value::from_f64(3.7)
    );
}

#[test]
fn array_like_length_strings_trim_only_ecmascript_whitespace() {
    let mut agent = Agent::new(Options::default());
    let object = OrdinaryObject::create(&mut agent, None);
    let length = PropertyKey::String(BUILTIN_STRING_MEMORY.length);
    // U+0085 is not WhiteSpace, so the length is NaN and then 0.
    let nel_five = Value::from_str(&mut agent, "\u{85}5");
    set(&mut agent, object, length, nel_five, true).unwrap();
    set(&mut agent, object, 0u32.into(), Value::from(1), true).unwrap();
    reverse(&mut agent, object.into_value()).unwrap();
    assert_eq!(get(&mut agent, object, 0u32.into()).unwrap(), Value::from(1));
    assert!(!object.internal_has_property(&mut agent, 4u32.into()).unwrap());

    // U+3000 is a Space_Separator, so the length is 2.
    let ideographic_two = Value::from_str(&mut agent, "\u{3000}2");
    set(&mut agent, object, length, ideographic_two, true).unwrap();
    reverse(&mut agent, object.into_value()).unwrap();
    assert!(!object.internal_has_property(&mut agent, 0u32.into()).unwrap());
    assert_eq!(get(&mut agent, object, 1u32.into()).unwrap(), Value::from(1));
}

/// Records every has, get, set and delete trap call and forwards it.
#[derive(Debug, Default)]
struct LoggingHandler {
    log: RefCell<Vec<String>>,
}

impl LoggingHandler {
    fn record(&self, agent: &Agent, trap: &str, property_key: PropertyKey) {
        self.log
            .borrow_mut()
            .push(format!("{trap} {}", property_key.display(agent)));
    }

    fn take(&self) -> Vec<String> {
        self.log.take()
    }
}

impl ProxyHandler for LoggingHandler {
    fn has(&self, agent: &mut Agent, target: Object, property_key: PropertyKey) -> JsResult<bool> {
        self.record(agent, "has", property_key);
        target.internal_has_property(agent, property_key)
    }

    fn get(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        self.record(agent, "get", property_key);
        target.internal_get(agent, property_key, receiver)
    }

    fn set(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        self.record(agent, "set", property_key);
        target.internal_set(agent, property_key, value, receiver)
    }

    fn delete_property(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
    ) -> JsResult<bool> {
        self.record(agent, "delete", property_key);
        target.internal_delete(agent, property_key)
    }
}

fn logging_proxy(agent: &mut Agent, elements: &[Option<Value>]) -> (Array, Proxy, Rc<LoggingHandler>) {
    let target = Array::from_elements(agent, elements);
    let handler = Rc::new(LoggingHandler::default());
    let proxy = Proxy::new(agent, target.into(), handler.clone());
    (target, proxy, handler)
}

#[test]
fn trap_call_order_for_each_case() {
    let mut agent = Agent::new(Options::default());
    // Lower present, upper missing; then both missing; then both present.
    let (target, proxy, handler) =
        logging_proxy(&mut agent, &[int(1), None, int(3), int(4), None, None]);
    reverse(&mut agent, proxy.into_value()).unwrap();
    assert_eq!(
        handler.take(),
        [
            "get length",
            "has 0",
            "get 0",
            "has 5",
            "delete 0",
            "set 5",
            "has 1",
            "has 4",
            "has 2",
            "get 2",
            "has 3",
            "get 3",
            "set 2",
            "set 3",
        ]
    );
    assert_eq!(
        target.to_vec(&agent),
        vec![None, None, int(4), int(3), None, int(1)]
    );
}

#[test]
fn trap_call_order_upper_only() {
    let mut agent = Agent::new(Options::default());
    let (target, proxy, handler) = logging_proxy(&mut agent, &[None, int(2), int(3)]);
    reverse(&mut agent, proxy.into_value()).unwrap();
    assert_eq!(
        handler.take(),
        ["get length", "has 0", "has 2", "get 2", "set 0", "delete 2"]
    );
    assert_eq!(target.to_vec(&agent), vec![int(3), int(2), None]);
}

#[test]
fn proxies_over_packed_arrays_never_take_the_fast_path() {
    let mut agent = Agent::new(Options::default());
    let (target, proxy, handler) = logging_proxy(&mut agent, &ints(&[1, 2]));
    reverse(&mut agent, proxy.into_value()).unwrap();
    assert_eq!(
        handler.take(),
        ["get length", "has 0", "get 0", "has 1", "get 1", "set 0", "set 1"]
    );
    assert_eq!(target.to_vec(&agent), ints(&[2, 1]));
}

/// Deletes the last element of its target the first time index 0 is read.
#[derive(Debug)]
struct MutatingHandler {
    victim: PropertyKey,
    fired: Cell<bool>,
}

impl ProxyHandler for MutatingHandler {
    fn get(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        if property_key == PropertyKey::from(0u32) && !self.fired.replace(true) {
            target.internal_delete(agent, self.victim)?;
        }
        target.internal_get(agent, property_key, receiver)
    }
}

#[test]
fn reentrant_mutation_is_observed() {
    let mut agent = Agent::new(Options::default());
    let target = Array::from_slice(
        &mut agent,
        &[Value::from(1), Value::from(2), Value::from(3), Value::from(4)],
    );
    let handler = Rc::new(MutatingHandler {
        victim: 3u32.into(),
        fired: Cell::new(false),
    });
    let proxy = Proxy::new(&mut agent, target.into(), handler);
    reverse(&mut agent, proxy.into_value()).unwrap();
    // Index 3 vanished before its presence was tested, so index 0 moved up
    // and left a hole behind.
    assert_eq!(target.to_vec(&agent), vec![None, int(3), int(2), int(1)]);
}

/// Throws from the set trap once `remaining` sets have gone through.
#[derive(Debug)]
struct FailingHandler {
    remaining: Cell<u32>,
}

impl ProxyHandler for FailingHandler {
    fn set(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        let remaining = self.remaining.get();
        if remaining == 0 {
            let message = Value::from_str(agent, "boom");
            return Err(JsError::new(message));
        }
        self.remaining.set(remaining - 1);
        target.internal_set(agent, property_key, value, receiver)
    }
}

#[test]
fn trap_failures_propagate_without_rollback() {
    let mut agent = Agent::new(Options::default());
    let target = Array::from_slice(
        &mut agent,
        &[Value::from(1), Value::from(2), Value::from(3), Value::from(4)],
    );
    let handler = Rc::new(FailingHandler {
        remaining: Cell::new(2),
    });
    let proxy = Proxy::new(&mut agent, target.into(), handler);
    let error = reverse(&mut agent, proxy.into_value()).unwrap_err();
    let boom = Value::from_str(&mut agent, "boom");
    assert_eq!(error.value(), boom);
    assert_eq!(error.kind(&agent), None);
    // The outer pair was swapped; the inner pair was never written.
    assert_eq!(target.to_vec(&agent), ints(&[4, 2, 3, 1]));
}

/// Throws `thrown` from one trap, for one property key, and forwards
/// everything else.
#[derive(Debug)]
struct ThrowingHandler {
    trap: &'static str,
    key: PropertyKey,
    thrown: i32,
}

impl ThrowingHandler {
    fn check(&self, trap: &str, property_key: PropertyKey) -> JsResult<()> {
        if trap == self.trap && property_key == self.key {
            Err(JsError::new(Value::from(self.thrown)))
        } else {
            Ok(())
        }
    }
}

impl ProxyHandler for ThrowingHandler {
    fn has(&self, agent: &mut Agent, target: Object, property_key: PropertyKey) -> JsResult<bool> {
        self.check("has", property_key)?;
        target.internal_has_property(agent, property_key)
    }

    fn get(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        self.check("get", property_key)?;
        target.internal_get(agent, property_key, receiver)
    }

    fn delete_property(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
    ) -> JsResult<bool> {
        self.check("delete", property_key)?;
        target.internal_delete(agent, property_key)
    }
}

#[test]
fn every_trap_failure_propagates_the_thrown_value() {
    let mut agent = Agent::new(Options::default());
    let length = PropertyKey::from(BUILTIN_STRING_MEMORY.length);
    let original = vec![int(1), int(2), int(3), int(4), None, int(6)];
    // The (0, 5) pair is swapped before index 1 is touched.
    let swapped = vec![int(6), int(2), int(3), int(4), None, int(1)];
    let cases = [
        ("get", length, 9, &original),
        ("has", PropertyKey::from(1u32), 7, &swapped),
        ("get", PropertyKey::from(1u32), 8, &swapped),
        // Index 1 is present and index 4 is a hole, so index 1 is deleted.
        ("delete", PropertyKey::from(1u32), 10, &swapped),
    ];
    for (trap, key, thrown, expected) in cases {
        let target = Array::from_elements(&mut agent, &original);
        let handler = Rc::new(ThrowingHandler { trap, key, thrown });
        let proxy = Proxy::new(&mut agent, target.into(), handler);
        let error = reverse(&mut agent, proxy.into_value()).unwrap_err();
        assert_eq!(error.value(), Value::from(thrown), "{trap} trap");
        assert_eq!(error.kind(&agent), None);
        assert_eq!(&target.to_vec(&agent), expected, "{trap} trap");
    }
}

#[test]
fn sealed_holey_arrays_reject_the_delete() {
    let mut agent = Agent::new(Options::default());
    let array = Array::from_elements(&mut agent, &[int(1), None]);
    assert!(set_integrity_level::<Sealed>(&mut agent, array.into()).unwrap());
    let error = reverse(&mut agent, array.into_value()).unwrap_err();
    assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    assert_eq!(array.to_vec(&agent), vec![int(1), None]);
}

#[test]
fn revoked_proxy_receiver_throws() {
    let mut agent = Agent::new(Options::default());
    let (_, proxy, handler) = logging_proxy(&mut agent, &ints(&[1, 2]));
    proxy.revoke(&mut agent);
    let error = reverse(&mut agent, proxy.into_value()).unwrap_err();
    assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    assert!(handler.take().is_empty());
}
