// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.5 Proxy Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots)
//!
//! Handlers are host-defined Rust trait objects rather than ECMAScript
//! objects. Every trap defaults to forwarding the operation to the target,
//! which is what an ECMAScript handler without that trap would do. The
//! invariant checks that follow each trap call are not enforced.

pub(crate) mod abstract_operations;

use std::{
    fmt::Debug,
    ops::{Index, IndexMut},
    rc::Rc,
};

use abstract_operations::{NonRevokedProxy, validate_non_revoked_proxy};

use crate::{
    ecmascript::{
        execution::{Agent, JsResult},
        types::{InternalMethods, Object, PropertyDescriptor, PropertyKey, Value},
    },
    heap::{CreateHeapData, indexes::ProxyIndex},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Proxy(pub(crate) ProxyIndex);

#[derive(Debug, Clone)]
pub struct ProxyHeapData {
    /// \[\[ProxyTarget]]; None once revoked.
    pub(crate) target: Option<Object>,
    /// \[\[ProxyHandler]]; None once revoked.
    pub(crate) handler: Option<Rc<dyn ProxyHandler>>,
}

/// Traps of a Proxy handler.
///
/// Traps receive the Agent mutably and may freely read and modify any object,
/// including the proxy's own target. Returning an error aborts the operation
/// that triggered the trap.
pub trait ProxyHandler: Debug {
    /// ### [10.5.1 \[\[GetPrototypeOf\]\] ( )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-getprototypeof)
    fn get_prototype_of(&self, agent: &mut Agent, target: Object) -> JsResult<Option<Object>> {
        target.internal_get_prototype_of(agent)
    }

    /// ### [10.5.2 \[\[SetPrototypeOf\]\] ( V )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-setprototypeof-v)
    fn set_prototype_of(
        &self,
        agent: &mut Agent,
        target: Object,
        prototype: Option<Object>,
    ) -> JsResult<bool> {
        target.internal_set_prototype_of(agent, prototype)
    }

    /// ### [10.5.3 \[\[IsExtensible\]\] ( )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-isextensible)
    fn is_extensible(&self, agent: &mut Agent, target: Object) -> JsResult<bool> {
        target.internal_is_extensible(agent)
    }

    /// ### [10.5.4 \[\[PreventExtensions\]\] ( )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-preventextensions)
    fn prevent_extensions(&self, agent: &mut Agent, target: Object) -> JsResult<bool> {
        target.internal_prevent_extensions(agent)
    }

    /// ### [10.5.5 \[\[GetOwnProperty\]\] ( P )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-getownproperty-p)
    fn get_own_property_descriptor(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        target.internal_get_own_property(agent, property_key)
    }

    /// ### [10.5.6 \[\[DefineOwnProperty\]\] ( P, Desc )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-defineownproperty-p-desc)
    fn define_property(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        target.internal_define_own_property(agent, property_key, property_descriptor)
    }

    /// ### [10.5.7 \[\[HasProperty\]\] ( P )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-hasproperty-p)
    fn has(&self, agent: &mut Agent, target: Object, property_key: PropertyKey) -> JsResult<bool> {
        target.internal_has_property(agent, property_key)
    }

    /// ### [10.5.8 \[\[Get\]\] ( P, Receiver )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-get-p-receiver)
    fn get(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        target.internal_get(agent, property_key, receiver)
    }

    /// ### [10.5.9 \[\[Set\]\] ( P, V, Receiver )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-set-p-v-receiver)
    fn set(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        target.internal_set(agent, property_key, value, receiver)
    }

    /// ### [10.5.10 \[\[Delete\]\] ( P )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-delete-p)
    fn delete_property(
        &self,
        agent: &mut Agent,
        target: Object,
        property_key: PropertyKey,
    ) -> JsResult<bool> {
        target.internal_delete(agent, property_key)
    }

    /// ### [10.5.11 \[\[OwnPropertyKeys\]\] ( )](https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots-ownpropertykeys)
    fn own_keys(&self, agent: &mut Agent, target: Object) -> JsResult<Vec<PropertyKey>> {
        target.internal_own_property_keys(agent)
    }
}

impl Proxy {
    /// ### [10.5.15 ProxyCreate ( target, handler )](https://tc39.es/ecma262/#sec-proxycreate)
    pub fn new(agent: &mut Agent, target: Object, handler: Rc<dyn ProxyHandler>) -> Self {
        agent.heap.create(ProxyHeapData {
            target: Some(target),
            handler: Some(handler),
        })
    }

    /// Revokes the proxy, as the revoke function returned by
    /// `Proxy.revocable` does. Every later operation on it throws a
    /// TypeError.
    pub fn revoke(self, agent: &mut Agent) {
        let data = &mut agent[self];
        data.target = None;
        data.handler = None;
    }

    pub fn is_revoked(self, agent: &Agent) -> bool {
        agent[self].handler.is_none()
    }

    pub fn into_object(self) -> Object {
        self.into()
    }

    pub fn into_value(self) -> Value {
        self.into()
    }
}

impl Index<Proxy> for Agent {
    type Output = ProxyHeapData;

    fn index(&self, index: Proxy) -> &Self::Output {
        &self.heap.proxies[index.0.into_index()]
    }
}

impl IndexMut<Proxy> for Agent {
    fn index_mut(&mut self, index: Proxy) -> &mut Self::Output {
        &mut self.heap.proxies[index.0.into_index()]
    }
}

impl InternalMethods for Proxy {
    fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>> {
        let NonRevokedProxy { target, handler } = validate_non_revoked_proxy(agent, self)?;
        handler.get_prototype_of(agent, target)
    }

    fn internal_set_prototype_of(
        self,
        agent: &mut Agent,
        prototype: Option<Object>,
    ) -> JsResult<bool> {
        let NonRevokedProxy { target, handler } = validate_non_revoked_proxy(agent, self)?;
        handler.set_prototype_of(agent, target, prototype)
    }

    fn internal_is_extensible(self, agent: &mut Agent) -> JsResult<bool> {
        let NonRevokedProxy { target, handler } = validate_non_revoked_proxy(agent, self)?;
        handler.is_extensible(agent, target)
    }

    fn internal_prevent_extensions(self, agent: &mut Agent) -> JsResult<bool> {
        let NonRevokedProxy { target, handler } = validate_non_revoked_proxy(agent, self)?;
        handler.prevent_extensions(agent, target)
    }

    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        let NonRevokedProxy { target, handler } = validate_non_revoked_proxy(agent, self)?;
        handler.get_own_property_descriptor(agent, target, property_key)
    }

    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        let NonRevokedProxy { target, handler } = validate_non_revoked_proxy(agent, self)?;
        handler.define_property(agent, target, property_key, property_descriptor)
    }

    fn internal_has_property(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        let NonRevokedProxy { target, handler } = validate_non_revoked_proxy(agent, self)?;
        handler.has(agent, target, property_key)
    }

    fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        let NonRevokedProxy { target, handler } = validate_non_revoked_proxy(agent, self)?;
        handler.get(agent, target, property_key, receiver)
    }

    fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        let NonRevokedProxy { target, handler } = validate_non_revoked_proxy(agent, self)?;
        handler.set(agent, target, property_key, value, receiver)
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        let NonRevokedProxy { target, handler } = validate_non_revoked_proxy(agent, self)?;
        handler.delete_property(agent, target, property_key)
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        let NonRevokedProxy { target, handler } = validate_non_revoked_proxy(agent, self)?;
        handler.own_keys(agent, target)
    }
}
