// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use super::{Proxy, ProxyHandler};
use crate::ecmascript::{
    execution::{Agent, ExceptionType, JsResult},
    types::Object,
};

pub(crate) struct NonRevokedProxy {
    pub(crate) target: Object,
    pub(crate) handler: Rc<dyn ProxyHandler>,
}

/// ### [10.5.14 ValidateNonRevokedProxy ( proxy )](https://tc39.es/ecma262/#sec-validatenonrevokedproxy)
///
/// The abstract operation ValidateNonRevokedProxy takes argument
/// proxy (a Proxy exotic object) and returns either a normal completion containing unused or a throw completion.
/// It throws a TypeError exception if proxy has been revoked.
pub(crate) fn validate_non_revoked_proxy(
    agent: &mut Agent,
    proxy: Proxy,
) -> JsResult<NonRevokedProxy> {
    let proxy_data = &agent[proxy];
    // 1. If proxy.[[ProxyTarget]] is null, throw a TypeError exception.
    // 2. Assert: proxy.[[ProxyHandler]] is not null.
    if let (Some(target), Some(handler)) = (proxy_data.target, proxy_data.handler.clone()) {
        return Ok(NonRevokedProxy { target, handler });
    }
    Err(agent.throw_exception_with_static_message(
        ExceptionType::TypeError,
        "Cannot perform operation on a revoked proxy",
    ))
}
