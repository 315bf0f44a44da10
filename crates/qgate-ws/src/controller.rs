//! `WsController`: routes a request to the action registered under its key.

use std::collections::BTreeMap;
use std::sync::Arc;

use qgate_core::errors::QGateErrorCode;
use tracing::{info_span, warn};

use crate::actions::{
    DeleteConditionAction, ListConditionsAction, QualityGateStore, UpdateConditionAction, WsAction,
};
use crate::error::{WsError, WsResult};
use crate::request::WsRequest;
use crate::session::UserSession;

#[derive(Default)]
pub struct WsController {
    actions: BTreeMap<&'static str, Box<dyn WsAction>>,
}

impl WsController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller with the update, delete and list condition actions.
    pub fn with_condition_actions(store: Arc<dyn QualityGateStore>) -> Self {
        let mut controller = Self::new();
        controller.register(UpdateConditionAction::new(Arc::clone(&store)));
        controller.register(DeleteConditionAction::new(Arc::clone(&store)));
        controller.register(ListConditionsAction::new(store));
        controller
    }

    /// Register an action; a later registration under the same key wins.
    pub fn register(&mut self, action: impl WsAction + 'static) {
        self.actions.insert(action.key(), Box::new(action));
    }

    pub fn action_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.actions.keys().copied()
    }

    pub fn dispatch(
        &self,
        key: &str,
        request: &WsRequest,
        session: &UserSession,
    ) -> WsResult<serde_json::Value> {
        let span = info_span!("ws_action", action = key, user = session.login().unwrap_or("-"));
        let _guard = span.enter();

        let result = match self.actions.get(key) {
            Some(action) => action.handle(request, session),
            None => Err(WsError::NotFound(format!("Unknown action '{key}'"))),
        };
        if let Err(e) = &result {
            warn!(code = e.error_code(), status = e.http_status(), "{e}");
        }
        result
    }

    /// Dispatch and render the outcome as an HTTP status plus JSON body.
    pub fn respond(
        &self,
        key: &str,
        request: &WsRequest,
        session: &UserSession,
    ) -> (u16, serde_json::Value) {
        match self.dispatch(key, request, session) {
            Ok(body) => (200, body),
            Err(e) => (e.http_status(), e.to_json()),
        }
    }
}
