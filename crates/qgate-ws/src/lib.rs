//! # qgate-ws
//!
//! Request handling for quality-gate conditions. Each action reads its
//! parameters from a [`WsRequest`], checks the caller's [`UserSession`],
//! talks to the storage traits and answers with a JSON document.

pub mod actions;
pub mod controller;
pub mod error;
pub mod json;
pub mod request;
pub mod session;
pub mod validator;

pub use actions::{
    DeleteConditionAction, ListConditionsAction, QualityGateStore, UpdateConditionAction, WsAction,
};
pub use controller::WsController;
pub use error::{WsError, WsResult};
pub use request::WsRequest;
pub use session::{GlobalPermission, UserSession};
