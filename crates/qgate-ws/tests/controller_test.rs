//! Dispatch, delete and list through `WsController`.

mod common;

use common::Fixture;
use qgate_core::traits::storage::IConditionStorage;
use qgate_ws::{UserSession, WsError, WsRequest};
use serde_json::json;

#[test]
fn registers_the_condition_actions() {
    let fx = Fixture::new();
    let keys: Vec<_> = fx.controller.action_keys().collect();
    assert_eq!(keys, ["delete_condition", "list_conditions", "update_condition"]);
}

#[test]
fn unknown_action_is_not_found() {
    let fx = Fixture::new();
    let (status, body) = fx
        .controller
        .respond("create_condition", &WsRequest::new(), &fx.admin_session());
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "errors": [{ "msg": "Unknown action 'create_condition'" }] }));
}

#[test]
fn delete_removes_the_condition() {
    let fx = Fixture::new();
    let condition = fx.condition_on(&fx.gate, &fx.bugs, "0");
    let request = WsRequest::new().with_param("id", condition.uuid.clone());

    let body = fx
        .controller
        .dispatch("delete_condition", &request, &fx.admin_session())
        .unwrap();
    assert_eq!(body, json!({ "deleted": condition.uuid.as_str() }));
    assert!(fx.engine.select_by_uuid(&condition.uuid).unwrap().is_none());

    let again = fx
        .controller
        .dispatch("delete_condition", &request, &fx.admin_session())
        .unwrap_err();
    assert!(matches!(again, WsError::NotFound(_)));
}

#[test]
fn delete_on_built_in_gate_is_refused() {
    let fx = Fixture::new();
    let condition = fx.condition_on(&fx.built_in_gate, &fx.bugs, "0");
    let request = WsRequest::new().with_param("id", condition.uuid.clone());

    let (status, _) = fx
        .controller
        .respond("delete_condition", &request, &fx.admin_session());
    assert_eq!(status, 400);
    assert!(fx.engine.select_by_uuid(&condition.uuid).unwrap().is_some());
}

#[test]
fn list_returns_conditions_in_creation_order() {
    let fx = Fixture::new();
    let first = fx.condition_on(&fx.gate, &fx.bugs, "0");
    let second = fx.condition_on(&fx.gate, &fx.coverage, "80");
    fx.condition_on(&fx.built_in_gate, &fx.bugs, "5");

    let update = WsRequest::new()
        .with_param("id", second.uuid.clone())
        .with_param("value", "85.5");
    fx.controller
        .dispatch("update_condition", &update, &fx.admin_session())
        .unwrap();

    let request = WsRequest::new().with_param("gateId", fx.gate.id.to_string());
    let body = fx
        .controller
        .dispatch("list_conditions", &request, &UserSession::for_user(&fx.admin))
        .unwrap();

    assert_eq!(body["gate"]["name"], "Team gate");
    assert_eq!(body["total"], 2);
    let conditions = body["conditions"].as_array().unwrap();
    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions[0]["id"], first.uuid.as_str());
    assert_eq!(conditions[0]["metric"], "bugs");
    assert!(conditions[0].get("updatedBy").is_none());
    assert_eq!(conditions[1]["id"], second.uuid.as_str());
    assert_eq!(conditions[1]["error"], "85.5");
    assert_eq!(conditions[1]["updatedBy"], "admin");
}

#[test]
fn list_validates_gate_id() {
    let fx = Fixture::new();
    let session = fx.admin_session();

    let not_numeric = WsRequest::new().with_param("gateId", "abc");
    assert_eq!(
        fx.controller
            .dispatch("list_conditions", &not_numeric, &session)
            .unwrap_err(),
        WsError::BadRequest("The 'gateId' parameter must be an integer".to_string())
    );

    let unknown = WsRequest::new().with_param("gateId", "9999");
    let (status, _) = fx.controller.respond("list_conditions", &unknown, &session);
    assert_eq!(status, 404);
}

#[test]
fn list_requires_a_session() {
    let fx = Fixture::new();
    let request = WsRequest::new().with_param("gateId", fx.gate.id.to_string());
    let (status, _) = fx
        .controller
        .respond("list_conditions", &request, &UserSession::anonymous());
    assert_eq!(status, 401);
}
