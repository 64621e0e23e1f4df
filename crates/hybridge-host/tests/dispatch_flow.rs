//! Dispatcher routing and pending-call correlation tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use hybridge_core::protocol::invoke::TaskId;
use hybridge_host::dispatch::{Dispatcher, RawMessageHandler};
use hybridge_host::methods::{decode_param, HostMethod, MethodOutput, MethodRegistry};
use hybridge_host::pending::PendingCalls;

const MAX_BYTES: usize = 65536;

struct Recorder {
    label: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl RawMessageHandler for Recorder {
    async fn on_raw_message(&self, payload: &str) {
        self.log.lock().unwrap().push(format!("{}:{payload}", self.label));
    }
}

struct AddMethod {
    calls: Arc<Mutex<Vec<i64>>>,
}

#[async_trait]
impl HostMethod for AddMethod {
    fn name(&self) -> &'static str {
        "Add"
    }

    async fn invoke(&self, params: Vec<String>) -> hybridge_core::Result<MethodOutput> {
        let a: i64 = decode_param(&params, 0)?;
        let b: i64 = decode_param(&params, 1)?;
        self.calls.lock().unwrap().push(a + b);
        Ok(MethodOutput::Json(json!(a + b)))
    }
}

fn harness() -> (Arc<MethodRegistry>, Arc<PendingCalls>, Dispatcher) {
    let methods = Arc::new(MethodRegistry::new());
    let pending = Arc::new(PendingCalls::new());
    let dispatcher = Dispatcher::new(Arc::clone(&methods), Arc::clone(&pending), MAX_BYTES);
    (methods, pending, dispatcher)
}

#[tokio::test]
async fn raw_messages_fan_out_in_registration_order() {
    let (_, _, dispatcher) = harness();
    let log = Arc::new(Mutex::new(Vec::new()));
    dispatcher.register_raw(Arc::new(Recorder { label: "first", log: Arc::clone(&log) }));
    dispatcher.register_raw(Arc::new(Recorder { label: "second", log: Arc::clone(&log) }));

    dispatcher.dispatch("__RawMessage|hello").await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(*log, vec!["first:hello".to_string(), "second:hello".to_string()]);
}

#[tokio::test]
async fn raw_payload_keeps_embedded_separators() {
    let (_, _, dispatcher) = harness();
    let log = Arc::new(Mutex::new(Vec::new()));
    dispatcher.register_raw(Arc::new(Recorder { label: "h", log: Arc::clone(&log) }));

    dispatcher.dispatch("__RawMessage|a|b|c").await.unwrap();

    assert_eq!(log.lock().unwrap()[0], "h:a|b|c");
}

#[tokio::test]
async fn completion_resolves_pending_call() {
    let (_, pending, dispatcher) = harness();
    let task = TaskId::from("task-xyz");
    let rx = pending.register(&task).unwrap();

    dispatcher
        .dispatch("__InvokeJavaScriptCompleted|task-xyz|{\"ok\":true}")
        .await
        .unwrap();

    assert_eq!(rx.await.unwrap(), "{\"ok\":true}");
    assert_eq!(pending.in_flight(), 0);
}

#[tokio::test]
async fn unknown_completion_is_dropped_not_fatal() {
    let (_, pending, dispatcher) = harness();
    dispatcher
        .dispatch("__InvokeJavaScriptCompleted|never-registered|null")
        .await
        .unwrap();
    assert_eq!(pending.in_flight(), 0);
}

#[tokio::test]
async fn duplicate_in_flight_task_id_rejected() {
    let pending = PendingCalls::new();
    let task = TaskId::from("dup");
    let _rx = pending.register(&task).unwrap();
    assert!(pending.register(&task).is_err());
}

#[tokio::test]
async fn abandon_removes_pending_entry() {
    let pending = PendingCalls::new();
    let task = TaskId::from("gone");
    let _rx = pending.register(&task).unwrap();
    assert!(pending.abandon(&task));
    // a late completion now finds nothing
    assert!(!pending.complete("gone", "null".into()));
}

#[tokio::test]
async fn method_envelope_invokes_registered_method() {
    let (methods, _, dispatcher) = harness();
    let calls = Arc::new(Mutex::new(Vec::new()));
    methods.register(Arc::new(AddMethod { calls: Arc::clone(&calls) }));

    // params individually JSON-encoded, carried as a JSON array of strings
    dispatcher.dispatch(r#"Add|["2","40"]"#).await.unwrap();

    assert_eq!(*calls.lock().unwrap(), vec![42]);
}

#[tokio::test]
async fn unknown_method_envelope_is_logged_not_fatal() {
    let (_, _, dispatcher) = harness();
    // fire-and-forget: unknown method must not surface an error
    dispatcher.dispatch("Nope|[]").await.unwrap();
}

#[tokio::test]
async fn oversized_message_rejected_before_parsing() {
    let methods = Arc::new(MethodRegistry::new());
    let pending = Arc::new(PendingCalls::new());
    let dispatcher = Dispatcher::new(methods, pending, 16);

    let err = dispatcher
        .dispatch("__RawMessage|this payload is far too large for the cap")
        .await
        .unwrap_err();
    assert_eq!(err.client_code().as_str(), "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn malformed_envelope_surfaces_bad_request() {
    let (_, _, dispatcher) = harness();
    let err = dispatcher.dispatch("no separator here").await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}
