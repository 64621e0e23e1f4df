//! Local invoke endpoint (`GET /__hwvInvokeDotNet?data=...`).
//!
//! The page-side shim serializes an `InvokeRequest` into the `data` query
//! parameter; this handler dispatches it to the method registry and answers
//! with an `InvokeResponse` JSON body. Errors come back as a JSON
//! `{code, msg}` body with a status derived from the stable client code.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use hybridge_core::error::{BridgeError, ClientCode};
use hybridge_core::protocol::invoke::InvokeRequest;

use crate::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct InvokeQuery {
    pub data: String,
}

fn error_response(e: &BridgeError) -> Response {
    let code = e.client_code();
    let status = match code {
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::MethodNotFound => StatusCode::NOT_FOUND,
        ClientCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = json!({
        "code": code.as_str(),
        "msg": e.to_string(),
    });
    (status, Json(body)).into_response()
}

pub async fn invoke_handler(
    State(app): State<AppState>,
    Query(q): Query<InvokeQuery>,
) -> Response {
    if q.data.len() > app.cfg().host.max_message_bytes {
        return error_response(&BridgeError::PayloadTooLarge);
    }

    let req: InvokeRequest = match serde_json::from_str(&q.data) {
        Ok(req) => req,
        Err(e) => {
            return error_response(&BridgeError::BadRequest(format!(
                "invalid invoke request: {e}"
            )));
        }
    };

    let params: Vec<String> = req.params().to_vec();
    tracing::debug!(method = %req.method_name, params = params.len(), "invoke request");

    match app.methods().invoke(&req.method_name, params).await {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => error_response(&e),
    }
}
