use chrono::{SecondsFormat, Utc};
use lambda_http::http::header::CONTENT_TYPE;
use lambda_http::{Body, Error, Request, RequestExt, Response};
use serde::Serialize;

use crate::warm::WarmState;

#[derive(Serialize)]
struct Greeting {
    message: String,
    timestamp: String,
    cold: bool,
}

pub(crate) async fn function_handler(warm: &WarmState, event: Request) -> Result<Response<Body>, Error> {
    let name = event
        .query_string_parameters_ref()
        .and_then(|params| params.first("name"))
        .filter(|name| !name.is_empty())
        .unwrap_or("World");

    let greeting = Greeting {
        message: format!("Hello, {}! You just ran serverless code.", name),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        cold: warm.is_cold(),
    };
    tracing::info!(name, cold = greeting.cold, "greeting");

    let body = serde_json::to_string(&greeting)?;
    let response = Response::builder()
        .status(200)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::Text(body))?;

    warm.mark_warm();
    Ok(response)
}
