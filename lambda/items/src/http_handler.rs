use lambda_http::http::header::CONTENT_TYPE;
use lambda_http::request::RequestContext;
use lambda_http::{Body, Error, Request, RequestExt, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Number;
use thiserror::Error;

use crate::item::{Item, PricePatch};
use crate::store::{ItemStore, StoreError};

const DELETE_ITEM: &str = "DELETE /items/{id}";
const GET_ITEM: &str = "GET /items/{id}";
const LIST_ITEMS: &str = "GET /items";
const PUT_ITEM: &str = "PUT /items";
const PATCH_ITEM: &str = "PATCH /items/{id}";

#[derive(Debug, Error)]
pub(crate) enum HandlerError {
    #[error("Unsupported route: \"{0}\"")]
    UnsupportedRoute(String),

    #[error("Missing path parameter: {0}")]
    MissingPathParameter(&'static str),

    #[error("Missing request body")]
    MissingBody,

    #[error(transparent)]
    InvalidBody(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A route key resolved against the known routes, with its inputs parsed.
#[derive(Debug, PartialEq)]
enum Operation {
    Delete { id: String },
    Get { id: String },
    List,
    Put(Item),
    PatchPrice { id: String, price: Number },
}

impl Operation {
    fn decode(route_key: &str, id: Option<&str>, body: &[u8]) -> Result<Self, HandlerError> {
        let id = || {
            id.map(str::to_string)
                .ok_or(HandlerError::MissingPathParameter("id"))
        };

        match route_key {
            DELETE_ITEM => Ok(Operation::Delete { id: id()? }),
            GET_ITEM => Ok(Operation::Get { id: id()? }),
            LIST_ITEMS => Ok(Operation::List),
            PUT_ITEM => Ok(Operation::Put(parse_body(body)?)),
            PATCH_ITEM => {
                let id = id()?;
                let patch: PricePatch = parse_body(body)?;
                Ok(Operation::PatchPrice {
                    id,
                    price: patch.price,
                })
            }
            other => Err(HandlerError::UnsupportedRoute(other.to_string())),
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, HandlerError> {
    if body.is_empty() {
        return Err(HandlerError::MissingBody);
    }
    Ok(serde_json::from_slice(body)?)
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Reply {
    Message { message: String },
    Item(Item),
    Items(Vec<Item>),
}

impl Reply {
    fn message(message: impl Into<String>) -> Self {
        Reply::Message {
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn execute<S: ItemStore>(store: &S, operation: Operation) -> Result<Reply, HandlerError> {
    match operation {
        Operation::Delete { id } => {
            store.delete(&id).await?;
            Ok(Reply::message(format!("Deleted item {}", id)))
        }
        Operation::Get { id } => match store.get(&id).await? {
            Some(item) => Ok(Reply::Item(item)),
            None => Ok(Reply::message("Item not found")),
        },
        Operation::List => Ok(Reply::Items(store.scan().await?)),
        Operation::Put(item) => {
            let id = item.id.clone();
            store.put(item).await?;
            Ok(Reply::message(format!("Saved item {}", id)))
        }
        Operation::PatchPrice { id, price } => {
            Ok(Reply::Item(store.update_price(&id, price).await?))
        }
    }
}

async fn handle<S: ItemStore>(
    store: &S,
    route_key: &str,
    id: Option<&str>,
    body: &[u8],
) -> Result<Reply, HandlerError> {
    let operation = Operation::decode(route_key, id, body)?;
    tracing::debug!(?operation, "decoded operation");
    execute(store, operation).await
}

fn respond(outcome: Result<Reply, HandlerError>) -> Result<Response<Body>, Error> {
    let (status, body) = match outcome {
        Ok(reply) => (200, serde_json::to_string(&reply)?),
        Err(e) => {
            tracing::warn!(error = %e, "request failed");
            let body = ErrorResponse {
                error: e.to_string(),
            };
            (400, serde_json::to_string(&body)?)
        }
    };

    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::Text(body))?)
}

/// The gateway route key, e.g. `GET /items/{id}`.
fn route_key(event: &Request) -> String {
    let from_context = match event.request_context_ref() {
        Some(RequestContext::ApiGatewayV2(ctx)) => ctx.route_key.clone(),
        Some(RequestContext::ApiGatewayV1(ctx)) => ctx
            .resource_path
            .as_ref()
            .map(|path| format!("{} {}", ctx.http_method, path)),
        _ => None,
    };

    from_context.unwrap_or_else(|| format!("{} {}", event.method(), event.uri().path()))
}

pub(crate) async fn function_handler<S: ItemStore>(
    store: &S,
    event: Request,
) -> Result<Response<Body>, Error> {
    let route_key = route_key(&event);
    let id = event
        .path_parameters_ref()
        .and_then(|params| params.first("id"))
        .filter(|id| !id.is_empty());

    tracing::info!(route_key = %route_key, id = ?id, "handling request");

    let outcome = handle(store, &route_key, id, event.body().as_ref()).await;
    respond(outcome)
}
