use lambda_http::{run, service_fn, tracing, Error};
mod http_handler;
mod warm;
use http_handler::function_handler;
use warm::WarmState;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let warm = WarmState::default();

    run(service_fn(|event| function_handler(&warm, event))).await
}
