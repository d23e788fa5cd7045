use lambda_http::{run, service_fn, tracing, Error};
mod http_handler;
mod item;
#[cfg(test)]
mod memory;
mod store;
use http_handler::function_handler;
use store::DynamoItemStore;

const DEFAULT_TABLE: &str = "http-crud-tutorial-items";

fn table_name(configured: Option<String>) -> String {
    configured
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_TABLE.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&config);
    let table = table_name(std::env::var("TABLE_NAME").ok());
    tracing::info!(table = %table, "items function ready");

    let store = DynamoItemStore::new(client, table);

    run(service_fn(|event| function_handler(&store, event))).await
}
