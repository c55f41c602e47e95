use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use route_shim_lambda::adapters::lambda_client::AwsLambdaClient;
use route_shim_lambda::config::ShimConfig;
use route_shim_lambda::handlers::gateway::handle_gateway_event;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = ShimConfig::from_env()?;
    let client = Arc::new(AwsLambdaClient::from_env().await);
    let router = Arc::new(config.build_router(client));
    tracing::info!(routes = router.len(), "route table loaded");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let router = Arc::clone(&router);
        async move { handle_gateway_event(&router, event.payload) }
    }))
    .await
}
