//! List Running Ark endpoints, optionally filtered by the first argument.
//!
//! ```shell
//! VOLCENGINE_ACCESS_KEY_ID=... VOLCENGINE_SECRET_ACCESS_KEY=... \
//!     cargo run -p volcsign-ark --example list_endpoints -- doubao
//! ```

use volcsign_ark::{Config, EndpointClient};
use volcsign_core::{Context, OsEnv};
use volcsign_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let _ = dotenv::dotenv();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::from_env(&ctx);
    log::debug!("loaded config: {config:?}");

    let filter = std::env::args().nth(1);
    let rows = EndpointClient::from_config(ctx, config)
        .search(filter.as_deref())
        .await;

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
