use anyhow::Result;
use log::{debug, warn};
use std::env;
use volcsign_ark::{EndpointClient, EnvCredentialProvider, SearchOutcome};
use volcsign_core::{Context, OsEnv};
use volcsign_http_send_reqwest::ReqwestHttpSend;

fn init_live_test() -> Option<EndpointClient> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("VOLCSIGN_ARK_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    Some(EndpointClient::new(ctx, EnvCredentialProvider::new()))
}

#[tokio::test]
async fn test_list_endpoints() -> Result<()> {
    let Some(client) = init_live_test() else {
        warn!("VOLCSIGN_ARK_TEST is not set, skipped");
        return Ok(());
    };

    let outcome = client.discover(None).await;
    debug!("got outcome: {outcome:?}");
    assert!(
        !matches!(outcome, SearchOutcome::Error(_)),
        "discovery must succeed: {outcome:?}"
    );

    let rows = outcome.into_results();
    assert!(!rows.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_endpoints_unmatched_filter() -> Result<()> {
    let Some(client) = init_live_test() else {
        warn!("VOLCSIGN_ARK_TEST is not set, skipped");
        return Ok(());
    };

    let rows = client
        .search(Some("volcsign-no-such-endpoint-7f3a"))
        .await;
    debug!("got rows: {rows:?}");
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].is_selectable());
    Ok(())
}
