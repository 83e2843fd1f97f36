mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn healthz_responds_ok() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/healthz", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "OK");
    Ok(())
}

#[tokio::test]
async fn metrics_page_counts_hits() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Generate some traffic first
    for _ in 0..3 {
        client
            .get(format!("{}/api/healthz", server.base_url))
            .send()
            .await?;
    }

    let res = client
        .get(format!("{}/admin/metrics", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await?;
    assert!(
        body.contains("Chirpy has been visited"),
        "unexpected metrics body: {}",
        body
    );
    Ok(())
}
