mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

fn access_token() -> String {
    chirpy::auth::jwt::make_jwt(Uuid::new_v4(), 3600, common::JWT_SECRET)
        .expect("token generation")
}

// Body validation runs after authentication but before any database work,
// so the 400 cases hold without a reachable database.

#[tokio::test]
async fn empty_chirp_body_is_a_bad_request() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/chirps", server.base_url))
        .header("Authorization", format!("Bearer {}", access_token()))
        .json(&json!({ "body": "   " }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "Chirp body cannot be empty");
    Ok(())
}

#[tokio::test]
async fn overlong_chirp_is_a_bad_request() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/chirps", server.base_url))
        .header("Authorization", format!("Bearer {}", access_token()))
        .json(&json!({ "body": "x".repeat(141) }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "Chirp is too long. Max length is 140");
    Ok(())
}

#[tokio::test]
async fn chirp_at_the_limit_passes_validation() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/chirps", server.base_url))
        .header("Authorization", format!("Bearer {}", access_token()))
        .json(&json!({ "body": "x".repeat(140) }))
        .send()
        .await?;

    // 201 with a database; 500 without one. Either way it got past the
    // validators.
    assert!(
        res.status() == StatusCode::CREATED
            || res.status() == StatusCode::INTERNAL_SERVER_ERROR,
        "unexpected status: {}",
        res.status()
    );
    Ok(())
}

#[tokio::test]
async fn unknown_chirp_id_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/chirps/{}", server.base_url, Uuid::new_v4()))
        .send()
        .await?;

    assert!(
        res.status() == StatusCode::NOT_FOUND
            || res.status() == StatusCode::INTERNAL_SERVER_ERROR,
        "unexpected status: {}",
        res.status()
    );
    Ok(())
}
