mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn ids(items: &Value) -> Vec<Value> {
    items
        .as_array()
        .map(|a| a.iter().map(|v| v["id"].clone()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn paginated_list_is_enveloped() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/posts?_page=2&_limit=10")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("x-total-count").and_then(|v| v.to_str().ok()),
        Some("37")
    );

    let body = res.json::<Value>().await?;
    assert_eq!(body["pagination"], json!({ "_page": 2, "_limit": 10, "_totalRows": 37 }));
    assert_eq!(ids(&body["data"]), (11..=20).map(|i| json!(i)).collect::<Vec<_>>());

    Ok(())
}

#[tokio::test]
async fn pagination_defaults_when_values_are_missing_or_bad() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let body = client
        .get(server.url("/api/posts?_page=1"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["pagination"], json!({ "_page": 1, "_limit": 10, "_totalRows": 37 }));
    assert_eq!(body["data"].as_array().map(Vec::len), Some(10));

    let body = client
        .get(server.url("/api/posts?_limit=5"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["pagination"], json!({ "_page": 1, "_limit": 5, "_totalRows": 37 }));

    let body = client
        .get(server.url("/api/posts?_page=abc&_limit=0"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["pagination"], json!({ "_page": 1, "_limit": 10, "_totalRows": 37 }));

    Ok(())
}

#[tokio::test]
async fn last_page_is_short() -> Result<()> {
    let server = common::start_server().await?;

    let body = reqwest::Client::new()
        .get(server.url("/api/posts?_page=4&_limit=10"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(7));
    assert_eq!(body["pagination"]["_totalRows"], 37);

    Ok(())
}

#[tokio::test]
async fn total_counts_matches_after_filtering() -> Result<()> {
    let server = common::start_server().await?;

    let body = reqwest::Client::new()
        .get(server.url("/api/posts?author=Ada%20Lovelace&_page=1&_limit=5"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    // ids 3, 6, ..., 36
    assert_eq!(body["pagination"]["_totalRows"], 12);
    assert_eq!(ids(&body["data"]), vec![json!(3), json!(6), json!(9), json!(12), json!(15)]);

    Ok(())
}

#[tokio::test]
async fn filters_sort_and_search() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let body = client
        .get(server.url("/api/posts?views_gte=300&_sort=views&_order=desc"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(
        ids(&body),
        (30..=37).rev().map(|i| json!(i)).collect::<Vec<_>>()
    );

    let body = client
        .get(server.url("/api/students?gender=female&city=hn"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(ids(&body), vec![json!("s2"), json!("s4"), json!("s6")]);

    let body = client
        .get(server.url("/api/posts?q=post%2001"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(ids(&body), vec![json!(1)]);

    let body = client
        .get(server.url("/api/students?name_like=student%201"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(ids(&body), vec![json!("s10"), json!("s11"), json!("s12")]);

    Ok(())
}

#[tokio::test]
async fn writes_are_never_enveloped() -> Result<()> {
    let server = common::start_server().await?;

    let res = reqwest::Client::new()
        .post(server.url("/api/posts?_page=1&_limit=10"))
        .json(&json!({ "title": "Not wrapped" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert!(body.get("pagination").is_none());
    assert_eq!(body["title"], "Not wrapped");

    Ok(())
}

#[tokio::test]
async fn only_countable_collections_are_enveloped() -> Result<()> {
    let server = common::start_server_with(common::seed_document(), |config| {
        config.pagination.counted_collections = common::counted(&["students"]);
    })
    .await?;
    let client = reqwest::Client::new();

    let body = client
        .get(server.url("/api/posts?_page=1&_limit=3"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body.as_array().map(Vec::len), Some(3));

    let body = client
        .get(server.url("/api/students?_page=1&_limit=3"))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["pagination"]["_totalRows"], 12);

    Ok(())
}

#[tokio::test]
async fn private_lists_are_enveloped_too() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let token = server.login(&client, "alice").await?;

    let body = client
        .get(server.url("/api/private/posts?_page=2&_limit=10"))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["pagination"], json!({ "_page": 2, "_limit": 10, "_totalRows": 37 }));

    Ok(())
}
