//! Integration tests for the Zotero catalog client against a mock server.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zotag_core::{Config, ZoteroClient};

fn test_config() -> Config {
    Config {
        library_id: "12345".to_string(),
        library_type: "group".to_string(),
        zotero_api_key: "test-zotero-key".to_string(),
        anthropic_api_key: "test-anthropic-key".to_string(),
    }
}

fn item_json(key: &str, title: &str) -> serde_json::Value {
    json!({
        "key": key,
        "version": 10,
        "data": {
            "key": key,
            "itemType": "journalArticle",
            "title": title,
            "tags": []
        }
    })
}

#[tokio::test]
async fn test_top_items_sends_api_key_and_preserves_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/12345/items/top"))
        .and(header("Zotero-API-Key", "test-zotero-key"))
        .and(header("Zotero-API-Version", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            item_json("AAAA0001", "First"),
            item_json("BBBB0002", "Second"),
        ])))
        .mount(&server)
        .await;

    let client = ZoteroClient::with_base_url(&test_config(), server.uri()).unwrap();
    let items = client.top_items(None).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].key, "AAAA0001");
    assert_eq!(items[1].key, "BBBB0002");
    assert_eq!(items[0].data.title, "First");
}

#[tokio::test]
async fn test_top_items_passes_limit_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/12345/items/top"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ZoteroClient::with_base_url(&test_config(), server.uri()).unwrap();
    let items = client.top_items(Some(5)).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_user_library_uses_users_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/12345/items/top"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config();
    config.library_type = "user".to_string();
    let client = ZoteroClient::with_base_url(&config, server.uri()).unwrap();
    client.top_items(None).await.unwrap();
}

#[tokio::test]
async fn test_children_fetches_attachments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/12345/items/AAAA0001/children"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "key": "PDF00001",
                "version": 2,
                "data": {
                    "key": "PDF00001",
                    "itemType": "attachment",
                    "contentType": "application/pdf",
                    "url": "https://example.com/paper.pdf"
                }
            }
        ])))
        .mount(&server)
        .await;

    let client = ZoteroClient::with_base_url(&test_config(), server.uri()).unwrap();
    let children = client.children("AAAA0001").await.unwrap();

    assert_eq!(children.len(), 1);
    assert_eq!(
        children[0].data.content_type.as_deref(),
        Some("application/pdf")
    );
}

#[tokio::test]
async fn test_update_item_sends_version_precondition() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/12345/items/AAAA0001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json("AAAA0001", "Paper")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/groups/12345/items/AAAA0001"))
        .and(header("If-Unmodified-Since-Version", "10"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = ZoteroClient::with_base_url(&test_config(), server.uri()).unwrap();
    let item = client.item("AAAA0001").await.unwrap();
    client.update_item(&item).await.unwrap();
}

#[tokio::test]
async fn test_update_item_conflict_surfaces_as_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/12345/items/AAAA0001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json("AAAA0001", "Paper")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/groups/12345/items/AAAA0001"))
        .respond_with(ResponseTemplate::new(412))
        .mount(&server)
        .await;

    let client = ZoteroClient::with_base_url(&test_config(), server.uri()).unwrap();
    let item = client.item("AAAA0001").await.unwrap();
    let error = client.update_item(&item).await.unwrap_err();
    assert!(
        error.to_string().contains("412"),
        "expected 412 in: {error}"
    );
}

#[tokio::test]
async fn test_http_error_names_url_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/12345/items/top"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = ZoteroClient::with_base_url(&test_config(), server.uri()).unwrap();
    let error = client.top_items(None).await.unwrap_err();
    let msg = error.to_string();
    assert!(msg.contains("403"), "expected status in: {msg}");
    assert!(msg.contains("items/top"), "expected URL in: {msg}");
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/12345/items/top"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ZoteroClient::with_base_url(&test_config(), server.uri()).unwrap();
    let error = client.top_items(None).await.unwrap_err();
    assert!(
        error.to_string().contains("unexpected catalog response"),
        "expected decode error, got: {error}"
    );
}
