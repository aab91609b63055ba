//! Tavily client tests against a stubbed HTTP endpoint.

use serde_json::json;
use sim_core::SimError;
use sim_core::search::{TavilyClient, TavilyConfig};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> TavilyClient {
    TavilyClient::new(TavilyConfig::new("test-key").with_base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn search_sends_query_and_truncates_excerpts() {
    let server = MockServer::start().await;
    let long_content = "x".repeat(400);

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({
            "api_key": "test-key",
            "query": "tráfico Bogota incidentes hoy",
            "max_results": 5,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"title": "Cierre en la 26", "content": long_content},
                {"title": "Sin contenido"},
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let hits = client(&server).search("Bogota").await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Cierre en la 26");
    assert_eq!(hits[0].excerpt.chars().count(), 300);
    assert_eq!(hits[1].excerpt, "");
}

#[tokio::test]
async fn search_preserves_result_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"title": "primero", "content": "a"},
                {"title": "segundo", "content": "b"},
                {"title": "tercero", "content": "c"},
            ]
        })))
        .mount(&server)
        .await;

    let hits = client(&server).search("Cali").await.unwrap();
    let titles: Vec<_> = hits.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, ["primero", "segundo", "tercero"]);
}

#[tokio::test]
async fn provider_error_propagates_as_search_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let err = client(&server).search("Bogota").await.unwrap_err();
    match err {
        SimError::Search(msg) => assert!(msg.contains("401"), "message was: {msg}"),
        other => panic!("expected Search error, got {other:?}"),
    }
}
