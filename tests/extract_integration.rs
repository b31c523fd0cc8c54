//! Integration tests for webpage excerpt extraction against a mock server.
//!
//! The policy tests use `expect(0)` mocks: when the flags say skip, the
//! extractor must not make any network call at all.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zotag_core::{ContentExtractor, EXCERPT_WORD_CAP, ProcessingOptions};

fn options(url_fallback: bool, url_always: bool) -> ProcessingOptions {
    ProcessingOptions {
        url_fallback,
        url_always,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_url_always_extracts_article_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body>\
             <nav>Home</nav>\
             <article>Scaling laws for neural language models.</article>\
             <footer>Legal</footer>\
             </body></html>",
        ))
        .mount(&server)
        .await;

    let extractor = ContentExtractor::new(&options(false, true)).unwrap();
    let excerpt = extractor
        .webpage_excerpt(&format!("{}/post", server.uri()), true)
        .await;

    assert_eq!(
        excerpt.as_deref(),
        Some("Scaling laws for neural language models.")
    );
}

#[tokio::test]
async fn test_webpage_fetch_uses_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .and(header("user-agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>Content.</p></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let extractor = ContentExtractor::new(&options(false, true)).unwrap();
    let excerpt = extractor
        .webpage_excerpt(&format!("{}/post", server.uri()), false)
        .await;
    assert_eq!(excerpt.as_deref(), Some("Content."));
}

#[tokio::test]
async fn test_url_fallback_with_pdf_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let extractor = ContentExtractor::new(&options(true, false)).unwrap();
    let excerpt = extractor
        .webpage_excerpt(&format!("{}/post", server.uri()), true)
        .await;

    assert!(excerpt.is_none());
}

#[tokio::test]
async fn test_url_fallback_without_pdf_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><main>Fallback text.</main></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let extractor = ContentExtractor::new(&options(true, false)).unwrap();
    let excerpt = extractor
        .webpage_excerpt(&format!("{}/post", server.uri()), false)
        .await;

    assert_eq!(excerpt.as_deref(), Some("Fallback text."));
}

#[tokio::test]
async fn test_http_error_yields_absent_excerpt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let extractor = ContentExtractor::new(&options(false, true)).unwrap();
    let excerpt = extractor
        .webpage_excerpt(&format!("{}/gone", server.uri()), false)
        .await;

    assert!(excerpt.is_none());
}

#[tokio::test]
async fn test_long_page_truncates_to_word_cap_in_order() {
    let words: Vec<String> = (0..5000).map(|i| format!("w{i}")).collect();
    let html = format!("<html><body><article>{}</article></body></html>", words.join(" "));

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/long"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let extractor = ContentExtractor::new(&options(false, true)).unwrap();
    let excerpt = extractor
        .webpage_excerpt(&format!("{}/long", server.uri()), false)
        .await
        .unwrap();

    let out: Vec<&str> = excerpt.split_whitespace().collect();
    assert_eq!(out.len(), EXCERPT_WORD_CAP);
    assert_eq!(out[0], "w0");
    assert_eq!(out[EXCERPT_WORD_CAP - 1], "w1999");
}

#[tokio::test]
async fn test_pdf_excerpt_bad_bytes_yield_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/paper.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not a pdf".to_vec()))
        .mount(&server)
        .await;

    let extractor_options = ProcessingOptions {
        parse_pdf: true,
        ..Default::default()
    };
    let extractor = ContentExtractor::new(&extractor_options).unwrap();
    let excerpt = extractor
        .pdf_excerpt(&format!("{}/paper.pdf", server.uri()))
        .await;

    assert!(excerpt.is_none());
}
