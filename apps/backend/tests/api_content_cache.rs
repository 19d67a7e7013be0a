//! In-memory caching of upstream content.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;

use common::TestContext;

const EDITIONS_INDEX: &str = "/hadith/editions.json";

fn edition_path(name: &str) -> String {
    format!("/hadith/editions/{}.min.json", name)
}

async fn fetch(server: &TestServer, edition: &str) {
    server
        .get(&format!("/api/hadith/editions/{}", edition))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_hadith_index_fetched_once() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    server.get("/api/hadith/books").await.assert_status_ok();
    server.get("/api/hadith/books").await.assert_status_ok();
    server
        .get("/api/hadith/books/bukhari/editions")
        .await
        .assert_status_ok();

    assert_eq!(ctx.upstream_hits.count(EDITIONS_INDEX), 1);
}

#[tokio::test]
async fn test_adhkar_fetched_once() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    server.get("/api/adhkar").await.assert_status_ok();
    server.get("/api/adhkar").await.assert_status_ok();
    server
        .get("/api/adhkar/nothing")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    assert_eq!(ctx.upstream_hits.count("/adhkar.json"), 1);
}

#[tokio::test]
async fn test_edition_fetched_once() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    for _ in 0..3 {
        server
            .get("/api/hadith/editions/eng-bukhari")
            .await
            .assert_status_ok();
    }
    server
        .get("/api/hadith/editions/eng-bukhari/1/download")
        .await
        .assert_status_ok();

    assert_eq!(ctx.upstream_hits.count(&edition_path("eng-bukhari")), 1);
}

#[tokio::test]
async fn test_least_recently_used_edition_is_evicted() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    // Fill all four slots, then use the oldest again.
    for name in ["eng-bukhari", "ara-bukhari", "eng-abudawud", "ara-muslim"] {
        fetch(&server, name).await;
    }
    fetch(&server, "eng-bukhari").await;

    // A fifth edition pushes out "ara-bukhari", not the refreshed "eng-bukhari".
    fetch(&server, "eng-muslim").await;
    fetch(&server, "eng-bukhari").await;
    fetch(&server, "ara-bukhari").await;

    assert_eq!(ctx.upstream_hits.count(&edition_path("eng-bukhari")), 1);
    assert_eq!(ctx.upstream_hits.count(&edition_path("ara-bukhari")), 2);
    assert_eq!(ctx.upstream_hits.count(&edition_path("eng-muslim")), 1);
}
