mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{TestWordnet, lin};
use wordnet_similarity::models::config::OracleAccess;
use wordnet_similarity::oracle::PAIR_SCORE_SCALE;
use wordnet_similarity::processing::similarity::{SimilarityService, init_oracle};
use wordnet_similarity::routes::{AppState, build_router, format_score};

fn app(wordnet: &TestWordnet, fallback_on_error: bool) -> Router {
    let service = SimilarityService::new(
        init_oracle(wordnet.path()),
        OracleAccess::Serialized,
        Duration::from_secs(10),
    );
    build_router(AppState {
        service: Arc::new(service),
        fallback_on_error,
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).expect("valid request"))
        .await
        .expect("router answers");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}

#[tokio::test]
async fn single_terms_return_the_pair_score() {
    let wordnet = TestWordnet::new();

    let (status, body) = get(app(&wordnet, true), "/similarity/dog/cat").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format_score(PAIR_SCORE_SCALE * lin(1, 0, 3)));
}

#[tokio::test]
async fn identical_terms_ignore_case() {
    let wordnet = TestWordnet::new();

    let (status, body) = get(app(&wordnet, true), "/similarity/Dog/DOG").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1.0");
}

#[tokio::test]
async fn lists_are_aggregated_regardless_of_order() {
    let wordnet = TestWordnet::new();

    let (_, reversed) = get(app(&wordnet, true), "/similarity/dog,cat/cat,dog").await;
    let (_, in_order) = get(app(&wordnet, true), "/similarity/dog,cat/dog,cat").await;

    assert_eq!(reversed, "1.0");
    assert_eq!(reversed, in_order);
}

#[tokio::test]
async fn partial_overlap_scores_between_zero_and_one() {
    let wordnet = TestWordnet::new();

    let (status, body) = get(app(&wordnet, true), "/similarity/dog,car/dog,zyzzyva").await;
    let score: f64 = body.parse().expect("decimal body");

    assert_eq!(status, StatusCode::OK);
    // dog~dog is matched; car~zyzzyva scores 0 and only enlarges the union.
    assert_eq!(score, 1.0 / 3.0);
}

#[tokio::test]
async fn empty_list_entries_count_as_unknown_terms() {
    let wordnet = TestWordnet::new();

    let (_, leading) = get(app(&wordnet, true), "/similarity/,dog/dog").await;
    let (_, inner) = get(app(&wordnet, true), "/similarity/dog,,cat/dog,cat").await;
    let (_, trailing) = get(app(&wordnet, true), "/similarity/dog,cat,/dog,cat").await;

    // The empty entry stays unmatched and only enlarges the union.
    assert_eq!(leading, "0.5");
    assert_eq!(inner, format_score(2.0 / 3.0));
    assert_eq!(trailing, "1.0");
}

#[tokio::test]
async fn percent_encoded_collocations_are_decoded() {
    let wordnet = TestWordnet::new();

    let (_, body) = get(app(&wordnet, true), "/similarity/dog/domestic%20dog").await;

    assert_eq!(body, "0.5");
}

#[tokio::test]
async fn computation_failures_fall_back_to_zero() {
    let wordnet = TestWordnet::new();

    let (status, pair) = get(app(&wordnet, true), "/similarity/dog/ghost").await;
    let (_, group) = get(app(&wordnet, true), "/similarity/dog,cat/ghost").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(pair, "0.0");
    assert_eq!(group, "0.0");
}

#[tokio::test]
async fn degraded_service_answers_zero() {
    let wordnet = TestWordnet::new();
    wordnet.remove("data.noun");

    let (status, body) = get(app(&wordnet, true), "/similarity/dog/dog").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "0.0");
}

#[tokio::test]
async fn strict_mode_maps_error_kinds_to_status_codes() {
    let wordnet = TestWordnet::new();

    let (status, body) = get(app(&wordnet, false), "/similarity/dog/ghost").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("ghost"), "{body}");

    wordnet.remove("index.noun");
    let (status, _) = get(app(&wordnet, false), "/similarity/dog/cat").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn other_paths_are_not_routed() {
    let wordnet = TestWordnet::new();

    let (status, _) = get(app(&wordnet, true), "/similarity/dog").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
