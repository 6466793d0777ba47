//! End-to-end HTTP tests over the seeded two-sock catalogue.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body};
use catalogue::domain::TRACE_ID_HEADER;
use catalogue::domain::ports::NoOpRequestMetrics;
use catalogue::test_support::fixtures::red_and_blue;
use catalogue::test_support::logs::CapturedLogs;
use serde_json::Value;

mod support;

use support::http_state_over;

async fn body_json(res: actix_web::dev::ServiceResponse) -> Value {
    let bytes = read_body(res).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[actix_web::test]
async fn seeded_catalogue_scenario() {
    let app = catalogue_app!(http_state_over(red_and_blue()), Arc::new(NoOpRequestMetrics));

    let res = call_service(&app, TestRequest::get().uri("/catalogue?tags=red").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    let ids: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|sock| sock["id"].as_str())
        .collect();
    assert_eq!(ids, ["1"]);

    let res = call_service(&app, TestRequest::get().uri("/catalogue/99").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body = body_json(res).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["traceId"].as_str(), Some(header.as_str()));

    let res = call_service(
        &app,
        TestRequest::get().uri("/catalogue/size?tags=blue").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, serde_json::json!({ "size": 1 }));

    let res = call_service(&app, TestRequest::get().uri("/tags").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body_json(res).await,
        serde_json::json!({ "tags": ["blue", "red", "warm"] })
    );
}

#[actix_web::test]
async fn invalid_paging_is_a_bad_request_with_details() {
    let app = catalogue_app!(http_state_over(red_and_blue()), Arc::new(NoOpRequestMetrics));

    let res = call_service(
        &app,
        TestRequest::get().uri("/catalogue?pageNum=0").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "pageNum");
}

#[actix_web::test]
async fn health_is_ok_and_carries_both_checks() {
    let app = catalogue_app!(http_state_over(red_and_blue()), Arc::new(NoOpRequestMetrics));

    for uri in ["/health", "/healthz"] {
        let res = call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        let statuses: Vec<&str> = body["health"]
            .as_array()
            .expect("health array")
            .iter()
            .filter_map(|check| check["status"].as_str())
            .collect();
        assert_eq!(statuses, ["OK", "OK"]);
    }
}

#[actix_web::test]
async fn each_service_call_is_logged_once_with_its_method() {
    let logs = CapturedLogs::install();
    let app = catalogue_app!(http_state_over(red_and_blue()), Arc::new(NoOpRequestMetrics));

    let res = call_service(&app, TestRequest::get().uri("/catalogue/99").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let lines = logs.lines();
    let get_calls = lines
        .iter()
        .filter(|line| {
            line.contains(r#""method":"Get""#) && line.contains("catalogue call completed")
        })
        .count();
    assert_eq!(get_calls, 1, "captured: {lines:?}");
    assert!(lines.iter().any(|line| line.contains("request served")));
}
