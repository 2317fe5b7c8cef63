
use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn cart_requires_authentication() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::get().uri("/api/v1/cart").to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn garbage_token_is_rejected() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/orders")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn admin_routes_reject_regular_users() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/health")
        .insert_header(bearer(&app.token(false)))
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Admin access required");
}

#[actix_rt::test]
async fn chatbot_answers_unmatched_queries_with_help() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/chatbot")
        .set_json(json!({"query": "hello there"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;

    assert_eq!(body["status"], "success");
    assert_eq!(
        body["message"],
        "I can help you with information about paintings, artists, categories, and prices. What would you like to know?"
    );
    assert_eq!(body["data"], json!([]));
}

#[actix_rt::test]
async fn chatbot_accepts_form_bodies() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/chatbot")
        .set_form([("query", "good morning")])
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn checkout_of_empty_cart_fails() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/checkout")
        .insert_header(bearer(&app.token(false)))
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Your cart is empty");
}

#[actix_rt::test]
async fn placing_order_with_empty_cart_fails() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/place-order")
        .insert_header(bearer(&app.token(false)))
        .set_json(json!({"first_name": "Asha", "city": "Pune"}))
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().get("Location").is_none());
}

#[actix_rt::test]
async fn bodyless_place_order_reaches_the_empty_cart_check() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/place-order")
        .insert_header(bearer(&app.token(false)))
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Your cart is empty");
}

#[actix_rt::test]
async fn removing_unknown_item_reports_failure_envelope() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/cart/remove/5")
        .insert_header(bearer(&app.token(false)))
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "message": "Item not found in cart"}));
}

#[actix_rt::test]
async fn non_numeric_product_id_is_a_bad_request() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/cart/add/abc")
        .insert_header(bearer(&app.token(false)))
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid path parameter"));
}

#[actix_rt::test]
async fn anonymous_submission_reports_every_missing_field() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/submissions")
        .insert_header(multipart_content_type())
        .set_payload(multipart_body(&[("name", "Sunflowers")]))
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");

    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["description", "image"]);
}

#[actix_rt::test]
async fn customization_with_unknown_style_is_rejected() {
    let app = TestApp::new();
    let service = app.service().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/customizations")
        .insert_header(bearer(&app.token(false)))
        .insert_header(multipart_content_type())
        .set_payload(multipart_body(&[
            ("title", "Harbour"),
            ("description", "At dusk"),
            ("style", "cubist"),
            ("size", "small"),
            ("frame", "none"),
        ]))
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["field"] == "style" && d["message"] == "Select a valid choice"));
    assert!(details.iter().any(|d| d["field"] == "image"));
}
