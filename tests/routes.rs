use std::sync::Arc;

use btc_profit_calculator::config::Settings;
use btc_profit_calculator::models::Locale;
use btc_profit_calculator::routes::routes;
use serde_json::{json, Value};
use warp::http::StatusCode;

fn settings() -> Arc<Settings> {
    Arc::new(Settings::default())
}

fn body_text(body: &[u8]) -> String {
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

#[tokio::test]
async fn form_page_renders_without_result() {
    let response = warp::test::request()
        .method("GET")
        .path("/")
        .reply(&routes(settings()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.body());
    assert!(html.contains("Calculadora Bitcoin-USDT con Comisión"));
    assert!(!html.contains(r#"id="result""#));
}

#[tokio::test]
async fn form_page_follows_accept_language() {
    let response = warp::test::request()
        .method("GET")
        .path("/")
        .header("accept-language", "en-US,en;q=0.9")
        .reply(&routes(settings()))
        .await;

    let html = body_text(response.body());
    assert!(html.contains("Bitcoin-USDT Calculator with Commission"));
    assert!(html.contains(r#"<html lang="en">"#));
}

#[tokio::test]
async fn submitting_the_form_shows_the_report_and_keeps_values() {
    let response = warp::test::request()
        .method("POST")
        .path("/?lang=en")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("investment=1000&buy_price=32000&broker_commission=0&current_price=40000&target_profit=7&mode=current")
        .reply(&routes(settings()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.body());
    assert!(html.contains("Bitcoin amount: 0.03125000 BTC"));
    assert!(html.contains("Net profit/loss: $250.00 USDT (25.00%)"));
    // the hidden target field is not cleared
    assert!(html.contains(r#"name="target_profit" type="number" step="any" value="7""#));
}

#[tokio::test]
async fn submitting_invalid_form_shows_message_in_the_panel() {
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("investment=abc&buy_price=30000&broker_commission=0.1&mode=target")
        .reply(&routes(settings()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.body());
    assert!(html.contains("Por favor, ingrese valores numéricos válidos para la inversión"));
    assert!(!html.contains("Cantidad de Bitcoin"));
}

#[tokio::test]
async fn api_calculates_target_report() {
    let response = warp::test::request()
        .method("POST")
        .path("/api/v1/calculate")
        .header("accept-language", "en")
        .json(&json!({
            "investment": 1000,
            "buy_price": "30000",
            "broker_commission": "0.1",
            "target_profit": 4,
            "mode": "target"
        }))
        .reply(&routes(settings()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["mode"], "target");
    assert_eq!(body["report"]["mode"], "target");
    let required_profit = body["report"]["required_profit"].as_f64().unwrap();
    assert!((required_profit - 40.0).abs() < 1e-9);
    let sell_price = body["report"]["target_sell_price"].as_f64().unwrap();
    assert!((sell_price - 31292.553).abs() < 1e-2);
    assert_eq!(body["lines"][3]["label"], "Target sell price");
    assert_eq!(body["lines"][3]["value"], "$31292.55 USDT");
}

#[tokio::test]
async fn api_rejects_missing_current_price() {
    let response = warp::test::request()
        .method("POST")
        .path("/api/v1/calculate?lang=es")
        .json(&json!({
            "investment": "1000",
            "buy_price": "30000",
            "broker_commission": "0.1",
            "mode": "current"
        }))
        .reply(&routes(settings()))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["fields"], json!(["current_price"]));
    assert_eq!(
        body["error"],
        "Por favor, ingrese un valor numérico válido para el precio actual."
    );
}

#[tokio::test]
async fn api_names_all_required_fields() {
    let settings = Arc::new(Settings {
        default_locale: Locale::En,
        ..Settings::default()
    });
    let response = warp::test::request()
        .method("POST")
        .path("/api/v1/calculate")
        .json(&json!({ "buy_price": "x", "mode": "target", "target_profit": "4" }))
        .reply(&routes(settings))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["fields"], json!(["investment", "buy_price", "broker_commission"]));
    assert!(body["error"].as_str().unwrap().starts_with("Please enter valid numeric values"));
}

#[tokio::test]
async fn api_reports_malformed_json_and_unknown_paths() {
    let filter = routes(settings());

    let response = warp::test::request()
        .method("POST")
        .path("/api/v1/calculate")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&filter)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = warp::test::request()
        .method("GET")
        .path("/api/v1/missing")
        .reply(&filter)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = warp::test::request()
        .method("GET")
        .path("/api/v1/calculate")
        .reply(&filter)
        .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
