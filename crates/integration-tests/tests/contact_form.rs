//! Integration tests for the contact form and the contact request log.
//!
//! Run with: cargo test -p corner-shop-integration-tests

#![allow(clippy::indexing_slicing)]

use axum::http::StatusCode;
use corner_shop_integration_tests::TestContext;
use corner_shop_storefront::services::CONTACT_REQUESTS_KEY;

const NAME_MESSAGE: &str = "Please enter your name (at least 2 characters)";
const EMAIL_MESSAGE: &str = "Please enter a valid email address";
const PHONE_MESSAGE: &str = "Please enter the phone number in international format";
const MESSAGE_MESSAGE: &str = "Message is too short (at least 10 characters)";

fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "  Ann  "),
        ("email", "ann@example.com"),
        ("phone", "+7 (999) 123-45-67"),
        ("message", "Do you ship teapots abroad?"),
    ]
}

#[tokio::test]
async fn test_contact_page_renders_form() {
    let ctx = TestContext::new();
    let resp = ctx.get("/contact").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"id="contact-form""#));
    for field in ["name", "email", "phone", "message"] {
        assert!(resp.body.contains(&format!(r#"id="error-{field}""#)));
        assert!(resp.body.contains(&format!(r#"hx-post="/contact/validate/{field}""#)));
    }
    assert!(resp.body.contains(r#"data-link="contact" class="nav-link active" aria-current="page""#));
    assert!(resp.body.contains(r#"id="form-success" class="form-success hidden""#));
}

#[tokio::test]
async fn test_valid_submission_is_recorded() {
    let ctx = TestContext::new();
    let resp = ctx.post_form("/contact", &valid_fields()).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"id="form-success" class="form-success""#));
    assert!(!resp.body.contains("Ann"), "form is reset after success");

    let log = ctx.stored_json(CONTACT_REQUESTS_KEY);
    let entries = log.as_array().expect("log is an array");
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry["name"], "Ann");
    assert_eq!(entry["email"], "ann@example.com");
    assert_eq!(entry["phone"], "+7 (999) 123-45-67");
    assert_eq!(entry["message"], "Do you ship teapots abroad?");
    assert!(entry["ts"].as_i64().is_some_and(|ts| ts > 0));
}

#[tokio::test]
async fn test_submissions_append_in_order() {
    let ctx = TestContext::new();
    ctx.post_form("/contact", &valid_fields()).await;

    let mut second = valid_fields();
    second[0] = ("name", "Boris");
    second[2] = ("phone", "");
    ctx.post_form("/contact", &second).await;

    let log = ctx.stored_json(CONTACT_REQUESTS_KEY);
    let names: Vec<&str> = log
        .as_array()
        .expect("log is an array")
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Ann", "Boris"]);
}

#[tokio::test]
async fn test_invalid_submission_reports_every_field_and_records_nothing() {
    let ctx = TestContext::new();
    let resp = ctx
        .post_form(
            "/contact",
            &[
                ("name", "A"),
                ("email", "not-an-email"),
                ("phone", "12"),
                ("message", "hi"),
            ],
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    for message in [NAME_MESSAGE, EMAIL_MESSAGE, PHONE_MESSAGE, MESSAGE_MESSAGE] {
        assert!(resp.body.contains(message), "missing {message:?}");
    }
    assert!(resp.body.contains(r#"value="not-an-email""#), "input is kept");
    assert!(resp.body.contains(r#"id="form-success" class="form-success hidden""#));
    assert!(ctx.stored(CONTACT_REQUESTS_KEY).is_none());
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let ctx = TestContext::new();
    let resp = ctx.post_form("/contact", &[]).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(NAME_MESSAGE));
    assert!(resp.body.contains(EMAIL_MESSAGE));
    assert!(!resp.body.contains(PHONE_MESSAGE), "phone is optional");
    assert!(ctx.stored(CONTACT_REQUESTS_KEY).is_none());
}

#[tokio::test]
async fn test_corrupt_log_is_replaced() {
    let ctx = TestContext::seeded(CONTACT_REQUESTS_KEY, "oops");
    let resp = ctx.post_form("/contact", &valid_fields()).await;
    assert_eq!(resp.status, StatusCode::OK);

    let log = ctx.stored_json(CONTACT_REQUESTS_KEY);
    assert_eq!(log.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_validate_single_field() {
    let ctx = TestContext::new();

    let resp = ctx
        .post_form("/contact/validate/email", &[("email", "ann@")])
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"id="error-email""#));
    assert!(resp.body.contains(EMAIL_MESSAGE));

    let resp = ctx
        .post_form("/contact/validate/email", &[("email", "ann@example.com")])
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(!resp.body.contains(EMAIL_MESSAGE));

    let resp = ctx
        .post_form("/contact/validate/phone", &[("phone", "")])
        .await;
    assert!(!resp.body.contains(PHONE_MESSAGE));

    let resp = ctx
        .post_form("/contact/validate/message", &[("message", "  too short   ")])
        .await;
    assert!(resp.body.contains(MESSAGE_MESSAGE));
}

#[tokio::test]
async fn test_validate_unknown_field_is_not_found() {
    let ctx = TestContext::new();
    let resp = ctx
        .post_form("/contact/validate/address", &[("address", "x")])
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
