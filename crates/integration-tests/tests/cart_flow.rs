//! Integration tests for the shop page, the cart and the header badge.
//!
//! Run with: cargo test -p corner-shop-integration-tests

#![allow(clippy::indexing_slicing)]

use axum::http::StatusCode;
use corner_shop_integration_tests::TestContext;
use corner_shop_storefront::services::CART_KEY;

const NBSP: char = '\u{a0}';

async fn add(ctx: &TestContext, id: &str, name: &str, price: &str) -> String {
    let resp = ctx
        .post_form("/cart/add", &[("id", id), ("name", name), ("price", price)])
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header("hx-trigger"), Some("cart-updated"));
    resp.body.trim().to_string()
}

fn stored_cart(ctx: &TestContext) -> Vec<serde_json::Value> {
    ctx.stored_json(CART_KEY)
        .as_array()
        .cloned()
        .expect("cart is a JSON array")
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let resp = ctx.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_shop_page_lists_catalog_with_empty_badge() {
    let ctx = TestContext::new();
    let resp = ctx.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"id="product-grid""#));
    assert!(resp.body.contains(r#"data-id="mug""#));
    assert!(resp.body.contains(r#"data-price="500""#));
    assert!(resp.body.contains(&format!("500{NBSP}₽")));
    assert!(resp.body.contains(&format!("12{NBSP}900{NBSP}₽")));
    assert!(resp.body.contains(r#"data-link="shop" class="nav-link active" aria-current="page""#));
    assert!(
        resp.body.contains(">0</span>"),
        "badge should start at zero"
    );
}

#[tokio::test]
async fn test_responses_carry_security_headers_and_request_id() {
    let ctx = TestContext::new();
    let resp = ctx.get("/").await;

    assert_eq!(resp.header("x-frame-options"), Some("DENY"));
    assert_eq!(resp.header("x-content-type-options"), Some("nosniff"));
    assert!(
        resp.header("content-security-policy")
            .is_some_and(|csp| csp.contains("frame-ancestors 'none'"))
    );
    assert!(resp.header("x-request-id").is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let ctx = TestContext::new();
    let resp = ctx.get("/static/css/main.css").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(".hidden"));
}

#[tokio::test]
async fn test_add_buttons_confirm_with_static_script() {
    let ctx = TestContext::new();
    let page = ctx.get("/").await;
    assert!(page.body.contains(r#"data-added-label="Added!""#));
    assert!(page.body.contains(r#"<script src="/static/js/shop.js" defer></script>"#));

    let script = ctx.get("/static/js/shop.js").await;
    assert_eq!(script.status, StatusCode::OK);
    assert!(script.body.contains("htmx:afterRequest"));
    assert!(script.body.contains("addedLabel"));
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let ctx = TestContext::new();
    assert_eq!(ctx.get("/nope").await.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Adding
// ============================================================================

#[tokio::test]
async fn test_adding_same_product_twice_keeps_one_line() {
    let ctx = TestContext::new();

    assert_eq!(add(&ctx, "mug", "Mug", "500").await, "1");
    assert_eq!(add(&ctx, "mug", "Mug", "500").await, "2");

    let lines = stored_cart(&ctx);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], "mug");
    assert_eq!(lines[0]["qty"], 2);

    let page = ctx.get("/cart").await;
    assert!(page.body.contains(r#"data-id="mug""#));
    assert!(page.body.contains(r#"value="2""#));
    assert!(page.body.contains(&format!("1{NBSP}000{NBSP}₽")));
    assert!(page.body.contains(r#"id="cart-empty" class="hidden""#));
}

#[tokio::test]
async fn test_badge_counts_units_across_lines() {
    let ctx = TestContext::new();
    add(&ctx, "mug", "Mug", "500").await;
    add(&ctx, "mug", "Mug", "500").await;
    add(&ctx, "tray", "Tray", "1250").await;

    let resp = ctx.get("/cart/count").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body.trim(), "3");

    let page = ctx.get("/contact").await;
    assert!(page.body.contains(">3</span>"));
}

#[tokio::test]
async fn test_second_add_keeps_first_name_and_price() {
    let ctx = TestContext::new();
    add(&ctx, "mug", "Mug", "500").await;
    add(&ctx, "mug", "Renamed", "999").await;

    let lines = stored_cart(&ctx);
    assert_eq!(lines[0]["name"], "Mug");
    assert_eq!(lines[0]["qty"], 2);

    let page = ctx.get("/cart").await;
    assert!(!page.body.contains("Renamed"));
}

#[tokio::test]
async fn test_unreadable_price_adds_at_zero() {
    let ctx = TestContext::new();
    add(&ctx, "gift", "Gift", "free").await;

    let page = ctx.get("/cart").await;
    assert!(page.body.contains(&format!("0{NBSP}₽")));
}

// ============================================================================
// Changing quantities
// ============================================================================

#[tokio::test]
async fn test_quantity_field_clamps_invalid_input() {
    let ctx = TestContext::new();
    add(&ctx, "mug", "Mug", "500").await;

    let resp = ctx
        .post_form("/cart/update", &[("id", "mug"), ("qty", "7 pcs")])
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header("hx-trigger"), Some("cart-updated"));
    assert!(resp.body.contains(r#"value="7""#));
    assert!(resp.body.contains(&format!("3{NBSP}500{NBSP}₽")));

    for raw in ["abc", "0", ""] {
        let resp = ctx
            .post_form("/cart/update", &[("id", "mug"), ("qty", raw)])
            .await;
        assert!(resp.body.contains(r#"value="1""#), "input {raw:?}");
        assert_eq!(stored_cart(&ctx)[0]["qty"], 1);
    }
}

#[tokio::test]
async fn test_increment_and_decrement_floor_at_one() {
    let ctx = TestContext::new();
    add(&ctx, "mug", "Mug", "500").await;

    ctx.post_form("/cart/increment", &[("id", "mug")]).await;
    ctx.post_form("/cart/increment", &[("id", "mug")]).await;
    assert_eq!(stored_cart(&ctx)[0]["qty"], 3);

    for _ in 0..5 {
        let resp = ctx.post_form("/cart/decrement", &[("id", "mug")]).await;
        assert_eq!(resp.status, StatusCode::OK);
    }
    assert_eq!(stored_cart(&ctx)[0]["qty"], 1);
}

#[tokio::test]
async fn test_unknown_line_is_a_no_op() {
    let ctx = TestContext::new();
    add(&ctx, "mug", "Mug", "500").await;

    for uri in ["/cart/increment", "/cart/decrement", "/cart/remove"] {
        let resp = ctx.post_form(uri, &[("id", "ghost")]).await;
        assert_eq!(resp.status, StatusCode::OK, "{uri}");
    }
    let resp = ctx
        .post_form("/cart/update", &[("id", "ghost"), ("qty", "9")])
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    let lines = stored_cart(&ctx);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["qty"], 1);
}

// ============================================================================
// Removing, clearing, checkout
// ============================================================================

#[tokio::test]
async fn test_removing_last_line_shows_empty_state() {
    let ctx = TestContext::new();
    add(&ctx, "mug", "Mug", "500").await;

    let resp = ctx.post_form("/cart/remove", &[("id", "mug")]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"id="cart-empty" class="cart-empty""#));
    assert!(resp.body.contains(r#"id="cart-summary" class="cart-summary hidden""#));
    assert!(stored_cart(&ctx).is_empty());
}

#[tokio::test]
async fn test_clear_empties_cart() {
    let ctx = TestContext::new();
    add(&ctx, "mug", "Mug", "500").await;
    add(&ctx, "tray", "Tray", "1250").await;

    let resp = ctx.post_form("/cart/clear", &[]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(stored_cart(&ctx).is_empty());
    assert_eq!(ctx.get("/cart/count").await.body.trim(), "0");
}

#[tokio::test]
async fn test_checkout_only_acknowledges() {
    let ctx = TestContext::new();
    add(&ctx, "mug", "Mug", "500").await;

    let resp = ctx.post_form("/checkout", &[]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("checkout is not implemented"));

    assert_eq!(stored_cart(&ctx).len(), 1);
}

#[tokio::test]
async fn test_mixed_operations_total() {
    let ctx = TestContext::new();
    add(&ctx, "mug", "Mug", "500").await;
    add(&ctx, "teapot", "Teapot", "3200").await;
    add(&ctx, "tea", "Tea", "450.50").await;
    ctx.post_form("/cart/update", &[("id", "mug"), ("qty", "4")])
        .await;
    ctx.post_form("/cart/remove", &[("id", "teapot")]).await;

    // 4 x 500 + 450.5
    let page = ctx.get("/cart").await;
    assert!(page.body.contains(&format!("2{NBSP}450,5{NBSP}₽")));
}

// ============================================================================
// Stored data
// ============================================================================

#[tokio::test]
async fn test_corrupt_cart_reads_as_empty_and_recovers() {
    let ctx = TestContext::seeded(CART_KEY, "{not json");

    let page = ctx.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(r#"id="cart-empty" class="cart-empty""#));

    assert_eq!(add(&ctx, "mug", "Mug", "500").await, "1");
    assert_eq!(stored_cart(&ctx).len(), 1);
}

#[tokio::test]
async fn test_lines_without_quantity_count_as_one() {
    let ctx = TestContext::seeded(
        CART_KEY,
        r#"[{"id": "mug", "name": "Mug", "price": 500},
            {"id": "tray", "name": "Tray", "price": "1250", "qty": 2}]"#,
    );

    assert_eq!(ctx.get("/cart/count").await.body.trim(), "3");

    let page = ctx.get("/cart").await;
    assert!(page.body.contains(&format!("3{NBSP}000{NBSP}₽")));
}
