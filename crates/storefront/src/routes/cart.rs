//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation loads the stored cart, applies one change, saves it, and
//! answers with the whole cart region re-rendered plus an `HX-Trigger` so
//! the header badge refreshes itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use corner_shop_core::{Cart, CartLine, Price, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::nav::{Layout, Page};
use crate::services::CartRepository;
use crate::state::AppState;

/// Tells the header badge to refresh itself.
const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
    pub is_empty: bool,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            quantity: line.qty.get(),
            price: line.price.display(),
            line_price: line.subtotal().display(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total().display(),
            item_count: cart.count(),
            is_empty: cart.is_empty(),
        }
    }
}

/// Add to cart form data, copied from the product card.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: String,
}

/// Form data naming a single cart line.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub id: String,
}

/// Quantity field edit. `qty` is raw user text.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityForm {
    pub id: String,
    #[serde(default)]
    pub qty: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: CartView,
}

/// Cart region fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Checkout acknowledgement fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_notice.html")]
pub struct CheckoutNoticeTemplate {
    pub item_count: u64,
}

// =============================================================================
// Helpers
// =============================================================================

/// Run one load-change-save cycle while holding the cart lock.
async fn apply<T, F>(state: &AppState, change: F) -> Result<(Cart, T)>
where
    F: FnOnce(&mut Cart) -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(state.with_carts(move |carts| carts.update(change)).await??)
}

/// Re-rendered cart region with the badge refresh trigger.
fn cart_region(cart: &Cart) -> Response {
    (
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartItemsTemplate {
            cart: CartView::from(cart),
        },
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let cart = state.with_carts(CartRepository::load).await?;

    Ok(CartShowTemplate {
        layout: Layout::new(Page::Cart, cart.count()),
        cart: CartView::from(&cart),
    })
}

/// Add item to cart (HTMX).
///
/// Returns the updated count badge and triggers `cart-updated`.
#[instrument(skip(state), fields(product_id = %form.id))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let price = Price::parse_lenient(&form.price);
    if price.is_defaulted() {
        tracing::warn!(raw_price = %form.price, "Unreadable product price, adding at 0");
    }

    let AddToCartForm { id, name, .. } = form;
    let product_id = ProductId::new(id);
    let breadcrumb_id = product_id.to_string();

    let (cart, quantity) =
        apply(&state, move |cart| cart.add_item(product_id, name, price.into_inner())).await?;

    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("product_id", breadcrumb_id.as_str())]),
    );
    tracing::info!(quantity = quantity.get(), "Added to cart");

    Ok((
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartCountTemplate {
            count: cart.count(),
        },
    )
        .into_response())
}

/// Set a line's quantity from the quantity field (HTMX).
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateQuantityForm>,
) -> Result<Response> {
    let UpdateQuantityForm { id, qty } = form;
    let (cart, outcome) = apply(&state, move |cart| cart.set_quantity(&id, &qty)).await?;

    if outcome.is_defaulted() {
        tracing::debug!("Invalid quantity input, clamped to 1");
    }

    Ok(cart_region(&cart))
}

/// Add one unit to a line (HTMX).
#[instrument(skip(state))]
pub async fn increment(
    State(state): State<AppState>,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let (cart, _) = apply(&state, move |cart| cart.increment(&form.id)).await?;
    Ok(cart_region(&cart))
}

/// Remove one unit from a line, never below 1 (HTMX).
#[instrument(skip(state))]
pub async fn decrement(
    State(state): State<AppState>,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let (cart, _) = apply(&state, move |cart| cart.decrement(&form.id)).await?;
    Ok(cart_region(&cart))
}

/// Remove a line (HTMX).
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Form(form): Form<LineForm>) -> Result<Response> {
    let (cart, removed) = apply(&state, move |cart| cart.remove_item(&form.id)).await?;

    if let Some(line) = removed {
        tracing::info!(product_id = %line.id, "Removed from cart");
    }

    Ok(cart_region(&cart))
}

/// Empty the cart (HTMX).
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Response> {
    let cart = state.with_carts(CartRepository::clear).await??;
    Ok(cart_region(&cart))
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(CartCountTemplate {
        count: state.cart_count().await?,
    })
}

/// Acknowledge a checkout request.
///
/// This shop takes no orders: nothing is charged, created or cleared.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let item_count = state.cart_count().await?;
    tracing::info!(item_count, "Checkout requested; ordering is not available");

    Ok(CheckoutNoticeTemplate { item_count })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(ProductId::new("p1"), "Mug <b>", Price::from_units(1_500));
        cart.increment("p1");
        cart
    }

    #[test]
    fn test_cart_view_formats_prices() {
        let view = CartView::from(&sample_cart());
        assert_eq!(view.item_count, 2);
        assert_eq!(view.total, "3\u{a0}000 ₽");

        let item = view.items.first().unwrap();
        assert_eq!(item.price, "1\u{a0}500 ₽");
        assert_eq!(item.line_price, "3\u{a0}000 ₽");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_cart_items_render_rows_and_hide_empty_state() {
        let html = CartItemsTemplate {
            cart: CartView::from(&sample_cart()),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"data-id="p1""#));
        assert!(html.contains("Mug &#60;b&#62;") || html.contains("Mug &lt;b&gt;"));
        assert!(html.contains(r#"id="cart-empty" class="hidden""#));
        assert!(html.contains(r#"id="cart-summary" class="cart-summary""#));
        assert!(html.contains(r#"value="2""#));
    }

    #[test]
    fn test_empty_cart_renders_empty_state_and_hides_summary() {
        let html = CartItemsTemplate {
            cart: CartView::from(&Cart::new()),
        }
        .render()
        .unwrap();

        assert!(!html.contains("cart-item\""));
        assert!(html.contains(r#"id="cart-empty" class="cart-empty""#));
        assert!(html.contains(r#"id="cart-summary" class="cart-summary hidden""#));
    }

    #[test]
    fn test_checkout_notice_mentions_no_order() {
        let html = CheckoutNoticeTemplate { item_count: 3 }.render().unwrap();
        assert!(html.contains("not implemented"));
    }
}
