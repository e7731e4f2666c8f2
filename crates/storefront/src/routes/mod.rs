//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Shop page (product grid)
//! GET  /health                    - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                      - Cart page
//! POST /cart/add                  - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update               - Set quantity (returns cart region)
//! POST /cart/increment            - Quantity + 1 (returns cart region)
//! POST /cart/decrement            - Quantity - 1, floor 1 (returns cart region)
//! POST /cart/remove               - Remove line (returns cart region)
//! POST /cart/clear                - Empty the cart (returns cart region)
//! GET  /cart/count                - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout                  - Acknowledgement only; no order is placed
//!
//! # Contact
//! GET  /contact                   - Contact page
//! POST /contact                   - Submit (returns form fragment)
//! POST /contact/validate/{field}  - Validate one field (returns message fragment)
//!
//! # Assets
//! GET  /static/*                  - Stylesheets and scripts
//! ```

pub mod cart;
pub mod contact;
pub mod home;

use axum::{
    Router,
    extract::Request,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::show).post(contact::submit))
        .route("/validate/{field}", post(contact::validate_field))
}

/// Create all page and fragment routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Shop page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout acknowledgement
        .route("/checkout", post(cart::checkout))
        // Contact routes
        .nest("/contact", contact_routes())
}

/// Build the complete application: routes, static assets and middleware.
///
/// Sentry layers are not included; `main` wraps the result with them.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the store.
async fn health() -> &'static str {
    "ok"
}
