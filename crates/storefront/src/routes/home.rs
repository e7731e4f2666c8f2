//! Shop page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use corner_shop_core::Product;
use tracing::instrument;

use crate::error::Result;
use crate::nav::{Layout, Page};
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    /// Plain decimal posted back by the add-to-cart form.
    pub price_value: String,
    pub price: String,
    pub description: Option<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price_value: product.price.amount().normalize().to_string(),
            price: product.price.display(),
            description: product.description.clone(),
        }
    }
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopTemplate {
    pub layout: Layout,
    pub products: Vec<ProductCardView>,
}

/// Display the shop page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let products = state
        .catalog()
        .products()
        .iter()
        .map(ProductCardView::from)
        .collect();

    Ok(ShopTemplate {
        layout: Layout::new(Page::Shop, state.cart_count().await?),
        products,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use corner_shop_core::Price;

    #[test]
    fn test_card_carries_plain_and_display_price() {
        let product = Product::new("mug", "Mug", Price::from_units(1_500));
        let card = ProductCardView::from(&product);
        assert_eq!(card.price_value, "1500");
        assert_eq!(card.price, "1\u{a0}500 ₽");
    }

    #[test]
    fn test_shop_page_renders_cards_and_active_nav() {
        let html = ShopTemplate {
            layout: Layout::new(Page::Shop, 0),
            products: vec![ProductCardView::from(&Product::new(
                "mug",
                "Mug",
                Price::from_units(500),
            ))],
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"data-id="mug""#));
        assert!(html.contains(r#"data-price="500""#));
        assert!(html.contains(r#"aria-current="page""#));
        assert!(html.contains(r#"id="cart-count""#));
    }
}
