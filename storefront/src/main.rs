//! Demo storefront host: seeds an in-memory catalog, registers the
//! meta-filter widget and serves a product listing page with it.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::{Router, routing::get};
use common::constraints::ConstraintSet;
use common::filter::MetaValue;
use common::listing::ListingContext;
use tracing::info;
use widget::catalog::{MemoryCatalog, ProductRecord};
use widget::request::{FilterRequest, parse_preserved_params};
use widget::widget::{MetaFilterWidget, WidgetChrome, register_widget};


struct AppState {
    catalog: Arc<MemoryCatalog>,
    widget: MetaFilterWidget<Arc<MemoryCatalog>>,
}

fn seed_catalog() -> MemoryCatalog {
    MemoryCatalog::new(vec![
        ProductRecord::published("hoodie-red", "Red hoodie")
            .with_term("product_cat", "hoodies")
            .with_meta("_stock_status", MetaValue::String("instock".to_string()))
            .with_meta("_clearance", MetaValue::Int(1)),
        ProductRecord::published("hoodie-blue", "Blue hoodie")
            .with_term("product_cat", "hoodies")
            .with_meta("_stock_status", MetaValue::String("instock".to_string())),
        ProductRecord::published("hoodie-green", "Green hoodie")
            .with_term("product_cat", "hoodies")
            .with_meta("_stock_status", MetaValue::String("outofstock".to_string()))
            .with_meta("_clearance", MetaValue::Int(1)),
        ProductRecord::published("mug-classic", "Classic mug")
            .with_term("product_cat", "mugs")
            .with_meta("_stock_status", MetaValue::String("instock".to_string())),
    ])
}

async fn shop_page(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Html<String> {
    let request = FilterRequest::from_query_pairs(&pairs);
    let preserved = parse_preserved_params(&pairs);

    let mut base = ConstraintSet::default();
    if let Some(search) = &preserved.search {
        base.search_text = search.clone();
    }

    let listing = ListingContext {
        base_url: "/".to_string(),
        constraints: base.clone(),
    };

    // the primary listing query runs with the widget's augmentation
    let augmented = state.widget.augment_main_query(&base, &request);
    let products = state.catalog.list_products(&augmented);

    let output = state
        .widget
        .render(&WidgetChrome::default(), &listing, &request, &preserved)
        .await;
    let widget_html = output.html.unwrap_or_default();
    let form_script = output.form_script.unwrap_or_default();

    let product_items = products
        .iter()
        .map(|p| format!("<li>{}</li>", html_escape::encode_text(&p.search_text)))
        .collect::<Vec<_>>()
        .join("");

    Html(format!(
        "<!doctype html>
<html>
<head><title>Shop</title></head>
<body>
<aside>{widget_html}</aside>
<main><ul class=\"products\">{product_items}</ul></main>
{form_script}
</body>
</html>"
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = Arc::new(seed_catalog());

    // the widget only registers when the catalog subsystem is present
    let widget = match register_widget(Some(catalog.clone())) {
        Some(widget) => widget,
        None => {
            info!("no catalog engine, nothing to serve");
            return Ok(());
        }
    };

    let state = Arc::new(AppState { catalog, widget });
    let app = Router::new().route("/", get(shop_page)).with_state(state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or("127.0.0.1:8080".to_string());
    info!("storefront listening on http://{}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
