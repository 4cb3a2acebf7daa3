//! End-to-end widget scenarios over an in-memory catalog.

use common::constraints::ConstraintSet;
use common::filter::MetaValue;
use common::link_params::PreservedParams;
use common::listing::ListingContext;
use widget::catalog::{CatalogEngine, MemoryCatalog, ProductRecord};
use widget::request::FilterRequest;
use widget::widget::{MetaFilterWidget, WidgetChrome, register_widget};

fn seeded_catalog() -> MemoryCatalog {
    MemoryCatalog::new(vec![
        ProductRecord::published("p1", "red hoodie")
            .with_meta("_clearance", MetaValue::Int(1))
            .with_meta("_stock_status", MetaValue::String("outofstock".to_string())),
        ProductRecord::published("p2", "blue hoodie")
            .with_meta("_clearance", MetaValue::Int(1))
            .with_meta("_stock_status", MetaValue::String("outofstock".to_string())),
        ProductRecord::published("p3", "green mug")
            .with_meta("_clearance", MetaValue::Int(1))
            .with_meta("_stock_status", MetaValue::String("outofstock".to_string())),
    ])
}

fn listing(base_url: &str) -> ListingContext {
    ListingContext {
        base_url: base_url.to_string(),
        constraints: ConstraintSet::default(),
    }
}

#[tokio::test]
async fn only_filters_with_candidates_render() {
    // clearance matches 3 products, in_stock matches none
    let widget = register_widget(Some(seeded_catalog())).unwrap();
    let request = FilterRequest::new(None);
    let output = widget
        .render(
            &WidgetChrome::default(),
            &listing("/shop/"),
            &request,
            &PreservedParams::default(),
        )
        .await;
    let html = output.html.expect("widget found candidates");

    assert!(html.contains("Clearance"));
    assert!(html.contains("(3)"));
    assert!(!html.contains("In Stock"));
    assert!(html.contains("<a href=\"/shop/?filter_by=clearance\">"));
    // title from default settings
    assert!(html.contains("Filter by"));
    // nothing chosen, so no cooperating-form script
    assert!(output.form_script.is_none());
}

#[tokio::test]
async fn nothing_found_suppresses_all_output() {
    let widget = register_widget(Some(MemoryCatalog::default())).unwrap();
    let request = FilterRequest::new(None);
    let output = widget
        .render(
            &WidgetChrome::default(),
            &listing("/shop/"),
            &request,
            &PreservedParams::default(),
        )
        .await;
    assert!(output.html.is_none());
    assert!(output.form_script.is_none());
}

#[tokio::test]
async fn chosen_filter_renders_with_side_channel() {
    let widget = register_widget(Some(seeded_catalog())).unwrap();
    let request = FilterRequest::new(Some("clearance"));
    let output = widget
        .render(
            &WidgetChrome::default(),
            &listing("/shop/"),
            &request,
            &PreservedParams::default(),
        )
        .await;
    let html = output.html.expect("widget found candidates");

    assert!(html.contains("chosen"));
    // toggling the only chosen filter off drops the parameter entirely
    assert!(html.contains("<a href=\"/shop/\">"));
    // price-filter side channel announces the current selection
    let script = output.form_script.expect("chosen filters announced");
    assert!(script.contains("name=\"filter_by\" value=\"clearance\""));
}

#[tokio::test]
async fn side_channel_survives_a_suppressed_widget_body() {
    // the chosen filter matches nothing, so the widget shows no list,
    // but submitting the price-filter form must still keep the selection
    let widget = register_widget(Some(MemoryCatalog::default())).unwrap();
    let request = FilterRequest::new(Some("clearance"));
    let output = widget
        .render(
            &WidgetChrome::default(),
            &listing("/shop/"),
            &request,
            &PreservedParams::default(),
        )
        .await;
    assert!(output.html.is_none());
    let script = output.form_script.expect("chosen filters announced");
    assert!(script.contains("name=\"filter_by\" value=\"clearance\""));
}

#[tokio::test]
async fn bogus_ids_do_not_reach_the_query() {
    let widget = register_widget(Some(seeded_catalog())).unwrap();
    let request = FilterRequest::new(Some("in_stock,bogus_id"));
    let augmented = widget.augment_main_query(&ConstraintSet::default(), &request);
    assert_eq!(augmented.meta_filters.len(), 1);
    assert!(augmented.meta_filters.contains_key("in_stock"));
}

#[tokio::test]
async fn main_query_augmentation_narrows_the_listing() {
    let catalog = seeded_catalog();
    catalog.insert(
        ProductRecord::published("p4", "black hoodie")
            .with_meta("_stock_status", MetaValue::String("instock".to_string())),
    );
    let widget = register_widget(Some(seeded_catalog())).unwrap();
    let request = FilterRequest::new(Some("in_stock"));
    let augmented = widget.augment_main_query(&ConstraintSet::default(), &request);
    let products = catalog.list_products(&augmented);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "p4");
}

struct BrokenEngine;

impl CatalogEngine for BrokenEngine {
    async fn count_products(&self, _constraints: &ConstraintSet) -> anyhow::Result<u64> {
        anyhow::bail!("catalog down")
    }
}

#[tokio::test]
async fn engine_failure_hides_the_widget_instead_of_failing() {
    let widget = register_widget(Some(BrokenEngine)).unwrap();
    let request = FilterRequest::new(Some("clearance"));
    let output = widget
        .render(
            &WidgetChrome::default(),
            &listing("/shop/"),
            &request,
            &PreservedParams::default(),
        )
        .await;
    assert!(output.html.is_none());
    // the selection announcement does not depend on the count query
    assert!(output.form_script.is_some());
}

#[tokio::test]
async fn no_engine_means_no_widget_registration() {
    let registered: Option<MetaFilterWidget<MemoryCatalog>> = register_widget(None);
    assert!(registered.is_none());
}

#[tokio::test]
async fn sibling_links_keep_the_selection() {
    let widget = register_widget(Some(seeded_catalog())).unwrap();
    let request = FilterRequest::new(Some("clearance"));
    let link = widget.annotate_sibling_link("/shop/?min_rating=4", &request);
    assert!(link.contains("min_rating=4"));
    assert!(link.contains("filter_by=clearance"));

    let bare = widget.annotate_sibling_link("/shop/", &FilterRequest::new(None));
    assert_eq!(bare, "/shop/");
}
