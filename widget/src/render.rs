//! List markup for the filter widget.

use common::counts::FilterCounts;
use common::link_params::PreservedParams;

use crate::links::toggle_filter_link;
use crate::registry::FilterRegistry;
use crate::request::FilterRequest;


pub struct RenderedList {
    pub html: String,
    /// True when at least one filter had candidates; when false the
    /// widget suppresses its entire output.
    pub found: bool,
}

/// Walks the registry in declaration order and emits the `<ul>` body.
/// A filter with zero candidates that is not chosen is skipped; a
/// chosen filter always renders (its toggle-off link is the only way
/// back). Entries with candidates or chosen state are links, anything
/// else is inert text.
pub fn render_filter_list(
    registry: &FilterRegistry,
    request: &FilterRequest,
    counts: &FilterCounts,
    base_url: &str,
    preserved: &PreservedParams,
) -> RenderedList {
    let mut found = false;
    let mut html = String::from("<ul>");

    for definition in registry.iter() {
        let count = counts.count_for(&definition.id);
        let option_is_set = request.is_chosen(registry, &definition.id);

        if count > 0 {
            found = true;
        } else if !option_is_set {
            continue;
        }

        let link = toggle_filter_link(
            &definition.id,
            base_url,
            request.chosen(registry),
            preserved,
        );
        let label = html_escape::encode_text(&definition.label);
        let li_class = if option_is_set {
            "meta-filter-term chosen"
        } else {
            "meta-filter-term"
        };

        if count > 0 || option_is_set {
            let href = html_escape::encode_double_quoted_attribute(&link);
            html.push_str(&format!(
                "<li class=\"{li_class}\"><a href=\"{href}\">{label}</a> <span class=\"count\">({count})</span></li>"
            ));
        } else {
            html.push_str(&format!(
                "<li class=\"{li_class}\"><span>{label}</span> <span class=\"count\">({count})</span></li>"
            ));
        }
    }

    html.push_str("</ul>");
    RenderedList { html, found }
}


#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn counts(entries: &[(&str, u64)]) -> FilterCounts {
        FilterCounts::from(
            entries
                .iter()
                .map(|(id, n)| (id.to_string(), *n))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn zero_count_unchosen_filters_are_skipped() {
        let registry = FilterRegistry::storefront_defaults();
        let request = FilterRequest::new(None);
        let list = render_filter_list(
            &registry,
            &request,
            &counts(&[("clearance", 3), ("in_stock", 0)]),
            "/shop/",
            &PreservedParams::default(),
        );
        assert!(list.found);
        assert!(list.html.contains("Clearance"));
        assert!(list.html.contains("(3)"));
        assert!(!list.html.contains("In Stock"));
    }

    #[test]
    fn chosen_filter_with_zero_count_still_renders_as_a_link() {
        let registry = FilterRegistry::storefront_defaults();
        let request = FilterRequest::new(Some("in_stock"));
        let list = render_filter_list(
            &registry,
            &request,
            &counts(&[]),
            "/shop/",
            &PreservedParams::default(),
        );
        // nothing had candidates, so the widget reports not-found,
        // but the chosen entry is present with its toggle-off link
        assert!(!list.found);
        assert!(list.html.contains("chosen"));
        assert!(list.html.contains("<a href=\"/shop/\">In Stock</a>"));
        assert!(list.html.contains("(0)"));
    }

    #[test]
    fn chosen_entries_carry_the_marker_class() {
        let registry = FilterRegistry::storefront_defaults();
        let request = FilterRequest::new(Some("clearance"));
        let list = render_filter_list(
            &registry,
            &request,
            &counts(&[("clearance", 2), ("in_stock", 5)]),
            "/shop/",
            &PreservedParams::default(),
        );
        assert!(list.html.contains("<li class=\"meta-filter-term chosen\">"));
        assert!(list.html.contains("<li class=\"meta-filter-term\">"));
    }

    #[test]
    fn labels_are_html_escaped() {
        use common::filter::{Compare, FilterDefinition, MetaPredicate, MetaValue};
        let registry = FilterRegistry::new(vec![FilterDefinition::checkbox(
            "cheap",
            "Cheap & <Cheerful>",
            MetaPredicate {
                key: "_cheap".to_string(),
                value: MetaValue::Int(1),
                compare: Compare::Equal,
            },
        )]);
        let request = FilterRequest::new(None);
        let list = render_filter_list(
            &registry,
            &request,
            &counts(&[("cheap", 1)]),
            "/shop/",
            &PreservedParams::default(),
        );
        assert!(list.html.contains("Cheap &amp; &lt;Cheerful&gt;"));
    }

    #[test]
    fn declaration_order_is_preserved() {
        let registry = FilterRegistry::storefront_defaults();
        let request = FilterRequest::new(None);
        let list = render_filter_list(
            &registry,
            &request,
            &counts(&[("clearance", 1), ("in_stock", 1)]),
            "/shop/",
            &PreservedParams::default(),
        );
        let clearance_at = list.html.find("Clearance").unwrap();
        let in_stock_at = list.html.find("In Stock").unwrap();
        assert!(clearance_at < in_stock_at);
    }
}
