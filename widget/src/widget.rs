//! The widget adapter: settings, host chrome, the render boundary and
//! the cooperating-widget side channel.

use common::constraints::ConstraintSet;
use common::link_params::PreservedParams;
use common::listing::ListingContext;
use common::params_const::FILTER_PARAM;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEngine;
use crate::links::filters_link;
use crate::query::{augment_constraints, compute_filter_counts};
use crate::registry::FilterRegistry;
use crate::render::render_filter_list;
use crate::request::FilterRequest;

pub const DEFAULT_TITLE: &str = "Filter by";


/// The widget's entire persisted configuration surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub title: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        WidgetSettings {
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl WidgetSettings {
    /// Applies a settings update from the host's form. An empty title
    /// falls back to the default.
    pub fn update(&mut self, new_title: &str) {
        let trimmed = new_title.trim();
        self.title = if trimmed.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            trimmed.to_string()
        };
    }
}

/// Markup the host wraps around every widget it renders.
#[derive(Debug, Clone)]
pub struct WidgetChrome {
    pub before_widget: String,
    pub after_widget: String,
    pub before_title: String,
    pub after_title: String,
}

impl Default for WidgetChrome {
    fn default() -> Self {
        WidgetChrome {
            before_widget: "<div class=\"filter_by_meta_widget widget_layered_nav\">".to_string(),
            after_widget: "</div>".to_string(),
            before_title: "<h2 class=\"widget-title\">".to_string(),
            after_title: "</h2>".to_string(),
        }
    }
}

/// Composes the filter core over a catalog engine. Carries no host
/// base type; the host only needs `render`, `augment_main_query` and
/// the settings accessors.
#[derive(Debug)]
pub struct MetaFilterWidget<E> {
    registry: FilterRegistry,
    settings: WidgetSettings,
    engine: E,
}

impl<E: CatalogEngine + Sync> MetaFilterWidget<E> {
    pub fn new(registry: FilterRegistry, engine: E) -> Self {
        MetaFilterWidget {
            registry,
            settings: WidgetSettings::default(),
            engine,
        }
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &WidgetSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, new_title: &str) {
        self.settings.update(new_title);
    }

    /// The augmented constraint set the host must run its primary
    /// listing query with.
    pub fn augment_main_query(
        &self,
        base: &ConstraintSet,
        request: &FilterRequest,
    ) -> ConstraintSet {
        augment_constraints(base, &self.registry, request)
    }

    /// Annotates a cooperating widget's link with the current filter
    /// state (the layered-nav and rating-filter link hooks).
    pub fn annotate_sibling_link(&self, link: &str, request: &FilterRequest) -> String {
        filters_link(link, request.filter_param_value(&self.registry).as_deref())
    }

    /// Renders the full widget. `html` is `None` when nothing is found
    /// or the count query fails; either way the host page stays
    /// untouched and no error ever reaches the shopper. The
    /// cooperating-form script travels separately from the body: the
    /// chosen-filter state must reach the price-filter form even when
    /// the widget itself shows nothing.
    pub async fn render(
        &self,
        chrome: &WidgetChrome,
        listing: &ListingContext,
        request: &FilterRequest,
        preserved: &PreservedParams,
    ) -> WidgetOutput {
        let form_script =
            cooperating_form_script(request.filter_param_value(&self.registry).as_deref());

        let counts =
            match compute_filter_counts(&self.engine, &self.registry, &listing.constraints).await {
                Ok(counts) => counts,
                Err(error) => {
                    tracing::warn!(%error, "filter count query failed, suppressing widget");
                    return WidgetOutput {
                        html: None,
                        form_script,
                    };
                }
            };

        let list = render_filter_list(
            &self.registry,
            request,
            &counts,
            &listing.base_url,
            preserved,
        );
        if !list.found {
            return WidgetOutput {
                html: None,
                form_script,
            };
        }

        let mut out = String::new();
        out.push_str(&chrome.before_widget);
        if !self.settings.title.is_empty() {
            out.push_str(&chrome.before_title);
            out.push_str(&html_escape::encode_text(&self.settings.title));
            out.push_str(&chrome.after_title);
        }
        out.push_str(&list.html);
        out.push_str(&chrome.after_widget);
        WidgetOutput {
            html: Some(out),
            form_script,
        }
    }
}

/// One render pass worth of widget output. `form_script` is present
/// whenever filters are chosen, independent of whether the widget body
/// rendered, so the host page always carries the side-channel
/// announcement.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetOutput {
    pub html: Option<String>,
    pub form_script: Option<String>,
}

/// Environmental precondition, checked once at process start: without a
/// catalog engine the widget is not registered at all.
pub fn register_widget<E: CatalogEngine + Sync>(engine: Option<E>) -> Option<MetaFilterWidget<E>> {
    match engine {
        Some(engine) => Some(MetaFilterWidget::new(
            FilterRegistry::storefront_defaults(),
            engine,
        )),
        None => {
            tracing::info!("catalog engine unavailable, meta filter widget not registered");
            None
        }
    }
}

/// The hidden field a sibling price-filter form must submit so its
/// submission keeps the current meta-filter selection.
pub fn price_filter_hidden_field(filter_param_value: Option<&str>) -> Option<String> {
    filter_param_value.map(|value| {
        format!(
            "<input type=\"hidden\" name=\"{FILTER_PARAM}\" value=\"{}\">",
            html_escape::encode_double_quoted_attribute(value)
        )
    })
}

/// Script that injects the hidden field into the price-filter widget's
/// form, emitted with the widget output when filters are chosen.
pub fn cooperating_form_script(filter_param_value: Option<&str>) -> Option<String> {
    let field = price_filter_hidden_field(filter_param_value)?;
    Some(format!(
        "<script>
var element = document.querySelector('.widget_price_filter form .price_slider_amount');
if (element !== null) {{
    element.insertAdjacentHTML('beforeend', '{field}');
}}
</script>"
    ))
}
