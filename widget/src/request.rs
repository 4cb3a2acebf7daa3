//! Request-scoped filter state: chosen-filter resolution and the
//! sibling parameters carried across links.

use std::sync::OnceLock;

use common::link_params::{AttributeQueryType, ChosenAttribute, PreservedParams};
use common::params_const::{
    ATTRIBUTE_FILTER_PREFIX, ATTRIBUTE_QUERY_TYPE_PREFIX, FILTER_PARAM, MAX_PRICE_PARAM,
    MIN_PRICE_PARAM, MIN_RATING_PARAM, ORDERBY_PARAM, POST_TYPE_PARAM, SEARCH_PARAM,
};

use crate::registry::FilterRegistry;


/// Per-request view of the incoming filter parameter. One value lives
/// for exactly one render pass; the resolved chosen set is memoized on
/// first access so every component reads the same value.
#[derive(Debug, Default)]
pub struct FilterRequest {
    raw: Option<String>,
    chosen: OnceLock<Vec<String>>,
}

impl FilterRequest {
    pub fn new(raw_filter_param: Option<&str>) -> Self {
        FilterRequest {
            raw: raw_filter_param.map(|s| s.to_string()),
            chosen: OnceLock::new(),
        }
    }

    pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        let raw = pairs
            .iter()
            .find(|(k, _)| k == FILTER_PARAM)
            .map(|(_, v)| v.as_str());
        FilterRequest::new(raw)
    }

    /// Resolves the chosen filter ids: split on `,`, trim, reduce each
    /// token to the slug charset, drop ids the registry does not know.
    /// Ordering is kept and duplicates of valid ids survive (downstream
    /// consumers apply set semantics). Never fails; malformed input
    /// degrades to an empty or partial set.
    pub fn chosen(&self, registry: &FilterRegistry) -> &[String] {
        self.chosen.get_or_init(|| {
            let raw = match &self.raw {
                Some(raw) if !raw.trim().is_empty() => raw,
                _ => return Vec::new(),
            };
            raw.split(',')
                .map(|token| sanitize_token(token))
                .filter(|token| !token.is_empty() && registry.contains(token))
                .collect()
        })
    }

    pub fn is_chosen(&self, registry: &FilterRegistry, filter_id: &str) -> bool {
        self.chosen(registry).iter().any(|id| id == filter_id)
    }

    /// The `filter_by` value as it should appear on outbound links and
    /// the cooperating-widget hidden field. `None` when nothing is chosen.
    pub fn filter_param_value(&self, registry: &FilterRegistry) -> Option<String> {
        let chosen = self.chosen(registry);
        if chosen.is_empty() {
            None
        } else {
            Some(chosen.join(","))
        }
    }
}

/// Strips everything outside `[A-Za-z0-9_-]`; filter ids are slugs and
/// anything else is unsafe to echo into URLs or markup.
fn sanitize_token(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Reads the sibling parameters off the raw query pairs so links can
/// re-emit them. The widget's own filter parameter is skipped here even
/// though it matches the attribute prefix.
pub fn parse_preserved_params(pairs: &[(String, String)]) -> PreservedParams {
    let mut preserved = PreservedParams::default();

    for (key, value) in pairs {
        match key.as_str() {
            MIN_PRICE_PARAM => preserved.min_price = Some(value.clone()),
            MAX_PRICE_PARAM => preserved.max_price = Some(value.clone()),
            ORDERBY_PARAM => preserved.orderby = Some(value.clone()),
            SEARCH_PARAM => preserved.search = Some(value.clone()),
            POST_TYPE_PARAM => preserved.post_type = Some(value.clone()),
            MIN_RATING_PARAM => preserved.min_rating = Some(value.clone()),
            FILTER_PARAM => {}
            key if key.starts_with(ATTRIBUTE_FILTER_PREFIX) => {
                let name = key[ATTRIBUTE_FILTER_PREFIX.len()..].to_string();
                let terms = value
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>();
                if !terms.is_empty() {
                    preserved.attributes.push(ChosenAttribute {
                        name,
                        terms,
                        query_type: AttributeQueryType::And,
                    });
                }
            }
            _ => {}
        }
    }

    // query_type flags may precede or follow their attribute parameter
    for (key, value) in pairs {
        if let Some(name) = key.strip_prefix(ATTRIBUTE_QUERY_TYPE_PREFIX) {
            if value == "or" {
                for attribute in &mut preserved.attributes {
                    if attribute.name == name {
                        attribute.query_type = AttributeQueryType::Or;
                    }
                }
            }
        }
    }

    preserved
}
