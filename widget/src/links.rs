//! Outbound link construction: filter toggle links and the preserved
//! sibling query-string state every link must carry.

use common::link_params::{AttributeQueryType, PreservedParams};
use common::params_const::{
    ATTRIBUTE_FILTER_PREFIX, ATTRIBUTE_QUERY_TYPE_PREFIX, FILTER_PARAM, MAX_PRICE_PARAM,
    MIN_PRICE_PARAM, MIN_RATING_PARAM, ORDERBY_PARAM, POST_TYPE_PARAM, SEARCH_PARAM,
};


/// Sets `key=value` on `link`, replacing any existing occurrence of the
/// key and re-encoding the rest of the query string as it was.
pub fn add_query_arg(link: &str, key: &str, value: &str) -> String {
    let (base, query) = match link.split_once('?') {
        Some((base, query)) => (base, query),
        None => (link, ""),
    };
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in url::form_urlencoded::parse(query.as_bytes()) {
        if k != key {
            serializer.append_pair(&k, &v);
        }
    }
    serializer.append_pair(key, value);
    format!("{}?{}", base, serializer.finish())
}

/// The page base URL with every preserved sibling parameter attached:
/// price bounds, sort order, search text, post type, minimum rating and
/// the sibling attribute filters. The host resolves which archive base
/// applies; an empty base degrades to the site root.
pub fn page_base_with_preserved(base_url: &str, preserved: &PreservedParams) -> String {
    let mut link = if base_url.is_empty() {
        "/".to_string()
    } else {
        base_url.to_string()
    };

    if let Some(min_price) = &preserved.min_price {
        link = add_query_arg(&link, MIN_PRICE_PARAM, min_price);
    }
    if let Some(max_price) = &preserved.max_price {
        link = add_query_arg(&link, MAX_PRICE_PARAM, max_price);
    }
    if let Some(orderby) = &preserved.orderby {
        link = add_query_arg(&link, ORDERBY_PARAM, orderby);
    }
    if let Some(search) = &preserved.search {
        // search text can reach us with HTML entities still in it;
        // decode before the query serializer re-encodes, so quote
        // characters survive the round trip
        let decoded = html_escape::decode_html_entities(search);
        link = add_query_arg(&link, SEARCH_PARAM, &decoded);
    }
    if let Some(post_type) = &preserved.post_type {
        link = add_query_arg(&link, POST_TYPE_PARAM, post_type);
    }
    if let Some(min_rating) = &preserved.min_rating {
        link = add_query_arg(&link, MIN_RATING_PARAM, min_rating);
    }

    for attribute in &preserved.attributes {
        if attribute.terms.is_empty() {
            continue;
        }
        link = add_query_arg(
            &link,
            &format!("{ATTRIBUTE_FILTER_PREFIX}{}", attribute.name),
            &attribute.terms.join(","),
        );
        if attribute.query_type == AttributeQueryType::Or {
            link = add_query_arg(
                &link,
                &format!("{ATTRIBUTE_QUERY_TYPE_PREFIX}{}", attribute.name),
                "or",
            );
        }
    }

    link
}

/// The URL that flips `filter_id` on or off while keeping every other
/// chosen filter and all preserved parameters. When toggling the last
/// chosen filter off, the filter parameter is omitted entirely.
pub fn toggle_filter_link(
    filter_id: &str,
    base_url: &str,
    chosen: &[String],
    preserved: &PreservedParams,
) -> String {
    let link = page_base_with_preserved(base_url, preserved);

    let option_is_set = chosen.iter().any(|id| id == filter_id);
    let mut toggled = chosen
        .iter()
        .filter(|id| !(option_is_set && *id == filter_id))
        .cloned()
        .collect::<Vec<_>>();
    if !option_is_set {
        toggled.push(filter_id.to_string());
    }

    if toggled.is_empty() {
        link
    } else {
        add_query_arg(&link, FILTER_PARAM, &toggled.join(","))
    }
}

/// Annotates a cooperating widget's link (layered-nav, rating filter)
/// with the current chosen-filter state so following it keeps the
/// meta-filter selection. No-op when nothing is chosen.
pub fn filters_link(link: &str, filter_param_value: Option<&str>) -> String {
    match filter_param_value {
        Some(value) => add_query_arg(link, FILTER_PARAM, value),
        None => link.to_string(),
    }
}
