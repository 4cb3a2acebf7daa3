//! Query-string parameter names shared by the widget and its host.

/// Parameter carrying the comma-separated chosen filter ids.
pub const FILTER_PARAM: &str = "filter_by";

pub const MIN_PRICE_PARAM: &str = "min_price";
pub const MAX_PRICE_PARAM: &str = "max_price";
pub const ORDERBY_PARAM: &str = "orderby";
pub const SEARCH_PARAM: &str = "s";
pub const POST_TYPE_PARAM: &str = "post_type";
pub const MIN_RATING_PARAM: &str = "min_rating";

/// Attribute filters come in pairs: `filter_<name>` lists the selected
/// terms, `query_type_<name>` flips that attribute to OR matching.
pub const ATTRIBUTE_FILTER_PREFIX: &str = "filter_";
pub const ATTRIBUTE_QUERY_TYPE_PREFIX: &str = "query_type_";
