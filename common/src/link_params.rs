//! Sibling query-string state the link builder must carry across toggles.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AttributeQueryType {
    #[default]
    And,
    Or,
}

/// One independent attribute filter maintained by a sibling widget:
/// its selected terms plus the AND/OR query-type flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChosenAttribute {
    pub name: String,
    pub terms: Vec<String>,
    pub query_type: AttributeQueryType,
}

/// Parameters this widget does not own but must re-emit verbatim (or
/// normalized) on every link it builds. Dropping any of these on a
/// toggle link would silently reset that facet for the shopper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PreservedParams {
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub orderby: Option<String>,
    pub search: Option<String>,
    pub post_type: Option<String>,
    pub min_rating: Option<String>,
    pub attributes: Vec<ChosenAttribute>,
}
