//! Listing context handed to the widget by the host page.

use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintSet;


/// The scope the product listing is currently rendered under. The host
/// resolves which archive base URL applies (shop root, category, tag or
/// other taxonomy archive) before handing it over. `constraints` is the
/// main listing scope WITHOUT this widget's own meta-filters applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ListingContext {
    pub base_url: String,
    pub constraints: ConstraintSet,
}
