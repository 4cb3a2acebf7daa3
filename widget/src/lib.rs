//! Meta-filter widget core: checkbox filters over product metadata,
//! chosen-filter state carried in the URL, constraint injection into
//! the main listing query, live per-filter candidate counts and toggle
//! links that preserve every other active facet.

pub mod catalog;
pub mod links;
pub mod query;
pub mod registry;
pub mod render;
pub mod request;
pub mod widget;
