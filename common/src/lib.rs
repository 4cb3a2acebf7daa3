//! Common library exports shared between the filter widget and its hosts.

extern crate serde;


pub mod constraints;
pub mod counts;
pub mod filter;
pub mod link_params;
pub mod listing;
pub mod params_const;
