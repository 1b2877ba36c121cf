//! Rhyme and synonym lookup against the Datamuse word service: an HTTP
//! client, a generic grouping utility, and the query state machine a lookup
//! front end renders. The `cli` feature (on by default) adds the
//! `rhymefetch-rs` binary.

pub mod client;
pub mod controller;
pub mod data;
pub mod group;

pub use client::{ServiceFailure, WordClient, WordServiceConfig};
pub use controller::{
    Phase, QueryController, QueryEvent, QueryView, SAVED_NONE_SENTINEL, SERVICE_FAILURE_MESSAGE,
    group_by_syllables,
};
pub use data::{
    GroupKey, LOADING_INDICATOR, NO_RESULTS_INDICATOR, Output, QueryMode, WordGroup, WordResult,
};
pub use group::group_by;
