//! Storage abstractions for service layer
//!
//! File-backed list stores shared by the user and attendance stores.

pub mod json_list_store;
