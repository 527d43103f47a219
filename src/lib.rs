//! Command-line client for a cookie-based authentication portal.
//!
//! The library mirrors the layout of a web front end: `shared` holds the
//! gateway client and configuration, `features` the typed endpoints and the
//! auth context, `routes` the views a user walks through and `components` the
//! small pieces they share. The `cli` module drives those views from a
//! terminal.

pub mod cli;
pub mod components;
pub mod features;
pub mod routes;
pub mod shared;
