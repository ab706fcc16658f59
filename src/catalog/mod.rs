//! # Catalog Module
//!
//! Access to the remote catalog API and the list handling done on the
//! client side.
//!
//! ## Overview
//!
//! The backend is a document store behind a REST/JSON API. Every collection
//! offers the same five operations:
//!
//! ```text
//! GET    /<collection>          list
//! GET    /<collection>/<id>     get by id
//! POST   /<collection>          create
//! PUT    /<collection>/<id>     update
//! DELETE /<collection>/<id>     delete
//! ```
//!
//! All requests carry the configured bearer token. A `502 Bad Gateway` is
//! retried a few times before it is reported.
//!
//! ## Submodules
//!
//! - [`client`] - [`ApiClient`], [`Collection`] and [`ApiError`]
//! - [`listing`] - search, filter, sort and pagination of fetched lists
//! - [`source`] - [`CatalogSource`], the hydration source used by the
//!   navigation controller

pub mod client;
pub mod listing;
pub mod source;

pub use client::{ApiClient, ApiError, Collection, parse_collection};
pub use listing::{Page, filter_movies, paginate, search_by_name};
pub use source::CatalogSource;
