//! # CLI Module
//!
//! User-facing commands of the catalog terminal client. Each command wires the
//! navigation layer and the catalog API together and takes care of progress
//! feedback and error presentation.
//!
//! ## Commands
//!
//! - [`route`] - decodes a catalog URL into the view it stands for
//! - [`show`] - prints the page behind a catalog URL, fetching detail entities
//! - [`list`] - lists a collection with search, filter, sort and paging
//! - [`open`] - opens the matching page of the web UI
//! - [`create`], [`update`], [`delete`] - admin writes against the API
//! - [`browse`] - interactive session with back navigation and page keys
//!
//! Commands never return errors. Fatal problems are reported through
//! [`crate::error!`], which exits the process.

mod admin;
mod browse;
mod common;
mod list;
mod route;
mod show;
mod view;

pub use admin::{create, delete, update};
pub use browse::browse;
pub use common::person_label;
pub use list::{ListOptions, list, parse_filter, parse_sort_key};
pub use route::{location_of, open, route};
pub use show::show;
pub use view::movie_list_filters;
