//! Terminal front-end for the node web service.
//! - `routes` maps URL paths onto views.
//! - `views` renders store snapshots as plain text.
//! - `app` owns the stores and runs commands parsed by `cli`.

pub mod app;
pub mod cli;
pub mod routes;
pub mod views;

pub use app::App;
pub use routes::{Resolved, Route, RouteError, Router};
