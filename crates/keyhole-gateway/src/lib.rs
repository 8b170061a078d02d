//! HTTP transport layer for keyhole.
//!
//! The gateway owns all HTTP semantics: it accepts CSV uploads for the
//! bulk import path, issues temporary redirects for resolved short codes,
//! and shapes typed core outcomes into status codes. The core services
//! never see HTTP.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::ApiError;
pub use state::AppState;
