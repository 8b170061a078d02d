mod health;
mod import;
mod redirect;

pub use health::health_handler;
pub use import::import_handler;
pub use redirect::redirect_handler;
