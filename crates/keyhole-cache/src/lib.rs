//! Resolution cache implementations shared across keyhole services.

pub mod memory;
pub mod moka;

pub use memory::DashMapResolutionCache;
pub use moka::{MokaResolutionCache, ResolutionCacheConfig};
