//! The cache lifecycle manager and its dispatcher.

mod lifecycle;
mod manager;

pub use lifecycle::{Lifecycle, Phase};
pub use manager::{CacheManager, Intercept, ServeSource, Served, Strategy};
