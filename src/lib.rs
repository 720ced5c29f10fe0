pub mod classify;
pub mod config;
pub mod cover;
pub mod default_colors;
pub mod error;
pub mod export;
pub mod logging;
pub mod openlib_schema;
pub mod openlibrary;
pub mod session;
pub mod traits;
pub mod types;
