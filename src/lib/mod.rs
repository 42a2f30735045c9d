pub mod backend;
pub mod error;
pub mod format;
pub mod group;
pub mod keyboard;
pub mod logger;
pub mod symbols;
pub mod text;
