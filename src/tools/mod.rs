// Shared types
pub mod types;

// Modular tools
pub mod ads;
pub mod batch;
pub mod blog;
pub mod clean;
pub mod compare;
pub mod fetch;
pub mod format;
pub mod google;
pub mod naver;
pub mod serp;
