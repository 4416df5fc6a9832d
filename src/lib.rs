//! Keyword and SERP statistics from Naver and Google.
//!
//! Each concern lives under [`tools`]; the [`cli`] module wires them into the
//! `kwlens` binary, which prints one JSON envelope per command.

pub mod cli;
pub mod config;
pub mod error;
pub mod log;
pub mod selectors;
pub mod tools;

pub use error::{KwError, Result};
