//! gigatools — an interactive GigaChat assistant with callable tools.
//!
//! The model may call a calculator, a wall clock and a static incident
//! list while answering one line of user input at a time.

pub mod agent;
pub mod config;
pub mod error;
pub mod gigachat;
pub mod tools;
pub mod types;

pub use error::{Error, Result};
