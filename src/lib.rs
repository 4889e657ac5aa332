// src/lib.rs

pub mod bot;
pub mod config;
pub mod error;
pub mod minecraft;
pub mod presence;
pub mod tasks;

pub use error::Error;
