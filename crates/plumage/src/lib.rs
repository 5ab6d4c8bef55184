#![doc = include_str!("../README.md")]

pub mod base_path;
pub mod config;
pub mod content;
pub mod html;
pub mod mail;
pub mod messages;
pub mod render;
pub mod templates;

mod router;
mod site;
mod storage;

pub use router::*;
pub use site::*;
pub use storage::*;
