//! Diesel row types and their conversions into domain records.

pub mod article;
pub mod comment;
#[cfg(feature = "server")]
pub mod config;
pub mod tag;
pub mod video;
