//! Domain records and value types, independent of storage and transport.

pub mod article;
pub mod association;
pub mod comment;
pub mod tag;
pub mod types;
pub mod video;
