//! Core library exports for the CMS service.
//!
//! Articles and videos share tags and comments through polymorphic
//! association tables: each tag or comment row stores its owner's id and a
//! discriminator naming the owner's type. The crate exposes the domain
//! model, the Diesel persistence layer and, with the `server` feature, the
//! JSON API built on Actix-web.

pub mod db;
pub mod domain;
pub mod models;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
