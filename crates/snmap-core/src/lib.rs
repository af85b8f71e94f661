//! Core types and trait definitions for the ServiceNow mapping service.
//!
//! This crate is deliberately free of HTTP and database dependencies. It holds
//! the [`Mapping`](mapping::Mapping) entity, the [`MappingStore`] seam that
//! storage backends implement, and the [`MappingService`] that owns input
//! validation and partial-update semantics.
//!
//! [`MappingStore`]: store::MappingStore
//! [`MappingService`]: service::MappingService

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod mapping;
pub mod service;
pub mod store;

pub use error::{Error, Result};
