//! Synchronous client core for the product catalog API.
//!
//! # Overview
//! `ProductClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). A `Transport`
//! performs the round trip; `ProductApi` pairs the two behind the
//! `ProductService` trait that the screen state in [`views`] consumes.
//!
//! # Design
//! - `ProductClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*` so the I/O
//!   boundary is explicit and testable with plain data.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.
//! - Errors keep their kind: a missing product is never reported as a
//!   transport failure.

pub mod client;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;
pub mod views;

pub use client::{ProductClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{ProductApi, ProductService};
pub use transport::{Transport, UreqTransport};
pub use types::{Category, CreateProduct, Product, UnknownCategory, UpdateProduct};
