//! Synchronous client for the item service.
//!
//! # Overview
//! `ItemClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). A `Transport` executes
//! the round-trip; `UreqTransport` is the blocking implementation used by the
//! `item-harness` binary, which drives the fixed demo sequence in `harness`.
//!
//! # Design
//! - `ItemClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - DTOs are defined independently from the server crate; integration tests
//!   catch schema drift.

pub mod client;
pub mod error;
pub mod harness;
pub mod http;
pub mod transport;
pub mod types;

pub use client::ItemClient;
pub use error::ApiError;
pub use harness::{Harness, HarnessError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{CreatedItem, ItemRecord, Listing, NewItem};
