//! # libweb - Embedded Web Facade
//!
//! A small Rust library that lets device firmware serve web requests through a
//! single uniform interface while the concrete server underneath may differ.
//! Embedded web servers tend to have incompatible APIs for registering
//! handlers, reading request arguments, and writing responses; `libweb` wraps
//! whichever one is present behind a backend-agnostic request context, so
//! handler code is written once and runs unmodified on every backend. The
//! library is designed for embedded systems and supports `no_std`
//! environments; it performs no dynamic allocation.
//!
//! ## Components
//!
//! - [`web`]: the [`WebContext`](web::context::WebContext) request facade, the
//!   [`Backend`](web::Backend) collaborator contract, and an in-memory
//!   [`LoopbackServer`](web::loopback::LoopbackServer) for host-side testing.
//! - [`format`]: progressive, allocation-free formatted writes into a
//!   caller-owned fixed-size byte buffer, plus HTML page fragments.
//! - [`token`]: zero-copy splitting of a delimited string, for hierarchical
//!   identifiers such as URNs and request paths.
//!
//! ## Usage
//!
//! A handler builds its response body in a stack buffer and emits it through
//! the context it receives; it never touches the backend type directly:
//!
//! ```rust
//! use libweb::format::{self, TEXT_HTML};
//! use libweb::web::context::WebContext;
//!
//! fn handle_root(ctx: &WebContext) {
//!     let mut buffer = [0u8; 1024];
//!     let mut pos = format::format_header(&mut buffer, "Hello from firmware");
//!     pos = format::format_tail(&mut buffer, pos);
//!     ctx.send(200, TEXT_HTML, format::contents(&buffer));
//! }
//! ```
//!
//! Wiring a backend happens once at setup time:
//!
//! ```rust
//! use libweb::web::Endpoint;
//! use libweb::web::context::WebContext;
//! use libweb::web::loopback::LoopbackServer;
//!
//! # fn handle_root(_ctx: &WebContext) {}
//! let server = LoopbackServer::new(Endpoint::new([192, 168, 1, 10].into(), 80));
//! let mut ctx = WebContext::new();
//! ctx.setup(&server);
//! ctx.on("/", handle_root);
//!
//! // The firmware main loop pumps the backend; matching handlers run
//! // synchronously inside this call.
//! ctx.handle_client();
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Backend-agnostic web request handling.
///
/// Contains the request context facade handed to route handlers, the
/// collaborator contract a concrete web server adapter implements, and the
/// value types shared between them.
pub mod web;

/// Allocation-free formatted writes into fixed-capacity byte buffers.
///
/// Response bodies are assembled in place by threading a write position
/// through a chain of formatting calls, with no heap and no intermediate
/// copies.
pub mod format;

/// Zero-copy, lazy tokenizing of delimited strings.
pub mod token;
