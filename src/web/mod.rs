//! Backend-agnostic web request handling for embedded systems.
//!
//! Device firmware rarely gets to choose its web server: each platform ships
//! its own, and no two expose the same API for registering handlers, reading
//! request arguments, or sending responses. The types in this module decouple
//! handler code from that choice:
//!
//! - [`context::WebContext`] is the facade handed to route handlers. It
//!   exposes request inspection and response emission through a fixed set of
//!   capability slots, each holding exactly one callable.
//! - [`Backend`] is the contract a concrete server adapter implements. Every
//!   method has a neutral default, so an adapter binds only what its server
//!   supports.
//! - [`loopback::LoopbackServer`] is an in-memory backend for exercising
//!   handler code on the host, with no network underneath.
//!
//! The facade never owns its backend and never fails: capabilities the
//! backend did not bind degrade to no-ops and empty values rather than
//! returning errors. Firmware written against [`context::WebContext`] behaves
//! identically whether or not every capability was wired.

#![deny(unsafe_code)]

/// Common error types for web backend operations
pub mod error;

/// The request context facade and its capability slots
pub mod context;

/// In-memory reference backend
pub mod loopback;

/// Re-exports of the types handler code usually needs
pub mod prelude {
    pub use super::context::WebContext;
    pub use super::{ArgString, Backend, Endpoint, HandlerFn, TransportInfo, UriString};
}

use core::fmt;
use core::net::Ipv4Addr;

/// Maximum length of a request URI returned by [`context::WebContext::uri`].
pub const MAX_URI_LEN: usize = 128;

/// Maximum length of a request argument name or value.
pub const MAX_ARG_LEN: usize = 64;

/// Owned request URI, sized for embedded use.
pub type UriString = heapless::String<MAX_URI_LEN>;

/// Owned request argument name or value.
///
/// Accessors return freshly owned strings rather than references into
/// backend-held scratch storage, so repeated or reentrant argument reads
/// never alias each other.
pub type ArgString = heapless::String<MAX_ARG_LEN>;

/// A route handler.
///
/// Handlers receive the configured request context, read the request through
/// its query operations, and emit a response through its send operations.
/// They never touch the backend type directly.
pub type HandlerFn = fn(&context::WebContext);

/// A raw request handler, invoked for every incoming request before route
/// matching. Returning `true` marks the request as fully handled, skipping
/// route dispatch.
pub type RawHandlerFn = fn(uri: &str) -> bool;

/// An IPv4 address and port pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// IPv4 address.
    pub addr: Ipv4Addr,
    /// TCP port.
    pub port: u16,
}

impl Endpoint {
    /// The all-zero endpoint, used as the neutral default for unbound
    /// address queries.
    pub const UNSPECIFIED: Endpoint = Endpoint {
        addr: Ipv4Addr::UNSPECIFIED,
        port: 0,
    };

    /// Create an endpoint from an address and port.
    pub const fn new(addr: Ipv4Addr, port: u16) -> Self {
        Self { addr, port }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Endpoint {
    fn format(&self, f: defmt::Formatter) {
        let octets = self.addr.octets();
        defmt::write!(
            f,
            "{}.{}.{}.{}:{}",
            octets[0],
            octets[1],
            octets[2],
            octets[3],
            self.port
        );
    }
}

/// A snapshot of the connection carrying the current request.
///
/// This is an owned value, not a live handle: the underlying socket stays
/// with the backend. Taking a snapshot avoids handing out references into
/// per-request state the backend may recycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportInfo {
    /// Endpoint the server accepted the connection on.
    pub local: Endpoint,
    /// Endpoint of the remote peer.
    pub remote: Endpoint,
    /// Whether the connection is still open.
    pub connected: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TransportInfo {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "TransportInfo {{ local: {}, remote: {}, connected: {} }}",
            self.local,
            self.remote,
            self.connected
        );
    }
}

/// The contract a concrete web server adapter implements.
///
/// Every method has a neutral default implementation (no-op for actions,
/// zero or empty for queries), so an adapter only overrides the capabilities
/// its server actually supports; the rest stay safely inert.
///
/// Methods take `&self` because the same backend reference is shared by
/// every capability slot of a bound [`context::WebContext`]. Backends that
/// mutate per-request state use interior mutability.
pub trait Backend {
    /// Pump one iteration of request processing. May synchronously invoke a
    /// registered route handler zero or one times.
    fn handle_client(&self) {}

    /// Send a response for the current request. The body is transmitted
    /// byte-exact; the status code is forwarded unchanged.
    fn send(&self, _status: u16, _content_type: &str, _body: &str) {}

    /// Send a response whose content type and body live in read-only static
    /// storage, letting the backend stream them without buffering.
    fn send_static(&self, _status: u16, _content_type: &'static str, _body: &'static str) {}

    /// Register `handler` for requests matching `path`. When dispatching,
    /// the backend must invoke `handler` with a [`context::WebContext`]
    /// configured for this backend.
    fn on_route(&self, _path: &str, _handler: HandlerFn) {}

    /// Register `handler` for requests matching no route.
    fn on_not_found(&self, _handler: HandlerFn) {}

    /// Register a raw handler that runs before route matching.
    fn add_raw_handler(&self, _handler: RawHandlerFn) {}

    /// Number of arguments on the current request.
    fn arg_count(&self) -> usize {
        0
    }

    /// Value of argument `index` on the current request, empty when out of
    /// range.
    fn arg(&self, _index: usize) -> ArgString {
        ArgString::new()
    }

    /// Name of argument `index` on the current request, empty when out of
    /// range.
    fn arg_name(&self, _index: usize) -> ArgString {
        ArgString::new()
    }

    /// URI of the current request, empty when no request is in flight.
    fn uri(&self) -> UriString {
        UriString::new()
    }

    /// Snapshot of the connection carrying the current request, `None` when
    /// no request is in flight.
    fn transport(&self) -> Option<TransportInfo> {
        None
    }

    /// Release the active connection, if any. Idempotent.
    fn close(&self) {}

    /// Endpoint the server listens on.
    ///
    /// Some embedded servers cannot report this after initialization; their
    /// adapters must retain the value the server was configured with and
    /// return it here.
    fn local_endpoint(&self) -> Endpoint {
        Endpoint::UNSPECIFIED
    }

    /// Endpoint of the remote peer of the current request.
    fn remote_endpoint(&self) -> Endpoint {
        Endpoint::UNSPECIFIED
    }
}
