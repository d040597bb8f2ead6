//! An in-memory web backend with no network underneath.
//!
//! [`LoopbackServer`] implements the full [`Backend`] contract over
//! fixed-capacity tables: requests are queued by the caller with
//! [`LoopbackServer::push_request`], dispatched by `handle_client`, and the
//! response a handler emitted is collected with
//! [`LoopbackServer::take_response`]. This makes firmware handler code
//! testable on the host, byte for byte, without a transport.
//!
//! # Examples
//!
//! ```rust
//! use libweb::web::context::WebContext;
//! use libweb::web::loopback::LoopbackServer;
//! use libweb::web::Endpoint;
//!
//! fn greet(ctx: &WebContext) {
//!     ctx.send(200, "text/plain", "hello");
//! }
//!
//! let server = LoopbackServer::new(Endpoint::new([10, 0, 0, 2].into(), 8080));
//! let mut ctx = WebContext::new();
//! ctx.setup(&server);
//! ctx.on("/greet", greet);
//!
//! server.push_request("/greet", Endpoint::new([10, 0, 0, 9].into(), 49152)).unwrap();
//! ctx.handle_client();
//!
//! let response = server.take_response().unwrap();
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body.as_str(), "hello");
//! ```

use core::cell::{Cell, RefCell};

use heapless::{String, Vec};

use super::context::WebContext;
use super::error::Error;
use super::{ArgString, Backend, Endpoint, HandlerFn, RawHandlerFn, TransportInfo, UriString};

/// Maximum number of registered routes.
pub const MAX_ROUTES: usize = 16;

/// Maximum number of registered raw handlers.
pub const MAX_RAW_HANDLERS: usize = 4;

/// Maximum length of a registered route path.
pub const MAX_PATH_LEN: usize = 64;

/// Maximum number of query arguments per request.
pub const MAX_REQUEST_ARGS: usize = 8;

/// Maximum length of a recorded response content type.
pub const MAX_CONTENT_TYPE_LEN: usize = 64;

/// Capacity of the recorded response body.
pub const RESPONSE_CAPACITY: usize = 2048;

#[derive(Debug)]
struct Route {
    path: String<MAX_PATH_LEN>,
    handler: HandlerFn,
}

#[derive(Debug)]
struct PendingRequest {
    uri: UriString,
    remote: Endpoint,
    args: Vec<(ArgString, ArgString), MAX_REQUEST_ARGS>,
}

/// A response recorded by the loopback backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code the handler passed to `send`.
    pub status: u16,
    /// Content type, truncated to [`MAX_CONTENT_TYPE_LEN`].
    pub content_type: String<MAX_CONTENT_TYPE_LEN>,
    /// Body, truncated to [`RESPONSE_CAPACITY`].
    pub body: String<RESPONSE_CAPACITY>,
}

/// In-memory reference backend.
///
/// Holds one pending request and one recorded response at a time, matching
/// the single-threaded, one-request-in-flight model of the embedded servers
/// this library wraps. All methods take `&self`; per-request state lives in
/// cells because the same server reference is shared by every capability
/// slot of a bound [`WebContext`].
#[derive(Debug)]
pub struct LoopbackServer {
    local: Endpoint,
    routes: RefCell<Vec<Route, MAX_ROUTES>>,
    raw_handlers: RefCell<Vec<RawHandlerFn, MAX_RAW_HANDLERS>>,
    not_found: Cell<Option<HandlerFn>>,
    request: RefCell<Option<PendingRequest>>,
    response: RefCell<Option<Response>>,
    connected: Cell<bool>,
}

impl LoopbackServer {
    /// Create a server listening on `local`.
    pub fn new(local: Endpoint) -> Self {
        Self {
            local,
            routes: RefCell::new(Vec::new()),
            raw_handlers: RefCell::new(Vec::new()),
            not_found: Cell::new(None),
            request: RefCell::new(None),
            response: RefCell::new(None),
            connected: Cell::new(false),
        }
    }

    /// Register `handler` for requests whose path matches `path` exactly.
    pub fn try_route(&self, path: &str, handler: HandlerFn) -> Result<(), Error> {
        let path = String::try_from(path).map_err(|_| Error::UriTooLong)?;
        self.routes
            .borrow_mut()
            .push(Route { path, handler })
            .map_err(|_| Error::TooManyRoutes)
    }

    /// Register a raw handler that runs before route matching.
    pub fn try_add_raw_handler(&self, handler: RawHandlerFn) -> Result<(), Error> {
        self.raw_handlers
            .borrow_mut()
            .push(handler)
            .map_err(|_| Error::TooManyHandlers)
    }

    /// Queue one request for the next `handle_client` call.
    ///
    /// `uri` may carry a query string (`/path?name=value&flag=1`); the query
    /// is split into argument name/value pairs and is not part of the URI
    /// reported to handlers. Names and values longer than
    /// [`MAX_ARG_LEN`](super::MAX_ARG_LEN) are truncated.
    pub fn push_request(&self, uri: &str, remote: Endpoint) -> Result<(), Error> {
        if self.request.borrow().is_some() {
            return Err(Error::RequestPending);
        }

        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, query),
            None => (uri, ""),
        };

        let uri = UriString::try_from(path).map_err(|_| Error::UriTooLong)?;
        let mut args: Vec<(ArgString, ArgString), MAX_REQUEST_ARGS> = Vec::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            args.push((clamped(name), clamped(value)))
                .map_err(|_| Error::TooManyArgs)?;
        }

        *self.request.borrow_mut() = Some(PendingRequest { uri, remote, args });
        self.connected.set(true);
        Ok(())
    }

    /// Take the response recorded by the most recent dispatch, if any.
    pub fn take_response(&self) -> Option<Response> {
        self.response.borrow_mut().take()
    }

    /// Whether a connection is currently open.
    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn record(&self, status: u16, content_type: &str, body: &str) {
        *self.response.borrow_mut() = Some(Response {
            status,
            content_type: clamped(content_type),
            body: clamped(body),
        });
    }
}

impl Backend for LoopbackServer {
    /// Dispatch the pending request, if any: raw handlers first, then the
    /// exact-match route, then the not-found handler, else a recorded
    /// `404 text/plain` response.
    fn handle_client(&self) {
        // Snapshot dispatch state so no cell stays borrowed while a handler
        // runs; handlers re-enter this backend through the context.
        let uri = match self.request.borrow().as_ref() {
            Some(request) => request.uri.clone(),
            None => return,
        };

        let mut ctx = WebContext::new();
        ctx.setup(self);

        let raw_handlers = self.raw_handlers.borrow().clone();
        let raw_handled = raw_handlers.iter().any(|handler| handler(&uri));

        if !raw_handled {
            let route = self
                .routes
                .borrow()
                .iter()
                .find(|route| route.path.as_str() == uri.as_str())
                .map(|route| route.handler);
            match route.or_else(|| self.not_found.get()) {
                Some(handler) => handler(&ctx),
                None => self.record(404, "text/plain", "Not Found"),
            }
        }

        self.request.borrow_mut().take();
    }

    fn send(&self, status: u16, content_type: &str, body: &str) {
        self.record(status, content_type, body);
    }

    fn send_static(&self, status: u16, content_type: &'static str, body: &'static str) {
        self.record(status, content_type, body);
    }

    fn on_route(&self, path: &str, handler: HandlerFn) {
        // The facade's registration surface is infallible; overflow drops
        // the route. Use `try_route` directly when the error matters.
        let _ = self.try_route(path, handler);
    }

    fn on_not_found(&self, handler: HandlerFn) {
        self.not_found.set(Some(handler));
    }

    fn add_raw_handler(&self, handler: RawHandlerFn) {
        let _ = self.try_add_raw_handler(handler);
    }

    fn arg_count(&self) -> usize {
        self.request
            .borrow()
            .as_ref()
            .map_or(0, |request| request.args.len())
    }

    fn arg(&self, index: usize) -> ArgString {
        self.request
            .borrow()
            .as_ref()
            .and_then(|request| request.args.get(index))
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    fn arg_name(&self, index: usize) -> ArgString {
        self.request
            .borrow()
            .as_ref()
            .and_then(|request| request.args.get(index))
            .map(|(name, _)| name.clone())
            .unwrap_or_default()
    }

    fn uri(&self) -> UriString {
        self.request
            .borrow()
            .as_ref()
            .map(|request| request.uri.clone())
            .unwrap_or_default()
    }

    fn transport(&self) -> Option<TransportInfo> {
        self.request.borrow().as_ref().map(|request| TransportInfo {
            local: self.local,
            remote: request.remote,
            connected: self.connected.get(),
        })
    }

    fn close(&self) {
        self.connected.set(false);
        self.request.borrow_mut().take();
    }

    fn local_endpoint(&self) -> Endpoint {
        self.local
    }

    fn remote_endpoint(&self) -> Endpoint {
        self.request
            .borrow()
            .as_ref()
            .map_or(Endpoint::UNSPECIFIED, |request| request.remote)
    }
}

/// Copy `s` into a fixed-capacity string, truncating on a character
/// boundary when it does not fit.
fn clamped<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
