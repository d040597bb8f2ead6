//! The request context facade.
//!
//! [`WebContext`] substitutes for virtual dispatch across web server types
//! that share no common base type or ABI: each capability lives in a named
//! slot holding exactly one plain function pointer, and [`WebContext::setup`]
//! binds every slot to a shim over one concrete [`Backend`] exactly once per
//! backend instance. After setup, dispatch is a direct call through the
//! stored pointer, with no further type inspection or lookup.
//!
//! A freshly constructed context is unconfigured but fully defined: every
//! slot holds a built-in neutral default, so every operation is safe to call
//! at any time. No operation panics and none returns a `Result`.

use core::any::Any;
use core::fmt;
use core::net::Ipv4Addr;

use super::{ArgString, Backend, HandlerFn, RawHandlerFn, TransportInfo, UriString};

/// Slot: pump one iteration of backend request processing.
pub type PumpFn = fn(&dyn Any);
/// Slot: send a response for the current request.
pub type SendFn = fn(&dyn Any, u16, &str, &str);
/// Slot: send a response from read-only static storage.
pub type SendStaticFn = fn(&dyn Any, u16, &'static str, &'static str);
/// Slot: register a route handler.
pub type OnRouteFn = fn(&dyn Any, &str, HandlerFn);
/// Slot: register the not-found handler.
pub type OnNotFoundFn = fn(&dyn Any, HandlerFn);
/// Slot: register a raw handler.
pub type AddRawHandlerFn = fn(&dyn Any, RawHandlerFn);
/// Slot: count arguments on the current request.
pub type ArgCountFn = fn(&dyn Any) -> usize;
/// Slot: fetch an argument name or value by index.
pub type ArgFn = fn(&dyn Any, usize) -> ArgString;
/// Slot: fetch the current request URI.
pub type UriFn = fn(&dyn Any) -> UriString;
/// Slot: snapshot the connection carrying the current request.
pub type TransportFn = fn(&dyn Any) -> Option<TransportInfo>;
/// Slot: release the active connection.
pub type CloseFn = fn(&dyn Any);
/// Slot: query a port number.
pub type PortFn = fn(&dyn Any) -> u16;
/// Slot: query an IPv4 address.
pub type AddrFn = fn(&dyn Any) -> Ipv4Addr;

/// Backend-agnostic request/response object exposed to handler code.
///
/// The context holds a non-owning reference to its backend; the backend must
/// outlive every context bound to it, which the `'a` lifetime enforces.
/// Handler code receives a configured context and does not mutate its slot
/// bindings; rebinding is a setup-time concern.
///
/// # Examples
///
/// ```rust
/// use libweb::web::context::WebContext;
///
/// // Unconfigured contexts answer every query with a neutral default.
/// let ctx = WebContext::new();
/// assert_eq!(ctx.arg_count(), 0);
/// assert_eq!(ctx.uri().as_str(), "");
/// ctx.send(200, "text/html", "ignored"); // safe no-op
/// ```
pub struct WebContext<'a> {
    backend: Option<&'a dyn Any>,
    pump_fn: PumpFn,
    send_fn: SendFn,
    send_static_fn: SendStaticFn,
    on_route_fn: OnRouteFn,
    on_not_found_fn: OnNotFoundFn,
    add_raw_handler_fn: AddRawHandlerFn,
    arg_count_fn: ArgCountFn,
    arg_fn: ArgFn,
    arg_name_fn: ArgFn,
    uri_fn: UriFn,
    transport_fn: TransportFn,
    close_fn: CloseFn,
    local_port_fn: PortFn,
    local_addr_fn: AddrFn,
    remote_port_fn: PortFn,
    remote_addr_fn: AddrFn,
}

impl Default for WebContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WebContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebContext")
            .field("configured", &self.backend.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a> WebContext<'a> {
    /// Create an unconfigured context with every slot at its neutral
    /// default.
    pub fn new() -> Self {
        Self {
            backend: None,
            pump_fn: |_| {},
            send_fn: |_, _, _, _| {},
            send_static_fn: |_, _, _, _| {},
            on_route_fn: |_, _, _| {},
            on_not_found_fn: |_, _| {},
            add_raw_handler_fn: |_, _| {},
            arg_count_fn: |_| 0,
            arg_fn: |_, _| ArgString::new(),
            arg_name_fn: |_, _| ArgString::new(),
            uri_fn: |_| UriString::new(),
            transport_fn: |_| None,
            close_fn: |_| {},
            local_port_fn: |_| 0,
            local_addr_fn: |_| Ipv4Addr::UNSPECIFIED,
            remote_port_fn: |_| 0,
            remote_addr_fn: |_| Ipv4Addr::UNSPECIFIED,
        }
    }

    /// Whether [`setup`](Self::setup) has bound this context to a backend.
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Bind every capability slot to `backend`.
    ///
    /// Called exactly once per backend instance, at configuration time. Each
    /// slot receives a shim that recovers the concrete backend type and
    /// forwards to the corresponding [`Backend`] method; capabilities the
    /// backend left at their trait defaults stay neutral. Individual slots
    /// may still be overridden afterwards through their setters.
    pub fn setup<B: Backend + 'static>(&mut self, backend: &'a B) {
        self.backend = Some(backend);
        self.set_pump_fn(Some(|b| {
            if let Some(b) = b.downcast_ref::<B>() {
                b.handle_client();
            }
        }));
        self.set_send_fn(Some(|b, status, content_type, body| {
            if let Some(b) = b.downcast_ref::<B>() {
                b.send(status, content_type, body);
            }
        }));
        self.set_send_static_fn(Some(|b, status, content_type, body| {
            if let Some(b) = b.downcast_ref::<B>() {
                b.send_static(status, content_type, body);
            }
        }));
        self.set_on_route_fn(Some(|b, path, handler| {
            if let Some(b) = b.downcast_ref::<B>() {
                b.on_route(path, handler);
            }
        }));
        self.set_on_not_found_fn(Some(|b, handler| {
            if let Some(b) = b.downcast_ref::<B>() {
                b.on_not_found(handler);
            }
        }));
        self.set_add_raw_handler_fn(Some(|b, handler| {
            if let Some(b) = b.downcast_ref::<B>() {
                b.add_raw_handler(handler);
            }
        }));
        self.set_arg_count_fn(Some(|b| {
            b.downcast_ref::<B>().map_or(0, B::arg_count)
        }));
        self.set_arg_fn(Some(|b, index| {
            b.downcast_ref::<B>()
                .map_or_else(ArgString::new, |b| b.arg(index))
        }));
        self.set_arg_name_fn(Some(|b, index| {
            b.downcast_ref::<B>()
                .map_or_else(ArgString::new, |b| b.arg_name(index))
        }));
        self.set_uri_fn(Some(|b| {
            b.downcast_ref::<B>().map_or_else(UriString::new, B::uri)
        }));
        self.set_transport_fn(Some(|b| {
            b.downcast_ref::<B>().and_then(B::transport)
        }));
        self.set_close_fn(Some(|b| {
            if let Some(b) = b.downcast_ref::<B>() {
                b.close();
            }
        }));
        self.set_local_port_fn(Some(|b| {
            b.downcast_ref::<B>().map_or(0, |b| b.local_endpoint().port)
        }));
        self.set_local_addr_fn(Some(|b| {
            b.downcast_ref::<B>()
                .map_or(Ipv4Addr::UNSPECIFIED, |b| b.local_endpoint().addr)
        }));
        self.set_remote_port_fn(Some(|b| {
            b.downcast_ref::<B>()
                .map_or(0, |b| b.remote_endpoint().port)
        }));
        self.set_remote_addr_fn(Some(|b| {
            b.downcast_ref::<B>()
                .map_or(Ipv4Addr::UNSPECIFIED, |b| b.remote_endpoint().addr)
        }));
    }

    // Slot setters. Passing `None` keeps the existing binding, so partial
    // configuration can be layered safely.

    /// Bind the client-pump slot; `None` keeps the current binding.
    pub fn set_pump_fn(&mut self, f: Option<PumpFn>) {
        if let Some(f) = f {
            self.pump_fn = f;
        }
    }

    /// Bind the send slot; `None` keeps the current binding.
    pub fn set_send_fn(&mut self, f: Option<SendFn>) {
        if let Some(f) = f {
            self.send_fn = f;
        }
    }

    /// Bind the static-send slot; `None` keeps the current binding.
    pub fn set_send_static_fn(&mut self, f: Option<SendStaticFn>) {
        if let Some(f) = f {
            self.send_static_fn = f;
        }
    }

    /// Bind the route-registration slot; `None` keeps the current binding.
    pub fn set_on_route_fn(&mut self, f: Option<OnRouteFn>) {
        if let Some(f) = f {
            self.on_route_fn = f;
        }
    }

    /// Bind the not-found-registration slot; `None` keeps the current
    /// binding.
    pub fn set_on_not_found_fn(&mut self, f: Option<OnNotFoundFn>) {
        if let Some(f) = f {
            self.on_not_found_fn = f;
        }
    }

    /// Bind the raw-handler-registration slot; `None` keeps the current
    /// binding.
    pub fn set_add_raw_handler_fn(&mut self, f: Option<AddRawHandlerFn>) {
        if let Some(f) = f {
            self.add_raw_handler_fn = f;
        }
    }

    /// Bind the argument-count slot; `None` keeps the current binding.
    pub fn set_arg_count_fn(&mut self, f: Option<ArgCountFn>) {
        if let Some(f) = f {
            self.arg_count_fn = f;
        }
    }

    /// Bind the argument-value slot; `None` keeps the current binding.
    pub fn set_arg_fn(&mut self, f: Option<ArgFn>) {
        if let Some(f) = f {
            self.arg_fn = f;
        }
    }

    /// Bind the argument-name slot; `None` keeps the current binding.
    pub fn set_arg_name_fn(&mut self, f: Option<ArgFn>) {
        if let Some(f) = f {
            self.arg_name_fn = f;
        }
    }

    /// Bind the URI slot; `None` keeps the current binding.
    pub fn set_uri_fn(&mut self, f: Option<UriFn>) {
        if let Some(f) = f {
            self.uri_fn = f;
        }
    }

    /// Bind the transport-snapshot slot; `None` keeps the current binding.
    pub fn set_transport_fn(&mut self, f: Option<TransportFn>) {
        if let Some(f) = f {
            self.transport_fn = f;
        }
    }

    /// Bind the close slot; `None` keeps the current binding.
    pub fn set_close_fn(&mut self, f: Option<CloseFn>) {
        if let Some(f) = f {
            self.close_fn = f;
        }
    }

    /// Bind the local-port slot; `None` keeps the current binding.
    pub fn set_local_port_fn(&mut self, f: Option<PortFn>) {
        if let Some(f) = f {
            self.local_port_fn = f;
        }
    }

    /// Bind the local-address slot; `None` keeps the current binding.
    pub fn set_local_addr_fn(&mut self, f: Option<AddrFn>) {
        if let Some(f) = f {
            self.local_addr_fn = f;
        }
    }

    /// Bind the remote-port slot; `None` keeps the current binding.
    pub fn set_remote_port_fn(&mut self, f: Option<PortFn>) {
        if let Some(f) = f {
            self.remote_port_fn = f;
        }
    }

    /// Bind the remote-address slot; `None` keeps the current binding.
    pub fn set_remote_addr_fn(&mut self, f: Option<AddrFn>) {
        if let Some(f) = f {
            self.remote_addr_fn = f;
        }
    }

    // Facade operations. Each is a direct call through the bound slot; an
    // unconfigured context answers with the slot's neutral default.

    /// Pump one iteration of backend request processing. A matching route
    /// handler runs to completion inside this call.
    pub fn handle_client(&self) {
        if let Some(b) = self.backend {
            (self.pump_fn)(b);
        }
    }

    /// Send a response for the current request. `body` is transmitted
    /// byte-exact and `status` is forwarded unchanged to the backend.
    pub fn send(&self, status: u16, content_type: &str, body: &str) {
        if let Some(b) = self.backend {
            (self.send_fn)(b, status, content_type, body);
        }
    }

    /// Send a response whose content type and body are read-only statics,
    /// such as a stylesheet baked into the firmware image.
    pub fn send_static(&self, status: u16, content_type: &'static str, body: &'static str) {
        if let Some(b) = self.backend {
            (self.send_static_fn)(b, status, content_type, body);
        }
    }

    /// Register `handler` for requests matching `path`. The backend invokes
    /// `handler` with a context configured like this one, so handler code
    /// reads the request and writes the response through a single object.
    pub fn on(&self, path: &str, handler: HandlerFn) {
        if let Some(b) = self.backend {
            (self.on_route_fn)(b, path, handler);
        }
    }

    /// Register `handler` for requests matching no route.
    pub fn on_not_found(&self, handler: HandlerFn) {
        if let Some(b) = self.backend {
            (self.on_not_found_fn)(b, handler);
        }
    }

    /// Register a raw handler that runs before route matching.
    pub fn add_raw_handler(&self, handler: RawHandlerFn) {
        if let Some(b) = self.backend {
            (self.add_raw_handler_fn)(b, handler);
        }
    }

    /// Number of arguments on the current request; `0` when unbound or no
    /// request is in flight.
    pub fn arg_count(&self) -> usize {
        self.backend.map_or(0, |b| (self.arg_count_fn)(b))
    }

    /// Value of argument `index`, zero-based; empty when out of range.
    pub fn arg(&self, index: usize) -> ArgString {
        self.backend
            .map_or_else(ArgString::new, |b| (self.arg_fn)(b, index))
    }

    /// Name of argument `index`, zero-based; empty when out of range.
    pub fn arg_name(&self, index: usize) -> ArgString {
        self.backend
            .map_or_else(ArgString::new, |b| (self.arg_name_fn)(b, index))
    }

    /// URI of the current request; empty when unbound.
    pub fn uri(&self) -> UriString {
        self.backend
            .map_or_else(UriString::new, |b| (self.uri_fn)(b))
    }

    /// Snapshot of the connection carrying the current request.
    pub fn transport(&self) -> Option<TransportInfo> {
        self.backend.and_then(|b| (self.transport_fn)(b))
    }

    /// Release the active connection, if any, immediately. Idempotent.
    pub fn close(&self) {
        if let Some(b) = self.backend {
            (self.close_fn)(b);
        }
    }

    /// Port the server listens on; `0` when unbound.
    pub fn local_port(&self) -> u16 {
        self.backend.map_or(0, |b| (self.local_port_fn)(b))
    }

    /// Address the server listens on; unspecified when unbound.
    pub fn local_ip(&self) -> Ipv4Addr {
        self.backend
            .map_or(Ipv4Addr::UNSPECIFIED, |b| (self.local_addr_fn)(b))
    }

    /// Port of the remote peer; `0` when unbound.
    pub fn remote_port(&self) -> u16 {
        self.backend.map_or(0, |b| (self.remote_port_fn)(b))
    }

    /// Address of the remote peer; unspecified when unbound.
    pub fn remote_ip(&self) -> Ipv4Addr {
        self.backend
            .map_or(Ipv4Addr::UNSPECIFIED, |b| (self.remote_addr_fn)(b))
    }
}
