use core::net::Ipv4Addr;

use libweb::format::{self, STYLES_CSS, TEXT_CSS, TEXT_HTML};
use libweb::web::context::WebContext;
use libweb::web::error::Error;
use libweb::web::loopback::{LoopbackServer, MAX_ROUTES};
use libweb::web::Endpoint;

const LOCAL: Endpoint = Endpoint::new(Ipv4Addr::new(192, 168, 1, 10), 8080);
const REMOTE: Endpoint = Endpoint::new(Ipv4Addr::new(192, 168, 1, 77), 49152);

fn bound_context(server: &LoopbackServer) -> WebContext<'_> {
    let mut ctx = WebContext::new();
    ctx.setup(server);
    ctx
}

fn handle_root(ctx: &WebContext) {
    let mut buffer = [0u8; 1024];
    let mut pos = format::format_header(&mut buffer, "Simple");
    pos = format::format_tail(&mut buffer, pos);
    assert_eq!(pos, format::contents(&buffer).len());
    ctx.send(200, TEXT_HTML, format::contents(&buffer));
}

fn handle_args(ctx: &WebContext) {
    let mut buffer = [0u8; 1024];
    let mut pos = format::format_header(&mut buffer, "Arg Test");
    for i in 0..ctx.arg_count() {
        pos = format::format_buffer(
            &mut buffer,
            pos,
            format_args!(
                "<H3 align=\"center\"> Arg {} name is {} and value is {} </H3>",
                i,
                ctx.arg_name(i),
                ctx.arg(i)
            ),
        );
    }
    format::format_tail(&mut buffer, pos);
    ctx.send(200, TEXT_HTML, format::contents(&buffer));
}

fn handle_endpoints(ctx: &WebContext) {
    assert_eq!(ctx.uri().as_str(), "/endpoints");
    assert_eq!(ctx.local_port(), 8080);
    assert_eq!(ctx.local_ip(), Ipv4Addr::new(192, 168, 1, 10));
    assert_eq!(ctx.remote_port(), 49152);
    assert_eq!(ctx.remote_ip(), Ipv4Addr::new(192, 168, 1, 77));

    let transport = ctx.transport().expect("request in flight");
    assert_eq!(transport.local, LOCAL);
    assert_eq!(transport.remote, REMOTE);
    assert!(transport.connected);

    ctx.send(200, "text/plain", "ok");
}

fn handle_styles(ctx: &WebContext) {
    ctx.send_static(200, TEXT_CSS, STYLES_CSS);
}

fn handle_not_found(ctx: &WebContext) {
    let mut buffer = [0u8; 256];
    format::format_not_found(&mut buffer, ctx.uri().as_str());
    ctx.send(404, TEXT_HTML, format::contents(&buffer));
}

fn handle_close_twice(ctx: &WebContext) {
    ctx.close();
    ctx.close();
    ctx.send(200, "text/plain", "closed");
}

fn raw_reject_all(_uri: &str) -> bool {
    true
}

fn raw_ignore(_uri: &str) -> bool {
    false
}

#[test]
fn test_route_dispatch_records_response() {
    let server = LoopbackServer::new(LOCAL);
    let ctx = bound_context(&server);
    ctx.on("/", handle_root);

    server.push_request("/", REMOTE).unwrap();
    ctx.handle_client();

    let response = server.take_response().unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.content_type.as_str(), TEXT_HTML);
    assert!(response.body.starts_with("<!DOCTYPE html>"));
    assert!(response.body.contains("Simple"));
    assert!(response.body.ends_with("</body></html>"));
}

#[test]
fn test_query_arguments_are_decoded() {
    let server = LoopbackServer::new(LOCAL);
    let ctx = bound_context(&server);
    ctx.on("/device", handle_args);

    server
        .push_request("/device?mode=auto&level=7", REMOTE)
        .unwrap();
    ctx.handle_client();

    let response = server.take_response().unwrap();
    assert!(response.body.contains("Arg 0 name is mode and value is auto"));
    assert!(response.body.contains("Arg 1 name is level and value is 7"));
}

#[test]
fn test_uri_excludes_query_string() {
    let server = LoopbackServer::new(LOCAL);
    let ctx = bound_context(&server);
    ctx.on("/endpoints", handle_endpoints);

    server.push_request("/endpoints?x=1", REMOTE).unwrap();
    ctx.handle_client();
    assert_eq!(server.take_response().unwrap().status, 200);
}

#[test]
fn test_static_send() {
    let server = LoopbackServer::new(LOCAL);
    let ctx = bound_context(&server);
    ctx.on("/styles.css", handle_styles);

    server.push_request("/styles.css", REMOTE).unwrap();
    ctx.handle_client();

    let response = server.take_response().unwrap();
    assert_eq!(response.content_type.as_str(), TEXT_CSS);
    assert!(response.body.starts_with(".apButton"));
}

#[test]
fn test_not_found_handler_runs_for_unmatched_route() {
    let server = LoopbackServer::new(LOCAL);
    let ctx = bound_context(&server);
    ctx.on("/", handle_root);
    ctx.on_not_found(handle_not_found);

    server.push_request("/missing", REMOTE).unwrap();
    ctx.handle_client();

    let response = server.take_response().unwrap();
    assert_eq!(response.status, 404);
    assert!(response.body.contains("OOPS! /missing Not Found!"));
}

#[test]
fn test_default_not_found_response() {
    let server = LoopbackServer::new(LOCAL);
    let ctx = bound_context(&server);

    server.push_request("/nowhere", REMOTE).unwrap();
    ctx.handle_client();

    let response = server.take_response().unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(response.content_type.as_str(), "text/plain");
    assert_eq!(response.body.as_str(), "Not Found");
}

#[test]
fn test_raw_handler_preempts_routes() {
    let server = LoopbackServer::new(LOCAL);
    let ctx = bound_context(&server);
    ctx.add_raw_handler(raw_ignore);
    ctx.add_raw_handler(raw_reject_all);
    ctx.on("/", handle_root);

    server.push_request("/", REMOTE).unwrap();
    ctx.handle_client();

    // The raw handler claimed the request, so no route ran and nothing was
    // recorded; the request is still consumed.
    assert_eq!(server.take_response(), None);
    server.push_request("/", REMOTE).unwrap();
}

#[test]
fn test_handle_client_without_request_is_noop() {
    let server = LoopbackServer::new(LOCAL);
    let ctx = bound_context(&server);
    ctx.on("/", handle_root);
    ctx.handle_client();
    assert_eq!(server.take_response(), None);
}

#[test]
fn test_close_is_idempotent() {
    let server = LoopbackServer::new(LOCAL);
    let ctx = bound_context(&server);
    ctx.on("/bye", handle_close_twice);

    server.push_request("/bye", REMOTE).unwrap();
    assert!(server.is_connected());
    ctx.handle_client();

    assert!(!server.is_connected());
    assert_eq!(server.take_response().unwrap().body.as_str(), "closed");
}

#[test]
fn test_second_pending_request_is_rejected() {
    let server = LoopbackServer::new(LOCAL);
    server.push_request("/", REMOTE).unwrap();
    assert_eq!(server.push_request("/", REMOTE), Err(Error::RequestPending));
}

#[test]
fn test_route_table_overflow() {
    let server = LoopbackServer::new(LOCAL);
    for i in 0..MAX_ROUTES {
        let path = format!("/route/{}", i);
        server.try_route(&path, handle_root).unwrap();
    }
    assert_eq!(
        server.try_route("/one-too-many", handle_root),
        Err(Error::TooManyRoutes)
    );
}

#[test]
fn test_oversized_uri_is_rejected() {
    let server = LoopbackServer::new(LOCAL);
    let long = "x".repeat(200);
    assert_eq!(server.push_request(&long, REMOTE), Err(Error::UriTooLong));
}

#[test]
fn test_too_many_arguments_rejected() {
    let server = LoopbackServer::new(LOCAL);
    let uri = "/p?a=1&b=2&c=3&d=4&e=5&f=6&g=7&h=8&i=9";
    assert_eq!(server.push_request(uri, REMOTE), Err(Error::TooManyArgs));
}

#[test]
fn test_argument_reads_out_of_range_are_empty() {
    let server = LoopbackServer::new(LOCAL);
    let ctx = bound_context(&server);
    server.push_request("/p?only=one", REMOTE).unwrap();
    assert_eq!(ctx.arg_count(), 1);
    assert_eq!(ctx.arg(5).as_str(), "");
    assert_eq!(ctx.arg_name(5).as_str(), "");
}

#[test]
fn test_argument_reads_return_owned_values() {
    // Accessors hand out freshly owned strings, never references into
    // backend scratch state, so two reads cannot alias.
    let server = LoopbackServer::new(LOCAL);
    let ctx = bound_context(&server);
    server.push_request("/p?a=1&b=2", REMOTE).unwrap();
    let first = ctx.arg(0);
    let second = ctx.arg(1);
    assert_eq!(first.as_str(), "1");
    assert_eq!(second.as_str(), "2");
}
