//! Progressive formatted writes into fixed-capacity byte buffers.
//!
//! Response bodies are built by threading a write position through a chain
//! of calls against one caller-owned buffer, with no heap and no
//! intermediate copies:
//!
//! ```rust
//! use libweb::format::{contents, format_buffer, format_header, format_tail};
//!
//! let mut buffer = [0u8; 1500];
//! let mut pos = format_header(&mut buffer, "Page Title");
//! pos = format_buffer(&mut buffer, pos, format_args!("<p>uptime: {}s</p>", 4711));
//! pos = format_tail(&mut buffer, pos);
//! assert!(contents(&buffer).starts_with("<!DOCTYPE html>"));
//! ```
//!
//! The buffer is always NUL-terminated after an accepted call, and every
//! call returns the new logical length of the buffer. A call made with a
//! position past `capacity - 2` is rejected and returns the full capacity
//! as a sentinel meaning "buffer exhausted, stop formatting". The sentinel
//! is itself past `capacity - 2`, so an exhausted chain degrades to no-ops
//! instead of failing.

use core::fmt::{self, Write};

/// Content type for HTML pages.
pub const TEXT_HTML: &str = "text/html";

/// Content type for stylesheets.
pub const TEXT_CSS: &str = "text/css";

/// Opening fragment of every page: document type, viewport, stylesheet
/// link, and body style.
pub const HTML_HEADER: &str = "<!DOCTYPE html><html><meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
<head><link rel=\"stylesheet\" type=\"text/css\" href=\"/styles.css\"></head>\
<body style=\"font-family: Arial\">";

/// Closing fragment of every page.
pub const HTML_TAIL: &str = "</body></html>";

/// Stylesheet served at `/styles.css` by firmware using the page
/// fragments above.
pub const STYLES_CSS: &str = ".apButton {\
background:linear-gradient(to bottom, #ededed 5%, #bab1ba 100%);\
background-color:#ededed;\
border-radius:12px;\
border:1px solid #d6bcd6;\
display:block;\
cursor:pointer;\
color:#3a8a9e;\
font-family:Arial;\
font-size: 1.2em;\
padding: .5em;\
width: 100%;\
text-decoration:none;\
margin: 0px auto 3px auto;\
text-shadow:0px 1px 0px #e1e2ed;\
text-align: center;\
}\
.apButton:hover {\
background:linear-gradient(to bottom, #bab1ba 5%, #ededed 100%);\
background-color:#bab1ba;\
}\
.apButton:active {\
position:relative;\
top:1px;\
}\
[class*=\"scaled\"] {\
width: 80% ;\
}\
@media only screen and (min-width: 768px) {\
.scaled {width: 40%;}\
}\
label {\
font-family: Arial;\
font-size: 1.2em;\
display: inline;\
}";

/// A bounded writer over the tail of a buffer, reserving one byte for the
/// NUL terminator. Overflowing output is truncated on a character boundary
/// rather than reported as an error, like `vsnprintf`.
struct Truncating<'a> {
    buf: &'a mut [u8],
    written: usize,
}

impl<'a> Truncating<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, written: 0 }
    }
}

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let available = self.buf.len() - 1 - self.written;
        let take = if s.len() <= available {
            s.len()
        } else {
            let mut end = available;
            while end > 0 && !s.is_char_boundary(end) {
                end -= 1;
            }
            end
        };
        self.buf[self.written..self.written + take].copy_from_slice(&s.as_bytes()[..take]);
        self.written += take;
        Ok(())
    }
}

/// Formatted print into `buf` starting at byte position `pos`.
///
/// If `pos` is within `[0, capacity - 2]`, performs a bounded write,
/// guarantees NUL termination within the buffer, and returns the new
/// logical length. Otherwise performs no write and returns the capacity as
/// the exhaustion sentinel.
///
/// # Examples
///
/// ```rust
/// use libweb::format::{contents, format_buffer};
///
/// let mut buf = [0u8; 100];
/// let len = format_buffer(&mut buf, 0, format_args!("Hi {}", "Bob"));
/// assert_eq!(len, 6);
/// assert_eq!(contents(&buf), "Hi Bob");
/// ```
pub fn format_buffer(buf: &mut [u8], pos: usize, args: fmt::Arguments<'_>) -> usize {
    let capacity = buf.len();
    if capacity < 2 || pos > capacity - 2 {
        return capacity;
    }
    let written = {
        let mut writer = Truncating::new(&mut buf[pos..]);
        let _ = writer.write_fmt(args);
        writer.written
    };
    buf[pos + written] = 0;
    pos + written
}

/// Insert the HTML start fragment and an optional page title.
///
/// The start fragment is written at position 0; if `title` is non-empty a
/// centered `<H1>` title is appended after it. Returns the new logical
/// length.
pub fn format_header(buf: &mut [u8], title: &str) -> usize {
    let pos = format_buffer(buf, 0, format_args!("{}", HTML_HEADER));
    if title.is_empty() {
        pos
    } else {
        format_title(buf, pos, title)
    }
}

/// Append a centered `<H1>` page title at `pos`.
pub fn format_title(buf: &mut [u8], pos: usize, title: &str) -> usize {
    format_buffer(
        buf,
        pos,
        format_args!("<H1 align=\"center\"> {} </H1><br>", title),
    )
}

/// Append the HTML closing fragment at `pos`.
pub fn format_tail(buf: &mut [u8], pos: usize) -> usize {
    format_buffer(buf, pos, format_args!("{}", HTML_TAIL))
}

/// Write a complete, standalone not-found page for `uri` at position 0.
pub fn format_not_found(buf: &mut [u8], uri: &str) -> usize {
    format_buffer(
        buf,
        0,
        format_args!(
            "<!DOCTYPE html><html><body style=\"font-family: Calibri\">\
             <h1 align=\"center\"> OOPS! {} Not Found!</h1></body></html>",
            uri
        ),
    )
}

/// URL-escape a base64 string into `buf` starting at `pos`.
///
/// Copies `b64` expanding `=` to `%3D` and `+` to `%2B`; all other bytes
/// are copied unchanged. Escapes are written atomically: if the next
/// expansion would cross `capacity - 1`, the copy stops, the buffer is
/// NUL-terminated at the stopping point, and `capacity - 1` is returned to
/// signal truncation. With `pos` out of range, no write is performed and
/// the capacity sentinel is returned, matching [`format_buffer`].
pub fn base64_to_url(buf: &mut [u8], pos: usize, b64: &str) -> usize {
    let capacity = buf.len();
    if capacity < 2 || pos > capacity - 2 {
        return capacity;
    }
    let mut end = pos;
    let mut truncated = false;
    for &byte in b64.as_bytes() {
        let expansion: &[u8] = match byte {
            b'=' => b"%3D",
            b'+' => b"%2B",
            _ => core::slice::from_ref(&byte),
        };
        if end + expansion.len() > capacity - 1 {
            truncated = true;
            break;
        }
        buf[end..end + expansion.len()].copy_from_slice(expansion);
        end += expansion.len();
    }
    buf[end] = 0;
    if truncated { capacity - 1 } else { end }
}

/// The logical string held by a formatted buffer: everything up to the
/// first NUL byte. Returns the empty string if the buffer does not hold
/// valid UTF-8.
pub fn contents(buf: &[u8]) -> &str {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    core::str::from_utf8(&buf[..end]).unwrap_or("")
}
