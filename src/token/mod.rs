//! Zero-copy, lazy tokenizing of delimited strings.
//!
//! Firmware frequently needs the pieces of a hierarchical identifier such
//! as a request path or a UPnP-style URN without allocating. [`Tokenizer`]
//! splits a borrowed source string on a single delimiter character and
//! hands out subslices of it; nothing is copied and the tokens live as
//! long as the source does.
//!
//! ```rust
//! use libweb::token::Tokenizer;
//!
//! let mut urn = Tokenizer::new("urn:schemas-upnp-org:device:1", ':');
//! assert_eq!(urn.first(), Some("urn"));
//! assert_eq!(urn.next(), Some("schemas-upnp-org"));
//! assert_eq!(urn.token_at(2), Some("device"));
//!
//! // Paths skip exactly one leading delimiter.
//! let mut path = Tokenizer::new("/device/config", '/');
//! assert_eq!(path.first(), Some("device"));
//! ```

/// A cursor over the delimiter-separated tokens of a source string.
///
/// The tokenizer is `Copy` and holds only a reference, a delimiter, and a
/// cursor; it is cheap to pass around and to restart. Tokens are produced
/// left to right. Consecutive delimiters produce empty tokens; only one
/// leading delimiter is skipped.
///
/// [`Iterator`] is implemented, so a tokenizer can drive a `for` loop
/// directly; iteration that has not been explicitly started with
/// [`first`](Self::first) starts itself.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    source: &'a str,
    delim: char,
    /// Byte offset the next scan starts at; `None` once retired.
    cursor: Option<usize>,
    started: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `source` splitting on `delim`.
    pub const fn new(source: &'a str, delim: char) -> Self {
        Self {
            source,
            delim,
            cursor: None,
            started: false,
        }
    }

    /// Reset the cursor and return the first token.
    ///
    /// Exactly one leading delimiter is skipped if present. Returns `None`
    /// for an empty source.
    pub fn first(&mut self) -> Option<&'a str> {
        self.started = true;
        if self.source.is_empty() {
            self.cursor = None;
            return None;
        }
        let start = if self.source.starts_with(self.delim) {
            self.delim.len_utf8()
        } else {
            0
        };
        Some(self.scan(start))
    }

    /// Whether the cursor has not been retired yet.
    ///
    /// Becomes `false` once a scan has reached the end of the source;
    /// before iteration starts it is also `false`.
    pub fn has_next(&self) -> bool {
        self.cursor.is_some()
    }

    /// The token at zero-based `index`, or `None` past the last token.
    ///
    /// Re-scans from the beginning of the source on every call, so this is
    /// O(index); acceptable for the short identifiers it is meant for.
    pub fn token_at(&self, index: usize) -> Option<&'a str> {
        let mut scan = Tokenizer::new(self.source, self.delim);
        scan.nth(index)
    }

    /// Scan from `start` to the next delimiter or end of source, advancing
    /// or retiring the cursor.
    fn scan(&mut self, start: usize) -> &'a str {
        match self.source[start..].find(self.delim) {
            Some(offset) => {
                let end = start + offset;
                self.cursor = Some(end + self.delim.len_utf8());
                &self.source[start..end]
            }
            None => {
                self.cursor = None;
                &self.source[start..]
            }
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if !self.started {
            return self.first();
        }
        let start = self.cursor?;
        Some(self.scan(start))
    }
}
