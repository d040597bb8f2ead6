//! Common error types for web backend operations

/// A common error type for backend registration and request queuing.
///
/// The request context facade itself never fails: unbound capabilities
/// degrade to neutral defaults. These errors surface only at the fallible
/// edges of a concrete backend, where fixed-capacity tables can overflow.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The route table is full.
    TooManyRoutes,
    /// The raw handler table is full.
    TooManyHandlers,
    /// A request is already pending and has not been dispatched yet.
    RequestPending,
    /// The request URI exceeds the supported length.
    UriTooLong,
    /// The request carries more arguments than the backend can hold.
    TooManyArgs,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::TooManyRoutes => defmt::write!(f, "TooManyRoutes"),
            Error::TooManyHandlers => defmt::write!(f, "TooManyHandlers"),
            Error::RequestPending => defmt::write!(f, "RequestPending"),
            Error::UriTooLong => defmt::write!(f, "UriTooLong"),
            Error::TooManyArgs => defmt::write!(f, "TooManyArgs"),
        }
    }
}
