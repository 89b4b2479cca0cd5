/// Errors raised by collection operations and component parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Argument outside the accepted set (e.g. an unknown filter mode)
    InvalidArgument,
    /// Offset rejected by a component's offset validation
    InvalidOffset,
    /// Invalid percent encoding
    InvalidPercentEncoding,
    /// Invalid host label
    InvalidHost,
    /// IDNA processing error
    IdnaError,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::InvalidArgument => "Invalid argument",
            Self::InvalidOffset => "Invalid offset",
            Self::InvalidPercentEncoding => "Invalid percent encoding",
            Self::InvalidHost => "Invalid host",
            Self::IdnaError => "IDNA processing error",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for collection and component operations
pub type Result<T> = core::result::Result<T, Error>;
