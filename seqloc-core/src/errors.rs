use thiserror::Error;

/// Error type for location grammar parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// Text does not match the location grammar.
    #[error("invalid location syntax at offset {offset}: {fragment:?}")]
    Syntax {
        /// The offending part of the input, starting at the failure point.
        fragment: String,
        /// Byte offset of the failure point within the input.
        offset: usize,
    },
}

impl LocationError {
    /// Builds a syntax error pointing at `offset` within `text`.
    pub(crate) fn syntax(text: &str, offset: usize) -> Self {
        LocationError::Syntax {
            fragment: text[offset.min(text.len())..].to_string(),
            offset,
        }
    }
}

/// Error type for segment resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A sequence byte has no defined complement.
    #[error("no complement defined for symbol 0x{symbol:02x} at position {position}")]
    UnmappableSymbol {
        /// The byte without a complement mapping.
        symbol: u8,
        /// Zero-based offset of the byte within the span being complemented.
        position: usize,
    },
}

/// Result type alias for location grammar parsing.
pub type ParseResult<T> = std::result::Result<T, LocationError>;

/// Result type alias for segment resolution.
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
