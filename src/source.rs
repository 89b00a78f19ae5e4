//! Lazily filled token sources
//!
//!     A language front end hands tokens to the parser through a token source rather than
//!     a materialized vector. The source pulls from a [TokenProducer] one token at a time
//!     and only as far as a reader actually looks.
//!
//!     TokenSource            index addressable, caches everything it has pulled
//!     StreamingTokenSource   forward only, keeps a sliding window of recent tokens
//!
//! Termination
//!
//!     A producer terminates by emitting an EOF token. A producer that simply runs dry is
//!     treated the same way: the source synthesizes an EOF token positioned at the offset
//!     of the last real token (or 0 for an empty stream). After EOF no further pulls are
//!     made, so repeated reads are idempotent.
//!
//! The low-water mark
//!
//!     The streaming source tracks `base`, the smallest index it still holds. Reading
//!     below `base` is a contract violation reported as [SourceError::Evicted]; it is
//!     never silently turned into "no token". Parsers release tokens through
//!     [TokenAccess::release_before] after each advance, which is what keeps memory
//!     bounded by the lookahead in use rather than by input size.

pub mod buffered;
pub mod streaming;

pub use buffered::TokenSource;
pub use streaming::StreamingTokenSource;

use crate::token::Token;
use thiserror::Error;

/// Emits one token per call; `None` means the producer is exhausted.
pub trait TokenProducer {
    fn next_token(&mut self) -> Option<Token>;
}

impl<I> TokenProducer for I
where
    I: Iterator<Item = Token>,
{
    fn next_token(&mut self) -> Option<Token> {
        self.next()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("token {index} has been evicted (window starts at {base})")]
    Evicted { index: usize, base: usize },
}

/// Random access over a token source, as needed by the parser base.
pub trait TokenAccess {
    /// The token at `index`, `Ok(None)` past the end of the stream.
    fn token_at(&mut self, index: usize) -> Result<Option<&Token>, SourceError>;

    /// Signals that no index below `index` will be read again.
    fn release_before(&mut self, _index: usize) {}
}

/// Offset for a synthesized EOF token.
pub(crate) fn eof_offset(last: Option<&Token>) -> usize {
    last.map_or(0, |token| token.offset)
}
