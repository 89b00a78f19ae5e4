//! The caching, index addressable token source.

use super::{eof_offset, SourceError, TokenAccess, TokenProducer};
use crate::token::Token;
use tracing::debug;

/// Pulls tokens on demand and keeps all of them.
#[derive(Debug)]
pub struct TokenSource<P> {
    producer: P,
    buffer: Vec<Token>,
    finished: bool,
}

impl TokenSource<std::vec::IntoIter<Token>> {
    /// A source over an already materialized token list.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::new(tokens.into_iter())
    }
}

impl<P: TokenProducer> TokenSource<P> {
    pub fn new(producer: P) -> Self {
        Self {
            producer,
            buffer: Vec::new(),
            finished: false,
        }
    }

    /// The token at `index`, pulling from the producer as needed. `None` past EOF.
    pub fn get(&mut self, index: usize) -> Option<&Token> {
        self.fill_to(index);
        self.buffer.get(index)
    }

    /// Total token count, EOF included. Forces full materialization.
    pub fn len(&mut self) -> usize {
        self.all().len()
    }

    /// Every token, EOF included. Forces full materialization.
    pub fn all(&mut self) -> &[Token] {
        while !self.finished {
            self.pull();
        }
        &self.buffer
    }

    /// Whether the producer has been drained.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of tokens pulled so far.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn into_tokens(mut self) -> Vec<Token> {
        self.all();
        self.buffer
    }

    fn fill_to(&mut self, index: usize) {
        while self.buffer.len() <= index && !self.finished {
            self.pull();
        }
    }

    fn pull(&mut self) {
        let token = match self.producer.next_token() {
            Some(token) => token,
            None => {
                let offset = eof_offset(self.buffer.last());
                debug!(offset, "producer exhausted without eof, synthesizing one");
                Token::eof(offset)
            }
        };
        self.finished = token.is_eof();
        self.buffer.push(token);
    }
}

impl<P: TokenProducer> TokenAccess for TokenSource<P> {
    fn token_at(&mut self, index: usize) -> Result<Option<&Token>, SourceError> {
        Ok(self.get(index))
    }
}
