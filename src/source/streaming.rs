//! The forward only, bounded window token source.

use super::{SourceError, TokenAccess, TokenProducer};
use crate::token::Token;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Pulls tokens on demand and retains only the window `[base, base + window_len)`.
#[derive(Debug)]
pub struct StreamingTokenSource<P> {
    producer: P,
    window: VecDeque<Token>,
    base: usize,
    eof_seen: bool,
    last_offset: Option<usize>,
    peak_window: usize,
}

impl<P: TokenProducer> StreamingTokenSource<P> {
    pub fn new(producer: P) -> Self {
        Self::with_capacity(producer, 0)
    }

    /// Pre-sizes the window for the expected lookahead.
    pub fn with_capacity(producer: P, capacity: usize) -> Self {
        Self {
            producer,
            window: VecDeque::with_capacity(capacity),
            base: 0,
            eof_seen: false,
            last_offset: None,
            peak_window: 0,
        }
    }

    /// The token at `index`. Indices below the low-water mark are [SourceError::Evicted].
    pub fn get(&mut self, index: usize) -> Result<Option<&Token>, SourceError> {
        if index < self.base {
            return Err(SourceError::Evicted {
                index,
                base: self.base,
            });
        }
        while self.base + self.window.len() <= index && !self.eof_seen {
            let token = self.pull();
            self.window.push_back(token);
            self.peak_window = self.peak_window.max(self.window.len());
        }
        Ok(self.window.get(index - self.base))
    }

    /// Drops every token below `index` and raises the low-water mark to it. Tokens not yet
    /// pulled are pulled and discarded so indices stay aligned with the producer.
    pub fn consume_to(&mut self, index: usize) {
        if index <= self.base {
            return;
        }
        let dropped = (index - self.base).min(self.window.len());
        self.window.drain(..dropped);
        self.base += dropped;
        while self.base < index && !self.eof_seen {
            self.pull();
            self.base += 1;
        }
        self.base = index;
        trace!(base = self.base, window = self.window.len(), "released tokens");
    }

    /// The low-water mark: smallest index still readable.
    pub fn base(&self) -> usize {
        self.base
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Largest window held at any time so far.
    pub fn peak_window(&self) -> usize {
        self.peak_window
    }

    pub fn eof_seen(&self) -> bool {
        self.eof_seen
    }

    fn pull(&mut self) -> Token {
        let token = match self.producer.next_token() {
            Some(token) => token,
            None => {
                let offset = self.last_offset.unwrap_or(0);
                debug!(offset, "producer exhausted without eof, synthesizing one");
                Token::eof(offset)
            }
        };
        self.last_offset = Some(token.offset);
        self.eof_seen = token.is_eof();
        token
    }
}

impl<P: TokenProducer> Iterator for StreamingTokenSource<P> {
    type Item = Token;

    /// Reads the token at `base` and moves past it.
    fn next(&mut self) -> Option<Token> {
        let index = self.base;
        if !matches!(self.get(index), Ok(Some(_))) {
            return None;
        }
        let token = self.window.pop_front()?;
        self.base += 1;
        Some(token)
    }
}

impl<P: TokenProducer> TokenAccess for StreamingTokenSource<P> {
    fn token_at(&mut self, index: usize) -> Result<Option<&Token>, SourceError> {
        self.get(index)
    }

    fn release_before(&mut self, index: usize) {
        self.consume_to(index);
    }
}
