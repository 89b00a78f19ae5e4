//! Positioned pattern probing over raw text
//!
//!     The [Scanner] is the lowest layer of a hand written lexer. It holds the input, a
//!     byte position and the text of the last successful match, and nothing else: there
//!     is no history and no backtracking memory. A caller that wants to retry simply
//!     saves [Scanner::pos] and restores it with [Scanner::set_pos].
//!
//!     Patterns are anything implementing [Pattern]. Three engines are provided:
//!
//!         meta::Regex    regex-automata, run as an anchored search at the cursor
//!         regex::Regex   leftmost-first semantics of the regex crate
//!         Arc<Expr>      longest match via Brzozowski derivatives (see [crate::matching])
//!
//!     `regex::Regex` has no anchored search, so a failed prefix match scans the whole
//!     remainder unless the pattern starts with `^`. Lexers that probe many patterns at
//!     every position should use `meta::Regex`.
//!
//!     All operations are anchored at the current position except [Scanner::scan_until],
//!     which searches forward.

use crate::matching::{derive, nullable, Expr, Matcher};
use regex::Regex;
use regex_automata::{meta, Anchored, Input};
use std::sync::Arc;

/// Something that can be matched against the start of a string, or searched for.
pub trait Pattern {
    /// Length in bytes of a match anchored at the start of `haystack`.
    fn match_prefix(&self, haystack: &str) -> Option<usize>;

    /// Byte range `(start, end)` of the first match in `haystack`.
    fn find_next(&self, haystack: &str) -> Option<(usize, usize)> {
        haystack
            .char_indices()
            .map(|(start, _)| start)
            .chain(std::iter::once(haystack.len()))
            .find_map(|start| {
                self.match_prefix(&haystack[start..])
                    .map(|len| (start, start + len))
            })
    }
}

impl Pattern for Regex {
    fn match_prefix(&self, haystack: &str) -> Option<usize> {
        self.find(haystack)
            .filter(|found| found.start() == 0)
            .map(|found| found.end())
    }

    fn find_next(&self, haystack: &str) -> Option<(usize, usize)> {
        self.find(haystack).map(|found| (found.start(), found.end()))
    }
}

impl Pattern for meta::Regex {
    fn match_prefix(&self, haystack: &str) -> Option<usize> {
        let input = Input::new(haystack).anchored(Anchored::Yes);
        self.search(&input).map(|found| found.end())
    }

    fn find_next(&self, haystack: &str) -> Option<(usize, usize)> {
        self.find(haystack).map(|found| (found.start(), found.end()))
    }
}

impl Pattern for Arc<Expr> {
    // Matches ending inside a multi-byte character are not reported.
    fn match_prefix(&self, haystack: &str) -> Option<usize> {
        let mut current = Arc::clone(self);
        let mut longest = nullable(&current).then_some(0);
        for (index, &b) in haystack.as_bytes().iter().enumerate() {
            current = derive(&current, b);
            if current.is_empty_language() {
                break;
            }
            if nullable(&current) && haystack.is_char_boundary(index + 1) {
                longest = Some(index + 1);
            }
        }
        longest
    }
}

impl Pattern for Matcher {
    fn match_prefix(&self, haystack: &str) -> Option<usize> {
        self.root().match_prefix(haystack)
    }
}

/// A cursor over a string that probes patterns at its position.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    matched: Option<&'a str>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            matched: None,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Moves the cursor. `pos` must lie on a character boundary within the input.
    pub fn set_pos(&mut self, pos: usize) {
        assert!(
            self.input.is_char_boundary(pos),
            "scanner position {pos} is not a character boundary"
        );
        self.pos = pos;
    }

    /// The unscanned remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn is_eos(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Text of the last successful match.
    pub fn matched(&self) -> Option<&'a str> {
        self.matched
    }

    /// Matches `pattern` at the cursor and advances past it.
    pub fn scan<P: Pattern + ?Sized>(&mut self, pattern: &P) -> Option<&'a str> {
        let text = self.check(pattern)?;
        self.pos += text.len();
        Some(text)
    }

    /// Matches `pattern` at the cursor without advancing.
    pub fn check<P: Pattern + ?Sized>(&mut self, pattern: &P) -> Option<&'a str> {
        let rest = self.rest();
        let len = pattern.match_prefix(rest)?;
        let text = &rest[..len];
        self.matched = Some(text);
        Some(text)
    }

    /// Advances past a match of `pattern`, returning the number of bytes skipped.
    pub fn skip<P: Pattern + ?Sized>(&mut self, pattern: &P) -> Option<usize> {
        self.scan(pattern).map(str::len)
    }

    /// Searches forward for `pattern` and advances just past it. Returns everything from
    /// the old position through the end of the match.
    pub fn scan_until<P: Pattern + ?Sized>(&mut self, pattern: &P) -> Option<&'a str> {
        let rest = self.rest();
        let (start, end) = pattern.find_next(rest)?;
        self.matched = Some(&rest[start..end]);
        self.pos += end;
        Some(&rest[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{literal, one_of, plus, range};

    fn word() -> Regex {
        Regex::new(r"[a-z]+").unwrap()
    }

    #[test]
    fn test_scan_advances_on_match() {
        let mut scanner = Scanner::new("hello world");
        assert_eq!(scanner.scan(&word()), Some("hello"));
        assert_eq!(scanner.pos(), 5);
        assert_eq!(scanner.matched(), Some("hello"));
    }

    #[test]
    fn test_scan_failure_keeps_position() {
        let mut scanner = Scanner::new("  hello");
        assert_eq!(scanner.scan(&word()), None);
        assert_eq!(scanner.pos(), 0);
    }

    #[test]
    fn test_check_never_advances() {
        let mut scanner = Scanner::new("abc");
        assert_eq!(scanner.check(&word()), Some("abc"));
        assert_eq!(scanner.pos(), 0);
    }

    #[test]
    fn test_skip_counts_bytes() {
        let spaces = Regex::new(r"\s+").unwrap();
        let mut scanner = Scanner::new("   x");
        assert_eq!(scanner.skip(&spaces), Some(3));
        assert_eq!(scanner.rest(), "x");
        assert_eq!(scanner.skip(&spaces), None);
    }

    #[test]
    fn test_scan_until_returns_traversed_span() {
        let quote = Regex::new("\"").unwrap();
        let mut scanner = Scanner::new("abc\" tail");
        assert_eq!(scanner.scan_until(&quote), Some("abc\""));
        assert_eq!(scanner.matched(), Some("\""));
        assert_eq!(scanner.rest(), " tail");
        assert_eq!(scanner.scan_until(&quote), None);
        assert_eq!(scanner.rest(), " tail");
    }

    #[test]
    fn test_set_pos_and_eos() {
        let mut scanner = Scanner::new("ab");
        scanner.set_pos(2);
        assert!(scanner.is_eos());
        scanner.set_pos(0);
        assert!(!scanner.is_eos());
    }

    #[test]
    #[should_panic(expected = "character boundary")]
    fn test_set_pos_rejects_split_character() {
        let mut scanner = Scanner::new("é");
        scanner.set_pos(1);
    }

    #[test]
    fn test_derivative_patterns() {
        let digits = plus(range(b'0', b'9'));
        let mut scanner = Scanner::new("123abc");
        assert_eq!(scanner.scan(&digits), Some("123"));
        assert_eq!(scanner.scan(&digits), None);

        let mut scanner = Scanner::new("xx0x1F;");
        assert_eq!(scanner.scan_until(&literal(b"0x")), Some("xx0x"));
        let hex_digit = plus(one_of(b"0123456789abcdefABCDEF"));
        assert_eq!(scanner.scan(&hex_digit), Some("1F"));
    }

    #[test]
    fn test_anchored_meta_regex() {
        let word = meta::Regex::new(r"[a-z]+").unwrap();
        let mut scanner = Scanner::new("12 ab");
        assert_eq!(scanner.scan(&word), None);
        assert_eq!(scanner.pos(), 0);
        assert_eq!(word.match_prefix(&"1".repeat(10_000)), None);

        assert_eq!(scanner.scan_until(&word), Some("12 ab"));
        assert!(scanner.is_eos());

        let mut scanner = Scanner::new("héllo!");
        let letters = meta::Regex::new(r"\w+").unwrap();
        assert_eq!(scanner.scan(&letters), Some("héllo"));
    }

    #[test]
    fn test_derivative_pattern_respects_char_boundaries() {
        // 0xC3 is the first byte of "é"; a byte range covering it must not split the char.
        let high = plus(range(0x80, 0xFF));
        assert_eq!(high.match_prefix("é!"), Some(2));
        assert_eq!(range(0xC3, 0xC3).match_prefix("é"), None);
    }

    #[test]
    fn test_matcher_as_pattern() {
        let matcher = Matcher::new(literal(b"let"));
        let mut scanner = Scanner::new("let x");
        assert_eq!(scanner.scan(&matcher), Some("let"));
    }
}
