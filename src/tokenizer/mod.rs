// WHY: Hand-rolled lexical state machine for sentence segmentation
// Boundary detection must survive abbreviations, decimals, URLs, emails, and
// nested quotation while guaranteeing exact round-trip concatenation

use std::sync::OnceLock;

use regex_automata::meta::Regex;
use tracing::debug;

pub mod abbreviations;
pub mod quotes;

pub use abbreviations::AbbreviationChecker;

/// Characters that can terminate a sentence
const SENTENCE_ENDERS: &[char] = &['.', '!', '?', '\n'];

/// Forward-scan ceiling for URL and email spans
const SPAN_SCAN_BOUND: usize = 100;

/// Validation pattern for email candidates (local@domain.tld)
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static CHECKER: OnceLock<AbbreviationChecker> = OnceLock::new();

fn email_regex() -> &'static Regex {
    // Pattern is a compile-time constant; failure here is a programming error
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("static email pattern compiles"))
}

fn checker() -> &'static AbbreviationChecker {
    CHECKER.get_or_init(AbbreviationChecker::new)
}

/// Segment text into sentence units
///
/// Returns a lazy, finite, restartable iterator of borrowed sentence slices.
/// Concatenating every yielded slice reproduces the input byte-for-byte:
/// sentences keep all original whitespace and punctuation, nothing is trimmed.
pub fn segment(text: &str) -> SentenceSegmenter<'_> {
    SentenceSegmenter::new(text)
}

/// Lazy sentence iterator over a text buffer
///
/// A boundary is emitted after a sentence-ending character (`.`, `!`, `?`,
/// newline) that is not immediately followed by another sentence-ending
/// character, unless suppressed by quotation nesting, abbreviations,
/// decimal/word-internal periods, URLs, or emails (checked in that order).
/// The trailing fragment, if any, is emitted as the last sentence even
/// without terminating punctuation.
#[derive(Clone)]
pub struct SentenceSegmenter<'a> {
    text: &'a str,
    // (byte offset, char) pairs for O(1) lookahead/lookback in char space
    chars: Vec<(usize, char)>,
    pos: usize,
    sentence_start: usize,
    // Expected closing glyphs; while non-empty, boundary detection is off
    quote_stack: Vec<char>,
    done: bool,
}

impl<'a> SentenceSegmenter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().collect(),
            pos: 0,
            sentence_start: 0,
            quote_stack: Vec::new(),
            done: false,
        }
    }

    fn is_sentence_end(ch: char) -> bool {
        SENTENCE_ENDERS.contains(&ch)
    }

    fn next_char(&self, i: usize) -> Option<char> {
        self.chars.get(i + 1).map(|&(_, ch)| ch)
    }

    fn preceded_by_whitespace(&self, i: usize) -> bool {
        i == 0 || self.chars[i - 1].1.is_whitespace()
    }

    /// Byte offset of the first byte after the char at index `i`
    fn byte_after(&self, i: usize) -> usize {
        self.chars
            .get(i + 1)
            .map(|&(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// Byte offset of the char at index `i` (text length when past the end)
    fn byte_at(&self, i: usize) -> usize {
        self.chars
            .get(i)
            .map(|&(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn url_starts_at(&self, i: usize) -> bool {
        let rest = &self.text[self.chars[i].0..];
        ["http://", "https://", "www."].iter().any(|scheme| {
            rest.get(..scheme.len())
                .is_some_and(|p| p.eq_ignore_ascii_case(scheme))
        })
    }

    /// Forward-scan from `i` to the end of a URL/email span (exclusive char index)
    ///
    /// Stops at whitespace (including newline) or one of `,;)]}"'>`, bounded to
    /// 100 characters. A trailing period is excluded from the span so it stays
    /// eligible as a sentence boundary.
    fn scan_span_end(&self, i: usize) -> usize {
        let n = self.chars.len();
        let mut j = i;
        while j < n && j - i < SPAN_SCAN_BOUND {
            let ch = self.chars[j].1;
            if ch.is_whitespace() || matches!(ch, ',' | ';' | ')' | ']' | '}' | '"' | '\'' | '>') {
                break;
            }
            j += 1;
        }
        if j > i && self.chars[j - 1].1 == '.' {
            j -= 1;
        }
        j
    }

    /// Try to match an email token starting at `i`; returns the resume index
    fn match_email(&self, i: usize) -> Option<usize> {
        let end = self.scan_span_end(i);
        if end <= i {
            return None;
        }
        let candidate = &self.text[self.chars[i].0..self.byte_at(end)];
        // Cheap reject before touching the regex
        if !candidate.contains('@') {
            return None;
        }
        if email_regex().is_match(candidate) {
            debug!(email = candidate, "Suppressing boundaries through email span");
            Some(end)
        } else {
            None
        }
    }

    /// Check whether the whitespace-delimited token ending at the period `i`
    /// is a known abbreviation
    fn is_abbreviation_at(&self, i: usize) -> bool {
        let mut start = i;
        while start > 0 && !self.chars[start - 1].1.is_whitespace() {
            start -= 1;
        }
        let raw = &self.text[self.chars[start].0..self.byte_after(i)];
        checker().matches_token(raw)
    }

    /// Match the initials pattern at the period `i`: a single uppercase letter
    /// immediately before it, optionally chained through further
    /// single-letter-plus-period groups separated by single spaces
    /// ("J. R. R. Tolkien"). Returns the resume index after the chain.
    fn match_initials(&self, i: usize) -> Option<usize> {
        if i == 0 {
            return None;
        }
        let prev = self.chars[i - 1].1;
        if !(prev.is_alphabetic() && prev.is_uppercase()) {
            return None;
        }
        if i >= 2 && !self.chars[i - 2].1.is_whitespace() {
            return None;
        }
        let n = self.chars.len();
        let mut j = i;
        while j + 3 < n
            && self.chars[j + 1].1 == ' '
            && self.chars[j + 2].1.is_alphabetic()
            && self.chars[j + 2].1.is_uppercase()
            && self.chars[j + 3].1 == '.'
        {
            j += 3;
        }
        Some(j + 1)
    }
}

impl<'a> Iterator for SentenceSegmenter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        let n = self.chars.len();

        while self.pos < n {
            let i = self.pos;
            let c = self.chars[i].1;

            // Quotation nesting suppresses all other boundary checks.
            // Close matches against the top of stack take precedence; a quote
            // opens only at start-of-text or after whitespace.
            if let Some(&expected) = self.quote_stack.last() {
                if c == expected {
                    self.quote_stack.pop();
                } else if quotes::is_opening_quote(c) && self.preceded_by_whitespace(i) {
                    if let Some(close) = quotes::closing_for(c) {
                        self.quote_stack.push(close);
                    }
                }
                self.pos += 1;
                continue;
            }
            if quotes::is_opening_quote(c) && self.preceded_by_whitespace(i) {
                if let Some(close) = quotes::closing_for(c) {
                    self.quote_stack.push(close);
                    self.pos += 1;
                    continue;
                }
            }

            // URL spans are skipped wholesale, minus a trailing period
            if self.url_starts_at(i) {
                self.pos = self.scan_span_end(i).max(i + 1);
                continue;
            }

            // Email candidates are only considered at token starts
            if !c.is_whitespace() && self.preceded_by_whitespace(i) {
                if let Some(end) = self.match_email(i) {
                    self.pos = end.max(i + 1);
                    continue;
                }
            }

            if Self::is_sentence_end(c) {
                if c == '.' {
                    // Decimal or word-internal period (42.99, p.m, example.com)
                    if self.next_char(i).is_some_and(|nc| nc.is_alphanumeric()) {
                        self.pos += 1;
                        continue;
                    }
                    if self.is_abbreviation_at(i) {
                        self.pos += 1;
                        continue;
                    }
                    if let Some(end) = self.match_initials(i) {
                        self.pos = end;
                        continue;
                    }
                }

                // Boundary only when the next char is not another ender
                if self.next_char(i).map_or(true, |nc| !Self::is_sentence_end(nc)) {
                    let start_byte = self.byte_at(self.sentence_start);
                    let end_byte = self.byte_after(i);
                    self.pos = i + 1;
                    self.sentence_start = i + 1;
                    return Some(&self.text[start_byte..end_byte]);
                }
            }

            self.pos += 1;
        }

        // Trailing fragment without terminating punctuation
        self.done = true;
        if self.sentence_start < n {
            let start_byte = self.byte_at(self.sentence_start);
            return Some(&self.text[start_byte..]);
        }
        None
    }
}
