//! Metadata tokenizers and span reconciliation.
//!
//! Each tokenizer scans the original input on its own and reports candidate
//! tokens with their byte spans. [`Claims`] accepts candidates in field
//! precedence order, refusing any that overlap text already claimed, and
//! finally rebuilds the title from whatever nobody claimed.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Which field a token feeds, in claiming order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Notes,
    Priority,
    Project,
    Label,
    DateTime,
}

/// A candidate piece of metadata found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range of the whole token, sigils included.
    pub span: Range<usize>,
    /// The extracted value (`"backend"` for `#backend`).
    pub value: String,
}

static NOTES_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // "// notes" runs to the end of the input
    Regex::new(r"//\s*(.+)$").unwrap_or_else(|e| panic!("Invalid notes regex: {e}"))
});

static PRIORITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bp([1-4])\b").unwrap_or_else(|e| panic!("Invalid priority regex: {e}"))
});

static PROJECT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#([\w-]+)").unwrap_or_else(|e| panic!("Invalid project regex: {e}"))
});

static LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@([\w-]+)").unwrap_or_else(|e| panic!("Invalid label regex: {e}"))
});

/// Notes: everything after the first `//`.
pub fn notes(input: &str) -> Vec<Token> {
    scan(&NOTES_PATTERN, TokenKind::Notes, input)
        .into_iter()
        .map(|mut token| {
            token.value = token.value.trim().to_string();
            token
        })
        .collect()
}

/// Priority tokens (`p1`..`p4`, any case); the value is the digit.
pub fn priorities(input: &str) -> Vec<Token> {
    scan(&PRIORITY_PATTERN, TokenKind::Priority, input)
}

/// Project tokens (`#name`).
pub fn projects(input: &str) -> Vec<Token> {
    scan(&PROJECT_PATTERN, TokenKind::Project, input)
}

/// Label tokens (`@name`).
pub fn labels(input: &str) -> Vec<Token> {
    scan(&LABEL_PATTERN, TokenKind::Label, input)
}

fn scan(pattern: &Regex, kind: TokenKind, input: &str) -> Vec<Token> {
    pattern
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let value = caps.get(1)?;
            Some(Token {
                kind,
                span: whole.range(),
                value: value.as_str().to_string(),
            })
        })
        .collect()
}

/// Spans of the input that have been assigned to a field.
#[derive(Debug, Default)]
pub struct Claims {
    claimed: Vec<(TokenKind, Range<usize>)>,
}

impl Claims {
    /// Claim the first candidate that doesn't overlap an earlier claim.
    pub fn claim_first(&mut self, candidates: Vec<Token>) -> Option<Token> {
        let token = candidates
            .into_iter()
            .find(|token| !self.overlaps(&token.span))?;
        self.claimed.push((token.kind, token.span.clone()));
        Some(token)
    }

    /// Claim every candidate that doesn't overlap an earlier claim.
    pub fn claim_all(&mut self, candidates: Vec<Token>) -> Vec<Token> {
        let mut accepted = Vec::new();
        for token in candidates {
            if !self.overlaps(&token.span) {
                self.claimed.push((token.kind, token.span.clone()));
                accepted.push(token);
            }
        }
        accepted
    }

    /// Claim a span unconditionally.
    pub fn claim_span(&mut self, kind: TokenKind, span: Range<usize>) {
        self.claimed.push((kind, span));
    }

    fn overlaps(&self, span: &Range<usize>) -> bool {
        self.claimed
            .iter()
            .any(|(_, claimed)| span.start < claimed.end && claimed.start < span.end)
    }

    /// The input with every claimed byte replaced by a space.
    ///
    /// Offsets stay aligned with `input`, so spans found in the masked text
    /// can be claimed directly.
    pub fn masked(&self, input: &str) -> String {
        let mut masked = input.to_string();
        for (_, span) in &self.claimed {
            if let Some(len) = span.end.checked_sub(span.start) {
                masked.replace_range(span.clone(), &" ".repeat(len));
            }
        }
        masked
    }

    /// The input with every claimed span cut out.
    pub fn unclaimed(&self, input: &str) -> String {
        let mut spans: Vec<Range<usize>> = self.claimed.iter().map(|(_, s)| s.clone()).collect();
        spans.sort_by_key(|span| span.start);

        let mut out = String::with_capacity(input.len());
        let mut cursor = 0;
        for span in spans {
            if span.start > cursor {
                out.push_str(input.get(cursor..span.start).unwrap_or(""));
            }
            cursor = cursor.max(span.end);
        }
        out.push_str(input.get(cursor..).unwrap_or(""));
        out
    }
}
