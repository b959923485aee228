//! Source provenance attached to every extracted entity.
//!
//! Corresponds to spec.md §3 "Origin" and the `getOrigin` operation of
//! the typed-AST access layer (§4.1), grounded on the line/column
//! derivation idiom in `ngtsc::reflection` decorator inspection and the
//! `ParseSourceSpan`/`ParseLocation` pair used throughout the teacher's
//! `parse_util` module.

use serde::Serialize;

/// A source location: 1-based line/column plus exact character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    pub file: String,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub start: u32,
    pub end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Origin {
    pub fn new(file: impl Into<String>, start: u32, end: u32, source_text: &str) -> Self {
        let (start_line, start_col) = line_col(source_text, start);
        let (end_line, end_col) = line_col(source_text, end);
        Origin {
            file: file.into(),
            start_line,
            start_col,
            end_line,
            end_col,
            start,
            end,
            symbol: None,
            snippet: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

/// Maps a byte offset to a 1-based (line, column) pair, matching the
/// "1-based line/column derived from source offsets" contract of
/// `getOrigin` in spec.md §4.1. Columns are 1-based character counts
/// within the line, not byte counts, to stay stable across encodings
/// the AST oracle might normalize.
fn line_col(source: &str, offset: u32) -> (u32, u32) {
    let offset = offset as usize;
    let mut line: u32 = 1;
    let mut col: u32 = 1;
    for (idx, ch) in source.char_indices() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// A character-offset span into a single file, used on `Node`/`Edge`
/// (`SourceRef`, spec.md §3 Multigraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub file: String,
    pub start: u32,
    pub end: u32,
}

impl From<&Origin> for SourceRef {
    fn from(o: &Origin) -> Self {
        SourceRef {
            file: o.file.clone(),
            start: o.start,
            end: o.end,
        }
    }
}
