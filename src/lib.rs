//! A fuzzy patcher that applies LLM-generated SEARCH/REPLACE blocks to text.
//!
//! `srpatch` takes a document and a diff written as one or more
//! SEARCH/REPLACE blocks (the edit format commonly emitted by coding
//! agents) and applies the edits even when the quoted search text does not
//! byte-exactly match the document. It tolerates smart-quote substitution,
//! whitespace drift at the edges of a block, and stale line numbers.
//!
//! ## Getting Started
//!
//! The most common use case is to apply a diff string to a document string:
//!
//! ```rust
//! use srpatch::Patcher;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let original = "fn main() {\n    println!(\"Hello, world!\");\n}\n";
//! let diff = r#"<<<<<<< SEARCH
//! :start_line:2
//! -------
//!     println!("Hello, world!");
//! =======
//!     println!("Hello, srpatch!");
//! >>>>>>> REPLACE
//! "#;
//!
//! let patcher = Patcher::default();
//! let outcome = patcher.apply(original, diff)?;
//!
//! assert!(outcome.all_applied());
//! assert_eq!(
//!     outcome.content,
//!     "fn main() {\n    println!(\"Hello, srpatch!\");\n}\n"
//! );
//! assert_eq!(outcome.applied[0].line_index, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## The Block Format
//!
//! A diff consists of one or more blocks with this literal grammar:
//!
//! ```text
//! <<<<<<< SEARCH
//! :start_line:<integer>
//! -------
//! <search text, one or more lines>
//! =======
//! <replacement text, zero or more lines>
//! >>>>>>> REPLACE
//! ```
//!
//! The `:start_line:` hint is optional. When present it is advisory only: it
//! narrows the search to a window around the hinted line (see
//! [`Patcher::buffer_lines`]), which both speeds up matching and
//! disambiguates between identical spans elsewhere in the file. Blocks are
//! applied in the order they appear, each against the already-mutated
//! document, so a later block may rely on text introduced by an earlier one.
//!
//! ## Fuzzy Matching
//!
//! Candidate spans are compared with a length-normalized Levenshtein
//! similarity in `[0, 1]` after canonicalizing Unicode punctuation (curly
//! quotes, dashes, ellipses, non-breaking spaces) and ignoring whitespace at
//! the edges of the compared text. The default
//! [`fuzzy_threshold`](Patcher::fuzzy_threshold) of `1.0` accepts only exact
//! post-normalization matches; lowering it tolerates increasingly loose
//! matches. The search itself is "middle-out": it starts at the midpoint of
//! the search window and probes alternately left and right, so when two
//! spans tie on score, the one nearer the hinted line wins.
//!
//! ## Partial Application
//!
//! A block that cannot be located does not abort the remaining blocks. The
//! result distinguishes three outcomes:
//!
//! - every block applied: `Ok`, [`ApplyOutcome::failed`] is empty;
//! - some blocks applied: `Ok`, `failed` records each miss with its best
//!   candidate score and a preview of the nearest match;
//! - no block applied (or no block parsed): `Err` with the failures.
//!
//! ```rust
//! use srpatch::{ApplyError, Patcher};
//!
//! let original = "let total = 0;\n";
//! let diff = r#"<<<<<<< SEARCH
//! -------
//! let sum = 0;
//! =======
//! let sum = 1;
//! >>>>>>> REPLACE
//! "#;
//!
//! let result = Patcher::default().apply(original, diff);
//! let Err(ApplyError::AllBlocksFailed { failures }) = result else {
//!     panic!("expected failure");
//! };
//! assert!(failures[0].best_score < 1.0);
//! assert!(failures[0].best_match_preview.contains("let total = 0;"));
//! ```
//!
//! ## Feature Flags
//!
//! ### `parallel`
//!
//! - **Enabled by default.**
//! - Scores candidate spans in parallel with
//!   [`rayon`](https://crates.io/crates/rayon). Results are identical to the
//!   sequential scan: ties are still broken by middle-out visit order. Worth
//!   disabling for single-core or `wasm32` targets:
//!   ```toml
//!   [dependencies]
//!   srpatch = { version = "0.2", default-features = false }
//!   ```
use log::{debug, info, trace, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::borrow::Cow;
use thiserror::Error;

/// Default number of context lines searched on each side of a line hint.
pub const DEFAULT_BUFFER_LINES: usize = 40;

/// Default similarity threshold; `1.0` accepts only exact
/// (post-normalization) matches.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 1.0;

/// Failed-block previews are truncated to this many characters.
const MAX_PREVIEW_CHARS: usize = 200;

// --- Error Types ---

/// The reason an individual SEARCH/REPLACE block failed to apply.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockFailure {
    /// The block's search text was empty. An empty pattern never matches:
    /// accepting it would let a malformed block replace arbitrary content.
    #[error("search text is empty")]
    EmptySearch,
    /// No span in the search window scored at or above the threshold.
    #[error("no sufficiently similar content found (best score: {best_score:.3}, threshold: {threshold:.3})")]
    NoMatch {
        /// The best similarity score seen during the search.
        best_score: f64,
        /// The threshold the score was measured against.
        threshold: f64,
    },
}

/// Represents the ways an entire `apply` call can fail.
///
/// Per-block failures are recovered locally and reported through
/// [`ApplyOutcome::failed`]; only document-level conditions escalate to this
/// error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplyError {
    /// The diff content contained no recognizable SEARCH/REPLACE blocks.
    #[error(
        "no valid SEARCH/REPLACE blocks found in diff content. Expected format:\n<<<<<<< SEARCH\n:start_line:1\n-------\n[search content]\n=======\n[replace content]\n>>>>>>> REPLACE"
    )]
    NoBlocks,
    /// Every parsed block failed to locate a match.
    #[error("failed to apply all SEARCH/REPLACE blocks ({} failed)", .failures.len())]
    AllBlocksFailed {
        /// One record per failed block, in block order.
        failures: Vec<FailedBlock>,
    },
}

// --- Data Structures ---

/// One SEARCH/REPLACE unit extracted from the diff text.
///
/// Blocks are immutable once parsed. Their order within the parsed sequence
/// is significant: it is the order they are applied in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBlock {
    /// 1-based line where the search text is expected to start; `0` when the
    /// block carried no `:start_line:` hint. Advisory only.
    pub line_hint: usize,
    /// The text to locate in the document.
    pub search: String,
    /// The text to splice in over the matched span. May be empty, which
    /// deletes the matched lines.
    pub replace: String,
}

/// The best-scoring span found by a search attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    /// 0-based line index where the span starts, or `None` when no span
    /// scored above zero (e.g. an empty document).
    pub index: Option<usize>,
    /// Similarity score of the span, in `[0, 1]`.
    pub score: f64,
    /// The span's text as it appears in the document.
    pub content: String,
}

/// Evidence of a successfully applied block, returned for audit/preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedBlock {
    /// The block's search text.
    pub search: String,
    /// The block's replacement text.
    pub replace: String,
    /// 0-based line index where the match was actually found.
    pub line_index: usize,
}

/// Evidence of a failed block: enough for a caller to show a user (or the
/// LLM that authored the diff) why the edit did not apply.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedBlock {
    /// The block's search text.
    pub search: String,
    /// Why the block failed.
    pub reason: BlockFailure,
    /// The best similarity score seen while searching.
    pub best_score: f64,
    /// The nearest-matching document span, truncated to 200 characters.
    pub best_match_preview: String,
}

/// The result of a successful (possibly partial) `apply` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    /// The document content after applying every block that matched.
    pub content: String,
    /// One record per applied block, in application order.
    pub applied: Vec<AppliedBlock>,
    /// One record per block that failed to locate a match. Empty when the
    /// whole diff applied cleanly.
    pub failed: Vec<FailedBlock>,
}

impl ApplyOutcome {
    /// Returns `true` when every parsed block was applied.
    pub fn all_applied(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Status reported to streaming UIs while a diff is being received/applied.
///
/// This is a presentation aid only; it plays no part in the patching
/// algorithm itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressStatus {
    /// The diff is still streaming in; nothing to report yet.
    Processing,
    /// A completed apply call produced these counts.
    Applied {
        blocks_applied: usize,
        blocks_failed: usize,
    },
}

/// Derives a [`ProgressStatus`] from the streaming state of the incoming
/// diff and the most recent apply outcome, if any.
///
/// ```
/// # use srpatch::{progress_status, ProgressStatus};
/// assert_eq!(progress_status(false, None), Some(ProgressStatus::Processing));
/// assert_eq!(progress_status(true, None), None);
/// ```
pub fn progress_status(
    block_complete: bool,
    last_outcome: Option<&ApplyOutcome>,
) -> Option<ProgressStatus> {
    if !block_complete {
        return Some(ProgressStatus::Processing);
    }
    last_outcome.map(|outcome| ProgressStatus::Applied {
        blocks_applied: outcome.applied.len(),
        blocks_failed: outcome.failed.len(),
    })
}

// --- Core Logic ---

/// Canonicalizes Unicode punctuation variants so pasted or rendered text
/// compares fairly against source code.
///
/// Maps curly single/double quotes to straight quotes, the en dash to `-`,
/// the em dash to `--`, the ellipsis glyph to `...`, and the non-breaking
/// space to a regular space. Returns the input unchanged (and unallocated)
/// when nothing needs mapping.
///
/// ```
/// # use srpatch::normalize;
/// assert_eq!(normalize("it\u{2019}s \u{201C}fine\u{201D}"), "it's \"fine\"");
/// assert_eq!(normalize("plain text"), "plain text");
/// ```
pub fn normalize(text: &str) -> Cow<'_, str> {
    let needs_mapping = |c: char| {
        matches!(
            c,
            '\u{2018}'
                | '\u{2019}'
                | '\u{201C}'
                | '\u{201D}'
                | '\u{2013}'
                | '\u{2014}'
                | '\u{2026}'
                | '\u{00A0}'
        )
    };
    if !text.chars().any(needs_mapping) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' => out.push('-'),
            '\u{2014}' => out.push_str("--"),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Computes a length-normalized similarity between a document span and a
/// search text, in `[0, 1]`.
///
/// An empty `search` never matches anything and scores `0`. Both sides are
/// normalized ([`normalize`]) and compared ignoring leading/trailing
/// whitespace, so a search quoted without the document's indentation still
/// scores `1.0` against the indented span. Otherwise the score is
/// `1 - levenshtein / max_len`, a whole-string measure that rewards matches
/// close in both content and length.
///
/// ```
/// # use srpatch::similarity;
/// assert_eq!(similarity("anything at all", ""), 0.0);
/// assert_eq!(similarity("  return a + b;", "return a + b;"), 1.0);
/// assert_eq!(similarity("say \"hi\"", "say \u{201C}hi\u{201D}"), 1.0);
/// assert!(similarity("return a + b;", "return a - b;") < 1.0);
/// ```
pub fn similarity(original: &str, search: &str) -> f64 {
    if search.is_empty() {
        return 0.0;
    }
    let original = normalize(original);
    let search = normalize(search);
    let original = original.trim();
    let search = search.trim();
    if original == search {
        return 1.0;
    }
    let max_len = original.chars().count().max(search.chars().count());
    let distance = strsim::levenshtein(original, search);
    (1.0 - distance as f64 / max_len as f64).clamp(0.0, 1.0)
}

/// Extracts the ordered list of [`EditBlock`]s from raw diff text.
///
/// Blocks are matched non-overlapping, left to right; that scan order is the
/// application order. Returns an empty vector (not an error) when no block
/// is found; [`Patcher::apply`] turns that into [`ApplyError::NoBlocks`].
///
/// The `:start_line:` line is optional per block. Leading and trailing blank
/// lines of each body are dropped, but interior indentation is preserved. An
/// unterminated trailing block is discarded.
///
/// ```
/// # use srpatch::parse_blocks;
/// let diff = "<<<<<<< SEARCH\n:start_line:3\n-------\nold\n=======\nnew\n>>>>>>> REPLACE\n";
/// let blocks = parse_blocks(diff);
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].line_hint, 3);
/// assert_eq!(blocks[0].search, "old");
/// assert_eq!(blocks[0].replace, "new");
/// ```
pub fn parse_blocks(diff_content: &str) -> Vec<EditBlock> {
    let mut blocks = Vec::new();
    let mut lines = diff_content.lines().peekable();

    while let Some(line) = lines.next() {
        if line.trim_end() != "<<<<<<< SEARCH" {
            continue;
        }

        // Optional ":start_line:<N>" hint. An unparseable number degrades to
        // "no hint" rather than rejecting the block.
        let mut line_hint = 0;
        if let Some(rest) = lines
            .peek()
            .and_then(|l| l.trim().strip_prefix(":start_line:"))
        {
            line_hint = rest.trim().parse().unwrap_or(0);
            lines.next();
        }

        // The separator is a line of one or more dashes.
        match lines.peek() {
            Some(sep) if !sep.trim().is_empty() && sep.trim().chars().all(|c| c == '-') => {
                lines.next();
            }
            _ => {
                trace!("Discarding SEARCH marker without dash separator.");
                continue;
            }
        }

        let mut search_lines = Vec::new();
        let mut saw_divider = false;
        for l in lines.by_ref() {
            if l.trim_end() == "=======" {
                saw_divider = true;
                break;
            }
            search_lines.push(l);
        }
        if !saw_divider {
            break;
        }

        let mut replace_lines = Vec::new();
        let mut terminated = false;
        for l in lines.by_ref() {
            if l.trim_end() == ">>>>>>> REPLACE" {
                terminated = true;
                break;
            }
            replace_lines.push(l);
        }
        if !terminated {
            break;
        }

        trim_blank_edges(&mut search_lines);
        trim_blank_edges(&mut replace_lines);
        blocks.push(EditBlock {
            line_hint,
            search: search_lines.join("\n"),
            replace: replace_lines.join("\n"),
        });
    }

    debug!("Parsed {} SEARCH/REPLACE block(s).", blocks.len());
    blocks
}

/// Drops blank lines from both ends of a body, leaving indentation intact.
fn trim_blank_edges(lines: &mut Vec<&str>) {
    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
}

/// Splits a document into lines, tolerating CRLF line endings.
///
/// A trailing newline yields a trailing empty line, so joining with `\n`
/// round-trips LF content exactly.
fn split_lines(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect()
}

/// Finds the best-scoring span for a block in the document using a bounded,
/// hint-biased middle-out search.
///
/// When the block (or, failing that, `fallback_hint`) carries a 1-based line
/// hint within the document, the scan is limited to a window of
/// `buffer_lines` context on each side of the hinted span; otherwise the
/// entire document is scanned. Probing starts at the window midpoint and
/// alternates left and right, one span per step. Ties on score go to the
/// earlier-visited candidate, which biases matches toward the hint.
///
/// The returned candidate has `index: None` and `score: 0.0` when no span
/// scored above zero.
pub fn find_block_location<T: AsRef<str> + Sync>(
    block: &EditBlock,
    document_lines: &[T],
    fallback_hint: usize,
    buffer_lines: usize,
) -> MatchCandidate {
    let search_len = block.search.split('\n').count();
    let hint = if block.line_hint > 0 {
        block.line_hint
    } else {
        fallback_hint
    };

    let (start, end) = if hint > 0 && hint <= document_lines.len() {
        (
            (hint - 1).saturating_sub(buffer_lines),
            (hint - 1 + search_len + buffer_lines).min(document_lines.len()),
        )
    } else {
        (0, document_lines.len())
    };
    trace!(
        "Searching for a {}-line span in window [{}, {}) (hint: {}).",
        search_len,
        start,
        end,
        hint
    );
    if start >= end {
        return MatchCandidate {
            index: None,
            score: 0.0,
            content: String::new(),
        };
    }

    // Record the probe order first: the midpoint, then alternating left and
    // right one span at a time. Left probes run down to the window start even
    // when the span would overhang the window; spans clamp at document end.
    let mid = (start + end) / 2;
    let mut order = Vec::with_capacity(end - start);
    let mut left = mid as isize;
    let mut right = mid + 1;
    while left >= start as isize || right + search_len <= end {
        if left >= start as isize {
            order.push(left as usize);
            left -= 1;
        }
        if right + search_len <= end {
            order.push(right);
            right += 1;
        }
    }

    let span_text = |index: usize| -> String {
        let span_end = (index + search_len).min(document_lines.len());
        document_lines[index..span_end]
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n")
    };
    let scored = |(rank, &index): (usize, &usize)| {
        let score = similarity(&span_text(index), &block.search);
        (score, rank, index)
    };
    // Higher score wins; ties go to the earlier probe (the strictly-greater
    // comparison of the sequential scan, preserved under parallel reduction).
    let better = |a: (f64, usize, usize), b: (f64, usize, usize)| {
        if b.0 > a.0 || (b.0 == a.0 && b.1 < a.1) {
            b
        } else {
            a
        }
    };

    #[cfg(feature = "parallel")]
    let best = order.par_iter().enumerate().map(scored).reduce_with(better);
    #[cfg(not(feature = "parallel"))]
    let best = order.iter().enumerate().map(scored).reduce(better);

    match best {
        Some((score, _, index)) if score > 0.0 => {
            trace!("Best candidate at index {} scored {:.3}.", index, score);
            MatchCandidate {
                index: Some(index),
                score,
                content: span_text(index),
            }
        }
        _ => MatchCandidate {
            index: None,
            score: 0.0,
            content: String::new(),
        },
    }
}

/// Applies SEARCH/REPLACE diffs to document content.
///
/// A `Patcher` is a cheap value type holding the two matching tunables; it
/// keeps no state between calls, so one instance may be shared freely across
/// threads. Construct it with [`Patcher::default`] or [`Patcher::builder`].
///
/// ```
/// # use srpatch::Patcher;
/// let patcher = Patcher::builder().fuzzy_threshold(0.9).build();
/// assert_eq!(patcher.fuzzy_threshold, 0.9);
/// assert_eq!(patcher.buffer_lines, 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patcher {
    /// Minimum similarity score (0.0 to 1.0) required to accept a match.
    /// `1.0` accepts only exact post-normalization matches.
    pub fuzzy_threshold: f64,
    /// Number of context lines searched on each side of a line hint.
    pub buffer_lines: usize,
}

impl Default for Patcher {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            buffer_lines: DEFAULT_BUFFER_LINES,
        }
    }
}

impl Patcher {
    /// Creates a new builder for `Patcher`.
    pub fn builder() -> PatcherBuilder {
        PatcherBuilder::default()
    }

    /// Applies every block found in `diff_content` to `original_content`,
    /// in order, without a call-level line hint.
    ///
    /// Equivalent to [`apply_with_hint`](Self::apply_with_hint) with a hint
    /// of `0`.
    pub fn apply(
        &self,
        original_content: &str,
        diff_content: &str,
    ) -> Result<ApplyOutcome, ApplyError> {
        self.apply_with_hint(original_content, diff_content, 0)
    }

    /// Applies every block found in `diff_content` to `original_content`,
    /// in order.
    ///
    /// `line_hint` is a 1-based fallback hint used for blocks that carry no
    /// `:start_line:` hint of their own (`0` = none). Blocks are applied
    /// against the progressively mutated document, so later blocks see the
    /// line-count drift caused by earlier ones. A failed block leaves the
    /// document untouched and is recorded in [`ApplyOutcome::failed`].
    ///
    /// # Errors
    ///
    /// - [`ApplyError::NoBlocks`] when the diff contains no parseable block.
    /// - [`ApplyError::AllBlocksFailed`] when every block failed to match.
    ///
    /// Partial application is reported as `Ok` with a non-empty
    /// [`ApplyOutcome::failed`], leaving the caller to decide how to surface
    /// it.
    pub fn apply_with_hint(
        &self,
        original_content: &str,
        diff_content: &str,
        line_hint: usize,
    ) -> Result<ApplyOutcome, ApplyError> {
        let blocks = parse_blocks(diff_content);
        if blocks.is_empty() {
            return Err(ApplyError::NoBlocks);
        }
        info!("Applying {} SEARCH/REPLACE block(s).", blocks.len());

        let mut lines = split_lines(original_content);
        let mut applied = Vec::new();
        let mut failed = Vec::new();

        for (i, block) in blocks.iter().enumerate() {
            debug!("Applying block {}/{}...", i + 1, blocks.len());
            match self.apply_block(&mut lines, block, line_hint) {
                Ok(line_index) => {
                    debug!("Block {} applied at line index {}.", i + 1, line_index);
                    applied.push(AppliedBlock {
                        search: block.search.clone(),
                        replace: block.replace.clone(),
                        line_index,
                    });
                }
                Err(failure) => {
                    warn!("Block {} failed: {}", i + 1, failure.reason);
                    failed.push(failure);
                }
            }
        }

        if applied.is_empty() {
            return Err(ApplyError::AllBlocksFailed { failures: failed });
        }
        Ok(ApplyOutcome {
            content: lines.join("\n"),
            applied,
            failed,
        })
    }

    /// Locates and splices a single block into the line buffer. On failure
    /// the buffer is left untouched.
    fn apply_block(
        &self,
        lines: &mut Vec<String>,
        block: &EditBlock,
        fallback_hint: usize,
    ) -> Result<usize, FailedBlock> {
        if block.search.is_empty() {
            return Err(FailedBlock {
                search: block.search.clone(),
                reason: BlockFailure::EmptySearch,
                best_score: 0.0,
                best_match_preview: String::new(),
            });
        }

        let candidate = find_block_location(block, lines, fallback_hint, self.buffer_lines);
        let accepted = candidate
            .index
            .filter(|_| candidate.score >= self.fuzzy_threshold);
        let Some(index) = accepted else {
            return Err(FailedBlock {
                search: block.search.clone(),
                reason: BlockFailure::NoMatch {
                    best_score: candidate.score,
                    threshold: self.fuzzy_threshold,
                },
                best_score: candidate.score,
                best_match_preview: preview(&candidate.content),
            });
        };

        let search_len = block.search.split('\n').count();
        let replace_lines: Vec<String> = if block.replace.is_empty() {
            Vec::new()
        } else {
            block.replace.split('\n').map(String::from).collect()
        };
        let span_end = (index + search_len).min(lines.len());
        lines.splice(index..span_end, replace_lines);
        Ok(index)
    }
}

/// A builder for creating a [`Patcher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PatcherBuilder {
    fuzzy_threshold: Option<f64>,
    buffer_lines: Option<usize>,
}

impl PatcherBuilder {
    /// Sets the minimum similarity score (0.0 to 1.0) required to accept a
    /// match. `1.0` accepts only exact post-normalization matches.
    pub fn fuzzy_threshold(mut self, fuzzy_threshold: f64) -> Self {
        self.fuzzy_threshold = Some(fuzzy_threshold);
        self
    }

    /// Sets the number of context lines searched on each side of a line
    /// hint.
    pub fn buffer_lines(mut self, buffer_lines: usize) -> Self {
        self.buffer_lines = Some(buffer_lines);
        self
    }

    /// Builds the `Patcher`.
    pub fn build(self) -> Patcher {
        let default = Patcher::default();
        Patcher {
            fuzzy_threshold: self.fuzzy_threshold.unwrap_or(default.fuzzy_threshold),
            buffer_lines: self.buffer_lines.unwrap_or(default.buffer_lines),
        }
    }
}

/// Truncates a best-match span for inclusion in a failure record.
fn preview(text: &str) -> String {
    text.chars().take(MAX_PREVIEW_CHARS).collect()
}
