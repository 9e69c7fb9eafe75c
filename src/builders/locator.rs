use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Matches `return (` with any whitespace, including newlines, in between.
pub const DEFAULT_ANCHOR_PATTERN: &str = r"return\s*\(";

/// How the locator recognises the construct to wrap.
///
/// `pattern` is a regular expression for the anchor. A match only counts as
/// an anchor when its last character is the `open` delimiter; the region then
/// runs from just after that delimiter to its balancing `close`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AnchorSettings {
    pub pattern: String,
    pub open: char,
    pub close: char,
}

impl Default for AnchorSettings {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_ANCHOR_PATTERN.to_string(),
            open: '(',
            close: ')',
        }
    }
}

/// A half-open byte span `[start, end)` of a file's text.
///
/// `start` is the byte right after the anchor's opening delimiter and `end` is
/// the byte offset of the matching closing delimiter, so neither delimiter is
/// part of the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRegion {
    /// Byte offset where the anchor match begins.
    pub anchor_start: usize,
    pub start: usize,
    pub end: usize,
}

impl TargetRegion {
    pub fn inner<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("no anchor found")]
    NoAnchor,
    /// The text ended before the anchor's delimiter was closed.
    #[error("unbalanced delimiters after anchor at byte {anchor}")]
    Unbalanced { anchor: usize },
}

/// Finds the region to wrap without parsing the surrounding language.
///
/// The last anchor in document order is taken as the component's primary
/// return; nesting and function boundaries are not verified.
#[derive(Debug, Clone)]
pub struct RegionLocator {
    anchor: Regex,
    open: char,
    close: char,
}

impl RegionLocator {
    pub fn new(settings: &AnchorSettings) -> Result<Self, regex::Error> {
        Ok(Self {
            anchor: Regex::new(&settings.pattern)?,
            open: settings.open,
            close: settings.close,
        })
    }

    /// Every anchor in document order as `(anchor_start, region_start)` pairs.
    pub fn anchors(&self, text: &str) -> Vec<(usize, usize)> {
        self.anchor
            .find_iter(text)
            .filter(|m| m.as_str().ends_with(self.open))
            .map(|m| (m.start(), m.end()))
            .collect()
    }

    pub fn locate(&self, text: &str) -> Result<TargetRegion, LocateError> {
        let anchors = self.anchors(text);
        let &(anchor_start, start) = anchors.last().ok_or(LocateError::NoAnchor)?;
        debug!(
            "{} anchor(s) found, using the one at byte {}",
            anchors.len(),
            anchor_start
        );

        let end = self
            .matching_close(text, start)
            .ok_or(LocateError::Unbalanced {
                anchor: anchor_start,
            })?;
        debug!("region spans bytes {start}..{end}");

        Ok(TargetRegion {
            anchor_start,
            start,
            end,
        })
    }

    /// Scans forward from `start` with the depth already at one (the anchor's
    /// own delimiter) and returns the byte offset where it drops back to zero.
    fn matching_close(&self, text: &str, start: usize) -> Option<usize> {
        let mut depth = 1usize;
        for (offset, ch) in text[start..].char_indices() {
            if ch == self.open {
                depth += 1;
            } else if ch == self.close {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
        }
        None
    }
}
