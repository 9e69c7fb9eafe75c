use serde::{Deserialize, Serialize};
use std::fmt;

use crate::builders::classifier::Category;
use crate::builders::locator::{LocateError, RegionLocator};

/// Indentation of the wrapper tags and the wrapped markup.
const INNER_INDENT: &str = "      ";
/// Indentation placed before the anchor's closing delimiter.
const OUTER_INDENT: &str = "    ";

/// The pair of sentinels whose joint presence marks a file as already wrapped.
///
/// The check is global to the file: a comment that mentions both sentinels is
/// enough to skip it, and a half-removed earlier wrap is not repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapMarker {
    pub open: String,
    pub close: String,
}

impl WrapMarker {
    pub fn is_present(&self, text: &str) -> bool {
        text.contains(&self.open) && text.contains(&self.close)
    }
}

/// Describes the element injected around the located region.
///
/// Only the category label is resolved here. The `pass_through` identifiers
/// are emitted as `name={name}` and left for the surrounding component to bind.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WrapTemplate {
    pub component: String,
    pub role_attribute: String,
    pub pass_through: [String; 2],
}

impl Default for WrapTemplate {
    fn default() -> Self {
        Self {
            component: "UnifiedLayout".to_string(),
            role_attribute: "role".to_string(),
            pass_through: ["userName".to_string(), "userEmail".to_string()],
        }
    }
}

impl WrapTemplate {
    pub fn marker(&self) -> WrapMarker {
        WrapMarker {
            open: format!("<{}", self.component),
            close: self.closing_tag(),
        }
    }

    pub fn opening_tag(&self, category: Category) -> String {
        let bindings = self
            .pass_through
            .iter()
            .map(|name| format!("{name}={{{name}}}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "<{} {}=\"{}\" {}>",
            self.component, self.role_attribute, category, bindings
        )
    }

    pub fn closing_tag(&self) -> String {
        format!("</{}>", self.component)
    }

    /// Encloses `inner` (already trimmed) between the opening and closing tags.
    pub fn render(&self, category: Category, inner: &str) -> String {
        format!(
            "{}\n{INNER_INDENT}{}\n{OUTER_INDENT}{}",
            self.opening_tag(category),
            inner,
            self.closing_tag()
        )
    }
}

/// What `Injector::process` decided for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapStatus {
    AlreadyWrapped,
    Wrapped,
    NoRegionFound,
    UnbalancedDelimiters,
}

impl fmt::Display for WrapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrapStatus::AlreadyWrapped => write!(f, "already wrapped"),
            WrapStatus::Wrapped => write!(f, "wrapped"),
            WrapStatus::NoRegionFound => write!(f, "no region found"),
            WrapStatus::UnbalancedDelimiters => write!(f, "unbalanced delimiters"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapOutcome {
    pub text: String,
    pub status: WrapStatus,
    /// Byte offset of the anchor that was used or that failed to close.
    pub anchor: Option<usize>,
}

impl WrapOutcome {
    fn unchanged(text: &str, status: WrapStatus, anchor: Option<usize>) -> Self {
        Self {
            text: text.to_string(),
            status,
            anchor,
        }
    }

    pub fn changed(&self) -> bool {
        self.status == WrapStatus::Wrapped
    }
}

/// Locates the region of a source text and splices the wrapper around it.
#[derive(Debug, Clone)]
pub struct Injector {
    locator: RegionLocator,
    template: WrapTemplate,
}

impl Injector {
    pub fn new(locator: RegionLocator, template: WrapTemplate) -> Self {
        Self { locator, template }
    }

    /// Wraps the last anchored region of `text` for `category`.
    ///
    /// Only a `Wrapped` outcome carries text that differs from the input; every
    /// other status returns `text` byte for byte.
    pub fn process(&self, text: &str, category: Category) -> WrapOutcome {
        if self.template.marker().is_present(text) {
            return WrapOutcome::unchanged(text, WrapStatus::AlreadyWrapped, None);
        }

        let region = match self.locator.locate(text) {
            Ok(region) => region,
            Err(LocateError::NoAnchor) => {
                return WrapOutcome::unchanged(text, WrapStatus::NoRegionFound, None);
            }
            Err(LocateError::Unbalanced { anchor }) => {
                return WrapOutcome::unchanged(
                    text,
                    WrapStatus::UnbalancedDelimiters,
                    Some(anchor),
                );
            }
        };

        let fragment = self.template.render(category, region.inner(text).trim());
        let spliced = format!(
            "{}\n{INNER_INDENT}{}\n{OUTER_INDENT}{}",
            &text[..region.start],
            fragment,
            &text[region.end..]
        );

        WrapOutcome {
            text: spliced,
            status: WrapStatus::Wrapped,
            anchor: Some(region.anchor_start),
        }
    }
}
