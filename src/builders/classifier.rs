use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of categories a page can belong to.
///
/// The category decides which navigation the wrapping layout renders, and its
/// lowercase label is the only value resolved into the injected wrapper.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Admin,
    Coach,
    Client,
    Collaboratore,
}

impl Category {
    /// Every category, in the order the default rule table checks them.
    pub const ALL: [Category; 4] = [
        Category::Admin,
        Category::Coach,
        Category::Client,
        Category::Collaboratore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Admin => "admin",
            Category::Coach => "coach",
            Category::Client => "client",
            Category::Collaboratore => "collaboratore",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single classification rule: a path that contains `segment` as a whole
/// directory component belongs to `category`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: Category,
    pub segment: String,
}

impl CategoryRule {
    pub fn new(category: Category, segment: impl Into<String>) -> Self {
        Self {
            category,
            segment: segment.into(),
        }
    }

    /// Returns `true` when `path` contains `/segment/`.
    ///
    /// Backslashes are normalised to `/` and a leading `/` is assumed, so a
    /// relative path such as `admin/Clients.jsx` matches the `admin` segment
    /// while `src/pages/administration/X.jsx` and `src/admin.jsx` do not.
    pub fn matches(&self, path: &str) -> bool {
        if self.segment.is_empty() {
            return false;
        }
        let normalized = format!("/{}", path.replace('\\', "/"));
        normalized.contains(&format!("/{}/", self.segment))
    }

    /// The rule table the tool ships with: one rule per category, named after
    /// the directory the pages of that category live in.
    pub fn default_rules() -> Vec<CategoryRule> {
        Category::ALL
            .iter()
            .map(|category| CategoryRule::new(*category, category.as_str()))
            .collect()
    }
}

/// Maps a file path to a category.
///
/// Implementations must be total: every path gets exactly one category.
pub trait Classifier {
    fn classify(&self, path: &str) -> Category;
}

/// Ordered, first-match-wins classifier over path-segment rules.
#[derive(Debug, Clone)]
pub struct PathClassifier {
    rules: Vec<CategoryRule>,
    default_category: Category,
}

impl PathClassifier {
    pub fn new(rules: Vec<CategoryRule>, default_category: Category) -> Self {
        Self {
            rules,
            default_category,
        }
    }
}

impl Default for PathClassifier {
    fn default() -> Self {
        Self::new(CategoryRule::default_rules(), Category::Admin)
    }
}

impl Classifier for PathClassifier {
    fn classify(&self, path: &str) -> Category {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| rule.category)
            .unwrap_or(self.default_category)
    }
}
