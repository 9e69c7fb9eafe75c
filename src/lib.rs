//! Wraps the returned markup of page components in a role-aware layout element.
//!
//! For each file in the configured list the tool picks a category from the
//! file's directory, finds the last `return (` in the text, scans forward to
//! its balancing `)`, and splices a `<UnifiedLayout role="...">` element around
//! what lies between. Files that already contain the layout element are left
//! alone, so running the tool twice is harmless.
pub mod builders;
pub mod core;
pub mod utils;

#[cfg(test)]
mod tests;
