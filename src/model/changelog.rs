//! Change-log block data model

use std::fmt;

/// A rendered, self-contained entry ready to be prepended to a `.changes` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogBlock(String);

impl ChangeLogBlock {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of bulleted messages in the block
    pub fn bullet_count(&self) -> usize {
        self.0.lines().filter(|l| l.starts_with("  * ")).count()
    }
}

impl fmt::Display for ChangeLogBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
