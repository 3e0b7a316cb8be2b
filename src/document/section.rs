//! Document sections.

use crate::container::{Container, ContainerKind};
use std::ops::{Deref, DerefMut};

/// A body section: a container with its own column layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    content: Container,
    columns: u32,
    no_break: bool,
}

impl Section {
    /// Create an empty single-column section.
    pub fn new() -> Self {
        Self {
            content: Container::new(ContainerKind::Section),
            columns: 1,
            no_break: false,
        }
    }

    /// Number of text columns.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Set the number of text columns (at least 1).
    pub fn set_columns(&mut self, columns: u32) {
        self.columns = columns.max(1);
    }

    /// Continue on the same page instead of starting a new one.
    pub fn set_no_break(&mut self, no_break: bool) {
        self.no_break = no_break;
    }

    /// Section formatting following `\sectd`.
    pub fn format_content(&self) -> String {
        let mut content = String::new();
        if self.no_break {
            content.push_str("\\sbknone");
        }
        if self.columns > 1 {
            content.push_str(&format!("\\cols{}", self.columns));
        }
        content
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Section {
    type Target = Container;

    fn deref(&self) -> &Container {
        &self.content
    }
}

impl DerefMut for Section {
    fn deref_mut(&mut self) -> &mut Container {
        &mut self.content
    }
}
