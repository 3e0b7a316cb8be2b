//! Document information group.

use crate::element::escape_text;
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Document metadata written to the `\info` group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInfo {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Vec<String>,

    /// Company
    pub company: Option<String>,

    /// Creation time
    pub created: Option<DateTime<Utc>>,
}

impl DocumentInfo {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Stamp the creation time with the current time.
    pub fn created_now(mut self) -> Self {
        self.created = Some(Utc::now());
        self
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_empty()
            && self.company.is_none()
            && self.created.is_none()
    }

    /// Render the `\info` group, or nothing when empty.
    pub fn content(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut content = String::from("{\\info");
        let fields = [
            ("title", self.title.clone()),
            ("author", self.author.clone()),
            ("subject", self.subject.clone()),
            (
                "keywords",
                (!self.keywords.is_empty()).then(|| self.keywords.join(" ")),
            ),
            ("company", self.company.clone()),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                content.push_str(&format!("{{\\{} {}}}", name, escape_text(&value)));
            }
        }
        if let Some(created) = self.created {
            content.push_str(&format!(
                "{{\\creatim\\yr{}\\mo{}\\dy{}\\hr{}\\min{}}}",
                created.year(),
                created.month(),
                created.day(),
                created.hour(),
                created.minute()
            ));
        }
        content.push_str("}\r\n");
        content
    }
}
