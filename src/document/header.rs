//! Page headers and footers.

use crate::container::{Container, ContainerKind};
use serde::{Deserialize, Serialize};

/// Pages a header or footer applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderKind {
    /// Every page
    #[default]
    All,
    /// Left (even) pages
    Left,
    /// Right (odd) pages
    Right,
    /// First page only
    First,
}

impl HeaderKind {
    fn suffix(self) -> &'static str {
        match self {
            HeaderKind::All => "",
            HeaderKind::Left => "l",
            HeaderKind::Right => "r",
            HeaderKind::First => "f",
        }
    }

    /// Header destination control word.
    pub fn header_control_word(self) -> String {
        format!("\\header{}", self.suffix())
    }

    /// Footer destination control word.
    pub fn footer_control_word(self) -> String {
        format!("\\footer{}", self.suffix())
    }

    /// Whether the document needs `\facingp` for this kind.
    pub fn needs_facing_pages(self) -> bool {
        matches!(self, HeaderKind::Left | HeaderKind::Right)
    }
}

/// Destination group opening a header or footer container.
pub(crate) fn destination(container: &Container) -> Option<String> {
    match container.kind() {
        ContainerKind::Header(kind) => Some(kind.header_control_word()),
        ContainerKind::Footer(kind) => Some(kind.footer_control_word()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_words() {
        assert_eq!(HeaderKind::All.header_control_word(), "\\header");
        assert_eq!(HeaderKind::First.header_control_word(), "\\headerf");
        assert_eq!(HeaderKind::Left.footer_control_word(), "\\footerl");
        assert_eq!(HeaderKind::Right.footer_control_word(), "\\footerr");
    }

    #[test]
    fn test_facing_pages() {
        assert!(HeaderKind::Left.needs_facing_pages());
        assert!(!HeaderKind::First.needs_facing_pages());
    }

    #[test]
    fn test_destination() {
        let footer = Container::new(ContainerKind::Footer(HeaderKind::First));
        assert_eq!(destination(&footer).as_deref(), Some("\\footerf"));
        assert_eq!(destination(&Container::new(ContainerKind::Section)), None);
    }
}
