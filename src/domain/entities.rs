//! Domain entities: input lines and the closed tag vocabularies

use std::fmt;

/// Table container matched by `bold_row`.
pub const TABLE: &str = "table";
/// Table row matched by `bold_row`.
pub const ROW: &str = "tr";
/// Table cell matched by `bold_row`.
pub const CELL: &str = "td";
/// Wrapper inserted under bolded cells.
pub const BOLD: &str = "b";
/// Label given to list items when their list is unwrapped.
pub const PARAGRAPH: &str = "p";

/// One classified line of the input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `<name>`
    Open(String),
    /// `</name>`
    Close(String),
    /// Anything else, kept verbatim.
    Text(String),
}

/// Tags that `remove_tag` knows how to unwrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovableTag {
    P,
    Em,
    B,
    Ol,
    Ul,
}

impl RemovableTag {
    /// Parse a tag name; anything outside the supported set yields `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "p" => Some(Self::P),
            "em" => Some(Self::Em),
            "b" => Some(Self::B),
            "ol" => Some(Self::Ol),
            "ul" => Some(Self::Ul),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::P => "p",
            Self::Em => "em",
            Self::B => "b",
            Self::Ol => "ol",
            Self::Ul => "ul",
        }
    }

    /// Lists hand their items over as paragraphs.
    pub fn coerces_children(self) -> bool {
        matches!(self, Self::Ol | Self::Ul)
    }
}

impl fmt::Display for RemovableTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags that `add_tag` may wrap words in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapTag {
    Em,
    B,
}

impl WrapTag {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "em" => Some(Self::Em),
            "b" => Some(Self::B),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Em => "em",
            Self::B => "b",
        }
    }
}

impl fmt::Display for WrapTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
