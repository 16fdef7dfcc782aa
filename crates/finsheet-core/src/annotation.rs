//! Per-cell annotations: highlights and comments
//!
//! Annotations are keyed exactly like values and live in their own
//! [`CellMap`]s. An annotation equal to its default is never stored.
//!
//! ## Example
//!
//! ```rust
//! use finsheet_core::{CellHighlight, CellKey, CommentMap, FontHighlight, HighlightMap};
//!
//! let key = CellKey::new("Asset.Current.Cash", "2024-12-31");
//!
//! let mut highlights = HighlightMap::new();
//! highlights.set_highlight(key.clone(), CellHighlight::default().with_font(FontHighlight::Red));
//! assert!(highlights.contains(&key));
//!
//! // Setting everything back to default removes the entry
//! highlights.set_highlight(key.clone(), CellHighlight::default());
//! assert!(!highlights.contains(&key));
//!
//! let mut comments = CommentMap::new();
//! comments.set_comment(key.clone(), "  per audited accounts ");
//! assert_eq!(comments.get_by_key(&key).map(String::as_str), Some("per audited accounts"));
//! ```

use std::fmt;

use crate::key::CellKey;
use crate::store::CellMap;

/// Bold font color applied to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FontHighlight {
    /// No font highlight
    #[default]
    None,
    /// Bold red
    Red,
    /// Bold green
    Green,
    /// Bold blue
    Blue,
}

impl FontHighlight {
    /// Every selectable highlight, in menu order
    pub const ALL: [FontHighlight; 3] = [FontHighlight::Red, FontHighlight::Green, FontHighlight::Blue];

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            FontHighlight::None => "None",
            FontHighlight::Red => "Bold Red",
            FontHighlight::Green => "Bold Green",
            FontHighlight::Blue => "Bold Blue",
        }
    }
}

/// Background fill applied to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackgroundHighlight {
    /// No fill
    #[default]
    None,
    /// Orange fill
    Orange,
    /// Yellow fill
    Yellow,
    /// Pink fill
    Pink,
}

impl BackgroundHighlight {
    /// Every selectable fill, in menu order
    pub const ALL: [BackgroundHighlight; 3] = [
        BackgroundHighlight::Orange,
        BackgroundHighlight::Yellow,
        BackgroundHighlight::Pink,
    ];

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            BackgroundHighlight::None => "None",
            BackgroundHighlight::Orange => "Orange",
            BackgroundHighlight::Yellow => "Yellow",
            BackgroundHighlight::Pink => "Pink",
        }
    }
}

/// Cell highlight settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellHighlight {
    /// Font color
    pub font_highlight: FontHighlight,
    /// Background fill
    pub background_highlight: BackgroundHighlight,
    /// Heavy cell border
    pub bold_border: bool,
}

impl CellHighlight {
    /// Create a highlight with no settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font color
    pub fn with_font(mut self, font: FontHighlight) -> Self {
        self.font_highlight = font;
        self
    }

    /// Set background fill
    pub fn with_background(mut self, background: BackgroundHighlight) -> Self {
        self.background_highlight = background;
        self
    }

    /// Set bold border
    pub fn with_bold_border(mut self, bold_border: bool) -> Self {
        self.bold_border = bold_border;
        self
    }

    /// Check if every field is at its default
    pub fn is_empty(&self) -> bool {
        self.font_highlight == FontHighlight::None
            && self.background_highlight == BackgroundHighlight::None
            && !self.bold_border
    }

    /// Toggle a font color: selecting the current color clears it
    pub fn toggled_font(self, font: FontHighlight) -> Self {
        if self.font_highlight == font {
            self.with_font(FontHighlight::None)
        } else {
            self.with_font(font)
        }
    }

    /// Toggle a background fill: selecting the current fill clears it
    pub fn toggled_background(self, background: BackgroundHighlight) -> Self {
        if self.background_highlight == background {
            self.with_background(BackgroundHighlight::None)
        } else {
            self.with_background(background)
        }
    }

    /// Flip the bold border
    pub fn toggled_bold_border(self) -> Self {
        let bold = !self.bold_border;
        self.with_bold_border(bold)
    }
}

impl fmt::Display for CellHighlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.font_highlight != FontHighlight::None {
            parts.push(self.font_highlight.label());
        }
        if self.background_highlight != BackgroundHighlight::None {
            parts.push(self.background_highlight.label());
        }
        if self.bold_border {
            parts.push("Bold Border");
        }
        if parts.is_empty() {
            f.write_str("None")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

/// Highlights keyed by cell
pub type HighlightMap = CellMap<CellHighlight>;

/// Comments keyed by cell
pub type CommentMap = CellMap<String>;

impl CellMap<CellHighlight> {
    /// Store a highlight, removing the entry when it is all-default
    ///
    /// Returns the highlight that is now stored, if any.
    pub fn set_highlight(&mut self, key: CellKey, highlight: CellHighlight) -> Option<CellHighlight> {
        if highlight.is_empty() {
            self.remove(&key);
            None
        } else {
            self.insert(key, highlight);
            Some(highlight)
        }
    }

    /// Highlight for a key, or the default when none is stored
    pub fn highlight_or_default(&self, key: &CellKey) -> CellHighlight {
        self.get_by_key(key).copied().unwrap_or_default()
    }
}

impl CellMap<String> {
    /// Store a comment, trimmed; blank text removes the entry
    ///
    /// Returns the comment that is now stored, if any.
    pub fn set_comment(&mut self, key: CellKey, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.remove(&key);
            None
        } else {
            self.insert(key, trimmed.to_string());
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> CellKey {
        CellKey::new("Cash", "P1")
    }

    #[test]
    fn test_default_highlight_is_not_stored() {
        let mut map = HighlightMap::new();
        assert_eq!(map.set_highlight(key(), CellHighlight::default()), None);
        assert!(map.is_empty());

        let h = CellHighlight::new().with_bold_border(true);
        assert_eq!(map.set_highlight(key(), h), Some(h));
        assert_eq!(map.len(), 1);

        map.set_highlight(key(), h.toggled_bold_border());
        assert!(map.is_empty());
    }

    #[test]
    fn test_toggles() {
        let h = CellHighlight::new().toggled_font(FontHighlight::Red);
        assert_eq!(h.font_highlight, FontHighlight::Red);
        let h = h.toggled_font(FontHighlight::Blue);
        assert_eq!(h.font_highlight, FontHighlight::Blue);
        let h = h.toggled_font(FontHighlight::Blue);
        assert_eq!(h.font_highlight, FontHighlight::None);

        let h = h.toggled_background(BackgroundHighlight::Pink);
        assert_eq!(h.background_highlight, BackgroundHighlight::Pink);
        assert!(h.toggled_background(BackgroundHighlight::Pink).is_empty());
    }

    #[test]
    fn test_blank_comment_removes() {
        let mut comments = CommentMap::new();
        comments.set_comment(key(), "check");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments.set_comment(key(), "   \t"), None);
        assert!(comments.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellHighlight::new().to_string(), "None");
        let h = CellHighlight::new()
            .with_font(FontHighlight::Green)
            .with_bold_border(true);
        assert_eq!(h.to_string(), "Bold Green, Bold Border");
    }
}
