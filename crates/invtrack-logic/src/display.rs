//! Panel descriptors and display modes.

use serde::{Deserialize, Serialize};

/// How a panel presents the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Every aggregated item, one `name : amount` line each.
    FullDump,
    /// Only the listed item names, in the order written.
    Filtered(Vec<String>),
}

impl DisplayMode {
    /// Derive the mode from a panel's configuration text.
    ///
    /// Text equal to `keyword` and nothing else selects full dump; anything
    /// else is a newline-separated item list.
    pub fn from_config(config_text: &str, keyword: &str) -> Self {
        if config_text == keyword {
            Self::FullDump
        } else {
            Self::Filtered(config_text.split('\n').map(str::to_string).collect())
        }
    }

    pub fn is_full_dump(&self) -> bool {
        matches!(self, Self::FullDump)
    }
}

/// A discovered output panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayDescriptor<P> {
    /// Host handle used for write-back.
    pub panel: P,
    /// First line of every render.
    pub title: String,
    pub mode: DisplayMode,
}

impl<P> DisplayDescriptor<P> {
    pub fn new(panel: P, title: impl Into<String>, mode: DisplayMode) -> Self {
        Self {
            panel,
            title: title.into(),
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_keyword_is_full_dump() {
        assert_eq!(
            DisplayMode::from_config("TrackAll", "TrackAll"),
            DisplayMode::FullDump
        );
    }

    #[test]
    fn test_keyword_with_extra_text_is_filtered() {
        let mode = DisplayMode::from_config("TrackAll\nGold", "TrackAll");
        assert_eq!(
            mode,
            DisplayMode::Filtered(vec!["TrackAll".into(), "Gold".into()])
        );
        assert!(!DisplayMode::from_config("TrackAll ", "TrackAll").is_full_dump());
        assert!(!DisplayMode::from_config("trackall", "TrackAll").is_full_dump());
    }

    #[test]
    fn test_filter_lines_keep_order() {
        let mode = DisplayMode::from_config("Iron Ore\nSilver\n\nGold", "TrackAll");
        assert_eq!(
            mode,
            DisplayMode::Filtered(vec![
                "Iron Ore".into(),
                "Silver".into(),
                String::new(),
                "Gold".into()
            ])
        );
    }

    #[test]
    fn test_empty_config_is_filtered() {
        assert_eq!(
            DisplayMode::from_config("", "TrackAll"),
            DisplayMode::Filtered(vec![String::new()])
        );
    }
}
