//! Configuration for extraction and sample-board requests.

use std::time::Duration;

use crate::classify::ClassifierRules;

/// Extraction request configuration.
#[derive(Debug, Clone, Default)]
pub struct ExtractionConfig {
    /// Ranking and exclusion rules.
    pub rules: ClassifierRules,

    /// Pause between pages so an observing UI can repaint. `None` disables it.
    pub yield_delay: Option<Duration>,

    /// Record fields that disagree between nodes sharing a style.
    pub check_consistency: bool,
}

impl ExtractionConfig {
    /// Create new configuration with defaults (baseline rules, no pauses).
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration using the strict ruleset.
    pub fn strict() -> Self {
        Self::new().with_rules(ClassifierRules::strict())
    }

    /// Set the classifier ruleset.
    pub fn with_rules(mut self, rules: ClassifierRules) -> Self {
        self.rules = rules;
        self
    }

    /// Pause for `delay` between top-level pages.
    pub fn with_yield_delay(mut self, delay: Duration) -> Self {
        self.yield_delay = Some(delay);
        self
    }

    /// Enable cross-node consistency checking.
    pub fn with_consistency_check(mut self, enable: bool) -> Self {
        self.check_consistency = enable;
        self
    }
}

/// Solid RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Opaque white.
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
}

/// Layout of the sample board built from a ranked style list.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    /// Name given to the container frame
    pub frame_name: String,
    /// Background fill of the frame
    pub fill: Rgb,
    /// Padding on all four sides
    pub padding: f64,
    /// Vertical gap between samples
    pub item_spacing: f64,
    /// Final frame width; height follows content
    pub width: f64,
    /// Offset of the frame's top-left corner from the viewport centre
    pub viewport_offset: (f64, f64),
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardLayout {
    /// Create the default board layout.
    pub fn new() -> Self {
        Self {
            frame_name: "Text styles".to_string(),
            fill: Rgb::WHITE,
            padding: 24.0,
            item_spacing: 16.0,
            width: 400.0,
            viewport_offset: (-200.0, -200.0),
        }
    }

    /// Rename the frame.
    pub fn with_frame_name(mut self, name: impl Into<String>) -> Self {
        self.frame_name = name.into();
        self
    }

    /// Set the final frame width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set padding and item spacing.
    pub fn with_spacing(mut self, padding: f64, item_spacing: f64) -> Self {
        self.padding = padding;
        self.item_spacing = item_spacing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SizeScale;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.rules, ClassifierRules::baseline());
        assert!(config.yield_delay.is_none());
        assert!(!config.check_consistency);
    }

    #[test]
    fn test_builder_chain() {
        let config = ExtractionConfig::strict()
            .with_yield_delay(Duration::from_millis(10))
            .with_consistency_check(true);
        assert_eq!(config.rules.size_scale, SizeScale::Extended);
        assert_eq!(config.yield_delay, Some(Duration::from_millis(10)));
        assert!(config.check_consistency);
    }

    #[test]
    fn test_board_layout_defaults() {
        let layout = BoardLayout::default();
        assert_eq!(layout.padding, 24.0);
        assert_eq!(layout.item_spacing, 16.0);
        assert_eq!(layout.width, 400.0);
        assert_eq!(layout.fill, Rgb::WHITE);
    }
}
