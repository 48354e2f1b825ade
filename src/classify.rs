//! Style name classification.
//!
//! Maps a style's display name to three independent priority ranks (category,
//! size tier, font weight) plus an exclusion predicate. All matching is
//! case-insensitive and done with ordered predicate lists: the first predicate
//! that matches decides the rank, so shadowing between overlapping tokens
//! (`xl` inside `2xl`, `xs` inside `2xs`, `bold` inside `semibold`) is resolved
//! by evaluation order and by explicit guards.
//!
//! Names the rules do not recognise fall into the lowest-priority bucket of
//! each axis; classification never fails.

/// One prefix-to-rank entry of the category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    /// Lowercase prefix the name must start with
    pub prefix: String,
    /// Rank assigned on match (lower sorts first)
    pub rank: u8,
}

impl CategoryRule {
    /// Create a category rule. The prefix is stored lowercase.
    pub fn new(prefix: &str, rank: u8) -> Self {
        Self {
            prefix: prefix.to_lowercase(),
            rank,
        }
    }
}

/// Vocabulary of size tokens recognised by the size axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeScale {
    /// `2xl`, `xl`, `lg`, `md`, `sm`, `xs`, `2xs`
    #[default]
    Basic,
    /// `8xl` down to `2xl`, then the basic tokens from `xl`
    Extended,
}

impl SizeScale {
    /// Largest numeric multiplier recognised in front of `xl`.
    fn max_multiplier(self) -> u8 {
        match self {
            SizeScale::Basic => 2,
            SizeScale::Extended => 8,
        }
    }

    /// Numeric-scaled tokens, largest first.
    fn scaled_tokens(self) -> Vec<String> {
        (2..=self.max_multiplier())
            .rev()
            .map(|n| format!("{}xl", n))
            .collect()
    }
}

/// Rank given to names with no weight token.
pub const UNKNOWN_WEIGHT_RANK: u8 = 6;

const SEMIBOLD_TOKENS: &[&str] = &["semibold", "semi-bold"];

/// Ruleset driving [`NameClassifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRules {
    /// Category prefixes in evaluation order
    pub categories: Vec<CategoryRule>,
    /// Rank for names matching no category prefix
    pub other_rank: u8,
    /// Size token vocabulary
    pub size_scale: SizeScale,
    /// Lowercase prefixes whose styles are never retained
    pub excluded_prefixes: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self::baseline()
    }
}

impl ClassifierRules {
    /// Display, title, text, other, paragraph; basic sizes; nothing excluded.
    pub fn baseline() -> Self {
        Self {
            categories: vec![
                CategoryRule::new("display", 1),
                CategoryRule::new("title", 2),
                CategoryRule::new("text", 3),
                CategoryRule::new("paragraph", 5),
            ],
            other_rank: 4,
            size_scale: SizeScale::Basic,
            excluded_prefixes: Vec::new(),
        }
    }

    /// Drops `display` and `subheading` styles entirely, moving `title` to the
    /// top, and recognises sizes up to `8xl`.
    pub fn strict() -> Self {
        Self {
            categories: vec![
                CategoryRule::new("title", 1),
                CategoryRule::new("text", 2),
                CategoryRule::new("paragraph", 4),
            ],
            other_rank: 3,
            size_scale: SizeScale::Extended,
            excluded_prefixes: vec!["display".to_string(), "subheading".to_string()],
        }
    }

    /// Use a different size vocabulary.
    pub fn with_size_scale(mut self, scale: SizeScale) -> Self {
        self.size_scale = scale;
        self
    }

    /// Add a disallowed name prefix.
    pub fn with_excluded_prefix(mut self, prefix: &str) -> Self {
        self.excluded_prefixes.push(prefix.to_lowercase());
        self
    }
}

/// The three ranks and the exclusion flag computed for one name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Semantic category rank
    pub category: u8,
    /// Size tier rank
    pub size: u8,
    /// Font weight rank
    pub weight: u8,
    /// Whether the name matches a disallowed prefix
    pub excluded: bool,
}

/// Pure classifier over style display names.
#[derive(Debug, Clone, Default)]
pub struct NameClassifier {
    rules: ClassifierRules,
}

impl NameClassifier {
    /// Create a classifier for the given ruleset.
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    /// The ruleset in use.
    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Compute every axis at once.
    pub fn classify(&self, name: &str) -> Classification {
        let lower = name.to_lowercase();
        Classification {
            category: self.category_rank_lower(&lower),
            size: size_rank_lower(&lower, self.rules.size_scale),
            weight: weight_rank_lower(&lower),
            excluded: self.is_excluded_lower(&lower),
        }
    }

    /// Category rank: first matching prefix wins, otherwise the "other" rank.
    pub fn category_rank(&self, name: &str) -> u8 {
        self.category_rank_lower(&name.to_lowercase())
    }

    /// Size rank under this classifier's size scale.
    pub fn size_rank(&self, name: &str) -> u8 {
        size_rank(name, self.rules.size_scale)
    }

    /// Whether a style with this name must never be retained.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.is_excluded_lower(&name.to_lowercase())
    }

    fn category_rank_lower(&self, lower: &str) -> u8 {
        self.rules
            .categories
            .iter()
            .find(|rule| lower.starts_with(rule.prefix.as_str()))
            .map(|rule| rule.rank)
            .unwrap_or(self.rules.other_rank)
    }

    fn is_excluded_lower(&self, lower: &str) -> bool {
        self.rules
            .excluded_prefixes
            .iter()
            .any(|prefix| lower.starts_with(prefix.as_str()))
    }
}

/// `xl` matches only when none of the scale's numeric-scaled tokens do.
fn matches_plain_xl(lower: &str, scale: SizeScale) -> bool {
    lower.contains("xl") && !scale.scaled_tokens().iter().any(|t| lower.contains(t.as_str()))
}

/// `xs` matches only when `2xs` does not.
fn matches_plain_xs(lower: &str) -> bool {
    lower.contains("xs") && !lower.contains("2xs")
}

/// Size rank, largest token first. Unrecognised sizes rank after `2xs`.
pub fn size_rank(name: &str, scale: SizeScale) -> u8 {
    size_rank_lower(&name.to_lowercase(), scale)
}

fn size_rank_lower(lower: &str, scale: SizeScale) -> u8 {
    let scaled = scale.scaled_tokens();
    let mut rank: u8 = 1;

    for token in &scaled {
        if lower.contains(token.as_str()) {
            return rank;
        }
        rank += 1;
    }

    let plain: [&dyn Fn(&str) -> bool; 6] = [
        &|n: &str| matches_plain_xl(n, scale),
        &|n: &str| n.contains("lg"),
        &|n: &str| n.contains("md"),
        &|n: &str| n.contains("sm"),
        &matches_plain_xs,
        &|n: &str| n.contains("2xs"),
    ];
    for predicate in plain {
        if predicate(lower) {
            return rank;
        }
        rank += 1;
    }

    rank
}

/// Font weight rank: bold 1, semibold 2, medium 3, regular 4, light 5, else 6.
///
/// Any name containing `semi` is never plain bold, so a spaced "Semi Bold"
/// matches neither bold nor semibold.
pub fn weight_rank(name: &str) -> u8 {
    weight_rank_lower(&name.to_lowercase())
}

fn weight_rank_lower(lower: &str) -> u8 {
    if lower.contains("bold") && !lower.contains("semi") {
        1
    } else if SEMIBOLD_TOKENS.iter().any(|t| lower.contains(t)) {
        2
    } else if lower.contains("medium") {
        3
    } else if lower.contains("regular") {
        4
    } else if lower.contains("light") {
        5
    } else {
        UNKNOWN_WEIGHT_RANK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_category_order() {
        let c = NameClassifier::new(ClassifierRules::baseline());
        assert_eq!(c.category_rank("Display Large"), 1);
        assert_eq!(c.category_rank("Title/LG/Bold"), 2);
        assert_eq!(c.category_rank("Text/MD/Regular"), 3);
        assert_eq!(c.category_rank("Caption/SM"), 4);
        assert_eq!(c.category_rank("Paragraph/MD"), 5);
    }

    #[test]
    fn test_category_is_prefix_not_substring() {
        let c = NameClassifier::default();
        assert_eq!(c.category_rank("Subtitle/MD"), 4);
        assert_eq!(c.category_rank("Body text"), 4);
    }

    #[test]
    fn test_category_case_insensitive() {
        let c = NameClassifier::default();
        assert_eq!(c.category_rank("TITLE/xl"), 2);
        assert_eq!(c.category_rank("paragraph"), 5);
    }

    #[test]
    fn test_strict_category_shift() {
        let c = NameClassifier::new(ClassifierRules::strict());
        assert_eq!(c.category_rank("Title/LG"), 1);
        assert_eq!(c.category_rank("Text/LG"), 2);
        assert_eq!(c.category_rank("Label/LG"), 3);
        assert_eq!(c.category_rank("Paragraph/LG"), 4);
        assert!(c.is_excluded("Display/Large"));
        assert!(c.is_excluded("subheading/md"));
        assert!(!c.is_excluded("Title/Display"));
    }

    #[test]
    fn test_baseline_excludes_nothing() {
        let c = NameClassifier::default();
        assert!(!c.is_excluded("Display/Large"));
        assert!(!c.is_excluded("Subheading/MD"));
    }

    #[test]
    fn test_basic_size_ranks() {
        let names = [
            "Text/2XL/Regular",
            "Text/XL/Regular",
            "Text/LG/Regular",
            "Text/MD/Regular",
            "Text/SM/Regular",
            "Text/XS/Regular",
            "Text/2XS/Regular",
            "Text/Huge/Regular",
        ];
        let ranks: Vec<u8> = names.iter().map(|n| size_rank(n, SizeScale::Basic)).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_extended_size_ranks() {
        assert_eq!(size_rank("Title/8XL", SizeScale::Extended), 1);
        assert_eq!(size_rank("Title/5XL", SizeScale::Extended), 4);
        assert_eq!(size_rank("Title/2XL", SizeScale::Extended), 7);
        assert_eq!(size_rank("Title/XL", SizeScale::Extended), 8);
        assert_eq!(size_rank("Title/2XS", SizeScale::Extended), 13);
        assert_eq!(size_rank("Title", SizeScale::Extended), 14);
    }

    #[test]
    fn test_xl_shadowed_by_scaled_token() {
        assert!(!matches_plain_xl("text/2xl", SizeScale::Basic));
        assert!(matches_plain_xl("text/xl", SizeScale::Basic));
        assert!(!matches_plain_xl("text/6xl", SizeScale::Extended));
        // 6xl is outside the basic vocabulary, so the basic scale reads it as xl
        assert!(matches_plain_xl("text/6xl", SizeScale::Basic));
    }

    #[test]
    fn test_xs_shadowed_by_2xs() {
        assert!(matches_plain_xs("caption/xs"));
        assert!(!matches_plain_xs("caption/2xs"));
        assert!(
            size_rank("Caption/XS", SizeScale::Basic) < size_rank("Caption/2XS", SizeScale::Basic)
        );
    }

    #[test]
    fn test_weight_ranks() {
        assert_eq!(weight_rank("Title/LG/Bold"), 1);
        assert_eq!(weight_rank("Title/LG/SemiBold"), 2);
        assert_eq!(weight_rank("Title/LG/Semi-Bold"), 2);
        assert_eq!(weight_rank("Title/LG/Medium"), 3);
        assert_eq!(weight_rank("Title/LG/Regular"), 4);
        assert_eq!(weight_rank("Title/LG/Light"), 5);
        assert_eq!(weight_rank("Title/LG"), UNKNOWN_WEIGHT_RANK);
    }

    #[test]
    fn test_spaced_semi_bold_is_unranked() {
        assert_eq!(weight_rank("Title/LG/Semi Bold"), UNKNOWN_WEIGHT_RANK);
        assert_eq!(weight_rank("Semibold Display/Bold"), 2);
        assert!(weight_rank("Title/LG/Bold") < weight_rank("Title/LG/Semi Bold"));
    }

    #[test]
    fn test_classify_combines_axes() {
        let c = NameClassifier::new(ClassifierRules::strict());
        let result = c.classify("Display/2XL/Bold");
        assert_eq!(
            result,
            Classification {
                category: 3,
                size: 7,
                weight: 1,
                excluded: true,
            }
        );
    }

    #[test]
    fn test_custom_exclusion_prefix() {
        let rules = ClassifierRules::baseline().with_excluded_prefix("Legacy");
        let c = NameClassifier::new(rules);
        assert!(c.is_excluded("legacy/Title"));
        assert!(!c.is_excluded("Title/legacy"));
    }

    #[test]
    fn test_strict_rules_with_basic_scale() {
        let c = NameClassifier::new(ClassifierRules::strict().with_size_scale(SizeScale::Basic));
        assert_eq!(c.rules().size_scale, SizeScale::Basic);
        assert!(c.rules().excluded_prefixes.contains(&"display".to_string()));
        assert_eq!(c.size_rank("Title/2XL"), 1);
        assert_eq!(c.size_rank("Title/8XL"), 2);
    }
}
