use serde::{Deserialize, Serialize};

/// Trader category derived from an entity's descriptive tags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TraderKind {
    Furniture,
    Clothing,
    General,
    Artisan,
    Agriculture,
    Survival,
    Building,
    Luxuries,
    Treasure,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Keywords tested against the combined tag and code text. The first hit wins,
/// so this order decides texts that mention several categories.
const KEYWORDS: &[(&str, TraderKind)] = &[
    ("furniture", TraderKind::Furniture),
    ("clothing", TraderKind::Clothing),
    ("general", TraderKind::General),
    ("commodities", TraderKind::General),
    ("artisan", TraderKind::Artisan),
    ("agriculture", TraderKind::Agriculture),
    ("survival", TraderKind::Survival),
    ("build", TraderKind::Building),
    ("luxuries", TraderKind::Luxuries),
    ("treasure", TraderKind::Treasure),
];

/// Classify a trader from its tag text and entity code.
pub fn classify(tag_text: &str, code_text: &str) -> TraderKind {
    let combined = format!("{tag_text} {code_text}").to_lowercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| combined.contains(keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or(TraderKind::Unknown)
}

impl TraderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraderKind::Furniture => "furniture",
            TraderKind::Clothing => "clothing",
            TraderKind::General => "general",
            TraderKind::Artisan => "artisan",
            TraderKind::Agriculture => "agriculture",
            TraderKind::Survival => "survival",
            TraderKind::Building => "building",
            TraderKind::Luxuries => "luxuries",
            TraderKind::Treasure => "treasure",
            TraderKind::Unknown => "unknown",
        }
    }

    /// Translation key of the label, e.g. `tradernotes:type-building`.
    pub fn lang_key(&self) -> String {
        format!("tradernotes:type-{}", self.as_str())
    }
}
