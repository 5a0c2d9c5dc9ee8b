use serde::{Deserialize, Serialize};

/// Marker color used when the configured one cannot be parsed.
pub const DEFAULT_ICON_COLOR: &str = "#d4d87f";
/// Marker size in pixels used when the configured one is not positive.
pub const DEFAULT_ICON_SIZE: i32 = 28;

/// Top-level configuration, read from `tradernotes.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TraderNotesConfig {
    pub overlay: OverlayConfig,
    pub colors: TooltipColors,
    pub observer: ObserverConfig,
}

/// World map marker settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    /// Icon asset name under `textures/icons/worldmap/`.
    pub icon: String,
    pub icon_size: i32,
    /// Hex color, `#rrggbb` or `#aarrggbb`.
    pub icon_color: String,
    /// Appended to every money amount in tooltips.
    pub currency_suffix: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            icon: "trader".to_string(),
            icon_size: DEFAULT_ICON_SIZE,
            icon_color: DEFAULT_ICON_COLOR.to_string(),
            currency_suffix: String::new(),
        }
    }
}

impl OverlayConfig {
    pub fn effective_icon_size(&self) -> f32 {
        if self.icon_size > 0 {
            self.icon_size as f32
        } else {
            DEFAULT_ICON_SIZE as f32
        }
    }

    /// Marker color as ARGB, falling back to the default color on bad input.
    pub fn icon_argb(&self) -> u32 {
        parse_hex_argb(&self.icon_color)
            .or_else(|| parse_hex_argb(DEFAULT_ICON_COLOR))
            .unwrap_or(0xFFD4_D87F)
    }
}

/// Tooltip section colors as hex strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TooltipColors {
    pub funds: String,
    pub selling_header: String,
    pub buying_header: String,
    pub stock: String,
    pub item_name: String,
    pub stack_size: String,
    pub price: String,
    pub distance: String,
}

impl Default for TooltipColors {
    fn default() -> Self {
        Self {
            funds: "#deffa1".to_string(),
            selling_header: "#40a746".to_string(),
            buying_header: "#deffa1".to_string(),
            stock: "#9d9d9d".to_string(),
            item_name: "#e5e6de".to_string(),
            stack_size: "#9d9d9d".to_string(),
            price: "#deebc7".to_string(),
            distance: "#7fb3d8".to_string(),
        }
    }
}

/// Observation cadence and change-detection tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObserverConfig {
    /// Also capture offers from loaded traders nobody is trading with.
    pub live_update: bool,
    pub tick_interval_ms: u64,
    /// Radius in blocks around the player searched for the active trader.
    pub search_radius: f64,
    /// Refresh-time differences up to this many days are treated as jitter.
    pub refresh_tolerance_days: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            live_update: false,
            tick_interval_ms: 500,
            search_radius: 10.0,
            refresh_tolerance_days: 0.01,
        }
    }
}

/// Parse `#rrggbb` (opaque) or `#aarrggbb` into an ARGB integer.
pub fn parse_hex_argb(hex: &str) -> Option<u32> {
    let digits = hex.trim().trim_start_matches('#');
    let value = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        6 => Some(0xFF00_0000 | value),
        8 => Some(value),
        _ => None,
    }
}
