//! World map layer: marker placement, hover hit testing and tooltip text.
//!
//! Tooltips use the host's VTML markup (`<font color='..'>`, `<b>`, `<i>`).

use tradernotes_cache::TraderRegistry;
use tradernotes_models::lang::keys;
use tradernotes_models::{Localizer, Position, TradeOffer, TraderId, TraderNotesConfig, TraderRecord};

const NAME_COLOR: &str = "#F5E6B5";
const TYPE_COLOR: &str = "#BBBBBB";
const REFRESH_COLOR: &str = "#AAAAAA";
const WARNING_COLOR: &str = "#FF6666";

/// Days remaining below which a trader's offers count as outdated.
const OUTDATED_THRESHOLD_DAYS: f64 = 0.01;

/// Converts world coordinates to map view coordinates.
pub trait MapProjection {
    /// Position relative to the map's top-left corner, in pixels.
    fn world_to_view(&self, position: &Position) -> (f32, f32);
    /// Width and height of the visible map area.
    fn view_size(&self) -> (f32, f32);
}

/// A trader icon to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub trader_id: TraderId,
    /// Icon center in view coordinates.
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// ARGB color for the fallback square when the icon texture is missing.
    pub color: u32,
}

/// Per-hover facts the registry does not know.
#[derive(Debug, Clone, Copy)]
pub struct TooltipContext {
    pub now: f64,
    pub player: Option<Position>,
    /// The trader entity is currently loaded, so live update can reach it.
    pub loaded: bool,
}

pub struct OverlayPresenter<'a> {
    config: &'a TraderNotesConfig,
    lang: &'a dyn Localizer,
}

impl<'a> OverlayPresenter<'a> {
    pub fn new(config: &'a TraderNotesConfig, lang: &'a dyn Localizer) -> Self {
        Self { config, lang }
    }

    pub fn layer_title(&self) -> String {
        self.lang.get(keys::LAYER_TITLE)
    }

    /// Markers for every discovered trader inside the visible map area.
    pub fn markers(&self, registry: &TraderRegistry, projection: &dyn MapProjection) -> Vec<Marker> {
        let (width, height) = projection.view_size();
        let size = self.config.overlay.effective_icon_size();
        let color = self.config.overlay.icon_argb();

        registry
            .discovered()
            .filter_map(|record| {
                let (x, y) = projection.world_to_view(&record.position);
                if x < 0.0 || y < 0.0 || x > width || y > height {
                    return None;
                }
                Some(Marker {
                    trader_id: record.id,
                    x,
                    y,
                    size,
                    color,
                })
            })
            .collect()
    }

    /// The discovered trader whose icon lies under `mouse` (view coordinates).
    pub fn hit_test<'r>(
        &self,
        registry: &'r TraderRegistry,
        projection: &dyn MapProjection,
        mouse: (f32, f32),
    ) -> Option<&'r TraderRecord> {
        let half = self.config.overlay.effective_icon_size() / 2.0;
        registry.discovered().find(|record| {
            let (x, y) = projection.world_to_view(&record.position);
            (x - mouse.0).abs() < half && (y - mouse.1).abs() < half
        })
    }

    /// Hover text for the trader under `mouse`, if any.
    pub fn hover_text(
        &self,
        registry: &TraderRegistry,
        projection: &dyn MapProjection,
        mouse: (f32, f32),
        context: impl Fn(&TraderRecord) -> TooltipContext,
    ) -> Option<String> {
        self.hit_test(registry, projection, mouse)
            .map(|record| self.tooltip(record, &context(record)))
    }

    /// Full tooltip body for one trader.
    pub fn tooltip(&self, record: &TraderRecord, ctx: &TooltipContext) -> String {
        let colors = &self.config.colors;
        let currency = &self.config.overlay.currency_suffix;
        let mut out = String::new();

        push_line(&mut out, &format!("<font color='{NAME_COLOR}'><b>{}</b></font>", record.display_name));
        push_line(
            &mut out,
            &format!(
                "<font color='{TYPE_COLOR}'><i>{}</i></font>",
                self.lang.get(&record.trader_type.lang_key())
            ),
        );
        if let Some(player) = ctx.player {
            let distance = player.distance_to(&record.position);
            push_line(
                &mut out,
                &format!(
                    "<font color='{}'>{} {:.0}m</font>",
                    colors.distance,
                    self.lang.get(keys::DISTANCE_LABEL),
                    distance
                ),
            );
        }
        push_line(
            &mut out,
            &format!(
                "<font color='{}'>{} {}{}</font>",
                colors.funds,
                self.lang.get(keys::MONEY_LABEL),
                record.funds,
                currency
            ),
        );

        if !record.sells.is_empty() {
            push_line(
                &mut out,
                &format!(
                    "\n<font color='{}'>{}</font>",
                    colors.selling_header,
                    self.lang.get(keys::OFFERS_LABEL)
                ),
            );
            for offer in &record.sells {
                push_line(&mut out, &self.offer_line(offer));
            }
        }

        if !record.wants.is_empty() {
            push_line(
                &mut out,
                &format!(
                    "\n<font color='{}'>{}</font>",
                    colors.buying_header,
                    self.lang.get(keys::WANTS_LABEL)
                ),
            );
            for offer in &record.wants {
                push_line(&mut out, &self.offer_line(offer));
            }
        }

        let days = record.days_until_refresh(ctx.now);
        if days > OUTDATED_THRESHOLD_DAYS {
            let countdown = self.lang.get_with(keys::REFRESH_IN, &format!("{days:.1}"));
            push_line(&mut out, &format!("\n<font color='{REFRESH_COLOR}'>{countdown}</font>"));
        } else {
            push_line(
                &mut out,
                &format!("\n<font color='{WARNING_COLOR}'><i>{}</i></font>", self.lang.get(keys::OUTDATED)),
            );
        }

        if self.config.observer.live_update && !ctx.loaded {
            push_line(
                &mut out,
                &format!("<font color='{WARNING_COLOR}'>{}</font>", self.lang.get(keys::OUT_OF_RANGE)),
            );
        }

        out
    }

    /// ` • 5x Linen [8]:3 (Sold out)`
    fn offer_line(&self, offer: &TradeOffer) -> String {
        let colors = &self.config.colors;
        let currency = &self.config.overlay.currency_suffix;
        let sold_out = if offer.sold_out {
            format!(" <font color='{WARNING_COLOR}'>({})</font>", self.lang.get(keys::SOLD_OUT))
        } else {
            String::new()
        };
        format!(
            " • <font color='{}'>{}x</font> <font color='{}'>{} </font><font color='{}'>[{}]</font>:<font color='{}'>{}{} </font>{}",
            colors.stock,
            offer.stock,
            colors.item_name,
            offer.name,
            colors.stack_size,
            offer.unit_stack_size,
            colors.price,
            offer.price,
            currency,
            sold_out
        )
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Drop markup tags, leaving the plain text of a tooltip.
pub fn strip_markup(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => plain.push(c),
            _ => {}
        }
    }
    plain
}
