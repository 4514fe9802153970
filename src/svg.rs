//! SVG preview of a collage plan.
//!
//! Draws the canvas scaled into a fixed-size panel with every tile outlined
//! and labelled, so a layout can be eyeballed without decoding any images.
//!
//! # Example
//!
//! ```
//! use zencollage::{CollagePlan, Greedy, Size, svg::render_collage_svg};
//!
//! let images = [Size::new(640.0, 480.0), Size::new(480.0, 640.0)];
//! let plan = CollagePlan::new(&Greedy, &images).unwrap();
//!
//! let svg = render_collage_svg(&plan, Some(&["beach.jpg", "forest.jpg"]));
//! assert!(svg.contains("beach.jpg"));
//! ```

use crate::geometry::PixelSize;
use crate::plan::CollagePlan;

/// Maximum pixel width of the canvas panel.
const MAX_PANEL_W: f64 = 600.0;
/// Maximum pixel height of the canvas panel.
const MAX_PANEL_H: f64 = 400.0;
/// Horizontal margin.
const MARGIN_X: f64 = 30.0;
/// Top margin above the title.
const MARGIN_TOP: f64 = 20.0;
/// Height of the title text area above the panel.
const LABEL_H: f64 = 22.0;
/// Tiles narrower or shorter than this (in panel pixels) get no text.
const MIN_LABELLED: f64 = 24.0;

/// Render a standalone SVG document showing `plan`'s canvas and tiles.
///
/// Tile `i` is labelled `labels[source]` when given, otherwise with its
/// source index. Every tile also shows its pixel size.
pub fn render_collage_svg(plan: &CollagePlan, labels: Option<&[&str]>) -> String {
    if plan.is_empty() {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let (pw, ph, scale) = scale_to_fit(plan.canvas);
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;
    let total_h = MARGIN_TOP + LABEL_H + MAX_PANEL_H + MARGIN_TOP;
    let panel_x = (total_w - pw) / 2.0;
    let panel_y = MARGIN_TOP + LABEL_H;

    let mut svg = String::with_capacity(2048 + 256 * plan.placements.len());

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    // Style — light/dark mode via prefers-color-scheme
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .tile-label { font-size: 11px; fill: #fff; }
  .canvas { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .tile { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .tile-label { fill: #e0e0e0; }
    .canvas { fill: #2d2d2d; stroke: #555; }
    .tile { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##,
    );

    let center_x = total_w / 2.0;
    let title = format!(
        "{}  {}×{}  {} tiles",
        plan.strategy,
        plan.canvas.width,
        plan.canvas.height,
        plan.placements.len()
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        center_x,
        MARGIN_TOP + 14.0,
        escape_xml(&title)
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="canvas" rx="2"/>"#,
        panel_x, panel_y, pw, ph
    ));
    svg.push('\n');

    for tile in plan.tiles() {
        let r = tile.rect;
        let tx = panel_x + f64::from(r.x) * scale;
        let ty = panel_y + f64::from(r.y) * scale;
        let tw = f64::from(r.width) * scale;
        let th = f64::from(r.height) * scale;
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="tile"/>"#,
            tx, ty, tw, th
        ));
        svg.push('\n');

        if tw < MIN_LABELLED || th < MIN_LABELLED {
            continue;
        }
        let name = match labels.and_then(|l| l.get(tile.source)) {
            Some(label) => String::from(*label),
            None => format!("#{}", tile.source),
        };
        let cx = tx + tw / 2.0;
        let cy = ty + th / 2.0;
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" class="tile-label" text-anchor="middle">{}</text>"#,
            cx,
            cy - 2.0,
            escape_xml(&name)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" class="tile-label" text-anchor="middle">{}×{}</text>"#,
            cx,
            cy + 12.0,
            r.width,
            r.height
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Scale a canvas to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(size: PixelSize) -> (f64, f64, f64) {
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    if w == 0.0 || h == 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
