//! SVG capture of a single 3x3 grid or the full 9x9 dashboard

use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::dashboard::{CellVariant, Dashboard};
use crate::grid::{CENTER_SLOT, GRID_SLOTS};

const CELL: u32 = 120;
const GAP: u32 = 6;
const FONT_SIZE: u32 = 13;
const MAX_LINE_CHARS: usize = 8;
const MAX_LINES: usize = 4;

const MAIN_FILL: &str = "#4F46E5";
const CENTER_FILL: &str = "#E0E7FF";
const CELL_FILL: &str = "#FFFFFF";
const STROKE: &str = "#CBD5E1";

/// Break `text` into at most `MAX_LINES` lines of `MAX_LINE_CHARS` chars
fn wrap(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut lines: Vec<String> = chars
        .chunks(MAX_LINE_CHARS)
        .map(|c| c.iter().collect())
        .collect();
    if lines.len() > MAX_LINES {
        lines.truncate(MAX_LINES);
        if let Some(last) = lines.last_mut() {
            last.pop();
            last.push('…');
        }
    }
    lines
}

fn cell_svg(out: &mut String, x: u32, y: u32, text: &str, fill: &str, text_fill: &str, bold: bool) {
    let _ = write!(
        out,
        r#"<rect x="{x}" y="{y}" width="{CELL}" height="{CELL}" rx="8" fill="{fill}" stroke="{STROKE}"/>"#
    );
    let lines = wrap(text);
    let line_height = FONT_SIZE + 4;
    let block_height = line_height * lines.len() as u32;
    let first_baseline = y + (CELL - block_height) / 2 + FONT_SIZE;
    let weight = if bold { "bold" } else { "normal" };
    for (i, line) in lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-size="{FONT_SIZE}" font-weight="{weight}" fill="{text_fill}" text-anchor="middle">{}</text>"#,
            x + CELL / 2,
            first_baseline + line_height * i as u32,
            escape(line.as_str())
        );
    }
}

fn svg_open(width: u32, height: u32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"#
    )
}

/// One 3x3 grid; `highlight_main` paints the center like the dashboard's topic cell
pub fn grid_svg(slots: &[String; GRID_SLOTS], highlight_main: bool) -> String {
    let side = CELL * 3 + GAP * 4;
    let mut out = svg_open(side, side);
    for (i, text) in slots.iter().enumerate() {
        let x = GAP + (i as u32 % 3) * (CELL + GAP);
        let y = GAP + (i as u32 / 3) * (CELL + GAP);
        let (fill, text_fill, bold) = match (i == CENTER_SLOT, highlight_main) {
            (true, true) => (MAIN_FILL, "#FFFFFF", true),
            (true, false) => (CENTER_FILL, "#1E1B4B", true),
            _ => (CELL_FILL, "#334155", false),
        };
        cell_svg(&mut out, x, y, text, fill, text_fill, bold);
    }
    out.push_str("</svg>");
    out
}

/// Full 9x9 dashboard with a wider gap between the nine blocks
pub fn dashboard_svg(dashboard: &Dashboard) -> String {
    let block_gap = GAP * 3;
    let block_side = CELL * 3 + GAP * 2;
    let side = block_side * 3 + block_gap * 4;
    let mut out = svg_open(side, side);
    for (b, cell) in dashboard.cells.iter().enumerate() {
        let bx = block_gap + (b as u32 % 3) * (block_side + block_gap);
        let by = block_gap + (b as u32 / 3) * (block_side + block_gap);
        for (i, text) in cell.slots.iter().enumerate() {
            let x = bx + (i as u32 % 3) * (CELL + GAP);
            let y = by + (i as u32 / 3) * (CELL + GAP);
            let center = i == CENTER_SLOT;
            let (fill, text_fill, bold) = match (cell.variant, center) {
                (CellVariant::Main, true) => (MAIN_FILL, "#FFFFFF", true),
                (_, true) => (CENTER_FILL, "#1E1B4B", true),
                _ => (CELL_FILL, "#334155", false),
            };
            cell_svg(&mut out, x, y, text, fill, text_fill, bold);
        }
    }
    out.push_str("</svg>");
    out
}
