//! Plain text views of a resolved design

use std::fmt::Write;

use crate::design::Design;
use crate::layout::{Element, Gap, GapAxis};
use crate::summary::{format_area, AreaSummary};
use crate::units::format_cm;

/// One row per element in pre-order, names indented by nesting depth
pub fn positions_table(design: &Design) -> String {
    let mut lines = vec![format!(
        "{:<4} {:<10} {:>8} {:>8} {:>8} {:>8} {:>3}  {}",
        "id", "kind", "x", "y", "width", "height", "z", "name"
    )];
    position_rows(design.tree().roots(), 0, &mut lines);
    lines.join("\n")
}

fn position_rows(elements: &[Element], depth: usize, lines: &mut Vec<String>) {
    for el in elements {
        let position = el.position();
        lines.push(format!(
            "{:<4} {:<10} {:>8} {:>8} {:>8} {:>8} {:>3}  {}{}",
            el.id.to_string(),
            el.kind.keyword(),
            format_cm(position.x),
            format_cm(position.y),
            format_cm(el.dimensions.width),
            format_cm(el.dimensions.height),
            el.stack_key,
            "  ".repeat(depth),
            el.name
        ));
        position_rows(&el.children, depth + 1, lines);
    }
}

pub fn gaps_table(gaps: &[Gap]) -> String {
    let mut lines = vec![format!(
        "{:<10} {:>8} {:>8} {:>8} {:>8}",
        "axis", "start", "end", "size", "center"
    )];
    for gap in gaps {
        let axis = match gap.axis {
            GapAxis::Horizontal => "horizontal",
            GapAxis::Vertical => "vertical",
        };
        lines.push(format!(
            "{:<10} {:>8} {:>8} {:>8} {:>8}",
            axis,
            format_cm(gap.start),
            format_cm(gap.end),
            format_cm(gap.size),
            format_cm(gap.perpendicular_center)
        ));
    }
    lines.join("\n")
}

pub fn summary_text(summary: &AreaSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Wall area:   {}", format_area(summary.wall_area));
    let _ = writeln!(
        out,
        "Niches:      {} ({})",
        summary.niche_count,
        format_area(summary.niche_area)
    );
    let _ = write!(out, "Net area:    {}", format_area(summary.net_area));
    if let Some(pct) = summary.niche_percentage {
        let _ = write!(out, "\nNiche share: {:.1}%", pct);
    }
    out
}

/// Indented dump used by `--debug`
pub fn tree_dump(design: &Design) -> String {
    fn walk(elements: &[Element], depth: usize, out: &mut String) {
        for el in elements {
            let p = el.position();
            let _ = writeln!(
                out,
                "{}{} {} at ({}, {}) {}x{} z={}",
                "  ".repeat(depth),
                el.id,
                el.kind.keyword(),
                p.x,
                p.y,
                el.dimensions.width,
                el.dimensions.height,
                el.stack_key
            );
            walk(&el.children, depth + 1, out);
        }
    }

    let mut out = String::new();
    walk(design.tree().roots(), 0, &mut out);
    out
}
