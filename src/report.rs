use std::fmt::Write;

use crate::types::{Demand, Solution};

/// Stable per-type symbol used in legends and layouts: `A`..`Z`, then wraps.
pub fn legend_symbol(type_index: usize) -> char {
    (b'A' + (type_index % 26) as u8) as char
}

/// Plain-text summary of a packing run: sheets used, pieces placed against
/// pieces requested, waste, and a legend entry per demand.
pub fn summary(demands: &[Demand], solution: &Solution) -> String {
    let mut out = String::new();
    let sheets = solution.sheet_count();
    let _ = writeln!(out, "Cut plan summary");
    let _ = writeln!(
        out,
        "  Sheets used: {} sheet{}",
        sheets,
        if sheets == 1 { "" } else { "s" }
    );
    let _ = writeln!(
        out,
        "  Pieces placed: {} of {}",
        solution.placed_count(),
        solution.requested
    );
    let _ = writeln!(out, "  Waste: {:.1}%", solution.total_waste_percent());

    for plan in &solution.plans {
        let _ = writeln!(
            out,
            "  Sheet {}: {} piece{}, waste area {}",
            plan.sheet_index,
            plan.placements.len(),
            if plan.placements.len() == 1 { "" } else { "s" },
            plan.waste_area()
        );
    }

    let placed = solution.placed_by_type(demands.len());
    for (i, d) in demands.iter().enumerate() {
        let _ = writeln!(
            out,
            "  [{}] {} x {} ({}x, placed {})",
            legend_symbol(i),
            d.rect.w,
            d.rect.h,
            d.qty,
            placed[i]
        );
    }

    if !solution.is_complete() {
        let _ = writeln!(
            out,
            "  Warning: {} piece{} did not fit on the supplied sheets",
            solution.unplaced_count(),
            if solution.unplaced_count() == 1 { "" } else { "s" }
        );
    }
    out
}
