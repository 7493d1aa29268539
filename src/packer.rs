use crate::types::{CutPlan, Demand, Placement, Rect, Sheet, Solution};

/// One physical piece waiting to be placed.
#[derive(Debug, Clone, Copy)]
struct Instance {
    rect: Rect,
    type_index: usize,
}

/// Greedy shelf packer.
///
/// Sheets are filled strictly in input order, row by row. Each row scans the
/// remaining pieces in demand order and takes every piece that still fits at
/// the row cursor, preferring the piece's own orientation over a 90° turn.
/// Pieces that fit nowhere are left out of the plans; [`Solution`] keeps the
/// requested count so the shortfall can be reported.
pub struct Packer<'a> {
    demands: &'a [Demand],
    sheets: &'a [Sheet],
    kerf: f64,
}

impl<'a> Packer<'a> {
    pub fn new(demands: &'a [Demand], sheets: &'a [Sheet], kerf: f64) -> Self {
        Self {
            demands,
            sheets,
            kerf,
        }
    }

    pub fn solve(&self) -> Solution {
        let mut pool = self.expand_demands();
        let requested = pool.len();
        let mut plans = Vec::new();

        for (i, sheet) in self.sheets.iter().enumerate() {
            if pool.is_empty() {
                break;
            }
            let placements = self.pack_sheet(sheet, i + 1, &mut pool);
            tracing::debug!(
                sheet = i + 1,
                placed = placements.len(),
                remaining = pool.len(),
                "packed sheet"
            );
            if !placements.is_empty() {
                plans.push(CutPlan {
                    sheet_index: i + 1,
                    stock: sheet.rect,
                    placements,
                });
            }
        }

        if !pool.is_empty() {
            tracing::warn!(
                unplaced = pool.len(),
                requested,
                "not every piece fits on the supplied sheets"
            );
        }

        Solution { plans, requested }
    }

    /// Demand order, then repetition order. No sorting: this is the order
    /// every row scans in.
    fn expand_demands(&self) -> Vec<Instance> {
        let mut pieces = Vec::new();
        for (type_index, d) in self.demands.iter().enumerate() {
            for _ in 0..d.qty {
                pieces.push(Instance {
                    rect: d.rect,
                    type_index,
                });
            }
        }
        pieces
    }

    fn pack_sheet(
        &self,
        sheet: &Sheet,
        sheet_index: usize,
        pool: &mut Vec<Instance>,
    ) -> Vec<Placement> {
        let stock = sheet.rect;
        let mut placements = Vec::new();
        let mut y = 0.0;

        while y < stock.h && !pool.is_empty() {
            let mut x = 0.0;
            let mut row_height: f64 = 0.0;
            let mut skipped = Vec::with_capacity(pool.len());

            for piece in pool.drain(..) {
                let Some((rect, rotated)) = fit_at(piece.rect, stock, x, y) else {
                    skipped.push(piece);
                    continue;
                };
                placements.push(Placement {
                    rect,
                    x,
                    y,
                    rotated,
                    type_index: piece.type_index,
                    sheet_index,
                });
                x += rect.w + self.kerf;
                row_height = row_height.max(rect.h);
            }
            *pool = skipped;

            // Nothing fit at this cursor, and nothing will fit lower down.
            if row_height == 0.0 {
                break;
            }
            y += row_height + self.kerf;
        }

        placements
    }
}

/// Orientation the piece takes with its top-left corner at `(x, y)`, if any.
/// The unrotated orientation wins when both fit.
fn fit_at(piece: Rect, stock: Rect, x: f64, y: f64) -> Option<(Rect, bool)> {
    let fits = |r: Rect| x + r.w <= stock.w && y + r.h <= stock.h;
    if fits(piece) {
        Some((piece, false))
    } else if fits(piece.rotated()) {
        Some((piece.rotated(), true))
    } else {
        None
    }
}

/// Packs `demands` onto `sheets` and returns the non-empty sheet plans.
pub fn pack(demands: &[Demand], sheets: &[Sheet], kerf: f64) -> Vec<CutPlan> {
    Packer::new(demands, sheets, kerf).solve().plans
}
