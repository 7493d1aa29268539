use crate::report::legend_symbol;
use crate::types::CutPlan;

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// Draws one sheet as ASCII art, scaled to fit an 80x40 character box.
/// Each piece is labelled with its legend symbol and size when there is room.
pub fn render_plan(plan: &CutPlan) -> String {
    let stock = plan.stock;
    let scale = f64::min(MAX_WIDTH / stock.w, MAX_HEIGHT / stock.h);
    let grid_w = (stock.w * scale).round() as usize;
    let grid_h = (stock.h * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    draw_rect(&mut grid, 0, 0, grid_w, grid_h);

    for p in &plan.placements {
        let sx = (p.x * scale).round() as usize;
        let sy = (p.y * scale).round() as usize;
        let sw = (p.rect.w * scale).round() as usize;
        let sh = (p.rect.h * scale).round() as usize;

        if sw == 0 || sh == 0 {
            continue;
        }

        draw_rect(&mut grid, sx, sy, sw, sh);

        if sh < 2 {
            continue;
        }
        let full = format!("{} {}", legend_symbol(p.type_index), p.rect);
        let short = legend_symbol(p.type_index).to_string();
        let label: Vec<char> = if full.chars().count() < sw {
            full.chars().collect()
        } else {
            short.chars().collect()
        };

        let cx = sx + sw / 2;
        let cy = sy + sh / 2;
        let start_x = cx.saturating_sub(label.len() / 2).max(sx + 1);
        for (i, &ch) in label.iter().enumerate() {
            let x = start_x + i;
            if x > sx && x < sx + sw && cy > sy && cy < sy + sh {
                grid[cy][x] = ch;
            }
        }
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

fn edge(existing: char, line: char) -> char {
    match (existing, line) {
        ('+', _) | ('|', '-') | ('-', '|') => '+',
        _ => line,
    }
}

fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let Some(cols) = grid.first().map(Vec::len) else {
        return;
    };

    for i in (x..=x + w).filter(|&i| i < cols) {
        for j in [y, y + h].into_iter().filter(|&j| j < rows) {
            grid[j][i] = edge(grid[j][i], '-');
        }
    }

    for j in (y..=y + h).filter(|&j| j < rows) {
        for i in [x, x + w].into_iter().filter(|&i| i < cols) {
            grid[j][i] = edge(grid[j][i], '|');
        }
    }

    for cx in [x, x + w] {
        for cy in [y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Placement, Rect};

    fn plan(stock: Rect, placements: Vec<Placement>) -> CutPlan {
        CutPlan {
            sheet_index: 1,
            stock,
            placements,
        }
    }

    fn piece(x: f64, y: f64, w: f64, h: f64, type_index: usize) -> Placement {
        Placement {
            rect: Rect::new(w, h),
            x,
            y,
            rotated: false,
            type_index,
            sheet_index: 1,
        }
    }

    #[test]
    fn test_render_single_piece() {
        let output = render_plan(&plan(
            Rect::new(100.0, 50.0),
            vec![piece(0.0, 0.0, 100.0, 50.0, 0)],
        ));
        assert!(output.contains('+'));
        assert!(output.contains('-'));
        assert!(output.contains('|'));
        assert!(output.contains("A 100x50"));
    }

    #[test]
    fn test_render_two_types() {
        let output = render_plan(&plan(
            Rect::new(100.0, 100.0),
            vec![
                piece(0.0, 0.0, 50.0, 100.0, 0),
                piece(50.0, 0.0, 50.0, 100.0, 1),
            ],
        ));
        assert!(output.contains("A 50x100"));
        assert!(output.contains("B 50x100"));
    }

    #[test]
    fn test_small_piece_gets_short_label() {
        let output = render_plan(&plan(
            Rect::new(1000.0, 500.0),
            vec![piece(0.0, 0.0, 60.0, 60.0, 2)],
        ));
        assert!(output.contains('C'));
        assert!(!output.contains("60x60"));
    }

    #[test]
    fn test_label_one_column_narrower_than_box() {
        // Box is 9 columns, "A 90x100" is 8: the symbol must not land on the border
        let output = render_plan(&plan(
            Rect::new(800.0, 400.0),
            vec![piece(0.0, 0.0, 90.0, 100.0, 0)],
        ));
        assert!(output.contains("A 90x100"));
    }

    #[test]
    fn test_label_as_wide_as_box_falls_back_to_symbol() {
        // Box is 8 columns, same as "B 80x100"
        let output = render_plan(&plan(
            Rect::new(800.0, 400.0),
            vec![piece(0.0, 0.0, 80.0, 100.0, 1)],
        ));
        assert!(output.contains('B'));
        assert!(!output.contains("80x100"));
    }

    #[test]
    fn test_render_empty() {
        let output = render_plan(&plan(Rect::new(100.0, 100.0), vec![]));
        // Should still draw the stock border
        assert!(output.contains('+'));
        assert_eq!(output.lines().count(), 41);
    }
}
