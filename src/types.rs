use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

/// Width/height pair in the caller's length unit (usually mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(rename = "width")]
    pub w: f64,
    #[serde(rename = "height")]
    pub h: f64,
}

impl Rect {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// A requested piece type.
///
/// A demand has no identity of its own: its position in the demand list is
/// its *type index*, and every placement cut from it carries that index.
/// Reordering or filtering the list after packing breaks that mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub qty: u32,
}

impl Demand {
    pub fn new(w: f64, h: f64, qty: u32) -> Self {
        Self {
            rect: Rect::new(w, h),
            qty,
        }
    }
}

/// A stock sheet. `thickness` travels with the sheet but never affects packing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    #[serde(flatten)]
    pub rect: Rect,
    pub thickness: f64,
}

impl Sheet {
    pub fn new(w: f64, h: f64, thickness: f64) -> Self {
        Self {
            rect: Rect::new(w, h),
            thickness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Effective footprint on the sheet, after any rotation.
    #[serde(flatten)]
    pub rect: Rect,
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
    pub type_index: usize,
    /// 1-based, same as [`CutPlan::sheet_index`].
    pub sheet_index: usize,
}

impl Placement {
    pub fn right(&self) -> f64 {
        self.x + self.rect.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.rect.h
    }

    /// Interiors intersect; pieces that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Layout of one sheet that received at least one piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPlan {
    /// 1-based position of the sheet in the input list.
    #[serde(rename = "sheet")]
    pub sheet_index: usize,
    #[serde(flatten)]
    pub stock: Rect,
    pub placements: Vec<Placement>,
}

impl CutPlan {
    pub fn used_area(&self) -> f64 {
        self.placements.iter().map(|p| p.rect.area()).sum()
    }

    pub fn waste_area(&self) -> f64 {
        self.stock.area() - self.used_area()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub plans: Vec<CutPlan>,
    /// Number of piece instances asked for, across all demands.
    pub requested: usize,
}

impl Solution {
    pub fn sheet_count(&self) -> usize {
        self.plans.len()
    }

    pub fn placed_count(&self) -> usize {
        self.plans.iter().map(|p| p.placements.len()).sum()
    }

    pub fn unplaced_count(&self) -> usize {
        self.requested.saturating_sub(self.placed_count())
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced_count() == 0
    }

    /// Placed instances per demand, indexed by type index.
    pub fn placed_by_type(&self, demand_count: usize) -> Vec<usize> {
        let mut counts = vec![0; demand_count];
        for p in self.plans.iter().flat_map(|plan| &plan.placements) {
            if let Some(c) = counts.get_mut(p.type_index) {
                *c += 1;
            }
        }
        counts
    }

    pub fn total_waste_percent(&self) -> f64 {
        let total_stock_area: f64 = self.plans.iter().map(|p| p.stock.area()).sum();
        if total_stock_area <= 0.0 {
            return 0.0;
        }
        let total_used: f64 = self.plans.iter().map(CutPlan::used_area).sum();
        (total_stock_area - total_used) / total_stock_area * 100.0
    }
}

/// Accepts `3` as well as `3.0`, as JSON clients often send numbers as floats.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;
    if v.fract() != 0.0 || v < 0.0 || v > u32::MAX as f64 {
        return Err(D::Error::custom(format!(
            "expected a non-negative integer, got {v}"
        )));
    }
    Ok(v as u32)
}
