//! 3x3-of-3x3 dashboard composed from nine independent slot grids

use serde::Serialize;

use crate::grid::{CENTER_SLOT, GRID_SLOTS, map_to_grid, place_around};
use crate::models::MandalaResult;

pub const DASHBOARD_SIDE: usize = 9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellVariant {
    /// Topic surrounded by the 8 dimensions
    Main,
    /// One dimension's title surrounded by its 8 items
    Sub,
    /// Padding when the result carries fewer than 8 sub-grids
    #[default]
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCell {
    pub variant: CellVariant,
    pub center: String,
    pub slots: [String; GRID_SLOTS],
}

impl DashboardCell {
    fn new(variant: CellVariant, center: &str, items: &[String]) -> Self {
        Self {
            variant,
            center: center.to_string(),
            slots: map_to_grid(center, items),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub cells: [DashboardCell; GRID_SLOTS],
}

/// Main block at the center, sub-grid `i` at the slot the index rule gives dimension `i`
pub fn compose_dashboard(topic: &str, result: &MandalaResult) -> Dashboard {
    let main = DashboardCell::new(CellVariant::Main, topic, &result.main_dimensions);
    let subs = result
        .sub_grids
        .iter()
        .map(|grid| DashboardCell::new(CellVariant::Sub, &grid.title, &grid.items));
    Dashboard {
        cells: place_around(main, subs),
    }
}

impl Dashboard {
    pub fn main_cell(&self) -> &DashboardCell {
        &self.cells[CENTER_SLOT]
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&DashboardCell> {
        if row < 3 && col < 3 {
            self.cells.get(row * 3 + col)
        } else {
            None
        }
    }

    /// Cells grouped into the three outer rows
    pub fn rows(&self) -> impl Iterator<Item = &[DashboardCell]> {
        self.cells.chunks(3)
    }

    /// Flattened 9x9 logical grid, row-major
    pub fn matrix(&self) -> [[String; DASHBOARD_SIDE]; DASHBOARD_SIDE] {
        let mut out: [[String; DASHBOARD_SIDE]; DASHBOARD_SIDE] = Default::default();
        for (r, row) in out.iter_mut().enumerate() {
            let (outer_row, inner_row) = (r / 3, r % 3);
            for (c, value) in row.iter_mut().enumerate() {
                let (outer_col, inner_col) = (c / 3, c % 3);
                let cell = &self.cells[outer_row * 3 + outer_col];
                *value = cell.slots[inner_row * 3 + inner_col].clone();
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_result;

    #[test]
    fn test_main_cell_centered_on_topic() {
        let dash = compose_dashboard("TOPIC", &sample_result());
        let main = dash.main_cell();
        assert_eq!(main.variant, CellVariant::Main);
        assert_eq!(main.slots[CENTER_SLOT], "TOPIC");
        assert_eq!(main.slots[0], "D1");
        assert_eq!(main.slots[5], "D5");
    }

    #[test]
    fn test_sub_grids_follow_dimension_slots() {
        let result = sample_result();
        let dash = compose_dashboard("TOPIC", &result);
        for (i, dim) in result.main_dimensions.iter().enumerate() {
            let outer = crate::grid::slot_for_item(i);
            assert_eq!(dash.main_cell().slots[outer], *dim);
            assert_eq!(dash.cells[outer].center, result.sub_grids[i].title);
            assert_eq!(dash.cells[outer].variant, CellVariant::Sub);
        }
    }

    #[test]
    fn test_matrix_center_and_corners() {
        let dash = compose_dashboard("TOPIC", &sample_result());
        let m = dash.matrix();
        assert_eq!(m[4][4], "TOPIC");
        assert_eq!(m[1][1], "D1");
        assert_eq!(m[0][0], "D1-1");
        assert_eq!(m[8][8], "D8-8");
        assert_eq!(m[7][7], "D8");
    }

    #[test]
    fn test_missing_sub_grids_pad_with_empty_cells() {
        let mut result = sample_result();
        result.sub_grids.truncate(6);
        let dash = compose_dashboard("TOPIC", &result);
        assert_eq!(dash.cells[7].variant, CellVariant::Empty);
        assert_eq!(dash.cells[8].variant, CellVariant::Empty);
        assert!(dash.cells[8].slots.iter().all(String::is_empty));
    }

    #[test]
    fn test_rows_and_cell_lookup() {
        let dash = compose_dashboard("TOPIC", &sample_result());
        assert_eq!(dash.rows().count(), 3);
        assert_eq!(dash.cell(1, 1).unwrap().variant, CellVariant::Main);
        assert!(dash.cell(3, 0).is_none());
    }
}
