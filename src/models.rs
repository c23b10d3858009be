//! Data model for a generated Mandala breakdown and its per-dimension checklist

use serde::{Deserialize, Serialize};

use crate::error::{MandalaError, Result};

/// Number of cells surrounding the center of a 3x3 grid
pub const SURROUNDING_CELLS: usize = 8;
pub const MIN_IMPORTANCE: u8 = 1;
pub const MAX_IMPORTANCE: u8 = 5;

/// Full structured result of one generation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MandalaResult {
    pub core_concept: String,
    pub main_dimensions: Vec<String>,
    pub sub_grids: Vec<SubGrid>,
    pub summary: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// The 8 items elaborating one dimension
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubGrid {
    pub title: String,
    pub items: Vec<String>,
}

impl MandalaResult {
    /// Check the 8/8/8 cardinality invariants, reporting the first violation
    pub fn validate(&self) -> Result<()> {
        if self.main_dimensions.len() != SURROUNDING_CELLS {
            return Err(MandalaError::MalformedResponse {
                message: format!(
                    "mainDimensions has {} entries, expected {}",
                    self.main_dimensions.len(),
                    SURROUNDING_CELLS
                ),
            });
        }
        if self.sub_grids.len() != SURROUNDING_CELLS {
            return Err(MandalaError::MalformedResponse {
                message: format!(
                    "subGrids has {} entries, expected {}",
                    self.sub_grids.len(),
                    SURROUNDING_CELLS
                ),
            });
        }
        for (i, grid) in self.sub_grids.iter().enumerate() {
            if grid.items.len() != SURROUNDING_CELLS {
                return Err(MandalaError::MalformedResponse {
                    message: format!(
                        "subGrids[{}] '{}' has {} items, expected {}",
                        i,
                        grid.title,
                        grid.items.len(),
                        SURROUNDING_CELLS
                    ),
                });
            }
        }
        Ok(())
    }

    /// Sub-grid paired with its dimension, in generation order
    pub fn dimension_grid(&self, dimension: &str) -> Option<&SubGrid> {
        self.main_dimensions
            .iter()
            .position(|d| d == dimension)
            .and_then(|i| self.sub_grids.get(i))
    }
}

/// One importance-ranked task for a selected dimension
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub task: String,
    pub description: String,
    #[serde(deserialize_with = "crate::deserializers::de_importance")]
    pub importance: u8,
    /// View-local completion flag, never part of model output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl ChecklistItem {
    pub fn new(task: impl Into<String>, description: impl Into<String>, importance: u8) -> Self {
        Self {
            task: task.into(),
            description: description.into(),
            importance,
            is_completed: None,
        }
    }

    pub fn completed(&self) -> bool {
        self.is_completed.unwrap_or(false)
    }

    /// Importance forced into the displayable 1..=5 range
    pub fn clamped_importance(&self) -> u8 {
        self.importance.clamp(MIN_IMPORTANCE, MAX_IMPORTANCE)
    }

    /// Filled and hollow stars, five glyphs total
    pub fn star_rating(&self) -> String {
        let filled = self.clamped_importance() as usize;
        format!(
            "{}{}",
            "★".repeat(filled),
            "☆".repeat(MAX_IMPORTANCE as usize - filled)
        )
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn sample_result() -> MandalaResult {
        let dims: Vec<String> = (1..=8).map(|i| format!("D{i}")).collect();
        let sub_grids = dims
            .iter()
            .map(|d| SubGrid {
                title: d.clone(),
                items: (1..=8).map(|j| format!("{d}-{j}")).collect(),
            })
            .collect();
        MandalaResult {
            core_concept: "Core".to_string(),
            main_dimensions: dims,
            sub_grids,
            summary: "Summary text".to_string(),
            actions: vec!["Act one".to_string(), "Act two".to_string()],
        }
    }
}
