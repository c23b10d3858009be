//! 3x3 slot mapping shared by every view and export path

use crate::models::SURROUNDING_CELLS;

/// Index of the center cell in a row-major 3x3 grid
pub const CENTER_SLOT: usize = 4;
pub const GRID_SLOTS: usize = 9;

/// Slot that the `i`-th surrounding item lands in
pub fn slot_for_item(i: usize) -> usize {
    if i < CENTER_SLOT { i } else { i + 1 }
}

/// Place `center` at slot 4 and the first 8 `items` around it in order.
/// Missing items are `T::default()`, extras are ignored.
pub fn place_around<T, I>(center: T, items: I) -> [T; GRID_SLOTS]
where
    T: Default,
    I: IntoIterator<Item = T>,
{
    let mut slots: [T; GRID_SLOTS] = Default::default();
    slots[CENTER_SLOT] = center;
    for (i, item) in items.into_iter().take(SURROUNDING_CELLS).enumerate() {
        slots[slot_for_item(i)] = item;
    }
    slots
}

/// String grid for one center and its 8 surrounding values
pub fn map_to_grid<S: AsRef<str>>(center: &str, items: &[S]) -> [String; GRID_SLOTS] {
    if items.len() != SURROUNDING_CELLS {
        tracing::debug!(
            "map_to_grid got {} items for '{}', padding/truncating to {}",
            items.len(),
            center,
            SURROUNDING_CELLS
        );
    }
    place_around(
        center.to_string(),
        items.iter().map(|item| item.as_ref().to_string()),
    )
}

/// Inverse of `map_to_grid`: the 8 surrounding values in item order
pub fn surrounding(slots: &[String; GRID_SLOTS]) -> [String; SURROUNDING_CELLS] {
    let mut items: [String; SURROUNDING_CELLS] = Default::default();
    for (i, item) in items.iter_mut().enumerate() {
        *item = slots[slot_for_item(i)].clone();
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Vec<String> {
        (1..=8).map(|i| format!("D{i}")).collect()
    }

    #[test]
    fn test_topic_lands_in_center() {
        let slots = map_to_grid("TOPIC", &dims());
        assert_eq!(
            slots,
            ["D1", "D2", "D3", "D4", "TOPIC", "D5", "D6", "D7", "D8"].map(String::from)
        );
    }

    #[test]
    fn test_surrounding_inverts_mapping() {
        let items = dims();
        let slots = map_to_grid("c", &items);
        assert_eq!(surrounding(&slots).to_vec(), items);
    }

    #[test]
    fn test_short_list_is_padded() {
        let slots = map_to_grid("c", &["a", "b", "c", "d", "e"]);
        assert_eq!(slots[5], "e");
        assert_eq!(slots[6], "");
        assert_eq!(slots[8], "");
    }

    #[test]
    fn test_extras_are_ignored() {
        let mut items = dims();
        items.push("D9".to_string());
        let slots = map_to_grid("c", &items);
        assert_eq!(slots[8], "D8");
        assert!(!slots.iter().any(|s| s == "D9"));
    }

    #[test]
    fn test_slot_for_item_skips_center() {
        let slots: Vec<usize> = (0..8).map(slot_for_item).collect();
        assert_eq!(slots, vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }
}
