//! # Edit Overlay
//!
//! In-session order edits, applied over merged records at read time.
//!
//! Managers edit merged orders without either source being writable at that
//! point (the workbook is an external file, and workbook rows have no store
//! row at all), so edits live here as per-identifier patches. The overlay
//! is plain session state: it is never persisted and is dropped when its
//! owner goes away.

use std::collections::HashMap;

use tracing::debug;

use bookworld_core::{OrderPatch, OrderRecord};

/// Accumulated per-order patches for one session.
#[derive(Debug, Clone, Default)]
pub struct OrderOverlayStore {
    patches: HashMap<String, OrderPatch>,
}

impl OrderOverlayStore {
    /// Creates an empty overlay.
    pub fn new() -> Self {
        OrderOverlayStore::default()
    }

    /// Records a patch for the given order identifier, field-merging it
    /// into any patch already held: fields present in `patch` win, fields
    /// it leaves unset keep their earlier values.
    ///
    /// Empty patches are dropped rather than stored.
    pub fn record(&mut self, id: impl Into<String>, patch: OrderPatch) {
        if patch.is_empty() {
            return;
        }
        let id = id.into();
        debug!(order_id = %id, "Recording order edit");
        self.patches.entry(id).or_default().merge(patch);
    }

    /// Returns the accumulated patch for an identifier, if any.
    pub fn get(&self, id: &str) -> Option<&OrderPatch> {
        self.patches.get(id)
    }

    /// Applies every held patch to every record whose identifier matches.
    /// Records without a patch are untouched; patches without a matching
    /// record stay held for later listings.
    pub fn apply_all(&self, records: &mut [OrderRecord]) {
        if self.patches.is_empty() {
            return;
        }
        for record in records.iter_mut() {
            if let Some(patch) = self.patches.get(&record.id) {
                patch.apply(record);
            }
        }
    }

    /// Number of orders with pending edits.
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// True when no edits are held.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Discards all held edits.
    pub fn clear(&mut self) {
        self.patches.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookworld_core::OrderSource;

    fn record(id: &str) -> OrderRecord {
        OrderRecord {
            id: id.to_string(),
            composition: "Состав заказа".to_string(),
            order_date: "15.01.2024".to_string(),
            delivery_date: String::new(),
            pickup_point_id: 1,
            client_name: "Белов Алексей Дмитриевич".to_string(),
            pickup_code: String::new(),
            status: "Новый".to_string(),
            source: OrderSource::Store,
        }
    }

    #[test]
    fn successive_edits_accumulate_per_field() {
        let mut overlay = OrderOverlayStore::new();
        overlay.record("5", OrderPatch::new().with_status("В обработке"));
        overlay.record("5", OrderPatch::new().with_pickup_code("A1B2C3"));

        let patch = overlay.get("5").unwrap();
        assert_eq!(patch.status.as_deref(), Some("В обработке"));
        assert_eq!(patch.pickup_code.as_deref(), Some("A1B2C3"));
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn later_edit_to_same_field_wins() {
        let mut overlay = OrderOverlayStore::new();
        overlay.record("5", OrderPatch::new().with_status("В обработке"));
        overlay.record("5", OrderPatch::new().with_status("Отменен"));

        assert_eq!(overlay.get("5").unwrap().status.as_deref(), Some("Отменен"));
    }

    #[test]
    fn empty_patches_are_not_stored() {
        let mut overlay = OrderOverlayStore::new();
        overlay.record("5", OrderPatch::new());
        assert!(overlay.is_empty());
    }

    #[test]
    fn apply_all_patches_every_matching_record() {
        let mut overlay = OrderOverlayStore::new();
        overlay.record("5", OrderPatch::new().with_status("Готов к выдаче"));

        // Two records share the identifier when a store rowid collides
        // with a workbook order number; both must show the edit.
        let mut records = vec![record("5"), record("7"), record("5")];
        overlay.apply_all(&mut records);

        assert_eq!(records[0].status, "Готов к выдаче");
        assert_eq!(records[1].status, "Новый");
        assert_eq!(records[2].status, "Готов к выдаче");
    }

    #[test]
    fn unmatched_patches_are_kept() {
        let mut overlay = OrderOverlayStore::new();
        overlay.record("404", OrderPatch::new().with_client_name("Кто-то"));

        let mut records = vec![record("5")];
        overlay.apply_all(&mut records);

        assert_eq!(records[0].client_name, "Белов Алексей Дмитриевич");
        assert!(overlay.get("404").is_some());
    }
}
