//! # Order Merger
//!
//! Unions the two order sources into one listing:
//!
//! ```text
//! ┌──────────────────┐     ┌───────────────────────┐
//! │  relational      │     │  orders.xlsx          │
//! │  store (orders)  │     │  (re-read every call) │
//! └────────┬─────────┘     └──────────┬────────────┘
//!          │ record_from_store        │ record_from_row
//!          ▼                          ▼
//!   store portion  ++  workbook portion (or fallback)
//!          │                          │
//!          └──────────┬───────────────┘
//!                     ▼
//!            overlay.apply_all()
//!                     ▼
//!               OrderListing
//! ```
//!
//! The listing never fails. A source that cannot be read contributes an
//! empty (or fallback) portion and reports the failure through its
//! [`SourceOutcome`]; the other source is unaffected.

use std::path::PathBuf;

use tracing::{debug, warn};

use bookworld_core::OrderRecord;
use bookworld_db::{Database, OrderRepository};

use crate::fallback::sample_orders;
use crate::mapper::{record_from_row, record_from_store};
use crate::overlay::OrderOverlayStore;

/// How one source fared during a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The source was read and contributed its own records.
    Loaded,
    /// The source was readable but held no records; the workbook source
    /// substitutes the fallback set in this case.
    NoData,
    /// The source could not be read; the workbook source substitutes the
    /// fallback set, the store source contributes nothing.
    Failed,
}

/// One merged order listing.
#[derive(Debug, Clone)]
pub struct OrderListing {
    /// Store records first (newest first), then workbook records in file
    /// order, all with overlay edits applied.
    pub orders: Vec<OrderRecord>,
    /// Size of the store portion.
    pub store_count: usize,
    /// Size of the workbook (or fallback) portion.
    pub workbook_count: usize,
    /// How the store source fared.
    pub store: SourceOutcome,
    /// How the workbook source fared.
    pub workbook: SourceOutcome,
}

/// Merges store and workbook orders into display-ready listings.
#[derive(Debug, Clone)]
pub struct OrderMerger {
    repo: OrderRepository,
    workbook_path: PathBuf,
    fallback: Vec<OrderRecord>,
}

impl OrderMerger {
    /// Creates a merger reading store orders from `db` and workbook orders
    /// from the file at `workbook_path`, with the built-in sample set as
    /// the workbook fallback.
    pub fn new(db: &Database, workbook_path: impl Into<PathBuf>) -> Self {
        OrderMerger {
            repo: db.orders(),
            workbook_path: workbook_path.into(),
            fallback: sample_orders(),
        }
    }

    /// Replaces the workbook fallback set.
    pub fn with_fallback(mut self, fallback: Vec<OrderRecord>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Produces the merged listing with `overlay` edits applied.
    ///
    /// The workbook file is re-read on every call, so external edits show
    /// up on the next refresh without a restart.
    pub async fn list_orders(&self, overlay: &OrderOverlayStore) -> OrderListing {
        let (store_portion, store_outcome) = self.load_store_portion().await;
        let (workbook_portion, workbook_outcome) = self.load_workbook_portion();

        let store_count = store_portion.len();
        let workbook_count = workbook_portion.len();

        let mut orders = store_portion;
        orders.extend(workbook_portion);
        overlay.apply_all(&mut orders);

        debug!(
            store = store_count,
            workbook = workbook_count,
            edits = overlay.len(),
            "Merged order listing"
        );

        OrderListing {
            orders,
            store_count,
            workbook_count,
            store: store_outcome,
            workbook: workbook_outcome,
        }
    }

    async fn load_store_portion(&self) -> (Vec<OrderRecord>, SourceOutcome) {
        match self.repo.list().await {
            Ok(orders) => {
                let outcome = if orders.is_empty() {
                    SourceOutcome::NoData
                } else {
                    SourceOutcome::Loaded
                };
                (orders.iter().map(record_from_store).collect(), outcome)
            }
            Err(err) => {
                warn!(error = %err, "Store orders unavailable; listing continues without them");
                (Vec::new(), SourceOutcome::Failed)
            }
        }
    }

    fn load_workbook_portion(&self) -> (Vec<OrderRecord>, SourceOutcome) {
        match bookworld_xlsx::read_table_from_path(&self.workbook_path) {
            Ok(rows) if rows.is_empty() => {
                debug!(
                    path = %self.workbook_path.display(),
                    "Workbook has no data rows; using fallback orders"
                );
                (self.fallback.clone(), SourceOutcome::NoData)
            }
            Ok(rows) => {
                let records = rows
                    .iter()
                    .enumerate()
                    .map(|(offset, row)| record_from_row(row, offset))
                    .collect();
                (records, SourceOutcome::Loaded)
            }
            Err(err) => {
                warn!(
                    path = %self.workbook_path.display(),
                    error = %err,
                    "Workbook unreadable; using fallback orders"
                );
                (self.fallback.clone(), SourceOutcome::Failed)
            }
        }
    }
}
