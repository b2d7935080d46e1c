//! Per-product interaction counts.

use std::collections::HashMap;

use restwell_core::{InteractionEvent, InteractionKind, ProductId};

/// Observed interaction counts for one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionCounts {
    pub views: u32,
    pub clicks: u32,
    pub adds: u32,
    pub purchases: u32,
}

impl InteractionCounts {
    /// Add `n` occurrences of `kind`, saturating at `u32::MAX`.
    pub fn add(&mut self, kind: InteractionKind, n: u32) {
        let slot = match kind {
            InteractionKind::View => &mut self.views,
            InteractionKind::Click => &mut self.clicks,
            InteractionKind::AddToCart => &mut self.adds,
            InteractionKind::Purchase => &mut self.purchases,
        };
        *slot = slot.saturating_add(n);
    }

    /// Count for a single kind.
    #[must_use]
    pub const fn get(&self, kind: InteractionKind) -> u32 {
        match kind {
            InteractionKind::View => self.views,
            InteractionKind::Click => self.clicks,
            InteractionKind::AddToCart => self.adds,
            InteractionKind::Purchase => self.purchases,
        }
    }

    /// Sum over all kinds.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.views as u64 + self.clicks as u64 + self.adds as u64 + self.purchases as u64
    }
}

/// Interaction counts for every product that has at least one event.
///
/// Products absent from the tally have zero observed activity.
#[derive(Debug, Clone, Default)]
pub struct InteractionTally {
    by_product: HashMap<ProductId, InteractionCounts>,
}

impl InteractionTally {
    /// Count a raw event log in a single pass.
    #[must_use]
    pub fn from_events(events: &[InteractionEvent]) -> Self {
        let mut tally = Self::default();
        for event in events {
            tally.add(event.product_id, event.kind, 1);
        }
        tally
    }

    /// Build from pre-aggregated `(product, kind, count)` rows.
    #[must_use]
    pub fn from_counts<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (ProductId, InteractionKind, u32)>,
    {
        let mut tally = Self::default();
        for (product_id, kind, count) in rows {
            tally.add(product_id, kind, count);
        }
        tally
    }

    /// Add `n` events of `kind` for `product_id`.
    pub fn add(&mut self, product_id: ProductId, kind: InteractionKind, n: u32) {
        self.by_product.entry(product_id).or_default().add(kind, n);
    }

    /// Counts for a product, zero if it has no events.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> InteractionCounts {
        self.by_product.get(&product_id).copied().unwrap_or_default()
    }

    /// Total number of events across all products.
    #[must_use]
    pub fn total_events(&self) -> u64 {
        self.by_product.values().map(InteractionCounts::total).sum()
    }

    /// Number of distinct products with at least one event.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.by_product.len()
    }
}
