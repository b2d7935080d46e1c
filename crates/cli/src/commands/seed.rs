//! Seed the catalog with demo products and interaction events.
//!
//! Gives the insights dashboard something to chart on a fresh database.
//!
//! # Usage
//!
//! ```bash
//! rw-cli seed demo --products 12 --events 2000
//! ```

use chrono::{Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use tracing::info;

use restwell_core::{InteractionKind, UserId};
use restwell_storefront::db::{
    self, InteractionRepository, NewInteraction, NewProduct, ProductRepository,
};

use super::database_url;

/// (name, category, price in cents)
const DEMO_PRODUCTS: [(&str, &str, i64); 8] = [
    ("Cloud Hybrid Mattress", "mattress", 89_900),
    ("Firm Support Mattress", "mattress", 64_900),
    ("Cooling Gel Topper", "topper", 17_900),
    ("Memory Foam Pillow", "pillow", 4_900),
    ("Down Alternative Pillow", "pillow", 3_900),
    ("Linen Sheet Set", "bedding", 12_900),
    ("Weighted Blanket", "bedding", 15_900),
    ("Platform Bed Frame", "furniture", 39_900),
];

/// Relative weight of each kind in generated traffic, in funnel order.
const KIND_WEIGHTS: [(InteractionKind, u32); 4] = [
    (InteractionKind::View, 60),
    (InteractionKind::Click, 20),
    (InteractionKind::AddToCart, 12),
    (InteractionKind::Purchase, 8),
];

/// Generated events fall within this many days before now.
const EVENT_WINDOW_DAYS: i64 = 30;

/// Insert `products` demo products and `events` random interactions.
///
/// # Errors
///
/// Returns an error if `STOREFRONT_DATABASE_URL` is missing or an insert fails.
pub async fn demo(products: usize, events: usize) -> Result<(), Box<dyn std::error::Error>> {
    let url = database_url("STOREFRONT_DATABASE_URL")
        .ok_or("STOREFRONT_DATABASE_URL not set")?;
    let pool = db::create_pool(&url).await?;

    let catalog = {
        let mut rng = rand::rng();
        demo_catalog(products, &mut rng)
    };

    let product_repo = ProductRepository::new(&pool);
    let mut ids = Vec::with_capacity(catalog.len());
    for product in &catalog {
        let created = product_repo.create(product).await?;
        ids.push(created.id);
    }
    info!(count = ids.len(), "Inserted demo products");

    if ids.is_empty() {
        return Ok(());
    }

    let interactions: Vec<NewInteraction> = {
        let mut rng = rand::rng();
        (0..events)
            .filter_map(|_| {
                let product_id = *ids.choose(&mut rng)?;
                Some(random_interaction(product_id, &mut rng))
            })
            .collect()
    };

    let interaction_repo = InteractionRepository::new(&pool);
    for interaction in &interactions {
        interaction_repo.record(interaction).await?;
    }
    info!(count = interactions.len(), "Inserted demo interactions");

    Ok(())
}

/// Build `count` demo products, cycling through the fixed list.
///
/// Names get a numeric suffix after the first pass so they stay distinct.
fn demo_catalog<R: Rng>(count: usize, rng: &mut R) -> Vec<NewProduct> {
    DEMO_PRODUCTS
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, (name, category, cents))| {
            let round = i / DEMO_PRODUCTS.len();
            NewProduct {
                name: if round == 0 {
                    (*name).to_owned()
                } else {
                    format!("{name} {}", round + 1)
                },
                category: (*category).to_owned(),
                price: Decimal::new(*cents, 2),
                num_reviews: rng.random_range(0..=40),
            }
        })
        .collect()
}

fn random_kind<R: Rng>(rng: &mut R) -> InteractionKind {
    let total: u32 = KIND_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random_range(0..total);
    for (kind, weight) in KIND_WEIGHTS {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    InteractionKind::View
}

fn random_interaction<R: Rng>(product_id: restwell_core::ProductId, rng: &mut R) -> NewInteraction {
    let minutes_ago = rng.random_range(0..EVENT_WINDOW_DAYS * 24 * 60);
    let signed_in = rng.random_bool(0.3);

    NewInteraction {
        product_id,
        user_id: signed_in.then(|| UserId::new(rng.random_range(1..=500))),
        kind: random_kind(rng),
        session_id: Some(format!("demo-{:08x}", rng.random::<u32>())),
        occurred_at: Some(Utc::now() - Duration::minutes(minutes_ago)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_demo_catalog_cycles_with_distinct_names() {
        let mut rng = StdRng::seed_from_u64(1);
        let catalog = demo_catalog(10, &mut rng);

        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog[0].name, "Cloud Hybrid Mattress");
        assert_eq!(catalog[8].name, "Cloud Hybrid Mattress 2");
        assert_eq!(catalog[8].price, Decimal::new(89_900, 2));
        assert!(catalog.iter().all(|p| (0..=40).contains(&p.num_reviews)));
    }

    #[test]
    fn test_random_kind_covers_funnel() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1_000 {
            seen.insert(random_kind(&mut rng));
        }
        assert_eq!(seen.len(), InteractionKind::ALL.len());
    }

    #[test]
    fn test_random_interaction_within_window() {
        let mut rng = StdRng::seed_from_u64(3);
        let product_id = restwell_core::ProductId::new(4);
        let earliest = Utc::now() - Duration::days(EVENT_WINDOW_DAYS);

        for _ in 0..50 {
            let interaction = random_interaction(product_id, &mut rng);
            assert_eq!(interaction.product_id, product_id);
            assert!(interaction.occurred_at.unwrap() >= earliest);
            assert!(interaction.session_id.unwrap().starts_with("demo-"));
        }
    }
}
