//! Product performance insights for the admin dashboard.
//!
//! Builds the report behind `GET /api/ml-insights` from the catalog and the
//! interaction log. Despite the endpoint name there is no model here: the
//! report is a handful of counts, a threshold classifier, a fixed-multiplier
//! revenue projection and two static tables.
//!
//! # Fallback policy
//!
//! Products with no observed views, adds or sales either get placeholder
//! values ([`FallbackPolicy::Simulate`], the dashboard default) or are
//! reported as-is ([`FallbackPolicy::Report`]). Under `Simulate` every
//! fabricated metric is named in [`ProductPerformance::simulated`] so callers
//! can tell placeholders from real zero activity.

mod placeholder;
mod tally;

pub use placeholder::{PlaceholderSource, RandomPlaceholders};
pub use tally::{InteractionCounts, InteractionTally};

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use restwell_core::{Product, ProductId};

/// Revenue baseline used when the catalog has no priced sales at all.
pub const DEFAULT_BASELINE_REVENUE: i64 = 50_000;

/// Number of products flagged in the anomaly list.
const ANOMALY_LIMIT: usize = 2;

/// How the aggregator treats products with no observed activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Substitute placeholder values for zero counts.
    #[default]
    Simulate,
    /// Report observed values only; missing rates are `null`.
    Report,
}

impl std::str::FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulate" => Ok(Self::Simulate),
            "report" => Ok(Self::Report),
            other => Err(format!("expected 'simulate' or 'report', got '{other}'")),
        }
    }
}

/// Coarse performance bucket shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCluster {
    #[serde(rename = "Steady")]
    Steady,
    #[serde(rename = "Top Performer")]
    TopPerformer,
    #[serde(rename = "Underperformer")]
    Underperformer,
}

impl ProductCluster {
    /// Classify a product by sales and conversion rate.
    ///
    /// Rules apply in order and later rules win: default `Steady`; more than
    /// 20 sales with a rate above 3% is `TopPerformer`; fewer than 10 sales is
    /// `Underperformer` regardless of rate. A missing rate never qualifies.
    #[must_use]
    pub fn classify(sales: u32, conversion_rate: Option<f64>) -> Self {
        let mut cluster = Self::Steady;
        if sales > 20 && conversion_rate.is_some_and(|rate| rate > 3.0) {
            cluster = Self::TopPerformer;
        }
        if sales < 10 {
            cluster = Self::Underperformer;
        }
        cluster
    }
}

/// Metric names that can carry a placeholder value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimulatedMetric {
    Views,
    Adds,
    Sales,
    ConvRate,
    Margin,
    ReturnRate,
}

/// One row of the performance table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformance {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub views: u32,
    pub clicks: u32,
    pub adds: u32,
    pub purchases: u32,
    pub sales: u32,
    pub conv_rate: Option<f64>,
    pub cluster: ProductCluster,
    pub margin: Option<u32>,
    pub return_rate: Option<f64>,
    pub simulated: Vec<SimulatedMetric>,
}

impl ProductPerformance {
    /// Whether `metric` holds a placeholder rather than an observation.
    #[must_use]
    pub fn is_simulated(&self, metric: SimulatedMetric) -> bool {
        self.simulated.contains(&metric)
    }
}

/// A projected revenue point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub day: u16,
    pub revenue: i64,
    pub inventory_needed: usize,
}

/// A labelled importance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: u8,
}

/// Static importance table. Not derived from data.
pub const FEATURE_IMPORTANCE: [FeatureImportance; 4] = [
    FeatureImportance {
        feature: "Price Sensitive",
        importance: 85,
    },
    FeatureImportance {
        feature: "Firmness Level",
        importance: 72,
    },
    FeatureImportance {
        feature: "Material Quality",
        importance: 68,
    },
    FeatureImportance {
        feature: "Size Variety",
        importance: 45,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnomalyKind {
    Spike,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Low,
}

/// A flagged product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub product: String,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub message: String,
    pub severity: Severity,
}

/// The full insights payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    pub performance: Vec<ProductPerformance>,
    pub forecast: Vec<ForecastPoint>,
    pub feature_importance: Vec<FeatureImportance>,
    pub anomalies: Vec<Anomaly>,
}

struct Horizon {
    day: u16,
    /// Growth multiplier in hundredths (112 = 1.12x).
    multiplier_pct: i64,
    inventory_offset: usize,
    inventory_floor: usize,
}

const HORIZONS: [Horizon; 3] = [
    Horizon {
        day: 30,
        multiplier_pct: 112,
        inventory_offset: 0,
        inventory_floor: 10,
    },
    Horizon {
        day: 60,
        multiplier_pct: 125,
        inventory_offset: 5,
        inventory_floor: 15,
    },
    Horizon {
        day: 90,
        multiplier_pct: 145,
        inventory_offset: 10,
        inventory_floor: 20,
    },
];

/// Build the insights report.
///
/// `products` is taken in catalog order; the anomaly list depends on it.
/// Placeholders are drawn only under [`FallbackPolicy::Simulate`].
pub fn build_report<P: PlaceholderSource>(
    products: &[Product],
    tally: &InteractionTally,
    policy: FallbackPolicy,
    placeholders: &mut P,
) -> InsightsReport {
    let performance: Vec<ProductPerformance> = products
        .iter()
        .map(|product| product_performance(product, tally.get(product.id), policy, placeholders))
        .collect();

    InsightsReport {
        forecast: forecast(&performance, products.len()),
        performance,
        feature_importance: FEATURE_IMPORTANCE.to_vec(),
        anomalies: anomalies(products),
    }
}

/// Sales per view as a percentage, rounded to two decimals with ties away
/// from zero.
///
/// `None` when there are no views.
#[must_use]
pub fn conversion_rate(sales: u32, views: u32) -> Option<f64> {
    (views > 0).then(|| {
        let rate = Decimal::from(sales) * Decimal::ONE_HUNDRED / Decimal::from(views);
        to_cents(rate)
    })
}

fn to_cents(value: Decimal) -> f64 {
    // Whole cents convert exactly; the single division then lands on the
    // nearest f64 to the two-decimal value.
    let cents = (value * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    cents.to_f64().unwrap_or_default() / 100.0
}

/// Round a drawn placeholder to two decimals.
fn round_cents(value: f64) -> f64 {
    Decimal::from_f64(value).map_or(value, to_cents)
}

fn product_performance<P: PlaceholderSource>(
    product: &Product,
    counts: InteractionCounts,
    policy: FallbackPolicy,
    placeholders: &mut P,
) -> ProductPerformance {
    let observed_sales = product.sales();
    let observed_rate = conversion_rate(observed_sales, counts.views);
    let mut simulated = Vec::new();

    let (views, adds, sales, conv_rate, margin, return_rate) = match policy {
        FallbackPolicy::Report => (
            counts.views,
            counts.adds,
            observed_sales,
            observed_rate,
            None,
            None,
        ),
        FallbackPolicy::Simulate => {
            let views = if counts.views == 0 {
                simulated.push(SimulatedMetric::Views);
                placeholders.views()
            } else {
                counts.views
            };
            let adds = if counts.adds == 0 {
                simulated.push(SimulatedMetric::Adds);
                placeholders.adds()
            } else {
                counts.adds
            };
            let sales = if observed_sales == 0 {
                simulated.push(SimulatedMetric::Sales);
                placeholders.sales()
            } else {
                observed_sales
            };
            let conv_rate = match observed_rate {
                Some(rate) => rate,
                None => {
                    simulated.push(SimulatedMetric::ConvRate);
                    round_cents(placeholders.conversion_rate())
                }
            };
            simulated.push(SimulatedMetric::Margin);
            simulated.push(SimulatedMetric::ReturnRate);
            (
                views,
                adds,
                sales,
                Some(conv_rate),
                Some(placeholders.margin()),
                Some(round_cents(placeholders.return_rate())),
            )
        }
    };

    ProductPerformance {
        id: product.id,
        name: product.name.clone(),
        category: product.category.clone(),
        price: product.price,
        views,
        clicks: counts.clicks,
        adds,
        purchases: counts.purchases,
        sales,
        conv_rate,
        cluster: ProductCluster::classify(sales, conv_rate),
        margin,
        return_rate,
        simulated,
    }
}

fn forecast(performance: &[ProductPerformance], product_count: usize) -> Vec<ForecastPoint> {
    let total: Decimal = performance
        .iter()
        .map(|row| Decimal::from(row.sales) * row.price)
        .sum();
    let baseline = if total.is_zero() {
        Decimal::from(DEFAULT_BASELINE_REVENUE)
    } else {
        total
    };

    HORIZONS
        .iter()
        .map(|horizon| ForecastPoint {
            day: horizon.day,
            revenue: (baseline * Decimal::new(horizon.multiplier_pct, 2))
                .floor()
                .to_i64()
                .unwrap_or(i64::MAX),
            inventory_needed: (product_count + horizon.inventory_offset)
                .max(horizon.inventory_floor),
        })
        .collect()
}

fn anomalies(products: &[Product]) -> Vec<Anomaly> {
    products
        .iter()
        .take(ANOMALY_LIMIT)
        .map(|product| Anomaly {
            product: product.name.clone(),
            kind: AnomalyKind::Spike,
            message: format!("Trend detected: 15% increase in interest for {}", product.name),
            severity: Severity::Low,
        })
        .collect()
}
