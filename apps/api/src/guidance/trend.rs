//! Mock job-market trend labels.
//!
//! There is no market data behind these: each submission draws one label
//! uniformly at random. The draw goes through `TrendSource` so handlers get a
//! real RNG and tests can pin the outcome.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketTrend {
    HighDemand,
    ModerateDemand,
    LowDemand,
}

impl MarketTrend {
    pub const ALL: [MarketTrend; 3] = [
        MarketTrend::HighDemand,
        MarketTrend::ModerateDemand,
        MarketTrend::LowDemand,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MarketTrend::HighDemand => "high demand",
            MarketTrend::ModerateDemand => "moderate demand",
            MarketTrend::LowDemand => "low demand",
        }
    }

    /// Uniform draw over the three labels.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Source of market-trend draws. Carried in `AppState` as `Arc<dyn TrendSource>`.
pub trait TrendSource: Send + Sync {
    fn draw(&self) -> MarketTrend;
}

/// Default source backed by the thread-local RNG.
pub struct RandomTrendSource;

impl TrendSource for RandomTrendSource {
    fn draw(&self) -> MarketTrend {
        MarketTrend::sample(&mut rand::thread_rng())
    }
}

/// Always yields the same label.
#[cfg(test)]
pub struct FixedTrend(pub MarketTrend);

#[cfg(test)]
impl TrendSource for FixedTrend {
    fn draw(&self) -> MarketTrend {
        self.0
    }
}
