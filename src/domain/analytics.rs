use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Analytics
// ============================================================================
//
// Chart data arrives pre-aggregated; the client only fetches and tabulates.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsKind {
    Sales,
    Inventory,
    Restaurant,
}

impl AnalyticsKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            AnalyticsKind::Sales => "sales",
            AnalyticsKind::Inventory => "inventory",
            AnalyticsKind::Restaurant => "restaurant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    #[serde(default)]
    pub data: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Sum of each dataset, in dataset order
    pub fn totals(&self) -> Vec<(&str, Decimal)> {
        self.datasets
            .iter()
            .map(|dataset| (dataset.label.as_str(), dataset.data.iter().sum()))
            .collect()
    }

    /// Rows of `(label, value per dataset)`; missing points read as zero
    pub fn rows(&self) -> Vec<(&str, Vec<Decimal>)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let values = self
                    .datasets
                    .iter()
                    .map(|dataset| dataset.data.get(index).copied().unwrap_or(Decimal::ZERO))
                    .collect();
                (label.as_str(), values)
            })
            .collect()
    }
}
