use serde::{Deserialize, Serialize};

/// Transaction inputs for one compounding step. The rate is already per-period.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub interest_rate: f64,
    pub contribution: f64,
    pub withdrawal: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyWithdrawal {
    pub year: u32,
    pub amount: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionChange {
    pub year: u32,
    pub new_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSettings {
    pub principal: f64,
    pub monthly_contribution: f64,
    /// Annual rate in percent; negative values model losses.
    pub annual_rate: f64,
    pub years: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_withdrawal: Option<EarlyWithdrawal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contribution_changes: Vec<ContributionChange>,
}

impl ScenarioSettings {
    /// Saturates at `u32::MAX` for horizons too long to count in months.
    pub fn total_months(&self) -> u32 {
        self.years.saturating_mul(12)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub opening_balance: f64,
    pub balance: f64,
    pub interest: f64,
    pub contribution: f64,
    pub withdrawal: f64,
    pub net_change: f64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundingSummary {
    pub total_interest: f64,
    pub total_contributions: f64,
    pub total_withdrawals: f64,
    pub final_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundingHistory {
    pub periods: Vec<CalculationResult>,
    pub summary: CompoundingSummary,
}

/// One year-granularity chart sample taken from a monthly trajectory.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyPoint {
    pub year: u32,
    pub total_value: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
}

impl YearlyPoint {
    /// Charts never draw below zero; the raw point keeps the true values.
    pub fn for_display(self) -> Self {
        Self {
            total_value: self.total_value.max(0.0),
            total_interest: self.total_interest.max(0.0),
            ..self
        }
    }
}
