use serde::Serialize;

use super::periods::monthly_rate;

/// Headline figures for a constant-rate, constant-contribution plan.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundSummary {
    pub total_value: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub interest_percentage: f64,
}

/// Future value of one unit paid at the end of each of `n` periods.
/// A zero rate degenerates to `n`.
pub fn annuity_factor(rate: f64, n: u32) -> f64 {
    if rate == 0.0 {
        return n as f64;
    }
    ((1.0 + rate).powf(n as f64) - 1.0) / rate
}

pub fn future_value(principal: f64, contribution: f64, rate: f64, n: u32) -> f64 {
    principal * (1.0 + rate).powf(n as f64) + contribution * annuity_factor(rate, n)
}

pub fn compound_summary(
    principal: f64,
    monthly_contribution: f64,
    annual_rate_percent: f64,
    years: u32,
) -> CompoundSummary {
    let rate = monthly_rate(annual_rate_percent);
    let months = years.saturating_mul(12);

    let total_value = future_value(principal, monthly_contribution, rate, months);
    let total_contributions = principal + monthly_contribution * months as f64;
    let total_interest = total_value - total_contributions;
    let interest_percentage = if total_contributions == 0.0 {
        0.0
    } else {
        total_interest / total_contributions * 100.0
    };

    CompoundSummary {
        total_value,
        total_contributions,
        total_interest,
        interest_percentage,
    }
}
