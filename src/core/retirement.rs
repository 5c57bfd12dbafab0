use serde::Serialize;

use super::closed_form::future_value;
use super::periods::monthly_rate;

const SAFE_WITHDRAWAL_RATE: f64 = 0.04;
const CLOSE_SHORTFALL_SHARE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetirementInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    /// Percent per year.
    pub expected_return: f64,
    /// Today's money.
    pub desired_annual_income: f64,
    /// Percent per year.
    pub inflation_rate: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetirementStatus {
    OnTrack,
    Close,
    NeedsAdjustment,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementProjection {
    pub years_to_retirement: u32,
    pub retirement_years: u32,
    pub total_at_retirement: f64,
    pub adjusted_desired_income: f64,
    pub total_needed: f64,
    pub shortfall: f64,
    pub sustainable_annual_withdrawal: f64,
    pub sustainable_monthly_withdrawal: f64,
    pub total_contributions: f64,
    pub interest_earned: f64,
    pub status: RetirementStatus,
}

/// Closed-form savings projection to retirement, judged against inflation-adjusted
/// income needs and the 4% withdrawal rule. Ages out of order count as zero years.
pub fn project_retirement(inputs: &RetirementInputs) -> RetirementProjection {
    let years_to_retirement = inputs.retirement_age.saturating_sub(inputs.current_age);
    let retirement_years = inputs.life_expectancy.saturating_sub(inputs.retirement_age);
    let months = years_to_retirement.saturating_mul(12);

    let total_at_retirement = future_value(
        inputs.current_savings,
        inputs.monthly_contribution,
        monthly_rate(inputs.expected_return),
        months,
    );

    let inflation_multiplier = (1.0 + inputs.inflation_rate / 100.0).powf(years_to_retirement as f64);
    let adjusted_desired_income = inputs.desired_annual_income * inflation_multiplier;
    let total_needed = adjusted_desired_income * retirement_years as f64;
    let shortfall = total_needed - total_at_retirement;

    let sustainable_annual_withdrawal = total_at_retirement * SAFE_WITHDRAWAL_RATE;
    let total_contributions = inputs.current_savings + inputs.monthly_contribution * months as f64;

    let status = if shortfall <= 0.0 {
        RetirementStatus::OnTrack
    } else if shortfall < total_at_retirement * CLOSE_SHORTFALL_SHARE {
        RetirementStatus::Close
    } else {
        RetirementStatus::NeedsAdjustment
    };

    RetirementProjection {
        years_to_retirement,
        retirement_years,
        total_at_retirement,
        adjusted_desired_income,
        total_needed,
        shortfall,
        sustainable_annual_withdrawal,
        sustainable_monthly_withdrawal: sustainable_annual_withdrawal / 12.0,
        total_contributions,
        interest_earned: total_at_retirement - total_contributions,
        status,
    }
}
