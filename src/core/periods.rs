use super::types::{ContributionChange, Period, ScenarioSettings};

pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Expands scenario settings into one period per month.
///
/// The rate is constant over the horizon. A contribution change governs from its
/// year onward; when several apply, the greatest qualifying year wins (ties go to
/// the later entry). The early withdrawal lands on the last month of its year.
pub fn build_periods(settings: &ScenarioSettings) -> Vec<Period> {
    let interest_rate = monthly_rate(settings.annual_rate);
    let total_months = settings.total_months();

    let mut periods = Vec::with_capacity(total_months as usize);
    for month in 1..=total_months {
        let current_year = month.div_ceil(12);

        let contribution =
            active_contribution_change(&settings.contribution_changes, current_year)
                .map(|change| change.new_amount)
                .unwrap_or(settings.monthly_contribution);

        let withdrawal = match settings.early_withdrawal {
            Some(event) if event.year == current_year && month % 12 == 0 => {
                event.amount
            }
            _ => 0.0,
        };

        periods.push(Period {
            interest_rate,
            contribution,
            withdrawal,
        });
    }
    periods
}

fn active_contribution_change(
    changes: &[ContributionChange],
    current_year: u32,
) -> Option<&ContributionChange> {
    let mut active: Option<&ContributionChange> = None;
    for change in changes.iter().filter(|c| c.year <= current_year) {
        if active.is_none_or(|best| change.year >= best.year) {
            active = Some(change);
        }
    }
    active
}

/// `annual_rate` is a fraction here (0.05 for 5%), not a percentage.
pub fn fixed_periods(
    num_periods: usize,
    annual_rate: f64,
    contribution: f64,
    withdrawal: f64,
) -> Vec<Period> {
    vec![
        Period {
            interest_rate: annual_rate / 12.0,
            contribution,
            withdrawal,
        };
        num_periods
    ]
}

/// Missing schedule entries count as zero.
pub fn varying_periods(
    num_periods: usize,
    annual_rate: f64,
    contributions: &[f64],
    withdrawals: &[f64],
) -> Vec<Period> {
    (0..num_periods)
        .map(|idx| Period {
            interest_rate: annual_rate / 12.0,
            contribution: contributions.get(idx).copied().unwrap_or(0.0),
            withdrawal: withdrawals.get(idx).copied().unwrap_or(0.0),
        })
        .collect()
}
