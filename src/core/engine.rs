use super::periods::build_periods;
use super::types::{
    CalculationResult, CompoundingHistory, CompoundingSummary, Period, ScenarioSettings,
};

/// Folds the periods over the starting balance: interest on the opening balance,
/// then the contribution, then the withdrawal.
///
/// Nothing is clamped or validated. Balances may go negative and negative rates
/// produce negative interest. An empty sequence leaves the principal untouched.
pub fn calculate(initial_principal: f64, periods: &[Period]) -> CompoundingHistory {
    let mut balance = initial_principal;
    let mut total_interest = 0.0;
    let mut total_contributions = 0.0;
    let mut total_withdrawals = 0.0;

    let mut results = Vec::with_capacity(periods.len());
    for period in periods {
        let interest = balance * period.interest_rate;
        let next_balance = balance + interest + period.contribution - period.withdrawal;

        total_interest += interest;
        total_contributions += period.contribution;
        total_withdrawals += period.withdrawal;

        results.push(CalculationResult {
            opening_balance: balance,
            balance: next_balance,
            interest,
            contribution: period.contribution,
            withdrawal: period.withdrawal,
            net_change: next_balance - balance,
        });

        balance = next_balance;
    }

    CompoundingHistory {
        periods: results,
        summary: CompoundingSummary {
            total_interest,
            total_contributions,
            total_withdrawals,
            final_balance: balance,
        },
    }
}

pub fn project_scenario(settings: &ScenarioSettings) -> CompoundingHistory {
    calculate(settings.principal, &build_periods(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::closed_form::annuity_factor;
    use crate::core::periods::{fixed_periods, varying_periods};
    use crate::core::types::{ContributionChange, EarlyWithdrawal};
    use approx::assert_relative_eq;
    use proptest::collection::vec;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn baseline() -> ScenarioSettings {
        ScenarioSettings {
            principal: 10_000.0,
            monthly_contribution: 500.0,
            annual_rate: 7.0,
            years: 30,
            early_withdrawal: None,
            contribution_changes: Vec::new(),
        }
    }

    fn assert_totals_consistent(history: &CompoundingHistory, initial_principal: f64) {
        let mut interest = 0.0;
        let mut contributions = 0.0;
        let mut withdrawals = 0.0;
        for row in &history.periods {
            interest += row.interest;
            contributions += row.contribution;
            withdrawals += row.withdrawal;
        }
        assert_eq!(history.summary.total_interest, interest);
        assert_eq!(history.summary.total_contributions, contributions);
        assert_eq!(history.summary.total_withdrawals, withdrawals);
        let expected_final = history
            .periods
            .last()
            .map(|row| row.balance)
            .unwrap_or(initial_principal);
        assert_eq!(history.summary.final_balance, expected_final);
    }

    #[test]
    fn single_period_applies_interest_before_cashflows() {
        let periods = [Period {
            interest_rate: 0.01,
            contribution: 100.0,
            withdrawal: 40.0,
        }];
        let history = calculate(1_000.0, &periods);
        let row = history.periods[0];
        assert_approx(row.interest, 10.0);
        assert_approx(row.balance, 1_070.0);
        assert_approx(row.net_change, 70.0);
        assert_eq!(row.opening_balance, 1_000.0);
    }

    #[test]
    fn one_year_at_five_percent_matches_hand_fold() {
        let periods = fixed_periods(12, 0.05, 500.0, 0.0);
        let history = calculate(10_000.0, &periods);

        let r: f64 = 0.05 / 12.0;
        let expected = 10_000.0 * (1.0 + r).powi(12) + 500.0 * ((1.0 + r).powi(12) - 1.0) / r;
        assert_relative_eq!(history.summary.final_balance, expected, max_relative = 1e-12);
        assert_eq!(history.summary.total_contributions, 6_000.0);
        assert_totals_consistent(&history, 10_000.0);
    }

    #[test]
    fn baseline_scenario_matches_annuity_formula() {
        let history = project_scenario(&baseline());
        assert_eq!(history.periods.len(), 360);

        let r = 0.07 / 12.0;
        let growth = (1.0_f64 + r).powi(360);
        let expected = 10_000.0 * growth + 500.0 * annuity_factor(r, 360);
        assert_relative_eq!(history.summary.final_balance, expected, max_relative = 1e-9);
        assert!(history.summary.final_balance > 690_000.0);
        assert!(history.summary.final_balance < 692_000.0);
        assert_eq!(history.summary.total_contributions, 180_000.0);
        assert_eq!(history.summary.total_withdrawals, 0.0);
        assert_totals_consistent(&history, 10_000.0);
    }

    #[test]
    fn early_withdrawal_costs_more_than_its_face_value() {
        let base = project_scenario(&baseline());

        let mut settings = baseline();
        settings.early_withdrawal = Some(EarlyWithdrawal {
            year: 15,
            amount: 50_000.0,
        });
        let with_withdrawal = project_scenario(&settings);

        for (idx, row) in with_withdrawal.periods.iter().enumerate() {
            let expected = if idx + 1 == 180 { 50_000.0 } else { 0.0 };
            assert_eq!(row.withdrawal, expected);
        }
        assert_eq!(with_withdrawal.summary.total_withdrawals, 50_000.0);
        assert!(base.summary.final_balance - with_withdrawal.summary.final_balance > 50_000.0);
        assert_totals_consistent(&with_withdrawal, 10_000.0);
    }

    #[test]
    fn negative_rate_produces_unclamped_losses() {
        let mut settings = baseline();
        settings.annual_rate = -2.0;
        let history = project_scenario(&settings);

        assert!(history.periods.iter().all(|row| row.interest <= 0.0));
        assert!(history.summary.total_interest < 0.0);
        assert!(history.summary.final_balance < history.summary.total_contributions);
        assert_totals_consistent(&history, 10_000.0);
    }

    #[test]
    fn withdrawal_larger_than_balance_goes_negative() {
        let periods = varying_periods(3, 0.0, &[], &[0.0, 5_000.0]);
        let history = calculate(1_000.0, &periods);
        assert_eq!(history.periods[1].balance, -4_000.0);
        assert_eq!(history.summary.final_balance, -4_000.0);
    }

    #[test]
    fn empty_horizon_returns_principal_and_zero_totals() {
        let mut settings = baseline();
        settings.years = 0;
        let history = project_scenario(&settings);

        assert!(history.periods.is_empty());
        assert_eq!(history.summary.final_balance, 10_000.0);
        assert_eq!(history.summary.total_interest, 0.0);
        assert_eq!(history.summary.total_contributions, 0.0);
        assert_eq!(history.summary.total_withdrawals, 0.0);
    }

    #[test]
    fn contribution_change_raises_final_balance() {
        let base = project_scenario(&baseline());
        let mut settings = baseline();
        settings.contribution_changes = vec![ContributionChange {
            year: 20,
            new_amount: 1_000.0,
        }];
        let changed = project_scenario(&settings);

        assert_eq!(changed.summary.total_contributions, 19.0 * 12.0 * 500.0 + 11.0 * 12.0 * 1_000.0);
        assert!(changed.summary.final_balance > base.summary.final_balance);
    }

    #[test]
    fn nan_rate_propagates_without_panicking() {
        let periods = fixed_periods(2, f64::NAN, 10.0, 0.0);
        let history = calculate(100.0, &periods);
        assert!(history.summary.final_balance.is_nan());
        assert!(history.summary.total_interest.is_nan());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_summary_is_fold_over_periods(
            principal in -50_000i64..500_000,
            rows in vec((-300i32..300, 0u32..5_000, 0u32..5_000), 0..120),
        ) {
            let periods: Vec<Period> = rows
                .iter()
                .map(|&(rate_bp, contribution, withdrawal)| Period {
                    interest_rate: rate_bp as f64 / 10_000.0,
                    contribution: contribution as f64,
                    withdrawal: withdrawal as f64,
                })
                .collect();
            let principal = principal as f64;
            let history = calculate(principal, &periods);

            prop_assert_eq!(history.periods.len(), periods.len());
            assert_totals_consistent(&history, principal);

            for k in 1..history.periods.len() {
                prop_assert_eq!(history.periods[k].opening_balance, history.periods[k - 1].balance);
            }
            if let Some(first) = history.periods.first() {
                prop_assert_eq!(first.opening_balance, principal);
            }
            for (row, period) in history.periods.iter().zip(&periods) {
                prop_assert_eq!(row.contribution, period.contribution);
                prop_assert_eq!(row.withdrawal, period.withdrawal);
                prop_assert_eq!(row.net_change, row.balance - row.opening_balance);
            }
        }

        #[test]
        fn prop_zero_rate_is_plain_cash_arithmetic(
            principal in 0u32..1_000_000,
            rows in vec((0u32..10_000, 0u32..10_000), 0..240),
        ) {
            let contributions: Vec<f64> = rows.iter().map(|&(c, _)| c as f64).collect();
            let withdrawals: Vec<f64> = rows.iter().map(|&(_, w)| w as f64).collect();
            let periods = varying_periods(rows.len(), 0.0, &contributions, &withdrawals);
            let history = calculate(principal as f64, &periods);

            // Whole-dollar values stay exact in f64 at these magnitudes.
            let expected = principal as f64 + contributions.iter().sum::<f64>()
                - withdrawals.iter().sum::<f64>();
            prop_assert_eq!(history.summary.final_balance, expected);
            prop_assert!(history.periods.iter().all(|row| row.interest == 0.0));
        }
    }
}
