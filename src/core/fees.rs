use serde::{Deserialize, Serialize};

/// A fund's cost structure. Every rate is an annual percentage except `load_fee`,
/// which is charged on each amount invested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeScenario {
    pub name: String,
    pub annual_fee_rate: f64,
    pub return_rate: f64,
    #[serde(default)]
    pub trading_fee: f64,
    #[serde(default)]
    pub management_fee: f64,
    #[serde(default)]
    pub load_fee: f64,
}

impl FeeScenario {
    pub fn total_annual_fee_rate(&self) -> f64 {
        self.annual_fee_rate + self.trading_fee + self.management_fee
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeYear {
    pub year: u32,
    pub total_value: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub total_fees: f64,
    pub fees_this_year: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeDrag {
    pub fee_gap: f64,
    pub actual_extra_return: f64,
    pub break_even_return: f64,
    pub final_value_difference: f64,
    pub outperforms_baseline: bool,
}

pub fn default_fee_scenarios() -> Vec<FeeScenario> {
    let fund = |name: &str, annual_fee_rate: f64, return_rate: f64, load_fee: f64| FeeScenario {
        name: name.to_string(),
        annual_fee_rate,
        return_rate,
        trading_fee: 0.0,
        management_fee: 0.0,
        load_fee,
    };
    vec![
        fund("Index Fund/ETF", 0.10, 7.0, 0.0),
        fund("Target Date/Balanced Fund", 0.40, 7.0, 0.0),
        fund("Actively Managed Fund", 0.77, 7.0, 4.0),
        fund("Poor Performing Fund", 1.2, 3.0, 5.0),
        fund("Market Downturn Fund", 0.85, -2.0, 3.0),
    ]
}

/// Year-by-year value of a plan under a fund's fees, years `0..=years`.
///
/// Each month the contribution goes in net of load, the balance grows at the
/// monthly return, and one twelfth of the annual fee comes off the grown value.
pub fn fee_impact(
    scenario: &FeeScenario,
    principal: f64,
    monthly_contribution: f64,
    years: u32,
) -> Vec<FeeYear> {
    let monthly_return = scenario.return_rate / 100.0 / 12.0;
    let monthly_fee_rate = scenario.total_annual_fee_rate() / 100.0 / 12.0;
    let load_rate = scenario.load_fee / 100.0;

    let initial_load_fee = principal * load_rate;
    let mut value = principal - initial_load_fee;
    let mut total_contributions = principal;
    let mut total_fees = initial_load_fee;

    let mut rows = Vec::with_capacity(years as usize + 1);
    rows.push(FeeYear {
        year: 0,
        total_value: value,
        total_contributions,
        total_interest: 0.0,
        total_fees,
        fees_this_year: initial_load_fee,
    });

    for year in 1..=years {
        let mut fees_this_year = 0.0;
        for _ in 0..12 {
            let load = monthly_contribution * load_rate;
            value += monthly_contribution - load;
            total_contributions += monthly_contribution;

            value *= 1.0 + monthly_return;

            let fee = value * monthly_fee_rate;
            value -= fee;

            fees_this_year += load + fee;
            total_fees += load + fee;
        }

        rows.push(FeeYear {
            year,
            total_value: value,
            total_contributions,
            total_interest: value - total_contributions,
            total_fees,
            fees_this_year,
        });
    }
    rows
}

pub fn fee_drag(
    baseline: &FeeScenario,
    baseline_rows: &[FeeYear],
    candidate: &FeeScenario,
    candidate_rows: &[FeeYear],
) -> FeeDrag {
    let fee_gap = candidate.total_annual_fee_rate() - baseline.total_annual_fee_rate();
    let final_value = |rows: &[FeeYear]| rows.last().map(|row| row.total_value).unwrap_or(0.0);
    let final_value_difference = final_value(candidate_rows) - final_value(baseline_rows);

    FeeDrag {
        fee_gap,
        actual_extra_return: candidate.return_rate - baseline.return_rate,
        break_even_return: baseline.return_rate + fee_gap,
        final_value_difference,
        outperforms_baseline: final_value_difference > 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn no_fee_fund(return_rate: f64) -> FeeScenario {
        FeeScenario {
            name: "Free".to_string(),
            annual_fee_rate: 0.0,
            return_rate,
            trading_fee: 0.0,
            management_fee: 0.0,
            load_fee: 0.0,
        }
    }

    #[test]
    fn fee_free_fund_grows_with_contributions_at_start_of_month() {
        let rows = fee_impact(&no_fee_fund(12.0), 1_000.0, 100.0, 1);
        assert_eq!(rows.len(), 2);

        let r: f64 = 0.01;
        let growth = (1.0 + r).powi(12);
        let expected = 1_000.0 * growth + 100.0 * (1.0 + r) * (growth - 1.0) / r;
        assert_close(rows[1].total_value, expected, 1e-6);
        assert_eq!(rows[1].total_fees, 0.0);
        assert_eq!(rows[1].total_contributions, 2_200.0);
    }

    #[test]
    fn initial_load_fee_is_charged_at_year_zero() {
        let mut fund = no_fee_fund(0.0);
        fund.load_fee = 5.0;
        let rows = fee_impact(&fund, 10_000.0, 1_000.0, 1);

        assert_eq!(rows[0].total_value, 9_500.0);
        assert_eq!(rows[0].fees_this_year, 500.0);
        assert_close(rows[1].fees_this_year, 600.0, 1e-9);
        assert_close(rows[1].total_fees, 1_100.0, 1e-9);
        assert_close(rows[1].total_value, 9_500.0 + 12.0 * 950.0, 1e-9);
    }

    #[test]
    fn annual_fees_accumulate_and_reduce_value() {
        let scenarios = default_fee_scenarios();
        let index = fee_impact(&scenarios[0], 100_000.0, 1_000.0, 30);
        let active = fee_impact(&scenarios[2], 100_000.0, 1_000.0, 30);

        assert_eq!(index.len(), 31);
        assert!(active.last().unwrap().total_value < index.last().unwrap().total_value);
        assert!(active.last().unwrap().total_fees > index.last().unwrap().total_fees);

        for pair in index.windows(2) {
            assert!(pair[1].total_fees >= pair[0].total_fees);
        }
    }

    #[test]
    fn fee_drag_reports_break_even_return() {
        let scenarios = default_fee_scenarios();
        let baseline = &scenarios[0];
        let candidate = &scenarios[2];
        let baseline_rows = fee_impact(baseline, 100_000.0, 1_000.0, 30);
        let candidate_rows = fee_impact(candidate, 100_000.0, 1_000.0, 30);

        let drag = fee_drag(baseline, &baseline_rows, candidate, &candidate_rows);
        assert_close(drag.fee_gap, 0.67, 1e-12);
        assert_close(drag.break_even_return, 7.67, 1e-12);
        assert_eq!(drag.actual_extra_return, 0.0);
        assert!(!drag.outperforms_baseline);
        assert!(drag.final_value_difference < 0.0);
    }

    #[test]
    fn downturn_fund_loses_money() {
        let scenarios = default_fee_scenarios();
        let rows = fee_impact(&scenarios[4], 100_000.0, 1_000.0, 10);
        let last = rows.last().unwrap();
        assert!(last.total_interest < 0.0);
    }
}
