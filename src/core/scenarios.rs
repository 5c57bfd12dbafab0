use serde::Serialize;

use super::engine::project_scenario;
use super::rates::InterestRatePresets;
use super::rollup::yearly_rollup;
use super::types::{
    CompoundingSummary, ContributionChange, EarlyWithdrawal, ScenarioSettings, YearlyPoint,
};

const EXTRA_MONTHLY_CONTRIBUTION: f64 = 200.0;
const EARLY_WITHDRAWAL_AMOUNT: f64 = 50_000.0;
const CATCH_UP_MIN_YEAR: u32 = 20;
const CATCH_UP_LEAD_YEARS: u32 = 10;
const EARLIER_START_YEARS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedScenario {
    pub name: String,
    pub settings: ScenarioSettings,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub name: String,
    pub settings: ScenarioSettings,
    pub summary: CompoundingSummary,
    pub yearly: Vec<YearlyPoint>,
}

fn variant(
    name: &str,
    base: &ScenarioSettings,
    tweak: impl FnOnce(&mut ScenarioSettings),
) -> NamedScenario {
    let mut settings = base.clone();
    tweak(&mut settings);
    NamedScenario {
        name: name.to_string(),
        settings,
    }
}

/// The stock what-if variants offered next to a user's own plan.
pub fn preset_scenarios(
    base: &ScenarioSettings,
    presets: &InterestRatePresets,
) -> Vec<NamedScenario> {
    let withdrawal_year = (base.years / 2).max(1);
    let catch_up_year = CATCH_UP_MIN_YEAR.max(base.years.saturating_sub(CATCH_UP_LEAD_YEARS));

    vec![
        variant("Higher Contributions (+$200/mo)", base, |s| {
            s.monthly_contribution += EXTRA_MONTHLY_CONTRIBUTION;
        }),
        variant(
            &format!("Early Withdrawal ($50k at year {withdrawal_year})"),
            base,
            |s| {
                s.early_withdrawal = Some(EarlyWithdrawal {
                    year: withdrawal_year,
                    amount: EARLY_WITHDRAWAL_AMOUNT,
                });
            },
        ),
        variant(
            &format!("Late Catch-up (2x contributions after year {catch_up_year})"),
            base,
            |s| {
                s.contribution_changes = vec![ContributionChange {
                    year: catch_up_year,
                    new_amount: s.monthly_contribution * 2.0,
                }];
            },
        ),
        variant(
            &format!("Conservative Rate ({}%)", presets.conservative),
            base,
            |s| s.annual_rate = presets.conservative,
        ),
        variant("Start 10 Years Earlier", base, |s| {
            s.years += EARLIER_START_YEARS;
        }),
        variant(
            &format!("Optimistic Rate ({}%)", presets.optimistic),
            base,
            |s| s.annual_rate = presets.optimistic,
        ),
    ]
}

pub fn run_scenario(scenario: &NamedScenario) -> ScenarioOutcome {
    let history = project_scenario(&scenario.settings);
    let yearly = yearly_rollup(scenario.settings.principal, &history, scenario.settings.years);
    ScenarioOutcome {
        name: scenario.name.clone(),
        settings: scenario.settings.clone(),
        summary: history.summary,
        yearly,
    }
}

pub fn compare_scenarios(scenarios: &[NamedScenario]) -> Vec<ScenarioOutcome> {
    scenarios.iter().map(run_scenario).collect()
}
