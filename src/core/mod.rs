mod closed_form;
mod engine;
mod fees;
mod goals;
mod periods;
mod rates;
mod retirement;
mod rollup;
mod scenarios;
mod types;

pub use closed_form::{CompoundSummary, annuity_factor, compound_summary, future_value};
pub use engine::{calculate, project_scenario};
pub use fees::{FeeDrag, FeeScenario, FeeYear, default_fee_scenarios, fee_drag, fee_impact};
pub use goals::{Goal, GoalProgress, MILESTONES};
pub use periods::{build_periods, fixed_periods, monthly_rate, varying_periods};
pub use rates::{InterestRatePresets, RiskProfile};
pub use retirement::{RetirementInputs, RetirementProjection, RetirementStatus, project_retirement};
pub use rollup::yearly_rollup;
pub use scenarios::{
    NamedScenario, ScenarioOutcome, compare_scenarios, preset_scenarios, run_scenario,
};
pub use types::{
    CalculationResult, CompoundingHistory, CompoundingSummary, ContributionChange,
    EarlyWithdrawal, Period, ScenarioSettings, YearlyPoint,
};
