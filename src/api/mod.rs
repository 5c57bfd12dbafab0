mod error;

pub use error::{CliError, ValidationError};

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::core::{
    CalculationResult, CompoundSummary, CompoundingSummary, ContributionChange, EarlyWithdrawal,
    FeeDrag, FeeScenario, FeeYear, Goal, GoalProgress, InterestRatePresets, NamedScenario,
    RetirementInputs, RetirementProjection, RiskProfile, ScenarioOutcome, ScenarioSettings,
    YearlyPoint, compare_scenarios, compound_summary, default_fee_scenarios, fee_drag, fee_impact,
    preset_scenarios, project_retirement, project_scenario, yearly_rollup,
};

const MAX_YEARS: u32 = 100;
const MAX_AGE: u32 = 150;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRiskProfile {
    Conservative,
    ModeratelyConservative,
    Moderate,
    ModeratelyAggressive,
    Aggressive,
}

impl From<CliRiskProfile> for RiskProfile {
    fn from(value: CliRiskProfile) -> Self {
        match value {
            CliRiskProfile::Conservative => RiskProfile::Conservative,
            CliRiskProfile::ModeratelyConservative => RiskProfile::ModeratelyConservative,
            CliRiskProfile::Moderate => RiskProfile::Moderate,
            CliRiskProfile::ModeratelyAggressive => RiskProfile::ModeratelyAggressive,
            CliRiskProfile::Aggressive => RiskProfile::Aggressive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiRiskProfile {
    #[serde(alias = "Conservative")]
    Conservative,
    #[serde(
        alias = "moderatelyConservative",
        alias = "moderately_conservative",
        alias = "Moderately Conservative"
    )]
    ModeratelyConservative,
    #[serde(alias = "Moderate")]
    Moderate,
    #[serde(
        alias = "moderatelyAggressive",
        alias = "moderately_aggressive",
        alias = "Moderately Aggressive"
    )]
    ModeratelyAggressive,
    #[serde(alias = "Aggressive")]
    Aggressive,
}

impl From<ApiRiskProfile> for CliRiskProfile {
    fn from(value: ApiRiskProfile) -> Self {
        match value {
            ApiRiskProfile::Conservative => CliRiskProfile::Conservative,
            ApiRiskProfile::ModeratelyConservative => CliRiskProfile::ModeratelyConservative,
            ApiRiskProfile::Moderate => CliRiskProfile::Moderate,
            ApiRiskProfile::ModeratelyAggressive => CliRiskProfile::ModeratelyAggressive,
            ApiRiskProfile::Aggressive => CliRiskProfile::Aggressive,
        }
    }
}

impl From<ApiRiskProfile> for RiskProfile {
    fn from(value: ApiRiskProfile) -> Self {
        CliRiskProfile::from(value).into()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScenarioPayload {
    principal: Option<f64>,
    monthly_contribution: Option<f64>,
    annual_rate: Option<f64>,
    risk_profile: Option<ApiRiskProfile>,
    years: Option<u32>,
    withdrawal_year: Option<u32>,
    withdrawal_amount: Option<f64>,
    contribution_changes: Option<Vec<ContributionChange>>,
    include_periods: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FeesPayload {
    principal: Option<f64>,
    monthly_contribution: Option<f64>,
    years: Option<u32>,
    funds: Option<Vec<FeeScenario>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RetirementPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    life_expectancy: Option<u32>,
    current_savings: Option<f64>,
    monthly_contribution: Option<f64>,
    expected_return: Option<f64>,
    risk_profile: Option<ApiRiskProfile>,
    desired_retirement_income: Option<f64>,
    inflation_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RatesQuery {
    risk_profile: Option<ApiRiskProfile>,
    conservative: Option<f64>,
    average: Option<f64>,
    optimistic: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalPayload {
    name: String,
    target_amount: f64,
    #[serde(default)]
    contributions: Vec<f64>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "compound",
    about = "Monthly compound interest projector (contributions, one-off withdrawal, contribution changes)"
)]
struct Cli {
    #[arg(long, default_value_t = 10_000.0, help = "Starting balance")]
    principal: f64,
    #[arg(long, default_value_t = 500.0)]
    monthly_contribution: f64,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Expected annual return in percent, e.g. 7; defaults to the risk profile's recommended rate"
    )]
    annual_rate: Option<f64>,
    #[arg(
        long,
        value_enum,
        help = "Risk profile used to pick the annual rate when --annual-rate is absent"
    )]
    risk_profile: Option<CliRiskProfile>,
    #[arg(long, default_value_t = 30, help = "Investment horizon in whole years")]
    years: u32,
    #[arg(long, help = "Year whose final month carries the one-off withdrawal")]
    withdrawal_year: Option<u32>,
    #[arg(long, help = "One-off withdrawal amount")]
    withdrawal_amount: Option<f64>,
    #[arg(
        long = "contribution-change",
        value_parser = parse_contribution_change,
        help = "New monthly contribution from a given year on, as YEAR:AMOUNT (repeatable)"
    )]
    contribution_changes: Vec<ContributionChange>,
    #[arg(long, help = "Include the month-by-month trajectory in the output")]
    include_periods: bool,
}

#[derive(Debug)]
struct ScenarioRequest {
    settings: ScenarioSettings,
    include_periods: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioResponse {
    settings: ScenarioSettings,
    summary: CompoundingSummary,
    /// Present only for plans without one-off events, where the closed form applies.
    closed_form: Option<CompoundSummary>,
    yearly: Vec<YearlyPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    periods: Option<Vec<CalculationResult>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    scenarios: Vec<ScenarioOutcome>,
}

#[derive(Debug)]
struct FeesRequest {
    principal: f64,
    monthly_contribution: f64,
    years: u32,
    funds: Vec<FeeScenario>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FundResult {
    fund: FeeScenario,
    years: Vec<FeeYear>,
    drag_vs_baseline: Option<FeeDrag>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeesResponse {
    principal: f64,
    monthly_contribution: f64,
    years: u32,
    funds: Vec<FundResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RatesResponse {
    presets: InterestRatePresets,
    risk_profile: Option<ApiRiskProfile>,
    recommended_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalResponse {
    goal: Goal,
    progress: GoalProgress,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn parse_contribution_change(raw: &str) -> Result<ContributionChange, ValidationError> {
    let malformed = || ValidationError::MalformedChange(raw.to_string());
    let (year, amount) = raw.split_once(':').ok_or_else(malformed)?;
    Ok(ContributionChange {
        year: year.trim().parse().map_err(|_| malformed())?,
        new_amount: amount.trim().parse().map_err(|_| malformed())?,
    })
}

fn check_money(flag: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::out_of_range(flag, ">= 0"));
    }
    Ok(())
}

fn check_rate(flag: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= -100.0 {
        return Err(ValidationError::out_of_range(flag, "> -100"));
    }
    Ok(())
}

fn check_years(flag: &'static str, years: u32) -> Result<(), ValidationError> {
    if !(1..=MAX_YEARS).contains(&years) {
        return Err(ValidationError::out_of_range(
            flag,
            format!("between 1 and {MAX_YEARS}"),
        ));
    }
    Ok(())
}

fn check_age(field: &'static str, age: u32) -> Result<(), ValidationError> {
    if age > MAX_AGE {
        return Err(ValidationError::out_of_range(field, format!("<= {MAX_AGE}")));
    }
    Ok(())
}

fn build_settings(cli: Cli) -> Result<ScenarioSettings, ValidationError> {
    check_money("--principal", cli.principal)?;
    check_money("--monthly-contribution", cli.monthly_contribution)?;
    check_years("--years", cli.years)?;

    let annual_rate = cli.annual_rate.unwrap_or_else(|| {
        InterestRatePresets::default().recommended_rate(cli.risk_profile.map(Into::into))
    });
    check_rate("--annual-rate", annual_rate)?;

    let early_withdrawal = match (cli.withdrawal_year, cli.withdrawal_amount) {
        (None, None) => None,
        (Some(_), None) => {
            return Err(ValidationError::MissingCompanion {
                flag: "--withdrawal-amount",
                other: "--withdrawal-year",
            });
        }
        (None, Some(_)) => {
            return Err(ValidationError::MissingCompanion {
                flag: "--withdrawal-year",
                other: "--withdrawal-amount",
            });
        }
        (Some(year), Some(amount)) => {
            if !(1..=cli.years).contains(&year) {
                return Err(ValidationError::out_of_range(
                    "--withdrawal-year",
                    format!("between 1 and --years ({})", cli.years),
                ));
            }
            check_money("--withdrawal-amount", amount)?;
            Some(EarlyWithdrawal { year, amount })
        }
    };

    let mut seen_years = BTreeSet::new();
    for change in &cli.contribution_changes {
        if !(1..=cli.years).contains(&change.year) {
            return Err(ValidationError::out_of_range(
                "--contribution-change year",
                format!("between 1 and --years ({})", cli.years),
            ));
        }
        check_money("--contribution-change amount", change.new_amount)?;
        if !seen_years.insert(change.year) {
            return Err(ValidationError::DuplicateChangeYear(change.year));
        }
    }

    Ok(ScenarioSettings {
        principal: cli.principal,
        monthly_contribution: cli.monthly_contribution,
        annual_rate,
        years: cli.years,
        early_withdrawal,
        contribution_changes: cli.contribution_changes,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        principal: 10_000.0,
        monthly_contribution: 500.0,
        annual_rate: None,
        risk_profile: None,
        years: 30,
        withdrawal_year: None,
        withdrawal_amount: None,
        contribution_changes: Vec::new(),
        include_periods: false,
    }
}

fn scenario_request_from_payload(
    payload: ScenarioPayload,
) -> Result<ScenarioRequest, ValidationError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.principal {
        cli.principal = v;
    }
    if let Some(v) = payload.monthly_contribution {
        cli.monthly_contribution = v;
    }
    if let Some(v) = payload.annual_rate {
        cli.annual_rate = Some(v);
    }
    if let Some(v) = payload.risk_profile {
        cli.risk_profile = Some(v.into());
    }
    if let Some(v) = payload.years {
        cli.years = v;
    }
    if let Some(v) = payload.withdrawal_year {
        cli.withdrawal_year = Some(v);
    }
    if let Some(v) = payload.withdrawal_amount {
        cli.withdrawal_amount = Some(v);
    }
    if let Some(v) = payload.contribution_changes {
        cli.contribution_changes = v;
    }
    if let Some(v) = payload.include_periods {
        cli.include_periods = v;
    }

    let include_periods = cli.include_periods;
    let settings = build_settings(cli)?;
    Ok(ScenarioRequest {
        settings,
        include_periods,
    })
}

fn fees_request_from_payload(payload: FeesPayload) -> Result<FeesRequest, ValidationError> {
    let request = FeesRequest {
        principal: payload.principal.unwrap_or(100_000.0),
        monthly_contribution: payload.monthly_contribution.unwrap_or(1_000.0),
        years: payload.years.unwrap_or(30),
        funds: payload.funds.unwrap_or_else(default_fee_scenarios),
    };

    check_money("principal", request.principal)?;
    check_money("monthlyContribution", request.monthly_contribution)?;
    check_years("years", request.years)?;
    if request.funds.is_empty() {
        return Err(ValidationError::out_of_range("funds", "non-empty"));
    }
    for fund in &request.funds {
        for (flag, fee) in [
            ("funds[].annualFeeRate", fund.annual_fee_rate),
            ("funds[].tradingFee", fund.trading_fee),
            ("funds[].managementFee", fund.management_fee),
            ("funds[].loadFee", fund.load_fee),
        ] {
            if !(0.0..=100.0).contains(&fee) {
                return Err(ValidationError::out_of_range(flag, "between 0 and 100"));
            }
        }
        check_rate("funds[].returnRate", fund.return_rate)?;
    }
    Ok(request)
}

fn retirement_inputs_from_payload(
    payload: RetirementPayload,
) -> Result<RetirementInputs, ValidationError> {
    let expected_return = payload.expected_return.unwrap_or_else(|| {
        InterestRatePresets::default().recommended_rate(payload.risk_profile.map(Into::into))
    });
    let inputs = RetirementInputs {
        current_age: payload.current_age.unwrap_or(30),
        retirement_age: payload.retirement_age.unwrap_or(65),
        life_expectancy: payload.life_expectancy.unwrap_or(85),
        current_savings: payload.current_savings.unwrap_or(50_000.0),
        monthly_contribution: payload.monthly_contribution.unwrap_or(1_000.0),
        expected_return,
        desired_annual_income: payload.desired_retirement_income.unwrap_or(80_000.0),
        inflation_rate: payload.inflation_rate.unwrap_or(3.0),
    };

    check_age("currentAge", inputs.current_age)?;
    check_age("retirementAge", inputs.retirement_age)?;
    check_age("lifeExpectancy", inputs.life_expectancy)?;
    if inputs.retirement_age <= inputs.current_age {
        return Err(ValidationError::out_of_range("retirementAge", "> currentAge"));
    }
    if inputs.life_expectancy <= inputs.retirement_age {
        return Err(ValidationError::out_of_range("lifeExpectancy", "> retirementAge"));
    }
    check_money("currentSavings", inputs.current_savings)?;
    check_money("monthlyContribution", inputs.monthly_contribution)?;
    check_money("desiredRetirementIncome", inputs.desired_annual_income)?;
    check_rate("expectedReturn", inputs.expected_return)?;
    check_rate("inflationRate", inputs.inflation_rate)?;
    Ok(inputs)
}

fn presets_from_query(query: &RatesQuery) -> Result<InterestRatePresets, ValidationError> {
    let defaults = InterestRatePresets::default();
    let presets = InterestRatePresets {
        conservative: query.conservative.unwrap_or(defaults.conservative),
        average: query.average.unwrap_or(defaults.average),
        optimistic: query.optimistic.unwrap_or(defaults.optimistic),
    };
    check_rate("conservative", presets.conservative)?;
    check_rate("average", presets.average)?;
    check_rate("optimistic", presets.optimistic)?;
    Ok(presets)
}

fn goal_from_payload(payload: GoalPayload) -> Result<Goal, ValidationError> {
    if !payload.target_amount.is_finite() || payload.target_amount <= 0.0 {
        return Err(ValidationError::out_of_range("targetAmount", "> 0"));
    }
    if payload.contributions.iter().any(|amount| !amount.is_finite()) {
        return Err(ValidationError::out_of_range("contributions", "finite"));
    }

    let mut goal = Goal::new(payload.name, payload.target_amount);
    for amount in payload.contributions {
        goal.add_contribution(amount);
    }
    Ok(goal)
}

fn build_scenario_response(request: &ScenarioRequest) -> ScenarioResponse {
    let settings = &request.settings;
    let history = project_scenario(settings);
    let yearly = yearly_rollup(settings.principal, &history, settings.years)
        .into_iter()
        .map(YearlyPoint::for_display)
        .collect();
    let closed_form = (settings.early_withdrawal.is_none() && settings.contribution_changes.is_empty())
        .then(|| {
            compound_summary(
                settings.principal,
                settings.monthly_contribution,
                settings.annual_rate,
                settings.years,
            )
        });

    ScenarioResponse {
        settings: settings.clone(),
        summary: history.summary,
        closed_form,
        yearly,
        periods: request.include_periods.then_some(history.periods),
    }
}

fn build_compare_response(settings: &ScenarioSettings) -> CompareResponse {
    let mut scenarios = vec![NamedScenario {
        name: "Current Plan".to_string(),
        settings: settings.clone(),
    }];
    scenarios.extend(preset_scenarios(settings, &InterestRatePresets::default()));

    let scenarios = compare_scenarios(&scenarios)
        .into_iter()
        .map(|mut outcome| {
            outcome.yearly = outcome.yearly.into_iter().map(YearlyPoint::for_display).collect();
            outcome
        })
        .collect();
    CompareResponse { scenarios }
}

fn build_fees_response(request: FeesRequest) -> FeesResponse {
    let rows: Vec<Vec<FeeYear>> = request
        .funds
        .iter()
        .map(|fund| {
            fee_impact(
                fund,
                request.principal,
                request.monthly_contribution,
                request.years,
            )
        })
        .collect();

    let funds = request
        .funds
        .iter()
        .zip(&rows)
        .enumerate()
        .map(|(idx, (fund, years))| FundResult {
            fund: fund.clone(),
            years: years.clone(),
            drag_vs_baseline: (idx > 0)
                .then(|| fee_drag(&request.funds[0], &rows[0], fund, years)),
        })
        .collect();

    FeesResponse {
        principal: request.principal,
        monthly_contribution: request.monthly_contribution,
        years: request.years,
        funds,
    }
}

/// Logs go to stderr so CLI output on stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parses CLI flags, projects the scenario, and prints it as JSON.
pub fn run_cli<I, T>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let include_periods = cli.include_periods;
    let settings = build_settings(cli)?;
    let request = ScenarioRequest {
        settings,
        include_periods,
    };

    let response = build_scenario_response(&request);
    tracing::info!(
        years = request.settings.years,
        final_balance = response.summary.final_balance,
        "scenario projected"
    );
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/scenario",
            get(scenario_get_handler).post(scenario_post_handler),
        )
        .route(
            "/api/compare",
            get(compare_get_handler).post(compare_post_handler),
        )
        .route("/api/fees", get(fees_get_handler).post(fees_post_handler))
        .route(
            "/api/retirement",
            get(retirement_get_handler).post(retirement_post_handler),
        )
        .route("/api/rates", get(rates_handler))
        .route("/api/goals/progress", post(goal_progress_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "compound HTTP API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/api/scenario");

    axum::serve(listener, router()).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn scenario_get_handler(Query(payload): Query<ScenarioPayload>) -> Response {
    scenario_handler_impl(payload).await
}

async fn scenario_post_handler(Json(payload): Json<ScenarioPayload>) -> Response {
    scenario_handler_impl(payload).await
}

async fn scenario_handler_impl(payload: ScenarioPayload) -> Response {
    let request = match scenario_request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(%err, "rejected scenario request");
            return err.into_response();
        }
    };

    let response = build_scenario_response(&request);
    let summary = response.summary;
    if summary.final_balance < 0.0 {
        tracing::warn!(
            final_balance = summary.final_balance,
            total_withdrawals = summary.total_withdrawals,
            "projection ends below zero"
        );
    }
    tracing::info!(
        years = request.settings.years,
        annual_rate = request.settings.annual_rate,
        final_balance = summary.final_balance,
        "scenario projected"
    );
    json_response(StatusCode::OK, response)
}

async fn compare_get_handler(Query(payload): Query<ScenarioPayload>) -> Response {
    compare_handler_impl(payload).await
}

async fn compare_post_handler(Json(payload): Json<ScenarioPayload>) -> Response {
    compare_handler_impl(payload).await
}

async fn compare_handler_impl(payload: ScenarioPayload) -> Response {
    let request = match scenario_request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(%err, "rejected comparison request");
            return err.into_response();
        }
    };

    let response = build_compare_response(&request.settings);
    tracing::info!(scenarios = response.scenarios.len(), "scenarios compared");
    json_response(StatusCode::OK, response)
}

async fn fees_get_handler(Query(payload): Query<FeesPayload>) -> Response {
    fees_handler_impl(payload).await
}

async fn fees_post_handler(Json(payload): Json<FeesPayload>) -> Response {
    fees_handler_impl(payload).await
}

async fn fees_handler_impl(payload: FeesPayload) -> Response {
    let request = match fees_request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(%err, "rejected fee request");
            return err.into_response();
        }
    };

    tracing::info!(funds = request.funds.len(), years = request.years, "fee impact computed");
    json_response(StatusCode::OK, build_fees_response(request))
}

async fn retirement_get_handler(Query(payload): Query<RetirementPayload>) -> Response {
    retirement_handler_impl(payload).await
}

async fn retirement_post_handler(Json(payload): Json<RetirementPayload>) -> Response {
    retirement_handler_impl(payload).await
}

async fn retirement_handler_impl(payload: RetirementPayload) -> Response {
    let inputs = match retirement_inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(err) => {
            tracing::warn!(%err, "rejected retirement request");
            return err.into_response();
        }
    };

    let projection: RetirementProjection = project_retirement(&inputs);
    tracing::info!(status = ?projection.status, shortfall = projection.shortfall, "retirement projected");
    json_response(StatusCode::OK, projection)
}

async fn rates_handler(Query(query): Query<RatesQuery>) -> Response {
    let presets = match presets_from_query(&query) {
        Ok(presets) => presets,
        Err(err) => {
            tracing::warn!(%err, "rejected rates request");
            return err.into_response();
        }
    };

    let recommended_rate = presets.recommended_rate(query.risk_profile.map(Into::into));
    tracing::info!(risk_profile = ?query.risk_profile, recommended_rate, "rates served");
    json_response(
        StatusCode::OK,
        RatesResponse {
            presets,
            risk_profile: query.risk_profile,
            recommended_rate,
        },
    )
}

async fn goal_progress_handler(Json(payload): Json<GoalPayload>) -> Response {
    let goal = match goal_from_payload(payload) {
        Ok(goal) => goal,
        Err(err) => {
            tracing::warn!(%err, "rejected goal request");
            return err.into_response();
        }
    };

    let progress = goal.progress();
    tracing::info!(
        progress = progress.progress_percentage,
        completed = progress.completed,
        "goal progress computed"
    );
    json_response(StatusCode::OK, GoalResponse { goal, progress })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn scenario_request_from_json(json: &str) -> Result<ScenarioRequest, String> {
    let payload = serde_json::from_str::<ScenarioPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    scenario_request_from_payload(payload).map_err(|e| e.to_string())
}
