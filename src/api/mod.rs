use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    Account, DEFAULT_ANNUAL_RETURN, DEFAULT_CURRENT_AGE, DEFAULT_LOAN_APR,
    DEFAULT_LOAN_TERM_YEARS, DEFAULT_TARGET_AGE, Plan, PlanInputs, build_plan, default_accounts,
};

mod error;

pub use error::RequestError;

pub const LOAN_APR_MIN: f64 = 3.0;
pub const LOAN_APR_MAX: f64 = 36.0;
pub const LOAN_TERM_YEARS_MIN: u32 = 1;
pub const LOAN_TERM_YEARS_MAX: u32 = 7;
pub const USER_AGE_MIN: u32 = 18;
pub const USER_AGE_MAX: u32 = 85;

/// One account as supplied on the command line or in a request body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountSpec {
    pub id: Option<String>,
    pub name: Option<String>,
    pub balance: f64,
    pub apr: f64,
    pub monthly_payment: Option<f64>,
}

/// Parses `BALANCE:APR` or `BALANCE:APR:PAYMENT`.
fn parse_account_spec(raw: &str) -> Result<AccountSpec, String> {
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(format!(
            "expected BALANCE:APR or BALANCE:APR:PAYMENT, got '{raw}'"
        ));
    }
    let number = |label: &str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|e| format!("invalid {label} '{value}': {e}"))
    };
    Ok(AccountSpec {
        id: None,
        name: None,
        balance: number("balance", parts[0])?,
        apr: number("apr", parts[1])?,
        monthly_payment: parts
            .get(2)
            .map(|value| number("payment", value))
            .transpose()?,
    })
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[arg(
        long = "account",
        value_parser = parse_account_spec,
        help = "Revolving account as BALANCE:APR[:PAYMENT]; repeat per account (defaults to 5000:22.99 and 3000:19.49)"
    )]
    pub accounts: Vec<AccountSpec>,
    #[arg(
        long,
        default_value_t = DEFAULT_LOAN_APR,
        help = "Consolidation loan APR in percent"
    )]
    pub loan_apr: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_LOAN_TERM_YEARS,
        help = "Consolidation loan term in years"
    )]
    pub loan_term_years: u32,
    #[arg(long, default_value_t = DEFAULT_CURRENT_AGE, help = "Current age")]
    pub user_age: u32,
    #[arg(
        long,
        default_value_t = DEFAULT_TARGET_AGE,
        help = "Age the freed cash flow is invested until"
    )]
    pub target_age: u32,
    #[arg(
        long,
        default_value_t = DEFAULT_ANNUAL_RETURN,
        help = "Expected annual investment return in percent"
    )]
    pub annual_return: f64,
}

impl Default for PlanArgs {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            loan_apr: DEFAULT_LOAN_APR,
            loan_term_years: DEFAULT_LOAN_TERM_YEARS,
            user_age: DEFAULT_CURRENT_AGE,
            target_age: DEFAULT_TARGET_AGE,
            annual_return: DEFAULT_ANNUAL_RETURN,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanPayload {
    accounts: Option<Vec<AccountSpec>>,
    loan_apr: Option<f64>,
    loan_term_years: Option<u32>,
    user_age: Option<u32>,
    target_age: Option<u32>,
    annual_return: Option<f64>,
}

/// Flat query-string variant of [`PlanPayload`]; always uses the default accounts.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanQuery {
    loan_apr: Option<f64>,
    loan_term_years: Option<u32>,
    user_age: Option<u32>,
    target_age: Option<u32>,
    annual_return: Option<f64>,
}

impl From<PlanQuery> for PlanPayload {
    fn from(query: PlanQuery) -> Self {
        Self {
            accounts: None,
            loan_apr: query.loan_apr,
            loan_term_years: query.loan_term_years,
            user_age: query.user_age,
            target_age: query.target_age,
            annual_return: query.annual_return,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResponse {
    loan_apr: f64,
    loan_term_years: u32,
    user_age: u32,
    target_age: u32,
    annual_return: f64,
    #[serde(flatten)]
    plan: Plan,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), RequestError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RequestError::field(field, "must be a finite number"))
    }
}

fn build_account(index: usize, spec: AccountSpec) -> Result<Account, RequestError> {
    if !spec.balance.is_finite() || spec.balance < 0.0 {
        return Err(RequestError::account(index, "balance must be >= 0"));
    }
    if !spec.apr.is_finite() || !(0.0..=100.0).contains(&spec.apr) {
        return Err(RequestError::account(index, "apr must be between 0 and 100"));
    }
    let payment = spec.monthly_payment.unwrap_or(0.0);
    if !payment.is_finite() || payment < 0.0 {
        return Err(RequestError::account(index, "monthly payment must be >= 0"));
    }

    let mut account = Account::new(
        spec.id.unwrap_or_else(|| format!("account-{}", index + 1)),
        spec.balance,
        spec.apr,
    )
    .with_payment(payment);
    account.name = spec.name.unwrap_or_default();
    Ok(account)
}

fn build_inputs(args: PlanArgs) -> Result<PlanInputs, RequestError> {
    ensure_finite("loanApr", args.loan_apr)?;
    if !(LOAN_APR_MIN..=LOAN_APR_MAX).contains(&args.loan_apr) {
        return Err(RequestError::field(
            "loanApr",
            format!("must be between {LOAN_APR_MIN} and {LOAN_APR_MAX}"),
        ));
    }

    if !(LOAN_TERM_YEARS_MIN..=LOAN_TERM_YEARS_MAX).contains(&args.loan_term_years) {
        return Err(RequestError::field(
            "loanTermYears",
            format!("must be between {LOAN_TERM_YEARS_MIN} and {LOAN_TERM_YEARS_MAX}"),
        ));
    }

    if !(USER_AGE_MIN..=USER_AGE_MAX).contains(&args.user_age) {
        return Err(RequestError::field(
            "userAge",
            format!("must be between {USER_AGE_MIN} and {USER_AGE_MAX}"),
        ));
    }

    if args.target_age <= args.user_age {
        return Err(RequestError::field("targetAge", "must be > userAge"));
    }

    // The web form only offers 6, 8, 10 and 12 percent; any return that compounds
    // to a finite balance is accepted here.
    ensure_finite("annualReturn", args.annual_return)?;
    if args.annual_return <= -100.0 || args.annual_return > 100.0 {
        return Err(RequestError::field(
            "annualReturn",
            "must be > -100 and <= 100",
        ));
    }

    let accounts = args
        .accounts
        .into_iter()
        .enumerate()
        .map(|(index, spec)| build_account(index, spec))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PlanInputs {
        accounts,
        loan_apr: args.loan_apr,
        loan_term_years: args.loan_term_years,
        current_age: args.user_age,
        target_age: args.target_age,
        annual_return: args.annual_return,
    })
}

/// Validates command-line arguments, falling back to the default accounts
/// when none were given.
fn inputs_from_args(args: PlanArgs) -> Result<PlanInputs, RequestError> {
    let use_defaults = args.accounts.is_empty();
    let mut inputs = build_inputs(args)?;
    if use_defaults {
        inputs.accounts = default_accounts();
    }
    Ok(inputs)
}

/// Computes the plan for command-line arguments and renders it as pretty JSON.
pub fn plan_report(args: PlanArgs) -> Result<String, RequestError> {
    let inputs = inputs_from_args(args)?;
    let response = build_plan_response(&inputs);
    Ok(serde_json::to_string_pretty(&response)?)
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<PlanInputs, RequestError> {
    let payload = serde_json::from_str::<PlanPayload>(json)?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: PlanPayload) -> Result<PlanInputs, RequestError> {
    let mut args = PlanArgs::default();
    let explicit_accounts = payload.accounts.is_some();

    if let Some(v) = payload.accounts {
        args.accounts = v;
    }
    if let Some(v) = payload.loan_apr {
        args.loan_apr = v;
    }
    if let Some(v) = payload.loan_term_years {
        args.loan_term_years = v;
    }
    if let Some(v) = payload.user_age {
        args.user_age = v;
    }
    if let Some(v) = payload.target_age {
        args.target_age = v;
    }
    if let Some(v) = payload.annual_return {
        args.annual_return = v;
    }

    let mut inputs = build_inputs(args)?;
    if !explicit_accounts {
        inputs.accounts = default_accounts();
    }
    Ok(inputs)
}

fn build_plan_response(inputs: &PlanInputs) -> PlanResponse {
    PlanResponse {
        loan_apr: inputs.loan_apr,
        loan_term_years: inputs.loan_term_years,
        user_age: inputs.current_age,
        target_age: inputs.target_age,
        annual_return: inputs.annual_return,
        plan: build_plan(inputs),
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/plan", get(plan_get_handler).post(plan_post_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "consolidation API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/api/plan");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn plan_get_handler(Query(query): Query<PlanQuery>) -> Response {
    plan_handler_impl(query.into())
}

async fn plan_post_handler(Json(payload): Json<PlanPayload>) -> Response {
    plan_handler_impl(payload)
}

fn plan_handler_impl(payload: PlanPayload) -> Response {
    let inputs = match api_request_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(e) => {
            tracing::warn!(error = %e, "rejected plan request");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    let response = build_plan_response(&inputs);
    tracing::debug!(
        accounts = response.plan.debt_summary.accounts.len(),
        saves_interest = response
            .plan
            .consolidation
            .as_ref()
            .is_some_and(|result| result.interest_saved > 0.0),
        capped = response.plan.debt_summary.capped,
        "computed plan"
    );
    json_response(StatusCode::OK, response)
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
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_args() -> PlanArgs {
        PlanArgs::default()
    }

    #[test]
    fn api_request_from_json_parses_web_keys() {
        let json = r#"{
          "accounts": [
            { "id": "visa", "name": "Visa", "balance": 4200, "apr": 24.5, "monthlyPayment": 180 },
            { "balance": 900, "apr": 17.0 }
          ],
          "loanApr": 8.5,
          "loanTermYears": 5,
          "userAge": 41,
          "targetAge": 80,
          "annualReturn": 6
        }"#;
        let inputs = api_request_from_json(json).expect("json should parse");

        assert_eq!(inputs.accounts.len(), 2);
        assert_eq!(inputs.accounts[0].id, "visa");
        assert_eq!(inputs.accounts[0].name, "Visa");
        assert_approx(inputs.accounts[0].balance, 4_200.0);
        assert_approx(inputs.accounts[0].apr, 24.5);
        assert_approx(inputs.accounts[0].user_payment, 180.0);
        assert_eq!(inputs.accounts[1].id, "account-2");
        assert_approx(inputs.accounts[1].user_payment, 0.0);
        assert_approx(inputs.loan_apr, 8.5);
        assert_eq!(inputs.loan_term_years, 5);
        assert_eq!(inputs.current_age, 41);
        assert_eq!(inputs.target_age, 80);
        assert_approx(inputs.annual_return, 6.0);
    }

    #[test]
    fn api_request_from_empty_json_uses_defaults() {
        let inputs = api_request_from_json("{}").expect("defaults are valid");
        assert_eq!(inputs.accounts, default_accounts());
        assert_approx(inputs.loan_apr, DEFAULT_LOAN_APR);
        assert_eq!(inputs.loan_term_years, DEFAULT_LOAN_TERM_YEARS);
        assert_eq!(inputs.current_age, DEFAULT_CURRENT_AGE);
        assert_eq!(inputs.target_age, DEFAULT_TARGET_AGE);
        assert_approx(inputs.annual_return, DEFAULT_ANNUAL_RETURN);
    }

    #[test]
    fn api_request_with_empty_account_list_keeps_it_empty() {
        let inputs = api_request_from_json(r#"{ "accounts": [] }"#).expect("valid");
        assert!(inputs.accounts.is_empty());
    }

    #[test]
    fn api_request_rejects_malformed_json() {
        let err = api_request_from_json("{ not json").expect_err("must reject");
        assert!(matches!(err, RequestError::InvalidPayload(_)));
    }

    #[test]
    fn query_maps_onto_payload_with_default_accounts() {
        let query = PlanQuery {
            loan_apr: Some(12.0),
            loan_term_years: Some(4),
            ..PlanQuery::default()
        };
        let inputs = api_request_from_payload(query.into()).expect("valid");
        assert_eq!(inputs.accounts, default_accounts());
        assert_approx(inputs.loan_apr, 12.0);
        assert_eq!(inputs.loan_term_years, 4);
    }

    #[test]
    fn build_inputs_rejects_loan_apr_outside_range() {
        let mut args = sample_args();
        args.loan_apr = 2.0;
        let err = build_inputs(args).expect_err("must reject low apr");
        assert!(err.to_string().contains("loanApr"));

        let mut args = sample_args();
        args.loan_apr = 40.0;
        assert!(build_inputs(args).is_err());

        let mut args = sample_args();
        args.loan_apr = f64::NAN;
        assert_eq!(
            build_inputs(args).expect_err("must reject NaN"),
            RequestError::field("loanApr", "must be a finite number")
        );
    }

    #[test]
    fn build_inputs_rejects_loan_term_outside_range() {
        for term in [0, 8] {
            let mut args = sample_args();
            args.loan_term_years = term;
            let err = build_inputs(args).expect_err("must reject term");
            assert!(err.to_string().contains("loanTermYears"));
        }
    }

    #[test]
    fn build_inputs_rejects_ages() {
        let mut args = sample_args();
        args.user_age = 17;
        assert!(build_inputs(args).expect_err("too young").to_string().contains("userAge"));

        let mut args = sample_args();
        args.target_age = args.user_age;
        assert!(build_inputs(args).expect_err("target age").to_string().contains("targetAge"));
    }

    #[test]
    fn build_inputs_accepts_returns_outside_the_form_options() {
        let mut args = sample_args();
        args.annual_return = 7.5;
        let inputs = build_inputs(args).expect("any finite return in range");
        assert_approx(inputs.annual_return, 7.5);

        let mut args = sample_args();
        args.annual_return = -100.0;
        assert!(build_inputs(args).expect_err("total loss").to_string().contains("annualReturn"));
    }

    #[test]
    fn build_inputs_rejects_invalid_accounts() {
        let mut args = sample_args();
        args.accounts = vec![
            AccountSpec {
                balance: 1_000.0,
                apr: 20.0,
                ..AccountSpec::default()
            },
            AccountSpec {
                balance: -5.0,
                apr: 20.0,
                ..AccountSpec::default()
            },
        ];
        let err = build_inputs(args).expect_err("must reject negative balance");
        assert_eq!(err, RequestError::account(1, "balance must be >= 0"));
        assert_eq!(err.to_string(), "account 1: balance must be >= 0");

        let mut args = sample_args();
        args.accounts = vec![AccountSpec {
            balance: 1_000.0,
            apr: 120.0,
            ..AccountSpec::default()
        }];
        assert!(build_inputs(args).is_err());

        let mut args = sample_args();
        args.accounts = vec![AccountSpec {
            balance: 1_000.0,
            apr: 20.0,
            monthly_payment: Some(-1.0),
            ..AccountSpec::default()
        }];
        assert!(build_inputs(args).is_err());
    }

    #[test]
    fn parse_account_spec_accepts_optional_payment() {
        let spec = parse_account_spec("5000:22.99").expect("valid spec");
        assert_approx(spec.balance, 5_000.0);
        assert_approx(spec.apr, 22.99);
        assert_eq!(spec.monthly_payment, None);

        let spec = parse_account_spec("3000 : 19.49 : 150").expect("valid spec");
        assert_eq!(spec.monthly_payment, Some(150.0));
    }

    #[test]
    fn parse_account_spec_rejects_bad_shapes() {
        assert!(parse_account_spec("5000").is_err());
        assert!(parse_account_spec("5000:1:2:3").is_err());
        let err = parse_account_spec("abc:20").expect_err("non-numeric balance");
        assert!(err.contains("balance"));
    }

    #[test]
    fn cli_args_without_accounts_use_defaults() {
        let inputs = inputs_from_args(sample_args()).expect("valid");
        assert_eq!(inputs.accounts, default_accounts());
    }

    #[test]
    fn plan_report_renders_pretty_json() {
        let mut args = sample_args();
        args.accounts = vec![parse_account_spec("8000:21:0").expect("valid spec")];
        let json = plan_report(args).expect("report renders");
        assert!(json.contains("\n  \"loanApr\": 10.0"));
        assert!(json.contains("\"debtSummary\""));
    }

    #[test]
    fn plan_response_serialization_contains_expected_fields() {
        let inputs = api_request_from_json("{}").expect("valid");
        let response = build_plan_response(&inputs);
        let json = serde_json::to_string(&response).expect("response should serialize");

        for key in [
            "\"loanApr\"",
            "\"loanTermYears\"",
            "\"debtSummary\"",
            "\"totalBalance\"",
            "\"weightedApr\"",
            "\"totalMonthlyPayment\"",
            "\"monthsToPayoff\"",
            "\"consolidation\"",
            "\"interestSaved\"",
            "\"monthlySaved\"",
            "\"timeline\"",
            "\"currentBalance\"",
            "\"loanBalance\"",
            "\"investment\"",
            "\"monthlyDeposit\"",
            "\"invested\"",
            "\"growth\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }

    #[test]
    fn plan_response_without_debt_serializes_nulls() {
        let inputs = api_request_from_json(r#"{ "accounts": [] }"#).expect("valid");
        let json = serde_json::to_string(&build_plan_response(&inputs)).expect("serializes");
        assert!(json.contains("\"consolidation\":null"));
        assert!(json.contains("\"investment\":null"));
        assert!(json.contains("\"timeline\":[]"));
    }
}
