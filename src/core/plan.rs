use super::consolidation::compare_consolidation;
use super::investment::{investment_horizon_years, project_investment_growth};
use super::payoff::summarize_debt;
use super::timeline::project_payoff_timeline;
use super::types::{InvestmentProjection, Plan, PlanInputs};

pub const DEFAULT_LOAN_APR: f64 = 10.0;
pub const DEFAULT_LOAN_TERM_YEARS: u32 = 3;
pub const DEFAULT_CURRENT_AGE: u32 = 30;
pub const DEFAULT_TARGET_AGE: u32 = 90;
pub const DEFAULT_ANNUAL_RETURN: f64 = 8.0;

/// Derives every projection for one input snapshot.
///
/// The investment projection only exists when consolidating saves interest;
/// it invests the loan payment that is freed once the loan is repaid.
pub fn build_plan(inputs: &PlanInputs) -> Plan {
    let debt_summary = summarize_debt(&inputs.accounts);
    let term_months = inputs.loan_term_years.saturating_mul(12);
    let consolidation = compare_consolidation(&debt_summary, inputs.loan_apr, term_months);

    let timeline = match consolidation {
        Some(_) => project_payoff_timeline(&inputs.accounts, inputs.loan_apr, term_months),
        None => Vec::new(),
    };

    let investment = consolidation
        .filter(|result| result.interest_saved > 0.0)
        .map(|result| {
            let years = investment_horizon_years(
                inputs.current_age,
                inputs.target_age,
                inputs.loan_term_years,
            );
            InvestmentProjection {
                monthly_deposit: result.monthly_payment,
                years,
                points: project_investment_growth(result.monthly_payment, inputs.annual_return, years),
            }
        });

    Plan {
        debt_summary,
        consolidation,
        timeline,
        investment,
    }
}
