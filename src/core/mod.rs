mod accounts;
mod amortization;
mod consolidation;
mod investment;
mod payoff;
mod plan;
mod timeline;
mod types;

pub use accounts::{
    add_account, default_accounts, has_consolidatable_accounts, remove_account, update_account,
};
pub use amortization::{
    MINIMUM_PAYMENT_FLOOR, loan_payment, loan_total_interest, minimum_payment, monthly_interest,
    monthly_rate,
};
pub use consolidation::compare_consolidation;
pub use investment::{investment_horizon_years, project_investment_growth};
pub use payoff::{MAX_PAYOFF_MONTHS, simulate_revolving_payoff, summarize_debt};
pub use plan::{
    DEFAULT_ANNUAL_RETURN, DEFAULT_CURRENT_AGE, DEFAULT_LOAN_APR, DEFAULT_LOAN_TERM_YEARS,
    DEFAULT_TARGET_AGE, build_plan,
};
pub use timeline::project_payoff_timeline;
pub use types::{
    Account, AccountPatch, ConsolidationResult, DebtSummary, InvestmentPoint,
    InvestmentProjection, LoanTerms, PayoffResult, Plan, PlanInputs, TimelinePoint,
};
