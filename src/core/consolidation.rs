use super::types::{ConsolidationResult, DebtSummary, LoanTerms};

/// Prices a single loan covering the whole revolving balance against the
/// revolving baseline. Returns `None` when there is nothing to consolidate.
///
/// Savings are reported as computed; a negative `interest_saved` means the
/// loan is the more expensive option.
pub fn compare_consolidation(
    summary: &DebtSummary,
    apr: f64,
    term_months: u32,
) -> Option<ConsolidationResult> {
    if summary.total_balance <= 0.0 {
        return None;
    }

    let loan = LoanTerms::new(summary.total_balance, apr, term_months);
    let monthly_payment = loan.monthly_payment();
    let total_interest = loan.total_interest();

    Some(ConsolidationResult {
        monthly_payment,
        total_interest,
        interest_saved: summary.total_interest - total_interest,
        monthly_saved: summary.total_monthly_payment - monthly_payment,
        term_months,
    })
}
