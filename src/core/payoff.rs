use super::amortization::{minimum_payment, monthly_rate};
use super::types::{Account, DebtSummary, PayoffResult};

/// Hard safety bound on any month-by-month simulation (30 years).
pub const MAX_PAYOFF_MONTHS: u32 = 360;

pub const PAID_OFF_THRESHOLD: f64 = 0.01;

/// Simulates one revolving balance until it reaches zero or the horizon cap.
///
/// With `fixed_payment` the same amount is paid every month, except that a
/// month whose payment does not cover interest pays that month's minimum
/// instead. Without it (or with a non-positive amount) the minimum is
/// recomputed from the remaining balance each month.
///
/// When the cap is reached the result is flagged `capped` and one further
/// year of interest at the current rate is added as a terminal estimate.
pub fn simulate_revolving_payoff(balance: f64, apr: f64, fixed_payment: Option<f64>) -> PayoffResult {
    let mut remaining = balance.max(0.0);
    if remaining <= 0.0 {
        return PayoffResult::ZERO;
    }

    let rate = monthly_rate(apr);
    let fixed_payment = fixed_payment.filter(|payment| *payment > 0.0);
    let mut total_interest = 0.0;
    let mut months = 0;

    while remaining > PAID_OFF_THRESHOLD && months < MAX_PAYOFF_MONTHS {
        let interest = remaining * rate;
        let scheduled = fixed_payment.unwrap_or_else(|| minimum_payment(remaining, apr));
        let payment = if scheduled - interest <= 0.0 {
            minimum_payment(remaining, apr)
        } else {
            scheduled
        };
        let principal = (payment - interest).min(remaining);

        total_interest += interest;
        remaining -= principal;
        months += 1;
    }

    let capped = remaining > PAID_OFF_THRESHOLD;
    if capped {
        total_interest += remaining * rate * 12.0;
    }

    PayoffResult {
        months,
        total_interest,
        capped,
    }
}

fn account_payoff(account: &Account) -> PayoffResult {
    simulate_revolving_payoff(account.balance, account.apr, account.fixed_payment())
}

fn scheduled_payment(account: &Account) -> f64 {
    account
        .fixed_payment()
        .unwrap_or_else(|| minimum_payment(account.balance, account.apr))
}

/// Aggregates the revolving baseline over every account with a balance and a rate.
pub fn summarize_debt(accounts: &[Account]) -> DebtSummary {
    let active: Vec<Account> = accounts
        .iter()
        .filter(|account| account.is_consolidatable())
        .cloned()
        .collect();
    if active.is_empty() {
        return DebtSummary::empty();
    }

    let total_balance: f64 = active.iter().map(|account| account.balance).sum();
    let weighted_apr = active
        .iter()
        .map(|account| account.apr * account.balance)
        .sum::<f64>()
        / total_balance;
    let total_monthly_payment: f64 = active.iter().map(scheduled_payment).sum();

    let mut total_interest = 0.0;
    let mut months_to_payoff = 0;
    let mut capped = false;
    for result in active.iter().map(account_payoff) {
        total_interest += result.total_interest;
        months_to_payoff = months_to_payoff.max(result.months);
        capped |= result.capped;
    }

    DebtSummary {
        total_balance,
        weighted_apr,
        total_monthly_payment,
        total_interest,
        months_to_payoff,
        capped,
        accounts: active,
    }
}
