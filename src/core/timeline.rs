use super::amortization::{loan_payment, minimum_payment, monthly_rate};
use super::payoff::{MAX_PAYOFF_MONTHS, PAID_OFF_THRESHOLD};
use super::types::{Account, TimelinePoint};

/// Minimum principal repaid each month by a revolving account in the timeline.
const MIN_PROGRESS: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
struct RevolvingLine {
    balance: f64,
    apr: f64,
    user_payment: f64,
}

impl RevolvingLine {
    fn from_account(account: &Account) -> Self {
        Self {
            balance: account.balance,
            apr: account.apr,
            user_payment: account.user_payment.max(0.0),
        }
    }

    fn advance(&mut self) {
        if self.balance <= PAID_OFF_THRESHOLD {
            self.balance = 0.0;
            return;
        }
        let interest = self.balance * monthly_rate(self.apr);
        let scheduled = if self.user_payment > 0.0 {
            self.user_payment
        } else {
            minimum_payment(self.balance, self.apr)
        };
        let payment = scheduled.max(interest + MIN_PROGRESS);
        let principal = (payment - interest).min(self.balance);
        self.balance = settle(self.balance - principal);
    }
}

#[derive(Debug, Clone, Copy)]
struct LoanLine {
    balance: f64,
    rate: f64,
    payment: f64,
    term_months: u32,
}

impl LoanLine {
    fn new(principal: f64, apr: f64, term_months: u32) -> Self {
        let term_months = term_months.max(1);
        Self {
            balance: principal,
            rate: monthly_rate(apr),
            payment: loan_payment(principal, apr, term_months),
            term_months,
        }
    }

    fn advance(&mut self, month: u32) {
        if month >= self.term_months {
            self.balance = 0.0;
            return;
        }
        let interest = self.balance * self.rate;
        let principal = (self.payment - interest).max(0.0).min(self.balance);
        self.balance = settle(self.balance - principal);
    }
}

fn settle(balance: f64) -> f64 {
    if balance <= PAID_OFF_THRESHOLD { 0.0 } else { balance }
}

fn sample_interval(month: u32) -> u32 {
    match month {
        0..=60 => 3,
        61..=240 => 6,
        _ => 12,
    }
}

/// Runs the revolving accounts and the consolidation loan side by side and
/// samples both balances for charting.
///
/// Only accounts with a balance and a rate take part; the loan principal is
/// their combined balance. Returns an empty series when there is nothing to
/// consolidate.
pub fn project_payoff_timeline(
    accounts: &[Account],
    loan_apr: f64,
    loan_term_months: u32,
) -> Vec<TimelinePoint> {
    let mut lines: Vec<RevolvingLine> = accounts
        .iter()
        .filter(|account| account.is_consolidatable())
        .map(RevolvingLine::from_account)
        .collect();
    let total_balance: f64 = lines.iter().map(|line| line.balance).sum();
    if total_balance <= 0.0 {
        return Vec::new();
    }

    let mut loan = LoanLine::new(total_balance, loan_apr, loan_term_months);
    let mut series = vec![TimelinePoint {
        month: 0,
        current_balance: total_balance,
        loan_balance: loan.balance,
    }];

    let mut current_done = false;
    let mut loan_done = false;
    for month in 1..=MAX_PAYOFF_MONTHS {
        for line in &mut lines {
            line.advance();
        }
        loan.advance(month);

        let current_balance: f64 = lines.iter().map(|line| line.balance).sum();
        let current_hit_zero = !current_done && current_balance <= 0.0;
        let loan_hit_zero = !loan_done && loan.balance <= 0.0;
        current_done |= current_hit_zero;
        loan_done |= loan_hit_zero;
        let finished = current_done && loan_done;

        if month % sample_interval(month) == 0
            || month == loan.term_months
            || current_hit_zero
            || loan_hit_zero
            || month == MAX_PAYOFF_MONTHS
        {
            series.push(TimelinePoint {
                month,
                current_balance,
                loan_balance: loan.balance,
            });
        }

        if finished {
            break;
        }
    }

    series
}
