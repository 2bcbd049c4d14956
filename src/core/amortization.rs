use super::types::LoanTerms;

pub const MINIMUM_PAYMENT_FLOOR: f64 = 25.0;

pub const MINIMUM_PRINCIPAL_SHARE: f64 = 0.01;

pub fn monthly_rate(apr: f64) -> f64 {
    apr.max(0.0) / 100.0 / 12.0
}

pub fn monthly_interest(balance: f64, apr: f64) -> f64 {
    balance.max(0.0) * monthly_rate(apr)
}

/// Interest plus 1% of the balance, never below the floor.
///
/// Always leaves a positive principal reduction, so a schedule driven by it
/// converges for any `apr >= 0`.
pub fn minimum_payment(balance: f64, apr: f64) -> f64 {
    if balance <= 0.0 {
        return 0.0;
    }
    let interest = monthly_interest(balance, apr);
    (interest + balance * MINIMUM_PRINCIPAL_SHARE).max(MINIMUM_PAYMENT_FLOOR)
}

/// Level payment for a fixed-rate loan: `P·r·(1+r)^n / ((1+r)^n − 1)`.
///
/// A zero rate falls back to straight-line repayment and a zero term is
/// treated as a single month. Terms long enough to overflow the growth
/// factor pay interest only.
pub fn loan_payment(principal: f64, apr: f64, term_months: u32) -> f64 {
    let principal = principal.max(0.0);
    let n = f64::from(term_months.max(1));
    let r = monthly_rate(apr);
    let growth = (1.0 + r).powf(n);
    if r == 0.0 || growth <= 1.0 {
        return principal / n;
    }
    if !growth.is_finite() {
        return principal * r;
    }
    principal * r * growth / (growth - 1.0)
}

pub fn loan_total_interest(principal: f64, apr: f64, term_months: u32) -> f64 {
    let n = term_months.max(1);
    let paid = loan_payment(principal, apr, n) * f64::from(n);
    (paid - principal.max(0.0)).max(0.0)
}

impl LoanTerms {
    pub fn new(principal: f64, apr: f64, term_months: u32) -> Self {
        Self {
            principal,
            apr,
            term_months,
        }
    }

    pub fn monthly_payment(&self) -> f64 {
        loan_payment(self.principal, self.apr, self.term_months)
    }

    pub fn total_interest(&self) -> f64 {
        loan_total_interest(self.principal, self.apr, self.term_months)
    }
}
