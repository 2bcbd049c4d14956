use serde::Serialize;

/// One revolving credit line.
///
/// `user_payment == 0.0` means the holder did not state a payment and the
/// declining minimum applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub balance: f64,
    pub apr: f64,
    pub user_payment: f64,
}

impl Account {
    pub fn new(id: impl Into<String>, balance: f64, apr: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            balance,
            apr,
            user_payment: 0.0,
        }
    }

    pub fn with_payment(mut self, user_payment: f64) -> Self {
        self.user_payment = user_payment;
        self
    }

    pub fn is_consolidatable(&self) -> bool {
        self.balance > 0.0 && self.apr > 0.0
    }

    pub fn fixed_payment(&self) -> Option<f64> {
        (self.user_payment > 0.0).then_some(self.user_payment)
    }
}

/// Field-level update for [`Account`]; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub balance: Option<f64>,
    pub apr: Option<f64>,
    pub user_payment: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffResult {
    pub months: u32,
    pub total_interest: f64,
    /// The horizon cap was hit; `total_interest` carries an estimated tail.
    pub capped: bool,
}

impl PayoffResult {
    pub const ZERO: Self = Self {
        months: 0,
        total_interest: 0.0,
        capped: false,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtSummary {
    pub total_balance: f64,
    pub weighted_apr: f64,
    pub total_monthly_payment: f64,
    pub total_interest: f64,
    pub months_to_payoff: u32,
    pub capped: bool,
    pub accounts: Vec<Account>,
}

impl DebtSummary {
    pub fn empty() -> Self {
        Self {
            total_balance: 0.0,
            weighted_apr: 0.0,
            total_monthly_payment: 0.0,
            total_interest: 0.0,
            months_to_payoff: 0,
            capped: false,
            accounts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub principal: f64,
    pub apr: f64,
    pub term_months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidationResult {
    pub monthly_payment: f64,
    pub total_interest: f64,
    /// Negative when the loan costs more than the revolving baseline.
    pub interest_saved: f64,
    pub monthly_saved: f64,
    pub term_months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub month: u32,
    pub current_balance: f64,
    pub loan_balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPoint {
    pub year: u32,
    pub invested: f64,
    pub growth: f64,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct PlanInputs {
    pub accounts: Vec<Account>,
    pub loan_apr: f64,
    pub loan_term_years: u32,
    pub current_age: u32,
    pub target_age: u32,
    pub annual_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentProjection {
    pub monthly_deposit: f64,
    pub years: u32,
    pub points: Vec<InvestmentPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub debt_summary: DebtSummary,
    pub consolidation: Option<ConsolidationResult>,
    pub timeline: Vec<TimelinePoint>,
    pub investment: Option<InvestmentProjection>,
}
