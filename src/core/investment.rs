use super::types::InvestmentPoint;

/// Compounds a fixed monthly deposit and reports one point per completed year.
///
/// Growth is `total - invested`, so it only goes negative for a negative
/// `annual_return`.
pub fn project_investment_growth(
    monthly_deposit: f64,
    annual_return: f64,
    years: u32,
) -> Vec<InvestmentPoint> {
    let deposit = monthly_deposit.max(0.0);
    let rate = annual_return / 100.0 / 12.0;
    let mut balance = 0.0;
    let mut invested = 0.0;
    let mut points = Vec::new();

    for year in 1..=years {
        for _ in 0..12 {
            balance = balance * (1.0 + rate) + deposit;
            invested += deposit;
        }
        points.push(InvestmentPoint {
            year,
            invested,
            growth: balance - invested,
            total: balance,
        });
    }

    points
}

pub fn investment_horizon_years(current_age: u32, target_age: u32, loan_term_years: u32) -> u32 {
    target_age
        .saturating_sub(current_age)
        .saturating_sub(loan_term_years)
        .max(1)
}
