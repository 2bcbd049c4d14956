use super::types::{Account, AccountPatch};

pub fn default_accounts() -> Vec<Account> {
    vec![
        Account::new("account-1", 5_000.0, 22.99),
        Account::new("account-2", 3_000.0, 19.49),
    ]
}

pub fn has_consolidatable_accounts(accounts: &[Account]) -> bool {
    accounts.iter().any(Account::is_consolidatable)
}

/// Unknown ids leave the list unchanged.
pub fn update_account(accounts: &[Account], id: &str, patch: &AccountPatch) -> Vec<Account> {
    accounts
        .iter()
        .map(|account| {
            if account.id != id {
                return account.clone();
            }
            let mut updated = account.clone();
            if let Some(name) = &patch.name {
                updated.name = name.clone();
            }
            if let Some(balance) = patch.balance {
                updated.balance = balance.max(0.0);
            }
            if let Some(apr) = patch.apr {
                updated.apr = apr.max(0.0);
            }
            if let Some(user_payment) = patch.user_payment {
                updated.user_payment = user_payment.max(0.0);
            }
            updated
        })
        .collect()
}

pub fn add_account(accounts: &[Account]) -> Vec<Account> {
    let mut next = accounts.len() + 1;
    while accounts.iter().any(|account| account.id == account_id(next)) {
        next += 1;
    }
    let mut updated = accounts.to_vec();
    updated.push(Account::new(account_id(next), 0.0, 0.0));
    updated
}

pub fn remove_account(accounts: &[Account], id: &str) -> Vec<Account> {
    accounts
        .iter()
        .filter(|account| account.id != id)
        .cloned()
        .collect()
}

fn account_id(index: usize) -> String {
    format!("account-{index}")
}
