/// Account type wire values as sent by the API
pub mod account_types {
    pub const CHECKING: &str = "checking";
    pub const SAVINGS: &str = "savings";
    pub const CREDIT_CARD: &str = "credit_card";
    pub const INVESTMENT: &str = "investment";
}

/// Returns the label shown next to an account for a given type.
///
/// Unknown types are shown as "Other" rather than rejected.
pub fn display_name_for_account_type(account_type: &str) -> &'static str {
    match account_type {
        account_types::CHECKING => "Checking",
        account_types::SAVINGS => "Savings",
        account_types::CREDIT_CARD => "Credit Card",
        account_types::INVESTMENT => "Investment",
        _ => "Other",
    }
}

/// Returns true if the account type carries a balance owed rather than held.
pub fn is_liability_type(account_type: &str) -> bool {
    account_type == account_types::CREDIT_CARD
}
