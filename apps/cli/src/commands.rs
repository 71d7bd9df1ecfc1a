//! Subcommand handlers and their plain-text renderers.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use rust_decimal::Decimal;

use cashly_core::accounts::{
    apply_account_filter, display_name_for_account_type, summarize_accounts, Account,
    AccountFilter, AccountReaderTrait, AccountTypeFilter, SortBy, StatusFilter,
};
use cashly_core::constants::DEFAULT_CURRENCY;
use cashly_core::goals::{Goal, GoalProgress, GoalProgressResolver, GoalReaderTrait};
use cashly_core::transactions::{DateRange, TransactionSumProviderTrait};
use cashly_core::utils::{
    format_balance, format_currency, format_date, format_last_synced, format_percentage,
    mask_account_number,
};

#[derive(Debug, Clone, Args)]
pub struct AccountsArgs {
    /// Matches custom name, institution or masked account number
    #[arg(long, default_value = "")]
    pub search: String,

    /// all, checking, savings, credit_card or investment
    #[arg(long = "type", default_value = "all")]
    pub account_type: AccountTypeFilter,

    /// all, active or inactive
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// e.g. name_asc, balance_desc, last_synced_desc
    #[arg(long, default_value = "name_asc")]
    pub sort: SortBy,
}

impl AccountsArgs {
    pub fn filter(&self) -> AccountFilter {
        AccountFilter {
            search: self.search.clone(),
            account_type: self.account_type,
            status: self.status,
            sort_by: self.sort,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct GoalsArgs {
    /// Start of the transaction window (YYYY-MM-DD); requires --to
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,

    /// End of the transaction window (YYYY-MM-DD); requires --from
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,

    /// Include archived goals
    #[arg(long)]
    pub include_archived: bool,
}

impl GoalsArgs {
    pub fn range(&self) -> Option<DateRange> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some(DateRange::new(from, to)),
            _ => None,
        }
    }
}

pub async fn run_accounts(
    reader: &dyn AccountReaderTrait,
    args: &AccountsArgs,
) -> anyhow::Result<String> {
    let accounts = reader.list_accounts().await?;
    tracing::info!("Fetched {} accounts", accounts.len());
    let visible = apply_account_filter(&accounts, &args.filter());
    Ok(render_accounts(&visible, Utc::now()))
}

pub async fn run_goals(
    reader: &dyn GoalReaderTrait,
    transaction_sums: Arc<dyn TransactionSumProviderTrait>,
    args: &GoalsArgs,
) -> anyhow::Result<String> {
    let mut goals = reader.list_goals().await?;
    tracing::info!("Fetched {} goals", goals.len());
    if args.include_archived {
        for goal in &mut goals {
            goal.is_archived = false;
        }
    }

    let resolver = GoalProgressResolver::new(transaction_sums);
    let progress = resolver.resolve_all(&goals, args.range()).await;
    Ok(render_goals(&goals, &progress))
}

pub fn render_accounts(accounts: &[Account], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    if accounts.is_empty() {
        out.push_str("No accounts match.\n");
        return out;
    }

    for account in accounts {
        let currency = account.currency.as_deref().unwrap_or(DEFAULT_CURRENCY);
        let _ = writeln!(
            out,
            "{:<24} {:<12} {:<10} {:>16}  {:<8} {}",
            account.display_name(),
            display_name_for_account_type(&account.account_type),
            mask_account_number(&account.account_number_masked),
            format_balance(&account.balance, currency),
            if account.is_active { "active" } else { "inactive" },
            format_last_synced(account.last_synced_at.as_deref(), now),
        );
    }

    let summary = summarize_accounts(accounts);
    let net = if summary.net_balances.is_empty() {
        format_currency(Decimal::ZERO, DEFAULT_CURRENCY)
    } else {
        summary
            .net_balances
            .iter()
            .map(|(currency, amount)| format_currency(*amount, currency))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let _ = writeln!(
        out,
        "\n{} accounts ({} active), net balance {}",
        summary.total_count, summary.active_count, net,
    );
    out
}

pub fn render_goals(goals: &[Goal], progress: &[GoalProgress]) -> String {
    let mut out = String::new();
    if progress.is_empty() {
        out.push_str("No goals.\n");
        return out;
    }

    for entry in progress {
        let target_date = goals
            .iter()
            .find(|g| g.id == entry.goal_id)
            .and_then(|g| g.target_date.as_deref())
            .map(format_date)
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<24} {:>5}  {:>14} left  {}{}",
            entry.goal_name,
            format_percentage(entry.percentage),
            format_remaining(entry.remaining_amount),
            if entry.is_completed { "done " } else { "" },
            target_date,
        );
    }
    out
}

fn format_remaining(amount: f64) -> String {
    cashly_core::accounts::parse_decimal(&format!("{:.2}", amount))
        .map(|d| format_currency(d, DEFAULT_CURRENCY))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cashly_core::accounts::AccountType;
    use cashly_core::errors::ApiError;
    use cashly_core::transactions::{TransactionSumQuery, TransactionSumResponse};
    use cashly_core::{Error, Result};
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryCashly {
        accounts: Vec<Account>,
        goals: Vec<Goal>,
        category_total: f64,
        queries: Mutex<Vec<TransactionSumQuery>>,
    }

    impl InMemoryCashly {
        fn queries(&self) -> Vec<TransactionSumQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AccountReaderTrait for InMemoryCashly {
        async fn list_accounts(&self) -> Result<Vec<Account>> {
            Ok(self.accounts.clone())
        }

        async fn get_account(&self, account_id: &str) -> Result<Account> {
            self.accounts
                .iter()
                .find(|a| a.id == account_id)
                .cloned()
                .ok_or_else(|| Error::Api(ApiError::NotFound(account_id.to_string())))
        }
    }

    #[async_trait]
    impl GoalReaderTrait for InMemoryCashly {
        async fn list_goals(&self) -> Result<Vec<Goal>> {
            Ok(self.goals.clone())
        }

        async fn get_goal(&self, goal_id: &str) -> Result<Goal> {
            self.goals
                .iter()
                .find(|g| g.id == goal_id)
                .cloned()
                .ok_or_else(|| Error::Api(ApiError::NotFound(goal_id.to_string())))
        }
    }

    #[async_trait]
    impl TransactionSumProviderTrait for InMemoryCashly {
        async fn category_sum(&self, query: &TransactionSumQuery) -> Result<TransactionSumResponse> {
            self.queries.lock().unwrap().push(query.clone());
            Ok(TransactionSumResponse::success(self.category_total))
        }
    }

    fn goals_args(from: Option<NaiveDate>, to: Option<NaiveDate>, include_archived: bool) -> GoalsArgs {
        GoalsArgs {
            from,
            to,
            include_archived,
        }
    }

    fn account(id: &str, name: &str, balance: &str, is_active: bool) -> Account {
        Account {
            id: id.to_string(),
            institution_name: name.to_string(),
            account_type: "checking".to_string(),
            account_number_masked: "****1234".to_string(),
            balance: balance.to_string(),
            is_active,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_accounts() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let out = render_accounts(
            &[account("a", "Chase", "1500", true), account("b", "Ally", "20", false)],
            now,
        );
        assert!(out.contains("Chase"));
        assert!(out.contains("$1,500.00"));
        assert!(out.contains("•••• 1234"));
        assert!(out.contains("Never synced"));
        assert!(out.contains("2 accounts (1 active), net balance $1,500.00"));
    }

    #[test]
    fn test_render_empty_lists() {
        assert_eq!(render_accounts(&[], Utc::now()), "No accounts match.\n");
        assert_eq!(render_goals(&[], &[]), "No goals.\n");
    }

    #[test]
    fn test_render_goals() {
        let goal = Goal {
            id: "g".to_string(),
            name: "Vacation".to_string(),
            target_date: Some("2025-06-01".to_string()),
            ..Default::default()
        };
        let progress = GoalProgress {
            goal_id: "g".to_string(),
            goal_name: "Vacation".to_string(),
            percentage: 25.0,
            remaining_amount: 1500.0,
            is_completed: false,
        };
        let out = render_goals(&[goal], &[progress]);
        assert!(out.contains("Vacation"));
        assert!(out.contains("25%"));
        assert!(out.contains("$1,500.00 left"));
        assert!(out.contains("Jun 1, 2025"));
    }

    #[test]
    fn test_goals_args_range() {
        let args = GoalsArgs {
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: NaiveDate::from_ymd_opt(2024, 3, 31),
            include_archived: false,
        };
        let range = args.range().unwrap();
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let open = GoalsArgs {
            from: None,
            to: None,
            include_archived: false,
        };
        assert_eq!(open.range(), None);
    }

    #[test]
    fn test_render_accounts_totals_each_currency() {
        let mut euro = account("e", "Revolut", "20", true);
        euro.currency = Some("EUR".to_string());
        let dollars = account("d", "Chase", "1500", true);

        let out = render_accounts(&[dollars, euro], Utc::now());
        assert!(out.contains("net balance €20.00, $1,500.00"));
    }

    #[tokio::test]
    async fn test_run_accounts_applies_filter_and_sort() {
        let mut ally = account("ally", "Ally", "9000", true);
        ally.account_type = "savings".to_string();
        let store = InMemoryCashly {
            accounts: vec![
                account("chase", "Chase", "500", true),
                ally,
                account("citi", "Citi", "1200", true),
                account("old", "Old Bank", "7000", false),
            ],
            ..Default::default()
        };
        let args = AccountsArgs {
            search: String::new(),
            account_type: AccountTypeFilter::Only(AccountType::Checking),
            status: StatusFilter::Active,
            sort: SortBy::BalanceDesc,
        };

        let out = run_accounts(&store, &args).await.unwrap();
        let citi = out.find("Citi").unwrap();
        let chase = out.find("Chase").unwrap();
        assert!(citi < chase);
        assert!(!out.contains("Ally"));
        assert!(!out.contains("Old Bank"));
        assert!(out.contains("2 accounts (2 active), net balance $1,700.00"));
    }

    #[tokio::test]
    async fn test_run_goals_passes_range_to_resolver() {
        let store = Arc::new(InMemoryCashly {
            goals: vec![Goal {
                id: "trip".to_string(),
                name: "Trip".to_string(),
                target_amount: Some("200".to_string()),
                inferred_category_id: Some("cat-travel".to_string()),
                ..Default::default()
            }],
            category_total: 50.0,
            ..Default::default()
        });
        let from = NaiveDate::from_ymd_opt(2023, 2, 1);
        let to = NaiveDate::from_ymd_opt(2023, 4, 30);

        let out = run_goals(store.as_ref(), store.clone(), &goals_args(from, to, false))
            .await
            .unwrap();
        assert!(out.contains("Trip"));
        assert!(out.contains("25%"));

        let queries = store.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].category_id, "cat-travel");
        assert_eq!(Some(queries[0].from), from);
        assert_eq!(Some(queries[0].to), to);
    }

    #[tokio::test]
    async fn test_run_goals_include_archived() {
        let store = Arc::new(InMemoryCashly {
            goals: vec![Goal {
                id: "house".to_string(),
                name: "House".to_string(),
                target_amount: Some("1000".to_string()),
                progress_percentage: Some(40.0),
                is_archived: true,
                ..Default::default()
            }],
            ..Default::default()
        });

        let hidden = run_goals(store.as_ref(), store.clone(), &goals_args(None, None, false))
            .await
            .unwrap();
        assert_eq!(hidden, "No goals.\n");

        let shown = run_goals(store.as_ref(), store.clone(), &goals_args(None, None, true))
            .await
            .unwrap();
        assert!(shown.contains("House"));
        assert!(shown.contains("40%"));
        assert!(store.queries().is_empty());
    }
}
