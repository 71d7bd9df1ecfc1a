pub mod format;

pub use format::{
    format_balance, format_currency, format_date, format_last_synced, format_percentage,
    mask_account_number,
};
