/// Upper bound for any goal progress value
pub const MAX_PROGRESS_PERCENT: f64 = 100.0;

/// Lower bound for any goal progress value
pub const MIN_PROGRESS_PERCENT: f64 = 0.0;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Number of trailing digits kept visible when masking account numbers
pub const VISIBLE_ACCOUNT_DIGITS: usize = 4;

/// Placeholder shown for values that could not be parsed
pub const UNKNOWN_VALUE_PLACEHOLDER: &str = "—";

/// Currency assumed for accounts that do not report one
pub const DEFAULT_CURRENCY: &str = "USD";
