use std::fmt;

/// Expense amounts are plain floating-point values. Sign and magnitude are
/// not constrained; only non-finite values are rejected at parse time.
pub type Amount = f64;

/// Format an amount with exactly two decimal places.
/// Example: 12.5 -> "12.50", -3.456 -> "-3.46"
pub fn format_amount(amount: Amount) -> String {
    let formatted = format!("{:.2}", amount);
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}

/// Round to two decimal digits (half away from zero). Never returns -0.0.
pub fn round_to_cents(value: f64) -> f64 {
    without_negative_zero((value * 100.0).round() / 100.0)
}

fn without_negative_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Parse a decimal string into an amount.
/// Example: "12.50" -> 12.5, "500" -> 500.0, "-3" -> -3.0
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let amount: Amount = input
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))?;

    if !amount.is_finite() {
        return Err(ParseAmountError::NotFinite(input.to_string()));
    }

    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat(String),
    NotFinite(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat(s) => write!(f, "invalid amount format: {}", s),
            ParseAmountError::NotFinite(s) => write!(f, "amount must be a finite number: {}", s),
        }
    }
}

impl std::error::Error for ParseAmountError {}
