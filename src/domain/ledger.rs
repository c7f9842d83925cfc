use super::{Amount, round_to_cents};

/// Sum a sequence of amounts. An empty sequence sums to +0.0.
pub fn sum_amounts<'a>(amounts: impl IntoIterator<Item = &'a Amount>) -> Amount {
    amounts.into_iter().fold(0.0, |total, amount| total + amount)
}

/// Share of `part` in `total` as a percentage rounded to two decimals.
/// A total that is zero or negative yields 0.
pub fn percentage_of(part: Amount, total: Amount) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    round_to_cents(part / total * 100.0)
}
