//! Aggregates over parsed records, used by report builders.
//!
//! Every aggregate uses checked arithmetic and returns `None` when the result
//! does not fit a [`Decimal`].

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

/// Sum of all amounts.
pub fn total<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(amount))
}

/// Total sales minus total expenses.
pub fn profit<S, E>(sales: S, expenses: E) -> Option<Decimal>
where
    S: IntoIterator<Item = Decimal>,
    E: IntoIterator<Item = Decimal>,
{
    total(sales)?.checked_sub(total(expenses)?)
}

/// Mean amount, `0` for no amounts.
pub fn average<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let (sum, count) = amounts
        .into_iter()
        .try_fold((Decimal::ZERO, 0u64), |(sum, count), amount| {
            Some((sum.checked_add(amount)?, count + 1))
        })?;
    if count == 0 {
        return Some(Decimal::ZERO);
    }
    sum.checked_div(Decimal::from(count))
}

/// Amount per day over the last `days` days, counting items dated on or after
/// `today - days`.
///
/// The divisor is always `days`, not the number of days that had activity.
pub fn daily_average<I>(dated: I, days: u32, today: NaiveDate) -> Option<Decimal>
where
    I: IntoIterator<Item = (NaiveDate, Decimal)>,
{
    if days == 0 {
        return Some(Decimal::ZERO);
    }
    let cutoff = today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);

    let recent = dated
        .into_iter()
        .filter(|(date, _)| *date >= cutoff)
        .map(|(_, amount)| amount);
    total(recent)?.checked_div(Decimal::from(days))
}

/// Percentage change from `previous` to `current`.
///
/// From zero, growth is `0` if still zero and `100` otherwise.
pub fn growth(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return Some(if current.is_zero() {
            Decimal::ZERO
        } else {
            Decimal::ONE_HUNDRED
        });
    }
    current
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Sums amounts per category.
pub fn by_category<I, S>(items: I) -> Option<BTreeMap<String, Decimal>>
where
    I: IntoIterator<Item = (S, Decimal)>,
    S: Into<String>,
{
    let mut totals = BTreeMap::new();
    for (category, amount) in items {
        let sum = totals.entry(category.into()).or_insert(Decimal::ZERO);
        *sum = sum.checked_add(amount)?;
    }
    Some(totals)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn totals_and_profit() {
        assert_eq!(total([dec!(500), dec!(1200.5)]), Some(dec!(1700.5)));
        assert_eq!(total(Vec::<Decimal>::new()), Some(Decimal::ZERO));
        assert_eq!(
            profit([dec!(1000), dec!(500)], [dec!(300)]),
            Some(dec!(1200))
        );
        assert_eq!(profit([dec!(100)], [dec!(300)]), Some(dec!(-200)));
    }

    #[test]
    fn totals_out_of_range_are_none() {
        assert_eq!(total([Decimal::MAX, Decimal::MAX]), None);
        assert_eq!(profit([Decimal::MAX], [Decimal::MIN]), None);
        assert_eq!(profit([Decimal::MAX, Decimal::ONE], Vec::new()), None);
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average(Vec::<Decimal>::new()), Some(Decimal::ZERO));
        assert_eq!(average([dec!(100), dec!(200), dec!(600)]), Some(dec!(300)));
        assert_eq!(average([Decimal::MAX, Decimal::MAX]), None);
    }

    #[test]
    fn daily_average_uses_window() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        let items = [
            (day(31), dec!(300)),
            (day(25), dec!(300)),
            (day(24), dec!(300)),
            (day(1), dec!(10000)),
        ];
        assert_eq!(daily_average(items, 7, today), Some(dec!(900) / dec!(7)));
        assert_eq!(daily_average(items, 0, today), Some(Decimal::ZERO));
        assert_eq!(
            daily_average(Vec::<(NaiveDate, Decimal)>::new(), 30, today),
            Some(Decimal::ZERO)
        );
        assert_eq!(
            daily_average([(today, Decimal::MAX), (today, Decimal::MAX)], 7, today),
            None
        );
    }

    #[test]
    fn growth_handles_zero_baseline() {
        assert_eq!(growth(dec!(150), dec!(100)), Some(dec!(50)));
        assert_eq!(growth(dec!(50), dec!(100)), Some(dec!(-50)));
        assert_eq!(growth(Decimal::ZERO, Decimal::ZERO), Some(Decimal::ZERO));
        assert_eq!(growth(dec!(10), Decimal::ZERO), Some(dec!(100)));
    }

    #[test]
    fn growth_out_of_range_is_none() {
        assert_eq!(growth(Decimal::MAX, dec!(0.0000000001)), None);
        assert_eq!(growth(Decimal::MAX, dec!(-1)), None);
    }

    #[test]
    fn groups_by_category() {
        let grouped = by_category([
            ("supplies", dec!(500)),
            ("rent", dec!(2000)),
            ("supplies", dec!(250)),
        ])
        .unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["supplies"], dec!(750));
        assert_eq!(grouped["rent"], dec!(2000));

        assert_eq!(
            by_category([("rent", Decimal::MAX), ("rent", Decimal::MAX)]),
            None
        );
    }
}
