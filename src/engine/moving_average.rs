//! Trailing simple moving averages over dated series.

use crate::domain::{CombinedChartRow, Decimal, PricePoint, RevenuePoint, SeriesPoint};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Simple moving average keyed by the date of the window's last point.
///
/// Points before the window is full produce no entry. A zero window yields
/// an empty map.
pub fn moving_average(series: &[SeriesPoint], window: usize) -> BTreeMap<NaiveDate, Decimal> {
    let mut averages = BTreeMap::new();
    if window == 0 || series.len() < window {
        return averages;
    }

    let divisor = Decimal::from(window);
    let mut sum: Decimal = series[..window - 1].iter().map(|p| p.value).sum();
    for i in (window - 1)..series.len() {
        sum += series[i].value;
        if let Some(avg) = sum.checked_div(divisor) {
            averages.insert(series[i].date, avg);
        }
        sum = sum - series[i + 1 - window].value;
    }

    averages
}

/// Join daily closes with 7/30/90-day revenue averages over the union of
/// dates, ascending.
pub fn combine_price_revenue(
    prices: &[PricePoint],
    revenue: &[RevenuePoint],
) -> Vec<CombinedChartRow> {
    let revenue_series: Vec<SeriesPoint> = revenue.iter().map(SeriesPoint::from).collect();
    let ma_7 = moving_average(&revenue_series, 7);
    let ma_30 = moving_average(&revenue_series, 30);
    let ma_90 = moving_average(&revenue_series, 90);

    let closes: HashMap<NaiveDate, Decimal> = prices.iter().map(|p| (p.date, p.close)).collect();

    let dates: BTreeSet<NaiveDate> = prices
        .iter()
        .map(|p| p.date)
        .chain(revenue.iter().map(|r| r.date))
        .collect();

    dates
        .into_iter()
        .map(|date| CombinedChartRow {
            date,
            price: closes.get(&date).copied(),
            revenue_7d_ma: ma_7.get(&date).copied(),
            revenue_30d_ma: ma_30.get(&date).copied(),
            revenue_90d_ma: ma_90.get(&date).copied(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, n).unwrap()
    }

    fn point(n: u32, v: i64) -> SeriesPoint {
        SeriesPoint::new(day(n), Decimal::from(v))
    }

    #[test]
    fn test_two_day_window() {
        let series = vec![point(1, 10), point(2, 20), point(3, 30)];
        let ma = moving_average(&series, 2);
        assert_eq!(ma.len(), 2);
        assert_eq!(ma.get(&day(1)), None);
        assert_eq!(ma[&day(2)], Decimal::from(15i64));
        assert_eq!(ma[&day(3)], Decimal::from(25i64));
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let series = vec![point(1, 4), point(2, 9)];
        let ma = moving_average(&series, 1);
        assert_eq!(ma[&day(1)], Decimal::from(4i64));
        assert_eq!(ma[&day(2)], Decimal::from(9i64));
    }

    #[test]
    fn test_window_larger_than_series_or_zero() {
        let series = vec![point(1, 4), point(2, 9)];
        assert!(moving_average(&series, 3).is_empty());
        assert!(moving_average(&series, 0).is_empty());
        assert!(moving_average(&[], 7).is_empty());
    }

    #[test]
    fn test_running_sum_matches_direct_mean() {
        let series: Vec<SeriesPoint> = (1..=20).map(|n| point(n, (n * n) as i64)).collect();
        let ma = moving_average(&series, 7);
        assert_eq!(ma.len(), 14);
        for i in 6..series.len() {
            let direct: Decimal = series[i - 6..=i].iter().map(|p| p.value).sum();
            let expected = direct.checked_div(Decimal::from(7i64)).unwrap();
            assert_eq!(ma[&series[i].date], expected);
        }
    }

    #[test]
    fn test_combine_price_revenue_union_of_dates() {
        let prices = vec![
            PricePoint { date: day(2), close: Decimal::from(25i64) },
            PricePoint { date: day(1), close: Decimal::from(24i64) },
        ];
        let revenue: Vec<RevenuePoint> = (1..=8)
            .map(|n| RevenuePoint { date: day(n), total: Decimal::from(7i64) })
            .collect();

        let rows = combine_price_revenue(&prices, &revenue);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].date, day(1));
        assert_eq!(rows[0].price, Some(Decimal::from(24i64)));
        assert_eq!(rows[0].revenue_7d_ma, None);
        assert_eq!(rows[6].revenue_7d_ma, Some(Decimal::from(7i64)));
        assert_eq!(rows[7].price, None);
        assert!(rows.iter().all(|r| r.revenue_30d_ma.is_none()));
    }
}
