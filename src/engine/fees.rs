//! Average daily fee revenue from the cumulative fee counter.

use crate::domain::{Decimal, FeeSample, FeeWindows};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const MICRO_USD: i64 = 1_000_000;

/// Trailing 1/7/30-day average daily fees in USD.
///
/// Samples must be ascending by time. Returns `None` with fewer than two.
pub fn fee_windows(samples: &[FeeSample]) -> Option<FeeWindows> {
    if samples.len() < 2 {
        return None;
    }
    let latest = samples[samples.len() - 1];

    let per_day = |days: i64| -> Decimal {
        let base = baseline(samples, latest.time - days * SECONDS_PER_DAY);
        (latest.total_fees - base.total_fees)
            .checked_div(Decimal::from(MICRO_USD * days))
            .unwrap_or_default()
    };

    Some(FeeWindows {
        one_day: per_day(1),
        seven_days: per_day(7),
        thirty_days: per_day(30),
    })
}

/// The sample right after the last one at or before `target`. When nothing
/// is that old, the search lands on index 0 and the second sample is used.
fn baseline(samples: &[FeeSample], target: i64) -> FeeSample {
    let idx = samples.iter().rposition(|s| s.time <= target).unwrap_or(0);
    samples.get(idx + 1).copied().unwrap_or(samples[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(day: i64, total_fees: i64) -> FeeSample {
        FeeSample {
            time: day * SECONDS_PER_DAY,
            total_fees: Decimal::from(total_fees),
        }
    }

    #[test]
    fn test_requires_two_samples() {
        assert!(fee_windows(&[]).is_none());
        assert!(fee_windows(&[sample(0, 1)]).is_none());
    }

    #[test]
    fn test_daily_averages_over_windows() {
        // 2M USD of fees per day, expressed in micro-USD, sampled daily
        let samples: Vec<FeeSample> = (0..=40).map(|d| sample(d, d * 2_000_000_000_000)).collect();
        let windows = fee_windows(&samples).unwrap();

        // baseline lands one sample after the cutoff, so each window spans one day less
        assert_eq!(windows.one_day, Decimal::zero());
        assert_eq!(windows.seven_days.round_dp(2).to_fixed(2), "1714285.71");
        assert_eq!(windows.thirty_days.round_dp(2).to_fixed(2), "1933333.33");
    }

    #[test]
    fn test_short_history_falls_back_to_second_sample() {
        let samples = vec![sample(0, 0), sample(1, 1_000_000), sample(2, 3_000_000)];
        let windows = fee_windows(&samples).unwrap();
        // 30d lookback finds nothing that old, baseline is samples[1]
        assert_eq!(windows.thirty_days.to_fixed(4), "0.0667");
        assert_eq!(windows.one_day, Decimal::zero());
    }
}
