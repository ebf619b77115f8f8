//! Where a balance would place on the holder leaderboard.

use crate::domain::{Decimal, LeaderboardRow};

/// Rank of the first row (in leaderboard order) whose holdings the balance
/// exceeds. `None` if the balance beats no row.
pub fn first_rank_above_balance(rows: &[LeaderboardRow], balance: Decimal) -> Option<u32> {
    rows.iter()
        .find(|row| balance > row.holdings())
        .map(|row| row.rank)
}

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st...
pub fn to_ordinal(n: u32) -> String {
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rank: u32, balance: i64, staked: i64) -> LeaderboardRow {
        LeaderboardRow {
            rank,
            balance: Decimal::from(balance),
            balance_staked: Decimal::from(staked),
        }
    }

    #[test]
    fn test_first_rank_above_balance_counts_staked() {
        let rows = vec![row(1, 500, 500), row(2, 300, 0), row(3, 100, 50)];
        assert_eq!(first_rank_above_balance(&rows, Decimal::from(400i64)), Some(2));
        assert_eq!(first_rank_above_balance(&rows, Decimal::from(1001i64)), Some(1));
        // equal holdings do not count as above
        assert_eq!(first_rank_above_balance(&rows, Decimal::from(300i64)), Some(3));
    }

    #[test]
    fn test_first_rank_above_balance_none() {
        let rows = vec![row(1, 500, 0)];
        assert_eq!(first_rank_above_balance(&rows, Decimal::from(10i64)), None);
        assert_eq!(first_rank_above_balance(&[], Decimal::from(10i64)), None);
    }

    #[test]
    fn test_to_ordinal() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (102, "102nd"),
            (111, "111th"),
        ];
        for (n, expected) in cases {
            assert_eq!(to_ordinal(n), expected);
        }
    }
}
