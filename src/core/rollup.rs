use super::types::{CompoundingHistory, YearlyPoint};

/// Samples a monthly trajectory at months 12, 24, ... into year points, led by a
/// year-0 point at the principal. Contributions include the principal; interest is
/// the value above net money put in. Values are raw; see [`YearlyPoint::for_display`].
pub fn yearly_rollup(principal: f64, history: &CompoundingHistory, years: u32) -> Vec<YearlyPoint> {
    let mut points = Vec::with_capacity(years as usize + 1);
    points.push(YearlyPoint {
        year: 0,
        total_value: principal,
        total_contributions: principal,
        total_interest: 0.0,
    });

    let mut cumulative_contributions = principal;
    let mut cumulative_withdrawals = 0.0;

    for year in 1..=years {
        let end = year as usize * 12;
        let Some(year_end) = history.periods.get(end - 1) else {
            break;
        };

        for row in &history.periods[end - 12..end] {
            cumulative_contributions += row.contribution;
            cumulative_withdrawals += row.withdrawal;
        }

        let net_contributions = cumulative_contributions - cumulative_withdrawals;
        points.push(YearlyPoint {
            year,
            total_value: year_end.balance,
            total_contributions: cumulative_contributions,
            total_interest: year_end.balance - net_contributions,
        });
    }

    points
}
