use std::collections::BTreeMap;

use super::error::SelectionError;
use super::model::{Observation, PriceTable};
use super::period::{PeriodSpec, selects};

/// Mean price per period, ordered by period.
pub type PeriodMeans = BTreeMap<i32, f64>;

// ---------------------------------------------------------------------------
// PeriodField – which column a selector applies to
// ---------------------------------------------------------------------------

/// The column a period selector is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodField {
    Year,
    /// Month of one fixed year.
    Month { year: i32 },
}

impl PeriodField {
    /// The grouping key of `obs`, or `None` if the row is outside the field's
    /// fixed constraints.
    pub fn key(&self, obs: &Observation) -> Option<i32> {
        match *self {
            PeriodField::Year => Some(obs.year),
            PeriodField::Month { year } if obs.year == year => Some(obs.month as i32),
            PeriodField::Month { .. } => None,
        }
    }

    /// Human-readable description of a selection, used in `NoData` messages.
    pub fn describe(&self, selector: &str) -> String {
        match self {
            PeriodField::Year => format!("year(s): {selector}"),
            PeriodField::Month { year } => format!("year {year} and month(s): {selector}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering and averaging
// ---------------------------------------------------------------------------

/// Rows of `table` whose `field` value is covered by one of the `selected`
/// tokens. Membership is tested per token, never against an expansion.
pub fn filter_rows<'a>(
    table: &'a PriceTable,
    field: PeriodField,
    selected: &[PeriodSpec],
) -> Vec<&'a Observation> {
    table
        .observations
        .iter()
        .filter(|obs| field.key(obs).is_some_and(|k| selects(selected, k)))
        .collect()
}

/// Group rows by `field` and average their prices.
pub fn average_by<'a>(
    rows: impl IntoIterator<Item = &'a Observation>,
    field: PeriodField,
) -> PeriodMeans {
    let mut sums: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for obs in rows {
        if let Some(key) = field.key(obs) {
            let entry = sums.entry(key).or_insert((0.0, 0));
            entry.0 += obs.price;
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect()
}

/// Filter `table` to the `selected` periods of `field` and return the mean
/// price per period.
///
/// Fails with [`SelectionError::NoData`] when no row matches.
pub fn filter_and_average(
    table: &PriceTable,
    field: PeriodField,
    selected: &[PeriodSpec],
) -> Result<PeriodMeans, SelectionError> {
    let rows = filter_rows(table, field, selected);
    if rows.is_empty() {
        let periods: Vec<String> = selected.iter().map(PeriodSpec::to_string).collect();
        return Err(SelectionError::NoData {
            selector: field.describe(&periods.join(",")),
        });
    }
    Ok(average_by(rows, field))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::period::parse_periods;

    fn obs(year: i32, month: u32, price: f64) -> Observation {
        let date = NaiveDate::from_ymd_opt(year, month, 1).expect("valid date");
        Observation::new(date, price)
    }

    fn table(rows: Vec<Observation>) -> PriceTable {
        PriceTable {
            observations: rows,
            ..PriceTable::default()
        }
    }

    #[test]
    fn averages_selected_year() {
        let t = table(vec![obs(2010, 1, 100.0), obs(2010, 2, 200.0), obs(2011, 1, 50.0)]);
        let means = filter_and_average(&t, PeriodField::Year, &[PeriodSpec::Single(2010)])
            .expect("2010 has rows");
        assert_eq!(means, BTreeMap::from([(2010, 150.0)]));
    }

    #[test]
    fn disjoint_selection_is_no_data() {
        let t = table(vec![obs(2010, 1, 100.0)]);
        let selected = [PeriodSpec::Single(1999), PeriodSpec::Range { lo: 2001, hi: 2003 }];
        let err = filter_and_average(&t, PeriodField::Year, &selected).expect_err("no rows");
        assert_eq!(
            err,
            SelectionError::NoData {
                selector: "year(s): 1999,2001-2003".to_string()
            }
        );
    }

    #[test]
    fn empty_selection_is_no_data() {
        let t = table(vec![obs(2010, 1, 100.0)]);
        assert!(matches!(
            filter_and_average(&t, PeriodField::Year, &[]),
            Err(SelectionError::NoData { .. })
        ));
    }

    #[test]
    fn range_round_trip_yields_one_group_per_period() {
        let (lo, hi) = (2001, 2008);
        let rows = (lo..=hi).map(|y| obs(y, 6, y as f64 * 0.5)).collect();
        let t = table(rows);

        let specs = parse_periods(&format!("{lo}-{hi}")).expect("valid range");
        let means = filter_and_average(&t, PeriodField::Year, &specs).expect("rows");

        assert_eq!(means.len(), (hi - lo + 1) as usize);
        for (year, mean) in means {
            assert_eq!(mean, year as f64 * 0.5);
        }
    }

    #[test]
    fn month_view_excludes_unselected_months_and_other_years() {
        let t = table(vec![
            obs(2020, 1, 10.0),
            obs(2020, 2, 20.0),
            obs(2020, 3, 30.0),
            obs(2020, 4, 40.0),
            obs(2021, 1, 99.0),
        ]);
        let months = parse_periods("1,3-4").expect("valid months");
        let means = filter_and_average(&t, PeriodField::Month { year: 2020 }, &months)
            .expect("rows for 2020");

        assert_eq!(means, BTreeMap::from([(1, 10.0), (3, 30.0), (4, 40.0)]));
    }

    #[test]
    fn huge_range_is_filtered_without_expanding() {
        let rows = (1774..=2023)
            .flat_map(|y| (1..=12).map(move |m| obs(y, m, 1.0)))
            .collect();
        let t = table(rows);

        let specs = parse_periods("2030-2000000000").expect("valid range");
        let err = filter_and_average(&t, PeriodField::Year, &specs).expect_err("no rows");
        assert!(matches!(err, SelectionError::NoData { .. }));

        let specs = parse_periods("0-2000000000").expect("valid range");
        let means = filter_and_average(&t, PeriodField::Year, &specs).expect("every year");
        assert_eq!(means.len(), 250);
    }

    #[test]
    fn month_view_for_missing_year_is_no_data() {
        let t = table(vec![obs(2020, 1, 10.0)]);
        let field = PeriodField::Month { year: 2019 };
        let err = filter_and_average(&t, field, &[PeriodSpec::Single(1)]).expect_err("no 2019 rows");
        assert_eq!(
            err.to_string(),
            "No data available for the year 2019 and month(s): 1"
        );
    }
}
