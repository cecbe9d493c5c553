use super::aggregate::{PeriodField, PeriodMeans, average_by, filter_and_average, filter_rows};
use super::error::SelectionError;
use super::model::PriceTable;
use super::period::{PeriodSpec, expand_within, parse_periods};

// ---------------------------------------------------------------------------
// Chart description (renderer independent)
// ---------------------------------------------------------------------------

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    /// `[period, mean price]` pairs, ordered by period.
    pub points: Vec<[f64; 2]>,
}

/// Everything the plot panel needs to draw one display action's result.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    /// Periods that get a labeled tick on the x axis.
    pub x_ticks: Vec<i32>,
}

// ---------------------------------------------------------------------------
// Year view
// ---------------------------------------------------------------------------

/// Build the by-year chart for a selector such as `"2008,2012-2015"`.
///
/// The flattened selection must match at least one row. Each token then
/// becomes its own series: a range plots the yearly means inside it, a single
/// year plots one point. Overlapping tokens plot overlapping series.
pub fn year_chart(
    table: &PriceTable,
    years_input: &str,
    commodity: &str,
) -> Result<Chart, SelectionError> {
    let specs = parse_periods(years_input)?;
    log::info!("Years to display: {specs:?}");

    let field = PeriodField::Year;
    let selected = filter_rows(table, field, &specs);
    if selected.is_empty() {
        return Err(SelectionError::NoData {
            selector: field.describe(years_input),
        });
    }
    log::debug!(
        "Selected rows preview: {:?}",
        selected.iter().take(5).map(|o| o.to_string()).collect::<Vec<_>>()
    );

    let series = specs
        .iter()
        .map(|spec| {
            let in_token = selected.iter().copied().filter(|o| spec.contains(o.year));
            Series {
                label: spec.to_string(),
                points: to_points(&average_by(in_token, field)),
            }
        })
        .collect();

    // Ticks only for selected years inside the table's span.
    let x_ticks = match table.year_span() {
        Some((first, last)) => expand_within(&specs, first..=last),
        None => Vec::new(),
    };

    Ok(Chart {
        title: format!("{commodity} Prices by Year"),
        x_label: "Year".to_string(),
        y_label: format!("{commodity} Price"),
        series,
        x_ticks,
    })
}

// ---------------------------------------------------------------------------
// Month view
// ---------------------------------------------------------------------------

/// Build the by-month chart of one year for a month selector such as `"1,3-4"`.
pub fn month_chart(
    table: &PriceTable,
    year_input: &str,
    months_input: &str,
    commodity: &str,
) -> Result<Chart, SelectionError> {
    let year = match year_input.parse::<PeriodSpec>()? {
        PeriodSpec::Single(year) => year,
        PeriodSpec::Range { .. } => {
            return Err(SelectionError::parse(
                year_input.trim(),
                "the month view needs a single year",
            ));
        }
    };
    let months = parse_periods(months_input)?;
    log::info!("Year to display: {year}, months to display: {months:?}");

    let field = PeriodField::Month { year };
    let means = filter_and_average(table, field, &months).map_err(|err| match err {
        SelectionError::NoData { .. } => SelectionError::NoData {
            selector: field.describe(months_input),
        },
        other => other,
    })?;

    Ok(Chart {
        title: format!("{commodity} Prices for {year} by Month"),
        x_label: "Month".to_string(),
        y_label: format!("{commodity} Price"),
        series: vec![Series {
            label: format!("{year} {months_input}"),
            points: to_points(&means),
        }],
        x_ticks: expand_within(&months, 1..=12),
    })
}

fn to_points(means: &PeriodMeans) -> Vec<[f64; 2]> {
    means
        .iter()
        .map(|(&period, &mean)| [period as f64, mean])
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::Observation;

    fn table() -> PriceTable {
        let mut observations = Vec::new();
        for year in 2009..=2012 {
            for month in 1..=4 {
                let date = NaiveDate::from_ymd_opt(year, month, 1).expect("valid date");
                let price = (year - 2000) as f64 * 10.0 + month as f64;
                observations.push(Observation::new(date, price));
            }
        }
        PriceTable {
            observations,
            ..PriceTable::default()
        }
    }

    #[test]
    fn year_chart_plots_one_series_per_token() {
        let chart = year_chart(&table(), "2009, 2010-2012", "Brent Crude Oil").expect("chart");

        assert_eq!(chart.title, "Brent Crude Oil Prices by Year");
        assert_eq!(chart.x_label, "Year");
        assert_eq!(chart.x_ticks, vec![2009, 2010, 2011, 2012]);
        assert_eq!(chart.series.len(), 2);

        assert_eq!(chart.series[0].label, "2009");
        assert_eq!(chart.series[0].points, vec![[2009.0, 92.5]]);

        assert_eq!(chart.series[1].label, "2010-2012");
        assert_eq!(
            chart.series[1].points,
            vec![[2010.0, 102.5], [2011.0, 112.5], [2012.0, 122.5]]
        );
    }

    #[test]
    fn overlapping_tokens_keep_duplicate_series() {
        let chart = year_chart(&table(), "2010,2009-2011", "Oil").expect("chart");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].points, vec![[2010.0, 102.5]]);
        assert_eq!(chart.series[1].points.len(), 3);
        assert_eq!(chart.x_ticks, vec![2010, 2009, 2010, 2011]);
    }

    #[test]
    fn token_without_rows_gives_empty_series_when_others_match() {
        let chart = year_chart(&table(), "1990,2010", "Oil").expect("2010 has rows");
        assert!(chart.series[0].points.is_empty());
        assert_eq!(chart.series[1].points.len(), 1);
    }

    #[test]
    fn reversed_range_token_gives_empty_series() {
        let chart = year_chart(&table(), "2014-2012,2010", "Oil").expect("2010 has rows");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].label, "2014-2012");
        assert!(chart.series[0].points.is_empty());
        assert_eq!(chart.series[1].points, vec![[2010.0, 102.5]]);
        assert_eq!(chart.x_ticks, vec![2010]);
    }

    #[test]
    fn huge_ranges_return_promptly_with_clipped_ticks() {
        let started = Instant::now();

        let chart = year_chart(&table(), "2030-20000000,2010", "Oil").expect("2010 has rows");
        assert!(chart.series[0].points.is_empty());
        assert_eq!(chart.x_ticks, vec![2010]);

        let chart = year_chart(&table(), "0-2000000000", "Oil").expect("every year");
        assert_eq!(chart.series[0].points.len(), 4);
        assert_eq!(chart.x_ticks, vec![2009, 2010, 2011, 2012]);

        let chart = month_chart(&table(), "2010", "0-2000000000", "Oil").expect("months");
        assert_eq!(chart.x_ticks, (1..=12).collect::<Vec<_>>());
        assert_eq!(chart.series[0].points.len(), 4);

        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn year_chart_reports_unmatched_selector() {
        let err = year_chart(&table(), "1980-1985", "Oil").expect_err("no rows");
        assert_eq!(
            err.to_string(),
            "No data available for the year(s): 1980-1985"
        );
    }

    #[test]
    fn year_chart_rejects_malformed_token() {
        let err = year_chart(&table(), "abc", "Oil").expect_err("not a year");
        assert!(matches!(err, SelectionError::Parse { ref token, .. } if token == "abc"));
    }

    #[test]
    fn month_chart_selects_months_of_one_year() {
        let chart = month_chart(&table(), "2010", "1,3-4", "Oil").expect("chart");

        assert_eq!(chart.title, "Oil Prices for 2010 by Month");
        assert_eq!(chart.x_ticks, vec![1, 3, 4]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, "2010 1,3-4");
        assert_eq!(
            chart.series[0].points,
            vec![[1.0, 101.0], [3.0, 103.0], [4.0, 104.0]]
        );
    }

    #[test]
    fn month_chart_needs_a_single_year() {
        assert!(matches!(
            month_chart(&table(), "2010-2011", "1", "Oil"),
            Err(SelectionError::Parse { .. })
        ));
        assert!(matches!(
            month_chart(&table(), "", "1", "Oil"),
            Err(SelectionError::Parse { .. })
        ));
    }

    #[test]
    fn month_chart_reports_unmatched_months() {
        let err = month_chart(&table(), "2010", "7-9", "Oil").expect_err("no rows");
        assert_eq!(
            err.to_string(),
            "No data available for the year 2010 and month(s): 7-9"
        );
    }
}
