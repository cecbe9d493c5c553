use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::error::SelectionError;

// ---------------------------------------------------------------------------
// PeriodSpec – one token of a period selector
// ---------------------------------------------------------------------------

/// A parsed selector token: a single period or an inclusive range.
///
/// `Range { lo, hi }` with `lo > hi` is accepted and simply expands to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodSpec {
    Single(i32),
    Range { lo: i32, hi: i32 },
}

impl PeriodSpec {
    /// Every period covered by this token, in ascending order.
    pub fn periods(&self) -> RangeInclusive<i32> {
        match *self {
            PeriodSpec::Single(p) => p..=p,
            PeriodSpec::Range { lo, hi } => lo..=hi,
        }
    }

    /// The part of this token inside `bounds`, as a (possibly empty) range.
    pub fn clip(&self, bounds: &RangeInclusive<i32>) -> PeriodSpec {
        let periods = self.periods();
        PeriodSpec::Range {
            lo: (*periods.start()).max(*bounds.start()),
            hi: (*periods.end()).min(*bounds.end()),
        }
    }

    /// Whether `period` falls within this token.
    pub fn contains(&self, period: i32) -> bool {
        self.periods().contains(&period)
    }
}

impl fmt::Display for PeriodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodSpec::Single(p) => write!(f, "{p}"),
            PeriodSpec::Range { lo, hi } => write!(f, "{lo}-{hi}"),
        }
    }
}

impl FromStr for PeriodSpec {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.contains('-') {
            let sides: Vec<&str> = token.split('-').collect();
            let [lo, hi] = sides.as_slice() else {
                return Err(SelectionError::parse(token, "expected a range like 2012-2014"));
            };
            let lo = parse_int(token, lo)?;
            let hi = parse_int(token, hi)?;
            Ok(PeriodSpec::Range { lo, hi })
        } else {
            parse_int(token, token).map(PeriodSpec::Single)
        }
    }
}

fn parse_int(token: &str, side: &str) -> Result<i32, SelectionError> {
    let side = side.trim();
    side.parse::<i32>()
        .map_err(|_| SelectionError::parse(token, format!("'{side}' is not an integer")))
}

// ---------------------------------------------------------------------------
// Selector parsing and expansion
// ---------------------------------------------------------------------------

/// Parse a selector such as `"2010,2012-2014"` into its tokens, in input order.
///
/// Blank input yields no tokens; a blank token between commas is an error.
pub fn parse_periods(input: &str) -> Result<Vec<PeriodSpec>, SelectionError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input.split(',').map(str::parse).collect()
}

/// Flatten the tokens into concrete periods. Order follows the tokens and
/// duplicates from overlapping tokens are kept.
pub fn expand(specs: &[PeriodSpec]) -> Vec<i32> {
    specs.iter().flat_map(PeriodSpec::periods).collect()
}

/// Like [`expand`], but each token is first clipped to `bounds`, so an
/// absurdly wide range costs no more than the bounds themselves.
pub fn expand_within(specs: &[PeriodSpec], bounds: RangeInclusive<i32>) -> Vec<i32> {
    let clipped: Vec<PeriodSpec> = specs.iter().map(|spec| spec.clip(&bounds)).collect();
    expand(&clipped)
}

/// Whether any token covers `period`.
pub fn selects(specs: &[PeriodSpec], period: i32) -> bool {
    specs.iter().any(|spec| spec.contains(period))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_singles_and_ranges_in_order() {
        let specs = parse_periods("2010,2012-2014").expect("valid selector");
        assert_eq!(
            specs,
            vec![
                PeriodSpec::Single(2010),
                PeriodSpec::Range { lo: 2012, hi: 2014 }
            ]
        );
    }

    #[test]
    fn trims_whitespace_around_tokens_and_sides() {
        let specs = parse_periods(" 1 , 3 - 4 ").expect("valid selector");
        assert_eq!(
            specs,
            vec![PeriodSpec::Single(1), PeriodSpec::Range { lo: 3, hi: 4 }]
        );
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(parse_periods("").expect("empty").is_empty());
        assert!(parse_periods("   ").expect("blank").is_empty());
    }

    #[test]
    fn rejects_non_numeric_token() {
        let err = parse_periods("2010,abc").expect_err("abc is not a year");
        match err {
            SelectionError::Parse { token, .. } => assert_eq!(token, "abc"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_ranges() {
        for input in ["2010-", "-2010", "2010-2011-2012", "20x0-2012"] {
            let err = parse_periods(input).expect_err("malformed range");
            assert!(
                matches!(err, SelectionError::Parse { .. }),
                "{input} gave {err:?}"
            );
        }
    }

    #[test]
    fn rejects_empty_token_from_trailing_comma() {
        assert!(matches!(
            parse_periods("2010,"),
            Err(SelectionError::Parse { .. })
        ));
    }

    #[test]
    fn reversed_range_is_accepted_and_expands_to_nothing() {
        let specs = parse_periods("2014-2012").expect("reversed range parses");
        assert_eq!(specs, vec![PeriodSpec::Range { lo: 2014, hi: 2012 }]);
        assert!(expand(&specs).is_empty());
    }

    #[test]
    fn expands_ranges_inclusively() {
        let specs = [
            PeriodSpec::Single(2010),
            PeriodSpec::Range { lo: 2012, hi: 2014 },
        ];
        assert_eq!(expand(&specs), vec![2010, 2012, 2013, 2014]);
    }

    #[test]
    fn expansion_keeps_duplicates_from_overlapping_tokens() {
        let specs = parse_periods("2010,2009-2011").expect("valid selector");
        assert_eq!(expand(&specs), vec![2010, 2009, 2010, 2011]);
    }

    #[test]
    fn bounded_expansion_clips_each_token() {
        let specs = parse_periods("0-2000000000,2010,1990-1991").expect("valid selector");
        assert_eq!(
            expand_within(&specs, 2009..=2011),
            vec![2009, 2010, 2011, 2010]
        );
        assert_eq!(
            expand_within(&specs, 1995..=2000),
            (1995..=2000).collect::<Vec<_>>()
        );
    }

    #[test]
    fn selects_without_expanding() {
        let specs = parse_periods("2030-2000000000,1990").expect("valid selector");
        assert!(selects(&specs, 1990));
        assert!(selects(&specs, 1_999_999_999));
        assert!(!selects(&specs, 2029));
        assert!(!selects(&[], 2010));
    }

    #[test]
    fn display_matches_token_syntax() {
        assert_eq!(PeriodSpec::Single(7).to_string(), "7");
        assert_eq!(PeriodSpec::Range { lo: 3, hi: 4 }.to_string(), "3-4");
        assert!(PeriodSpec::Range { lo: 3, hi: 4 }.contains(4));
        assert!(!PeriodSpec::Single(3).contains(4));
    }
}
