/// Data layer: core types, loading, period selection and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read two columns → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ PriceTable  │  parse YYYYMM labels, drop invalid rows
///   └────────────┘
///        │      "2010,2012-2014"
///        │            │
///        │            ▼
///        │      ┌──────────┐
///        │      │  period   │  tokens → PeriodSpec → expanded periods
///        │      └──────────┘
///        ▼            │
///   ┌───────────┐     │
///   │ aggregate  │◄────┘  filter by year / month, mean price per period
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  chart    │  one series per token (year view) or per year (month view)
///   └──────────┘
/// ```

pub mod aggregate;
pub mod chart;
pub mod error;
pub mod loader;
pub mod model;
pub mod period;
