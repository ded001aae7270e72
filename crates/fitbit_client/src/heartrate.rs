//! Heart-rate time series queries.
//!
//! Every endpoint variant takes an options struct of raw caller values.
//! [`resolve`](DateRangeOptions::resolve) checks them and yields a
//! [`HeartRateQuery`], which is the only thing that can be rendered into a
//! resource path.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::deprecation::{DeprecationNotice, Deprecations};
use crate::http_client::ReqwestTransport;
use crate::utils::{TODAY, format_date, format_time, parse_date, parse_time};
use crate::{FitbitError, HttpTransport, UserContext};

const RESOURCE: &str = "activities/heart/date";

/// Second date segment of an intraday query when no end date is given.
///
/// A period token in the date slot; the API accepts it.
pub const INTRADAY_DEFAULT_END: &str = "1d";

const REGULAR_TIME_SERIES_DEPRECATION: DeprecationNotice = DeprecationNotice {
    operation: "regular_time_series",
    replacements: &["series_for_date_range", "series_for_period"],
};

fn token_list(tokens: &[&str]) -> String {
    format!("[{}]", tokens.join(", "))
}

/// Lookback window used in place of an explicit end date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::OneDay,
        Period::SevenDays,
        Period::ThirtyDays,
        Period::OneWeek,
        Period::OneMonth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::SevenDays => "7d",
            Period::ThirtyDays => "30d",
            Period::OneWeek => "1w",
            Period::OneMonth => "1m",
        }
    }

    fn invalid(value: &str) -> FitbitError {
        let tokens: Vec<&str> = Self::ALL.iter().map(|p| p.as_str()).collect();
        FitbitError::invalid(format!(
            "Invalid period: {value}. Valid periods are {}.",
            token_list(&tokens)
        ))
    }
}

impl FromStr for Period {
    type Err = FitbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Self::invalid(s))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling granularity of an intraday series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DetailLevel {
    #[serde(rename = "1sec")]
    OneSecond,
    #[serde(rename = "1min")]
    OneMinute,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 2] = [DetailLevel::OneSecond, DetailLevel::OneMinute];

    pub fn as_str(self) -> &'static str {
        match self {
            DetailLevel::OneSecond => "1sec",
            DetailLevel::OneMinute => "1min",
        }
    }

    fn invalid() -> FitbitError {
        let tokens: Vec<&str> = Self::ALL.iter().map(|d| d.as_str()).collect();
        FitbitError::invalid(format!(
            "Please specify the detail level. Detail level should be one of {}.",
            token_list(&tokens)
        ))
    }
}

impl FromStr for DetailLevel {
    type Err = FitbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(Self::invalid)
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar date, or the `today` sentinel passed through verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateSpec {
    Today,
    Date(NaiveDate),
}

impl FromStr for DateSpec {
    type Err = FitbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == TODAY {
            return Ok(DateSpec::Today);
        }
        parse_date(s).map(DateSpec::Date).ok_or_else(|| {
            FitbitError::invalid(format!(
                "Invalid date: {s}. Expected YYYY-MM-DD or '{TODAY}'."
            ))
        })
    }
}

impl From<NaiveDate> for DateSpec {
    fn from(d: NaiveDate) -> Self {
        DateSpec::Date(d)
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSpec::Today => f.write_str(TODAY),
            DateSpec::Date(d) => f.write_str(&format_date(*d)),
        }
    }
}

/// Clock time rendered as `HH:mm`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSpec(pub NaiveTime);

impl FromStr for TimeSpec {
    type Err = FitbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
            .map(TimeSpec)
            .ok_or_else(|| FitbitError::invalid(format!("Invalid time: {s}. Expected HH:mm.")))
    }
}

impl From<NaiveTime> for TimeSpec {
    fn from(t: NaiveTime) -> Self {
        TimeSpec(t)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_time(self.0))
    }
}

/// Only `None` is absent. Values are matched exactly, untrimmed.
fn provided(v: &Option<String>) -> Option<&str> {
    v.as_deref()
}

fn start_date(v: &Option<String>) -> Result<DateSpec, FitbitError> {
    provided(v)
        .ok_or_else(|| FitbitError::invalid("Start date not provided."))?
        .parse()
}

fn end_date(v: &Option<String>) -> Result<DateSpec, FitbitError> {
    provided(v)
        .ok_or_else(|| FitbitError::invalid("End date not provided."))?
        .parse()
}

fn period(v: &Option<String>) -> Result<Period, FitbitError> {
    match provided(v) {
        Some(p) => p.parse(),
        None => Err(Period::invalid("none")),
    }
}

/// A validated heart-rate query, ready to render as a resource path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeartRateQuery {
    DateRange {
        start: DateSpec,
        end: DateSpec,
    },
    Period {
        start: DateSpec,
        period: Period,
    },
    Intraday {
        start: DateSpec,
        end: Option<DateSpec>,
        detail_level: DetailLevel,
        window: Option<(TimeSpec, TimeSpec)>,
    },
}

impl HeartRateQuery {
    /// Render as `user/{user_id}/activities/heart/date/...json`.
    pub fn path(&self, user_id: &str) -> String {
        let mut path = format!("user/{user_id}/{RESOURCE}");
        match self {
            HeartRateQuery::DateRange { start, end } => {
                path.push_str(&format!("/{start}/{end}"));
            }
            HeartRateQuery::Period { start, period } => {
                path.push_str(&format!("/{start}/{period}"));
            }
            HeartRateQuery::Intraday {
                start,
                end,
                detail_level,
                window,
            } => {
                let end = end
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| INTRADAY_DEFAULT_END.to_string());
                path.push_str(&format!("/{start}/{end}/{detail_level}"));
                if let Some((from, to)) = window {
                    path.push_str(&format!("/time/{from}/{to}"));
                }
            }
        }
        path.push_str(".json");
        path
    }
}

/// Heart-rate series between two dates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DateRangeOptions {
    /// `YYYY-MM-DD` or `today`. Required.
    pub start_date: Option<String>,
    /// `YYYY-MM-DD` or `today`. Required.
    pub end_date: Option<String>,
}

impl DateRangeOptions {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
        }
    }

    pub fn resolve(&self) -> Result<HeartRateQuery, FitbitError> {
        let start = start_date(&self.start_date)?;
        let end = end_date(&self.end_date)?;
        Ok(HeartRateQuery::DateRange { start, end })
    }
}

/// Heart-rate series for a lookback period ending at a date.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PeriodOptions {
    /// `YYYY-MM-DD` or `today`. Required.
    pub start_date: Option<String>,
    /// One of `1d`, `7d`, `30d`, `1w`, `1m`. Required.
    pub period: Option<String>,
}

impl PeriodOptions {
    pub fn new(start_date: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            period: Some(period.into()),
        }
    }

    pub fn resolve(&self) -> Result<HeartRateQuery, FitbitError> {
        let start = start_date(&self.start_date)?;
        let period = period(&self.period)?;
        Ok(HeartRateQuery::Period { start, period })
    }
}

/// Legacy combined form: a start date plus exactly one of end date or period.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeSeriesOptions {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub period: Option<String>,
}

impl TimeSeriesOptions {
    pub fn start_date(mut self, v: impl Into<String>) -> Self {
        self.start_date = Some(v.into());
        self
    }

    pub fn end_date(mut self, v: impl Into<String>) -> Self {
        self.end_date = Some(v.into());
        self
    }

    pub fn period(mut self, v: impl Into<String>) -> Self {
        self.period = Some(v.into());
        self
    }

    pub fn resolve(&self) -> Result<HeartRateQuery, FitbitError> {
        let start = start_date(&self.start_date)?;
        match (provided(&self.end_date), provided(&self.period)) {
            (Some(_), Some(_)) => Err(FitbitError::invalid(
                "Both end_date and period specified. Specify only one.",
            )),
            (None, None) => Err(FitbitError::invalid(
                "Neither end_date nor period specified. Specify at least one.",
            )),
            (None, Some(p)) => Ok(HeartRateQuery::Period {
                start,
                period: p.parse()?,
            }),
            (Some(e), None) => Ok(HeartRateQuery::DateRange {
                start,
                end: e.parse()?,
            }),
        }
    }
}

/// Intraday series at a given detail level, optionally clipped to a time window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntradayOptions {
    /// `YYYY-MM-DD` or `today`. Required.
    pub start_date: Option<String>,
    /// Defaults to [`INTRADAY_DEFAULT_END`] when absent.
    pub end_date: Option<String>,
    /// `1sec` or `1min`. Required.
    pub detail_level: Option<String>,
    /// `HH:mm`. Must be given together with `end_time`.
    pub start_time: Option<String>,
    /// `HH:mm`. Must be given together with `start_time`.
    pub end_time: Option<String>,
}

impl IntradayOptions {
    pub fn new(start_date: impl Into<String>, detail_level: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            detail_level: Some(detail_level.into()),
            ..Self::default()
        }
    }

    pub fn end_date(mut self, v: impl Into<String>) -> Self {
        self.end_date = Some(v.into());
        self
    }

    pub fn start_time(mut self, v: impl Into<String>) -> Self {
        self.start_time = Some(v.into());
        self
    }

    pub fn end_time(mut self, v: impl Into<String>) -> Self {
        self.end_time = Some(v.into());
        self
    }

    pub fn time_window(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.start_time(from).end_time(to)
    }

    pub fn resolve(&self) -> Result<HeartRateQuery, FitbitError> {
        let start = start_date(&self.start_date)?;
        let detail_level = provided(&self.detail_level)
            .ok_or_else(DetailLevel::invalid)?
            .parse()?;
        let window = match (provided(&self.start_time), provided(&self.end_time)) {
            (Some(from), Some(to)) => Some((from.parse()?, to.parse()?)),
            (None, None) => None,
            _ => {
                return Err(FitbitError::invalid(
                    "Either specify both the start_time and end_time or specify neither.",
                ));
            }
        };
        let end = provided(&self.end_date)
            .map(str::parse::<DateSpec>)
            .transpose()?;
        Ok(HeartRateQuery::Intraday {
            start,
            end,
            detail_level,
            window,
        })
    }
}

/// Heart-rate endpoints bound to a transport and a user.
#[derive(Clone, Debug)]
pub struct HeartRateClient<T, U = String> {
    transport: T,
    user: U,
    deprecations: Deprecations,
}

impl HeartRateClient<ReqwestTransport, String> {
    /// Wire a reqwest transport from configuration.
    pub fn from_config(cfg: &Config) -> Self {
        let deprecations = if cfg.deprecation_warnings {
            Deprecations::default()
        } else {
            Deprecations::silent()
        };
        HeartRateClient::new(
            ReqwestTransport::new(&cfg.base_url, cfg.access_token.clone()),
            cfg.user_id.clone(),
        )
        .with_deprecations(deprecations)
    }
}

impl<T, U> HeartRateClient<T, U>
where
    T: HttpTransport,
    U: UserContext,
{
    pub fn new(transport: T, user: U) -> Self {
        Self {
            transport,
            user,
            deprecations: Deprecations::default(),
        }
    }

    pub fn with_deprecations(mut self, deprecations: Deprecations) -> Self {
        self.deprecations = deprecations;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn path_for(&self, query: &HeartRateQuery) -> String {
        query.path(&self.user.user_id())
    }

    /// Send an already validated query. Transport errors are returned as is.
    pub async fn fetch(&self, query: &HeartRateQuery) -> Result<serde_json::Value, FitbitError> {
        let path = self.path_for(query);
        tracing::debug!(%path, "fetching heart rate series");
        self.transport.get_json(&path).await
    }

    pub async fn series_for_date_range(
        &self,
        opts: &DateRangeOptions,
    ) -> Result<serde_json::Value, FitbitError> {
        let query = opts.resolve()?;
        self.fetch(&query).await
    }

    pub async fn series_for_period(
        &self,
        opts: &PeriodOptions,
    ) -> Result<serde_json::Value, FitbitError> {
        let query = opts.resolve()?;
        self.fetch(&query).await
    }

    /// Emits a deprecation notice on every call, including calls that fail
    /// validation.
    #[deprecated(note = "use `series_for_date_range` or `series_for_period`")]
    pub async fn regular_time_series(
        &self,
        opts: &TimeSeriesOptions,
    ) -> Result<serde_json::Value, FitbitError> {
        self.deprecations.emit(&REGULAR_TIME_SERIES_DEPRECATION);
        let query = opts.resolve()?;
        self.fetch(&query).await
    }

    pub async fn intraday_series(
        &self,
        opts: &IntradayOptions,
    ) -> Result<serde_json::Value, FitbitError> {
        let query = opts.resolve()?;
        self.fetch(&query).await
    }
}
