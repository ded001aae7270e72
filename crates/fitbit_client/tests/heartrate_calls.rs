use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fitbit_client::{
    DateRangeOptions, Deprecations, FitbitError, HeartRateClient, HttpTransport, IntradayOptions,
    Period, PeriodOptions, TimeSeriesOptions,
};

/// Records every requested path and answers with a canned body.
#[derive(Default)]
struct Recorder {
    paths: Mutex<Vec<String>>,
    fail_with_status: Option<u16>,
}

impl Recorder {
    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for Recorder {
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, FitbitError> {
        self.paths.lock().unwrap().push(path.to_string());
        match self.fail_with_status {
            Some(status) => Err(FitbitError::from_status(status, "nope".into())),
            None => Ok(serde_json::json!({ "path": path })),
        }
    }
}

fn client() -> (Arc<Recorder>, HeartRateClient<Arc<Recorder>>) {
    let rec = Arc::new(Recorder::default());
    let client = HeartRateClient::new(rec.clone(), "ABC123".to_string())
        .with_deprecations(Deprecations::silent());
    (rec, client)
}

#[tokio::test]
async fn date_range_calls_transport_once_with_built_path() {
    let (rec, client) = client();
    let pairs = [
        ("2022-01-01", "2022-01-31"),
        ("today", "today"),
        ("2021-12-31", "today"),
    ];
    for (start, end) in pairs {
        let v = client
            .series_for_date_range(&DateRangeOptions::new(start, end))
            .await
            .expect("series");
        let expected = format!("user/ABC123/activities/heart/date/{start}/{end}.json");
        assert_eq!(v["path"], serde_json::json!(expected));
    }
    assert_eq!(rec.paths().len(), pairs.len());
}

#[tokio::test]
async fn invalid_periods_make_no_call() {
    let (rec, client) = client();
    for bad in ["", "2d", "1y", "7D", "1 d", "30days"] {
        let err = client
            .series_for_period(&PeriodOptions::new("today", bad))
            .await
            .unwrap_err();
        assert!(matches!(err, FitbitError::InvalidArgument(_)), "{bad}");
    }
    assert!(rec.paths().is_empty());

    for p in Period::ALL {
        client
            .series_for_period(&PeriodOptions::new("2022-01-01", p.as_str()))
            .await
            .expect("valid period");
    }
    assert_eq!(rec.paths().len(), Period::ALL.len());
}

#[tokio::test]
#[allow(deprecated)]
async fn regular_time_series_rejects_both_and_neither() {
    let (rec, client) = client();
    let both = TimeSeriesOptions::default()
        .start_date("2022-01-01")
        .end_date("2022-01-02")
        .period("7d");
    assert!(matches!(
        client.regular_time_series(&both).await,
        Err(FitbitError::InvalidArgument(_))
    ));
    let neither = TimeSeriesOptions::default().start_date("2022-01-01");
    assert!(matches!(
        client.regular_time_series(&neither).await,
        Err(FitbitError::InvalidArgument(_))
    ));
    assert!(rec.paths().is_empty());

    client
        .regular_time_series(&TimeSeriesOptions::default().start_date("2022-01-01").period("7d"))
        .await
        .expect("period form");
    assert_eq!(
        rec.paths(),
        vec!["user/ABC123/activities/heart/date/2022-01-01/7d.json"]
    );
}

#[tokio::test]
#[allow(deprecated)]
async fn deprecation_hook_fires_once_per_legacy_call() {
    let rec = Arc::new(Recorder::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let client = HeartRateClient::new(rec.clone(), "-".to_string())
        .with_deprecations(Deprecations::with_hook(move |n| {
            sink.lock().unwrap().push(n.to_string())
        }));

    client
        .series_for_period(&PeriodOptions::new("today", "1d"))
        .await
        .unwrap();
    client
        .intraday_series(&IntradayOptions::new("today", "1sec"))
        .await
        .unwrap();
    assert!(seen.lock().unwrap().is_empty());

    client
        .regular_time_series(&TimeSeriesOptions::default().start_date("today").end_date("today"))
        .await
        .unwrap();
    let _ = client
        .regular_time_series(&TimeSeriesOptions::default())
        .await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].starts_with("[DEPRECATION] `regular_time_series` is deprecated."));
    assert!(seen[0].contains("`series_for_date_range` or `series_for_period`"));
}

#[tokio::test]
async fn intraday_paths() {
    let (rec, client) = client();

    let err = client
        .intraday_series(&IntradayOptions::new("2022-01-01", "1min").start_time("08:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, FitbitError::InvalidArgument(_)));
    assert!(rec.paths().is_empty());

    client
        .intraday_series(&IntradayOptions::new("2022-01-01", "1sec"))
        .await
        .unwrap();
    client
        .intraday_series(
            &IntradayOptions::new("2022-01-01", "1min")
                .end_date("2022-01-01")
                .time_window("08:00", "18:00"),
        )
        .await
        .unwrap();
    assert_eq!(
        rec.paths(),
        vec![
            "user/ABC123/activities/heart/date/2022-01-01/1d/1sec.json",
            "user/ABC123/activities/heart/date/2022-01-01/2022-01-01/1min/time/08:00/18:00.json",
        ]
    );
}

#[tokio::test]
async fn transport_errors_pass_through() {
    let rec = Arc::new(Recorder {
        fail_with_status: Some(404),
        ..Default::default()
    });
    let client = HeartRateClient::new(rec.clone(), "-".to_string());
    let err = client
        .series_for_date_range(&DateRangeOptions::new("today", "today"))
        .await
        .unwrap_err();
    assert!(matches!(err, FitbitError::NotFound(ref b) if b == "nope"));
    assert_eq!(rec.paths().len(), 1);
}

#[tokio::test]
async fn padded_tokens_make_no_call() {
    let (rec, client) = client();
    let err = client
        .series_for_period(&PeriodOptions::new("today", " 7d "))
        .await
        .unwrap_err();
    assert!(matches!(err, FitbitError::InvalidArgument(_)));
    let err = client
        .intraday_series(&IntradayOptions::new("today", "1sec\n"))
        .await
        .unwrap_err();
    assert!(matches!(err, FitbitError::InvalidArgument(_)));
    assert!(rec.paths().is_empty());
}

#[tokio::test]
#[allow(deprecated)]
async fn empty_end_date_with_period_is_both() {
    let (rec, client) = client();
    let opts = TimeSeriesOptions::default()
        .start_date("today")
        .end_date("")
        .period("7d");
    match client.regular_time_series(&opts).await {
        Err(FitbitError::InvalidArgument(msg)) => {
            assert_eq!(msg, "Both end_date and period specified. Specify only one.")
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(rec.paths().is_empty());
}

#[tokio::test]
async fn invalid_time_window_makes_no_call() {
    let (rec, client) = client();
    let err = client
        .intraday_series(&IntradayOptions::new("2022-01-01", "1min").time_window("8am", "18:00"))
        .await
        .unwrap_err();
    match err {
        FitbitError::InvalidArgument(msg) => assert!(msg.starts_with("Invalid time: 8am")),
        other => panic!("unexpected {other:?}"),
    }
    assert!(rec.paths().is_empty());
}

#[tokio::test]
#[allow(deprecated)]
async fn missing_start_date_for_period_and_legacy() {
    let (rec, client) = client();
    let period_only = PeriodOptions {
        start_date: None,
        period: Some("7d".into()),
    };
    match client.series_for_period(&period_only).await {
        Err(FitbitError::InvalidArgument(msg)) => assert_eq!(msg, "Start date not provided."),
        other => panic!("unexpected {other:?}"),
    }
    let legacy = TimeSeriesOptions::default().period("7d");
    match client.regular_time_series(&legacy).await {
        Err(FitbitError::InvalidArgument(msg)) => assert_eq!(msg, "Start date not provided."),
        other => panic!("unexpected {other:?}"),
    }
    assert!(rec.paths().is_empty());
}
