use fitbit_client::{HeartRateClient, IntradayOptions, PeriodOptions, config::Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // `FITBIT_LOG_LEVEL` wins over `RUST_LOG`; default `info`.
    let log_env = std::env::var("FITBIT_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    // Expects FITBIT_ACCESS_TOKEN in env
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let client = HeartRateClient::from_config(&cfg);

    let week = client
        .series_for_period(&PeriodOptions::new("today", "7d"))
        .await?;
    if let Some(days) = week["activities-heart"].as_array() {
        for day in days {
            println!(
                "{}: resting {}",
                day["dateTime"].as_str().unwrap_or("?"),
                day["value"]["restingHeartRate"]
            );
        }
    }

    let morning = client
        .intraday_series(&IntradayOptions::new("today", "1min").time_window("06:00", "09:00"))
        .await?;
    let samples = morning["activities-heart-intraday"]["dataset"]
        .as_array()
        .map(|a| a.len())
        .unwrap_or(0);
    println!("intraday samples 06:00-09:00: {}", samples);
    Ok(())
}
