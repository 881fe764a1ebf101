//! Fitness data provider client
//!
//! Pulls today's activity from the fitness provider's dataset API. Each of
//! the six data types is a separate request; they run concurrently and any
//! failure fails the whole pull.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use reqwest::Client;
use std::time::Duration as StdDuration;
use tracing::{debug, warn};
use wellness_coach_shared::fitness::{aggregate, Dataset, FitnessDataType};
use wellness_coach_shared::{FitnessReading, ServiceError, TimestampMs};

/// Time window a reading covers, in ms since epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start_ms: TimestampMs,
    pub end_ms: TimestampMs,
}

impl DayWindow {
    /// Calendar day (UTC) containing `now`, ending one second before midnight
    pub fn containing(now: DateTime<Utc>) -> Self {
        let start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1) - Duration::seconds(1);
        Self {
            start_ms: start.timestamp_millis(),
            end_ms: end.timestamp_millis(),
        }
    }
}

/// Source of fitness readings for a user
#[async_trait]
pub trait FitnessProvider: Send + Sync {
    /// Fetch the aggregated reading for a window using the user's access token
    async fn fetch_reading(
        &self,
        access_token: &str,
        window: DayWindow,
    ) -> Result<FitnessReading, ServiceError>;
}

/// Client for the Google Fit dataset API
#[derive(Clone)]
pub struct GoogleFitClient {
    http: Client,
    base_url: String,
}

impl GoogleFitClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(StdDuration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ServiceError::External(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn dataset_url(&self, data_type: FitnessDataType, window: DayWindow) -> String {
        format!(
            "{}/users/me/dataSources/{}/datasets/{}-{}",
            self.base_url,
            data_type.source_name(),
            window.start_ms,
            window.end_ms
        )
    }

    async fn fetch_dataset(
        &self,
        access_token: &str,
        data_type: FitnessDataType,
        window: DayWindow,
    ) -> Result<(FitnessDataType, f64), ServiceError> {
        let url = self.dataset_url(data_type, window);
        debug!(data_type = data_type.source_name(), "Fetching fitness dataset");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ServiceError::External(format!("Fitness provider request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                data_type = data_type.source_name(),
                status = status.as_u16(),
                "Fitness provider rejected dataset request"
            );
            return Err(ServiceError::Upstream {
                status: status.as_u16(),
                message: format!("Failed to fetch {} data", data_type.source_name()),
            });
        }

        let dataset: Dataset = response
            .json()
            .await
            .map_err(|e| ServiceError::External(format!("Invalid fitness dataset: {}", e)))?;

        Ok((data_type, aggregate(data_type, &dataset.point)))
    }
}

#[async_trait]
impl FitnessProvider for GoogleFitClient {
    async fn fetch_reading(
        &self,
        access_token: &str,
        window: DayWindow,
    ) -> Result<FitnessReading, ServiceError> {
        let [steps, sleep, heart_rate, calories, distance, active] = FitnessDataType::ALL;

        let results = tokio::try_join!(
            self.fetch_dataset(access_token, steps, window),
            self.fetch_dataset(access_token, sleep, window),
            self.fetch_dataset(access_token, heart_rate, window),
            self.fetch_dataset(access_token, calories, window),
            self.fetch_dataset(access_token, distance, window),
            self.fetch_dataset(access_token, active, window),
        )?;

        let mut reading = FitnessReading::default();
        for (data_type, value) in [results.0, results.1, results.2, results.3, results.4, results.5] {
            reading.set(data_type, value);
        }
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use wiremock::matchers::{header, method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn window() -> DayWindow {
        DayWindow::containing(Utc.with_ymd_and_hms(2024, 3, 10, 15, 30, 0).unwrap())
    }

    async fn mount(server: &MockServer, source: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path_regex(format!(r"^/users/me/dataSources/{}/datasets/\d+-\d+$", source.replace('.', r"\."))))
            .and(header("authorization", "Bearer user-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_day_window() {
        let w = window();
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(w.start_ms, start.timestamp_millis());
        assert_eq!(w.end_ms - w.start_ms, 86_399_000);
    }

    #[tokio::test]
    async fn test_fetch_reading_aggregates_all_datasets() {
        let server = MockServer::start().await;
        mount(&server, "com.google.step_count.delta", json!({ "point": [
            { "value": [{ "intVal": 4000 }] }, { "value": [{ "intVal": 3600 }] }
        ]})).await;
        mount(&server, "com.google.sleep.segment", json!({ "point": [
            { "value": [{ "intVal": 420 }] }
        ]})).await;
        mount(&server, "com.google.heart_rate.bpm", json!({ "point": [
            { "value": [{ "fpVal": 62.0 }] }, { "value": [{ "fpVal": 68.0 }] }
        ]})).await;
        mount(&server, "com.google.calories.expended", json!({ "point": [
            { "value": [{ "fpVal": 1250.5 }] }
        ]})).await;
        mount(&server, "com.google.distance.delta", json!({ "point": [
            { "value": [{ "fpVal": 3200.0 }] }
        ]})).await;
        mount(&server, "com.google.active_minutes", json!({})).await;

        let client = GoogleFitClient::new(server.uri(), 5).unwrap();
        let reading = client.fetch_reading("user-token", window()).await.unwrap();

        assert_eq!(reading.steps, Some(7600.0));
        assert_eq!(reading.sleep_hours, Some(7.0));
        assert_eq!(reading.heart_rate_bpm, Some(65.0));
        assert_eq!(reading.calories_burned, Some(1250.5));
        assert_eq!(reading.distance_km, Some(3.2));
        assert_eq!(reading.active_minutes, Some(0.0));
    }

    async fn failing_fetch(status: u16) -> ServiceError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = GoogleFitClient::new(server.uri(), 5).unwrap();
        client.fetch_reading("expired", window()).await.unwrap_err()
    }

    #[tokio::test]
    async fn test_rejected_token_is_not_retryable() {
        let err = failing_fetch(401).await;

        assert!(matches!(err, ServiceError::Upstream { status: 401, .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_provider_outage_is_retryable() {
        let err = failing_fetch(503).await;

        assert!(matches!(err, ServiceError::Upstream { status: 503, .. }));
        assert!(err.is_retryable());
    }
}
