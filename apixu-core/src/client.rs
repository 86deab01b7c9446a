use anyhow::anyhow;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::{
    Config,
    api::{Api, HttpApi, Params},
    error::Result,
    model::{Conditions, CurrentWeather, Forecast, History, Search},
    serializer::{JsonSerializer, Serializer},
    validate::{DEFAULT_LANGUAGE, validate_hour, validate_language, validate_query},
};

/// Static reference document listing every condition code.
pub const CONDITIONS_URL: &str = "https://www.weatherapi.com/docs/weather_conditions.json";

/// Wire format for the `dt` and `end_dt` parameters.
pub const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Entry point of the library.
///
/// Every operation validates its input first and returns
/// [`ApixuError::InvalidQuery`](crate::ApixuError::InvalidQuery) without
/// touching the transport when something is wrong. Transport and
/// deserialization failures are passed through untouched.
#[derive(Debug, Clone)]
pub struct Apixu<A = HttpApi, S = JsonSerializer> {
    api: A,
    serializer: S,
}

impl<A: Api, S: Serializer> Apixu<A, S> {
    pub fn new(api: A, serializer: S) -> Self {
        Self { api, serializer }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    pub async fn conditions(&self) -> Result<Conditions> {
        self.fetch(CONDITIONS_URL, &Params::new()).await
    }

    /// Current weather for `query`. `lang` defaults to English.
    pub async fn current(&self, query: &str, lang: Option<&str>) -> Result<CurrentWeather> {
        let lang = lang.unwrap_or(DEFAULT_LANGUAGE);
        validate_query(query)?;
        validate_language(lang)?;

        let params = Params::from([
            ("q", query.trim().to_owned()),
            ("lang", lang.trim().to_owned()),
        ]);

        self.fetch("current", &params).await
    }

    pub async fn search(&self, query: &str) -> Result<Search> {
        validate_query(query)?;

        let params = Params::from([("q", query.trim().to_owned())]);

        self.fetch("search", &params).await
    }

    /// `days` of forecast for `query`. With `hour` set, the API only returns
    /// that hour of each day.
    pub async fn forecast(
        &self,
        query: &str,
        days: u32,
        hour: Option<u8>,
        lang: Option<&str>,
    ) -> Result<Forecast> {
        let lang = lang.unwrap_or(DEFAULT_LANGUAGE);
        validate_query(query)?;
        validate_language(lang)?;
        if let Some(hour) = hour {
            validate_hour(hour)?;
        }

        let mut params = Params::from([
            ("q", query.trim().to_owned()),
            ("days", days.to_string()),
            ("lang", lang.trim().to_owned()),
        ]);
        if let Some(hour) = hour {
            params.insert("hour", hour.to_string());
        }

        self.fetch("forecast", &params).await
    }

    /// Observed weather from `since`, up to `until` when given.
    pub async fn history(
        &self,
        query: &str,
        since: NaiveDate,
        until: Option<NaiveDate>,
        lang: Option<&str>,
    ) -> Result<History> {
        let lang = lang.unwrap_or(DEFAULT_LANGUAGE);
        validate_query(query)?;
        validate_language(lang)?;

        let mut params = Params::from([
            ("q", query.trim().to_owned()),
            ("dt", since.format(HISTORY_DATE_FORMAT).to_string()),
            ("lang", lang.trim().to_owned()),
        ]);
        if let Some(until) = until {
            params.insert("end_dt", until.format(HISTORY_DATE_FORMAT).to_string());
        }

        self.fetch("history", &params).await
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, params: &Params) -> Result<T> {
        let body = self.api.call(endpoint, params).await?;
        Ok(self.serializer.unserialize(&body)?)
    }
}

impl Apixu {
    /// HTTP client with JSON responses against `base_url`.
    pub fn with_api_key(api_key: String, base_url: &str) -> Self {
        Self::new(HttpApi::with_base_url(api_key, base_url), JsonSerializer)
    }

    /// Build a client from stored configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `apixu configure` or pass --api-key."
            )
        })?;

        Ok(Self::with_api_key(api_key.to_owned(), config.base_url()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ApixuError,
        api::ApiError,
        model::fixtures::{LOCATION, current_weather},
        serializer::{SerializerError, short_type_name},
        validate::MAX_QUERY_LENGTH,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug)]
    enum Reply {
        Body(String),
        Status(u16),
    }

    /// Records every call and answers with a canned reply.
    #[derive(Debug)]
    struct RecordingApi {
        reply: Reply,
        calls: Mutex<Vec<(String, Params)>>,
    }

    impl RecordingApi {
        fn body(body: impl Into<String>) -> Self {
            Self { reply: Reply::Body(body.into()), calls: Mutex::default() }
        }

        fn failing(status: u16) -> Self {
            Self { reply: Reply::Status(status), calls: Mutex::default() }
        }

        fn calls(&self) -> Vec<(String, Params)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Api for RecordingApi {
        async fn call(
            &self,
            endpoint: &str,
            params: &Params,
        ) -> std::result::Result<String, ApiError> {
            self.calls.lock().unwrap().push((endpoint.to_string(), params.clone()));
            match &self.reply {
                Reply::Body(body) => Ok(body.clone()),
                Reply::Status(status) => {
                    Err(ApiError::Status { status: *status, body: "unavailable".into() })
                }
            }
        }
    }

    /// JSON deserialization that also records the requested target types.
    #[derive(Debug, Default)]
    struct RecordingSerializer {
        targets: Mutex<Vec<&'static str>>,
    }

    impl RecordingSerializer {
        fn targets(&self) -> Vec<&'static str> {
            self.targets.lock().unwrap().clone()
        }
    }

    impl Serializer for RecordingSerializer {
        fn unserialize<T: DeserializeOwned>(
            &self,
            body: &str,
        ) -> std::result::Result<T, SerializerError> {
            self.targets.lock().unwrap().push(short_type_name::<T>());
            JsonSerializer.unserialize(body)
        }
    }

    fn client(api: RecordingApi) -> Apixu<RecordingApi, RecordingSerializer> {
        Apixu::new(api, RecordingSerializer::default())
    }

    fn days_body() -> String {
        format!(r#"{{"location": {LOCATION}, "forecast": {{"forecastday": []}}}}"#)
    }

    fn params<const N: usize>(pairs: [(&'static str, &str); N]) -> Params {
        pairs.into_iter().map(|(k, v)| (k, v.to_string())).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Runs every query-taking operation and collects the results.
    async fn all_query_operations<A: Api, S: Serializer>(
        apixu: &Apixu<A, S>,
        query: &str,
    ) -> Vec<ApixuError> {
        let since = date(2023, 1, 1);
        [
            apixu.current(query, None).await.err(),
            apixu.search(query).await.err(),
            apixu.forecast(query, 3, None, None).await.err(),
            apixu.history(query, since, None, None).await.err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    #[tokio::test]
    async fn current_sends_query_and_language() {
        let apixu = client(RecordingApi::body(current_weather()));

        let weather = apixu.current("London", Some("en")).await.expect("current should succeed");

        assert_eq!(weather.location.name, "London");
        assert_eq!(
            apixu.api().calls(),
            vec![("current".to_string(), params([("q", "London"), ("lang", "en")]))]
        );
        assert_eq!(apixu.serializer().targets(), vec!["CurrentWeather"]);
    }

    #[tokio::test]
    async fn current_defaults_to_english() {
        let apixu = client(RecordingApi::body(current_weather()));

        apixu.current("  London ", None).await.expect("current should succeed");

        assert_eq!(apixu.api().calls()[0].1, params([("q", "London"), ("lang", "en")]));
    }

    #[tokio::test]
    async fn search_sends_only_the_query() {
        let apixu = client(RecordingApi::body("[]"));

        let results = apixu.search("Lond").await.expect("search should succeed");

        assert!(results.is_empty());
        assert_eq!(apixu.api().calls(), vec![("search".to_string(), params([("q", "Lond")]))]);
        assert_eq!(apixu.serializer().targets(), vec!["Search"]);
    }

    #[tokio::test]
    async fn forecast_omits_hour_when_absent() {
        let apixu = client(RecordingApi::body(days_body()));

        apixu.forecast("Paris", 3, None, None).await.expect("forecast should succeed");

        let (endpoint, sent) = apixu.api().calls().remove(0);
        assert_eq!(endpoint, "forecast");
        assert_eq!(sent, params([("q", "Paris"), ("days", "3"), ("lang", "en")]));
        assert!(!sent.contains_key("hour"));
        assert_eq!(apixu.serializer().targets(), vec!["Forecast"]);
    }

    #[tokio::test]
    async fn forecast_includes_explicit_hour() {
        let apixu = client(RecordingApi::body(days_body()));

        apixu.forecast("Paris", 3, Some(14), Some("fr")).await.expect("forecast should succeed");

        assert_eq!(
            apixu.api().calls()[0].1,
            params([("q", "Paris"), ("days", "3"), ("hour", "14"), ("lang", "fr")])
        );
    }

    #[tokio::test]
    async fn forecast_hour_zero_is_sent() {
        let apixu = client(RecordingApi::body(days_body()));

        apixu.forecast("Paris", 1, Some(0), None).await.expect("forecast should succeed");

        assert_eq!(apixu.api().calls()[0].1.get("hour").map(String::as_str), Some("0"));
    }

    #[tokio::test]
    async fn forecast_rejects_out_of_range_hour() {
        let apixu = client(RecordingApi::body(days_body()));

        let err = apixu.forecast("Paris", 3, Some(24), None).await.unwrap_err();

        assert!(err.is_invalid_query());
        assert!(apixu.api().calls().is_empty());
    }

    #[tokio::test]
    async fn history_without_end_date() {
        let apixu = client(RecordingApi::body(days_body()));

        apixu
            .history("Berlin", date(2023, 1, 1), None, None)
            .await
            .expect("history should succeed");

        let (endpoint, sent) = apixu.api().calls().remove(0);
        assert_eq!(endpoint, "history");
        assert_eq!(sent, params([("q", "Berlin"), ("dt", "2023-01-01"), ("lang", "en")]));
        assert_eq!(apixu.serializer().targets(), vec!["History"]);
    }

    #[tokio::test]
    async fn history_with_end_date() {
        let apixu = client(RecordingApi::body(days_body()));

        apixu
            .history("Berlin", date(2023, 1, 1), Some(date(2023, 1, 5)), Some("de"))
            .await
            .expect("history should succeed");

        assert_eq!(
            apixu.api().calls()[0].1,
            params([
                ("q", "Berlin"),
                ("dt", "2023-01-01"),
                ("end_dt", "2023-01-05"),
                ("lang", "de"),
            ])
        );
    }

    #[tokio::test]
    async fn conditions_calls_reference_document_without_params() {
        let body = r#"[{"code": 1000, "day": "Sunny", "night": "Clear", "icon": 113}]"#;
        let apixu = client(RecordingApi::body(body));

        let conditions = apixu.conditions().await.expect("conditions should succeed");

        assert_eq!(conditions.len(), 1);
        assert_eq!(apixu.api().calls(), vec![(CONDITIONS_URL.to_string(), Params::new())]);
        assert_eq!(apixu.serializer().targets(), vec!["Conditions"]);
    }

    #[tokio::test]
    async fn blank_query_never_reaches_transport() {
        let apixu = client(RecordingApi::body(days_body()));

        for query in ["", "   ", "\n\t"] {
            let errors = all_query_operations(&apixu, query).await;
            assert_eq!(errors.len(), 4);
            for err in errors {
                assert!(err.is_invalid_query());
                assert_eq!(err.to_string(), "Query is missing");
            }
        }

        assert!(apixu.api().calls().is_empty());
        assert!(apixu.serializer().targets().is_empty());
    }

    #[tokio::test]
    async fn overlong_query_never_reaches_transport() {
        let apixu = client(RecordingApi::body(days_body()));
        let query = "x".repeat(MAX_QUERY_LENGTH + 1);

        let errors = all_query_operations(&apixu, &query).await;

        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(ApixuError::is_invalid_query));
        assert!(apixu.api().calls().is_empty());
    }

    #[tokio::test]
    async fn unsupported_language_never_reaches_transport() {
        let apixu = client(RecordingApi::body(days_body()));
        let since = date(2023, 1, 1);

        for lang in ["", "xx", "EN"] {
            let errors = [
                apixu.current("London", Some(lang)).await.err(),
                apixu.forecast("London", 3, None, Some(lang)).await.err(),
                apixu.history("London", since, None, Some(lang)).await.err(),
            ];
            for err in errors {
                let err = err.expect("language should be rejected");
                assert_eq!(err.to_string(), "Language not supported");
            }
        }

        assert!(apixu.api().calls().is_empty());
    }

    #[tokio::test]
    async fn transport_errors_pass_through_without_retry() {
        let apixu = client(RecordingApi::failing(503));
        let since = date(2023, 1, 1);

        let errors = [
            apixu.conditions().await.err(),
            apixu.current("London", None).await.err(),
            apixu.search("London").await.err(),
            apixu.forecast("London", 3, None, None).await.err(),
            apixu.history("London", since, None, None).await.err(),
        ];

        for err in errors {
            match err.expect("transport failure should surface") {
                ApixuError::Api(ApiError::Status { status, body }) => {
                    assert_eq!(status, 503);
                    assert_eq!(body, "unavailable");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(apixu.api().calls().len(), 5);
        assert!(apixu.serializer().targets().is_empty());
    }

    #[tokio::test]
    async fn deserialization_errors_pass_through() {
        let apixu = client(RecordingApi::body(r#"{"unexpected": true}"#));

        let err = apixu.current("London", None).await.unwrap_err();

        match err {
            ApixuError::Serializer(inner) => assert_eq!(inner.target, "CurrentWeather"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(apixu.api().calls().len(), 1);
    }

    #[test]
    fn with_api_key_targets_given_base_url() {
        let apixu = Apixu::with_api_key("KEY".into(), "https://proxy.test/weather");
        assert_eq!(apixu.api().base_url(), "https://proxy.test/weather/");
        assert_eq!(
            apixu.api().endpoint_url("current"),
            "https://proxy.test/weather/current.json"
        );
    }

    #[test]
    fn from_config_requires_api_key() {
        let err = Apixu::from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn from_config_uses_configured_base_url() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("https://example.test/v1".into()),
            ..Config::default()
        };

        let apixu = Apixu::from_config(&cfg).expect("configured client");
        assert_eq!(apixu.api().base_url(), "https://example.test/v1/");
    }
}
