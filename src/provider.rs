use std::fmt;

use serde::Deserialize;
use shprayer_models::{
    RawPrayerTimes,
    settings::{LocationSettings, ProviderSettings},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Provider returned no prayer times for {0}")]
    NoPrayerTimes(Location),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl Location {
    pub fn fallback() -> Self {
        Self {
            city: "Alexandria".to_string(),
            country: "EG".to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.city, self.country)
    }
}

#[derive(Deserialize, Debug)]
struct IpLocationResponse {
    city: String,
    #[serde(rename = "countryCode")]
    country_code: String,
}

#[derive(Deserialize, Debug)]
struct DailyPrayerTimesResponse {
    items: Vec<RawPrayerTimes>,
}

/// Looks up the location and today's prayer times over HTTP.
pub struct HttpScheduleProvider {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl HttpScheduleProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;

        Ok(Self { client, settings })
    }

    /// Resolves the location to fetch times for. A configured city and
    /// country win; a failed lookup falls back to [`Location::fallback`].
    pub async fn locate(&self, configured: &LocationSettings) -> Location {
        if let (Some(city), Some(country)) = (&configured.city, &configured.country) {
            return Location {
                city: city.clone(),
                country: country.clone(),
            };
        }

        match self.lookup_location().await {
            Ok(location) => location,
            Err(error) => {
                let fallback = Location::fallback();
                log::error!("Failed to get location, using {fallback}. [error = {error}]");
                fallback
            }
        }
    }

    async fn lookup_location(&self) -> Result<Location, ProviderError> {
        let response: IpLocationResponse = self
            .client
            .get(&self.settings.location_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Location {
            city: response.city,
            country: response.country_code,
        })
    }

    pub async fn fetch_prayer_times(
        &self,
        location: &Location,
    ) -> Result<RawPrayerTimes, ProviderError> {
        let url = format!(
            "{}/{}/daily.json",
            self.settings.times_url.trim_end_matches('/'),
            location
        );
        log::debug!("Fetching prayer times from {url}");

        let response: DailyPrayerTimesResponse = self
            .client
            .get(url)
            .query(&[("key", &self.settings.api_key)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoPrayerTimes(location.clone()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;

    fn provider(server: &MockServer) -> HttpScheduleProvider {
        HttpScheduleProvider::new(ProviderSettings {
            location_url: format!("{}/json", server.uri()),
            times_url: server.uri(),
            api_key: "secret".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn cairo() -> Location {
        Location {
            city: "Cairo".to_string(),
            country: "EG".to_string(),
        }
    }

    #[tokio::test]
    async fn locate_uses_ip_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "city": "Cairo",
                "countryCode": "EG"
            })))
            .mount(&server)
            .await;

        let location = provider(&server).locate(&LocationSettings::default()).await;

        assert_eq!(location, cairo());
    }

    #[tokio::test]
    async fn locate_falls_back_when_lookup_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let location = provider(&server).locate(&LocationSettings::default()).await;

        assert_eq!(location, Location::fallback());
    }

    #[tokio::test]
    async fn configured_location_skips_lookup() {
        let server = MockServer::start().await;
        let configured = LocationSettings {
            city: Some("Cairo".to_string()),
            country: Some("EG".to_string()),
        };

        let location = provider(&server).locate(&configured).await;

        assert_eq!(location, cairo());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetches_first_daily_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Cairo,EG/daily.json"))
            .and(query_param("key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "date_for": "2025-6-1",
                    "fajr": "4:09 am",
                    "shurooq": "5:54 am",
                    "dhuhr": "12:53 pm",
                    "asr": "4:30 pm",
                    "maghrib": "7:52 pm",
                    "isha": "9:22 pm"
                }]
            })))
            .mount(&server)
            .await;

        let raw = provider(&server).fetch_prayer_times(&cairo()).await.unwrap();

        assert_eq!(raw.fajr, "4:09 am");
        assert_eq!(raw.isha, "9:22 pm");
        assert_eq!(raw.shurooq.as_deref(), Some("5:54 am"));
    }

    #[tokio::test]
    async fn empty_items_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Cairo,EG/daily.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let result = provider(&server).fetch_prayer_times(&cairo()).await;

        assert!(matches!(result, Err(ProviderError::NoPrayerTimes(location)) if location == cairo()));
    }

    #[tokio::test]
    async fn server_error_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = provider(&server).fetch_prayer_times(&cairo()).await;

        assert!(matches!(result, Err(ProviderError::Http(_))));
    }
}
