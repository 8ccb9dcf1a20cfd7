//! HTTP client for the BetterTerp service.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{
    CreatedHabit, ErrorBody, LoginRequest, LoginResponse, NewHabit, RegisterRequest,
    RegisterResponse,
};
use crate::error::ApiError;
use crate::habit::Habit;
use crate::storage::ApiConfig;

/// Thin typed wrapper over the REST endpoints. No retries and no timeout
/// beyond the transport's own.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http_client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last path segment unless it ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            http_client: Client::new(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// `POST /login`
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let resp = self
            .http_client
            .post(self.endpoint("login")?)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        read_json(resp).await
    }

    /// `POST /register`
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisterResponse, ApiError> {
        let resp = self
            .http_client
            .post(self.endpoint("register")?)
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .send()
            .await?;
        read_json(resp).await
    }

    /// `GET /habits?username=`
    pub async fn fetch_habits(&self, username: &str) -> Result<Vec<Habit>, ApiError> {
        let mut url = self.endpoint("habits")?;
        url.query_pairs_mut().append_pair("username", username);
        let resp = self.http_client.get(url).send().await?;
        // a JSON null is treated like an empty list
        let habits: Option<Vec<Habit>> = read_json(resp).await?;
        Ok(habits.unwrap_or_default())
    }

    /// `POST /habits`, returning the habit the service stored.
    pub async fn create_habit(&self, habit: &NewHabit<'_>) -> Result<Habit, ApiError> {
        let resp = self
            .http_client
            .post(self.endpoint("habits")?)
            .json(habit)
            .send()
            .await?;
        let created: CreatedHabit = read_json(resp).await?;
        created
            .habit
            .ok_or_else(|| ApiError::Decode("response did not include the created habit".into()))
    }

    /// `GET /affirmations`
    pub async fn fetch_affirmations(&self) -> Result<Vec<String>, ApiError> {
        let resp = self
            .http_client
            .get(self.endpoint("affirmations")?)
            .send()
            .await?;
        read_json(resp).await
    }
}

/// Decode a success body, or turn a failure status into [`ApiError::Status`]
/// carrying the server's `detail`.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.bytes().await?;
        return serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()));
    }

    let body = resp.bytes().await.unwrap_or_default();
    let detail = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.detail_text())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        });
    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_base_path() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.endpoint("habits").unwrap().as_str(),
            "http://localhost:8000/habits"
        );

        let client = ApiClient::new("http://example.test/api").unwrap();
        assert_eq!(
            client.endpoint("login").unwrap().as_str(),
            "http://example.test/api/login"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(
            ApiClient::new("localhost"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
