use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::types::{
    ListPage, MediaRequest, MovieDetails, MovieResult, NewRequest, RequestAction, RequestQuery,
    ResultsPage, SearchResult, ServerStatus, TvDetails, TvResult, User,
};
use crate::error::ApiError;

/// Path prefix of the Overseerr v1 API
const API_PATH: &str = "/api/v1";
const API_KEY_HEADER: &str = "x-api-key";
const TIMEOUT: Duration = Duration::from_secs(30);

/// Canonicalize a server URL so it ends in exactly one `/api/v1`
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.strip_suffix('/').unwrap_or(raw);
    if trimmed.ends_with(API_PATH) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, API_PATH)
    }
}

/// Overseerr API client, authenticated with an API key
pub struct OverseerrClient {
    client: Client,
    base_url: String,
}

impl OverseerrClient {
    /// Build a client for `url`; every request carries `api_key` in `X-Api-Key`
    pub fn new(url: &str, api_key: &str) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(url);

        let parsed = Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let mut key = HeaderValue::from_str(api_key).map_err(|_| ApiError::InvalidApiKey)?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(TIMEOUT)
            .user_agent(concat!("overseerr-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(base_url = %base_url, "created Overseerr client");
        Ok(Self { client, base_url })
    }

    /// Normalized base URL, ending in `/api/v1`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and reject non-2xx responses
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        debug!(status = %status, "received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::UnexpectedStatus { status, body });
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send(request).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Server version and update state
    pub async fn status(&self) -> Result<ServerStatus, ApiError> {
        self.fetch(self.client.get(self.url("/status"))).await
    }

    /// Search movies, TV shows and people
    pub async fn search(
        &self,
        query: &str,
        page: u32,
    ) -> Result<ResultsPage<SearchResult>, ApiError> {
        // Overseerr rejects '+' for spaces, so the query is encoded by hand
        let url = format!(
            "{}?query={}&page={}",
            self.url("/search"),
            urlencoding::encode(query),
            page
        );
        self.fetch(self.client.get(url)).await
    }

    pub async fn discover_movies(&self, page: u32) -> Result<ResultsPage<MovieResult>, ApiError> {
        let request = self
            .client
            .get(self.url("/discover/movies"))
            .query(&[("page", page)]);
        self.fetch(request).await
    }

    pub async fn discover_tv(&self, page: u32) -> Result<ResultsPage<TvResult>, ApiError> {
        let request = self
            .client
            .get(self.url("/discover/tv"))
            .query(&[("page", page)]);
        self.fetch(request).await
    }

    pub async fn trending(&self, page: u32) -> Result<ResultsPage<SearchResult>, ApiError> {
        let request = self
            .client
            .get(self.url("/discover/trending"))
            .query(&[("page", page)]);
        self.fetch(request).await
    }

    pub async fn movie(&self, tmdb_id: u64) -> Result<MovieDetails, ApiError> {
        self.fetch(self.client.get(self.url(&format!("/movie/{}", tmdb_id))))
            .await
    }

    pub async fn tv(&self, tmdb_id: u64) -> Result<TvDetails, ApiError> {
        self.fetch(self.client.get(self.url(&format!("/tv/{}", tmdb_id))))
            .await
    }

    pub async fn requests(&self, query: &RequestQuery) -> Result<ListPage<MediaRequest>, ApiError> {
        let mut params: Vec<(&str, String)> = vec![
            ("take", query.take.to_string()),
            ("skip", query.skip.to_string()),
        ];
        if let Some(filter) = query.filter {
            params.push(("filter", filter.as_str().to_string()));
        }
        if let Some(sort) = query.sort {
            params.push(("sort", sort.as_str().to_string()));
        }

        self.fetch(self.client.get(self.url("/request")).query(&params))
            .await
    }

    pub async fn request(&self, id: u64) -> Result<MediaRequest, ApiError> {
        self.fetch(self.client.get(self.url(&format!("/request/{}", id))))
            .await
    }

    /// Approve or decline a pending request
    pub async fn update_request_status(
        &self,
        id: u64,
        action: RequestAction,
    ) -> Result<MediaRequest, ApiError> {
        let path = format!("/request/{}/{}", id, action.as_str());
        self.fetch(self.client.post(self.url(&path))).await
    }

    pub async fn delete_request(&self, id: u64) -> Result<(), ApiError> {
        self.send(self.client.delete(self.url(&format!("/request/{}", id))))
            .await?;
        Ok(())
    }

    pub async fn create_request(&self, body: &NewRequest) -> Result<MediaRequest, ApiError> {
        self.fetch(self.client.post(self.url("/request")).json(body))
            .await
    }

    pub async fn users(&self, take: u32, skip: u32) -> Result<ListPage<User>, ApiError> {
        let request = self
            .client
            .get(self.url("/user"))
            .query(&[("take", take), ("skip", skip)]);
        self.fetch(request).await
    }

    /// The user owning the API key
    pub async fn me(&self) -> Result<User, ApiError> {
        self.fetch(self.client.get(self.url("/auth/me"))).await
    }
}
