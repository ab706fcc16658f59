use std::{fmt, time::Duration};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tokio::time::sleep;

use crate::{config, warning};

/// How often a request is sent before a 502 is reported as an error.
const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug)]
pub enum ApiError {
    Request(reqwest::Error),
    Status(StatusCode),
    Decode(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request(e) => write!(f, "request failed: {}", e),
            ApiError::Status(status) => write!(f, "API responded with {}", status),
            ApiError::Decode(e) => write!(f, "unexpected response body: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Request(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err)
    }
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status(StatusCode::NOT_FOUND))
    }
}

/// Collections exposed by the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Movies,
    Actresses,
    Actors,
    Photobooks,
    SoftMovies,
    Groups,
    CustomNav,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Movies,
        Collection::Actresses,
        Collection::Actors,
        Collection::Photobooks,
        Collection::SoftMovies,
        Collection::Groups,
        Collection::CustomNav,
    ];

    pub fn as_path(&self) -> &'static str {
        match self {
            Collection::Movies => "movies",
            Collection::Actresses => "actresses",
            Collection::Actors => "actors",
            Collection::Photobooks => "photobooks",
            Collection::SoftMovies => "soft-movies",
            Collection::Groups => "groups",
            Collection::CustomNav => "custom-nav",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Parses a collection name as typed on the command line.
pub fn parse_collection(value: &str) -> Result<Collection, String> {
    let value = value.trim().to_lowercase();
    let collection = match value.as_str() {
        "movies" | "movie" => Collection::Movies,
        "actresses" | "actress" => Collection::Actresses,
        "actors" | "actor" => Collection::Actors,
        "photobooks" | "photobook" => Collection::Photobooks,
        "soft" | "soft-movies" | "soft-movie" => Collection::SoftMovies,
        "groups" | "group" => Collection::Groups,
        "custom-nav" | "custom" | "nav" => Collection::CustomNav,
        other => {
            let known: Vec<&str> = Collection::ALL.iter().map(|c| c.as_path()).collect();
            return Err(format!(
                "unknown collection '{}', expected one of: {}",
                other,
                known.join(", ")
            ));
        }
    };
    Ok(collection)
}

/// JSON client for the catalog API. Every call takes the bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    retry_delay: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
            retry_delay: config::DEFAULT_RETRY_DELAY,
        }
    }

    /// Builds a client for `MEDIADEX_API_URL`, waiting `MEDIADEX_RETRY_DELAY`
    /// seconds between retries.
    ///
    /// # Errors
    ///
    /// Returns the configuration message when the API URL is not set.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self::new(&config::api_url()?).with_retry_delay(config::retry_delay()))
    }

    /// Overrides the wait between retries of a `502 Bad Gateway`.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a collection, or of one document when `id` is given.
    pub fn endpoint(&self, collection: Collection, id: Option<&str>) -> String {
        match id {
            Some(id) => format!(
                "{}/{}/{}",
                self.base_url,
                collection.as_path(),
                urlencoding::encode(id)
            ),
            None => format!("{}/{}", self.base_url, collection.as_path()),
        }
    }

    /// Fetches every document of a collection.
    ///
    /// # Arguments
    ///
    /// * `collection` - Collection to read, e.g. [`Collection::Movies`]
    /// * `token` - Bearer token sent in the `Authorization` header
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Vec<T>)` - All documents, in the order the API returned them
    /// - `Err(ApiError)` - Network failure, non-success status or a body that
    ///   does not match `T`
    ///
    /// # Retry Logic
    ///
    /// A `502 Bad Gateway` is retried up to three attempts in total, waiting
    /// the configured retry delay (10 seconds by default) in between.
    ///
    /// # Example
    ///
    /// ```
    /// let movies: Vec<Movie> = client.list(Collection::Movies, &token).await?;
    /// ```
    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: Collection,
        token: &str,
    ) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(collection, None);
        let response = self.send(|| self.http.get(&url).bearer_auth(token)).await?;
        read_json(response).await
    }

    /// Fetches a single document by code or id.
    ///
    /// The identifier is percent-encoded into the path. A missing document is
    /// reported as `ApiError::Status(404)`, see [`ApiError::is_not_found`].
    ///
    /// # Example
    ///
    /// ```
    /// let movie: Movie = client.get_by_id(Collection::Movies, "ABP-123", &token).await?;
    /// ```
    pub async fn get_by_id<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
        token: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(collection, Some(id));
        let response = self.send(|| self.http.get(&url).bearer_auth(token)).await?;
        read_json(response).await
    }

    /// Creates a document with a `POST` to the collection.
    ///
    /// # Arguments
    ///
    /// * `collection` - Target collection
    /// * `payload` - Any serializable document, usually a `serde_json::Value`
    ///   read from a file
    /// * `token` - Bearer token
    ///
    /// # Returns
    ///
    /// The created document as echoed by the API, decoded as `T`.
    pub async fn create<P: Serialize, T: DeserializeOwned>(
        &self,
        collection: Collection,
        payload: &P,
        token: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(collection, None);
        let response = self
            .send(|| self.http.post(&url).bearer_auth(token).json(payload))
            .await?;
        read_json(response).await
    }

    /// Replaces a document with a `PUT` to `/<collection>/<id>`.
    ///
    /// # Errors
    ///
    /// Fails with `ApiError::Status(404)` when the document does not exist
    /// and with `ApiError::Decode` when the response is not a `T`.
    pub async fn update<P: Serialize, T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
        payload: &P,
        token: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(collection, Some(id));
        let response = self
            .send(|| self.http.put(&url).bearer_auth(token).json(payload))
            .await?;
        read_json(response).await
    }

    /// Deletes a document. The response body is ignored.
    pub async fn delete(&self, collection: Collection, id: &str, token: &str) -> Result<(), ApiError> {
        let url = self.endpoint(collection, Some(id));
        self.send(|| self.http.delete(&url).bearer_auth(token))
            .await?;
        Ok(())
    }

    /// Sends the request built by `build`, retrying on 502 Bad Gateway.
    ///
    /// `build` is called once per attempt because a `RequestBuilder` is
    /// consumed by `send`. Any other non-success status becomes
    /// `ApiError::Status` right away.
    async fn send<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 1;
        loop {
            let response = build().send().await?;
            let status = response.status();

            if status == StatusCode::BAD_GATEWAY && attempt < MAX_ATTEMPTS {
                warning!(
                    "Catalog API answered 502, retrying in {}s ({}/{})",
                    self.retry_delay.as_secs(),
                    attempt,
                    MAX_ATTEMPTS
                );
                attempt += 1;
                sleep(self.retry_delay).await;
                continue; // retry
            }

            if !status.is_success() {
                return Err(ApiError::Status(status));
            }
            return Ok(response);
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
