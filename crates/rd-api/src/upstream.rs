//! The upstream seam.
//!
//! Everything above this module talks to the REST API through the
//! [`Upstream`] trait, so tests and the proxy can swap in an in-memory
//! implementation. [`PokeApi`] is the real one, built on `reqwest`.

use async_trait::async_trait;
use rd_core::ApiConfig;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;

/// A JSON-over-HTTP source.
///
/// `path` is either relative to the base URL (`"pokemon/pikachu"`,
/// `"item?limit=10&offset=0"`) or an absolute URL, as returned in
/// upstream `url` fields.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Fetches `path` and decodes the body as JSON.
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;
}

#[async_trait]
impl<T: Upstream + ?Sized> Upstream for std::sync::Arc<T> {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        (**self).get_json(path).await
    }
}

/// PokeAPI client.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct PokeApi {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApi {
    /// Creates a client from configuration.
    ///
    /// A timeout is only applied when `config.timeout_ms` is set.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            "rotomdex/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Returns the base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `path` against the base URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use rd_api::PokeApi;
    /// use rd_core::ApiConfig;
    ///
    /// let api = PokeApi::new(&ApiConfig::default()).unwrap();
    /// assert_eq!(api.url_for("pokemon/ditto"), "https://pokeapi.co/api/v2/pokemon/ditto");
    /// assert_eq!(
    ///     api.url_for("https://pokeapi.co/api/v2/evolution-chain/1/"),
    ///     "https://pokeapi.co/api/v2/evolution-chain/1/"
    /// );
    /// ```
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_owned()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl Upstream for PokeApi {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url_for(path);
        debug!(url = %url, "GET");

        let result: Result<Value, ApiError> = async {
            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::status(status.as_u16(), url.as_str()));
            }
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        }
        .await;

        if let Err(e) = &result {
            warn!(url = %url, error = %e, "upstream request failed");
        }
        result
    }
}
