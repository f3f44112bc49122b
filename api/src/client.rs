use reqwest::Url;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ApiError, Result};
use crate::model::{CompatibilityRequest, CompatibilityResult, GenerateRequest, SingleResult};

pub const GENERATE_PATH: &str = "/api/generate";
pub const COMPATIBILITY_PATH: &str = "/api/generate-compatibility";

/// Thin client over the two generate endpoints plus static asset downloads.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// `base_url` must be absolute (scheme + host); paths are joined onto it.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|err| ApiError::InvalidUrl(format!("{base_url}: {err}")))?;
        Ok(Self {
            base,
            http: reqwest::Client::new(),
        })
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<SingleResult> {
        log::info!(
            "Requesting result for {} {}",
            request.birthdate,
            request.birthtime
        );
        self.post_json(GENERATE_PATH, request).await
    }

    pub async fn generate_compatibility(
        &self,
        request: &CompatibilityRequest,
    ) -> Result<CompatibilityResult> {
        log::info!(
            "Requesting compatibility for {} {} / {} {}",
            request.person1_birthdate,
            request.person1_birthtime,
            request.person2_birthdate,
            request.person2_birthtime
        );
        self.post_json(COMPATIBILITY_PATH, request).await
    }

    /// Download a file served by the backend (e.g. the rendered result image).
    /// Relative URLs resolve against the client's base.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let target = self.resolve(url)?;
        let response = self.http.get(target).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("Download of {url} failed with status {status}");
            return Err(ApiError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|err| ApiError::InvalidUrl(format!("{path}: {err}")))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resolve(path)?;
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::warn!("{path} responded with {status}");
            return Err(ApiError::from_failure(status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_base_is_rejected() {
        assert!(matches!(
            ApiClient::new("/api"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn paths_join_onto_origin() {
        let client = ApiClient::new("http://localhost:8000").expect("client");
        let url = client.resolve(GENERATE_PATH).expect("join");
        assert_eq!(url.as_str(), "http://localhost:8000/api/generate");

        let image = client.resolve("/output/result_1.png").expect("join");
        assert_eq!(image.as_str(), "http://localhost:8000/output/result_1.png");

        let absolute = client
            .resolve("https://cdn.example.com/a.png")
            .expect("join");
        assert_eq!(absolute.as_str(), "https://cdn.example.com/a.png");
    }
}
