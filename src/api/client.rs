use futures::Stream;
use futures::TryStreamExt;
use reqwest::Client;
use thiserror::Error;

use super::models::{ApiConfig, PlayUrlResponse};

const ACCEPT_JSON: &str = "application/json, text/plain, */*";
const ACCEPT_VIDEO: &str = "video/webm,video/ogg,video/*;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to get download link (code {0})")]
    PlayUrlStatus(i64),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("No stream URL in playurl response")]
    NoStreamUrl,
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Fetch the raw markup of a video page.
    pub async fn fetch_page(&self, page_url: &str) -> Result<String> {
        let client = Client::new();
        let html = client
            .get(page_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html)
    }

    /// Ask the playurl endpoint for a direct stream URL.
    ///
    /// Segmented responses carry several `durl` entries; only the first is
    /// returned, so multi-part videos come back incomplete.
    pub async fn resolve_stream_url(
        &self,
        video_id: &str,
        content_id: &str,
        quality_code: u32,
    ) -> Result<String> {
        let url = format!(
            "{}/x/player/playurl?bvid={}&cid={}&qn={}",
            self.config.api_base_url, video_id, content_id, quality_code
        );

        let client = Client::new();
        let response = client
            .get(&url)
            .header("User-Agent", &self.config.user_agent)
            .header(
                "Referer",
                format!("{}/video/{}", self.config.site_url, video_id),
            )
            .header("Origin", &self.config.site_url)
            .header("Accept", ACCEPT_JSON)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .header("Connection", "keep-alive")
            .send()
            .await?
            .error_for_status()?;

        let json: PlayUrlResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

        if json.code != 0 {
            return Err(ApiError::PlayUrlStatus(json.code));
        }

        json.data
            .and_then(|data| data.durl.into_iter().next())
            .map(|entry| entry.url)
            .ok_or(ApiError::NoStreamUrl)
    }

    /// Request the media stream.
    /// Returns the declared content length and the byte stream.
    pub async fn download_file_stream(
        &self,
        stream_url: &str,
    ) -> Result<(Option<u64>, impl Stream<Item = Result<bytes::Bytes>>)> {
        let client = Client::new();
        let response = client
            .get(stream_url)
            .header("User-Agent", &self.config.user_agent)
            .header("Referer", &self.config.site_url)
            .header("Origin", &self.config.site_url)
            .header("Accept", ACCEPT_VIDEO)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .header("Connection", "keep-alive")
            .send()
            .await?
            .error_for_status()?;

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(ApiError::Request);

        Ok((total_size, stream))
    }
}
