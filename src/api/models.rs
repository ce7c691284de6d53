use serde::Deserialize;

/// Response from the playurl endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PlayUrlResponse {
    pub code: i64,
    #[serde(default)]
    pub data: Option<PlayUrlData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayUrlData {
    #[serde(default)]
    pub durl: Vec<DurlEntry>,
}

/// One direct-URL descriptor; segmented streams carry several of these.
#[derive(Debug, Clone, Deserialize)]
pub struct DurlEntry {
    pub url: String,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_base_url: String,
    pub site_url: String,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.bilibili.com".to_string(),
            site_url: "https://www.bilibili.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3"
                .to_string(),
        }
    }
}
