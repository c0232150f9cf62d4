use serde::{Deserialize, Serialize};

/// Where `resale-dev-server` listens by default.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8090";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub api: Option<ApiConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api: None,
        }
    }
}

impl ClientConfig {
    pub fn api_base_url(&self) -> &str {
        self.api
            .as_ref()
            .map(|a| a.base_url.as_str())
            .unwrap_or(DEFAULT_API_URL)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientState {
    pub version: u32,

    // Bearer token of the active session. Absent while browsing as a guest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            version: 1,
            session_token: None,
        }
    }
}
