//! Blocking HTTP client for the tailnet API
//!
//! One request at a time, bearer-authenticated, no retries. Failures are
//! surfaced to the caller, which decides whether they are fatal (directory
//! fetch) or per-device (tag writes).

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use tailnet_core::{ApiKey, Device, DeviceDirectory};

use crate::credentials::Session;
use crate::error::{Error, Result};
use crate::models::{ApiProblem, DeviceList, KeyList, RawDevice, TagUpdate, TailnetInfo};
use crate::settings::Settings;

/// Authenticated handle to one tailnet
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    tailnet: String,
}

impl ApiClient {
    /// Build a client for the session's tailnet
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be used as a header value or the
    /// HTTP client cannot be built.
    pub fn new(settings: &Settings, session: &Session) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", session.token))
            .map_err(|_| Error::not_authenticated("Stored token contains invalid characters"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .user_agent(concat!("tailnet-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.api_url.clone(),
            tailnet: session.tailnet.clone(),
        })
    }

    pub fn tailnet(&self) -> &str {
        &self.tailnet
    }

    /// Describe the tailnet itself
    pub fn get_tailnet(&self) -> Result<TailnetInfo> {
        let url = self.endpoint(&["tailnet", &self.tailnet])?;
        self.get_json(url)
    }

    /// List every device in the tailnet
    pub fn get_devices(&self) -> Result<Vec<Device>> {
        let url = self.endpoint(&["tailnet", &self.tailnet, "devices"])?;
        let list: DeviceList = self.get_json(url)?;
        Ok(list.devices.into_iter().map(Device::from).collect())
    }

    /// Fetch one device by id
    pub fn get_device(&self, id: &str) -> Result<Device> {
        let url = self.endpoint(&["device", id])?;
        debug!(%url, "GET");
        let response = self.http.get(url).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound { id: id.to_string() });
        }
        let raw: RawDevice = decode(response)?;
        Ok(raw.into())
    }

    /// Replace a device's tags
    pub fn update_device_tags(&self, id: &str, tags: &[String]) -> Result<()> {
        let url = self.endpoint(&["device", id, "tags"])?;
        debug!(%url, ?tags, "POST");
        let response = self.http.post(url).json(&TagUpdate { tags }).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound { id: id.to_string() });
        }
        check(response).map(|_| ())
    }

    /// List the tailnet's API keys
    pub fn get_keys(&self) -> Result<Vec<ApiKey>> {
        let url = self.endpoint(&["tailnet", &self.tailnet, "keys"])?;
        let list: KeyList = self.get_json(url)?;
        Ok(list.keys.into_iter().map(ApiKey::from).collect())
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.http.get(url).send()?;
        decode(response)
    }

    /// Append path segments to the base URL, escaping each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl {
                input: self.base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl DeviceDirectory for ApiClient {
    fn fetch_all_devices(&self) -> tailnet_core::Result<Vec<Device>> {
        Ok(self.get_devices()?)
    }

    fn get_device(&self, id: &str) -> tailnet_core::Result<Device> {
        Ok(ApiClient::get_device(self, id)?)
    }

    fn update_device_tags(&self, id: &str, tags: &[String]) -> tailnet_core::Result<()> {
        Ok(ApiClient::update_device_tags(self, id, tags)?)
    }
}

/// Turn a non-success response into an error, pulling the API's message
fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ApiProblem>(&body)
        .ok()
        .and_then(|p| p.message)
        .unwrap_or_else(|| body.trim().to_string());
    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        message
    };

    Err(Error::Status {
        status: status.as_u16(),
        message,
    })
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = check(response)?.text()?;
    Ok(serde_json::from_str(&body)?)
}
