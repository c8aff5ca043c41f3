// Copyright 2025 Envoi Storage Team.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::response::ResponseBody;
use crate::domain::stack::{GeneratedTemplate, ReleaseListing, TemplateRequest};
use crate::shared::error::{Result, StackError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const DEFAULT_BASE_URL: &str = "https://get.weka.io/dist/v1";

const RELEASES_PATH: &[&str] = &["release"];
const TEMPLATE_PATH: &[&str] = &["aws", "cfn"];

/// Vendor endpoints used to pick a release and generate a template for it.
#[async_trait::async_trait]
pub trait TemplateApi: Send + Sync {
    async fn list_releases(&self, page: u32) -> Result<ReleaseListing>;

    async fn generate_template(
        &self,
        version: &str,
        request: &TemplateRequest,
    ) -> Result<GeneratedTemplate>;
}

/// `Basic` credentials for a token: the token is the user name, the password is empty.
pub fn basic_auth_value(token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:", token)))
}

pub struct WekaApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl WekaApiClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(StackError::config_error("a Weka API token is required"));
        }

        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            StackError::config_error(format!("Invalid Weka API URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StackError::config_error(format!(
                "Invalid Weka API URL '{}'",
                base_url
            )));
        }

        let mut auth = HeaderValue::from_str(&basic_auth_value(token))
            .map_err(|e| StackError::config_error(format!("Invalid Weka API token: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Appends each segment to the base path, percent-encoded, so a segment
    /// can never leave the base path or add a query.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                StackError::config_error(format!("Invalid Weka API URL '{}'", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET the endpoint below the base URL. Non-2xx statuses are errors.
    pub async fn get(&self, segments: &[&str], query: &[(&str, String)]) -> Result<ResponseBody> {
        let url = self.endpoint(segments)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).query(query).send().await?;
        Self::read_body(response).await
    }

    /// POST a JSON body to the endpoint below the base URL.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<ResponseBody> {
        let url = self.endpoint(segments)?;
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).json(body).send().await?;
        Self::read_body(response).await
    }

    async fn read_body(response: reqwest::Response) -> Result<ResponseBody> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        let body = ResponseBody::decode(content_type.as_deref(), &bytes);

        if !status.is_success() {
            return Err(StackError::template_api(status.as_u16(), body.describe()));
        }
        Ok(body)
    }

    fn parse<T: DeserializeOwned>(body: ResponseBody, what: &str) -> Result<T> {
        match body {
            ResponseBody::Json(Some(value)) => serde_json::from_value(value).map_err(|e| {
                StackError::UnexpectedResponse(format!("{} response: {}", what, e))
            }),
            other => Err(StackError::UnexpectedResponse(format!(
                "{} response is not a JSON document: {}",
                what,
                other.describe()
            ))),
        }
    }
}

#[async_trait::async_trait]
impl TemplateApi for WekaApiClient {
    async fn list_releases(&self, page: u32) -> Result<ReleaseListing> {
        let body = self
            .get(RELEASES_PATH, &[("page", page.to_string())])
            .await?;
        Self::parse(body, "release listing")
    }

    async fn generate_template(
        &self,
        version: &str,
        request: &TemplateRequest,
    ) -> Result<GeneratedTemplate> {
        let mut segments: Vec<&str> = TEMPLATE_PATH.to_vec();
        segments.push(version);
        let body = self.post(&segments, request).await?;
        Self::parse(body, "template generation")
    }
}
