use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::constants::USER_AGENT;
use crate::error::Result;

/// `HttpClientPort` backed by one shared reqwest client
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = resp.bytes().await?.to_vec();
        Ok(HttpGetResult { status, bytes, content_type })
    }
}
