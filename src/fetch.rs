// src/fetch.rs

use anyhow::{bail, Context, Result};
use reqwest::Client;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;
use url::Url;

/// GETs the results page and keeps a copy of the raw body on disk.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    url: Url,
    dump_path: Option<PathBuf>,
}

impl Fetcher {
    pub fn new(client: Client, url: Url, dump_path: Option<PathBuf>) -> Self {
        Self {
            client,
            url,
            dump_path,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// One GET, no retries. The dump file is overwritten on every call,
    /// error pages included; a non-success status is reported afterwards.
    #[tracing::instrument(level = "debug", skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<String> {
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .with_context(|| format!("GET {}", self.url))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("reading body from {}", self.url))?;
        debug!(%status, bytes = body.len(), "fetched");

        if let Some(path) = &self.dump_path {
            fs::write(path, &body)
                .await
                .with_context(|| format!("writing dump {:?}", path))?;
        }
        if !status.is_success() {
            bail!("HTTP error: {} from {}", status, self.url);
        }
        Ok(body)
    }
}
