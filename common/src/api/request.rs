use anyhow::bail;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ErrorResponse;

pub struct ServiceRequest<'a, 'b, T = ()> {
    client: &'a reqwest::Client,
    method: reqwest::Method,
    url: Option<String>,
    body: Option<&'b T>,
}

impl<'a, 'b, T: Serialize> ServiceRequest<'a, 'b, T> {
    pub fn new(client: &'a reqwest::Client) -> Self {
        Self {
            client,
            method: reqwest::Method::GET,
            url: None,
            body: None,
        }
    }

    pub fn post(mut self, url: String) -> Self {
        self.url = Some(url);
        self.method = reqwest::Method::POST;
        self
    }

    pub fn json(mut self, body: &'b T) -> Self {
        self.body = Some(body);
        self
    }

    pub async fn send(self) -> anyhow::Result<reqwest::Response> {
        let Some(url) = self.url else {
            bail!("Request has no url");
        };
        let mut request = self.client.request(self.method, url);
        if let Some(body) = self.body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Sends the request and decodes a successful body as `R`, or turns the
    /// `{ ok: false, error }` envelope into an error.
    pub async fn fetch<R: DeserializeOwned>(self) -> anyhow::Result<R> {
        let response = self.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<R>().await?);
        }
        match response.json::<ErrorResponse>().await {
            Ok(body) => bail!("{} ({})", body.error, status),
            Err(_) => bail!("Request failed with {}", status),
        }
    }
}
