//! HTTP client for the authoritative port data store

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::{BerthId, VesselReference};
use crate::gateway::{ApprovedNotification, Berth, Vessel};
use crate::ports::{Credential, PortDataGateway, PortFuture};
use crate::{PortCallError, Result};
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Read-only client for notifications, berths and vessels.
#[derive(Debug, Clone)]
pub struct HttpPortDataGateway {
    client: Client,
    base_url: Url,
}

impl HttpPortDataGateway {
    /// Create a client rooted at `base_url`.
    ///
    /// # Errors
    /// Returns a configuration error for an unusable URL and a gateway error
    /// when the HTTP client cannot be built.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| PortCallError::ConfigError(format!("Invalid gateway URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(PortCallError::ConfigError(format!(
                "Gateway URL {base_url} cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| PortCallError::GatewayError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                PortCallError::ConfigError(format!("Gateway URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode the body; `Ok(None)` on 404.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        credential: &Credential,
    ) -> Result<Option<T>> {
        let token = credential.bearer()?;
        debug!(%url, "gateway request");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| PortCallError::GatewayError(format!("GET {url} failed: {e}")))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PortCallError::Unauthorized(
                format!("Port data store refused the credential for {url}"),
            )),
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json::<T>()
                .await
                .map(Some)
                .map_err(|e| PortCallError::GatewayError(format!("Invalid payload from {url}: {e}"))),
            status => Err(PortCallError::GatewayError(format!(
                "GET {url} returned {status}"
            ))),
        }
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        url: Url,
        credential: &Credential,
    ) -> Result<Vec<T>> {
        self.get_json::<Vec<T>>(url.clone(), credential)
            .await?
            .ok_or_else(|| PortCallError::GatewayError(format!("Endpoint {url} does not exist")))
    }
}

impl PortDataGateway for HttpPortDataGateway {
    fn approved_notifications<'a>(
        &'a self,
        date: NaiveDate,
        credential: &'a Credential,
    ) -> PortFuture<'a, Vec<ApprovedNotification>> {
        Box::pin(async move {
            let mut url = self.endpoint(&["approved-notifications"])?;
            url.query_pairs_mut()
                .append_pair("date", &date.format("%Y-%m-%d").to_string());
            self.get_list(url, credential).await
        })
    }

    fn berths<'a>(&'a self, credential: &'a Credential) -> PortFuture<'a, Vec<Berth>> {
        Box::pin(async move {
            let url = self.endpoint(&["berths"])?;
            self.get_list(url, credential).await
        })
    }

    fn berth<'a>(
        &'a self,
        berth_id: &'a BerthId,
        credential: &'a Credential,
    ) -> PortFuture<'a, Option<Berth>> {
        Box::pin(async move {
            let url = self.endpoint(&["berth", berth_id.value()])?;
            self.get_json(url, credential).await
        })
    }

    fn vessel_by_reference<'a>(
        &'a self,
        reference: &'a VesselReference,
        credential: &'a Credential,
    ) -> PortFuture<'a, Option<Vessel>> {
        Box::pin(async move {
            let url = self.endpoint(&["vessel", "by-reference", reference.value()])?;
            self.get_json(url, credential).await
        })
    }
}
