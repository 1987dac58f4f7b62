#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::domain::{BerthId, NotificationId, VesselReference, VisitNotification};
use crate::gateway::{ApprovedNotification, Berth, Vessel};
use crate::{PortCallError, Result};
use chrono::NaiveDate;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Bearer token presented to the port data store.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// # Errors
    /// Returns [`PortCallError::Unauthorized`] when the token is blank.
    pub fn bearer(&self) -> Result<&str> {
        let token = self.0.trim();
        if token.is_empty() {
            return Err(PortCallError::Unauthorized(
                "A bearer credential is required".to_string(),
            ));
        }
        Ok(token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

pub trait PortDataGateway {
    fn approved_notifications<'a>(
        &'a self,
        date: NaiveDate,
        credential: &'a Credential,
    ) -> PortFuture<'a, Vec<ApprovedNotification>>;

    fn berths<'a>(&'a self, credential: &'a Credential) -> PortFuture<'a, Vec<Berth>>;

    fn berth<'a>(
        &'a self,
        berth_id: &'a BerthId,
        credential: &'a Credential,
    ) -> PortFuture<'a, Option<Berth>>;

    fn vessel_by_reference<'a>(
        &'a self,
        reference: &'a VesselReference,
        credential: &'a Credential,
    ) -> PortFuture<'a, Option<Vessel>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNotification {
    pub notification: VisitNotification,
    pub version: i64,
}

/// Persistence for notifications. Writes are conditional on the version the
/// caller loaded; a stale version fails with [`PortCallError::Conflict`].
pub trait NotificationStore {
    fn load<'a>(&'a self, id: &'a NotificationId) -> PortFuture<'a, Option<StoredNotification>>;

    fn insert<'a>(
        &'a self,
        notification: &'a VisitNotification,
    ) -> PortFuture<'a, StoredNotification>;

    fn save<'a>(
        &'a self,
        notification: &'a VisitNotification,
        expected_version: i64,
    ) -> PortFuture<'a, StoredNotification>;

    fn delete<'a>(&'a self, id: &'a NotificationId, expected_version: i64) -> PortFuture<'a, ()>;
}
