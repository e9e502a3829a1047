//! Blacklist resource implementation.
//!
//! Blacklisted emails, IP addresses and countries cannot place orders.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponse, HttpClient, HttpError, QueryParams};

use super::{is_zero, list_query, resource_path, DeletedResponse, Pagination};

const BLACKLIST_PATH: &str = "/blacklist";

/// What a blacklist entry matches against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BlacklistType {
    Email,
    Ip,
    /// An ISO 3166-1 alpha-2 country code.
    Country,
}

impl BlacklistType {
    /// Returns the wire name of the entry type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Ip => "ip",
            Self::Country => "country",
        }
    }
}

impl fmt::Display for BlacklistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A blocked email address, IP address or country.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BlacklistEntry {
    /// The unique identifier of the entry.
    /// Read-only field.
    pub id: String,
    /// What `value` matches against (see [`BlacklistType`]).
    #[serde(rename = "type")]
    pub entry_type: String,
    /// The blocked email address, IP address or country code.
    pub value: String,
    /// Why the entry was added.
    pub reason: Option<String>,
    /// When the entry was added.
    /// Read-only field.
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for [`BlacklistService::list`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ListBlacklistParams {
    /// The page to fetch. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
    /// Entries per page. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: u32,
    /// Only return entries of this type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<BlacklistType>,
    /// Only return entries whose value contains this text.
    pub search: String,
}

/// Payload of [`BlacklistService::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ListBlacklistResponse {
    /// The entries on this page.
    pub entries: Vec<BlacklistEntry>,
    /// Where this page sits in the full list.
    pub pagination: Pagination,
}

/// Body of [`BlacklistService::create`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateBlacklistEntryRequest {
    /// What `value` matches against.
    #[serde(rename = "type")]
    pub entry_type: BlacklistType,
    /// The email address, IP address or country code to block.
    pub value: String,
    /// Why the entry is added.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CreateBlacklistEntryRequest {
    /// Creates a request without a reason.
    #[must_use]
    pub fn new(entry_type: BlacklistType, value: impl Into<String>) -> Self {
        Self {
            entry_type,
            value: value.into(),
            reason: None,
        }
    }

    /// Sets the reason stored with the entry.
    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Blacklist operations.
#[derive(Debug, Clone, Copy)]
pub struct BlacklistService<'a> {
    client: &'a HttpClient,
}

impl<'a> BlacklistService<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists blacklist entries, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn list(
        &self,
        params: &ListBlacklistParams,
    ) -> Result<ApiResponse<ListBlacklistResponse>, HttpError> {
        let query = list_query(params)?;
        self.client.get(BLACKLIST_PATH, query).await
    }

    /// Fetches a single entry.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get(&self, entry_id: &str) -> Result<ApiResponse<BlacklistEntry>, HttpError> {
        self.client
            .get(&resource_path(BLACKLIST_PATH, entry_id), QueryParams::new())
            .await
    }

    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn create(
        &self,
        request: &CreateBlacklistEntryRequest,
    ) -> Result<ApiResponse<BlacklistEntry>, HttpError> {
        self.client.post(BLACKLIST_PATH, request).await
    }

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn delete(&self, entry_id: &str) -> Result<ApiResponse<DeletedResponse>, HttpError> {
        self.client
            .delete(&resource_path(BLACKLIST_PATH, entry_id))
            .await
    }
}
