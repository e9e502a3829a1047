//! Support ticket resource implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponse, HttpClient, HttpError, QueryParams};

use super::{is_zero, list_query, resource_path, Pagination, Patch};

const TICKETS_PATH: &str = "/tickets";

/// The order a ticket is about.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TicketOrderSummary {
    /// The identifier of the order.
    pub id: String,
    /// The order total, in cents.
    pub amount_in_cents: i64,
    /// The order state.
    pub status: String,
    /// The name of the product that was bought.
    pub product_name: Option<String>,
}

/// A support ticket.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Ticket {
    /// The unique identifier of the ticket.
    /// Read-only field.
    pub id: String,
    /// The subject line.
    pub subject: String,
    /// The ticket state (e.g., `open`, `closed`).
    pub status: String,
    /// The ticket priority (e.g., `low`, `high`).
    pub priority: String,
    /// The email address of the customer who opened the ticket.
    pub customer_email: String,
    /// The name of that customer, if given.
    pub customer_name: Option<String>,
    /// The number of messages in the thread.
    pub message_count: Option<i64>,
    /// The order the ticket is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<TicketOrderSummary>,
    /// When the ticket was opened.
    /// Read-only field.
    pub created_at: Option<DateTime<Utc>>,
    /// When the ticket was last updated.
    /// Read-only field.
    pub updated_at: Option<DateTime<Utc>>,
    /// When the ticket was closed.
    pub closed_at: Option<DateTime<Utc>>,
}

/// One message in a ticket thread.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TicketMessage {
    /// The unique identifier of the message.
    /// Read-only field.
    pub id: String,
    /// The ticket the message belongs to.
    pub ticket_id: Option<String>,
    /// The message text.
    pub message: String,
    /// Who wrote the message, e.g. `customer` or `store`.
    pub sender_type: String,
    /// The email address of the sender.
    pub sender_email: String,
    /// When the message was sent.
    /// Read-only field.
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for [`TicketsService::list`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ListTicketsParams {
    /// The page to fetch. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
    /// Tickets per page. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: u32,
    /// Only return tickets in this state.
    pub status: String,
    /// Only return tickets with this priority.
    pub priority: String,
    /// Only return tickets opened from this email address.
    pub email: String,
}

/// Payload of [`TicketsService::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ListTicketsResponse {
    /// The tickets on this page.
    pub tickets: Vec<Ticket>,
    /// Where this page sits in the full list.
    pub pagination: Pagination,
}

/// Payload of [`TicketsService::get`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GetTicketResponse {
    /// The ticket.
    pub ticket: Ticket,
    /// The thread, oldest first.
    pub messages: Vec<TicketMessage>,
}

/// Body of [`TicketsService::reply`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ReplyTicketRequest {
    /// The reply text.
    pub message: String,
    /// New ticket status to set along with the reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Payload of [`TicketsService::reply`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReplyTicketResponse {
    /// The reply as stored.
    pub message: TicketMessage,
    /// The ticket state after the reply.
    pub ticket_status: String,
}

/// Body of [`TicketsService::update`]. Only set fields are sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct UpdateTicketRequest {
    /// The new state.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub status: Patch<String>,
    /// The new priority.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub priority: Patch<String>,
}

/// Payload of [`TicketsService::update`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TicketResponse {
    /// The ticket after the update.
    pub ticket: Ticket,
}

/// Support ticket operations.
#[derive(Debug, Clone, Copy)]
pub struct TicketsService<'a> {
    client: &'a HttpClient,
}

impl<'a> TicketsService<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists tickets, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn list(
        &self,
        params: &ListTicketsParams,
    ) -> Result<ApiResponse<ListTicketsResponse>, HttpError> {
        let query = list_query(params)?;
        self.client.get(TICKETS_PATH, query).await
    }

    /// Fetches a ticket with its full message thread.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get(&self, ticket_id: &str) -> Result<ApiResponse<GetTicketResponse>, HttpError> {
        self.client
            .get(&resource_path(TICKETS_PATH, ticket_id), QueryParams::new())
            .await
    }

    /// Posts a reply from the store.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn reply(
        &self,
        ticket_id: &str,
        request: &ReplyTicketRequest,
    ) -> Result<ApiResponse<ReplyTicketResponse>, HttpError> {
        let path = format!("{}/reply", resource_path(TICKETS_PATH, ticket_id));
        self.client.post(&path, request).await
    }

    /// Changes the status or priority of a ticket.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn update(
        &self,
        ticket_id: &str,
        request: &UpdateTicketRequest,
    ) -> Result<ApiResponse<TicketResponse>, HttpError> {
        self.client
            .patch(&resource_path(TICKETS_PATH, ticket_id), request)
            .await
    }
}
