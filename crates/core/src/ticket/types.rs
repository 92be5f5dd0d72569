//! Core ticket data types and the persisted record shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a ticket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    Closed,
}

impl TicketStatus {
    /// Returns the status as its wire string (for filtering).
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Closed => "closed",
        }
    }
}

/// A support ticket.
///
/// Invariant: `solution` and `closed_at` are both `Some` exactly when
/// `status` is `Closed`, both `None` when `Open`. Every ticket that
/// exits the normalizer satisfies this.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Unique identifier, `t_` + UUID for generated ids.
    pub id: String,
    /// Equipment or location the ticket refers to.
    pub equipment: String,
    /// Requester name, may be empty.
    pub user_name: String,
    /// Problem description.
    pub description: String,
    /// Current status.
    pub status: TicketStatus,
    /// Resolution text, present iff closed.
    pub solution: Option<String>,
    /// When the ticket was opened.
    pub created_at: DateTime<Utc>,
    /// When the ticket was closed, present iff closed.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub fn is_closed(&self) -> bool {
        self.status == TicketStatus::Closed
    }
}

/// Draft fields for creating a ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDraft {
    pub equipment: String,
    pub user_name: String,
    pub description: String,
}

/// Partial update for an existing ticket.
///
/// A field that is `None` or cleans to an empty string keeps the
/// existing value; blank never means "clear".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketPatch {
    pub equipment: Option<String>,
    pub user_name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub solution: Option<String>,
}

/// Storage/wire shape of a ticket, snake_case field names.
///
/// `updated_at` carries `closed_at` on this boundary; the mapping must
/// stay exact for round-trip compatibility with persisted data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRecord {
    pub id: String,
    pub equipment: String,
    pub user_name: String,
    pub description: String,
    pub status: TicketStatus,
    pub solution: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<&Ticket> for TicketRecord {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.clone(),
            equipment: ticket.equipment.clone(),
            user_name: ticket.user_name.clone(),
            description: ticket.description.clone(),
            status: ticket.status,
            solution: ticket.solution.clone(),
            created_at: ticket.created_at.to_rfc3339(),
            updated_at: ticket.closed_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Serialize a working set to its persisted JSON payload.
pub fn encode_tickets(tickets: &[Ticket]) -> String {
    let records: Vec<TicketRecord> = tickets.iter().map(TicketRecord::from).collect();
    serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string())
}
