//! Ticket API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tickethealth_core::{
    normalize_search_term, validate_close_draft, validate_ticket_draft, StatusFilter, Ticket,
    TicketPatch, TicketStatus,
};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a ticket
#[derive(Debug, Deserialize)]
pub struct CreateTicketBody {
    /// Equipment or location the ticket refers to
    pub equipment: String,
    /// Requester name, optional
    #[serde(default)]
    pub user_name: String,
    /// Problem description
    pub description: String,
}

/// Request body for partially updating a ticket
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicketBody {
    pub equipment: Option<String>,
    pub user_name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub solution: Option<String>,
}

/// Request body for closing a ticket
#[derive(Debug, Deserialize)]
pub struct CloseTicketBody {
    pub solution: String,
}

/// Query parameters for listing tickets
#[derive(Debug, Deserialize)]
pub struct ListTicketsParams {
    /// Filter by status ("open" or "closed"); unknown values are ignored
    pub status: Option<String>,
    /// Free-text search over equipment, description and requester name
    pub search: Option<String>,
}

/// Response for ticket operations
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: String,
    pub equipment: String,
    pub user_name: String,
    pub description: String,
    pub status: TicketStatus,
    pub solution: Option<String>,
    pub created_at: String,
    pub closed_at: Option<String>,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            equipment: ticket.equipment,
            user_name: ticket.user_name,
            description: ticket.description,
            status: ticket.status,
            solution: ticket.solution,
            created_at: ticket.created_at.to_rfc3339(),
            closed_at: ticket.closed_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Response for listing tickets
#[derive(Debug, Serialize)]
pub struct ListTicketsResponse {
    pub tickets: Vec<TicketResponse>,
    pub total: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// List tickets, optionally filtered by status and search term
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListTicketsParams>,
) -> Json<ListTicketsResponse> {
    let tickets = state.repo().list();

    let filter = params.status.as_deref().and_then(StatusFilter::parse);
    let term = params
        .search
        .as_deref()
        .map(normalize_search_term)
        .filter(|t| !t.is_empty());

    let tickets: Vec<TicketResponse> = tickets
        .into_iter()
        .filter(|t| filter.is_none_or(|f| f.matches(t.status)))
        .filter(|t| term.as_deref().is_none_or(|term| matches_search(t, term)))
        .map(TicketResponse::from)
        .collect();

    let total = tickets.len();
    Json(ListTicketsResponse { tickets, total })
}

fn matches_search(ticket: &Ticket, term: &str) -> bool {
    ticket.equipment.to_lowercase().contains(term)
        || ticket.description.to_lowercase().contains(term)
        || ticket.user_name.to_lowercase().contains(term)
}

/// Create a new ticket
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTicketBody>,
) -> Result<(StatusCode, Json<TicketResponse>), (StatusCode, Json<ErrorResponse>)> {
    let draft = validate_ticket_draft(&body.equipment, &body.user_name, &body.description)
        .map_err(|e| error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let ticket = state.repo().create(&draft);
    Ok((StatusCode::CREATED, Json(TicketResponse::from(ticket))))
}

/// Partially update a ticket
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTicketBody>,
) -> Result<Json<TicketResponse>, (StatusCode, Json<ErrorResponse>)> {
    let patch = TicketPatch {
        equipment: body.equipment,
        user_name: body.user_name,
        description: body.description,
        status: body.status,
        solution: body.solution,
    };

    match state.repo().update(&id, &patch) {
        Some(ticket) => Ok(Json(TicketResponse::from(ticket))),
        None => Err(error_response(
            StatusCode::NOT_FOUND,
            "Chamado não encontrado para atualização.",
        )),
    }
}

/// Close a ticket with a solution
pub async fn close_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<CloseTicketBody>,
) -> Result<Json<TicketResponse>, (StatusCode, Json<ErrorResponse>)> {
    let draft = validate_close_draft(&id, &body.solution)
        .map_err(|e| error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    match state.repo().close(&draft.id, &draft.solution) {
        Some(ticket) => Ok(Json(TicketResponse::from(ticket))),
        None => Err(error_response(
            StatusCode::NOT_FOUND,
            "Chamado não encontrado para encerramento.",
        )),
    }
}

/// Delete a ticket
pub async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    if state.repo().remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(error_response(
            StatusCode::NOT_FOUND,
            "Chamado não encontrado para remoção.",
        ))
    }
}

/// Replace the working set with the demo seed
pub async fn reset_seed(State(state): State<Arc<AppState>>) -> Json<ListTicketsResponse> {
    let tickets: Vec<TicketResponse> = state
        .repo()
        .reset_seed()
        .into_iter()
        .map(TicketResponse::from)
        .collect();
    let total = tickets.len();
    Json(ListTicketsResponse { tickets, total })
}
