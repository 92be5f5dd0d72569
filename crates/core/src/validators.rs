//! Input validation for ticket forms.
//!
//! Validation happens on cleaned text, so surrounding whitespace never
//! counts toward the length bounds. Messages are user-facing and in
//! Portuguese, matching the product copy.

use thiserror::Error;

use crate::ticket::{clean_text, TicketDraft, TicketStatus};

/// Rejection of a form submission, carrying the user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Informe equipamento/local com pelo menos 3 caracteres.")]
    EquipmentTooShort,
    #[error("Equipamento/local pode ter no máximo 120 caracteres.")]
    EquipmentTooLong,
    #[error("A descrição precisa ter pelo menos 5 caracteres.")]
    DescriptionTooShort,
    #[error("A descrição pode ter no máximo 500 caracteres.")]
    DescriptionTooLong,
    #[error("Solicitante pode ter no máximo 80 caracteres.")]
    UserNameTooLong,
    #[error("Chamado inválido para encerramento.")]
    InvalidCloseTarget,
    #[error("A solução precisa ter pelo menos 5 caracteres.")]
    SolutionTooShort,
    #[error("A solução pode ter no máximo 500 caracteres.")]
    SolutionTooLong,
}

/// Validated close-form payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseDraft {
    pub id: String,
    pub solution: String,
}

/// Status filter applied to ticket listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Open,
    Closed,
}

impl StatusFilter {
    /// Parse a filter value; anything unrecognized yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match clean_text(value).as_str() {
            "open" => Some(StatusFilter::Open),
            "closed" => Some(StatusFilter::Closed),
            _ => None,
        }
    }

    pub fn matches(&self, status: TicketStatus) -> bool {
        match self {
            StatusFilter::Open => status == TicketStatus::Open,
            StatusFilter::Closed => status == TicketStatus::Closed,
        }
    }
}

/// Clean and lowercase a free-text search term.
pub fn normalize_search_term(value: &str) -> String {
    clean_text(value).to_lowercase()
}

/// Validate the create/edit form fields into a draft.
///
/// Bounds are in characters, not bytes: equipment 3..=120,
/// description 5..=500, requester name up to 80.
pub fn validate_ticket_draft(
    equipment: &str,
    user_name: &str,
    description: &str,
) -> Result<TicketDraft, ValidationError> {
    let equipment = clean_text(equipment);
    let user_name = clean_text(user_name);
    let description = clean_text(description);

    let equipment_len = equipment.chars().count();
    if equipment_len < 3 {
        return Err(ValidationError::EquipmentTooShort);
    }
    if equipment_len > 120 {
        return Err(ValidationError::EquipmentTooLong);
    }

    let description_len = description.chars().count();
    if description_len < 5 {
        return Err(ValidationError::DescriptionTooShort);
    }
    if description_len > 500 {
        return Err(ValidationError::DescriptionTooLong);
    }

    if user_name.chars().count() > 80 {
        return Err(ValidationError::UserNameTooLong);
    }

    Ok(TicketDraft {
        equipment,
        user_name,
        description,
    })
}

/// Validate the close form: a target id and a solution of 5..=500
/// characters.
pub fn validate_close_draft(id: &str, solution: &str) -> Result<CloseDraft, ValidationError> {
    let id = clean_text(id);
    if id.is_empty() {
        return Err(ValidationError::InvalidCloseTarget);
    }

    let solution = clean_text(solution);
    let solution_len = solution.chars().count();
    if solution_len < 5 {
        return Err(ValidationError::SolutionTooShort);
    }
    if solution_len > 500 {
        return Err(ValidationError::SolutionTooLong);
    }

    Ok(CloseDraft { id, solution })
}
