//! Application state driven by the action layer.

use crate::storage::{StorageIssue, StorageMode, StorageStatus};
use crate::ticket::Ticket;
use crate::validators::StatusFilter;

/// Which modal is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    /// Create/edit form.
    Form,
    /// Close-with-solution form.
    Close,
}

/// Transient UI state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiModel {
    pub modal: Option<ModalKind>,
    /// Ticket loaded into the form modal, `None` when creating.
    pub editing_id: Option<String>,
    /// Ticket targeted by the close modal.
    pub closing_id: Option<String>,
}

/// Full application state held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct AppModel {
    pub tickets: Vec<Ticket>,
    pub filter: StatusFilter,
    /// Normalized (cleaned, lowercased) search term.
    pub search: String,
    pub storage: StorageStatus,
    pub ui: UiModel,
}

impl AppModel {
    /// Initial state before the first load: empty list, open filter.
    pub fn initial(storage: StorageStatus) -> Self {
        Self {
            tickets: Vec::new(),
            filter: StatusFilter::Open,
            search: String::new(),
            storage,
            ui: UiModel::default(),
        }
    }

    pub fn ticket(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Tickets matching the active filter and search term, in working
    /// set order. The search term matches equipment, description and
    /// requester name, case-insensitively.
    pub fn visible_tickets(&self) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| self.filter.matches(t.status))
            .filter(|t| {
                if self.search.is_empty() {
                    return true;
                }
                let term = self.search.as_str();
                t.equipment.to_lowercase().contains(term)
                    || t.description.to_lowercase().contains(term)
                    || t.user_name.to_lowercase().contains(term)
            })
            .collect()
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::initial(StorageStatus {
            mode: StorageMode::Volatile,
            issue: Some(StorageIssue::StorageUnavailable),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::TicketStatus;
    use chrono::Utc;

    fn ticket(id: &str, equipment: &str, user_name: &str, status: TicketStatus) -> Ticket {
        Ticket {
            id: id.to_string(),
            equipment: equipment.to_string(),
            user_name: user_name.to_string(),
            description: "Sem detalhes.".to_string(),
            status,
            solution: (status == TicketStatus::Closed).then(|| "Feito.".to_string()),
            created_at: Utc::now(),
            closed_at: (status == TicketStatus::Closed).then(Utc::now),
        }
    }

    #[test]
    fn test_visible_tickets_filters_by_status() {
        let mut model = AppModel::default();
        model.tickets = vec![
            ticket("a", "Monitor", "Ana", TicketStatus::Open),
            ticket("b", "Mouse", "Beto", TicketStatus::Closed),
        ];

        let visible: Vec<&str> = model.visible_tickets().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(visible, vec!["a"]);

        model.filter = StatusFilter::Closed;
        let visible: Vec<&str> = model.visible_tickets().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(visible, vec!["b"]);
    }

    #[test]
    fn test_visible_tickets_searches_all_text_fields() {
        let mut model = AppModel::default();
        model.tickets = vec![
            ticket("a", "Monitor Dell", "Ana", TicketStatus::Open),
            ticket("b", "Teclado", "Fernanda", TicketStatus::Open),
        ];

        model.search = "dell".to_string();
        assert_eq!(model.visible_tickets().len(), 1);

        model.search = "fernanda".to_string();
        let visible: Vec<&str> = model.visible_tickets().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(visible, vec!["b"]);

        model.search = "xyz".to_string();
        assert!(model.visible_tickets().is_empty());
    }
}
