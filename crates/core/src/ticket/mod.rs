//! Ticket model, normalization and demo seed data.

mod normalize;
mod seed;
mod types;

pub use normalize::{
    clean_text, clean_text_or, normalize_ticket, normalize_tickets, DESCRIPTION_FALLBACK,
    EQUIPMENT_FALLBACK, SOLUTION_FALLBACK,
};
pub use seed::build_seed_tickets;
pub use types::{encode_tickets, Ticket, TicketDraft, TicketPatch, TicketRecord, TicketStatus};
