//! Single-writer ticket repository over a key-value medium.
//!
//! All mutations go through one instance; concurrent external writers
//! are tolerated by re-reading the persisted payload before every
//! operation. Storage failures never surface as errors here, they only
//! degrade the session (see [`StorageAdapter`]).

use std::sync::Arc;

use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::ids::{IdGenerator, UuidIdGenerator};
use crate::storage::{StorageAdapter, StorageIssue, StorageStatus};
use crate::ticket::{
    build_seed_tickets, clean_text, clean_text_or, encode_tickets, normalize_tickets, Ticket,
    TicketDraft, TicketPatch, TicketStatus, DESCRIPTION_FALLBACK, EQUIPMENT_FALLBACK,
    SOLUTION_FALLBACK,
};

/// Canonical persisted key for the ticket working set.
pub const STORAGE_KEY: &str = "ticketHealth:tickets:v2";

/// Older payload keys, migrated and retired on first load.
pub const LEGACY_KEYS: &[&str] = &["ticketHealth:tickets:v1"];

/// Local ticket repository with lazy initialization.
///
/// The first operation loads the canonical payload, falling back to
/// legacy-key migration and finally to the demo seed. A corrupted
/// payload is replaced by the demo seed and the corruption stays
/// visible through [`LocalTicketRepo::storage_status`].
pub struct LocalTicketRepo {
    adapter: StorageAdapter,
    memory: Option<Vec<Ticket>>,
    initialized: bool,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl LocalTicketRepo {
    pub fn new(adapter: StorageAdapter) -> Self {
        Self::with_runtime(adapter, Arc::new(SystemClock), Arc::new(UuidIdGenerator))
    }

    /// Repository with injected clock and id generator, for tests and
    /// alternative runtimes.
    pub fn with_runtime(
        adapter: StorageAdapter,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            adapter,
            memory: None,
            initialized: false,
            clock,
            ids,
        }
    }

    fn ensure_initialized(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        let now = self.clock.now();

        if let Some(raw) = self.adapter.read_json(STORAGE_KEY) {
            let tickets = normalize_tickets(&raw, now, self.ids.as_ref());
            debug!(count = tickets.len(), "loaded persisted tickets");
            self.memory = Some(tickets);
            return;
        }

        // A corrupted canonical payload means this was not a fresh
        // install; replace it with the demo base instead of migrating.
        if self.adapter.issue() == Some(StorageIssue::StorageCorrupted) {
            info!("persisted tickets corrupted, restoring demo seed");
            let seeded = build_seed_tickets(self.clock.as_ref(), self.ids.as_ref());
            self.persist(seeded);
            return;
        }

        // First decodable legacy payload wins, even when it holds no
        // tickets; an empty list is still the user's list.
        for key in LEGACY_KEYS {
            if let Some(raw) = self.adapter.read_json(key) {
                let tickets = normalize_tickets(&raw, now, self.ids.as_ref());
                info!(from = key, count = tickets.len(), "migrated legacy tickets");
                self.adapter.remove(key);
                self.persist(tickets);
                return;
            }
        }

        info!("no persisted tickets, seeding demo data");
        let seeded = build_seed_tickets(self.clock.as_ref(), self.ids.as_ref());
        self.persist(seeded);
    }

    /// Current working set, re-read from the medium when persistent so
    /// writes from other sessions are picked up.
    fn working_tickets(&mut self) -> Vec<Ticket> {
        self.ensure_initialized();

        if self.adapter.is_persistent() {
            if let Some(raw) = self.adapter.read_json(STORAGE_KEY) {
                let tickets = normalize_tickets(&raw, self.clock.now(), self.ids.as_ref());
                self.memory = Some(tickets.clone());
                return tickets;
            }
            if self.adapter.issue() == Some(StorageIssue::StorageCorrupted) {
                info!("persisted tickets corrupted, restoring demo seed");
                let seeded = build_seed_tickets(self.clock.as_ref(), self.ids.as_ref());
                self.persist(seeded.clone());
                return seeded;
            }
        }

        self.memory.clone().unwrap_or_default()
    }

    /// Install `tickets` as the working set and write them through.
    fn persist(&mut self, tickets: Vec<Ticket>) {
        let payload = encode_tickets(&tickets);
        self.memory = Some(tickets);
        self.adapter.write_raw(STORAGE_KEY, &payload);
    }

    /// All tickets, newest first.
    pub fn list(&mut self) -> Vec<Ticket> {
        self.working_tickets()
    }

    /// Create a ticket from a draft; blank fields get their fallbacks.
    pub fn create(&mut self, draft: &TicketDraft) -> Ticket {
        let mut tickets = self.working_tickets();
        let now = self.clock.now();

        let ticket = Ticket {
            id: self.ids.next_id(),
            equipment: clean_text_or(&draft.equipment, EQUIPMENT_FALLBACK),
            user_name: clean_text(&draft.user_name),
            description: clean_text_or(&draft.description, DESCRIPTION_FALLBACK),
            status: TicketStatus::Open,
            solution: None,
            created_at: now,
            closed_at: None,
        };

        tickets.insert(0, ticket.clone());
        self.persist(tickets);
        ticket
    }

    /// Apply a partial update. Blank text fields keep the existing
    /// value. When the resulting status is closed, `closed_at` is set
    /// to now, also for tickets that were already closed.
    pub fn update(&mut self, id: &str, patch: &TicketPatch) -> Option<Ticket> {
        let id = clean_text(id);
        if id.is_empty() {
            return None;
        }

        let mut tickets = self.working_tickets();
        let index = tickets.iter().position(|t| t.id == id)?;
        let mut ticket = tickets[index].clone();

        if let Some(equipment) = patch.equipment.as_deref().map(clean_text) {
            if !equipment.is_empty() {
                ticket.equipment = equipment;
            }
        }
        if let Some(user_name) = patch.user_name.as_deref().map(clean_text) {
            if !user_name.is_empty() {
                ticket.user_name = user_name;
            }
        }
        if let Some(description) = patch.description.as_deref().map(clean_text) {
            if !description.is_empty() {
                ticket.description = description;
            }
        }
        if let Some(status) = patch.status {
            ticket.status = status;
        }
        if let Some(solution) = patch.solution.as_deref().map(clean_text) {
            if !solution.is_empty() {
                ticket.solution = Some(solution);
            }
        }

        match ticket.status {
            TicketStatus::Closed => {
                if ticket.solution.is_none() {
                    ticket.solution = Some(SOLUTION_FALLBACK.to_string());
                }
                ticket.closed_at = Some(self.clock.now());
            }
            TicketStatus::Open => {
                ticket.solution = None;
                ticket.closed_at = None;
            }
        }

        tickets[index] = ticket.clone();
        self.persist(tickets);
        Some(ticket)
    }

    /// Close a ticket with the given solution text. Blank id or blank
    /// solution close nothing.
    pub fn close(&mut self, id: &str, solution: &str) -> Option<Ticket> {
        let id = clean_text(id);
        let solution = clean_text(solution);
        if id.is_empty() || solution.is_empty() {
            return None;
        }

        self.update(
            &id,
            &TicketPatch {
                status: Some(TicketStatus::Closed),
                solution: Some(solution),
                ..TicketPatch::default()
            },
        )
    }

    /// Remove a ticket; returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let id = clean_text(id);
        if id.is_empty() {
            return false;
        }

        let mut tickets = self.working_tickets();
        let before = tickets.len();
        tickets.retain(|t| t.id != id);
        if tickets.len() == before {
            return false;
        }

        self.persist(tickets);
        true
    }

    /// Replace the working set with fresh demo data.
    pub fn reset_seed(&mut self) -> Vec<Ticket> {
        let seeded = build_seed_tickets(self.clock.as_ref(), self.ids.as_ref());
        self.persist(seeded.clone());
        seeded
    }

    /// Storage health as of the operations performed so far. Does not
    /// trigger initialization.
    pub fn storage_status(&self) -> StorageStatus {
        self.adapter.status()
    }
}
