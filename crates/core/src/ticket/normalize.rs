//! Canonicalization of raw ticket records.
//!
//! Persisted payloads and legacy data may contain anything; the
//! normalizer turns arbitrary JSON into strict [`Ticket`] values or
//! rejects them. Every ticket it emits satisfies the closed/solution
//! invariant documented on [`Ticket`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::ids::IdGenerator;

use super::{Ticket, TicketStatus};

/// Fallback for a blank equipment field.
pub const EQUIPMENT_FALLBACK: &str = "Equipamento não informado";
/// Fallback for a blank description.
pub const DESCRIPTION_FALLBACK: &str = "Sem descrição.";
/// Fallback for a closed ticket without a recorded solution.
pub const SOLUTION_FALLBACK: &str = "Solução não registrada.";

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn clean_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Like [`clean_text`], substituting `fallback` when the result is blank.
pub fn clean_text_or(value: &str, fallback: &str) -> String {
    let text = clean_text(value);
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

/// Cleaned text out of a JSON scalar; missing/null/composite yields "".
fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => clean_text(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn scalar_text_or(value: Option<&Value>, fallback: &str) -> String {
    let text = scalar_text(value);
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

fn parse_date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = value?.as_str()?;
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Canonicalize a single raw record into a strict [`Ticket`].
///
/// Returns `None` for non-object input. `now` is the shared fallback
/// for both date fields so one normalization call stays internally
/// consistent; `ids` supplies a fresh id when the input has none.
pub fn normalize_ticket(raw: &Value, now: DateTime<Utc>, ids: &dyn IdGenerator) -> Option<Ticket> {
    let obj = raw.as_object()?;

    // Closed only on the exact wire string, anything else is open.
    let status = match obj.get("status").and_then(Value::as_str) {
        Some("closed") => TicketStatus::Closed,
        _ => TicketStatus::Open,
    };

    let equipment = scalar_text_or(obj.get("equipment"), EQUIPMENT_FALLBACK);
    let description = scalar_text_or(obj.get("description"), DESCRIPTION_FALLBACK);
    let user_name = scalar_text(obj.get("user_name"));
    let created_at = parse_date(obj.get("created_at")).unwrap_or(now);

    let (solution, closed_at) = match status {
        TicketStatus::Closed => {
            let solution = scalar_text_or(obj.get("solution"), SOLUTION_FALLBACK);
            let closed_at = parse_date(obj.get("updated_at")).unwrap_or(now);
            (Some(solution), Some(closed_at))
        }
        TicketStatus::Open => (None, None),
    };

    let id = scalar_text(obj.get("id"));
    let id = if id.is_empty() { ids.next_id() } else { id };

    Some(Ticket {
        id,
        equipment,
        user_name,
        description,
        status,
        solution,
        created_at,
        closed_at,
    })
}

/// Canonicalize a raw collection, dropping invalid records and
/// duplicate ids (first occurrence wins, input order preserved).
///
/// Non-array input yields an empty working set.
pub fn normalize_tickets(raw: &Value, now: DateTime<Utc>, ids: &dyn IdGenerator) -> Vec<Ticket> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut tickets = Vec::new();

    for item in items {
        let Some(ticket) = normalize_ticket(item, now, ids) else {
            continue;
        };
        if !seen.insert(ticket.id.clone()) {
            continue;
        }
        tickets.push(ticket);
    }

    tickets
}
