//! Demo seed dataset used on first run and corruption recovery.

use chrono::Duration;

use crate::clock::Clock;
use crate::ids::IdGenerator;

use super::{Ticket, TicketStatus};

/// Build the fixed demo working set: two open tickets and one closed,
/// with plausible relative timestamps from the injected clock.
pub fn build_seed_tickets(clock: &dyn Clock, ids: &dyn IdGenerator) -> Vec<Ticket> {
    let now = clock.now();

    vec![
        Ticket {
            id: ids.next_id(),
            equipment: "Monitor Dell 24\" - Setor Administrativo".to_string(),
            user_name: "Fernanda".to_string(),
            description: "Tela apagada e sem sinal de vídeo após queda de energia elétrica."
                .to_string(),
            status: TicketStatus::Open,
            solution: None,
            created_at: now - Duration::minutes(48),
            closed_at: None,
        },
        Ticket {
            id: ids.next_id(),
            equipment: "Mouse sem fio e Teclado - RH".to_string(),
            user_name: "Carlos".to_string(),
            description: "Mouse com cliques falhando e teclado com algumas teclas travando."
                .to_string(),
            status: TicketStatus::Closed,
            solution: Some("Substituição do kit de periféricos por um novo.".to_string()),
            created_at: now - Duration::minutes(120),
            closed_at: Some(now - Duration::minutes(35)),
        },
        Ticket {
            id: ids.next_id(),
            equipment: "Computador Desktop - Recepção 01".to_string(),
            user_name: "Ana Maria".to_string(),
            description: "Lentidão extrema e travamentos constantes ao utilizar o sistema."
                .to_string(),
            status: TicketStatus::Open,
            solution: None,
            created_at: now - Duration::minutes(15),
            closed_at: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedClock, SequentialIds};

    #[test]
    fn test_seed_shape() {
        let clock = FixedClock::default();
        let ids = SequentialIds::new();
        let seed = build_seed_tickets(&clock, &ids);

        assert_eq!(seed.len(), 3);
        assert_eq!(
            seed.iter()
                .filter(|t| t.status == TicketStatus::Open)
                .count(),
            2
        );
        assert_eq!(seed.iter().filter(|t| t.is_closed()).count(), 1);

        for ticket in &seed {
            assert_eq!(ticket.solution.is_some(), ticket.is_closed());
            assert_eq!(ticket.closed_at.is_some(), ticket.is_closed());
            assert!(!ticket.id.is_empty());
        }
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let clock = FixedClock::default();
        let ids = SequentialIds::new();
        let seed = build_seed_tickets(&clock, &ids);
        assert_ne!(seed[0].id, seed[1].id);
        assert_ne!(seed[1].id, seed[2].id);
    }

    #[test]
    fn test_seed_timestamps_are_in_the_past() {
        let clock = FixedClock::default();
        let now = clock.now_value();
        let ids = SequentialIds::new();
        for ticket in build_seed_tickets(&clock, &ids) {
            assert!(ticket.created_at < now);
            if let Some(closed_at) = ticket.closed_at {
                assert!(closed_at > ticket.created_at);
                assert!(closed_at < now);
            }
        }
    }
}
