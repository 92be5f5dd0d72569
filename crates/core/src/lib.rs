pub mod actions;
pub mod clock;
pub mod config;
pub mod ids;
pub mod repo;
pub mod storage;
pub mod store;
pub mod testing;
pub mod ticket;
pub mod validators;

pub use actions::{
    issue_message, Actions, AppModel, ModalKind, Notifier, TicketFormData, TracingNotifier,
    UiModel,
};
pub use clock::{Clock, SystemClock};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, StorageBackend,
};
pub use ids::{IdGenerator, UuidIdGenerator};
pub use repo::{LocalTicketRepo, STORAGE_KEY};
pub use storage::{
    FileMedium, KeyValueMedium, MediumError, MemoryMedium, StorageAdapter, StorageIssue,
    StorageMode, StorageStatus,
};
pub use store::{Store, Subscription};
pub use ticket::{Ticket, TicketDraft, TicketPatch, TicketRecord, TicketStatus};
pub use validators::{
    normalize_search_term, validate_close_draft, validate_ticket_draft, CloseDraft, StatusFilter,
    ValidationError,
};
