//! User actions: the only writers of the application state.
//!
//! Every action goes repo first, then publishes the refreshed working
//! set and storage status to the store, then notifies the outcome.

mod model;
mod notifier;

pub use model::{AppModel, ModalKind, UiModel};
pub use notifier::{Notifier, TracingNotifier};

use std::sync::{Arc, Mutex};

use crate::repo::LocalTicketRepo;
use crate::storage::StorageIssue;
use crate::store::Store;
use crate::ticket::TicketPatch;
use crate::validators::{
    normalize_search_term, validate_close_draft, validate_ticket_draft, StatusFilter,
};

/// Form payload for create and edit submissions.
#[derive(Debug, Clone, Default)]
pub struct TicketFormData {
    /// Present when editing an existing ticket.
    pub id: Option<String>,
    pub equipment: String,
    pub user_name: String,
    pub description: String,
}

/// User-facing explanation for a degraded storage session.
pub fn issue_message(issue: StorageIssue) -> &'static str {
    match issue {
        StorageIssue::StorageUnavailable => {
            "LocalStorage indisponível: os dados ficarão só nesta sessão."
        }
        StorageIssue::QuotaExceeded => {
            "Limite do navegador atingido: os dados novos ficarão só nesta sessão."
        }
        StorageIssue::StorageCorrupted => {
            "Dados locais corrompidos: o sistema restaurou a base de demonstração."
        }
    }
}

const GENERIC_FAILURE: &str = "Falha inesperada ao processar a operação.";
const LOAD_FAILURE: &str = "Erro ao carregar os tickets.";
const SAVE_FAILURE: &str = "Erro ao salvar chamado.";
const CLOSE_FAILURE: &str = "Erro ao encerrar chamado.";
const REMOVE_FAILURE: &str = "Erro ao remover chamado.";
const RESET_FAILURE: &str = "Erro ao restaurar os dados demo.";

const CONFIRM_REMOVE: &str = "Remover este chamado permanentemente?";
const CONFIRM_RESET: &str = "Restaurar dados demo? Isso substitui a lista atual de chamados.";

type ConfirmFn = Box<dyn Fn(&str) -> bool + Send>;

/// Action dispatcher owning the store and a handle to the repository.
pub struct Actions<N: Notifier> {
    repo: Arc<Mutex<LocalTicketRepo>>,
    store: Store<AppModel>,
    notifier: N,
    confirm: ConfirmFn,
    warned_issue: Option<StorageIssue>,
}

impl<N: Notifier> Actions<N> {
    /// Dispatcher that auto-confirms destructive prompts; pair with
    /// [`Actions::with_confirm`] when a real prompt exists.
    pub fn new(repo: Arc<Mutex<LocalTicketRepo>>, notifier: N) -> Self {
        let storage = match repo.lock() {
            Ok(repo) => repo.storage_status(),
            Err(_) => AppModel::default().storage,
        };
        Self {
            repo,
            store: Store::new(AppModel::initial(storage)),
            notifier,
            confirm: Box::new(|_| true),
            warned_issue: None,
        }
    }

    pub fn with_confirm(mut self, confirm: impl Fn(&str) -> bool + Send + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    pub fn store(&mut self) -> &mut Store<AppModel> {
        &mut self.store
    }

    pub fn state(&self) -> AppModel {
        self.store.get_state()
    }

    /// Pull tickets and storage status from the repo into the store,
    /// then surface a storage issue toast at most once per issue.
    fn refresh_from_repo(&mut self, failure_message: &str) -> bool {
        let pulled = match self.repo.lock() {
            Ok(mut repo) => {
                let tickets = repo.list();
                let storage = repo.storage_status();
                Some((tickets, storage))
            }
            Err(_) => None,
        };

        let Some((tickets, storage)) = pulled else {
            self.notifier.error(failure_message);
            return false;
        };

        self.store.set_state(|mut model| {
            model.tickets = tickets;
            model.storage = storage;
            model
        });

        if let Some(issue) = storage.issue {
            if self.warned_issue != Some(issue) {
                self.warned_issue = Some(issue);
                self.notifier.warning(issue_message(issue));
            }
        }
        true
    }

    fn clear_modal(&mut self) {
        self.store.set_state(|mut model| {
            model.ui = UiModel::default();
            model
        });
    }

    /// Initial load. Safe to call again; it re-reads everything.
    pub fn bootstrap(&mut self) {
        self.refresh_from_repo(LOAD_FAILURE);
    }

    /// Apply a status filter; unknown values are ignored.
    pub fn set_filter(&mut self, value: &str) {
        let Some(filter) = StatusFilter::parse(value) else {
            return;
        };
        self.store.set_state(|mut model| {
            model.filter = filter;
            model
        });
    }

    pub fn set_search(&mut self, value: &str) {
        let term = normalize_search_term(value);
        self.store.set_state(|mut model| {
            model.search = term;
            model
        });
    }

    pub fn open_create_modal(&mut self) {
        self.store.set_state(|mut model| {
            model.ui = UiModel {
                modal: Some(ModalKind::Form),
                editing_id: None,
                closing_id: None,
            };
            model
        });
    }

    /// Open the form modal loaded with an existing ticket.
    pub fn open_edit_modal(&mut self, id: &str) {
        if self.store.state().ticket(id).is_none() {
            self.notifier.warning("Chamado não encontrado para edição.");
            return;
        }
        let id = id.to_string();
        self.store.set_state(|mut model| {
            model.ui = UiModel {
                modal: Some(ModalKind::Form),
                editing_id: Some(id),
                closing_id: None,
            };
            model
        });
    }

    pub fn open_close_modal(&mut self, id: &str) {
        let Some(ticket) = self.store.state().ticket(id) else {
            self.notifier
                .warning("Chamado não encontrado para encerramento.");
            return;
        };
        if ticket.is_closed() {
            self.notifier.info("Este chamado já está encerrado.");
            return;
        }
        let id = id.to_string();
        self.store.set_state(|mut model| {
            model.ui = UiModel {
                modal: Some(ModalKind::Close),
                editing_id: None,
                closing_id: Some(id),
            };
            model
        });
    }

    pub fn close_modal(&mut self) {
        self.clear_modal();
    }

    /// Escape key closes whatever modal is open; nothing else.
    pub fn close_modal_from_escape(&mut self) {
        if self.store.state().ui.modal.is_some() {
            self.clear_modal();
        }
    }

    /// Submit the create/edit form. Validation failures keep the modal
    /// open; a successful save closes it.
    pub fn submit_ticket_form(&mut self, data: &TicketFormData) {
        let draft = match validate_ticket_draft(&data.equipment, &data.user_name, &data.description)
        {
            Ok(draft) => draft,
            Err(err) => {
                self.notifier.warning(&err.to_string());
                return;
            }
        };

        let outcome = match self.repo.lock() {
            Ok(mut repo) => match &data.id {
                Some(id) => {
                    let patch = TicketPatch {
                        equipment: Some(draft.equipment),
                        user_name: Some(draft.user_name),
                        description: Some(draft.description),
                        ..TicketPatch::default()
                    };
                    Some(repo.update(id, &patch).is_some())
                }
                None => {
                    repo.create(&draft);
                    Some(true)
                }
            },
            Err(_) => None,
        };

        match outcome {
            None => {
                self.notifier.error(SAVE_FAILURE);
            }
            // Not found leaves the modal open so nothing typed is lost.
            Some(false) => {
                self.notifier
                    .warning("Chamado não encontrado para atualização.");
            }
            Some(true) => {
                self.notifier.success(if data.id.is_some() {
                    "Chamado atualizado com sucesso."
                } else {
                    "Novo chamado criado com sucesso."
                });
                self.clear_modal();
                self.refresh_from_repo(GENERIC_FAILURE);
            }
        }
    }

    /// Submit the close form for the ticket targeted by the modal.
    pub fn submit_close_form(&mut self, id: &str, solution: &str) {
        let draft = match validate_close_draft(id, solution) {
            Ok(draft) => draft,
            Err(err) => {
                self.notifier.warning(&err.to_string());
                return;
            }
        };

        let outcome = match self.repo.lock() {
            Ok(mut repo) => Some(repo.close(&draft.id, &draft.solution).is_some()),
            Err(_) => None,
        };

        match outcome {
            None => {
                self.notifier.error(CLOSE_FAILURE);
            }
            Some(false) => {
                self.notifier
                    .warning("Chamado não encontrado para encerramento.");
            }
            Some(true) => {
                self.notifier.success("Chamado encerrado com sucesso.");
                self.clear_modal();
                self.refresh_from_repo(GENERIC_FAILURE);
            }
        }
    }

    /// Delete a ticket after confirmation.
    pub fn delete_ticket(&mut self, id: &str) {
        if self.store.state().ticket(id).is_none() {
            self.notifier.warning("Chamado não encontrado para remoção.");
            return;
        }
        if !(self.confirm)(CONFIRM_REMOVE) {
            return;
        }

        let outcome = match self.repo.lock() {
            Ok(mut repo) => Some(repo.remove(id)),
            Err(_) => None,
        };

        match outcome {
            None => {
                self.notifier.error(REMOVE_FAILURE);
            }
            // Gone already, e.g. removed by another session.
            Some(false) => {
                self.notifier.warning("Chamado já foi removido.");
            }
            Some(true) => {
                self.notifier.info("Chamado removido.");
                self.refresh_from_repo(GENERIC_FAILURE);
            }
        }
    }

    /// Replace the working set with the demo seed after confirmation.
    pub fn reset_seed(&mut self) {
        if !(self.confirm)(CONFIRM_RESET) {
            return;
        }

        let reset = match self.repo.lock() {
            Ok(mut repo) => {
                repo.reset_seed();
                true
            }
            Err(_) => false,
        };

        if !reset {
            self.notifier.error(RESET_FAILURE);
            return;
        }
        self.notifier.info("Dados demo restaurados.");
        self.refresh_from_repo(GENERIC_FAILURE);
    }
}
