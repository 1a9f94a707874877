// catalog/session.rs - Edit session state machine for the product form
//
// Idle → Creating | Editing → Saving → Idle (success)
//                                    → Creating | Editing (failure, errors attached)
//
// The `Saving` state is the single-flight guard: save attempts while saving
// are ignored. Store failures never escape; they become a general error on
// the session plus an error notification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{Product, ProductDraft, ProductFields, ProductId, ProductPatch};
use super::notification::Notification;
use super::store::{ProductStore, StoreError};
use super::validation::{validate, FieldErrors, ProductField};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Creating,
    Editing,
    Saving,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Creating => write!(f, "Creating"),
            SessionState::Editing => write!(f, "Editing"),
            SessionState::Saving => write!(f, "Saving"),
        }
    }
}

/// Transitions the session refuses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("another product is already open in the form (state: {0})")]
    DraftOpen(SessionState),
}

/// Store call a save has to perform
#[derive(Clone, Debug, PartialEq)]
pub enum SaveRequest {
    Create(ProductFields),
    Update { id: ProductId, patch: ProductPatch },
}

/// Result of trying to start a save
#[derive(Clone, Debug, PartialEq)]
pub enum SaveAttempt {
    /// No draft open, or a save is already in flight
    Ignored,
    /// Validation failed; the errors are attached to the session
    Blocked(FieldErrors),
    /// Editing draft identical to the stored product; session is back to Idle
    Unchanged(Notification),
    /// Session is now `Saving`; the caller must run the request and report back
    Ready(SaveRequest),
}

/// Outcome of `EditSession::save`
#[derive(Clone, Debug, PartialEq)]
pub enum SaveOutcome {
    Ignored,
    Blocked(FieldErrors),
    Unchanged(Notification),
    Saved { product: Product, notification: Notification },
    Failed { error: StoreError, notification: Notification },
}

/// In-memory edit session owning at most one draft
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditSession {
    state: SessionState,
    draft: Option<ProductDraft>,
    // Stored version of the product being edited, used to build the patch
    original: Option<Product>,
    field_errors: FieldErrors,
    general_error: Option<String>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn draft(&self) -> Option<&ProductDraft> {
        self.draft.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.state != SessionState::Idle
    }

    pub fn is_saving(&self) -> bool {
        self.state == SessionState::Saving
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn field_error(&self, field: ProductField) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Open an empty draft for a new product
    pub fn start_create(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        tracing::debug!("Opening draft for a new product");
        self.draft = Some(ProductDraft::new());
        self.original = None;
        self.state = SessionState::Creating;
        Ok(())
    }

    /// Open a draft copied from an existing product
    pub fn start_edit(&mut self, product: &Product) -> Result<(), SessionError> {
        self.ensure_idle()?;
        tracing::debug!("Opening draft for product {}", product.id);
        self.draft = Some(ProductDraft::from_product(product));
        self.original = Some(product.clone());
        self.state = SessionState::Editing;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Idle {
            Ok(())
        } else {
            tracing::warn!("Rejected opening a draft while {}", self.state);
            Err(SessionError::DraftOpen(self.state))
        }
    }

    /// Mutate the open draft. Returns false when there is nothing editable.
    pub fn edit(&mut self, change: impl FnOnce(&mut ProductFields)) -> bool {
        if !matches!(self.state, SessionState::Creating | SessionState::Editing) {
            return false;
        }
        match self.draft.as_mut() {
            Some(draft) => {
                change(&mut draft.fields);
                true
            }
            None => false,
        }
    }

    /// Drop the inline error of a field the user just corrected
    pub fn clear_field_error(&mut self, field: ProductField) {
        self.field_errors.remove(&field);
    }

    /// Discard the draft. Refused while a save is in flight.
    pub fn cancel(&mut self) -> bool {
        if self.state == SessionState::Saving {
            tracing::warn!("Cancel ignored: save in flight");
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.draft = None;
        self.original = None;
        self.field_errors.clear();
        self.general_error = None;
    }

    // State to fall back to after a failed save
    fn editing_state(&self) -> SessionState {
        match self.draft.as_ref().and_then(|d| d.id) {
            Some(_) => SessionState::Editing,
            None => SessionState::Creating,
        }
    }

    /// Validate and, when eligible, move to `Saving`
    pub fn begin_save(&mut self) -> SaveAttempt {
        if !matches!(self.state, SessionState::Creating | SessionState::Editing) {
            tracing::debug!("Save ignored in state {}", self.state);
            return SaveAttempt::Ignored;
        }
        let Some(draft) = self.draft.as_ref() else {
            return SaveAttempt::Ignored;
        };

        // Validate what will be sent: rounding can turn a tiny price into zero
        let fields = draft.submission();
        let errors = validate(&fields);
        if !errors.is_empty() {
            tracing::debug!("Save blocked by {} field error(s)", errors.len());
            self.field_errors = errors.clone();
            self.general_error = None;
            return SaveAttempt::Blocked(errors);
        }

        let request = match (draft.id, self.original.as_ref()) {
            (Some(id), Some(original)) => {
                let patch = ProductPatch::diff(&original.to_fields(), &fields);
                if patch.is_empty() {
                    self.reset();
                    return SaveAttempt::Unchanged(Notification::info("Nenhuma alteração para salvar"));
                }
                SaveRequest::Update { id, patch }
            }
            (Some(id), None) => SaveRequest::Update {
                id,
                patch: ProductPatch::from(fields),
            },
            (None, _) => SaveRequest::Create(fields),
        };

        self.field_errors.clear();
        self.general_error = None;
        self.state = SessionState::Saving;
        SaveAttempt::Ready(request)
    }

    /// The store accepted the save: close the session
    pub fn complete_save(&mut self, product: &Product) -> Notification {
        let created = self.editing_state() == SessionState::Creating;
        tracing::info!("Saved product {} ({})", product.id, product.name);
        self.reset();
        if created {
            Notification::success("Produto criado com sucesso!")
        } else {
            Notification::success("Produto atualizado com sucesso!")
        }
    }

    /// The store refused the save: reopen the draft with a general error
    pub fn fail_save(&mut self, error: &StoreError) -> Notification {
        let message = match self.editing_state() {
            SessionState::Creating => format!("Erro ao criar produto: {}", error),
            _ => format!("Erro ao atualizar produto: {}", error),
        };
        tracing::warn!("{}", message);
        self.state = self.editing_state();
        self.general_error = Some(message.clone());
        Notification::error(message)
    }

    /// Run a full save against the store
    pub async fn save<S>(&mut self, store: &S) -> SaveOutcome
    where
        S: ProductStore + ?Sized,
    {
        let request = match self.begin_save() {
            SaveAttempt::Ignored => return SaveOutcome::Ignored,
            SaveAttempt::Blocked(errors) => return SaveOutcome::Blocked(errors),
            SaveAttempt::Unchanged(notification) => return SaveOutcome::Unchanged(notification),
            SaveAttempt::Ready(request) => request,
        };

        let result = match request {
            SaveRequest::Create(fields) => store.create(fields).await,
            SaveRequest::Update { id, patch } => store.update(id, patch).await,
        };

        match result {
            Ok(product) => {
                let notification = self.complete_save(&product);
                SaveOutcome::Saved { product, notification }
            }
            Err(error) => {
                let notification = self.fail_save(&error);
                SaveOutcome::Failed { error, notification }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::Category;
    use crate::catalog::store::InMemoryProductStore;
    use rust_decimal::Decimal;

    fn fill_valid(session: &mut EditSession) {
        session.edit(|f| {
            f.name = "Vitamina de Banana".to_string();
            f.description = "400ml".to_string();
            f.category = Category::Vitamina;
            f.price = Decimal::new(1100, 2);
        });
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = EditSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.draft().is_none());
        assert!(!session.is_open());
    }

    #[test]
    fn test_only_one_draft_at_a_time() {
        let mut session = EditSession::new();
        session.start_create().unwrap();

        let err = session.start_create().unwrap_err();
        assert_eq!(err, SessionError::DraftOpen(SessionState::Creating));
        assert_eq!(session.state(), SessionState::Creating);
    }

    #[test]
    fn test_edit_requires_open_draft() {
        let mut session = EditSession::new();
        assert!(!session.edit(|f| f.name = "x".to_string()));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut session = EditSession::new();
        session.start_create().unwrap();
        fill_valid(&mut session);

        assert!(session.cancel());
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.draft().is_none());
    }

    #[test]
    fn test_blocked_save_attaches_errors() {
        let mut session = EditSession::new();
        session.start_create().unwrap();

        let attempt = session.begin_save();
        let SaveAttempt::Blocked(errors) = attempt else {
            panic!("expected blocked save, got {:?}", attempt);
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(session.field_errors(), &errors);
        assert_eq!(session.state(), SessionState::Creating);

        session.clear_field_error(ProductField::Name);
        assert!(session.field_error(ProductField::Name).is_none());
        assert!(session.field_error(ProductField::Price).is_some());
    }

    #[test]
    fn test_begin_save_enters_saving_and_blocks_cancel() {
        let mut session = EditSession::new();
        session.start_create().unwrap();
        fill_valid(&mut session);

        assert!(matches!(session.begin_save(), SaveAttempt::Ready(SaveRequest::Create(_))));
        assert!(session.is_saving());
        assert!(!session.cancel());
        assert!(!session.edit(|f| f.name.clear()));
        assert_eq!(session.begin_save(), SaveAttempt::Ignored);
    }

    #[test]
    fn test_unchanged_edit_closes_without_request() {
        let mut session = EditSession::new();
        let product = Product::from_fields(
            uuid::Uuid::new_v4(),
            ProductFields {
                name: "Água".to_string(),
                description: "500ml".to_string(),
                price: Decimal::new(300, 2),
                ..Default::default()
            },
        );
        session.start_edit(&product).unwrap();

        assert!(matches!(session.begin_save(), SaveAttempt::Unchanged(_)));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_save_creates_and_returns_to_idle() {
        let store = InMemoryProductStore::new();
        let mut session = EditSession::new();
        session.start_create().unwrap();
        fill_valid(&mut session);

        let outcome = session.save(&store).await;
        let SaveOutcome::Saved { product, notification } = outcome else {
            panic!("expected saved outcome, got {:?}", outcome);
        };
        assert_eq!(product.name, "Vitamina de Banana");
        assert_eq!(notification, Notification::success("Produto criado com sucesso!"));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft() {
        // Editing a product the store does not know
        let store = InMemoryProductStore::new();
        let product = Product::from_fields(
            uuid::Uuid::new_v4(),
            ProductFields {
                name: "Água".to_string(),
                description: "500ml".to_string(),
                price: Decimal::new(300, 2),
                ..Default::default()
            },
        );
        let mut session = EditSession::new();
        session.start_edit(&product).unwrap();
        session.edit(|f| f.price = Decimal::new(350, 2));
        let draft_before = session.draft().cloned();

        let outcome = session.save(&store).await;
        assert!(matches!(outcome, SaveOutcome::Failed { error: StoreError::NotFound(_), .. }));
        assert_eq!(session.state(), SessionState::Editing);
        assert_eq!(session.draft().cloned(), draft_before);
        assert!(session.general_error().unwrap().contains("Erro ao atualizar produto"));
    }
}
