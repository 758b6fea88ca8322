//! The inbox controller: view, selection, and bulk-action state.
//!
//! State transitions follow a few hard rules:
//! - a failed load or mutation never clobbers previously loaded data;
//! - the trash view is unreachable while the server reports the
//!   soft-delete migration as pending;
//! - a bulk action needs a non-empty selection and an explicit
//!   confirmation, and a success is followed by a full reload of the
//!   current view rather than an optimistic local patch.

use atelier_core::submission::{BulkAction, View};
use atelier_core::types::DbId;

use crate::gateway::{GatewayOutcome, MessageRow, MessagesGateway, Stats};

/// Remediation statement surfaced verbatim in the migration banner.
pub const REMEDIATION_SQL: &str = "ALTER TABLE contact_submissions \
     ADD COLUMN deleted_at timestamp with time zone DEFAULT NULL;";

/// A one-shot notification for the surrounding UI to render and discard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Blocking yes/no prompt shown before any bulk action is sent.
pub trait ConfirmPrompt {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Prompt that accepts everything; for non-interactive use.
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Controller for the admin inbox.
pub struct MessageManager<G: MessagesGateway> {
    gateway: G,
    messages: Vec<MessageRow>,
    selected: Vec<DbId>,
    current_view: View,
    stats: Stats,
    loading: bool,
    action_loading: bool,
    migration_required: bool,
    notices: Vec<Notice>,
}

impl<G: MessagesGateway> MessageManager<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            messages: Vec::new(),
            selected: Vec::new(),
            current_view: View::Active,
            stats: Stats::default(),
            loading: false,
            action_loading: false,
            migration_required: false,
            notices: Vec::new(),
        }
    }

    // ── Read accessors ────────────────────────────────────────────────

    pub fn messages(&self) -> &[MessageRow] {
        &self.messages
    }

    pub fn selected(&self) -> &[DbId] {
        &self.selected
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.loading || self.action_loading
    }

    pub fn migration_required(&self) -> bool {
        self.migration_required
    }

    /// Whether the trash tab is selectable.
    pub fn trash_view_enabled(&self) -> bool {
        !self.migration_required
    }

    /// Sticky banner shown while the backing schema lacks soft-delete,
    /// including the literal remediation SQL.
    pub fn migration_banner(&self) -> Option<String> {
        if self.migration_required {
            Some(format!(
                "The messages table does not support the trash yet. \
                 Run this migration, then reload:\n{REMEDIATION_SQL}"
            ))
        } else {
            None
        }
    }

    /// Drain accumulated one-shot notices.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ── Loading ───────────────────────────────────────────────────────

    /// Fetch the given view and, on success, make it current.
    ///
    /// Any failure leaves the previously loaded list and stats untouched.
    pub async fn load(&mut self, view: View) {
        if self.loading {
            return;
        }
        self.loading = true;

        match self.gateway.list(view).await {
            GatewayOutcome::Ok(listing) => {
                self.messages = listing.data;
                self.stats = listing.stats;
                self.migration_required = listing.migration_required;
                self.current_view = view;
            }
            GatewayOutcome::SchemaMigrationRequired => {
                self.migration_required = true;
            }
            GatewayOutcome::Failed(message) => {
                self.push_error(message);
            }
        }

        self.loading = false;
    }

    /// Switch views. Switching to trash is refused while the migration is
    /// pending; a successful switch clears the selection.
    pub async fn toggle_view(&mut self, view: View) {
        if view == View::Trash && !self.trash_view_enabled() {
            return;
        }

        self.load(view).await;
        if self.current_view == view {
            self.selected.clear();
        }
    }

    // ── Selection (pure local) ────────────────────────────────────────

    /// Toggle a single row in and out of the selection. Ids not present in
    /// the loaded list are ignored.
    pub fn toggle_select(&mut self, id: DbId) {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        } else if self.messages.iter().any(|m| m.id == id) {
            self.selected.push(id);
        }
    }

    /// Toggle between all rows selected and none; no partial state is
    /// retained.
    pub fn toggle_select_all(&mut self) {
        if !self.messages.is_empty() && self.selected.len() == self.messages.len() {
            self.selected.clear();
        } else {
            self.selected = self.messages.iter().map(|m| m.id).collect();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // ── Bulk actions ──────────────────────────────────────────────────

    /// Apply a bulk action to the current selection.
    ///
    /// Preconditions enforced here, before any network call: a non-empty
    /// selection and an explicit confirmation. On success the selection is
    /// cleared and the current view reloaded for authoritative counts.
    pub async fn bulk_action(&mut self, action: BulkAction, confirm: &dyn ConfirmPrompt) {
        if self.action_loading {
            return;
        }
        if self.selected.is_empty() {
            self.push_error("Select at least one message first".to_string());
            return;
        }
        if !confirm.confirm(&confirmation_text(action, self.selected.len())) {
            return;
        }

        self.action_loading = true;
        let ids: Vec<String> = self.selected.iter().map(DbId::to_string).collect();

        match self.gateway.mutate(action, &ids).await {
            GatewayOutcome::Ok(mutation) => {
                self.notices.push(Notice {
                    severity: Severity::Info,
                    text: mutation
                        .message
                        .unwrap_or_else(|| "Done".to_string()),
                });
                self.selected.clear();
                self.action_loading = false;
                // Reload instead of patching local state, so partial server
                // success cannot drift the counts.
                let view = self.current_view;
                self.load(view).await;
                return;
            }
            GatewayOutcome::SchemaMigrationRequired => {
                self.migration_required = true;
            }
            GatewayOutcome::Failed(message) => {
                self.push_error(message);
            }
        }

        self.action_loading = false;
    }

    fn push_error(&mut self, text: String) {
        tracing::warn!(error = %text, "Admin inbox request failed");
        self.notices.push(Notice {
            severity: Severity::Error,
            text,
        });
    }
}

/// Action-specific confirmation wording. Permanent deletion must say
/// explicitly that it cannot be undone.
fn confirmation_text(action: BulkAction, count: usize) -> String {
    match action {
        BulkAction::MoveToTrash => {
            format!("Move {count} message(s) to the trash?")
        }
        BulkAction::Restore => format!("Restore {count} message(s) from the trash?"),
        BulkAction::PermanentDelete => format!(
            "Permanently delete {count} message(s)? This cannot be undone."
        ),
    }
}
