//! Host-facing entry points.
//!
//! `RefactorService` owns the catalog for a session. Each request borrows
//! the host's source model, resolves the node under the selection and asks
//! every refactor in turn.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use tsd_common::{FormatCodeSettings, PositionOrRange};

use crate::context::RefactorContext;
use crate::project::SourceModelProvider;
use crate::refactors::{RefactorActionInfo, RefactorCatalog, node_at};
use crate::text_changes::RefactorEditInfo;

/// A refactor applicable at the requested location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicableRefactorInfo {
    pub name: String,
    pub description: String,
    pub actions: Vec<RefactorActionInfo>,
}

#[derive(Default)]
pub struct RefactorService {
    catalog: RefactorCatalog,
}

impl RefactorService {
    pub fn new() -> Self {
        RefactorService {
            catalog: RefactorCatalog::new(),
        }
    }

    pub fn catalog(&self) -> &RefactorCatalog {
        &self.catalog
    }

    /// Every refactor applicable at `position_or_range`, in registration
    /// order. Empty when the file is unknown or nothing is under the
    /// selection.
    #[instrument(level = "debug", skip(self, host), fields(start = position_or_range.start()))]
    pub fn get_applicable_refactors(
        &self,
        host: &dyn SourceModelProvider,
        file_name: &str,
        position_or_range: PositionOrRange,
    ) -> Vec<ApplicableRefactorInfo> {
        let ctx = RefactorContext::new(host);
        let Some(file) = ctx.source_file(file_name) else {
            debug!("unknown file");
            return Vec::new();
        };
        let Some(node) = node_at(file, position_or_range) else {
            debug!("no node at selection");
            return Vec::new();
        };

        let applicable: Vec<ApplicableRefactorInfo> = self
            .catalog
            .iter()
            .filter(|refactor| refactor.can_be_applied(&ctx, node, file, position_or_range))
            .map(|refactor| ApplicableRefactorInfo {
                name: refactor.kind().as_str().to_string(),
                description: refactor.description().to_string(),
                actions: refactor.actions(),
            })
            .collect();
        debug!(
            node_kind = ?file.arena().kind(node),
            count = applicable.len(),
            "applicable refactors"
        );
        applicable
    }

    /// Edits for `refactor_name`/`action_name`; `None` when either name is
    /// unknown or the refactor no longer applies.
    #[instrument(level = "debug", skip(self, host, format_options), fields(start = position_or_range.start()))]
    pub fn get_edits_for_refactor(
        &self,
        host: &dyn SourceModelProvider,
        file_name: &str,
        format_options: &FormatCodeSettings,
        position_or_range: PositionOrRange,
        refactor_name: &str,
        action_name: &str,
    ) -> Option<RefactorEditInfo> {
        let Some(refactor) = self.catalog.find(refactor_name) else {
            debug!("unknown refactor");
            return None;
        };
        if !refactor
            .actions()
            .iter()
            .any(|action| action.name == action_name)
        {
            debug!("unknown action");
            return None;
        }

        let ctx = RefactorContext::new(host);
        let file = ctx.source_file(file_name)?;
        let format_options = ctx.format_settings(format_options);
        let edits = refactor.apply(&ctx, file, &format_options, position_or_range);
        debug!(applied = edits.is_some(), "refactor edits");
        edits
    }
}
