//! The refactor catalog.
//!
//! Each refactor decides applicability from the node under the caret (or
//! the selected range) and, when applied, re-resolves and re-validates
//! before computing its edit. The catalog is built once and never changes.

use serde::{Deserialize, Serialize};
use tsd_common::{FormatCodeSettings, PositionOrRange};
use tsd_parser::{NodeIndex, SourceFile};

use crate::context::RefactorContext;
use crate::text_changes::RefactorEditInfo;
use crate::utils::find_child_containing_position;

mod destructure_in_place;
mod destructure_property;
mod destructure_spread;
mod destructure_to_constant;
mod roll_into_spread;

pub use destructure_in_place::DestructureInPlace;
pub use destructure_property::DestructureProperty;
pub use destructure_spread::DestructureSpread;
pub use destructure_to_constant::DestructureToConstant;
pub use roll_into_spread::RollIntoSpread;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefactorKind {
    DestructureInPlace,
    DestructureProperty,
    DestructureSpread,
    DestructureToConstant,
    RollIntoSpread,
}

impl RefactorKind {
    pub const ALL: [RefactorKind; 5] = [
        RefactorKind::DestructureInPlace,
        RefactorKind::DestructureProperty,
        RefactorKind::DestructureSpread,
        RefactorKind::DestructureToConstant,
        RefactorKind::RollIntoSpread,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RefactorKind::DestructureInPlace => "destructure-in-place",
            RefactorKind::DestructureProperty => "destructure-property",
            RefactorKind::DestructureSpread => "destructure-spread",
            RefactorKind::DestructureToConstant => "destructure-to-constant",
            RefactorKind::RollIntoSpread => "roll-into-spread",
        }
    }

    pub fn from_name(name: &str) -> Option<RefactorKind> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl std::fmt::Display for RefactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named action offered by a refactor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactorActionInfo {
    pub name: String,
    pub description: String,
}

impl RefactorActionInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

pub trait Refactor {
    fn kind(&self) -> RefactorKind;

    fn description(&self) -> &'static str;

    fn actions(&self) -> Vec<RefactorActionInfo>;

    /// Whether the refactor applies at `node`, the node under the start of
    /// `position_or_range`. Read-only.
    fn can_be_applied(
        &self,
        ctx: &RefactorContext<'_>,
        node: NodeIndex,
        file: &SourceFile,
        position_or_range: PositionOrRange,
    ) -> bool;

    /// The edit performing the refactor; `None` when it no longer applies.
    fn apply(
        &self,
        ctx: &RefactorContext<'_>,
        file: &SourceFile,
        format_options: &FormatCodeSettings,
        position_or_range: PositionOrRange,
    ) -> Option<RefactorEditInfo>;
}

/// Node under the start of the selection.
pub(crate) fn node_at(file: &SourceFile, position_or_range: PositionOrRange) -> Option<NodeIndex> {
    find_child_containing_position(file.arena(), file.root(), position_or_range.start())
}

/// Every registered refactor, in registration order.
pub struct RefactorCatalog {
    refactors: Vec<Box<dyn Refactor>>,
}

impl RefactorCatalog {
    pub fn new() -> Self {
        RefactorCatalog {
            refactors: vec![
                Box::new(DestructureInPlace),
                Box::new(DestructureProperty),
                Box::new(DestructureSpread),
                Box::new(DestructureToConstant),
                Box::new(RollIntoSpread),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Refactor> {
        self.refactors.iter().map(Box::as_ref)
    }

    pub fn get(&self, kind: RefactorKind) -> Option<&dyn Refactor> {
        self.iter().find(|refactor| refactor.kind() == kind)
    }

    pub fn find(&self, name: &str) -> Option<&dyn Refactor> {
        self.get(RefactorKind::from_name(name)?)
    }

    pub fn len(&self) -> usize {
        self.refactors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refactors.is_empty()
    }
}

impl Default for RefactorCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn registration_order_is_fixed() {
        let catalog = RefactorCatalog::new();
        let kinds: Vec<RefactorKind> = catalog.iter().map(|refactor| refactor.kind()).collect();
        assert_eq!(kinds, RefactorKind::ALL);
    }

    #[test]
    fn kinds_round_trip_through_names() {
        for kind in RefactorKind::ALL {
            assert_eq!(RefactorKind::from_name(kind.as_str()), Some(kind));
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.as_str())
            );
        }
        assert_eq!(RefactorKind::from_name("extract-function"), None);
    }

    #[test]
    fn every_refactor_offers_one_action_named_after_it() {
        let catalog = RefactorCatalog::new();
        for refactor in catalog.iter() {
            let actions = refactor.actions();
            assert_eq!(actions.len(), 1);
            assert_eq!(actions[0].name, refactor.kind().as_str());
            assert!(!refactor.description().is_empty());
        }
    }
}
