//! `roll-into-spread`: selected elements of `{ a, b, c }` collapse into
//! `{ a, ...rest }`.

use tracing::debug;
use tsd_common::{FormatCodeSettings, PositionOrRange};
use tsd_emitter::SynthNode;
use tsd_parser::{NodeIndex, SourceFile, SyntaxKind};

use super::{Refactor, RefactorActionInfo, RefactorKind};
use crate::context::RefactorContext;
use crate::synthesis::update_object_binding_pattern;
use crate::text_changes::{RefactorEditInfo, TextChanger};
use crate::utils::find_all_nodes_in_range;

/// Name given to a new rest element.
const REST_NAME: &str = "rest";

pub struct RollIntoSpread;

struct Selection {
    pattern: NodeIndex,
    elements: Vec<NodeIndex>,
}

impl RollIntoSpread {
    /// Selected binding elements, all from the same object binding pattern.
    fn selection(file: &SourceFile, position_or_range: PositionOrRange) -> Option<Selection> {
        let range = position_or_range.range().filter(|range| !range.is_empty())?;
        let arena = file.arena();
        let elements = find_all_nodes_in_range(arena, file.root(), range);
        let pattern = arena.parent(*elements.first()?);
        if !arena.is_kind(pattern, SyntaxKind::ObjectBindingPattern) {
            return None;
        }
        let same_pattern = elements.iter().all(|&element| {
            arena.is_kind(element, SyntaxKind::BindingElement) && arena.parent(element) == pattern
        });
        same_pattern.then_some(Selection { pattern, elements })
    }
}

impl Refactor for RollIntoSpread {
    fn kind(&self) -> RefactorKind {
        RefactorKind::RollIntoSpread
    }

    fn description(&self) -> &'static str {
        "Collapse properties into a rest element"
    }

    fn actions(&self) -> Vec<RefactorActionInfo> {
        vec![RefactorActionInfo::new(self.kind().as_str(), "Roll into spread")]
    }

    fn can_be_applied(
        &self,
        _ctx: &RefactorContext<'_>,
        _node: NodeIndex,
        file: &SourceFile,
        position_or_range: PositionOrRange,
    ) -> bool {
        Self::selection(file, position_or_range).is_some()
    }

    fn apply(
        &self,
        _ctx: &RefactorContext<'_>,
        file: &SourceFile,
        format_options: &FormatCodeSettings,
        position_or_range: PositionOrRange,
    ) -> Option<RefactorEditInfo> {
        let selection = Self::selection(file, position_or_range)?;
        let arena = file.arena();
        let pattern_data = arena.get_binding_pattern(arena.get(selection.pattern)?)?;

        let is_rest = |element: NodeIndex| {
            arena
                .get(element)
                .and_then(|node| arena.get_binding_element(node))
                .is_some_and(|data| data.dot_dot_dot_token)
        };
        let existing_rest = pattern_data.elements.iter().find(|&element| is_rest(element));
        let mut elements: Vec<SynthNode> = pattern_data
            .elements
            .iter()
            .filter(|&element| !selection.elements.contains(&element) && !is_rest(element))
            .map(SynthNode::ast)
            .collect();
        elements.push(match existing_rest {
            Some(rest) => SynthNode::ast(rest),
            None => SynthNode::rest_binding(REST_NAME),
        });
        debug!(
            selected = selection.elements.len(),
            kept = elements.len() - 1,
            "rolling elements into rest"
        );

        let pattern = update_object_binding_pattern(arena, selection.pattern, elements, true)?;
        TextChanger::new(file, format_options).replace_node(selection.pattern, &pattern)
    }
}
