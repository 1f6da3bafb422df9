//! `destructure-spread`: `{ a, ...rest }` becomes `{ a, b, c }`.

use tracing::debug;
use tsd_common::{FormatCodeSettings, PositionOrRange};
use tsd_emitter::SynthNode;
use tsd_parser::{NodeIndex, SourceFile, SyntaxKind};

use super::{Refactor, RefactorActionInfo, RefactorKind, node_at};
use crate::context::RefactorContext;
use crate::destructurability::can_be_destructured;
use crate::synthesis::update_object_binding_pattern;
use crate::text_changes::{RefactorEditInfo, TextChanger};

pub struct DestructureSpread;

/// The rest element of an object binding pattern.
struct RestElement {
    pattern: NodeIndex,
    element: NodeIndex,
    name: NodeIndex,
}

impl DestructureSpread {
    /// Accepts the rest identifier or the rest element itself, which is what
    /// a position on `...` resolves to.
    fn rest_element(file: &SourceFile, node: NodeIndex) -> Option<RestElement> {
        let arena = file.arena();
        let element = match arena.kind(node)? {
            SyntaxKind::BindingElement => node,
            SyntaxKind::Identifier => arena.parent(node),
            _ => return None,
        };
        let data = arena.get_binding_element(arena.get(element)?)?;
        let pattern = arena.parent(element);
        if !data.dot_dot_dot_token
            || !arena.is_kind(pattern, SyntaxKind::ObjectBindingPattern)
            || (node != element && node != data.name)
        {
            return None;
        }
        Some(RestElement {
            pattern,
            element,
            name: data.name,
        })
    }
}

impl Refactor for DestructureSpread {
    fn kind(&self) -> RefactorKind {
        RefactorKind::DestructureSpread
    }

    fn description(&self) -> &'static str {
        "Unfold rest element"
    }

    fn actions(&self) -> Vec<RefactorActionInfo> {
        vec![RefactorActionInfo::new(self.kind().as_str(), "Destructure spread")]
    }

    fn can_be_applied(
        &self,
        ctx: &RefactorContext<'_>,
        node: NodeIndex,
        file: &SourceFile,
        _position_or_range: PositionOrRange,
    ) -> bool {
        Self::rest_element(file, node).is_some_and(|rest| can_be_destructured(ctx, file, rest.name))
    }

    fn apply(
        &self,
        ctx: &RefactorContext<'_>,
        file: &SourceFile,
        format_options: &FormatCodeSettings,
        position_or_range: PositionOrRange,
    ) -> Option<RefactorEditInfo> {
        let node = node_at(file, position_or_range)?;
        let rest = Self::rest_element(file, node)?;
        if !can_be_destructured(ctx, file, rest.name) {
            return None;
        }
        let descriptor = ctx.type_of(file, rest.name)?;
        let arena = file.arena();
        let pattern_data = arena.get_binding_pattern(arena.get(rest.pattern)?)?;
        debug!(
            rest = file.node_text(rest.name),
            properties = descriptor.property_names.len(),
            "unfolding rest element"
        );

        let elements = pattern_data
            .elements
            .iter()
            .filter(|&element| element != rest.element)
            .map(SynthNode::ast)
            .chain(
                descriptor
                    .property_names
                    .iter()
                    .map(|name| SynthNode::binding(name.as_str())),
            )
            .collect();
        let pattern = update_object_binding_pattern(arena, rest.pattern, elements, false)?;
        TextChanger::new(file, format_options).replace_node(rest.pattern, &pattern)
    }
}
