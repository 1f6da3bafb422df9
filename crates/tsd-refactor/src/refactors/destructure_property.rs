//! `destructure-property`: `{ key }` becomes `{ key: { a, b } }`.

use tracing::debug;
use tsd_common::{FormatCodeSettings, PositionOrRange};
use tsd_emitter::SynthNode;
use tsd_parser::{NodeIndex, SourceFile, SyntaxKind};

use super::{Refactor, RefactorActionInfo, RefactorKind, node_at};
use crate::context::RefactorContext;
use crate::destructurability::can_be_destructured;
use crate::synthesis::object_binding_pattern_for_type;
use crate::text_changes::{RefactorEditInfo, TextChanger};

pub struct DestructureProperty;

/// A non-rest element of an object binding pattern, found from its name or
/// its key.
struct TargetElement {
    element: NodeIndex,
    property_name: NodeIndex,
    name: NodeIndex,
    initializer: NodeIndex,
}

impl DestructureProperty {
    fn target_element(file: &SourceFile, node: NodeIndex) -> Option<TargetElement> {
        let arena = file.arena();
        if !arena.is_kind(node, SyntaxKind::Identifier) {
            return None;
        }
        let element = arena.parent(node);
        let data = arena.get_binding_element(arena.get(element)?)?;
        if data.dot_dot_dot_token
            || !arena.is_kind(arena.parent(element), SyntaxKind::ObjectBindingPattern)
            || !arena.is_kind(data.name, SyntaxKind::Identifier)
        {
            return None;
        }
        if data.name != node && data.property_name != node {
            return None;
        }
        Some(TargetElement {
            element,
            property_name: data.property_name,
            name: data.name,
            initializer: data.initializer,
        })
    }
}

impl Refactor for DestructureProperty {
    fn kind(&self) -> RefactorKind {
        RefactorKind::DestructureProperty
    }

    fn description(&self) -> &'static str {
        "Nested destructuring"
    }

    fn actions(&self) -> Vec<RefactorActionInfo> {
        vec![RefactorActionInfo::new(
            self.kind().as_str(),
            "Destructure object property",
        )]
    }

    fn can_be_applied(
        &self,
        ctx: &RefactorContext<'_>,
        node: NodeIndex,
        file: &SourceFile,
        _position_or_range: PositionOrRange,
    ) -> bool {
        Self::target_element(file, node)
            .is_some_and(|target| can_be_destructured(ctx, file, target.name))
    }

    fn apply(
        &self,
        ctx: &RefactorContext<'_>,
        file: &SourceFile,
        format_options: &FormatCodeSettings,
        position_or_range: PositionOrRange,
    ) -> Option<RefactorEditInfo> {
        let node = node_at(file, position_or_range)?;
        let target = Self::target_element(file, node)?;
        if !can_be_destructured(ctx, file, target.name) {
            return None;
        }
        let descriptor = ctx.type_of(file, target.name)?;
        let key = if target.property_name.is_some() {
            target.property_name
        } else {
            target.name
        };
        debug!(key = file.node_text(key), "nesting destructuring into property");

        let element = SynthNode::renamed_binding(
            SynthNode::ast(key),
            object_binding_pattern_for_type(&descriptor),
            target.initializer.into_option().map(SynthNode::ast),
        );
        TextChanger::new(file, format_options).replace_node(target.element, &element)
    }
}
