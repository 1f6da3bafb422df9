//! `destructure-in-place`: `(param: T) => ..` becomes `({ a, b }: T) => ..`.

use tracing::debug;
use tsd_common::{FormatCodeSettings, PositionOrRange};
use tsd_parser::{NodeIndex, SourceFile, SyntaxKind};

use super::{Refactor, RefactorActionInfo, RefactorKind, node_at};
use crate::context::RefactorContext;
use crate::destructurability::can_be_destructured;
use crate::synthesis::object_binding_pattern_for_type;
use crate::text_changes::{RefactorEditInfo, TextChanger};

pub struct DestructureInPlace;

impl DestructureInPlace {
    /// The identifier names a plain parameter: not a rest parameter and not a
    /// constructor parameter property.
    fn is_simple_parameter_name(file: &SourceFile, node: NodeIndex) -> bool {
        let arena = file.arena();
        let parameter = arena.parent(node);
        if !arena.is_kind(parameter, SyntaxKind::Parameter) {
            return false;
        }
        arena
            .get(parameter)
            .and_then(|parameter_node| arena.get_parameter(parameter_node))
            .is_some_and(|data| {
                data.name == node && !data.dot_dot_dot_token && data.modifiers.is_none()
            })
    }
}

impl Refactor for DestructureInPlace {
    fn kind(&self) -> RefactorKind {
        RefactorKind::DestructureInPlace
    }

    fn description(&self) -> &'static str {
        "Destructure object in place"
    }

    fn actions(&self) -> Vec<RefactorActionInfo> {
        vec![RefactorActionInfo::new(
            self.kind().as_str(),
            "Destructure object (inplace)",
        )]
    }

    fn can_be_applied(
        &self,
        ctx: &RefactorContext<'_>,
        node: NodeIndex,
        file: &SourceFile,
        _position_or_range: PositionOrRange,
    ) -> bool {
        Self::is_simple_parameter_name(file, node) && can_be_destructured(ctx, file, node)
    }

    fn apply(
        &self,
        ctx: &RefactorContext<'_>,
        file: &SourceFile,
        format_options: &FormatCodeSettings,
        position_or_range: PositionOrRange,
    ) -> Option<RefactorEditInfo> {
        let node = node_at(file, position_or_range)?;
        if !self.can_be_applied(ctx, node, file, position_or_range) {
            return None;
        }
        let descriptor = ctx.type_of(file, node)?;
        debug!(
            parameter = file.node_text(node),
            properties = descriptor.property_names.len(),
            "destructuring parameter in place"
        );
        let pattern = object_binding_pattern_for_type(&descriptor);
        TextChanger::new(file, format_options).replace_node(node, &pattern)
    }
}
