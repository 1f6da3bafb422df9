//! Whether an identifier can be replaced by an object binding pattern.

use tracing::trace;
use tsd_checker::checker::declaration_name;
use tsd_parser::{NodeArena, NodeIndex, SourceFile, SyntaxKind};

use crate::context::RefactorContext;

/// True when `node` is an identifier in a value position whose type is
/// object-like. Missing nodes and untyped nodes are not destructurable.
pub fn can_be_destructured(ctx: &RefactorContext<'_>, file: &SourceFile, node: NodeIndex) -> bool {
    let arena = file.arena();
    if !arena.is_kind(node, SyntaxKind::Identifier) {
        return false;
    }
    if is_forbidden_context(arena, node) {
        trace!(node = node.0, "identifier in a non-value context");
        return false;
    }
    ctx.type_of(file, node)
        .is_some_and(|descriptor| descriptor.is_object_like())
}

/// Property keys, declaration names that denote no value, and anything
/// inside a type.
fn is_forbidden_context(arena: &NodeArena, node: NodeIndex) -> bool {
    let parent = arena.parent(node);
    let Some(parent_kind) = arena.kind(parent) else {
        return false;
    };

    if parent_kind == SyntaxKind::PropertyAssignment
        && arena
            .get(parent)
            .and_then(|parent_node| arena.get_property_assignment(parent_node))
            .is_some_and(|data| data.name == node)
    {
        return true;
    }

    if matches!(
        parent_kind,
        SyntaxKind::PropertyDeclaration
            | SyntaxKind::InterfaceDeclaration
            | SyntaxKind::TypeAliasDeclaration
            | SyntaxKind::FunctionDeclaration
            | SyntaxKind::ClassDeclaration
            | SyntaxKind::TypeParameter
            | SyntaxKind::PropertySignature
            | SyntaxKind::MethodSignature
            | SyntaxKind::MethodDeclaration
            | SyntaxKind::GetAccessor
            | SyntaxKind::SetAccessor
    ) && declaration_name(arena, parent) == node
    {
        return true;
    }

    is_in_type_context(arena, node)
}

fn is_in_type_context(arena: &NodeArena, node: NodeIndex) -> bool {
    let mut current = arena.parent(node);
    while let Some(ancestor) = arena.get(current) {
        if ancestor.kind.is_type_node() {
            return true;
        }
        if ancestor.kind == SyntaxKind::HeritageClause {
            let is_class_extends = arena
                .get_heritage_clause(ancestor)
                .is_some_and(|data| data.token == SyntaxKind::ExtendsKeyword)
                && arena.is_kind(ancestor.parent, SyntaxKind::ClassDeclaration);
            return !is_class_extends;
        }
        if ancestor.kind.is_statement() || ancestor.kind.is_function_like() {
            return false;
        }
        current = ancestor.parent;
    }
    false
}
