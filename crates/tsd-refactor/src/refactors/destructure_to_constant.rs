//! `destructure-to-constant`: declare `const { a, b } = value;` for a value.
//!
//! Where the declaration goes depends on what the identifier is:
//!
//! - a parameter name: first statement of the function body, converting an
//!   expression body into a block that returns the expression
//! - a variable or binding element name: after the enclosing variable
//!   statement
//! - a whole expression statement: the statement is replaced
//! - any other expression, initializers included: before the statement
//!   containing it
//!
//! Functions without a body (overloads, `declare`, abstract members) are
//! never offered.

use tracing::debug;
use tsd_common::{FormatCodeSettings, PositionOrRange};
use tsd_emitter::SynthNode;
use tsd_parser::{NodeArena, NodeIndex, SourceFile, SyntaxKind};

use super::{Refactor, RefactorActionInfo, RefactorKind, node_at};
use crate::context::RefactorContext;
use crate::destructurability::can_be_destructured;
use crate::synthesis::{
    append_statement_to_function_body, can_append_to_function_body,
    variable_statement_destructuring,
};
use crate::text_changes::{RefactorEditInfo, TextChanger};

pub struct DestructureToConstant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    FunctionBody(NodeIndex),
    AfterStatement(NodeIndex),
    ReplaceStatement(NodeIndex),
    BeforeStatement(NodeIndex),
}

/// Where the declaration goes and what it destructures.
struct Plan {
    placement: Placement,
    source: SynthNode,
}

impl DestructureToConstant {
    fn plan(file: &SourceFile, node: NodeIndex) -> Option<Plan> {
        let arena = file.arena();
        let parent = arena.parent(node);
        let parent_node = arena.get(parent)?;

        match parent_node.kind {
            SyntaxKind::Parameter
                if arena
                    .get_parameter(parent_node)
                    .is_some_and(|data| data.name == node) =>
            {
                let function = parameter_function(arena, parent)?;
                Some(Plan {
                    placement: Placement::FunctionBody(function),
                    source: SynthNode::ast(node),
                })
            }
            SyntaxKind::VariableDeclaration
                if arena
                    .get_variable_declaration(parent_node)
                    .is_some_and(|data| data.name == node) =>
            {
                declaration_placement(arena, parent).map(|placement| Plan {
                    placement,
                    source: SynthNode::ast(node),
                })
            }
            SyntaxKind::BindingElement
                if arena
                    .get_binding_element(parent_node)
                    .is_some_and(|data| data.name == node || data.property_name == node) =>
            {
                let data = arena.get_binding_element(parent_node)?;
                if data.dot_dot_dot_token || !arena.is_kind(data.name, SyntaxKind::Identifier) {
                    return None;
                }
                declaration_placement(arena, parent).map(|placement| Plan {
                    placement,
                    source: SynthNode::ast(data.name),
                })
            }
            SyntaxKind::PropertyAccessExpression => {
                let data = arena.get_access_expr(parent_node)?;
                let expression = if data.name_or_argument == node { parent } else { node };
                Some(Plan {
                    placement: expression_placement(arena, expression)?,
                    source: SynthNode::ast(expression),
                })
            }
            _ => Some(Plan {
                placement: expression_placement(arena, node)?,
                source: SynthNode::ast(node),
            }),
        }
    }
}

/// Function owning a parameter, when it has a body to insert into.
fn parameter_function(arena: &NodeArena, parameter: NodeIndex) -> Option<NodeIndex> {
    let function = arena.parent(parameter);
    (arena.kind(function).is_some_and(SyntaxKind::is_function_like)
        && can_append_to_function_body(arena, function))
    .then_some(function)
}

/// Placement for a name declared by a variable declaration or binding
/// element: after its variable statement, or in the body of the function
/// whose parameter pattern declares it.
fn declaration_placement(arena: &NodeArena, declaration: NodeIndex) -> Option<Placement> {
    let mut current = arena.parent(declaration);
    while let Some(node) = arena.get(current) {
        match node.kind {
            SyntaxKind::BindingElement
            | SyntaxKind::ObjectBindingPattern
            | SyntaxKind::ArrayBindingPattern
            | SyntaxKind::VariableDeclaration
            | SyntaxKind::VariableDeclarationList => current = node.parent,
            SyntaxKind::VariableStatement => return Some(Placement::AfterStatement(current)),
            SyntaxKind::Parameter => {
                return parameter_function(arena, current).map(Placement::FunctionBody);
            }
            _ => return None,
        }
    }
    None
}

/// Placement for a value used in an expression.
fn expression_placement(arena: &NodeArena, expression: NodeIndex) -> Option<Placement> {
    let parent = arena.parent(expression);
    let parent_node = arena.get(parent)?;
    if parent_node.kind == SyntaxKind::ExpressionStatement
        && is_list_statement(arena, parent)
        && arena
            .get_expr_statement(parent_node)
            .is_some_and(|data| data.expression == expression)
    {
        return Some(Placement::ReplaceStatement(parent));
    }

    let mut current = parent;
    while let Some(node) = arena.get(current) {
        if node.kind.is_function_like()
            || matches!(
                node.kind,
                SyntaxKind::PropertyDeclaration | SyntaxKind::ClassDeclaration
            )
        {
            return None;
        }
        if node.kind.is_statement() && is_list_statement(arena, current) {
            return Some(Placement::BeforeStatement(current));
        }
        current = node.parent;
    }
    None
}

/// A statement sitting directly in a block or at the top level.
fn is_list_statement(arena: &NodeArena, statement: NodeIndex) -> bool {
    matches!(
        arena.kind(arena.parent(statement)),
        Some(SyntaxKind::Block | SyntaxKind::SourceFile)
    )
}

impl Refactor for DestructureToConstant {
    fn kind(&self) -> RefactorKind {
        RefactorKind::DestructureToConstant
    }

    fn description(&self) -> &'static str {
        "Destructure object into a separate constant"
    }

    fn actions(&self) -> Vec<RefactorActionInfo> {
        vec![RefactorActionInfo::new(self.kind().as_str(), "Destructure object")]
    }

    fn can_be_applied(
        &self,
        ctx: &RefactorContext<'_>,
        node: NodeIndex,
        file: &SourceFile,
        _position_or_range: PositionOrRange,
    ) -> bool {
        can_be_destructured(ctx, file, node) && Self::plan(file, node).is_some()
    }

    fn apply(
        &self,
        ctx: &RefactorContext<'_>,
        file: &SourceFile,
        format_options: &FormatCodeSettings,
        position_or_range: PositionOrRange,
    ) -> Option<RefactorEditInfo> {
        let node = node_at(file, position_or_range)?;
        if !can_be_destructured(ctx, file, node) {
            return None;
        }
        let plan = Self::plan(file, node)?;
        let descriptor = ctx.type_of(file, node)?;
        debug!(
            value = file.node_text(node),
            placement = ?plan.placement,
            "destructuring into a constant"
        );

        let statement = variable_statement_destructuring(&descriptor, plan.source);
        let changer = TextChanger::new(file, format_options);
        match plan.placement {
            Placement::FunctionBody(function) => {
                let update = append_statement_to_function_body(file.arena(), function, statement)?;
                changer.update_function_body(&update)
            }
            Placement::AfterStatement(anchor) => changer.insert_node_after(anchor, &statement),
            Placement::ReplaceStatement(target) => changer.replace_statement(target, &statement),
            Placement::BeforeStatement(anchor) => changer.insert_node_before(anchor, &statement),
        }
    }
}
