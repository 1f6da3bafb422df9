//! Fresh trees built from type information.
//!
//! Nothing here touches the source tree. Existing nodes that must survive a
//! rewrite are referenced with `SynthNode::Ast` and printed from their text.

use tsd_emitter::{DeclarationKind, SynthNode};
use tsd_parser::{NodeArena, NodeIndex, SyntaxKind};

use crate::type_oracle::TypeDescriptor;

/// `{ a, b, c }` with one element per property, in declaration order.
pub fn object_binding_pattern_for_type(descriptor: &TypeDescriptor) -> SynthNode {
    SynthNode::object_pattern(
        descriptor
            .property_names
            .iter()
            .map(|name| SynthNode::binding(name.as_str()))
            .collect(),
    )
}

/// `const { a, b, c } = source;`
pub fn variable_statement_destructuring(descriptor: &TypeDescriptor, source: SynthNode) -> SynthNode {
    SynthNode::variable_statement(
        DeclarationKind::Const,
        object_binding_pattern_for_type(descriptor),
        source,
    )
}

/// How a statement gets prepended to a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionBodyUpdate {
    /// Replace the body block with a new block
    ReplaceBody { body: NodeIndex, block: SynthNode },
    /// Insert the statement right after the body's `{`
    InsertAtBodyStart { body: NodeIndex, statement: SynthNode },
    /// Replace an expression-bodied arrow function with a block-bodied one
    ReplaceFunction { function: NodeIndex, function_node: SynthNode },
}

/// True when `function` has a block body, or is an arrow function with an
/// expression body.
pub fn can_append_to_function_body(arena: &NodeArena, function: NodeIndex) -> bool {
    let Some(function_node) = arena.get(function) else {
        return false;
    };
    arena.get_function(function_node).is_some_and(|data| {
        arena.is_kind(data.body, SyntaxKind::Block)
            || (function_node.kind == SyntaxKind::ArrowFunction && arena.get(data.body).is_some())
    })
}

/// Put `statement` first in the body of `function`.
///
/// Block bodies keep their statements after the new one; an expression body
/// becomes a block returning the expression. `None` when the function has
/// no body.
pub fn append_statement_to_function_body(
    arena: &NodeArena,
    function: NodeIndex,
    statement: SynthNode,
) -> Option<FunctionBodyUpdate> {
    let function_node = arena.get(function)?;
    let data = arena.get_function(function_node)?;
    let body = arena.get(data.body)?;

    if let Some(block) = arena.get_block(body) {
        if block.multi_line && !block.statements.is_empty() {
            return Some(FunctionBodyUpdate::InsertAtBodyStart {
                body: data.body,
                statement,
            });
        }
        let statements = std::iter::once(statement)
            .chain(block.statements.iter().map(SynthNode::ast))
            .collect();
        return Some(FunctionBodyUpdate::ReplaceBody {
            body: data.body,
            block: SynthNode::block(statements),
        });
    }

    if function_node.kind != SyntaxKind::ArrowFunction {
        return None;
    }
    let function_node = SynthNode::ArrowFunction {
        is_async: data.is_async,
        type_parameters: data
            .type_parameters
            .as_ref()
            .map(|list| list.iter().map(SynthNode::ast).collect()),
        parameters: data.parameters.iter().map(SynthNode::ast).collect(),
        return_type: data
            .type_annotation
            .into_option()
            .map(|return_type| Box::new(SynthNode::ast(return_type))),
        body: Box::new(SynthNode::block(vec![
            statement,
            SynthNode::ret(Some(SynthNode::ast(data.body))),
        ])),
    };
    Some(FunctionBodyUpdate::ReplaceFunction {
        function,
        function_node,
    })
}

/// A fresh pattern standing in for `pattern`, with the given elements.
///
/// With `keep_layout` the pattern remembers the source range it replaces,
/// so a single-line pattern prints on one line again.
pub fn update_object_binding_pattern(
    arena: &NodeArena,
    pattern: NodeIndex,
    elements: Vec<SynthNode>,
    keep_layout: bool,
) -> Option<SynthNode> {
    let node = arena.get(pattern)?;
    if node.kind != SyntaxKind::ObjectBindingPattern {
        return None;
    }
    Some(if keep_layout {
        SynthNode::object_pattern_with_source(elements, (node.pos, node.end))
    } else {
        SynthNode::object_pattern(elements)
    })
}

#[cfg(test)]
mod synthesis_tests {
    use super::*;
    use crate::type_oracle::TypeKind;
    use tsd_common::FormatCodeSettings;
    use tsd_emitter::Printer;
    use tsd_parser::SourceFile;

    fn object(names: &[&str]) -> TypeDescriptor {
        TypeDescriptor {
            kind: TypeKind::Object,
            property_names: names.iter().map(|name| name.to_string()).collect(),
            constituents: Vec::new(),
        }
    }

    fn first_function(file: &SourceFile) -> NodeIndex {
        let arena = file.arena();
        (0..arena.len() as u32)
            .map(NodeIndex)
            .find(|&index| arena.kind(index).is_some_and(SyntaxKind::is_function_like))
            .expect("function node")
    }

    #[test]
    fn pattern_keeps_property_order() {
        let pattern = object_binding_pattern_for_type(&object(&["b", "a", "c"]));
        assert_eq!(
            pattern,
            SynthNode::object_pattern(vec![
                SynthNode::binding("b"),
                SynthNode::binding("a"),
                SynthNode::binding("c"),
            ])
        );
    }

    #[test]
    fn printed_pattern_reparses_in_property_order() {
        let statement =
            variable_statement_destructuring(&object(&["a", "b", "c"]), SynthNode::id("value"));
        let text = Printer::without_source(&FormatCodeSettings::default()).print_node(&statement);
        let file = SourceFile::parse("a.ts", text.as_str());
        assert!(file.parse_diagnostics().is_empty(), "{text}");

        let arena = file.arena();
        let mut elements: Vec<NodeIndex> = (0..arena.len() as u32)
            .map(NodeIndex)
            .filter(|&index| arena.is_kind(index, SyntaxKind::BindingElement))
            .collect();
        elements.sort_by_key(|&index| arena.get(index).map(|node| node.pos));
        let names: Vec<&str> = elements
            .iter()
            .filter_map(|&index| arena.get(index).and_then(|node| arena.get_binding_element(node)))
            .map(|data| file.node_text(data.name))
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn destructuring_statement_is_const() {
        let statement = variable_statement_destructuring(&object(&["a"]), SynthNode::id("value"));
        let SynthNode::VariableStatement(list) = statement else {
            panic!("expected a variable statement");
        };
        assert!(matches!(
            *list,
            SynthNode::VariableDeclarationList {
                kind: DeclarationKind::Const,
                ..
            }
        ));
    }

    #[test]
    fn empty_block_body_is_replaced() {
        let file = SourceFile::parse("a.ts", "function f(a) {}\n");
        let function = first_function(&file);
        let update =
            append_statement_to_function_body(file.arena(), function, SynthNode::raw("x;")).unwrap();
        assert!(matches!(
            update,
            FunctionBodyUpdate::ReplaceBody { block: SynthNode::Block(ref statements), .. }
                if statements.len() == 1
        ));
    }

    #[test]
    fn multi_line_block_body_gets_an_insertion() {
        let file = SourceFile::parse("a.ts", "function f(a) {\n    a;\n}\n");
        let function = first_function(&file);
        let update =
            append_statement_to_function_body(file.arena(), function, SynthNode::raw("x;")).unwrap();
        assert!(matches!(update, FunctionBodyUpdate::InsertAtBodyStart { .. }));
    }

    #[test]
    fn expression_body_becomes_a_returning_block() {
        let file = SourceFile::parse("a.ts", "const f = (a) => a;\n");
        let function = first_function(&file);
        let update =
            append_statement_to_function_body(file.arena(), function, SynthNode::raw("x;")).unwrap();
        let FunctionBodyUpdate::ReplaceFunction {
            function_node: SynthNode::ArrowFunction { body, parameters, .. },
            ..
        } = update
        else {
            panic!("expected an arrow function replacement");
        };
        assert_eq!(parameters.len(), 1);
        let SynthNode::Block(statements) = *body else {
            panic!("expected a block body");
        };
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[1], SynthNode::ReturnStatement(Some(_))));
    }

    #[test]
    fn only_object_patterns_can_be_updated() {
        let file = SourceFile::parse("a.ts", "const [a] = b;\nconst { c } = d;\n");
        let arena = file.arena();
        let find = |kind| {
            (0..arena.len() as u32)
                .map(NodeIndex)
                .find(|&index| arena.is_kind(index, kind))
                .expect("pattern")
        };
        let array = find(SyntaxKind::ArrayBindingPattern);
        let object = find(SyntaxKind::ObjectBindingPattern);
        assert!(update_object_binding_pattern(arena, array, Vec::new(), true).is_none());
        let updated = update_object_binding_pattern(arena, object, Vec::new(), true).unwrap();
        assert!(matches!(
            updated,
            SynthNode::ObjectBindingPattern {
                source_range: Some(_),
                ..
            }
        ));
    }
}
