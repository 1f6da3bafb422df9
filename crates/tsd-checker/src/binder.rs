//! Lexical name resolution.
//!
//! There is no symbol table: a name is resolved by walking the parent chain
//! from the reference and scanning each enclosing scope's declarations. Files
//! are small and every query is request-local, so the walk is cheap enough.

use tsd_parser::{NodeArena, NodeIndex, SyntaxKind};

/// Which declaration space a name is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meaning {
    Value,
    Type,
}

/// The declaration a name refers to, as seen from `location`.
///
/// Values resolve to `VariableDeclaration`, `Parameter`, `BindingElement`,
/// function or class declarations; types resolve to interface, type alias,
/// class or type parameter declarations.
pub fn resolve_name(
    arena: &NodeArena,
    location: NodeIndex,
    name: &str,
    meaning: Meaning,
) -> Option<NodeIndex> {
    if name.is_empty() {
        return None;
    }
    let mut current = location;
    while current.is_some() {
        if let Some(found) = lookup_in_scope(arena, current, name, meaning) {
            return Some(found);
        }
        current = arena.parent(current);
    }
    None
}

fn lookup_in_scope(
    arena: &NodeArena,
    scope: NodeIndex,
    name: &str,
    meaning: Meaning,
) -> Option<NodeIndex> {
    let node = arena.get(scope)?;
    match node.kind {
        SyntaxKind::SourceFile => {
            let data = arena.get_source_file(node)?;
            data.statements
                .iter()
                .find_map(|statement| lookup_in_statement(arena, statement, name, meaning))
        }
        SyntaxKind::Block => {
            let data = arena.get_block(node)?;
            data.statements
                .iter()
                .find_map(|statement| lookup_in_statement(arena, statement, name, meaning))
        }
        SyntaxKind::FunctionDeclaration
        | SyntaxKind::FunctionExpression
        | SyntaxKind::ArrowFunction
        | SyntaxKind::MethodDeclaration
        | SyntaxKind::Constructor
        | SyntaxKind::GetAccessor
        | SyntaxKind::SetAccessor => {
            let data = arena.get_function(node)?;
            match meaning {
                Meaning::Value => data
                    .parameters
                    .iter()
                    .find_map(|parameter| {
                        let name_node = arena.get_parameter(arena.get(parameter)?)?.name;
                        lookup_in_binding_name(arena, name_node, parameter, name)
                    })
                    .or_else(|| {
                        // A named function expression is visible inside itself
                        (node.kind == SyntaxKind::FunctionExpression
                            && arena.identifier_text(data.name) == Some(name))
                        .then_some(scope)
                    }),
                Meaning::Type => lookup_type_parameter(arena, data.type_parameters.as_ref(), name),
            }
        }
        SyntaxKind::MethodSignature => {
            let data = arena.get_signature(node)?;
            match meaning {
                Meaning::Value => None,
                Meaning::Type => lookup_type_parameter(arena, data.type_parameters.as_ref(), name),
            }
        }
        SyntaxKind::FunctionType => {
            let data = arena.get_function_type(node)?;
            match meaning {
                Meaning::Value => None,
                Meaning::Type => lookup_type_parameter(arena, data.type_parameters.as_ref(), name),
            }
        }
        SyntaxKind::ClassDeclaration | SyntaxKind::InterfaceDeclaration => {
            let data = arena.get_class_like(node)?;
            match meaning {
                Meaning::Value => None,
                Meaning::Type => lookup_type_parameter(arena, data.type_parameters.as_ref(), name),
            }
        }
        SyntaxKind::TypeAliasDeclaration => {
            let data = arena.get_type_alias(node)?;
            match meaning {
                Meaning::Value => None,
                Meaning::Type => lookup_type_parameter(arena, data.type_parameters.as_ref(), name),
            }
        }
        SyntaxKind::ForStatement => {
            let data = arena.get_loop(node)?;
            lookup_in_declaration_list(arena, data.initializer, name, meaning)
        }
        SyntaxKind::ForOfStatement | SyntaxKind::ForInStatement => {
            let data = arena.get_for_in_of(node)?;
            lookup_in_declaration_list(arena, data.initializer, name, meaning)
        }
        _ => None,
    }
}

fn lookup_in_statement(
    arena: &NodeArena,
    statement: NodeIndex,
    name: &str,
    meaning: Meaning,
) -> Option<NodeIndex> {
    let node = arena.get(statement)?;
    match node.kind {
        SyntaxKind::VariableStatement => {
            let data = arena.get_variable_statement(node)?;
            lookup_in_declaration_list(arena, data.declaration_list, name, meaning)
        }
        SyntaxKind::FunctionDeclaration if meaning == Meaning::Value => {
            let data = arena.get_function(node)?;
            (arena.identifier_text(data.name) == Some(name)).then_some(statement)
        }
        SyntaxKind::ClassDeclaration => {
            let data = arena.get_class_like(node)?;
            (arena.identifier_text(data.name) == Some(name)).then_some(statement)
        }
        SyntaxKind::InterfaceDeclaration if meaning == Meaning::Type => {
            let data = arena.get_class_like(node)?;
            (arena.identifier_text(data.name) == Some(name)).then_some(statement)
        }
        SyntaxKind::TypeAliasDeclaration if meaning == Meaning::Type => {
            let data = arena.get_type_alias(node)?;
            (arena.identifier_text(data.name) == Some(name)).then_some(statement)
        }
        _ => None,
    }
}

fn lookup_in_declaration_list(
    arena: &NodeArena,
    list: NodeIndex,
    name: &str,
    meaning: Meaning,
) -> Option<NodeIndex> {
    if meaning != Meaning::Value {
        return None;
    }
    let node = arena.get(list)?;
    let data = arena.get_variable_declaration_list(node)?;
    data.declarations.iter().find_map(|declaration| {
        let name_node = arena
            .get_variable_declaration(arena.get(declaration)?)?
            .name;
        lookup_in_binding_name(arena, name_node, declaration, name)
    })
}

/// Match `name` against an identifier or, recursively, a binding pattern.
/// An identifier match yields `declaration`; a pattern match yields the
/// binding element that introduces the name.
fn lookup_in_binding_name(
    arena: &NodeArena,
    name_node: NodeIndex,
    declaration: NodeIndex,
    name: &str,
) -> Option<NodeIndex> {
    let node = arena.get(name_node)?;
    match node.kind {
        SyntaxKind::Identifier => {
            (arena.identifier_text(name_node) == Some(name)).then_some(declaration)
        }
        SyntaxKind::ObjectBindingPattern | SyntaxKind::ArrayBindingPattern => {
            let pattern = arena.get_binding_pattern(node)?;
            pattern.elements.iter().find_map(|element| {
                let element_node = arena.get(element)?;
                let data = arena.get_binding_element(element_node)?;
                lookup_in_binding_name(arena, data.name, element, name)
            })
        }
        _ => None,
    }
}

fn lookup_type_parameter(
    arena: &NodeArena,
    type_parameters: Option<&tsd_parser::NodeList>,
    name: &str,
) -> Option<NodeIndex> {
    type_parameters?.iter().find(|&parameter| {
        arena
            .get(parameter)
            .and_then(|node| arena.get_type_parameter(node))
            .and_then(|data| arena.identifier_text(data.name))
            == Some(name)
    })
}

#[cfg(test)]
mod binder_tests {
    use super::*;
    use tsd_parser::SourceFile;

    fn identifier_at(file: &SourceFile, needle: &str, nth: usize) -> NodeIndex {
        let offset = file
            .text()
            .match_indices(needle)
            .nth(nth)
            .map(|(offset, _)| offset as u32)
            .unwrap_or_else(|| panic!("`{needle}` #{nth} not found"));
        let arena = file.arena();
        (0..arena.len() as u32)
            .map(NodeIndex)
            .find(|&index| {
                arena
                    .get(index)
                    .is_some_and(|node| node.kind == SyntaxKind::Identifier && node.pos == offset)
            })
            .expect("identifier node")
    }

    #[test]
    fn resolves_parameters_before_outer_variables() {
        let file = SourceFile::parse("a.ts", "const x = 1;\nfunction f(x: number) { return x; }\n");
        let reference = identifier_at(&file, "x", 2);
        let declaration = resolve_name(file.arena(), reference, "x", Meaning::Value)
            .expect("x should resolve");
        assert_eq!(file.arena().kind(declaration), Some(SyntaxKind::Parameter));
    }

    #[test]
    fn resolves_names_bound_by_patterns() {
        let file = SourceFile::parse("a.ts", "const { a, b: { c } } = value;\nc;\n");
        let reference = identifier_at(&file, "c", 2);
        let declaration = resolve_name(file.arena(), reference, "c", Meaning::Value)
            .expect("c should resolve");
        assert_eq!(file.arena().kind(declaration), Some(SyntaxKind::BindingElement));
    }

    #[test]
    fn separates_value_and_type_meanings() {
        let file = SourceFile::parse("a.ts", "interface Foo { a: number }\nlet y: Foo;\n");
        let reference = identifier_at(&file, "Foo", 1);
        let arena = file.arena();
        assert_eq!(
            resolve_name(arena, reference, "Foo", Meaning::Type).and_then(|d| arena.kind(d)),
            Some(SyntaxKind::InterfaceDeclaration)
        );
        assert_eq!(resolve_name(arena, reference, "Foo", Meaning::Value), None);
    }

    #[test]
    fn resolves_type_parameters_of_enclosing_function() {
        let file = SourceFile::parse("a.ts", "function id<T>(value: T) { return value; }\n");
        let reference = identifier_at(&file, "T", 1);
        let declaration = resolve_name(file.arena(), reference, "T", Meaning::Type)
            .expect("T should resolve");
        assert_eq!(file.arena().kind(declaration), Some(SyntaxKind::TypeParameter));
    }

    #[test]
    fn resolves_for_of_bindings() {
        let file = SourceFile::parse("a.ts", "for (const item of items) { item; }\n");
        let reference = identifier_at(&file, "item", 2);
        let declaration = resolve_name(file.arena(), reference, "item", Meaning::Value)
            .expect("item should resolve");
        assert_eq!(file.arena().kind(declaration), Some(SyntaxKind::VariableDeclaration));
    }
}
