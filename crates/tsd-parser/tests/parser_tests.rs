use tsd_parser::{NodeIndex, NodeFlags, SourceFile, SyntaxKind};

/// Reachable nodes of `kind` in source order.
fn nodes_of_kind(file: &SourceFile, kind: SyntaxKind) -> Vec<NodeIndex> {
    let mut out = Vec::new();
    let mut stack = vec![file.root()];
    while let Some(index) = stack.pop() {
        if file.arena().is_kind(index, kind) {
            out.push(index);
        }
        let children = file.arena().children(index);
        stack.extend(children.iter().rev().copied());
    }
    out
}

fn first_of_kind(file: &SourceFile, kind: SyntaxKind) -> NodeIndex {
    nodes_of_kind(file, kind)
        .first()
        .copied()
        .unwrap_or_else(|| panic!("no {kind:?} in {:?}", file.text()))
}

#[test]
fn parses_object_binding_pattern_declaration() {
    let file = SourceFile::parse("a.ts", "const { a, b: c, ...rest } = obj;");
    assert!(file.parse_diagnostics().is_empty());

    let list = first_of_kind(&file, SyntaxKind::VariableDeclarationList);
    let list_node = file.arena().get(list).unwrap();
    assert!(list_node.flags.contains(NodeFlags::CONST));

    let pattern = first_of_kind(&file, SyntaxKind::ObjectBindingPattern);
    assert_eq!(file.node_text(pattern), "{ a, b: c, ...rest }");

    let elements = nodes_of_kind(&file, SyntaxKind::BindingElement);
    let texts: Vec<_> = elements.iter().map(|e| file.node_text(*e)).collect();
    assert_eq!(texts, vec!["a", "b: c", "...rest"]);

    let arena = file.arena();
    let renamed = arena.get_binding_element(arena.get(elements[1]).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(renamed.property_name), Some("b"));
    assert_eq!(arena.identifier_text(renamed.name), Some("c"));

    let rest = arena.get_binding_element(arena.get(elements[2]).unwrap()).unwrap();
    assert!(rest.dot_dot_dot_token);
    assert_eq!(arena.parent(elements[2]), pattern);
}

#[test]
fn node_spans_exclude_leading_trivia() {
    let file = SourceFile::parse("a.ts", "  // comment\n  let x = 1;");
    let statement = first_of_kind(&file, SyntaxKind::VariableStatement);
    assert_eq!(file.node_text(statement), "let x = 1;");
    let root = file.arena().get(file.root()).unwrap();
    assert_eq!(root.pos, 0);
    assert_eq!(root.end, file.text().len() as u32);
}

#[test]
fn parent_links_lead_to_the_root() {
    let file = SourceFile::parse("a.ts", "function f(p: { a: number }) { return p.a; }");
    let access = first_of_kind(&file, SyntaxKind::PropertyAccessExpression);
    let mut current = access;
    let mut kinds = Vec::new();
    while current.is_some() {
        kinds.push(file.arena().kind(current).unwrap());
        current = file.arena().parent(current);
    }
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::PropertyAccessExpression,
            SyntaxKind::ReturnStatement,
            SyntaxKind::Block,
            SyntaxKind::FunctionDeclaration,
            SyntaxKind::SourceFile,
        ]
    );
}

#[test]
fn parses_arrow_functions() {
    let file = SourceFile::parse(
        "a.ts",
        "const f = (parameter: IObject): number => parameter.a;\nconst g = x => x;\nconst h = async (y) => { return y; };",
    );
    assert!(file.parse_diagnostics().is_empty(), "{:?}", file.parse_diagnostics());
    let arrows = nodes_of_kind(&file, SyntaxKind::ArrowFunction);
    assert_eq!(arrows.len(), 3);

    let arena = file.arena();
    let first = arena.get_function(arena.get(arrows[0]).unwrap()).unwrap();
    assert_eq!(first.parameters.len(), 1);
    assert!(arena.is_kind(first.type_annotation, SyntaxKind::NumberKeyword));
    assert!(arena.is_kind(first.body, SyntaxKind::PropertyAccessExpression));

    let second = arena.get_function(arena.get(arrows[1]).unwrap()).unwrap();
    assert_eq!(file.node_text(second.parameters.nodes[0]), "x");

    let third = arena.get_function(arena.get(arrows[2]).unwrap()).unwrap();
    assert!(third.is_async);
    assert!(arena.is_kind(third.body, SyntaxKind::Block));
}

#[test]
fn parenthesized_expression_is_not_an_arrow() {
    let file = SourceFile::parse("a.ts", "const v = (a + b) * 2;");
    assert!(file.parse_diagnostics().is_empty());
    assert!(nodes_of_kind(&file, SyntaxKind::ArrowFunction).is_empty());
    assert_eq!(nodes_of_kind(&file, SyntaxKind::ParenthesizedExpression).len(), 1);
}

#[test]
fn parses_interfaces_and_type_aliases() {
    let source = "interface IObject extends Base {\n  readonly a: number;\n  b?: string,\n  c(): void\n  [key: string]: unknown;\n}\ntype U = { x: 1 } | { y: 'two' };\ntype I = A & B;";
    let file = SourceFile::parse("a.ts", source);
    assert!(file.parse_diagnostics().is_empty(), "{:?}", file.parse_diagnostics());

    let arena = file.arena();
    let interface = first_of_kind(&file, SyntaxKind::InterfaceDeclaration);
    let data = arena.get_class_like(arena.get(interface).unwrap()).unwrap();
    let member_kinds: Vec<_> = data
        .members
        .iter()
        .map(|m| arena.kind(m).unwrap())
        .collect();
    assert_eq!(
        member_kinds,
        vec![
            SyntaxKind::PropertySignature,
            SyntaxKind::PropertySignature,
            SyntaxKind::MethodSignature,
            SyntaxKind::IndexSignature,
        ]
    );
    assert!(data.heritage_clauses.is_some());

    assert_eq!(nodes_of_kind(&file, SyntaxKind::UnionType).len(), 1);
    assert_eq!(nodes_of_kind(&file, SyntaxKind::IntersectionType).len(), 1);
    assert_eq!(nodes_of_kind(&file, SyntaxKind::LiteralType).len(), 2);
}

#[test]
fn parses_classes_with_members() {
    let source = "export class Point {\n  private x: number = 0;\n  y!: number;\n  constructor(public z: number) {}\n  get len() { return 1; }\n  move(dx: number): void {}\n}";
    let file = SourceFile::parse("a.ts", source);
    assert!(file.parse_diagnostics().is_empty(), "{:?}", file.parse_diagnostics());
    let class = first_of_kind(&file, SyntaxKind::ClassDeclaration);
    assert!(file.arena().has_modifier(class, SyntaxKind::ExportKeyword));
    assert_eq!(nodes_of_kind(&file, SyntaxKind::PropertyDeclaration).len(), 2);
    assert_eq!(nodes_of_kind(&file, SyntaxKind::Constructor).len(), 1);
    assert_eq!(nodes_of_kind(&file, SyntaxKind::GetAccessor).len(), 1);
    assert_eq!(nodes_of_kind(&file, SyntaxKind::MethodDeclaration).len(), 1);
}

#[test]
fn parses_object_literals() {
    let source = "const o = { a: 1, b, ...rest, c() { return 2; }, 'd': 3, [k]: 4 };";
    let file = SourceFile::parse("a.ts", source);
    assert!(file.parse_diagnostics().is_empty(), "{:?}", file.parse_diagnostics());
    let literal = first_of_kind(&file, SyntaxKind::ObjectLiteralExpression);
    let arena = file.arena();
    let data = arena.get_literal_expr(arena.get(literal).unwrap()).unwrap();
    let kinds: Vec<_> = data.elements.iter().map(|e| arena.kind(e).unwrap()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::PropertyAssignment,
            SyntaxKind::ShorthandPropertyAssignment,
            SyntaxKind::SpreadAssignment,
            SyntaxKind::MethodDeclaration,
            SyntaxKind::PropertyAssignment,
            SyntaxKind::PropertyAssignment,
        ]
    );
    assert!(!data.multi_line);
}

#[test]
fn parses_as_expressions_and_calls() {
    let file = SourceFile::parse("a.ts", "const v = make<Foo>(1, ...xs) as Foo;\nconst w = a < b;");
    assert!(file.parse_diagnostics().is_empty(), "{:?}", file.parse_diagnostics());
    assert_eq!(nodes_of_kind(&file, SyntaxKind::AsExpression).len(), 1);
    let call = first_of_kind(&file, SyntaxKind::CallExpression);
    let arena = file.arena();
    let data = arena.get_call_expr(arena.get(call).unwrap()).unwrap();
    assert!(data.type_arguments.is_some());
    assert_eq!(data.arguments.as_ref().map(|a| a.len()), Some(2));
    assert_eq!(nodes_of_kind(&file, SyntaxKind::BinaryExpression).len(), 1);
}

#[test]
fn parses_loops_and_conditionals() {
    let source = "for (const item of items) { item; }\nfor (let i = 0; i < 3; i++) {}\nif (a) b(); else { c(); }\nwhile (x) x--;";
    let file = SourceFile::parse("a.ts", source);
    assert!(file.parse_diagnostics().is_empty(), "{:?}", file.parse_diagnostics());
    assert_eq!(nodes_of_kind(&file, SyntaxKind::ForOfStatement).len(), 1);
    assert_eq!(nodes_of_kind(&file, SyntaxKind::ForStatement).len(), 1);
    assert_eq!(nodes_of_kind(&file, SyntaxKind::IfStatement).len(), 1);
    assert_eq!(nodes_of_kind(&file, SyntaxKind::WhileStatement).len(), 1);
}

#[test]
fn unsupported_statements_are_skipped_with_a_diagnostic() {
    let source = "import { a } from './a';\nswitch (x) {\n  case 1: break;\n}\nconst y = 1;";
    let file = SourceFile::parse("a.ts", source);
    assert_eq!(file.parse_diagnostics().len(), 2);
    assert_eq!(nodes_of_kind(&file, SyntaxKind::UnsupportedStatement).len(), 2);
    let statement = first_of_kind(&file, SyntaxKind::VariableStatement);
    assert_eq!(file.node_text(statement), "const y = 1;");
}

#[test]
fn recovers_from_missing_tokens() {
    let file = SourceFile::parse("a.ts", "const a = ;\nconst b = 2;");
    assert!(!file.parse_diagnostics().is_empty());
    assert_eq!(nodes_of_kind(&file, SyntaxKind::VariableStatement).len(), 2);
}

#[test]
fn splits_nested_type_argument_closers() {
    let file = SourceFile::parse("a.ts", "let x: Array<Array<number>> = [];");
    assert!(file.parse_diagnostics().is_empty(), "{:?}", file.parse_diagnostics());
    assert_eq!(nodes_of_kind(&file, SyntaxKind::TypeReference).len(), 2);
}
