//! Tests for structural type resolution.

use std::rc::Rc;
use tsd_checker::{CheckedType, Checker, HostType, TypeFlags, TypeId};
use tsd_parser::{NodeIndex, SourceFile, SyntaxKind};

/// Identifier node starting at the `nth` occurrence of `needle`.
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
        .unwrap_or_else(|| panic!("no identifier at `{needle}` #{nth}"))
}

fn property_names(checker: &Checker<'_>, id: TypeId) -> Vec<String> {
    checker
        .properties_of(id)
        .into_iter()
        .map(|property| property.name)
        .collect()
}

fn type_of(checker: &Checker<'_>, node: NodeIndex) -> TypeId {
    checker.type_at_node(node).expect("node should have a type")
}

#[test]
fn annotated_parameter_has_type_literal_properties() {
    let file = SourceFile::parse("a.ts", "function f(x: { a: number; b: string }) {}\n");
    let checker = Checker::new(&file);
    let x = type_of(&checker, identifier_at(&file, "x", 0));
    assert_eq!(checker.type_flags(x), TypeFlags::OBJECT);
    assert_eq!(property_names(&checker, x), ["a", "b"]);
    assert_eq!(checker.type_to_string(x), "{ a: number; b: string; }");
}

#[test]
fn object_literal_properties_are_widened() {
    let file = SourceFile::parse("a.ts", "const value = { a: 1, b: 'two', c: true };\nvalue;\n");
    let checker = Checker::new(&file);
    let value = type_of(&checker, identifier_at(&file, "value", 1));
    assert_eq!(
        checker.type_to_string(value),
        "{ a: number; b: string; c: boolean; }"
    );
}

#[test]
fn object_literal_spread_and_shorthand() {
    let source = "const base = { a: 1 };\nconst b = 'x';\nconst all = { ...base, b, m() { return 1; } };\n";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let all = type_of(&checker, identifier_at(&file, "all", 0));
    assert_eq!(property_names(&checker, all), ["a", "b", "m"]);
    let m = checker.property_type(all, "m").expect("m");
    assert_eq!(checker.type_flags(m), TypeFlags::FUNCTION);
}

#[test]
fn interface_reference_resolves_lazily() {
    let source = "interface Point { x: number; y: number }\nfunction f(p: Point) {}\n";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let p = type_of(&checker, identifier_at(&file, "p", 0));

    assert_eq!(checker.type_flags(p), TypeFlags::empty());
    assert_eq!(property_names(&checker, p), ["x", "y"]);
    assert_eq!(checker.type_flags(p), TypeFlags::OBJECT);
}

#[test]
fn host_type_flags_appear_after_property_enumeration() {
    let source = "type Point = { x: number; y: number };\nlet p: Point;\n";
    let file = SourceFile::parse("a.ts", source);
    let checker = Rc::new(Checker::new(&file));
    let p = type_of(&checker, identifier_at(&file, "p", 1));
    let host = CheckedType::new(Rc::clone(&checker), p);

    assert!(host.flags().is_empty());
    assert_eq!(host.property_names(), ["x", "y"]);
    assert_eq!(host.flags(), TypeFlags::OBJECT);
}

#[test]
fn interface_extends_appends_base_properties() {
    let source = "interface A { a: number }\ninterface B extends A { b: string }\nlet v: B;\n";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let v = type_of(&checker, identifier_at(&file, "v", 0));
    assert_eq!(property_names(&checker, v), ["b", "a"]);
}

#[test]
fn class_instance_includes_parameter_properties_and_accessors() {
    let source = "\
class Point {
    static origin = 0;
    z = 0;
    constructor(public x: number, private y: number, plain: number) {}
    get length(): number { return 0; }
    scale(factor: number) { return this; }
}
const p = new Point(1, 2, 3);
";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let p = type_of(&checker, identifier_at(&file, "p =", 0));
    assert_eq!(property_names(&checker, p), ["z", "x", "y", "length", "scale"]);
}

#[test]
fn unions_concatenate_and_intersections_merge() {
    let source = "\
type U = { a: number } | { a: string; b: number };
type I = { a: number } & { a: number; c: number };
let u: U;
let i: I;
";
    let file = SourceFile::parse("a.ts", source);
    let checker = Rc::new(Checker::new(&file));

    let u = CheckedType::new(Rc::clone(&checker), type_of(&checker, identifier_at(&file, "u:", 0)));
    assert_eq!(u.property_names(), ["a", "a", "b"]);
    assert_eq!(u.flags(), TypeFlags::UNION);
    assert_eq!(u.constituents().len(), 2);

    let i = CheckedType::new(Rc::clone(&checker), type_of(&checker, identifier_at(&file, "i:", 0)));
    assert_eq!(i.property_names(), ["a", "c"]);
    assert_eq!(i.flags(), TypeFlags::INTERSECTION);
    assert!(i
        .constituents()
        .iter()
        .all(|member| member.flags() == TypeFlags::OBJECT));
}

#[test]
fn binding_elements_read_source_properties() {
    let source = "\
const source = { a: { b: 1 }, c: 'x', d: true };
const { a, ...rest } = source;
";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let a = type_of(&checker, identifier_at(&file, "a,", 0));
    assert_eq!(checker.type_to_string(a), "{ b: number; }");
    let rest = type_of(&checker, identifier_at(&file, "rest", 0));
    assert_eq!(property_names(&checker, rest), ["c", "d"]);
}

#[test]
fn renamed_and_nested_binding_elements() {
    let source = "function f({ a: { b: renamed } }: { a: { b: { c: number } } }) { renamed; }\n";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let renamed = type_of(&checker, identifier_at(&file, "renamed", 1));
    assert_eq!(property_names(&checker, renamed), ["c"]);
}

#[test]
fn array_binding_elements_and_for_of() {
    let source = "\
const pairs: [{ k: number }, string] = [{ k: 1 }, 's'];
const [first, second] = pairs;
const list: { id: number }[] = [];
for (const item of list) {}
";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let first = type_of(&checker, identifier_at(&file, "first", 0));
    assert_eq!(property_names(&checker, first), ["k"]);
    let second = type_of(&checker, identifier_at(&file, "second", 0));
    assert_eq!(second, TypeId::STRING);
    let item = type_of(&checker, identifier_at(&file, "item", 0));
    assert_eq!(property_names(&checker, item), ["id"]);
}

#[test]
fn property_access_and_call_results() {
    let source = "\
function make() { return { inner: { v: 1 } }; }
const made = make();
const inner = made.inner;
const arrow = (n: number) => ({ n });
const viaArrow = arrow(1);
";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let inner = type_of(&checker, identifier_at(&file, "inner =", 0));
    assert_eq!(property_names(&checker, inner), ["v"]);
    let via_arrow = type_of(&checker, identifier_at(&file, "viaArrow", 0));
    assert_eq!(property_names(&checker, via_arrow), ["n"]);
}

#[test]
fn as_expressions_use_the_asserted_type() {
    let source = "const a = {} as { x: number };\nconst b = { y: 1 } as const;\n";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let a = type_of(&checker, identifier_at(&file, "a", 0));
    assert_eq!(property_names(&checker, a), ["x"]);
    let b = type_of(&checker, identifier_at(&file, "b =", 0));
    assert_eq!(property_names(&checker, b), ["y"]);
}

#[test]
fn primitives_and_arrays_are_not_objects() {
    let source = "const n = 1;\nconst s = 'a';\nconst xs = [1, 2];\nconst f = () => 1;\n";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let flags = |needle: &str| {
        let node = identifier_at(&file, needle, 0);
        checker.type_flags(type_of(&checker, node))
    };
    assert_eq!(flags("n ="), TypeFlags::NUMBER);
    assert_eq!(flags("s ="), TypeFlags::STRING);
    assert_eq!(flags("xs"), TypeFlags::ARRAY);
    assert_eq!(flags("f ="), TypeFlags::FUNCTION);
}

#[test]
fn unresolved_names_are_any() {
    let file = SourceFile::parse("a.ts", "declared.value;\nlet t: Missing;\n");
    let checker = Checker::new(&file);
    let declared = type_of(&checker, identifier_at(&file, "declared", 0));
    assert_eq!(declared, TypeId::ANY);
    let t = type_of(&checker, identifier_at(&file, "t:", 0));
    assert_eq!(t, TypeId::ANY);
}

#[test]
fn circular_aliases_terminate() {
    let source = "type A = B & { a: number };\ntype B = A & { b: number };\nlet v: A;\n";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let v = type_of(&checker, identifier_at(&file, "v", 0));
    let names = property_names(&checker, v);
    assert!(names.contains(&"a".to_string()));
}

#[test]
fn this_inside_class_is_the_instance() {
    let source = "class C {\n    a = 1;\n    m() { return this; }\n}\n";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let this_node = (0..file.arena().len() as u32)
        .map(NodeIndex)
        .find(|&index| file.arena().kind(index) == Some(SyntaxKind::ThisKeyword))
        .expect("this");
    let this_type = type_of(&checker, this_node);
    assert_eq!(property_names(&checker, this_type), ["a", "m"]);
}

#[test]
fn class_value_is_a_constructor_with_statics() {
    let source = "\
class Test {
    static count = 0;
    property = 1;
}
const test = new Test;
Test;
";
    let file = SourceFile::parse("a.ts", source);
    let checker = Checker::new(&file);
    let constructor = type_of(&checker, identifier_at(&file, "Test", 2));
    assert_eq!(property_names(&checker, constructor), ["prototype", "count"]);
    assert!(checker.type_flags(constructor).contains(TypeFlags::OBJECT));
    assert_eq!(checker.type_to_string(constructor), "typeof Test");

    let instance = type_of(&checker, identifier_at(&file, "test", 0));
    assert_eq!(property_names(&checker, instance), ["property"]);
}
