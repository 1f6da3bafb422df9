//! Applicability and output of each refactor.

mod fixture;

use fixture::{Fixture, without_indent};
use tsd_refactor::RefactorKind;

const IOBJECT: &str = "
    interface IObject {
      property1: number;
      property2: string;
      property3: boolean;
    }
";

fn with_iobject(body: &str) -> String {
    format!("{}\n\n{}", without_indent(IOBJECT), without_indent(body))
}

// =============================================================================
// destructure-in-place
// =============================================================================

#[test]
fn in_place_applies_at_object_parameter() {
    let fixture = Fixture::new(
        "
        type IObject = { property1: number }
        const fn = (#parameter#: IObject) => {}
        ",
    );
    assert!(fixture.can_apply(RefactorKind::DestructureInPlace));
}

#[test]
fn in_place_rejects_primitive_parameter() {
    let fixture = Fixture::new("const fn = (#parameter#: number) => {}");
    assert!(!fixture.can_apply(RefactorKind::DestructureInPlace));
    assert!(fixture.edits(RefactorKind::DestructureInPlace).is_none());
}

#[test]
fn in_place_rejects_parameter_properties() {
    let fixture = Fixture::new(
        "
        type IObject = { property1: number }
        class Holder {
          constructor(private #parameter#: IObject) {}
        }
        ",
    );
    assert!(!fixture.can_apply(RefactorKind::DestructureInPlace));
}

#[test]
fn in_place_replaces_parameter_name() {
    let fixture = Fixture::new(
        "
        type IObject = { property1: number }
        const fn = (#parameter#: IObject) => {}
        ",
    );
    assert_eq!(
        fixture.apply(RefactorKind::DestructureInPlace),
        without_indent(
            "
            type IObject = { property1: number }
            const fn = ({ property1 }: IObject) => {}
            "
        )
    );
}

#[test]
fn in_place_prints_several_properties_one_per_line() {
    let fixture = Fixture::new(&with_iobject("function handle(#parameter#: IObject) {}"));
    assert_eq!(
        fixture.apply(RefactorKind::DestructureInPlace),
        with_iobject(
            "
            function handle({
              property1,
              property2,
              property3
            }: IObject) {}
            "
        )
    );
}

// =============================================================================
// destructure-property
// =============================================================================

#[test]
fn property_applies_at_object_valued_element() {
    let fixture =
        Fixture::new("const { #nestedProperty# } = { nestedProperty: { nestedValue: 'value' } };");
    assert!(fixture.can_apply(RefactorKind::DestructureProperty));
}

#[test]
fn property_rejects_primitive_element() {
    let fixture = Fixture::new("const { #notNestedProperty# } = { notNestedProperty: 1 };");
    assert!(!fixture.can_apply(RefactorKind::DestructureProperty));
}

#[test]
fn property_rejects_rest_element() {
    let fixture = Fixture::new("const { ...#rest# } = { nested: { value: 1 } };");
    assert!(!fixture.can_apply(RefactorKind::DestructureProperty));
}

#[test]
fn property_nests_pattern() {
    let fixture =
        Fixture::new("const { #nestedProperty# } = { nestedProperty: { nestedValue: 'value' } };");
    assert_eq!(
        fixture.apply(RefactorKind::DestructureProperty),
        "const { nestedProperty: { nestedValue } } = { nestedProperty: { nestedValue: 'value' } };"
    );
}

#[test]
fn property_nests_first_element_of_multi_line_pattern() {
    let fixture = Fixture::new(
        "
        const {
          #nestedProperty#,
          property2
        } = { nestedProperty: { nestedValue: 'value' }, property2: 2 };
        ",
    );
    assert_eq!(
        fixture.apply(RefactorKind::DestructureProperty),
        without_indent(
            "
            const {
              nestedProperty: { nestedValue },
              property2
            } = { nestedProperty: { nestedValue: 'value' }, property2: 2 };
            "
        )
    );
}

#[test]
fn property_nests_last_element_of_multi_line_pattern() {
    let fixture = Fixture::new(
        "
        const {
          property2,
          #nestedProperty#
        } = { nestedProperty: { nestedValue: 'value' }, property2: 2 };
        ",
    );
    assert_eq!(
        fixture.apply(RefactorKind::DestructureProperty),
        without_indent(
            "
            const {
              property2,
              nestedProperty: { nestedValue }
            } = { nestedProperty: { nestedValue: 'value' }, property2: 2 };
            "
        )
    );
}

#[test]
fn property_keeps_key_and_initializer() {
    let fixture =
        Fixture::new("const { #nested#: alias = { a: 1 } } = {} as { nested: { a: number } };");
    assert_eq!(
        fixture.apply(RefactorKind::DestructureProperty),
        "const { nested: { a } = { a: 1 } } = {} as { nested: { a: number } };"
    );
}

// =============================================================================
// destructure-spread
// =============================================================================

#[test]
fn spread_applies_at_whole_rest_element() {
    let fixture = Fixture::new("const { #...rest# } = { property1: 1, property2: 2 };");
    assert!(fixture.can_apply(RefactorKind::DestructureSpread));
}

#[test]
fn spread_applies_at_dot_dot_dot_token() {
    let fixture = Fixture::new("const { #...#rest } = { property1: 1, property2: 2 };");
    assert!(fixture.can_apply(RefactorKind::DestructureSpread));
}

#[test]
fn spread_applies_at_rest_identifier() {
    let fixture = Fixture::new("const { ...#rest# } = { property1: 1, property2: 2 };");
    assert!(fixture.can_apply(RefactorKind::DestructureSpread));
}

#[test]
fn spread_rejects_array_rest() {
    let fixture = Fixture::new("const [#...rest#] = [1, 2, 3];");
    assert!(!fixture.can_apply(RefactorKind::DestructureSpread));
}

#[test]
fn spread_rejects_plain_element() {
    let fixture = Fixture::new("const { #property1#, ...rest } = { property1: 1, property2: 2 };");
    assert!(!fixture.can_apply(RefactorKind::DestructureSpread));
}

#[test]
fn spread_unfolds_rest_into_properties() {
    let fixture = Fixture::new("const { #...rest# } = { property1: 1, property2: 2 };");
    assert_eq!(
        fixture.apply(RefactorKind::DestructureSpread),
        without_indent(
            "
            const {
              property1,
              property2
            } = { property1: 1, property2: 2 };
            "
        )
    );
}

#[test]
fn spread_keeps_other_elements_first() {
    let fixture = Fixture::new("const { a, ...#rest# } = { a: 1, b: 2, c: 3 };");
    assert_eq!(
        fixture.apply(RefactorKind::DestructureSpread),
        without_indent(
            "
            const {
              a,
              b,
              c
            } = { a: 1, b: 2, c: 3 };
            "
        )
    );
}

// =============================================================================
// destructure-to-constant
// =============================================================================

#[test]
fn to_constant_applies_at_expression() {
    let fixture = Fixture::new(&with_iobject(
        "
        const obj = {} as IObject;

        #obj#
        ",
    ));
    assert!(fixture.can_apply(RefactorKind::DestructureToConstant));
}

#[test]
fn to_constant_applies_at_function_parameter() {
    let fixture = Fixture::new(&with_iobject("function (#arg#: IObject) {}"));
    assert!(fixture.can_apply(RefactorKind::DestructureToConstant));
}

#[test]
fn to_constant_applies_at_binding_element() {
    let fixture = Fixture::new(&with_iobject(
        "
        const obj = {} as IObject;
        const acc = { obj };

        const {
          #obj#
        } = acc;
        ",
    ));
    assert!(fixture.can_apply(RefactorKind::DestructureToConstant));
}

#[test]
fn to_constant_rejects_type_reference() {
    let fixture = Fixture::new(&with_iobject("const obj = {} as #IObject#;"));
    assert!(!fixture.can_apply(RefactorKind::DestructureToConstant));
}

#[test]
fn to_constant_replaces_expression_statement() {
    let fixture = Fixture::new(&with_iobject(
        "
        const obj = {} as IObject;

        #obj#
        ",
    ));
    assert_eq!(
        fixture.apply(RefactorKind::DestructureToConstant),
        with_iobject(
            "
            const obj = {} as IObject;

            const {
              property1,
              property2,
              property3
            } = obj;
            "
        )
    );
}

#[test]
fn to_constant_prepends_to_block_body() {
    let fixture = Fixture::new(&with_iobject("function (#parameter#: IObject) {}"));
    assert_eq!(
        fixture.apply(RefactorKind::DestructureToConstant),
        with_iobject(
            "
            function (parameter: IObject) {
              const {
                property1,
                property2,
                property3
              } = parameter;
            }
            "
        )
    );
}

#[test]
fn to_constant_inserts_before_existing_statements() {
    let fixture = Fixture::new(&with_iobject(
        "
        function handle(#parameter#: IObject) {
          return parameter;
        }
        ",
    ));
    assert_eq!(
        fixture.apply(RefactorKind::DestructureToConstant),
        with_iobject(
            "
            function handle(parameter: IObject) {
              const {
                property1,
                property2,
                property3
              } = parameter;
              return parameter;
            }
            "
        )
    );
}

#[test]
fn to_constant_converts_expression_body() {
    let fixture = Fixture::new(&with_iobject("const fn = (#parameter#: IObject) => parameter;"));
    assert_eq!(
        fixture.apply(RefactorKind::DestructureToConstant),
        with_iobject(
            "
            const fn = (parameter: IObject) => {
              const {
                property1,
                property2,
                property3
              } = parameter;
              return parameter;
            };
            "
        )
    );
}

#[test]
fn to_constant_inserts_after_variable_statement() {
    let fixture = Fixture::new(&with_iobject(
        "
        const obj = {} as IObject;
        const acc = { obj };

        const {
          #obj#
        } = acc;
        ",
    ));
    assert_eq!(
        fixture.apply(RefactorKind::DestructureToConstant),
        with_iobject(
            "
            const obj = {} as IObject;
            const acc = { obj };

            const {
              obj
            } = acc;
            const {
              property1,
              property2,
              property3
            } = obj;
            "
        )
    );
}

#[test]
fn to_constant_inserts_before_containing_statement() {
    let fixture = Fixture::new(
        "
        const point = { x: 1, y: 2 };
        function draw() {
          console.log(#point#);
        }
        ",
    );
    assert_eq!(
        fixture.apply(RefactorKind::DestructureToConstant),
        without_indent(
            "
            const point = { x: 1, y: 2 };
            function draw() {
              const {
                x,
                y
              } = point;
              console.log(point);
            }
            "
        )
    );
}

#[test]
fn to_constant_inserts_before_declaration_for_initializer() {
    let fixture = Fixture::new(
        "
        const obj = { a: 1, b: 2 };
        const x = #obj#;
        ",
    );
    assert!(fixture.can_apply(RefactorKind::DestructureToConstant));
    assert_eq!(
        fixture.apply(RefactorKind::DestructureToConstant),
        without_indent(
            "
            const obj = { a: 1, b: 2 };
            const {
              a,
              b
            } = obj;
            const x = obj;
            "
        )
    );
}

#[test]
fn to_constant_applies_at_binding_element_initializer() {
    let fixture = Fixture::new(
        "
        const o = { a: 1 };
        const { z = #o# } = {} as { z: { a: number } };
        ",
    );
    assert!(fixture.can_apply(RefactorKind::DestructureToConstant));
}

#[test]
fn to_constant_rejects_parameter_of_bodyless_function() {
    let fixture = Fixture::new("declare function f(#p#: { a: 1 }): void;");
    assert!(!fixture.can_apply(RefactorKind::DestructureToConstant));
    assert!(fixture.edits(RefactorKind::DestructureToConstant).is_none());
}

#[test]
fn to_constant_skips_template_substitutions() {
    let fixture = Fixture::new(
        "
        const o = { a: 1 };
        const s = `${#o#}`;
        ",
    );
    assert!(!fixture.can_apply(RefactorKind::DestructureToConstant));
}

// =============================================================================
// roll-into-spread
// =============================================================================

#[test]
fn roll_applies_at_selected_elements() {
    let fixture = Fixture::new(
        "const { property1, #property2, property3# } = { property1: 1, property2: 2, property3 };",
    );
    assert!(fixture.can_apply(RefactorKind::RollIntoSpread));
}

#[test]
fn roll_rejects_array_pattern() {
    let fixture = Fixture::new("const [#a, b, c#] = [1, 2, 3];");
    assert!(!fixture.can_apply(RefactorKind::RollIntoSpread));
}

#[test]
fn roll_needs_a_selection() {
    let fixture = Fixture::new("const { property1, #property2 } = { property1: 1, property2: 2 };");
    assert!(!fixture.can_apply(RefactorKind::RollIntoSpread));
}

#[test]
fn roll_collapses_selection_into_rest() {
    let fixture = Fixture::new(
        "const { property1, #property2, property3# } = { property1: 1, property2: 2, property3 };",
    );
    assert_eq!(
        fixture.apply(RefactorKind::RollIntoSpread),
        "const { property1, ...rest } = { property1: 1, property2: 2, property3 };"
    );
}

#[test]
fn roll_reuses_existing_rest_element() {
    let fixture = Fixture::new("const { #a#, b, ...others } = { a: 1, b: 2, c: 3 };");
    assert_eq!(
        fixture.apply(RefactorKind::RollIntoSpread),
        "const { b, ...others } = { a: 1, b: 2, c: 3 };"
    );
}

#[test]
fn roll_keeps_multi_line_layout() {
    let fixture = Fixture::new(
        "
        const {
          a,
          #b,
          c#
        } = { a: 1, b: 2, c: 3 };
        ",
    );
    assert_eq!(
        fixture.apply(RefactorKind::RollIntoSpread),
        without_indent(
            "
            const {
              a,
              ...rest
            } = { a: 1, b: 2, c: 3 };
            "
        )
    );
}
