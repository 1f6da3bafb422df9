//! `RefactorService` requests against an in-memory project.

mod fixture;

use fixture::{FILE_NAME, Fixture, apply_edits};
use tsd_common::{FormatCodeSettings, PositionOrRange, TextRange};
use tsd_refactor::{ApplicableRefactorInfo, RefactorKind, RefactorService};

const SOURCE: &str = "
    function read(#value#: { a: number, b: string }) {
      return value;
    }
";

fn names(applicable: &[ApplicableRefactorInfo]) -> Vec<&str> {
    applicable.iter().map(|info| info.name.as_str()).collect()
}

#[test]
fn lists_applicable_refactors_in_registration_order() {
    let fixture = Fixture::new(SOURCE);
    let service = RefactorService::new();

    let applicable = service.get_applicable_refactors(fixture.host(), FILE_NAME, fixture.selection);
    assert_eq!(
        names(&applicable),
        vec!["destructure-in-place", "destructure-to-constant"]
    );
    assert_eq!(applicable[0].description, "Destructure object in place");
    assert_eq!(applicable[0].actions.len(), 1);
    assert_eq!(applicable[0].actions[0].name, "destructure-in-place");
}

#[test]
fn lists_nothing_for_unknown_file() {
    let fixture = Fixture::new(SOURCE);
    let service = RefactorService::new();
    assert!(
        service
            .get_applicable_refactors(fixture.host(), "missing.ts", fixture.selection)
            .is_empty()
    );
}

#[test]
fn lists_nothing_past_end_of_file() {
    let fixture = Fixture::new(SOURCE);
    let service = RefactorService::new();
    let end = fixture.text().len() as u32 + 10;
    assert!(
        service
            .get_applicable_refactors(fixture.host(), FILE_NAME, PositionOrRange::Position(end))
            .is_empty()
    );
}

#[test]
fn lists_refactors_for_binding_elements() {
    let fixture = Fixture::new(
        "
        const { #inner#, ...others } = {} as { inner: { a: number }, b: number };
        ",
    );
    let service = RefactorService::new();
    let applicable = service.get_applicable_refactors(fixture.host(), FILE_NAME, fixture.selection);
    assert_eq!(
        names(&applicable),
        vec![
            RefactorKind::DestructureProperty.as_str(),
            RefactorKind::DestructureToConstant.as_str(),
        ]
    );
}

#[test]
fn edits_by_refactor_and_action_name() {
    let fixture = Fixture::new(SOURCE);
    let service = RefactorService::new();
    let edits = service
        .get_edits_for_refactor(
            fixture.host(),
            FILE_NAME,
            &FormatCodeSettings::with_indent_size(2),
            fixture.selection,
            "destructure-in-place",
            "destructure-in-place",
        )
        .expect("in-place edits");

    assert_eq!(edits.edits.len(), 1);
    assert_eq!(edits.edits[0].file_name, FILE_NAME);
    let updated = apply_edits(fixture.text(), &edits);
    assert!(updated.starts_with("function read({\n  a,\n  b\n}: { a: number, b: string }) {"));
}

#[test]
fn unknown_names_produce_no_edits() {
    let fixture = Fixture::new(SOURCE);
    let service = RefactorService::new();
    let settings = FormatCodeSettings::default();

    let edits_for = |file: &str, refactor: &str, action: &str| {
        service.get_edits_for_refactor(
            fixture.host(),
            file,
            &settings,
            fixture.selection,
            refactor,
            action,
        )
    };
    assert!(edits_for(FILE_NAME, "extract-function", "extract-function").is_none());
    assert!(edits_for(FILE_NAME, "destructure-in-place", "destructure-spread").is_none());
    assert!(edits_for("missing.ts", "destructure-in-place", "destructure-in-place").is_none());
}

#[test]
fn inapplicable_refactor_produces_no_edits() {
    let fixture = Fixture::new("const fn = (#parameter#: number) => parameter;");
    let service = RefactorService::new();
    assert!(
        service
            .get_edits_for_refactor(
                fixture.host(),
                FILE_NAME,
                &FormatCodeSettings::default(),
                fixture.selection,
                "destructure-to-constant",
                "destructure-to-constant",
            )
            .is_none()
    );
}

#[test]
fn request_settings_override_project_settings() {
    let mut fixture = Fixture::new(SOURCE);
    fixture
        .project
        .set_format_settings(FormatCodeSettings::with_indent_size(3));
    let service = RefactorService::new();

    let edit_with = |settings: FormatCodeSettings| {
        let edits = service
            .get_edits_for_refactor(
                fixture.host(),
                FILE_NAME,
                &settings,
                fixture.selection,
                "destructure-to-constant",
                "destructure-to-constant",
            )
            .expect("to-constant edits");
        apply_edits(fixture.text(), &edits)
    };

    assert!(edit_with(FormatCodeSettings::default()).contains("{\n   const {\n"));
    assert!(edit_with(FormatCodeSettings::with_indent_size(2)).contains("{\n  const {\n"));
}

#[test]
fn roll_into_spread_needs_a_range() {
    let fixture = Fixture::new(
        "
        const { a, b, c } = {} as { a: number, b: number, c: number };
        ",
    );
    let service = RefactorService::new();
    let text = fixture.text();
    let start = text.find('b').expect("b") as u32;
    let end = text.find(", c").expect("c") as u32;

    let at_caret =
        service.get_applicable_refactors(fixture.host(), FILE_NAME, PositionOrRange::Position(start));
    assert!(!names(&at_caret).contains(&"roll-into-spread"));

    let over_range = service.get_applicable_refactors(
        fixture.host(),
        FILE_NAME,
        PositionOrRange::Range(TextRange::new(start, end)),
    );
    assert!(names(&over_range).contains(&"roll-into-spread"));
}

#[test]
fn applicable_refactors_serialize_camel_case() {
    let fixture = Fixture::new(SOURCE);
    let service = RefactorService::new();
    let applicable = service.get_applicable_refactors(fixture.host(), FILE_NAME, fixture.selection);

    let json = serde_json::to_value(&applicable[0]).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "name": "destructure-in-place",
            "description": "Destructure object in place",
            "actions": [{
                "name": "destructure-in-place",
                "description": "Destructure object (inplace)"
            }]
        })
    );
}
