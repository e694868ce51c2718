use ir::{MethodDef, TypeDef, TypeRef, Visibility};
use stackwrap_semantics::{
    select_methods, ExclusionReason, MethodFilter, SelectionReport, SemanticError,
};

/// Helper function to create a type with the given public instance methods
fn create_test_type(methods: &[&str]) -> TypeDef {
    methods.iter().fold(TypeDef::new("TestService").in_namespace("Tests"), |ty, name| {
        ty.with_method(MethodDef::new(*name))
    })
}

fn names(methods: &[MethodDef]) -> Vec<&str> { methods.iter().map(|m| m.name.as_str()).collect() }

#[test]
fn test_selects_all_declared_public_instance_methods() {
    let ty = create_test_type(&["Ping", "GetX", "SetY"]);
    let selected = select_methods(&ty, None).expect("selection should succeed");
    assert_eq!(names(&selected), vec!["Ping", "GetX", "SetY"]);
}

#[test]
fn test_excludes_non_public_static_and_inherited() {
    let ty = TypeDef::new("Mixed")
        .with_method(MethodDef::new("First"))
        .with_method(MethodDef::new("Hidden").with_visibility(Visibility::NonPublic))
        .with_method(MethodDef::new("Create").as_static())
        .with_method(MethodDef::new("ToString").as_inherited())
        .with_method(MethodDef::new("Last"));

    let report = SelectionReport::build(&ty, None).expect("selection should succeed");
    assert_eq!(report.eligible_names(), vec!["First", "Last"]);
    assert_eq!(
        report.excluded,
        vec![
            ("Hidden".to_string(), ExclusionReason::NonPublic),
            ("Create".to_string(), ExclusionReason::Static),
            ("ToString".to_string(), ExclusionReason::Inherited),
        ]
    );
}

#[test]
fn test_eligibility_agrees_with_method_flags() {
    let ty = TypeDef::new("Flags")
        .with_method(MethodDef::new("Plain"))
        .with_method(
            MethodDef::new("HiddenFactory").with_visibility(Visibility::NonPublic).as_static(),
        )
        .with_method(MethodDef::new("SharedBase").as_static().as_inherited())
        .with_method(MethodDef::new("Equals").as_inherited());

    let report = SelectionReport::build(&ty, None).expect("selection should succeed");
    for method in &ty.methods {
        assert_eq!(
            report.eligible_names().contains(&method.name.as_str()),
            method.is_declared_public_instance(),
            "eligibility of {}",
            method.name
        );
    }
    assert_eq!(
        report.excluded,
        vec![
            ("HiddenFactory".to_string(), ExclusionReason::NonPublic),
            ("SharedBase".to_string(), ExclusionReason::Static),
            ("Equals".to_string(), ExclusionReason::Inherited),
        ]
    );
}

#[test]
fn test_filter_keeps_only_matching_methods() {
    let ty = create_test_type(&["GetX", "SetY"]);
    let selected = select_methods(&ty, Some("^Get")).expect("selection should succeed");
    assert_eq!(names(&selected), vec!["GetX"]);
}

#[test]
fn test_filter_is_a_partial_match() {
    let ty = create_test_type(&["FooBar", "BarFoo", "Baz"]);
    let selected = select_methods(&ty, Some("Foo")).expect("selection should succeed");
    assert_eq!(names(&selected), vec!["FooBar", "BarFoo"]);

    let selected = select_methods(&ty, Some("^Foo")).expect("selection should succeed");
    assert_eq!(names(&selected), vec!["FooBar"]);

    let selected = select_methods(&ty, Some("^Baz$")).expect("selection should succeed");
    assert_eq!(names(&selected), vec!["Baz"]);
}

#[test]
fn test_filter_exclusions_are_reported() {
    let ty = create_test_type(&["GetX", "SetY"]);
    let filter = MethodFilter::new("^Get").expect("valid pattern");
    assert_eq!(filter.as_str(), "^Get");

    let report = SelectionReport::build(&ty, Some(&filter)).expect("selection should succeed");
    assert_eq!(report.excluded, vec![("SetY".to_string(), ExclusionReason::FilteredOut)]);
    assert_eq!(ExclusionReason::FilteredOut.as_str(), "filtered out");
}

#[test]
fn test_empty_type_selects_nothing() {
    let ty = create_test_type(&[]);
    let selected = select_methods(&ty, None).expect("empty selection is valid");
    assert!(selected.is_empty());

    let ty = create_test_type(&["SetY"]);
    let selected = select_methods(&ty, Some("^Get")).expect("empty selection is valid");
    assert!(selected.is_empty());
}

#[test]
fn test_invalid_filter_fails() {
    let ty = create_test_type(&["GetX"]);
    let err = select_methods(&ty, Some("([unclosed")).expect_err("pattern should be rejected");
    assert!(matches!(err, SemanticError::InvalidFilter(_)));
    assert!(err.to_string().starts_with("Invalid method name filter"));
}

#[test]
fn test_duplicate_eligible_names_fail() {
    let ty = TypeDef::new("Overloaded")
        .with_method(MethodDef::new("Send").with_param("a", TypeRef::new("int")))
        .with_method(MethodDef::new("Send").with_param("b", TypeRef::new("string")));
    match select_methods(&ty, None) {
        Err(SemanticError::DuplicateMethod(name)) => assert_eq!(name, "Send"),
        other => panic!("Expected DuplicateMethod error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_name_excluded_by_rules_is_allowed() {
    let ty = TypeDef::new("Overloaded")
        .with_method(MethodDef::new("Send"))
        .with_method(MethodDef::new("Send").as_static())
        .with_method(MethodDef::new("Sender"));
    let selected = select_methods(&ty, None).expect("static overload is not eligible");
    assert_eq!(names(&selected), vec!["Send", "Sender"]);

    // Filtering one overload away is not enough when both match
    let err = select_methods(
        &TypeDef::new("T").with_method(MethodDef::new("Get")).with_method(MethodDef::new("Get")),
        Some("^Get$"),
    );
    assert!(matches!(err, Err(SemanticError::DuplicateMethod(_))));
}
