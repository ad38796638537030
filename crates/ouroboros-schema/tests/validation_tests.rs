//! Comprehensive validation tests

use regex::Regex;

use ouroboros_schema::{
    custom_failure, validate, FailureKind, Schema, TypeTag, Validator, ValidatorConfig, Value,
};

fn strs(path: &[&str]) -> Vec<String> {
    path.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Type Tag Tests
// ============================================================================

#[test]
fn test_string_basic() {
    let schema = Schema::string();
    assert_eq!(validate(&Value::from("hello"), &schema), Ok(Value::from("hello")));

    // Wrong type
    let err = validate(&Value::Int(42), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::TypeMismatch);
    assert_eq!(err.message, "Invalid property type! Expected 'string', instead got 'number'!");
    assert!(err.path.is_empty());
}

#[test]
fn test_integer_requires_whole_number() {
    let schema = Schema::integer();
    assert!(validate(&Value::Int(3), &schema).is_ok());
    assert!(validate(&Value::Float(3.0), &schema).is_ok());
    assert!(validate(&Value::Float(3.5), &schema).is_err());

    // float/number accept any numeric value
    assert!(validate(&Value::Float(3.5), &Schema::of(TypeTag::Float)).is_ok());
    assert!(validate(&Value::Int(3), &Schema::number()).is_ok());
}

#[test]
fn test_any_rejects_absent_values() {
    let schema = Schema::any();
    assert!(validate(&Value::Bool(false), &schema).is_ok());
    assert!(validate(&Value::Symbol("s".into()), &schema).is_ok());

    let err = validate(&Value::Undefined, &schema).unwrap_err();
    assert_eq!(err.message, "Non-optional property is 'undefined'!");

    let err = validate(&Value::Null, &schema).unwrap_err();
    assert_eq!(err.message, "Non-nullable property is 'null'!");
}

// ============================================================================
// Optional / Nullable / Default Tests
// ============================================================================

#[test]
fn test_optional_without_default() {
    let schema = Schema::shape()
        .property("name", Schema::string())
        .property("nick", Schema::string().optional());

    let value = Value::object([("name", Value::from("ada"))]);
    assert_eq!(validate(&value, &schema), Ok(value.clone()));
}

#[test]
fn test_optional_with_default() {
    let schema = Schema::shape()
        .property("name", Schema::string())
        .property("role", Schema::string().default_value("member"));

    let value = Value::object([("name", Value::from("ada"))]);
    let matched = validate(&value, &schema).unwrap();
    assert_eq!(
        matched,
        Value::object([("name", Value::from("ada")), ("role", Value::from("member"))])
    );

    // Present values win over the default
    let value = Value::object([("name", Value::from("ada")), ("role", Value::from("admin"))]);
    assert_eq!(validate(&value, &schema), Ok(value.clone()));
}

#[test]
fn test_nullable() {
    let schema = Schema::string().nullable();
    assert_eq!(validate(&Value::Null, &schema), Ok(Value::Null));
    assert!(validate(&Value::Undefined, &schema).is_err());
}

#[test]
fn test_missing_required_property() {
    let schema = Schema::shape().property("name", Schema::string());
    let err = validate(&Value::Object(vec![]), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::TypeMismatch);
    assert_eq!(err.path, strs(&["name"]));
    assert_eq!(err.message, "Non-optional property is 'undefined'!");
}

#[test]
fn test_shape_honors_its_own_flags() {
    let inner = Schema::shape().property("id", Schema::integer());
    assert_eq!(validate(&Value::Undefined, &inner.clone().optional()), Ok(Value::Undefined));
    assert_eq!(validate(&Value::Null, &inner.clone().nullable()), Ok(Value::Null));

    let err = validate(&Value::Int(1), &inner).unwrap_err();
    assert_eq!(err.kind, FailureKind::ObjectShape);
    assert_eq!(err.message, "Expected '{id: integer}', instead got 'number'!");
}

// ============================================================================
// Range and Length Tests
// ============================================================================

#[test]
fn test_number_range() {
    let schema = Schema::number().min(1.0).max(10.0);
    assert!(validate(&Value::Int(1), &schema).is_ok());
    assert!(validate(&Value::Float(10.0), &schema).is_ok());

    let err = validate(&Value::Int(0), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::Range);
    assert_eq!(err.message, "Invalid number value! Minimal number value is '1', instead got '0'!");

    let err = validate(&Value::Float(10.5), &schema).unwrap_err();
    assert_eq!(
        err.message,
        "Invalid number value! Maximal number value is '10', instead got '10.5'!"
    );
}

#[test]
fn test_string_lengths() {
    let err = validate(&Value::from("ab"), &Schema::string().length(3)).unwrap_err();
    assert_eq!(err.message, "Invalid string length! Expected '3', instead got '2'!");

    let err = validate(&Value::from(""), &Schema::string().non_empty()).unwrap_err();
    assert_eq!(err.message, "Invalid string length! String cannot be empty!");

    let err = validate(&Value::from("abcd"), &Schema::string().max(3.0)).unwrap_err();
    assert_eq!(err.message, "Invalid string length! Maximal string length is '3', instead got '4'!");

    // Characters, not bytes
    assert!(validate(&Value::from("héé"), &Schema::string().length(3)).is_ok());
}

#[test]
fn test_array_lengths() {
    let schema = Schema::of(TypeTag::Array).min(2.0);
    let err = validate(&Value::List(vec![Value::Int(1)]), &schema).unwrap_err();
    assert_eq!(err.message, "Invalid array length! Minimal array length is '2', instead got '1'!");

    let schema = Schema::of(TypeTag::Array).non_empty();
    let err = validate(&Value::List(vec![]), &schema).unwrap_err();
    assert_eq!(err.message, "Invalid array length! Array cannot be empty!");
}

#[test]
fn test_string_pattern() {
    let schema = Schema::string().matches(Regex::new(r"^\d{3}-\d{4}$").unwrap());
    assert!(validate(&Value::from("555-1234"), &schema).is_ok());

    let err = validate(&Value::from("5551234"), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::Pattern);
    assert_eq!(
        err.message,
        r"String '5551234' does not match pattern '/^\d{3}-\d{4}$/'!"
    );
}

// ============================================================================
// Equality, Enumeration and Instance Tests
// ============================================================================

#[test]
fn test_equals() {
    let schema = Schema::string().equals("yes");
    assert!(validate(&Value::from("yes"), &schema).is_ok());

    let err = validate(&Value::from("no"), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::Equality);
    assert_eq!(
        err.message,
        "Invalid property value! Expected value '\"yes\"', instead got '\"no\"'!"
    );

    // Numbers compare by value
    assert!(validate(&Value::Float(1.0), &Schema::number().equals(1)).is_ok());
}

#[test]
fn test_contains() {
    let schema = Schema::number().contains(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    assert!(validate(&Value::Int(2), &schema).is_ok());

    let err = validate(&Value::Int(5), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::Enumeration);
    assert!(err.message.contains("1, 2, 3"));
    assert_eq!(
        err.message,
        "Invalid property value! Expected one of '1, 2, 3', instead got '5'!"
    );
}

#[test]
fn test_contains_preview_is_truncated() {
    let allowed: Vec<Value> = (1..=7).map(Value::from).collect();
    let err = validate(&Value::Int(9), &Schema::number().contains(allowed)).unwrap_err();
    assert!(err.message.contains("'1, 2, 3, 4, 5, ...'"));
}

#[test]
fn test_instance() {
    let date = Value::instance("Date", Vec::<(String, Value)>::new());
    let map = Value::instance("Map", Vec::<(String, Value)>::new());

    let schema = Schema::any().instance("Date");
    assert!(validate(&date, &schema).is_ok());

    let err = validate(&map, &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::InstanceMismatch);
    assert_eq!(err.message, "Invalid property instance! Expected 'Date', instead got 'Map'!");

    let schema = Schema::of(TypeTag::Object).instances(["Date", "Set"]);
    let err = validate(&map, &schema).unwrap_err();
    assert_eq!(
        err.message,
        "Invalid property instance! Expected 'Date | Set', instead got 'Map'!"
    );

    // Plain object literals report their class as Object
    assert!(validate(&Value::Object(vec![]), &Schema::any().instance("Object")).is_ok());
}

// ============================================================================
// Array Tests
// ============================================================================

#[test]
fn test_array_keep_order() {
    let schema = Schema::array(vec![Schema::string(), Schema::number()]).keep_order();
    let ok = Value::List(vec![Value::from("a"), Value::Int(1)]);
    assert_eq!(validate(&ok, &schema), Ok(ok.clone()));

    let bad = Value::List(vec![Value::Int(1), Value::from("a")]);
    let err = validate(&bad, &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::ArrayElement);
    assert_eq!(err.path, strs(&["[0]"]));
    assert_eq!(
        err.message,
        "Invalid type of element in array! Invalid property type! Expected 'string', instead got 'number'!"
    );

    // Extra elements are not checked without keepLength
    let longer = Value::List(vec![Value::from("a"), Value::Int(1), Value::Bool(true)]);
    assert!(validate(&longer, &schema).is_ok());
}

#[test]
fn test_array_keep_length() {
    let schema = Schema::array(vec![Schema::string(), Schema::string()]).keep_length();
    let err = validate(&Value::List(vec![Value::from("a")]), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::ArrayLength);
    assert_eq!(
        err.message,
        "Invalid number of elements in array! Expected '2' items, instead got '1'!"
    );

    let tuple = Schema::array(vec![Schema::string(), Schema::number()])
        .keep_order()
        .keep_length();
    let longer = Value::List(vec![Value::from("a"), Value::Int(1), Value::Bool(true)]);
    assert!(validate(&longer, &tuple).is_err());
}

#[test]
fn test_array_membership() {
    let schema = Schema::array(vec![Schema::string(), Schema::number()]);
    assert!(validate(&Value::List(vec![Value::Int(1), Value::from("a")]), &schema).is_ok());

    let bad = Value::List(vec![Value::from("a"), Value::Int(1), Value::Bool(true)]);
    let err = validate(&bad, &schema).unwrap_err();
    assert_eq!(err.path, strs(&["[2]"]));
    // Last attempted item schema is reported
    assert_eq!(
        err.message,
        "Invalid type of element in array! Invalid property type! Expected 'number', instead got 'boolean'!"
    );
}

#[test]
fn test_array_elements_are_replaced_by_matched_values() {
    let schema = Schema::array(vec![
        Schema::shape().property("flag", Schema::boolean().default_value(false))
    ]);
    let value = Value::List(vec![Value::Object(vec![])]);
    assert_eq!(
        validate(&value, &schema),
        Ok(Value::List(vec![Value::object([("flag", Value::Bool(false))])]))
    );
}

#[test]
fn test_array_without_item_schemas() {
    let schema = Schema::array(vec![]);
    assert!(validate(&Value::List(vec![]), &schema).is_ok());

    let err = validate(&Value::List(vec![Value::Int(1)]), &schema).unwrap_err();
    assert_eq!(err.path, strs(&["[0]"]));
    assert!(err.message.ends_with("No item schemas accept the element!"));
}

// ============================================================================
// Regex-Keyed Property Tests
// ============================================================================

#[test]
fn test_regex_keys_match_every_key() {
    let schema = Schema::shape().property("/^x_/", Schema::number());

    let value = Value::object([("x_a", Value::Int(1)), ("x_b", Value::Int(2))]);
    assert_eq!(validate(&value, &schema), Ok(value.clone()));

    // Undeclared keys are dropped from the matched value
    let value = Value::object([("x_a", Value::Int(1)), ("other", Value::Int(3))]);
    assert_eq!(
        validate(&value, &schema),
        Ok(Value::object([("x_a", Value::Int(1))]))
    );
}

#[test]
fn test_regex_key_failure_path() {
    let schema = Schema::shape().property("/^x_/", Schema::number());
    let err = validate(&Value::object([("x_a", Value::from("s"))]), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::TypeMismatch);
    assert_eq!(err.path, strs(&["x_a"]));
}

#[test]
fn test_regex_key_missing() {
    let schema = Schema::shape().property("/^x_/", Schema::number());
    let err = validate(&Value::Object(vec![]), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::MissingKey);
    assert_eq!(err.path, strs(&["[/^x_/]"]));
    assert_eq!(err.message, "No keys matching pattern '/^x_/' found!");

    let optional = Schema::shape().property("/^x_/", Schema::number().optional());
    assert_eq!(validate(&Value::Object(vec![]), &optional), Ok(Value::Object(vec![])));
}

#[test]
fn test_regex_key_flags() {
    let schema = Schema::shape().property("/^x_/i", Schema::number());
    assert!(validate(&Value::object([("X_a", Value::Int(1))]), &schema).is_ok());
}

#[test]
fn test_invalid_key_pattern() {
    let schema = Schema::shape().property("/(/", Schema::number());
    let err = validate(&Value::object([("a", Value::Int(1))]), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidKeyPattern);
    assert_eq!(err.path, strs(&["[/(/]"]));
}

// ============================================================================
// Alternation Tests
// ============================================================================

#[test]
fn test_union() {
    let schema = Schema::one_of(vec![Schema::string(), Schema::number()]);
    assert_eq!(validate(&Value::from("5"), &schema), Ok(Value::from("5")));
    assert!(validate(&Value::Int(5), &schema).is_ok());

    let err = validate(&Value::Bool(true), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::TypeMismatch);
    assert!(err.message.contains("string | number"));
    assert_eq!(
        err.message,
        "Invalid property type! Expected 'string | number', instead got 'boolean'!"
    );
}

#[test]
fn test_union_flags_and_value_rules() {
    let schema = Schema::one_of(vec![Schema::string(), Schema::number()])
        .optional()
        .contains(vec![Value::from("a"), Value::Int(1)]);

    assert_eq!(validate(&Value::Undefined, &schema), Ok(Value::Undefined));
    assert!(validate(&Value::Int(1), &schema).is_ok());
    assert_eq!(
        validate(&Value::Int(2), &schema).unwrap_err().kind,
        FailureKind::Enumeration
    );
}

#[test]
fn test_union_threads_matched_value() {
    let schema = Schema::one_of(vec![
        Schema::shape().property("kind", Schema::string().default_value("circle")),
        Schema::number(),
    ]);
    assert_eq!(
        validate(&Value::Object(vec![]), &schema),
        Ok(Value::object([("kind", Value::from("circle"))]))
    );
}

// ============================================================================
// Nested Shape Tests
// ============================================================================

#[test]
fn test_failure_path_follows_nesting() {
    let schema = Schema::shape().property(
        "a",
        Schema::shape().property(
            "b",
            Schema::array(vec![Schema::shape().property("c", Schema::string())]),
        ),
    );
    let value = Value::object([(
        "a",
        Value::object([(
            "b",
            Value::List(vec![
                Value::object([("c", Value::from("ok"))]),
                Value::object([("c", Value::Int(1))]),
            ]),
        )]),
    )]);

    let err = validate(&value, &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::ArrayElement);
    assert_eq!(err.path, strs(&["a", "b", "[1]", "c"]));
    assert_eq!(err.path_string(), "a.b.[1].c");
}

#[test]
fn test_tagged_node_with_nested_shape() {
    let schema = Schema::of(TypeTag::Object).property("id", Schema::integer());

    let value = Value::object([("id", Value::Int(1)), ("extra", Value::Bool(true))]);
    assert_eq!(validate(&value, &schema), Ok(Value::object([("id", Value::Int(1))])));

    let err = validate(&Value::object([("id", Value::from("x"))]), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::ObjectShape);
    assert_eq!(err.path, strs(&["id"]));
    assert_eq!(
        err.message,
        "Object does not match the schema! Invalid property type! Expected 'integer', instead got 'string'!"
    );

    // Lists satisfy the object tag but have no keys
    let err = validate(&Value::List(vec![Value::Int(1)]), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::ObjectShape);
    assert_eq!(
        err.message,
        "Object does not match the schema! Expected '{id: integer}', instead got '[number]'!"
    );
}

#[test]
fn test_instances_validate_like_objects() {
    let schema = Schema::shape().property("x", Schema::number());
    let point = Value::instance("Point", [("x", Value::Int(1)), ("y", Value::Int(2))]);
    assert_eq!(
        validate(&point, &schema),
        Ok(Value::instance("Point", [("x", Value::Int(1))]))
    );
}

// ============================================================================
// Custom Validator Tests
// ============================================================================

#[test]
fn test_custom_validator_replaces_matched() {
    let schema = Schema::shape().property(
        "code",
        Schema::string().validator(|value: &Value, _schema: &Schema| match value {
            Value::String(s) if s.len() == 3 => Ok(Value::from(s.to_uppercase())),
            _ => custom_failure("Code must have three characters!"),
        }),
    );

    assert_eq!(
        validate(&Value::object([("code", Value::from("abc"))]), &schema),
        Ok(Value::object([("code", Value::from("ABC"))]))
    );

    let err = validate(&Value::object([("code", Value::from("ab"))]), &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::Custom);
    assert_eq!(err.message, "Code must have three characters!");
    assert_eq!(err.path, strs(&["code"]));
}

#[test]
fn test_shape_applies_value_rules() {
    let rejecting = Schema::shape()
        .property("a", Schema::any())
        .validator(|_: &Value, _: &Schema| custom_failure("rejected"));
    let err = validate(&Value::object([("a", Value::Int(1))]), &rejecting).unwrap_err();
    assert_eq!(err.kind, FailureKind::Custom);
    assert_eq!(err.message, "rejected");

    // Equality is checked against the rebuilt mapping
    let exact = Schema::shape()
        .property("a", Schema::any())
        .equals(Value::object([("a", Value::Int(1))]));
    let value = Value::object([("a", Value::Int(1)), ("b", Value::Int(2))]);
    assert_eq!(validate(&value, &exact), Ok(Value::object([("a", Value::Int(1))])));
    assert_eq!(
        validate(&Value::object([("a", Value::Int(2))]), &exact).unwrap_err().kind,
        FailureKind::Equality
    );

    let allowed = Schema::shape()
        .property("a", Schema::any())
        .contains(vec![Value::object([("a", Value::Int(1))])]);
    assert_eq!(
        validate(&Value::object([("a", Value::Int(5))]), &allowed).unwrap_err().kind,
        FailureKind::Enumeration
    );
}

#[test]
fn test_custom_validator_runs_after_builtin_checks() {
    let schema = Schema::integer().validator(|_: &Value, _: &Schema| Ok(Value::Int(0)));
    assert_eq!(
        validate(&Value::from("x"), &schema).unwrap_err().kind,
        FailureKind::TypeMismatch
    );
    assert_eq!(validate(&Value::Int(9), &schema), Ok(Value::Int(0)));
}

// ============================================================================
// Engine Properties
// ============================================================================

fn profile_schema() -> Schema {
    Schema::shape()
        .property("id", Schema::integer().min(1.0))
        .property("name", Schema::string().non_empty())
        .property("tags", Schema::array(vec![Schema::string()]).default_value(Value::List(vec![])))
        .property("/^meta_/", Schema::one_of(vec![Schema::string(), Schema::number()]).optional())
}

#[test]
fn test_determinism() {
    let schema = profile_schema();
    let good = Value::object([
        ("id", Value::Int(1)),
        ("name", Value::from("ada")),
        ("meta_a", Value::Int(3)),
    ]);
    let bad = Value::object([("id", Value::Int(0)), ("name", Value::from("ada"))]);

    assert_eq!(validate(&good, &schema), validate(&good, &schema));
    assert_eq!(validate(&bad, &schema), validate(&bad, &schema));
}

#[test]
fn test_idempotence() {
    let schema = profile_schema();
    let value = Value::object([
        ("id", Value::Int(1)),
        ("name", Value::from("ada")),
        ("meta_a", Value::Int(3)),
        ("ignored", Value::Null),
    ]);

    let matched = validate(&value, &schema).unwrap();
    assert_eq!(validate(&matched, &schema), Ok(matched.clone()));
    assert_eq!(matched.get("tags"), Some(&Value::List(vec![])));
    assert_eq!(matched.get("ignored"), None);
}

#[test]
fn test_idempotence_through_nested_shape() {
    let schema = Schema::of(TypeTag::Object)
        .property("id", Schema::integer())
        .property("tags", Schema::array(vec![Schema::string()]).default_value(Value::List(vec![])));
    let value = Value::object([("id", Value::Int(1)), ("extra", Value::Bool(true))]);

    let matched = validate(&value, &schema).unwrap();
    assert_eq!(
        matched,
        Value::object([("id", Value::Int(1)), ("tags", Value::List(vec![]))])
    );
    assert_eq!(validate(&matched, &schema), Ok(matched.clone()));
}

#[test]
fn test_idempotence_keeps_instance_class() {
    let schema = Schema::of(TypeTag::Object)
        .instance("Point")
        .property("x", Schema::number());
    let point = Value::instance("Point", [("x", Value::Int(1)), ("y", Value::Int(2))]);

    let matched = validate(&point, &schema).unwrap();
    assert_eq!(matched, Value::instance("Point", [("x", Value::Int(1))]));
    assert_eq!(validate(&matched, &schema), Ok(matched.clone()));
}

#[test]
fn test_idempotence_through_alternation() {
    let schema = Schema::one_of(vec![
        Schema::shape().property("kind", Schema::string().default_value("circle")),
        Schema::number(),
    ]);

    let matched = validate(&Value::Object(vec![]), &schema).unwrap();
    assert_eq!(validate(&matched, &schema), Ok(matched.clone()));

    let matched = validate(&Value::Int(4), &schema).unwrap();
    assert_eq!(validate(&matched, &schema), Ok(matched.clone()));
}

#[test]
fn test_validator_with_config() {
    let mut schema = Schema::integer();
    for _ in 0..3 {
        schema = Schema::shape().property("inner", schema);
    }
    let mut value = Value::Int(1);
    for _ in 0..3 {
        value = Value::object([("inner", value)]);
    }

    assert!(Validator::new().validate(&value, &schema).is_ok());

    let validator = Validator::with_config(ValidatorConfig::new().max_depth(2));
    let err = validator.validate(&value, &schema).unwrap_err();
    assert_eq!(err.kind, FailureKind::DepthExceeded);
    assert_eq!(err.path, strs(&["inner", "inner", "inner"]));
}
