//! Basic Validation Example
//!
//! This example demonstrates schema validation using ouroboros-schema.
//!
//! Run with:
//! ```bash
//! cargo run -p ouroboros-schema --example basic_validation
//! ```

use ouroboros_schema::{
    custom_failure, format_schema, validate, Schema, TypeTag, ValidationResult, Value,
};

// ============================================================================
// Type Tags and Flags
// ============================================================================

fn validate_primitives() {
    println!("1. Type Tags and Flags");
    println!("----------------------");

    let string_type = Schema::string();
    report("String 'Hello, World!'", &validate(&Value::from("Hello, World!"), &string_type));
    report("Int 42 as string", &validate(&Value::Int(42), &string_type));

    let integer_type = Schema::integer();
    report("Float 3.0 as integer", &validate(&Value::Float(3.0), &integer_type));
    report("Float 3.5 as integer", &validate(&Value::Float(3.5), &integer_type));

    let nullable = Schema::string().nullable();
    report("null as string | null", &validate(&Value::Null, &nullable));
    report("undefined as string | null", &validate(&Value::Undefined, &nullable));
    println!();
}

// ============================================================================
// Ranges, Lengths and Enumerations
// ============================================================================

fn validate_constraints() {
    println!("2. Constraints");
    println!("--------------");

    let age = Schema::integer().min(0.0).max(150.0);
    for n in [25, -1, 200] {
        report(&format!("Age {}", n), &validate(&Value::from(n), &age));
    }

    let username = Schema::string().non_empty().max(8.0);
    for name in ["ada", "", "averyverylongname"] {
        report(&format!("Username '{}'", name), &validate(&Value::from(name), &username));
    }

    let level = Schema::string().contains(vec![
        Value::from("debug"),
        Value::from("info"),
        Value::from("warn"),
    ]);
    report("Level 'trace'", &validate(&Value::from("trace"), &level));
    println!();
}

// ============================================================================
// Objects, Arrays and Unions
// ============================================================================

fn validate_objects() {
    println!("3. Object Shapes");
    println!("----------------");

    let even = Schema::integer().validator(|value: &Value, _schema: &Schema| match value {
        Value::Int(n) if n % 2 == 0 => Ok(value.clone()),
        _ => custom_failure("Expected an even number!"),
    });

    let user = Schema::shape()
        .property("name", Schema::string().non_empty())
        .property("role", Schema::string().default_value("member"))
        .property("scores", Schema::array(vec![Schema::number()]))
        .property("/^x_/", Schema::one_of(vec![Schema::string(), Schema::number()]).optional())
        .property("lucky", even.optional())
        .property("meta", Schema::of(TypeTag::Object).nullable().optional());

    println!("  Type: {}", format_schema(&user));

    let valid = Value::object([
        ("name", Value::from("ada")),
        ("scores", Value::List(vec![Value::Int(9), Value::Float(7.5)])),
        ("x_team", Value::from("core")),
    ]);
    report("Valid user", &validate(&valid, &user));

    let invalid = Value::object([
        ("name", Value::from("ada")),
        ("scores", Value::List(vec![Value::Int(9), Value::from("high")])),
    ]);
    report("Bad score", &validate(&invalid, &user));

    let odd = Value::object([
        ("name", Value::from("ada")),
        ("scores", Value::List(vec![])),
        ("lucky", Value::Int(7)),
    ]);
    report("Odd lucky number", &validate(&odd, &user));
    println!();
}

// ============================================================================
// Helper Functions
// ============================================================================

fn report(label: &str, result: &ValidationResult) {
    match result {
        Ok(matched) => println!("  {}: OK {:?}", label, matched),
        Err(failure) if failure.path.is_empty() => {
            println!("  {}: INVALID {}", label, failure)
        }
        Err(failure) => println!(
            "  {}: INVALID at {}: {}",
            label,
            failure.path_string(),
            failure
        ),
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    println!("Basic Validation Example");
    println!("========================\n");

    validate_primitives();
    validate_constraints();
    validate_objects();

    println!("Summary:");
    println!("  - Build a Schema tree with the builder methods");
    println!("  - Use Value to represent runtime data");
    println!("  - validate() returns Ok(matched) or Err(ValidationFailure)");
    println!("  - format_schema() renders a schema as a type expression");
}
