use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::expression::Expression;
use crate::guess::relative_difference;
use crate::parse_function;
use crate::serialization::{SerializationError, marshal, marshal_pretty, unmarshal};

fn x() -> Expression {
    Expression::Variable
}

fn num(value: f64) -> Expression {
    Expression::Number(value)
}

fn saved_functions() -> Vec<Expression> {
    vec![
        Expression::add(x(), num(10.0)),
        Expression::add(x(), num(1.0)),
        Expression::subtract(x(), num(31.0)),
        Expression::subtract(x(), num(9.0)),
        Expression::add(x(), Expression::add(num(13.0), num(3.0))),
        Expression::add(num(12.0), Expression::subtract(x(), num(2.0))),
        Expression::add(
            Expression::subtract(x(), num(210.0)),
            Expression::add(x(), num(1.0)),
        ),
        Expression::add(Expression::multiply(num(3.0), x()), num(2.0)),
        Expression::subtract(Expression::multiply(num(10.0), x()), num(9.0)),
        Expression::add(Expression::multiply(num(-10.0), x()), num(3.0)),
        Expression::add(Expression::multiply(x(), num(-5.0)), num(10.0)),
        Expression::add(num(-1.0), Expression::multiply(num(7.0), x())),
        num(-1.0),
        Expression::add(num(1.0), Expression::multiply(num(-1.0), x())),
        Expression::divide(
            Expression::power(x(), Expression::divide(num(12.0), num(0.8))),
            Expression::subtract(x(), num(2.0 / 7.0)),
        ),
    ]
}

#[test]
fn test_round_trip_preserves_shape() {
    for expr in saved_functions() {
        let bytes = marshal(&expr);
        assert!(bytes.is_ok(), "failed to marshal {}", expr);
        if let Ok(bytes) = bytes {
            let loaded = unmarshal(&bytes);
            assert!(loaded.is_ok(), "failed to unmarshal {}", expr);
            if let Ok(loaded) = loaded {
                assert!(loaded.same_shape(&expr), "{:?} != {:?}", loaded, expr);
            }
        }
    }
}

#[test]
fn test_round_trip_preserves_values() {
    let mut rng = StdRng::seed_from_u64(42);
    for expr in saved_functions() {
        let loaded = marshal(&expr).and_then(|bytes| unmarshal(&bytes));
        assert!(loaded.is_ok());
        if let Ok(loaded) = loaded {
            for _ in 0..128 {
                let x = rng.gen_range(-1000.0..1000.0);
                let diff = relative_difference(loaded.eval(x), expr.eval(x));
                assert!(diff <= 1e-5, "{} differs at x={}", expr, x);
            }
        }
    }
}

#[test]
fn test_round_trip_exact_literal_bits() {
    let literals = [0.1, 1.02020201111, 2.0 / 7.0, -0.0, f64::MIN_POSITIVE, 1e300];
    for value in literals {
        let loaded = marshal(&num(value)).and_then(|bytes| unmarshal(&bytes));
        assert!(matches!(loaded, Ok(Expression::Number(v)) if v.to_bits() == value.to_bits()));
    }
}

#[test]
fn test_round_trip_parsed_definitions() {
    let definitions = [
        "(2 / 7)*x^(4 * 3 / 0.8) + 3*x^2 + 4*x^1 + 5*x^0",
        "x*(-5+(1-(-(2))+3)+1-(11*10-(12))+10)+12+-3.13*(3.1222)",
        "x^3^2",
    ];
    for definition in definitions {
        let parsed = parse_function(definition);
        assert!(parsed.is_ok());
        if let Ok(expr) = parsed {
            let loaded = marshal(&expr).and_then(|bytes| unmarshal(&bytes));
            assert!(matches!(loaded, Ok(ref e) if e.same_shape(&expr)));
        }
    }
}

#[test]
fn test_wire_format_only_writes_relevant_fields() {
    let expr = Expression::add(x(), num(10.0));
    let bytes = marshal(&expr).unwrap_or_default();
    assert_eq!(
        String::from_utf8_lossy(&bytes),
        r#"{"type":"Add","left":{"type":"Variable"},"right":{"type":"Number","value":10.0}}"#
    );

    let expr = Expression::power(x(), num(2.0));
    let bytes = marshal(&expr).unwrap_or_default();
    assert_eq!(
        String::from_utf8_lossy(&bytes),
        r#"{"type":"Power","base":{"type":"Variable"},"exponent":{"type":"Number","value":2.0}}"#
    );
}

#[test]
fn test_unmarshal_accepts_integer_values() {
    let loaded = unmarshal(br#"{"type":"Subtract","left":{"type":"Variable"},"right":{"type":"Number","value":31}}"#);
    assert_eq!(loaded, Ok(Expression::subtract(x(), num(31.0))));
}

#[test]
fn test_unmarshal_unknown_tag() {
    assert_eq!(
        unmarshal(br#"{"type":"Modulo","left":{"type":"Variable"},"right":{"type":"Variable"}}"#),
        Err(SerializationError::UnknownTag("Modulo".to_string()))
    );
    assert_eq!(
        unmarshal(br#"{"type":"Add","left":{"type":"variable"},"right":{"type":"Variable"}}"#),
        Err(SerializationError::UnknownTag("variable".to_string()))
    );
}

#[test]
fn test_unmarshal_malformed_number() {
    assert!(matches!(
        unmarshal(br#"{"type":"Number","value":"ten"}"#),
        Err(SerializationError::Json(_))
    ));
    assert_eq!(
        unmarshal(br#"{"type":"Number"}"#),
        Err(SerializationError::MissingField {
            kind: "Number".to_string(),
            field: "value"
        })
    );
}

#[test]
fn test_unmarshal_missing_child() {
    assert_eq!(
        unmarshal(br#"{"type":"Power","base":{"type":"Variable"}}"#),
        Err(SerializationError::MissingField {
            kind: "Power".to_string(),
            field: "exponent"
        })
    );
    assert_eq!(
        unmarshal(br#"{"type":"Divide","base":{"type":"Variable"},"exponent":{"type":"Variable"}}"#),
        Err(SerializationError::MissingField {
            kind: "Divide".to_string(),
            field: "left"
        })
    );
}

#[test]
fn test_unmarshal_invalid_json() {
    assert!(matches!(unmarshal(b"not json"), Err(SerializationError::Json(_))));
    assert!(matches!(unmarshal(b""), Err(SerializationError::Json(_))));
    assert!(matches!(unmarshal(br#"{"value":1}"#), Err(SerializationError::Json(_))));
}

#[test]
fn test_marshal_rejects_non_finite_literals() {
    let expr = Expression::add(x(), num(f64::INFINITY));
    assert!(matches!(
        marshal(&expr),
        Err(SerializationError::NonFiniteLiteral(v)) if v.is_infinite()
    ));
    assert!(matches!(
        marshal(&num(f64::NAN)),
        Err(SerializationError::NonFiniteLiteral(_))
    ));
}

#[test]
fn test_deep_parsed_trees_round_trip() {
    let definitions = [vec!["x"; 256].join("+"), format!("{}x", "-".repeat(511))];
    for definition in definitions {
        let expr = parse_function(&definition);
        assert!(expr.is_ok(), "{:?}", expr);
        let Ok(expr) = expr else { continue };

        let back = marshal(&expr).and_then(|bytes| unmarshal(&bytes));
        assert!(
            matches!(back, Ok(ref e) if e.same_shape(&expr)),
            "{} did not round trip: {:?}",
            definition,
            back.err()
        );
    }
}

#[test]
fn test_unmarshal_excessive_nesting_is_an_error() {
    let levels = 1100;
    let mut json = r#"{"type":"Subtract","left":{"type":"Variable"},"right":"#.repeat(levels);
    json.push_str(r#"{"type":"Variable"}"#);
    json.push_str(&"}".repeat(levels));

    assert_eq!(
        unmarshal(json.as_bytes()),
        Err(SerializationError::TooDeep { limit: 1024 })
    );
}

#[test]
fn test_serde_embedding_uses_same_shape() {
    let expr = Expression::multiply(num(3.0), x());
    let embedded = serde_json::to_string(&vec![expr.clone()]).unwrap_or_default();
    assert_eq!(
        embedded,
        r#"[{"type":"Multiply","left":{"type":"Number","value":3.0},"right":{"type":"Variable"}}]"#
    );

    let back: Result<Vec<Expression>, _> = serde_json::from_str(&embedded);
    assert!(matches!(back, Ok(ref v) if v.len() == 1 && v[0].same_shape(&expr)));

    let bad: Result<Expression, _> = serde_json::from_str(r#"{"type":"Nope"}"#);
    assert!(bad.is_err());
}

#[test]
fn test_marshal_pretty_is_equivalent() {
    let expr = Expression::power(x(), num(2.0));
    let pretty = marshal_pretty(&expr);
    assert!(pretty.is_ok());
    if let Ok(pretty) = pretty {
        assert!(pretty.contains('\n'));
        let loaded = unmarshal(pretty.as_bytes());
        assert!(matches!(loaded, Ok(ref e) if e.same_shape(&expr)));
    }
}
