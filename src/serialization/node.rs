use log::warn;
use serde::{Deserialize, Serialize};

use crate::expression::Expression;
use crate::serialization::errors::SerializationError;

/// The tagged record an expression is stored as.
///
/// Only the fields that belong to `kind` are written; `Variable` carries
/// nothing but its tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<ExpressionNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<ExpressionNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<Box<ExpressionNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exponent: Option<Box<ExpressionNode>>,
}

impl ExpressionNode {
    fn tag(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            value: None,
            left: None,
            right: None,
            base: None,
            exponent: None,
        }
    }

    fn binary(kind: &str, left: &Expression, right: &Expression) -> Result<Self, SerializationError> {
        Ok(Self {
            left: Some(Box::new(Self::try_from(left)?)),
            right: Some(Box::new(Self::try_from(right)?)),
            ..Self::tag(kind)
        })
    }
}

fn child(
    kind: &str,
    field: &'static str,
    node: Option<Box<ExpressionNode>>,
) -> Result<Box<Expression>, SerializationError> {
    match node {
        Some(node) => Ok(Box::new(Expression::try_from(*node)?)),
        None => Err(missing(kind, field)),
    }
}

fn missing(kind: &str, field: &'static str) -> SerializationError {
    warn!("'{}' node is missing field '{}'", kind, field);
    SerializationError::MissingField {
        kind: kind.to_string(),
        field,
    }
}

impl TryFrom<&Expression> for ExpressionNode {
    type Error = SerializationError;

    fn try_from(expr: &Expression) -> Result<Self, Self::Error> {
        let kind = expr.kind();
        match expr {
            Expression::Number(n) => {
                if !n.is_finite() {
                    warn!("Refusing to serialize non-finite literal {}", n);
                    return Err(SerializationError::NonFiniteLiteral(*n));
                }
                Ok(Self {
                    value: Some(*n),
                    ..Self::tag(kind)
                })
            }
            Expression::Variable => Ok(Self::tag(kind)),
            Expression::Add(l, r)
            | Expression::Subtract(l, r)
            | Expression::Multiply(l, r)
            | Expression::Divide(l, r) => Self::binary(kind, l, r),
            Expression::Power(base, exponent) => Ok(Self {
                base: Some(Box::new(Self::try_from(base.as_ref())?)),
                exponent: Some(Box::new(Self::try_from(exponent.as_ref())?)),
                ..Self::tag(kind)
            }),
        }
    }
}

impl TryFrom<ExpressionNode> for Expression {
    type Error = SerializationError;

    fn try_from(node: ExpressionNode) -> Result<Self, Self::Error> {
        let ExpressionNode {
            kind,
            value,
            left,
            right,
            base,
            exponent,
        } = node;

        match kind.as_str() {
            "Number" => value
                .map(Expression::Number)
                .ok_or_else(|| missing(&kind, "value")),
            "Variable" => Ok(Expression::Variable),
            "Add" => Ok(Expression::Add(
                child(&kind, "left", left)?,
                child(&kind, "right", right)?,
            )),
            "Subtract" => Ok(Expression::Subtract(
                child(&kind, "left", left)?,
                child(&kind, "right", right)?,
            )),
            "Multiply" => Ok(Expression::Multiply(
                child(&kind, "left", left)?,
                child(&kind, "right", right)?,
            )),
            "Divide" => Ok(Expression::Divide(
                child(&kind, "left", left)?,
                child(&kind, "right", right)?,
            )),
            "Power" => Ok(Expression::Power(
                child(&kind, "base", base)?,
                child(&kind, "exponent", exponent)?,
            )),
            _ => {
                warn!("Unknown expression type '{}'", kind);
                Err(SerializationError::UnknownTag(kind))
            }
        }
    }
}

impl Serialize for Expression {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ExpressionNode::try_from(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let node = ExpressionNode::deserialize(deserializer)?;
        Expression::try_from(node).map_err(serde::de::Error::custom)
    }
}
