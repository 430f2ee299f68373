/// A parsed single-variable arithmetic function
///
/// Every binary node owns its children, so a tree is never shared or cyclic
/// and can be serialized and rebuilt without losing its shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    Variable,
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Power(Box<Expression>, Box<Expression>), // Power(base, exponent)
}

impl Expression {
    pub fn add(left: Expression, right: Expression) -> Self {
        Expression::Add(Box::new(left), Box::new(right))
    }

    pub fn subtract(left: Expression, right: Expression) -> Self {
        Expression::Subtract(Box::new(left), Box::new(right))
    }

    pub fn multiply(left: Expression, right: Expression) -> Self {
        Expression::Multiply(Box::new(left), Box::new(right))
    }

    pub fn divide(left: Expression, right: Expression) -> Self {
        Expression::Divide(Box::new(left), Box::new(right))
    }

    pub fn power(base: Expression, exponent: Expression) -> Self {
        Expression::Power(Box::new(base), Box::new(exponent))
    }

    /// Name of the variant, as written in the serialized form
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Number(_) => "Number",
            Expression::Variable => "Variable",
            Expression::Add(_, _) => "Add",
            Expression::Subtract(_, _) => "Subtract",
            Expression::Multiply(_, _) => "Multiply",
            Expression::Divide(_, _) => "Divide",
            Expression::Power(_, _) => "Power",
        }
    }

    /// Number of edges on the longest path from this node to a leaf
    pub fn depth(&self) -> usize {
        match self {
            Expression::Number(_) | Expression::Variable => 0,
            Expression::Add(l, r)
            | Expression::Subtract(l, r)
            | Expression::Multiply(l, r)
            | Expression::Divide(l, r)
            | Expression::Power(l, r) => 1 + l.depth().max(r.depth()),
        }
    }

    /// Structural equality that compares literals bit-for-bit, so `NaN`
    /// literals match themselves and `0.0` differs from `-0.0`.
    pub fn same_shape(&self, other: &Expression) -> bool {
        match (self, other) {
            (Expression::Number(a), Expression::Number(b)) => a.to_bits() == b.to_bits(),
            (Expression::Variable, Expression::Variable) => true,
            (Expression::Add(l1, r1), Expression::Add(l2, r2))
            | (Expression::Subtract(l1, r1), Expression::Subtract(l2, r2))
            | (Expression::Multiply(l1, r1), Expression::Multiply(l2, r2))
            | (Expression::Divide(l1, r1), Expression::Divide(l2, r2))
            | (Expression::Power(l1, r1), Expression::Power(l2, r2)) => {
                l1.same_shape(l2) && r1.same_shape(r2)
            }
            _ => false,
        }
    }
}
