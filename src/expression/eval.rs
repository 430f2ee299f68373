use log::trace;

use crate::expression::ast::Expression;

impl Expression {
    /// Evaluates the function at `x`.
    ///
    /// Never fails: division by zero gives an IEEE infinity or NaN, and a
    /// negative base with a fractional exponent gives NaN, exactly as
    /// [`f64::powf`] does.
    pub fn eval(&self, x: f64) -> f64 {
        let result = match self {
            Expression::Number(n) => *n,
            Expression::Variable => x,
            Expression::Add(l, r) => l.eval(x) + r.eval(x),
            Expression::Subtract(l, r) => l.eval(x) - r.eval(x),
            Expression::Multiply(l, r) => l.eval(x) * r.eval(x),
            Expression::Divide(l, r) => l.eval(x) / r.eval(x),
            Expression::Power(base, exponent) => base.eval(x).powf(exponent.eval(x)),
        };

        trace!("{} at x={} evaluated to {}", self.kind(), x, result);
        result
    }
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::Expression;

    #[test]
    fn test_eval_leaves() {
        assert_eq!(Expression::Number(4.5).eval(100.0), 4.5);
        assert_eq!(Expression::Variable.eval(-3.0), -3.0);
    }

    #[test]
    fn test_eval_negative_zero_divisor() {
        let expr = Expression::divide(Expression::Number(1.0), Expression::Number(-0.0));
        assert_eq!(expr.eval(0.0), f64::NEG_INFINITY);
    }
}
