use std::fmt;

use crate::expression::ast::Expression;

/// Infix form with only the parentheses the parser needs to rebuild an
/// equivalent tree.
///
/// Hand-built NaN or infinite literals render as `NaN` and `inf`, which do
/// not parse back. The parser never produces such literals.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn precedence(expr: &Expression) -> u8 {
            match expr {
                Expression::Add(_, _) | Expression::Subtract(_, _) => 1,
                Expression::Multiply(_, _) | Expression::Divide(_, _) => 2,
                Expression::Power(_, _) => 3,
                Expression::Number(_) | Expression::Variable => 4,
            }
        }

        fn is_minus_one(expr: &Expression) -> bool {
            matches!(expr, Expression::Number(n) if *n == -1.0)
        }

        fn write_with_parens(
            f: &mut fmt::Formatter,
            expr: &Expression,
            need_parens: bool,
        ) -> fmt::Result {
            if need_parens {
                write!(f, "(")?;
                fmt_expression(f, expr)?;
                write!(f, ")")
            } else {
                fmt_expression(f, expr)
            }
        }

        // Every operator level associates to the left, so a child of the same
        // level only needs parentheses on the right. Powers nested in powers
        // are always wrapped to keep the grouping readable.
        fn write_binary(
            f: &mut fmt::Formatter,
            op: &str,
            level: u8,
            l: &Expression,
            r: &Expression,
        ) -> fmt::Result {
            let need_l = if level == 3 {
                precedence(l) <= level
            } else {
                precedence(l) < level
            };
            let need_r = precedence(r) <= level;
            write_with_parens(f, l, need_l)?;
            write!(f, " {} ", op)?;
            write_with_parens(f, r, need_r)
        }

        fn fmt_expression(f: &mut fmt::Formatter, expr: &Expression) -> fmt::Result {
            match expr {
                Expression::Number(n) => write!(f, "{}", n),
                Expression::Variable => write!(f, "x"),
                Expression::Add(l, r) => write_binary(f, "+", 1, l, r),
                Expression::Subtract(l, r) => write_binary(f, "-", 1, l, r),
                Expression::Multiply(l, r) => {
                    // Leading unary minus is parsed as -1 * operand
                    if is_minus_one(l) {
                        let need = !matches!(r.as_ref(), Expression::Number(_) | Expression::Variable);
                        write!(f, "-")?;
                        return write_with_parens(f, r, need);
                    }
                    write_binary(f, "*", 2, l, r)
                }
                Expression::Divide(l, r) => write_binary(f, "/", 2, l, r),
                Expression::Power(base, exponent) => write_binary(f, "^", 3, base, exponent),
            }
        }

        fmt_expression(f, self)
    }
}
