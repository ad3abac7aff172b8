//! Indented, pre-order description of an expression tree.
//!
//! Used by the REPL to show how an input was understood, and by tests to pin
//! down the exact shape of a parsed tree. Rendering only reads the tree, so
//! the same tree always renders to the same lines.

use crate::ast::Expression;

const INDENT: &str = "  ";

/// Renders `ast` starting at `prefix`, one entry per output line.
pub fn render(ast: &Expression, prefix: &str) -> Vec<String> {
    let mut printer = TreePrinter::default();
    printer.visit(ast, prefix);
    printer.into_lines()
}

/// Line sink for a single rendering pass.
#[derive(Debug, Default)]
pub struct TreePrinter {
    lines: Vec<String>,
}

impl TreePrinter {
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn add_line(&mut self, prefix: &str, line: impl AsRef<str>) {
        self.lines.push(format!("{}{}", prefix, line.as_ref()));
    }

    pub fn visit(&mut self, node: &Expression, prefix: &str) {
        let child_prefix = format!("{}{}", prefix, INDENT);

        match node {
            Expression::Root(body) => {
                self.add_line(
                    prefix,
                    format!("This expression is a {} expression type", node.kind()),
                );
                self.add_line(prefix, "The name of the lambda is <<anonymous>>");
                self.add_line(prefix, "The return type is f64");
                self.add_line(prefix, "The expression has 0 argument(s).");
                self.add_line(prefix, "The expression body is:");
                self.visit(body, &child_prefix);
            }
            Expression::BinaryOperation { left, right, .. } => {
                self.add_line(prefix, format!("Binary {} expression", node.kind()));
                self.add_line(
                    prefix,
                    format!("'{}'  [{}({}, {})]", node, node.kind(), left, right),
                );
                self.add_line(prefix, "Left argument is:");
                self.visit(left, &child_prefix);
                self.add_line(prefix, "Right argument is:");
                self.visit(right, &child_prefix);
            }
            Expression::Negate(operand) => {
                self.add_line(prefix, format!("Unary {} expression", node.kind()));
                self.add_line(
                    prefix,
                    format!("'{}'  [{}({})]", node, node.kind(), operand),
                );
                self.add_line(prefix, "Argument is:");
                self.visit(operand, &child_prefix);
            }
            Expression::FunctionCall { function, args } => {
                self.add_line(prefix, format!("This is a {} expression type", node.kind()));
                self.add_line(prefix, format!("The method name is {}", function.name));
                self.add_line(prefix, "The parameters are:");
                for (i, (arg, param)) in args.iter().zip(function.params).enumerate() {
                    self.add_line(prefix, format!("{}{}: {}: f64 {}", INDENT, i, arg, param));
                    self.visit(arg, &child_prefix);
                }
            }
            Expression::Number(value) => {
                self.add_line(prefix, format!("{} : f64 = {}", node.kind(), value));
            }
            Expression::NamedConstant { name, .. } => {
                self.add_line(prefix, format!("{} : f64 = {}", node.kind(), name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Parser;

    fn render_input(input: &str) -> Vec<String> {
        render(&Parser::parse_expression(input).unwrap(), "")
    }

    #[test]
    fn test_render_number() {
        assert_eq!(
            render_input("1"),
            vec![
                "This expression is a Lambda expression type",
                "The name of the lambda is <<anonymous>>",
                "The return type is f64",
                "The expression has 0 argument(s).",
                "The expression body is:",
                "  Constant : f64 = 1",
            ]
        );
    }

    #[test]
    fn test_render_binary_operation() {
        let lines = render_input("1 + PI");
        assert_eq!(
            &lines[5..],
            &[
                "  Binary Add expression",
                "  '(1 + PI)'  [Add(1, PI)]",
                "  Left argument is:",
                "    Constant : f64 = 1",
                "  Right argument is:",
                "    MemberAccess : f64 = PI",
            ]
        );
    }

    #[test]
    fn test_render_negate() {
        let lines = render(&Parser::parse_expression("-2.5").unwrap(), "> ");
        assert_eq!(
            &lines[5..],
            &[
                ">   Unary Negate expression",
                ">   '-2.5'  [Negate(2.5)]",
                ">   Argument is:",
                ">     Constant : f64 = 2.5",
            ]
        );
        assert!(lines.iter().all(|line| line.starts_with("> ")));
    }

    #[test]
    fn test_render_function_call() {
        let lines = render_input("Atan2(1, Tau)");
        assert_eq!(
            &lines[5..],
            &[
                "  This is a Call expression type",
                "  The method name is Atan2",
                "  The parameters are:",
                "    0: 1: f64 y",
                "    Constant : f64 = 1",
                "    1: Tau: f64 x",
                "    MemberAccess : f64 = Tau",
            ]
        );
    }

    #[test]
    fn test_render_nested_tree_is_pre_order() {
        let lines = render_input("2^3^2");
        assert_eq!(
            &lines[5..],
            &[
                "  Binary Power expression",
                "  '(2 ^ (3 ^ 2))'  [Power(2, (3 ^ 2))]",
                "  Left argument is:",
                "    Constant : f64 = 2",
                "  Right argument is:",
                "    Binary Power expression",
                "    '(3 ^ 2)'  [Power(3, 2)]",
                "    Left argument is:",
                "      Constant : f64 = 3",
                "    Right argument is:",
                "      Constant : f64 = 2",
            ]
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let ast = Parser::parse_expression("Max(-Sin(PI/2), 10 % 3) * (1 - E)").unwrap();
        let first = render(&ast, "> ");
        let second = render(&ast, "> ");
        assert_eq!(first, second);
        assert_eq!(first.len(), 39);
    }

    #[test]
    fn test_render_subtree_without_root() {
        let lines = render(&Expression::Number(4.0), "");
        assert_eq!(lines, vec!["Constant : f64 = 4"]);
    }
}
