use crate::ast::{Expression, Operator, ParseError};
use crate::registry::registry;
use log::debug;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "ast/expression.pest"]
pub struct ExpressionParser;

/// Deepest tree the parser builds. Evaluation, compilation and dropping all
/// recurse once per level, so flat operator chains are capped here too.
pub const MAX_DEPTH: usize = 1024;

/// A built node together with the height of its tree.
type Subtree = (Expression, usize);

impl ExpressionParser {
    /// Parses `input` into a tree rooted at [`Expression::Root`].
    ///
    /// Function names and constants are resolved against the registry while
    /// the tree is built, so a returned tree never contains unknown names.
    pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
        debug!("Parsing expression: {}", input);
        let parse_result = ExpressionParser::parse(Rule::expression, input)
            .map_err(|e| ParseError::Syntax(e.renamed_rules(describe_rule).to_string()))?
            .next()
            .ok_or_else(|| ParseError::Syntax("Failed to parse expression".to_string()))?;

        let mut pairs = parse_result.into_inner();
        let (body, depth) = Self::build_expr(next_pair(&mut pairs, "expression")?)?;
        debug!("Parsed expression of depth {}: {}", depth, body);
        Ok(Expression::Root(Box::new(body)))
    }

    fn build_expr(pair: Pair<Rule>) -> Result<Subtree, ParseError> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_term(next_pair(&mut pairs, "term")?)?;

        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::PLUS => Operator::Add,
                Rule::MINUS => Operator::Subtract,
                _ => return Err(unexpected(&operator_pair)),
            };

            let right = Self::build_term(next_pair(&mut pairs, "term")?)?;
            node = binary(node, operator, right)?;
        }

        Ok(node)
    }

    fn build_term(pair: Pair<Rule>) -> Result<Subtree, ParseError> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_inner_term(next_pair(&mut pairs, "operand")?)?;

        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::STAR => Operator::Multiply,
                Rule::SLASH => Operator::Divide,
                Rule::PERCENT => Operator::Modulo,
                _ => return Err(unexpected(&operator_pair)),
            };

            let right = Self::build_inner_term(next_pair(&mut pairs, "operand")?)?;
            node = binary(node, operator, right)?;
        }

        Ok(node)
    }

    /// `a ^ b ^ c` groups as `a ^ (b ^ c)`: operands are folded from the right.
    fn build_inner_term(pair: Pair<Rule>) -> Result<Subtree, ParseError> {
        let mut pairs = pair.into_inner();
        let mut operands = vec![Self::build_operand(next_pair(&mut pairs, "operand")?)?];

        while let Some(operator_pair) = pairs.next() {
            if operator_pair.as_rule() != Rule::POWER {
                return Err(unexpected(&operator_pair));
            }
            operands.push(Self::build_operand(next_pair(&mut pairs, "exponent")?)?);
        }

        let mut node = operands
            .pop()
            .ok_or_else(|| ParseError::Syntax("Expected operand".to_string()))?;
        while let Some(base) = operands.pop() {
            node = binary(base, Operator::Power, node)?;
        }

        Ok(node)
    }

    fn build_operand(pair: Pair<Rule>) -> Result<Subtree, ParseError> {
        let mut pairs = pair.into_inner();

        if let Some(operator_pair) = pairs.peek() {
            if operator_pair.as_rule() == Rule::NEGATE {
                pairs.next();
                let (inner, depth) = Self::build_factor(next_pair(&mut pairs, "factor")?)?;
                return nest(Expression::Negate(Box::new(inner)), depth);
            }
        }

        Self::build_factor(next_pair(&mut pairs, "factor")?)
    }

    fn build_factor(pair: Pair<Rule>) -> Result<Subtree, ParseError> {
        match pair.as_rule() {
            Rule::number => {
                let literal = pair.as_str();
                let value = literal
                    .parse::<f64>()
                    .map_err(|e| ParseError::InvalidNumber {
                        literal: literal.to_string(),
                        reason: e.to_string(),
                    })?;
                Ok((Expression::Number(value), 1))
            }
            Rule::group => {
                let mut pairs = pair.into_inner();
                Self::build_expr(next_pair(&mut pairs, "expression")?)
            }
            Rule::function_call => Self::build_function_call(pair),
            Rule::constant => Self::build_constant(pair),
            _ => Err(unexpected(&pair)),
        }
    }

    fn build_function_call(pair: Pair<Rule>) -> Result<Subtree, ParseError> {
        let mut pairs = pair.into_inner();
        let head = next_pair(&mut pairs, "function name")?;
        let name = next_pair(&mut head.into_inner(), "function name")?.as_str();

        // Arguments first, so an unknown name inside them is what gets reported.
        let built = pairs
            .map(Self::build_expr)
            .collect::<Result<Vec<_>, _>>()?;
        let depth = built.iter().map(|(_, depth)| *depth).max().unwrap_or(0);
        let args: Vec<Expression> = built.into_iter().map(|(arg, _)| arg).collect();

        let function = registry()
            .function(name, args.len())
            .ok_or_else(|| ParseError::unresolved_function(name, args.len()))?;
        debug!("Resolved function {}/{}", function.name, function.arity());

        nest(Expression::FunctionCall { function, args }, depth)
    }

    fn build_constant(pair: Pair<Rule>) -> Result<Subtree, ParseError> {
        let name = next_pair(&mut pair.into_inner(), "constant name")?.as_str();
        let (name, value) = registry()
            .constant(name)
            .ok_or_else(|| ParseError::UnresolvedConstant(name.to_string()))?;
        debug!("Resolved constant {} = {}", name, value);

        Ok((Expression::NamedConstant { name, value }, 1))
    }
}

fn binary(left: Subtree, operator: Operator, right: Subtree) -> Result<Subtree, ParseError> {
    let depth = left.1.max(right.1);
    nest(
        Expression::BinaryOperation {
            left: Box::new(left.0),
            operator,
            right: Box::new(right.0),
        },
        depth,
    )
}

/// Wraps `node`, whose deepest child has height `child_depth`, checking the
/// resulting height against [`MAX_DEPTH`].
fn nest(node: Expression, child_depth: usize) -> Result<Subtree, ParseError> {
    let depth = child_depth + 1;
    if depth > MAX_DEPTH {
        return Err(ParseError::Syntax("expression too deep".to_string()));
    }
    Ok((node, depth))
}

fn next_pair<'i>(
    pairs: &mut Pairs<'i, Rule>,
    expected: &str,
) -> Result<Pair<'i, Rule>, ParseError> {
    pairs
        .next()
        .ok_or_else(|| ParseError::Syntax(format!("Expected {}", expected)))
}

fn unexpected(pair: &Pair<Rule>) -> ParseError {
    ParseError::Syntax(format!(
        "Unexpected {} '{}'",
        describe_rule(&pair.as_rule()),
        pair.as_str()
    ))
}

fn describe_rule(rule: &Rule) -> String {
    match rule {
        Rule::EOI => "end of input",
        Rule::expression | Rule::expr | Rule::group => "expression",
        Rule::term | Rule::inner_term | Rule::operand => "operand",
        Rule::number => "number",
        Rule::function_call | Rule::function_head => "function call",
        Rule::constant | Rule::identifier => "constant or function name",
        Rule::PLUS | Rule::MINUS | Rule::STAR | Rule::SLASH | Rule::PERCENT | Rule::POWER => {
            "operator"
        }
        Rule::NEGATE => "'-'",
        _ => "token",
    }
    .to_string()
}
