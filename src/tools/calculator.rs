use super::{schema_of, Tool, ToolReport};
use crate::schemas::Validator;
use crate::services::pacing::SharedPacer;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::OnceLock;
use std::time::Duration;

/// Parameters for calculator operations
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CalculatorParams {
    /// Text that contains an arithmetic expression somewhere inside it
    pub expression: String,
}

/// Why an expression could not be evaluated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("Invalid mathematical expression")]
    Invalid,
    #[error("Division by zero")]
    DivisionByZero,
}

fn binary_pattern() -> &'static Regex {
    static BINARY: OnceLock<Regex> = OnceLock::new();
    BINARY.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)\s*([+\-*/])\s*(\d+(?:\.\d+)?)")
            .expect("Failed to compile binary expression regex")
    })
}

fn number_pattern() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("Failed to compile number regex"))
}

/// Pull the first `a op b` expression out of free text, normalized to
/// single spaces. Falls back to `n ^ 2` when the text asks for a square.
pub fn extract_expression(text: &str) -> Option<String> {
    if let Some(caps) = binary_pattern().captures(text) {
        return Some(format!("{} {} {}", &caps[1], &caps[2], &caps[3]));
    }

    if text.to_lowercase().contains("square") {
        if let Some(caps) = number_pattern().captures(text) {
            return Some(format!("{} ^ 2", &caps[1]));
        }
    }

    None
}

/// Evaluate an extracted expression. `^` is exponentiation between two
/// numbers; anything else is stripped to digits, operators and parentheses
/// and parsed with the usual precedence.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    if let Some((base, exponent)) = expression.split_once('^') {
        let base: f64 = base.trim().parse().map_err(|_| CalcError::Invalid)?;
        let exponent: f64 = exponent.trim().parse().map_err(|_| CalcError::Invalid)?;
        return Ok(base.powf(exponent));
    }

    let sanitized: String = expression
        .chars()
        .filter(|c| c.is_ascii_digit() || "+-*/.() ".contains(*c))
        .collect();

    let mut parser = ExprParser::new(&sanitized);
    let value = parser.expression()?;
    parser.skip_whitespace();
    if parser.peek().is_some() {
        return Err(CalcError::Invalid);
    }
    Ok(value)
}

/// Render a result the way a calculator display would: integral values
/// without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

struct ExprParser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn expression(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('+') => {
                    self.chars.next();
                    value += self.term()?;
                }
                Some('-') => {
                    self.chars.next();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('*') => {
                    self.chars.next();
                    value *= self.factor()?;
                }
                Some('/') => {
                    self.chars.next();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<f64, CalcError> {
        self.skip_whitespace();
        match self.peek() {
            Some('-') => {
                self.chars.next();
                Ok(-self.factor()?)
            }
            Some('+') => {
                self.chars.next();
                self.factor()
            }
            Some('(') => {
                self.chars.next();
                let value = self.expression()?;
                self.skip_whitespace();
                match self.chars.next() {
                    Some(')') => Ok(value),
                    _ => Err(CalcError::Invalid),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            _ => Err(CalcError::Invalid),
        }
    }

    fn number(&mut self) -> Result<f64, CalcError> {
        let mut literal = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                literal.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        literal.parse().map_err(|_| CalcError::Invalid)
    }
}

/// Finds an arithmetic expression in the message and evaluates it
#[derive(Debug)]
pub struct CalculatorTool {
    pacer: SharedPacer,
}

impl CalculatorTool {
    pub fn new(pacer: SharedPacer) -> Self {
        Self { pacer }
    }

    /// Produce the report for a message without pacing
    pub fn calculate(text: &str) -> ToolReport {
        let Some(expression) = extract_expression(text) else {
            return ToolReport::success(
                "No mathematical expression found",
                "I couldn't find a mathematical expression to calculate. Please provide a clear mathematical operation.",
            );
        };

        match evaluate(&expression) {
            Ok(result) => {
                let result = format_number(result);
                ToolReport::success(
                    format!("Calculated: {} = {}", expression, result),
                    format!("**Calculation Result:**\n\n{} = **{}**", expression, result),
                )
            }
            Err(err) => ToolReport::failure(format!("Calculation failed: {}", err)),
        }
    }
}

impl Tool for CalculatorTool {
    fn name(&self) -> &'static str {
        "calculator"
    }

    fn display_name(&self) -> &'static str {
        "Calculator"
    }

    fn description(&self) -> &'static str {
        "Evaluate a basic arithmetic expression (+, -, *, /, squares) found in text"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        schema_of::<CalculatorParams>()
    }

    fn execute(
        &self,
        parameters: serde_json::Value,
    ) -> Pin<
        Box<
            dyn std::future::Future<Output = Result<serde_json::Value, crate::DemoError>>
                + Send
                + '_,
        >,
    > {
        Box::pin(async move {
            let params: CalculatorParams =
                Validator::SerdeFirst.validate(self.name(), parameters)?;

            self.pacer.pause(Duration::from_millis(500)).await;

            Self::calculate(&params.expression).into_value()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_binary_expression() {
        assert_eq!(
            extract_expression("what is 15*8 please"),
            Some("15 * 8".to_string())
        );
        assert_eq!(
            extract_expression("calculate 2.5 /   0.5"),
            Some("2.5 / 0.5".to_string())
        );
        assert_eq!(
            extract_expression("Square of 12"),
            Some("12 ^ 2".to_string())
        );
        assert_eq!(extract_expression("do some math"), None);
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(evaluate("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(evaluate("-3 + 10"), Ok(7.0));
        assert_eq!(evaluate("12 ^ 2"), Ok(144.0));
        assert_eq!(evaluate("7 / 2"), Ok(3.5));
    }

    #[test]
    fn test_evaluate_rejects_malformed() {
        assert_eq!(evaluate("5 +"), Err(CalcError::Invalid));
        assert_eq!(evaluate("(1 + 2"), Err(CalcError::Invalid));
        assert_eq!(evaluate("1.2.3 + 4"), Err(CalcError::Invalid));
        assert_eq!(evaluate(""), Err(CalcError::Invalid));
        assert_eq!(evaluate("x ^ 2"), Err(CalcError::Invalid));
        assert_eq!(evaluate("4 / 0"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(3.5), "3.5");
    }

    #[test]
    fn test_calculate_reports() {
        let report = CalculatorTool::calculate("Calculate 15 * 8");
        assert_eq!(report.summary.as_deref(), Some("Calculated: 15 * 8 = 120"));
        assert_eq!(
            report.data.as_deref(),
            Some("**Calculation Result:**\n\n15 * 8 = **120**")
        );

        let report = CalculatorTool::calculate("math is fun");
        assert_eq!(
            report.summary.as_deref(),
            Some("No mathematical expression found")
        );
        assert!(!report.is_error());

        let report = CalculatorTool::calculate("divide 9 / 0");
        assert_eq!(
            report.error.as_deref(),
            Some("Calculation failed: Division by zero")
        );
    }
}
