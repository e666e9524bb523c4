//! Expression AST definitions.

use crate::expression::operator::{BinaryOperator, UnaryOperator};
use crate::expression::{ExpressionError, ExpressionResult};
use crate::value::{Number, Object, Regex, Thing, Value};
use std::fmt;

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathPart {
    Field(String),
    Index(usize),
}

/// Dotted path into the current record, e.g. `address.lines.0`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub parts: Vec<PathPart>,
}

impl FieldPath {
    pub fn new(parts: Vec<PathPart>) -> Self {
        Self { parts }
    }

    /// Split a dotted path. All-digit segments become array indexes.
    pub fn parse(path: &str) -> Self {
        let parts = path
            .split('.')
            .map(|segment| match segment.parse::<usize>() {
                Ok(index) if segment.bytes().all(|b| b.is_ascii_digit()) => PathPart::Index(index),
                _ => PathPart::Field(segment.to_string()),
            })
            .collect();
        Self { parts }
    }

    /// Walk the path through a record.
    ///
    /// Returns `None` when a field is missing, an index is past the end, or
    /// a step tries to descend into a value that is not a container.
    pub fn lookup<'v>(&self, record: &'v Object) -> Option<&'v Value> {
        let (first, rest) = self.parts.split_first()?;
        let mut current = match first {
            PathPart::Field(name) => record.get(name)?,
            PathPart::Index(_) => return None,
        };

        for part in rest {
            current = match (part, current) {
                (PathPart::Field(name), Value::Object(map)) => map.get(name)?,
                (PathPart::Index(index), Value::Array(items)) => items.get(*index)?,
                _ => return None,
            };
        }

        Some(current)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match part {
                PathPart::Field(name) => f.write_str(name)?,
                PathPart::Index(index) => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}

/// Literal value in an expression
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
}

impl Literal {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn void() -> Self {
        Self { value: Value::Void }
    }

    pub fn null() -> Self {
        Self { value: Value::Null }
    }

    pub fn empty() -> Self {
        Self {
            value: Value::Empty,
        }
    }

    pub fn int(val: i64) -> Self {
        Self {
            value: Value::Number(Number::Int(val)),
        }
    }

    pub fn thing(table: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            value: Value::Thing(Thing::new(table, id)),
        }
    }

    /// Compile a pattern literal
    pub fn regex(pattern: &str) -> ExpressionResult<Self> {
        let regex = Regex::new(pattern).map_err(|err| ExpressionError::InvalidRegex {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            value: Value::Regex(regex),
        })
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal constant value
    Literal(Literal),

    /// Bound variable, `$name`
    Param(String),

    /// Field of the current record
    Field(FieldPath),

    /// Array constructor
    Array(Vec<Expression>),

    /// Object constructor
    Object(Vec<(String, Expression)>),

    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Built-in function call
    FunctionCall { name: String, args: Vec<Expression> },
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(Literal::new(value))
    }

    /// Create a variable reference
    pub fn param(name: impl Into<String>) -> Self {
        Expression::Param(name.into())
    }

    /// Create a field reference from a dotted path
    pub fn field(path: &str) -> Self {
        Expression::Field(FieldPath::parse(path))
    }

    pub fn array(items: Vec<Expression>) -> Self {
        Expression::Array(items)
    }

    pub fn object(entries: Vec<(String, Expression)>) -> Self {
        Expression::Object(entries)
    }

    /// Create a pattern literal expression
    pub fn regex(pattern: &str) -> ExpressionResult<Self> {
        Literal::regex(pattern).map(Expression::Literal)
    }

    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            args,
        }
    }

    /// Create a binary operation expression
    pub fn binary_op(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a unary operation expression
    pub fn unary_op(op: UnaryOperator, operand: Expression) -> Self {
        Expression::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::And, left, right)
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Or, left, right)
    }

    pub fn not_expr(operand: Expression) -> Self {
        Self::unary_op(UnaryOperator::Not, operand)
    }

    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Eq, left, right)
    }

    pub fn ne(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Ne, left, right)
    }

    pub fn any_eq(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::AnyEq, left, right)
    }

    pub fn all_eq(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::AllEq, left, right)
    }

    pub fn lt(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Lt, left, right)
    }

    pub fn le(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Le, left, right)
    }

    pub fn gt(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Gt, left, right)
    }

    pub fn ge(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Ge, left, right)
    }

    /// `left ∈ right`
    pub fn inside(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Inside, left, right)
    }

    /// `left ∋ right`
    pub fn contains(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Contains, left, right)
    }

    pub fn add_expr(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Add, left, right)
    }

    pub fn sub_expr(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Sub, left, right)
    }

    pub fn mul_expr(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Mul, left, right)
    }

    pub fn div_expr(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Div, left, right)
    }

    /// Check if this expression is a constant (reads no variables or fields)
    pub fn is_constant(&self) -> bool {
        match self {
            Expression::Literal(_) => true,
            Expression::Param(_) | Expression::Field(_) => false,
            Expression::Array(items) => items.iter().all(|item| item.is_constant()),
            Expression::Object(entries) => entries.iter().all(|(_, value)| value.is_constant()),
            Expression::BinaryOp { left, right, .. } => left.is_constant() && right.is_constant(),
            Expression::UnaryOp { operand, .. } => operand.is_constant(),
            // time.now() differs between calls
            Expression::FunctionCall { .. } => false,
        }
    }
}
