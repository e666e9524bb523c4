//! Operator definitions for expressions.

use std::fmt;

/// Binary operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Equality and pattern matching
    Eq,
    Ne,
    AnyEq,
    AllEq,

    // Ordering
    Lt,
    Le,
    Gt,
    Ge,

    // Membership
    Inside,
    NotInside,
    Contains,
    NotContains,

    // Set inclusion
    Subset,
    ProperSubset,
    NotProperSubset,
    Superset,
    ProperSuperset,
    NotProperSuperset,

    // Logical
    And,
    Or,
}

impl BinaryOperator {
    /// Every operator, in declaration order
    pub const ALL: [BinaryOperator; 24] = [
        BinaryOperator::Add,
        BinaryOperator::Sub,
        BinaryOperator::Mul,
        BinaryOperator::Div,
        BinaryOperator::Eq,
        BinaryOperator::Ne,
        BinaryOperator::AnyEq,
        BinaryOperator::AllEq,
        BinaryOperator::Lt,
        BinaryOperator::Le,
        BinaryOperator::Gt,
        BinaryOperator::Ge,
        BinaryOperator::Inside,
        BinaryOperator::NotInside,
        BinaryOperator::Contains,
        BinaryOperator::NotContains,
        BinaryOperator::Subset,
        BinaryOperator::ProperSubset,
        BinaryOperator::NotProperSubset,
        BinaryOperator::Superset,
        BinaryOperator::ProperSuperset,
        BinaryOperator::NotProperSuperset,
        BinaryOperator::And,
        BinaryOperator::Or,
    ];

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }

    /// Operators that always produce a boolean and never fail
    pub fn is_comparison(&self) -> bool {
        !self.is_arithmetic() && !self.is_logical()
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Eq => "=",
            BinaryOperator::Ne => "!=",
            BinaryOperator::AnyEq => "?=",
            BinaryOperator::AllEq => "*=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::Inside => "∈",
            BinaryOperator::NotInside => "∉",
            BinaryOperator::Contains => "∋",
            BinaryOperator::NotContains => "∌",
            BinaryOperator::Subset => "⊆",
            BinaryOperator::ProperSubset => "⊂",
            BinaryOperator::NotProperSubset => "⊄",
            BinaryOperator::Superset => "⊇",
            BinaryOperator::ProperSuperset => "⊃",
            BinaryOperator::NotProperSuperset => "⊅",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        }
    }

    /// Map a symbol or keyword spelling to its operator.
    ///
    /// Keywords are matched case-insensitively and multi-word keywords
    /// tolerate any run of whitespace between words.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let normalized = symbol
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();

        let op = match normalized.as_str() {
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Sub,
            "*" => BinaryOperator::Mul,
            "/" => BinaryOperator::Div,
            "=" | "==" | "IS" => BinaryOperator::Eq,
            "!=" | "<>" | "IS NOT" => BinaryOperator::Ne,
            "?=" => BinaryOperator::AnyEq,
            "*=" => BinaryOperator::AllEq,
            "<" => BinaryOperator::Lt,
            "<=" => BinaryOperator::Le,
            ">" => BinaryOperator::Gt,
            ">=" => BinaryOperator::Ge,
            "∈" | "IN" | "INSIDE" => BinaryOperator::Inside,
            "∉" | "NOT IN" | "NOTINSIDE" | "NOT INSIDE" => BinaryOperator::NotInside,
            "∋" | "CONTAINS" => BinaryOperator::Contains,
            "∌" | "CONTAINSNOT" | "CONTAINS NOT" => BinaryOperator::NotContains,
            "⊆" | "ALLINSIDE" => BinaryOperator::Subset,
            "⊂" | "SOMEINSIDE" => BinaryOperator::ProperSubset,
            "⊄" | "NONEINSIDE" => BinaryOperator::NotProperSubset,
            "⊇" | "CONTAINSALL" => BinaryOperator::Superset,
            "⊃" | "CONTAINSSOME" => BinaryOperator::ProperSuperset,
            "⊅" | "CONTAINSNONE" => BinaryOperator::NotProperSuperset,
            "AND" | "&&" => BinaryOperator::And,
            "OR" | "||" => BinaryOperator::Or,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    // Logical
    Not,

    // Arithmetic
    Plus,
    Minus,
}

impl UnaryOperator {
    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "NOT",
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_classes() {
        assert!(BinaryOperator::Add.is_arithmetic());
        assert!(BinaryOperator::Div.is_arithmetic());
        assert!(!BinaryOperator::Eq.is_arithmetic());

        assert!(BinaryOperator::And.is_logical());
        assert!(BinaryOperator::Or.is_logical());

        assert!(BinaryOperator::Eq.is_comparison());
        assert!(BinaryOperator::Inside.is_comparison());
        assert!(BinaryOperator::NotProperSuperset.is_comparison());
        assert!(!BinaryOperator::Mul.is_comparison());
        assert!(!BinaryOperator::Or.is_comparison());
    }

    #[test]
    fn test_symbols_round_trip() {
        for op in BinaryOperator::ALL {
            assert_eq!(BinaryOperator::from_symbol(op.as_str()), Some(op));
        }
    }

    #[test]
    fn test_keyword_aliases() {
        assert_eq!(
            BinaryOperator::from_symbol("inside"),
            Some(BinaryOperator::Inside)
        );
        assert_eq!(
            BinaryOperator::from_symbol("NOT   IN"),
            Some(BinaryOperator::NotInside)
        );
        assert_eq!(
            BinaryOperator::from_symbol("ContainsAll"),
            Some(BinaryOperator::Superset)
        );
        assert_eq!(
            BinaryOperator::from_symbol("is not"),
            Some(BinaryOperator::Ne)
        );
        assert_eq!(BinaryOperator::from_symbol("~"), None);
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(BinaryOperator::Add.as_str(), "+");
        assert_eq!(BinaryOperator::Eq.to_string(), "=");
        assert_eq!(BinaryOperator::AnyEq.as_str(), "?=");
        assert_eq!(BinaryOperator::Contains.as_str(), "∋");
        assert_eq!(BinaryOperator::NotProperSubset.as_str(), "⊄");
        assert_eq!(BinaryOperator::And.as_str(), "AND");

        assert_eq!(UnaryOperator::Not.as_str(), "NOT");
        assert_eq!(UnaryOperator::Minus.to_string(), "-");
    }
}
