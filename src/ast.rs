//! The syntax tree: pure data plus the canonical textual rendering.
//!
//! Every node keeps the token that introduced it, and every slot that a
//! failed sub-parse can leave unfilled is an `Option`. The parser hands the
//! whole tree to its caller and retains nothing; rendering is a pure function
//! of the tree and never consults the original source text.

use std::fmt;

use serde::Serialize;

use crate::token::Token;

#[derive(Clone, Debug, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Clone, Debug, Serialize)]
pub enum Statement {
    Let {
        token: Token,
        name: Option<Identifier>,
        value: Option<Expression>,
    },
    Return {
        token: Token,
        value: Option<Expression>,
    },
    Expression {
        token: Token,
        value: Option<Expression>,
    },
    Block(BlockStatement),
}

/// A braced statement sequence. Also the body form of `if` and `fn`.
#[derive(Clone, Debug, Serialize)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

#[derive(Clone, Debug, Serialize)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    BooleanLiteral {
        token: Token,
        value: bool,
    },
    Prefix {
        token: Token,
        operator: String,
        right: Option<Box<Expression>>,
    },
    /// `left` is always present; it is built before the operator is seen.
    Infix {
        token: Token,
        operator: String,
        left: Box<Expression>,
        right: Option<Box<Expression>>,
    },
    If {
        token: Token,
        condition: Option<Box<Expression>>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        token: Token,
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { token, name, value } => {
                write!(f, "{} ", token.literal)?;
                if let Some(name) = name {
                    write!(f, "{name}")?;
                }
                write!(f, " = ")?;
                if let Some(value) = value {
                    write!(f, "{value}")?;
                }
                write!(f, ";")
            }
            Statement::Return { token, value } => {
                write!(f, "{} ", token.literal)?;
                if let Some(value) = value {
                    write!(f, "{value}")?;
                }
                write!(f, ";")
            }
            Statement::Expression { value, .. } => {
                if let Some(value) = value {
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            Statement::Block(block) => write!(f, "{block}"),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(identifier) => write!(f, "{identifier}"),
            Expression::IntegerLiteral { token, .. } => f.write_str(&token.literal),
            Expression::BooleanLiteral { token, .. } => f.write_str(&token.literal),
            Expression::Prefix {
                operator, right, ..
            } => {
                write!(f, "({operator}")?;
                if let Some(right) = right {
                    write!(f, "{right}")?;
                }
                write!(f, ")")
            }
            Expression::Infix {
                operator,
                left,
                right,
                ..
            } => {
                write!(f, "({left} {operator} ")?;
                if let Some(right) = right {
                    write!(f, "{right}")?;
                }
                write!(f, ")")
            }
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if")?;
                if let Some(condition) = condition {
                    write!(f, "{condition}")?;
                }
                write!(f, " {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, "else {alternative}")?;
                }
                Ok(())
            }
            Expression::FunctionLiteral {
                token,
                parameters,
                body,
            } => {
                write!(f, "{}(", token.literal)?;
                for (i, parameter) in parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                write!(f, ") {body}")
            }
        }
    }
}
