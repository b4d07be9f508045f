//! Syntax tree for strategy scripts.

/// Binary operators, loosest to tightest: or, and, comparisons, +/-.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Or,
    And,
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Add,
    Sub,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Gt => ">",
            BinOp::Lt => "<",
            BinOp::Ge => ">=",
            BinOp::Le => "<=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(i64),
    Str(String),
    Bool(bool),
    Variable(String),
    Not(Box<Expr>),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
    /// `.prop` when `args` is None, `.method(args)` otherwise.
    Property {
        object: Box<Expr>,
        property: String,
        args: Option<Vec<Expr>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Play(Expr),
    Bid(Expr),
    Pass,
    Keep(Expr),
    Drop(Expr),
    Choose { suit: Expr, direction: Expr },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub condition: Expr,
    pub action: Action,
}

/// A `when ...` rule list with an optional `default:` action.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleBlock {
    pub rules: Vec<Rule>,
    pub default_action: Option<Action>,
}

/// The three sub-blocks of a `play:` section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaySection {
    pub leading: Option<RuleBlock>,
    pub following: Option<RuleBlock>,
    pub when_void: Option<RuleBlock>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrategyAst {
    pub name: String,
    pub game: String,
    pub play: Option<PlaySection>,
    pub bid: Option<RuleBlock>,
    pub trump: Option<RuleBlock>,
    pub discard: Option<RuleBlock>,
}
