use whist_core::Card;

/// A runtime value in strategy expressions.
///
/// `Undefined` is what unknown variables, unknown functions and dead-end
/// property lookups produce; it is falsy and compares unequal to everything
/// except itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Num(i64),
    Str(String),
    Card(Card),
    Set(Vec<Card>),
    Player(usize),
}

impl Value {
    pub fn truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0,
            Value::Str(s) => !s.is_empty(),
            // Sets are truthy even when empty; test .count instead.
            Value::Card(_) | Value::Set(_) | Value::Player(_) => true,
        }
    }

    pub fn as_num(&self) -> Option<i64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_card(&self) -> Option<Card> {
        match self {
            Value::Card(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Num(n)
    }
}

impl From<Option<Card>> for Value {
    fn from(card: Option<Card>) -> Value {
        match card {
            Some(c) => Value::Card(c),
            None => Value::Null,
        }
    }
}
