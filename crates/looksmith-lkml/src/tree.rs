//! LookML document tree
//!
//! A document is an ordered list of fields; a field value is a scalar,
//! a list, or a nested block. Builders take `Option`s so that unset
//! attributes are simply never added to the tree.

/// Value of a LookML field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Unquoted literal, e.g. `type: time`
    Bare(String),

    /// Quoted string, e.g. `label: "Order Date"`
    Quoted(String),

    /// SQL expression terminated by `;;`
    Sql(String),

    /// Bracketed list of unquoted items, e.g. `timeframes: [raw, date]`
    List(Vec<String>),

    /// Bracketed list of quoted items, e.g. `suggestions: ["a", "b"]`
    QuotedList(Vec<String>),

    /// Bracketed `field: "expression"` pairs, as used by `filters`
    Pairs(Vec<(String, String)>),

    /// Nested block, e.g. `dimension: id { ... }`
    Block(Block),
}

/// A `key: value` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A `{ ... }` block, optionally named
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub name: Option<String>,
    pub fields: Vec<Field>,
}

impl Block {
    /// Create a named block, e.g. the `orders` in `view: orders { }`
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fields: Vec::new(),
        }
    }

    /// Append an arbitrary field
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.fields.push(Field::new(key, value));
    }

    /// Add an unquoted literal
    pub fn bare(mut self, key: &str, value: impl Into<String>) -> Self {
        self.push(key, Value::Bare(value.into()));
        self
    }

    /// Add a quoted string
    pub fn quoted(mut self, key: &str, value: impl Into<String>) -> Self {
        self.push(key, Value::Quoted(value.into()));
        self
    }

    /// Add a SQL expression
    pub fn sql(mut self, key: &str, value: impl Into<String>) -> Self {
        self.push(key, Value::Sql(value.into()));
        self
    }

    /// Add a list of unquoted items
    pub fn list(mut self, key: &str, items: Vec<String>) -> Self {
        self.push(key, Value::List(items));
        self
    }

    /// Add a nested block
    pub fn block(mut self, key: &str, block: Block) -> Self {
        self.push(key, Value::Block(block));
        self
    }

    /// Add an unquoted literal when set
    pub fn opt_bare(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.bare(key, v),
            None => self,
        }
    }

    /// Add a quoted string when set
    pub fn opt_quoted(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.quoted(key, v),
            None => self,
        }
    }

    /// Add a SQL expression when set
    pub fn opt_sql(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.sql(key, v),
            None => self,
        }
    }

    /// Add a list of unquoted items when set
    pub fn opt_list(self, key: &str, items: Option<&[String]>) -> Self {
        match items {
            Some(items) => self.list(key, items.to_vec()),
            None => self,
        }
    }

    /// Add a list of quoted items when set
    pub fn opt_quoted_list(mut self, key: &str, items: Option<&[String]>) -> Self {
        if let Some(items) = items {
            self.push(key, Value::QuotedList(items.to_vec()));
        }
        self
    }

    /// Add `field: "expression"` pairs when there is at least one
    pub fn pairs(mut self, key: &str, pairs: Vec<(String, String)>) -> Self {
        if !pairs.is_empty() {
            self.push(key, Value::Pairs(pairs));
        }
        self
    }

    /// Add one nested block per item, all under the same key
    pub fn blocks(mut self, key: &str, blocks: impl IntoIterator<Item = Block>) -> Self {
        for block in blocks {
            self.push(key, Value::Block(block));
        }
        self
    }

    /// Look up the first field with the given key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    /// Whether a field with the given key is present
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
