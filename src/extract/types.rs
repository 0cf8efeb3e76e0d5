//! Types produced by the extractor and consumed by the `extract` and `test` tasks.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How function definitions are located in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Line-oriented pattern scan. A body ends at the first line that is
    /// exactly `}`, even when that brace closes an inner block.
    #[default]
    Pattern,
    /// Syntax-aware scan. A body ends at the brace that closes the function.
    Balanced,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Pattern => "pattern",
            Strategy::Balanced => "balanced",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pattern" => Some(Strategy::Pattern),
            "balanced" => Some(Strategy::Balanced),
            _ => None,
        }
    }
}

/// Function name → full definition text, in first-occurrence order.
///
/// Redefining a name replaces the stored text but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FunctionTable {
    functions: IndexMap<String, String>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, definition: impl Into<String>) {
        self.functions.insert(name.into(), definition.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.functions.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.functions
            .iter()
            .map(|(name, body)| (name.as_str(), body.as_str()))
    }
}

/// Everything pulled out of one shell source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub boilerplate: Option<String>,
    pub functions: FunctionTable,
}

impl Extraction {
    /// Look up a function, failing when the source does not define it.
    pub fn function(&self, name: &str) -> Result<&str> {
        self.functions.get(name).ok_or_else(|| Error::UnknownFunction {
            name: name.to_string(),
        })
    }

    /// Narrow the table to the requested names, in request order.
    /// An empty request keeps every function.
    pub fn select(&self, names: &[String]) -> Result<FunctionTable> {
        if names.is_empty() {
            return Ok(self.functions.clone());
        }
        let mut selected = FunctionTable::new();
        for name in names {
            selected.insert(name.as_str(), self.function(name)?);
        }
        Ok(selected)
    }
}
