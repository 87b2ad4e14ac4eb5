use crate::core::value::Value;
use serde::{Deserialize, Serialize};

/// One row read from the source table.
///
/// Values are positional, aligned to the column list the row was selected
/// with; the row itself carries no column names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
