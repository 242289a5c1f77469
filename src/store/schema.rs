//! Schema: ordered, unique field names and their column positions

use std::collections::HashMap;

use super::errors::{StoreError, StoreResult};
use crate::value::{GroupKey, Value};

/// One fixed-arity record
pub type Row = Vec<Value>;

/// Immutable field layout of a row store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Schema {
    /// Builds a schema, rejecting duplicate names
    pub fn new<I, S>(fields: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let mut positions = HashMap::with_capacity(fields.len());
        for (i, name) in fields.iter().enumerate() {
            if positions.insert(name.clone(), i).is_some() {
                return Err(StoreError::DuplicateField(name.clone()));
            }
        }
        Ok(Self { fields, positions })
    }

    /// Column position of `field`
    pub fn position(&self, field: &str) -> StoreResult<usize> {
        self.positions
            .get(field)
            .copied()
            .ok_or_else(|| StoreError::UnknownField(field.to_string()))
    }

    /// Column positions of `fields`, in order
    pub fn positions<S: AsRef<str>>(&self, fields: &[S]) -> StoreResult<Vec<usize>> {
        fields.iter().map(|f| self.position(f.as_ref())).collect()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rejects a row whose length differs from the schema
    pub fn check_arity(&self, row_number: usize, row: &[Value]) -> StoreResult<()> {
        if row.len() != self.fields.len() {
            return Err(StoreError::ArityMismatch {
                row: row_number,
                expected: self.fields.len(),
                found: row.len(),
            });
        }
        Ok(())
    }
}

/// Projects `row` onto `positions`
pub(crate) fn project(row: &[Value], positions: &[usize]) -> GroupKey {
    positions.iter().map(|&i| row[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let schema = Schema::new(["name", "age", "gender"]).unwrap();
        assert_eq!(schema.position("age").unwrap(), 1);
        assert_eq!(schema.positions(&["gender", "name"]).unwrap(), vec![2, 0]);
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn test_empty_schema() {
        let schema = Schema::new(Vec::<String>::new()).unwrap();
        assert!(schema.is_empty());
        assert!(schema.position("x").is_err());
    }

    #[test]
    fn test_unknown_field() {
        let schema = Schema::new(["a"]).unwrap();
        assert_eq!(
            schema.position("b").unwrap_err(),
            StoreError::UnknownField("b".into())
        );
    }

    #[test]
    fn test_duplicate_field() {
        let err = Schema::new(["a", "b", "a"]).unwrap_err();
        assert_eq!(err, StoreError::DuplicateField("a".into()));
    }

    #[test]
    fn test_check_arity() {
        let schema = Schema::new(["a", "b"]).unwrap();
        assert!(schema.check_arity(0, &[Value::Int(1), Value::Null]).is_ok());
        assert!(schema.check_arity(1, &[Value::Int(1)]).is_err());
    }

    #[test]
    fn test_project() {
        let row = vec![Value::from("toto"), Value::Int(12), Value::from("M")];
        assert_eq!(project(&row, &[2, 0]), vec![Value::from("M"), Value::from("toto")]);
    }
}
