// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resolves an opaque [`GenericStatement`] into a concrete `SelectStatement`.
//!
//! A `GenericStatement` carries a `tag` and a bag of `Value` arguments but no
//! query shape of its own; the core crate never interprets either field.
//! Call sites that need named, reusable query shapes (e.g. "find active
//! customers by region") implement `Mapper` once and pass it to
//! [`crate::build`].

use crate::error::Result;
use crate::model::{GenericStatement, SelectStatement};

pub trait Mapper {
    /// Turns `generic` into the `SelectStatement` it stands for, or an
    /// error if `generic.tag` isn't one this mapper recognises.
    fn materialize(&self, generic: &GenericStatement) -> Result<SelectStatement>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Column, Condition, ConstantPart, Expr, Operator, Table, Value};

    struct CustomersByRegion;

    impl Mapper for CustomersByRegion {
        fn materialize(&self, generic: &GenericStatement) -> Result<SelectStatement> {
            if generic.tag != "customers_by_region" {
                return Err(Error::UnsupportedStatementKind(generic.tag.clone()));
            }
            let region = generic
                .args
                .first()
                .cloned()
                .unwrap_or(Value::Null);
            let mut stmt = SelectStatement::from_table(Table::new("Customer"));
            stmt.conditions.and(Condition::new(
                Expr::Column(Column::new("Region")),
                Operator::Equals,
                Expr::Constant(ConstantPart::new(region)),
            ));
            Ok(stmt)
        }
    }

    #[test]
    fn recognised_tag_materialises_a_select() {
        let mapper = CustomersByRegion;
        let generic = GenericStatement {
            tag: "customers_by_region".to_string(),
            args: vec![Value::Str("West".to_string())],
        };
        let stmt = mapper.materialize(&generic).unwrap();
        assert_eq!(stmt.conditions.items.len(), 1);
    }

    #[test]
    fn unrecognised_tag_is_an_error() {
        let mapper = CustomersByRegion;
        let generic = GenericStatement::new("nonexistent");
        assert_eq!(
            mapper.materialize(&generic),
            Err(Error::UnsupportedStatementKind("nonexistent".to_string()))
        );
    }
}
