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

//! Lowers an in-memory `Statement` tree into parameterised T-SQL: a
//! `(command_text, parameter_values)` pair, never a string built by
//! concatenating caller-supplied data into the SQL text itself.
//!
//! ```
//! use tsql_builder::model::{Column, Condition, ConstantPart, Expr, Operator, SelectStatement, Statement, Table, Value};
//!
//! let mut select = SelectStatement::from_table(Table::new("Customer"));
//! select.conditions.and(Condition::new(
//!     Expr::Column(Column::new("Id")),
//!     Operator::Equals,
//!     Expr::Constant(ConstantPart::new(Value::Int(42))),
//! ));
//!
//! struct NoGenerics;
//! impl tsql_builder::mapper::Mapper for NoGenerics {
//!     fn materialize(&self, g: &tsql_builder::model::GenericStatement) -> tsql_builder::Result<SelectStatement> {
//!         Err(tsql_builder::Error::UnsupportedStatementKind(g.tag.clone()))
//!     }
//! }
//!
//! let built = tsql_builder::build(&Statement::Select(select), &NoGenerics).unwrap();
//! assert_eq!(built.text, "SELECT * FROM [Customer]\nWHERE [Id] = @0");
//! assert_eq!(built.parameters, vec![Value::Int(42)]);
//! ```

pub mod buffer;
pub mod dialect;
pub mod emitter;
pub mod error;
pub mod mapper;
pub mod model;
pub mod params;
mod rewrite;

pub use dialect::{Dialect, TSqlDialect};
pub use emitter::Emitter;
pub use error::{Error, Result};
pub use mapper::Mapper;
pub use model::{Statement, Value};

/// The output of a successful [`build`]: finished command text plus its
/// bound parameter values, in the order their `@N` placeholders appear.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltCommand {
    pub text: String,
    pub parameters: Vec<Value>,
}

/// Lowers `statement` against the default [`TSqlDialect`].
///
/// `mapper` is consulted only if `statement` is a
/// [`model::Statement::Generic`]; a build that never uses generic
/// statements can pass any `Mapper` whose `materialize` is never called --
/// the builtin test fixtures in this crate do exactly that with a mapper
/// that always errors.
pub fn build(statement: &Statement, mapper: &dyn Mapper) -> Result<BuiltCommand> {
    build_with_dialect(statement, mapper, &TSqlDialect)
}

/// Lowers `statement` against an explicit `dialect`, for callers targeting
/// something other than the default T-SQL dialect.
pub fn build_with_dialect(
    statement: &Statement,
    mapper: &dyn Mapper,
    dialect: &dyn Dialect,
) -> Result<BuiltCommand> {
    let mut emitter = Emitter::new(dialect);
    match statement {
        Statement::Select(select) => {
            log::trace!("build: emitting top-level select statement");
            emitter.emit_select(select)?;
        }
        Statement::Generic(generic) => {
            log::debug!("build: materialising generic statement tag={}", generic.tag);
            let materialised = mapper.materialize(generic)?;
            emitter.emit_select(&materialised)?;
        }
    }
    let (text, parameters) = emitter.finish();
    log::trace!(
        "build: emitted {} chars of command text with {} parameters",
        text.len(),
        parameters.len()
    );
    Ok(BuiltCommand { text, parameters })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Column, Condition, ConstantPart, Expr, GenericStatement, Operator, SelectStatement, Table,
    };
    use pretty_assertions::assert_eq;

    struct RejectAll;
    impl Mapper for RejectAll {
        fn materialize(&self, generic: &GenericStatement) -> Result<SelectStatement> {
            Err(Error::UnsupportedStatementKind(generic.tag.clone()))
        }
    }

    #[test]
    fn simple_equality_select_binds_one_parameter() {
        let mut select = SelectStatement::from_table(Table::new("Customer"));
        select.conditions.and(Condition::new(
            Expr::Column(Column::new("Id")),
            Operator::Equals,
            Expr::Constant(ConstantPart::new(Value::Int(42))),
        ));
        let built = build(&Statement::Select(select), &RejectAll).unwrap();
        assert_eq!(built.text, "SELECT * FROM [Customer]\nWHERE [Id] = @0");
        assert_eq!(built.parameters, vec![Value::Int(42)]);
    }

    #[test]
    fn generic_statement_without_a_matching_mapper_fails() {
        let generic = Statement::Generic(GenericStatement::new("anything"));
        let err = build(&generic, &RejectAll).unwrap_err();
        assert_eq!(err, Error::UnsupportedStatementKind("anything".to_string()));
    }
}
