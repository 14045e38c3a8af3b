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

use super::condition::ConditionCollection;
use super::expr::{Expr, OrderByExpr};
use super::table::Table;
use super::value::Value;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `INNER`/`LEFT OUTER`/`RIGHT OUTER`/`CROSS`/`CROSS APPLY`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Cross,
    CrossApply,
}

/// A joined source with its `ON` predicate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Join {
    pub join_type: JoinType,
    pub source: Box<Source>,
    pub conditions: ConditionCollection,
}

/// A `[Schema.]Name(arg1, arg2, ...)` scalar/table function call used as a
/// `FROM` source. Arguments are run through the constant-value encoding
/// rules of the parameter sink rather than being arbitrary expressions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserDefinedFunctionCall {
    pub schema: Option<String>,
    pub name: String,
    pub args: Vec<Value>,
    pub alias: Option<String>,
}

/// The four shapes a `SelectStatement`'s source (or a `Join`'s target) can take.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Source {
    Table(Table),
    Select(Box<SelectStatement>),
    Join(Box<Join>),
    UserDefinedFunction(UserDefinedFunctionCall),
}

/// The central query node: every clause a `SELECT` can carry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectStatement {
    pub source: Box<Source>,
    pub joins: Vec<Join>,
    pub fields: Vec<Expr>,
    pub fields_from: Vec<Table>,
    pub conditions: ConditionCollection,
    pub group_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    /// Unioned with `UNION ALL`.
    pub unions: Vec<SelectStatement>,
    pub alias: Option<String>,
    pub is_distinct: bool,
    /// `0` means "no limit".
    pub limit: u32,
    /// `0` means "no paging".
    pub start_index: u32,
    pub is_any: bool,
    pub is_all: bool,
    pub is_contains: bool,
    pub contains_item: Option<Box<Expr>>,
    pub is_aggregate: bool,
}

impl SelectStatement {
    pub fn new(source: Source) -> Self {
        Self {
            source: Box::new(source),
            joins: Vec::new(),
            fields: Vec::new(),
            fields_from: Vec::new(),
            conditions: ConditionCollection::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            unions: Vec::new(),
            alias: None,
            is_distinct: false,
            limit: 0,
            start_index: 0,
            is_any: false,
            is_all: false,
            is_contains: false,
            contains_item: None,
            is_aggregate: false,
        }
    }

    pub fn from_table(table: Table) -> Self {
        Self::new(Source::Table(table))
    }

    /// True when at least one reduction rewrite (paging / any / all /
    /// contains) needs to reshape this statement before the plain `SELECT`
    /// path can run.
    pub fn needs_rewrite(&self) -> bool {
        self.start_index > 0 || self.is_any || self.is_all || self.is_contains
    }

    pub fn has_aggregate_field(&self) -> bool {
        self.fields
            .iter()
            .any(|f| matches!(f, Expr::Aggregate(_)))
    }
}

/// An opaque, mapper-resolvable statement shape. The core never inspects
/// its payload; it only hands it to a [`crate::mapper::Mapper`].
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenericStatement {
    /// Identifies which concrete query shape the mapper should materialise.
    pub tag: String,
    /// Opaque arguments forwarded to the mapper as-is.
    pub args: Vec<Value>,
}

impl GenericStatement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            args: Vec::new(),
        }
    }
}

/// The top-level statement kinds the builder accepts.
///
/// Data-definition and INSERT/UPDATE/DELETE statement kinds are out of
/// scope for this builder and are not represented here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Statement {
    Select(SelectStatement),
    Generic(GenericStatement),
}
