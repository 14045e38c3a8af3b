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

use super::expr::Expr;
use super::statement::SelectStatement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Comparison operators a scalar [`Condition`] can carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operator {
    Equals,
    NotEquals,
    IsLessThan,
    IsLessThanOrEqualTo,
    IsGreaterThan,
    IsGreaterThanOrEqualTo,
    IsIn,
    Contains,
    StartsWith,
    EndsWith,
}

/// The boolean glue joining successive elements of a [`ConditionCollection`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Relationship {
    And,
    Or,
}

/// A single scalar comparison: `field OP value`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Condition {
    pub field: Box<Expr>,
    pub operator: Operator,
    pub value: Box<Expr>,
    pub not: bool,
}

impl Condition {
    pub fn new(field: Expr, operator: Operator, value: Expr) -> Self {
        Self {
            field: Box::new(field),
            operator,
            value: Box::new(value),
            not: false,
        }
    }
}

/// `EXISTS ( SELECT ... )`, with an optional negation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exists {
    pub select: Box<SelectStatement>,
    pub not: bool,
}

/// One element of a [`ConditionCollection`]: a scalar condition, an
/// existence predicate, or a parenthesised nested collection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConditionExpr {
    Condition(Condition),
    Exists(Exists),
    Nested(ConditionCollection),
}

/// A [`ConditionExpr`] paired with the relationship that joins it to the
/// previous element. The relationship on the first element is never read.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConditionItem {
    pub relationship: Relationship,
    pub expr: ConditionExpr,
}

/// An ordered `WHERE`/`ON`/nested predicate list with a collection-level
/// negation flag.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConditionCollection {
    pub items: Vec<ConditionItem>,
    pub not: bool,
}

impl ConditionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends an element. `relationship` is ignored for the first element.
    pub fn push(&mut self, relationship: Relationship, expr: ConditionExpr) -> &mut Self {
        self.items.push(ConditionItem { relationship, expr });
        self
    }

    pub fn and(&mut self, condition: Condition) -> &mut Self {
        self.push(Relationship::And, ConditionExpr::Condition(condition))
    }

    pub fn or(&mut self, condition: Condition) -> &mut Self {
        self.push(Relationship::Or, ConditionExpr::Condition(condition))
    }
}
