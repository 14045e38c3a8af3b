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

//! The statement model: a closed, pure-data tree of node kinds.
//!
//! Nothing in this module has behaviour beyond small constructor
//! conveniences -- emission lives in [`crate::emitter`], rewriting in
//! [`crate::rewrite`].

mod condition;
mod expr;
mod statement;
mod table;
mod value;

pub use condition::{Condition, ConditionCollection, ConditionExpr, ConditionItem, Exists, Operator, Relationship};
pub use expr::{
    Aggregate, AggregateType, BinaryOperation, BinaryOperator, CaseBranch, CaseTest,
    CoalesceFunction, ConditionalCase, ConvertFunction, DateConstructTime, DateFunction, DatePart,
    Expr, LiteralPart, NumericFunction, OrderByExpr, OrderDirection, RowNumber, SelectExpression,
    StringFunction, TrigFunction, UnaryOperation, UnaryOperator,
};
pub use statement::{
    GenericStatement, Join, JoinType, SelectStatement, Source, Statement, UserDefinedFunctionCall,
};
pub use table::{Column, Table};
pub use value::{ConstantPart, Value};
