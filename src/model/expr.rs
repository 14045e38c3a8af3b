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

use super::condition::{Condition, ConditionCollection};
use super::statement::SelectStatement;
use super::table::Column;
use super::value::ConstantPart;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every scalar expression node kind the emitter knows how to lower.
///
/// Dispatch over this enum is exhaustive pattern matching rather than a
/// dynamic-cast-and-branch chain, so the compiler -- not a runtime default
/// arm -- enforces that every variant is handled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    Constant(ConstantPart),
    Column(Column),
    Literal(LiteralPart),
    Select(SelectExpression),
    Aggregate(Box<Aggregate>),
    RowNumber(RowNumber),
    ConditionalCase(Box<ConditionalCase>),
    Coalesce(CoalesceFunction),
    Convert(ConvertFunction),
    String(StringFunction),
    Date(DateFunction),
    Numeric(NumericFunction),
    BinaryOp(Box<BinaryOperation>),
    UnaryOp(Box<UnaryOperation>),
    /// A boolean predicate used in scalar position: `(CASE WHEN <pred> THEN 1 ELSE 0 END)`.
    ConditionPredicate(Box<ConditionCollection>),
}

impl Expr {
    pub fn is_null_constant(&self) -> bool {
        matches!(self, Expr::Constant(c) if c.is_null())
    }
}

/// Raw SQL text appended verbatim, unquoted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LiteralPart {
    pub text: String,
}

impl LiteralPart {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A `SelectStatement` used as a scalar field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectExpression {
    pub select: Box<SelectStatement>,
    pub alias: Option<String>,
}

/// Which T-SQL aggregate a node lowers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AggregateType {
    Count,
    BigCount,
    Min,
    Max,
    Sum,
    Average,
}

/// `NAME(DISTINCT? (field | '*'))`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aggregate {
    pub aggregate_type: AggregateType,
    pub field: Option<Box<Expr>>,
    pub is_distinct: bool,
}

/// `ASC`/`DESC` direction of an `ORDER BY` term.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderDirection {
    Ascending,
    Descending,
}

/// One `ORDER BY` term, inside either a `SelectStatement` or a [`RowNumber`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderByExpr {
    pub expr: Box<Expr>,
    pub direction: OrderDirection,
}

impl OrderByExpr {
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr: Box::new(expr),
            direction: OrderDirection::Ascending,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr: Box::new(expr),
            direction: OrderDirection::Descending,
        }
    }
}

/// `ROW_NUMBER() OVER(ORDER BY ...) AS RowNumber`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowNumber {
    pub order_by: Vec<OrderByExpr>,
}

/// Whether a `CASE` is driven by a boolean [`Condition`] (`CASE WHEN ...`) or
/// by comparing a scalar value against zero (`CASE <test> WHEN 0 THEN ...`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CaseTest {
    Condition(Box<Condition>),
    Value(Box<Expr>),
}

/// The else-if tail of a [`ConditionalCase`]: either a terminal value or
/// another case, forming a right-nested chain that the emitter flattens
/// into successive `WHEN` clauses.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CaseBranch {
    Value(Box<Expr>),
    Case(Box<ConditionalCase>),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConditionalCase {
    pub test: CaseTest,
    pub if_true: Box<Expr>,
    pub if_false: CaseBranch,
}

/// `COALESCE(head, ...tail)`, modelled as a right-recursive cons list so the
/// emitter can flatten an arbitrary-arity call the same way the source does.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoalesceFunction {
    pub head: Box<Expr>,
    pub tail: Option<Box<CoalesceFunction>>,
}

impl CoalesceFunction {
    pub fn from_args(mut args: Vec<Expr>) -> Option<Self> {
        if args.is_empty() {
            return None;
        }
        let head = args.remove(0);
        let tail = Self::from_args(args).map(Box::new);
        Some(Self {
            head: Box::new(head),
            tail,
        })
    }
}

/// `CONVERT(VARCHAR, expr)` -- simplified to the one target type in scope.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvertFunction {
    pub expr: Box<Expr>,
}

/// String-family function nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StringFunction {
    Len(Box<Expr>),
    Substring {
        arg: Box<Expr>,
        start: Box<Expr>,
        length: Box<Expr>,
    },
    Stuff {
        arg: Box<Expr>,
        start: Box<Expr>,
        length: Box<Expr>,
    },
    CharIndex {
        needle: Box<Expr>,
        haystack: Box<Expr>,
        start: Option<Box<Expr>>,
    },
    Upper(Box<Expr>),
    Lower(Box<Expr>),
    Replace {
        arg: Box<Expr>,
        find: Box<Expr>,
        replacement: Box<Expr>,
    },
    Trim(Box<Expr>),
    Compare {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Concat(Vec<Expr>),
}

/// The date-part domain accepted by [`DateFunction::Part`]/`Add`/`Diff`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DatePart {
    Year,
    Quarter,
    Month,
    DayOfYear,
    Day,
    Week,
    DayOfWeek,
    Hour,
    Minute,
    Second,
    Millisecond,
}

/// Date/time-family function nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DateFunction {
    Part {
        part: DatePart,
        arg: Box<Expr>,
    },
    Add {
        part: DatePart,
        amount: Box<Expr>,
        arg: Box<Expr>,
    },
    Diff {
        part: DatePart,
        start: Box<Expr>,
        end: Box<Expr>,
    },
    /// Truncates a datetime to its date component.
    DateOnly(Box<Expr>),
    /// String-concatenated `CONVERT(DATETIME, ...)` construction.
    Construct {
        year: Box<Expr>,
        month: Box<Expr>,
        day: Box<Expr>,
        time: Option<DateConstructTime>,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateConstructTime {
    pub hour: Box<Expr>,
    pub minute: Box<Expr>,
    pub second: Box<Expr>,
}

/// Trigonometric functions, named by their enum value in upper case.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Cot,
}

/// Numeric-family function nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumericFunction {
    Abs(Box<Expr>),
    Ceiling(Box<Expr>),
    Floor(Box<Expr>),
    Round {
        arg: Box<Expr>,
        precision: Box<Expr>,
    },
    Truncate(Box<Expr>),
    Sign(Box<Expr>),
    Power {
        base: Box<Expr>,
        exponent: Box<Expr>,
    },
    Sqrt(Box<Expr>),
    Exp(Box<Expr>),
    Log(Box<Expr>),
    Log10(Box<Expr>),
    Trig {
        function: TrigFunction,
        arg: Box<Expr>,
    },
}

/// Binary arithmetic/bitwise operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    ExclusiveOr,
    LeftShift,
    RightShift,
    BitwiseAnd,
    BitwiseOr,
    BitwiseExclusiveOr,
    BitwiseNot,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryOperation {
    pub operator: BinaryOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOperator {
    Not,
    Negate,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub expr: Box<Expr>,
}
