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

//! The recursive tree walker: one dispatch per node kind, writing into a
//! [`TextBuffer`] and interning bound values through a [`ParameterSink`].
//!
//! Every dispatch below is an exhaustive `match` over a closed enum, so the
//! compiler -- not a runtime default arm -- is what enforces that every
//! node kind is handled. Several `Error` variants exist for an
//! out-of-domain discriminator and are therefore unreachable from
//! `Emitter` itself; they remain part of [`crate::Error`] because a
//! [`crate::mapper::Mapper`] implementation is free to return them from
//! `materialize`. See `DESIGN.md` for the full accounting.

use crate::buffer::{Indent, TextBuffer};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::model::{
    Aggregate, AggregateType, BinaryOperation, BinaryOperator, CaseBranch, CaseTest, Column,
    Condition, ConditionCollection, ConditionExpr, ConditionalCase, ConvertFunction,
    CoalesceFunction, DateConstructTime, DateFunction, DatePart, Exists, Expr, Join, JoinType,
    NumericFunction, Operator, OrderByExpr, OrderDirection, Relationship, RowNumber,
    SelectStatement, Source, StringFunction, Table, TrigFunction, UnaryOperation, UnaryOperator,
    UserDefinedFunctionCall, Value,
};
use crate::params::ParameterSink;
use crate::rewrite::{self, SelectPlan};

/// How a [`ConditionCollection`] should be framed when it's emitted.
#[derive(Copy, Clone)]
enum Wrap {
    /// Top-level `WHERE` clause.
    Where,
    /// A nested collection embedded inside its parent's item list.
    Parens,
    /// No framing punctuation; the caller supplies its own (e.g. `Join`'s
    /// literal `ON ( ... )`).
    Bare,
}

/// Owns the buffer, parameter sink, and nested-emission flag for a single
/// `build()` call. Not `Sync`: construct a fresh one per build.
pub struct Emitter<'d> {
    buffer: TextBuffer,
    sink: ParameterSink,
    is_nested: bool,
    dialect: &'d dyn Dialect,
}

impl<'d> Emitter<'d> {
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            buffer: TextBuffer::new(),
            sink: ParameterSink::new(),
            is_nested: false,
            dialect,
        }
    }

    pub fn finish(self) -> (String, Vec<Value>) {
        debug_assert_eq!(self.buffer.depth(), 0, "unbalanced indentation after build");
        (self.buffer.into_string(), self.sink.into_values())
    }

    // ---- Select Rewriter entry point  ------------------

    pub fn emit_select(&mut self, stmt: &SelectStatement) -> Result<()> {
        match rewrite::plan(stmt) {
            SelectPlan::Paging(outer) => self.emit_plain_select(&outer),
            SelectPlan::Any(inner) => self.emit_any(&inner),
            SelectPlan::All(inner) => self.emit_all(&inner),
            SelectPlan::Contains { inner, item } => self.emit_contains(&inner, &item),
            SelectPlan::Plain(stmt) => self.emit_plain_select(&stmt),
        }
    }

    fn emit_any(&mut self, inner: &SelectStatement) -> Result<()> {
        log::trace!("rewrite: IsAny -> EXISTS reduction");
        self.buffer.push_str("SELECT CASE WHEN EXISTS ");
        self.emit_parenthesized_select(inner)?;
        self.buffer.push_str(" THEN 1 ELSE 0 END");
        Ok(())
    }

    fn emit_all(&mut self, inner: &SelectStatement) -> Result<()> {
        log::trace!("rewrite: IsAll -> NOT EXISTS reduction");
        self.buffer.push_str("SELECT CASE WHEN NOT EXISTS ");
        self.emit_parenthesized_select(inner)?;
        self.buffer.push_str(" THEN 1 ELSE 0 END");
        Ok(())
    }

    fn emit_contains(&mut self, inner: &SelectStatement, item: &Expr) -> Result<()> {
        log::trace!("rewrite: IsContains -> IN reduction");
        self.buffer.push_str("SELECT CASE WHEN ");
        self.emit_expr(item)?;
        self.buffer.push_str(" IN ");
        self.emit_parenthesized_select(inner)?;
        self.buffer.push_str(" THEN 1 ELSE 0 END");
        Ok(())
    }

    /// `( <newline-indented select> )`, without touching `is_nested` --
    /// used by the ANY/ALL/CONTAINS reductions and EXISTS, which are not
    /// "source" positions in the select-tree sense.
    fn emit_parenthesized_select(&mut self, stmt: &SelectStatement) -> Result<()> {
        self.buffer.push('(');
        self.buffer.append_newline(Indent::Inner);
        self.emit_select(stmt)?;
        self.buffer.append_newline(Indent::Outer);
        self.buffer.push(')');
        Ok(())
    }

    // ---- Plain SELECT base path ------------------------

    fn emit_plain_select(&mut self, stmt: &SelectStatement) -> Result<()> {
        self.buffer.push_str("SELECT ");
        if stmt.is_distinct {
            self.buffer.push_str("DISTINCT ");
        }
        self.dialect.limit_at_start(&mut self.buffer, stmt);
        self.emit_select_fields(stmt)?;
        self.buffer.push_str(" FROM ");
        self.emit_source(stmt.source.as_ref(), true)?;

        for join in &stmt.joins {
            self.buffer.append_newline(Indent::Same);
            self.emit_join(join)?;
        }

        if !stmt.conditions.is_empty() {
            self.buffer.append_newline(Indent::Same);
            self.emit_condition_collection(&stmt.conditions, Wrap::Where)?;
        }

        if !stmt.group_by.is_empty() {
            self.buffer.append_newline(Indent::Same);
            self.buffer.push_str("GROUP BY ");
            self.emit_expr_list(&stmt.group_by)?;
        }

        if !stmt.is_aggregate && !stmt.order_by.is_empty() {
            self.buffer.append_newline(Indent::Same);
            self.buffer.push_str("ORDER BY ");
            self.emit_order_by_list(&stmt.order_by)?;
        }

        self.dialect.limit_at_end(&mut self.buffer, stmt);

        for union in &stmt.unions {
            self.buffer.append_newline(Indent::Same);
            self.buffer.push_str("UNION ALL");
            self.buffer.append_newline(Indent::Same);
            self.emit_select(union)?;
        }

        Ok(())
    }

    fn emit_select_fields(&mut self, stmt: &SelectStatement) -> Result<()> {
        if !stmt.fields_from.is_empty() {
            for (i, table) in stmt.fields_from.iter().enumerate() {
                if i > 0 {
                    self.buffer.push_str(", ");
                }
                self.emit_table_qualifier(table)?;
                self.buffer.push_str(".*");
            }
            if !stmt.fields.is_empty() {
                self.buffer.push_str(", ");
                self.emit_expr_list(&stmt.fields)?;
            }
        } else if !stmt.fields.is_empty() {
            self.emit_expr_list(&stmt.fields)?;
        } else if self.is_nested {
            self.buffer.push_str("NULL AS tmp");
        } else {
            self.buffer.push('*');
        }
        Ok(())
    }

    fn emit_expr_list(&mut self, exprs: &[Expr]) -> Result<()> {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.buffer.push_str(", ");
            }
            self.emit_expr(expr)?;
        }
        Ok(())
    }

    fn emit_order_by_list(&mut self, items: &[OrderByExpr]) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.buffer.push_str(", ");
            }
            self.emit_expr(&item.expr)?;
            if matches!(item.direction, OrderDirection::Descending) {
                self.buffer.push_str(" DESC");
            }
        }
        Ok(())
    }

    // ---- Sources --------------------------------

    fn emit_source(&mut self, source: &Source, used_as_from: bool) -> Result<()> {
        match source {
            Source::Table(table) => {
                self.emit_table_name(table)?;
                if used_as_from {
                    self.emit_alias_suffix(table.alias.as_deref());
                }
                Ok(())
            }
            Source::Select(inner) => {
                let prev_nested = self.is_nested;
                self.is_nested = true;
                let result = self.emit_parenthesized_select(inner);
                self.is_nested = prev_nested;
                result?;
                if used_as_from {
                    self.emit_alias_suffix(inner.alias.as_deref());
                }
                Ok(())
            }
            Source::Join(join) => self.emit_join(join),
            Source::UserDefinedFunction(func) => self.emit_user_defined_function(func, used_as_from),
        }
    }

    fn emit_table_name(&mut self, table: &Table) -> Result<()> {
        self.buffer.push('[');
        if let Some(schema) = &table.schema {
            self.buffer.push_str(schema);
            self.buffer.push_str("].[");
        }
        self.buffer.push_str(&table.name);
        self.buffer.push(']');
        Ok(())
    }

    /// The qualifier used for `<Table>.*` in `SourceFieldsFrom`, and for a
    /// `Column`'s table prefix: the alias if present, else the bracketed
    /// `[Schema].[Name]`.
    fn emit_table_qualifier(&mut self, table: &Table) -> Result<()> {
        match &table.alias {
            Some(alias) => {
                self.buffer.push('[');
                self.buffer.push_str(alias);
                self.buffer.push(']');
                Ok(())
            }
            None => self.emit_table_name(table),
        }
    }

    fn emit_alias_suffix(&mut self, alias: Option<&str>) {
        if let Some(alias) = alias {
            self.buffer.push_str(" AS [");
            self.buffer.push_str(alias);
            self.buffer.push(']');
        }
    }

    fn emit_user_defined_function(
        &mut self,
        func: &UserDefinedFunctionCall,
        used_as_from: bool,
    ) -> Result<()> {
        if let Some(schema) = &func.schema {
            self.buffer.push_str(schema);
            self.buffer.push('.');
        }
        self.buffer.push_str(&func.name);
        self.buffer.push('(');
        for (i, arg) in func.args.iter().enumerate() {
            if i > 0 {
                self.buffer.push_str(", ");
            }
            self.emit_constant(arg)?;
        }
        self.buffer.push(')');
        if used_as_from {
            self.emit_alias_suffix(func.alias.as_deref());
        }
        Ok(())
    }

    fn emit_join(&mut self, join: &Join) -> Result<()> {
        let keyword = match join.join_type {
            JoinType::Inner => "INNER JOIN ",
            JoinType::Left => "LEFT OUTER JOIN ",
            JoinType::Right => "RIGHT OUTER JOIN ",
            JoinType::Cross => "CROSS JOIN ",
            JoinType::CrossApply => "CROSS APPLY ",
        };
        self.buffer.push_str(keyword);
        self.emit_source(join.source.as_ref(), true)?;
        if !join.conditions.is_empty() {
            self.buffer.push_str(" ON ( ");
            self.emit_condition_collection(&join.conditions, Wrap::Bare)?;
            self.buffer.push_str(" )");
        }
        Ok(())
    }

    // ---- Column ---------------------------------

    fn emit_column(&mut self, column: &Column) -> Result<()> {
        if let Some(table) = &column.table {
            if !table.name.is_empty() {
                self.emit_table_qualifier(table)?;
                self.buffer.push('.');
            }
        }
        if column.is_wildcard() {
            self.buffer.push('*');
        } else if column.is_parameter_reference() {
            self.buffer.push_str(&column.name);
        } else {
            self.buffer.push('[');
            self.buffer.push_str(&column.name);
            self.buffer.push(']');
            self.emit_alias_suffix(column.alias.as_deref());
        }
        Ok(())
    }

    // ---- WHERE / ON / ConditionCollection ------------------------------

    fn emit_condition_collection(&mut self, coll: &ConditionCollection, wrap: Wrap) -> Result<()> {
        match wrap {
            Wrap::Where => self.buffer.push_str("WHERE "),
            Wrap::Parens => self.buffer.push('('),
            Wrap::Bare => {}
        }
        if coll.not {
            self.buffer.push_str("NOT ");
        }
        for (i, item) in coll.items.iter().enumerate() {
            if i > 0 {
                self.buffer.append_newline(Indent::Same);
                let keyword = match item.relationship {
                    Relationship::And => "AND ",
                    Relationship::Or => "OR ",
                };
                self.buffer.push_str(keyword);
            }
            self.emit_condition_expr(&item.expr)?;
        }
        if matches!(wrap, Wrap::Parens) {
            self.buffer.push(')');
        }
        Ok(())
    }

    fn emit_condition_expr(&mut self, expr: &ConditionExpr) -> Result<()> {
        match expr {
            ConditionExpr::Condition(condition) => self.emit_condition(condition),
            ConditionExpr::Exists(exists) => self.emit_exists(exists),
            ConditionExpr::Nested(nested) => self.emit_condition_collection(nested, Wrap::Parens),
        }
    }

    fn emit_condition(&mut self, condition: &Condition) -> Result<()> {
        if condition.not {
            self.buffer.push_str("NOT ");
        }
        if matches!(condition.operator, Operator::Equals | Operator::NotEquals) {
            let field_is_null = condition.field.is_null_constant();
            let value_is_null = condition.value.is_null_constant();
            if field_is_null || value_is_null {
                let other = if value_is_null {
                    condition.field.as_ref()
                } else {
                    condition.value.as_ref()
                };
                self.emit_expr(other)?;
                self.buffer.push_str(if matches!(condition.operator, Operator::NotEquals) {
                    " IS NOT NULL"
                } else {
                    " IS NULL"
                });
                return Ok(());
            }
        }
        match condition.operator {
            Operator::Equals => self.emit_binary_condition(condition, "="),
            Operator::NotEquals => self.emit_binary_condition(condition, "<>"),
            Operator::IsLessThan => self.emit_binary_condition(condition, "<"),
            Operator::IsLessThanOrEqualTo => self.emit_binary_condition(condition, "<="),
            Operator::IsGreaterThan => self.emit_binary_condition(condition, ">"),
            Operator::IsGreaterThanOrEqualTo => self.emit_binary_condition(condition, ">="),
            Operator::IsIn => self.emit_is_in(condition),
            Operator::Contains => self.emit_like(condition, "'%' + ", " + '%'"),
            Operator::StartsWith => self.emit_like(condition, "", " + '%'"),
            Operator::EndsWith => self.emit_like(condition, "'%' + ", ""),
        }
    }

    fn emit_binary_condition(&mut self, condition: &Condition, op: &str) -> Result<()> {
        self.emit_expr(&condition.field)?;
        self.buffer.push(' ');
        self.buffer.push_str(op);
        self.buffer.push(' ');
        self.emit_expr(&condition.value)
    }

    fn emit_is_in(&mut self, condition: &Condition) -> Result<()> {
        if let Expr::Constant(constant) = condition.value.as_ref() {
            if constant.value.is_empty_list() {
                self.buffer.push_str(" 0 <> 0");
                return Ok(());
            }
        }
        self.emit_expr(&condition.field)?;
        self.buffer.push_str(" IN (");
        self.buffer.append_newline(Indent::Inner);
        self.emit_expr(&condition.value)?;
        self.buffer.append_newline(Indent::Outer);
        self.buffer.push(')');
        Ok(())
    }

    fn emit_like(&mut self, condition: &Condition, prefix: &str, suffix: &str) -> Result<()> {
        self.emit_expr(&condition.field)?;
        self.buffer.push_str(" LIKE ");
        self.buffer.push_str(prefix);
        self.emit_expr(&condition.value)?;
        self.buffer.push_str(suffix);
        Ok(())
    }

    fn emit_exists(&mut self, exists: &Exists) -> Result<()> {
        if exists.not {
            self.buffer.push_str("NOT ");
        }
        self.buffer.push_str("EXISTS (");
        self.buffer.append_newline(Indent::Inner);
        self.emit_select(&exists.select)?;
        self.buffer.append_newline(Indent::Outer);
        self.buffer.push(')');
        Ok(())
    }

    // ---- Scalar expression dispatch  ---------------------

    fn emit_expr(&mut self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Constant(constant) => {
                self.emit_constant(&constant.value)?;
                self.emit_alias_suffix(constant.alias.as_deref());
                Ok(())
            }
            Expr::Column(column) => self.emit_column(column),
            Expr::Literal(literal) => {
                self.buffer.push_str(&literal.text);
                Ok(())
            }
            Expr::Select(select_expr) => self.emit_select_expression(select_expr),
            Expr::Aggregate(aggregate) => self.emit_aggregate(aggregate),
            Expr::RowNumber(row_number) => self.emit_row_number(row_number),
            Expr::ConditionalCase(case) => self.emit_conditional_case(case),
            Expr::Coalesce(coalesce) => self.emit_coalesce(coalesce),
            Expr::Convert(convert) => self.emit_convert(convert),
            Expr::String(string_fn) => self.emit_string_fn(string_fn),
            Expr::Date(date_fn) => self.emit_date_fn(date_fn),
            Expr::Numeric(numeric_fn) => self.emit_numeric_fn(numeric_fn),
            Expr::BinaryOp(op) => self.emit_binary_op(op),
            Expr::UnaryOp(op) => self.emit_unary_op(op),
            Expr::ConditionPredicate(collection) => self.emit_condition_predicate(collection),
        }
    }

    fn emit_constant(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => {
                self.buffer.push_str("NULL");
                Ok(())
            }
            Value::Bool(flag) => {
                self.buffer.push_str(if *flag { "1" } else { "0" });
                Ok(())
            }
            _ if value.is_empty_string() => {
                self.buffer.push_str("''");
                Ok(())
            }
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.buffer.push_str(", ");
                    }
                    self.emit_constant(item)?;
                }
                Ok(())
            }
            Value::Enum(n) => {
                let index = self.sink.intern(Value::Int(*n));
                self.buffer.push('@');
                self.buffer.push_str(&index.to_string());
                Ok(())
            }
            other => {
                let index = self.sink.intern(other.clone());
                self.buffer.push('@');
                self.buffer.push_str(&index.to_string());
                Ok(())
            }
        }
    }

    fn emit_select_expression(&mut self, select_expr: &crate::model::SelectExpression) -> Result<()> {
        let prev_nested = self.is_nested;
        self.is_nested = true;
        let result = self.emit_parenthesized_select(&select_expr.select);
        self.is_nested = prev_nested;
        result?;
        self.emit_alias_suffix(select_expr.alias.as_deref());
        Ok(())
    }

    fn emit_aggregate(&mut self, aggregate: &Aggregate) -> Result<()> {
        let name = match aggregate.aggregate_type {
            AggregateType::Count => "COUNT",
            AggregateType::BigCount => "COUNT_BIG",
            AggregateType::Min => "MIN",
            AggregateType::Max => "MAX",
            AggregateType::Sum => "SUM",
            AggregateType::Average => "AVG",
        };
        self.buffer.push_str(name);
        self.buffer.push('(');
        if aggregate.is_distinct {
            self.buffer.push_str("DISTINCT ");
        }
        match &aggregate.field {
            Some(field) => self.emit_expr(field)?,
            None => {
                if matches!(
                    aggregate.aggregate_type,
                    AggregateType::Count | AggregateType::BigCount
                ) {
                    self.buffer.push('*');
                }
            }
        }
        self.buffer.push(')');
        Ok(())
    }

    fn emit_condition_predicate(&mut self, collection: &ConditionCollection) -> Result<()> {
        self.buffer.push_str("(CASE WHEN ");
        self.emit_condition_collection(collection, Wrap::Bare)?;
        self.buffer.push_str(" THEN 1 ELSE 0 END)");
        Ok(())
    }

    fn emit_row_number(&mut self, row_number: &RowNumber) -> Result<()> {
        self.buffer.push_str("ROW_NUMBER() OVER(ORDER BY ");
        self.emit_order_by_list(&row_number.order_by)?;
        self.buffer.push_str(") AS RowNumber");
        Ok(())
    }

    fn emit_conditional_case(&mut self, case: &ConditionalCase) -> Result<()> {
        match &case.test {
            CaseTest::Condition(_) => {
                self.buffer.push_str("(CASE");
                self.emit_case_when_chain(case)?;
                self.buffer.push_str(" END)");
                Ok(())
            }
            CaseTest::Value(test_expr) => {
                self.buffer.push_str("(CASE ");
                self.emit_expr(test_expr)?;
                self.buffer.push_str(" WHEN 0 THEN ");
                self.emit_case_branch(&case.if_false)?;
                self.buffer.push_str(" ELSE ");
                self.emit_expr(&case.if_true)?;
                self.buffer.push_str(" END)");
                Ok(())
            }
        }
    }

    /// Emits ` WHEN <test> THEN <ifTrue>` for `case` and recurses into its
    /// `if_false` chain, flattening successive condition-tested cases into
    /// more `WHEN` clauses.
    fn emit_case_when_chain(&mut self, case: &ConditionalCase) -> Result<()> {
        let condition = match &case.test {
            CaseTest::Condition(condition) => condition,
            CaseTest::Value(_) => unreachable!("caller only enters this chain for condition tests"),
        };
        self.buffer.push_str(" WHEN ");
        self.emit_condition(condition)?;
        self.buffer.push_str(" THEN ");
        self.emit_expr(&case.if_true)?;
        match &case.if_false {
            CaseBranch::Case(next) if matches!(next.test, CaseTest::Condition(_)) => {
                self.emit_case_when_chain(next)
            }
            CaseBranch::Case(next) => {
                self.buffer.push_str(" ELSE ");
                self.emit_conditional_case(next)
            }
            CaseBranch::Value(value) => {
                self.buffer.push_str(" ELSE ");
                self.emit_expr(value)
            }
        }
    }

    fn emit_case_branch(&mut self, branch: &CaseBranch) -> Result<()> {
        match branch {
            CaseBranch::Value(value) => self.emit_expr(value),
            CaseBranch::Case(case) => self.emit_conditional_case(case),
        }
    }

    fn emit_coalesce(&mut self, coalesce: &CoalesceFunction) -> Result<()> {
        self.buffer.push_str("COALESCE(");
        self.emit_expr(&coalesce.head)?;
        let mut tail = &coalesce.tail;
        while let Some(next) = tail {
            self.buffer.push_str(", ");
            self.emit_expr(&next.head)?;
            tail = &next.tail;
        }
        self.buffer.push(')');
        Ok(())
    }

    fn emit_convert(&mut self, convert: &ConvertFunction) -> Result<()> {
        self.buffer.push_str("CONVERT(VARCHAR, ");
        self.emit_expr(&convert.expr)?;
        self.buffer.push(')');
        Ok(())
    }

    fn emit_argument_plus_one(&mut self, expr: &Expr) -> Result<()> {
        self.buffer.push('(');
        self.emit_expr(expr)?;
        self.buffer.push_str(" + 1)");
        Ok(())
    }

    fn emit_string_fn(&mut self, func: &StringFunction) -> Result<()> {
        match func {
            StringFunction::Len(arg) => {
                self.buffer.push_str("LEN(");
                self.emit_expr(arg)?;
                self.buffer.push(')');
            }
            StringFunction::Substring { arg, start, length } => {
                self.buffer.push_str("SUBSTRING(");
                self.emit_expr(arg)?;
                self.buffer.push_str(", ");
                self.emit_argument_plus_one(start)?;
                self.buffer.push_str(", ");
                self.emit_expr(length)?;
                self.buffer.push(')');
            }
            StringFunction::Stuff { arg, start, length } => {
                self.buffer.push_str("STUFF(");
                self.emit_expr(arg)?;
                self.buffer.push_str(", ");
                self.emit_argument_plus_one(start)?;
                self.buffer.push_str(", ");
                self.emit_expr(length)?;
                self.buffer.push_str(", '')");
            }
            StringFunction::CharIndex {
                needle,
                haystack,
                start,
            } => {
                self.buffer.push_str("(CHARINDEX(");
                self.emit_expr(needle)?;
                self.buffer.push_str(", ");
                self.emit_expr(haystack)?;
                if let Some(start) = start {
                    self.buffer.push_str(", ");
                    self.emit_expr(start)?;
                }
                self.buffer.push_str(") - 1)");
            }
            StringFunction::Upper(arg) => {
                self.buffer.push_str("UPPER(");
                self.emit_expr(arg)?;
                self.buffer.push(')');
            }
            StringFunction::Lower(arg) => {
                self.buffer.push_str("LOWER(");
                self.emit_expr(arg)?;
                self.buffer.push(')');
            }
            StringFunction::Replace {
                arg,
                find,
                replacement,
            } => {
                self.buffer.push_str("REPLACE(");
                self.emit_expr(arg)?;
                self.buffer.push_str(", ");
                self.emit_expr(find)?;
                self.buffer.push_str(", ");
                self.emit_expr(replacement)?;
                self.buffer.push(')');
            }
            StringFunction::Trim(arg) => {
                self.buffer.push_str("RTRIM(LTRIM(");
                self.emit_expr(arg)?;
                self.buffer.push_str("))");
            }
            StringFunction::Compare { left, right } => {
                self.buffer.push_str("(CASE WHEN ");
                self.emit_expr(left)?;
                self.buffer.push_str(" = ");
                self.emit_expr(right)?;
                self.buffer.push_str(" THEN 0 WHEN ");
                self.emit_expr(left)?;
                self.buffer.push_str(" < ");
                self.emit_expr(right)?;
                self.buffer.push_str(" THEN -1 ELSE 1 END)");
            }
            StringFunction::Concat(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        self.buffer.push_str(" + ");
                    }
                    self.emit_expr(part)?;
                }
            }
        }
        Ok(())
    }

    fn date_part_token(part: DatePart) -> &'static str {
        match part {
            DatePart::Year => "yy",
            DatePart::Quarter => "qq",
            DatePart::Month => "mm",
            DatePart::DayOfYear => "dy",
            DatePart::Day => "dd",
            DatePart::Week => "wk",
            DatePart::DayOfWeek => "dw",
            DatePart::Hour => "hh",
            DatePart::Minute => "mi",
            DatePart::Second => "ss",
            DatePart::Millisecond => "ms",
        }
    }

    fn emit_date_fn(&mut self, func: &DateFunction) -> Result<()> {
        match func {
            DateFunction::Part { part, arg } => match part {
                DatePart::DayOfWeek => {
                    self.buffer.push_str("(DATEPART(dw, ");
                    self.emit_expr(arg)?;
                    self.buffer.push_str(") - 1)");
                }
                DatePart::DayOfYear => {
                    self.buffer.push_str("(DATEPART(dy, ");
                    self.emit_expr(arg)?;
                    self.buffer.push_str(") - 1)");
                }
                other => {
                    self.buffer.push_str("DATEPART(");
                    self.buffer.push_str(Self::date_part_token(*other));
                    self.buffer.push_str(", ");
                    self.emit_expr(arg)?;
                    self.buffer.push(')');
                }
            },
            DateFunction::Add { part, amount, arg } => {
                self.buffer.push_str("DATEADD(");
                self.buffer.push_str(Self::date_part_token(*part));
                self.buffer.push_str(", ");
                self.emit_expr(amount)?;
                self.buffer.push_str(", ");
                self.emit_expr(arg)?;
                self.buffer.push(')');
            }
            DateFunction::Diff { part, start, end } => {
                self.buffer.push_str("DATEDIFF(");
                self.buffer.push_str(Self::date_part_token(*part));
                self.buffer.push_str(", ");
                self.emit_expr(start)?;
                self.buffer.push_str(", ");
                self.emit_expr(end)?;
                self.buffer.push(')');
            }
            DateFunction::DateOnly(arg) => {
                self.buffer.push_str("DATEADD(dd, DATEDIFF(dd, 0, ");
                self.emit_expr(arg)?;
                self.buffer.push_str("), 0)");
            }
            DateFunction::Construct {
                year,
                month,
                day,
                time,
            } => {
                self.buffer.push_str("CONVERT(DATETIME, ");
                self.emit_expr(year)?;
                self.buffer.push_str(" + '/' + ");
                self.emit_expr(month)?;
                self.buffer.push_str(" + '/' + ");
                self.emit_expr(day)?;
                if let Some(DateConstructTime { hour, minute, second }) = time {
                    self.buffer.push_str(" + ' ' + ");
                    self.emit_expr(hour)?;
                    self.buffer.push_str(" + ':' + ");
                    self.emit_expr(minute)?;
                    self.buffer.push_str(" + ':' + ");
                    self.emit_expr(second)?;
                }
                self.buffer.push(')');
            }
        }
        Ok(())
    }

    fn emit_numeric_fn(&mut self, func: &NumericFunction) -> Result<()> {
        match func {
            NumericFunction::Abs(arg) => self.emit_wrapped("ABS", arg)?,
            NumericFunction::Ceiling(arg) => self.emit_wrapped("CEILING", arg)?,
            NumericFunction::Floor(arg) => self.emit_wrapped("FLOOR", arg)?,
            NumericFunction::Round { arg, precision } => {
                self.buffer.push_str("ROUND(");
                self.emit_expr(arg)?;
                self.buffer.push_str(", ");
                self.emit_expr(precision)?;
                self.buffer.push(')');
            }
            NumericFunction::Truncate(arg) => {
                self.buffer.push_str("ROUND(");
                self.emit_expr(arg)?;
                self.buffer.push_str(", 0, 1)");
            }
            NumericFunction::Sign(arg) => self.emit_wrapped("SIGN", arg)?,
            NumericFunction::Power { base, exponent } => {
                self.buffer.push_str("POWER(");
                self.emit_expr(base)?;
                self.buffer.push_str(", ");
                self.emit_expr(exponent)?;
                self.buffer.push(')');
            }
            NumericFunction::Sqrt(arg) => self.emit_wrapped("SQRT", arg)?,
            NumericFunction::Exp(arg) => self.emit_wrapped("EXP", arg)?,
            NumericFunction::Log(arg) => self.emit_wrapped("LOG", arg)?,
            NumericFunction::Log10(arg) => self.emit_wrapped("LOG10", arg)?,
            NumericFunction::Trig { function, arg } => {
                let name = match function {
                    TrigFunction::Sin => "SIN",
                    TrigFunction::Cos => "COS",
                    TrigFunction::Tan => "TAN",
                    TrigFunction::Asin => "ASIN",
                    TrigFunction::Acos => "ACOS",
                    TrigFunction::Atan => "ATAN",
                    TrigFunction::Sinh => "SINH",
                    TrigFunction::Cosh => "COSH",
                    TrigFunction::Tanh => "TANH",
                    TrigFunction::Cot => "COT",
                };
                self.emit_wrapped(name, arg)?;
            }
        }
        Ok(())
    }

    fn emit_wrapped(&mut self, name: &str, arg: &Expr) -> Result<()> {
        self.buffer.push_str(name);
        self.buffer.push('(');
        self.emit_expr(arg)?;
        self.buffer.push(')');
        Ok(())
    }

    /// Maps a binary operator to its T-SQL token. `BitwiseOr` and
    /// `BitwiseExclusiveOr` both map to `|` here, preserving the source
    /// system's behaviour verbatim.
    fn binary_op_token(operator: BinaryOperator) -> &'static str {
        match operator {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
            BinaryOperator::ExclusiveOr => "^",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseExclusiveOr => "|",
            BinaryOperator::BitwiseNot => "~",
            BinaryOperator::LeftShift | BinaryOperator::RightShift => {
                unreachable!("shifts are expanded before reaching this mapping")
            }
        }
    }

    fn emit_binary_op(&mut self, op: &BinaryOperation) -> Result<()> {
        match op.operator {
            BinaryOperator::LeftShift => {
                self.buffer.push('(');
                self.emit_expr(&op.left)?;
                self.buffer.push_str(" * POWER(2, ");
                self.emit_expr(&op.right)?;
                self.buffer.push_str("))");
            }
            BinaryOperator::RightShift => {
                self.buffer.push('(');
                self.emit_expr(&op.left)?;
                self.buffer.push_str(" / POWER(2, ");
                self.emit_expr(&op.right)?;
                self.buffer.push_str("))");
            }
            other => {
                let token = Self::binary_op_token(other);
                self.buffer.push('(');
                self.emit_expr(&op.left)?;
                self.buffer.push(' ');
                self.buffer.push_str(token);
                self.buffer.push(' ');
                self.emit_expr(&op.right)?;
                self.buffer.push(')');
            }
        }
        Ok(())
    }

    fn emit_unary_op(&mut self, op: &UnaryOperation) -> Result<()> {
        match op.operator {
            UnaryOperator::Not => self.buffer.push_str("NOT "),
            UnaryOperator::Negate => self.buffer.push('-'),
        }
        self.emit_expr(&op.expr)
    }
}
