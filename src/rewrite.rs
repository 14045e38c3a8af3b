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

//! Pre-emission transformations on a `SelectStatement`.
//!
//! Every rewrite here works by cloning the statement and toggling the
//! relevant flag on the clone (an
//! mutate-then-restore), so the caller's tree is left untouched -- the
//! self-healing property falls out of ownership rather than careful
//! bookkeeping.

use crate::model::{
    Column, Condition, ConstantPart, Expr, Operator, OrderByExpr, RowNumber, SelectStatement,
    Source, Table, Value,
};

/// Which rewrite, if any, owns the emission of a `SelectStatement`, in
/// priority order: paging first, then the boolean-reduction rewrites, then
/// the aggregate order-by suppression.
pub enum SelectPlan {
    /// Row-number paging envelope; emit `inner` via the ordinary plain
    /// `SELECT` path (it already wraps the original query as a nested source).
    Paging(SelectStatement),
    /// `SELECT CASE WHEN EXISTS ( <inner> ) THEN 1 ELSE 0 END`.
    Any(SelectStatement),
    /// `SELECT CASE WHEN NOT EXISTS ( <inner> ) THEN 1 ELSE 0 END`.
    All(SelectStatement),
    /// `SELECT CASE WHEN <item> IN ( <inner> ) THEN 1 ELSE 0 END`.
    Contains { inner: SelectStatement, item: Expr },
    /// No reduction rewrite applies; `statement` may still have had its
    /// `ORDER BY` suppressed by the aggregate rule.
    Plain(SelectStatement),
}

const ROW_NUMBER_TABLE_ALIAS: &str = "RowNumberTable";
const ROW_NUMBER_COLUMN: &str = "RowNumber";

/// Chooses and applies the first matching rewrite for `stmt`.
pub fn plan(stmt: &SelectStatement) -> SelectPlan {
    if stmt.needs_rewrite() {
        if stmt.start_index > 0 {
            return SelectPlan::Paging(build_paging_envelope(stmt));
        }
        if stmt.is_any {
            let mut inner = stmt.clone();
            inner.is_any = false;
            return SelectPlan::Any(inner);
        }
        if stmt.is_all {
            let mut inner = stmt.clone();
            inner.is_all = false;
            inner.conditions.not = !inner.conditions.not;
            return SelectPlan::All(inner);
        }
        let mut inner = stmt.clone();
        inner.is_contains = false;
        let item = inner
            .contains_item
            .take()
            .map(|boxed| *boxed)
            .unwrap_or_else(|| Expr::Column(Column::new(ROW_NUMBER_COLUMN)));
        return SelectPlan::Contains { inner, item };
    }
    if stmt.has_aggregate_field() && !stmt.order_by.is_empty() {
        let mut plain = stmt.clone();
        plain.order_by.clear();
        return SelectPlan::Plain(plain);
    }
    SelectPlan::Plain(stmt.clone())
}

/// Builds the outer `SELECT ... FROM ( <inner> ) AS RowNumberTable WHERE
/// RowNumber > @start [AND RowNumber <= @start+@limit] ORDER BY RowNumber`
/// envelope that turns a `Limit`/`StartIndex` pair into a paged query.
fn build_paging_envelope(stmt: &SelectStatement) -> SelectStatement {
    let mut inner = stmt.clone();
    inner.start_index = 0;
    inner.limit = 0;
    inner.order_by = Vec::new();

    let row_number_field = Expr::RowNumber(RowNumber {
        order_by: stmt.order_by.clone(),
    });

    if inner.fields.is_empty() && inner.fields_from.is_empty() {
        if let Source::Table(table) = inner.source.as_ref() {
            inner.fields_from.push(table.clone());
        }
    }
    inner.fields.push(row_number_field);

    let outer_fields: Vec<Expr> = stmt
        .fields
        .iter()
        .filter_map(|field| match field {
            Expr::Column(col) => Some(Expr::Column(Column {
                table: Some(Table::new(ROW_NUMBER_TABLE_ALIAS)),
                name: col.name.clone(),
                alias: col.alias.clone(),
            })),
            _ => None,
        })
        .collect();

    let mut outer = SelectStatement::from_table(Table::new(ROW_NUMBER_TABLE_ALIAS));
    outer.source = Box::new(Source::Select(Box::new(inner)));
    if let Source::Select(nested) = outer.source.as_mut() {
        nested.alias = Some(ROW_NUMBER_TABLE_ALIAS.to_string());
    }
    outer.fields = outer_fields;

    let row_number_col = Expr::Column(Column::new(ROW_NUMBER_COLUMN));
    outer
        .conditions
        .and(Condition::new(
            row_number_col.clone(),
            Operator::IsGreaterThan,
            Expr::Constant(ConstantPart::new(Value::Int(stmt.start_index as i64))),
        ));
    if stmt.limit > 0 {
        let upper = stmt.start_index as i64 + stmt.limit as i64;
        outer.conditions.and(Condition::new(
            row_number_col.clone(),
            Operator::IsLessThanOrEqualTo,
            Expr::Constant(ConstantPart::new(Value::Int(upper))),
        ));
    }
    outer.order_by.push(OrderByExpr::asc(row_number_col));
    outer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SelectStatement {
        let mut stmt = SelectStatement::from_table(Table::new("Orders"));
        stmt.order_by
            .push(OrderByExpr::asc(Expr::Column(Column::new("Date"))));
        stmt.start_index = 20;
        stmt.limit = 10;
        stmt
    }

    #[test]
    fn paging_envelope_carries_both_bounds() {
        let outer = match plan(&sample()) {
            SelectPlan::Paging(outer) => outer,
            _ => panic!("expected paging plan"),
        };
        assert_eq!(outer.conditions.items.len(), 2);
        assert_eq!(outer.order_by.len(), 1);
    }

    #[test]
    fn original_tree_is_untouched() {
        let original = sample();
        let before = original.clone();
        let _ = plan(&original);
        assert_eq!(original, before);
    }

    #[test]
    fn any_rewrite_clears_flag_on_the_clone_only() {
        let mut stmt = SelectStatement::from_table(Table::new("T"));
        stmt.is_any = true;
        let inner = match plan(&stmt) {
            SelectPlan::Any(inner) => inner,
            _ => panic!("expected any plan"),
        };
        assert!(!inner.is_any);
        assert!(stmt.is_any);
    }
}
