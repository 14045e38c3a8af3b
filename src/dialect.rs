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

//! The dialect extension seam.
//!
//! `Emitter` calls into a `&dyn Dialect` at exactly two points in the plain
//! `SELECT` path: immediately after `SELECT [DISTINCT]` and immediately
//! before the first `UNION ALL`. The default implementation on
//! [`TSqlDialect`] does nothing at either hook, since T-SQL paging is
//! expressed entirely through the `ROW_NUMBER()` rewrite rather than a
//! `TOP`/`OFFSET` clause the emitter could splice in here. A dialect that
//! does support a limit clause (`TOP N`, `LIMIT N`) would override one hook
//! or the other to emit it, and the rewriter would then skip the paging
//! envelope for that dialect -- that composition is left to a future
//! dialect, not implemented by this crate.

use crate::buffer::TextBuffer;
use crate::model::SelectStatement;

/// Per-product emission hooks. `Emitter` is generic over `&dyn Dialect`
/// rather than over a type parameter, since a single build always targets
/// exactly one dialect chosen at runtime.
pub trait Dialect {
    /// Called right after `SELECT [DISTINCT] ` is written, before the field
    /// list. A dialect with a `TOP N` / `LIMIT N` prefix clause overrides
    /// this; the base implementation writes nothing.
    #[allow(unused_variables)]
    fn limit_at_start(&self, buffer: &mut TextBuffer, stmt: &SelectStatement) {}

    /// Called after every clause of a plain `SELECT` has been written, before
    /// any `UNION ALL` branch. A dialect with a trailing `LIMIT`/`FETCH`
    /// clause overrides this; the base implementation writes nothing, which
    /// means `Limit`/`StartIndex` are silently ignored here -- paging for
    /// T-SQL is handled entirely by the `ROW_NUMBER()` rewrite before this
    /// hook ever runs.
    #[allow(unused_variables)]
    fn limit_at_end(&self, buffer: &mut TextBuffer, stmt: &SelectStatement) {}
}

/// The Microsoft SQL Server dialect. Bracket-quoted identifiers and
/// `ROW_NUMBER()` paging are baked into the emitter itself since this crate
/// targets T-SQL exclusively; `TSqlDialect` exists as the concrete seam a
/// caller passes to [`crate::build_with_dialect`], and as the type the
/// default [`crate::build`] uses.
#[derive(Clone, Copy, Debug, Default)]
pub struct TSqlDialect;

impl Dialect for TSqlDialect {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Table;

    #[test]
    fn base_dialect_writes_nothing_at_either_hook() {
        let dialect = TSqlDialect;
        let stmt = SelectStatement::from_table(Table::new("Orders"));
        let mut buffer = TextBuffer::new();
        dialect.limit_at_start(&mut buffer, &stmt);
        dialect.limit_at_end(&mut buffer, &stmt);
        assert_eq!(buffer.as_str(), "");
    }
}
