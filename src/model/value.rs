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

#[cfg(feature = "decimal")]
use bigdecimal::BigDecimal;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A host-language value carried by a [`ConstantPart`].
///
/// Covers every shape a bound parameter or inline constant can take:
/// booleans, numbers, strings, byte blobs, enum-like integers, and nested
/// lists (for `IN (...)`-style constants) are the shapes the emitter and
/// [`crate::params::ParameterSink`] actually need to special-case.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    #[cfg(feature = "decimal")]
    Decimal(BigDecimal),
    Str(String),
    Bytes(Vec<u8>),
    /// An enumeration member, stored as its 64-bit signed integer value.
    Enum(i64),
    /// A non-string, non-byte-array iterable constant (e.g. an `IN (...)` list).
    List(Vec<Value>),
}

impl Value {
    /// True for the empty-string special case in the parameter encoding rules.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Value::Str(s) if s.is_empty())
    }

    /// True for the empty-iterable special case used by the `IsIn` shortcut.
    pub fn is_empty_list(&self) -> bool {
        matches!(self, Value::List(items) if items.is_empty())
    }
}

/// A constant leaf value in the expression tree, with an optional result alias.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstantPart {
    pub value: Value,
    pub alias: Option<String>,
}

impl ConstantPart {
    pub fn new(value: Value) -> Self {
        Self { value, alias: None }
    }

    pub fn with_alias(value: Value, alias: impl Into<String>) -> Self {
        Self {
            value,
            alias: Some(alias.into()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }
}
