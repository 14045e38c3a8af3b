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

use core::fmt;

/// Everything that can go wrong while lowering a [`crate::model::Statement`]
/// into SQL text.
///
/// Hand-rolled rather than built on `thiserror`: a plain enum with a manual
/// [`fmt::Display`] impl. The `std::error::Error` impl is behind the `std`
/// feature so a caller who only needs `Display` isn't forced to enable it.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The top-level `Statement` was neither `Select` nor `Generic`.
    UnsupportedStatementKind(String),
    /// A field-emission dispatch site hit a node kind it doesn't handle.
    UnsupportedFieldKind(String),
    /// An `AggregateType` value outside its declared domain.
    UnknownAggregate(String),
    /// A `BinaryOperator`/`UnaryOperator` value outside its declared domain.
    UnknownOperator(String),
    /// A multi-element `ConditionCollection` had a `Relationship` other than
    /// `And`/`Or` past position 0.
    InvalidConditionRelationship(String),
    /// A `Select` source was not `Table`, `Select`, `Join`, or `UserDefinedFunction`.
    InvalidSourceKind(String),
    /// A `DatePart` value outside its declared domain.
    InvalidDatePart(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedStatementKind(kind) => {
                write!(f, "unsupported top-level statement kind: {kind}")
            }
            Error::UnsupportedFieldKind(kind) => {
                write!(f, "unsupported field expression kind: {kind}")
            }
            Error::UnknownAggregate(kind) => write!(f, "unknown aggregate type: {kind}"),
            Error::UnknownOperator(kind) => write!(f, "unknown operator: {kind}"),
            Error::InvalidConditionRelationship(kind) => {
                write!(f, "invalid condition relationship: {kind}")
            }
            Error::InvalidSourceKind(kind) => write!(f, "invalid select source kind: {kind}"),
            Error::InvalidDatePart(kind) => write!(f, "invalid date part: {kind}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
