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

use crate::model::Value;

/// An ordered, de-duplicating list of bound parameter values.
///
/// `intern` is a linear scan rather than a hash map: builds carry at most a
/// few dozen distinct parameters, so the simplicity of host-equality
/// comparison (including the `Value::Float` NaN/precision caveats of plain
/// `PartialEq`) outweighs any lookup cost here.
#[derive(Clone, Debug, Default)]
pub struct ParameterSink {
    values: Vec<Value>,
}

impl ParameterSink {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Returns the index of an existing structurally-equal value, or
    /// appends `value` and returns its fresh index.
    pub fn intern(&mut self, value: Value) -> usize {
        if let Some(index) = self.values.iter().position(|existing| existing == &value) {
            return index;
        }
        self.values.push(value);
        self.values.len() - 1
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_values_share_a_slot() {
        let mut sink = ParameterSink::new();
        let a = sink.intern(Value::Int(5));
        let b = sink.intern(Value::Int(5));
        assert_eq!(a, b);
        assert_eq!(sink.values(), &[Value::Int(5)]);
    }

    #[test]
    fn distinct_values_get_distinct_slots() {
        let mut sink = ParameterSink::new();
        let a = sink.intern(Value::Int(5));
        let b = sink.intern(Value::Str("5".into()));
        assert_ne!(a, b);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn null_is_not_a_distinct_runtime_type_match() {
        let mut sink = ParameterSink::new();
        sink.intern(Value::Null);
        sink.intern(Value::Int(0));
        assert_eq!(sink.len(), 2);
    }
}
