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

/// How a newline should adjust indentation depth before the next line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Indent {
    /// Leave depth unchanged.
    Same,
    /// Step into a nested block.
    Inner,
    /// Step out of a nested block.
    Outer,
}

/// A growable text buffer with an indentation depth counter.
///
/// `AppendNewLine` writes a newline, applies the requested [`Indent`] step,
/// then pads with `depth * 2` spaces -- this is the only source of
/// indentation in emitted SQL text.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    text: String,
    depth: i32,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            depth: 0,
        }
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// `Indent(Same)` is a no-op; `Inner` increments depth; `Outer`
    /// decrements it and asserts depth never goes negative.
    pub fn indent(&mut self, style: Indent) {
        match style {
            Indent::Same => {}
            Indent::Inner => self.depth += 1,
            Indent::Outer => {
                self.depth -= 1;
                debug_assert!(
                    self.depth >= 0,
                    "indentation depth dropped below zero: emitter bug"
                );
            }
        }
    }

    pub fn append_newline(&mut self, style: Indent) {
        self.indent(style);
        self.text.push('\n');
        for _ in 0..(self.depth.max(0) * 2) {
            self.text.push(' ');
        }
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_indent_is_a_no_op() {
        let mut buf = TextBuffer::new();
        buf.indent(Indent::Same);
        assert_eq!(buf.depth(), 0);
    }

    #[test]
    fn inner_then_outer_returns_to_zero() {
        let mut buf = TextBuffer::new();
        buf.indent(Indent::Inner);
        buf.indent(Indent::Inner);
        assert_eq!(buf.depth(), 2);
        buf.indent(Indent::Outer);
        buf.indent(Indent::Outer);
        assert_eq!(buf.depth(), 0);
    }

    #[test]
    fn newline_pads_by_twice_the_depth() {
        let mut buf = TextBuffer::new();
        buf.indent(Indent::Inner);
        buf.append_newline(Indent::Same);
        assert_eq!(buf.as_str(), "\n  ");
    }

    #[test]
    #[should_panic]
    fn outer_below_zero_panics() {
        let mut buf = TextBuffer::new();
        buf.indent(Indent::Outer);
    }
}
