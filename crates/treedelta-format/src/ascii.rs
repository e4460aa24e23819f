//! Line-oriented ASCII rendering of a diff against its left value.
//!
//! The left value is walked in its own order. Unchanged items print with a
//! blank marker, deleted items with `-`, and every item the diff introduces
//! with `+` after the left walk of its container. A modified item prints its
//! old value then its new value. Commas follow JSON rules for the left
//! container's size: the last item of the left walk has none, and neither do
//! the additions printed after it.

use std::fmt::Write as _;

use colored::Colorize;
use tracing::trace;

use treedelta_diff::{Delta, Diff};
use treedelta_types::{write_json_str, Map, Position, Value, ValueKind};

use crate::error::{FormatError, FormatResult};
use crate::options::FormatOptions;

/// The marker column of a rendered line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Same,
    Added,
    Deleted,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::Same => " ",
            Marker::Added => "+",
            Marker::Deleted => "-",
        }
    }
}

/// One container level being rendered.
#[derive(Debug)]
struct Level {
    /// Items of the left container that still have to print. A comma is
    /// written while this stays above zero.
    remaining: isize,
    in_array: bool,
}

/// Renders a [`Diff`] as annotated JSON-like text.
pub struct AsciiFormatter<'a> {
    options: &'a FormatOptions,
    out: String,
    levels: Vec<Level>,
    marker: Marker,
    indent: usize,
    line: String,
}

impl<'a> AsciiFormatter<'a> {
    pub fn new(options: &'a FormatOptions) -> Self {
        Self {
            options,
            out: String::new(),
            levels: Vec::new(),
            marker: Marker::Same,
            indent: 0,
            line: String::new(),
        }
    }

    /// Render `diff`, which must have been computed with `left` as the left
    /// side. The output has no trailing newline.
    pub fn format(mut self, diff: &Diff, left: &Value) -> FormatResult<String> {
        match left {
            Value::Object(map) => {
                self.open_root("{", map.len(), false)?;
                self.process_object(map, &diff.deltas)?;
                self.close_root("}")?;
            }
            Value::Array(items) => {
                self.open_root("[", items.len(), true)?;
                self.process_array(items, &diff.deltas)?;
                self.close_root("]")?;
            }
            other => return Err(FormatError::UnsupportedRoot(other.kind())),
        }
        let len = self.out.trim_end_matches('\n').len();
        self.out.truncate(len);
        trace!(bytes = self.out.len(), "rendered diff");
        Ok(self.out)
    }

    fn open_root(&mut self, bracket: &str, size: usize, in_array: bool) -> FormatResult<()> {
        self.new_line(Marker::Same);
        self.line.push_str(bracket);
        self.close_line();
        self.push(size, in_array);
        Ok(())
    }

    fn close_root(&mut self, bracket: &str) -> FormatResult<()> {
        self.pop();
        self.new_line(Marker::Same);
        self.line.push_str(bracket);
        self.close_line();
        Ok(())
    }

    fn process_object(&mut self, map: &Map, deltas: &[Delta]) -> FormatResult<()> {
        for (name, value) in map {
            self.process_item(&Position::Name(name.clone()), value, deltas)?;
        }
        for delta in deltas {
            if let Delta::Added { position, value } = delta {
                self.print_recursive(position, value, Marker::Added)?;
            }
        }
        Ok(())
    }

    fn process_array(&mut self, items: &[Value], deltas: &[Delta]) -> FormatResult<()> {
        for (index, value) in items.iter().enumerate() {
            self.process_item(&Position::Index(index), value, deltas)?;
        }

        // Items that arrive at a right-side index: additions and the new
        // slot of every move, in right-side order.
        let mut incoming: Vec<(&Position, &Value)> = deltas
            .iter()
            .filter_map(|delta| match delta {
                Delta::Added { position, value } => Some((position, value)),
                Delta::Moved {
                    new_position,
                    value,
                    ..
                } => Some((new_position, value)),
                _ => None,
            })
            .collect();
        incoming.sort_by(|a, b| a.0.cmp(b.0));
        for (position, value) in incoming {
            self.print_recursive(position, value, Marker::Added)?;
        }
        Ok(())
    }

    /// Print the left item at `position` along with every delta that
    /// consumes it.
    fn process_item(&mut self, position: &Position, value: &Value, deltas: &[Delta]) -> FormatResult<()> {
        let matched: Vec<&Delta> = deltas
            .iter()
            .filter(|delta| delta.left_position() == Some(position))
            .collect();
        if matched.is_empty() {
            return self.print_recursive(position, value, Marker::Same);
        }

        for delta in matched {
            match delta {
                Delta::Object { children, .. } => {
                    let map = value.as_object().ok_or_else(|| mismatch(position, ValueKind::Object, value))?;
                    self.open_container(position, "{", map.len(), false)?;
                    self.process_object(map, children)?;
                    self.close_container("}");
                }
                Delta::Array { children, .. } => {
                    let items = value.as_array().ok_or_else(|| mismatch(position, ValueKind::Array, value))?;
                    self.open_container(position, "[", items.len(), true)?;
                    self.process_array(items, children)?;
                    self.close_container("]");
                }
                Delta::Modified {
                    position: new_position,
                    old_value,
                    new_value,
                    ..
                } => {
                    // Both lines stand for the same left item.
                    let saved = self.remaining();
                    self.print_recursive(position, old_value, Marker::Deleted)?;
                    self.set_remaining(saved);
                    self.print_recursive(new_position, new_value, Marker::Added)?;
                }
                Delta::Deleted { value, .. } | Delta::Moved { value, .. } => {
                    self.print_recursive(position, value, Marker::Deleted)?;
                }
                // Added deltas have no left position.
                Delta::Added { .. } => {}
            }
        }
        Ok(())
    }

    fn print_recursive(&mut self, position: &Position, value: &Value, marker: Marker) -> FormatResult<()> {
        match value {
            Value::Object(map) => {
                self.new_line(marker);
                self.print_key(position)?;
                self.line.push('{');
                self.close_line();
                self.push(map.len(), false);
                for (name, child) in map {
                    self.print_recursive(&Position::Name(name.clone()), child, marker)?;
                }
                self.pop();
                self.new_line(marker);
                self.line.push('}');
                self.print_comma();
                self.close_line();
            }
            Value::Array(items) => {
                self.new_line(marker);
                self.print_key(position)?;
                self.line.push('[');
                self.close_line();
                self.push(items.len(), true);
                for (index, child) in items.iter().enumerate() {
                    self.print_recursive(&Position::Index(index), child, marker)?;
                }
                self.pop();
                self.new_line(marker);
                self.line.push(']');
                self.print_comma();
                self.close_line();
            }
            scalar => {
                self.new_line(marker);
                self.print_key(position)?;
                write!(self.line, "{scalar}")?;
                self.print_comma();
                self.close_line();
            }
        }
        Ok(())
    }

    fn open_container(&mut self, position: &Position, bracket: &str, size: usize, in_array: bool) -> FormatResult<()> {
        self.new_line(Marker::Same);
        self.print_key(position)?;
        self.line.push_str(bracket);
        self.close_line();
        self.push(size, in_array);
        Ok(())
    }

    fn close_container(&mut self, bracket: &str) {
        self.pop();
        self.new_line(Marker::Same);
        self.line.push_str(bracket);
        self.print_comma();
        self.close_line();
    }

    fn print_key(&mut self, position: &Position) -> FormatResult<()> {
        let in_array = self.levels.last().map_or(false, |level| level.in_array);
        match position {
            Position::Name(name) if !in_array => {
                write_json_str(&mut self.line, name)?;
                self.line.push_str(": ");
            }
            Position::Index(index) if in_array && self.options.show_array_index => {
                write!(self.line, "{index}: ")?;
            }
            _ => {}
        }
        Ok(())
    }

    fn print_comma(&mut self) {
        if let Some(level) = self.levels.last_mut() {
            level.remaining -= 1;
            if level.remaining > 0 {
                self.line.push(',');
            }
        }
    }

    fn new_line(&mut self, marker: Marker) {
        self.marker = marker;
        self.indent = self.levels.len();
        self.line.clear();
    }

    fn close_line(&mut self) {
        let mut text = String::with_capacity(1 + 2 * self.indent + self.line.len());
        text.push_str(self.marker.as_str());
        for _ in 0..self.indent {
            text.push_str("  ");
        }
        text.push_str(&self.line);

        if self.options.colored {
            match self.marker {
                Marker::Added => text = text.black().on_green().to_string(),
                Marker::Deleted => text = text.black().on_red().to_string(),
                Marker::Same => {}
            }
        }
        self.out.push_str(&text);
        self.out.push('\n');
    }

    fn push(&mut self, size: usize, in_array: bool) {
        self.levels.push(Level {
            remaining: size as isize,
            in_array,
        });
    }

    fn pop(&mut self) {
        self.levels.pop();
    }

    fn remaining(&self) -> isize {
        self.levels.last().map_or(0, |level| level.remaining)
    }

    fn set_remaining(&mut self, remaining: isize) {
        if let Some(level) = self.levels.last_mut() {
            level.remaining = remaining;
        }
    }
}

fn mismatch(position: &Position, expected: ValueKind, actual: &Value) -> FormatError {
    FormatError::TypeMismatch {
        position: position.clone(),
        expected,
        actual: actual.kind(),
    }
}

/// Render `diff` against `left` with `options`.
pub fn format_diff(diff: &Diff, left: &Value, options: &FormatOptions) -> FormatResult<String> {
    AsciiFormatter::new(options).format(diff, left)
}

/// Rendering as a method on [`Diff`].
pub trait RenderDiff {
    fn render(&self, left: &Value, options: &FormatOptions) -> FormatResult<String>;
}

impl RenderDiff for Diff {
    fn render(&self, left: &Value, options: &FormatOptions) -> FormatResult<String> {
        format_diff(self, left, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use treedelta_diff::compare;

    fn value(json: serde_json::Value) -> Value {
        Value::try_from(json).unwrap()
    }

    fn render(left: serde_json::Value, right: serde_json::Value, options: &FormatOptions) -> String {
        let left = value(left);
        let right = value(right);
        let diff = compare(&left, &right).unwrap();
        format_diff(&diff, &left, options).unwrap()
    }

    fn lines(text: &[&str]) -> String {
        text.join("\n")
    }

    #[test]
    fn modify_and_delete() {
        let out = render(
            json!({"foo": 10, "bar": 20, "boz": 30}),
            json!({"foo": 10, "bar": 42}),
            &FormatOptions::default(),
        );
        assert_eq!(
            out,
            lines(&[
                " {",
                "-  \"bar\": 20,",
                "+  \"bar\": 42,",
                "-  \"boz\": 30,",
                "   \"foo\": 10",
                " }",
            ])
        );
    }

    #[test]
    fn nested_changes() {
        let left = r#"{"str": "abcde", "num_int": 13, "num_float": 39.39, "bool": true, "arr": ["arr0", 21, {"str": "pek3f", "num": 1},   [0, "1"]],       "obj": {"str": "bcded", "num": 19,      "arr": [17, "str", {"str": "eafeb"}],   "obj": {"str": "efj3", "num": 14} }, "null": null}"#;
        let right = r#"{"str": "abcde", "num_int": 13, "num_float": 39.39, "bool": true, "arr": ["arr0", 21, {"str": "changed", "num": 1}, [0, "changed"]], "obj": {"str": "bcded", "new": "added", "arr": [17, "str", {"str": "changed"}], "obj": {"str": "changed", "num": 9999}}}"#;
        let expected = r#" {
   "arr": [
     "arr0",
     21,
     {
       "num": 1,
-      "str": "pek3f"
+      "str": "changed"
     },
     [
       0,
-      "1"
+      "changed"
     ]
   ],
   "bool": true,
-  "null": null,
   "num_float": 39.39,
   "num_int": 13,
   "obj": {
     "arr": [
       17,
       "str",
       {
-        "str": "eafeb"
+        "str": "changed"
       }
     ],
-    "num": 19,
     "obj": {
-      "num": 14,
+      "num": 9999,
-      "str": "efj3"
+      "str": "changed"
     },
     "str": "bcded"
+    "new": "added"
   },
   "str": "abcde"
 }"#;
        let left = Value::from_json_str(left).unwrap();
        let right = Value::from_json_str(right).unwrap();
        let diff = compare(&left, &right).unwrap();
        let out = format_diff(&diff, &left, &FormatOptions::default()).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn renamed_member_prints_whole_subtrees() {
        let nested = json!({"l0a": ["abcd", ["efcg"]], "l0o": {"l1o": {"l2s": "efed"}, "l1s": "abcd"}});
        let out = render(
            json!({"delete": nested.clone()}),
            json!({"add": nested}),
            &FormatOptions::default(),
        );
        assert_eq!(
            out,
            lines(&[
                " {",
                "-  \"delete\": {",
                "-    \"l0a\": [",
                "-      \"abcd\",",
                "-      [",
                "-        \"efcg\"",
                "-      ]",
                "-    ],",
                "-    \"l0o\": {",
                "-      \"l1o\": {",
                "-        \"l2s\": \"efed\"",
                "-      },",
                "-      \"l1s\": \"abcd\"",
                "-    }",
                "-  }",
                "+  \"add\": {",
                "+    \"l0a\": [",
                "+      \"abcd\",",
                "+      [",
                "+        \"efcg\"",
                "+      ]",
                "+    ],",
                "+    \"l0o\": {",
                "+      \"l1o\": {",
                "+        \"l2s\": \"efed\"",
                "+      },",
                "+      \"l1s\": \"abcd\"",
                "+    }",
                "+  }",
                " }",
            ])
        );
    }

    #[test]
    fn moves_print_at_both_addresses() {
        let out = render(json!(["a", "b", "c"]), json!(["c", "a", "b"]), &FormatOptions::default());
        assert_eq!(
            out,
            lines(&[" [", "   \"a\",", "   \"b\",", "-  \"c\"", "+  \"c\"", " ]"])
        );
    }

    #[test]
    fn array_indices_when_requested() {
        let out = render(
            json!([1, 2, 3]),
            json!([1, 3, 4]),
            &FormatOptions::with_array_index(),
        );
        assert_eq!(
            out,
            lines(&[" [", "   0: 1,", "-  1: 2,", "   2: 3", "+  2: 4", " ]"])
        );
    }

    #[test]
    fn indices_hidden_by_default() {
        let out = render(json!([1, 2]), json!([1]), &FormatOptions::default());
        assert_eq!(out, lines(&[" [", "   1,", "-  2", " ]"]));
    }

    #[test]
    fn keys_are_escaped() {
        let out = render(json!({"a\"b": 1}), json!({"a\"b": 2}), &FormatOptions::default());
        assert_eq!(out, lines(&[" {", "-  \"a\\\"b\": 1", "+  \"a\\\"b\": 2", " }"]));
    }

    #[test]
    fn empty_diff_renders_left_unchanged() {
        let out = render(json!({"x": [true, null]}), json!({"x": [true, null]}), &FormatOptions::default());
        assert_eq!(
            out,
            lines(&[" {", "   \"x\": [", "     true,", "     null", "   ]", " }"])
        );
    }

    #[test]
    fn colored_lines_wrap_markers() {
        colored::control::set_override(true);
        let out = render(json!({"a": 1}), json!({"a": 2}), &FormatOptions::colored());
        colored::control::unset_override();
        let expected_old = "-  \"a\": 1".black().on_red().to_string();
        assert!(out.contains(&expected_old));
        assert!(out.starts_with(" {\n"));
        assert!(out.ends_with("\n }"));
        assert!(out.contains("\u{1b}["));
    }

    #[test]
    fn scalar_root_is_rejected() {
        let err = format_diff(&Diff::new(), &value(json!(3)), &FormatOptions::default()).unwrap_err();
        assert_eq!(err, FormatError::UnsupportedRoot(ValueKind::Number));
    }

    #[test]
    fn nested_delta_over_wrong_kind_is_rejected() {
        let delta = Delta::object(
            Position::name("a"),
            Position::name("a"),
            vec![Delta::added(Position::name("b"), Value::Null)],
        )
        .unwrap();
        let err = format_diff(
            &Diff::from(vec![delta]),
            &value(json!({"a": [1]})),
            &FormatOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            FormatError::TypeMismatch {
                position: Position::name("a"),
                expected: ValueKind::Object,
                actual: ValueKind::Array,
            }
        );
    }

    #[test]
    fn render_trait_matches_free_function() {
        let left = value(json!({"k": [1]}));
        let right = value(json!({"k": [2]}));
        let diff = compare(&left, &right).unwrap();
        let options = FormatOptions::default();
        assert_eq!(
            diff.render(&left, &options).unwrap(),
            format_diff(&diff, &left, &options).unwrap()
        );
    }
}
