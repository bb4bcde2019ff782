//! Minimal JSON encoder.
//!
//! Values describe themselves through [`ToJson`]. Plain records implement
//! [`JsonRecord`] instead, listing their fields in the order they should be
//! emitted, and get [`ToJson`] for free.

use std::fmt::Write;

pub trait ToJson {
    fn write_json(&self, out: &mut String);

    fn to_json(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out);
        out
    }
}

/// A structured value encoded as a JSON object.
///
/// Fields are written in the order returned by `json_fields`.
pub trait JsonRecord {
    fn json_fields(&self) -> Vec<(&'static str, &dyn ToJson)>;
}

/// Wraps a value that should be sent as a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

pub fn encode<T: ToJson + ?Sized>(value: &T) -> String {
    value.to_json()
}

impl<T: JsonRecord> ToJson for T {
    fn write_json(&self, out: &mut String) {
        out.push('{');
        for (i, (name, value)) in self.json_fields().into_iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_quoted(name, out);
            out.push(':');
            value.write_json(out);
        }
        out.push('}');
    }
}

impl ToJson for str {
    fn write_json(&self, out: &mut String) {
        write_quoted(self, out);
    }
}

impl ToJson for String {
    fn write_json(&self, out: &mut String) {
        write_quoted(self, out);
    }
}

impl ToJson for bool {
    fn write_json(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }
}

macro_rules! number_to_json {
    ($($t:ty),*) => {
        $(
            impl ToJson for $t {
                fn write_json(&self, out: &mut String) {
                    let _ = write!(out, "{}", self);
                }
            }
        )*
    };
}

number_to_json!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Debug keeps the fractional part of whole floats ("3.0"); JSON has no NaN or infinity.
macro_rules! float_to_json {
    ($($t:ty),*) => {
        $(
            impl ToJson for $t {
                fn write_json(&self, out: &mut String) {
                    if self.is_finite() {
                        let _ = write!(out, "{:?}", self);
                    } else {
                        out.push_str("null");
                    }
                }
            }
        )*
    };
}

float_to_json!(f32, f64);

impl<T: ToJson> ToJson for [T] {
    fn write_json(&self, out: &mut String) {
        out.push('[');
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            item.write_json(out);
        }
        out.push(']');
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn write_json(&self, out: &mut String) {
        self.as_slice().write_json(out);
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn write_json(&self, out: &mut String) {
        match self {
            Some(value) => value.write_json(out),
            None => out.push_str("null"),
        }
    }
}

fn write_quoted(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point {
        x: i32,
        y: i32,
        label: Option<String>,
    }

    impl JsonRecord for Point {
        fn json_fields(&self) -> Vec<(&'static str, &dyn ToJson)> {
            vec![
                ("x", &self.x as &dyn ToJson),
                ("y", &self.y as &dyn ToJson),
                ("label", &self.label as &dyn ToJson),
            ]
        }
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(encode("plain"), r#""plain""#);
        assert_eq!(
            encode("a\"b\\c\nd\re\tf"),
            r#""a\"b\\c\nd\re\tf""#
        );
    }

    #[test]
    fn numbers_are_literals() {
        assert_eq!(encode(&42), "42");
        assert_eq!(encode(&-7i64), "-7");
        assert_eq!(encode(&std::f64::consts::PI), "3.141592653589793");
    }

    #[test]
    fn whole_floats_keep_fraction() {
        assert_eq!(encode(&3.0f64), "3.0");
        assert_eq!(encode(&-0.5f32), "-0.5");
    }

    #[test]
    fn non_finite_floats_are_null() {
        assert_eq!(encode(&f64::NAN), "null");
        assert_eq!(encode(&f64::INFINITY), "null");
        assert_eq!(encode(&vec![1.5, f64::NEG_INFINITY]), "[1.5,null]");
    }

    #[test]
    fn sequences_are_bracketed() {
        assert_eq!(encode(&vec![1, 2, 3]), "[1,2,3]");
        assert_eq!(encode(&Vec::<i32>::new()), "[]");
        assert_eq!(encode(&vec!["a".to_string(), "b".to_string()]), r#"["a","b"]"#);
    }

    #[test]
    fn records_keep_declared_field_order() {
        let p = Point {
            x: 1,
            y: 2,
            label: Some("origin".to_string()),
        };
        assert_eq!(encode(&p), r#"{"x":1,"y":2,"label":"origin"}"#);
    }

    #[test]
    fn missing_optional_values_are_null() {
        let p = Point { x: 0, y: 0, label: None };
        assert_eq!(encode(&p), r#"{"x":0,"y":0,"label":null}"#);
    }

    #[test]
    fn nested_sequences_of_records() {
        let points = vec![
            Point { x: 1, y: 1, label: None },
            Point { x: 2, y: 2, label: None },
        ];
        assert_eq!(
            encode(&points),
            r#"[{"x":1,"y":1,"label":null},{"x":2,"y":2,"label":null}]"#
        );
    }
}
