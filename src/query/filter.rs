use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Like,
    Gte,
    Lte,
}

impl FilterOp {
    /// Split `mark_gte` into (`mark`, Gte); keys without a known suffix are Eq.
    pub fn split_key(key: &str) -> (&str, FilterOp) {
        const SUFFIXES: [(&str, FilterOp); 4] = [
            ("_lte", FilterOp::Lte),
            ("_gte", FilterOp::Gte),
            ("_ne", FilterOp::Ne),
            ("_like", FilterOp::Like),
        ];
        for (suffix, op) in SUFFIXES {
            if let Some(field) = key.strip_suffix(suffix) {
                if !field.is_empty() {
                    return (field, op);
                }
            }
        }
        (key, FilterOp::Eq)
    }
}

/// One field condition; a record passes when any of `values` matches.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub op: FilterOp,
    pub values: Vec<String>,
}

impl FieldFilter {
    pub fn matches(&self, item: &Value) -> bool {
        let Some(field_value) = item.as_object().and_then(|obj| obj.get(&self.field)) else {
            return false;
        };
        let Some(text) = value_text(field_value) else {
            return false;
        };

        self.values.iter().any(|wanted| match self.op {
            FilterOp::Eq => text == wanted.as_str(),
            FilterOp::Ne => text != wanted.as_str(),
            FilterOp::Like => text.to_lowercase().contains(&wanted.to_lowercase()),
            FilterOp::Gte => compare_loose(&text, wanted) != Ordering::Less,
            FilterOp::Lte => compare_loose(&text, wanted) != Ordering::Greater,
        })
    }
}

/// String form used for comparisons. Objects have none.
fn value_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null => Some(Cow::Borrowed("null")),
        Value::Array(items) => {
            let parts: Vec<Cow<'_, str>> = items.iter().filter_map(value_text).collect();
            Some(Cow::Owned(parts.join(",")))
        }
        Value::Object(_) => None,
    }
}

/// Numeric comparison when both sides are numbers, string comparison otherwise.
fn compare_loose(left: &str, right: &str) -> Ordering {
    match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
        (Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
        _ => left.cmp(right),
    }
}

/// True when any string nested anywhere in `item` contains `needle`, ignoring case.
pub fn full_text_match(item: &Value, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    contains_text(item, &needle)
}

fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Array(items) => items.iter().any(|v| contains_text(v, needle)),
        Value::Object(map) => map.values().any(|v| contains_text(v, needle)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filter(key: &str, values: &[&str]) -> FieldFilter {
        let (field, op) = FilterOp::split_key(key);
        FieldFilter {
            field: field.to_string(),
            op,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn split_key_recognises_suffixes() {
        assert_eq!(FilterOp::split_key("mark_gte"), ("mark", FilterOp::Gte));
        assert_eq!(FilterOp::split_key("title_like"), ("title", FilterOp::Like));
        assert_eq!(FilterOp::split_key("status_ne"), ("status", FilterOp::Ne));
        assert_eq!(FilterOp::split_key("city"), ("city", FilterOp::Eq));
        assert_eq!(FilterOp::split_key("_ne"), ("_ne", FilterOp::Eq));
    }

    #[test]
    fn equality_compares_string_forms() {
        let record = json!({ "age": 21, "isFreeShip": true, "city": "hcm" });
        assert!(filter("age", &["21"]).matches(&record));
        assert!(filter("isFreeShip", &["true"]).matches(&record));
        assert!(filter("city", &["hn", "hcm"]).matches(&record));
        assert!(!filter("city", &["dn"]).matches(&record));
        assert!(!filter("missing", &["x"]).matches(&record));
    }

    #[test]
    fn ranges_are_numeric_when_possible() {
        let record = json!({ "mark": 9.5, "date": "2021-03-04" });
        assert!(filter("mark_gte", &["9"]).matches(&record));
        assert!(!filter("mark_gte", &["10"]).matches(&record));
        assert!(filter("mark_lte", &["10"]).matches(&record));
        assert!(filter("date_gte", &["2021-01-01"]).matches(&record));
        assert!(!filter("date_lte", &["2020-12-31"]).matches(&record));
    }

    #[test]
    fn like_is_case_insensitive_substring() {
        let record = json!({ "title": "Learn NextJS the Easy Way" });
        assert!(filter("title_like", &["nextjs"]).matches(&record));
        assert!(!filter("title_like", &["react"]).matches(&record));
        assert!(filter("title_ne", &["other"]).matches(&record));
    }

    #[test]
    fn arrays_compare_joined() {
        let record = json!({ "tagList": ["Design", "Dashboard"] });
        assert!(filter("tagList_like", &["dash"]).matches(&record));
    }

    #[test]
    fn full_text_walks_nested_values() {
        let record = json!({ "name": "x", "meta": { "notes": ["Fresh Mango"] }, "n": 42 });
        assert!(full_text_match(&record, "MANGO"));
        assert!(!full_text_match(&record, "42"));
    }
}
