//! List query language for collection reads.
//!
//! Mirrors the json-server conventions clients of this API already speak:
//! `field=value` equality (repeat a key to OR values), `field_ne`,
//! `field_like`, `field_gte`, `field_lte`, `q` full-text search,
//! `_sort`/`_order`, and `_page`/`_limit` or `_start`/`_end` windows.

pub mod filter;
pub mod sort;

use serde_json::Value;

pub use filter::{FieldFilter, FilterOp};
pub use sort::{SortDirection, SortKey};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Page and limit as echoed back in the pagination envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT }
    }
}

impl PageRequest {
    /// Absent, zero and non-numeric values fall back to the defaults.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let page = last_value(pairs, "_page")
            .and_then(parse_leading_int)
            .filter(|v| *v != 0)
            .unwrap_or(DEFAULT_PAGE);
        let limit = last_value(pairs, "_limit")
            .and_then(parse_leading_int)
            .filter(|v| *v != 0)
            .unwrap_or(DEFAULT_LIMIT);
        Self { page, limit }
    }
}

/// Which slice of the filtered, sorted collection to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    All,
    Page { page: usize, limit: usize },
    Slice { start: usize, end: usize },
}

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Vec<FieldFilter>,
    pub text: Option<String>,
    pub sort: Vec<SortKey>,
    pub window: Window,
}

impl Default for Window {
    fn default() -> Self {
        Window::All
    }
}

/// Result of applying a [`ListQuery`] to a collection
#[derive(Debug, Clone)]
pub struct ListPage {
    pub items: Vec<Value>,
    /// Matching records before the window was applied
    pub total: usize,
    pub paginated: bool,
}

impl ListQuery {
    pub fn parse(pairs: &[(String, String)]) -> Self {
        let mut filters: Vec<FieldFilter> = Vec::new();
        let mut text = None;

        for (key, value) in pairs {
            if key == "q" {
                text = Some(value.clone());
                continue;
            }
            if key.starts_with('_') {
                continue;
            }
            let (field, op) = FilterOp::split_key(key);
            match filters.iter_mut().find(|f| f.field == field && f.op == op) {
                Some(existing) => existing.values.push(value.clone()),
                None => filters.push(FieldFilter {
                    field: field.to_string(),
                    op,
                    values: vec![value.clone()],
                }),
            }
        }

        let sort = SortKey::parse(last_value(pairs, "_sort"), last_value(pairs, "_order"));
        let window = parse_window(pairs);

        Self { filters, text, sort, window }
    }

    pub fn from_query_str(raw: &str) -> Self {
        Self::parse(&parse_pairs(raw))
    }

    pub fn is_paginated(&self) -> bool {
        self.window != Window::All
    }

    pub fn apply(&self, items: &[Value]) -> ListPage {
        let mut matched: Vec<Value> = items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect();

        sort::sort_values(&mut matched, &self.sort);

        let total = matched.len();
        let items = match self.window {
            Window::All => matched,
            Window::Page { page, limit } => {
                let start = (page - 1).saturating_mul(limit);
                matched.into_iter().skip(start).take(limit).collect()
            }
            Window::Slice { start, end } => {
                let take = end.saturating_sub(start);
                matched.into_iter().skip(start).take(take).collect()
            }
        };

        ListPage { items, total, paginated: self.is_paginated() }
    }

    fn matches(&self, item: &Value) -> bool {
        if let Some(text) = &self.text {
            if !filter::full_text_match(item, text) {
                return false;
            }
        }
        self.filters.iter().all(|f| f.matches(item))
    }
}

fn parse_window(pairs: &[(String, String)]) -> Window {
    let int = |key: &str| last_value(pairs, key).and_then(parse_leading_int);

    if last_value(pairs, "_page").is_some() {
        let page = int("_page").filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE) as usize;
        let limit = int("_limit").filter(|l| *l >= 1).unwrap_or(DEFAULT_LIMIT) as usize;
        return Window::Page { page, limit };
    }

    let start = int("_start").filter(|s| *s >= 0).unwrap_or(0) as usize;
    if last_value(pairs, "_end").is_some() {
        let end = int("_end").filter(|e| *e >= 0).unwrap_or(0) as usize;
        return Window::Slice { start, end };
    }
    if last_value(pairs, "_limit").is_some() {
        let limit = int("_limit").filter(|l| *l >= 0).unwrap_or(0) as usize;
        return Window::Slice { start, end: start.saturating_add(limit) };
    }

    Window::All
}

/// Decode a raw query string into ordered key/value pairs.
pub fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn last_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Parse the leading integer of `raw`: `"12abc"` is 12, `"abc"` is None.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|v| v * sign)
}
