use std::cmp::Ordering;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Pair `_sort=a,b` with `_order=asc,desc`; missing orders default to asc.
    pub fn parse(sort: Option<&str>, order: Option<&str>) -> Vec<SortKey> {
        let Some(sort) = sort else {
            return Vec::new();
        };
        let mut orders = order.unwrap_or("").split(',').map(str::trim);

        sort.split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|field| {
                let direction = match orders.next() {
                    Some(o) if o.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                    _ => SortDirection::Asc,
                };
                SortKey { field: field.to_string(), direction }
            })
            .collect()
    }
}

/// Stable multi-key sort. Records missing a field sort last in either direction.
pub fn sort_values(items: &mut [Value], keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }
    items.sort_by(|a, b| {
        for key in keys {
            let ordering = compare_field(a.get(&key.field), b.get(&key.field), key.direction);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn compare_field(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = compare_present(a, b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        Value::Array(_) => 3,
        Value::Object(_) => 4,
        Value::Null => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_pairs_sort_and_order() {
        let keys = SortKey::parse(Some("mark, name"), Some("desc"));
        assert_eq!(
            keys,
            vec![
                SortKey { field: "mark".into(), direction: SortDirection::Desc },
                SortKey { field: "name".into(), direction: SortDirection::Asc },
            ]
        );
        assert!(SortKey::parse(None, Some("desc")).is_empty());
    }

    #[test]
    fn missing_fields_sort_last_both_ways() {
        let mut items = vec![json!({ "id": 1 }), json!({ "id": 2, "n": 5 }), json!({ "id": 3, "n": 1 })];
        sort_values(&mut items, &SortKey::parse(Some("n"), Some("desc")));
        let ids: Vec<i64> = items.iter().map(|v| v["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        sort_values(&mut items, &SortKey::parse(Some("n"), None));
        let ids: Vec<i64> = items.iter().map(|v| v["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
