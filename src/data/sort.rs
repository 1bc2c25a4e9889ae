use serde_json::Value;
use std::cmp::Ordering;

use crate::data::path::resolve_path;
use crate::data::value::{compare_values, is_missing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The active sort column and direction. Never reset implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// React to a sort-header activation: the same column toggles the
    /// direction, a different column starts over ascending.
    pub fn activate(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.toggle();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }
}

/// Sort a filtered index view by the values at `key`.
///
/// Missing and null values rank last under BOTH directions; the direction
/// flip only applies between two present values. That asymmetry keeps
/// incomplete records at the bottom of the table no matter which way the
/// user sorts, and it is intentional.
///
/// No sort key is a no-op: the filtered order passes through unchanged.
pub fn sort_view(rows: &[Value], indices: &mut [usize], sort: &SortState) {
    let Some(key) = sort.key.as_deref() else {
        return;
    };
    let descending = sort.direction == SortDirection::Descending;

    indices.sort_unstable_by(|&a, &b| {
        let va = rows.get(a).and_then(|row| resolve_path(row, key));
        let vb = rows.get(b).and_then(|row| resolve_path(row, key));

        match (is_missing(va), is_missing(vb)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let cmp = match (va, vb) {
                    (Some(a), Some(b)) => compare_values(a, b),
                    _ => Ordering::Equal,
                };
                if descending {
                    cmp.reverse()
                } else {
                    cmp
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sorted_keys(rows: &[Value], sort: &SortState) -> Vec<Value> {
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        sort_view(rows, &mut indices, sort);
        indices
            .into_iter()
            .map(|i| rows[i].get("k").cloned().unwrap_or(Value::Null))
            .collect()
    }

    #[test]
    fn test_no_key_preserves_order() {
        let rows = vec![json!({"k": 3}), json!({"k": 1}), json!({"k": 2})];
        let keys = sorted_keys(&rows, &SortState::default());
        assert_eq!(keys, vec![json!(3), json!(1), json!(2)]);
    }

    #[test]
    fn test_null_ranks_last_ascending() {
        let rows = vec![json!({"k": 1}), json!({"k": null}), json!({"k": 2})];
        let sort = SortState {
            key: Some("k".into()),
            direction: SortDirection::Ascending,
        };
        assert_eq!(sorted_keys(&rows, &sort), vec![json!(1), json!(2), Value::Null]);
    }

    #[test]
    fn test_null_ranks_last_descending() {
        let rows = vec![json!({"k": 1}), json!({"k": null}), json!({"k": 2})];
        let sort = SortState {
            key: Some("k".into()),
            direction: SortDirection::Descending,
        };
        assert_eq!(sorted_keys(&rows, &sort), vec![json!(2), json!(1), Value::Null]);
    }

    #[test]
    fn test_missing_field_ranks_with_null() {
        let rows = vec![json!({"k": 5}), json!({"other": 1}), json!({"k": 3})];
        let sort = SortState {
            key: Some("k".into()),
            direction: SortDirection::Ascending,
        };
        assert_eq!(sorted_keys(&rows, &sort), vec![json!(3), json!(5), Value::Null]);
    }

    #[test]
    fn test_string_sort_is_case_insensitive() {
        let rows = vec![
            json!({"k": "banana"}),
            json!({"k": "Apple"}),
            json!({"k": "cherry"}),
        ];
        let sort = SortState {
            key: Some("k".into()),
            direction: SortDirection::Ascending,
        };
        assert_eq!(
            sorted_keys(&rows, &sort),
            vec![json!("Apple"), json!("banana"), json!("cherry")]
        );
    }

    #[test]
    fn test_nested_sort_key() {
        let rows = vec![
            json!({"k": "b", "addr": {"zip": "75001"}}),
            json!({"k": "a", "addr": {"zip": "69001"}}),
        ];
        let mut indices = vec![0, 1];
        let sort = SortState {
            key: Some("addr.zip".into()),
            direction: SortDirection::Ascending,
        };
        sort_view(&rows, &mut indices, &sort);
        assert_eq!(indices, vec![1, 0]);
    }

    #[test]
    fn test_activate_toggles_and_resets() {
        let mut sort = SortState::default();
        sort.activate("amount");
        assert_eq!(sort.key.as_deref(), Some("amount"));
        assert_eq!(sort.direction, SortDirection::Ascending);

        sort.activate("amount");
        assert_eq!(sort.direction, SortDirection::Descending);

        sort.activate("name");
        assert_eq!(sort.key.as_deref(), Some("name"));
        assert_eq!(sort.direction, SortDirection::Ascending);
    }
}
