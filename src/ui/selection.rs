use std::collections::HashSet;
use tracing::debug;

/// The set of selected row identifiers.
///
/// Order is kept deterministic: reconciliation rewrites the set in view
/// order, and manual toggles append. Mutations replace state through the
/// methods here; nothing outside the controller mutates a selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ordered: Vec<String>,
    members: HashSet<String>,
}

/// Visual state of the select-all control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    Unchecked,
    /// Some, but not all, of the view is selected.
    Indeterminate,
    Checked,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.members.contains(key)
    }

    /// Selected identifiers in deterministic order.
    pub fn keys(&self) -> &[String] {
        &self.ordered
    }

    /// Flip one identifier in or out of the set.
    pub fn toggle(&mut self, key: &str) {
        if self.members.remove(key) {
            self.ordered.retain(|k| k != key);
        } else {
            self.members.insert(key.to_string());
            self.ordered.push(key.to_string());
        }
    }

    /// Replace the selection with every identifier in the view.
    pub fn select_all(&mut self, view_keys: &[String]) {
        self.ordered = view_keys.to_vec();
        self.members = view_keys.iter().cloned().collect();
    }

    pub fn clear(&mut self) {
        self.ordered.clear();
        self.members.clear();
    }

    /// State of the select-all control for the given view.
    pub fn select_all_state(&self, view_keys: &[String]) -> SelectAllState {
        if view_keys.is_empty() || self.is_empty() {
            return SelectAllState::Unchecked;
        }
        let selected_in_view = view_keys.iter().filter(|k| self.contains(k)).count();
        if selected_in_view == 0 {
            SelectAllState::Unchecked
        } else if selected_in_view == view_keys.len() {
            SelectAllState::Checked
        } else {
            SelectAllState::Indeterminate
        }
    }

    /// Drop identifiers no longer present in the view.
    ///
    /// The surviving selection is rewritten in view order. Returns true if
    /// the selection shrank, so the caller knows to fire its change
    /// notification; an unchanged selection returns false and leaves the
    /// set untouched.
    pub fn reconcile(&mut self, view_keys: &[String]) -> bool {
        let survivors: Vec<String> = view_keys
            .iter()
            .filter(|k| self.contains(k))
            .cloned()
            .collect();

        if survivors.len() == self.ordered.len() {
            return false;
        }

        debug!(
            target: "selection",
            "Reconciled selection: {} -> {} rows",
            self.ordered.len(),
            survivors.len()
        );
        self.members = survivors.iter().cloned().collect();
        self.ordered = survivors;
        true
    }
}
