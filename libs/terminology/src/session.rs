//! Caller-owned workflow state

use crate::engine::{GroupSelection, TerminologyEngine};
use crate::model::{CodeEntry, CodeGroup, Subject};
use ayush_models::common::Bundle;
use serde::{Deserialize, Serialize};

/// Query text, current selection and problem list of one user workflow.
///
/// The engine never stores a session; callers keep it and pass it back in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    pub query: String,
    pub selected_group: Option<String>,
    pub selected_code: Option<CodeEntry>,
    pub problem_list: Vec<CodeEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, term: impl Into<String>) {
        self.query = term.into();
    }

    /// Record `term` as the current query and return its matches
    pub fn search<'e>(&mut self, engine: &'e TerminologyEngine, term: &str) -> Vec<&'e CodeGroup> {
        self.set_query(term);
        engine.search(term)
    }

    /// Select a group; the query becomes the group name and the detail
    /// selection resets to the group's parent entry.
    pub fn select<'e>(
        &mut self,
        engine: &'e TerminologyEngine,
        group_id: &str,
    ) -> Option<GroupSelection<'e>> {
        let group = engine.catalog().group(group_id)?;
        self.query = group.name.clone();
        self.selected_group = Some(group.parent.code.clone());
        self.selected_code = Some(group.parent.clone());
        engine.select_group(&group.parent.code)
    }

    /// Show `entry` in the detail selection
    pub fn focus(&mut self, entry: CodeEntry) {
        self.selected_code = Some(entry);
    }

    pub fn add_to_problem_list(&mut self, entry: CodeEntry) {
        self.problem_list.push(entry);
    }

    /// Append the detail selection to the problem list; false when nothing is selected
    pub fn add_selected(&mut self) -> bool {
        match self.selected_code.clone() {
            Some(entry) => {
                self.problem_list.push(entry);
                true
            }
            None => false,
        }
    }

    pub fn remove_from_problem_list(&mut self, index: usize) -> Option<CodeEntry> {
        (index < self.problem_list.len()).then(|| self.problem_list.remove(index))
    }

    pub fn bundle(&self, engine: &TerminologyEngine, subject: Option<&Subject>) -> Bundle {
        engine.generate_bundle(subject, &self.problem_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn select_resets_detail_to_parent() {
        let engine = TerminologyEngine::new(Catalog::builtin());
        let mut session = Session::new();

        assert_eq!(session.search(&engine, "mal").len(), 1);
        assert_eq!(session.query, "mal");

        let selection = session.select(&engine, "Infectious Diseases").unwrap();
        assert_eq!(selection.children[0].name, "Malaria");
        assert_eq!(session.query, "Infectious Diseases");
        assert_eq!(session.selected_group.as_deref(), Some("C010"));
        assert_eq!(session.selected_code.as_ref().map(|c| c.code.as_str()), Some("C010"));
    }

    #[test]
    fn problem_list_drives_bundle() {
        let engine = TerminologyEngine::new(Catalog::builtin());
        let mut session = Session::new();
        assert!(!session.add_selected());

        let selection = session.select(&engine, "C000").unwrap();
        let diabetes = selection.children[0].clone();
        session.focus(diabetes);
        assert!(session.add_selected());
        session.add_to_problem_list(engine.catalog().groups()[1].children[0].clone());

        let subject = Subject::new("patient-123", "Ravi Kumar", "male");
        let bundle = session.bundle(&engine, Some(&subject));
        assert_eq!(bundle.entry_count(), 3);

        assert_eq!(session.remove_from_problem_list(0).unwrap().code, "C001");
        assert!(session.remove_from_problem_list(5).is_none());
        assert_eq!(session.bundle(&engine, None).entry_count(), 1);
    }

    #[test]
    fn sessions_are_independent() {
        let engine = TerminologyEngine::new(Catalog::builtin());
        let mut first = Session::new();
        let second = Session::new();

        first.select(&engine, "C000");
        first.add_selected();

        assert_eq!(first.problem_list.len(), 1);
        assert!(second.problem_list.is_empty());
    }
}
