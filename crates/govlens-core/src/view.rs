//! Dashboard view state as plain values
//!
//! The host keeps a [`ViewState`], feeds user input through [`reduce`] and
//! derives query criteria from the result. Nothing here is mutable shared
//! state; the previous state is never modified.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::filter::{CategorySelector, FilterCriteria, TimeRange, TimeWindow};
use crate::fixtures::Domain;
use crate::query::QueryResult;

/// The four dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Dashboard,
    BiasDetection,
    PolicyEngine,
    AuditTrail,
}

impl Tab {
    /// Dataset listed by this view; the overview has none
    pub fn domain(&self) -> Option<Domain> {
        match self {
            Tab::Dashboard => None,
            Tab::BiasDetection => Some(Domain::Bias),
            Tab::PolicyEngine => Some(Domain::Policy),
            Tab::AuditTrail => Some(Domain::Audit),
        }
    }

    /// Plural noun used in "Showing N of M ..." captions
    pub fn noun(&self) -> &'static str {
        match self {
            Tab::Dashboard => "items",
            Tab::BiasDetection => "metrics",
            Tab::PolicyEngine => "policies",
            Tab::AuditTrail => "events",
        }
    }
}

/// User-driven state of the active view
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub tab: Tab,
    pub search_text: String,
    pub category: CategorySelector,
    pub time_range: Option<TimeRange>,
}

/// Input events that change the view state
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    SelectTab(Tab),
    SetSearch(String),
    SetCategory(CategorySelector),
    SetTimeRange(Option<TimeRange>),
    ClearFilters,
}

impl ViewState {
    /// Initial state of a tab; the audit trail opens on the last 7 days
    pub fn new(tab: Tab) -> Self {
        let time_range = (tab == Tab::AuditTrail).then_some(TimeRange::Week);
        Self {
            tab,
            time_range,
            ..Self::default()
        }
    }

    /// Criteria for the current filters
    ///
    /// The time range only applies when a reference instant is supplied.
    pub fn criteria(&self, reference: Option<NaiveDateTime>) -> FilterCriteria {
        let criteria = FilterCriteria::new(self.search_text.clone(), self.category.clone());
        match (self.time_range, reference) {
            (Some(range), Some(reference)) => {
                criteria.with_window(TimeWindow::new(range, reference))
            }
            _ => criteria,
        }
    }
}

/// Apply one event, returning the next state
///
/// Switching to a different tab resets all filters; re-selecting the
/// current tab keeps them.
pub fn reduce(state: &ViewState, event: ViewEvent) -> ViewState {
    match event {
        ViewEvent::SelectTab(tab) if tab == state.tab => state.clone(),
        ViewEvent::SelectTab(tab) => ViewState::new(tab),
        ViewEvent::SetSearch(search_text) => ViewState {
            search_text,
            ..state.clone()
        },
        ViewEvent::SetCategory(category) => ViewState {
            category,
            ..state.clone()
        },
        ViewEvent::SetTimeRange(time_range) => ViewState {
            time_range,
            ..state.clone()
        },
        ViewEvent::ClearFilters => ViewState::new(state.tab),
    }
}

/// "Showing N of M events" style caption
pub fn showing_caption(result: &QueryResult<'_>, noun: &str) -> String {
    format!(
        "Showing {} of {} {}",
        result.matched_count, result.total_count, noun
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::parse_reference;

    #[test]
    fn test_reduce_sets_filters_without_touching_previous() {
        let initial = ViewState::new(Tab::AuditTrail);
        let typed = reduce(&initial, ViewEvent::SetSearch("sarah".to_string()));
        let filtered = reduce(&typed, ViewEvent::SetCategory("violation".into()));

        assert_eq!(initial.search_text, "");
        assert_eq!(typed.search_text, "sarah");
        assert_eq!(filtered.category, CategorySelector::Value("violation".to_string()));
        assert_eq!(filtered.search_text, "sarah");
    }

    #[test]
    fn test_switching_tab_resets_filters() {
        let state = reduce(
            &ViewState::new(Tab::AuditTrail),
            ViewEvent::SetSearch("john".to_string()),
        );
        let same = reduce(&state, ViewEvent::SelectTab(Tab::AuditTrail));
        assert_eq!(same, state);

        let switched = reduce(&state, ViewEvent::SelectTab(Tab::PolicyEngine));
        assert_eq!(switched, ViewState::new(Tab::PolicyEngine));
    }

    #[test]
    fn test_clear_filters_keeps_tab() {
        let state = ViewState {
            tab: Tab::PolicyEngine,
            search_text: "pii".to_string(),
            category: "data_privacy".into(),
            time_range: Some(TimeRange::Week),
        };
        assert_eq!(
            reduce(&state, ViewEvent::ClearFilters),
            ViewState::new(Tab::PolicyEngine)
        );
    }

    #[test]
    fn test_audit_trail_opens_on_last_week() {
        assert_eq!(ViewState::new(Tab::AuditTrail).time_range, Some(TimeRange::Week));
        assert_eq!(ViewState::new(Tab::PolicyEngine).time_range, None);
        assert_eq!(ViewState::default().time_range, None);

        let widened = reduce(
            &ViewState::new(Tab::AuditTrail),
            ViewEvent::SetTimeRange(Some(TimeRange::Quarter)),
        );
        let cleared = reduce(&widened, ViewEvent::ClearFilters);
        assert_eq!(cleared.time_range, Some(TimeRange::Week));

        let entered = reduce(&ViewState::default(), ViewEvent::SelectTab(Tab::AuditTrail));
        assert_eq!(entered.time_range, Some(TimeRange::Week));
    }

    #[test]
    fn test_criteria_window_requires_reference() {
        let state = reduce(
            &ViewState::new(Tab::AuditTrail),
            ViewEvent::SetTimeRange(Some(TimeRange::Week)),
        );
        assert!(state.criteria(None).window.is_none());

        let reference = parse_reference("2024-01-16").unwrap();
        let window = state.criteria(Some(reference)).window.unwrap();
        assert_eq!(window.range, TimeRange::Week);
    }

    #[test]
    fn test_tab_domains() {
        assert_eq!(Tab::Dashboard.domain(), None);
        assert_eq!(Tab::AuditTrail.domain(), Some(Domain::Audit));
        assert_eq!(Tab::PolicyEngine.noun(), "policies");
    }
}
