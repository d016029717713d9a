// LeadDesk - core/query.rs
//
// Derived-view pipeline: search filter -> disposition filter -> stable sort,
// then pagination over the result.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{DispositionFilter, Lead, SortDirection, SortField};
use std::ops::{Range, RangeInclusive};

/// Every input the derived view depends on, apart from the leads themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Free-text search. Empty = no search filter.
    pub search_query: String,

    /// Status filter. `All` = no status filter.
    pub disposition: DispositionFilter,

    /// Active sort column. `None` keeps insertion order.
    pub sort_field: Option<SortField>,

    pub sort_direction: SortDirection,
}

impl ViewQuery {
    /// Returns true if the query keeps every lead in insertion order.
    pub fn is_identity(&self) -> bool {
        self.search_query.is_empty()
            && self.disposition == DispositionFilter::All
            && self.sort_field.is_none()
    }
}

/// Derive the filtered, sorted view of `leads`.
///
/// Returns indices into `leads` rather than copies. The result is a pure
/// function of the arguments: callers recompute it from scratch after every
/// change instead of patching a previous result.
pub fn derive_view(leads: &[Lead], query: &ViewQuery) -> Vec<usize> {
    if query.is_identity() {
        return (0..leads.len()).collect();
    }

    let needle = query.search_query.to_lowercase();

    let mut view: Vec<usize> = leads
        .iter()
        .enumerate()
        .filter(|(_, lead)| matches_search(lead, &needle))
        .filter(|(_, lead)| query.disposition.matches(lead.disposition))
        .map(|(idx, _)| idx)
        .collect();

    if let Some(field) = query.sort_field {
        // `sort_by` is stable, and the direction flips the comparison rather
        // than reversing the output, so ties keep insertion order both ways.
        view.sort_by(|&a, &b| {
            let ord = leads[a].sort_key(field).cmp(leads[b].sort_key(field));
            match query.sort_direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }

    view
}

/// Search match: case-insensitive on name, company and address, raw
/// substring on the phone number. `needle` must already be lowercased.
fn matches_search(lead: &Lead, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    lead.executive_first_name.to_lowercase().contains(needle)
        || lead.company_name.to_lowercase().contains(needle)
        || lead.phone_number.contains(needle)
        || lead.address.to_lowercase().contains(needle)
}

/// Number of pages needed to show `len` rows (0 when there are no rows).
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Row range of 1-based `page` within a view of `len` rows.
///
/// Pages are not clamped: page 0 or a page past the end yields an empty range.
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let Some(first) = page.checked_sub(1) else {
        return 0..0;
    };
    let start = first.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Page numbers for the numbered buttons of the pagination bar: at most
/// `width` consecutive pages, centred on `current` where possible and pinned
/// to either end of `1..=total`.
pub fn page_window(current: usize, total: usize, width: usize) -> RangeInclusive<usize> {
    if total == 0 || width == 0 {
        return 1..=0;
    }
    if total <= width {
        return 1..=total;
    }
    let half = width / 2;
    let start = current
        .saturating_sub(half)
        .clamp(1, total - width + 1);
    start..=start + width - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Disposition;
    use chrono::Utc;

    fn make_lead(name: &str, company: &str, phone: &str, disposition: Disposition) -> Lead {
        let mut lead = Lead::new(Utc::now());
        lead.executive_first_name = name.to_string();
        lead.company_name = company.to_string();
        lead.phone_number = phone.to_string();
        lead.address = format!("{name} Street");
        lead.disposition = disposition;
        lead
    }

    fn sample() -> Vec<Lead> {
        vec![
            make_lead("Alice", "Globex", "+15550000001", Disposition::Pending),
            make_lead("bob", "Acme", "+15550000002", Disposition::Interested),
            make_lead("Carol", "Globex", "+15550000003", Disposition::Interested),
            make_lead("Dave", "", "+15550000004", Disposition::Corporate),
        ]
    }

    #[test]
    fn test_identity_query_returns_all_in_order() {
        let leads = sample();
        assert_eq!(derive_view(&leads, &ViewQuery::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_text_fields() {
        let leads = sample();
        let query = ViewQuery {
            search_query: "GLOBEX".to_string(),
            ..Default::default()
        };
        assert_eq!(derive_view(&leads, &query), vec![0, 2]);

        let by_address = ViewQuery {
            search_query: "bob street".to_string(),
            ..Default::default()
        };
        assert_eq!(derive_view(&leads, &by_address), vec![1]);
    }

    #[test]
    fn test_search_matches_phone_substring() {
        let leads = sample();
        let query = ViewQuery {
            search_query: "0003".to_string(),
            ..Default::default()
        };
        assert_eq!(derive_view(&leads, &query), vec![2]);
    }

    #[test]
    fn test_disposition_filter() {
        let leads = sample();
        let query = ViewQuery {
            disposition: DispositionFilter::Only(Disposition::Interested),
            ..Default::default()
        };
        assert_eq!(derive_view(&leads, &query), vec![1, 2]);
    }

    #[test]
    fn test_search_and_filter_combine() {
        let leads = sample();
        let query = ViewQuery {
            search_query: "globex".to_string(),
            disposition: DispositionFilter::Only(Disposition::Interested),
            ..Default::default()
        };
        assert_eq!(derive_view(&leads, &query), vec![2]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let leads = sample();
        let asc = ViewQuery {
            sort_field: Some(SortField::CompanyName),
            ..Default::default()
        };
        // "" < "Acme" < "Globex"; Alice (0) stays before Carol (2).
        assert_eq!(derive_view(&leads, &asc), vec![3, 1, 0, 2]);

        let desc = ViewQuery {
            sort_direction: SortDirection::Descending,
            ..asc
        };
        assert_eq!(derive_view(&leads, &desc), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_sort_is_byte_lexicographic() {
        let leads = sample();
        let query = ViewQuery {
            sort_field: Some(SortField::ExecutiveFirstName),
            ..Default::default()
        };
        // Uppercase sorts before lowercase: "bob" comes last.
        assert_eq!(derive_view(&leads, &query), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_sort_by_disposition_uses_raw_value() {
        let leads = sample();
        let query = ViewQuery {
            sort_field: Some(SortField::Disposition),
            ..Default::default()
        };
        // corporate < interested < pending
        assert_eq!(derive_view(&leads, &query), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 50), 0);
        assert_eq!(total_pages(50, 50), 1);
        assert_eq!(total_pages(51, 50), 2);
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(120, 1, 50), 0..50);
        assert_eq!(page_bounds(120, 3, 50), 100..120);
        assert_eq!(page_bounds(120, 4, 50), 120..120);
        assert_eq!(page_bounds(120, 0, 50), 0..0);
        assert_eq!(page_bounds(0, 1, 50), 0..0);
        assert!(page_bounds(10, usize::MAX, 50).is_empty());
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 3, 5), 1..=3);
        assert_eq!(page_window(1, 10, 5), 1..=5);
        assert_eq!(page_window(3, 10, 5), 1..=5);
        assert_eq!(page_window(6, 10, 5), 4..=8);
        assert_eq!(page_window(10, 10, 5), 6..=10);
        // Out-of-range pages still produce a valid window.
        assert_eq!(page_window(40, 10, 5), 6..=10);
        assert!(page_window(1, 0, 5).is_empty());
    }
}
