// LeadDesk - app/store.rs
//
// The lead store: authoritative collection, view inputs and the derived view.
// Owned by the application state and passed explicitly to every consumer.
//
// Every operation runs to completion synchronously. After each mutation the
// derived view is recomputed from scratch via `core::query::derive_view`, and
// mutations that touch the leads or the theme push a snapshot through the
// injected `SnapshotStore`.

use crate::app::persistence::{Snapshot, SnapshotStore};
use crate::core::model::{
    new_lead_id, DispositionFilter, Lead, LeadPatch, LeadStats, SortDirection, SortField, Theme,
};
use crate::core::query::{self, ViewQuery};
use crate::util::constants::PAGE_SIZE;
use chrono::Utc;
use std::collections::HashSet;

pub struct LeadStore {
    /// All leads, in insertion order.
    leads: Vec<Lead>,

    /// Indices into `leads` matching `query`, in display order.
    view: Vec<usize>,

    query: ViewQuery,

    /// 1-based page number. Not clamped against `total_pages`.
    current_page: usize,

    theme: Theme,

    persistence: Box<dyn SnapshotStore>,
}

impl std::fmt::Debug for LeadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadStore")
            .field("leads", &self.leads.len())
            .field("view", &self.view.len())
            .field("query", &self.query)
            .field("current_page", &self.current_page)
            .field("theme", &self.theme)
            .finish()
    }
}

impl LeadStore {
    /// Create the store, restoring leads and theme from `persistence`.
    ///
    /// View inputs always start at their defaults: empty search, all
    /// statuses, no sort, page 1.
    pub fn new(persistence: Box<dyn SnapshotStore>) -> Self {
        let snapshot = persistence.load().unwrap_or_default();
        let mut store = Self {
            leads: Vec::new(),
            view: Vec::new(),
            query: ViewQuery::default(),
            current_page: 1,
            theme: snapshot.theme,
            persistence,
        };
        // A hand-edited snapshot may carry duplicate ids.
        store.leads = with_unique_ids(snapshot.leads, HashSet::new());
        store.recompute();
        tracing::debug!(
            leads = store.leads.len(),
            theme = ?store.theme,
            "Lead store initialised"
        );
        store
    }

    // -------------------------------------------------------------------------
    // Collection mutations
    // -------------------------------------------------------------------------

    /// Replace the whole collection.
    pub fn set_leads(&mut self, leads: Vec<Lead>) {
        self.leads = with_unique_ids(leads, HashSet::new());
        tracing::debug!(leads = self.leads.len(), "Leads replaced");
        self.recompute();
        self.persist();
    }

    /// Append a batch after the existing leads. No deduplication by content.
    pub fn add_leads(&mut self, new_leads: Vec<Lead>) {
        let taken: HashSet<String> = self.leads.iter().map(|l| l.id.clone()).collect();
        let batch = with_unique_ids(new_leads, taken);
        tracing::debug!(
            added = batch.len(),
            total = self.leads.len() + batch.len(),
            "Leads added"
        );
        self.leads.extend(batch);
        self.recompute();
        self.persist();
    }

    /// Merge `patch` into the lead with `id` and refresh its `updated_at`.
    ///
    /// Returns false (and changes nothing) when no lead has that id.
    pub fn update_lead(&mut self, id: &str, patch: &LeadPatch) -> bool {
        let Some(lead) = self.leads.iter_mut().find(|l| l.id == id) else {
            tracing::debug!(id, "Update ignored: unknown lead id");
            return false;
        };
        patch.apply(lead, Utc::now());
        tracing::debug!(id, "Lead updated");
        self.recompute();
        self.persist();
        true
    }

    /// Remove the lead with `id`. Returns false when no lead has that id.
    pub fn delete_lead(&mut self, id: &str) -> bool {
        let before = self.leads.len();
        self.leads.retain(|l| l.id != id);
        if self.leads.len() == before {
            tracing::debug!(id, "Delete ignored: unknown lead id");
            return false;
        }
        tracing::debug!(id, remaining = self.leads.len(), "Lead deleted");
        self.recompute();
        self.persist();
        true
    }

    /// Empty the collection. Search, filter, sort and page are kept so the
    /// next import is shown under the same view.
    pub fn clear_all_leads(&mut self) {
        tracing::debug!(removed = self.leads.len(), "All leads cleared");
        self.leads.clear();
        self.recompute();
        self.persist();
    }

    // -------------------------------------------------------------------------
    // View inputs
    // -------------------------------------------------------------------------

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.query.search_query = text.into();
        self.current_page = 1;
        self.recompute();
    }

    pub fn set_selected_disposition(&mut self, filter: DispositionFilter) {
        tracing::debug!(filter = filter.as_str(), "Status filter changed");
        self.query.disposition = filter;
        self.current_page = 1;
        self.recompute();
    }

    /// Sort by `field`. Selecting the active field again flips the
    /// direction; a new field starts ascending. The page is left alone.
    pub fn set_sorting(&mut self, field: SortField) {
        if self.query.sort_field == Some(field) {
            self.query.sort_direction = self.query.sort_direction.flipped();
        } else {
            self.query.sort_field = Some(field);
            self.query.sort_direction = SortDirection::Ascending;
        }
        self.recompute();
    }

    /// Set the 1-based page number verbatim.
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    // -------------------------------------------------------------------------
    // Theme
    // -------------------------------------------------------------------------

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        tracing::debug!(theme = ?theme, "Theme changed");
        self.persist();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The authoritative collection, in insertion order.
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn find(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    /// Indices of the derived view into `leads()`.
    pub fn view_indices(&self) -> &[usize] {
        &self.view
    }

    /// The derived view: filtered and sorted leads.
    pub fn filtered_leads(&self) -> impl Iterator<Item = &Lead> + '_ {
        self.view.iter().map(move |&i| &self.leads[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    /// Slice of the derived view on the current page. Empty when the page is
    /// out of range.
    pub fn page_leads(&self) -> Vec<&Lead> {
        self.page_range()
            .map(|pos| &self.leads[self.view[pos]])
            .collect()
    }

    /// Positions (within the derived view) shown on the current page.
    pub fn page_range(&self) -> std::ops::Range<usize> {
        query::page_bounds(self.view.len(), self.current_page, PAGE_SIZE)
    }

    pub fn total_pages(&self) -> usize {
        query::total_pages(self.view.len(), PAGE_SIZE)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn search_query(&self) -> &str {
        &self.query.search_query
    }

    pub fn selected_disposition(&self) -> DispositionFilter {
        self.query.disposition
    }

    pub fn sort_field(&self) -> Option<SortField> {
        self.query.sort_field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.query.sort_direction
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Dashboard counts over the whole collection.
    pub fn stats(&self) -> LeadStats {
        LeadStats::from_leads(&self.leads)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn recompute(&mut self) {
        self.view = query::derive_view(&self.leads, &self.query);
    }

    fn persist(&self) {
        self.persistence.save(&Snapshot {
            leads: self.leads.clone(),
            theme: self.theme,
        });
    }
}

/// Re-mint any id already in `taken` or repeated within `leads`.
fn with_unique_ids(mut leads: Vec<Lead>, mut taken: HashSet<String>) -> Vec<Lead> {
    for lead in &mut leads {
        if !taken.insert(lead.id.clone()) {
            let old = std::mem::replace(&mut lead.id, new_lead_id());
            tracing::warn!(old_id = %old, new_id = %lead.id, "Duplicate lead id re-minted");
            taken.insert(lead.id.clone());
        }
    }
    leads
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::persistence::MemoryStore;
    use crate::core::model::Disposition;

    fn make_lead(name: &str, company: &str) -> Lead {
        let mut lead = Lead::new(Utc::now());
        lead.executive_first_name = name.to_string();
        lead.company_name = company.to_string();
        lead.phone_number = "+15550000000".to_string();
        lead
    }

    fn store_with(leads: Vec<Lead>) -> (LeadStore, MemoryStore) {
        let memory = MemoryStore::new();
        let mut store = LeadStore::new(Box::new(memory.clone()));
        store.set_leads(leads);
        (store, memory)
    }

    fn many(n: usize) -> Vec<Lead> {
        (0..n).map(|i| make_lead(&format!("L{i:03}"), "Co")).collect()
    }

    #[test]
    fn test_new_store_has_default_view_inputs() {
        let store = LeadStore::new(Box::new(MemoryStore::new()));
        assert!(store.leads().is_empty());
        assert_eq!(store.current_page(), 1);
        assert_eq!(store.search_query(), "");
        assert_eq!(store.selected_disposition(), DispositionFilter::All);
        assert_eq!(store.sort_field(), None);
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_new_store_restores_snapshot() {
        let memory = MemoryStore::with_snapshot(Snapshot {
            leads: vec![make_lead("Alice", "Acme")],
            theme: Theme::Dark,
        });
        let store = LeadStore::new(Box::new(memory.clone()));
        assert_eq!(store.leads().len(), 1);
        assert_eq!(store.filtered_len(), 1);
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(memory.save_count(), 0);
    }

    #[test]
    fn test_add_leads_appends_in_order() {
        let (mut store, _) = store_with(vec![make_lead("A", "x")]);
        store.add_leads(vec![make_lead("B", "x"), make_lead("B", "x")]);
        let names: Vec<_> = store
            .leads()
            .iter()
            .map(|l| l.executive_first_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "B"]);
    }

    #[test]
    fn test_colliding_ids_are_reminted() {
        let first = make_lead("A", "x");
        let mut clash = make_lead("B", "x");
        clash.id = first.id.clone();
        let (mut store, _) = store_with(vec![first.clone(), clash.clone()]);
        store.add_leads(vec![first, clash]);

        let ids: HashSet<_> = store.leads().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (mut store, memory) = store_with(vec![make_lead("A", "x")]);
        let leads_before = store.leads().to_vec();
        let view_before = store.view_indices().to_vec();
        let saves = memory.save_count();

        assert!(!store.update_lead("missing", &LeadPatch::disposition(Disposition::Corporate)));
        assert!(!store.delete_lead("missing"));

        assert_eq!(store.leads(), leads_before.as_slice());
        assert_eq!(store.view_indices(), view_before.as_slice());
        assert_eq!(memory.save_count(), saves);
    }

    #[test]
    fn test_update_merges_fields_and_refreshes_timestamp() {
        let lead = make_lead("A", "x");
        let id = lead.id.clone();
        let created = lead.created_at;
        let (mut store, memory) = store_with(vec![lead]);

        let patch = LeadPatch {
            notes: Some("call back".to_string()),
            disposition: Some(Disposition::Interested),
            ..Default::default()
        };
        assert!(store.update_lead(&id, &patch));

        let updated = store.find(&id).unwrap();
        assert_eq!(updated.notes, "call back");
        assert_eq!(updated.disposition, Disposition::Interested);
        assert_eq!(updated.executive_first_name, "A");
        assert_eq!(updated.created_at, created);
        assert!(updated.updated_at >= updated.created_at);
        assert_eq!(memory.current().unwrap().leads[0].notes, "call back");
    }

    #[test]
    fn test_update_reapplies_filter() {
        let lead = make_lead("A", "x");
        let id = lead.id.clone();
        let (mut store, _) = store_with(vec![lead]);
        store.set_selected_disposition(DispositionFilter::Only(Disposition::Pending));
        assert_eq!(store.filtered_len(), 1);

        store.update_lead(&id, &LeadPatch::disposition(Disposition::Unavailable));
        assert_eq!(store.filtered_len(), 0);
    }

    #[test]
    fn test_delete_removes_lead() {
        let leads = vec![make_lead("A", "x"), make_lead("B", "y")];
        let id = leads[0].id.clone();
        let (mut store, memory) = store_with(leads);
        assert!(store.delete_lead(&id));
        assert_eq!(store.leads().len(), 1);
        assert_eq!(store.filtered_len(), 1);
        assert_eq!(memory.current().unwrap().leads.len(), 1);
    }

    #[test]
    fn test_clear_all_keeps_view_inputs() {
        let (mut store, memory) = store_with(many(120));
        store.set_search_query("l0");
        store.set_sorting(SortField::CompanyName);
        store.set_current_page(2);

        store.clear_all_leads();
        assert!(store.leads().is_empty());
        assert_eq!(store.filtered_len(), 0);
        assert_eq!(store.search_query(), "l0");
        assert_eq!(store.sort_field(), Some(SortField::CompanyName));
        assert_eq!(store.current_page(), 2);
        assert!(memory.current().unwrap().leads.is_empty());

        store.add_leads(vec![make_lead("L001", "Co"), make_lead("Zed", "Co")]);
        assert_eq!(store.leads().len(), 2);
        assert_eq!(store.filtered_len(), 1);
    }

    #[test]
    fn test_sort_toggle_keeps_ties_stable() {
        let leads = vec![
            make_lead("1", "Beta"),
            make_lead("2", "Alpha"),
            make_lead("3", "Beta"),
            make_lead("4", "Alpha"),
        ];
        let (mut store, _) = store_with(leads);

        store.set_sorting(SortField::CompanyName);
        let names = |s: &LeadStore| -> Vec<String> {
            s.filtered_leads()
                .map(|l| l.executive_first_name.clone())
                .collect()
        };
        assert_eq!(store.sort_direction(), SortDirection::Ascending);
        assert_eq!(names(&store), vec!["2", "4", "1", "3"]);

        store.set_sorting(SortField::CompanyName);
        assert_eq!(store.sort_direction(), SortDirection::Descending);
        assert_eq!(names(&store), vec!["1", "3", "2", "4"]);

        store.set_sorting(SortField::ExecutiveFirstName);
        assert_eq!(store.sort_direction(), SortDirection::Ascending);
        assert_eq!(names(&store), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_search_and_filter_reset_page_but_sort_does_not() {
        let (mut store, _) = store_with(many(200));
        store.set_current_page(3);
        store.set_sorting(SortField::Address);
        assert_eq!(store.current_page(), 3);

        store.set_search_query("L1");
        assert_eq!(store.current_page(), 1);

        store.set_current_page(3);
        store.set_selected_disposition(DispositionFilter::Only(Disposition::Pending));
        assert_eq!(store.current_page(), 1);
    }

    #[test]
    fn test_view_changes_do_not_persist() {
        let (mut store, memory) = store_with(many(3));
        let saves = memory.save_count();
        store.set_search_query("x");
        store.set_selected_disposition(DispositionFilter::All);
        store.set_sorting(SortField::PhoneNumber);
        store.set_current_page(4);
        assert_eq!(memory.save_count(), saves);

        store.toggle_theme();
        assert_eq!(memory.save_count(), saves + 1);
        assert_eq!(memory.current().unwrap().theme, Theme::Dark);
    }

    #[test]
    fn test_derived_view_matches_fresh_recompute() {
        let mut leads = many(30);
        for (i, lead) in leads.iter_mut().enumerate() {
            lead.company_name = ["Acme", "Globex", "Initech"][i % 3].to_string();
            lead.disposition = Disposition::all()[i % 5];
        }
        let (mut store, _) = store_with(leads);

        store.set_search_query("globex");
        store.set_sorting(SortField::Disposition);
        store.set_selected_disposition(DispositionFilter::Only(Disposition::Interested));
        store.set_search_query("");
        store.set_sorting(SortField::Disposition);
        let id = store.leads()[4].id.clone();
        store.update_lead(&id, &LeadPatch::disposition(Disposition::Interested));

        let fresh = query::derive_view(store.leads(), store.query());
        assert_eq!(store.view_indices(), fresh.as_slice());
    }

    #[test]
    fn test_pagination_slices_and_out_of_range_page() {
        let (mut store, _) = store_with(many(120));
        assert_eq!(store.total_pages(), 3);
        assert_eq!(store.page_leads().len(), 50);

        store.set_current_page(3);
        assert_eq!(store.page_leads().len(), 20);
        assert_eq!(store.page_leads()[0].executive_first_name, "L100");

        store.set_current_page(9);
        assert!(store.page_leads().is_empty());
        store.set_current_page(0);
        assert!(store.page_leads().is_empty());
    }

    #[test]
    fn test_stats_cover_whole_collection() {
        let mut leads = many(4);
        leads[0].disposition = Disposition::Interested;
        let (mut store, _) = store_with(leads);
        store.set_search_query("nothing matches");
        let stats = store.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(Disposition::Interested), 1);
        assert_eq!(stats.count(Disposition::Pending), 3);
    }
}
