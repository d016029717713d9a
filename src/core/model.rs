// LeadDesk - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Lead
// =============================================================================

/// One sales-contact record.
///
/// `id` and `created_at` are fixed when the record is minted; every other
/// field can change through [`LeadPatch`]. Field names match the persisted
/// snapshot layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    /// Opaque unique identifier (UUID v4 string for imported leads).
    pub id: String,

    /// Canonical international phone number (see `core::phone`).
    pub phone_number: String,

    pub executive_first_name: String,

    pub address: String,

    pub company_name: String,

    /// Triage status. New leads start as `Pending`.
    pub disposition: Disposition,

    pub notes: String,

    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation; never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Mint a blank pending lead with a fresh id, stamped at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: new_lead_id(),
            phone_number: String::new(),
            executive_first_name: String::new(),
            address: String::new(),
            company_name: String::new(),
            disposition: Disposition::default(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Value of a sortable field, as compared by the view sort.
    pub fn sort_key(&self, field: SortField) -> &str {
        match field {
            SortField::ExecutiveFirstName => &self.executive_first_name,
            SortField::CompanyName => &self.company_name,
            SortField::PhoneNumber => &self.phone_number,
            SortField::Address => &self.address,
            SortField::Disposition => self.disposition.as_str(),
        }
    }
}

/// Generate a new opaque lead identifier.
pub fn new_lead_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Disposition
// =============================================================================

/// Triage status of a lead. Closed set; serialised as the raw snake_case value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    #[default]
    Pending,
    Interested,
    NotInterested,
    Unavailable,
    Corporate,
}

impl Disposition {
    /// Returns all variants in display order.
    pub fn all() -> &'static [Disposition] {
        &[
            Disposition::Pending,
            Disposition::Interested,
            Disposition::NotInterested,
            Disposition::Unavailable,
            Disposition::Corporate,
        ]
    }

    /// Raw value, as persisted and exported.
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Pending => "pending",
            Disposition::Interested => "interested",
            Disposition::NotInterested => "not_interested",
            Disposition::Unavailable => "unavailable",
            Disposition::Corporate => "corporate",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Disposition::Pending => "Pending",
            Disposition::Interested => "Interested",
            Disposition::NotInterested => "Not Interested",
            Disposition::Unavailable => "Unavailable",
            Disposition::Corporate => "Corporate",
        }
    }

    /// Parse a raw value or a display label (case-insensitive, trimmed).
    pub fn parse(raw: &str) -> Option<Disposition> {
        let needle = raw.trim();
        Disposition::all().iter().copied().find(|d| {
            needle.eq_ignore_ascii_case(d.as_str()) || needle.eq_ignore_ascii_case(d.label())
        })
    }
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Status filter applied to the derived view. `All` is the "no filter" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispositionFilter {
    #[default]
    All,
    Only(Disposition),
}

impl DispositionFilter {
    /// The six selectable filter values: `All` followed by each disposition.
    pub fn options() -> Vec<DispositionFilter> {
        std::iter::once(DispositionFilter::All)
            .chain(Disposition::all().iter().copied().map(DispositionFilter::Only))
            .collect()
    }

    pub fn matches(&self, disposition: Disposition) -> bool {
        match self {
            DispositionFilter::All => true,
            DispositionFilter::Only(d) => *d == disposition,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DispositionFilter::All => crate::util::constants::ALL_DISPOSITIONS,
            DispositionFilter::Only(d) => d.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DispositionFilter::All => "All Status",
            DispositionFilter::Only(d) => d.label(),
        }
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Table columns that can drive the view sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    ExecutiveFirstName,
    CompanyName,
    PhoneNumber,
    Address,
    Disposition,
}

impl SortField {
    /// Sortable columns in table order.
    pub fn all() -> &'static [SortField] {
        &[
            SortField::ExecutiveFirstName,
            SortField::CompanyName,
            SortField::PhoneNumber,
            SortField::Address,
            SortField::Disposition,
        ]
    }

    /// Column header label.
    pub fn label(&self) -> &'static str {
        match self {
            SortField::ExecutiveFirstName => "Name",
            SortField::CompanyName => "Company",
            SortField::PhoneNumber => "Phone",
            SortField::Address => "Address",
            SortField::Disposition => "Status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow glyph shown next to the active column header.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "\u{25B2}",
            SortDirection::Descending => "\u{25BC}",
        }
    }
}

// =============================================================================
// Partial updates
// =============================================================================

/// Replacement values for the mutable fields of a lead.
///
/// `None` leaves the field as-is. `id` and `created_at` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPatch {
    pub phone_number: Option<String>,
    pub executive_first_name: Option<String>,
    pub address: Option<String>,
    pub company_name: Option<String>,
    pub disposition: Option<Disposition>,
    pub notes: Option<String>,
}

impl LeadPatch {
    /// Patch that changes only the disposition.
    pub fn disposition(disposition: Disposition) -> Self {
        Self {
            disposition: Some(disposition),
            ..Default::default()
        }
    }

    /// Merge the patch into `lead` and refresh `updated_at`.
    ///
    /// `updated_at` never moves before `created_at`, even if the wall clock
    /// stepped backwards since the lead was minted.
    pub fn apply(&self, lead: &mut Lead, now: DateTime<Utc>) {
        if let Some(ref v) = self.phone_number {
            lead.phone_number = v.clone();
        }
        if let Some(ref v) = self.executive_first_name {
            lead.executive_first_name = v.clone();
        }
        if let Some(ref v) = self.address {
            lead.address = v.clone();
        }
        if let Some(ref v) = self.company_name {
            lead.company_name = v.clone();
        }
        if let Some(d) = self.disposition {
            lead.disposition = d;
        }
        if let Some(ref v) = self.notes {
            lead.notes = v.clone();
        }
        lead.updated_at = now.max(lead.created_at);
    }
}

// =============================================================================
// Theme
// =============================================================================

/// UI colour scheme preference. Persisted alongside the leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

// =============================================================================
// Summary counts
// =============================================================================

/// Per-disposition counts over the whole lead collection (dashboard strip).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadStats {
    pub total: usize,
    counts: [usize; 5],
}

impl LeadStats {
    pub fn from_leads(leads: &[Lead]) -> Self {
        let mut stats = LeadStats {
            total: leads.len(),
            ..Default::default()
        };
        for lead in leads {
            stats.counts[slot(lead.disposition)] += 1;
        }
        stats
    }

    pub fn count(&self, disposition: Disposition) -> usize {
        self.counts[slot(disposition)]
    }

    /// Share of the total in percent; 0 when there are no leads.
    pub fn percentage(&self, disposition: Disposition) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.count(disposition) as f32 * 100.0 / self.total as f32
        }
    }
}

fn slot(disposition: Disposition) -> usize {
    match disposition {
        Disposition::Pending => 0,
        Disposition::Interested => 1,
        Disposition::NotInterested => 2,
        Disposition::Unavailable => 3,
        Disposition::Corporate => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_disposition_serialises_as_raw_value() {
        let json = serde_json::to_string(&Disposition::NotInterested).unwrap();
        assert_eq!(json, "\"not_interested\"");
        let back: Disposition = serde_json::from_str("\"corporate\"").unwrap();
        assert_eq!(back, Disposition::Corporate);
    }

    #[test]
    fn test_unknown_disposition_is_rejected_by_serde() {
        assert!(serde_json::from_str::<Disposition>("\"callback\"").is_err());
    }

    #[test]
    fn test_disposition_parse_accepts_raw_and_label() {
        assert_eq!(Disposition::parse("not_interested"), Some(Disposition::NotInterested));
        assert_eq!(Disposition::parse(" Not Interested "), Some(Disposition::NotInterested));
        assert_eq!(Disposition::parse("INTERESTED"), Some(Disposition::Interested));
        assert_eq!(Disposition::parse("maybe"), None);
        assert_eq!(Disposition::parse(""), None);
    }

    #[test]
    fn test_new_lead_defaults() {
        let now = Utc::now();
        let lead = Lead::new(now);
        assert_eq!(lead.disposition, Disposition::Pending);
        assert!(lead.notes.is_empty());
        assert_eq!(lead.created_at, now);
        assert_eq!(lead.updated_at, now);
        assert_ne!(lead.id, Lead::new(now).id);
    }

    #[test]
    fn test_patch_merges_only_given_fields() {
        let created = Utc::now();
        let mut lead = Lead::new(created);
        lead.company_name = "Acme".to_string();

        let patch = LeadPatch {
            notes: Some("call back".to_string()),
            ..Default::default()
        };
        let later = created + Duration::seconds(5);
        patch.apply(&mut lead, later);

        assert_eq!(lead.company_name, "Acme");
        assert_eq!(lead.notes, "call back");
        assert_eq!(lead.updated_at, later);
    }

    #[test]
    fn test_patch_never_moves_updated_at_before_created_at() {
        let created = Utc::now();
        let mut lead = Lead::new(created);
        LeadPatch::disposition(Disposition::Corporate)
            .apply(&mut lead, created - Duration::hours(1));
        assert_eq!(lead.updated_at, created);
        assert_eq!(lead.disposition, Disposition::Corporate);
    }

    #[test]
    fn test_filter_options_are_all_plus_five() {
        let options = DispositionFilter::options();
        assert_eq!(options.len(), 6);
        assert_eq!(options[0], DispositionFilter::All);
        assert_eq!(options[0].as_str(), "all");
        assert!(DispositionFilter::All.matches(Disposition::Corporate));
        assert!(!DispositionFilter::Only(Disposition::Pending).matches(Disposition::Corporate));
    }

    #[test]
    fn test_stats_counts_and_percentages() {
        let now = Utc::now();
        let mut leads = vec![Lead::new(now), Lead::new(now), Lead::new(now), Lead::new(now)];
        leads[0].disposition = Disposition::Interested;
        let stats = LeadStats::from_leads(&leads);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(Disposition::Pending), 3);
        assert_eq!(stats.count(Disposition::Interested), 1);
        assert!((stats.percentage(Disposition::Interested) - 25.0).abs() < f32::EPSILON);

        let empty = LeadStats::from_leads(&[]);
        assert_eq!(empty.percentage(Disposition::Pending), 0.0);
    }

    #[test]
    fn test_theme_round_trip_and_toggle() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
