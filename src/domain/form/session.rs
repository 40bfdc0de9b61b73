//! Form session aggregate.
//!
//! One `FormSession` holds everything the editor shows for a single
//! discount: lifecycle status, lookup lists, the current selection, search
//! boxes, the open dropdown, add-new drafts and loading flags.
//!
//! # Ownership
//!
//! The session is owned by exactly one editor. Mutation needs `&mut`, so
//! a handler awaiting a remote call keeps the session to itself and no
//! other interaction can interleave with it.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::discount::{DiscountRecord, DiscountScope};
use crate::domain::foundation::{
    DiscountId, DomainError, EditorSessionId, OptionId, StateMachine, Timestamp,
};
use crate::domain::lookup::{LookupCache, LookupList, LookupOption, OptionValue};

use super::add_new::{AddNewDraft, AddNewDrafts, NewOptionValue};
use super::errors::EditorError;
use super::field::{AddNewField, FieldKey, Resource};
use super::focus::FocusScope;
use super::loading::LoadingFlags;
use super::payload::UpdatePayload;
use super::selection::SelectionState;
use super::status::EditorStatus;
use super::validation::{validate_selection, SubmissionError, ValidatedSelection};

/// One row of an open dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub id: OptionId,
    pub label: String,
    pub selected: bool,
}

/// What a dropdown presents for the current search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOptions {
    /// The backing list is still being fetched.
    Loading,
    Ready(Vec<OptionEntry>),
}

impl FieldOptions {
    /// Entries, or an empty slice while loading.
    pub fn entries(&self) -> &[OptionEntry] {
        match self {
            FieldOptions::Loading => &[],
            FieldOptions::Ready(entries) => entries,
        }
    }
}

/// Editing state for one discount.
#[derive(Debug, Clone)]
pub struct FormSession {
    id: EditorSessionId,
    discount_id: DiscountId,
    status: EditorStatus,
    original: Option<DiscountRecord>,
    cache: LookupCache,
    selection: SelectionState,
    searches: HashMap<FieldKey, String>,
    focus: FocusScope,
    drafts: AddNewDrafts,
    loading: LoadingFlags,
    currency: String,
}

impl FormSession {
    /// Creates a session in `Loading` with empty lookup lists.
    pub fn new(discount_id: DiscountId, currency: impl Into<String>) -> Self {
        Self {
            id: EditorSessionId::new(),
            discount_id,
            status: EditorStatus::Loading,
            original: None,
            cache: LookupCache::default(),
            selection: SelectionState::default(),
            searches: HashMap::new(),
            focus: FocusScope::new(),
            drafts: AddNewDrafts::default(),
            loading: LoadingFlags::default(),
            currency: currency.into(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> EditorSessionId {
        self.id
    }

    pub fn discount_id(&self) -> DiscountId {
        self.discount_id
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    /// The record as loaded, before any edits.
    pub fn original(&self) -> Option<&DiscountRecord> {
        self.original.as_ref()
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn loading(&self) -> &LoadingFlags {
        &self.loading
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The dropdown currently open, if any.
    pub fn open_dropdown(&self) -> Option<FieldKey> {
        self.focus.active()
    }

    pub fn search(&self, field: FieldKey) -> &str {
        self.searches.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn draft(&self, field: AddNewField) -> &AddNewDraft {
        self.drafts.get(field)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load and submission plumbing (used by handlers)
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves to `target`, rejecting transitions the lifecycle forbids.
    pub fn transition(&mut self, target: EditorStatus) -> Result<(), DomainError> {
        let next = self.status.transition_to(target)?;
        debug!(session_id = %self.id, from = ?self.status, to = ?next, "Editor status changed");
        self.status = next;
        Ok(())
    }

    /// Stores the loaded record and takes scope and enabled flag from it.
    pub fn install_record(&mut self, record: DiscountRecord) {
        self.selection.scope = record.scope;
        self.selection.enabled = record.is_active;
        self.original = Some(record);
    }

    /// Replaces the whole selection with a reconciled one.
    pub fn restore_selection(&mut self, selection: SelectionState) {
        self.selection = selection;
    }

    /// Mutable access to the lookup lists, for fetch completions.
    pub fn cache_mut(&mut self) -> &mut LookupCache {
        &mut self.cache
    }

    pub fn set_loading(&mut self, resource: Resource, loading: bool) {
        self.loading.set(resource, loading);
    }

    /// Appends a user-entered option, selects it, and closes its sub-form
    /// and dropdown. Returns the id assigned to the new option.
    pub fn commit_new_option(&mut self, value: NewOptionValue) -> OptionId {
        let field = value.field();
        let id = match value {
            NewOptionValue::DiscountName(name) => {
                let option = self.cache.discount_names.append(name);
                let id = option.id;
                self.selection.discount_name = Some(option);
                id
            }
            NewOptionValue::Percentage(percentage) => {
                let option = self.cache.percentages.append(percentage);
                let id = option.id;
                self.selection.percentage = Some(option);
                id
            }
            NewOptionValue::Amount(amount) => {
                let option = self.cache.amounts.append(amount);
                let id = option.id;
                self.selection.amount = Some(option);
                id
            }
            NewOptionValue::Duration(duration) => {
                let option = self.cache.durations.append(duration);
                let id = option.id;
                self.selection.duration = Some(option);
                id
            }
        };
        self.drafts.reset(field);
        self.focus.close(field.field());
        id
    }

    /// Runs the ordered submission checks.
    pub fn validate(&self) -> Result<ValidatedSelection<'_>, SubmissionError> {
        validate_selection(&self.selection)
    }

    /// Validates and builds the update body. The creation timestamp is
    /// carried over from the loaded record, or taken as now if it had none.
    pub fn build_payload(&self) -> Result<UpdatePayload, SubmissionError> {
        let validated = self.validate()?;
        let start_date = self
            .original
            .as_ref()
            .and_then(|record| record.start_date)
            .unwrap_or_else(Timestamp::now);
        Ok(UpdatePayload::build(self.discount_id, &validated, start_date))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // User interactions
    // ─────────────────────────────────────────────────────────────────────────

    /// Opens `field`'s dropdown (closing any other) or closes it if open.
    ///
    /// Returns whether the dropdown is open afterwards. A field blocked by
    /// its exclusive partner stays closed.
    pub fn toggle_dropdown(&mut self, field: FieldKey) -> Result<bool, EditorError> {
        self.require_ready()?;
        self.require_available(field)?;
        if self.selection.is_inert(field) {
            return Ok(false);
        }
        Ok(self.focus.toggle(field))
    }

    /// Interaction outside every dropdown.
    pub fn close_dropdowns(&mut self) {
        self.focus.release();
    }

    /// Selects option `choice` for `field`, or clears it with `None`.
    /// The dropdown closes either way.
    pub fn select(&mut self, field: FieldKey, choice: Option<OptionId>) -> Result<(), EditorError> {
        self.require_ready()?;
        self.require_available(field)?;
        if choice.is_some() {
            if let Some(locked_by) = field.exclusive_with().filter(|o| self.selection.is_selected(*o)) {
                return Err(EditorError::FieldLocked { field, locked_by });
            }
        }

        let cache = &self.cache;
        let selection = &mut self.selection;
        match field {
            FieldKey::DiscountName => {
                choose(&cache.discount_names, &mut selection.discount_name, field, choice)?
            }
            FieldKey::Item => choose(&cache.items, &mut selection.item, field, choice)?,
            FieldKey::Category => choose(&cache.categories, &mut selection.category, field, choice)?,
            FieldKey::Percentage => {
                choose(&cache.percentages, &mut selection.percentage, field, choice)?
            }
            FieldKey::Amount => choose(&cache.amounts, &mut selection.amount, field, choice)?,
            FieldKey::LoyaltyTier => choose(&cache.tiers, &mut selection.tier, field, choice)?,
            FieldKey::Duration => choose(&cache.durations, &mut selection.duration, field, choice)?,
        }

        self.focus.close(field);
        Ok(())
    }

    /// Updates `field`'s search text.
    ///
    /// For item and category, a selection whose name is no longer part of
    /// the typed text is cleared so the box and the selection agree.
    pub fn set_search(&mut self, field: FieldKey, query: impl Into<String>) -> Result<(), EditorError> {
        self.require_ready()?;
        let query = query.into();
        if matches!(field, FieldKey::Item | FieldKey::Category) {
            if let Some(label) = self.selection.label(field) {
                if !query.to_lowercase().contains(&label.to_lowercase()) {
                    self.selection.clear(field);
                }
            }
        }
        self.searches.insert(field, query);
        Ok(())
    }

    /// Options `field` presents for its current search text.
    pub fn options(&self, field: FieldKey) -> FieldOptions {
        if field
            .resource()
            .is_some_and(|resource| self.loading.is_loading(resource))
        {
            return FieldOptions::Loading;
        }
        let query = self.search(field);
        let selection = &self.selection;
        let entries = match field {
            FieldKey::DiscountName => {
                option_entries(&self.cache.discount_names, query, selection.discount_name.as_ref())
            }
            FieldKey::Item => option_entries(&self.cache.items, query, selection.item.as_ref()),
            FieldKey::Category => option_entries(&self.cache.categories, query, selection.category.as_ref()),
            FieldKey::Percentage => {
                option_entries(&self.cache.percentages, query, selection.percentage.as_ref())
            }
            FieldKey::Amount => option_entries(&self.cache.amounts, query, selection.amount.as_ref()),
            FieldKey::LoyaltyTier => option_entries(&self.cache.tiers, query, selection.tier.as_ref()),
            FieldKey::Duration => option_entries(&self.cache.durations, query, selection.duration.as_ref()),
        };
        FieldOptions::Ready(entries)
    }

    /// Flips the active flag, returning the new value.
    pub fn toggle_enabled(&mut self) -> Result<bool, EditorError> {
        self.require_ready()?;
        self.selection.enabled = !self.selection.enabled;
        Ok(self.selection.enabled)
    }

    /// The scope is fixed by the loaded record; only re-choosing it is allowed.
    pub fn request_scope(&mut self, scope: DiscountScope) -> Result<(), EditorError> {
        self.require_ready()?;
        if scope != self.selection.scope {
            return Err(EditorError::ScopeLocked {
                current: self.selection.scope,
                requested: scope,
            });
        }
        Ok(())
    }

    /// Opens the add-new sub-form for `field`.
    pub fn begin_add_new(&mut self, field: AddNewField) -> Result<(), EditorError> {
        self.require_ready()?;
        let key = field.field();
        if let Some(locked_by) = key.exclusive_with().filter(|o| self.selection.is_selected(*o)) {
            return Err(EditorError::FieldLocked { field: key, locked_by });
        }
        self.drafts.get_mut(field).open = true;
        Ok(())
    }

    pub fn set_draft(&mut self, field: AddNewField, text: impl Into<String>) -> Result<(), EditorError> {
        self.require_ready()?;
        self.drafts.get_mut(field).text = text.into();
        Ok(())
    }

    /// Discards the draft and closes the sub-form.
    pub fn cancel_add_new(&mut self, field: AddNewField) {
        self.drafts.reset(field);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Guards
    // ─────────────────────────────────────────────────────────────────────────

    pub fn require_ready(&self) -> Result<(), EditorError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(EditorError::NotReady(self.status))
        }
    }

    fn require_available(&self, field: FieldKey) -> Result<(), EditorError> {
        let scope = self.selection.scope;
        let available = match field {
            FieldKey::Item => scope == DiscountScope::Item,
            FieldKey::Category => scope == DiscountScope::Category,
            _ => true,
        };
        if available {
            Ok(())
        } else {
            Err(EditorError::FieldUnavailable { field, scope })
        }
    }
}

fn choose<T: OptionValue>(
    list: &LookupList<T>,
    slot: &mut Option<LookupOption<T>>,
    field: FieldKey,
    choice: Option<OptionId>,
) -> Result<(), EditorError> {
    let Some(id) = choice else {
        *slot = None;
        return Ok(());
    };
    if let Some(option) = list.find_by_id(id) {
        *slot = Some(option.clone());
        return Ok(());
    }
    // A reconciliation placeholder lives only in the selection.
    match slot {
        Some(current) if current.id == id => Ok(()),
        _ => Err(EditorError::UnknownOption { field, id }),
    }
}

fn option_entries<T: OptionValue>(
    list: &LookupList<T>,
    query: &str,
    selected: Option<&LookupOption<T>>,
) -> Vec<OptionEntry> {
    list.filter(query)
        .into_iter()
        .map(|option| OptionEntry {
            id: option.id,
            label: option.label(),
            selected: selected.is_some_and(|s| s == option),
        })
        .collect()
}
