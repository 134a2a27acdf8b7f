//! The member form.
//!
//! A [`MemberForm`] collects one record's fields in one of three modes:
//! creating a new member, editing an existing one, or viewing one read-only.
//! It validates on submit and resolves the photo, but never stores anything
//! itself; the caller receives a [`SubmittedMember`] and decides what to do
//! with it.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::photo::{
    data_url, FsPhotoLoader, InlinePhotoResolver, PhotoLoader, PhotoResolver, ResolvedPhoto,
};
use crate::record::{MemberDraft, MemberId, MemberRecord, PhotoSource};
use crate::schema::{self, Field, ValidMember, ValidationErrors};

/// What the form is doing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Entering a new member.
    #[default]
    Create,
    /// Changing an existing member.
    Edit(MemberRecord),
    /// Looking at a member; every input is disabled.
    View(MemberRecord),
}

impl FormMode {
    /// The record attached to the form, if any.
    #[must_use]
    pub fn record(&self) -> Option<&MemberRecord> {
        match self {
            Self::Create => None,
            Self::Edit(record) | Self::View(record) => Some(record),
        }
    }
}

/// Which photo input supplies the photo value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhotoInputMode {
    /// A typed URL.
    #[default]
    Url,
    /// A selected file.
    Upload,
}

/// Guards against a second submit while one is resolving its photo.
///
/// Clones share the same state, so a UI can hold one to disable its submit
/// button.
#[derive(Debug, Clone, Default)]
pub struct SubmitLatch(Arc<AtomicBool>);

impl SubmitLatch {
    /// Take the latch, or `None` if a submit already holds it.
    #[must_use]
    pub fn try_acquire(&self) -> Option<SubmitGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard(Arc::clone(&self.0)))
    }

    /// Whether a submit is in flight.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases the [`SubmitLatch`] when dropped, including on failure or
/// cancellation.
#[derive(Debug)]
pub struct SubmitGuard(Arc<AtomicBool>);

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A validated submission with its photo resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedMember {
    /// The validated fields.
    pub member: ValidMember,
    /// The displayable photo.
    pub photo: ResolvedPhoto,
    /// Identity of the record being edited, `None` for a new member.
    pub editing: Option<MemberId>,
}

/// Form state for one member record.
pub struct MemberForm {
    mode: FormMode,
    values: MemberDraft,
    photo_mode: PhotoInputMode,
    photo_url: String,
    photo_file: Option<PhotoSource>,
    errors: ValidationErrors,
    latch: SubmitLatch,
    loader: Arc<dyn PhotoLoader>,
    resolver: Arc<dyn PhotoResolver>,
}

impl fmt::Debug for MemberForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberForm")
            .field("mode", &self.mode)
            .field("values", &self.values)
            .field("photo_mode", &self.photo_mode)
            .field("photo_url", &self.photo_url)
            .field("has_photo_file", &self.photo_file.is_some())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl Default for MemberForm {
    fn default() -> Self {
        Self::new(Arc::new(FsPhotoLoader), Arc::new(InlinePhotoResolver))
    }
}

impl MemberForm {
    /// Create an empty form in create mode.
    #[must_use]
    pub fn new(loader: Arc<dyn PhotoLoader>, resolver: Arc<dyn PhotoResolver>) -> Self {
        Self {
            mode: FormMode::Create,
            values: MemberDraft::default(),
            photo_mode: PhotoInputMode::Url,
            photo_url: String::new(),
            photo_file: None,
            errors: ValidationErrors::default(),
            latch: SubmitLatch::default(),
            loader,
            resolver,
        }
    }

    /// Reset to an empty form for a new member.
    pub fn start_create(&mut self) {
        self.load(FormMode::Create);
    }

    /// Pre-populate the form to edit `record`.
    pub fn start_edit(&mut self, record: MemberRecord) {
        self.load(FormMode::Edit(record));
    }

    /// Pre-populate the form to view `record` read-only.
    pub fn start_view(&mut self, record: MemberRecord) {
        self.load(FormMode::View(record));
    }

    fn load(&mut self, mode: FormMode) {
        let record = mode.record();
        self.values = record.map(MemberRecord::to_draft).unwrap_or_default();
        self.photo_url = record.map(|r| r.photo_display.clone()).unwrap_or_default();
        self.photo_mode = PhotoInputMode::Url;
        self.photo_file = None;
        self.errors = ValidationErrors::default();
        self.mode = mode;
    }

    /// The current mode.
    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Whether every input is disabled.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self.mode, FormMode::View(_))
    }

    /// Heading shown above the form.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add new member",
            FormMode::Edit(_) => "Edit member",
            FormMode::View(_) => "Member details",
        }
    }

    /// Label of the primary action.
    #[must_use]
    pub fn primary_action(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add member",
            FormMode::Edit(_) => "Save changes",
            FormMode::View(_) => "Back to list",
        }
    }

    /// Messages from the last rejected submit.
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Whether a submit is resolving its photo.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.latch.is_held()
    }

    /// A handle on the single-flight latch.
    #[must_use]
    pub fn latch(&self) -> SubmitLatch {
        self.latch.clone()
    }

    /// Set a text field. Setting [`Field::Photo`] sets the URL input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyForm`] in view mode.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        let value = value.into();
        let slot = match field {
            Field::Prefix => &mut self.values.prefix,
            Field::FirstName => &mut self.values.first_name,
            Field::LastName => &mut self.values.last_name,
            Field::Photo => &mut self.photo_url,
            Field::WorkHistory => &mut self.values.work_history,
            Field::PastWorks => &mut self.values.past_works,
            Field::MinisterialPosition => &mut self.values.ministerial_position,
            Field::Ministry => &mut self.values.ministry,
            Field::PoliticalParty => &mut self.values.political_party,
        };
        *slot = value;
        Ok(())
    }

    /// Switch which photo input is active. Neither input is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyForm`] in view mode.
    pub fn set_photo_mode(&mut self, mode: PhotoInputMode) -> Result<()> {
        self.ensure_editable()?;
        self.photo_mode = mode;
        Ok(())
    }

    /// The active photo input.
    #[must_use]
    pub fn photo_mode(&self) -> PhotoInputMode {
        self.photo_mode
    }

    /// Type a photo URL and make the URL input active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyForm`] in view mode.
    pub fn set_photo_url(&mut self, url: impl Into<String>) -> Result<()> {
        self.set(Field::Photo, url)?;
        self.photo_mode = PhotoInputMode::Url;
        Ok(())
    }

    /// Select a photo file and make the upload input active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnlyForm`] in view mode, or the loader's error if
    /// the file cannot be read; the selection is cleared in that case.
    pub async fn select_file(&mut self, path: &Path) -> Result<()> {
        self.ensure_editable()?;
        self.photo_mode = PhotoInputMode::Upload;
        self.photo_file = None;
        let source = self.loader.load(path).await?;
        self.photo_file = Some(source);
        Ok(())
    }

    /// The image to preview: the active input's value, or the saved photo.
    #[must_use]
    pub fn preview(&self) -> Option<String> {
        let active = match self.photo_mode {
            PhotoInputMode::Url => {
                let url = self.photo_url.trim();
                (!url.is_empty()).then(|| url.to_string())
            }
            PhotoInputMode::Upload => match &self.photo_file {
                Some(PhotoSource::UploadedFile { bytes, mime_type }) if !bytes.is_empty() => {
                    Some(data_url(bytes, mime_type))
                }
                _ => None,
            },
        };
        active.or_else(|| {
            self.mode
                .record()
                .map(|r| r.photo_display.clone())
                .filter(|p| !p.is_empty())
        })
    }

    /// The current values with the active photo input applied.
    #[must_use]
    pub fn draft(&self) -> MemberDraft {
        let photo = match self.photo_mode {
            PhotoInputMode::Url => Some(PhotoSource::url(self.photo_url.clone())),
            PhotoInputMode::Upload => self.photo_file.clone(),
        };
        MemberDraft {
            photo,
            ..self.values.clone()
        }
    }

    /// Validate and resolve the form, then hand the result to `on_submit`.
    ///
    /// Only one submit runs at a time. Nothing is passed on unless every field
    /// validates and the photo resolves. After `on_submit` succeeds for a new
    /// member the form is cleared; after an edit it is left as is for the
    /// caller.
    ///
    /// # Errors
    ///
    /// - [`Error::ReadOnlyForm`] in view mode
    /// - [`Error::SubmitInProgress`] if another submit holds the latch
    /// - [`Error::Validation`] if any field fails; messages stay in [`Self::errors`]
    /// - the resolver's error if the photo cannot be resolved
    /// - whatever `on_submit` returns; the form keeps its values in that case
    pub async fn submit<T, F>(&mut self, on_submit: F) -> Result<T>
    where
        F: FnOnce(SubmittedMember) -> Result<T>,
    {
        self.ensure_editable()?;
        let _guard = self.latch.try_acquire().ok_or(Error::SubmitInProgress)?;

        let member = match schema::validate(&self.draft()) {
            Ok(member) => member,
            Err(errors) => {
                debug!("Form rejected with {} field errors", errors.len());
                self.errors = errors.clone();
                return Err(Error::Validation(errors));
            }
        };
        self.errors = ValidationErrors::default();

        let photo = self
            .resolver
            .resolve(&member.photo)
            .await
            .inspect_err(|e| warn!("Photo resolution failed: {}", e))?;

        let editing = match &self.mode {
            FormMode::Edit(record) => Some(record.id),
            _ => None,
        };
        let output = on_submit(SubmittedMember {
            member,
            photo,
            editing,
        })?;

        if editing.is_none() {
            self.start_create();
        }
        Ok(output)
    }

    /// Labelled lines describing the attached record, for read-only display.
    #[must_use]
    pub fn render_details(&self) -> String {
        let v = &self.values;
        let rows = [
            ("Prefix", v.prefix.as_str()),
            ("First name", v.first_name.as_str()),
            ("Last name", v.last_name.as_str()),
            ("Position", v.ministerial_position.as_str()),
            ("Ministry", v.ministry.as_str()),
            ("Party", v.political_party.as_str()),
            ("Work history", v.work_history.as_str()),
            ("Past works", v.past_works.as_str()),
        ];

        let mut out = format!("{}\n", self.title());
        out.push_str(&"=".repeat(self.title().len()));
        out.push('\n');
        if let Some(record) = self.mode.record() {
            out.push_str(&format!("  {:<14}{}\n", "Id", record.id));
        }
        for (label, value) in rows {
            out.push_str(&format!("  {label:<14}{value}\n"));
        }
        if let Some(photo) = self.preview() {
            out.push_str(&format!("  {:<14}{}\n", "Photo", abbreviate_photo(&photo)));
        }
        out.push_str(&format!("\n[{}]\n", self.primary_action()));
        out
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.is_read_only() {
            Err(Error::ReadOnlyForm)
        } else {
            Ok(())
        }
    }
}

/// Shorten embedded images for terminal display.
#[must_use]
pub fn abbreviate_photo(photo: &str) -> String {
    match photo.split_once(',') {
        Some((header, payload)) if header.starts_with("data:") => {
            format!("{header},... ({} bytes encoded)", payload.len())
        }
        _ => photo.to_string(),
    }
}
