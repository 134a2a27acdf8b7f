//! Validation rules for member records.
//!
//! [`validate`] checks a [`MemberDraft`] field by field and either produces a
//! [`ValidMember`] ready to be resolved and stored, or a [`ValidationErrors`]
//! map with one message per failing field.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::record::{MemberDraft, PhotoSource, Prefix};

/// A URL with a scheme and no whitespace.
static URL_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").expect("valid URL pattern")
});

/// Message shown for any unusable photo value.
pub const PHOTO_MESSAGE: &str = "please select or upload a photo";

/// A validated form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Honorific title.
    Prefix,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Photo source.
    Photo,
    /// Work history.
    WorkHistory,
    /// Past works.
    PastWorks,
    /// Position.
    MinisterialPosition,
    /// Ministry.
    Ministry,
    /// Party.
    PoliticalParty,
}

impl Field {
    /// The attribute name used in stored records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Photo => "photo",
            Self::WorkHistory => "workHistory",
            Self::PastWorks => "pastWorks",
            Self::MinisterialPosition => "ministerialPosition",
            Self::Ministry => "ministry",
            Self::PoliticalParty => "politicalParty",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field-level validation messages, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(Field, String)>,
}

impl ValidationErrors {
    /// Record a message for a field. Only the first message per field is kept.
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    /// The message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over failing fields and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A draft that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMember {
    /// Parsed prefix.
    pub prefix: Prefix,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Photo source, still unresolved.
    pub photo: PhotoSource,
    /// Work history.
    pub work_history: String,
    /// Past works.
    pub past_works: String,
    /// Position.
    pub ministerial_position: String,
    /// Ministry.
    pub ministry: String,
    /// Party.
    pub political_party: String,
}

/// Validate a draft against the record rules.
///
/// # Errors
///
/// Returns every failing field with its message. Nothing is partially
/// accepted.
pub fn validate(draft: &MemberDraft) -> Result<ValidMember, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let prefix = if draft.prefix.trim().is_empty() {
        errors.push(Field::Prefix, "please select a prefix");
        None
    } else if let Ok(prefix) = draft.prefix.parse::<Prefix>() {
        Some(prefix)
    } else {
        errors.push(Field::Prefix, "unknown prefix");
        None
    };

    let first_name = required(
        &mut errors,
        Field::FirstName,
        &draft.first_name,
        "please enter a first name",
    );
    let last_name = required(
        &mut errors,
        Field::LastName,
        &draft.last_name,
        "please enter a last name",
    );

    let photo = match &draft.photo {
        Some(source) if photo_is_acceptable(source) => Some(source.clone()),
        _ => {
            errors.push(Field::Photo, PHOTO_MESSAGE);
            None
        }
    };

    let work_history = required(
        &mut errors,
        Field::WorkHistory,
        &draft.work_history,
        "please enter a work history",
    );
    let past_works = required(
        &mut errors,
        Field::PastWorks,
        &draft.past_works,
        "please enter past works",
    );
    let ministerial_position = required(
        &mut errors,
        Field::MinisterialPosition,
        &draft.ministerial_position,
        "please enter a position",
    );
    let ministry = required(
        &mut errors,
        Field::Ministry,
        &draft.ministry,
        "please enter a ministry",
    );
    let political_party = required(
        &mut errors,
        Field::PoliticalParty,
        &draft.political_party,
        "please enter a political party",
    );

    match (prefix, photo) {
        (Some(prefix), Some(photo)) if errors.is_empty() => Ok(ValidMember {
            prefix,
            first_name,
            last_name,
            photo,
            work_history,
            past_works,
            ministerial_position,
            ministry,
            political_party,
        }),
        _ => Err(errors),
    }
}

/// Check one photo branch on its own terms.
#[must_use]
pub fn photo_is_acceptable(source: &PhotoSource) -> bool {
    match source {
        PhotoSource::Url(url) => URL_LIKE.is_match(url.trim()),
        PhotoSource::UploadedFile { bytes, mime_type } => {
            !bytes.is_empty() && !mime_type.trim().is_empty()
        }
    }
}

fn required(errors: &mut ValidationErrors, field: Field, value: &str, message: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, message);
    }
    value.to_string()
}
