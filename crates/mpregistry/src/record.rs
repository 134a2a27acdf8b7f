//! Core record types for mpregistry.
//!
//! This module defines the member record as it is stored, the draft the form
//! edits before validation, and the photo source a draft carries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identity of a member record.
///
/// Assigned by the store when a record is first saved and never reissued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    /// Wrap a raw identity value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw identity value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemberId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Honorific title shown before a member's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prefix {
    /// นาย
    #[serde(rename = "นาย")]
    Mr,
    /// นาง
    #[serde(rename = "นาง")]
    Mrs,
    /// นางสาว
    #[serde(rename = "นางสาว")]
    Miss,
}

impl Prefix {
    /// Every accepted prefix, in the order the form offers them.
    pub const ALL: [Self; 3] = [Self::Mr, Self::Mrs, Self::Miss];

    /// The title as displayed and stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mr => "นาย",
            Self::Mrs => "นาง",
            Self::Miss => "นางสาว",
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Prefix {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|prefix| prefix.as_str() == s.trim())
            .ok_or(())
    }
}

/// Where a member's photo comes from before it is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// A remote image reference.
    Url(String),
    /// A locally selected file, already read into memory.
    UploadedFile {
        /// Raw file contents.
        bytes: Vec<u8>,
        /// MIME type of the contents.
        mime_type: String,
    },
}

impl PhotoSource {
    /// Build a URL source.
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Build an uploaded-file source.
    #[must_use]
    pub fn uploaded(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self::UploadedFile {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// One legislative member's profile as it is kept in the collection.
///
/// `photo_display` is the resolved photo; the source it was resolved from is
/// not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    /// Unique identity.
    pub id: MemberId,
    /// Honorific title.
    pub prefix: Prefix,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Renderable image source: a URL or an embedded data URL.
    pub photo_display: String,
    /// Work history narrative.
    pub work_history: String,
    /// Past accomplishments narrative.
    pub past_works: String,
    /// Position held, e.g. minister or member.
    pub ministerial_position: String,
    /// Ministry, empty for positions without one.
    pub ministry: String,
    /// Political party affiliation.
    pub political_party: String,
}

impl MemberRecord {
    /// Full display name including the prefix.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.prefix, self.first_name, self.last_name)
    }

    /// Build a draft pre-populated from this record.
    ///
    /// The draft carries no photo source; the saved display value is used
    /// as the fallback preview.
    #[must_use]
    pub fn to_draft(&self) -> MemberDraft {
        MemberDraft {
            prefix: self.prefix.as_str().to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            photo: None,
            work_history: self.work_history.clone(),
            past_works: self.past_works.clone(),
            ministerial_position: self.ministerial_position.clone(),
            ministry: self.ministry.clone(),
            political_party: self.political_party.clone(),
        }
    }
}

/// The user-editable fields of a record, as entered and before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    /// Prefix text; must name one of [`Prefix::ALL`].
    pub prefix: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Photo supplied by the active input mode.
    pub photo: Option<PhotoSource>,
    /// Work history narrative.
    pub work_history: String,
    /// Past accomplishments narrative.
    pub past_works: String,
    /// Position held.
    pub ministerial_position: String,
    /// Ministry.
    pub ministry: String,
    /// Political party affiliation.
    pub political_party: String,
}
