//! `mpregistry` - A register of legislative member profiles
//!
//! This library provides the record schema, the form and list components, the
//! root controller and the local persistence behind the `mpreg` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod list;
pub mod logging;
pub mod pagination;
pub mod photo;
pub mod record;
pub mod sample;
pub mod schema;
pub mod storage;
pub mod store;

pub use config::Config;
pub use controller::{App, SubmitOutcome, ViewMode};
pub use error::{Error, Result};
pub use form::{FormMode, MemberForm, PhotoInputMode, SubmitLatch, SubmittedMember};
pub use list::{ActionKind, ListAction, ListView, PageButton};
pub use logging::init_logging;
pub use pagination::{PageWindow, Pager};
pub use photo::{FsPhotoLoader, InlinePhotoResolver, PhotoLoader, PhotoResolver, ResolvedPhoto};
pub use record::{MemberDraft, MemberId, MemberRecord, PhotoSource, Prefix};
pub use schema::{validate, Field, ValidMember, ValidationErrors};
pub use storage::{Storage, StorageStats};
pub use store::{LoadReport, MemberFields, MemberStore};
