//! The member collection and its persistence.
//!
//! [`MemberStore`] is the single owner of the ordered collection. Every
//! mutation ends in an explicit [`MemberStore::persist`] call that writes the
//! whole collection and the identity counter in one transaction. If that
//! write fails the in-memory collection is put back the way it was.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::ID_PLACEHOLDER;
use crate::error::{Error, Result};
use crate::record::{MemberId, MemberRecord, Prefix};
use crate::sample::SampleMember;
use crate::storage::Storage;

/// Default storage key for the collection.
pub const DEFAULT_COLLECTION_KEY: &str = "mps";

/// What happened when the collection was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Nothing was stored yet.
    Empty,
    /// The stored collection was valid.
    Loaded(usize),
    /// The stored collection did not match the record schema and was ignored.
    Discarded {
        /// Why it was ignored.
        reason: String,
    },
}

/// Fields applied by [`MemberStore::add`] and [`MemberStore::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFields {
    /// Honorific title.
    pub prefix: Prefix,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Resolved photo.
    pub photo_display: String,
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

impl MemberFields {
    fn into_record(self, id: MemberId) -> MemberRecord {
        MemberRecord {
            id,
            prefix: self.prefix,
            first_name: self.first_name,
            last_name: self.last_name,
            photo_display: self.photo_display,
            work_history: self.work_history,
            past_works: self.past_works,
            ministerial_position: self.ministerial_position,
            ministry: self.ministry,
            political_party: self.political_party,
        }
    }
}

/// Owner of the member collection.
#[derive(Debug)]
pub struct MemberStore {
    storage: Storage,
    key: String,
    counter_key: String,
    members: Vec<MemberRecord>,
    next_id: i64,
    load_report: LoadReport,
}

impl MemberStore {
    /// Load the collection stored under `key`.
    ///
    /// A stored value that does not match the record schema is ignored: the
    /// store starts empty and the reason is kept in [`Self::load_report`].
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read, or
    /// [`Error::InvalidCounter`] if the stored identity counter is not a
    /// number. Identities handed out before cannot be ruled out in that case,
    /// so the store refuses to start rather than reissue one.
    pub fn load(storage: Storage, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let counter_key = format!("{key}:next_id");

        let (members, load_report) = match storage.get_item(&key)? {
            None => (Vec::new(), LoadReport::Empty),
            Some(raw) => match parse_collection(&raw) {
                Ok(members) => {
                    let n = members.len();
                    (members, LoadReport::Loaded(n))
                }
                Err(reason) => {
                    warn!("Ignoring stored collection under '{}': {}", key, reason);
                    (Vec::new(), LoadReport::Discarded { reason })
                }
            },
        };

        let stored_counter = match storage.get_item(&counter_key)? {
            None => 1,
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                warn!("Unreadable identity counter under '{}': {:?}", counter_key, raw);
                Error::InvalidCounter {
                    key: counter_key.clone(),
                    value: raw.clone(),
                }
            })?,
        };
        let after_max = members
            .iter()
            .map(|m| m.id.get().saturating_add(1))
            .max()
            .unwrap_or(1);
        let next_id = stored_counter.max(after_max).max(1);

        debug!(
            "Loaded {} members from '{}', next id {}",
            members.len(),
            key,
            next_id
        );
        Ok(Self {
            storage,
            key,
            counter_key,
            members,
            next_id,
            load_report,
        })
    }

    /// How the initial load went.
    #[must_use]
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// The underlying storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// The identity the next added member will get.
    #[must_use]
    pub fn next_id(&self) -> MemberId {
        MemberId::new(self.next_id)
    }

    /// All members in collection order.
    #[must_use]
    pub fn list(&self) -> &[MemberRecord] {
        &self.members
    }

    /// The member with the given identity.
    #[must_use]
    pub fn get(&self, id: MemberId) -> Option<&MemberRecord> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Append a new member with a fresh identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted; nothing is
    /// added in that case.
    pub fn add(&mut self, fields: MemberFields) -> Result<MemberRecord> {
        let previous_next = self.next_id;
        let id = self.allocate_id()?;
        let record = fields.into_record(id);
        self.members.push(record.clone());

        if let Err(e) = self.persist() {
            self.members.pop();
            self.next_id = previous_next;
            return Err(e);
        }
        info!("Added member {} ({})", id, record.display_name());
        Ok(record)
    }

    /// Replace the fields of the member with identity `id`, in place.
    ///
    /// Returns `false` and writes nothing if no such member exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted; the member
    /// keeps its previous fields in that case.
    pub fn update(&mut self, id: MemberId, fields: MemberFields) -> Result<bool> {
        let Some(index) = self.members.iter().position(|m| m.id == id) else {
            debug!("Update of unknown member {} ignored", id);
            return Ok(false);
        };

        let previous = std::mem::replace(&mut self.members[index], fields.into_record(id));
        if let Err(e) = self.persist() {
            self.members[index] = previous;
            return Err(e);
        }
        info!("Updated member {}", id);
        Ok(true)
    }

    /// Remove the member with identity `id`.
    ///
    /// Returns `false` and writes nothing if no such member exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted; the member is
    /// kept in that case.
    pub fn remove(&mut self, id: MemberId) -> Result<bool> {
        let Some(index) = self.members.iter().position(|m| m.id == id) else {
            debug!("Removal of unknown member {} ignored", id);
            return Ok(false);
        };

        let removed = self.members.remove(index);
        if let Err(e) = self.persist() {
            self.members.insert(index, removed);
            return Err(e);
        }
        info!("Removed member {}", id);
        Ok(true)
    }

    /// Replace the whole collection with generated members.
    ///
    /// Each member gets a fresh identity and a photo URL built from
    /// `photo_url_template`, with `{id}` replaced by the identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted; the previous
    /// collection is kept in that case.
    pub fn import_bulk(
        &mut self,
        samples: Vec<SampleMember>,
        photo_url_template: &str,
    ) -> Result<usize> {
        let previous_next = self.next_id;
        let mut imported = Vec::with_capacity(samples.len());
        for sample in samples {
            let id = self.allocate_id()?;
            imported.push(MemberRecord {
                id,
                prefix: sample.prefix,
                first_name: sample.first_name,
                last_name: sample.last_name,
                photo_display: photo_url_template.replace(ID_PLACEHOLDER, &id.to_string()),
                work_history: sample.work_history,
                past_works: sample.past_works,
                ministerial_position: sample.ministerial_position,
                ministry: sample.ministry,
                political_party: sample.political_party,
            });
        }

        let previous = std::mem::replace(&mut self.members, imported);
        if let Err(e) = self.persist() {
            self.members = previous;
            self.next_id = previous_next;
            return Err(e);
        }
        info!("Imported {} sample members", self.members.len());
        Ok(self.members.len())
    }

    /// Write the whole collection and the identity counter.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails; the
    /// previously stored value stands.
    pub fn persist(&self) -> Result<()> {
        let collection = serde_json::to_string(&self.members)?;
        let counter = self.next_id.to_string();
        self.storage
            .set_items(&[
                (self.key.as_str(), collection.as_str()),
                (self.counter_key.as_str(), counter.as_str()),
            ])
    }

    fn allocate_id(&mut self) -> Result<MemberId> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| Error::internal("member identity space exhausted"))?;
        Ok(MemberId::new(id))
    }
}

/// Parse and check a stored collection.
fn parse_collection(raw: &str) -> std::result::Result<Vec<MemberRecord>, String> {
    let members: Vec<MemberRecord> = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    let mut seen = HashSet::with_capacity(members.len());
    for member in &members {
        if !seen.insert(member.id) {
            return Err(format!("duplicate member id {}", member.id));
        }
    }
    Ok(members)
}
