//! The root controller.
//!
//! [`App`] owns the member store, the view mode, the current page and the
//! form. The form and the list never touch the collection; they hand their
//! requests to the controller, which carries them out and persists.

use std::fmt::Write as _;

use rand::Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::form::{MemberForm, SubmittedMember};
use crate::list::{ListAction, ListView};
use crate::pagination::{PageWindow, Pager};
use crate::record::{MemberId, MemberRecord};
use crate::sample;
use crate::storage::Storage;
use crate::store::{MemberFields, MemberStore};

/// Which component is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The member form.
    Form,
    /// The member list.
    List,
}

/// What a successful form submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new member was appended.
    Added(MemberRecord),
    /// An existing member was changed in place.
    Updated(MemberRecord),
}

impl SubmitOutcome {
    /// The saved record.
    #[must_use]
    pub fn record(&self) -> &MemberRecord {
        match self {
            Self::Added(record) | Self::Updated(record) => record,
        }
    }
}

/// The application state.
#[derive(Debug)]
pub struct App {
    store: MemberStore,
    view: ViewMode,
    current_page: usize,
    pager: Pager,
    form: MemberForm,
    photo_url_template: String,
}

impl App {
    /// Create the controller around a loaded store. Starts in form mode on
    /// page 1.
    #[must_use]
    pub fn new(store: MemberStore, pager: Pager, photo_url_template: impl Into<String>) -> Self {
        Self {
            store,
            view: ViewMode::Form,
            current_page: 1,
            pager,
            form: MemberForm::default(),
            photo_url_template: photo_url_template.into(),
        }
    }

    /// Open the configured database and load the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: &Config) -> Result<Self> {
        let storage = Storage::open(config.database_path())?;
        let store = MemberStore::load(storage, config.storage.collection_key.clone())?;
        let pager = Pager::new(config.list.page_size, config.list.page_window);
        Ok(Self::new(store, pager, config.sample.photo_url_template.clone()))
    }

    /// Replace the form, e.g. to use other photo loaders or resolvers.
    #[must_use]
    pub fn with_form(mut self, form: MemberForm) -> Self {
        self.form = form;
        self
    }

    /// The member store.
    #[must_use]
    pub fn store(&self) -> &MemberStore {
        &self.store
    }

    /// The presented component.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    /// The current page, 1-based.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The form.
    #[must_use]
    pub fn form(&self) -> &MemberForm {
        &self.form
    }

    /// The form, for entering values.
    pub fn form_mut(&mut self) -> &mut MemberForm {
        &mut self.form
    }

    /// A copy of the member with identity `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MemberNotFound`] if there is no such member.
    pub fn member(&self, id: MemberId) -> Result<MemberRecord> {
        self.store
            .get(id)
            .cloned()
            .ok_or(Error::MemberNotFound(id))
    }

    /// Switch between form and list. Entering the form starts a new member.
    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ViewMode::Form => ViewMode::List,
            ViewMode::List => {
                self.form.start_create();
                ViewMode::Form
            }
        };
        debug!("View switched to {:?}", self.view);
    }

    /// Open `record` in the form for editing.
    pub fn edit(&mut self, record: MemberRecord) {
        debug!("Editing member {}", record.id);
        self.form.start_edit(record);
        self.view = ViewMode::Form;
    }

    /// Open `record` in the form read-only.
    pub fn view_details(&mut self, record: MemberRecord) {
        debug!("Viewing member {}", record.id);
        self.form.start_view(record);
        self.view = ViewMode::Form;
    }

    /// Abandon an edit and return to the list.
    pub fn cancel_edit(&mut self) {
        self.form.start_create();
        self.view = ViewMode::List;
    }

    /// Leave the read-only view and return to the list.
    pub fn back_to_list(&mut self) {
        self.form.start_create();
        self.view = ViewMode::List;
    }

    /// Submit the form and save the result.
    ///
    /// A new member is appended and the form stays open, cleared. An edited
    /// member is replaced in place and the list is shown.
    ///
    /// # Errors
    ///
    /// Returns the form's error if validation or photo resolution fails,
    /// [`Error::MemberNotFound`] if the edited member no longer exists, or a
    /// storage error. The collection is unchanged in every case.
    pub async fn submit_form(&mut self) -> Result<SubmitOutcome> {
        let store = &mut self.store;
        let outcome = self
            .form
            .submit(|submitted| save_submission(store, submitted))
            .await?;

        if let SubmitOutcome::Updated(_) = outcome {
            self.form.start_create();
            self.view = ViewMode::List;
        }
        Ok(outcome)
    }

    /// Carry out a request from the list.
    ///
    /// # Errors
    ///
    /// Returns an error if a delete cannot be persisted.
    pub fn handle_list_action(&mut self, action: ListAction) -> Result<()> {
        match action {
            ListAction::Edit(record) => self.edit(record),
            ListAction::ViewDetails(record) => self.view_details(record),
            ListAction::Delete(id) => {
                self.delete(id)?;
            }
        }
        Ok(())
    }

    /// Delete the member with identity `id`. Unknown identities are ignored.
    ///
    /// If the current page no longer exists afterwards, the last page is
    /// shown instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn delete(&mut self, id: MemberId) -> Result<bool> {
        let removed = self.store.remove(id)?;
        if removed {
            let last = self.total_pages().max(1);
            if self.current_page > last {
                self.current_page = last;
            }
        }
        Ok(removed)
    }

    /// Go to `page` if it is within `1..=total_pages`. Returns whether the
    /// page changed.
    pub fn change_page(&mut self, page: usize) -> bool {
        if !self.pager.contains(page, self.store.len()) {
            debug!("Ignoring request for page {}", page);
            return false;
        }
        self.current_page = page;
        true
    }

    /// Replace the collection with `count` generated members, then show the
    /// list from page 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted; the previous
    /// collection is kept in that case.
    pub fn import_sample_data<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> Result<usize> {
        let samples = sample::generate(count, rng);
        let imported = self.store.import_bulk(samples, &self.photo_url_template)?;
        self.current_page = 1;
        self.form.start_create();
        self.view = ViewMode::List;
        info!("Imported {} sample members", imported);
        Ok(imported)
    }

    /// Members on the current page.
    #[must_use]
    pub fn current_page_members(&self) -> &[MemberRecord] {
        self.pager.page(self.store.list(), self.current_page)
    }

    /// Total pages for the collection.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.store.len())
    }

    /// The page buttons around the current page.
    #[must_use]
    pub fn page_window(&self) -> PageWindow {
        self.pager.window(self.current_page, self.total_pages())
    }

    /// The list component for the current page.
    #[must_use]
    pub fn list_view(&self) -> ListView<'_> {
        ListView::new(
            self.current_page_members(),
            self.store.len(),
            self.page_window(),
        )
    }

    /// Render the presented component as text.
    #[must_use]
    pub fn render(&self) -> String {
        match self.view {
            ViewMode::List => self.list_view().render(),
            ViewMode::Form => {
                let mut out = self.form.render_details();
                if !self.form.errors().is_empty() {
                    let _ = write!(out, "\n{}", self.form.errors());
                }
                out
            }
        }
    }
}

fn save_submission(store: &mut MemberStore, submitted: SubmittedMember) -> Result<SubmitOutcome> {
    let SubmittedMember {
        member,
        photo,
        editing,
    } = submitted;
    let fields = MemberFields {
        prefix: member.prefix,
        first_name: member.first_name,
        last_name: member.last_name,
        photo_display: photo.into_string(),
        work_history: member.work_history,
        past_works: member.past_works,
        ministerial_position: member.ministerial_position,
        ministry: member.ministry,
        political_party: member.political_party,
    };

    match editing {
        None => store.add(fields).map(SubmitOutcome::Added),
        Some(id) => {
            if !store.update(id, fields)? {
                return Err(Error::MemberNotFound(id));
            }
            let record = store.get(id).cloned().ok_or(Error::MemberNotFound(id))?;
            Ok(SubmitOutcome::Updated(record))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ActionKind;
    use crate::schema::Field;
    use crate::store::DEFAULT_COLLECTION_KEY;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_app() -> App {
        let storage = Storage::open_in_memory().expect("failed to create test storage");
        let store = MemberStore::load(storage, DEFAULT_COLLECTION_KEY).expect("failed to load");
        App::new(store, Pager::default(), "https://img/{id}.png")
    }

    fn fill(app: &mut App, first_name: &str) {
        let form = app.form_mut();
        form.set(Field::Prefix, "นาย").unwrap();
        form.set(Field::FirstName, first_name).unwrap();
        form.set(Field::LastName, "ใจดี").unwrap();
        form.set_photo_url("http://x/y.jpg").unwrap();
        form.set(Field::WorkHistory, "a").unwrap();
        form.set(Field::PastWorks, "b").unwrap();
        form.set(Field::MinisterialPosition, "c").unwrap();
        form.set(Field::Ministry, "d").unwrap();
        form.set(Field::PoliticalParty, "e").unwrap();
    }

    async fn add(app: &mut App, first_name: &str) -> MemberRecord {
        fill(app, first_name);
        app.submit_form().await.unwrap().record().clone()
    }

    #[test]
    fn test_starts_in_form_mode_on_page_one() {
        let app = create_test_app();
        assert_eq!(app.view_mode(), ViewMode::Form);
        assert_eq!(app.current_page(), 1);
        assert_eq!(app.total_pages(), 0);
    }

    #[test]
    fn test_toggle_view_clears_attached_record() {
        let mut app = create_test_app();
        app.import_sample_data(40, &mut StdRng::seed_from_u64(3)).unwrap();
        let record = app.store().list()[0].clone();
        app.view_details(record);
        app.toggle_view();
        assert_eq!(app.view_mode(), ViewMode::List);

        app.toggle_view();
        assert_eq!(app.view_mode(), ViewMode::Form);
        assert!(!app.form().is_read_only());
        assert_eq!(app.form().mode().record(), None);
    }

    #[tokio::test]
    async fn test_create_stays_in_form_and_clears() {
        let mut app = create_test_app();
        fill(&mut app, "สมชาย");
        let outcome = app.submit_form().await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Added(_)));
        assert_eq!(app.store().len(), 1);
        assert_eq!(app.view_mode(), ViewMode::Form);
        assert_eq!(app.form().draft().first_name, "");
    }

    #[tokio::test]
    async fn test_edit_replaces_in_place_and_shows_list() {
        let mut app = create_test_app();
        add(&mut app, "a").await;
        let b = add(&mut app, "b").await;
        add(&mut app, "c").await;

        app.edit(b.clone());
        app.form_mut().set(Field::FirstName, "bee").unwrap();
        let outcome = app.submit_form().await.unwrap();

        assert_eq!(outcome.record().id, b.id);
        assert_eq!(app.view_mode(), ViewMode::List);
        assert_eq!(app.store().len(), 3);
        assert_eq!(app.store().list()[1].first_name, "bee");
        assert_eq!(app.store().list()[1].photo_display, b.photo_display);
    }

    #[tokio::test]
    async fn test_edit_of_deleted_member_reports_not_found() {
        let mut app = create_test_app();
        let a = add(&mut app, "a").await;
        app.edit(a.clone());
        app.delete(a.id).unwrap();

        let err = app.submit_form().await.unwrap_err();
        assert!(matches!(err, Error::MemberNotFound(id) if id == a.id));
        assert!(app.store().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_submit_leaves_collection_unchanged() {
        let mut app = create_test_app();
        fill(&mut app, "");

        let err = app.submit_form().await.unwrap_err();
        assert!(err.validation_errors().is_some());
        assert!(app.store().is_empty());
        assert!(app.render().contains("please enter a first name"));
    }

    #[test]
    fn test_view_details_and_back() {
        let mut app = create_test_app();
        app.import_sample_data(40, &mut StdRng::seed_from_u64(3)).unwrap();
        let record = app.store().list()[2].clone();

        let action = app
            .list_view()
            .request(ActionKind::ViewDetails, record.id)
            .unwrap();
        app.handle_list_action(action).unwrap();

        assert_eq!(app.view_mode(), ViewMode::Form);
        assert!(app.form().is_read_only());
        assert!(app.render().contains(&record.first_name));

        app.back_to_list();
        assert_eq!(app.view_mode(), ViewMode::List);
        assert!(!app.form().is_read_only());
    }

    #[test]
    fn test_cancel_edit_returns_to_list() {
        let mut app = create_test_app();
        app.import_sample_data(40, &mut StdRng::seed_from_u64(3)).unwrap();
        let record = app.store().list()[0].clone();
        app.handle_list_action(ListAction::Edit(record)).unwrap();
        assert!(matches!(app.form().mode(), crate::form::FormMode::Edit(_)));

        app.cancel_edit();
        assert_eq!(app.view_mode(), ViewMode::List);
        assert_eq!(app.form().mode().record(), None);
    }

    #[test]
    fn test_change_page_bounds() {
        let mut app = create_test_app();
        app.import_sample_data(45, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(app.total_pages(), 3);

        assert!(!app.change_page(0));
        assert!(!app.change_page(4));
        assert_eq!(app.current_page(), 1);

        assert!(app.change_page(3));
        assert_eq!(app.current_page_members().len(), 5);
    }

    #[test]
    fn test_delete_clamps_current_page() {
        let mut app = create_test_app();
        app.import_sample_data(41, &mut StdRng::seed_from_u64(3)).unwrap();
        assert!(app.change_page(3));
        let last = app.current_page_members()[0].id;

        app.handle_list_action(ListAction::Delete(last)).unwrap();
        assert_eq!(app.total_pages(), 2);
        assert_eq!(app.current_page(), 2);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut app = create_test_app();
        app.import_sample_data(40, &mut StdRng::seed_from_u64(3)).unwrap();
        let before = app.store().list().to_vec();

        assert!(!app.delete(MemberId::new(-5)).unwrap());
        assert_eq!(app.store().list(), before.as_slice());
    }

    #[test]
    fn test_import_resets_page_and_shows_list() {
        let mut app = create_test_app();
        app.import_sample_data(100, &mut StdRng::seed_from_u64(3)).unwrap();
        app.change_page(4);

        let n = app
            .import_sample_data(60, &mut StdRng::seed_from_u64(4))
            .unwrap();
        assert_eq!(n, 60);
        assert_eq!(app.current_page(), 1);
        assert_eq!(app.view_mode(), ViewMode::List);

        let first = &app.store().list()[0];
        assert_eq!(first.ministerial_position, sample::PRIME_MINISTER);
        assert_eq!(first.photo_display, format!("https://img/{}.png", first.id));
    }

    #[test]
    fn test_member_lookup() {
        let app = create_test_app();
        assert!(matches!(
            app.member(MemberId::new(1)),
            Err(Error::MemberNotFound(_))
        ));
    }

    #[test]
    fn test_render_list_mode() {
        let mut app = create_test_app();
        app.toggle_view();
        assert!(app.render().contains(crate::list::EMPTY_MESSAGE));
    }
}
