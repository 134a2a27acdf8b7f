//! End-to-end behaviour of the member register through the root controller.

use std::collections::HashSet;
use std::path::Path;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use mpregistry::sample::PRIME_MINISTER;
use mpregistry::{
    App, Error, Field, LoadReport, MemberId, MemberRecord, MemberStore, Pager, Storage,
    SubmitOutcome, ViewMode,
};

const KEY: &str = "mps";

fn open_app(path: &Path) -> App {
    let storage = Storage::open(path).expect("open storage");
    let store = MemberStore::load(storage, KEY).expect("load store");
    App::new(store, Pager::default(), "https://i.pravatar.cc/150?u={id}")
}

fn memory_app() -> App {
    let storage = Storage::open_in_memory().expect("open storage");
    let store = MemberStore::load(storage, KEY).expect("load store");
    App::new(store, Pager::default(), "https://i.pravatar.cc/150?u={id}")
}

fn fill_valid(app: &mut App, first_name: &str) {
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
    fill_valid(app, first_name);
    app.submit_form().await.unwrap().record().clone()
}

fn ids(app: &App) -> Vec<MemberId> {
    app.store().list().iter().map(|m| m.id).collect()
}

#[tokio::test]
async fn valid_submission_adds_one_entry_with_url_photo() {
    let mut app = memory_app();
    fill_valid(&mut app, "สมชาย");

    let outcome = app.submit_form().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Added(_)));
    assert_eq!(app.store().len(), 1);
    let saved = &app.store().list()[0];
    assert_eq!(saved.photo_display, "http://x/y.jpg");
    assert_eq!(saved.first_name, "สมชาย");
    assert_eq!(saved.display_name(), "นาย สมชาย ใจดี");
}

#[tokio::test]
async fn empty_first_name_is_rejected_and_collection_unchanged() {
    let mut app = memory_app();
    add(&mut app, "ก่อน").await;
    let before = app.store().list().to_vec();

    fill_valid(&mut app, "");
    let err = app.submit_form().await.unwrap_err();

    let errors = err.validation_errors().expect("validation error");
    assert!(!errors.is_empty());
    assert!(errors.get(Field::FirstName).is_some());
    assert_eq!(app.store().list(), before.as_slice());
}

#[tokio::test]
async fn added_members_get_fresh_unused_identities() {
    let mut app = memory_app();
    let a = add(&mut app, "a").await;
    app.delete(a.id).unwrap();
    let b = add(&mut app, "b").await;
    let c = add(&mut app, "c").await;

    let seen: HashSet<MemberId> = [a.id, b.id, c.id].into_iter().collect();
    assert_eq!(seen.len(), 3);
    assert_eq!(app.store().get(c.id), Some(&c));
}

#[tokio::test]
async fn edit_preserves_identity_and_length() {
    let mut app = memory_app();
    add(&mut app, "a").await;
    let b = add(&mut app, "b").await;
    add(&mut app, "c").await;
    let before = app.store().list().to_vec();

    app.edit(b.clone());
    app.form_mut().set(Field::Ministry, "กระทรวงการคลัง").unwrap();
    app.submit_form().await.unwrap();

    let after = app.store().list();
    assert_eq!(after.len(), before.len());
    assert_eq!(after[1].id, b.id);
    assert_eq!(after[1].ministry, "กระทรวงการคลัง");
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(app.view_mode(), ViewMode::List);
}

#[tokio::test]
async fn delete_removes_exactly_the_target() {
    let mut app = memory_app();
    let a = add(&mut app, "a").await;
    let b = add(&mut app, "b").await;
    let c = add(&mut app, "c").await;

    assert!(app.delete(b.id).unwrap());

    assert_eq!(ids(&app), vec![a.id, c.id]);
}

#[tokio::test]
async fn deleting_unknown_identity_is_a_noop() {
    let mut app = memory_app();
    add(&mut app, "a").await;
    let before = app.store().list().to_vec();

    assert!(!app.delete(MemberId::new(987_654)).unwrap());
    assert_eq!(app.store().list(), before.as_slice());
}

#[test]
fn pagination_follows_page_size() {
    let mut app = memory_app();
    app.import_sample_data(45, &mut StdRng::seed_from_u64(11)).unwrap();

    assert_eq!(app.total_pages(), 3);
    let all = app.store().list().to_vec();
    assert_eq!(app.current_page_members(), &all[0..20]);

    assert!(!app.change_page(0));
    assert!(!app.change_page(4));
    assert_eq!(app.current_page(), 1);

    assert!(app.change_page(3));
    assert_eq!(app.current_page_members(), &all[40..45]);
}

#[test]
fn import_on_empty_collection_puts_head_first() {
    let mut app = memory_app();
    assert!(app.store().is_empty());

    let n = app
        .import_sample_data(500, &mut StdRng::seed_from_u64(5))
        .unwrap();

    assert_eq!(n, 500);
    assert_eq!(app.view_mode(), ViewMode::List);
    let list = app.store().list();
    assert_eq!(list[0].ministerial_position, PRIME_MINISTER);
    assert_eq!(
        list.iter()
            .filter(|m| m.ministerial_position == PRIME_MINISTER)
            .count(),
        1
    );
    assert!(list[0].photo_display.ends_with(&list[0].id.to_string()));
}

#[tokio::test]
async fn collection_round_trips_through_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mps.db");

    let saved = {
        let mut app = open_app(&path);
        add(&mut app, "a").await;
        add(&mut app, "b").await;
        app.store().list().to_vec()
    };

    let app = open_app(&path);
    assert_eq!(app.store().list(), saved.as_slice());
    assert_eq!(app.store().load_report(), &LoadReport::Loaded(2));
}

#[test]
fn unreadable_stored_state_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mps.db");
    Storage::open(&path)
        .unwrap()
        .set_item(KEY, r#"[{"id": 1, "firstName": "no prefix"}]"#)
        .unwrap();

    let app = open_app(&path);
    assert!(app.store().is_empty());
    assert!(matches!(
        app.store().load_report(),
        LoadReport::Discarded { .. }
    ));
}

#[tokio::test]
async fn legacy_photo_attribute_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mps.db");
    let legacy = r#"[{
        "id": 1700000000000,
        "prefix": "นาง",
        "firstName": "สมศรี",
        "lastName": "สุขใจ",
        "photo": "https://old/photo.png",
        "photoDisplay": "https://old/photo.png",
        "workHistory": "w",
        "pastWorks": "p",
        "ministerialPosition": "m",
        "ministry": "g",
        "politicalParty": "x"
    }]"#;
    Storage::open(&path).unwrap().set_item(KEY, legacy).unwrap();

    let mut app = open_app(&path);
    assert_eq!(app.store().len(), 1);

    let added = add(&mut app, "ใหม่").await;
    assert_eq!(added.id, MemberId::new(1_700_000_000_001));
}

#[tokio::test]
async fn uploaded_photo_is_embedded() {
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("face.png");
    std::fs::write(&photo, [0x89, b'P', b'N', b'G']).unwrap();

    let mut app = memory_app();
    fill_valid(&mut app, "สมชาย");
    app.form_mut().select_file(&photo).await.unwrap();
    let record = app.submit_form().await.unwrap().record().clone();

    assert!(record.photo_display.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn view_details_is_read_only() {
    let mut app = memory_app();
    let a = add(&mut app, "a").await;

    app.view_details(a);
    assert!(matches!(
        app.form_mut().set(Field::FirstName, "x"),
        Err(Error::ReadOnlyForm)
    ));
    assert!(matches!(app.submit_form().await, Err(Error::ReadOnlyForm)));

    app.back_to_list();
    assert_eq!(app.view_mode(), ViewMode::List);
}
