//! Review clicks carry each platform's own vocabulary.

use std::sync::Arc;
use std::sync::Mutex;

use moddash_lib::model::EntityId;
use moddash_lib::model::ListedEntity;
use moddash_lib::model::Platform;
use moddash_lib::model::ReviewStatus;
use moddash_table::entity::REVIEW_COLUMN;
use moddash_table::prelude::*;

type Dispatched = Arc<Mutex<Vec<(EntityId, &'static str)>>>;

fn table_for(entity: ListedEntity) -> (Table<ListedEntity, EntityRenderer>, Dispatched) {
    let dispatched: Dispatched = Arc::new(Mutex::new(Vec::new()));
    let sink = dispatched.clone();
    let callbacks = TableCallbacks::new().on_review(Arc::new(
        move |id: EntityId, status: ReviewStatus| {
            sink.lock().unwrap().push((id, status.as_str()));
        },
    ));
    let rows: Rows<ListedEntity> = vec![entity].into();
    let table = Table::new(
        EntityRenderer::new(),
        TableConfig::default(),
        TableProps::new(rows).callbacks(callbacks),
    )
    .unwrap();
    (table, dispatched)
}

/// Clicks the button labelled `label` in the first row.
fn click(table: &mut Table<ListedEntity, EntityRenderer>, label: &str) {
    let row = &table.view().rows[0];
    let key = row.key;
    let status = match row.cell(REVIEW_COLUMN) {
        Some(Cell::Review(control)) => control.button(label).map(|b| b.status),
        other => panic!("unexpected review cell {:?}", other),
    }
    .unwrap_or_else(|| panic!("no button {}", label));
    assert!(table.handle(TableEvent::Review(key, status)).unwrap());
}

#[test]
fn test_review_click_dispatches_platform_string() {
    let (mut reddit, reddit_calls) = table_for(ListedEntity::new(10, Platform::Reddit, "rust"));
    let (mut instagram, instagram_calls) =
        table_for(ListedEntity::new(20, Platform::Instagram, "someone"));

    click(&mut reddit, "Ok");
    click(&mut instagram, "ok");

    let reddit_value = reddit_calls.lock().unwrap()[0];
    let instagram_value = instagram_calls.lock().unwrap()[0];
    assert_eq!(reddit_value, (EntityId(10), "Ok"));
    assert_eq!(instagram_value, (EntityId(20), "ok"));
    assert_ne!(reddit_value.1, instagram_value.1);
}

#[test]
fn test_reddit_offers_no_seller() {
    let (mut table, calls) = table_for(ListedEntity::new(1, Platform::Reddit, "rust"));
    click(&mut table, "No Seller");
    click(&mut table, "Non Related");
    let values: Vec<_> = calls.lock().unwrap().iter().map(|(_, s)| *s).collect();
    assert_eq!(values, vec!["No Seller", "Non Related"]);
}

#[test]
fn test_review_without_callback_is_noop() {
    let rows: Rows<ListedEntity> = vec![ListedEntity::new(1, Platform::Reddit, "rust")].into();
    let mut table = Table::new(
        EntityRenderer::new(),
        TableConfig::default(),
        TableProps::new(rows),
    )
    .unwrap();
    let status = ReviewStatus::choices(Platform::Reddit)[0];
    assert!(!table.handle(TableEvent::Review(EntityId(1), status)).unwrap());
}

#[test]
fn test_status_from_other_platform_is_refused() {
    let (mut table, calls) = table_for(ListedEntity::new(1, Platform::Reddit, "rust"));
    let instagram_ok = ReviewStatus::choices(Platform::Instagram)[0];

    assert!(!table.handle(TableEvent::Review(EntityId(1), instagram_ok)).unwrap());
    assert!(calls.lock().unwrap().is_empty());

    let reddit_ok = ReviewStatus::choices(Platform::Reddit)[0];
    assert!(table.handle(TableEvent::Review(EntityId(1), reddit_ok)).unwrap());
    assert_eq!(calls.lock().unwrap().len(), 1);
}
