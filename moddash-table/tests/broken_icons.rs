//! Broken icon memory and placeholder fallback.

use moddash_lib::model::EntityId;
use moddash_lib::model::ListedEntity;
use moddash_lib::model::Platform;
use moddash_table::entity::ICON_COLUMN;
use moddash_table::prelude::*;

#[test]
fn test_capacity_plus_one_evicts_first() {
    let capacity = 200;
    let mut cache = BrokenIconCache::new(capacity);
    for id in 0..=capacity as i64 {
        cache.insert(EntityId(id));
    }
    assert_eq!(cache.len(), capacity);
    assert!(!cache.contains(&EntityId(0)));
    assert!(cache.contains(&EntityId(1)));
    assert!(cache.contains(&EntityId(capacity as i64)));
}

#[test]
fn test_reporting_twice_keeps_size() {
    let mut cache = BrokenIconCache::default();
    assert!(cache.insert(EntityId(7)));
    assert!(!cache.insert(EntityId(7)));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_failed_icon_renders_placeholder() {
    let rows: Rows<ListedEntity> = vec![
        ListedEntity::new(1, Platform::Reddit, "rust").with_icon("https://img/rust.png"),
        ListedEntity::new(2, Platform::Reddit, "golang").with_icon("https://img/go.png"),
    ]
    .into();
    let mut table = Table::new(
        EntityRenderer::new(),
        TableConfig::default(),
        TableProps::new(rows),
    )
    .unwrap();

    let icon = |table: &mut Table<ListedEntity, EntityRenderer>, index: usize| {
        match table.view().row(index).and_then(|r| r.cell(ICON_COLUMN)) {
            Some(Cell::Avatar(avatar)) => avatar.clone(),
            other => panic!("unexpected icon cell {:?}", other),
        }
    };

    assert!(!icon(&mut table, 0).is_placeholder());

    assert!(table.handle(TableEvent::IconFailed(EntityId(1))).unwrap());
    assert_eq!(
        icon(&mut table, 0),
        AvatarView::Placeholder {
            letter: 'R',
            color: moddash_table::cell::placeholder_color(1),
        }
    );
    assert!(!icon(&mut table, 1).is_placeholder());

    // Idempotent: no new entry and no rebuild.
    let renders = table.render_count();
    assert!(!table.handle(TableEvent::IconFailed(EntityId(1))).unwrap());
    table.view();
    assert_eq!(table.render_count(), renders);
    assert_eq!(table.broken_icons().len(), 1);
}

#[test]
fn test_shared_cache_applies_to_other_tables() {
    let shared = SharedBrokenIcons::new(10);
    let rows: Rows<ListedEntity> =
        vec![ListedEntity::new(1, Platform::Reddit, "rust").with_icon("https://img/rust.png")].into();

    let mut first = Table::new(
        EntityRenderer::new(),
        TableConfig::default(),
        TableProps::new(rows.clone()),
    )
    .unwrap()
    .with_broken_icons(shared.clone());
    let mut second = Table::new(
        EntityRenderer::new(),
        TableConfig::default(),
        TableProps::new(rows),
    )
    .unwrap()
    .with_broken_icons(shared);

    first.handle(TableEvent::IconFailed(EntityId(1))).unwrap();
    let row = &second.view().rows[0];
    assert!(matches!(
        row.cell(ICON_COLUMN),
        Some(Cell::Avatar(AvatarView::Placeholder { .. }))
    ));
}

#[test]
fn test_caller_supplied_broken_set() {
    let rows: Rows<ListedEntity> =
        vec![ListedEntity::new(3, Platform::Instagram, "someone").with_icon("https://img/a.png")]
            .into();
    let broken: KeySet<EntityId> = [EntityId(3)].into_iter().collect();
    let mut table = Table::new(
        EntityRenderer::new(),
        TableConfig::default(),
        TableProps::new(rows).broken(broken),
    )
    .unwrap();

    assert!(matches!(
        table.view().rows[0].cell(ICON_COLUMN),
        Some(Cell::Avatar(AvatarView::Placeholder { letter: 'S', .. }))
    ));
}
