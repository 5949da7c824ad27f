//! When new props may reuse the previous view.

use std::sync::Arc;

use moddash_lib::model::EntityId;
use moddash_lib::model::ListedEntity;
use moddash_lib::model::Platform;
use moddash_table::compare::same_set;
use moddash_table::prelude::*;

fn rows() -> Rows<ListedEntity> {
    (1..=3)
        .map(|i| ListedEntity::new(i, Platform::Reddit, format!("sub{}", i)))
        .collect::<Vec<_>>()
        .into()
}

fn set(ids: &[i64]) -> KeySet<EntityId> {
    ids.iter().map(|i| EntityId(*i)).collect()
}

#[test]
fn test_set_comparison_ignores_order() {
    assert!(same_set(Some(&set(&[1, 2, 3])), Some(&set(&[3, 2, 1]))));
    assert!(!same_set(Some(&set(&[1, 2, 3])), Some(&set(&[1, 2, 4]))));
    assert!(!same_set(Some(&set(&[1, 2])), Some(&set(&[1, 2, 3]))));
}

#[test]
fn test_equal_rows_behind_new_reference_force_render() {
    let first = rows();
    let copy: Rows<ListedEntity> = first.iter().cloned().collect::<Vec<_>>().into();
    assert_eq!(first.len(), copy.len());
    assert_eq!(&*first, &*copy);

    let props = TableProps::new(first);
    assert!(!props.can_skip_render(&props.clone().rows(copy)));
}

#[test]
fn test_table_reuses_view_for_equivalent_props() {
    let data = rows();
    let on_review: Callback<moddash_table::callbacks::ReviewFn<EntityId>> = Arc::new(|_, _| {});
    let props = TableProps::new(data.clone())
        .selectable(SelectionMode::Multi)
        .selection(set(&[1, 2]))
        .callbacks(TableCallbacks::new().on_review(on_review.clone()));

    let mut table = Table::new(EntityRenderer::new(), TableConfig::default(), props).unwrap();
    table.view();

    let equivalent = TableProps::new(data)
        .selectable(SelectionMode::Multi)
        .selection(set(&[2, 1]))
        .callbacks(TableCallbacks::new().on_review(on_review));
    assert!(!table.set_props(equivalent).unwrap());
    table.view();
    assert_eq!(table.render_count(), 1);
}
