//! End-to-end editing: store, session, history and persistence together.

use beadloom_core::storage::{MemoryStorage, Storage};
use beadloom_core::{
    BeadColor, BeadPalette, BeadPattern, Clipboard, DimensionGuide, EditorConfig, EditorSession,
    GuideAxis, GuideReference, PatternGroup, PegboardShape, Rgb, Store, StoreEvent, ToolKind,
    ToolOutcome,
};
use std::cell::RefCell;
use std::rc::Rc;

fn palette() -> BeadPalette {
    BeadPalette::new(
        "artkal",
        "Artkal S",
        vec![
            BeadColor::new("s01", "White", Rgb::new(255, 255, 255)),
            BeadColor::new("s13", "Black", Rgb::new(0, 0, 0)),
            BeadColor::new("s05", "Red", Rgb::new(200, 16, 46)),
        ],
    )
}

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);
    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}

#[test]
fn test_paint_undo_redo_and_persist() {
    let shape = PegboardShape::heart(11);
    let mut store = Store::default();
    store.upsert_palette(palette());
    store.upsert_shape(shape.clone());
    let id = store.create_pattern(BeadPattern::new("Heart", &shape, "artkal", None));

    let events = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&events);
    store.subscribe(move |event, _| seen.borrow_mut().push(event.clone()));

    let config = EditorConfig {
        history_limit: Some(2),
        ..EditorConfig::default()
    };
    let mut session = EditorSession::with_config(Clipboard::new(), &config);
    assert!(session.open(&store, &id));

    let before = store.snapshot();
    assert_eq!(
        session.apply_tool(&mut store, ToolKind::Fill, 5, 5, Some("s05")),
        ToolOutcome::Changed
    );
    assert_eq!(
        session.apply_tool(&mut store, ToolKind::Pencil, 5, 5, Some("s01")),
        ToolOutcome::Changed
    );
    assert_eq!(
        session.apply_tool(&mut store, ToolKind::Eraser, 5, 5, None),
        ToolOutcome::Changed
    );

    // Older snapshots are untouched.
    assert!(before.pattern(&id).unwrap().grid.iter().flatten().all(Option::is_none));

    // Fill stays inside the heart.
    let grid = &store.project().pattern(&id).unwrap().grid;
    for (y, row) in grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if cell.is_some() {
                assert!(shape.contains(x as i32, y as i32));
            }
        }
    }

    // Limit of two undo steps.
    assert!(session.undo(&mut store));
    assert!(session.undo(&mut store));
    assert!(!session.undo(&mut store));
    assert_eq!(
        store.project().pattern(&id).unwrap().grid[5][5].as_deref(),
        Some("s05")
    );
    assert!(session.redo(&mut store));
    assert_eq!(
        store.project().pattern(&id).unwrap().grid[5][5].as_deref(),
        Some("s01")
    );
    assert!(events
        .borrow()
        .iter()
        .all(|e| *e == StoreEvent::PatternUpdated(id.clone())));

    let storage = MemoryStorage::new();
    block_on(storage.save("hearts", &store.snapshot())).unwrap();
    let reloaded = block_on(storage.load("hearts")).unwrap();
    assert_eq!(reloaded, *store.snapshot());

    // Reloading keeps the session's history for the same id.
    store.replace(reloaded);
    assert!(session.open(&store, &id));
    assert!(session.can_undo());
}

#[test]
fn test_group_parts_share_guides() {
    let shape = PegboardShape::rectangle(10, 6, false);
    let mut store = Store::default();
    store.upsert_shape(shape.clone());
    let group_id = store.create_group(PatternGroup::new("Box"));
    let front = store
        .add_part_with_pattern(&group_id, "Front", BeadPattern::new("Front", &shape, "artkal", None))
        .unwrap();
    store
        .add_part_with_pattern(&group_id, "Side", BeadPattern::new("Side", &shape, "artkal", None))
        .unwrap();

    let lid = DimensionGuide::new("Lid", GuideAxis::Horizontal, GuideReference::Bottom, 2);
    assert!(store.add_dimension_guide(&group_id, lid));

    let project = store.snapshot();
    let group = project.group(&group_id).unwrap();
    assert_eq!(group.parts.len(), 2);
    assert_eq!(group.dimension_guides()[0].resolve(shape.cols, shape.rows), 4);

    assert!(store.remove_part(&group_id, &front));
    assert_eq!(store.project().patterns.len(), 1);
    assert!(store.delete_group(&group_id));
    assert!(store.project().patterns.is_empty());

    // The old snapshot still has everything.
    assert_eq!(project.patterns.len(), 2);
}

#[test]
fn test_copy_between_patterns_through_shared_clipboard() {
    let shape = PegboardShape::square(4);
    let mut store = Store::default();
    store.upsert_shape(shape.clone());
    let a = store.create_pattern(BeadPattern::new("A", &shape, "artkal", None));
    let b = store.create_pattern(BeadPattern::new("B", &shape, "artkal", None));

    let clipboard = Clipboard::new();
    let mut left = EditorSession::new(clipboard.clone());
    let mut right = EditorSession::new(clipboard);
    left.open(&store, &a);
    right.open(&store, &b);

    left.pencil(&mut store, 0, 0, "s13");
    left.pencil(&mut store, 1, 1, "s13");
    left.begin_selection(0, 0);
    left.update_selection(1, 1);
    assert!(left.copy_selection());

    right.begin_selection(2, 2);
    assert!(right.paste_selection(&mut store));
    let grid = &store.project().pattern(&b).unwrap().grid;
    assert_eq!(grid[2][2].as_deref(), Some("s13"));
    assert_eq!(grid[3][3].as_deref(), Some("s13"));
    assert_eq!(grid[2][3], None);
    assert!(!left.can_redo());
}
