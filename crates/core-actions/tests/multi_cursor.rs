mod common;

use common::*;
use core_actions::{EditError, delete_by_motion, delete_by_range, insert_text};
use core_events::MotionKind;
use core_state::Selection;
use core_text::TextError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn insert_at_two_cursors_on_one_row() {
    let mut m = model("abcd");
    let mut v = view(&[(0, 1), (0, 3)]);
    insert_text(&mut m, v.cursors_mut(), "X").unwrap();
    assert_eq!(m.buffer().all_text(), "aXbcXd");
    assert_eq!(positions(&v), vec![(0, 2), (0, 5)]);
}

#[test]
fn multi_row_run_lands_every_cursor_after_its_own_insertion() {
    let mut m = model("ab\ncd");
    let mut v = view(&[(0, 1), (1, 1)]);
    insert_text(&mut m, v.cursors_mut(), "1\n2").unwrap();
    assert_eq!(m.buffer().all_text(), "a1\n2b\nc1\n2d");
    assert_eq!(positions(&v), vec![(1, 1), (3, 1)]);
    assert_eq!(m.buffer().row_count(), 4);
    // One request, one undo step.
    assert_eq!(m.history().blocks().len(), 1);
}

#[test]
fn backspace_at_row_starts_merges_rows() {
    let mut m = model("ab\ncd\nef");
    let mut v = view(&[(1, 0), (2, 0)]);
    delete_by_motion(&mut m, v.cursors_mut(), MotionKind::Backspace, false).unwrap();
    assert_eq!(m.buffer().all_text(), "abcdef");
    assert_eq!(m.buffer().row_count(), 1);
    assert_eq!(positions(&v), vec![(0, 2), (0, 4)]);
}

#[test]
fn deleting_row_ending_merges_two_rows() {
    let mut m = model("ab\ncd");
    let mut v = view(&[(0, 2)]);
    delete_by_motion(&mut m, v.cursors_mut(), MotionKind::Delete, false).unwrap();
    assert_eq!(m.buffer().all_text(), "abcd");
    assert_eq!(m.buffer().row_count(), 1);
}

#[test]
fn selection_deletion_takes_precedence_over_motion() {
    let mut m = model("hello world");
    let mut v = view(&[(0, 11), (0, 0)]);
    v.primary_mut().selection = Selection::anchored(6, 11);
    delete_by_motion(&mut m, v.cursors_mut(), MotionKind::Delete, false).unwrap();
    assert_eq!(m.buffer().all_text(), "ello ");
    assert_eq!(positions(&v), vec![(0, 5), (0, 0)]);
    assert!(v.cursors().iter().all(|c| !c.selection.has_selection()));
}

#[test]
fn cursor_inside_replaced_selection_follows_the_replacement() {
    let mut m = model("abcdef");
    let mut v = view(&[(0, 4), (0, 2)]);
    v.primary_mut().selection = Selection::anchored(1, 4);
    insert_text(&mut m, v.cursors_mut(), "X").unwrap();
    assert_eq!(m.buffer().all_text(), "aXXef");
    assert_eq!(positions(&v), vec![(0, 3), (0, 3)]);
}

#[test]
fn crlf_is_deleted_as_one_unit() {
    let mut m = model("ab\r\ncd");
    let mut v = view(&[(1, 0)]);
    delete_by_motion(&mut m, v.cursors_mut(), MotionKind::Backspace, false).unwrap();
    assert_eq!(m.buffer().all_text(), "abcd");
    assert_eq!(positions(&v), vec![(0, 2)]);
}

#[test]
fn delete_by_range_shifts_later_cursors_and_collapses_inner_ones() {
    let mut m = model("0123456789");
    let mut v = view(&[(0, 2), (0, 5), (0, 9)]);
    delete_by_range(&mut m, v.cursors_mut(), 3, 4).unwrap();
    assert_eq!(m.buffer().all_text(), "012789");
    assert_eq!(positions(&v), vec![(0, 2), (0, 3), (0, 5)]);
    assert_eq!(m.history().blocks().len(), 1);
}

#[test]
fn delete_by_range_out_of_bounds_mutates_nothing() {
    let mut m = model("0123456789");
    let rev = m.revision();
    let mut v = view(&[(0, 2)]);
    let err = delete_by_range(&mut m, v.cursors_mut(), 8, 5).unwrap_err();
    assert_eq!(
        err,
        EditError::Text(TextError::RangeOutOfBounds {
            start: 8,
            count: 5,
            len: 10
        })
    );
    assert_eq!(m.buffer().all_text(), "0123456789");
    assert_eq!(m.revision(), rev);
    assert!(m.history().blocks().is_empty());
}

#[test]
fn movement_motion_is_not_a_deletion() {
    let mut m = model("abc");
    let mut v = view(&[(0, 1)]);
    let err = delete_by_motion(&mut m, v.cursors_mut(), MotionKind::ArrowLeft, false).unwrap_err();
    assert_eq!(err, EditError::UnrecognizedMotion(MotionKind::ArrowLeft));
    assert_eq!(err.to_string(), "motion `ArrowLeft` is not a deletion");
    assert_eq!(m.buffer().all_text(), "abc");
    assert!(m.history().blocks().is_empty());
}

#[test]
fn empty_cursor_set_is_rejected() {
    let mut m = model("abc");
    assert_eq!(insert_text(&mut m, &mut [], "x").unwrap_err(), EditError::NoCursors);
}

proptest! {
    #[test]
    fn insert_then_delete_restores_content(
        base in "[a-z \n]{0,20}",
        inserted in "[a-z\n]{1,8}",
        at in any::<prop::sample::Index>(),
    ) {
        let mut m = model(&base);
        let pos = at.index(base.chars().count() + 1);
        let coords = m.buffer().coordinates(pos).unwrap();
        let mut v = view(&[(coords.row, coords.column)]);
        insert_text(&mut m, v.cursors_mut(), &inserted).unwrap();
        delete_by_range(&mut m, v.cursors_mut(), pos, inserted.chars().count()).unwrap();
        prop_assert_eq!(m.buffer().all_text(), base);
        // Different edit kinds, two persisted boundaries.
        prop_assert_eq!(m.history().blocks().len(), 2);
        prop_assert_eq!(v.primary().position_index(m.buffer()).unwrap(), pos);
    }
}
