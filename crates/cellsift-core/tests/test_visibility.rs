mod common;

use cellsift_core::cell::CellKey;
use cellsift_core::highlight::OutlineColor;
use common::{record, session, Event};

#[test]
fn test_toggle_twice_restores_state_for_every_cell() {
    let names = ["C001", "C002", "C003", "C004"];
    let mut s = session(&names);

    for name in names {
        let key = CellKey::from(name);
        let index = s.registry().index_of(&key).unwrap();
        let trace = s.trace_for(index);
        let original = s.visibility().is_visible(index);

        let first = s.toggle_view(&key).unwrap();
        assert_eq!(first, !original);
        assert_eq!(s.traces().is_shown(trace), first);

        let second = s.toggle_view(&key).unwrap();
        assert_eq!(second, original);
        assert_eq!(s.visibility().is_visible(index), original);
        assert_eq!(s.traces().is_shown(trace), original);
    }
}

#[test]
fn test_toggle_publishes_panel_before_outline() {
    let mut s = session(&["C001", "C002"]);
    let log = record(&mut s);

    s.toggle_view(&"C002".into()).unwrap();
    s.toggle_view(&"C002".into()).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            Event::TracePanel("C002".into(), false),
            Event::Outline("C002".into(), OutlineColor::Negative),
            Event::TracePanel("C002".into(), true),
            Event::Outline("C002".into(), OutlineColor::Affirmative),
        ]
    );
}

#[test]
fn test_set_view_only_acts_on_change() {
    let mut s = session(&["C001"]);
    let log = record(&mut s);

    s.set_view(&"C001".into(), true).unwrap();
    assert!(log.borrow().is_empty());

    s.set_view(&"C001".into(), false).unwrap();
    assert_eq!(log.borrow().len(), 2);
    let index = s.registry().index_of(&"C001".into()).unwrap();
    assert!(!s.visibility().is_visible(index));
}

#[test]
fn test_view_none_hides_all_panels_then_resets_once() {
    let mut s = session(&["C001", "C002", "C003"]);
    let log = record(&mut s);

    s.view_none().unwrap();

    assert_eq!(s.traces().shown_count(), 0);
    assert_eq!(s.visibility().visible_count(), 0);
    let events = log.borrow();
    assert_eq!(events.len(), 4);
    assert_eq!(events.last(), Some(&Event::OutlinesReset));
    assert!(events[..3]
        .iter()
        .all(|e| matches!(e, Event::TracePanel(_, false))));
}

#[test]
fn test_view_all_shows_every_panel() {
    let mut s = session(&["C001", "C002", "C003"]);
    s.toggle_view(&"C001".into()).unwrap();
    s.toggle_view(&"C003".into()).unwrap();
    assert_eq!(s.traces().shown_count(), 1);

    s.view_all().unwrap();
    assert_eq!(s.traces().shown_count(), 3);
    assert_eq!(s.visibility().visible_count(), 3);
}

#[test]
fn test_visibility_does_not_touch_selection() {
    let mut s = session(&["C001", "C002"]);
    s.view_none().unwrap();
    s.toggle_view(&"C001".into()).unwrap();
    assert_eq!(s.selection().included_count(), 2);
}

#[test]
fn test_shown_traces_follow_registry_order_and_skip_hidden() {
    let mut s = session(&["C003", "C001", "C002"]);
    let handle = |s: &cellsift_core::session::CurationSession, key: &str| {
        s.trace_for(s.registry().index_of(&CellKey::from(key)).unwrap())
    };
    let all = vec![handle(&s, "C003"), handle(&s, "C001"), handle(&s, "C002")];
    assert_eq!(s.shown_traces(), all);

    s.toggle_view(&"C001".into()).unwrap();
    assert_eq!(s.shown_traces(), vec![handle(&s, "C003"), handle(&s, "C002")]);

    s.view_none().unwrap();
    assert!(s.shown_traces().is_empty());
}
