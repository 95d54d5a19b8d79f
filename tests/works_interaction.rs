//! Full hover/pin/navigate sessions driven through the public `WorksList` API.

use folio::content::parse_works;
use folio::render::{Interaction, Target, WorksList};
use folio::selection::{Cursor, Listener, PointerSource};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const EXPORT: &str = r#"{
  "works": [
    {
      "_id": "atlas",
      "_title": "Atlas",
      "url": "https://atlas.example",
      "date": "2023-05-14T09:00:00Z",
      "role": "Lead developer",
      "description": "Mapping **tool**."
    },
    {
      "_id": "beacon",
      "_title": "Beacon",
      "date": "2021-11-02",
      "role": "Designer",
      "description": "Signal app."
    }
  ]
}"#;

/// Shares its install log with the test after the list takes ownership.
#[derive(Clone, Default)]
struct SharedPointer {
    log: Rc<RefCell<Vec<(bool, Listener)>>>,
}

impl SharedPointer {
    fn installed(&self, listener: Listener) -> bool {
        self.log
            .borrow()
            .iter()
            .rev()
            .find(|(_, l)| *l == listener)
            .is_some_and(|(on, _)| *on)
    }
}

impl PointerSource for SharedPointer {
    fn install(&mut self, listener: Listener) {
        self.log.borrow_mut().push((true, listener));
    }

    fn remove(&mut self, listener: Listener) {
        self.log.borrow_mut().push((false, listener));
    }
}

fn ev(s: &str) -> Interaction {
    s.parse().unwrap()
}

#[test]
fn hover_pin_and_follow_link() {
    let navigations = Rc::new(Cell::new(0));
    let counter = Rc::clone(&navigations);
    let mut list = WorksList::new(parse_works(EXPORT).unwrap()).on_navigate(move || {
        counter.set(counter.get() + 1);
    });

    list.apply(&ev("enter:beacon"));
    assert_eq!(list.selection().displayed().unwrap().id, "beacon");
    let html = list.render().into_string();
    assert!(html.contains("Click to pin the content"));
    assert!(html.contains("11/2021"));

    let first = list.apply(&ev("click:atlas")).unwrap();
    assert!(first.prevent_default);
    assert_eq!(first.open, None);

    // Pinned: hovering elsewhere changes nothing.
    list.apply(&ev("enter:beacon"));
    list.apply(&ev("leave:beacon"));
    assert_eq!(list.selection().displayed().unwrap().id, "atlas");
    let html = list.render().into_string();
    assert!(html.contains("Click again to open the link"));
    assert!(html.contains("<strong>tool</strong>"));

    let second = list.apply(&ev("click:atlas")).unwrap();
    assert!(!second.prevent_default);
    assert_eq!(second.open.as_deref(), Some("https://atlas.example"));
    assert_eq!(navigations.get(), 1);
    assert!(list.selection().displayed().is_none());
}

#[test]
fn pinned_item_without_link_stays_pinned() {
    let mut list = WorksList::new(parse_works(EXPORT).unwrap());
    list.apply(&ev("click:beacon"));
    let again = list.apply(&ev("click:beacon")).unwrap();
    assert!(again.prevent_default);
    assert!(list.selection().is_locked());
    assert!(!list.render().into_string().contains("Click again"));
}

#[test]
fn outside_press_unpins_and_resets_cursor() {
    let pointer = SharedPointer::default();
    let mut list = WorksList::with_pointer(parse_works(EXPORT).unwrap(), pointer.clone());
    assert!(pointer.installed(Listener::PointerDown));
    assert!(!pointer.installed(Listener::PointerMove));

    list.apply(&ev("click:atlas"));
    assert!(pointer.installed(Listener::PointerMove));

    list.apply(&Interaction::PointerMove(Target::Outside));
    assert_eq!(list.cursor(), Cursor::Close);
    assert!(list.render_page("Works").into_string().contains("cursor: url("));

    list.apply(&Interaction::PointerMove(Target::Details));
    assert_eq!(list.cursor(), Cursor::Default);

    list.apply(&ev("move:outside"));
    list.apply(&ev("down:outside"));
    assert!(!list.selection().is_locked());
    assert!(list.selection().displayed().is_none());
    assert_eq!(list.cursor(), Cursor::Default);
    assert!(!pointer.installed(Listener::PointerMove));
}

#[test]
fn press_inside_keeps_pin() {
    let mut list = WorksList::new(parse_works(EXPORT).unwrap());
    list.apply(&ev("click:atlas"));
    list.apply(&ev("down:details"));
    list.apply(&ev("down:beacon"));
    assert_eq!(list.selection().locked().unwrap().id, "atlas");
}

#[test]
fn moves_before_pinning_do_not_touch_cursor() {
    let mut list = WorksList::new(parse_works(EXPORT).unwrap());
    list.apply(&ev("move:outside"));
    assert_eq!(list.cursor(), Cursor::Default);
}

#[test]
fn unmount_removes_listeners() {
    let pointer = SharedPointer::default();
    let mut list = WorksList::with_pointer(parse_works(EXPORT).unwrap(), pointer.clone());
    list.apply(&ev("click:beacon"));
    drop(list);
    assert!(!pointer.installed(Listener::PointerDown));
    assert!(!pointer.installed(Listener::PointerMove));
}

#[test]
fn mobile_hides_pin_hint() {
    let mut list = WorksList::new(parse_works(EXPORT).unwrap()).mobile(true);
    list.apply(&ev("enter:atlas"));
    assert!(!list.render().into_string().contains("Click to pin"));
}
