use std::cell::RefCell;

use super::*;
use crate::util::errors::ErrorReporter;

fn error(message: &str) -> ErrorReport {
    ErrorReport::new(ErrorLevel::Error, message)
}

#[test]
fn only_error_level_reports_are_shown() {
    assert!(is_toastworthy(&error("script failed")));
    assert!(!is_toastworthy(&ErrorReport::new(ErrorLevel::Warning, "slow")));
    assert!(!is_toastworthy(&ErrorReport::new(ErrorLevel::Info, "session discarded")));
    assert!(!is_toastworthy(&error("   ")));
}

#[test]
fn boundary_reports_are_left_to_the_fallback() {
    let report = error("render failed").with_context("component", BOUNDARY_COMPONENT);
    assert!(!is_toastworthy(&report));
    assert!(is_toastworthy(&error("render failed").with_context("component", "LoginFlow")));
}

#[test]
fn push_keeps_the_newest_notices() {
    let mut toasts = Vec::new();
    for id in 0..5 {
        push_toast(&mut toasts, id, &error(&format!("erreur {id}")));
    }
    assert_eq!(toasts.len(), MAX_TOASTS);
    assert_eq!(toasts.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3, 4]);
    assert_eq!(toasts[2].message, "erreur 4");
}

#[test]
fn dismiss_removes_only_that_notice() {
    let mut toasts = Vec::new();
    push_toast(&mut toasts, 1, &error("a"));
    push_toast(&mut toasts, 2, &error("b"));
    dismiss_toast(&mut toasts, 1);
    assert_eq!(toasts, vec![Toast { id: 2, message: "b".to_owned() }]);
    dismiss_toast(&mut toasts, 99);
    assert_eq!(toasts.len(), 1);
}

#[test]
fn reporter_fan_out_feeds_the_toast_list() {
    let reporter = ErrorReporter::new();
    let toasts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&toasts);
    let next_id = Rc::new(Cell::new(0_u64));
    let id = reporter.subscribe(move |report| {
        if is_toastworthy(report) {
            push_toast(&mut sink.borrow_mut(), next_id.replace(next_id.get() + 1), report);
        }
    });

    reporter.report(ErrorReport::new(ErrorLevel::Info, "stored session discarded"));
    reporter.report(error("Uncaught TypeError"));
    assert_eq!(toasts.borrow().len(), 1);
    assert_eq!(toasts.borrow()[0].message, "Uncaught TypeError");

    assert!(reporter.unsubscribe(id));
    reporter.report(error("after unmount"));
    assert_eq!(toasts.borrow().len(), 1);
}
