use super::*;

fn collecting(reporter: &ErrorReporter) -> (ListenerId, Rc<RefCell<Vec<ErrorReport>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = reporter.subscribe(move |report| sink.borrow_mut().push(report.clone()));
    (id, seen)
}

#[test]
fn report_reaches_every_listener() {
    let reporter = ErrorReporter::new();
    let (_, first) = collecting(&reporter);
    let (_, second) = collecting(&reporter);
    reporter.report(ErrorReport::new(ErrorLevel::Warning, "backend slow"));
    assert_eq!(first.borrow().len(), 1);
    assert_eq!(second.borrow()[0].level, ErrorLevel::Warning);
    assert_eq!(second.borrow()[0].message, "backend slow");
}

#[test]
fn unsubscribed_listener_is_not_called() {
    let reporter = ErrorReporter::new();
    let (id, seen) = collecting(&reporter);
    assert!(reporter.unsubscribe(id));
    reporter.report(ErrorReport::new(ErrorLevel::Error, "boom"));
    assert!(seen.borrow().is_empty());
    assert_eq!(reporter.listener_count(), 0);
}

#[test]
fn unsubscribe_unknown_id_returns_false() {
    let reporter = ErrorReporter::new();
    let (id, _) = collecting(&reporter);
    assert!(reporter.unsubscribe(id));
    assert!(!reporter.unsubscribe(id));
}

#[test]
fn listener_ids_are_unique() {
    let reporter = ErrorReporter::new();
    let a = reporter.subscribe(|_| {});
    let b = reporter.subscribe(|_| {});
    assert_ne!(a, b);
}

#[test]
fn clones_share_listeners() {
    let reporter = ErrorReporter::new();
    let (_, seen) = collecting(&reporter);
    reporter.clone().report(ErrorReport::new(ErrorLevel::Info, "from clone"));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn listener_may_unsubscribe_itself_during_report() {
    let reporter = ErrorReporter::new();
    let slot: Rc<RefCell<Option<ListenerId>>> = Rc::new(RefCell::new(None));
    let handle = reporter.clone();
    let own_id = Rc::clone(&slot);
    let id = reporter.subscribe(move |_| {
        if let Some(id) = *own_id.borrow() {
            handle.unsubscribe(id);
        }
    });
    *slot.borrow_mut() = Some(id);
    reporter.report(ErrorReport::new(ErrorLevel::Error, "once"));
    assert_eq!(reporter.listener_count(), 0);
}

#[test]
fn report_context_is_preserved() {
    let reporter = ErrorReporter::new();
    let (_, seen) = collecting(&reporter);
    reporter.report(ErrorReport::new(ErrorLevel::Error, "fail").with_context("component", "LoginPage"));
    assert_eq!(seen.borrow()[0].context.get("component").map(String::as_str), Some("LoginPage"));
}

#[test]
fn error_level_display_is_uppercase() {
    assert_eq!(ErrorLevel::Warning.to_string(), "WARNING");
    assert_eq!(ErrorLevel::default(), ErrorLevel::Error);
}

#[test]
fn rejection_message_uses_readable_reason() {
    assert_eq!(rejection_message(Some(" fetch aborted ".to_owned())), "fetch aborted");
}

#[test]
fn rejection_message_falls_back_when_reason_is_unreadable() {
    assert_eq!(rejection_message(None), UNKNOWN_REJECTION_MESSAGE);
    assert_eq!(rejection_message(Some("   ".to_owned())), UNKNOWN_REJECTION_MESSAGE);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn global_handlers_are_inert_outside_browser() {
    let reporter = ErrorReporter::new();
    install_global_handlers(&reporter);
    assert_eq!(reporter.listener_count(), 0);
}
