//! Unit tests for key-binding resolution.

use super::*;
use crate::command::Invocation;

#[test]
fn test_lookup_bound_chord() {
    let bindings = KeyBindings::new(vec![
        ("Super+n".to_string(), Invocation::PushGroup),
        ("Super+1".to_string(), Invocation::SwapWindow(1)),
    ]);

    assert!(!bindings.is_empty());
    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings.lookup("Super+n"), Some(&Invocation::PushGroup));
    assert_eq!(bindings.lookup("Super+1"), Some(&Invocation::SwapWindow(1)));
    assert_eq!(bindings.lookup("Super+z"), None);
}

#[test]
fn test_duplicate_chord_keeps_last_binding() {
    let bindings = KeyBindings::new(vec![
        ("Super+q".to_string(), Invocation::PopWindow),
        ("Super+q".to_string(), Invocation::Logout),
    ]);

    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings.lookup("Super+q"), Some(&Invocation::Logout));
}
