use std::thread;

use nutkit::{DEFAULT_EXPAND_ICON, ExpansionRegistry};

// =============================================================================
// Membership
// =============================================================================

#[test]
fn test_query_mirrors_membership() {
    let registry = ExpansionRegistry::new().with_expanded(["a", "c"]);
    assert!(registry.is_expanded("a"));
    assert!(!registry.is_expanded("b"));
    assert!(registry.is_expanded("c"));
    assert_eq!(registry.expanded(), vec!["a".to_string(), "c".to_string()]);
}

#[test]
fn test_double_toggle_restores_state() {
    let registry = ExpansionRegistry::new();
    for name in ["a", "b"] {
        let before = registry.is_expanded(name);
        registry.toggle(name);
        assert_ne!(registry.is_expanded(name), before);
        registry.toggle(name);
        assert_eq!(registry.is_expanded(name), before);
    }
}

#[test]
fn test_empty_name_never_expanded() {
    let registry = ExpansionRegistry::new().with_expanded([""]);
    assert!(!registry.is_expanded(""));

    registry.toggle("");
    assert!(!registry.is_expanded(""));
    assert!(registry.expanded().is_empty());
    assert_eq!(registry.revision(), 0);
}

#[test]
fn test_concurrent_toggles_are_not_lost() {
    let registry = ExpansionRegistry::new();
    let threads = 16;
    let toggles = 50;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..toggles {
                    registry.toggle("a");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // An even number of flips lands back where it started.
    assert!(!registry.is_expanded("a"));
    assert_eq!(registry.revision(), (threads * toggles) as u64);
}

#[test]
fn test_concurrent_accordion_toggles_keep_one_open() {
    let registry = ExpansionRegistry::accordion();

    let handles: Vec<_> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|name| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..101 {
                    registry.toggle(name);
                    assert!(registry.expanded().len() <= 1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(registry.expanded().len() <= 1);
    assert_eq!(registry.revision(), 404);
}

#[test]
fn test_clones_share_scope() {
    let registry = ExpansionRegistry::new();
    let other = registry.clone();
    other.toggle("x");
    assert!(registry.is_expanded("x"));
}

#[test]
fn test_separate_registries_are_independent() {
    let first = ExpansionRegistry::new();
    let second = ExpansionRegistry::new();
    first.toggle("x");
    assert!(!second.is_expanded("x"));
}

// =============================================================================
// Accordion
// =============================================================================

#[test]
fn test_accordion_keeps_one_open() {
    let registry = ExpansionRegistry::accordion();
    assert!(registry.is_accordion());

    registry.toggle("a");
    registry.toggle("b");
    assert!(!registry.is_expanded("a"));
    assert!(registry.is_expanded("b"));

    registry.toggle("b");
    assert!(registry.expanded().is_empty());
}

#[test]
fn test_accordion_seed_keeps_last() {
    let registry = ExpansionRegistry::accordion().with_expanded(["a", "b"]);
    assert_eq!(registry.expanded(), vec!["b".to_string()]);
}

// =============================================================================
// Notifications
// =============================================================================

#[test]
fn test_revision_bumps_on_change_only() {
    let registry = ExpansionRegistry::new();
    let mut rx = registry.subscribe();
    assert!(!rx.has_changed().unwrap());

    registry.open("a");
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), 1);

    // Already open: no change.
    registry.open("a");
    assert!(!rx.has_changed().unwrap());

    registry.close("missing");
    assert!(!rx.has_changed().unwrap());

    registry.toggle("a");
    assert_eq!(registry.revision(), 2);
}

#[tokio::test]
async fn test_subscriber_wakes_on_toggle() {
    let registry = ExpansionRegistry::new();
    let mut rx = registry.subscribe();

    let writer = registry.clone();
    tokio::spawn(async move {
        writer.toggle("late");
    });

    rx.changed().await.unwrap();
    assert!(registry.is_expanded("late"));
}

// =============================================================================
// Icon
// =============================================================================

#[test]
fn test_expand_icon_default_and_override() {
    assert_eq!(ExpansionRegistry::new().expand_icon(), DEFAULT_EXPAND_ICON);
    assert_eq!(
        ExpansionRegistry::new().with_expand_icon(">").expand_icon(),
        ">"
    );
}
