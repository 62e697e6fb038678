use std::{sync::Arc, thread};
use weave::{Constructor, Mixins, Registry, derive, testing::Tag};

mod common;
use common::{Counter, Tens, counter};

#[test]
fn test_concurrent_registration_loses_no_names() {
    let registry = Arc::new(Registry::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..50 {
                    registry.register(format!("mixin-{t}-{i}"), Tag::constructor("x"));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.len(), 8 * 50);
}

#[test]
fn test_concurrent_extensions_all_apply() {
    let registry = Arc::new(Registry::new());
    registry.register("counter", counter());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.extend("counter", derive(Tens::wrap)).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Every extension wrapped the result of another; none was overwritten.
    let instance = registry.instantiate("counter").unwrap();
    assert_eq!(instance.depth(), 8);
    assert!(instance.is_a::<Counter>());
}

#[test]
fn test_inject_while_rebinding() {
    let registry = Arc::new(Registry::new());
    registry.register("tag", Tag::constructor("initial"));

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..100 {
                registry.register("tag", Constructor::new(|| Tag::new("rebound")));
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..100 {
                    let mut host = Mixins::new();
                    registry.inject("tag", &mut host).unwrap();
                    let label = host.get_as::<Tag>("tag").unwrap().label().to_owned();
                    assert!(label == "initial" || label == "rebound");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let host = registry.assemble("tag").unwrap();
    assert_eq!(host.get_as::<Tag>("tag").unwrap().label(), "rebound");
}
