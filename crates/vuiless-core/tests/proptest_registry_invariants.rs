//! Property-based invariant tests for field registration.
//!
//! Arbitrary interleavings of register/unregister calls are replayed against
//! a registry and a simple ordered model. Invariants:
//!
//! 1. At most one registration per id.
//! 2. Validation dispatches to the most recent registration for an id.
//! 3. Unregistering an unknown id changes nothing.
//! 4. Registration order survives replacement.
//! 5. Form insights never mention an unregistered field, even after
//!    touching ids that were never registered.

use proptest::prelude::*;
use vuiless_core::{
    CallbackSet, FieldRegistry, FormContext, FormData, FormOptions, FormState, ValidationResult,
};

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Register { id: u8, tag: u16 },
    Unregister { id: u8 },
    Touch { id: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6, any::<u16>()).prop_map(|(id, tag)| Op::Register { id, tag }),
        (0u8..8).prop_map(|id| Op::Unregister { id }),
        (0u8..8).prop_map(|id| Op::Touch { id }),
    ]
}

fn name(id: u8) -> String {
    format!("field-{id}")
}

fn tagged(tag: u16) -> CallbackSet {
    CallbackSet::new(move |_: &FormData, _: Option<&FormContext>| {
        ValidationResult::message(tag.to_string())
    })
}

/// Ordered model: `(name, latest tag)` in first-registration order.
fn apply_model(model: &mut Vec<(String, u16)>, op: &Op) {
    match *op {
        Op::Register { id, tag } => match model.iter_mut().find(|(n, _)| *n == name(id)) {
            Some(entry) => entry.1 = tag,
            None => model.push((name(id), tag)),
        },
        Op::Unregister { id } => model.retain(|(n, _)| *n != name(id)),
        Op::Touch { .. } => {}
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Registry agrees with the model
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn registry_matches_model(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut registry: FieldRegistry = FieldRegistry::new();
        let mut model = Vec::new();

        for op in &ops {
            match *op {
                Op::Register { id, tag } => registry.register(name(id), tagged(tag)),
                Op::Unregister { id } => {
                    let known = registry.contains(&name(id));
                    prop_assert_eq!(registry.unregister(&name(id)), known);
                }
                Op::Touch { .. } => {}
            }
            apply_model(&mut model, op);
        }

        let ids: Vec<String> = registry.ids().map(|id| id.to_string()).collect();
        let expected: Vec<String> = model.iter().map(|(n, _)| n.clone()).collect();
        prop_assert_eq!(ids, expected);

        let data = FormData::new();
        for (n, tag) in &model {
            let message = registry
                .validate(n, &data, None)
                .and_then(|r| r.error_message());
            prop_assert_eq!(message, Some(tag.to_string()));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Unknown unregister is a no-op
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unknown_unregister_is_noop(registered in proptest::collection::btree_set(0u8..4, 0..4)) {
        let mut registry: FieldRegistry = FieldRegistry::new();
        for id in &registered {
            registry.register(name(*id), tagged(u16::from(*id)));
        }
        let before: Vec<String> = registry.ids().map(|id| id.to_string()).collect();

        prop_assert!(!registry.unregister("not-a-field"));
        prop_assert!(!registry.unregister(&name(200)));

        let after: Vec<String> = registry.ids().map(|id| id.to_string()).collect();
        prop_assert_eq!(before, after);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Insights only mention registered fields
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn insights_track_registrations(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut form: FormState = FormState::new(FormOptions::default(), FormData::new());

        for op in &ops {
            match *op {
                Op::Register { id, tag } => form.register(name(id), tagged(tag)),
                Op::Unregister { id } => form.unregister(&name(id)),
                Op::Touch { id } => {
                    let known = form.registry().contains(&name(id));
                    prop_assert_eq!(form.touch(name(id)), known);
                }
            }
            form.validate_all();
        }

        for id in form.insights().errors.keys().chain(form.insights().touched.iter()) {
            prop_assert!(form.registry().contains(id.as_str()), "stale insight for {}", id);
        }
        prop_assert_eq!(form.insights().error_count(), form.registry().len());
    }
}
