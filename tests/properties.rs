use proptest::prelude::*;

use wtag::{Error, NamedUnion, Switch, Function, Tag, Union, Value};

// -----------------------------
// Helpers to generate values
// -----------------------------

fn gen_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::None),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

fn gen_payload() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(gen_scalar(), 0..6)
}

fn gen_names() -> impl Strategy<Value = Vec<String>> {
    // Distinct capitalised names, which are never reserved
    prop::collection::btree_set("[A-Z][a-z]{0,4}", 1..6)
        .prop_map(|names| names.into_iter().collect())
}

fn constant(v: i64) -> Function { Function::new(move |_| Ok(v.into())) }

// -----------------------------
// Tests
// -----------------------------

proptest! {
    #[test]
    fn prop_unwrap_reproduces_payload(payload in gen_payload(), name in "[A-Z][a-z]{0,4}") {
        let tag = Tag::named(name);
        let value = tag.wrap(payload.clone());
        let args = tag.unwrap(&value, |args| args.to_vec()).unwrap();
        prop_assert_eq!(args, payload);
    }

    #[test]
    fn prop_tags_are_nominal(payload in gen_payload(), name in "[A-Z][a-z]{0,4}") {
        let a = Tag::named(name.as_str());
        let b = Tag::named(name.as_str());
        prop_assert_ne!(&a, &b);
        prop_assert!(!a.is(&b.wrap(payload.clone())));
        prop_assert!(!a.is(&Value::from(&a)));
        prop_assert!(a.unwrap(&b.wrap(payload), |_| ()).is_err());
    }

    #[test]
    fn prop_scalars_are_never_members(value in gen_scalar(), names in gen_names()) {
        let msg = NamedUnion::new(&names).unwrap();
        prop_assert!(!msg.has(&value));
        for name in &names {
            prop_assert!(!msg.has(&Value::from(&msg[name.as_str()])));
        }
    }

    // Dispatch picks the case of the value's own tag, whichever member it is
    #[test]
    fn prop_exhaustive_switch_dispatches(names in gen_names(), pick in any::<prop::sample::Index>()) {
        let msg = NamedUnion::new(&names).unwrap();
        let switch = msg.tags().iter().enumerate()
            .fold(Switch::new(), |switch, (i, tag)| switch.case(tag, constant(i as i64)));
        let i = pick.index(names.len());
        let value = msg.tags()[i].wrap([0; 0]);
        prop_assert_eq!(msg.run(&value, &switch), Ok(Value::Int(i as i64)));
    }

    // A strict subset of the members needs a catch-all, the full set forbids one
    #[test]
    fn prop_coverage_rules(names in gen_names(), keep in any::<prop::sample::Index>()) {
        let msg = NamedUnion::new(&names).unwrap();
        let covered = keep.index(names.len() + 1);
        let partial = msg.tags()[..covered].iter()
            .fold(Switch::new(), |switch, tag| switch.case(tag, constant(0)));
        let complete = covered == names.len();

        let without = msg.check(&partial);
        let with = msg.check(&partial.clone().otherwise(constant(1)));
        prop_assert_eq!(without.is_ok(), complete);
        prop_assert_eq!(with.is_ok(), !complete);
        let err = if complete { with } else { without };
        prop_assert!(matches!(err, Err(Error::InvalidOperation(_))));
    }

    #[test]
    fn prop_union_of_repeated_tag_fails(n in 1usize..5) {
        let tag = Tag::new();
        let mut tags: Vec<Tag> = (0..n).map(|_| Tag::new()).collect();
        tags.push(tag.clone());
        tags.push(tag);
        let err = Union::new(tags).unwrap_err();
        prop_assert!(matches!(err, Error::DuplicateDefinition(_)));
    }
}
