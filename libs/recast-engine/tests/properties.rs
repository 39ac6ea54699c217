use proptest::prelude::*;
use recast_api::{ContainerKind, Kind, TypeDesc, Value};
use recast_engine::{coerce, infer_str, project};

const SCALAR_KINDS: [Kind; 4] = [Kind::Bool, Kind::Int, Kind::Float, Kind::Text];

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Float),
        "[a-zA-Z0-9_. ]{0,8}".prop_map(Value::Text),
        Just(Value::None),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Tuple),
            prop::collection::btree_set(inner.clone(), 0..4).prop_map(Value::Set),
            prop::collection::vec((inner.clone(), inner), 0..3).prop_map(Value::map_from_pairs),
        ]
    })
}

fn arb_kind() -> impl Strategy<Value = Kind> {
    prop::sample::select(vec![
        Kind::Bool,
        Kind::Int,
        Kind::Float,
        Kind::Text,
        Kind::List,
        Kind::Set,
        Kind::Tuple,
        Kind::Map,
        Kind::None,
        Kind::Path,
    ])
}

const TYPE_NAMES: [&str; 10] = [
    "list[int]",
    "List[str]",
    "set[float]",
    "set[str, int]",
    "tuple[str, int]",
    "Tuple[int, str, bool]",
    "dict[str, float]",
    "Dict[int, list]",
    "List[List[int]]",
    "dict[str]",
];

fn arb_target() -> impl Strategy<Value = TypeDesc> {
    let elem = || prop::sample::select(SCALAR_KINDS.to_vec());
    prop_oneof![
        arb_kind().prop_map(TypeDesc::Plain),
        elem().prop_map(TypeDesc::list_of),
        elem().prop_map(TypeDesc::set_of),
        elem().prop_map(TypeDesc::tuple_of),
        (elem(), elem()).prop_map(|(k, v)| TypeDesc::map_of(k, v)),
        prop::collection::vec(elem(), 2..4).prop_map(|args| {
            TypeDesc::param(ContainerKind::Tuple, args.into_iter().map(TypeDesc::Plain).collect())
        }),
        prop::sample::select(TYPE_NAMES.to_vec())
            .prop_map(|name| name.parse::<TypeDesc>().expect("type name")),
    ]
}

proptest! {
    #[test]
    fn coerce_is_total(value in arb_value(), target in arb_target()) {
        let _ = coerce(&value, &target);
    }

    #[test]
    fn coerce_is_idempotent(value in arb_value(), target in arb_target()) {
        if let Ok(once) = coerce(&value, &target) {
            prop_assert_eq!(coerce(&once, &target), Ok(once.clone()));
        }
    }

    #[test]
    fn infer_never_panics(text in ".{0,16}") {
        let _ = infer_str(&text);
    }

    #[test]
    fn bool_text_round_trip(b in any::<bool>()) {
        let v = Value::Bool(b);
        prop_assert_eq!(infer_str(&project(&v).expect("text")), v);
    }

    #[test]
    fn int_text_round_trip(i in any::<i64>()) {
        let v = Value::Int(i);
        prop_assert_eq!(infer_str(&project(&v).expect("text")), v);
    }

    #[test]
    fn float_text_round_trip(f in any::<f64>()) {
        let v = Value::Float(f);
        prop_assert_eq!(infer_str(&project(&v).expect("text")), v);
    }

    #[test]
    fn set_projection_ignores_insertion_order(items in prop::collection::vec(any::<i64>(), 0..6)) {
        let forward = Value::set(items.iter().copied());
        let backward = Value::set(items.iter().rev().copied());
        prop_assert_eq!(project(&forward), project(&backward));
    }

    #[test]
    fn set_text_round_trip_keeps_members(items in prop::collection::btree_set(any::<i64>(), 0..6)) {
        let set = Value::set(items);
        let text = project(&set).expect("text");
        prop_assert_eq!(coerce(&infer_str(&text), &TypeDesc::SET), Ok(set));
    }
}
