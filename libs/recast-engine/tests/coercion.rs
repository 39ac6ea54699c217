use recast_api::{CoerceError, Kind, TypeDesc, Value, ValueKind};
use recast_engine::{coerce, infer_str, project, to_list};

fn ty(name: &str) -> TypeDesc {
    name.parse().expect("type name")
}

#[test]
fn bool_and_int_stay_distinct() {
    assert_eq!(coerce(&Value::Bool(true), &TypeDesc::INT), Ok(Value::Int(1)));
    assert_eq!(coerce(&Value::Int(1), &TypeDesc::BOOL), Ok(Value::Bool(true)));
    assert_eq!(
        coerce(&Value::Int(1), &TypeDesc::FLOAT).map(|v| v.kind()),
        Ok(ValueKind::Float)
    );
    assert!(coerce(&Value::Bool(true), &TypeDesc::FLOAT).is_err());
    assert_ne!(Value::Bool(true), Value::Int(1));
    assert_eq!(project(&Value::Bool(true)), Ok("True".to_string()));
    assert_eq!(project(&Value::Int(1)), Ok("1".to_string()));
}

#[test]
fn list_and_set_take_one_type_argument() {
    let set_ty = ty("set[str, int]");
    assert_eq!(set_ty, TypeDesc::SET);
    let once = coerce(&Value::list([5, 7]), &set_ty).expect("set");
    assert_eq!(once, Value::set([5, 7]));
    assert_eq!(coerce(&once, &set_ty), Ok(once.clone()));

    let list_ty = ty("list[str, int]");
    assert_eq!(list_ty, TypeDesc::LIST);
    let once = coerce(&Value::set([5, 7]), &list_ty).expect("list");
    assert_eq!(coerce(&once, &list_ty), Ok(once.clone()));
}

#[test]
fn set_into_positional_tuple_keeps_argument_slots() {
    let tuple_ty = ty("tuple[str, int]");
    let once = coerce(&Value::set([5, 7]), &tuple_ty).expect("tuple");
    assert_eq!(once, Value::Tuple(vec![Value::text("5"), Value::Int(7)]));
    assert_eq!(coerce(&once, &tuple_ty), Ok(once.clone()));
}

#[test]
fn sequence_to_mapping() {
    let pairs = Value::list(["k1", "v1", "k2", "v2"]);
    let map = coerce(&pairs, &TypeDesc::MAP).expect("even length");
    assert_eq!(map.map_get(&Value::text("k1")), Some(&Value::text("v1")));
    assert_eq!(map.map_get(&Value::text("k2")), Some(&Value::text("v2")));
    assert!(coerce(&Value::list([1, 2, 3]), &TypeDesc::MAP).is_err());
}

#[test]
fn duplicate_keys_after_coercion_keep_first() {
    let src = Value::Map(vec![
        (Value::Int(1), Value::text("1")),
        (Value::text("1"), Value::text("x")),
    ]);
    let out = coerce(&src, &ty("Dict[int, str]")).expect("map");
    assert_eq!(out, Value::Map(vec![(Value::Int(1), Value::text("1"))]));
    assert_eq!(out.container_len(), Some(1));
}

#[test]
fn degraded_descriptors_act_as_base_kind() {
    let nested = ty("List[List[int]]");
    assert_eq!(nested, TypeDesc::LIST);
    assert_eq!(coerce(&Value::list(["1"]), &nested), Ok(Value::list(["1"])));
    assert_eq!(coerce(&Value::Int(3), &ty("Set[None]")), Ok(Value::set([3])));
}

#[test]
fn text_cells_into_declared_types() {
    let cases: [(&str, &str, Value); 8] = [
        ("37", "int", Value::Int(37)),
        ("37.0", "int", Value::Int(37)),
        ("0x25", "int", Value::Int(37)),
        ("2.5", "float", Value::Float(2.5)),
        ("TRUE", "bool", Value::Bool(true)),
        ("yes", "bool", Value::Bool(false)),
        ("37", "List[int]", Value::list([37])),
        ("", "Dict[str, int]", Value::Map(vec![])),
    ];
    for (text, name, expected) in cases {
        assert_eq!(coerce(&Value::text(text), &ty(name)), Ok(expected), "{text:?} as {name}");
    }
}

#[test]
fn unsupported_kinds_are_reported() {
    assert_eq!(
        coerce(&Value::Bytes(b"ab".to_vec()), &TypeDesc::TEXT),
        Err(CoerceError::UnsupportedValueKind(ValueKind::Bytes))
    );
    assert_eq!(
        project(&Value::Bytes(b"ab".to_vec())),
        Err(CoerceError::UnrepresentableValue(ValueKind::Bytes))
    );
    let err = coerce(&Value::Float(2.0), &TypeDesc::INT).unwrap_err();
    assert_eq!(err.to_string(), "cannot coerce 2.0 into int");
}

#[test]
fn inference_and_projection_meet() {
    let row = "1,2|s,t|True|None|0b11";
    let values: Vec<Value> = row.split('|').map(infer_str).collect();
    assert_eq!(
        values,
        vec![
            Value::list([1, 2]),
            Value::list(["s", "t"]),
            Value::Bool(true),
            Value::None,
            Value::Int(3),
        ]
    );
    let texts: Vec<String> = values.iter().map(|v| project(v).expect("text")).collect();
    assert_eq!(texts, ["1,2", "s,t", "True", "", "3"]);
}

#[test]
fn to_list_wraps_text() {
    assert_eq!(to_list(&Value::text("a,b")), Ok(Value::list(["a,b"])));
    assert!(matches!(
        to_list(&Value::Int(1)),
        Err(CoerceError::UnsupportedConversion { target, .. }) if target.is_plain(Kind::List)
    ));
}

#[test]
fn mixed_kind_set_projects_sorted() {
    assert_eq!(project(&Value::set([Value::Int(1), Value::text("2")])), Ok("1,2".to_string()));
    assert_eq!(project(&Value::set([Value::text("2"), Value::Int(10)])), Ok("10,2".to_string()));
}

#[test]
fn integral_float_text_reads_back_equal() {
    let text = project(&Value::Float(37.0)).expect("text");
    assert_eq!(text, "37.0");
    let back = infer_str(&text);
    assert_eq!(back.kind(), ValueKind::Int);
    assert_eq!(back, Value::Float(37.0));
}
