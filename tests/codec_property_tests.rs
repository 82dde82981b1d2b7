use chrono::TimeZone;
use proptest::prelude::*;

use aquifer::{decode, encode, WireValue};

/// Стратегия простых данных: без обещаний и пользовательских типов.
fn arb_plain_value() -> impl Strategy<Value = WireValue> {
    let leaf = prop_oneof![
        Just(WireValue::Null),
        any::<bool>().prop_map(WireValue::Bool),
        any::<i64>().prop_map(WireValue::Int),
        // NaN не равен сам себе, сравнение round-trip было бы ложно
        (-1.0e12..1.0e12f64).prop_map(WireValue::Float),
        "[a-zA-Z0-9 _-]{0,24}".prop_map(WireValue::Str),
        proptest::collection::vec(any::<u8>(), 0..48).prop_map(WireValue::Bytes),
        (-8_000_000_000_000i64..8_000_000_000_000i64).prop_map(|ms| {
            WireValue::Date(
                chrono::Utc
                    .timestamp_millis_opt(ms)
                    .single()
                    .expect("millis in range"),
            )
        }),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(WireValue::Array),
            proptest::collection::vec(("[a-z]{0,8}", inner), 0..6).prop_map(WireValue::Map),
        ]
    })
}

proptest! {
    /// Свойство: для любых простых данных decode(encode(x)) == x.
    #[test]
    fn prop_plain_roundtrip(value in arb_plain_value()) {
        let bytes = encode(&value).unwrap();
        prop_assert_eq!(decode(&bytes).unwrap(), value);
    }

    /// Свойство: декодер не паникует на произвольных байтах.
    #[test]
    fn prop_decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&bytes);
    }
}
