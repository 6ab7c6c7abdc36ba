use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_of_range_input_is_clamped() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-0.5), 0.0, "{ease:?}");
        assert_eq!(ease.apply(2.0), 1.0, "{ease:?}");
    }
}

#[test]
fn in_quart_is_fourth_power() {
    assert_eq!(Ease::InQuart.apply(0.5), 0.0625);
    assert_eq!(Ease::Linear.apply(0.5), 0.5);
}

#[test]
fn deserializes_by_variant_name() {
    let e: Ease = serde_json::from_str("\"InQuart\"").unwrap();
    assert_eq!(e, Ease::InQuart);
    assert_eq!(Ease::default(), Ease::Linear);
}
