use disaster_decoder::{decode, extract_id, is_valid, is_valid_geo_code, parse_geo_code};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn time_code() -> impl Strategy<Value = String> {
    (1000_u32..=9999, 1_u32..=12, 1_u32..=28, 0_u32..=23, 0_u32..=59, 0_u32..=59).prop_map(
        |(year, month, day, hour, minute, second)| {
            format!("{year:04}{month:02}{day:02}{hour:02}{minute:02}{second:02}")
        },
    )
}

fn valid_id() -> impl Strategy<Value = String> {
    ("[0-9]{12}", time_code(), "[0-9]{10}")
        .prop_map(|(geo, time, tail)| format!("{geo}{time}{tail}"))
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn valid_identifiers_decode_and_reassemble(id in valid_id()) {
        prop_assert!(is_valid(&id));
        let decoded = decode(&id).expect("valid identifier decodes");
        prop_assert_eq!(&decoded.original_id, &id);
        prop_assert_eq!(decoded.reassemble(), id);
    }

    #[test]
    fn wrong_length_is_rejected(id in "[0-9]{0,35}|[0-9]{37,48}") {
        prop_assert!(!is_valid(&id));
        prop_assert!(decode(&id).unwrap_err().is_format_error());
    }

    #[test]
    fn any_non_digit_is_rejected(id in valid_id(), position in 0_usize..36, letter in "[a-zA-Z]") {
        let mut broken = id.clone();
        broken.replace_range(position..position + 1, &letter);
        prop_assert!(!is_valid(&broken));
        prop_assert!(decode(&broken).is_err());
    }

    #[test]
    fn out_of_range_month_is_rejected(id in valid_id(), month in 13_u32..=99) {
        let mut broken = id.clone();
        broken.replace_range(16..18, &format!("{month:02}"));
        prop_assert!(!is_valid(&broken));
    }

    #[test]
    fn geo_codes_decompose_and_roll_up(code in "[0-9]{12}") {
        let geo = parse_geo_code(&code).expect("12 digits parse");
        prop_assert_eq!(geo.segments().concat(), code);
        for (_, rollup) in geo.rollups() {
            prop_assert_eq!(rollup.len(), 12);
            prop_assert!(is_valid_geo_code(rollup));
        }
    }

    #[test]
    fn embedded_identifier_is_extracted(
        id in valid_id(),
        prefix in "[a-z_ .\\-]{0,12}",
        suffix in "[a-z_ .\\-]{0,12}"
    ) {
        let text = format!("{prefix}{id}{suffix}");
        prop_assert_eq!(extract_id(&text), Some(id.as_str()));
    }
}
