use super::*;

#[test]
fn default_ttl_is_seven_days() {
    assert_eq!(Ttl::default(), Ttl::days(7));
    assert_eq!(Ttl::default().as_secs(), 604_800);
}

#[test]
fn parses_each_unit() {
    assert_eq!("45s".parse::<Ttl>().unwrap(), Ttl::seconds(45));
    assert_eq!("30m".parse::<Ttl>().unwrap(), Ttl::minutes(30));
    assert_eq!("12h".parse::<Ttl>().unwrap(), Ttl::hours(12));
    assert_eq!("7d".parse::<Ttl>().unwrap(), Ttl::days(7));
}

#[test]
fn bare_number_is_seconds() {
    assert_eq!("90".parse::<Ttl>().unwrap(), Ttl::seconds(90));
    assert_eq!("0".parse::<Ttl>().unwrap(), Ttl::ZERO);
}

#[test]
fn unit_is_case_insensitive_and_trimmed() {
    assert_eq!(" 2D ".parse::<Ttl>().unwrap(), Ttl::days(2));
}

#[test]
fn rejects_empty() {
    assert_eq!("   ".parse::<Ttl>(), Err(TtlParseError::Empty));
}

#[test]
fn rejects_unknown_unit() {
    assert!(matches!("3w".parse::<Ttl>(), Err(TtlParseError::Invalid(_))));
}

#[test]
fn rejects_missing_digits_and_signs() {
    assert!(matches!("d".parse::<Ttl>(), Err(TtlParseError::Invalid(_))));
    assert!(matches!("-5m".parse::<Ttl>(), Err(TtlParseError::Invalid(_))));
    assert!(matches!("1.5h".parse::<Ttl>(), Err(TtlParseError::Invalid(_))));
}

#[test]
fn rejects_overflow() {
    assert!(matches!("99999999999999999999d".parse::<Ttl>(), Err(TtlParseError::Overflow(_))));
    assert!(matches!("18446744073709551615d".parse::<Ttl>(), Err(TtlParseError::Overflow(_))));
}

#[test]
fn display_uses_largest_whole_unit() {
    assert_eq!(Ttl::days(7).to_string(), "7d");
    assert_eq!(Ttl::hours(36).to_string(), "36h");
    assert_eq!(Ttl::minutes(90).to_string(), "90m");
    assert_eq!(Ttl::seconds(61).to_string(), "61s");
    assert_eq!(Ttl::ZERO.to_string(), "0s");
}

#[test]
fn offset_clamps_to_i64() {
    assert_eq!(Ttl::seconds(u64::MAX).as_offset(), i64::MAX);
    assert_eq!(Ttl::hours(1).as_offset(), 3600);
}

#[test]
fn converts_to_duration() {
    let d: Duration = Ttl::minutes(2).into();
    assert_eq!(d, Duration::from_secs(120));
}
