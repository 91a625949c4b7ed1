use super::*;

// =============================================================================
// env helpers: unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on", " TRUE "].iter().enumerate() {
        let key = format!("__TEST_CFG_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_CFG_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_or_unset_is_none() {
    let key = "__TEST_CFG_EB_INVALID_311__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_bool("__TEST_CFG_EB_UNSET_312__"), None);
}

#[test]
fn env_parse_uses_default_when_unset_or_blank() {
    assert_eq!(env_parse("__TEST_CFG_EP_UNSET_401__", 7_u32).unwrap(), 7);
    let key = "__TEST_CFG_EP_BLANK_402__";
    unsafe { std::env::set_var(key, "   ") };
    assert_eq!(env_parse(key, 9_u16).unwrap(), 9);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_reads_value() {
    let key = "__TEST_CFG_EP_VALUE_403__";
    unsafe { std::env::set_var(key, " 8080 ") };
    assert_eq!(env_parse(key, 3000_u16).unwrap(), 8080);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_reports_invalid_value() {
    let key = "__TEST_CFG_EP_BAD_404__";
    unsafe { std::env::set_var(key, "not-a-port") };
    let err = env_parse(key, 3000_u16).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "__TEST_CFG_EP_BAD_404__", .. }));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn required_reports_missing_key() {
    let err = required("__TEST_CFG_REQ_MISSING_501__").unwrap_err();
    assert_eq!(err.to_string(), "__TEST_CFG_REQ_MISSING_501__ is required");
}

// =============================================================================
// from_env: the only test touching the real keys.
// =============================================================================

#[test]
fn from_env_reads_required_and_defaults() {
    unsafe {
        std::env::remove_var("DATABASE_URL");
        std::env::set_var("JWT_SECRET", "s3cret");
    }
    assert!(matches!(Config::from_env(), Err(ConfigError::Missing("DATABASE_URL"))));

    unsafe {
        std::env::set_var("DATABASE_URL", "postgres://localhost/shop");
        std::env::remove_var("TOKEN_TTL");
        std::env::remove_var("PORT");
        std::env::remove_var("DB_MAX_CONNECTIONS");
        std::env::remove_var("STATIC_DIR");
        std::env::remove_var("CORS_PERMISSIVE");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.token_ttl, Ttl::days(7));
    assert_eq!(config.port, 3000);
    assert_eq!(config.db_max_connections, 5);
    assert_eq!(config.static_dir, PathBuf::from("../client/dist"));
    assert!(!config.cors_permissive);

    unsafe { std::env::set_var("TOKEN_TTL", "12h") };
    assert_eq!(Config::from_env().unwrap().token_ttl, Ttl::hours(12));

    unsafe { std::env::set_var("TOKEN_TTL", "forever") };
    assert!(matches!(Config::from_env(), Err(ConfigError::Invalid { key: "TOKEN_TTL", .. })));

    unsafe {
        std::env::remove_var("TOKEN_TTL");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("JWT_SECRET");
    }
}

#[test]
fn debug_hides_secrets() {
    let config = Config {
        database_url: "postgres://user:pw@db/shop".to_owned(),
        jwt_secret: "top-secret".to_owned(),
        token_ttl: Ttl::default(),
        port: 3000,
        db_max_connections: 5,
        static_dir: PathBuf::from("dist"),
        cors_permissive: false,
    };
    let debug = format!("{config:?}");
    assert!(!debug.contains("top-secret"));
    assert!(!debug.contains("pw@db"));
}
