use super::*;

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("abc.def.ghi"), "Bearer abc.def.ghi");
}

#[test]
fn failure_message_prefers_server_text() {
    assert_eq!(
        failure_message("login", 401, Some("invalid email or password".to_owned())),
        "invalid email or password"
    );
}

#[test]
fn failure_message_falls_back_to_status() {
    assert_eq!(failure_message("login", 500, None), "login failed: 500");
    assert_eq!(failure_message("registration", 409, Some("  ".to_owned())), "registration failed: 409");
}

#[test]
fn orders_endpoint_by_scope() {
    assert_eq!(orders_endpoint(OrderScope::Mine), "/api/orders");
    assert_eq!(orders_endpoint(OrderScope::All), "/api/admin/orders");
}

#[test]
fn verify_failure_display() {
    assert_eq!(VerifyFailure::Rejected(401).to_string(), "verification rejected: 401");
    assert_eq!(VerifyFailure::Network("offline".to_owned()).to_string(), "verification failed: offline");
}
