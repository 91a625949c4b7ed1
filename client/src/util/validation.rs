//! Login and registration form checks.
//!
//! These mirror the server's rules so obvious mistakes are caught before a
//! round trip; the server remains the authority.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;

/// Trimmed, checked registration fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub password: String,
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Check the login form. Returns the trimmed email and the password as typed.
///
/// # Errors
///
/// Returns the message to show under the form.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Check the registration form.
///
/// # Errors
///
/// Returns the message to show under the form for the first rule broken.
pub fn validate_register_input(
    email: &str,
    username: &str,
    password: &str,
    confirm: &str,
) -> Result<RegisterInput, &'static str> {
    let email = email.trim();
    let username = username.trim();
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    let username_len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&username_len) {
        return Err("Username must be 3 to 32 characters.");
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err("Username may only use letters, digits, '_' and '-'.");
    }
    let password_len = password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&password_len) {
        return Err("Password must be 8 to 128 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(RegisterInput { email: email.to_owned(), username: username.to_owned(), password: password.to_owned() })
}

/// Parse a dollar amount typed by an admin (`"12.5"`, `"$12.50"`, `"3"`) into cents.
///
/// # Errors
///
/// Returns the message to show when the amount is not a non-negative price
/// with at most two decimals.
pub fn parse_price_cents(raw: &str) -> Result<i64, &'static str> {
    const MSG: &str = "Enter a price like 12.50.";
    let raw = raw.trim().trim_start_matches('$');
    let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(MSG);
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) || frac.len() > 2 {
        return Err(MSG);
    }
    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| MSG)? };
    let frac: i64 = format!("{frac:0<2}").parse().map_err(|_| MSG)?;
    whole.checked_mul(100).and_then(|c| c.checked_add(frac)).ok_or(MSG)
}
