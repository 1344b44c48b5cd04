use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ApiError;
use crate::models::{BookingRequest, NewBooking};

const MAX_NAME_CHARS: usize = 100;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L} ]+$").expect("regex compiles"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("regex compiles")
});

pub fn validate_class_id(value: i64) -> Result<u64, ApiError> {
    u64::try_from(value)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::Validation("class_id must be a positive integer".into()))
}

/// Returns the trimmed name.
pub fn validate_client_name(value: &str) -> Result<String, ApiError> {
    let name = value.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_CHARS {
        return Err(ApiError::Validation(format!(
            "client_name must be between 1 and {MAX_NAME_CHARS} characters"
        )));
    }
    if !NAME_RE.is_match(name) {
        return Err(ApiError::Validation(
            "Client name must contain only letters and spaces".into(),
        ));
    }
    Ok(name.to_string())
}

pub fn validate_email(value: &str) -> Result<String, ApiError> {
    let email = value.trim();
    if EMAIL_RE.is_match(email) && has_well_formed_labels(email) {
        Ok(email.to_string())
    } else {
        Err(ApiError::Validation("value is not a valid email address".into()))
    }
}

/// No empty dot-separated labels on either side of the `@`, and no domain
/// label starting or ending with a hyphen.
fn has_well_formed_labels(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.split('.').any(str::is_empty) {
        return false;
    }
    domain
        .split('.')
        .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
}

pub fn validate_booking_request(request: BookingRequest) -> Result<NewBooking, ApiError> {
    Ok(NewBooking {
        class_id: validate_class_id(request.class_id)?,
        client_name: validate_client_name(&request.client_name)?,
        client_email: validate_email(&request.client_email)?,
    })
}
