//! Merchant sign-up: phone OTP, then the registration form.
//!
//! Every step validates its input first and reports problems per field, so
//! the form can show them inline and the user can correct and resubmit. Only
//! valid input reaches the API.

use api::{ApiMessage, CourierApi, OtpRequest, OtpVerification, Registration};

use crate::error::{AppError, FieldError};

pub const OTP_LENGTH: usize = 6;
pub const MIN_PASSWORD_LENGTH: usize = 6;
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=14;

/// Normalise and check a phone number: optional leading `+`, then 10–14 digits.
/// Spaces and dashes are dropped.
pub fn validate_phone(phone: &str) -> Result<String, FieldError> {
    let cleaned: String = phone
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();
    if cleaned.is_empty() {
        return Err(FieldError::new("phone", "is required"));
    }
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::new("phone", "may only contain digits"));
    }
    if !PHONE_DIGITS.contains(&digits.len()) {
        return Err(FieldError::new(
            "phone",
            format!(
                "must have {} to {} digits",
                PHONE_DIGITS.start(),
                PHONE_DIGITS.end()
            ),
        ));
    }
    Ok(cleaned)
}

pub fn validate_otp(otp: &str) -> Result<String, FieldError> {
    let otp = otp.trim();
    if otp.len() != OTP_LENGTH || !otp.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::new(
            "otp",
            format!("must be {OTP_LENGTH} digits"),
        ));
    }
    Ok(otp.to_string())
}

/// Check every field of the form, returning all problems at once.
pub fn validate_registration(form: &Registration) -> Result<Registration, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut cleaned = form.clone();

    cleaned.name = form.name.trim().to_string();
    if cleaned.name.is_empty() {
        errors.push(FieldError::new("name", "is required"));
    }
    match validate_phone(&form.phone) {
        Ok(phone) => cleaned.phone = phone,
        Err(e) => errors.push(e),
    }
    if form.password.is_empty() {
        errors.push(FieldError::new("password", "is required"));
    } else if form.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    cleaned.branch_code = form.branch_code.trim().to_string();
    if cleaned.branch_code.is_empty() {
        errors.push(FieldError::new("branch", "is required"));
    }
    cleaned.address = form
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string);
    cleaned.email = form
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string);
    if let Some(email) = &cleaned.email {
        if !email.contains('@') {
            errors.push(FieldError::new("email", "is not a valid address"));
        }
    }

    if errors.is_empty() {
        Ok(cleaned)
    } else {
        Err(errors)
    }
}

/// The three registration calls.
#[derive(Clone, Debug)]
pub struct RegistrationFlow<A: CourierApi> {
    api: A,
}

impl<A: CourierApi> RegistrationFlow<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn send_otp(&self, phone: &str) -> Result<ApiMessage, AppError> {
        let request = OtpRequest {
            phone: validate_phone(phone)?,
        };
        Ok(self.api.send_otp(&request).await?)
    }

    pub async fn verify_otp(&self, phone: &str, otp: &str) -> Result<ApiMessage, AppError> {
        let mut errors = Vec::new();
        let phone = validate_phone(phone).map_err(|e| errors.push(e));
        let otp = validate_otp(otp).map_err(|e| errors.push(e));
        let (Ok(phone), Ok(otp)) = (phone, otp) else {
            return Err(AppError::Validation(errors));
        };
        Ok(self
            .api
            .verify_otp(&OtpVerification { phone, otp })
            .await?)
    }

    pub async fn register(&self, form: &Registration) -> Result<ApiMessage, AppError> {
        let form = validate_registration(form).map_err(AppError::Validation)?;
        let ack = self.api.register(&form).await?;
        tracing::info!("registration accepted");
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;

    fn form() -> Registration {
        Registration {
            name: " Rahman Traders ".into(),
            phone: "017-1100 0000".into(),
            password: "secret1".into(),
            branch_code: "DHK".into(),
            address: Some("  ".into()),
            email: None,
        }
    }

    #[test]
    fn test_phone_rules() {
        assert_eq!(validate_phone("01711000000").unwrap(), "01711000000");
        assert_eq!(validate_phone("+880 1711-000000").unwrap(), "+8801711000000");
        assert_eq!(validate_phone("").unwrap_err().message, "is required");
        assert!(validate_phone("0171100000a").is_err());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("123456789012345").is_err());
    }

    #[test]
    fn test_otp_rules() {
        assert_eq!(validate_otp(" 123456 ").unwrap(), "123456");
        assert!(validate_otp("12345").is_err());
        assert!(validate_otp("12345a").is_err());
        assert!(validate_otp("1234567").is_err());
    }

    #[test]
    fn test_registration_collects_every_error() {
        let bad = Registration {
            name: " ".into(),
            phone: "abc".into(),
            password: "123".into(),
            branch_code: String::new(),
            address: None,
            email: Some("nope".into()),
        };
        let fields: Vec<_> = validate_registration(&bad)
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["name", "phone", "password", "branch", "email"]);
    }

    #[test]
    fn test_registration_is_cleaned() {
        let cleaned = validate_registration(&form()).unwrap();
        assert_eq!(cleaned.name, "Rahman Traders");
        assert_eq!(cleaned.phone, "01711000000");
        assert_eq!(cleaned.address, None);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_api() {
        let api = FakeApi::default();
        let flow = RegistrationFlow::new(api.clone());

        assert!(matches!(flow.send_otp("1").await, Err(AppError::Validation(_))));
        match flow.verify_otp("1", "2").await {
            Err(AppError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }

        let state = api.state();
        assert!(state.otp_requests.is_empty());
        assert!(state.otp_verifications.is_empty());
    }

    #[tokio::test]
    async fn test_full_flow() {
        let api = FakeApi::default();
        let flow = RegistrationFlow::new(api.clone());

        flow.send_otp("01711000000").await.unwrap();
        flow.verify_otp("01711000000", "123456").await.unwrap();
        flow.register(&form()).await.unwrap();

        let state = api.state();
        assert_eq!(state.otp_requests[0].phone, "01711000000");
        assert_eq!(state.otp_verifications[0].otp, "123456");
        assert_eq!(state.registrations[0].name, "Rahman Traders");
    }

    #[tokio::test]
    async fn test_server_rejection_is_surfaced() {
        let api = FakeApi::default();
        api.state().reject_otp = true;
        let flow = RegistrationFlow::new(api);

        match flow.verify_otp("01711000000", "654321").await {
            Err(AppError::Api(api::ApiError::Rejected(message))) => assert_eq!(message, "Invalid OTP"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
