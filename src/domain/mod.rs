//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod validation;
mod value;

pub use request::{SendByTemplate, SendVerificationCode};
pub use validation::ValidationError;
pub use value::{
    ApiKey, MobileNumber, SecretKey, SendId, TemplateId, Token, VerificationCode,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_rejects_empty_and_trims() {
        assert!(matches!(
            ApiKey::new("   "),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
        assert_eq!(ApiKey::new(" key ").unwrap().as_str(), "key");
    }

    #[test]
    fn secret_key_preserves_whitespace_and_redacts() {
        assert!(SecretKey::new("").is_err());

        let secret = SecretKey::new(" T=^V=tNG ").unwrap();
        assert_eq!(secret.expose(), " T=^V=tNG ");
        assert_eq!(format!("{secret:?}"), "SecretKey(\"<redacted>\")");
    }

    #[test]
    fn token_formatters_redact() {
        let token = Token::new("super-secret");

        assert_eq!(format!("{token:?}"), "Token(\"<redacted>\")");
        assert_eq!(format!("{token}"), "<redacted>");
        assert_eq!(token.expose(), "super-secret");
    }

    #[test]
    fn send_verification_code_parse_validates_both_parts() {
        let request = SendVerificationCode::parse(" 09121234567 ", "123456").unwrap();
        assert_eq!(request.mobile().as_str(), "09121234567");
        assert_eq!(request.code().as_str(), "123456");

        assert!(matches!(
            SendVerificationCode::parse("", "123456"),
            Err(ValidationError::Empty {
                field: MobileNumber::FIELD
            })
        ));
        assert!(matches!(
            SendVerificationCode::parse("09121234567", " "),
            Err(ValidationError::Empty {
                field: VerificationCode::FIELD
            })
        ));
    }

    #[test]
    fn send_by_template_collects_parameters() {
        let mobile = MobileNumber::new("09121234567").unwrap();
        let request = SendByTemplate::new(mobile, TemplateId::new(1234))
            .parameters([("name", "Ali"), ("code", "1")])
            .unwrap()
            .parameter("name", "Sara")
            .unwrap();

        assert_eq!(request.template_id().value(), 1234);
        assert_eq!(request.parameter_map().len(), 2);
        assert_eq!(
            request.parameter_map().get("name").map(String::as_str),
            Some("Sara")
        );
    }

    #[test]
    fn send_by_template_rejects_blank_parameter_name() {
        let mobile = MobileNumber::new("09121234567").unwrap();
        let err = SendByTemplate::new(mobile, TemplateId::new(1))
            .parameter(" ", "value")
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty {
                field: SendByTemplate::PARAMETER_FIELD
            }
        ));
    }

    #[test]
    fn send_id_displays_as_integer() {
        assert_eq!(SendId::new(42).to_string(), "42");
        assert_eq!(SendId::SENTINEL, "0");
    }
}
