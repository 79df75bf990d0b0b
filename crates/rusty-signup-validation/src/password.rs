//! Password validation functions

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FormatRule};
use crate::result::ValidationResult;
use crate::string::non_empty;

/// Symbols permitted by the [`PasswordPolicy::with_symbols`] preset
pub const DEFAULT_SYMBOLS: &str = "@$!%*?&";

/// Minimum password length used by every preset
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;

/// Which characters may appear in a password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PasswordCharset {
    /// Any character is accepted
    Unrestricted,
    /// ASCII letters, digits and the listed symbols only
    Restricted { symbols: String },
}

impl PasswordCharset {
    fn permits(&self, c: char) -> bool {
        match self {
            PasswordCharset::Unrestricted => true,
            PasswordCharset::Restricted { symbols } => {
                c.is_ascii_alphanumeric() || symbols.contains(c)
            }
        }
    }

    fn symbols(&self) -> Option<&str> {
        match self {
            PasswordCharset::Unrestricted => None,
            PasswordCharset::Restricted { symbols } => Some(symbols),
        }
    }
}

/// Password rule chosen when the form is built
///
/// A password always needs `min_length` characters and at least one
/// lowercase letter, one uppercase letter and one digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub charset: PasswordCharset,
    /// Also demand one character that is neither a letter nor a digit
    pub require_symbol: bool,
}

impl PasswordPolicy {
    /// 8+ characters with lowercase, uppercase and digit; anything else allowed
    pub fn standard() -> Self {
        Self {
            min_length: DEFAULT_PASSWORD_MIN_LENGTH,
            charset: PasswordCharset::Unrestricted,
            require_symbol: false,
        }
    }

    /// Like [`standard`](Self::standard) but letters and digits only
    pub fn alphanumeric() -> Self {
        Self {
            charset: PasswordCharset::Restricted {
                symbols: String::new(),
            },
            ..Self::standard()
        }
    }

    /// Like [`alphanumeric`](Self::alphanumeric) but `@$!%*?&` are also allowed
    pub fn with_symbols() -> Self {
        Self {
            charset: PasswordCharset::Restricted {
                symbols: DEFAULT_SYMBOLS.to_string(),
            },
            ..Self::standard()
        }
    }

    fn format_rule(&self) -> FormatRule {
        FormatRule::Password {
            min_length: self.min_length,
            require_symbol: self.require_symbol,
        }
    }

    /// Checks a trimmed, non-empty password against the policy
    pub fn check(&self, password: &str) -> Result<(), FieldError> {
        if let Some(symbols) = self.charset.symbols() {
            if !password.chars().all(|c| self.charset.permits(c)) {
                return Err(FieldError::BadFormat(FormatRule::PasswordCharacters {
                    symbols: symbols.to_string(),
                }));
            }
        }

        // regex has no look-around, so the character classes are scanned directly
        let long_enough = password.chars().count() >= self.min_length;
        let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
        let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_symbol = password
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

        if long_enough
            && has_lowercase
            && has_uppercase
            && has_digit
            && (has_symbol || !self.require_symbol)
        {
            Ok(())
        } else {
            Err(FieldError::BadFormat(self.format_rule()))
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Validates a password against a policy
pub fn validate_password(value: &str, policy: &PasswordPolicy) -> ValidationResult {
    let result = non_empty(value).and_then(|password| {
        policy.check(password)?;
        Ok(password.to_string())
    });
    result.into()
}

/// Validates the confirmation against the password as it is right now
pub fn validate_confirm_password(password: &str, confirm: &str) -> ValidationResult {
    let result = non_empty(confirm).and_then(|confirm| {
        if confirm == password.trim() {
            Ok(confirm.to_string())
        } else {
            Err(FieldError::Mismatch)
        }
    });
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Passw0rd")]
    #[case("Abcdefg1")]
    #[case("Password123")]
    #[case("Passw0rd#~")]
    #[case("  Passw0rd  ")]
    fn test_standard_accepts(#[case] input: &str) {
        assert!(validate_password(input, &PasswordPolicy::standard()).valid);
    }

    #[rstest]
    #[case("password")]
    #[case("PASS1234")]
    #[case("Password")]
    #[case("Pass1")]
    #[case("passw0rd")]
    fn test_standard_rejects(#[case] input: &str) {
        let result = validate_password(input, &PasswordPolicy::standard());
        assert_eq!(
            result.reason,
            Some(FieldError::BadFormat(FormatRule::Password {
                min_length: 8,
                require_symbol: false,
            }))
        );
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(
            validate_password("", &PasswordPolicy::standard()).reason,
            Some(FieldError::EmptyField)
        );
    }

    #[test]
    fn test_alphanumeric_rejects_symbols() {
        let policy = PasswordPolicy::alphanumeric();
        assert!(validate_password("Passw0rd", &policy).valid);
        assert_eq!(
            validate_password("Passw0rd!", &policy).reason,
            Some(FieldError::BadFormat(FormatRule::PasswordCharacters {
                symbols: String::new()
            }))
        );
    }

    #[test]
    fn test_with_symbols_allows_listed_set_only() {
        let policy = PasswordPolicy::with_symbols();
        assert!(validate_password("Passw0rd", &policy).valid);
        assert!(validate_password("P@ssw0rd!", &policy).valid);
        assert!(!validate_password("Passw0rd#", &policy).valid);
    }

    #[test]
    fn test_require_symbol() {
        let policy = PasswordPolicy {
            require_symbol: true,
            ..PasswordPolicy::with_symbols()
        };
        assert!(!validate_password("Passw0rd", &policy).valid);
        assert!(validate_password("Passw0rd?", &policy).valid);
    }

    #[test]
    fn test_whitespace_is_not_a_symbol() {
        let policy = PasswordPolicy {
            require_symbol: true,
            ..PasswordPolicy::standard()
        };
        assert_eq!(
            validate_password("Pass w0rd", &policy).reason,
            Some(FieldError::BadFormat(FormatRule::Password {
                min_length: 8,
                require_symbol: true,
            }))
        );
        assert!(validate_password("Pass w0rd#", &policy).valid);
    }

    #[test]
    fn test_confirm_password() {
        assert!(validate_confirm_password("Abcdefg1", "Abcdefg1").valid);
        assert_eq!(
            validate_confirm_password("Abcdefg1", "Abcdefg2").reason,
            Some(FieldError::Mismatch)
        );
        assert_eq!(
            validate_confirm_password("Abcdefg1", " ").reason,
            Some(FieldError::EmptyField)
        );
        // an empty confirmation is reported as empty even when the password is empty too
        assert_eq!(
            validate_confirm_password("", "").reason,
            Some(FieldError::EmptyField)
        );
    }
}
