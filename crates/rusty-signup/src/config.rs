// File: src/config.rs
// Purpose: Form configuration parsing from signup.toml

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use rusty_signup_validation::{
    PasswordCharset, PasswordPolicy, DEFAULT_NAME_MIN_LENGTH, DEFAULT_PASSWORD_MIN_LENGTH,
    DEFAULT_PHONE_DIGITS, DEFAULT_SYMBOLS,
};

use crate::banner::{BannerPolicy, DEFAULT_AUTO_HIDE_MS};
use crate::controller::FieldRules;

/// Registration form configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SignupConfig {
    #[serde(default)]
    pub password: PasswordConfig,

    #[serde(default)]
    pub banner: BannerConfig,

    #[serde(default)]
    pub fields: FieldsConfig,

    #[serde(default)]
    pub messages: MessagesConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Which characters a password may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharsetChoice {
    /// Anything goes
    Any,
    /// Letters and digits only
    Alphanumeric,
    /// Letters, digits and the configured `symbols`
    Symbols,
}

/// Password policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordConfig {
    #[serde(default = "default_password_min_length")]
    pub min_length: usize,

    #[serde(default = "default_charset")]
    pub charset: CharsetChoice,

    /// Only used with `charset = "symbols"`
    #[serde(default = "default_symbols")]
    pub symbols: String,

    #[serde(default = "default_false")]
    pub require_symbol: bool,
}

/// When the status banner goes away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerPolicyChoice {
    AutoHide,
    UntilNextSubmit,
}

/// Status banner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerConfig {
    #[serde(default = "default_banner_policy")]
    pub policy: BannerPolicyChoice,

    #[serde(default = "default_auto_hide_ms")]
    pub auto_hide_ms: u64,
}

/// Per-field limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsConfig {
    #[serde(default = "default_name_min_length")]
    pub name_min_length: usize,

    #[serde(default = "default_phone_digits")]
    pub phone_digits: usize,
}

/// Banner texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesConfig {
    #[serde(default = "default_success_message")]
    pub success: String,

    #[serde(default = "default_error_message")]
    pub error: String,
}

/// Cross-field behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Re-check an already styled confirmation when the password is blurred
    #[serde(default = "default_true")]
    pub revalidate_confirm_on_password_change: bool,
}

// Default values
fn default_password_min_length() -> usize {
    DEFAULT_PASSWORD_MIN_LENGTH
}

fn default_charset() -> CharsetChoice {
    CharsetChoice::Any
}

fn default_symbols() -> String {
    DEFAULT_SYMBOLS.to_string()
}

fn default_banner_policy() -> BannerPolicyChoice {
    BannerPolicyChoice::AutoHide
}

fn default_auto_hide_ms() -> u64 {
    DEFAULT_AUTO_HIDE_MS
}

fn default_name_min_length() -> usize {
    DEFAULT_NAME_MIN_LENGTH
}

fn default_phone_digits() -> usize {
    DEFAULT_PHONE_DIGITS
}

fn default_success_message() -> String {
    "Registration successful!".to_string()
}

fn default_error_message() -> String {
    "Please fix the highlighted fields and try again.".to_string()
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

// Default implementations
impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: default_password_min_length(),
            charset: default_charset(),
            symbols: default_symbols(),
            require_symbol: false,
        }
    }
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            policy: default_banner_policy(),
            auto_hide_ms: default_auto_hide_ms(),
        }
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            name_min_length: default_name_min_length(),
            phone_digits: default_phone_digits(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            success: default_success_message(),
            error: default_error_message(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            revalidate_confirm_on_password_change: true,
        }
    }
}

impl PasswordConfig {
    /// Reject combinations that no password could ever satisfy
    pub fn validate(&self) -> Result<()> {
        match self.charset {
            CharsetChoice::Alphanumeric if self.require_symbol => {
                bail!("require_symbol = true cannot be met with charset = \"alphanumeric\"")
            }
            CharsetChoice::Symbols
                if !self
                    .symbols
                    .chars()
                    .any(|c| !c.is_alphanumeric() && !c.is_whitespace()) =>
            {
                bail!("charset = \"symbols\" needs at least one symbol in `symbols`")
            }
            _ => Ok(()),
        }
    }

    pub fn policy(&self) -> PasswordPolicy {
        let charset = match self.charset {
            CharsetChoice::Any => PasswordCharset::Unrestricted,
            CharsetChoice::Alphanumeric => PasswordCharset::Restricted {
                symbols: String::new(),
            },
            CharsetChoice::Symbols => PasswordCharset::Restricted {
                symbols: self.symbols.clone(),
            },
        };

        PasswordPolicy {
            min_length: self.min_length,
            charset,
            require_symbol: self.require_symbol,
        }
    }
}

impl BannerConfig {
    pub fn policy(&self) -> BannerPolicy {
        match self.policy {
            BannerPolicyChoice::AutoHide => BannerPolicy::AutoHide {
                after_ms: self.auto_hide_ms,
            },
            BannerPolicyChoice::UntilNextSubmit => BannerPolicy::UntilNextSubmit,
        }
    }
}

impl SignupConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./signup.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("signup.toml")
    }

    /// Parse configuration from TOML text; blank text yields the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SignupConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that parse fine but cannot work together
    pub fn validate(&self) -> Result<()> {
        self.password
            .validate()
            .context("Invalid [password] section")
    }

    /// Validator parameters derived from this configuration
    pub fn rules(&self) -> FieldRules {
        FieldRules {
            name_min_length: self.fields.name_min_length,
            phone_digits: self.fields.phone_digits,
            password: self.password.policy(),
        }
    }
}
