//! Screen Name Value Object
//!
//! スクリーンネームはログインと画面表示に使う一意なハンドル。
//!
//! ## 不変条件
//! - 空文字・空白のみは不可
//! - 前後の空白は除去して保持
//! - 長さ: 1〜255 文字（コードポイント数）

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a screen name (in characters)
pub const SCREEN_NAME_MAX_LENGTH: usize = 255;

/// Error returned when screen name validation fails
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScreenNameError {
    #[error("Screen name is required")]
    Blank,
    #[error("Screen name must be at most {max} characters long")]
    TooLong { max: usize, actual: usize },
}

/// Validated screen name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScreenName(String);

impl ScreenName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ScreenNameError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ScreenNameError::Blank);
        }

        let actual = trimmed.chars().count();
        if actual > SCREEN_NAME_MAX_LENGTH {
            return Err(ScreenNameError::TooLong {
                max: SCREEN_NAME_MAX_LENGTH,
                actual,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// DB から読み込んだ値（検証済み）を復元
    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ScreenName {
    type Error = ScreenNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScreenName> for String {
    fn from(name: ScreenName) -> Self {
        name.0
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_screen_name() {
        let name = ScreenName::new("alice").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_screen_name_is_trimmed() {
        let name = ScreenName::new("  bob ").unwrap();
        assert_eq!(name.as_str(), "bob");
    }

    #[test]
    fn test_blank_screen_name() {
        assert_eq!(ScreenName::new(""), Err(ScreenNameError::Blank));
        assert_eq!(ScreenName::new("   "), Err(ScreenNameError::Blank));
    }

    #[test]
    fn test_screen_name_length_limit() {
        let max = "a".repeat(SCREEN_NAME_MAX_LENGTH);
        assert!(ScreenName::new(&max).is_ok());

        let too_long = "a".repeat(SCREEN_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            ScreenName::new(&too_long),
            Err(ScreenNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_screen_name_is_case_sensitive() {
        assert_ne!(ScreenName::new("Alice"), ScreenName::new("alice"));
    }
}
