//! Cross-cutting validation rules for `validator` derives

use validator::ValidationError;

/// 空文字・空白のみを拒否する
///
/// ```rust
/// use kernel::validation::not_blank;
///
/// assert!(not_blank("hi").is_ok());
/// assert!(not_blank("   ").is_err());
/// ```
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// 空白を除いた値が空なら `None` に畳み込む
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("a").is_ok());
        assert!(not_blank(" a ").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("\t\n").is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("bio".to_string())), Some("bio".to_string()));
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
