//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by every domain crate.

use serde::Serialize;

/// エラー種別の列挙体
///
/// 表示層（UI）がメッセージの出し分けや再試行の判断に使う分類です。
/// ドメイン固有のエラーは必ずいずれかの種別に対応付けられます。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Unavailable;
/// assert!(kind.is_retryable());
/// assert_eq!(kind.as_str(), "Service Unavailable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力値が不正
    InvalidInput,
    /// 認証されていない（セッションなし）
    Unauthenticated,
    /// 認証情報が誤っている
    InvalidCredentials,
    /// 権限なし（ロール不一致）
    Forbidden,
    /// リソースが見つからない
    NotFound,
    /// 現在の状態と競合（重複登録など）
    Conflict,
    /// 期限切れ
    Expired,
    /// ストアに到達できない
    Unavailable,
    /// 内部エラー
    Internal,
}

impl ErrorKind {
    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::Conflict.as_str(), "Conflict");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::Unauthenticated => "Not Signed In",
            ErrorKind::InvalidCredentials => "Invalid Credentials",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Expired => "Expired",
            ErrorKind::Unavailable => "Service Unavailable",
            ErrorKind::Internal => "Internal Error",
        }
    }

    /// システム側のエラーかどうかを判定
    ///
    /// これらのエラーはログに記録すべきです。
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, ErrorKind::Unavailable | ErrorKind::Internal)
    }

    /// 同じ操作をそのまま再試行して成功し得るかどうか
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Unavailable)
    }

    /// 再ログインで解消するかどうか
    #[inline]
    pub const fn requires_sign_in(&self) -> bool {
        matches!(self, ErrorKind::Unauthenticated | ErrorKind::Expired)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_server_error() {
        assert!(!ErrorKind::InvalidInput.is_server_error());
        assert!(!ErrorKind::NotFound.is_server_error());
        assert!(ErrorKind::Internal.is_server_error());
        assert!(ErrorKind::Unavailable.is_server_error());
    }

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::Unavailable.is_retryable());
        assert!(!ErrorKind::Internal.is_retryable());
        assert!(!ErrorKind::Conflict.is_retryable());
    }

    #[test]
    fn test_requires_sign_in() {
        assert!(ErrorKind::Unauthenticated.requires_sign_in());
        assert!(ErrorKind::Expired.requires_sign_in());
        assert!(!ErrorKind::Forbidden.requires_sign_in());
    }

    #[test]
    fn test_serialize_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorKind::InvalidCredentials).unwrap();
        assert_eq!(json, r#""INVALID_CREDENTIALS""#);
    }
}
