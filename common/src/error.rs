//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// ファイル未選択のまま送信した。ネットワークには出さない
    #[error("Please select a file first.")]
    NoFileSelected,

    /// 送信が既に進行中。呼び出し側はno-opとして扱う
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// バックエンドのエラー応答（detailメッセージをそのまま保持）
    #[error("{0}")]
    Backend(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_selected_message() {
        // 操作者に見せる文言そのもの
        let error = Error::NoFileSelected;
        assert_eq!(format!("{}", error), "Please select a file first.");
    }

    #[test]
    fn test_backend_detail_passthrough() {
        let error = Error::Backend("Could not open video file".to_string());
        assert_eq!(format!("{}", error), "Could not open video file");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
