//! EcoScout Common Library
//!
//! Web(WASM)コンソールと共有される型とコアロジック:
//! - types: 検出レコードのワイヤ型
//! - session: アップロードセッションの状態機械
//! - history: 履歴キャッシュと複数選択
//! - presenter: 検出結果の表示用マッピング

pub mod error;
pub mod history;
pub mod presenter;
pub mod session;
pub mod types;

pub use error::{Error, Result};
pub use history::HistoryState;
pub use presenter::{present, DetectionView, MediaView, PlateView, ResultView};
pub use session::{FileMeta, MediaKind, UploadPhase, UploadSession};
pub use types::{Detection, DetectionRecord, NO_PLATE};
