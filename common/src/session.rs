//! アップロードセッションの状態機械
//!
//! 1回のアップロード（選択→送信→結果）のライフサイクルを管理する。
//! Empty → Ready → Submitting → (成功) Empty / (失敗) Failed → 再選択・再送信。
//! 実ファイルハンドルはUI層が保持し、ここではメタデータのみを扱う。
//! 成功時にレコードを保持しない。表示の所有権はナビゲーション側に移る。

use crate::error::{Error, Result};

/// メディア種別。MIMEタイプのプレフィックスで判定する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    /// 未知の種別。拒否せずそのままバックエンドへ送る
    Other,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Other
        }
    }
}

/// 選択中ファイルのメタデータ
#[derive(Debug, Clone, PartialEq)]
pub struct FileMeta {
    pub name: String,
    pub kind: MediaKind,
}

/// セッションフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Empty,
    Ready,
    Submitting,
    Failed,
}

/// アップロードセッション（1件分、永続化しない）
#[derive(Debug, Clone, Default)]
pub struct UploadSession {
    phase: UploadPhase,
    selected: Option<FileMeta>,
    preview: Option<String>,
    last_error: Option<String>,
    // プレビュー導出の世代番号。古い世代の結果は捨てる
    preview_epoch: u64,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn selected(&self) -> Option<&FileMeta> {
        self.selected.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.selected.is_some()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|f| f.name.as_str())
    }

    /// 画像プレビュー（Data URL）。画像以外の選択では常にNone
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Failedフェーズでのみ設定されるエラーメッセージ
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == UploadPhase::Submitting
    }

    /// ファイルを選択する。前の選択と導出済みプレビューは破棄される。
    /// 返り値は新しいプレビュー世代番号。非同期導出の結果は
    /// `set_preview` にこの番号を添えて適用する
    pub fn select(&mut self, name: String, kind: MediaKind) -> u64 {
        self.selected = Some(FileMeta { name, kind });
        self.preview = None;
        self.last_error = None;
        self.phase = UploadPhase::Ready;
        self.preview_epoch += 1;
        self.preview_epoch
    }

    /// 導出済みプレビューを適用する。世代が古い、または選択が
    /// 画像でなくなっていれば捨てる。適用したらtrue
    pub fn set_preview(&mut self, epoch: u64, data_url: String) -> bool {
        if epoch != self.preview_epoch {
            return false;
        }
        match &self.selected {
            Some(meta) if meta.kind == MediaKind::Image => {
                self.preview = Some(data_url);
                true
            }
            _ => false,
        }
    }

    /// 選択・プレビュー・エラーを空に戻す。どのフェーズからでも冪等
    pub fn clear(&mut self) {
        self.selected = None;
        self.preview = None;
        self.last_error = None;
        self.phase = UploadPhase::Empty;
    }

    /// 送信を開始する。未選択なら検証エラー（ネットワークに出さない）、
    /// 送信中の二重呼び出しはErr(SubmissionInFlight)で状態は変えない
    pub fn begin_submit(&mut self) -> Result<()> {
        if self.phase == UploadPhase::Submitting {
            return Err(Error::SubmissionInFlight);
        }
        if self.selected.is_none() {
            self.last_error = Some(Error::NoFileSelected.to_string());
            self.phase = UploadPhase::Failed;
            return Err(Error::NoFileSelected);
        }
        self.last_error = None;
        self.phase = UploadPhase::Submitting;
        Ok(())
    }

    /// 送信完了を反映する。成功なら選択ごと空に戻す。
    /// 失敗なら選択を残したままFailedにして再送信に備える。
    /// Submitting以外での完了（clearで破棄された後の遅延応答など）は無視する
    pub fn finish_submit(&mut self, outcome: std::result::Result<(), String>) {
        if self.phase != UploadPhase::Submitting {
            return;
        }
        match outcome {
            Ok(()) => {
                self.selected = None;
                self.preview = None;
                self.last_error = None;
                self.phase = UploadPhase::Empty;
            }
            Err(message) => {
                self.last_error = Some(message);
                self.phase = UploadPhase::Failed;
            }
        }
    }
}
