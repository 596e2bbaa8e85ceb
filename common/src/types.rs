//! 検出レコードの型定義
//!
//! バックエンドAPIと共有されるワイヤ型（JSONはsnake_caseのまま）:
//! - DetectionRecord: 1回の解析結果（永続化・表示の単位）
//! - Detection: レコード内の検出1件

use serde::{Deserialize, Serialize};

/// OCRがナンバープレートを読めなかったときの番兵値
pub const NO_PLATE: &str = "N/A";

/// 環境違反と分類される検出タイプ
const VIOLATION_TYPES: [&str; 2] = ["littering", "smoke"];

/// 検出1件（物体または違反）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// 分類タグ。オープンな文字列集合で、大文字小文字はバックエンド側が決める
    #[serde(default)]
    pub violation_type: String,

    /// 信頼度 [0,100]
    #[serde(default)]
    pub confidence: f64,

    /// 認識テキスト。読めなかったときは "N/A"
    #[serde(default = "default_plate")]
    pub license_plate: String,

    /// OCR信頼度 [0,100]。license_plateが"N/A"のときは意味を持たない
    #[serde(default)]
    pub ocr_confidence: f64,
}

fn default_plate() -> String {
    NO_PLATE.to_string()
}

impl Detection {
    /// 環境違反（littering / smoke）かどうか。大文字小文字は無視する
    pub fn is_violation(&self) -> bool {
        VIOLATION_TYPES
            .iter()
            .any(|v| self.violation_type.eq_ignore_ascii_case(v))
    }

    /// CSSクラス用キー。表示専用で、比較ロジックには使わない
    pub fn style_key(&self) -> String {
        self.violation_type.to_lowercase()
    }

    /// プレートが読めているか。空文字列も有効なプレート値として扱う
    pub fn has_plate(&self) -> bool {
        self.license_plate != NO_PLATE
    }
}

/// 検出レコード（解析済みメディア1件分）
///
/// バックエンドから受信した後は不変。クライアントはフィールドを書き換えず、
/// レコード単位での置き換え・削除のみ行う。detectionsの並びは受信順を保持する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// バックエンドが採番する一意ID
    pub id: String,

    /// 作成時刻（ISO-8601文字列）
    #[serde(default)]
    pub timestamp: String,

    /// 元メディアのファイル名
    #[serde(default)]
    pub original_file: String,

    /// 注釈付き画像URL（画像アップロード時）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotated_image_url: Option<String>,

    /// 注釈付き動画URL（動画アップロード時）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotated_video_url: Option<String>,

    /// 検出列。長さ0は「違反なし」の正常な結果
    #[serde(default)]
    pub detections: Vec<Detection>,
}

impl DetectionRecord {
    /// 違反と分類された検出の数
    pub fn violation_count(&self) -> usize {
        self.detections.iter().filter(|d| d.is_violation()).count()
    }
}
