//! 検出結果の表示用マッピング（純関数）
//!
//! DetectionRecordを描画用のビューモデルに変換する。保存データには
//! 一切手を触れず、表示判断（メディアの選択、違反フラグ、プレート表示）
//! だけをここで導出する。

use crate::types::{Detection, DetectionRecord};

/// 表示するメディア。動画と画像が両方あれば動画を優先する
#[derive(Debug, Clone, PartialEq)]
pub enum MediaView {
    Video(String),
    Image(String),
    /// メディア欠落。エラーではなく空スロットとして描画する
    Empty,
}

/// ナンバープレートの表示詳細。プレートが"N/A"のレコードでは作らない
#[derive(Debug, Clone, PartialEq)]
pub struct PlateView {
    pub number: String,
    pub ocr_confidence: f64,
}

/// 検出1件の表示モデル
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionView {
    /// 分類タグ（バックエンドの表記のまま）
    pub label: String,
    /// CSSクラス用の小文字キー
    pub style_key: String,
    pub confidence: f64,
    /// 違反アラートの表示制御。保存データには影響しない
    pub is_violation: bool,
    pub plate: Option<PlateView>,
}

/// 検出レコード全体の表示モデル
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub record_id: String,
    pub source_file: String,
    pub timestamp: String,
    pub media: MediaView,
    /// 受信順のまま
    pub detections: Vec<DetectionView>,
}

impl ResultView {
    /// 検出ゼロの「違反なし」結果か
    pub fn is_clean(&self) -> bool {
        self.detections.is_empty()
    }
}

/// レコードをビューモデルへ変換する
pub fn present(record: &DetectionRecord) -> ResultView {
    let media = match (&record.annotated_video_url, &record.annotated_image_url) {
        (Some(video), _) => MediaView::Video(video.clone()),
        (None, Some(image)) => MediaView::Image(image.clone()),
        (None, None) => MediaView::Empty,
    };

    ResultView {
        record_id: record.id.clone(),
        source_file: record.original_file.clone(),
        timestamp: record.timestamp.clone(),
        media,
        detections: record.detections.iter().map(present_detection).collect(),
    }
}

fn present_detection(det: &Detection) -> DetectionView {
    DetectionView {
        label: det.violation_type.clone(),
        style_key: det.style_key(),
        confidence: det.confidence,
        is_violation: det.is_violation(),
        plate: det.has_plate().then(|| PlateView {
            number: det.license_plate.clone(),
            ocr_confidence: det.ocr_confidence,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NO_PLATE;

    fn base_record() -> DetectionRecord {
        DetectionRecord {
            id: "r1".to_string(),
            timestamp: "2025-11-02T14:05:31".to_string(),
            original_file: "scene.jpg".to_string(),
            annotated_image_url: Some("http://localhost:8000/results/annotated_scene.jpg".to_string()),
            annotated_video_url: None,
            detections: vec![],
        }
    }

    fn detection(violation_type: &str, plate: &str) -> Detection {
        Detection {
            violation_type: violation_type.to_string(),
            confidence: 80.0,
            license_plate: plate.to_string(),
            ocr_confidence: 90.0,
        }
    }

    #[test]
    fn test_image_media() {
        let view = present(&base_record());
        assert_eq!(
            view.media,
            MediaView::Image("http://localhost:8000/results/annotated_scene.jpg".to_string())
        );
    }

    /// 動画URLと画像URLが両方あっても動画だけを描画する
    #[test]
    fn test_video_takes_precedence() {
        let mut record = base_record();
        record.annotated_video_url =
            Some("http://localhost:8000/results/annotated_clip.mp4".to_string());

        let view = present(&record);
        assert_eq!(
            view.media,
            MediaView::Video("http://localhost:8000/results/annotated_clip.mp4".to_string())
        );
    }

    /// メディア欠落は空スロット。ビュー全体は失敗しない
    #[test]
    fn test_missing_media_degrades() {
        let mut record = base_record();
        record.annotated_image_url = None;

        let view = present(&record);
        assert_eq!(view.media, MediaView::Empty);
        assert_eq!(view.source_file, "scene.jpg");
    }

    #[test]
    fn test_violation_flag() {
        let mut record = base_record();
        record.detections = vec![
            detection("Littering", NO_PLATE),
            detection("LITTERING", NO_PLATE),
            detection("vehicle", "LEB-1234"),
        ];

        let view = present(&record);
        assert!(view.detections[0].is_violation);
        assert!(view.detections[1].is_violation);
        assert!(!view.detections[2].is_violation);
    }

    /// "N/A"はプレート詳細を抑制、空文字列を含む他の値は表示する
    #[test]
    fn test_plate_detail() {
        let mut record = base_record();
        record.detections = vec![
            detection("vehicle", NO_PLATE),
            detection("vehicle", ""),
            detection("smoke", "ABC-999"),
        ];

        let view = present(&record);
        assert!(view.detections[0].plate.is_none());

        let empty_plate = view.detections[1].plate.as_ref().expect("空文字列は有効なプレート");
        assert_eq!(empty_plate.number, "");

        let plate = view.detections[2].plate.as_ref().expect("プレートあり");
        assert_eq!(plate.number, "ABC-999");
        assert_eq!(plate.ocr_confidence, 90.0);
    }

    /// 検出の並びは受信順のまま表示へ渡る
    #[test]
    fn test_detection_order_preserved() {
        let mut record = base_record();
        record.detections = vec![
            detection("smoke", NO_PLATE),
            detection("vehicle", NO_PLATE),
            detection("littering", NO_PLATE),
        ];

        let view = present(&record);
        let labels: Vec<&str> = view.detections.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["smoke", "vehicle", "littering"]);
    }

    /// 検出ゼロは正常な「違反なし」結果
    #[test]
    fn test_clean_record() {
        let view = present(&base_record());
        assert!(view.is_clean());
    }

    /// 表示ラベルは表記そのまま、style_keyだけ小文字化
    #[test]
    fn test_label_case_kept_verbatim() {
        let mut record = base_record();
        record.detections = vec![detection("Smoke", NO_PLATE)];

        let view = present(&record);
        assert_eq!(view.detections[0].label, "Smoke");
        assert_eq!(view.detections[0].style_key, "smoke");
    }
}
