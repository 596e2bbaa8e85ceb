//! 検出履歴のキャッシュと複数選択
//!
//! バックエンドの/historyから取得したレコード列をそのままの並びで保持し、
//! 一括削除・一括レポート取得のための選択集合を管理する。
//! 選択集合は常にロード済みIDの部分集合。キャッシュ側の変更と同じ操作内で
//! 選択側も更新し、この不変条件を崩さない。

use std::collections::HashSet;

use crate::types::DetectionRecord;

/// 履歴キャッシュと選択状態
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    // バックエンドの返却順のまま。クライアントでは並べ替えない
    records: Vec<DetectionRecord>,
    selected: HashSet<String>,
    // リクエスト発行ごとに増える連番。古い応答の判定に使う
    issued_seq: u64,
    applied_seq: u64,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[DetectionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn all_selected(&self) -> bool {
        !self.records.is_empty() && self.selected.len() == self.records.len()
    }

    /// ロード要求を発行し、リクエストトークンを返す。
    /// 応答は `apply_load` に同じトークンを添えて渡す
    pub fn begin_load(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    /// ロード結果を適用する。既に新しい応答を適用済みなら黙って捨てる。
    /// 適用時はキャッシュを置き換え、同じ操作内で選択集合を
    /// 生き残ったIDだけに刈り込む。適用したらtrue
    pub fn apply_load(&mut self, token: u64, records: Vec<DetectionRecord>) -> bool {
        if token <= self.applied_seq {
            return false;
        }
        self.applied_seq = token;
        self.records = records;

        let live: HashSet<&str> = self.records.iter().map(|r| r.id.as_str()).collect();
        self.selected.retain(|id| live.contains(id.as_str()));
        true
    }

    /// 選択をトグルする。ロードされていないIDは無視
    pub fn toggle_select(&mut self, id: &str) {
        if !self.records.iter().any(|r| r.id == id) {
            return;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// 全選択⇔全解除の2状態トグル
    pub fn toggle_select_all(&mut self) {
        if self.all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.records.iter().map(|r| r.id.clone()).collect();
        }
    }

    /// 一括削除の成功を反映する。選択中レコードの除去と選択の全解除を
    /// 1回の更新として行う。削除失敗時はこれを呼ばず、何も変えない。
    /// 返り値は除去したレコード数
    pub fn remove_selected(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !self.selected.contains(&r.id));
        self.selected.clear();
        before - self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> DetectionRecord {
        DetectionRecord {
            id: id.to_string(),
            timestamp: String::new(),
            original_file: format!("{id}.jpg"),
            annotated_image_url: None,
            annotated_video_url: None,
            detections: vec![],
        }
    }

    fn loaded(ids: &[&str]) -> HistoryState {
        let mut state = HistoryState::new();
        let token = state.begin_load();
        state.apply_load(token, ids.iter().map(|id| record(id)).collect());
        state
    }

    fn cached_ids(state: &HistoryState) -> Vec<&str> {
        state.records().iter().map(|r| r.id.as_str()).collect()
    }

    /// キャッシュはバックエンドの返却順を保持する
    #[test]
    fn test_load_preserves_order() {
        let state = loaded(&["5", "3", "9", "1"]);
        assert_eq!(cached_ids(&state), vec!["5", "3", "9", "1"]);
    }

    #[test]
    fn test_toggle_select() {
        let mut state = loaded(&["1", "2", "3"]);
        state.toggle_select("2");
        assert!(state.is_selected("2"));
        assert_eq!(state.selected_count(), 1);

        state.toggle_select("2");
        assert!(!state.is_selected("2"));
        assert_eq!(state.selected_count(), 0);
    }

    /// 未ロードIDの選択は無視される（部分集合不変条件）
    #[test]
    fn test_toggle_select_unknown_id_ignored() {
        let mut state = loaded(&["1", "2"]);
        state.toggle_select("99");
        assert_eq!(state.selected_count(), 0);
    }

    /// 2回連続のtoggle_select_allで元の状態（全⇔空）に戻る
    #[test]
    fn test_toggle_select_all_two_state() {
        let mut state = loaded(&["1", "2", "3"]);

        state.toggle_select_all();
        assert!(state.all_selected());
        assert_eq!(state.selected_count(), 3);

        state.toggle_select_all();
        assert_eq!(state.selected_count(), 0);

        // 一部選択からは全選択へ
        state.toggle_select("1");
        state.toggle_select_all();
        assert!(state.all_selected());
    }

    /// {1..5}から{2,5}を削除（成功）→ キャッシュ{1,3,4}・選択空
    #[test]
    fn test_remove_selected_success() {
        let mut state = loaded(&["1", "2", "3", "4", "5"]);
        state.toggle_select("2");
        state.toggle_select("5");

        let removed = state.remove_selected();
        assert_eq!(removed, 2);
        assert_eq!(cached_ids(&state), vec!["1", "3", "4"]);
        assert_eq!(state.selected_count(), 0);
    }

    /// 削除失敗時はremove_selectedを呼ばない想定。キャッシュも選択もそのまま
    #[test]
    fn test_delete_failure_leaves_state_unchanged() {
        let mut state = loaded(&["1", "2", "3", "4", "5"]);
        state.toggle_select("2");
        state.toggle_select("5");

        // バックエンド失敗: 状態には触れない
        assert_eq!(cached_ids(&state), vec!["1", "2", "3", "4", "5"]);
        assert!(state.is_selected("2"));
        assert!(state.is_selected("5"));
        assert_eq!(state.selected_count(), 2);
    }

    /// 古いトークンの応答は黙って捨てる（後発リクエストが先に完了した場合）
    #[test]
    fn test_stale_load_discarded() {
        let mut state = HistoryState::new();
        let first = state.begin_load();
        let second = state.begin_load();

        // 後発の応答が先に届く
        assert!(state.apply_load(second, vec![record("new")]));
        // 先発の応答は遅れて届くが捨てられる
        assert!(!state.apply_load(first, vec![record("old")]));

        assert_eq!(cached_ids(&state), vec!["new"]);
    }

    /// 再ロードで消えたIDは同じ操作内で選択からも外れる
    #[test]
    fn test_reload_prunes_selection() {
        let mut state = loaded(&["1", "2", "3"]);
        state.toggle_select("1");
        state.toggle_select("3");

        let token = state.begin_load();
        state.apply_load(token, vec![record("1"), record("2")]);

        assert!(state.is_selected("1"));
        assert!(!state.is_selected("3"));
        assert_eq!(state.selected_count(), 1);
    }

    /// 空の履歴ではtoggle_select_allは何も選択しない
    #[test]
    fn test_toggle_select_all_empty_history() {
        let mut state = loaded(&[]);
        state.toggle_select_all();
        assert_eq!(state.selected_count(), 0);
        assert!(!state.all_selected());
    }
}
