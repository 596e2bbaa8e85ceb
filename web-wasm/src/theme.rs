//! テーマ設定の読み書き
//!
//! 起動時に一度だけローカルストレージから読み、トグルのたびに書き戻す。
//! コンポーネントへはシグナルとして明示的に渡し、グローバルには置かない

use gloo::storage::{LocalStorage, Storage};

const THEME_KEY: &str = "ecoscout-theme";

/// 表示テーマ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn class_name(self) -> &'static str {
        match self {
            Theme::Dark => "theme-dark",
            Theme::Light => "theme-light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    fn parse(value: &str) -> Self {
        match value {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    /// 永続化済みの設定を読む。未設定・読込失敗はダーク
    pub fn load() -> Self {
        LocalStorage::get::<String>(THEME_KEY)
            .map(|v| Theme::parse(&v))
            .unwrap_or_default()
    }

    /// 現在の設定を書き戻す
    pub fn store(self) {
        if let Err(e) = LocalStorage::set(THEME_KEY, self.as_str()) {
            gloo::console::warn!(format!("Failed to persist theme: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_dark() {
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("solarized"), Theme::Dark);
        assert_eq!(Theme::parse(""), Theme::Dark);
    }
}
