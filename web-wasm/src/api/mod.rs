//! バックエンドAPI連携

mod backend;

pub use backend::{delete_records, fetch_history, open_report, report_url, upload_media};
