//! 表示ラベル変換
//!
//! カテゴリ・難易度・ステータスの表示名。未登録の値はそのまま返す。

use crate::types::{Category, Status};

/// 値がない項目の表示
pub const NOT_AVAILABLE: &str = "н/д";

/// カテゴリの表示名
pub fn category_label(category: &Category) -> &str {
    match category {
        Category::DataAnalysis => "Анализ данных",
        Category::Visualization => "Визуализация",
        Category::Web => "Веб-разработка",
        Category::ComputerVision => "Компьютерное зрение",
        Category::DeepLearning => "Глубокое обучение",
        Category::Ai => "Искусственный интеллект",
        Category::Other(tag) => tag,
    }
}

/// 難易度の表示名
///
/// 英語・ロシア語どちらの表記も受け付ける（大文字小文字は無視）。
/// 未登録の値は元の表記、空なら `NOT_AVAILABLE`。
pub fn difficulty_label(difficulty: Option<&str>) -> String {
    let raw = match difficulty.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let mapped = match raw.to_lowercase().as_str() {
        "beginner" | "начальный" => Some("Начальный"),
        "intermediate" | "средний" => Some("Средний"),
        "advanced" | "высокий" => Some("Высокий"),
        "высокая" => Some("Высокая"),
        "средняя" => Some("Средняя"),
        "низкая" => Some("Низкая"),
        _ => None,
    };

    mapped.map(str::to_string).unwrap_or_else(|| raw.to_string())
}

/// ステータスの表示名
pub fn status_label(status: Status) -> &'static str {
    match status {
        Status::Backlog => "Backlog",
        Status::Ongoing => "Ongoing",
        Status::Doing => "Doing",
        Status::Done => "Done",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_known() {
        assert_eq!(category_label(&Category::ComputerVision), "Компьютерное зрение");
        assert_eq!(category_label(&Category::Ai), "Искусственный интеллект");
    }

    #[test]
    fn test_category_label_passthrough() {
        let other = Category::Other("robotics".to_string());
        assert_eq!(category_label(&other), "robotics");
    }

    #[test]
    fn test_difficulty_label() {
        assert_eq!(difficulty_label(Some("advanced")), "Высокий");
        assert_eq!(difficulty_label(Some("Beginner")), "Начальный");
        assert_eq!(difficulty_label(Some("высокая")), "Высокая");
        assert_eq!(difficulty_label(Some("expert")), "expert");
        assert_eq!(difficulty_label(Some("   ")), NOT_AVAILABLE);
        assert_eq!(difficulty_label(None), NOT_AVAILABLE);
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(Status::Backlog), "Backlog");
        assert_eq!(status_label(Status::Doing), "Doing");
        assert_eq!(status_label(Status::default()), "Done");
    }
}
