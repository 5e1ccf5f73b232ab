//! サブコマンドの一連の流れのテスト
//!
//! ファイルストアを使って list → open → views の結果を検証

use portfolio_rust::commands::{self, ListOptions};
use portfolio_rust::config::Config;
use tempfile::tempdir;

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        store_path: Some(dir.join("views.json")),
        ..Default::default()
    }
}

fn options(category: &str, status: &str, technologies: &[&str], pages: usize) -> ListOptions {
    ListOptions {
        category: category.to_string(),
        status: status.to_string(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        pages,
    }
}

fn run_list(config: &Config, options: &ListOptions, json: bool) -> String {
    let mut portfolio = commands::open_portfolio(config).expect("ポートフォリオ生成失敗");
    let mut out = Vec::new();
    commands::list(&mut portfolio, options, json, &mut out).expect("list失敗");
    String::from_utf8(out).unwrap()
}

/// 最初のページは12件、続きの案内が出る
#[test]
fn test_list_first_page() {
    let dir = tempdir().expect("Failed to create temp dir");
    let text = run_list(&config_in(dir.path()), &options("all", "all", &[], 1), false);

    assert_eq!(text.matches("No. ").count(), 12);
    assert!(text.contains("Показано: 12 из 18 (всего: 18)"));
    assert!(text.contains("Показать еще (6 из 18)"));
}

/// 2ページ分で全件
#[test]
fn test_list_two_pages_shows_all() {
    let dir = tempdir().expect("Failed to create temp dir");
    let text = run_list(&config_in(dir.path()), &options("all", "all", &[], 2), false);

    assert_eq!(text.matches("No. ").count(), 18);
    assert!(text.contains("Всего проектов: 18"));
    assert!(!text.contains("Показать еще"));
}

/// カテゴリ cv の JSON 出力
#[test]
fn test_list_cv_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let text = run_list(&config_in(dir.path()), &options("cv", "all", &[], 1), true);

    let value: serde_json::Value = serde_json::from_str(&text).expect("JSON解析失敗");
    let ids: Vec<u64> = value["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![15, 12, 11, 10]);
    assert_eq!(value["summary"]["hasMore"], false);
}

/// 該当なし
#[test]
fn test_list_no_results() {
    let dir = tempdir().expect("Failed to create temp dir");
    let text = run_list(&config_in(dir.path()), &options("web", "backlog", &[], 1), false);
    assert!(text.contains("Проекты не найдены"));
}

/// 技術フィルタ（OR）
#[test]
fn test_list_technology_union() {
    let dir = tempdir().expect("Failed to create temp dir");
    let text = run_list(&config_in(dir.path()), &options("all", "all", &["Docker", "Tkinter"], 1), true);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let ids: Vec<u64> = value["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![10, 18]);
}

/// open で閲覧数が増え、list と views に反映される
#[test]
fn test_open_then_views() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = config_in(dir.path());

    let portfolio = commands::open_portfolio(&config).unwrap();
    let mut out = Vec::new();
    commands::open(&portfolio, 9, false, &mut out).expect("open失敗");
    commands::open(&portfolio, 9, false, &mut Vec::new()).unwrap();
    let detail = String::from_utf8(out).unwrap();
    assert!(detail.contains("No. 9"));
    assert!(detail.contains("Веб-разработка"));
    assert!(!detail.contains("リポジトリ"));

    // 別プロセス相当の新しいインスタンス
    let portfolio = commands::open_portfolio(&config).unwrap();
    let mut out = Vec::new();
    commands::views(&portfolio, false, true, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
    assert_eq!(value, serde_json::json!({"9": 2}));

    let text = run_list(&config, &options("web", "all", &[], 1), true);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["cards"][0]["views"], 2);
}

/// views --normalize で重複キーがまとまる
#[test]
fn test_views_normalize() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = config_in(dir.path());
    std::fs::write(
        dir.path().join("views.json"),
        r#"{"portfolio_project_views": "{\"3\": 1, \"003\": 4, \"x\": 2}"}"#,
    )
    .unwrap();

    let portfolio = commands::open_portfolio(&config).unwrap();
    let mut out = Vec::new();
    commands::views(&portfolio, true, true, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
    assert_eq!(value, serde_json::json!({"3": 4}));
}

/// stats / techs / validate
#[test]
fn test_catalog_reports() {
    let dir = tempdir().expect("Failed to create temp dir");
    let portfolio = commands::open_portfolio(&config_in(dir.path())).unwrap();

    let mut out = Vec::new();
    commands::stats(&portfolio, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("プロジェクト数: 18"));
    assert!(text.contains("Компьютерное зрение"));

    let mut out = Vec::new();
    commands::techs(&portfolio, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("python"));
    // OpenCv / OpenCV は1件にまとまる
    assert_eq!(text.lines().filter(|l| l.ends_with(" opencv")).count(), 1);

    let mut out = Vec::new();
    commands::validate(&portfolio, &mut out).expect("組み込みカタログは妥当");
}

/// 設定の保存と読み込み
#[test]
fn test_config_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("portfolio").join("config.json");

    let mut config = config_in(dir.path());
    config.site.projects_per_page = 5;
    config.save_to(&path).expect("設定保存失敗");

    let loaded = Config::load_from(&path).expect("設定読み込み失敗");
    assert_eq!(loaded.site.projects_per_page, 5);
    assert_eq!(loaded.store_path().unwrap(), dir.path().join("views.json"));

    let text = run_list(&loaded, &options("all", "all", &[], 1), false);
    assert_eq!(text.matches("No. ").count(), 5);
}
