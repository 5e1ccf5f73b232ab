use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "ポートフォリオ・カタログの閲覧・絞り込み・閲覧数管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 閲覧数ストアのファイル（設定より優先）
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// プロジェクト一覧を表示
    List {
        /// カテゴリ (all/data-analysis/visualization/web/cv/dl/ai)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// ステータス (all/backlog/ongoing/doing/done)
        #[arg(short, long, default_value = "all")]
        status: String,

        /// 技術で絞り込み（複数指定でOR）
        #[arg(short, long = "tech")]
        technologies: Vec<String>,

        /// 表示するページ数（「さらに表示」の回数 + 1）
        #[arg(short, long, default_value = "1")]
        pages: usize,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// プロジェクト詳細を表示（閲覧数が1増える）
    Open {
        /// プロジェクトID
        #[arg(required = true, allow_hyphen_values = true)]
        id: i64,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 閲覧数を表示
    Views {
        /// ストアを正規化して書き直す
        #[arg(long)]
        normalize: bool,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 技術タグ一覧を表示
    Techs,

    /// カタログの統計を表示
    Stats,

    /// カタログを検証
    Validate,

    /// 設定を表示/編集
    Config {
        /// 閲覧数ストアのファイルを設定
        #[arg(long)]
        set_store: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 対話的にプロジェクトを選んで開く
    Browse,
}
