//! JSONファイルを使ったキーバリューストア
//!
//! ブラウザの localStorage と同じく、キーごとに文字列を保存する。
//! ファイル全体は `{"<key>": "<value>"}` 形式。

use portfolio_common::{Error, KeyValueStore, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let file = File::open(&self.path).map_err(|e| storage_error(&self.path, e))?;
        let entries = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| storage_error(&self.path, e))?;
        Ok(entries)
    }

    /// 破損したファイルは空として扱う（書き込み前のみ）
    fn load_or_reset(&self) -> BTreeMap<String, String> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "store file is corrupt, starting fresh");
            BTreeMap::new()
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| storage_error(&self.path, e))?;
        }

        // 一時ファイルに書き切ってから置き換える（途中で失敗しても元のファイルは残る）
        let temp = self.temp_path();
        let file = File::create(&temp).map_err(|e| storage_error(&temp, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries).map_err(|e| storage_error(&temp, e))?;
        writer.flush().map_err(|e| storage_error(&temp, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| storage_error(&temp, e))?;
        drop(writer);

        std::fs::rename(&temp, &self.path).map_err(|e| storage_error(&self.path, e))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn storage_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Storage(format!("{}: {}", path.display(), err))
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load_or_reset();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.load_or_reset();
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
