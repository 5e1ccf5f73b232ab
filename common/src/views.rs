//! 閲覧数カウンタ
//!
//! キーバリューストアの1キーに `{"<id>": <count>}` 形式のJSONを保存する。
//! 読み込み時は必ず正規化し、書き込み時は常にマップ全体を書き戻す。
//! 同じIDに正規化されるキーが複数ある場合は最大値を採用する。

use crate::error::{Error, Result};
use crate::types::{parse_leading_int, ProjectId};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

/// 閲覧数マップの保存キー
pub const VIEWS_STORAGE_KEY: &str = "portfolio_project_views";

/// 永続キーバリューストア
///
/// ブラウザの localStorage やファイルなど、文字列を保存できるもの。
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// メモリ上のストア（テスト・非永続用途）
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値つきで生成
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// 書き込み（と任意で読み込み）が必ず失敗するストア
#[cfg(test)]
pub(crate) struct FailingStore {
    inner: MemoryStore,
    fail_reads: bool,
}

#[cfg(test)]
impl FailingStore {
    /// 読み書きとも失敗
    pub(crate) fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_reads: true,
        }
    }

    /// 読み込みは `inner` から、書き込みだけ失敗
    pub(crate) fn read_only(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_reads: false,
        }
    }
}

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(Error::Storage("read failed".into()));
        }
        self.inner.read(key)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Storage("quota exceeded".into()))
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(Error::Storage("remove failed".into()))
    }
}

/// 正規化済みの閲覧数マップ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewCounts(BTreeMap<ProjectId, u64>);

impl ViewCounts {
    pub fn get(&self, id: ProjectId) -> u64 {
        self.0.get(&id).copied().unwrap_or(0)
    }

    pub fn set(&mut self, id: ProjectId, count: u64) {
        self.0.insert(id, count);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProjectId, u64)> + '_ {
        self.0.iter().map(|(id, count)| (*id, *count))
    }

    /// 全件の合計
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// 保存形式のJSON文字列
    pub fn to_json(&self) -> String {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|(id, count)| (id.key(), Value::from(*count)))
            .collect();
        Value::Object(map).to_string()
    }

    /// 同じIDに正規化されるエントリは最大値を残す
    fn merge_max(&mut self, id: ProjectId, count: u64) {
        let entry = self.0.entry(id).or_insert(0);
        *entry = (*entry).max(count);
    }
}

/// 保存値を非負整数として解釈する
///
/// 数値は小数部を切り捨て、文字列は先頭の整数部分を読む。
/// 負数・非有限値・その他の型はNone。
pub fn coerce_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(text) => parse_leading_int(text).and_then(|v| u64::try_from(v).ok()),
        _ => None,
    }
}

/// 保存文字列を正規化済みマップに変換
///
/// JSONとして読めない、またはオブジェクトでない場合はエラー。
/// 不正なキー・値のエントリは黙って落とす。
pub fn decode_counts(raw: &str) -> Result<ViewCounts> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(entries) = value else {
        return Err(Error::Storage("view counts must be a JSON object".to_string()));
    };

    let mut counts = ViewCounts::default();
    for (key, value) in &entries {
        match (ProjectId::from_key(key), coerce_count(value)) {
            (Some(id), Some(count)) => counts.merge_max(id, count),
            _ => tracing::debug!(key = %key, value = %value, "dropping malformed view entry"),
        }
    }
    Ok(counts)
}

/// プロジェクトごとの閲覧数カウンタ
#[derive(Debug, Clone)]
pub struct ViewCounter<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ViewCounter<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, VIEWS_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// ストアを読んで正規化したマップを返す（書き込みはしない）
    fn load(&self) -> ViewCounts {
        match self.store.read(&self.key) {
            Ok(Some(raw)) => decode_counts(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "corrupt view counts, treating as empty");
                ViewCounts::default()
            }),
            Ok(None) => ViewCounts::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read view counts");
                ViewCounts::default()
            }
        }
    }

    fn persist(&self, counts: &ViewCounts) {
        if let Err(e) = self.store.write(&self.key, &counts.to_json()) {
            tracing::warn!(error = %e, "failed to write view counts");
        }
    }

    /// 閲覧数（未登録・破損時は0）
    pub fn get(&self, id: ProjectId) -> u64 {
        self.load().get(id)
    }

    /// 生のキー文字列で閲覧数を取得（不正なIDは0）
    pub fn get_by_key(&self, key: &str) -> u64 {
        ProjectId::from_key(key).map(|id| self.get(id)).unwrap_or(0)
    }

    /// 閲覧数を1増やし、新しい値を返す
    ///
    /// 正規化済みのマップ全体を書き戻すため、同じIDの別表記キーはここで消える。
    pub fn increment(&self, id: ProjectId) -> u64 {
        let mut counts = self.load();
        let next = counts.get(id).saturating_add(1);
        counts.set(id, next);
        self.persist(&counts);
        tracing::debug!(%id, count = next, "view counted");
        next
    }

    /// ストアの内容を正規形に書き直す
    ///
    /// 破損していれば空マップにリセットする。既に正規形なら書き込まない。
    pub fn normalize(&self) -> ViewCounts {
        let raw = match self.store.read(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read view counts");
                return ViewCounts::default();
            }
        };

        let counts = match raw.as_deref().map(decode_counts) {
            Some(Ok(counts)) => counts,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "corrupt view counts, resetting store");
                ViewCounts::default()
            }
            None => return ViewCounts::default(),
        };

        if raw.as_deref() != Some(counts.to_json().as_str()) {
            self.persist(&counts);
        }
        counts
    }

    /// 一括表示用のスナップショット（正規化してから読む）
    pub fn snapshot(&self) -> ViewCounts {
        self.normalize()
    }
}
