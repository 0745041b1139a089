//! セーブデータの永続化ゲートウェイ。
//!
//! キーは `mincremental:<gameId>`。保存・読み込みの失敗はすべて
//! `tracing::warn!` でログに出して握りつぶす。インメモリ状態には影響しない。
//!
//! バックエンドは [`StorageBackend`] で差し替え可能:
//! - [`MemoryStorage`]: ネイティブ実行・テスト用
//! - `LocalStorage`: ブラウザの localStorage（wasm32 のみ）

use std::collections::HashMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::engine::{ProgressionState, Snapshot};

/// 全ゲーム共通のキー接頭辞。
pub const STORAGE_PREFIX: &str = "mincremental";

/// ゲーム ID からストレージキーを作る。
pub fn storage_key(game_id: &str) -> String {
    format!("{STORAGE_PREFIX}:{game_id}")
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// キーと文字列値を保持するストレージ。
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// プロセス内だけで完結するストレージ。
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みの生 JSON を覗く。
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// ブラウザの localStorage。WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// window.localStorage を開く。プライベートモード等で使えない場合は `Unavailable`。
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Backend(format!("{e:?}")))?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageBackend for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }
}

/// ゲームごとのセーブ/ロード。エラーは呼び出し側に伝播しない。
pub struct SaveSystem<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> SaveSystem<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    /// 保存済みスナップショットを読み込む。
    /// 未保存・読み込み失敗・パース失敗はすべて None（新規ゲームになる）。
    pub fn load(&mut self, game_id: &str) -> Option<Snapshot> {
        let key = storage_key(game_id);
        let json = match self.backend.get_item(&key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                warn!(%key, error = %e, "failed to read saved state");
                return None;
            }
        };

        match Snapshot::from_json(&json) {
            Ok(snapshot) => {
                info!(%key, producers = snapshot.producers.len(), "saved state loaded");
                Some(snapshot)
            }
            Err(e) => {
                warn!(%key, error = %e, "saved state is corrupt, discarding");
                // 壊れたデータを削除
                if let Err(e) = self.backend.remove_item(&key) {
                    warn!(%key, error = %e, "failed to discard corrupt save");
                }
                None
            }
        }
    }

    /// 保存して結果をそのまま返す。
    pub fn try_save(&mut self, game_id: &str, state: &ProgressionState) -> Result<(), StorageError> {
        let json = Snapshot::capture(state).to_json()?;
        self.backend.set_item(&storage_key(game_id), &json)
    }

    /// ゲーム状態を保存する。失敗時はログに出して false を返す。
    pub fn save(&mut self, game_id: &str, state: &ProgressionState) -> bool {
        match self.try_save(game_id, state) {
            Ok(()) => true,
            Err(e) => {
                warn!(game = game_id, error = %e, "failed to save state");
                false
            }
        }
    }

    /// セーブデータを削除する。
    pub fn reset(&mut self, game_id: &str) -> bool {
        match self.backend.remove_item(&storage_key(game_id)) {
            Ok(()) => true,
            Err(e) => {
                warn!(game = game_id, error = %e, "failed to remove saved state");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::logic;
    use crate::games;

    /// 書き込みだけ失敗するバックエンド。
    #[derive(Default)]
    struct ReadOnlyStorage {
        inner: MemoryStorage,
    }

    impl StorageBackend for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("QuotaExceededError".into()))
        }

        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn key_is_prefixed_with_game_id() {
        assert_eq!(storage_key("glimmerglass"), "mincremental:glimmerglass");
    }

    #[test]
    fn save_then_load() {
        let def = games::glimmerglass();
        let mut state = logic::initialize(def);
        logic::grant_manual(&mut state);
        logic::purchase_producer(&mut state, "spark_gatherer");

        let mut saves = SaveSystem::new(MemoryStorage::new());
        assert!(saves.save(&def.id, &state));
        assert!(saves.backend().raw("mincremental:glimmerglass").is_some());

        let snapshot = saves.load(&def.id).unwrap();
        assert_eq!(logic::rehydrate(def, &snapshot), state);
    }

    #[test]
    fn games_do_not_share_entries() {
        let mut saves = SaveSystem::new(MemoryStorage::new());
        let state = logic::initialize(games::glimmerglass());
        saves.save("glimmerglass", &state);
        assert!(saves.load("thingamabob").is_none());
        assert_eq!(saves.backend().len(), 1);
    }

    #[test]
    fn missing_entry_loads_nothing() {
        let mut saves = SaveSystem::new(MemoryStorage::new());
        assert!(saves.load("glimmerglass").is_none());
    }

    #[test]
    fn corrupt_entry_is_discarded() {
        let mut storage = MemoryStorage::new();
        storage.set_item("mincremental:glimmerglass", "{not json").unwrap();
        let mut saves = SaveSystem::new(storage);
        assert!(saves.load("glimmerglass").is_none());
        assert!(saves.backend().is_empty());
    }

    #[test]
    fn wrong_shape_is_discarded() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item("mincremental:glimmerglass", r#"{"producers": 5}"#)
            .unwrap();
        let mut saves = SaveSystem::new(storage);
        assert!(saves.load("glimmerglass").is_none());
        assert!(saves.backend().raw("mincremental:glimmerglass").is_none());
    }

    #[test]
    fn failed_save_is_reported_not_raised() {
        let state = logic::initialize(games::glimmerglass());
        let mut saves = SaveSystem::new(ReadOnlyStorage::default());
        assert!(!saves.save("glimmerglass", &state));
        let err = saves.try_save("glimmerglass", &state).unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
        assert!(!saves.reset("glimmerglass"));
    }

    #[test]
    fn reset_removes_entry() {
        let mut saves = SaveSystem::new(MemoryStorage::new());
        let state = logic::initialize(games::thingamabob());
        saves.save("thingamabob", &state);
        assert!(saves.reset("thingamabob"));
        assert!(saves.load("thingamabob").is_none());
    }

    #[test]
    fn error_messages() {
        assert_eq!(StorageError::Unavailable.to_string(), "storage is unavailable");
        assert_eq!(
            StorageError::Backend("denied".into()).to_string(),
            "storage backend error: denied"
        );
    }
}
