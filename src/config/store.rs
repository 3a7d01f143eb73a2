use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use super::Settings;
use crate::error::ConfigError;

/// 設定ファイルの永続化を担当
pub struct SettingsStore {
    /// settings.json のパス
    path: PathBuf,
    /// load/save を直列化する
    lock: Mutex<()>,
}

impl SettingsStore {
    /// 新しいSettingsStoreを作成
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join("settings.json"),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 設定を読み込み
    ///
    /// ファイルがない・壊れている場合はデフォルトを返す。
    pub fn load(&self) -> Settings {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        match self.read_document() {
            Ok(Some(document)) => {
                tracing::debug!(path = %self.path.display(), "Settings loaded");
                Settings::from_loaded(&document)
            }
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to default settings");
                Settings::default()
            }
        }
    }

    fn read_document(&self) -> Result<Option<Value>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        let document = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(document))
    }

    /// 設定を保存
    ///
    /// 一時ファイルに書いてから rename する。失敗してもメモリ上の設定はそのまま。
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let content = serde_json::to_string_pretty(settings)?;
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).map_err(write_err)?;
        fs::rename(&tmp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            write_err(source)
        })?;

        tracing::info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
