use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::operation::Locale;

/// 組み込みのデフォルト設定
pub fn default_document() -> Value {
    json!({
        "general": {
            "language": "TR",
            "theme": "GX",
            "start_minimized": false,
            "minimize_to_tray": true,
            "check_updates": true,
            "auto_save_reports": true
        },
        "performance": {
            "auto_boost_threshold": 70,
            "monitor_interval": 2000,
            "enable_logging": true,
            "enable_sounds": false
        },
        "optimizations": {
            "aggressive_mode": false,
            "backup_before_ops": true,
            "confirm_dangerous_ops": true,
            "undo_history_size": 20
        }
    })
}

/// デフォルトと読み込んだ設定をマージ
///
/// 両方がマップなら再帰的にマージし、それ以外は読み込んだ値を優先する。
/// `loaded` にしかないキーもそのまま残す。
pub fn merge(defaults: &Value, loaded: &Value) -> Value {
    match (defaults, loaded) {
        (Value::Object(defaults), Value::Object(loaded)) => {
            let mut merged: Map<String, Value> = defaults.clone();
            for (key, value) in loaded {
                let entry = match merged.get(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        merge(existing, value)
                    }
                    _ => value.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Value::Object(merged)
        }
        _ => loaded.clone(),
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: Value,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            values: default_document(),
        }
    }
}

impl Settings {
    /// 永続化されたドキュメントをデフォルトとマージして作成
    pub fn from_loaded(loaded: &Value) -> Self {
        // オブジェクト以外は設定ドキュメントとして扱わない
        if !loaded.is_object() {
            return Self::default();
        }
        Self {
            values: merge(&default_document(), loaded),
        }
    }

    pub fn get(&self, category: &str, key: &str) -> Option<&Value> {
        self.values.get(category).and_then(|c| c.get(key))
    }

    /// 型が合わなければデフォルト値を返す
    pub fn get_bool(&self, category: &str, key: &str) -> bool {
        self.get(category, key)
            .and_then(Value::as_bool)
            .or_else(|| default_value(category, key).and_then(|v| v.as_bool()))
            .unwrap_or(false)
    }

    pub fn get_u64(&self, category: &str, key: &str) -> u64 {
        self.get(category, key)
            .and_then(Value::as_u64)
            .or_else(|| default_value(category, key).and_then(|v| v.as_u64()))
            .unwrap_or(0)
    }

    pub fn get_str(&self, category: &str, key: &str) -> String {
        self.get(category, key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| default_value(category, key).and_then(|v| v.as_str().map(str::to_string)))
            .unwrap_or_default()
    }

    /// 値を設定 (保存は `SettingsStore::save` で明示的に行う)
    pub fn set(&mut self, category: &str, key: &str, value: impl Into<Value>) {
        if !self.values.is_object() {
            self.values = Value::Object(Map::new());
        }
        let Value::Object(root) = &mut self.values else {
            return;
        };
        let group = root
            .entry(category.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !group.is_object() {
            *group = Value::Object(Map::new());
        }
        if let Value::Object(group) = group {
            group.insert(key.to_string(), value.into());
        }
    }

    /// 表示言語
    pub fn locale(&self) -> Locale {
        Locale::from_code(&self.get_str("general", "language")).unwrap_or_default()
    }

    /// メトリクス更新間隔
    pub fn monitor_interval(&self) -> Duration {
        Duration::from_millis(self.get_u64("performance", "monitor_interval").max(250))
    }

    pub fn auto_boost_threshold(&self) -> u8 {
        self.get_u64("performance", "auto_boost_threshold").min(100) as u8
    }
}

fn default_value(category: &str, key: &str) -> Option<Value> {
    default_document().get(category)?.get(key).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_three_categories() {
        let defaults = default_document();
        for category in ["general", "performance", "optimizations"] {
            assert!(defaults.get(category).is_some_and(Value::is_object));
        }
        assert_eq!(defaults.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_merge_backfills_missing_keys() {
        // 古いバージョンで保存されたファイル
        let loaded = json!({
            "general": { "language": "EN" },
            "performance": { "monitor_interval": 5000 }
        });

        let merged = merge(&default_document(), &loaded);

        assert_eq!(merged["general"]["language"], "EN");
        assert_eq!(merged["general"]["theme"], "GX");
        assert_eq!(merged["performance"]["monitor_interval"], 5000);
        assert_eq!(merged["performance"]["auto_boost_threshold"], 70);
        assert_eq!(merged["optimizations"]["undo_history_size"], 20);
    }

    #[test]
    fn test_merge_keeps_every_default_key() {
        let loaded = json!({ "optimizations": { "aggressive_mode": true } });
        let defaults = default_document();
        let merged = merge(&defaults, &loaded);

        for (category, group) in defaults.as_object().unwrap() {
            for key in group.as_object().unwrap().keys() {
                assert!(merged[category].get(key).is_some(), "{category}.{key} missing");
            }
        }
        assert_eq!(merged["optimizations"]["aggressive_mode"], true);
    }

    #[test]
    fn test_merge_preserves_unknown_keys() {
        let loaded = json!({
            "general": { "window_width": 900 },
            "plugins": { "enabled": ["a"] }
        });

        let merged = merge(&default_document(), &loaded);

        assert_eq!(merged["general"]["window_width"], 900);
        assert_eq!(merged["plugins"]["enabled"][0], "a");
    }

    #[test]
    fn test_merge_recurses_into_nested_maps() {
        let defaults = json!({ "a": { "b": { "c": 1, "d": 2 } } });
        let loaded = json!({ "a": { "b": { "d": 5 } } });

        let merged = merge(&defaults, &loaded);

        assert_eq!(merged, json!({ "a": { "b": { "c": 1, "d": 5 } } }));
    }

    #[test]
    fn test_merge_scalar_overrides_map() {
        let defaults = json!({ "a": { "b": 1 } });
        let loaded = json!({ "a": 3 });

        assert_eq!(merge(&defaults, &loaded), json!({ "a": 3 }));
    }

    #[test]
    fn test_from_loaded_ignores_non_object_document() {
        let settings = Settings::from_loaded(&json!([1, 2, 3]));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_typed_getters_fall_back_to_defaults() {
        let settings = Settings::from_loaded(&json!({
            "performance": { "monitor_interval": "fast" }
        }));

        assert_eq!(settings.get_u64("performance", "monitor_interval"), 2000);
        assert!(settings.get_bool("general", "check_updates"));
        assert_eq!(settings.get_str("general", "theme"), "GX");
    }

    #[test]
    fn test_set_creates_category() {
        let mut settings = Settings::default();
        settings.set("general", "language", "EN");
        settings.set("experimental", "turbo", true);

        assert_eq!(settings.locale(), Locale::En);
        assert!(settings.get_bool("experimental", "turbo"));
    }

    #[test]
    fn test_monitor_interval_has_floor() {
        let mut settings = Settings::default();
        assert_eq!(settings.monitor_interval(), Duration::from_millis(2000));

        settings.set("performance", "monitor_interval", 0);
        assert_eq!(settings.monitor_interval(), Duration::from_millis(250));
    }
}
