use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog;

/// 表示言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl Locale {
    /// 設定値 ("TR" / "EN") から変換
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "TR" => Some(Self::Tr),
            "EN" => Some(Self::En),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Tr => "TR",
            Self::En => "EN",
        }
    }

    /// もう一方の言語
    pub fn toggle(&self) -> Self {
        match self {
            Self::Tr => Self::En,
            Self::En => Self::Tr,
        }
    }
}

/// オペレーションの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Power,
    Memory,
    Network,
    Graphics,
    Input,
    Cleanup,
    System,
    Security,
    Storage,
    Visual,
}

impl Category {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Power => "Power",
            Self::Memory => "Memory",
            Self::Network => "Network",
            Self::Graphics => "Graphics",
            Self::Input => "Input",
            Self::Cleanup => "Cleanup",
            Self::System => "System",
            Self::Security => "Security",
            Self::Storage => "Storage",
            Self::Visual => "Visual",
        }
    }
}

/// 登録済みオペレーション (登録後は不変)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// 安定した識別子
    pub id: String,
    /// 言語ごとの表示名
    labels: HashMap<Locale, String>,
    /// 実行するコマンド (1つ以上、順序あり)
    commands: Vec<String>,
    pub category: Category,
}

impl Operation {
    pub fn new(
        id: impl Into<String>,
        category: Category,
        labels: [(Locale, &str); 2],
        commands: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            labels: labels
                .into_iter()
                .map(|(locale, label)| (locale, label.to_string()))
                .collect(),
            commands: commands.iter().map(|c| c.to_string()).collect(),
            category,
        }
    }

    /// 表示名を取得 (未定義ならIDを返す)
    pub fn label(&self, locale: Locale) -> &str {
        self.labels
            .get(&locale)
            .map(String::as_str)
            .unwrap_or(self.id.as_str())
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

/// オペレーションの一覧 (構築後は読み取り専用)
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    operations: Vec<Operation>,
    index: HashMap<String, usize>,
}

impl OperationRegistry {
    /// 順序付きリストから作成
    ///
    /// ID が重複した場合は先に登録されたものを残し、コマンドのないものは登録しない。
    pub fn new(operations: Vec<Operation>) -> Self {
        let mut kept = Vec::with_capacity(operations.len());
        let mut index = HashMap::new();

        for operation in operations {
            if operation.commands.is_empty() {
                tracing::warn!(operation = %operation.id, "Skipping operation without commands");
                continue;
            }
            if index.contains_key(&operation.id) {
                tracing::warn!(operation = %operation.id, "Skipping duplicate operation");
                continue;
            }
            index.insert(operation.id.clone(), kept.len());
            kept.push(operation);
        }

        Self {
            operations: kept,
            index,
        }
    }

    /// 組み込みカタログ
    pub fn builtin() -> Self {
        Self::new(catalog::builtin_operations())
    }

    pub fn get(&self, id: &str) -> Option<&Operation> {
        self.index.get(id).map(|&i| &self.operations[i])
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OperationRegistry {
        OperationRegistry::new(vec![
            Operation::new(
                "flush-dns",
                Category::Network,
                [(Locale::Tr, "DNS TEMİZLE"), (Locale::En, "FLUSH DNS")],
                &["ipconfig /flushdns"],
            ),
            Operation::new(
                "clean-temp",
                Category::Cleanup,
                [(Locale::Tr, "GEREKSİZ SİL"), (Locale::En, "CLEAN JUNK")],
                &["del a", "del b"],
            ),
        ])
    }

    #[test]
    fn test_lookup_by_id_and_index() {
        let registry = sample();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("clean-temp").unwrap().commands().len(), 2);
        assert_eq!(registry.get_by_index(0).unwrap().id, "flush-dns");
        assert!(registry.get("unknown").is_none());
        assert!(registry.get_by_index(2).is_none());
    }

    #[test]
    fn test_localized_label() {
        let registry = sample();
        let op = registry.get("flush-dns").unwrap();

        assert_eq!(op.label(Locale::Tr), "DNS TEMİZLE");
        assert_eq!(op.label(Locale::En), "FLUSH DNS");
    }

    #[test]
    fn test_duplicates_and_empty_operations_are_skipped() {
        let registry = OperationRegistry::new(vec![
            Operation::new("a", Category::System, [(Locale::Tr, "A"), (Locale::En, "A")], &["x"]),
            Operation::new("a", Category::System, [(Locale::Tr, "B"), (Locale::En, "B")], &["y"]),
            Operation::new("empty", Category::System, [(Locale::Tr, "E"), (Locale::En, "E")], &[]),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().label(Locale::En), "A");
    }

    #[test]
    fn test_builtin_catalog() {
        let registry = OperationRegistry::builtin();

        assert_eq!(registry.len(), 20);
        for op in registry.iter() {
            assert!(!op.commands().is_empty(), "{} has no commands", op.id);
            assert_ne!(op.label(Locale::Tr), op.id);
            assert_ne!(op.label(Locale::En), op.id);
        }
        assert_eq!(registry.get_by_index(0).unwrap().id, "ultimate-power");
    }

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::from_code("en"), Some(Locale::En));
        assert_eq!(Locale::from_code("TR"), Some(Locale::Tr));
        assert_eq!(Locale::from_code("DE"), None);
        assert_eq!(Locale::Tr.toggle().code(), "EN");
    }
}
