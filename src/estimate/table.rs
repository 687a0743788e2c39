use crate::error::ChatError;
use config::{Config, File};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const BUILTIN_VERSION: &str = "builtin-1";

/// Flat price (yen) used for lines no entry matches
pub const DEFAULT_PRICE: u32 = 100;
/// Flat calorie value (kcal) used for lines no entry matches
pub const DEFAULT_CALORIES: u32 = 50;

/// Which quantity a table estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Price,
    Calorie,
}

impl TableKind {
    pub fn label(self) -> &'static str {
        match self {
            TableKind::Price => "価格",
            TableKind::Calorie => "カロリー",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TableKind::Price => "price",
            TableKind::Calorie => "calorie",
        })
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" | "価格" => Ok(TableKind::Price),
            "calorie" | "calories" | "カロリー" => Ok(TableKind::Calorie),
            other => Err(format!(
                "unknown table '{other}' (expected price or calorie)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Ingredient-name fragment matched against lines
    pub name: String,
    pub value: u32,
    /// Basis of the value, e.g. "100g" or "大さじ1"
    #[serde(default)]
    pub note: Option<String>,
}

/// Ordered mapping from ingredient-name fragments to constant values.
///
/// Entry order is significant: the first matching entry wins, so specific
/// names must precede the generic fragments they contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTable {
    pub kind: TableKind,
    #[serde(default = "default_version")]
    pub version: String,
    pub unit: String,
    pub default_value: u32,
    pub entries: Vec<TableEntry>,
}

fn default_version() -> String {
    "custom".to_string()
}

fn entries(rows: &[(&str, u32, Option<&str>)]) -> Vec<TableEntry> {
    rows.iter()
        .map(|(name, value, note)| TableEntry {
            name: name.to_string(),
            value: *value,
            note: note.map(str::to_string),
        })
        .collect()
}

impl LookupTable {
    /// Built-in price table, yen per typical supermarket pack.
    pub fn builtin_prices() -> Self {
        LookupTable {
            kind: TableKind::Price,
            version: BUILTIN_VERSION.to_string(),
            unit: "円".to_string(),
            default_value: DEFAULT_PRICE,
            entries: entries(&[
                ("豚肉", 400, None),
                ("牛肉", 600, None),
                ("鶏肉", 300, None),
                ("ひき肉", 350, None),
                ("ベーコン", 250, None),
                ("ハム", 200, None),
                ("ソーセージ", 300, None),
                ("鮭", 300, None),
                ("さば", 250, None),
                ("まぐろ", 500, None),
                ("えび", 400, None),
                ("いか", 300, None),
                ("玉ねぎ", 150, None),
                ("たまねぎ", 150, None),
                ("にんじん", 100, None),
                ("人参", 100, None),
                ("じゃがいも", 120, None),
                ("キャベツ", 200, None),
                ("白菜", 250, None),
                ("大根", 150, None),
                ("トマト", 150, None),
                ("きゅうり", 80, None),
                ("なす", 100, None),
                ("ピーマン", 100, None),
                ("ほうれん草", 180, None),
                ("ブロッコリー", 200, None),
                ("もやし", 40, None),
                ("しいたけ", 200, None),
                ("きのこ", 150, None),
                ("にんにく", 100, None),
                ("生姜", 100, None),
                ("ねぎ", 120, None),
                ("豆腐", 80, None),
                ("卵", 250, Some("10個入り")),
                ("たまご", 250, Some("10個入り")),
                ("牛乳", 200, None),
                ("チーズ", 300, None),
                ("バター", 350, None),
                ("パスタ", 200, None),
                ("うどん", 100, None),
                ("そば", 150, None),
                ("麺", 120, None),
                ("ご飯", 150, None),
                ("酢", 200, None),
                ("米", 400, Some("1kg")),
                ("醤油", 250, None),
                ("しょうゆ", 250, None),
                ("味噌", 300, None),
                ("みそ", 300, None),
                ("みりん", 300, None),
                ("酒", 300, None),
                ("砂糖", 200, None),
                ("塩", 100, None),
                ("小麦粉", 200, None),
                ("片栗粉", 150, None),
                ("カレールウ", 250, None),
                ("ケチャップ", 200, None),
                ("マヨネーズ", 250, None),
                ("油", 300, None),
                ("肉", 350, None),
                ("魚", 300, None),
                ("野菜", 150, None),
            ]),
        }
    }

    /// Built-in calorie table, kcal per 100g (seasonings per tablespoon).
    pub fn builtin_calories() -> Self {
        const G100: Option<&str> = Some("100g");
        const TBSP: Option<&str> = Some("大さじ1");
        LookupTable {
            kind: TableKind::Calorie,
            version: BUILTIN_VERSION.to_string(),
            unit: "kcal".to_string(),
            default_value: DEFAULT_CALORIES,
            entries: entries(&[
                ("豚肉", 263, G100),
                ("牛肉", 300, G100),
                ("鶏肉", 200, G100),
                ("ひき肉", 250, G100),
                ("ベーコン", 405, G100),
                ("ハム", 196, G100),
                ("ソーセージ", 321, G100),
                ("鮭", 133, G100),
                ("さば", 247, G100),
                ("まぐろ", 125, G100),
                ("えび", 82, G100),
                ("いか", 83, G100),
                ("玉ねぎ", 37, G100),
                ("たまねぎ", 37, G100),
                ("にんじん", 39, G100),
                ("人参", 39, G100),
                ("じゃがいも", 76, G100),
                ("キャベツ", 23, G100),
                ("白菜", 14, G100),
                ("大根", 18, G100),
                ("トマト", 19, G100),
                ("きゅうり", 14, G100),
                ("なす", 22, G100),
                ("ピーマン", 22, G100),
                ("ほうれん草", 20, G100),
                ("ブロッコリー", 33, G100),
                ("もやし", 14, G100),
                ("しいたけ", 19, G100),
                ("きのこ", 20, G100),
                ("にんにく", 136, G100),
                ("生姜", 30, G100),
                ("ねぎ", 28, G100),
                ("豆腐", 72, G100),
                ("卵", 151, G100),
                ("たまご", 151, G100),
                ("牛乳", 67, G100),
                ("チーズ", 339, G100),
                ("バター", 745, G100),
                ("パスタ", 378, G100),
                ("うどん", 105, G100),
                ("そば", 130, G100),
                ("麺", 150, G100),
                ("ご飯", 168, G100),
                ("酢", 4, TBSP),
                ("米", 358, G100),
                ("醤油", 13, TBSP),
                ("しょうゆ", 13, TBSP),
                ("味噌", 35, TBSP),
                ("みそ", 35, TBSP),
                ("みりん", 43, TBSP),
                ("酒", 16, TBSP),
                ("砂糖", 35, TBSP),
                ("塩", 0, TBSP),
                ("小麦粉", 368, G100),
                ("片栗粉", 330, G100),
                ("カレールウ", 512, G100),
                ("ケチャップ", 18, TBSP),
                ("マヨネーズ", 84, TBSP),
                ("油", 111, TBSP),
                ("肉", 250, G100),
                ("魚", 150, G100),
                ("野菜", 25, G100),
            ]),
        }
    }

    pub fn builtin(kind: TableKind) -> Self {
        match kind {
            TableKind::Price => Self::builtin_prices(),
            TableKind::Calorie => Self::builtin_calories(),
        }
    }

    /// Load a table from a TOML or JSON file.
    ///
    /// The file's `kind` must equal `expected`.
    pub fn load(path: impl AsRef<Path>, expected: TableKind) -> Result<Self, ChatError> {
        let path = path.as_ref();
        let table: LookupTable = Config::builder()
            .add_source(File::from(path))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| {
                warn!("Failed to read lookup table {}: {}", path.display(), e);
                ChatError::Table(format!("{}: {}", path.display(), e))
            })?;

        if table.kind != expected {
            return Err(ChatError::Table(format!(
                "{}: expected a {} table, found {}",
                path.display(),
                expected,
                table.kind
            )));
        }

        info!(
            "Loaded {} table '{}' with {} entries from {}",
            table.kind,
            table.version,
            table.entries.len(),
            path.display()
        );
        Ok(table)
    }

    /// Load from `path` when given, otherwise use the built-in table.
    pub fn load_or_builtin(path: Option<&str>, kind: TableKind) -> Result<Self, ChatError> {
        match path {
            Some(path) => Self::load(path, kind),
            None => Ok(Self::builtin(kind)),
        }
    }

    /// First entry whose name occurs in `line`, or which contains `line`.
    ///
    /// A blank line matches nothing.
    pub fn lookup(&self, line: &str) -> Option<&TableEntry> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| line.contains(entry.name.as_str()) || entry.name.contains(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lookup_key_in_line() {
        let table = LookupTable::builtin_prices();
        assert_eq!(table.lookup("玉ねぎ 1個").unwrap().name, "玉ねぎ");
        assert_eq!(table.lookup("豚肉 300g").unwrap().value, 400);
    }

    #[test]
    fn test_lookup_line_in_key() {
        let table = LookupTable::builtin_prices();
        // "ねぎ" is contained in the earlier "玉ねぎ" entry
        assert_eq!(table.lookup("ねぎ").unwrap().name, "玉ねぎ");
    }

    #[test]
    fn test_specific_before_generic() {
        let table = LookupTable::builtin_calories();
        assert_eq!(table.lookup("鶏肉 200g").unwrap().name, "鶏肉");
        assert_eq!(table.lookup("ラム肉 200g").unwrap().name, "肉");
    }

    #[test]
    fn test_kana_spellings_and_rice_vinegar() {
        for table in [LookupTable::builtin_prices(), LookupTable::builtin_calories()] {
            assert_eq!(table.lookup("たまご 2個").unwrap().name, "たまご");
            assert_eq!(table.lookup("しょうゆ 大さじ1").unwrap().name, "しょうゆ");
            assert_eq!(table.lookup("みそ 大さじ2").unwrap().name, "みそ");
            assert_eq!(table.lookup("米酢 大さじ1").unwrap().name, "酢");
            assert_eq!(table.lookup("米 2合").unwrap().name, "米");
        }
    }

    #[test]
    fn test_lookup_no_match() {
        let table = LookupTable::builtin_prices();
        assert!(table.lookup("大葉 5枚").is_none());
        assert!(table.lookup("   ").is_none());
    }

    #[test]
    fn test_builtin_tables_have_no_duplicate_names() {
        for table in [LookupTable::builtin_prices(), LookupTable::builtin_calories()] {
            let mut names: Vec<&str> = table.entries.iter().map(|e| e.name.as_str()).collect();
            let before = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), before, "{} table has duplicates", table.kind);
        }
    }

    #[test]
    fn test_table_kind_from_str() {
        assert_eq!("price".parse::<TableKind>(), Ok(TableKind::Price));
        assert_eq!("Calories".parse::<TableKind>(), Ok(TableKind::Calorie));
        assert!("weight".parse::<TableKind>().is_err());
    }

    #[test]
    fn test_load_toml_table() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
kind = "price"
version = "2024-06"
unit = "円"
default_value = 120

[[entries]]
name = "玉ねぎ"
value = 98

[[entries]]
name = "豚肉"
value = 450
note = "300g"
"#
        )
        .unwrap();

        let table = LookupTable::load(file.path(), TableKind::Price).unwrap();
        assert_eq!(table.version, "2024-06");
        assert_eq!(table.default_value, 120);
        assert_eq!(table.entries.len(), 2);
        assert_eq!(table.entries[0].name, "玉ねぎ");
        assert_eq!(table.entries[1].note.as_deref(), Some("300g"));
    }

    #[test]
    fn test_load_json_table_wrong_kind() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"kind": "calorie", "unit": "kcal", "default_value": 50, "entries": []}}"#
        )
        .unwrap();

        let err = LookupTable::load(file.path(), TableKind::Price).unwrap_err();
        assert!(err.to_string().contains("expected a price table"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = LookupTable::load("/nonexistent/price.toml", TableKind::Price);
        assert!(matches!(result, Err(ChatError::Table(_))));
    }
}
