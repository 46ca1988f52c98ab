//! Table schema definitions for the game data tables read by the pipeline

use super::types::*;

// =============================================================================
// Characters
// =============================================================================

pub static CHARACTERS: TableSchema = TableSchema {
    name: "characters",
    source_file: "CharacterExcelTable.json",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::new("DevName", ColumnType::Text),
        Column::required("ProductionStep", ColumnType::Text),
        Column::required("IsPlayableCharacter", ColumnType::Boolean),
        Column::new("BulletType", ColumnType::Text),
        Column::new("ArmorType", ColumnType::Text),
        Column::new("School", ColumnType::Text),
        Column::required("LocalizeEtcId", ColumnType::Integer),
    ],
};

pub static CHARACTER_STATS: TableSchema = TableSchema {
    name: "character_stats",
    source_file: "CharacterStatExcelTable.json",
    columns: &[Column::required("CharacterId", ColumnType::Integer)],
};

pub static CHARACTER_ACADEMY_TAGS: TableSchema = TableSchema {
    name: "character_academy_tags",
    source_file: "CharacterAcademyTagsExcelTable.json",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::required("FavorItemUniqueTags", ColumnType::List),
    ],
};

pub static CHARACTER_PROFILES: TableSchema = TableSchema {
    name: "character_profiles",
    source_file: "LocalizeCharProfileExcelTable.json",
    columns: &[
        Column::required("CharacterId", ColumnType::Integer),
        Column::new("BirthDay", ColumnType::Text),
        Column::new("FullName", ColumnType::Localized),
        Column::new("StatusMessage", ColumnType::Localized),
    ],
};

pub static CHARACTER_WEAPONS: TableSchema = TableSchema {
    name: "character_weapons",
    source_file: "CharacterWeaponExcelTable.json",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::required("StatType", ColumnType::List),
    ],
};

pub static FAVOR_LEVEL_REWARDS: TableSchema = TableSchema {
    name: "favor_level_rewards",
    source_file: "FavorLevelRewardExcelTable.json",
    columns: &[
        Column::required("CharacterId", ColumnType::Integer),
        Column::new("FavorLevel", ColumnType::Integer),
        Column::new("StatType", ColumnType::List),
        Column::new("StatValue", ColumnType::List),
    ],
};

// =============================================================================
// Skills
// =============================================================================

pub static CHARACTER_SKILL_LISTS: TableSchema = TableSchema {
    name: "character_skill_lists",
    source_file: "CharacterSkillListExcelTable.json",
    columns: &[
        Column::required("CharacterId", ColumnType::Integer),
        Column::required("MinimumGradeCharacterWeapon", ColumnType::Integer),
        Column::new("IsFormConversion", ColumnType::Boolean),
        Column::new("ExSkillGroupId", ColumnType::List),
        Column::new("PublicSkillGroupId", ColumnType::List),
        Column::new("PassiveSkillGroupId", ColumnType::List),
        Column::new("ExtraPassiveSkillGroupId", ColumnType::List),
    ],
};

pub static SKILLS: TableSchema = TableSchema {
    name: "skills",
    source_file: "SkillExcelTable.json",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::required("GroupId", ColumnType::Text),
        Column::required("Level", ColumnType::Integer),
        Column::new("SkillCost", ColumnType::Integer),
        Column::required("LocalizeSkillId", ColumnType::Integer),
    ],
};

// =============================================================================
// Localization
// =============================================================================

pub static LOCALIZE_ETC: TableSchema = TableSchema {
    name: "localize_etc",
    source_file: "LocalizeEtcExcelTable.json",
    columns: &[
        Column::required("Key", ColumnType::Integer),
        Column::new("Name", ColumnType::Localized),
        Column::new("Description", ColumnType::Localized),
    ],
};

pub static LOCALIZE_SKILLS: TableSchema = TableSchema {
    name: "localize_skills",
    source_file: "LocalizeSkillExcelTable.json",
    columns: &[
        Column::required("Key", ColumnType::Integer),
        Column::new("Name", ColumnType::Localized),
        Column::new("Description", ColumnType::Localized),
    ],
};

// =============================================================================
// Assets
// =============================================================================

pub static CURRENCIES: TableSchema = TableSchema {
    name: "currencies",
    source_file: "CurrencyExcelTable.json",
    columns: &[
        Column::required("ID", ColumnType::Integer),
        Column::new("LocalizeEtcId", ColumnType::Integer),
    ],
};

pub static ITEMS: TableSchema = TableSchema {
    name: "items",
    source_file: "ItemExcelTable.json",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::new("LocalizeEtcId", ColumnType::Integer),
    ],
};

pub static EQUIPMENT: TableSchema = TableSchema {
    name: "equipment",
    source_file: "EquipmentExcelTable.json",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::new("LocalizeEtcId", ColumnType::Integer),
    ],
};

pub static EQUIPMENT_STATS: TableSchema = TableSchema {
    name: "equipment_stats",
    source_file: "EquipmentStatExcelTable.json",
    columns: &[Column::required("EquipmentId", ColumnType::Integer)],
};

pub static FURNITURE: TableSchema = TableSchema {
    name: "furniture",
    source_file: "FurnitureExcelTable.json",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::new("LocalizeEtcId", ColumnType::Integer),
    ],
};

pub static RECIPES: TableSchema = TableSchema {
    name: "recipes",
    source_file: "RecipeExcelTable.json",
    columns: &[
        Column::required("Id", ColumnType::Integer),
        Column::new("RecipeIngredientId", ColumnType::Integer),
    ],
};

pub static RECIPE_INGREDIENTS: TableSchema = TableSchema {
    name: "recipe_ingredients",
    source_file: "RecipeIngredientExcelTable.json",
    columns: &[Column::required("Id", ColumnType::Integer)],
};

// =============================================================================
// Registry
// =============================================================================

pub static ALL_TABLES: &[&TableSchema] = &[
    &CHARACTERS,
    &CHARACTER_STATS,
    &CHARACTER_ACADEMY_TAGS,
    &CHARACTER_PROFILES,
    &CHARACTER_WEAPONS,
    &FAVOR_LEVEL_REWARDS,
    &CHARACTER_SKILL_LISTS,
    &SKILLS,
    &LOCALIZE_ETC,
    &LOCALIZE_SKILLS,
    &CURRENCIES,
    &ITEMS,
    &EQUIPMENT,
    &EQUIPMENT_STATS,
    &FURNITURE,
    &RECIPES,
    &RECIPE_INGREDIENTS,
];

/// Tables that exist in both the primary and global releases
pub static LOCALIZED_TABLES: &[&TableSchema] =
    &[&LOCALIZE_ETC, &LOCALIZE_SKILLS, &CHARACTER_PROFILES];
