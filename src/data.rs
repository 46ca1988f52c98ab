//! Memoized derived tables and the generic asset query.
//!
//! `GameData` loads each raw document at most once per region and computes
//! each derived table at most once. A derivation that fails is not cached
//! and is retried on the next access.

use once_cell::sync::OnceCell;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

use crate::bond::{bond_curves, BondCurve};
use crate::error::DataResult;
use crate::extract::{
    extract_skill_effects, extract_weapon_passive, DescriptionGrammar, DescriptionParser,
    LevelText, SkillEffectRecord, WeaponPassive,
};
use crate::filter::Filter;
use crate::join::{combine_localization, join, JoinSpec};
use crate::localization::Localization;
use crate::remap::{display_name, remap_column, rename_columns};
use crate::schema::columns::{
    CURRENCY_COLUMNS, EQUIPMENT_COLUMNS, FURNITURE_COLUMNS, ITEM_COLUMNS, NAME_DESCRIPTION,
    RECIPE_COLUMNS, SKILL_COLUMNS,
};
use crate::schema::lookups::{
    lookup, ARMOR_TYPES, CHARACTER_STAT_COLUMNS, DAMAGE_TYPES, NAME_FIXES, SKILL_CATEGORIES,
    TERRAIN_BONUSES,
};
use crate::schema::tables::*;
use crate::schema::TableSchema;
use crate::source::{self, Region, Sources};
use crate::table::{group_records, key_string, Record, Table};

/// Skill list placeholder for an unused slot
const EMPTY_SKILL: &str = "EmptySkill";
/// Group ids of signature weapon passives contain this
const WEAPON_PASSIVE: &str = "WeaponPassive";
/// Descriptions are parsed from the primary client's text
const DESCRIPTION_COLUMN: &str = "DescriptionJp";

/// Effects per skill group, in first-seen group order
pub type SkillDetails = Vec<(String, Vec<SkillEffectRecord>)>;

pub struct GameData {
    sources: Sources,
    parser: Box<dyn DescriptionParser>,
    raw: Mutex<HashMap<(Region, &'static str), Arc<Table>>>,

    localize_etc: OnceCell<Table>,
    localize_skills: OnceCell<Table>,
    character_stats: OnceCell<Table>,
    character_details: OnceCell<Table>,
    character_profiles: OnceCell<Table>,
    character_weapon: OnceCell<Table>,
    character_bond_stats: OnceCell<HashMap<i64, BondCurve>>,
    character_skills: OnceCell<Table>,
    weapon_passive_bonuses: OnceCell<HashMap<i64, WeaponPassive>>,
    character_skill_details: OnceCell<HashMap<i64, SkillDetails>>,
    skills: OnceCell<Table>,
    currencies: OnceCell<Table>,
    items: OnceCell<Table>,
    equipment: OnceCell<Table>,
    furnitures: OnceCell<Table>,
    recipes: OnceCell<Table>,
}

impl GameData {
    /// Read descriptions with the game client's grammar
    pub fn new(sources: Sources) -> Self {
        Self::with_parser(sources, DescriptionGrammar::client())
    }

    pub fn with_parser(sources: Sources, parser: impl DescriptionParser + 'static) -> Self {
        Self {
            sources,
            parser: Box::new(parser),
            raw: Mutex::new(HashMap::new()),
            localize_etc: OnceCell::new(),
            localize_skills: OnceCell::new(),
            character_stats: OnceCell::new(),
            character_details: OnceCell::new(),
            character_profiles: OnceCell::new(),
            character_weapon: OnceCell::new(),
            character_bond_stats: OnceCell::new(),
            character_skills: OnceCell::new(),
            weapon_passive_bonuses: OnceCell::new(),
            character_skill_details: OnceCell::new(),
            skills: OnceCell::new(),
            currencies: OnceCell::new(),
            items: OnceCell::new(),
            equipment: OnceCell::new(),
            furnitures: OnceCell::new(),
            recipes: OnceCell::new(),
        }
    }

    /// Load a raw table, reusing an earlier load of the same document
    pub fn load(&self, region: Region, schema: &'static TableSchema) -> DataResult<Arc<Table>> {
        let key = (region, schema.source_file);
        if let Some(table) = self.raw_cache().get(&key) {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(source::load(self.sources.get(region), schema)?);
        Ok(Arc::clone(self.raw_cache().entry(key).or_insert(table)))
    }

    fn raw_cache(&self) -> std::sync::MutexGuard<'_, HashMap<(Region, &'static str), Arc<Table>>> {
        self.raw.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Merge a table's primary and global copies on `key`
    pub fn combine_localization(&self, schema: &'static TableSchema, key: &str) -> DataResult<Table> {
        let primary = self.load(Region::Primary, schema)?;
        let global = self.load(Region::Global, schema)?;
        combine_localization(&primary, &global, key)
    }

    /// Load every known document once, so later runs can work from the cache
    pub fn prefetch(&self) -> DataResult<usize> {
        let mut count = 0;
        for schema in ALL_TABLES {
            self.load(Region::Primary, schema)?;
            count += 1;
        }
        for schema in LOCALIZED_TABLES {
            self.load(Region::Global, schema)?;
            count += 1;
        }
        info!(documents = count, "Prefetched documents");
        Ok(count)
    }

    // =========================================================================
    // Localization
    // =========================================================================

    pub fn localize_etc(&self) -> DataResult<&Table> {
        self.localize_etc
            .get_or_try_init(|| self.combine_localization(&LOCALIZE_ETC, "Key"))
    }

    pub fn localize_skills(&self) -> DataResult<&Table> {
        self.localize_skills
            .get_or_try_init(|| self.combine_localization(&LOCALIZE_SKILLS, "Key"))
    }

    // =========================================================================
    // Characters
    // =========================================================================

    pub fn character_stats(&self) -> DataResult<&Table> {
        self.character_stats.get_or_try_init(|| {
            let stats = self.load(Region::Primary, &CHARACTER_STATS)?;
            Ok(derived(rename_columns(stats.as_ref().clone(), CHARACTER_STAT_COLUMNS)))
        })
    }

    /// Characters with recoded types, localized names and a backup name
    pub fn character_details(&self) -> DataResult<&Table> {
        self.character_details.get_or_try_init(|| {
            let characters = self.load(Region::Primary, &CHARACTERS)?.as_ref().clone();
            let characters = remap_column(characters, "BulletType", DAMAGE_TYPES);
            let characters = remap_column(characters, "ArmorType", ARMOR_TYPES);

            let named = join(
                &characters,
                self.localize_etc()?,
                JoinSpec::keys("LocalizeEtcId", "Key"),
            )?;

            let tags = self.load(Region::Primary, &CHARACTER_ACADEMY_TAGS)?;
            let backups = Table::with_columns(
                "backup_names",
                vec!["Id".to_string(), "BackupName".to_string()],
                tags.rows()
                    .iter()
                    .map(|row| {
                        let mut backup = Record::new();
                        backup.insert("Id".into(), row.get("Id").cloned().unwrap_or(Value::Null));
                        backup.insert("BackupName".into(), backup_name(row));
                        backup
                    })
                    .collect(),
            );

            let details = join(&named, &backups, JoinSpec::on("Id"))?
                .with_column("BackupName", |row| match row.get("BackupName") {
                    Some(Value::Null) | None => Value::String(String::new()),
                    Some(name) => name.clone(),
                })
                .with_column("CharacterId", |row| {
                    row.get("Id").cloned().unwrap_or(Value::Null)
                });

            Ok(derived(details))
        })
    }

    pub fn character_profiles(&self) -> DataResult<&Table> {
        self.character_profiles.get_or_try_init(|| {
            Ok(derived(self.combine_localization(&CHARACTER_PROFILES, "CharacterId")?))
        })
    }

    /// Signature weapons keyed by `CharacterId`, with the terrain they boost
    pub fn character_weapon(&self) -> DataResult<&Table> {
        self.character_weapon.get_or_try_init(|| {
            let weapons = self.load(Region::Primary, &CHARACTER_WEAPONS)?.as_ref().clone();
            let weapons = weapons
                .with_column("TerrainBonus", |row| {
                    row.get("StatType")
                        .and_then(Value::as_array)
                        .and_then(|types| types.get(2))
                        .and_then(Value::as_str)
                        .map(|code| {
                            Value::String(display_name(TERRAIN_BONUSES, code).unwrap_or(code).to_string())
                        })
                        .unwrap_or(Value::Null)
                })
                .rename_column("Id", "CharacterId");
            Ok(derived(weapons))
        })
    }

    pub fn character_bond_stats(&self) -> DataResult<&HashMap<i64, BondCurve>> {
        self.character_bond_stats.get_or_try_init(|| {
            let rewards = self.load(Region::Primary, &FAVOR_LEVEL_REWARDS)?;
            let curves = bond_curves(&rewards)?;
            debug!(characters = curves.len(), "Built bond curves");
            Ok(curves)
        })
    }

    /// One row per (character, skill group, level) with localized text
    pub fn character_skills(&self) -> DataResult<&Table> {
        self.character_skills.get_or_try_init(|| {
            let lists = self.load(Region::Primary, &CHARACTER_SKILL_LISTS)?;
            let melted = melt_skill_lists(&lists);

            let skills = self.load(Region::Primary, &SKILLS)?;
            let joined = join(&melted, &skills, JoinSpec::on("GroupId"))?;
            let joined = join(
                &joined,
                self.localize_skills()?,
                JoinSpec::keys("LocalizeSkillId", "Key"),
            )?;

            Ok(derived(joined.dedup_by(&["CharacterId", "GroupId", "Level"])))
        })
    }

    pub fn weapon_passive_bonuses(&self) -> DataResult<&HashMap<i64, WeaponPassive>> {
        self.weapon_passive_bonuses.get_or_try_init(|| {
            let skills = self.character_skills()?;
            let passives = skills.rows().iter().filter(|row| {
                row.get("GroupId")
                    .and_then(Value::as_str)
                    .is_some_and(|g| g.contains(WEAPON_PASSIVE))
            });

            Ok(group_records(passives, "CharacterId")
                .into_iter()
                .filter_map(|(id, rows)| {
                    let id = id.as_i64()?;
                    let levels = level_texts(&rows);
                    Some((id, extract_weapon_passive(&levels, self.parser.as_ref())))
                })
                .collect())
        })
    }

    /// Parsed effects of each character's base skills (no weapon requirement)
    pub fn character_skill_details(&self) -> DataResult<&HashMap<i64, SkillDetails>> {
        self.character_skill_details.get_or_try_init(|| {
            let skills = self.character_skills()?;
            skills.require(&["SkillCategory", DESCRIPTION_COLUMN, "SkillCost"])?;

            let base = skills.rows().iter().filter(|row| {
                row.get("MinimumGradeCharacterWeapon").and_then(Value::as_i64) == Some(0)
            });

            let mut details = HashMap::new();
            for (id, rows) in group_records(base, "CharacterId") {
                let Some(id) = id.as_i64() else { continue };

                let groups: SkillDetails = group_records(rows.iter().copied(), "GroupId")
                    .into_iter()
                    .filter_map(|(group, rows)| {
                        let category = rows
                            .first()
                            .and_then(|r| r.get("SkillCategory"))
                            .and_then(Value::as_str)
                            .unwrap_or_default();
                        let effects =
                            extract_skill_effects(&level_texts(&rows), self.parser.as_ref(), category);
                        (!effects.is_empty()).then(|| (key_string(&group), effects))
                    })
                    .collect();

                details.insert(id, groups);
            }
            Ok(details)
        })
    }

    // =========================================================================
    // Assets
    // =========================================================================

    /// Distinct skill levels across all characters
    pub fn skills(&self) -> DataResult<&Table> {
        self.skills.get_or_try_init(|| {
            Ok(self.character_skills()?.clone().dedup_by(&["GroupId", "Level"]))
        })
    }

    pub fn currencies(&self) -> DataResult<&Table> {
        self.currencies.get_or_try_init(|| {
            let currencies = self.load(Region::Primary, &CURRENCIES)?;
            Ok(derived(self.with_names(&currencies)?.rename_column("ID", "Id")))
        })
    }

    pub fn items(&self) -> DataResult<&Table> {
        self.items.get_or_try_init(|| {
            let items = self.load(Region::Primary, &ITEMS)?;
            Ok(derived(self.with_names(&items)?))
        })
    }

    pub fn equipment(&self) -> DataResult<&Table> {
        self.equipment.get_or_try_init(|| {
            let equipment = self.load(Region::Primary, &EQUIPMENT)?;
            let stats = self.load(Region::Primary, &EQUIPMENT_STATS)?;
            let joined = join(&equipment, &stats, JoinSpec::keys("Id", "EquipmentId"))?;
            Ok(derived(self.with_names(&joined)?))
        })
    }

    pub fn furnitures(&self) -> DataResult<&Table> {
        self.furnitures.get_or_try_init(|| {
            let furniture = self.load(Region::Primary, &FURNITURE)?;
            Ok(derived(self.with_names(&furniture)?))
        })
    }

    pub fn recipes(&self) -> DataResult<&Table> {
        self.recipes.get_or_try_init(|| {
            let recipes = self.load(Region::Primary, &RECIPES)?;
            let ingredients = self.load(Region::Primary, &RECIPE_INGREDIENTS)?;
            Ok(derived(join(
                &recipes,
                &ingredients,
                JoinSpec::keys("RecipeIngredientId", "Id"),
            )?))
        })
    }

    fn with_names(&self, table: &Table) -> DataResult<Table> {
        join(table, self.localize_etc()?, JoinSpec::keys("LocalizeEtcId", "Key"))
    }

    /// Look up assets of one kind, keyed by `Id`
    pub fn asset(
        &self,
        kind: AssetKind,
        filter: &Filter,
        lang: &Localization,
    ) -> DataResult<Map<String, Value>> {
        let table = match kind {
            AssetKind::Skills => self.skills()?,
            AssetKind::Items => self.items()?,
            AssetKind::Equipment => self.equipment()?,
            AssetKind::Currencies => self.currencies()?,
            AssetKind::Furnitures => self.furnitures()?,
            AssetKind::Recipes => self.recipes()?,
        };
        query(table, filter, Some(kind.keep_columns()), kind.localized_columns(), lang, "Id")
    }
}

/// Filter a table and project each match, keyed by its `index` value.
///
/// Filter fields the table lacks are ignored; if none of them exist the
/// result is empty. `keep = None` keeps every column. Kept columns stay in
/// table order with localized columns after them. A localized column the
/// table lacks reads as `""`.
pub fn query(
    table: &Table,
    filter: &Filter,
    keep: Option<&[&str]>,
    localized: &[&str],
    lang: &Localization,
    index: &str,
) -> DataResult<Map<String, Value>> {
    table.require(&[index])?;

    let Some(filter) = filter.restrict_to(table) else {
        debug!(table = table.name(), "No filter field applies");
        return Ok(Map::new());
    };

    let localized = lang.localize(localized);
    let kept: Vec<&str> = table
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|c| *c != index && keep.map_or(true, |k| k.contains(c)))
        .filter(|c| !localized.iter().any(|l| l == c))
        .collect();

    Ok(table
        .rows()
        .iter()
        .filter(|row| filter.matches(row))
        .map(|row| {
            let mut out = Map::new();
            for column in &kept {
                out.insert(column.to_string(), row.get(*column).cloned().unwrap_or(Value::Null));
            }
            for column in &localized {
                out.insert(column.clone(), text_or_empty(row.get(column)));
            }
            (row.get(index).map(key_string).unwrap_or_default(), Value::Object(out))
        })
        .collect())
}

/// Kinds of asset served by `GameData::asset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Skills,
    Items,
    Equipment,
    Currencies,
    Furnitures,
    Recipes,
}

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Skills,
        AssetKind::Items,
        AssetKind::Equipment,
        AssetKind::Currencies,
        AssetKind::Furnitures,
        AssetKind::Recipes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Skills => "skills",
            AssetKind::Items => "items",
            AssetKind::Equipment => "equipment",
            AssetKind::Currencies => "currencies",
            AssetKind::Furnitures => "furnitures",
            AssetKind::Recipes => "recipes",
        }
    }

    pub fn keep_columns(self) -> &'static [&'static str] {
        match self {
            AssetKind::Skills => SKILL_COLUMNS,
            AssetKind::Items => ITEM_COLUMNS,
            AssetKind::Equipment => EQUIPMENT_COLUMNS,
            AssetKind::Currencies => CURRENCY_COLUMNS,
            AssetKind::Furnitures => FURNITURE_COLUMNS,
            AssetKind::Recipes => RECIPE_COLUMNS,
        }
    }

    pub fn localized_columns(self) -> &'static [&'static str] {
        match self {
            AssetKind::Recipes => &[],
            _ => NAME_DESCRIPTION,
        }
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skill" | "skills" => Ok(AssetKind::Skills),
            "item" | "items" => Ok(AssetKind::Items),
            "equipment" => Ok(AssetKind::Equipment),
            "currency" | "currencies" => Ok(AssetKind::Currencies),
            "furniture" | "furnitures" => Ok(AssetKind::Furnitures),
            "recipe" | "recipes" => Ok(AssetKind::Recipes),
            _ => Err(format!(
                "Unknown asset kind: {} (expected one of {})",
                s,
                AssetKind::ALL.map(AssetKind::as_str).join(", ")
            )),
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn derived(table: Table) -> Table {
    info!(table = table.name(), rows = table.len(), "Derived table");
    table
}

/// First favor item tag with its prefix and suffix removed, then spelling fixes
fn backup_name(row: &Record) -> Value {
    let Some(tag) = row
        .get("FavorItemUniqueTags")
        .and_then(Value::as_array)
        .and_then(|tags| tags.first())
        .and_then(Value::as_str)
    else {
        return Value::Null;
    };

    let name = tag.replace("F_", "").replace("_default", "");
    match lookup(NAME_FIXES, &name) {
        Some(fixed) => Value::String(fixed.to_string()),
        None => Value::String(name),
    }
}

/// Unpivot the four skill group columns into one row per group
fn melt_skill_lists(lists: &Table) -> Table {
    let columns = ["CharacterId", "MinimumGradeCharacterWeapon", "SkillCategory", "GroupId"]
        .map(String::from)
        .to_vec();

    let kept: Vec<&Record> = lists
        .rows()
        .iter()
        .filter(|row| row.get("IsFormConversion").and_then(Value::as_bool) != Some(true))
        .collect();

    let mut rows = Vec::new();
    for (column, category) in SKILL_CATEGORIES {
        for row in &kept {
            let groups = row.get(*column).and_then(Value::as_array);
            for group in groups.into_iter().flatten().filter_map(Value::as_str) {
                if group == EMPTY_SKILL {
                    continue;
                }
                let mut melted = Record::new();
                melted.insert("CharacterId".into(), row.get("CharacterId").cloned().unwrap_or(Value::Null));
                melted.insert(
                    "MinimumGradeCharacterWeapon".into(),
                    row.get("MinimumGradeCharacterWeapon").cloned().unwrap_or(Value::Null),
                );
                melted.insert("SkillCategory".into(), Value::String(category.to_string()));
                melted.insert("GroupId".into(), Value::String(group.to_string()));
                rows.push(melted);
            }
        }
    }

    Table::with_columns("character_skills", columns, rows)
}

fn level_texts<'a>(rows: &[&'a Record]) -> Vec<LevelText<'a>> {
    rows.iter()
        .map(|row| LevelText {
            level: row.get("Level").and_then(Value::as_i64).unwrap_or(0),
            description: row
                .get(DESCRIPTION_COLUMN)
                .and_then(Value::as_str)
                .unwrap_or_default(),
            cost: row.get("SkillCost").and_then(Value::as_i64),
        })
        .collect()
}

pub(crate) fn text_or_empty(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::String(String::new()),
        Some(v) => v.clone(),
    }
}
