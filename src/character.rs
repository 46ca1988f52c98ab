use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::bond::BondCurve;
use crate::data::{text_or_empty, GameData};
use crate::error::DataResult;
use crate::extract::{SkillEffectRecord, WeaponPassive};
use crate::filter::Filter;
use crate::localization::Localization;
use crate::schema::columns::{
    DETAILS_COLUMNS, INFO_COLUMNS, PROFILE_COLUMNS, PROFILE_LOCALIZED, WEAPON_COLUMNS,
};
use crate::table::{group_records, key_string, values_equal, Record, Table};

/// Production step of characters available in the live game
const RELEASED: &str = "Release";

/// Everything known about one character
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CharacterView {
    #[serde(flatten)]
    pub info: Map<String, Value>,
    pub stats: Map<String, Value>,
    pub details: Map<String, Value>,
    pub profile: Map<String, Value>,
    pub skills: BTreeMap<String, SkillGroup>,
    pub skill_details: BTreeMap<String, Vec<SkillEffectRecord>>,
    pub weapon: Map<String, Value>,
    #[serde(serialize_with = "or_empty")]
    pub weapon_passive: Option<WeaponPassive>,
    #[serde(serialize_with = "or_empty")]
    pub bond_stats: Option<BondCurve>,
}

/// One skill group and its per-level text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkillGroup {
    pub minimum_weapon_tier: Value,
    pub skill_category: Value,
    pub levels: Map<String, Value>,
}

/// Named parts of a character view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterResource {
    Info,
    Stats,
    Details,
    Profile,
    Skills,
    SkillDetails,
    Weapon,
    WeaponPassive,
    Bond,
}

impl CharacterResource {
    pub const ALL: [CharacterResource; 9] = [
        CharacterResource::Info,
        CharacterResource::Stats,
        CharacterResource::Details,
        CharacterResource::Profile,
        CharacterResource::Skills,
        CharacterResource::SkillDetails,
        CharacterResource::Weapon,
        CharacterResource::WeaponPassive,
        CharacterResource::Bond,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CharacterResource::Info => "info",
            CharacterResource::Stats => "stats",
            CharacterResource::Details => "details",
            CharacterResource::Profile => "profile",
            CharacterResource::Skills => "skills",
            CharacterResource::SkillDetails => "skill_details",
            CharacterResource::Weapon => "weapon",
            CharacterResource::WeaponPassive => "weapon_passive",
            CharacterResource::Bond => "bond",
        }
    }
}

impl FromStr for CharacterResource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace('-', "_");
        CharacterResource::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown character resource: {} (expected one of {})",
                    s,
                    CharacterResource::ALL.map(CharacterResource::as_str).join(", ")
                )
            })
    }
}

impl fmt::Display for CharacterResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A character bound to the data it is read from and the languages to show
pub struct Character<'a> {
    data: &'a GameData,
    id: i64,
    lang: Localization,
    student: bool,
}

impl GameData {
    /// Ids of characters whose details match `filter`, in table order
    pub fn find_characters(&self, filter: &Filter, student_only: bool) -> DataResult<Vec<i64>> {
        let details = self.character_details()?;
        let Some(filter) = filter.restrict_to(details) else {
            return Ok(Vec::new());
        };

        Ok(details
            .rows()
            .iter()
            .filter(|row| !student_only || is_student(row))
            .filter(|row| filter.matches(row))
            .filter_map(|row| row.get("CharacterId").and_then(Value::as_i64))
            .collect())
    }

    /// Character names keyed by id, optionally narrowed to those with a
    /// name containing `name_contains` (case-insensitive)
    pub fn list_characters(
        &self,
        name_contains: &str,
        student_only: bool,
        lang: &Localization,
    ) -> DataResult<Map<String, Value>> {
        let details = self.character_details()?;
        let needle = name_contains.to_lowercase();

        let mut searched: Vec<String> = vec!["DevName".into(), "BackupName".into()];
        searched.extend(Localization::all().localize(&["Name"]));
        let mut shown: Vec<String> = vec!["DevName".into(), "BackupName".into()];
        shown.extend(lang.localize(&["Name"]));

        Ok(details
            .rows()
            .iter()
            .filter(|row| !student_only || is_student(row))
            .filter(|row| {
                needle.is_empty()
                    || searched.iter().any(|c| {
                        row.get(c)
                            .and_then(Value::as_str)
                            .is_some_and(|name| name.to_lowercase().contains(&needle))
                    })
            })
            .map(|row| {
                let mut names = Map::new();
                put_localized(&mut names, row, &shown);
                let id = row.get("CharacterId").map(key_string).unwrap_or_default();
                (id, Value::Object(names))
            })
            .collect())
    }

    pub fn character(&self, id: i64, lang: &Localization) -> DataResult<Character<'_>> {
        let student = self
            .character_details()?
            .rows()
            .iter()
            .any(|row| is_character(row, id) && is_student(row));

        Ok(Character {
            data: self,
            id,
            lang: lang.clone(),
            student,
        })
    }

    pub fn build_view(&self, id: i64, lang: &Localization) -> DataResult<CharacterView> {
        self.character(id, lang)?.view()
    }

    /// One resource of a character, or the whole view when `resource` is `None`.
    ///
    /// A non-empty `filter` is checked against the character's details; when
    /// it does not match the result is an empty object.
    pub fn character_resource(
        &self,
        id: i64,
        resource: Option<CharacterResource>,
        filter: &Filter,
        lang: &Localization,
    ) -> DataResult<Value> {
        if !filter.is_empty() {
            let details = self.character_details()?;
            let matched = filter.restrict_to(details).is_some_and(|extra| {
                details
                    .rows()
                    .iter()
                    .any(|row| is_character(row, id) && extra.matches(row))
            });
            if !matched {
                return Ok(Value::Object(Map::new()));
            }
        }

        let character = self.character(id, lang)?;
        match resource {
            Some(resource) => character.resource(resource),
            None => Ok(to_json(&character.view()?)),
        }
    }
}

impl Character<'_> {
    /// Playable and released
    pub fn is_student(&self) -> bool {
        self.student
    }

    pub fn view(&self) -> DataResult<CharacterView> {
        Ok(CharacterView {
            info: self.info()?,
            stats: self.stats()?,
            details: self.details()?,
            profile: self.profile()?,
            skills: self.skills()?,
            skill_details: self.skill_details()?,
            weapon: self.weapon()?,
            weapon_passive: self.weapon_passive()?,
            bond_stats: self.bond()?,
        })
    }

    pub fn resource(&self, resource: CharacterResource) -> DataResult<Value> {
        Ok(match resource {
            CharacterResource::Info => Value::Object(self.info()?),
            CharacterResource::Stats => Value::Object(self.stats()?),
            CharacterResource::Details => Value::Object(self.details()?),
            CharacterResource::Profile => Value::Object(self.profile()?),
            CharacterResource::Skills => to_json(&self.skills()?),
            CharacterResource::SkillDetails => to_json(&self.skill_details()?),
            CharacterResource::Weapon => Value::Object(self.weapon()?),
            CharacterResource::WeaponPassive => optional_json(self.weapon_passive()?),
            CharacterResource::Bond => optional_json(self.bond()?),
        })
    }

    /// Localized names followed by the basic info columns
    pub fn info(&self) -> DataResult<Map<String, Value>> {
        let mut info = Map::new();
        if let Some(row) = row_for(self.data.character_details()?, self.id) {
            put_localized(&mut info, row, &self.lang.localize(&["Name"]));
            put_kept(&mut info, row, INFO_COLUMNS);
        }
        Ok(info)
    }

    pub fn stats(&self) -> DataResult<Map<String, Value>> {
        Ok(row_for(self.data.character_stats()?, self.id)
            .map(|row| {
                row.iter()
                    .filter(|(k, _)| k.as_str() != "CharacterId")
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    pub fn details(&self) -> DataResult<Map<String, Value>> {
        let mut details = Map::new();
        if let Some(row) = row_for(self.data.character_details()?, self.id) {
            put_kept(&mut details, row, DETAILS_COLUMNS);
        }
        Ok(details)
    }

    pub fn profile(&self) -> DataResult<Map<String, Value>> {
        let mut profile = Map::new();
        if !self.student {
            return Ok(profile);
        }
        if let Some(row) = row_for(self.data.character_profiles()?, self.id) {
            put_kept(&mut profile, row, PROFILE_COLUMNS);
            put_localized(&mut profile, row, &self.lang.localize(PROFILE_LOCALIZED));
        }
        Ok(profile)
    }

    /// Skill groups keyed by group id, each with its levels' localized text
    pub fn skills(&self) -> DataResult<BTreeMap<String, SkillGroup>> {
        let table = self.data.character_skills()?;
        let text_columns = self.lang.localize(&["Name", "Description"]);

        let rows = table.rows().iter().filter(|row| is_character(row, self.id));
        Ok(group_records(rows, "GroupId")
            .into_iter()
            .map(|(group, rows)| {
                let first = rows.first().copied();
                let field = |name: &str| {
                    first
                        .and_then(|r| r.get(name))
                        .cloned()
                        .unwrap_or(Value::Null)
                };

                let mut levels = Map::new();
                for row in &rows {
                    let level = row.get("Level").map(key_string).unwrap_or_default();
                    if levels.contains_key(&level) {
                        continue;
                    }
                    let mut text = Map::new();
                    put_localized(&mut text, row, &text_columns);
                    text.insert(
                        "RequireLevelUpMaterial".into(),
                        row.get("RequireLevelUpMaterial").cloned().unwrap_or(Value::Null),
                    );
                    levels.insert(level, Value::Object(text));
                }

                let skill = SkillGroup {
                    minimum_weapon_tier: field("MinimumGradeCharacterWeapon"),
                    skill_category: field("SkillCategory"),
                    levels,
                };
                (key_string(&group), skill)
            })
            .collect())
    }

    pub fn skill_details(&self) -> DataResult<BTreeMap<String, Vec<SkillEffectRecord>>> {
        Ok(self
            .data
            .character_skill_details()?
            .get(&self.id)
            .map(|groups| groups.iter().cloned().collect())
            .unwrap_or_default())
    }

    pub fn weapon(&self) -> DataResult<Map<String, Value>> {
        let mut weapon = Map::new();
        if !self.student {
            return Ok(weapon);
        }
        if let Some(row) = row_for(self.data.character_weapon()?, self.id) {
            put_kept(&mut weapon, row, WEAPON_COLUMNS);
        }
        Ok(weapon)
    }

    pub fn weapon_passive(&self) -> DataResult<Option<WeaponPassive>> {
        if !self.student {
            return Ok(None);
        }
        Ok(self.data.weapon_passive_bonuses()?.get(&self.id).cloned())
    }

    pub fn bond(&self) -> DataResult<Option<BondCurve>> {
        if !self.student {
            return Ok(None);
        }
        Ok(self.data.character_bond_stats()?.get(&self.id).cloned())
    }
}

fn is_student(row: &Record) -> bool {
    row.get("IsPlayableCharacter").and_then(Value::as_bool) == Some(true)
        && row.get("ProductionStep").and_then(Value::as_str) == Some(RELEASED)
}

fn is_character(row: &Record, id: i64) -> bool {
    row.get("CharacterId")
        .is_some_and(|v| values_equal(v, &Value::from(id)))
}

fn row_for(table: &Table, id: i64) -> Option<&Record> {
    table.rows().iter().find(|row| is_character(row, id))
}

/// Copy the listed columns the row has, in list order
fn put_kept(out: &mut Map<String, Value>, row: &Record, keep: &[&str]) {
    for column in keep {
        if let Some(value) = row.get(*column) {
            out.insert(column.to_string(), value.clone());
        }
    }
}

/// Copy localized columns; an absent translation reads as ""
fn put_localized(out: &mut Map<String, Value>, row: &Record, columns: &[String]) {
    for column in columns {
        out.insert(column.clone(), text_or_empty(row.get(column)));
    }
}

/// Sections here only have string keys, so serialization cannot fail
fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn optional_json<T: Serialize>(value: Option<T>) -> Value {
    value
        .map(|v| to_json(&v))
        .unwrap_or_else(|| Value::Object(Map::new()))
}

/// Absent sections serialize as `{}`
fn or_empty<T: Serialize, S: Serializer>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => value.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
