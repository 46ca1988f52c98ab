use serde::Serialize;
use tracing::warn;

use super::grammar::{DescriptionParser, EffectMatch};

/// Placeholder for a level whose description lacks an effect slot
pub const MISSING_VALUE: &str = "0%";

/// One level of a skill group
#[derive(Debug, Clone)]
pub struct LevelText<'a> {
    pub level: i64,
    pub description: &'a str,
    pub cost: Option<i64>,
}

/// One effect of a skill group, tracked across all of its levels
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkillEffectRecord {
    pub skill_category: String,
    pub action: Option<String>,
    pub status: Option<String>,
    pub values: Vec<String>,
    pub cost: Vec<i64>,
}

/// Signature weapon passive bonus per weapon tier
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeaponPassive {
    #[serde(rename = "WeaponPassiveStatName")]
    pub stat_name: Option<String>,
    #[serde(rename = "WeaponPassiveStatValue")]
    pub values: Vec<String>,
}

/// Extract every effect of a skill group.
///
/// The n-th phrase of each level belongs to effect n. Levels with fewer
/// phrases get `MISSING_VALUE` so every effect has one value per level.
pub fn extract_skill_effects(
    levels: &[LevelText],
    parser: &dyn DescriptionParser,
    category: &str,
) -> Vec<SkillEffectRecord> {
    let sorted = sorted_levels(levels);
    let matches: Vec<Vec<EffectMatch>> = sorted
        .iter()
        .map(|l| parser.effects(l.description))
        .collect();
    let cost: Vec<i64> = sorted.iter().map(|l| l.cost.unwrap_or(0)).collect();
    let slots = matches.iter().map(Vec::len).max().unwrap_or(0);

    (0..slots)
        .map(|slot| {
            let values = matches
                .iter()
                .map(|m| {
                    m.get(slot)
                        .map(|e| e.value.clone())
                        .unwrap_or_else(|| MISSING_VALUE.to_string())
                })
                .collect();

            // Names come from the highest level carrying this slot
            let named = matches.iter().rev().find_map(|m| m.get(slot));
            let status = named.and_then(|e| resolve("stat", &e.stat, parser.stat_name(&e.stat)));
            let action = named
                .and_then(|e| e.action.as_deref())
                .and_then(|a| resolve("action", a, parser.action_name(a)));

            SkillEffectRecord {
                skill_category: category.to_string(),
                action,
                status,
                values,
                cost: cost.clone(),
            }
        })
        .collect()
}

/// Extract a signature weapon passive: one stat, one value per level.
/// Levels without a phrase get an empty value.
pub fn extract_weapon_passive(levels: &[LevelText], parser: &dyn DescriptionParser) -> WeaponPassive {
    let matches: Vec<Option<EffectMatch>> = sorted_levels(levels)
        .iter()
        .map(|l| parser.passive(l.description))
        .collect();

    let stat_name = matches
        .iter()
        .flatten()
        .next()
        .and_then(|e| resolve("stat", &e.stat, parser.stat_name(&e.stat)));

    WeaponPassive {
        stat_name,
        values: matches
            .into_iter()
            .map(|m| m.map(|e| e.value).unwrap_or_default())
            .collect(),
    }
}

fn sorted_levels<'a, 'b>(levels: &'b [LevelText<'a>]) -> Vec<&'b LevelText<'a>> {
    let mut sorted: Vec<&LevelText> = levels.iter().collect();
    sorted.sort_by_key(|l| l.level);
    sorted
}

fn resolve(kind: &str, token: &str, name: Option<&'static str>) -> Option<String> {
    if name.is_none() {
        warn!(kind, token, "Unmapped description token");
    }
    name.map(str::to_string)
}
