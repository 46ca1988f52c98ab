pub type Lookup = &'static [(&'static str, &'static str)];

/// Find the display value for a code
pub fn lookup(table: Lookup, code: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == code).map(|(_, v)| *v)
}

pub static DAMAGE_TYPES: Lookup = &[
    ("Explosion", "Explosive"),
    ("Pierce", "Piercing"),
    ("Mystic", "Mystic"),
    ("Siege", "Siege"),
    ("Normal", "Normal"),
];

pub static ARMOR_TYPES: Lookup = &[
    ("LightArmor", "Light"),
    ("HeavyArmor", "Heavy"),
    ("Unarmed", "Special"),
];

/// Skill list columns -> skill category
pub static SKILL_CATEGORIES: Lookup = &[
    ("ExSkillGroupId", "Ex"),
    ("PublicSkillGroupId", "Normal"),
    ("PassiveSkillGroupId", "Passive"),
    ("ExtraPassiveSkillGroupId", "Sub"),
];

/// Signature weapon terrain stat -> terrain name
pub static TERRAIN_BONUSES: Lookup = &[
    ("StreetBattleAdaptation_Base", "Urban"),
    ("OutdoorBattleAdaptation_Base", "Outdoor"),
    ("IndoorBattleAdaptation_Base", "Indoor"),
];

pub static BOND_STAT_TYPES: Lookup = &[
    ("AttackPower_Base", "Attack"),
    ("DefensePower_Base", "Defence"),
    ("HealPower_Base", "Heal"),
    ("MaxHP_Base", "Hp"),
];

pub static CHARACTER_STAT_COLUMNS: Lookup = &[
    ("StabilityPoint", "Stability"),
    ("DodgePoint", "Evasion"),
    ("AccuracyPoint", "Accuracy"),
    ("CriticalPoint", "Crit"),
    ("CriticalResistPoint", "CritRes"),
    ("CriticalDamageRate", "CritDmg"),
    ("CriticalDamageResistRate", "CritDmgRes"),
    ("BlockRate", "BlockRate"),
    ("HealEffectivenessRate", "Recovery"),
    ("OppressionPower", "CCStrength"),
    ("OppressionResist", "CCRes"),
    ("StreetBattleAdaptation", "UrbanAffinity"),
    ("OutdoorBattleAdaptation", "OutdoorAffinity"),
    ("IndoorBattleAdaptation", "IndoorAffinity"),
];

/// Misspelled names recovered from favor item tags
pub static NAME_FIXES: Lookup = &[
    ("Tusbaki", "Tsubaki"),
    ("Zunko", "Junko"),
    ("Hihumi", "Hifumi"),
    ("Hihumi_Swimsuit", "Hifumi_Swimsuit"),
];

/// Stat names as written in JP skill descriptions
pub static JP_STAT_NAMES: Lookup = &[
    ("会心ダメージ率", "CritDmg"),
    ("会心ダメージ", "CritDmg"),
    ("治癒効果", "Recovery"),
    ("回復効果", "Recovery"),
    ("HP", "Hp"),
    ("攻撃力", "Attack"),
    ("防御力", "Defense"),
    ("命中値", "Accuracy"),
    ("攻撃速度", "NormalAttackSpeed"),
    ("会心値", "Crit"),
    ("装弾数", "AmmoCount"),
    ("CC強化力", "CCStrength"),
    ("防御貫通値", "DefensePenetration"),
    ("回避値", "Evasion"),
    ("遮蔽成功率", "BlockRate"),
    ("安定値", "Stability"),
    ("治癒力", "Heal"),
    ("コスト回復力", "RegenCost"),
    ("射程", "Range"),
    ("移動速度", "MoveSpeed"),
    ("会心抵抗値", "CritRes"),
    ("会心ダメージ抵抗率", "CritDmgRes"),
    ("CC抵抗力", "CCRes"),
    ("被ダメージ率", "DamagedRatio"),
    ("受けるダメージ量", "DamagedRatio"),
];

/// Action verbs as written in JP skill descriptions
pub static JP_ACTIONS: Lookup = &[
    ("ダメージ", "Damage"),
    ("回復", "Heal"),
    ("シールド", "Shield"),
    ("召喚", "Summon"),
    ("増加", "Buff"),
    ("減少", "Debuff"),
];
