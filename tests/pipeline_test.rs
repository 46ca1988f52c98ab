//! End-to-end tests over a small on-disk dataset laid out like the upstream
//! release: one `{"DataList": [...]}` document per table, per region.

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use ba_data::character::CharacterResource;
use ba_data::config::SourceConfig;
use ba_data::data::{AssetKind, GameData};
use ba_data::filter::Filter;
use ba_data::localization::Localization;

// =============================================================================
// Shared Dataset
// =============================================================================

/// Written once and shared by every test
static DATASET: Lazy<Dataset> = Lazy::new(Dataset::new);

struct Dataset {
    _dir: TempDir,
    data: GameData,
}

impl Dataset {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("jp");
        let global = dir.path().join("global");
        fs::create_dir_all(&primary).unwrap();
        fs::create_dir_all(&global).unwrap();

        write_primary(&primary);
        write_global(&global);

        let config = SourceConfig::new(
            primary.to_string_lossy(),
            global.to_string_lossy(),
        );
        let data = GameData::new(config.build().unwrap());

        Self { _dir: dir, data }
    }
}

fn data() -> &'static GameData {
    &DATASET.data
}

fn write(dir: &Path, file: &str, rows: Value) {
    fs::write(dir.join(file), json!({ "DataList": rows }).to_string()).unwrap();
}

fn write_primary(dir: &Path) {
    write(
        dir,
        "CharacterExcelTable.json",
        json!([
            {"Id": 10000, "DevName": "CH0063", "ProductionStep": "Release", "IsPlayableCharacter": true,
             "Rarity": "SSR", "BulletType": "Explosion", "ArmorType": "HeavyArmor",
             "School": "Abydos", "Club": "Countermeasure", "LocalizeEtcId": 1},
            {"Id": 10001, "DevName": "CH0069", "ProductionStep": "Release", "IsPlayableCharacter": true,
             "Rarity": "SR", "BulletType": "Pierce", "ArmorType": "LightArmor",
             "School": "Trinity", "Club": "Hokagoshoku", "LocalizeEtcId": 2},
            {"Id": 10002, "DevName": "CH0999", "ProductionStep": "Development", "IsPlayableCharacter": true,
             "Rarity": "R", "BulletType": "Mystic", "ArmorType": "Unarmed",
             "School": "Gehenna", "LocalizeEtcId": 3},
            {"Id": 20000, "DevName": "Kaiser_Guard", "ProductionStep": "Release", "IsPlayableCharacter": false,
             "BulletType": "Normal", "ArmorType": "LightArmor", "School": "None", "LocalizeEtcId": 4}
        ]),
    );
    write(
        dir,
        "LocalizeEtcExcelTable.json",
        json!([
            {"Key": 1, "NameJp": "ホシノ", "DescriptionJp": ""},
            {"Key": 2, "NameJp": "ヒフミ", "DescriptionJp": ""},
            {"Key": 3, "NameJp": "ミライ", "DescriptionJp": ""},
            {"Key": 4, "NameJp": "カイザー", "DescriptionJp": ""},
            {"Key": 100, "NameJp": "初級戦術教育BD", "DescriptionJp": "スキルレベルアップ素材"},
            {"Key": 200, "NameJp": "ハット", "DescriptionJp": "帽子"}
        ]),
    );
    write(
        dir,
        "CharacterAcademyTagsExcelTable.json",
        json!([
            {"Id": 10000, "FavorItemUniqueTags": ["F_Hoshino_default"]},
            {"Id": 10001, "FavorItemUniqueTags": ["F_Hihumi", "F_Other"]}
        ]),
    );
    write(
        dir,
        "CharacterStatExcelTable.json",
        json!([
            {"CharacterId": 10000, "AttackPower1": 250, "MaxHP1": 2800, "StabilityPoint": 2000, "CriticalDamageRate": 20000},
            {"CharacterId": 20000, "AttackPower1": 100, "MaxHP1": 1000, "StabilityPoint": 1500, "CriticalDamageRate": 15000}
        ]),
    );
    write(
        dir,
        "LocalizeCharProfileExcelTable.json",
        json!([
            {"CharacterId": 10000, "BirthDay": "1/2", "FullNameJp": "小鳥遊ホシノ", "FullNameEn": "",
             "StatusMessageJp": "うへ～"},
            {"CharacterId": 20000, "BirthDay": "", "FullNameJp": "カイザー"}
        ]),
    );
    write(
        dir,
        "CharacterWeaponExcelTable.json",
        json!([
            {"Id": 10000, "ImagePath": "weapon/hoshino", "AttackPower": 50, "MaxHP": 300,
             "StatType": ["AttackPower_Base", "MaxHP_Base", "StreetBattleAdaptation_Base"]},
            {"Id": 20000, "ImagePath": "weapon/kaiser", "AttackPower": 1, "MaxHP": 1,
             "StatType": ["AttackPower_Base", "MaxHP_Base", "IndoorBattleAdaptation_Base"]}
        ]),
    );
    write(
        dir,
        "FavorLevelRewardExcelTable.json",
        json!([
            {"CharacterId": 10000, "FavorLevel": 2, "StatType": ["MaxHP_Base", "DefensePower_Base"], "StatValue": [13, 1]},
            {"CharacterId": 10000, "FavorLevel": 3, "StatType": ["MaxHP_Base", "DefensePower_Base"], "StatValue": [13, 2]},
            {"CharacterId": 20000, "FavorLevel": 2, "StatType": ["MaxHP_Base"], "StatValue": [5]}
        ]),
    );
    write(
        dir,
        "CharacterSkillListExcelTable.json",
        json!([
            {"CharacterId": 10000, "MinimumGradeCharacterWeapon": 0, "IsFormConversion": false,
             "ExSkillGroupId": ["Hoshino_Ex"], "PublicSkillGroupId": ["Hoshino_Normal"],
             "PassiveSkillGroupId": ["EmptySkill"], "ExtraPassiveSkillGroupId": []},
            {"CharacterId": 10000, "MinimumGradeCharacterWeapon": 2, "IsFormConversion": false,
             "ExSkillGroupId": [], "PublicSkillGroupId": [],
             "PassiveSkillGroupId": ["Hoshino_WeaponPassive"], "ExtraPassiveSkillGroupId": []},
            {"CharacterId": 20000, "MinimumGradeCharacterWeapon": 0, "IsFormConversion": false,
             "ExSkillGroupId": ["Kaiser_Ex"], "PublicSkillGroupId": [],
             "PassiveSkillGroupId": [], "ExtraPassiveSkillGroupId": []}
        ]),
    );
    write(
        dir,
        "SkillExcelTable.json",
        json!([
            {"Id": 1, "GroupId": "Hoshino_Ex", "Level": 1, "SkillCost": 4, "LocalizeSkillId": 11,
             "SkillCategory": "Skill", "RequireLevelUpMaterial": 0},
            {"Id": 2, "GroupId": "Hoshino_Ex", "Level": 2, "SkillCost": 4, "LocalizeSkillId": 12,
             "SkillCategory": "Skill", "RequireLevelUpMaterial": 100},
            {"Id": 3, "GroupId": "Hoshino_Ex", "Level": 3, "SkillCost": 3, "LocalizeSkillId": 13,
             "SkillCategory": "Skill", "RequireLevelUpMaterial": 100},
            {"Id": 4, "GroupId": "Hoshino_Normal", "Level": 1, "LocalizeSkillId": 21},
            {"Id": 5, "GroupId": "Hoshino_WeaponPassive", "Level": 1, "LocalizeSkillId": 31},
            {"Id": 6, "GroupId": "Hoshino_WeaponPassive", "Level": 2, "LocalizeSkillId": 32},
            {"Id": 7, "GroupId": "Kaiser_Ex", "Level": 1, "SkillCost": 2, "LocalizeSkillId": 41}
        ]),
    );
    write(
        dir,
        "LocalizeSkillExcelTable.json",
        json!([
            {"Key": 11, "NameJp": "大人の対応", "DescriptionJp": "攻撃力を[c][007eff]10%[-][/c]増加し、敵にダメージ"},
            {"Key": 12, "NameJp": "大人の対応", "DescriptionJp": "攻撃力を[c][007eff]15%[-][/c]増加し、敵にダメージ"},
            {"Key": 13, "NameJp": "大人の対応", "DescriptionJp": "攻撃力を[c][007eff]20%[-][/c]増加し、敵にダメージ"},
            {"Key": 21, "NameJp": "通常", "DescriptionJp": "周囲の味方を守る"},
            {"Key": 31, "NameJp": "固有", "DescriptionJp": "防御力を[c][007eff]14%[-][/c]増加"},
            {"Key": 32, "NameJp": "固有", "DescriptionJp": "防御力を[c][007eff]20%[-][/c]増加"},
            {"Key": 41, "NameJp": "命令", "DescriptionJp": "防御力を[c][007eff]5%[-][/c]減少"}
        ]),
    );
    write(
        dir,
        "CurrencyExcelTable.json",
        json!([{"ID": 1, "CurrencyType": "Gold", "Rarity": "R", "LocalizeEtcId": 200}]),
    );
    write(
        dir,
        "ItemExcelTable.json",
        json!([
            {"Id": 2000, "Rarity": "N", "ItemCategory": "Material", "LocalizeEtcId": 100},
            {"Id": 2001, "Rarity": "R", "ItemCategory": "Material", "LocalizeEtcId": 999}
        ]),
    );
    write(
        dir,
        "EquipmentExcelTable.json",
        json!([{"Id": 1000, "EquipmentCategory": "Hat", "Rarity": "N", "LocalizeEtcId": 200}]),
    );
    write(
        dir,
        "EquipmentStatExcelTable.json",
        json!([{"EquipmentId": 1000, "StatType": ["AttackPower_Coefficient"], "MaxLevel": 10}]),
    );
    write(
        dir,
        "FurnitureExcelTable.json",
        json!([{"Id": 1, "Category": "Furnitures", "Rarity": "N", "LocalizeEtcId": 200}]),
    );
    write(
        dir,
        "RecipeExcelTable.json",
        json!([
            {"Id": 5, "RecipeType": "Craft", "RecipeIngredientId": 50},
            {"Id": 6, "RecipeType": "Craft", "RecipeIngredientId": 60}
        ]),
    );
    write(
        dir,
        "RecipeIngredientExcelTable.json",
        json!([{"Id": 50, "CostTimeInSecond": 60, "IngredientId": [2000], "IngredientAmount": [3]}]),
    );
}

fn write_global(dir: &Path) {
    write(
        dir,
        "LocalizeEtcExcelTable.json",
        json!([
            {"Key": 1, "NameEn": "Hoshino", "DescriptionEn": ""},
            {"Key": 4, "NameEn": "Kaiser", "DescriptionEn": ""},
            {"Key": 100, "NameEn": "Beginner Tactical Training BD", "DescriptionEn": "Skill material"},
            {"Key": 200, "NameEn": "Hat", "DescriptionEn": "A hat"}
        ]),
    );
    write(
        dir,
        "LocalizeSkillExcelTable.json",
        json!([
            {"Key": 11, "NameEn": "Grown-up Response", "DescriptionEn": "Raises ATK by 10%"},
            {"Key": 12, "NameEn": "Grown-up Response", "DescriptionEn": "Raises ATK by 15%"}
        ]),
    );
    write(
        dir,
        "LocalizeCharProfileExcelTable.json",
        json!([{"CharacterId": 10000, "FullNameEn": "Takanashi Hoshino", "StatusMessageEn": "Uhe~"}]),
    );
}

// =============================================================================
// Characters
// =============================================================================

#[test]
fn test_find_characters_student_only() {
    let students = data().find_characters(&Filter::new(), true).unwrap();
    assert_eq!(students, [10000, 10001]);

    let everyone = data().find_characters(&Filter::new(), false).unwrap();
    assert_eq!(everyone, [10000, 10001, 10002, 20000]);
}

#[test]
fn test_find_characters_by_filter() {
    let trinity = Filter::new().with("School", ["Trinity", "Gehenna"]);
    assert_eq!(data().find_characters(&trinity, true).unwrap(), [10001]);
    assert_eq!(data().find_characters(&trinity, false).unwrap(), [10001, 10002]);

    let typed = Filter::new().with("BulletType", ["Explosive"]);
    assert_eq!(data().find_characters(&typed, true).unwrap(), [10000]);

    let unknown = Filter::new().with("Favourite", ["Naps"]);
    assert!(data().find_characters(&unknown, false).unwrap().is_empty());
}

#[test]
fn test_list_characters() {
    let lang = Localization::from_tokens(["en"]);
    let all = data().list_characters("", true, &lang).unwrap();
    assert_eq!(all.keys().collect::<Vec<_>>(), ["10000", "10001"]);
    assert_eq!(
        all["10001"],
        json!({"DevName": "CH0069", "BackupName": "Hifumi", "NameEn": ""})
    );

    // Matches the JP name even though only English is shown
    let matched = data().list_characters("ホシ", true, &lang).unwrap();
    assert_eq!(matched.keys().collect::<Vec<_>>(), ["10000"]);

    let matched = data().list_characters("KAISER", false, &lang).unwrap();
    assert_eq!(matched.keys().collect::<Vec<_>>(), ["20000"]);
}

#[test]
fn test_student_view() {
    let lang = Localization::from_tokens(["en", "jp"]);
    let view = data().build_view(10000, &lang).unwrap();

    assert_eq!(view.info["NameEn"], json!("Hoshino"));
    assert_eq!(view.info["NameJp"], json!("ホシノ"));
    assert_eq!(view.info["BackupName"], json!("Hoshino"));
    assert_eq!(view.info["ArmorType"], json!("Heavy"));
    assert_eq!(view.stats["Stability"], json!(2000));
    assert_eq!(view.stats["CritDmg"], json!(20000));
    assert!(!view.stats.contains_key("CharacterId"));

    assert_eq!(view.profile["BirthDay"], json!("1/2"));
    assert_eq!(view.profile["FullNameEn"], json!("Takanashi Hoshino"));
    assert_eq!(view.profile["HobbyEn"], json!(""));

    assert_eq!(view.weapon["TerrainBonus"], json!("Urban"));
    assert_eq!(view.weapon["AttackPower"], json!(50));

    let bond = view.bond_stats.as_ref().unwrap();
    assert_eq!(bond.levels, [1, 2, 3]);
    assert_eq!(bond.stat1.as_deref(), Some("Hp"));
    assert_eq!(bond.stat1_values, [0, 13, 26]);
    assert_eq!(bond.stat2_values, [0, 1, 3]);

    let passive = view.weapon_passive.as_ref().unwrap();
    assert_eq!(passive.stat_name.as_deref(), Some("Defense"));
    assert_eq!(passive.values, ["14%", "20%"]);
}

#[test]
fn test_student_skills() {
    let lang = Localization::from_tokens(["en"]);
    let view = data().build_view(10000, &lang).unwrap();

    let ex = &view.skills["Hoshino_Ex"];
    assert_eq!(ex.skill_category, json!("Ex"));
    assert_eq!(ex.minimum_weapon_tier, json!(0));
    assert_eq!(ex.levels.len(), 3);
    assert_eq!(
        ex.levels["1"],
        json!({"NameEn": "Grown-up Response", "DescriptionEn": "Raises ATK by 10%", "RequireLevelUpMaterial": 0})
    );
    assert_eq!(ex.levels["3"]["NameEn"], json!(""));
    assert!(view.skills.contains_key("Hoshino_WeaponPassive"));

    let details = &view.skill_details["Hoshino_Ex"];
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].status.as_deref(), Some("Attack"));
    assert_eq!(details[0].action.as_deref(), Some("Buff"));
    assert_eq!(details[0].values, ["10%", "15%", "20%"]);
    assert_eq!(details[0].cost, [4, 4, 3]);
    assert!(!view.skill_details.contains_key("Hoshino_Normal"));
    assert!(!view.skill_details.contains_key("Hoshino_WeaponPassive"));
}

#[test]
fn test_non_student_view() {
    let view = data().build_view(20000, &Localization::default()).unwrap();

    assert_eq!(view.info["NameEn"], json!("Kaiser"));
    assert_eq!(view.stats["AttackPower1"], json!(100));
    assert!(view.skills.contains_key("Kaiser_Ex"));
    assert_eq!(view.skill_details["Kaiser_Ex"][0].action.as_deref(), Some("Debuff"));

    assert!(view.profile.is_empty());
    assert!(view.weapon.is_empty());
    assert!(view.weapon_passive.is_none());
    assert!(view.bond_stats.is_none());

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["BondStats"], json!({}));
    assert_eq!(json["WeaponPassive"], json!({}));
}

#[test]
fn test_unknown_character_is_empty() {
    let view = data().build_view(99999, &Localization::default()).unwrap();
    assert!(view.info.is_empty());
    assert!(view.stats.is_empty());
    assert!(view.skills.is_empty());
    assert!(view.bond_stats.is_none());
}

#[test]
fn test_character_resource_dispatch() {
    let lang = Localization::default();

    let bond = data()
        .character_resource(10000, Some(CharacterResource::Bond), &Filter::new(), &lang)
        .unwrap();
    assert_eq!(bond["Level"], json!([1, 2, 3]));

    let abydos = Filter::new().with("School", ["Abydos"]);
    let info = data()
        .character_resource(10000, Some(CharacterResource::Info), &abydos, &lang)
        .unwrap();
    assert_eq!(info["School"], json!("Abydos"));

    let trinity = Filter::new().with("School", ["Trinity"]);
    let none = data()
        .character_resource(10000, Some(CharacterResource::Info), &trinity, &lang)
        .unwrap();
    assert_eq!(none, json!({}));

    let whole = data()
        .character_resource(10001, None, &Filter::new(), &lang)
        .unwrap();
    assert_eq!(whole["BackupName"], json!("Hifumi"));
    assert_eq!(whole["BondStats"], json!({}));
}

// =============================================================================
// Assets
// =============================================================================

#[test]
fn test_item_assets() {
    let lang = Localization::from_tokens(["en"]);
    let items = data().asset(AssetKind::Items, &Filter::new(), &lang).unwrap();

    assert_eq!(
        items["2000"],
        json!({"Rarity": "N", "ItemCategory": "Material",
               "NameEn": "Beginner Tactical Training BD", "DescriptionEn": "Skill material"})
    );
    // No localization row at all
    assert_eq!(items["2001"]["NameEn"], json!(""));

    let rare = Filter::new().with("Rarity", ["R"]).with("NotAColumn", [1]);
    let rare = data().asset(AssetKind::Items, &rare, &lang).unwrap();
    assert_eq!(rare.keys().collect::<Vec<_>>(), ["2001"]);
}

#[test]
fn test_currency_and_equipment_assets() {
    let lang = Localization::from_tokens(["jp"]);

    let currencies = data().asset(AssetKind::Currencies, &Filter::new(), &lang).unwrap();
    assert_eq!(currencies["1"]["CurrencyType"], json!("Gold"));
    assert_eq!(currencies["1"]["NameJp"], json!("ハット"));

    let equipment = data()
        .asset(AssetKind::Equipment, &Filter::new().with("Id", [1000]), &lang)
        .unwrap();
    assert_eq!(equipment["1000"]["MaxLevel"], json!(10));
    assert_eq!(equipment["1000"]["StatType"], json!(["AttackPower_Coefficient"]));
}

#[test]
fn test_recipe_assets_are_not_localized() {
    let recipes = data()
        .asset(AssetKind::Recipes, &Filter::new(), &Localization::default())
        .unwrap();

    assert_eq!(
        recipes["5"],
        json!({"RecipeType": "Craft", "RecipeIngredientId": 50,
               "IngredientId": [2000], "IngredientAmount": [3], "CostTimeInSecond": 60})
    );
    assert_eq!(recipes["6"]["CostTimeInSecond"], Value::Null);
}

#[test]
fn test_skill_assets_are_distinct_levels() {
    let skills = data()
        .asset(AssetKind::Skills, &Filter::new().with("GroupId", ["Hoshino_Ex"]), &Localization::default())
        .unwrap();

    assert_eq!(skills.keys().collect::<Vec<_>>(), ["1", "2", "3"]);
    assert_eq!(skills["2"]["SkillCost"], json!(4));
    assert_eq!(skills["2"]["SkillCategory"], json!("Ex"));
    assert_eq!(skills["2"]["DescriptionEn"], json!("Raises ATK by 15%"));
}
