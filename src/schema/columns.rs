pub static ITEM_COLUMNS: &[&str] = &[
    "Id", "GroupId", "Rarity", "ProductionStep", "ItemCategory", "Quality", "Icon",
    "SpriteName", "StackableMax", "StackableFunction", "ImmediateUse",
    "UsingResultParcelType", "UsingResultId", "UsingResultAmount", "MailType",
    "ExpiryChangeParcelType", "ExpiryChangeId", "ExpiryChangeAmount", "CanTierUpgrade",
    "TierUpgradeRecipeCraftId", "Tags", "CraftQuality", "ShiftingCraftQuality",
    "ShopCategory", "ExpirationDateTime", "ShortcutTypeId", "GachaTicket",
];

pub static CURRENCY_COLUMNS: &[&str] = &[
    "Id", "CurrencyType", "Icon", "Rarity", "AutoChargeMsc", "AutoChargeAmount",
    "CurrencyOverChargeType", "CurrencyAdditionalChargeType", "ChargeLimit",
    "OverChargeLimit", "SpriteName", "DailyRefillAmount", "DailyRefillTime",
];

pub static EQUIPMENT_COLUMNS: &[&str] = &[
    "Id", "EquipmentCategory", "Rarity", "Wear", "MaxLevel", "RecipeId", "TierInit",
    "NextTierEquipment", "StackableMax", "Icon", "ImageName", "Tags", "CraftQuality",
    "ShiftingCraftQuality", "ShopCategory", "ShortcutTypeId", "StatLevelUpType",
    "StatType", "MinStat", "MaxStat", "LevelUpInsertLimit", "LevelUpFeedExp",
    "LevelUpFeedCostCurrency", "LevelUpFeedCostAmount", "LevelUpFeedAddExp",
    "DefaultMaxLevel", "TranscendenceMax", "DamageFactorGroupId",
];

pub static FURNITURE_COLUMNS: &[&str] = &[
    "Id", "ProductionStep", "Rarity", "Category", "SubCategory", "StarGradeInit", "Tier",
    "Icon", "SizeWidth", "SizeHeight", "OtherSize", "ExpandWidth", "Enable",
    "ReverseRotation", "Prefab", "PrefabExpand", "SubPrefab", "SubExpandPrefab",
    "CornerPrefab", "StackableMax", "RecipeCraftId", "SetGroudpId", "ComfortBonus",
    "VisitOperationType", "VisitBonusOperationType", "Tags", "CraftQuality",
    "ShiftingCraftQuality", "FurnitureFunctionType", "FunctionParameter",
    "EventCollectionId", "FurnitureBubbleOffsetX", "FurnitureBubbleOffsetY",
    "CafeCharacterStateReq", "CafeCharacterStateAdd",
];

pub static RECIPE_COLUMNS: &[&str] = &[
    "Id", "RecipeType", "RecipeIngredientId", "ParcelType", "ParcelId", "ResultAmountMin",
    "ResultAmountMax", "CostParcelType", "CostId", "CostAmount", "IngredientParcelType",
    "IngredientId", "IngredientAmount", "CostTimeInSecond",
];

pub static SKILL_COLUMNS: &[&str] = &[
    "GroupId", "Id", "MinimumGradeCharacterWeapon", "SkillCategory", "Level", "SkillCost",
    "ExtraSkillCost", "EnemySkillCost", "ExtraEnemySkillCost", "BulletType",
    "StartCoolTime", "CoolTime", "EnemyStartCoolTime", "EnemyCoolTime", "UseAtg",
    "RequireCharacterLevel", "RequireLevelUpMaterial", "IconName", "IsShowInfo",
];

/// Character basic info
pub static INFO_COLUMNS: &[&str] = &[
    "Id", "DevName", "BackupName", "ProductionStep", "IsPlayableCharacter", "Rarity",
    "TacticRole", "TacticRange", "WeaponType", "BulletType", "ArmorType", "School", "Club",
    "DefaultStarGrade", "MaxStarGrade", "SquadType", "EquipmentSlot", "Tags",
];

/// Character extended details
pub static DETAILS_COLUMNS: &[&str] = &[
    "CollectionVisible", "TacticEntityType", "CanSurvive", "IsDummy", "SubPartsCount",
    "AimIKType", "StatLevelUpType", "Jumpable", "PersonalityId", "CharacterAIId",
    "ScenarioCharacter", "SpawnTemplateId", "FavorLevelupType", "SpineResourceName",
    "SpineResourceNameDiorama", "EntityMaterialType", "ModelPrefabName", "TextureDir",
    "TextureEchelon", "CollectionTexturePath", "CollectionBGTexturePath", "TextureBoss",
    "TextureSkillCard", "WeaponImagePath", "WeaponLocalizeId", "DisplayEnemyInfo",
    "BodyRadius", "RandomEffectRadius", "HPBarHide", "HpBarHeight",
    "HighlightFloaterHeight", "MoveStartFrame", "MoveEndFrame", "JumpMotionFrame",
    "AppearFrame", "CanMove", "CanFix", "CanCrowdControl", "CanBattleItemMove",
    "IsAirUnit", "AirUnitHeight", "SecretStoneItemId", "SecretStoneItemAmount",
    "CharacterPieceItemId", "CharacterPieceItemAmount", "CombineRecipeId",
    "InformationPacel", "AnimationSSR",
];

/// Signature weapon stats
pub static WEAPON_COLUMNS: &[&str] = &[
    "AttackPower", "AttackPower100", "MaxHP", "MaxHP100", "HealPower", "HealPower100",
    "TerrainBonus", "Unlock", "MaxLevel", "RecipeId", "ImagePath",
];

pub static PROFILE_COLUMNS: &[&str] = &["BirthDay"];

pub static PROFILE_LOCALIZED: &[&str] = &[
    "StatusMessage", "FullName", "FamilyName", "FamilyNameRuby", "PersonalName",
    "PersonalNameRuby", "SchoolYear", "CharacterAge", "Birthday", "CharHeight",
    "ArtistName", "CharacterVoice", "Hobby", "WeaponName", "WeaponDesc",
    "ProfileIntroduction", "CharacterSSRNew",
];

/// Localized columns served with every named asset
pub static NAME_DESCRIPTION: &[&str] = &["Name", "Description"];
