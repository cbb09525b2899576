//! Typed access to well known fields of a player entity.
//!
//! Getters return `None` when a field is absent or holds an unexpected kind
//! of value. Setters create the final key when its parent map exists, and
//! fail with [`MissingField`](crate::ErrorKind::MissingField) otherwise.

use crate::{ColorDirectives, DecodeOptions, Error, ErrorKind, SaveFile, Variant, VariantMap};
use std::path::Path;

/// A `(value, max)` pair tracked under `status` with a base maximum under
/// `statusParameters`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Health,
    Energy,
    Food,
    Warmth,
    Breath,
}

impl Stat {
    fn schema(self) -> &'static str {
        match self {
            Stat::Health => "healthSchema",
            Stat::Energy => "energySchema",
            Stat::Food => "foodSchema",
            Stat::Warmth => "warmthSchema",
            Stat::Breath => "breathSchema",
        }
    }

    fn base_max(self) -> &'static str {
        match self {
            Stat::Health => "baseMaxHealth",
            Stat::Energy => "baseMaxEnergy",
            Stat::Food => "baseMaxFood",
            Stat::Warmth => "baseMaxWarmth",
            Stat::Breath => "baseMaxBreath",
        }
    }
}

/// Parts of the character's appearance under `identity`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Body,
    Emote,
    Hair,
    FacialHair,
    FacialMask,
}

impl Appearance {
    fn directives(self) -> &'static str {
        match self {
            Appearance::Body => "bodyDirectives",
            Appearance::Emote => "emoteDirectives",
            Appearance::Hair => "hairDirectives",
            Appearance::FacialHair => "facialHairDirectives",
            Appearance::FacialMask => "facialMaskDirectives",
        }
    }

    fn style(self) -> Option<(&'static str, &'static str)> {
        match self {
            Appearance::Hair => Some(("hairGroup", "hairType")),
            Appearance::FacialHair => Some(("facialHairGroup", "facialHairType")),
            Appearance::FacialMask => Some(("facialMaskGroup", "facialMaskType")),
            Appearance::Body | Appearance::Emote => None,
        }
    }
}

/// Armor slots in `inventory.equipment`. The cosmetic (glamor) item for a
/// slot is stored four positions after the main item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentSlot {
    Head = 0,
    Chest = 1,
    Legs = 2,
    Back = 3,
}

const GLAMOR_OFFSET: usize = 4;

/// Equipment index where tech items begin
const TECH_EQUIPMENT_START: usize = 8;

/// Item containers under `inventory`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bag {
    Main,
    Tile,
    ActionBar,
    Wieldable,
}

impl Bag {
    fn key(self) -> &'static str {
        match self {
            Bag::Main => "bag",
            Bag::Tile => "tileBag",
            Bag::ActionBar => "actionBar",
            Bag::Wieldable => "wieldable",
        }
    }
}

/// Creates an item descriptor as stored in bags and equipment slots
///
/// ```
/// use sbvj::{player::new_item, Variant, VariantMap};
/// let item = new_item("perfectlygenericitem", 3, VariantMap::new());
/// assert_eq!(item.get("count"), Some(&Variant::Integer(3)));
/// ```
pub fn new_item(name: &str, count: i64, data: VariantMap) -> Variant {
    let mut item = VariantMap::with_capacity(3);
    item.insert("name", name);
    item.insert("count", count);
    item.insert("data", data);
    Variant::Map(item)
}

/// A player save with typed accessors over its entity
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    save: SaveFile,
}

impl Player {
    pub fn new(save: SaveFile) -> Self {
        Player { save }
    }

    pub fn from_slice(data: &[u8]) -> Result<Player, Error> {
        SaveFile::from_slice(data).map(Player::new)
    }

    pub fn from_slice_with_options(data: &[u8], options: DecodeOptions) -> Result<Player, Error> {
        SaveFile::from_slice_with_options(data, options).map(Player::new)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Player, Error> {
        SaveFile::from_path(path).map(Player::new)
    }

    pub fn save(&self) -> &SaveFile {
        &self.save
    }

    pub fn save_mut(&mut self) -> &mut SaveFile {
        &mut self.save
    }

    pub fn into_save(self) -> SaveFile {
        self.save
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.save.to_bytes()
    }

    /// Looks up a value by its path from the entity root
    pub fn field(&self, path: &[&str]) -> Option<&Variant> {
        self.save.entity()?.pointer(path)
    }

    /// Sets a value by its path from the entity root. The parent of the
    /// final segment must already exist. List elements can only be replaced,
    /// not appended.
    pub fn set_field(&mut self, path: &[&str], value: Variant) -> Result<(), Error> {
        let missing = || missing_field(path);

        let entity = self.save.entity_mut().ok_or_else(missing)?;
        let (last, parents) = path.split_last().ok_or_else(missing)?;
        if parents.is_empty() {
            entity.insert(*last, value);
            return Ok(());
        }

        match entity.pointer_mut(parents).ok_or_else(missing)? {
            Variant::Map(map) => {
                map.insert(*last, value);
                Ok(())
            }
            Variant::List(list) => {
                let slot = match last.parse::<usize>() {
                    Ok(i) => list.get_mut(i),
                    Err(_) => None,
                };
                *slot.ok_or_else(missing)? = value;
                Ok(())
            }
            _ => Err(missing()),
        }
    }

    fn str_field(&self, path: &[&str]) -> Option<&str> {
        self.field(path).and_then(Variant::as_str)
    }

    fn f64_field(&self, path: &[&str]) -> Option<f64> {
        self.field(path).and_then(Variant::as_f64)
    }

    pub fn uuid(&self) -> Option<&str> {
        self.str_field(&["uuid"])
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field(&["identity", "name"])
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), Error> {
        self.set_field(&["identity", "name"], Variant::from(name))
    }

    pub fn species(&self) -> Option<&str> {
        self.str_field(&["identity", "species"])
    }

    /// Stores the species lower cased. An empty species is refused and the
    /// entity left untouched.
    pub fn set_species(&mut self, species: &str) -> Result<(), Error> {
        if species.is_empty() {
            log::warn!("refusing to save an empty species");
            return Ok(());
        }

        self.set_field(&["identity", "species"], Variant::from(species.to_lowercase()))
    }

    pub fn gender(&self) -> Option<&str> {
        self.str_field(&["identity", "gender"])
    }

    pub fn set_gender(&mut self, gender: &str) -> Result<(), Error> {
        self.set_field(&["identity", "gender"], Variant::from(gender.to_lowercase()))
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field(&["description"])
    }

    pub fn set_description(&mut self, description: &str) -> Result<(), Error> {
        self.set_field(&["description"], Variant::from(description))
    }

    /// Currency held by the player
    pub fn pixels(&self) -> Option<i64> {
        self.field(&["inventory", "money"]).and_then(Variant::as_i64)
    }

    pub fn set_pixels(&mut self, pixels: i64) -> Result<(), Error> {
        self.set_field(&["inventory", "money"], Variant::Integer(pixels))
    }

    /// Seconds played
    pub fn play_time(&self) -> Option<f64> {
        self.f64_field(&["playTime"])
    }

    pub fn set_play_time(&mut self, seconds: f64) -> Result<(), Error> {
        self.set_field(&["playTime"], Variant::Float(seconds))
    }

    pub fn mode_type(&self) -> Option<&str> {
        self.str_field(&["modeType"])
    }

    pub fn set_mode_type(&mut self, mode: &str) -> Result<(), Error> {
        self.set_field(&["modeType"], Variant::from(mode))
    }

    /// The current value and maximum of a stat
    pub fn stat(&self, stat: Stat) -> Option<(f64, f64)> {
        let value = self.f64_field(&["status", stat.schema(), "value"])?;
        let max = self.f64_field(&["status", stat.schema(), "max"])?;
        Some((value, max))
    }

    pub fn set_stat(&mut self, stat: Stat, value: f64, max: f64) -> Result<(), Error> {
        self.set_field(&["status", stat.schema(), "value"], Variant::Float(value))?;
        self.set_field(&["status", stat.schema(), "max"], Variant::Float(max))
    }

    pub fn base_max(&self, stat: Stat) -> Option<f64> {
        self.f64_field(&["statusParameters", stat.base_max()])
    }

    /// Sets the base maximum of a stat. Warmth and breath have no separate
    /// current maximum in play, so their status schema `max` is set as well.
    pub fn set_base_max(&mut self, stat: Stat, max: f64) -> Result<(), Error> {
        let schema_max = ["status", stat.schema(), "max"];
        let syncs_schema = matches!(stat, Stat::Warmth | Stat::Breath);
        if syncs_schema {
            self.require_map(&schema_max[..2])?;
        }
        self.require_map(&["statusParameters"])?;

        if syncs_schema {
            self.set_field(&schema_max, Variant::Float(max))?;
        }
        self.set_field(&["statusParameters", stat.base_max()], Variant::Float(max))
    }

    pub fn energy_regen(&self) -> Option<f64> {
        self.f64_field(&["statusParameters", "energyReplenishmentRate"])
    }

    pub fn set_energy_regen(&mut self, rate: f64) -> Result<(), Error> {
        self.set_field(
            &["statusParameters", "energyReplenishmentRate"],
            Variant::Float(rate),
        )
    }

    /// Decoded color directives of an appearance part
    pub fn directives(&self, part: Appearance) -> Option<ColorDirectives> {
        self.str_field(&["identity", part.directives()])
            .map(ColorDirectives::parse)
    }

    pub fn set_directives(
        &mut self,
        part: Appearance,
        directives: &ColorDirectives,
    ) -> Result<(), Error> {
        self.set_field(
            &["identity", part.directives()],
            Variant::String(directives.to_string()),
        )
    }

    /// The `(group, type)` of a hair style or mask. Only hair, facial hair,
    /// and facial masks have a style.
    pub fn style(&self, part: Appearance) -> Option<(&str, &str)> {
        let (group, kind) = part.style()?;
        let group = self.str_field(&["identity", group])?;
        let kind = self.str_field(&["identity", kind])?;
        Some((group, kind))
    }

    pub fn set_style(&mut self, part: Appearance, group: &str, kind: &str) -> Result<(), Error> {
        let (group_key, kind_key) = part.style().ok_or_else(|| {
            Error::new(ErrorKind::MissingField {
                path: format!("identity.{}", part.directives()),
            })
        })?;
        self.set_field(&["identity", group_key], Variant::from(group))?;
        self.set_field(&["identity", kind_key], Variant::from(kind))
    }

    pub fn personality(&self) -> Option<&str> {
        self.str_field(&["identity", "personalityIdle"])
    }

    /// The arm and body idle poses are kept in sync
    pub fn set_personality(&mut self, idle: &str) -> Result<(), Error> {
        self.set_field(&["identity", "personalityArmIdle"], Variant::from(idle))?;
        self.set_field(&["identity", "personalityIdle"], Variant::from(idle))
    }

    /// The main and glamor items of an equipment slot
    pub fn equipment(&self, slot: EquipmentSlot) -> Option<(&Variant, &Variant)> {
        let equipment = self.field(&["inventory", "equipment"])?.as_list()?;
        let index = slot as usize;
        Some((equipment.get(index)?, equipment.get(index + GLAMOR_OFFSET)?))
    }

    pub fn set_equipment(
        &mut self,
        slot: EquipmentSlot,
        main: Variant,
        glamor: Variant,
    ) -> Result<(), Error> {
        let index = slot as usize;
        self.require_equipment_index(index + GLAMOR_OFFSET)?;
        self.set_equipment_index(index, main)?;
        self.set_equipment_index(index + GLAMOR_OFFSET, glamor)
    }

    fn set_equipment_index(&mut self, index: usize, item: Variant) -> Result<(), Error> {
        let index = index.to_string();
        self.set_field(&["inventory", "equipment", &index], item)
    }

    /// Fails unless the equipment list reaches the given index
    fn require_equipment_index(&self, index: usize) -> Result<(), Error> {
        let len = self
            .field(&["inventory", "equipment"])
            .and_then(Variant::as_list)
            .map_or(0, Vec::len);
        if index < len {
            Ok(())
        } else {
            let index = index.to_string();
            Err(missing_field(&["inventory", "equipment", &index]))
        }
    }

    /// Fails unless the path leads to a map
    fn require_map(&self, path: &[&str]) -> Result<(), Error> {
        match self.field(path) {
            Some(Variant::Map(_)) => Ok(()),
            _ => Err(missing_field(path)),
        }
    }

    pub fn bag(&self, bag: Bag) -> Option<&Variant> {
        self.field(&["inventory", bag.key()])
    }

    pub fn set_bag(&mut self, bag: Bag, items: Variant) -> Result<(), Error> {
        self.set_field(&["inventory", bag.key()], items)
    }

    pub fn blueprints(&self) -> Option<&Variant> {
        self.field(&["blueprints"])
    }

    pub fn set_blueprints(&mut self, blueprints: Variant) -> Result<(), Error> {
        self.set_field(&["blueprints"], blueprints)
    }

    pub fn tech_modules(&self) -> Option<&Variant> {
        self.field(&["techController", "techModules"])
    }

    /// Techs must be both listed in the tech controller and equipped as items
    /// in the equipment slots after the armor to take effect.
    pub fn set_tech_modules(&mut self, techs: Variant, equipped: &[&str]) -> Result<(), Error> {
        self.require_map(&["techController"])?;
        if !equipped.is_empty() {
            self.require_equipment_index(TECH_EQUIPMENT_START + equipped.len() - 1)?;
        }

        for (i, tech) in equipped.iter().enumerate() {
            let item = new_item(tech, 1, VariantMap::new());
            self.set_equipment_index(TECH_EQUIPMENT_START + i, item)?;
        }

        self.set_field(&["techController", "techModules"], techs)
    }
}

fn missing_field(path: &[&str]) -> Error {
    Error::new(ErrorKind::MissingField {
        path: path.join("."),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map<const N: usize>(entries: [(&str, Variant); N]) -> Variant {
        Variant::Map(entries.into_iter().collect())
    }

    fn schema(value: f64, max: f64) -> Variant {
        map([("value", value.into()), ("max", max.into())])
    }

    fn player() -> Player {
        let identity = map([
            ("name", "Nova".into()),
            ("species", "human".into()),
            ("gender", "female".into()),
            ("bodyDirectives", "?replace;ffe2c5=ffc181".into()),
            ("hairGroup", "hair".into()),
            ("hairType", "male1".into()),
        ]);
        let equipment = Variant::List(vec![Variant::Null; 12]);
        let inventory = map([
            ("money", 150i64.into()),
            ("equipment", equipment),
            ("bag", Variant::List(Vec::new())),
        ]);
        let status = map([("healthSchema", schema(80.0, 100.0))]);
        let entity = [
            ("uuid", Variant::from("0123abcd")),
            ("identity", identity),
            ("inventory", inventory),
            ("status", status),
            ("statusParameters", map([("baseMaxHealth", 100.0.into())])),
            ("techController", map([("techModules", Variant::List(Vec::new()))])),
            ("playTime", 42.0.into()),
        ]
        .into_iter()
        .collect();
        Player::new(SaveFile::new("PlayerEntity", 1, entity))
    }

    #[test]
    fn test_identity() {
        let mut player = player();
        assert_eq!(player.uuid(), Some("0123abcd"));
        assert_eq!(player.name(), Some("Nova"));
        player.set_name("Vela").unwrap();
        player.set_species("Floran").unwrap();
        player.set_gender("MALE").unwrap();
        assert_eq!(player.name(), Some("Vela"));
        assert_eq!(player.species(), Some("floran"));
        assert_eq!(player.gender(), Some("male"));
    }

    #[test]
    fn test_empty_species_refused() {
        let mut player = player();
        player.set_species("").unwrap();
        assert_eq!(player.species(), Some("human"));
    }

    #[test]
    fn test_stats() {
        let mut player = player();
        assert_eq!(player.stat(Stat::Health), Some((80.0, 100.0)));
        assert_eq!(player.stat(Stat::Energy), None);
        player.set_stat(Stat::Health, 50.0, 120.0).unwrap();
        assert_eq!(player.stat(Stat::Health), Some((50.0, 120.0)));

        let err = player.set_stat(Stat::Energy, 1.0, 1.0).unwrap_err();
        match err.kind() {
            ErrorKind::MissingField { path } => assert_eq!(path, "status.energySchema.value"),
            x => panic!("unexpected error: {:?}", x),
        }

        player.set_base_max(Stat::Health, 150.0).unwrap();
        assert_eq!(player.base_max(Stat::Health), Some(150.0));
    }

    #[test]
    fn test_new_top_level_field() {
        let mut player = player();
        assert_eq!(player.description(), None);
        player.set_description("a wanderer").unwrap();
        assert_eq!(player.description(), Some("a wanderer"));
    }

    #[test]
    fn test_directives() {
        let mut player = player();
        let mut body = player.directives(Appearance::Body).unwrap();
        assert_eq!(body.replacement("ffe2c5"), Some("ffc181"));
        assert_eq!(player.directives(Appearance::Emote), None);

        body.groups_mut()[0].push(("d39c6c".to_string(), "d9a066".to_string()));
        player.set_directives(Appearance::Body, &body).unwrap();
        assert_eq!(
            player.field(&["identity", "bodyDirectives"]),
            Some(&Variant::from("?replace;ffe2c5=ffc181;d39c6c=d9a066"))
        );
    }

    #[test]
    fn test_style() {
        let mut player = player();
        assert_eq!(player.style(Appearance::Hair), Some(("hair", "male1")));
        assert_eq!(player.style(Appearance::Body), None);
        player.set_style(Appearance::FacialHair, "beard", "beard3").unwrap();
        assert_eq!(player.style(Appearance::FacialHair), Some(("beard", "beard3")));
        assert!(player.set_style(Appearance::Body, "a", "b").is_err());
    }

    #[test]
    fn test_equipment() {
        let mut player = player();
        let hat = new_item("hat", 1, VariantMap::new());
        let glasses = new_item("glasses", 1, VariantMap::new());
        player
            .set_equipment(EquipmentSlot::Head, hat.clone(), glasses.clone())
            .unwrap();
        assert_eq!(player.equipment(EquipmentSlot::Head), Some((&hat, &glasses)));
        assert_eq!(
            player.equipment(EquipmentSlot::Back),
            Some((&Variant::Null, &Variant::Null))
        );
    }

    #[test]
    fn test_tech_modules() {
        let mut player = player();
        let techs = Variant::List(vec![Variant::from("dash")]);
        player.set_tech_modules(techs.clone(), &["dash"]).unwrap();
        assert_eq!(player.tech_modules(), Some(&techs));
        let equipped = player.field(&["inventory", "equipment", "8"]).unwrap();
        assert_eq!(equipped.get("name"), Some(&Variant::from("dash")));

        let before = player.clone();
        let too_many = ["a", "b", "c", "d", "e"];
        let err = player.set_tech_modules(techs.clone(), &too_many).unwrap_err();
        match err.kind() {
            ErrorKind::MissingField { path } => assert_eq!(path, "inventory.equipment.12"),
            x => panic!("unexpected error: {:?}", x),
        }
        assert_eq!(player, before);

        player
            .save_mut()
            .entity_mut()
            .unwrap()
            .remove("techController");
        let before = player.clone();
        assert!(player.set_tech_modules(techs, &["dash"]).is_err());
        assert_eq!(player, before);
    }

    #[test]
    fn test_failed_equipment_leaves_slots_untouched() {
        let mut player = player();
        player
            .set_field(
                &["inventory", "equipment"],
                Variant::List(vec![Variant::Null; 5]),
            )
            .unwrap();

        let before = player.clone();
        let hat = new_item("hat", 1, VariantMap::new());
        let err = player
            .set_equipment(EquipmentSlot::Back, hat, Variant::Null)
            .unwrap_err();
        match err.kind() {
            ErrorKind::MissingField { path } => assert_eq!(path, "inventory.equipment.7"),
            x => panic!("unexpected error: {:?}", x),
        }
        assert_eq!(player, before);
        assert_eq!(player.field(&["inventory", "equipment", "3"]), Some(&Variant::Null));
    }

    #[test]
    fn test_base_max_syncs_warmth_and_breath_schemas() {
        let mut player = player();
        let status = player.save_mut().entity_mut().unwrap().get_mut("status").unwrap();
        let status = status.as_map_mut().unwrap();
        status.insert("warmthSchema", schema(10.0, 10.0));
        status.insert("breathSchema", schema(5.0, 5.0));

        player.set_base_max(Stat::Warmth, 20.0).unwrap();
        player.set_base_max(Stat::Breath, 8.0).unwrap();
        assert_eq!(player.stat(Stat::Warmth), Some((10.0, 20.0)));
        assert_eq!(player.base_max(Stat::Warmth), Some(20.0));
        assert_eq!(player.stat(Stat::Breath), Some((5.0, 8.0)));
        assert_eq!(player.base_max(Stat::Breath), Some(8.0));

        // health keeps its current maximum
        player.set_base_max(Stat::Health, 300.0).unwrap();
        assert_eq!(player.stat(Stat::Health), Some((80.0, 100.0)));
    }

    #[test]
    fn test_failed_base_max_leaves_schema_untouched() {
        let mut player = player();
        player
            .save_mut()
            .entity_mut()
            .unwrap()
            .remove("statusParameters");
        let status = player.save_mut().entity_mut().unwrap().get_mut("status").unwrap();
        status
            .as_map_mut()
            .unwrap()
            .insert("warmthSchema", schema(10.0, 10.0));

        let before = player.clone();
        assert!(player.set_base_max(Stat::Warmth, 20.0).is_err());
        assert_eq!(player, before);
        assert!(player.set_base_max(Stat::Breath, 20.0).is_err());
        assert_eq!(player, before);
    }

    #[test]
    fn test_pixels_and_bags() {
        let mut player = player();
        assert_eq!(player.pixels(), Some(150));
        player.set_pixels(9000).unwrap();
        assert_eq!(player.pixels(), Some(9000));

        let items = Variant::List(vec![new_item("torch", 5, VariantMap::new())]);
        player.set_bag(Bag::Main, items.clone()).unwrap();
        assert_eq!(player.bag(Bag::Main), Some(&items));
        assert_eq!(player.bag(Bag::Tile), None);
    }

    #[test]
    fn test_edits_survive_encoding() {
        let mut player = player();
        player.set_play_time(99.5).unwrap();
        let decoded = Player::from_slice(&player.to_bytes()).unwrap();
        assert_eq!(decoded.play_time(), Some(99.5));
        assert_eq!(decoded, player);
    }
}
