//! The simulated grid: an ECS world of blocks that implements [`GridHost`].
//!
//! Discovery is a typed query per capability component, filtered by block
//! name, so asking for panels returns panel entities and nothing else.
//! Results are ordered by entity id, i.e. by the order blocks were added.

use hecs::{Entity, EntityBuilder, World};
use invtrack_logic::config::InventorySelection;
use invtrack_logic::host::GridHost;
use invtrack_logic::item::ItemRecord;
use serde::{Deserialize, Serialize};

use crate::components::*;

/// Handle to one inventory slot of one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InventoryRef {
    pub entity: Entity,
    pub index: usize,
}

/// One block with all its components, as optionals.
///
/// Used for JSON fixtures and binary snapshots alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub block: Block,
    #[serde(default)]
    pub inventories: Option<Inventories>,
    #[serde(default)]
    pub panel: Option<TextPanel>,
    #[serde(default)]
    pub assembler: Option<Assembler>,
    #[serde(default)]
    pub program: Option<ProgrammableBlock>,
}

impl BlockRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            block: Block::new(name),
            inventories: None,
            panel: None,
            assembler: None,
            program: None,
        }
    }
}

/// A grid of blocks plus the programmable block the manager runs on
pub struct Grid {
    pub world: World,
    pub name: String,
    program: Entity,
}

impl Grid {
    /// Create a grid holding only its programmable block
    pub fn new(name: impl Into<String>) -> Self {
        let mut world = World::new();
        let program = world.spawn((
            Block::new("Programmable Block"),
            ProgrammableBlock::default(),
        ));
        Self {
            world,
            name: name.into(),
            program,
        }
    }

    /// Rebuild a grid from block records.
    ///
    /// The first record carrying a programmable block becomes the grid's
    /// program; if there is none, a blank one is added.
    pub fn from_records(name: impl Into<String>, records: Vec<BlockRecord>) -> Self {
        let mut world = World::new();
        let mut program = None;

        for record in records {
            let mut builder = EntityBuilder::new();
            builder.add(record.block);
            if let Some(c) = record.inventories {
                builder.add(c);
            }
            if let Some(c) = record.panel {
                builder.add(c);
            }
            if let Some(c) = record.assembler {
                builder.add(c);
            }
            let is_program = record.program.is_some();
            if let Some(c) = record.program {
                builder.add(c);
            }

            let entity = world.spawn(builder.build());
            if is_program && program.is_none() {
                program = Some(entity);
            }
        }

        let program = program.unwrap_or_else(|| {
            world.spawn((
                Block::new("Programmable Block"),
                ProgrammableBlock::default(),
            ))
        });

        Self {
            world,
            name: name.into(),
            program,
        }
    }

    /// Extract every block into records, in entity order
    pub fn to_records(&self) -> Vec<BlockRecord> {
        let mut entities: Vec<Entity> = self.world.iter().map(|e| e.entity()).collect();
        entities.sort_by_key(|e| e.id());

        entities
            .into_iter()
            .filter_map(|entity| {
                let block = self.world.get::<&Block>(entity).ok()?;
                Some(BlockRecord {
                    block: (*block).clone(),
                    inventories: self.component::<Inventories>(entity),
                    panel: self.component::<TextPanel>(entity),
                    assembler: self.component::<Assembler>(entity),
                    program: self.component::<ProgrammableBlock>(entity),
                })
            })
            .collect()
    }

    fn component<C: hecs::Component + Clone>(&self, entity: Entity) -> Option<C> {
        self.world.get::<&C>(entity).ok().map(|c| (*c).clone())
    }

    pub fn with_own_config(mut self, text: impl Into<String>) -> Self {
        self.set_own_config(text);
        self
    }

    /// Replace the programmable block's custom data (quota declarations)
    pub fn set_own_config(&mut self, text: impl Into<String>) {
        if let Ok(mut pb) = self.world.get::<&mut ProgrammableBlock>(self.program) {
            pb.custom_data = text.into();
        }
    }

    /// Add a plain block with no capabilities
    pub fn add_block(&mut self, name: impl Into<String>) -> Entity {
        self.world.spawn((Block::new(name),))
    }

    /// Add a storage block with `inventory_count` empty inventories
    pub fn add_container(&mut self, name: impl Into<String>, inventory_count: usize) -> Entity {
        self.world
            .spawn((Block::new(name), Inventories::empty(inventory_count)))
    }

    /// Add a text panel
    pub fn add_panel(
        &mut self,
        name: impl Into<String>,
        title: impl Into<String>,
        custom_data: impl Into<String>,
    ) -> Entity {
        self.world
            .spawn((Block::new(name), TextPanel::new(title, custom_data)))
    }

    /// Add an assembler (input and output inventories)
    pub fn add_assembler(&mut self, name: impl Into<String>) -> Entity {
        self.world.spawn((
            Block::new(name),
            Assembler::default(),
            Inventories::empty(2),
        ))
    }

    /// Put a stack into one of a block's inventories.
    ///
    /// Returns false if the block or inventory slot does not exist.
    pub fn put_items(&mut self, entity: Entity, index: usize, item: ItemRecord) -> bool {
        match self.world.get::<&mut Inventories>(entity) {
            Ok(mut inventories) => match inventories.0.get_mut(index) {
                Some(inventory) => {
                    inventory.add(item);
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    /// Take up to `amount` of an item out of an inventory, returning what was taken
    pub fn take_items(
        &mut self,
        entity: Entity,
        index: usize,
        subtype: &str,
        type_name: &str,
        amount: f64,
    ) -> f64 {
        self.world
            .get::<&mut Inventories>(entity)
            .ok()
            .and_then(|mut inventories| {
                inventories
                    .0
                    .get_mut(index)
                    .map(|inv| inv.remove(subtype, type_name, amount))
            })
            .unwrap_or(0.0)
    }

    /// Empty one inventory
    pub fn clear_inventory(&mut self, entity: Entity, index: usize) {
        if let Ok(mut inventories) = self.world.get::<&mut Inventories>(entity) {
            if let Some(inventory) = inventories.0.get_mut(index) {
                inventory.items.clear();
            }
        }
    }

    /// Change a panel's custom data
    pub fn set_panel_config(&mut self, entity: Entity, custom_data: impl Into<String>) {
        if let Ok(mut panel) = self.world.get::<&mut TextPanel>(entity) {
            panel.custom_data = custom_data.into();
        }
    }

    /// Current public text of a panel
    pub fn panel_text(&self, entity: Entity) -> Option<String> {
        self.world
            .get::<&TextPanel>(entity)
            .ok()
            .map(|p| p.public_text.clone())
    }

    /// Whether a panel is showing its public text
    pub fn panel_shows_text(&self, entity: Entity) -> bool {
        self.world
            .get::<&TextPanel>(entity)
            .map(|p| p.show_public_text)
            .unwrap_or(false)
    }

    /// Everything the script has echoed so far
    pub fn echo(&self) -> Vec<String> {
        self.world
            .get::<&ProgrammableBlock>(self.program)
            .map(|pb| pb.echo.clone())
            .unwrap_or_default()
    }

    pub fn clear_echo(&mut self) {
        if let Ok(mut pb) = self.world.get::<&mut ProgrammableBlock>(self.program) {
            pb.echo.clear();
        }
    }

    pub fn block_count(&self) -> usize {
        self.world.query::<&Block>().iter().count()
    }

    /// Entities carrying capability `C` whose block name passes `filter`,
    /// in entity order
    fn discover<C: hecs::Component>(&self, filter: impl Fn(&Block) -> bool) -> Vec<Entity> {
        let mut found: Vec<Entity> = self
            .world
            .query::<(&Block, &C)>()
            .iter()
            .filter(|(_, (block, _))| filter(*block))
            .map(|(entity, _)| entity)
            .collect();
        found.sort_by_key(|e| e.id());
        found
    }
}

impl GridHost for Grid {
    type Inventory = InventoryRef;
    type Panel = Entity;
    type Assembler = Entity;

    fn inventories(&self, selection: &InventorySelection) -> Vec<InventoryRef> {
        self.discover::<Inventories>(|block| selection.matches(&block.name))
            .into_iter()
            .flat_map(|entity| {
                let count = self
                    .world
                    .get::<&Inventories>(entity)
                    .map(|inv| inv.count())
                    .unwrap_or(0);
                (0..count).map(move |index| InventoryRef { entity, index })
            })
            .collect()
    }

    fn stacks(&self, inventory: InventoryRef) -> Vec<ItemRecord> {
        self.world
            .get::<&Inventories>(inventory.entity)
            .ok()
            .and_then(|inv| inv.0.get(inventory.index).map(|i| i.items.clone()))
            .unwrap_or_default()
    }

    fn panels(&self, tag: &str) -> Vec<Entity> {
        self.discover::<TextPanel>(|block| block.has_tag(tag))
    }

    fn panel_title(&self, panel: Entity) -> String {
        self.world
            .get::<&TextPanel>(panel)
            .map(|p| p.title.clone())
            .unwrap_or_default()
    }

    fn panel_config(&self, panel: Entity) -> String {
        self.world
            .get::<&TextPanel>(panel)
            .map(|p| p.custom_data.clone())
            .unwrap_or_default()
    }

    fn show_text(&mut self, panel: Entity) {
        if let Ok(mut p) = self.world.get::<&mut TextPanel>(panel) {
            p.show_public_text = true;
        }
    }

    fn write_panel_text(&mut self, panel: Entity, text: &str) {
        if let Ok(mut p) = self.world.get::<&mut TextPanel>(panel) {
            p.public_text = text.to_string();
        }
    }

    fn assemblers(&self, tag: &str) -> Vec<Entity> {
        self.discover::<Assembler>(|block| block.has_tag(tag))
    }

    fn all_assemblers(&self) -> Vec<Entity> {
        self.discover::<Assembler>(|_| true)
    }

    fn own_config(&self) -> String {
        self.world
            .get::<&ProgrammableBlock>(self.program)
            .map(|pb| pb.custom_data.clone())
            .unwrap_or_default()
    }

    fn report(&mut self, message: &str) {
        log::info!("[{}] {}", self.name, message);
        if let Ok(mut pb) = self.world.get::<&mut ProgrammableBlock>(self.program) {
            pb.echo.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ore(subtype: &str, amount: f64) -> ItemRecord {
        ItemRecord::new(subtype, "MyObjectBuilder_Ore", amount)
    }

    #[test]
    fn test_new_grid_has_program_block() {
        let grid = Grid::new("Test");
        assert_eq!(grid.block_count(), 1);
        assert!(grid.echo().is_empty());
        assert_eq!(grid.own_config(), "");
    }

    #[test]
    fn test_tagged_inventory_discovery() {
        let mut grid = Grid::new("Test");
        let tagged = grid.add_container("Cargo [STO]", 1);
        let _untagged = grid.add_container("Cargo", 1);
        let refinery = grid.add_container("Refinery [STO]", 2);
        grid.add_block("Light [STO]");

        let found = grid.inventories(&InventorySelection::Tagged("[STO]".into()));
        assert_eq!(
            found,
            vec![
                InventoryRef { entity: tagged, index: 0 },
                InventoryRef { entity: refinery, index: 0 },
                InventoryRef { entity: refinery, index: 1 },
            ]
        );
        assert_eq!(grid.inventories(&InventorySelection::All).len(), 4);
    }

    #[test]
    fn test_assembler_inventories_count_when_tracking_all() {
        let mut grid = Grid::new("Test");
        grid.add_assembler("Assembler");
        assert_eq!(grid.inventories(&InventorySelection::All).len(), 2);
        assert!(grid
            .inventories(&InventorySelection::Tagged("[STO]".into()))
            .is_empty());
    }

    #[test]
    fn test_put_and_read_stacks() {
        let mut grid = Grid::new("Test");
        let cargo = grid.add_container("Cargo [STO]", 1);
        assert!(grid.put_items(cargo, 0, ore("Iron", 10.0)));
        assert!(grid.put_items(cargo, 0, ore("Iron", 5.0)));
        assert!(!grid.put_items(cargo, 1, ore("Iron", 5.0)));

        let stacks = grid.stacks(InventoryRef { entity: cargo, index: 0 });
        assert_eq!(stacks, vec![ore("Iron", 15.0)]);

        assert_eq!(grid.take_items(cargo, 0, "Iron", "MyObjectBuilder_Ore", 20.0), 15.0);
        grid.clear_inventory(cargo, 0);
        assert!(grid.stacks(InventoryRef { entity: cargo, index: 0 }).is_empty());
    }

    #[test]
    fn test_put_into_block_without_inventory() {
        let mut grid = Grid::new("Test");
        let light = grid.add_block("Light");
        assert!(!grid.put_items(light, 0, ore("Iron", 1.0)));
    }

    #[test]
    fn test_panel_io() {
        let mut grid = Grid::new("Test");
        let lcd = grid.add_panel("LCD [PNL]", "Stock", "TrackAll");
        grid.add_panel("LCD", "Other", "");

        assert_eq!(grid.panels("[PNL]"), vec![lcd]);
        assert_eq!(grid.panel_title(lcd), "Stock");
        assert_eq!(grid.panel_config(lcd), "TrackAll");
        assert!(!grid.panel_shows_text(lcd));

        grid.show_text(lcd);
        grid.write_panel_text(lcd, "Stock\n");
        assert!(grid.panel_shows_text(lcd));
        assert_eq!(grid.panel_text(lcd).as_deref(), Some("Stock\n"));
    }

    #[test]
    fn test_assembler_discovery_is_typed() {
        let mut grid = Grid::new("Test");
        // Tagged, but not an assembler
        grid.add_container("Cargo [ASM]", 1);
        let a1 = grid.add_assembler("Assembler 1");
        let a2 = grid.add_assembler("Assembler 2 [ASM]");

        assert_eq!(grid.assemblers("[ASM]"), vec![a2]);
        assert_eq!(grid.all_assemblers(), vec![a1, a2]);
    }

    #[test]
    fn test_report_goes_to_echo() {
        let mut grid = Grid::new("Test");
        grid.report("hello");
        grid.report("world");
        assert_eq!(grid.echo(), vec!["hello".to_string(), "world".to_string()]);
        grid.clear_echo();
        assert!(grid.echo().is_empty());
    }

    #[test]
    fn test_records_round_trip() {
        let mut grid = Grid::new("Test").with_own_config("Gold 5");
        let cargo = grid.add_container("Cargo [STO]", 1);
        grid.put_items(cargo, 0, ore("Iron", 3.0));
        grid.add_panel("LCD [PNL]", "Stock", "Iron Ore");
        grid.add_assembler("Assembler [ASM]");

        let records = grid.to_records();
        assert_eq!(records.len(), 4);

        let rebuilt = Grid::from_records("Copy", records.clone());
        assert_eq!(rebuilt.to_records(), records);
        assert_eq!(rebuilt.own_config(), "Gold 5");
    }

    #[test]
    fn test_from_records_without_program_adds_one() {
        let grid = Grid::from_records("Bare", vec![BlockRecord::new("Cargo [STO]")]);
        assert_eq!(grid.block_count(), 2);
        assert_eq!(grid.own_config(), "");
    }
}
