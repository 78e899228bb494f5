//! Loot Demo
//!
//! Loads item definitions from RON, compiles them into a database and plays
//! through the core inventory flows: stacking, overflow, permission checks,
//! property queries, and an embedded backpack inventory.

use satchel_core::{
    add_item_recursive, Inventory, InventoryPrefs, ItemInteraction, ItemQuery, NameQuery,
    QueryKind, RarityQuery, ValueQuery,
};
use satchel_content::Loader;
use satchel_db::{ItemCatalog, ItemDatabase};

const ITEMS: &str = r#"(
    items: [
        (
            name: "Health Potion",
            description: "Restores a little health",
            max_stack: 10,
            properties: [
                FixedValue((amount: 25)),
                Rarity((rarity: Common)),
            ],
        ),
        (
            name: "Gold Coin",
            max_stack: 0,
            properties: [
                FixedValue((amount: 1)),
            ],
        ),
        (
            name: "Engraved Saber",
            max_stack: 1,
            properties: [
                FixedValue((amount: 120)),
                ScalingValue((percent: 25)),
                Rarity((rarity: Rare)),
                Equipable((equipment: Some("models/saber"))),
                NameOverride((display_name: "Saber of the First Fleet")),
            ],
        ),
        (
            name: "Leather Backpack",
            max_stack: 1,
            properties: [
                Rarity((rarity: Unusual)),
                EmbeddedInventory((title: "Backpack", preferences: 0, slot_count: 4)),
            ],
        ),
    ],
)"#;

fn main() {
    env_logger::init();

    println!("=== Satchel Loot Demo ===\n");

    // Load authored definitions and compile them into a database
    let mut loader = Loader::new();
    loader.load_str(ITEMS).expect("demo items should parse");

    let mut database = ItemDatabase::new("base_");
    database
        .build(loader.into_library().into_items())
        .expect("demo database should build");

    let mut catalog = ItemCatalog::new();
    catalog.register(database);
    println!("Compiled {} item definitions\n", catalog.item_count());

    // A small belt inventory: potions stack, the saber takes its own slot
    let mut belt = Inventory::new(3).with_title("Belt");

    let mut potions = catalog
        .instantiate(&"base_0".into(), 15)
        .expect("potion id should resolve");
    belt.add_item(&mut potions, None);

    let mut saber = catalog
        .instantiate(&"base_2".into(), 1)
        .expect("saber id should resolve");
    belt.add_item(&mut saber, None);

    println!("Belt after stacking 15 potions and one saber:");
    for (index, slot) in belt.slots().iter().enumerate() {
        match slot.instance() {
            Some(instance) => {
                println!("  slot {}: {} x{}", index, instance.name(), instance.amount())
            }
            None => println!("  slot {}: empty", index),
        }
    }
    println!("  events: {:?}\n", belt.drain_events());

    // Query the saber for its resolved name, value, and rarity
    let saber = belt
        .slot(2)
        .and_then(|slot| slot.instance())
        .expect("saber should sit in slot 2");

    let mut interaction = ItemInteraction::new()
        .with_query(ItemQuery::Name(NameQuery::new(saber.name())))
        .with_query(ItemQuery::Value(ValueQuery::default()))
        .with_query(ItemQuery::Rarity(RarityQuery::default()));
    saber.query_properties(&mut interaction);

    if let Some(ItemQuery::Name(name)) = interaction.find(QueryKind::Name) {
        println!("Saber resolves to \"{}\"", name.name);
    }
    if let Some(ItemQuery::Value(value)) = interaction.find(QueryKind::Value) {
        println!("  value:  {}", value.value());
    }
    if let Some(ItemQuery::Rarity(rarity)) = interaction.find(QueryKind::Rarity) {
        println!("  rarity: {:?}\n", rarity.rarity);
    }

    // A one-slot chest holding a backpack: coins fall through into the
    // backpack's embedded inventory
    let mut chest = Inventory::new(1).with_title("Chest");
    let mut backpack = catalog
        .instantiate(&"base_3".into(), 1)
        .expect("backpack id should resolve");
    chest.add_item(&mut backpack, None);

    let mut coins = catalog
        .instantiate(&"base_1".into(), 250)
        .expect("coin id should resolve");
    let added = add_item_recursive(&mut chest, &mut coins, None);
    println!("Recursive add of 250 coins into the full chest: {}", added);

    if let Some(instance) = chest.slot_mut(0).and_then(|slot| slot.instance_mut()) {
        for inventory in instance.embedded_inventories_mut() {
            println!(
                "  \"{}\" now holds {} coin(s)",
                inventory.title,
                inventory.count_item(&"base_1".into())
            );
        }
    }

    // Auto-extending loot pile
    let mut pile = Inventory::new(0)
        .with_title("Loot Pile")
        .with_preferences(InventoryPrefs::AUTO_EXTEND | InventoryPrefs::DONT_STACK_ITEMS);
    let mut sabers = catalog
        .instantiate(&"base_2".into(), 3)
        .expect("saber id should resolve");
    pile.add_item(&mut sabers, None);
    println!(
        "\nLoot pile auto-extended to {} slots for 3 unstackable sabers",
        pile.slot_count()
    );
}
