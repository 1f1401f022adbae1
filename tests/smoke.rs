use hivecraft_core::{block_hash, scoped_rng, BeeType, ItemType, SimTick};
use hivecraft_hives::block::{harvest, pick_item};
use hivecraft_hives::{apply_drop_tables_str, HiveRegistry, HiveState, HiveVariant};
use hivecraft_testkit::{JsonlSink, LootEventRecord};

const TABLES: &str = r#"{"hives":[
    {"hive":"jungle","drops":[
        {"species":"tropical","chance":1.0,"extras":[{"item":"silky_comb","count":2}]}
    ]}
]}"#;

#[test]
fn stored_hive_harvests_into_event_stream() {
    let registry = HiveRegistry::new();
    assert_eq!(apply_drop_tables_str(&registry, TABLES).expect("valid tables"), 1);

    let record = HiveState::new(HiveVariant::Jungle)
        .expect("jungle is lootable")
        .save()
        .expect("state saves");
    let state = HiveState::load(&record).expect("state loads");
    assert_eq!(pick_item(&state).item_type, ItemType::Hive(4));

    let tick = SimTick::ZERO.advance(1);
    let mut rng = scoped_rng(7, block_hash(10, 64, -3), tick);
    let stacks = harvest(&state, 0, &registry, &mut rng);
    assert_eq!(stacks.len(), 3);
    assert_eq!(stacks[0].item_type, ItemType::Bee(BeeType::Princess));
    assert_eq!(stacks[1].item_type, ItemType::Bee(BeeType::Drone));
    assert_eq!(stacks[2].count, 2);

    let mut sink = JsonlSink::create(std::env::temp_dir().join("hivecraft_smoke.jsonl"))
        .expect("can create temp log");
    sink.write(&LootEventRecord {
        tick,
        hive: "jungle",
        luck: 0,
        stacks: &stacks,
    })
    .expect("can write event");
}
