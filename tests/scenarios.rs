use std::{fs, path::PathBuf};

use tractor::{
    catalog::CropId,
    clock::ManualClock,
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    world::WorldSnapshot,
};

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn scenario_loader_reads_fixture() {
    let scenario = scenario_loader()
        .load("scenarios/tiny_farm.yaml")
        .expect("scenario parses");
    assert_eq!(scenario.name, "tiny_farm");
    assert_eq!(scenario.seed, 42);
    assert_eq!(scenario.tick_rate_hz, 60.0);
    assert_eq!(scenario.ticks(None), 3000);
    assert_eq!(scenario.snapshot_interval_ticks, 600);
    assert_eq!(scenario.catalog().unwrap().len(), 6);
    assert_eq!(scenario.command_script().unwrap().len(), 5);
}

#[test]
fn custom_catalog_fixture_builds_world() {
    let scenario = scenario_loader()
        .load("scenarios/custom_crops.yaml")
        .expect("scenario parses");
    let world = scenario.build_world().unwrap();
    assert_eq!((world.grid().cols(), world.grid().rows()), (5, 1));
    assert_eq!(world.economy().coins(), 10);
    assert_eq!(world.fertilizer_cost(), 3);
    assert_eq!(world.player().selected, CropId::from("radish"));
    assert!(world.catalog().contains(&CropId::from("melon")));
}

#[test]
fn missing_scenario_reports_path() {
    let err = scenario_loader().load("scenarios/nope.yaml").unwrap_err();
    assert!(format!("{err:#}").contains("nope.yaml"));
}

#[test]
fn scripted_run_writes_periodic_snapshots() {
    let scenario = scenario_loader()
        .load("scenarios/tiny_farm.yaml")
        .expect("scenario parses");
    let snapshot_dir = tempfile::tempdir().unwrap();
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
        snapshot_interval_ticks: scenario.snapshot_interval_ticks,
        snapshot_dir: snapshot_dir.path().to_path_buf(),
    };
    let mut engine = EngineBuilder::new(settings)
        .with_clock(ManualClock::stepped(scenario.tick_secs()))
        .build();
    let mut world = scenario.build_world().unwrap();
    let script = scenario.command_script().unwrap();

    let summary = engine
        .run(&mut world, scenario.ticks(None), &script)
        .unwrap();
    assert!(summary.quit);
    assert_eq!(summary.ticks, 2401);
    // The single bean is either harvested or lost to a forager.
    assert_eq!(summary.harvested + summary.crops_lost, 1);

    let dir = snapshot_dir.path().join("tiny_farm");
    let mut files: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    let names: Vec<String> = files
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "tick_000600.json",
            "tick_001200.json",
            "tick_001800.json",
            "tick_002400.json"
        ]
    );

    let first: WorldSnapshot =
        serde_json::from_str(&fs::read_to_string(&files[0]).unwrap()).unwrap();
    assert_eq!(first.tick, 600);
    assert_eq!(first.selected_crop, CropId::from("bean"));
    assert_eq!(first.coins, 17);
    let planted = &first.cells[0];
    assert_eq!(planted.crop, Some(CropId::from("bean")));
    assert!(planted.fertilized);
}
