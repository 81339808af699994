//! JS API tests, run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use island_graph_wasm::IslandSimulationWasm;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const STATIC: u8 = 0;
const DYNAMIC: u8 = 2;
const SLEEPING: u8 = 3;

#[wasm_bindgen_test]
fn test_islands_from_js() {
    let mut sim = IslandSimulationWasm::new();
    let ground = sim.add_particle(STATIC).unwrap();
    let a = sim.add_particle(DYNAMIC).unwrap();
    let b = sim.add_particle(DYNAMIC).unwrap();

    assert!(sim.add_constraint(0, 0, Some(ground), Some(a), false));
    assert!(sim.add_constraint(1, 0, Some(a), Some(b), false));
    assert!(!sim.add_constraint(2, 0, Some(ground), None, false));
    sim.update_islands();

    assert_eq!(sim.island_count(), 1);
    let island = sim.get_particle_island(a).unwrap() as usize;
    assert_eq!(sim.get_island_particles(island), vec![a, b]);
    assert_eq!(sim.get_island_constraints(island), vec![0, 1]);

    sim.compute_levels(0);
    assert_eq!(sim.edge_levels(&[0, 1, 7]).to_vec(), vec![0, 1, -1]);
}

#[wasm_bindgen_test]
fn test_sleep_from_js() {
    let mut sim = IslandSimulationWasm::new();
    let a = sim.add_particle(DYNAMIC).unwrap();
    sim.update_islands();

    for _ in 0..4 {
        sim.sleep_inactive();
    }
    assert!(sim.is_island_sleeping(0));
    assert_eq!(sim.get_particle_state(a), Some(SLEEPING));

    assert!(sim.wake_island(0));
    assert_eq!(sim.get_particle_state(a), Some(DYNAMIC));
}

#[wasm_bindgen_test]
fn test_config_and_materials_from_js() {
    let config = js_sys::JSON::parse(r#"{"minColorEdges": 1, "defaultSleep": {"counterThreshold": 2}}"#).unwrap();
    let mut sim = IslandSimulationWasm::with_config(config).unwrap();

    let material = js_sys::JSON::parse(r#"{"neverSleep": true}"#).unwrap();
    sim.set_material(3, material).unwrap();
    assert!(sim.set_material(4, JsValue::from_str("oops")).is_err());

    let a = sim.add_particle(DYNAMIC).unwrap();
    sim.set_particle_material(a, Some(3));
    sim.update_islands();
    for _ in 0..5 {
        assert_eq!(sim.sleep_inactive(), 0);
    }

    let summaries = sim.island_summaries().unwrap();
    assert!(js_sys::Array::is_array(&summaries));
}
