//! End-to-end command tests against temporary stores.

use predicates::prelude::*;

use crate::common::TestStore;

#[test]
fn test_list_empty_store() {
    let store = TestStore::new();
    store
        .glean(&["list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_add_and_list_sorted() {
    let store = TestStore::new();
    store.seed_gadget();
    store
        .glean(&["list"])
        .assert()
        .success()
        .stdout("Bolt\nGadget\nWidget\n");
}

#[test]
fn test_list_prefix_filter() {
    let store = TestStore::new();
    store.seed_gadget();
    store
        .glean(&["list", "--prefix", "G"])
        .assert()
        .success()
        .stdout("Gadget\n");
}

#[test]
fn test_show_composite_dependencies() {
    let store = TestStore::new();
    store.seed_gadget();
    store
        .glean(&["show", "Gadget"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bolt: 4").and(predicate::str::contains("Widget: 2")));
}

#[test]
fn test_show_unknown_suggests_similar() {
    let store = TestStore::new();
    store.seed_gadget();
    store
        .glean(&["show", "Wiget"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("resource 'Wiget' is not defined")
                .and(predicate::str::contains("Widget")),
        );
}

#[test]
fn test_bom_gadget_scenario() {
    let store = TestStore::new();
    store.seed_gadget();
    // 2 widgets * 3 bolts + 4 direct bolts = 10
    store
        .glean(&["bom", "Gadget", "1"])
        .assert()
        .success()
        .stdout("Bolt: 10\n");

    store
        .glean(&["bom", "Gadget", "5"])
        .assert()
        .success()
        .stdout("Bolt: 50\n");
}

#[test]
fn test_bom_defaults_to_one_unit() {
    let store = TestStore::new();
    store.seed_gadget();
    store
        .glean(&["bom", "Widget"])
        .assert()
        .success()
        .stdout("Bolt: 3\n");
}

#[test]
fn test_bom_rejects_malformed_quantity() {
    let store = TestStore::new();
    store.seed_gadget();
    store.glean(&["bom", "Gadget", "many"]).assert().failure();
}

#[test]
fn test_plan_gadget_ordering() {
    let store = TestStore::new();
    store.seed_gadget();
    // Bolt reaches level 2 through Widget, so it leads the plan
    store
        .glean(&["plan", "Gadget", "1"])
        .assert()
        .success()
        .stdout("Bolt: 10\nWidget: 2\nGadget: 1\n");
}

#[test]
fn test_bom_refuses_incomplete_closure() {
    let store = TestStore::new();
    store
        .glean(&["add", "Rig", "--dep", "Ghost=2"])
        .assert()
        .success();
    store
        .glean(&["bom", "Rig", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ghost"));
}

#[test]
fn test_missing_reports_closure_gaps() {
    let store = TestStore::new();
    // R -> X -> Y with only Y undefined
    store
        .glean(&["add", "X", "--dep", "Y=2"])
        .assert()
        .success();
    store
        .glean(&["add", "R", "--dep", "X=1"])
        .assert()
        .success();
    store
        .glean(&["missing", "R"])
        .assert()
        .success()
        .stdout("Y\n");

    store.glean(&["add", "Y", "--atomic"]).assert().success();
    store
        .glean(&["missing", "R"])
        .assert()
        .success()
        .stdout(predicate::str::contains("all dependencies of 'R' are defined"));
}

#[test]
fn test_rename_cascades_across_sessions() {
    let store = TestStore::new();
    store.seed_gadget();
    store
        .glean(&["rename", "Bolt", "Rivet"])
        .assert()
        .success();

    // New process, fresh registry: the cascade must be on disk
    store
        .glean(&["show", "Widget"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rivet: 3"));
    store
        .glean(&["show", "Bolt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not defined"));
    store
        .glean(&["bom", "Gadget", "1"])
        .assert()
        .success()
        .stdout("Rivet: 10\n");
}

#[test]
fn test_rename_onto_existing_name_fails() {
    let store = TestStore::new();
    store.seed_gadget();
    store
        .glean(&["rename", "Bolt", "Widget"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_remove_then_missing() {
    let store = TestStore::new();
    store.seed_gadget();
    store.glean(&["remove", "Bolt"]).assert().success();
    store
        .glean(&["missing", "Gadget"])
        .assert()
        .success()
        .stdout("Bolt\n");
}

#[test]
fn test_add_rejects_cycle() {
    let store = TestStore::new();
    store
        .glean(&["add", "Gear", "--dep", "Plate=1"])
        .assert()
        .success();
    store
        .glean(&["add", "Plate", "--dep", "Gear=2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("circular dependency"));

    // The rejected edit must not have been persisted
    store
        .glean(&["missing", "Gear"])
        .assert()
        .success()
        .stdout("Plate\n");
}

#[test]
fn test_check_clean_store() {
    let store = TestStore::new();
    store.seed_gadget();
    store
        .glean(&["check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no cycles detected across 3 resources"));
}

#[test]
fn test_check_order_lists_dependencies_first() {
    let store = TestStore::new();
    store.seed_gadget();
    let output = store.glean(&["check", "--order"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let position = |name: &str| stdout.lines().position(|line| line == name).unwrap();
    assert!(position("Bolt") < position("Widget"));
    assert!(position("Widget") < position("Gadget"));
}

#[test]
fn test_add_rejects_invalid_names() {
    let store = TestStore::new();
    store.glean(&["add", "a/b", "--atomic"]).assert().failure();
    store
        .glean(&["add", "Widget", "--dep", "Bolt=0"])
        .assert()
        .failure();
}

#[test]
fn test_add_replaces_existing_definition() {
    let store = TestStore::new();
    store.seed_gadget();
    store
        .glean(&["add", "Widget", "--dep", "Bolt=5"])
        .assert()
        .success();
    store
        .glean(&["bom", "Gadget", "1"])
        .assert()
        .success()
        .stdout("Bolt: 14\n");
}
