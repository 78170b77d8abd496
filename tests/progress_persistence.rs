use std::fs;
use std::path::Path;

use kanapop::config::Config;
use kanapop::engine::{Difficulty, RoundEngine};
use kanapop::kana::Variant;
use kanapop::store::progress::STORAGE_KEY;
use kanapop::store::schema::ExportData;
use kanapop::store::{FileStorage, MistakeLedger, ProgressStore};
use tempfile::TempDir;

fn open_engine(dir: &Path, variant: Variant) -> RoundEngine<FileStorage> {
    let storage = FileStorage::with_base_dir(dir.to_path_buf()).unwrap();
    let config = Config {
        variant,
        difficulty: Difficulty::Easy,
        data_dir: dir.to_string_lossy().to_string(),
        ..Config::default()
    };
    RoundEngine::new(ProgressStore::open(storage), &config).with_seed(99)
}

fn read_document(dir: &Path) -> serde_json::Value {
    let path = dir.join(format!("{STORAGE_KEY}.json"));
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn mistakes_survive_restart() {
    let dir = TempDir::new().unwrap();
    let wrong = {
        let mut engine = open_engine(dir.path(), Variant::Katakana);
        engine.start_round();
        let wrong = engine.round().unwrap().distractors().next().unwrap();
        engine.choose(wrong);
        engine.choose(wrong);
        wrong
    };

    let engine = open_engine(dir.path(), Variant::Katakana);
    assert_eq!(engine.store().mistakes(Variant::Katakana, wrong), 2);
    assert_eq!(engine.store().ledger().total(Variant::Hiragana), 0);
}

#[test]
fn document_is_keyed_by_variant_then_glyph() {
    let dir = TempDir::new().unwrap();
    let mut engine = open_engine(dir.path(), Variant::Hiragana);
    engine.start_round();
    let wrong = engine.round().unwrap().distractors().next().unwrap();
    engine.choose(wrong);

    let doc = read_document(dir.path());
    assert_eq!(doc["hiragana"][wrong], 1);
    assert_eq!(doc["katakana"]["ア"], 0);
    assert_eq!(doc["hiragana"].as_object().unwrap().len(), 104);
}

#[test]
fn corrupt_document_starts_fresh_and_is_overwritten() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(format!("{STORAGE_KEY}.json")), "{\"hiragana\": [").unwrap();

    let mut engine = open_engine(dir.path(), Variant::Hiragana);
    assert_eq!(engine.store().ledger(), &MistakeLedger::zeroed());

    engine.start_round();
    let wrong = engine.round().unwrap().distractors().next().unwrap();
    engine.choose(wrong);
    assert_eq!(read_document(dir.path())["hiragana"][wrong], 1);
}

#[test]
fn mistakes_outlive_disabled_subsets() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::with_base_dir(dir.path().to_path_buf()).unwrap();
    let mut store = ProgressStore::open(storage);
    store.record_mistake(Variant::Hiragana, "ぴょ");

    // basic only: the combination glyph is not active but its count is kept
    let engine = open_engine(dir.path(), Variant::Hiragana);
    assert!(!engine.active_inventory().contains_key("pyo"));
    assert_eq!(engine.store().mistakes(Variant::Hiragana, "ぴょ"), 1);
}

#[test]
fn reset_then_load_is_zero() {
    let dir = TempDir::new().unwrap();
    let mut engine = open_engine(dir.path(), Variant::Hiragana);
    engine.start_round();
    let wrong = engine.round().unwrap().distractors().next().unwrap();
    engine.choose(wrong);
    engine.reset_progress();

    assert_eq!(engine.store().load(), MistakeLedger::zeroed());
    let reopened = open_engine(dir.path(), Variant::Hiragana);
    assert_eq!(reopened.store().ledger(), &MistakeLedger::zeroed());
}

#[test]
fn export_then_import_into_new_device() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();
    let export_path = source_dir.path().join("export.json");

    let mut source = open_engine(source_dir.path(), Variant::Katakana);
    source.start_round();
    let wrong = source.round().unwrap().distractors().next().unwrap();
    source.choose(wrong);
    let config = Config::default();
    source.store().export(&config).save_to(&export_path).unwrap();

    let data = ExportData::load_from(&export_path).unwrap();
    let mut target = open_engine(target_dir.path(), Variant::Katakana);
    target.store_mut().import(data).unwrap();
    assert_eq!(target.store().mistakes(Variant::Katakana, wrong), 1);

    let reopened = open_engine(target_dir.path(), Variant::Katakana);
    assert_eq!(reopened.store().mistakes(Variant::Katakana, wrong), 1);
}

#[test]
fn huge_saved_counts_still_play() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(format!("{STORAGE_KEY}.json")),
        format!("{{\"hiragana\":{{\"あ\":{},\"い\":{}}}}}", u32::MAX, u32::MAX - 1),
    )
    .unwrap();

    let mut engine = open_engine(dir.path(), Variant::Hiragana);
    assert_eq!(engine.store().mistakes(Variant::Hiragana, "あ"), u32::MAX);

    for _ in 0..20 {
        engine.start_round();
        let round = engine.round().unwrap();
        assert_eq!(round.bubbles.len(), 6);
        let unique: std::collections::BTreeSet<_> = round.bubbles.iter().collect();
        assert_eq!(unique.len(), 6);
    }

    let wrong = engine.round().unwrap().distractors().next().unwrap();
    engine.choose(wrong);
    assert_eq!(read_document(dir.path())["hiragana"]["あ"], u32::MAX);
}
