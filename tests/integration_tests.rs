#![cfg(feature = "cli")]

use dwarf_giant::core::pipeline::{CSV_OUTPUT_FILE, JSON_OUTPUT_FILE};
use dwarf_giant::{CliConfig, EtlEngine, LocalStorage, Pair, PairingError, PairingPipeline};
use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;

fn cli_config(data_path: &Path, output_path: &Path) -> CliConfig {
    CliConfig {
        data_path: data_path.to_string_lossy().to_string(),
        output_path: output_path.to_string_lossy().to_string(),
        output_formats: vec![],
        sequential: false,
        workers: Some(2),
        seed: Some(1234),
        strict: false,
        json: false,
        verbose: false,
        monitor: false,
    }
}

fn write_data(dir: &TempDir, value: serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("data.json");
    std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();
    path
}

#[tokio::test]
async fn test_end_to_end_sequential_run_writes_files() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = write_data(
        &temp_dir,
        serde_json::json!([
            {"name": "Thorin", "height": 1.4},
            {"name": "Fili", "height": 1.3},
            {"name": "Thorin", "height": 1.4},
            {"height": 1.3, "name": "Fili"},
            {"name": "Beorn", "height": 2.6}
        ]),
    );
    let output_path = temp_dir.path().join("out");

    let mut config = cli_config(&data_path, &output_path);
    config.sequential = true;
    config.output_formats = vec!["json".to_string(), "csv".to_string()];

    let pipeline = PairingPipeline::new(LocalStorage::default(), config).unwrap();
    let engine = EtlEngine::new_with_monitoring(pipeline, true);
    let (output, result) = engine.run_with_result().await.unwrap();

    assert_eq!(output, output_path.to_string_lossy());
    assert_eq!(result.sanitized_records, 3);
    assert_eq!(result.chunk_count, 1);
    assert_eq!(result.pairs.len(), 3);

    let written: Vec<Pair> =
        serde_json::from_slice(&std::fs::read(output_path.join(JSON_OUTPUT_FILE)).unwrap())
            .unwrap();
    assert_eq!(written, result.pairs);

    let csv = std::fs::read_to_string(output_path.join(CSV_OUTPUT_FILE)).unwrap();
    assert!(csv.starts_with("dwarf,giant\n"));
    assert_eq!(csv.lines().count(), 4);
}

#[tokio::test]
async fn test_end_to_end_missing_file_gives_no_pairs() {
    let temp_dir = TempDir::new().unwrap();
    let config = cli_config(&temp_dir.path().join("absent.json"), temp_dir.path());

    let pipeline = PairingPipeline::new(LocalStorage::default(), config).unwrap();
    let engine = EtlEngine::new(pipeline);
    let (output, result) = engine.run_with_result().await.unwrap();

    assert_eq!(output, "stdout");
    assert!(result.pairs.is_empty());
}

#[tokio::test]
async fn test_end_to_end_missing_file_fails_when_strict() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = cli_config(&temp_dir.path().join("absent.json"), temp_dir.path());
    config.strict = true;

    let pipeline = PairingPipeline::new(LocalStorage::default(), config).unwrap();
    let err = EtlEngine::new(pipeline).run().await.unwrap_err();
    assert!(matches!(err, PairingError::DataSourceError { .. }));
}

#[tokio::test]
async fn test_end_to_end_malformed_records_give_no_pairs() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = write_data(
        &temp_dir,
        serde_json::json!([{"name": "Bilbo"}, {"name": "Frodo", "rings": [1]}]),
    );

    let config = cli_config(&data_path, temp_dir.path());
    let pipeline = PairingPipeline::new(LocalStorage::default(), config).unwrap();
    let (_, result) = EtlEngine::new(pipeline).run_with_result().await.unwrap();

    assert_eq!(result.sanitized_records, 0);
    assert!(result.pairs.is_empty());
}

#[tokio::test]
async fn test_end_to_end_concurrent_run_covers_every_record() {
    let temp_dir = TempDir::new().unwrap();
    let records: Vec<serde_json::Value> = (0..40)
        .map(|i| serde_json::json!({"name": format!("giant-{i}"), "id": i}))
        .collect();
    let data_path = write_data(&temp_dir, serde_json::Value::Array(records));

    let mut config = cli_config(&data_path, temp_dir.path());
    config.workers = Some(4);

    let pipeline = PairingPipeline::new(LocalStorage::default(), config).unwrap();
    let (_, result) = EtlEngine::new(pipeline).run_with_result().await.unwrap();

    assert_eq!(result.chunk_count, 4);
    assert_eq!(result.pairs.len(), 40);

    let dwarfs: HashSet<&str> = result.pairs.iter().map(|p| p.dwarf.as_str()).collect();
    let giants: HashSet<&str> = result.pairs.iter().map(|p| p.giant.as_str()).collect();
    assert_eq!(dwarfs.len(), 40);
    assert_eq!(dwarfs, giants);
}

#[tokio::test]
async fn test_same_seed_same_output() {
    let temp_dir = TempDir::new().unwrap();
    let records: Vec<serde_json::Value> = (0..12)
        .map(|i| serde_json::json!({"name": format!("dwarf-{i}")}))
        .collect();
    let data_path = write_data(&temp_dir, serde_json::Value::Array(records));

    let mut config = cli_config(&data_path, temp_dir.path());
    config.sequential = true;

    let first = PairingPipeline::new(LocalStorage::default(), config.clone()).unwrap();
    let second = PairingPipeline::new(LocalStorage::default(), config).unwrap();

    let (_, a) = EtlEngine::new(first).run_with_result().await.unwrap();
    let (_, b) = EtlEngine::new(second).run_with_result().await.unwrap();
    assert_eq!(a.pairs.len(), 12);
    assert_eq!(a.pairs, b.pairs);
}
