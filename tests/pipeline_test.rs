//! End-to-end exercise of the upload pipeline: parse a CSV, profile it,
//! compute metrics, aggregate categories, and render every chart kind.

use std::net::SocketAddr;

use tank_services::config::Config;
use tank_services::services::analytics::{
    compute, describe, top_counts, top_sums, MAX_COUNT_BUCKETS, MAX_SUM_BUCKETS,
};
use tank_services::services::charts::{self, ChartKind, ChartSpec, FIGURE_HEIGHT, FIGURE_WIDTH};
use tank_services::services::storage;
use tank_services::services::table::read_table;

const TELEMETRY_CSV: &str = "\
tank_id,site,oxygen_mg_l,temperature_c,note
T-01,north,7.2,12.5,ok
T-02,north,6.9,12.8,
T-03,south,n/a,13.1,low reading
T-01,north,7.4,12.4,ok
T-04,east,8.1,11.9,calibrated
";

fn test_config(data_dir: &std::path::Path) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse::<SocketAddr>().unwrap(),
        data_dir: data_dir.to_path_buf(),
        max_file_size: 1024 * 1024,
        preview_rows: 10,
        demo_users: Vec::new(),
    }
}

#[test]
fn csv_to_description_to_metrics() {
    let table = read_table(TELEMETRY_CSV.as_bytes()).unwrap();
    assert_eq!(table.row_count(), 5);
    assert_eq!(
        table.column_names(),
        ["tank_id", "site", "oxygen_mg_l", "temperature_c", "note"]
    );

    let description = describe(&table, "telemetry.csv", "uploads/telemetry.csv", 10);
    assert_eq!(description.row_count, 5);
    assert_eq!(description.preview_rows.len(), 5);
    // oxygen has an n/a cell but no malformed ones, so it stays numeric.
    assert_eq!(description.numeric_columns, ["oxygen_mg_l", "temperature_c"]);
    assert!(description.errors.is_empty());

    let summary = compute(&table);
    assert_eq!(summary.row_count, 5);
    let oxygen = summary.stats("oxygen_mg_l").unwrap();
    assert_eq!(oxygen.min, Some(6.9));
    assert_eq!(oxygen.max, Some(8.1));
    let temp = summary.stats("temperature_c").unwrap();
    assert!(temp.min <= temp.median && temp.median <= temp.max);
    assert!(summary.stats("tank_id").is_none());
}

#[test]
fn semicolon_delimited_input_is_sniffed() {
    let csv = "tank;depth\nA;3\nB;5\n";
    let table = read_table(csv.as_bytes()).unwrap();
    assert_eq!(table.column_names(), ["tank", "depth"]);
    assert_eq!(table.row_count(), 2);

    let summary = compute(&table);
    assert_eq!(summary.stats("depth").unwrap().mean, Some(4.0));
}

#[test]
fn aggregations_rank_and_truncate() {
    let table = read_table(TELEMETRY_CSV.as_bytes()).unwrap();

    let counts = top_counts(&table, "site", MAX_COUNT_BUCKETS);
    assert_eq!(
        counts.entries,
        vec![
            ("north".to_string(), 3.0),
            ("south".to_string(), 1.0),
            ("east".to_string(), 1.0),
        ]
    );

    let sums = top_sums(&table, "site", "temperature_c", MAX_SUM_BUCKETS);
    assert_eq!(sums.entries[0].0, "north");
    assert!((sums.entries[0].1 - 37.7).abs() < 1e-9);
}

#[test]
fn every_chart_kind_produces_a_png() {
    let table = read_table(TELEMETRY_CSV.as_bytes()).unwrap();

    let specs = [
        (
            ChartKind::Line,
            ChartSpec {
                title: "Oxygen over time".to_string(),
                y_col: Some("oxygen_mg_l".to_string()),
                ..Default::default()
            },
        ),
        (
            ChartKind::Pie,
            ChartSpec {
                title: "Readings by site".to_string(),
                category_col: Some("site".to_string()),
                ..Default::default()
            },
        ),
        (
            ChartKind::Bar,
            ChartSpec {
                title: "Temperature by site".to_string(),
                category_col: Some("site".to_string()),
                y_col: Some("temperature_c".to_string()),
                ..Default::default()
            },
        ),
    ];

    for (kind, spec) in specs {
        let figure = charts::render(&table, kind, &spec, Some(7));
        assert_eq!(figure.width(), FIGURE_WIDTH);
        assert_eq!(figure.height(), FIGURE_HEIGHT);
        let png = figure.to_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }
}

#[test]
fn misconfigured_chart_spec_degrades_to_placeholder() {
    let table = read_table(TELEMETRY_CSV.as_bytes()).unwrap();
    // note is categorical, so the line chart cannot use it as Y.
    let spec = ChartSpec {
        title: "Broken".to_string(),
        y_col: Some("note".to_string()),
        ..Default::default()
    };
    let figure = charts::render(&table, ChartKind::Line, &spec, Some(7));
    assert!(figure.to_png().unwrap().len() > 8);
}

#[test]
fn metrics_outputs_land_under_the_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let table = read_table(TELEMETRY_CSV.as_bytes()).unwrap();
    let summary = compute(&table);

    let json_path = storage::write_json(&config, "last_summary.json", &summary).unwrap();
    let csv_path = storage::write_metrics_csv(&config, "numeric_summary.csv", &summary).unwrap();

    let json = std::fs::read_to_string(dir.path().join(&json_path)).unwrap();
    assert!(json.contains("oxygen_mg_l"));

    let csv = std::fs::read_to_string(dir.path().join(&csv_path)).unwrap();
    assert!(csv.starts_with("column,min,max,mean,median,std\n"));
    assert!(csv.contains("temperature_c"));
}
