use std::fs;
use world_ranks::models::{CountryName, Flags, RawCountry};
use world_ranks::pipeline::attach_display;
use world_ranks::{storage, ViewCountry};

fn sample(n: usize) -> Vec<ViewCountry> {
    let raw = (0..n)
        .map(|i| RawCountry {
            name: CountryName {
                common: format!("Country {}", i),
                official: None,
            },
            population: Some(1000 * (i as u64 + 1)),
            area: if i == 0 { None } else { Some(12.5 * i as f64) },
            independent: Some(true),
            un_member: i % 2 == 0,
            flags: Flags::default(),
            region: "Asia".into(),
            ccn3: Some(format!("{:03}", i)),
            cca3: None,
        })
        .collect();
    attach_display(raw, "en")
}

#[test]
fn save_csv_and_json() {
    let rows = sample(3);
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("ranks.csv");
    storage::save_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("rank,key,name,"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());
    assert!(csv_txt.contains("N/A"));

    let json_path = dir.path().join("ranks.json");
    storage::save_json(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), rows.len());
    assert_eq!(arr[1]["unMember"], false);
    assert_eq!(arr[1]["displayPopulation"], "2,000");

    // JSON export reads back as the same view
    let back: Vec<ViewCountry> = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(back, rows);
}

#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let mut rows = sample(1);
    rows[0].country.name.common = "=HYPERLINK(\"http://evil\")".into();
    rows[0].country.region = "@foo".into();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("injection.csv");
    storage::save_csv(&rows, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    let row = rdr.records().next().expect("one data row expected").unwrap();
    let cell = |name: &str| {
        let idx = headers.iter().position(|h| h == name).expect("header present");
        row.get(idx).unwrap().to_string()
    };

    let name = cell("name");
    assert!(name.starts_with('\''), "name not prefixed: {name}");
    assert!(name.contains("=HYPERLINK"));
    let region = cell("region");
    assert!(region.starts_with('\''), "region not prefixed: {region}");
    assert_eq!(cell("population"), "1000");
    assert_eq!(cell("rank"), "1");
}
