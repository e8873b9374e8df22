use serde_json::{json, Value};
use std::cell::Cell;
use std::rc::Rc;

use covid_dashboard::app::DashboardUseCase;
use covid_dashboard::boundary::BoundarySource;
use covid_dashboard::config::Config;
use covid_dashboard::error::Result;
use covid_dashboard::pipeline::{aggregate, CaseStatus};
use covid_dashboard::spreadsheet::Table;

struct StaticSource {
    calls: Rc<Cell<usize>>,
}

impl BoundarySource for StaticSource {
    fn fetch(&self, _url: &str) -> Result<Value> {
        self.calls.set(self.calls.get() + 1);
        Ok(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"NOMBRE_DPT": "ANTIOQUIA"}, "geometry": null},
                {"type": "Feature", "properties": {"NOMBRE_DPT": "BOGOTA"}, "geometry": null},
                {"type": "Feature", "properties": {"NOMBRE_DPT": "VALLE DEL CAUCA"}, "geometry": null}
            ]
        }))
    }
}

fn extract() -> Table {
    let headers = ["DEPARTAMENTO", "MUNICIPIO", "FECHA DEFUNCIÓN", "COVID-19", "EDAD FALLECIDO", "SEXO"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows: Vec<[&str; 6]> = vec![
        ["ANTIOQUIA", "MEDELLÍN", "'15/03/2020", "CONFIRMADO", "45 (aprox)", "F"],
        ["BOGOTÁ", "BOGOTÁ", "'28/03/2020", "CONFIRMADO", "92", "M"],
        ["BOGOTÁ", "BOGOTÁ", "'02/04/2020", "SOSPECHOSO", "70", "M"],
        ["BOGOTÁ", "BOGOTÁ", "'10/01/2021", "CONFIRMADO", "66", "F"],
        ["BOGOTÁ", "BOGOTÁ", "'11/01/2021", "CONFIRMADO", "67", "M"],
        ["VALLE DEL CAUCA", "CALI", "'11/01/2021", "CONFIRMADO", "80", "M"],
        ["VALLE DEL CAUCA", "CALI", "'20/02/2021", "DESCARTADO", "33", "F"],
        ["ANTIOQUIA", "ENVIGADO", "'03/03/2021", "CONFIRMADO", "(sin dato)", "F"],
        ["CÓRDOBA", "MONTERÍA", "'05/03/2021", "CONFIRMADO", "59", "M"],
        ["ANTIOQUIA", "BELLO", "'06/03/2021", "CONFIRMADO", "58", "M"],
        ["ANTIOQUIA", "ITAGÜÍ", "'07/03/2021", "CONFIRMADO", "57", "F"],
        ["ANTIOQUIA", "ITAGÜÍ", "fecha", "CONFIRMADO", "57", "F"],
    ];
    let rows = rows
        .iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect();
    Table::new(headers, rows)
}

fn use_case(dir: &tempfile::TempDir, calls: Rc<Cell<usize>>) -> DashboardUseCase {
    let mut config = Config::default();
    config.boundary.path = dir.path().join("colombia_departments.geojson");
    config.boundary.url = "http://example.invalid/colombia.geo.json".to_string();
    DashboardUseCase::new(config, Box::new(StaticSource { calls }))
}

#[test]
fn test_summary_over_extract() {
    let dir = tempfile::tempdir().unwrap();
    let use_case = use_case(&dir, Rc::new(Cell::new(0)));
    let dataset = use_case.dataset_from_table(&extract()).unwrap();

    assert_eq!(dataset.stats().rows, 12);
    assert_eq!(dataset.stats().unparseable_dates, 1);
    assert_eq!(dataset.stats().unparseable_ages, 1);

    let summary = use_case.summary(&dataset);

    // 2020 confirmed: ages 45 and 92
    let hist: Vec<(&str, usize)> = summary
        .age_histogram
        .iter()
        .filter(|c| c.count > 0)
        .map(|c| (c.label.as_str(), c.count))
        .collect();
    assert_eq!(hist, vec![("45-49", 1), ("90 o más", 1)]);

    let months: Vec<&str> = summary.monthly_confirmed.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(months, vec!["2020-03", "2021-01", "2021-03"]);
    assert_eq!(summary.monthly_confirmed[1].count, 3);

    let bogota = summary.region_totals.iter().find(|c| c.label == "BOGOTA").unwrap();
    assert_eq!(bogota.count, 2);
    assert!(summary.region_totals.iter().any(|c| c.label == "CORDOBA"));

    // BOGOTÁ 2, then 1-count cities in row order
    let top: Vec<&str> = summary.top_cities.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(top, vec!["BOGOTÁ", "CALI", "ENVIGADO", "MONTERÍA", "BELLO"]);
}

#[test]
fn test_year_properties() {
    let dir = tempfile::tempdir().unwrap();
    let use_case = use_case(&dir, Rc::new(Cell::new(0)));
    let dataset = use_case.dataset_from_table(&extract()).unwrap();
    let records = dataset.records();

    for year in ["2020", "2021"] {
        let statuses = aggregate::status_totals(records, year);
        let year_rows = records.iter().filter(|r| r.in_year(year)).count();
        assert_eq!(statuses.iter().map(|(_, c)| c).sum::<usize>(), year_rows);
        assert_eq!(statuses[0].0, CaseStatus::Confirmed);

        let all_cities: usize = aggregate::city_totals(records, year).iter().map(|(_, c)| c).sum();
        let top: usize = aggregate::top_cities(records, year, 5).iter().map(|(_, c)| c).sum();
        assert!(top <= all_cities);
    }
}

#[test]
fn test_build_dashboard_fetches_boundaries_once() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Rc::new(Cell::new(0));
    let use_case = use_case(&dir, calls.clone());
    let dataset = use_case.dataset_from_table(&extract()).unwrap();

    let first = use_case.build(&dataset).unwrap();
    let second = use_case.build(&dataset).unwrap();
    assert_eq!(calls.get(), 1);
    assert_eq!(first.html(), second.html());

    let figures = first.figures().to_json();
    let map = &figures["map"]["data"][0];
    assert_eq!(map["featureidkey"], "properties.NOMBRE_DPT");
    assert_eq!(map["geojson"]["features"].as_array().unwrap().len(), 3);
    assert_eq!(figures["pie"]["data"][0]["values"], json!([7, 0, 1]));
    assert!(first.html().contains("Plotly.newPlot"));
    assert!(first.html().contains("<title>Dashboard COVID-19</title>"));
}

#[test]
fn test_load_dataset_from_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let mut use_case_config = Config::default();
    use_case_config.input.path =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/extract.xlsx");
    use_case_config.boundary.path = dir.path().join("colombia_departments.geojson");
    let use_case = DashboardUseCase::new(
        use_case_config,
        Box::new(StaticSource { calls: Rc::new(Cell::new(0)) }),
    );

    let dataset = use_case.load_dataset().unwrap();
    assert_eq!(dataset.stats().rows, 3);
    assert_eq!(dataset.stats().unparseable_dates, 0);
    // the #N/A age cell
    assert_eq!(dataset.stats().unparseable_ages, 1);

    let records = dataset.records();
    assert_eq!(records[0].region, "BOGOTA");
    assert_eq!(records[0].year_month_key().as_deref(), Some("2020-03"));
    assert_eq!(records[0].age, Some(45.0));
    assert_eq!(records[1].year_month_key().as_deref(), Some("2021-01"));
    assert_eq!(records[1].age, Some(70.0));
    assert_eq!(records[2].year_month_key().as_deref(), Some("2020-03"));

    let summary = use_case.summary(&dataset);
    assert_eq!(summary.monthly_confirmed.len(), 1);
    assert_eq!(summary.monthly_confirmed[0].label, "2020-03");
    assert_eq!(summary.monthly_confirmed[0].count, 2);
}

#[test]
fn test_page_carries_default_credits() {
    let dir = tempfile::tempdir().unwrap();
    let use_case = use_case(&dir, Rc::new(Cell::new(0)));
    let dataset = use_case.dataset_from_table(&extract()).unwrap();
    let html = use_case.build(&dataset).unwrap().html().to_string();

    assert!(html.contains("Actividad 4 - Aplicaciones I"));
    assert!(html.contains("Realizado por:"));
    for author in &use_case.config().report.credits {
        assert!(html.contains(author.as_str()), "missing credit {author}");
    }
}
