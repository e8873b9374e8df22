//! Plotly figure JSON for each chart.
//!
//! Every function returns a `{ "data": [...], "layout": {...} }` object that
//! `Plotly.newPlot` accepts as is.

use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::pipeline::{AgeBucket, CaseStatus};

fn title(text: impl Into<String>) -> Value {
    json!({ "text": text.into() })
}

/// Bar chart over age bands, bands in ascending order.
pub fn age_histogram(counts: &[(AgeBucket, usize)], year: &str) -> Value {
    let labels: Vec<String> = counts.iter().map(|(b, _)| b.label()).collect();
    let values: Vec<usize> = counts.iter().map(|(_, c)| *c).collect();
    json!({
        "data": [{
            "type": "bar",
            "x": labels,
            "y": values,
            "name": "Frecuencia de Muertes",
            "hovertemplate": "Rango de Edad=%{x}<br>Frecuencia de Muertes=%{y}<extra></extra>"
        }],
        "layout": {
            "title": title(format!(
                "Frecuencia de Muertes Confirmadas por COVID-19 por Edades Quinquenales ({year})"
            )),
            "bargap": 0.0,
            "xaxis": {
                "title": title("Rango de Edad"),
                "type": "category",
                "categoryorder": "array",
                "categoryarray": labels
            },
            "yaxis": { "title": title("Frecuencia de Muertes") }
        }
    })
}

/// Line with markers over `yyyy-mm` keys.
pub fn monthly_line(series: &BTreeMap<String, usize>) -> Value {
    let keys: Vec<&String> = series.keys().collect();
    let values: Vec<usize> = series.values().copied().collect();
    json!({
        "data": [{
            "type": "scatter",
            "mode": "lines+markers",
            "x": keys,
            "y": values,
            "hovertemplate": "Mes y Año=%{x}<br>Total Muertes=%{y}<extra></extra>"
        }],
        "layout": {
            "title": title("Total de Muertes Confirmadas por Mes"),
            "xaxis": { "title": title("Mes y Año"), "type": "category" },
            "yaxis": { "title": title("Total Muertes") }
        }
    })
}

/// Choropleth of departments joined to `geojson` on
/// `properties.<feature_key>`.
pub fn region_choropleth(
    totals: &BTreeMap<String, usize>,
    geojson: &Value,
    feature_key: &str,
    year: &str,
) -> Value {
    let regions: Vec<&String> = totals.keys().collect();
    let values: Vec<usize> = totals.values().copied().collect();
    json!({
        "data": [{
            "type": "choropleth",
            "geojson": geojson,
            "featureidkey": format!("properties.{feature_key}"),
            "locations": regions,
            "z": values,
            "colorscale": "Plasma",
            "colorbar": { "title": title("TOTAL_MUERTES") },
            "hovertemplate": "<b>%{location}</b><br>TOTAL_MUERTES=%{z}<extra></extra>"
        }],
        "layout": {
            "title": title(format!("Total Muertes Confirmadas por COVID-19 en {year}")),
            "geo": { "fitbounds": "locations", "visible": false },
            "margin": { "l": 0, "r": 0, "t": 60, "b": 0 }
        }
    })
}

/// Horizontal bars, first entry drawn at the top.
pub fn city_bars(top: &[(String, usize)], year: &str) -> Value {
    let cities: Vec<&String> = top.iter().map(|(c, _)| c).collect();
    let values: Vec<usize> = top.iter().map(|(_, v)| *v).collect();
    json!({
        "data": [{
            "type": "bar",
            "orientation": "h",
            "x": values,
            "y": cities,
            "hovertemplate": "Total Muertes=%{x}<br>Municipio=%{y}<extra></extra>"
        }],
        "layout": {
            "title": title(format!(
                "Top {} ciudades con más muertes confirmadas por COVID-19 en {year}",
                top.len()
            )),
            "xaxis": { "title": title("Total Muertes") },
            "yaxis": { "title": title("Municipio"), "autorange": "reversed" }
        }
    })
}

pub fn status_pie(totals: &[(CaseStatus, usize)], year: &str) -> Value {
    let labels: Vec<&str> = totals.iter().map(|(s, _)| s.label()).collect();
    let values: Vec<usize> = totals.iter().map(|(_, c)| *c).collect();
    json!({
        "data": [{
            "type": "pie",
            "labels": labels,
            "values": values,
            "sort": false,
            "hovertemplate": "Estado del Caso=%{label}<br>TOTAL_CASOS=%{value}<extra></extra>"
        }],
        "layout": {
            "title": title(format!(
                "Distribución de Casos de COVID-19 en {year} (Confirmados, Sospechosos, Descartados)"
            )),
            "legend": { "title": title("Estado del Caso") }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_keeps_band_order() {
        let counts: Vec<(AgeBucket, usize)> = AgeBucket::all().map(|b| (b, 1)).collect();
        let fig = age_histogram(&counts, "2020");
        assert_eq!(fig["data"][0]["x"][0], "0-4");
        assert_eq!(fig["data"][0]["x"][18], "90 o más");
        assert_eq!(fig["layout"]["xaxis"]["categoryarray"], fig["data"][0]["x"]);
        assert!(fig["layout"]["title"]["text"]
            .as_str()
            .unwrap()
            .ends_with("(2020)"));
    }

    #[test]
    fn test_choropleth_join_settings() {
        let mut totals = BTreeMap::new();
        totals.insert("ANTIOQUIA".to_string(), 3);
        let geo = json!({"type": "FeatureCollection", "features": []});
        let fig = region_choropleth(&totals, &geo, "NOMBRE_DPT", "2021");
        let trace = &fig["data"][0];
        assert_eq!(trace["type"], "choropleth");
        assert_eq!(trace["featureidkey"], "properties.NOMBRE_DPT");
        assert_eq!(trace["locations"], json!(["ANTIOQUIA"]));
        assert_eq!(trace["z"], json!([3]));
        assert_eq!(trace["geojson"], geo);
        assert_eq!(fig["layout"]["geo"]["fitbounds"], "locations");
        assert_eq!(fig["layout"]["geo"]["visible"], false);
    }

    #[test]
    fn test_bars_and_pie() {
        let top = vec![("CALI".to_string(), 9), ("BOGOTA".to_string(), 4)];
        let bars = city_bars(&top, "2021");
        assert_eq!(bars["data"][0]["orientation"], "h");
        assert_eq!(bars["data"][0]["y"], json!(["CALI", "BOGOTA"]));
        assert_eq!(bars["data"][0]["x"], json!([9, 4]));

        let pie = status_pie(
            &[(CaseStatus::Confirmed, 5), (CaseStatus::Suspected, 2), (CaseStatus::Discarded, 0)],
            "2021",
        );
        assert_eq!(pie["data"][0]["labels"], json!(["CONFIRMADO", "SOSPECHOSO", "DESCARTADO"]));
        assert_eq!(pie["data"][0]["values"], json!([5, 2, 0]));
    }

    #[test]
    fn test_line_series() {
        let mut series = BTreeMap::new();
        series.insert("2020-04".to_string(), 2);
        series.insert("2020-03".to_string(), 1);
        let fig = monthly_line(&series);
        assert_eq!(fig["data"][0]["x"], json!(["2020-03", "2020-04"]));
        assert_eq!(fig["data"][0]["mode"], "lines+markers");
    }
}
