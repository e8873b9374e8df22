/// Column names used by the Colombian mortality extract
pub const REGION_COLUMN: &str = "DEPARTAMENTO";
pub const CITY_COLUMN: &str = "MUNICIPIO";
pub const DEATH_DATE_COLUMN: &str = "FECHA DEFUNCIÓN";
pub const STATUS_COLUMN: &str = "COVID-19";
pub const AGE_COLUMN: &str = "EDAD FALLECIDO";

// Case classification labels as spelled in the source
pub const CONFIRMED_LABEL: &str = "CONFIRMADO";
pub const SUSPECTED_LABEL: &str = "SOSPECHOSO";
pub const DISCARDED_LABEL: &str = "DESCARTADO";
pub const UNCLASSIFIED_LABEL: &str = "SIN CLASIFICAR";

pub const DEFAULT_INPUT_PATH: &str = "Anexo4.Covid-19_CE_15-03-23.xlsx";
pub const DEFAULT_CONFIG_PATH: &str = "dashboard.toml";
pub const DEFAULT_OUTPUT_PATH: &str = "dashboard.html";

// Department boundaries for the choropleth
pub const DEFAULT_BOUNDARY_PATH: &str = "colombia_departments.geojson";
pub const DEFAULT_BOUNDARY_URL: &str = "https://gist.githubusercontent.com/john-guerra/43c7656821069d00dcbc/raw/be6a6e239cd5b5b803c6e7c2ec405b793a9064dd/Colombia.geo.json";
pub const DEFAULT_FEATURE_KEY: &str = "NOMBRE_DPT";

pub const DEFAULT_HISTOGRAM_YEAR: &str = "2020";
pub const DEFAULT_MAP_YEAR: &str = "2021";
pub const DEFAULT_TOP_CITIES: usize = 5;

// Page text
pub const DEFAULT_TITLE: &str = "Dashboard COVID-19";
pub const DEFAULT_HEADING: &str = "Actividad 4 - Aplicaciones I";
pub const DEFAULT_CREDITS: [&str; 3] = [
    "Alexander Almeida Espinosa",
    "Juan Carlos González Torres",
    "Diego Alejandro Robledo Mejía",
];

pub const DEFAULT_PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "dashboard.log";
pub const DEFAULT_LOG_FILTER: &str = "covid_dashboard=info,warn";
