use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid CSV row {row}: expected at least 3 columns, got {got}")]
    ShortRow { row: usize, got: usize },

    #[error("Invalid value at row {row}, column {column}: {value}")]
    InvalidValue {
        row: usize,
        column: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Color list has {colors} entries but the data has {categories} categories")]
    ColorCountMismatch { colors: usize, categories: usize },

    #[error("Unknown color palette: {0}")]
    UnknownPalette(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image export failed: {0}")]
    Export(String),
}

impl From<json5::Error> for PlotError {
    fn from(err: json5::Error) -> Self {
        PlotError::Config(format!("JSON5 parse error: {}", err))
    }
}

impl From<serde_json::Error> for PlotError {
    fn from(err: serde_json::Error) -> Self {
        PlotError::Config(format!("JSON error: {}", err))
    }
}
