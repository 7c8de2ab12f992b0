use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("score '{raw}' is not a finite number")]
    NotANumber { raw: String },

    #[error("score {value} for '{table_id}' is outside range [{min}, {max}]")]
    OutOfRange {
        table_id: String,
        value: f64,
        min: f64,
        max: f64,
    },
}
