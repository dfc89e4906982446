use thiserror::Error;

pub type LnResult<T> = Result<T, LnError>;

#[derive(Error, Debug)]
pub enum LnError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid configuration: {what} = {value}")]
    Config { what: &'static str, value: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
