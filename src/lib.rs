pub mod bericht;
pub mod depot;
pub mod format;
pub mod formatierung;
pub mod kennzahlen;
pub mod steuern;
pub mod tsv;
pub mod typen;
pub mod zahl;
pub mod zinsen;

pub use typen::*;
