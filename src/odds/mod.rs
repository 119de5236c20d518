pub mod models;
pub mod normalizer;
pub mod table;
pub mod validator;

pub use models::{GameOutcomeRow, RawEvent};
pub use table::{OddsTable, OddsTableBuilder};
