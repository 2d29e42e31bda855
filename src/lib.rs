//! Dashboard of average dwelling prices per m² in Polish voivodeships, backed by the
//! BDL statistics API of Statistics Poland.

pub mod bdl;
pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod server;
pub mod users;
