// Calendar Row Layout Library
// Packs calendar events into the rows of a week or month date row

pub mod models;
pub mod services;
pub mod utils;
