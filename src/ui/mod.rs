pub mod fonts;
pub mod panels;
pub mod plot;
pub mod table;
