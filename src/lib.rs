pub mod columns;
pub mod csv;
pub mod fetch;
pub mod load;
pub mod records;
pub mod render;
pub mod search;
pub mod store;
