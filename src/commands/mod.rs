pub mod extract;
pub mod merge;
pub mod scrape;
pub mod status;
