pub mod bucket;
pub mod count;
pub mod search;
