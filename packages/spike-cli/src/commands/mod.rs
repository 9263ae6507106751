pub mod areas;
pub mod run;
pub mod sessions;
pub mod validate;
