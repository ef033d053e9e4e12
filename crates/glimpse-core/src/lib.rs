pub mod preprocess;
pub mod script;
pub mod state;
