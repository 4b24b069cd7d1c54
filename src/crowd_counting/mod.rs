pub mod json_output;
pub mod people_counter;
pub mod summary;
