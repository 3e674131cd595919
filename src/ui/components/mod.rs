pub mod auth_forms;
pub mod chat_area;
pub mod dashboard;
pub mod input_bar;
pub mod navbar;
pub mod notices;
