pub mod product_controller;
pub mod root_controller;
