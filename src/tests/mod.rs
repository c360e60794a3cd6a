pub mod details_tests;
pub mod router_tests;
pub mod utils;
