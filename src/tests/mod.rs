pub mod plan_tests;
pub mod property_tests;
