#[path = "../test_utils.rs"]
mod test_utils;

mod middleware_test;
mod reservations_test;
mod slots_test;
