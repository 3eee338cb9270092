pub mod store_testkit;
