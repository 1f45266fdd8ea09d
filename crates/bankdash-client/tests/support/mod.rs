pub mod bank_testkit;
