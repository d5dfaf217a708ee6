mod monitor_tests;
mod runtime_tests;
