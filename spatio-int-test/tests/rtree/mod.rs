//! R-Tree integration test module.
//!
//! These tests exercise the public API end to end and cross-check query
//! results against full scans of the loaded data.

mod empty_tree_test;
mod io_test;
mod knn_test;
mod load_test;
mod range_count_test;
mod rknn_test;
