//! Shared test utilities for the shipaudit workspace.
//!
//! This crate provides:
//! - **arb**: Proptest strategies for shipment tables and configs
//! - **fixtures**: Sample CSV input, tables, configs and receipts
//! - **schema**: JSON schema validators for DTOs
//!
//! # Example
//!
//! ```rust,ignore
//! use shipaudit_testkit::arb;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     fn table_has_required_columns(t in arb::arb_shipment_table()) {
//!         assert!(t.has_column("order_id"));
//!     }
//! }
//! ```

pub mod arb;
pub mod fixtures;
pub mod schema;

pub use arb::{arb_config_file, arb_fail_on, arb_shipment_table, arb_tolerance};
pub use fixtures::{
    SAMPLE_ISSUE_ORDER_IDS, SAMPLE_SHIPMENTS_CSV, sample_configs, sample_receipts, sample_tables,
    table_to_csv,
};
pub use schema::{validate_audit_json, validate_audit_receipt, validate_config_file};
