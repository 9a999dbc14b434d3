//! Proptest strategies for generating valid test inputs.
//!
//! Tables are built constructively: the required columns are always present
//! and `order_id` values are unique, so no strategy needs filtering.
//!
//! # Bounds
//!
//! - Max data rows per table: 30
//! - Max extra (pass-through) columns: 3

use proptest::prelude::*;

use shipaudit_domain::Table;
use shipaudit_types::{ConfigFile, Defaults, FailOn, REQUIRED_COLUMNS};

/// Maximum number of data rows in a generated table
pub const MAX_ROWS: usize = 30;

/// Maximum number of extra columns in a generated table
pub const MAX_EXTRA_COLUMNS: usize = 3;

// =============================================================================
// Enum Strategies
// =============================================================================

pub fn arb_fail_on() -> impl Strategy<Value = FailOn> {
    prop_oneof![Just(FailOn::Never), Just(FailOn::Issue)]
}

// =============================================================================
// Cell / Table Strategies
// =============================================================================

/// A well-formed measurement: a decimal with up to two places.
pub fn arb_measure() -> impl Strategy<Value = String> {
    (0u32..5000).prop_map(|n| format!("{}", f64::from(n) / 100.0))
}

/// A measurement cell that is sometimes empty or unparseable.
pub fn arb_measure_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        10 => arb_measure(),
        1 => Just(String::new()),
        1 => Just("n/a".to_string()),
    ]
}

/// Free text for pass-through columns, including CSV specials.
pub fn arb_free_text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Za-z0-9 ]{0,12}",
        1 => Just("DHL, Express".to_string()),
        1 => Just("say \"hi\"".to_string()),
    ]
}

pub fn arb_extra_column_name() -> impl Strategy<Value = String> {
    "x_[a-z]{1,8}"
}

/// Non-negative tolerance in kilograms: zero or 0.01..3.00.
pub fn arb_tolerance() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), (1u32..300).prop_map(|n| f64::from(n) / 100.0)]
}

/// A valid shipment table: the required columns plus a few extras, in a
/// shuffled order, with unique `order_id`s.
pub fn arb_shipment_table() -> impl Strategy<Value = Table> {
    prop::collection::btree_set(arb_extra_column_name(), 0..=MAX_EXTRA_COLUMNS)
        .prop_flat_map(|extras| {
            let mut columns: Vec<String> =
                REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
            let n_extra = extras.len();
            columns.extend(extras);

            let row = (
                prop::collection::vec(arb_measure_cell(), 4),
                prop::collection::vec(arb_free_text(), n_extra),
            );
            (
                Just(columns).prop_shuffle(),
                prop::collection::vec(row, 0..MAX_ROWS),
            )
        })
        .prop_map(|(columns, rows)| {
            let rows = rows
                .into_iter()
                .enumerate()
                .map(|(i, (measures, extras))| {
                    let mut measures = measures.into_iter();
                    let mut extras = extras.into_iter();
                    columns
                        .iter()
                        .map(|c| match c.as_str() {
                            "order_id" => format!("SO-{:04}", i + 1),
                            c if c.starts_with("x_") => extras.next().unwrap_or_default(),
                            _ => measures.next().unwrap_or_default(),
                        })
                        .collect()
                })
                .collect();
            Table::new(columns, rows).expect("generated table is rectangular")
        })
}

// =============================================================================
// Config Strategies
// =============================================================================

pub fn arb_defaults() -> impl Strategy<Value = Defaults> {
    (
        prop::option::of("[a-z]{1,8}/[a-z]{1,8}\\.csv"),
        prop::option::of("[a-z]{1,8}/[a-z]{1,8}\\.csv"),
        prop::option::of("[a-z]{1,8}\\.csv"),
        prop::option::of(arb_tolerance()),
        prop::option::of(arb_fail_on()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(
            |(
                input,
                output,
                full_output,
                weight_tolerance_kg,
                fail_on,
                only_issues,
                include_weight,
                include_sla,
            )| Defaults {
                input,
                output,
                full_output,
                weight_tolerance_kg,
                fail_on,
                only_issues,
                include_weight,
                include_sla,
            },
        )
}

pub fn arb_config_file() -> impl Strategy<Value = ConfigFile> {
    arb_defaults().prop_map(|defaults| ConfigFile { defaults })
}
