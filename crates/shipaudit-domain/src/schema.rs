use shipaudit_types::{
    COL_DECLARED_WEIGHT_KG, COL_DELIVERY_DAYS, COL_ORDER_ID, COL_SLA_DAYS, COL_WEIGHT_KG,
    REQUIRED_COLUMNS,
};

use crate::table::Table;

/// The input is missing one or more required columns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required columns: [{}]", .missing.join(", "))]
pub struct SchemaError {
    /// Sorted, deduplicated.
    pub missing: Vec<String>,
}

/// Positions of the required columns in a table that passed [`validate_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipmentColumns {
    pub order_id: usize,
    pub weight_kg: usize,
    pub declared_weight_kg: usize,
    pub delivery_days: usize,
    pub sla_days: usize,
}

pub fn validate_schema(table: &Table) -> Result<ShipmentColumns, SchemaError> {
    if let (
        Some(order_id),
        Some(weight_kg),
        Some(declared_weight_kg),
        Some(delivery_days),
        Some(sla_days),
    ) = (
        table.column_index(COL_ORDER_ID),
        table.column_index(COL_WEIGHT_KG),
        table.column_index(COL_DECLARED_WEIGHT_KG),
        table.column_index(COL_DELIVERY_DAYS),
        table.column_index(COL_SLA_DAYS),
    ) {
        return Ok(ShipmentColumns {
            order_id,
            weight_kg,
            declared_weight_kg,
            delivery_days,
            sla_days,
        });
    }

    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();
    missing.sort();

    Err(SchemaError { missing })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_positions_in_any_order() {
        let t = Table::from_rows(
            ["sla_days", "note", "order_id", "delivery_days", "declared_weight_kg", "weight_kg"],
            Vec::<Vec<&str>>::new(),
        )
        .unwrap();

        let cols = validate_schema(&t).unwrap();
        assert_eq!(cols.sla_days, 0);
        assert_eq!(cols.order_id, 2);
        assert_eq!(cols.weight_kg, 5);
    }

    #[test]
    fn lists_missing_columns_sorted() {
        let t = Table::from_rows(["weight_kg", "order_id"], Vec::<Vec<&str>>::new()).unwrap();

        let err = validate_schema(&t).unwrap_err();
        assert_eq!(
            err.missing,
            vec!["declared_weight_kg", "delivery_days", "sla_days"]
        );
        assert_eq!(
            err.to_string(),
            "missing required columns: [declared_weight_kg, delivery_days, sla_days]"
        );
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let t = Table::from_rows(
            ["Order_ID", "weight_kg", "declared_weight_kg", "delivery_days", "sla_days"],
            Vec::<Vec<&str>>::new(),
        )
        .unwrap();

        assert_eq!(validate_schema(&t).unwrap_err().missing, vec!["order_id"]);
    }
}
