//! Row classification
//!
//! Derives row-level visual state from a normalized record. The only rule is
//! low stock: quantity on hand below the reorder threshold.

use crate::coerce::int_value;
use crate::normalize::NormalizedRecord;
use crate::types::RowClass;

pub const STOCK_QUANTITY: &str = "stockquantity";
pub const REORDER_LEVEL: &str = "reorderlevel";

/// True iff both stock fields are present, coerce to integers, and quantity < level
pub fn is_low_stock(row: &NormalizedRecord) -> bool {
    let (Some(quantity), Some(level)) = (row.get(STOCK_QUANTITY), row.get(REORDER_LEVEL)) else {
        return false;
    };
    match (int_value(quantity), int_value(level)) {
        (Some(q), Some(l)) => q < l,
        _ => false,
    }
}

/// Row class for styling
pub fn classify_row(row: &NormalizedRecord) -> Option<RowClass> {
    is_low_stock(row).then_some(RowClass::LowStock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_record;
    use crate::types::{Record, Value};

    fn row(record: Record) -> NormalizedRecord {
        normalize_record(&record, 0, &mut Vec::new())
    }

    #[test]
    fn test_below_reorder_level() {
        let r = row(Record::new().with("stockQuantity", 3i64).with("reorderLevel", 5i64));
        assert!(is_low_stock(&r));
        assert_eq!(classify_row(&r), Some(RowClass::LowStock));
    }

    #[test]
    fn test_above_reorder_level() {
        let r = row(Record::new().with("stockQuantity", 10i64).with("reorderLevel", 5i64));
        assert!(!is_low_stock(&r));
        assert_eq!(classify_row(&r), None);
    }

    #[test]
    fn test_equal_is_not_low() {
        let r = row(Record::new().with("StockQuantity", 5i64).with("ReorderLevel", 5i64));
        assert!(!is_low_stock(&r));
    }

    #[test]
    fn test_missing_field() {
        let r = row(Record::new().with("stockQuantity", 3i64));
        assert!(!is_low_stock(&r));
    }

    #[test]
    fn test_string_coercion() {
        let r = row(Record::new().with("stockquantity", "2 units").with("reorderlevel", "4"));
        assert!(is_low_stock(&r));

        let r = row(Record::new().with("stockquantity", Value::Null).with("reorderlevel", 4i64));
        assert!(!is_low_stock(&r));

        let r = row(Record::new().with("stockquantity", "n/a").with("reorderlevel", 4i64));
        assert!(!is_low_stock(&r));
    }
}
