// Tests for `orders`. modelsmith creates this file once and never overwrites it.

use modelsmith_runtime::Record;

use super::orders_base::*;

#[test]
fn values_follow_column_table() {
    let record = Orders::default();
    assert_eq!(record.values().len(), COLUMNS.len());
}
