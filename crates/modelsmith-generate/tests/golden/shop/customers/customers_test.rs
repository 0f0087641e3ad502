// Tests for `customers`. modelsmith creates this file once and never overwrites it.

use modelsmith_runtime::Record;

use super::customers_base::*;

#[test]
fn values_follow_column_table() {
    let record = Customers::default();
    assert_eq!(record.values().len(), COLUMNS.len());
}
