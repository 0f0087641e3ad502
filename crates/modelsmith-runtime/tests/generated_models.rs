//! Builds the committed generator output for the `shop` fixture against this
//! crate and checks the statements it produces.

#[allow(dead_code)]
#[path = "../../modelsmith-generate/tests/golden/shop/mod.rs"]
mod shop;

use modelsmith_runtime::{
    QueryOptions, Record, RuntimeError, Value, build_upsert, select_statement,
};

use shop::customers::Customers;
use shop::orders::Orders;

#[test]
fn column_tables_line_up_with_records() {
    assert_eq!(Orders::columns().len(), Orders::default().values().len());
    assert_eq!(Customers::columns().len(), Customers::default().values().len());
    assert_eq!(<Orders as Record>::TABLE, "orders");
    assert_eq!(<Customers as Record>::DATABASE, "shop");
    assert!(shop::orders::COLUMNS[0].is_auto_increment());
    assert!(!shop::customers::COLUMNS[0].is_auto_increment());
}

#[test]
fn new_order_upsert_uses_defaults_and_lets_the_database_assign_the_key() {
    let statement = build_upsert(&Orders::default()).expect("build upsert");

    assert_eq!(
        statement.sql,
        "INSERT INTO `orders` (`id`, `customer_id`, `status`, `is_paid`, `priority`, `placed_at`, `note`) \
         VALUES (?, ?, DEFAULT, ?, ?, ?, ?) \
         ON DUPLICATE KEY UPDATE `customer_id` = ?, `status` = DEFAULT(`status`), `is_paid` = ?, \
         `priority` = ?, `placed_at` = ?, `note` = ?"
    );
    assert_eq!(
        statement.args,
        vec![
            Value::Null,
            Value::Int(0),
            Value::Bool(false),
            Value::Int(0),
            Value::Null,
            Value::Null,
            Value::Int(0),
            Value::Bool(false),
            Value::Int(0),
            Value::Null,
            Value::Null,
        ]
    );
}

#[test]
fn existing_customer_upsert_binds_its_key() {
    let customer = Customers {
        id: 3,
        email: "ada@example.com".to_string(),
    };
    let statement = build_upsert(&customer).expect("build upsert");

    assert_eq!(
        statement.sql,
        "INSERT INTO `customers` (`id`, `email`) VALUES (?, ?) \
         ON DUPLICATE KEY UPDATE `email` = ?"
    );
    assert_eq!(statement.args[0], Value::Int(3));
}

#[test]
fn order_status_outside_its_enum_is_rejected() {
    let order = Orders {
        status: "shipped".to_string(),
        ..Orders::default()
    };

    let err = build_upsert(&order).unwrap_err();
    assert!(matches!(err, RuntimeError::Validation(_)));
    assert!(err.to_string().contains("active, closed"));
}

#[test]
fn select_list_decodes_in_field_order() {
    let sql = select_statement(
        Orders::TABLE,
        Orders::columns(),
        "`id` = ?",
        &QueryOptions::default(),
    );
    assert_eq!(
        sql,
        "SELECT CAST(`id` AS SIGNED), CAST(`customer_id` AS SIGNED), CAST(`status` AS CHAR), \
         CAST(`is_paid` AS SIGNED), CAST(`priority` AS SIGNED), CAST(`placed_at` AS DATETIME), \
         CAST(`note` AS CHAR) FROM `orders` WHERE `id` = ?"
    );
}
