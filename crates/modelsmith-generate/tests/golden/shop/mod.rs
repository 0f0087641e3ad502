// Code generated by modelsmith. DO NOT EDIT.

pub mod customers;
pub mod orders;
