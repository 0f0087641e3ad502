// Code generated by modelsmith. DO NOT EDIT.

mod orders_base;
mod orders_extended;
#[cfg(test)]
mod orders_test;

pub use orders_base::*;
#[allow(unused_imports)]
pub use orders_extended::*;
