// Code generated by modelsmith. DO NOT EDIT.

mod customers_base;
mod customers_extended;
#[cfg(test)]
mod customers_test;

pub use customers_base::*;
#[allow(unused_imports)]
pub use customers_extended::*;
