// Hand-written additions for `orders`. modelsmith creates this file once and never overwrites it.

#[allow(unused_imports)]
use super::orders_base::*;
