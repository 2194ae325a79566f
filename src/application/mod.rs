pub mod order_processor;
pub mod order_query;
