pub mod candles;
pub mod catalog;
