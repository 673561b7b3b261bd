pub mod dice_parser;
pub mod error;
pub mod rules;
pub mod statistics;
