pub mod columns;
pub mod db;
pub mod token;
