//! Business-logic services

pub mod query_service; // aggregate queries over stored records
