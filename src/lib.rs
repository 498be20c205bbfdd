pub mod domain;
pub mod models;
pub mod oracle;
pub mod processing;
pub mod routes;
pub mod taxonomy;
