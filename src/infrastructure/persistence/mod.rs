mod in_memory_sis_client;
mod pg_sis_client;

pub use in_memory_sis_client::InMemorySisClient;
pub use pg_sis_client::PgSisClient;
