// Persistence Store: durable CRUD over posts, templates and preferences.
// Every function takes the pool, runs one statement on a pooled connection
// and hands the connection back when the future completes or is dropped.

pub mod handlers;
pub mod posts;
pub mod preferences;
pub mod templates;
