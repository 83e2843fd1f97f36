// One module per resource. Each handler validates input, calls into the
// auth utilities and the data-access layer, and maps outcomes to HTTP
// status codes and JSON bodies.

pub mod admin;
pub mod chirps;
pub mod health;
pub mod session;
pub mod users;
pub mod webhooks;
