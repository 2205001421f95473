// Interview API surface: wire DTOs and route handlers for the role list,
// question fetch, answer evaluation, final report, and session reset.

pub mod handlers;
