//! Client for the Membros dashboard API: authentication, member listing and
//! the "new member" form.

pub mod auth;
#[cfg(test)]
mod helpers;
pub mod membros;
pub mod shared;
pub mod user;
