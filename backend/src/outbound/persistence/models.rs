//! Internal Diesel row structs for the users table.
//!
//! These types are persistence details and never leave this module tree.

use diesel::prelude::*;

use super::schema::users;

/// Row struct for reading user documents.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub email: String,
    pub document: serde_json::Value,
}

/// Insertable struct used for upserts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub document: &'a serde_json::Value,
}
