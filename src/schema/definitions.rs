//! Built-in field tables for users, organizations and tickets

use super::types::{FieldDef, ScalarType, TypeTag};

const STRINGS: TypeTag = TypeTag::Array(ScalarType::String);

pub(super) const USERS: &[FieldDef] = &[
    FieldDef::primary("_id", TypeTag::Integer),
    FieldDef::new("url", TypeTag::String),
    FieldDef::new("external_id", TypeTag::String),
    FieldDef::new("name", TypeTag::String),
    FieldDef::new("alias", TypeTag::String),
    FieldDef::new("created_at", TypeTag::Time),
    FieldDef::new("active", TypeTag::Boolean),
    FieldDef::new("verified", TypeTag::Boolean),
    FieldDef::new("shared", TypeTag::Boolean),
    FieldDef::new("locale", TypeTag::String),
    FieldDef::new("timezone", TypeTag::String),
    FieldDef::new("last_login_at", TypeTag::Time),
    FieldDef::new("email", TypeTag::String),
    FieldDef::new("phone", TypeTag::String),
    FieldDef::new("signature", TypeTag::String),
    FieldDef::new("organization_id", TypeTag::Integer),
    FieldDef::new("tags", STRINGS),
    FieldDef::new("suspended", TypeTag::Boolean),
    FieldDef::new("role", TypeTag::String),
];

pub(super) const TICKETS: &[FieldDef] = &[
    FieldDef::primary("_id", TypeTag::String),
    FieldDef::new("url", TypeTag::String),
    FieldDef::new("external_id", TypeTag::String),
    FieldDef::new("created_at", TypeTag::Time),
    FieldDef::new("type", TypeTag::String),
    FieldDef::new("subject", TypeTag::String),
    FieldDef::new("description", TypeTag::String),
    FieldDef::new("priority", TypeTag::String),
    FieldDef::new("status", TypeTag::String),
    FieldDef::new("submitter_id", TypeTag::Integer),
    FieldDef::new("assignee_id", TypeTag::Integer),
    FieldDef::new("organization_id", TypeTag::Integer),
    FieldDef::new("tags", STRINGS),
    FieldDef::new("has_incidents", TypeTag::Boolean),
    FieldDef::new("due_at", TypeTag::Time),
    FieldDef::new("via", TypeTag::String),
];

pub(super) const ORGANIZATIONS: &[FieldDef] = &[
    FieldDef::primary("_id", TypeTag::Integer),
    FieldDef::new("url", TypeTag::String),
    FieldDef::new("external_id", TypeTag::String),
    FieldDef::new("name", TypeTag::String),
    FieldDef::new("domain_names", STRINGS),
    FieldDef::new("created_at", TypeTag::Time),
    FieldDef::new("details", TypeTag::String),
    FieldDef::new("shared_tickets", TypeTag::Boolean),
    FieldDef::new("tags", STRINGS),
];
