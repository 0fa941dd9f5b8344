//! Association resolution
//!
//! Expands a record with the records that point at it or that it points
//! at. Joins are plain searches on the foreign-key fields:
//!
//! | record       | association        | search                              |
//! |--------------|--------------------|-------------------------------------|
//! | user         | submitted tickets  | tickets.submitter_id = user._id     |
//! | user         | assigned tickets   | tickets.assignee_id = user._id      |
//! | user         | organization       | organizations._id = user.org_id     |
//! | organization | tickets            | tickets.organization_id = org._id   |
//! | organization | users              | users.organization_id = org._id     |
//! | ticket       | submitter          | users._id = ticket.submitter_id     |
//! | ticket       | assignee           | users._id = ticket.assignee_id      |
//! | ticket       | organization       | organizations._id = ticket.org_id   |
//!
//! A missing, `null` or `""` key on either side of a join is blank and
//! never matches anything, so the association comes back empty.

use super::{Repository, SearchResult};
use crate::schema::fields::{ASSIGNEE_ID, ID, ORGANIZATION_ID, SUBMITTER_ID};
use crate::schema::RecordType;
use crate::store::Record;
use serde::Serialize;
use serde_json::Value;

/// A user with its tickets and organization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: Record,
    pub submitted_tickets: Vec<Record>,
    pub assigned_tickets: Vec<Record>,
    pub organization: Option<Record>,
}

/// An organization with its tickets and users
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationView {
    #[serde(flatten)]
    pub organization: Record,
    pub tickets: Vec<Record>,
    pub users: Vec<Record>,
}

/// A ticket with the users and organization it references
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketView {
    #[serde(flatten)]
    pub ticket: Record,
    pub submitter: Option<Record>,
    pub assignee: Option<Record>,
    pub organization: Option<Record>,
}

/// A search hit with its associations
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    User(UserView),
    Organization(OrganizationView),
    Ticket(TicketView),
}

impl Resolved {
    pub fn record_type(&self) -> RecordType {
        match self {
            Resolved::User(_) => RecordType::Users,
            Resolved::Organization(_) => RecordType::Organizations,
            Resolved::Ticket(_) => RecordType::Tickets,
        }
    }

    /// The hit itself, without associations
    pub fn record(&self) -> &Record {
        match self {
            Resolved::User(view) => &view.user,
            Resolved::Organization(view) => &view.organization,
            Resolved::Ticket(view) => &view.ticket,
        }
    }
}

impl Repository {
    /// Attach associated records to `record`
    pub fn resolve(&self, record_type: RecordType, record: Record) -> SearchResult<Resolved> {
        let resolved = match record_type {
            RecordType::Users => {
                let id = record.value_or_blank(ID);
                Resolved::User(UserView {
                    submitted_tickets: self.join_many(RecordType::Tickets, SUBMITTER_ID, id)?,
                    assigned_tickets: self.join_many(RecordType::Tickets, ASSIGNEE_ID, id)?,
                    organization: self.join_one(
                        RecordType::Organizations,
                        record.value_or_blank(ORGANIZATION_ID),
                    )?,
                    user: record,
                })
            }
            RecordType::Organizations => {
                let id = record.value_or_blank(ID);
                Resolved::Organization(OrganizationView {
                    tickets: self.join_many(RecordType::Tickets, ORGANIZATION_ID, id)?,
                    users: self.join_many(RecordType::Users, ORGANIZATION_ID, id)?,
                    organization: record,
                })
            }
            RecordType::Tickets => Resolved::Ticket(TicketView {
                submitter: self.join_one(RecordType::Users, record.value_or_blank(SUBMITTER_ID))?,
                assignee: self.join_one(RecordType::Users, record.value_or_blank(ASSIGNEE_ID))?,
                organization: self.join_one(
                    RecordType::Organizations,
                    record.value_or_blank(ORGANIZATION_ID),
                )?,
                ticket: record,
            }),
        };
        Ok(resolved)
    }

    /// Records whose `field` holds `key`; a blank key joins nothing
    fn join_many(
        &self,
        record_type: RecordType,
        field: &str,
        key: &Value,
    ) -> SearchResult<Vec<Record>> {
        if is_blank(key) {
            return Ok(Vec::new());
        }
        self.search(record_type, field, key)
    }

    /// The record whose primary key is `key`; a blank key joins nothing
    fn join_one(&self, record_type: RecordType, key: &Value) -> SearchResult<Option<Record>> {
        Ok(self.join_many(record_type, ID, key)?.into_iter().next())
    }
}

fn is_blank(key: &Value) -> bool {
    matches!(key, Value::String(text) if text.is_empty())
}
