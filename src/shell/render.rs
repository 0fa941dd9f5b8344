//! Plain-text rendering of resolved records
//!
//! ```text
//! * User with _id 1
//! _id                            1
//! name                           Francisca Rasmussen
//! ...
//! --- Submitted tickets:
//!  1. subject:  A Catastrophe in Korea (North)
//!     priority: high
//!     status:   pending
//! --- Assigned Tickets:
//! --- Organization:
//!     name:     Enthaze
//! ```

use crate::repository::{OrganizationView, Resolved, TicketView, UserView};
use crate::schema::{fields::ID, RecordType, Schema};
use crate::store::Record;
use serde_json::Value;
use std::fmt;

const FIELD_WIDTH: usize = 30;

/// Render a search hit with its associations
pub fn render(resolved: &Resolved) -> String {
    resolved.to_string()
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::User(view) => write_user(f, view),
            Resolved::Organization(view) => write_organization(f, view),
            Resolved::Ticket(view) => write_ticket(f, view),
        }
    }
}

fn write_user(f: &mut fmt::Formatter<'_>, view: &UserView) -> fmt::Result {
    header(f, "User", &view.user)?;
    field_lines(f, RecordType::Users, &view.user)?;

    section(f, "Submitted tickets")?;
    ticket_list(f, &view.submitted_tickets)?;

    section(f, "Assigned Tickets")?;
    ticket_list(f, &view.assigned_tickets)?;

    section(f, "Organization")?;
    match &view.organization {
        Some(organization) => organization_summary(f, organization),
        None => Ok(()),
    }
}

fn write_organization(f: &mut fmt::Formatter<'_>, view: &OrganizationView) -> fmt::Result {
    header(f, "Organization", &view.organization)?;
    field_lines(f, RecordType::Organizations, &view.organization)?;

    section(f, "Users")?;
    for (index, user) in view.users.iter().enumerate() {
        user_summary(f, Some(index), user)?;
    }

    section(f, "Tickets")?;
    ticket_list(f, &view.tickets)
}

fn write_ticket(f: &mut fmt::Formatter<'_>, view: &TicketView) -> fmt::Result {
    header(f, "Ticket", &view.ticket)?;
    field_lines(f, RecordType::Tickets, &view.ticket)?;

    section(f, "Submitter")?;
    if let Some(user) = &view.submitter {
        user_summary(f, None, user)?;
    }

    section(f, "Assignee")?;
    if let Some(user) = &view.assignee {
        user_summary(f, None, user)?;
    }

    section(f, "Organization")?;
    match &view.organization {
        Some(organization) => organization_summary(f, organization),
        None => Ok(()),
    }
}

fn header(f: &mut fmt::Formatter<'_>, kind: &str, record: &Record) -> fmt::Result {
    writeln!(f, "* {} with _id {}", kind, display_value(record.value_or_blank(ID)))
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "--- {}:", title)
}

/// Every schema field in schema order, missing ones left blank
fn field_lines(
    f: &mut fmt::Formatter<'_>,
    record_type: RecordType,
    record: &Record,
) -> fmt::Result {
    for name in Schema::of(record_type).field_names() {
        writeln!(
            f,
            "{:<width$} {}",
            name,
            display_value(record.value_or_blank(name)),
            width = FIELD_WIDTH
        )?;
    }
    Ok(())
}

fn ticket_list(f: &mut fmt::Formatter<'_>, tickets: &[Record]) -> fmt::Result {
    for (index, ticket) in tickets.iter().enumerate() {
        summary(f, Some(index), ticket, &["subject", "priority", "status"])?;
    }
    Ok(())
}

fn user_summary(f: &mut fmt::Formatter<'_>, index: Option<usize>, user: &Record) -> fmt::Result {
    summary(f, index, user, &["name", "alias", "role"])
}

fn organization_summary(f: &mut fmt::Formatter<'_>, organization: &Record) -> fmt::Result {
    summary(f, None, organization, &["name"])
}

/// Short listing of an associated record; numbered when `index` is set
fn summary(
    f: &mut fmt::Formatter<'_>,
    index: Option<usize>,
    record: &Record,
    fields: &[&str],
) -> fmt::Result {
    for (line, field) in fields.iter().enumerate() {
        let marker = match index {
            Some(index) if line == 0 => format!("{}.", index + 1),
            _ => String::new(),
        };
        writeln!(
            f,
            "{:>3}{:<10} {}",
            marker,
            format!(" {}:", field),
            display_value(record.value_or_blank(field))
        )?;
    }
    Ok(())
}

/// Strings print bare, arrays as a bracketed list, `null` as blank
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(Value::to_string).collect();
            format!("[{}]", items.join(", "))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::{self, TICKET_1, TICKET_2};
    use serde_json::json;

    fn render_hit(record_type: RecordType, id: Value) -> String {
        let repo = fixtures::repository();
        let hits = repo.search_resolved(record_type, ID, &id).unwrap();
        assert_eq!(hits.len(), 1);
        render(&hits[0])
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("Sri Lanka")), "Sri Lanka");
        assert_eq!(display_value(&json!(101)), "101");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(
            display_value(&json!(["Springville", "Sutton"])),
            "[\"Springville\", \"Sutton\"]"
        );
        assert_eq!(display_value(&json!([])), "[]");
    }

    #[test]
    fn test_display_writes_rendered_text() {
        let repo = fixtures::repository();
        let hits = repo
            .search_resolved(RecordType::Users, "tags", &json!("sutton"))
            .unwrap();

        assert_eq!(hits.len(), 2);
        for hit in &hits {
            assert_eq!(format!("{}", hit), render(hit));
            assert!(render(hit).starts_with("* User with _id "));
        }
    }

    #[test]
    fn test_render_user() {
        let text = render_hit(RecordType::Users, json!(1));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "* User with _id 1");
        assert_eq!(lines[1], format!("{:<30} 1", "_id"));
        assert!(lines.contains(&format!("{:<30} Francisca Rasmussen", "name").as_str()));
        assert!(lines.contains(&format!("{:<30} [\"Springville\", \"Sutton\"]", "tags").as_str()));

        let tail: Vec<&str> = text
            .lines()
            .skip_while(|line| !line.starts_with("---"))
            .collect();
        assert_eq!(
            tail,
            vec![
                "--- Submitted tickets:",
                " 1. subject:  A Catastrophe in Korea (North)",
                "    priority: high",
                "    status:   pending",
                "--- Assigned Tickets:",
                "--- Organization:",
                "    name:     Enthaze",
            ]
        );
    }

    #[test]
    fn test_render_user_blank_fields() {
        let text = render_hit(RecordType::Users, json!(2));

        assert!(text.contains(&format!("{:<30} \n", "email")));
        assert!(text.contains(&format!("{:<30} \n", "organization_id")));
        assert!(text.ends_with("--- Organization:\n"));
    }

    #[test]
    fn test_render_organization() {
        let text = render_hit(RecordType::Organizations, json!(101));

        assert!(text.starts_with("* Organization with _id 101\n"));
        assert_eq!(
            text.lines().filter(|line| !line.starts_with("---")).count(),
            1 + 9 + 3 + 3
        );
        assert!(text.contains(
            "--- Users:\n \
             1. name:     Francisca Rasmussen\n    \
             alias:    Miss Coffey\n    \
             role:     admin\n\
             --- Tickets:\n"
        ));
    }

    #[test]
    fn test_render_ticket() {
        let text = render_hit(RecordType::Tickets, json!(TICKET_1));

        assert!(text.starts_with(&format!("* Ticket with _id {}\n", TICKET_1)));
        assert!(text.contains("--- Submitter:\n    name:     Francisca Rasmussen\n"));
        assert!(text.contains(
            "--- Assignee:\n    \
             name:     Cross Barlow\n    \
             alias:    \n    \
             role:     agent\n"
        ));
        assert!(text.ends_with("--- Organization:\n    name:     Enthaze\n"));
    }

    #[test]
    fn test_render_ticket_without_associations() {
        let text = render_hit(RecordType::Tickets, json!(TICKET_2));

        assert!(text.ends_with("--- Submitter:\n--- Assignee:\n--- Organization:\n"));
    }
}
