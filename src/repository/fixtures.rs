//! Shared test data: two users, two organizations, two tickets

use super::Repository;
use crate::ingest::{build, Batch};
use serde_json::{json, Value};

pub(crate) const TICKET_1: &str = "436bf9b0-1147-4c0a-8439-6f79833bff5b";
pub(crate) const TICKET_2: &str = "9s8df9b0-82jd-d99d-adss-998s833bff4e";

pub(crate) fn users() -> Vec<Value> {
    vec![
        json!({
            "_id": 1,
            "url": "http://initech.zendesk.com/api/v2/users/1.json",
            "external_id": "74341f74-9c79-49d5-9611-87ef9b6eb75f",
            "name": "Francisca Rasmussen",
            "alias": "Miss Coffey",
            "created_at": "2016-04-15T05:19:46 -10:00",
            "active": true,
            "verified": true,
            "shared": false,
            "locale": "en-AU",
            "timezone": "Sri Lanka",
            "last_login_at": "2013-08-04T01:03:27 -10:00",
            "email": "coffeyrasmussen@flotonic.com",
            "phone": "8335-422-718",
            "signature": "Don't Worry Be Happy!",
            "organization_id": 101,
            "tags": ["Springville", "Sutton"],
            "suspended": true,
            "role": "admin"
        }),
        json!({
            "_id": 2,
            "name": "Cross Barlow",
            "created_at": "2016-04-15T05:19:46 -10:00",
            "active": false,
            "shared": null,
            "organization_id": null,
            "tags": ["Melbourne", "Sutton"],
            "role": "agent"
        }),
    ]
}

pub(crate) fn organizations() -> Vec<Value> {
    vec![
        json!({
            "_id": 101,
            "url": "http://initech.zendesk.com/api/v2/organizations/101.json",
            "external_id": "9270ed79-35eb-4a38-a46f-35725197ea8d",
            "name": "Enthaze",
            "domain_names": ["kage.com", "ecratic.com", "endipin.com", "zentix.com"],
            "created_at": "2016-05-21T11:10:28 -10:00",
            "details": "MegaCorp",
            "shared_tickets": false,
            "tags": ["Fulton", "West", "Rodriguez", "Farley"]
        }),
        json!({
            "_id": 102,
            "name": "Nutralab",
            "domain_names": ["zentix.com"],
            "tags": []
        }),
    ]
}

pub(crate) fn tickets() -> Vec<Value> {
    vec![
        json!({
            "_id": TICKET_1,
            "url": "http://initech.zendesk.com/api/v2/tickets/436bf9b0-1147-4c0a-8439-6f79833bff5b.json",
            "external_id": "9210cdc9-4bee-485f-a078-35396cd74063",
            "created_at": "2016-04-28T11:19:34 -10:00",
            "type": "incident",
            "subject": "A Catastrophe in Korea (North)",
            "description": "Nostrud ad sit velit cupidatat laboris ipsum nisi amet laboris ex exercitation amet et proident.",
            "priority": "high",
            "status": "pending",
            "submitter_id": 1,
            "assignee_id": 2,
            "organization_id": 101,
            "tags": ["Ohio", "Pennsylvania", "American Samoa", "Northern Mariana Islands"],
            "has_incidents": false,
            "due_at": "2016-07-31T02:37:50 -10:00",
            "via": "web"
        }),
        json!({
            "_id": TICKET_2,
            "subject": "A Problem in Morocco",
            "priority": "low",
            "status": "open",
            "submitter_id": null,
            "tags": ["Ohio"]
        }),
    ]
}

pub(crate) fn batch() -> Batch {
    Batch::new()
        .with("users", users())
        .with("organizations", organizations())
        .with("tickets", tickets())
}

pub(crate) fn repository() -> Repository {
    Repository::new(build(&batch()).expect("fixture data is valid"))
}
