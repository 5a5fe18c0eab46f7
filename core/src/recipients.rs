//! Recipient operations.
//!
//! Each operation maps its arguments onto the endpoint's request body and
//! narrows the response, treating any unexpected shape as a failed call.
//! None of them return an error: failures are `None` or `false`.

use tracing::{debug, warn};

use crate::client::{Endpoint, MagnetClient};
use crate::http::Transport;
use crate::response::loose_integer;
use crate::types::{
    EditRecipientGroupsRequest, Recipient, RecipientDetails, RecipientId, SearchRecipientRequest, UpsertRecipientRequest,
    UpsertType,
};

impl<T: Transport> MagnetClient<T> {
    /// First recipient whose email matches.
    ///
    /// `None` covers both "no match" and "the lookup failed"; the two are not
    /// distinguishable.
    pub fn find_recipient_by_email(&self, email: &str) -> Option<Recipient> {
        self.call_with(Endpoint::SearchRecipient, &SearchRecipientRequest { email })
            .into_array()?
            .into_iter()
            .next()
            .and_then(Recipient::from_value)
    }

    /// Subscribe a recipient to one group. True only when `Status` is 1,
    /// whether it arrives as `1`, `1.0` or `"1"`.
    pub fn add_to_group(&self, recipient_id: impl Into<RecipientId>, group_id: i64) -> bool {
        let id = recipient_id.into();
        let request = EditRecipientGroupsRequest {
            id: &id,
            new_groups: vec![group_id],
            unsubscribe_groups: Vec::new(),
        };
        let status = self
            .call_with(Endpoint::EditRecipientGroups, &request)
            .field("Status")
            .and_then(loose_integer);
        debug!(group_id, ?status, "edit_recipient_groups_status");
        status == Some(1)
    }

    /// Create the recipient, or update it if one with the same email exists.
    ///
    /// Costs two calls: a lookup by email, then the upsert. Returns the ID the
    /// API reports for the record. A match always means `update`; its `ID` is
    /// carried over when it has a usable one.
    pub fn upsert_recipient(&self, mut details: RecipientDetails) -> Option<RecipientId> {
        let upsert_type = match self.find_recipient_by_email(&details.email) {
            Some(existing) => {
                details.id = existing.id();
                if details.id.is_none() {
                    warn!("existing_recipient_missing_id");
                }
                UpsertType::Update
            }
            None => UpsertType::Add,
        };
        debug!(?upsert_type, "upsert_recipient");

        let request = UpsertRecipientRequest {
            recipient_details: &details,
            update_with_nullif_not_passed: false,
            upsert_type,
            validate_email: false,
        };
        self.call_with(Endpoint::UpsertRecipient, &request)
            .field("ID")
            .and_then(RecipientId::from_value)
    }
}
