//! The narrow repository seam
//!
//! [`Repository`] is the slice of the DOMS API the ingestor needs. Keeping
//! it a trait lets the orchestration be exercised against a mock instead
//! of a live repository.

use async_trait::async_trait;
use doms_client::{ChecksumType, DomsClient, DomsError, ObjectState};

/// Remote repository operations used by the ingestor
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    /// Clone a template object, returning the new object's PID
    async fn clone_template(
        &self,
        template_pid: &str,
        old_identifiers: &[String],
        log_message: &str,
    ) -> Result<String, DomsError>;

    /// Set an object's display label
    async fn modify_object_label(
        &self,
        pid: &str,
        label: &str,
        log_message: &str,
    ) -> Result<(), DomsError>;

    /// Replace a datastream's content
    #[allow(clippy::too_many_arguments)]
    async fn modify_datastream(
        &self,
        pid: &str,
        datastream_id: &str,
        checksum_type: ChecksumType,
        checksum: Option<String>,
        content: &[u8],
        alt_ids: &[String],
        mime_type: &str,
        log_message: &str,
        format_uri: Option<String>,
    ) -> Result<(), DomsError>;

    /// Add a relation between two objects
    #[allow(clippy::too_many_arguments)]
    async fn add_relation(
        &self,
        pid: &str,
        subject: &str,
        predicate: &str,
        object: &str,
        literal: bool,
        log_message: &str,
    ) -> Result<(), DomsError>;

    /// Transition an object's lifecycle state
    async fn modify_object_state(
        &self,
        pid: &str,
        state: ObjectState,
        log_message: &str,
    ) -> Result<(), DomsError>;
}

#[async_trait]
impl Repository for DomsClient {
    async fn clone_template(
        &self,
        template_pid: &str,
        old_identifiers: &[String],
        log_message: &str,
    ) -> Result<String, DomsError> {
        DomsClient::clone_template(self, template_pid, old_identifiers, log_message).await
    }

    async fn modify_object_label(
        &self,
        pid: &str,
        label: &str,
        log_message: &str,
    ) -> Result<(), DomsError> {
        DomsClient::modify_object_label(self, pid, label, log_message).await
    }

    async fn modify_datastream(
        &self,
        pid: &str,
        datastream_id: &str,
        checksum_type: ChecksumType,
        checksum: Option<String>,
        content: &[u8],
        alt_ids: &[String],
        mime_type: &str,
        log_message: &str,
        format_uri: Option<String>,
    ) -> Result<(), DomsError> {
        DomsClient::modify_datastream(
            self,
            pid,
            datastream_id,
            checksum_type,
            checksum,
            content,
            alt_ids,
            mime_type,
            log_message,
            format_uri,
        )
        .await
    }

    async fn add_relation(
        &self,
        pid: &str,
        subject: &str,
        predicate: &str,
        object: &str,
        literal: bool,
        log_message: &str,
    ) -> Result<(), DomsError> {
        DomsClient::add_relation(self, pid, subject, predicate, object, literal, log_message).await
    }

    async fn modify_object_state(
        &self,
        pid: &str,
        state: ObjectState,
        log_message: &str,
    ) -> Result<(), DomsError> {
        DomsClient::modify_object_state(self, pid, state, log_message).await
    }
}
