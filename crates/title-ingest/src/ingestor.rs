//! Directory ingestion orchestration
//!
//! The run is strictly sequential: discover, ingest each file in order,
//! link the created objects into a chain, publish. Remote calls are not
//! retried and nothing is rolled back; a failure part-way leaves the
//! repository partially ingested.

use std::path::Path;

use doms_client::{ChecksumType, ObjectState};
use tracing::{debug, info};

use crate::discover::{discover_files, XML_SUFFIX};
use crate::repository::Repository;
use crate::transcode::transcode;
use crate::Result;

/// Template cloned for every ingested file
pub const NEWSPAPER_TEMPLATE: &str = "doms:Template_Newspaper";
/// Datastream the file content is stored under
pub const NEWSPAPER_DATASTREAM: &str = "MODS";
/// Predicate linking each object to its successor
pub const NEWSPAPER_RELATION: &str =
    "http://doms.statsbiblioteket.dk/relations/default/0/1/#isPartOfNewspaper";
/// Audit message recorded on every repository mutation
pub const LOG_MESSAGE: &str = "Adding newspaper title";

const FEDORA_URI_PREFIX: &str = "info:fedora/";

/// Render a PID as a Fedora resource URI, unless it already is one
fn as_uri(pid: &str) -> String {
    if pid.starts_with(FEDORA_URI_PREFIX) {
        pid.to_string()
    } else {
        format!("{}{}", FEDORA_URI_PREFIX, pid)
    }
}

/// Object label for a source file: the name with its trailing `.xml`
/// stripped (final occurrence only)
fn label_for(file_name: &str) -> &str {
    file_name.strip_suffix(XML_SUFFIX).unwrap_or(file_name)
}

/// Ingests a directory of newspaper title XML files into the repository
#[derive(Debug, Clone)]
pub struct DirectoryIngestor {
    source_charset: String,
}

impl DirectoryIngestor {
    /// Create an ingestor reading source files in the given charset
    pub fn new(source_charset: impl Into<String>) -> Self {
        Self {
            source_charset: source_charset.into(),
        }
    }

    /// Ingest every `.xml` file in `directory`, link the created objects
    /// into a chain in file-name order and publish them.
    ///
    /// Returns the PID sequence, one PID per source file, in sort order.
    /// Running this twice over the same directory creates a second,
    /// disjoint chain; the repository offers no idempotence.
    pub async fn ingest_directory(
        &self,
        repository: &impl Repository,
        directory: &Path,
    ) -> Result<Vec<String>> {
        let files = discover_files(directory)?;
        info!(directory = %directory.display(), files = files.len(), "Starting ingest");

        let mut pids = Vec::with_capacity(files.len());
        for file in &files {
            pids.push(self.ingest_file(repository, file).await?);
        }

        self.link_pids(repository, &pids).await?;
        self.publish_pids(repository, &pids).await?;

        info!(objects = pids.len(), "Ingest complete");
        Ok(pids)
    }

    /// Ingest a single file: clone the newspaper template, set the label
    /// and upload the transcoded content as the MODS datastream.
    pub async fn ingest_file(
        &self,
        repository: &impl Repository,
        file: &Path,
    ) -> Result<String> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("file has no UTF-8 name: {}", file.display()),
                )
            })?
            .to_string();

        let raw = tokio::fs::read(file).await?;
        let content = transcode(&raw, &self.source_charset)?;

        let pid = repository
            .clone_template(
                NEWSPAPER_TEMPLATE,
                &[format!("path:{}", file_name)],
                LOG_MESSAGE,
            )
            .await?;

        repository
            .modify_object_label(&pid, label_for(&file_name), LOG_MESSAGE)
            .await?;

        repository
            .modify_datastream(
                &pid,
                NEWSPAPER_DATASTREAM,
                ChecksumType::Md5,
                None,
                &content,
                &[],
                "text/xml",
                LOG_MESSAGE,
                None,
            )
            .await?;

        debug!(file = %file_name, pid = %pid, "File ingested");
        Ok(pid)
    }

    /// Chain the objects: one relation from each PID to its successor.
    /// The final PID gets no outgoing relation.
    pub async fn link_pids(&self, repository: &impl Repository, pids: &[String]) -> Result<()> {
        for pair in pids.windows(2) {
            repository
                .add_relation(
                    &pair[0],
                    &as_uri(&pair[0]),
                    NEWSPAPER_RELATION,
                    &as_uri(&pair[1]),
                    false,
                    LOG_MESSAGE,
                )
                .await?;
            debug!(from = %pair[0], to = %pair[1], "Objects linked");
        }
        Ok(())
    }

    /// Publish every object by setting its state to active, in sequence
    /// order. Not atomic: a failure leaves earlier objects published.
    pub async fn publish_pids(&self, repository: &impl Repository, pids: &[String]) -> Result<()> {
        for pid in pids {
            repository
                .modify_object_state(pid, ObjectState::Active, LOG_MESSAGE)
                .await?;
            debug!(pid = %pid, "Object published");
        }
        Ok(())
    }
}
