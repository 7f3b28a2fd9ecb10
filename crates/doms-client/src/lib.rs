//! # DOMS Client
//!
//! Rust client for the DOMS digital object repository (a Fedora-commons
//! derivative). The client covers the small surface needed to ingest
//! objects: PID allocation, template cloning, label and state updates,
//! datastream uploads and relation additions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doms_client::{Credentials, DomsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DomsClient::builder()
//!         .base_url("http://achernar:7880/fedora")
//!         .pid_generator_url("http://achernar:7880/pidgenerator-service")
//!         .credentials(Credentials::new("fedoraAdmin", "fedoraAdminPass"))
//!         .build()?;
//!
//!     let pid = client
//!         .clone_template("doms:Template_Newspaper", &["path:a.xml".into()], "ingest")
//!         .await?;
//!     println!("{}", pid);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;

pub use client::{Credentials, DomsClient, DomsClientBuilder};
pub use error::{DomsError, Result};
pub use models::*;

/// Client version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
