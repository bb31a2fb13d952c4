//! Runs the search and prints post records

use super::commands::{Cli, OutputFormat};
use crate::api::VkClient;
use crate::config::ClientConfig;
use crate::http::VkApi;
use crate::models::PostRecord;
use crate::pagination::SearchQuery;
use anyhow::Context;
use std::io::Write;
use tracing::info;

/// Executes the parsed command line
pub struct Runner {
    cli: Cli,
}

impl Runner {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build a client from the environment and print to stdout
    pub async fn run(&self) -> anyhow::Result<()> {
        let config = ClientConfig::from_env().context("reading configuration")?;
        let client = VkClient::from_config(config).context("building VK client")?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with(&client, &mut out).await?;
        Ok(())
    }

    /// Search with `client` and write one record per post to `out`
    ///
    /// Returns the number of records written.
    pub async fn run_with<A, W>(&self, client: &VkClient<A>, out: &mut W) -> anyhow::Result<usize>
    where
        A: VkApi,
        W: Write,
    {
        let query = SearchQuery::new(&self.cli.query)
            .count(self.cli.count)
            .time_window(self.cli.start_time, self.cli.end_time);

        info!(query = %self.cli.query, count = self.cli.count, "searching");

        let mut paginator = client.iter_search(query);
        let mut pages = 0;
        let mut written = 0;

        while pages < self.cli.pages {
            let next = match paginator.next_batch().await {
                Ok(next) => next,
                Err(e) if e.is_auth_failure() => {
                    return Err(anyhow::Error::new(e)
                        .context("VK rejected the access token, check the service_key variable"));
                }
                Err(e) => return Err(anyhow::Error::new(e).context("newsfeed search failed")),
            };
            let Some(batch) = next else {
                break;
            };
            pages += 1;

            for post in &batch.items {
                let link = if post.owner_id > 0 {
                    // user walls are not communities
                    batch
                        .profile_post_link(post.owner_id, post.id)
                        .unwrap_or_default()
                } else {
                    client.post_link(post.owner_id, post.id).await
                };
                let record = post.to_record(link).with_context(|| {
                    format!("reading attachments of post {}_{}", post.owner_id, post.id)
                })?;
                self.write_record(out, &record)?;
                written += 1;
            }
        }

        info!(pages, records = written, "search finished");
        Ok(written)
    }

    fn write_record<W: Write>(&self, out: &mut W, record: &PostRecord) -> anyhow::Result<()> {
        match self.cli.format {
            OutputFormat::Json => serde_json::to_writer(&mut *out, record)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, record)?,
        }
        writeln!(out)?;
        Ok(())
    }
}
