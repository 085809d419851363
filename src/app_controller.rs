use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;
use walkdir::WalkDir;

use crate::app_config::Config;
use crate::content_store::{self, GithubStore, TreeEntry};
use crate::deck::models::DeckPayload;
use crate::deck::DeckAssembler;
use crate::file_utils::FileManager;
use crate::notify::{self, FeishuNotifier, Notifier, TelegramNotifier};
use crate::workflow_client::WorkflowClient;

// @module: Application controller for deck generation tasks

/// Main application controller driving one deck-generation task:
/// markdown in, workflow stream out, assembled deck stored and announced
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Streaming workflow client
    workflow: WorkflowClient,
    // @field: Deck assembler with the configured style
    assembler: DeckAssembler,
    // @field: Optional GitHub store
    store: Option<GithubStore>,
    // @field: Configured notification channels
    notifiers: Vec<Box<dyn Notifier>>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let workflow = WorkflowClient::new(
            &config.workflow.endpoint,
            &config.workflow.api_key,
            &config.workflow.user,
            config.workflow.timeout_secs,
        );
        let assembler = DeckAssembler::new(config.deck.clone());
        let store = config
            .store
            .as_ref()
            .map(|store| GithubStore::new(&store.owner, &store.repo, &store.branch, &store.token));

        let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();
        if let Some(telegram) = &config.notifications.telegram {
            notifiers.push(Box::new(TelegramNotifier::new(
                &telegram.bot_token,
                &telegram.chat_id,
            )));
        }
        if let Some(feishu) = &config.notifications.feishu {
            notifiers.push(Box::new(FeishuNotifier::new(&feishu.webhook_url)));
        }

        Ok(Self {
            config,
            workflow,
            assembler,
            store,
            notifiers,
        })
    }

    /// Generate a deck from a single markdown file
    pub async fn run(&self, input_file: PathBuf) -> Result<()> {
        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        self.run_task(&input_file).await
    }

    /// Generate decks for every markdown file under a directory
    pub async fn run_folder(&self, input_dir: PathBuf) -> Result<()> {
        let files: Vec<PathBuf> = WalkDir::new(&input_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file() && FileManager::is_markdown_file(path))
            .collect();

        if files.is_empty() {
            warn!("No markdown files found under {:?}", input_dir);
            return Ok(());
        }

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut processed = 0;
        for file in files {
            let name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            progress.set_message(name);
            if let Err(err) = self.run_task(&file).await {
                error!("Error processing {:?}: {}", file, err);
            } else {
                processed += 1;
            }
            progress.inc(1);
        }
        progress.finish_with_message(format!("{} deck(s) generated", processed));

        Ok(())
    }

    /// Run one task end to end, announcing success or failure
    async fn run_task(&self, input_file: &Path) -> Result<()> {
        let task_id = Uuid::new_v4();
        let start_time = Instant::now();

        let markdown = FileManager::read_to_string(input_file)?;
        let content_id = content_store::content_id(&markdown);
        info!(
            "Task {}: processing {:?} (content id {})",
            task_id, input_file, content_id
        );

        match self.generate_and_store(&markdown, &content_id).await {
            Ok((title, deck_name)) => {
                let duration = start_time.elapsed().as_secs_f64();
                info!(
                    "Task {}: deck {} assembled in {:.1}s",
                    task_id, deck_name, duration
                );
                let text = format!(
                    "👨‍💻 Deploying...\n\nTitle: {}\nID: {}\nDuration: {:.1} seconds",
                    title, content_id, duration
                );
                notify::broadcast(&self.notifiers, &text).await;
                Ok(())
            }
            Err(err) => {
                let duration = start_time.elapsed().as_secs_f64();
                let text = format!(
                    "❌ Error\n\nID: {}\nMessage: {}\nDuration: {:.1}",
                    content_id, err, duration
                );
                notify::broadcast(&self.notifiers, &text).await;
                Err(err)
            }
        }
    }

    /// Run the workflow, assemble the deck and hand it to the stores.
    /// Returns the deck title and the stored filename.
    async fn generate_and_store(
        &self,
        markdown: &str,
        content_id: &str,
    ) -> Result<(String, String)> {
        let outputs = self
            .workflow
            .run(markdown)
            .await
            .context("Workflow run failed")?
            .ok_or_else(|| anyhow!("Workflow stream ended without a finished event"))?;

        let payload = DeckPayload::from_outputs(&outputs)?;
        let title = payload.title.clone();
        let document = self.assembler.assemble_payload(&payload)?;

        let existing = self.existing_deck_names().await?;
        let deck_name = GithubStore::unique_deck_name(content_id, &existing);

        FileManager::ensure_dir(&self.config.output_dir)?;
        let local_path = self.config.output_dir.join(&deck_name);
        FileManager::write_string(&local_path, &document)?;
        debug!("Deck written to {:?}", local_path);

        if let (Some(store), Some(store_config)) = (&self.store, &self.config.store) {
            let files = vec![
                TreeEntry::file(
                    format!("{}/{}.md", store_config.contents_dir, content_id),
                    markdown,
                ),
                TreeEntry::file(
                    format!("{}/{}", store_config.slides_dir, deck_name),
                    document.as_str(),
                ),
            ];
            store.commit(files, &format!("Add {}", deck_name)).await?;
        }

        Ok((title, deck_name))
    }

    /// Deck filenames already taken, from the GitHub slides directory when
    /// a store is configured, otherwise from the local output directory
    async fn existing_deck_names(&self) -> Result<Vec<String>> {
        if let (Some(store), Some(store_config)) = (&self.store, &self.config.store) {
            return Ok(store.list_dir(&store_config.slides_dir).await?);
        }
        if !self.config.output_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.config.output_dir)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}
