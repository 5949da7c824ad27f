mod config;
mod demo;
mod error;
mod render;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use moddash_lib::ModdashClient;
use moddash_lib::backend::Backend;
use moddash_lib::backend::DEFAULT_TAG_LIMIT;
use moddash_lib::backend::TagEdit;
use moddash_lib::error::ValidationError;
use moddash_lib::feed::EntityFeed;
use moddash_lib::feed::LoadOutcome;
use moddash_lib::model::EntityId;
use moddash_lib::model::Platform;
use moddash_lib::model::ReviewOutcome;
use moddash_lib::model::ReviewStatus;
use moddash_lib::model::ReviewSummary;
use moddash_lib::query::DEFAULT_PAGE_SIZE;
use moddash_lib::query::EntityQuery;
use moddash_lib::query::OrderBy;
use moddash_lib::query::SortField;
use moddash_table::prelude::*;

use crate::config::ConfigError;
use crate::config::LogSettings;
use crate::error::CliError;

/// Command-line arguments for the moderation dashboard.
#[derive(Debug, Parser)]
#[command(name = "moddash", about = "Review queue for communities and creators")]
struct Cli {
    /// Use built-in sample data instead of a live backend
    #[arg(long)]
    demo: bool,

    /// Backend base URL
    #[arg(long, env = "MODDASH_URL")]
    url: Option<String>,

    /// Backend API key
    #[arg(long, env = "MODDASH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Platform to work on (reddit or instagram)
    #[arg(long, short, default_value = "reddit")]
    platform: Platform,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show entities as a table
    List(ListArgs),

    /// Set the review status of one entity ("none" clears it)
    Review { id: EntityId, status: String },

    /// Set the review status of several entities
    BulkReview {
        status: String,
        #[arg(required = true)]
        ids: Vec<EntityId>,
    },

    /// Edit the tags of one entity
    #[command(subcommand)]
    Tag(TagCommand),

    /// List the tags in use
    Tags {
        /// Rows scanned when collecting tags
        #[arg(long, default_value_t = DEFAULT_TAG_LIMIT)]
        limit: usize,
    },

    /// Review counts for matching entities
    Summary(SummaryArgs),
}

#[derive(Debug, Subcommand)]
enum TagCommand {
    Add { id: EntityId, tag: String },
    Remove { id: EntityId, tag: String },
    Rename { id: EntityId, from: String, to: String },
}

impl TagCommand {
    fn into_edit(self) -> (EntityId, TagEdit) {
        match self {
            Self::Add { id, tag } => (id, TagEdit::Add(tag)),
            Self::Remove { id, tag } => (id, TagEdit::Remove(tag)),
            Self::Rename { id, from, to } => (id, TagEdit::Rename { from, to }),
        }
    }
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Case-insensitive match on name or title
    #[arg(long, short)]
    search: Option<String>,

    /// Only entities with this outcome (unreviewed, approved, rejected, no_seller)
    #[arg(long)]
    review: Option<ReviewOutcome>,

    /// Only entities carrying this tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Sort column (audience, engagement, avg_performance, name)
    #[arg(long, default_value = "audience")]
    sort: SortField,

    /// Sort ascending instead of descending
    #[arg(long)]
    asc: bool,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Stop after this many rows
    #[arg(long)]
    max_rows: Option<usize>,
}

impl FilterArgs {
    fn query(&self, platform: Platform) -> Result<EntityQuery, ValidationError> {
        let order = if self.asc {
            OrderBy::asc(self.sort)
        } else {
            OrderBy::desc(self.sort)
        };

        let mut query = EntityQuery::new(platform)
            .order(order)
            .page_size(self.page_size);
        if let Some(term) = &self.search {
            query = query.search(term.as_str());
        }
        if let Some(outcome) = self.review {
            query = query.review(outcome);
        }
        for tag in &self.tags {
            query = query.tag(tag.as_str());
        }
        if let Some(cap) = self.max_rows {
            query = query.max_rows(cap);
        }

        query.validate()?;
        Ok(query)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Review,
    Category,
}

impl From<Mode> for DisplayMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Review => DisplayMode::Review,
            Mode::Category => DisplayMode::Category,
        }
    }
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    filter: FilterArgs,

    #[arg(long, value_enum, default_value_t = Mode::Review)]
    mode: Mode,

    /// Pages to load before printing
    #[arg(long, default_value_t = 1)]
    pages: usize,

    /// Print rows as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct SummaryArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Pages to load into the summary
    #[arg(long, default_value_t = 5)]
    pages: usize,

    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    LogSettings::from_env()?.init()?;

    let platform = cli.platform;
    let backend = connect(&cli).await?;

    match cli.command {
        Command::List(args) => list(backend, platform, args).await,
        Command::Review { id, status } => {
            let status = parse_status(platform, &status)?;
            backend.update_review(platform, id, status).await?;
            println!("{} {}: {}", platform, id, status_label(status));
            Ok(())
        }
        Command::BulkReview { status, ids } => {
            let status = parse_status(platform, &status)?;
            let updated = backend.bulk_update_review(platform, &ids, status).await?;
            println!(
                "{} of {} {} entities set to {}",
                updated,
                ids.len(),
                platform,
                status_label(status)
            );
            Ok(())
        }
        Command::Tag(command) => {
            let (id, edit) = command.into_edit();
            let tags = backend.edit_tags(platform, id, &edit).await?;
            println!("{} {}: {}", platform, id, tags.join(", "));
            Ok(())
        }
        Command::Tags { limit } => {
            let response = backend.list_tags(platform, limit).await?;
            log::debug!("[tags] {:?}", response.cache);
            for tag in response.data().iter() {
                println!("{}", tag);
            }
            Ok(())
        }
        Command::Summary(args) => summary(backend, platform, args).await,
    }
}

async fn connect(cli: &Cli) -> Result<Arc<dyn Backend>, CliError> {
    if cli.demo {
        log::info!("[moddash] using demo data");
        return Ok(Arc::new(demo::backend()));
    }

    let url = cli.url.clone().ok_or(ConfigError::MissingUrl)?;
    let api_key = cli.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
    let client = ModdashClient::builder()
        .url(url)
        .api_key(api_key)
        .timeout(Duration::from_secs(cli.timeout))
        .build()?;
    client.connect().await?;
    log::info!("[moddash] connected to {}", client.base_url());
    Ok(Arc::new(client))
}

async fn list(backend: Arc<dyn Backend>, platform: Platform, args: ListArgs) -> Result<(), CliError> {
    let mut feed = EntityFeed::new(backend, args.filter.query(platform)?);
    load_pages(&mut feed, args.pages).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&*feed.rows())?);
        return Ok(());
    }

    let props = TableProps::new(feed.rows())
        .loading(feed.is_loading())
        .has_more(feed.has_more())
        .error(feed.error().map(str::to_string))
        .mode(args.mode.into());
    let mut table = Table::new(
        EntityRenderer::for_platform(platform),
        TableConfig::new().without_virtualization(),
        props,
    )?;
    print!("{}", render::table(table.view()));

    let shown = match feed.total_count() {
        Some(total) => format!("{} of {}", feed.len(), total),
        None => feed.len().to_string(),
    };
    if feed.truncated() {
        println!("{} rows (capped by --max-rows)", shown);
    } else if feed.has_more() {
        println!("{} rows (more with --pages)", shown);
    } else {
        println!("{} rows", shown);
    }
    Ok(())
}

async fn summary(
    backend: Arc<dyn Backend>,
    platform: Platform,
    args: SummaryArgs,
) -> Result<(), CliError> {
    let query = args.filter.query(platform)?;
    let total = backend.count(&query).await?;

    let mut feed = EntityFeed::new(backend, query);
    load_pages(&mut feed, args.pages).await?;
    let summary = ReviewSummary::from_entities(feed.rows().iter());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render::summary(&summary, Some(total)));
    }
    Ok(())
}

/// Loads up to `pages` pages. Fails only when nothing could be loaded.
async fn load_pages(feed: &mut EntityFeed<dyn Backend>, pages: usize) -> Result<(), CliError> {
    for _ in 0..pages.max(1) {
        match feed.load_more().await {
            LoadOutcome::Appended { .. } => {}
            LoadOutcome::Failed if feed.is_empty() => {
                let message = feed.error().unwrap_or("unknown error").to_string();
                return Err(CliError::Load(message));
            }
            LoadOutcome::Failed | LoadOutcome::Skipped | LoadOutcome::Stale => break,
        }
    }
    Ok(())
}

/// Parses a review status, accepting the platform's own strings, outcome
/// names, and "none" to clear.
fn parse_status(platform: Platform, value: &str) -> Result<Option<ReviewStatus>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("none") || trimmed.eq_ignore_ascii_case("clear") {
        return Ok(None);
    }
    match ReviewStatus::parse(platform, trimmed) {
        Ok(status) => Ok(Some(status)),
        Err(err) => match trimmed.parse::<ReviewOutcome>() {
            Ok(outcome) => ReviewStatus::from_outcome(platform, outcome),
            Err(_) => Err(err),
        },
    }
}

fn status_label(status: Option<ReviewStatus>) -> &'static str {
    status.map(|s| s.as_str()).unwrap_or("unreviewed")
}

#[cfg(test)]
mod tests {
    use moddash_lib::model::InstagramReview;
    use moddash_lib::model::RedditReview;

    use super::*;

    #[test]
    fn test_parse_status_accepts_wire_strings() {
        assert_eq!(
            parse_status(Platform::Reddit, "No Seller"),
            Ok(Some(ReviewStatus::Reddit(RedditReview::NoSeller)))
        );
        assert_eq!(
            parse_status(Platform::Instagram, "ok"),
            Ok(Some(ReviewStatus::Instagram(InstagramReview::Ok)))
        );
    }

    #[test]
    fn test_parse_status_accepts_outcomes() {
        assert_eq!(
            parse_status(Platform::Reddit, "approved"),
            Ok(Some(ReviewStatus::Reddit(RedditReview::Ok)))
        );
        assert_eq!(
            parse_status(Platform::Instagram, "rejected"),
            Ok(Some(ReviewStatus::Instagram(InstagramReview::NonRelated)))
        );
        assert_eq!(parse_status(Platform::Reddit, "unreviewed"), Ok(None));
    }

    #[test]
    fn test_parse_status_clears() {
        assert_eq!(parse_status(Platform::Reddit, "none"), Ok(None));
        assert_eq!(parse_status(Platform::Instagram, " Clear "), Ok(None));
    }

    #[test]
    fn test_parse_status_rejects_unknown() {
        assert!(parse_status(Platform::Reddit, "maybe").is_err());
        assert!(parse_status(Platform::Instagram, "no_seller").is_err());
    }

    #[test]
    fn test_cli_parses_filters() {
        let cli = Cli::try_parse_from([
            "moddash", "--demo", "-p", "instagram", "list", "--review", "unreviewed", "--tag",
            "Tech", "--sort", "engagement", "--asc", "--max-rows", "50",
        ])
        .unwrap();
        assert_eq!(cli.platform, Platform::Instagram);

        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        let query = args.filter.query(cli.platform).unwrap();
        assert_eq!(query.review, Some(ReviewOutcome::Unreviewed));
        assert_eq!(query.tags, vec!["Tech"]);
        assert_eq!(query.order, OrderBy::asc(SortField::Engagement));
        assert_eq!(query.max_rows, Some(50));
    }

    #[test]
    fn test_cli_parses_tag_rename() {
        let cli = Cli::try_parse_from(["moddash", "--demo", "tag", "rename", "1004", "Tech", "Hardware"])
            .unwrap();
        let Command::Tag(command) = cli.command else {
            panic!("expected tag");
        };
        assert_eq!(
            command.into_edit(),
            (
                EntityId(1004),
                TagEdit::Rename {
                    from: "Tech".into(),
                    to: "Hardware".into()
                }
            )
        );
    }

    #[tokio::test]
    async fn test_demo_list_loads_first_page() {
        let backend: Arc<dyn Backend> = Arc::new(demo::backend());
        let query = EntityQuery::new(Platform::Reddit).page_size(5);
        let mut feed = EntityFeed::new(backend, query);

        load_pages(&mut feed, 2).await.unwrap();
        assert_eq!(feed.len(), 10);
        assert!(feed.has_more());
    }
}
