use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{KwError, Result};
use crate::log::ActivityLog;
use crate::tools::ads::{AdsClient, KOREAN_LANGUAGE_ID, KOREA_LOCATION_ID};
use crate::tools::blog::{analyze_posts, analyze_snippets, fetch_post_documents};
use crate::tools::compare::{compare_documents, Engine};
use crate::tools::google::{
    analyze_cse, analyze_wsa, CseClient, Device, GoogleSerpCounter, WsaClient,
};
use crate::tools::naver::{BlogScraper, NaverClient, NaverSerpCounter, Vertical};
use crate::tools::serp::{analyze_naver_serp, SerpMode};
use crate::tools::types::BlogItem;

/// JSON envelope every command prints.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

#[derive(Parser)]
#[command(
    name = "kwlens",
    version,
    about = "Keyword and SERP statistics from Naver and Google (JSON only)"
)]
pub struct Cli {
    /// Read credentials from this file instead of ./.env
    #[arg(long, global = true, value_name = "PATH", env = "KWLENS_ENV_FILE")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify the sections of the Naver results page
    Sections {
        keyword: String,
        #[arg(long, default_value = "pc")]
        mode: SerpMode,
    },
    /// Analyze the snippets of the top blog posts
    Blog(BlogArgs),
    /// Fetch the top blog posts and analyze their bodies
    Posts {
        keyword: String,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// Result total from the Naver Open API
    Count {
        keyword: String,
        #[arg(long, default_value = "webkr")]
        vertical: Vertical,
    },
    /// Result totals printed on Naver or Google results pages
    SerpCount(SerpCountArgs),
    /// Google Custom Search listing, or its result total with --total
    Cse {
        keyword: String,
        #[arg(long, default_value = "ko")]
        lang: String,
        #[arg(long, default_value = "KR")]
        country: String,
        #[arg(long)]
        total: bool,
    },
    /// Google results page sections through WebScrapingAPI
    Wsa {
        keyword: String,
        #[arg(long, default_value = "desktop")]
        device: Device,
        #[arg(long, default_value = "ko")]
        lang: String,
    },
    /// Keyword ideas from the Google Ads Keyword Planner
    Ideas(IdeasArgs),
    /// Compare document counts on Naver and Google
    Compare {
        keyword: String,
        #[arg(long, default_value = "both")]
        engine: Engine,
    },
    /// Show which credentials are configured
    Status,
    /// Show the activity log, newest first
    Log {
        /// Only lines containing this text
        #[arg(long)]
        filter: Option<String>,
        #[arg(long)]
        errors: bool,
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BlogSource {
    /// Naver Open API blog search
    Api,
    /// Naver blog results page
    Scrape,
}

#[derive(Args)]
struct BlogArgs {
    keyword: String,
    #[arg(long, value_enum, default_value = "scrape")]
    source: BlogSource,
    #[arg(long, default_value_t = 10)]
    count: usize,
    /// Keep SERP snippets instead of reading each post's meta description
    #[arg(long)]
    no_enrich: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CountEngine {
    Naver,
    Google,
}

#[derive(Args)]
struct SerpCountArgs {
    #[arg(required = true)]
    keywords: Vec<String>,
    #[arg(long, value_enum, default_value = "google")]
    engine: CountEngine,
    #[arg(long, default_value = "ko")]
    hl: String,
    #[arg(long, default_value = "kr")]
    gl: String,
}

#[derive(Args)]
struct IdeasArgs {
    /// Seed keywords
    keywords: Vec<String>,
    /// Seed page
    #[arg(long)]
    url: Option<String>,
    #[arg(long = "location", default_values_t = [KOREA_LOCATION_ID])]
    locations: Vec<u64>,
    #[arg(long, default_value_t = KOREAN_LANGUAGE_ID)]
    language: u64,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Sections { .. } => "sections",
            Command::Blog(_) => "blog",
            Command::Posts { .. } => "posts",
            Command::Count { .. } => "count",
            Command::SerpCount(_) => "serp-count",
            Command::Cse { .. } => "cse",
            Command::Wsa { .. } => "wsa",
            Command::Ideas(_) => "ideas",
            Command::Compare { .. } => "compare",
            Command::Status => "status",
            Command::Log { .. } => "log",
        }
    }

    fn keyword(&self) -> Option<String> {
        match self {
            Command::Sections { keyword, .. }
            | Command::Posts { keyword, .. }
            | Command::Count { keyword, .. }
            | Command::Cse { keyword, .. }
            | Command::Wsa { keyword, .. }
            | Command::Compare { keyword, .. } => Some(keyword.clone()),
            Command::Blog(args) => Some(args.keyword.clone()),
            Command::SerpCount(args) => Some(args.keywords.join(",")),
            Command::Ideas(args) if !args.keywords.is_empty() => Some(args.keywords.join(",")),
            Command::Ideas(args) => args.url.clone(),
            Command::Status | Command::Log { .. } => None,
        }
    }
}

/// Run one command, print its JSON envelope, and report whether it succeeded.
pub async fn run(cli: Cli) -> bool {
    let settings = match Settings::load(cli.env_file.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            print_json(ApiResponse::<()>::err(e.to_string()));
            return false;
        }
    };

    let activity = ActivityLog::new()
        .map_err(|e| tracing::debug!(error = %e, "activity log unavailable"))
        .ok();
    let name = cli.cmd.name();
    let keyword = cli.cmd.keyword();
    let logged = !matches!(cli.cmd, Command::Log { .. });

    let outcome = dispatch(&settings, cli.cmd).await;
    if let (Some(log), true) = (&activity, logged) {
        match &outcome {
            Ok(_) => log.info(name, keyword.as_deref(), None),
            Err(e) => log.error(name, keyword.as_deref(), Some(&e.to_string())),
        }
    }
    finish(outcome)
}

async fn dispatch(settings: &Settings, cmd: Command) -> Result<Value> {
    match cmd {
        Command::Sections { keyword, mode } => to_json(analyze_naver_serp(&keyword, mode).await?),
        Command::Blog(args) => blog_cmd(settings, args).await,
        Command::Posts { keyword, count } => {
            let items = BlogScraper::new().fetch_top_blogs(&keyword, count).await?;
            let docs = fetch_post_documents(items, count).await;
            to_json(json!({
                "keyword": keyword,
                "analysis": analyze_posts(&keyword, &docs),
            }))
        }
        Command::Count { keyword, vertical } => {
            let client = NaverClient::new(settings.naver.clone())?;
            let count = client.search_count(&keyword, vertical).await?;
            to_json(json!({
                "keyword": keyword,
                "vertical": vertical,
                "count": count,
            }))
        }
        Command::SerpCount(args) => serp_count_cmd(args).await,
        Command::Cse {
            keyword,
            lang,
            country,
            total,
        } => {
            let client = CseClient::new(settings.cse.clone())?;
            if total {
                let count = client.total_results(&keyword, &lang, &country).await?;
                to_json(json!({ "keyword": keyword, "count": count }))
            } else {
                to_json(analyze_cse(&client, &keyword, &lang).await?)
            }
        }
        Command::Wsa {
            keyword,
            device,
            lang,
        } => {
            let client = WsaClient::new(settings.wsa_api_key()?)?;
            to_json(analyze_wsa(&client, &keyword, device, &lang).await?)
        }
        Command::Ideas(args) => {
            let client = AdsClient::new(settings.ads.clone())?;
            let ideas = client
                .generate_keyword_ideas(
                    &args.keywords,
                    args.url.as_deref(),
                    &args.locations,
                    args.language,
                )
                .await?;
            to_json(json!({
                "total": ideas.len(),
                "ideas": ideas,
            }))
        }
        Command::Compare { keyword, engine } => {
            let naver = NaverSerpCounter::new();
            let google = CseClient::new(settings.cse.clone())?;
            to_json(compare_documents(&keyword, engine, &naver, &google).await)
        }
        Command::Status => {
            let log_path = ActivityLog::new()
                .ok()
                .map(|log| log.path().display().to_string());
            to_json(json!({
                "credentials": settings.status(),
                "activity_log": log_path,
            }))
        }
        Command::Log {
            filter,
            errors,
            limit,
        } => {
            let mut lines = ActivityLog::new()?.read_logs(filter.as_deref(), errors)?;
            lines.truncate(limit);
            to_json(lines)
        }
    }
}

async fn blog_cmd(settings: &Settings, args: BlogArgs) -> Result<Value> {
    let items: Vec<BlogItem> = match args.source {
        BlogSource::Api => {
            let client = NaverClient::new(settings.naver.clone())?;
            let display = u32::try_from(args.count).unwrap_or(u32::MAX);
            let response = client.search_blogs(&args.keyword, display).await?;
            response.items.iter().map(BlogItem::from).collect()
        }
        BlogSource::Scrape => {
            let mut scraper = BlogScraper::new();
            if args.no_enrich {
                scraper = scraper.without_descriptions();
            }
            scraper.fetch_top_blogs(&args.keyword, args.count).await?
        }
    };

    let analysis = analyze_snippets(&args.keyword, &items);
    to_json(json!({
        "keyword": args.keyword,
        "items": items,
        "analysis": analysis,
    }))
}

async fn serp_count_cmd(args: SerpCountArgs) -> Result<Value> {
    match args.engine {
        CountEngine::Google => {
            let counts = GoogleSerpCounter::new()
                .count_many(&args.keywords, &args.hl, &args.gl)
                .await;
            to_json(counts)
        }
        CountEngine::Naver => {
            let counter = NaverSerpCounter::new();
            let mut counts = Vec::with_capacity(args.keywords.len());
            for keyword in &args.keywords {
                let entry = match counter.count(keyword).await {
                    Ok(total) => json!({ "keyword": keyword, "count": total }),
                    Err(e) => json!({ "keyword": keyword, "count": null, "error": e.to_string() }),
                };
                counts.push(entry);
            }
            to_json(counts)
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(KwError::from)
}

fn finish(res: Result<Value>) -> bool {
    match res {
        Ok(v) => {
            print_json(ApiResponse::ok(v));
            true
        }
        Err(e) => {
            print_json(ApiResponse::<()>::err(e.to_string()));
            false
        }
    }
}

fn print_json<T: Serialize>(val: T) {
    match serde_json::to_string_pretty(&val) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to render output: {e}"),
    }
}
