//! Catalyseed CLI — local admin tool over the JSON-file stores.
//!
//! Configuration comes from the environment (CATALYSEED_* variables, .env
//! honored). Share-image rendering needs CATALYSEED_SHARE_FONT pointing at
//! a TTF/OTF file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use catalyseed_auth::{AuthSession, LocalIdentityProvider, UserRepository};
use catalyseed_cli::{init_tracing, truncate_string};
use catalyseed_content::{ContentRepository, PhotoUpload, StoryAdmin, StoryDraft};
use catalyseed_core::models::{SignupData, SuccessStory, UserRole};
use catalyseed_core::Config;
use catalyseed_share::{
    FontPainter, HttpAssetResolver, IntentLauncher, ShareComposer, ShareImageRenderer,
    ShareUrlBuilder, Shareable,
};
use catalyseed_store::{LocalBlobStorage, LocalDocumentStore};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "catalyseed", about = "Catalyseed platform CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Success story operations
    Story {
        #[command(subcommand)]
        sub: StoryCommands,
    },
    /// Share a story: URLs, cards, platform intents
    Share {
        #[command(subcommand)]
        sub: ShareCommands,
    },
    /// Toggle the like counter on a story
    Like {
        /// Story UUID
        id: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Account role: startup, institute, investor, general, admin
        #[arg(long, default_value = "general")]
        role: String,
        /// Required when signing up as admin
        #[arg(long)]
        admin_code: Option<String>,
    },
}

#[derive(Subcommand)]
enum StoryCommands {
    /// List published stories
    List,
    /// Print one story as JSON
    Get {
        /// Story UUID
        id: String,
    },
    /// Validate and persist a story draft from a JSON file
    Submit {
        /// Path to the draft JSON
        file: PathBuf,
        /// Product/service photos to upload and attach
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,
        /// Inventor photo to upload and attach
        #[arg(long)]
        inventor_photo: Option<PathBuf>,
        /// Editor user UUID recorded on the document
        #[arg(long)]
        editor: Option<uuid::Uuid>,
    },
}

#[derive(Subcommand)]
enum ShareCommands {
    /// Print the canonical share URL
    Url {
        /// Story UUID
        id: String,
    },
    /// Render the share card PNG
    Image {
        /// Story UUID
        id: String,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Open a platform share intent and record the share
    Post {
        /// Story UUID
        id: String,
        /// twitter, linkedin, facebook, whatsapp, telegram, or reddit
        platform: String,
    },
}

/// Launcher that prints the intent URL for the user to open.
struct PrintLauncher;

impl IntentLauncher for PrintLauncher {
    fn open(&self, url: &str) {
        println!("{url}");
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{out}");
    Ok(())
}

struct App {
    config: Config,
    store: Arc<LocalDocumentStore>,
}

impl App {
    async fn from_env() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        let store = Arc::new(
            LocalDocumentStore::new(&config.data_dir)
                .await
                .context("Open document store")?,
        );
        Ok(Self { config, store })
    }

    fn stories(&self) -> ContentRepository<SuccessStory> {
        ContentRepository::new(self.store.clone())
    }

    async fn load_story(&self, id: &str) -> anyhow::Result<SuccessStory> {
        self.stories()
            .get(id)
            .await?
            .with_context(|| format!("No story with id {id}"))
    }

    fn composer(&self) -> ShareComposer {
        ShareComposer::new(
            self.store.clone(),
            ShareUrlBuilder::new(self.config.site_base_url.clone()),
            Arc::new(PrintLauncher),
        )
    }
}

fn read_photo(path: &PathBuf) -> anyhow::Result<PhotoUpload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Read photo {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("No file name in {}", path.display()))?;
    Ok(PhotoUpload { filename, bytes })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let app = App::from_env().await?;

    match cli.command {
        Commands::Story { sub } => match sub {
            StoryCommands::List => {
                let stories = app.stories().list_published().await?;
                for story in &stories {
                    println!(
                        "{}  {:<30}  score {:>2}/40  likes {:>4}  shares {:>4}",
                        story.id,
                        truncate_string(&story.company_startup_name, 30),
                        story.total_score,
                        story.likes,
                        story.share_count,
                    );
                }
                eprintln!("{} published stories", stories.len());
            }
            StoryCommands::Get { id } => {
                print_json(&app.load_story(&id).await?)?;
            }
            StoryCommands::Submit {
                file,
                photos,
                inventor_photo,
                editor,
            } => {
                let raw = std::fs::read_to_string(&file)
                    .with_context(|| format!("Read draft {}", file.display()))?;
                let draft: StoryDraft =
                    serde_json::from_str(&raw).context("Parse draft JSON")?;
                let new_pictures = photos
                    .iter()
                    .map(read_photo)
                    .collect::<anyhow::Result<Vec<_>>>()?;
                let new_inventor_photo =
                    inventor_photo.as_ref().map(read_photo).transpose()?;

                let blobs = Arc::new(
                    LocalBlobStorage::new(
                        &app.config.blob_dir,
                        app.config.blob_base_url.clone(),
                    )
                    .await
                    .context("Open blob storage")?,
                );
                let admin = StoryAdmin::new(app.store.clone(), blobs);
                let story = admin
                    .submit(
                        draft,
                        new_pictures,
                        new_inventor_photo,
                        editor.unwrap_or_else(uuid::Uuid::new_v4),
                    )
                    .await?;
                print_json(&story)?;
            }
        },
        Commands::Share { sub } => match sub {
            ShareCommands::Url { id } => {
                let story = app.load_story(&id).await?;
                println!("{}", app.composer().share_url(&story));
            }
            ShareCommands::Image { id, out } => {
                let story = app.load_story(&id).await?;
                let font_path = app
                    .config
                    .share_font_path
                    .as_ref()
                    .context("CATALYSEED_SHARE_FONT must point at a TTF/OTF font")?;
                let painter = FontPainter::from_file(font_path)?;
                let resolver = HttpAssetResolver::new(app.config.asset_fetch_timeout_secs)?;
                let renderer =
                    ShareImageRenderer::new(Arc::new(painter), Arc::new(resolver));
                let rendered = renderer.render(&story.share_target()).await?;
                let path = out.join(&rendered.file_name);
                std::fs::write(&path, &rendered.png)
                    .with_context(|| format!("Write {}", path.display()))?;
                println!("{}", path.display());
            }
            ShareCommands::Post { id, platform } => {
                let story = app.load_story(&id).await?;
                match app.composer().share_to_platform(&story, &platform).await? {
                    Some(platform) => eprintln!("Shared to {platform}"),
                    None => eprintln!("Unknown platform {platform:?}; nothing shared"),
                }
            }
        },
        Commands::Like { id } => {
            let story = app.load_story(&id).await?;
            let outcome = app.composer().toggle_like(&story).await?;
            print_json(&serde_json::json!({
                "liked": outcome.liked,
                "likes": outcome.likes,
            }))?;
        }
        Commands::Signup {
            name,
            email,
            password,
            role,
            admin_code,
        } => {
            let role: UserRole = serde_json::from_value(serde_json::Value::String(
                role.to_lowercase(),
            ))
            .map_err(|_| anyhow::anyhow!("Unknown role {role:?}"))?;
            let provider = Arc::new(LocalIdentityProvider::new());
            let users = UserRepository::new(app.store.clone());
            let session = AuthSession::new(provider, users, app.config.admin_signup_code.clone());
            let outcome = session
                .signup(
                    SignupData {
                        name,
                        email,
                        password,
                        role,
                        profile: None,
                    },
                    admin_code.as_deref(),
                )
                .await?;
            if outcome.needs_profile_completion {
                eprintln!("Account created; profile completion pending");
            }
            print_json(&outcome.user)?;
        }
    }

    Ok(())
}
