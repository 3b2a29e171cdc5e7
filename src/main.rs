use instancer::api::{self, ComputeApi, HttpComputeApi};
use instancer::config;
use instancer::models::ServerRecord;
use instancer::services::{complete_image_label, create_server, CreateServerArgs, ProvisionSettings};
use instancer::utils::{format_state, value_to_short_string};

use std::process;
use std::time::Duration;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use comfy_table::{Table, presets, modifiers, ContentArrangement};
use terminal_size::{Width, terminal_size};
use indicatif::{ProgressBar, ProgressStyle};

use config::{DEFAULT_COMMERCIAL_TYPE, DEFAULT_IP, DEFAULT_WAIT_TIMEOUT_SECS, KNOWN_COMMERCIAL_TYPES};

fn build_api() -> HttpComputeApi {
    match HttpComputeApi::new(config::get_api_base_url(), config::get_api_token()) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(%e, "Failed to create API client");
            eprintln!("{}: {}", yansi::Paint::red("Failed to create API client"), e);
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn print_server(server: &ServerRecord, as_json: bool) {
    let value = match serde_json::to_value(server) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}: {}", yansi::Paint::red("Failed to encode server"), e);
            process::exit(1);
        }
    };
    if as_json {
        println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        return;
    }

    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    if let Some(obj) = value.as_object() {
        for (k, v) in obj {
            let cell = if k == "state" {
                format_state(v.as_str().unwrap_or_default())
            } else {
                value_to_short_string(v)
            };
            table.add_row(vec![k.as_str(), cell.as_str()]);
        }
    }
    println!("\n{table}\n");
}

fn commercial_type_help() -> String {
    format!("Commercial type of the server (known: {})", KNOWN_COMMERCIAL_TYPES.join(", "))
}

#[derive(Parser)]
#[command(
    name = "instancer",
    author,
    version,
    about = "Create compute servers from a short description",
    long_about = r#"instancer resolves images, IPs and volumes for a new server, checks them against what the API allows, then creates it.

Configuration comes from environment variables or a .env file (see `--env-file`): API_BASE_URL, API_TOKEN, DEFAULT_ZONE, DEFAULT_ORGANIZATION_ID, DEFAULT_ROOT_VOLUME_SIZE.

Examples:
  1) Create a server from a marketplace image:
      instancer server create --image ubuntu_focal
  2) Create a server with a 20GB local root volume and a 50GB block volume:
      instancer server create --image ubuntu_focal --root-volume l:20GB --additional-volumes b:50GB
  3) Create a server without a public IP and start it:
      instancer server create --image ubuntu_focal --ip none --start --wait
"#,
    after_help = "Use `instancer <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage servers
    Server {
        #[command(subcommand)]
        sub: ServerCommands,
    },
    /// Marketplace image helpers
    Image {
        #[command(subcommand)]
        sub: ImageCommands,
    },
    /// Validate configuration (env vars / API credentials)
    #[command(about = "Validate configuration and ensure API connectivity.", long_about = "Validate the environment variables used by instancer, then validate the configured API token by listing the server types of the default zone.")]
    CheckConfig,
}

#[derive(Subcommand)]
enum ServerCommands {
    /// Create a server
    #[command(about = "Create a server", long_about = r#"Create a server, reserving a new flexible IP first unless `--ip` says otherwise.

Volumes are given as `<class>:<size>` (class `l`/`local` or `b`/`block`, e.g. `l:20GB`) or as the UUID of an existing unattached volume. The root volume must be a new local volume.

`--ip` accepts `new`, `dynamic`, `none`, the UUID of a flexible IP or an address you already reserved.

Image may be a UUID or a marketplace label such as `ubuntu_focal`."#)]
    Create {
        /// Zone to create the server in
        #[arg(long)]
        zone: Option<String>,
        /// Organization owning the server, IP and volumes
        #[arg(long)]
        organization_id: Option<String>,
        /// Image UUID or marketplace label
        #[arg(long)]
        image: String,
        #[arg(long = "type", default_value = DEFAULT_COMMERCIAL_TYPE, help = commercial_type_help())]
        commercial_type: String,
        /// Server name (random when omitted)
        #[arg(long)]
        name: Option<String>,
        /// Root volume, e.g. l:20GB
        #[arg(long)]
        root_volume: Option<String>,
        /// Additional volume, repeatable: b:50GB or a volume UUID
        #[arg(long = "additional-volumes")]
        additional_volumes: Vec<String>,
        /// new, dynamic, none, an IP UUID or a reserved address
        #[arg(long, default_value = DEFAULT_IP)]
        ip: String,
        /// Tag, repeatable
        #[arg(long = "tags")]
        tags: Vec<String>,
        /// Enable IPv6
        #[arg(long)]
        ipv6: bool,
        /// Power the server on once created
        #[arg(long)]
        start: bool,
        /// Wait until the server reaches a settled state
        #[arg(long)]
        wait: bool,
        #[arg(long)]
        security_group_id: Option<String>,
        #[arg(long)]
        placement_group_id: Option<String>,
        /// Bootscript UUID
        #[arg(long)]
        bootscript_id: Option<String>,
        /// Print the server as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ImageCommands {
    /// Print marketplace labels starting with a prefix
    Complete {
        #[arg(default_value = "")]
        prefix: String,
    },
}

async fn wait_with_spinner(api: &HttpComputeApi, zone: &str, server: &ServerRecord) -> Option<ServerRecord> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Waiting for server {}", server.id));
    pb.enable_steady_tick(Duration::from_millis(120));

    let result = api
        .wait_for_server(zone, &server.id, Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS))
        .await;
    pb.finish_and_clear();

    match result {
        Ok(settled) => Some(settled),
        Err(e) => {
            tracing::warn!(%e, "wait failed");
            eprintln!("{}: {}", yansi::Paint::yellow("Failed to wait for server"), e);
            None
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // CLI parsing
    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    config::load_env_file(cli.env_file.as_deref());

    match cli.command {
        Commands::CheckConfig => {
            let mut ok = true;
            if std::env::var("API_BASE_URL").map(|v| v.trim().is_empty()).unwrap_or(true) {
                println!(
                    "{} {}",
                    yansi::Paint::new("API_BASE_URL is not set, using").yellow(),
                    config::get_api_base_url()
                );
            }
            if config::get_api_token().trim().is_empty() {
                eprintln!("{}", yansi::Paint::new("API_TOKEN is not configured").red());
                ok = false;
            }
            if !ok {
                process::exit(1);
            }
            let api = build_api();
            let zone = config::get_default_zone();
            match api.list_server_type_constraints(&zone).await {
                Ok(types) => {
                    println!(
                        "{}",
                        yansi::Paint::new(format!(
                            "Configuration looks valid ({} server types returned for {})",
                            types.len(),
                            zone
                        ))
                        .green()
                    );
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Configuration appears invalid").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Image { sub } => match sub {
            ImageCommands::Complete { prefix } => {
                let api = build_api();
                for label in complete_image_label(&api, &prefix).await {
                    println!("{}", label);
                }
            }
        },
        Commands::Server { sub } => match sub {
            ServerCommands::Create {
                zone,
                organization_id,
                image,
                commercial_type,
                name,
                root_volume,
                additional_volumes,
                ip,
                tags,
                ipv6,
                start,
                wait,
                security_group_id,
                placement_group_id,
                bootscript_id,
                json,
            } => {
                let zone = zone.unwrap_or_else(config::get_default_zone);
                let args = CreateServerArgs {
                    organization_id: organization_id.or_else(config::get_default_organization_id),
                    commercial_type,
                    name,
                    root_volume,
                    additional_volumes,
                    ip,
                    tags,
                    ipv6,
                    start,
                    security_group_id,
                    placement_group_id,
                    bootscript_id,
                    ..CreateServerArgs::new(zone.clone(), image)
                };
                let settings = ProvisionSettings {
                    default_root_volume_size: config::get_default_root_volume_size(),
                };

                let api = build_api();
                let server = match create_server(&api, &args, &settings).await {
                    Ok(server) => server,
                    Err(e) => {
                        tracing::error!(%e, "server creation failed");
                        eprintln!("{}", yansi::Paint::new(&e).red());
                        if let Some(hint) = e.hint() {
                            eprintln!("{} {}", yansi::Paint::new("Hint:").yellow().bold(), hint);
                        }
                        process::exit(1);
                    }
                };

                let server = if wait {
                    wait_with_spinner(&api, &zone, &server).await.unwrap_or(server)
                } else {
                    server
                };
                print_server(&server, json);
            }
        },
    }
}
