//! Zilnames CLI
//!
//! Command-line interface for resolving Zilliqa names.

use std::fmt::Display;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zilnames_api::{ApiConfig, ApiServer};
use zilnames_core::types::{Network, Resolution};
use zilnames_resolver::{RpcConfig, ZilnameResolver};

/// Zilnames - name resolution for Zilliqa
#[derive(Parser)]
#[command(name = "zilnames")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    endpoints: Endpoints,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Endpoints {
    /// Mainnet JSON-RPC URL
    #[arg(long, global = true, env = "ZILLIQA_RPC_URL")]
    rpc_url: Option<String>,

    /// Testnet JSON-RPC URL
    #[arg(long, global = true, env = "ZILLIQA_TESTNET_RPC_URL")]
    testnet_rpc_url: Option<String>,

    /// Gateway base URL for ipfs:// avatars
    #[arg(long, global = true, env = "IPFS_GATEWAY_URL")]
    ipfs_gateway: Option<String>,

    /// Per-request timeout in seconds (none by default)
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a name to its address
    Address {
        /// Name to resolve, e.g. darthgus.zil
        name: String,
        /// Chain id (defaults to the network owning the name's suffix)
        #[arg(long)]
        chain_id: Option<u64>,
    },

    /// Resolve an address to its primary name
    Name {
        /// 0x-prefixed address
        address: String,
        /// Chain id
        #[arg(long)]
        chain_id: Option<u64>,
    },

    /// Resolve a name's avatar URL
    Avatar {
        /// Name to resolve
        name: String,
        /// Chain id (defaults to the network owning the name's suffix)
        #[arg(long)]
        chain_id: Option<u64>,
    },

    /// Resolve an address's name and avatar
    Profile {
        /// 0x-prefixed address
        address: String,
        /// Chain id
        #[arg(long)]
        chain_id: Option<u64>,
    },

    /// List supported networks
    Networks,

    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "zilnames=debug,info"
    } else {
        "zilnames=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = api_config(&cli.endpoints);

    match cli.command {
        Commands::Address { name, chain_id } => {
            cmd_address(&config, &cli.endpoints, &name, chain_id).await
        }
        Commands::Name { address, chain_id } => {
            cmd_name(&config, &cli.endpoints, &address, chain_id).await
        }
        Commands::Avatar { name, chain_id } => {
            cmd_avatar(&config, &cli.endpoints, &name, chain_id).await
        }
        Commands::Profile { address, chain_id } => {
            cmd_profile(&config, &cli.endpoints, &address, chain_id).await
        }
        Commands::Networks => cmd_networks(&config),
        Commands::Serve { port, bind } => cmd_serve(config, port, &bind).await,
    }
}

/// Environment config with command-line overrides applied.
fn api_config(endpoints: &Endpoints) -> ApiConfig {
    let mut config = ApiConfig::from_env();
    if let Some(url) = &endpoints.rpc_url {
        config.zilliqa_rpc_url = url.clone();
    }
    if let Some(url) = &endpoints.testnet_rpc_url {
        config.zilliqa_testnet_rpc_url = url.clone();
    }
    if let Some(url) = &endpoints.ipfs_gateway {
        config.ipfs_gateway_url = url.clone();
    }
    config
}

fn build_resolver(config: &ApiConfig, endpoints: &Endpoints) -> Result<ZilnameResolver> {
    let mut resolver_config = config.resolver_config();
    if let Some(seconds) = endpoints.timeout {
        resolver_config.rpc = RpcConfig::default().with_timeout(seconds);
    }
    ZilnameResolver::with_config(resolver_config).context("Failed to build resolver")
}

/// Explicit chain, else the name's suffix network, else the default network.
fn chain_for_name(resolver: &ZilnameResolver, name: &str, chain_id: Option<u64>) -> u64 {
    chain_id.unwrap_or_else(|| {
        resolver
            .network_for_name(name)
            .unwrap_or_else(|_| resolver.networks().default_network())
            .chain_id()
    })
}

fn chain_label(chain_id: u64) -> String {
    match Network::from_chain_id(chain_id) {
        Some(network) => format!("{network} ({chain_id})"),
        None => format!("chain {chain_id}"),
    }
}

/// Prints one outcome. `absent` words the `NotFound` case.
fn report<T: Display>(label: &str, resolution: Resolution<T>, absent: &str) -> Result<()> {
    let heading = format!("{label}:");
    match resolution {
        Resolution::Found(value) => {
            println!("   {} {}", heading.dimmed(), value.to_string().green().bold());
            Ok(())
        }
        Resolution::NotFound => {
            println!("   {} {}", heading.dimmed(), absent.yellow());
            Ok(())
        }
        Resolution::Unsupported(chain_id) => {
            let message = format!("chain {chain_id} is not supported");
            println!("   {} {}", heading.dimmed(), message.red());
            anyhow::bail!("unsupported network: chain id {chain_id}")
        }
        Resolution::Failed(err) => {
            println!("   {} {}", heading.dimmed(), "lookup failed".red());
            Err(err).with_context(|| format!("Failed to resolve {label}"))
        }
    }
}

/// Resolve a name to its address
async fn cmd_address(
    config: &ApiConfig,
    endpoints: &Endpoints,
    name: &str,
    chain_id: Option<u64>,
) -> Result<()> {
    let resolver = build_resolver(config, endpoints)?;
    let chain_id = chain_for_name(&resolver, name, chain_id);
    debug!(name, chain_id, "Resolving address");

    println!("{} {} on {}", "🔍 Resolving:".cyan().bold(), name, chain_label(chain_id));
    let resolution = resolver.resolve_address(name, chain_id).await;
    report("Address", resolution, "no address record set")
}

/// Resolve an address to its primary name
async fn cmd_name(
    config: &ApiConfig,
    endpoints: &Endpoints,
    address: &str,
    chain_id: Option<u64>,
) -> Result<()> {
    let resolver = build_resolver(config, endpoints)?;
    let chain_id = chain_id.unwrap_or_else(|| resolver.networks().default_network().chain_id());
    debug!(address, chain_id, "Resolving name");

    println!("{} {} on {}", "🔍 Reverse lookup:".cyan().bold(), address, chain_label(chain_id));
    let resolution = resolver.resolve_name(address, chain_id).await;
    report("Name", resolution, "no reverse record set")
}

/// Resolve a name's avatar
async fn cmd_avatar(
    config: &ApiConfig,
    endpoints: &Endpoints,
    name: &str,
    chain_id: Option<u64>,
) -> Result<()> {
    let resolver = build_resolver(config, endpoints)?;
    let chain_id = chain_for_name(&resolver, name, chain_id);

    println!("{} {} on {}", "🖼  Avatar for:".cyan().bold(), name, chain_label(chain_id));
    let resolution = resolver.resolve_avatar(name, chain_id).await;
    report("Avatar", resolution, "no avatar record set")
}

/// Resolve name and avatar for an address
async fn cmd_profile(
    config: &ApiConfig,
    endpoints: &Endpoints,
    address: &str,
    chain_id: Option<u64>,
) -> Result<()> {
    let resolver = build_resolver(config, endpoints)?;
    let chain_id = chain_id.unwrap_or_else(|| resolver.networks().default_network().chain_id());

    println!("{} {} on {}", "👤 Profile:".cyan().bold(), address, chain_label(chain_id));
    let profile = resolver.resolve_profile(address, chain_id).await;
    let name_found = profile.name.is_found();

    report("Name", profile.name, "no reverse record set")?;
    if name_found {
        report("Avatar", profile.avatar, "no avatar record set")?;
    }
    Ok(())
}

/// List supported networks
fn cmd_networks(config: &ApiConfig) -> Result<()> {
    let resolver_config = config.resolver_config();
    let networks = &resolver_config.networks;
    let default = networks.default_network();

    println!("{}", "🌐 Supported networks".cyan().bold());
    for entry in networks.iter() {
        let network = entry.network;
        let marker = if network == default {
            " (default)".green().to_string()
        } else {
            String::new()
        };
        println!("\n   {}{}", network.display_name().bold(), marker);
        println!("   {} {}", "Chain id:".dimmed(), network.chain_id());
        println!("   {} .{}", "Suffix:".dimmed(), network.name_suffix());
        println!("   {} {}", "RPC:".dimmed(), entry.rpc_url);
        println!("   {} {}", "Resolver:".dimmed(), network.resolver_address());
        println!("   {} 0x{:X}", "Coin type:".dimmed(), network.coin_type());
    }

    Ok(())
}

/// Run API server
async fn cmd_serve(config: ApiConfig, port: u16, bind: &str) -> Result<()> {
    println!("{}", "🚀 Starting Zilnames API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config).context("Failed to configure API server")?;

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}
