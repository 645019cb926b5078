//! Hearth Host - interactive demo shell
//!
//! Stands in for a real hosting environment: users "join", wander, and
//! run home commands, while the session layer persists their homes to a
//! filesystem vault between sessions.
//!
//! Usage:
//!   hearth-host [--config hearth.toml] [--vault-dir ./hearth-data]
//!
//! Shell commands:
//!   join <user>                  open a session
//!   leave <user>                 close a session (flushes homes)
//!   move <user> <x> <y> <z>      walk somewhere
//!   sethome <user> [name]        save a home at the current spot
//!   home <user> [name]           travel to a home
//!   delhome <user> [name]        delete a home
//!   homes <user>                 list homes
//!   where <user>                 show the current spot
//!   save                         flush every active user now
//!   quit                         flush everyone and exit

use async_trait::async_trait;
use clap::Parser;
use dashmap::DashMap;
use hearth_core::{Home, UserId, WorldId};
use hearth_host::{
    DeleteOutcome, HomeCommands, HostConfig, Position, SetOutcome, Teleporter, VisitOutcome,
};
use hearth_store::{DefaultResolver, FsVault, HomeStore, SessionSync};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "hearth-host", about = "Interactive shell for the hearth home service")]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "hearth.toml")]
    config: PathBuf,

    /// Override the vault directory from the config
    #[arg(long)]
    vault_dir: Option<PathBuf>,

    /// Print the active configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

/// One flat demo world. Keeps each user's simulated position and acts
/// as the teleporter, so visiting a home actually moves the user.
struct ShellWorld {
    world: WorldId,
    positions: DashMap<UserId, Position>,
}

impl ShellWorld {
    fn new() -> Arc<Self> {
        // Stable across runs, so persisted homes stay reachable.
        let world = WorldId::new(Uuid::new_v5(&Uuid::NAMESPACE_OID, b"hearth-demo-world"));
        Arc::new(Self {
            world,
            positions: DashMap::new(),
        })
    }

    fn spawn_position(&self) -> Position {
        Position {
            world: self.world,
            x: 0.0,
            y: 64.0,
            z: 0.0,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    fn position(&self, user: UserId) -> Option<Position> {
        self.positions.get(&user).map(|pos| *pos)
    }

    fn place(&self, user: UserId, position: Position) {
        self.positions.insert(user, position);
    }

    fn displace(&self, user: UserId) {
        self.positions.remove(&user);
    }
}

#[async_trait]
impl Teleporter for ShellWorld {
    async fn send(&self, user: UserId, home: &Home) -> Result<(), String> {
        if home.world != self.world {
            return Err(format!("world {} is not loaded", home.world));
        }
        self.place(
            user,
            Position {
                world: home.world,
                x: home.x,
                y: home.y,
                z: home.z,
                yaw: home.yaw,
                pitch: home.pitch,
            },
        );
        Ok(())
    }
}

struct Shell {
    world: Arc<ShellWorld>,
    commands: HomeCommands,
    sync: Arc<SessionSync>,
    users: HashMap<String, UserId>,
}

impl Shell {
    /// Alias-to-identity mapping, stable across runs so a returning
    /// "alice" finds her old homes.
    fn user_id(alias: &str) -> UserId {
        UserId::new(Uuid::new_v5(&Uuid::NAMESPACE_OID, alias.as_bytes()))
    }

    fn joined(&self, alias: &str) -> Option<UserId> {
        let user = self.users.get(alias).copied();
        if user.is_none() {
            println!("{} has not joined", alias);
        }
        user
    }

    /// Handle one shell line. Returns `false` when the shell should exit.
    async fn handle(&mut self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return true;
        };
        let args: Vec<&str> = parts.collect();

        match verb {
            "join" => {
                let Some(alias) = args.first() else {
                    println!("usage: join <user>");
                    return true;
                };
                let user = Self::user_id(alias);
                self.users.insert(alias.to_string(), user);
                self.world.place(user, self.world.spawn_position());
                self.sync.on_user_active(user).await;
                let count = self.commands.homes(user).len();
                println!("{} joined with {} home(s)", alias, count);
            }
            "leave" => {
                let Some(alias) = args.first() else {
                    println!("usage: leave <user>");
                    return true;
                };
                let Some(user) = self.joined(alias) else {
                    return true;
                };
                self.sync.on_user_inactive(user).await;
                self.world.displace(user);
                self.users.remove(*alias);
                println!("{} left", alias);
            }
            "move" => {
                if args.len() != 4 {
                    println!("usage: move <user> <x> <y> <z>");
                    return true;
                }
                let Some(user) = self.joined(args[0]) else {
                    return true;
                };
                let coords: Vec<f64> = args[1..]
                    .iter()
                    .filter_map(|raw| raw.parse().ok())
                    .collect();
                if coords.len() != 3 {
                    println!("coordinates must be numbers");
                    return true;
                }
                let mut position = self.world.spawn_position();
                position.x = coords[0];
                position.y = coords[1];
                position.z = coords[2];
                self.world.place(user, position);
                println!(
                    "{} is now at ({:.1}, {:.1}, {:.1})",
                    args[0], position.x, position.y, position.z
                );
            }
            "sethome" => {
                let Some(alias) = args.first() else {
                    println!("usage: sethome <user> [name]");
                    return true;
                };
                let Some(user) = self.joined(alias) else {
                    return true;
                };
                let Some(position) = self.world.position(user) else {
                    println!("{} is nowhere, move them first", alias);
                    return true;
                };
                let name = join_name(&args[1..]);
                match self.commands.set(user, name.as_deref(), position) {
                    SetOutcome::Created(home) => println!("set {}", home),
                    SetOutcome::AlreadyExists(name) => {
                        println!("'{}' already exists, delete it first", name)
                    }
                }
            }
            "home" => {
                let Some(alias) = args.first() else {
                    println!("usage: home <user> [name]");
                    return true;
                };
                let Some(user) = self.joined(alias) else {
                    return true;
                };
                let name = join_name(&args[1..]);
                match self.commands.visit(user, name.as_deref()).await {
                    VisitOutcome::Departed(home) => println!("{} went to {}", alias, home),
                    VisitOutcome::NoSuchHome => println!("no such home"),
                    VisitOutcome::TeleportFailed { home, reason } => {
                        println!("could not reach '{}': {}", home.name, reason)
                    }
                }
            }
            "delhome" => {
                let Some(alias) = args.first() else {
                    println!("usage: delhome <user> [name]");
                    return true;
                };
                let Some(user) = self.joined(alias) else {
                    return true;
                };
                let name = join_name(&args[1..]);
                match self.commands.delete(user, name.as_deref()) {
                    DeleteOutcome::Removed(home) => println!("deleted '{}'", home.name),
                    DeleteOutcome::NoSuchHome => println!("no such home"),
                }
            }
            "homes" => {
                let Some(alias) = args.first() else {
                    println!("usage: homes <user>");
                    return true;
                };
                let Some(user) = self.joined(alias) else {
                    return true;
                };
                let homes = self.commands.homes(user);
                if homes.is_empty() {
                    println!("no homes yet");
                } else {
                    for home in homes {
                        println!("  {}", home);
                    }
                }
            }
            "where" => {
                let Some(alias) = args.first() else {
                    println!("usage: where <user>");
                    return true;
                };
                let Some(user) = self.joined(alias) else {
                    return true;
                };
                if let Some(pos) = self.world.position(user) {
                    println!("{} is at ({:.1}, {:.1}, {:.1})", alias, pos.x, pos.y, pos.z);
                }
            }
            "save" => {
                self.sync.flush_active().await;
                println!("flushed {} active user(s)", self.sync.active_users().len());
            }
            "help" => print_help(),
            "quit" | "exit" => return false,
            other => println!("unknown command '{}', try help", other),
        }

        true
    }
}

fn join_name(parts: &[&str]) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn print_help() {
    println!("join <user> | leave <user> | move <user> <x> <y> <z>");
    println!("sethome <user> [name] | home <user> [name] | delhome <user> [name]");
    println!("homes <user> | where <user> | save | quit");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearth_store=info,hearth_host=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = HostConfig::load(&cli.config);
    if let Some(dir) = cli.vault_dir {
        config.vault.dir = dir;
    }

    if cli.dump_config {
        println!("{}", config.to_toml());
        return Ok(());
    }

    let store = Arc::new(HomeStore::new());
    let vault = Arc::new(FsVault::new(config.vault.dir.clone()));
    let sync = Arc::new(SessionSync::new(store.clone(), vault, config.sync_config()));
    sync.clone().spawn_autosave().await;

    let world = ShellWorld::new();
    let resolver =
        DefaultResolver::with_default_name(store.clone(), config.default_home_name.clone());
    let commands = HomeCommands::new(store, resolver, world.clone());

    let mut shell = Shell {
        world,
        commands,
        sync: sync.clone(),
        users: HashMap::new(),
    };

    println!("hearth shell, type help for commands");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !shell.handle(&line).await {
                            break;
                        }
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    sync.shutdown().await;
    Ok(())
}
