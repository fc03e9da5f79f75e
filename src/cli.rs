// Command-line front end: drives the command surface the way the desktop
// shell would, printing results instead of rendering them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::commands;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::paths::GamePaths;
use crate::core::repository::RemoteEndpoints;
use crate::core::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "netrix", version, about = "Keep your Minecraft mods folder in sync with a modpack repository")]
pub struct Cli {
    /// Minecraft root directory (defaults to the platform's .minecraft)
    #[arg(long, global = true)]
    pub game_dir: Option<PathBuf>,

    /// Directory holding netrix-config.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Raw-content host, e.g. a mirror of raw.githubusercontent.com
    #[arg(long, global = true)]
    pub raw_base: Option<String>,

    /// REST API host, e.g. a mirror of api.github.com
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show installed and published modpack versions
    Info,
    /// Check whether a newer modpack is published
    Check,
    /// Replace local mods with the published modpack
    Install {
        /// Skip the installed game version check
        #[arg(long)]
        bypass_version_check: bool,
    },
    /// Remove modpack mods and the installed-version marker
    Uninstall,
    /// Show or set the mods directory
    ModsPath { path: Option<String> },
    /// Show or set the modpack repository URL
    RepoUrl { url: Option<String> },
    /// Check that the required game version is installed
    Compat,
    /// Check whether this companion has reached end of life
    Eol,
}

pub async fn execute(cli: Cli) -> LauncherResult<()> {
    let paths = resolve_paths(cli.game_dir, cli.data_dir)?;
    let mut endpoints = RemoteEndpoints::default();
    if let Some(raw) = cli.raw_base {
        endpoints.raw_base = raw;
    }
    if let Some(api) = cli.api_base {
        endpoints.api_base = api;
    }

    let state = AppState::new(paths, endpoints)?;
    state.initialize().await?;
    let json = cli.json;

    match cli.command {
        Command::Info => {
            let info = commands::get_modpack_info(&state).await?;
            print_result(json, &info, || {
                format!(
                    "{} ({})\n  installed: {}\n  latest:    {}\n  minecraft: {}\n  update available: {}\n  mods: {}\n  repository: {}",
                    info.name,
                    info.description,
                    info.current_version,
                    info.latest_version,
                    info.minecraft_version,
                    info.is_update_available,
                    info.local_mods_path.display(),
                    info.repository_url
                )
            });
        }
        Command::Check => {
            let available = commands::check_for_updates(&state).await;
            print_result(json, &available, || {
                if available {
                    "An update is available.".into()
                } else {
                    "Modpack is up to date.".into()
                }
            });
        }
        Command::Install {
            bypass_version_check,
        } => {
            let cancel = CancellationToken::new();
            let watcher = {
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        warn!("Cancellation requested, finishing the current file");
                        cancel.cancel();
                    }
                })
            };

            let result = commands::download_and_install(
                &state,
                |progress| {
                    print_result(json, &progress, || {
                        format!(
                            "[{:>3}%] {} ({}/{})",
                            progress.percentage,
                            progress.file_name,
                            progress.downloaded,
                            progress.total
                        )
                    })
                },
                bypass_version_check,
                &cancel,
            )
            .await;
            watcher.abort();

            if let Err(LauncherError::IncompatibleVersion {
                required,
                patcher: Some(patcher),
                ..
            }) = &result
            {
                if !patcher.installer_url.is_empty() {
                    eprintln!("Installer for {}: {}", required, patcher.installer_url);
                }
            }
            let summary = result?;
            print_result(json, &summary, || {
                format!("Installed {} {}", summary.name, summary.version)
            });
        }
        Command::Uninstall => {
            commands::uninstall_modpack(&state).await?;
            print_result(json, &true, || "Modpack uninstalled.".into());
        }
        Command::ModsPath { path } => {
            let path = match path {
                Some(p) => commands::set_mods_directory_path(&state, p).await?,
                None => commands::get_mods_directory_path(&state).await,
            };
            print_result(json, &path, || path.display().to_string());
        }
        Command::RepoUrl { url } => {
            if let Some(url) = url {
                commands::set_repository_url(&state, url).await?;
            }
            let url = commands::get_repository_url(&state).await;
            print_result(json, &url, || url.clone());
        }
        Command::Compat => {
            let check = commands::check_version_compatibility(&state).await?;
            print_result(json, &check, || {
                if check.is_compatible {
                    format!("Minecraft {} is installed.", check.required_version)
                } else {
                    format!("Minecraft {} is NOT installed.", check.required_version)
                }
            });
        }
        Command::Eol => {
            let eol = commands::check_eol(&state).await;
            print_result(json, &eol, || {
                if eol.is_eol {
                    eol.content_if_true.clone()
                } else {
                    "This version is supported.".into()
                }
            });
        }
    }

    Ok(())
}

fn resolve_paths(game_dir: Option<PathBuf>, data_dir: Option<PathBuf>) -> LauncherResult<GamePaths> {
    match (game_dir, data_dir) {
        (Some(game), Some(data)) => Ok(GamePaths::new(game, data)),
        (game, data) => {
            let detected = GamePaths::detect()?;
            Ok(GamePaths::new(
                game.unwrap_or_else(|| detected.game_dir().to_path_buf()),
                data.unwrap_or_else(|| detected.data_dir().to_path_buf()),
            ))
        }
    }
}

fn print_result<T: Serialize>(json: bool, value: &T, plain: impl FnOnce() -> String) {
    if json {
        match serde_json::to_string(value) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!("Cannot serialize output: {}", e),
        }
    } else {
        println!("{}", plain());
    }
}
