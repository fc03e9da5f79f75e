// ─── Netrix Core ───
// Modpack synchronization engine: keeps a local mods folder in step with
// files published in a GitHub repository.
//
// Architecture:
//   core/
//     repository/ — URL → owner/repo, remote endpoint layout
//     version/    — Version comparison + remote/local version descriptor
//     mods/       — Mod list resolution (manifest → contents API), mods dir
//     compat/     — Patcher descriptor + installed game version gate
//     downloader/ — Sequential mod file downloads
//     config/     — Atomic, self-healing local config store
//     sync/       — Engine operations, phase state machine, progress
//     state/      — Application-level owner of paths, client and config
//     eol.rs      — Advisory end-of-life notice

pub mod compat;
pub mod config;
pub mod downloader;
pub mod eol;
pub mod error;
pub mod fallback;
pub mod http;
pub mod mods;
pub mod paths;
pub mod repository;
pub mod state;
pub mod sync;
pub mod version;
