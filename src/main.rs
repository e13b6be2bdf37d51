// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pathwise CLI entrypoint.
//!
//! Loads the snapshot named by the configuration (or the built-in demo organisation with
//! `--demo`), runs one command and saves the snapshot again when the command changed it.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pathwise::checkpoint::{reset_progress, ModulePlayer, NavigationError, SequentialGating};
use pathwise::config::{PortalConfig, CONFIG_ENV};
use pathwise::model::fixtures::demo_store;
use pathwise::model::{Actor, EntityStore, Id, LearnerId, ModuleId};
use pathwise::ops::{
    check_invariants, repair, sync_from_assignment_edit, AssignmentOwner, InvariantViolation,
};
use pathwise::query::{assigned_with_progress, overall_progress, resolve_assigned_modules};
use pathwise::store::{snapshot_schema, SnapshotFile};

#[derive(Parser)]
#[command(name = "pathwise")]
#[command(about = "Training assignment graph and progress engine")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Snapshot file (overrides config file)
    #[arg(long, env = "PATHWISE_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// fsync snapshot writes (overrides config file)
    #[arg(long)]
    durable_writes: bool,

    /// Work on the built-in demo organisation; nothing is saved
    #[arg(long, conflicts_with = "snapshot")]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List a learner's assigned modules with per-module progress
    Assigned { learner: String },
    /// Show a learner's overall progress
    Progress { learner: String },
    /// List the chapters of a module with the learner's state for each
    Chapters { learner: String, module: String },
    /// Report invariant violations; exits with status 1 if any are found
    Audit,
    /// Re-derive department and journey lists from module targets and save
    Repair,
    /// Replace a department core list or a role journey
    Assign {
        kind: OwnerKind,
        owner: String,
        modules: Vec<String>,
    },
    /// Reset a learner's completed chapters
    Reset {
        learner: String,
        /// Only reset this module's chapters
        #[arg(long)]
        module: Option<String>,
        /// Learner issuing the reset
        #[arg(long)]
        actor: String,
    },
    /// Print the JSON Schema of the snapshot file
    Schema,
}

#[derive(Clone, Copy, ValueEnum)]
enum OwnerKind {
    Department,
    Journey,
}

fn parse_id<T>(field: &str, raw: &str) -> anyhow::Result<Id<T>> {
    Id::new(raw).with_context(|| format!("invalid {field} id {raw:?}"))
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = PortalConfig::discover(cli.config.as_deref())?;
    if let Some(snapshot) = cli.snapshot.clone() {
        config.snapshot = snapshot;
    }
    if cli.durable_writes {
        config.durable_writes = true;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_filter))
                .context("invalid log filter")?,
        )
        .with_writer(std::io::stderr)
        .init();

    if let Command::Schema = cli.command {
        println!("{}", serde_json::to_string_pretty(&snapshot_schema())?);
        return Ok(ExitCode::SUCCESS);
    }

    let file = config.snapshot_file();
    let (mut store, repaired_on_load) = if cli.demo {
        info!("using demo organisation");
        (demo_store(), Vec::new())
    } else {
        let loaded = file
            .load_or_init()
            .with_context(|| format!("cannot load snapshot {}", file.path().display()))?;
        (loaded.store, loaded.repaired.violations)
    };

    // Loading repairs in memory only, so the violations found on load still describe the file.
    let outcome = run(cli.command, &mut store, repaired_on_load, config.sequential_gating)?;
    if outcome.changed && !cli.demo {
        save(&file, &store)?;
    }
    Ok(outcome.exit_code)
}

struct Outcome {
    changed: bool,
    exit_code: ExitCode,
}

impl Outcome {
    fn unchanged() -> Self {
        Self {
            changed: false,
            exit_code: ExitCode::SUCCESS,
        }
    }

    fn changed() -> Self {
        Self {
            changed: true,
            exit_code: ExitCode::SUCCESS,
        }
    }
}

fn run(
    command: Command,
    store: &mut EntityStore,
    repaired_on_load: Vec<InvariantViolation>,
    gating: SequentialGating,
) -> anyhow::Result<Outcome> {
    match command {
        Command::Assigned { learner } => {
            let learner_id: LearnerId = parse_id("learner", &learner)?;
            let Some(learner) = store.learner(&learner_id) else {
                bail!("learner {learner_id} not found");
            };
            for (module, percent) in assigned_with_progress(learner, store) {
                let kind = if module.is_compulsory() { "compulsory" } else { "assigned" };
                println!(
                    "{:>3}%  {}  {} ({kind}, {} chapters, {} questions, {} min)",
                    percent,
                    module.module_id(),
                    module.title(),
                    module.chapters().len(),
                    module.question_count(),
                    module.duration_minutes(),
                );
            }
            Ok(Outcome::unchanged())
        }
        Command::Progress { learner } => {
            let learner_id: LearnerId = parse_id("learner", &learner)?;
            let Some(learner) = store.learner(&learner_id) else {
                bail!("learner {learner_id} not found");
            };
            let progress = overall_progress(resolve_assigned_modules(learner, store), learner);
            println!(
                "{}/{} modules ({}%)",
                progress.completed, progress.total, progress.percent
            );
            Ok(Outcome::unchanged())
        }
        Command::Chapters { learner, module } => {
            let learner_id: LearnerId = parse_id("learner", &learner)?;
            let module_id: ModuleId = parse_id("module", &module)?;
            let Some(learner) = store.learner(&learner_id) else {
                bail!("learner {learner_id} not found");
            };
            let Some(module) = store.module(&module_id) else {
                bail!("module {module_id} not found");
            };
            let mut player = ModulePlayer::new(module, gating);
            for (index, chapter) in module.chapters().iter().enumerate() {
                let lock = match player.jump_to(index, learner) {
                    Err(NavigationError::Locked { blocking, .. }) => format!(" (locked by {blocking})"),
                    Ok(jump) if !jump.skipped.is_empty() => {
                        format!(" ({} earlier chapter(s) incomplete)", jump.skipped.len())
                    }
                    _ => String::new(),
                };
                let state = player
                    .state_of(learner, index)
                    .map(|state| format!("{state:?}"))
                    .unwrap_or_default();
                println!(
                    "{index:>2}  {:<10}  {}  {} [{}]{lock}",
                    state,
                    chapter.chapter_id(),
                    chapter.title(),
                    chapter.content_type(),
                );
            }
            Ok(Outcome::unchanged())
        }
        Command::Audit => {
            let mut violations = repaired_on_load;
            violations.extend(check_invariants(store));
            for violation in &violations {
                println!("{violation}");
            }
            if violations.is_empty() {
                println!("no invariant violations");
                return Ok(Outcome::unchanged());
            }
            Ok(Outcome {
                changed: false,
                exit_code: ExitCode::FAILURE,
            })
        }
        Command::Repair => {
            let mut violations = repaired_on_load;
            violations.extend(repair(store).violations);
            for violation in &violations {
                println!("{violation}");
            }
            println!("repaired {} violation(s)", violations.len());
            if violations.is_empty() {
                Ok(Outcome::unchanged())
            } else {
                Ok(Outcome::changed())
            }
        }
        Command::Assign {
            kind,
            owner,
            modules,
        } => {
            let owner = match kind {
                OwnerKind::Department => AssignmentOwner::Department(parse_id("department", &owner)?),
                OwnerKind::Journey => AssignmentOwner::Journey(parse_id("role", &owner)?),
            };
            let module_ids = modules
                .iter()
                .map(|raw| parse_id("module", raw))
                .collect::<anyhow::Result<Vec<ModuleId>>>()?;
            let report = sync_from_assignment_edit(store, &owner, module_ids)
                .with_context(|| format!("cannot update {owner}"))?;
            println!(
                "{owner} updated ({} module(s) retargeted, {} journey(s) created)",
                report.modules_updated.len(),
                report.journeys_created.len()
            );
            Ok(if report.is_noop() {
                Outcome::unchanged()
            } else {
                Outcome::changed()
            })
        }
        Command::Reset {
            learner,
            module,
            actor,
        } => {
            let learner_id: LearnerId = parse_id("learner", &learner)?;
            let actor_id: LearnerId = parse_id("actor", &actor)?;
            let Some(actor) = store.learner(&actor_id).map(Actor::for_learner) else {
                bail!("actor {actor_id} not found");
            };
            let module_id = module
                .as_deref()
                .map(|raw| parse_id::<_>("module", raw))
                .transpose()?;
            let cleared = reset_progress(store, &actor, &learner_id, module_id.as_ref())?;
            println!("cleared {cleared} completed chapter(s) for {learner_id}");
            Ok(if cleared == 0 {
                Outcome::unchanged()
            } else {
                Outcome::changed()
            })
        }
        Command::Schema => Ok(Outcome::unchanged()),
    }
}

fn save(file: &SnapshotFile, store: &EntityStore) -> anyhow::Result<()> {
    file.save(store)
        .with_context(|| format!("cannot save snapshot {}", file.path().display()))
}
