//! CLI frontend for the tabledice dice and rules engine.

mod commands;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::Context;

#[derive(Parser)]
#[command(
    name = "td",
    about = "tabledice - dice rolling and skill checks for tabletop games",
    version,
    propagate_version = true
)]
struct Cli {
    /// Guild configuration file
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,

    /// Skill glossary file
    #[arg(long, global = true, default_value = "skills.json")]
    skills: PathBuf,

    /// Guild to act in
    #[arg(long, global = true, default_value = "0")]
    guild: u64,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice expression, e.g. `2d6+1`, `d20>=15` or `+3 d4`
    Roll {
        /// The expression; words are joined with single spaces
        #[arg(required = true, num_args = 1..)]
        expression: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Make a percentile skill check
    Coc {
        /// Skill value
        #[arg(value_parser = clap::value_parser!(u32).range(1..=100))]
        skill: u32,

        /// Number of independent checks
        #[arg(
            short,
            long,
            default_value = "1",
            value_parser = clap::value_parser!(i64).range(1..=10)
        )]
        times: i64,

        /// Name shown in critical notices
        #[arg(long, default_value = "player")]
        user: String,

        /// Channel name shown in critical notices
        #[arg(long, default_value = "cli")]
        channel: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the skill glossary
    Skill {
        #[command(subcommand)]
        command: SkillCommand,
    },

    /// Configure roll log streaming
    Log {
        #[command(subcommand)]
        command: LogCommand,
    },

    /// Set or clear the channel for critical notices
    Crit {
        /// Which notices to route
        kind: CritKind,

        /// Channel ID; omit to clear
        #[arg(long)]
        channel: Option<u64>,
    },

    /// Show or change the guild's rules
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },

    /// Developer-only administration
    Admin {
        /// ID of the user running the command
        #[arg(long, global = true)]
        user: Option<u64>,

        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand)]
enum SkillCommand {
    /// Add or replace a skill
    Add {
        /// Skill name
        name: String,

        /// Category, e.g. combat
        #[arg(long = "type")]
        skill_type: String,

        /// Level or rank
        #[arg(long)]
        level: String,

        /// What the skill does
        #[arg(long)]
        effect: String,
    },

    /// Look up a skill by (partial) name
    Show {
        /// Name or part of it
        name: String,
    },

    /// Delete the best match for a name
    Delete {
        /// Name or part of it
        name: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// List every skill of the guild
    List,
}

#[derive(Subcommand)]
enum LogCommand {
    /// Turn streaming on or off
    Stream {
        /// on or off
        state: StreamState,

        /// Log channel ID (required for `on`)
        #[arg(long)]
        channel: Option<u64>,
    },

    /// Choose how rolls are streamed
    Mode {
        /// live or batch
        mode: ModeArg,
    },
}

#[derive(Subcommand)]
enum RulesCommand {
    /// Print the current rules
    Show,

    /// Change the dice limits
    Dice {
        /// Maximum dice per roll (also the repeat ceiling)
        #[arg(long)]
        max_count: Option<u32>,

        /// Maximum faces per die
        #[arg(long)]
        max_sides: Option<u32>,
    },

    /// Change the percentile thresholds
    Coc {
        /// Roll that is always a critical success
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        critical_success: Option<u32>,

        /// Roll that is a critical failure for skills of 50 or more
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        critical_fail: Option<u32>,

        /// Divisor for hard successes
        #[arg(long)]
        hard_divisor: Option<u32>,

        /// Divisor for extreme successes
        #[arg(long)]
        extreme_divisor: Option<u32>,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Grant developer rights
    DevAdd {
        /// User ID
        target: u64,
    },

    /// Revoke developer rights
    DevRemove {
        /// User ID
        target: u64,
    },

    /// List developers
    DevList,
}

#[derive(Clone, Copy, ValueEnum)]
enum CritKind {
    Success,
    Fail,
}

#[derive(Clone, Copy, ValueEnum)]
enum StreamState {
    On,
    Off,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Live,
    Batch,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context {
        config_path: cli.config,
        skills_path: cli.skills,
        guild: cli.guild,
        seed: cli.seed,
    };

    let result = match cli.command {
        Commands::Roll { expression, json } => {
            commands::roll::run(&ctx, &expression.join(" "), json)
        }
        Commands::Coc {
            skill,
            times,
            user,
            channel,
            json,
        } => commands::coc::run(&ctx, skill, times, &user, &channel, json),
        Commands::Skill { command } => match command {
            SkillCommand::Add {
                name,
                skill_type,
                level,
                effect,
            } => commands::skill::add(&ctx, &name, &skill_type, &level, &effect),
            SkillCommand::Show { name } => commands::skill::show(&ctx, &name),
            SkillCommand::Delete { name, yes } => commands::skill::delete(&ctx, &name, yes),
            SkillCommand::List => commands::skill::list(&ctx),
        },
        Commands::Log { command } => match command {
            LogCommand::Stream { state, channel } => {
                commands::log::stream(&ctx, matches!(state, StreamState::On), channel)
            }
            LogCommand::Mode { mode } => commands::log::mode(
                &ctx,
                match mode {
                    ModeArg::Live => td_guild::StreamMode::Live,
                    ModeArg::Batch => td_guild::StreamMode::Batch,
                },
            ),
        },
        Commands::Crit { kind, channel } => commands::crit::run(
            &ctx,
            match kind {
                CritKind::Success => td_guild::CriticalKind::Success,
                CritKind::Fail => td_guild::CriticalKind::Fail,
            },
            channel,
        ),
        Commands::Rules { command } => match command {
            RulesCommand::Show => commands::rules::show(&ctx),
            RulesCommand::Dice {
                max_count,
                max_sides,
            } => commands::rules::dice(&ctx, max_count, max_sides),
            RulesCommand::Coc {
                critical_success,
                critical_fail,
                hard_divisor,
                extreme_divisor,
            } => commands::rules::coc(
                &ctx,
                commands::rules::CocChanges {
                    critical_success,
                    critical_fail,
                    hard_divisor,
                    extreme_divisor,
                },
            ),
        },
        Commands::Admin { user, command } => match command {
            AdminCommand::DevAdd { target } => commands::admin::dev_add(&ctx, user, target),
            AdminCommand::DevRemove { target } => commands::admin::dev_remove(&ctx, user, target),
            AdminCommand::DevList => commands::admin::dev_list(&ctx, user),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
