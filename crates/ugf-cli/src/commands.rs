// Command-line surface: one subcommand per career action.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ugf_core::draft::{make_pick, start_draft};
use ugf_core::front_office::{
    complete_org_meeting, finalize_staff_build, set_draft_philosophy, set_extension_priority,
    set_fa_aggressiveness, set_staff_plan,
};
use ugf_core::hub::select_hub_view_model;
use ugf_core::league::LeagueDb;
use ugf_core::onboarding::{accept_offer, complete_interview, create_coach, INTERVIEW_TEAMS, OFFERS};
use ugf_core::save::{
    CoachProfile, DraftPhilosophy, ExtensionPriority, FaAggressiveness, SaveData, StaffDecision,
    StaffSlot,
};
use ugf_core::store::SaveStore;
use ugf_core::timeline::advance_timeline;
use ugf_core::SaveSession;

#[derive(Debug, Parser)]
#[command(name = "ugf", version)]
#[command(about = "Run a football front-office career from the terminal", long_about = None)]
pub struct Cli {
    /// Config file (defaults to config/ugf.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Save database, overriding the configured path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the hub: timeline step, team summary, and next action
    Status {
        /// Print the hub view model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create your head coach
    Coach {
        name: String,
        #[arg(long, default_value_t = 40)]
        age: u32,
        #[arg(long)]
        hometown: Option<String>,
        #[arg(long, default_value = "balanced")]
        personality: String,
    },

    /// Complete an interview with a team
    Interview { team_id: String },

    /// Accept a contract offer (all interviews must be done)
    AcceptOffer { team_id: String },

    /// Choose hire or delegate for a coordinator seat (oc, dc, stc)
    StaffPlan {
        slot: StaffSlot,
        decision: StaffDecision,
    },

    /// Lock in the staff build
    FinalizeStaff,

    /// Set front-office priorities ahead of the strategy meeting
    Strategy {
        #[arg(long)]
        draft: Option<DraftPhilosophy>,
        #[arg(long)]
        fa: Option<FaAggressiveness>,
        #[arg(long)]
        extensions: Option<ExtensionPriority>,
    },

    /// Finish the organizational strategy meeting
    CompleteMeeting,

    /// Move to the next timeline step
    Advance,

    /// Draft room actions
    Draft {
        #[command(subcommand)]
        action: DraftCommand,
    },

    /// Show recent news
    News {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Delete the saved career and start over
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Show the top of the big board
    Board {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Open the draft at pick 1
    Start,
    /// Select a prospect by id
    Pick { prospect_id: String },
}

/// Execute `command` against `session`, writing user-facing output to `out`.
pub fn run<S: SaveStore, W: Write>(
    command: Commands,
    session: &mut SaveSession<S>,
    league: &LeagueDb,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::Status { json } => {
            let vm = select_hub_view_model(session.save(), league);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&vm)?)?;
            } else {
                print_status(session.save(), league, out)?;
            }
        }

        Commands::Coach {
            name,
            age,
            hometown,
            personality,
        } => {
            let profile = CoachProfile {
                name,
                age,
                hometown: hometown.unwrap_or_default(),
                personality,
            };
            let changed = mutate(session, move |s| create_coach(s, profile));
            report(
                out,
                changed,
                "Coach created. Next: interview with each team.",
                "A coach already exists (or the name was blank).",
            )?;
        }

        Commands::Interview { team_id } => {
            let id = team_id.clone();
            let changed = mutate(session, move |s| complete_interview(s, &id));
            report(
                out,
                changed,
                &format!("Interview with {team_id} completed."),
                &format!("No interview recorded for {team_id}."),
            )?;
        }

        Commands::AcceptOffer { team_id } => {
            let id = team_id.clone();
            let changed = mutate(session, move |s| accept_offer(s, &id));
            if changed {
                writeln!(out, "Welcome to {}.", league.team_display_name(&team_id))?;
            } else {
                let teams: Vec<_> = OFFERS.iter().map(|o| o.team_id).collect();
                writeln!(
                    out,
                    "Offer not accepted. Finish every interview first; offers stand from {}.",
                    teams.join(", ")
                )?;
            }
        }

        Commands::StaffPlan { slot, decision } => {
            mutate(session, move |s| set_staff_plan(s, slot, decision));
            writeln!(out, "{slot}: {decision}")?;
        }

        Commands::FinalizeStaff => {
            let changed = mutate(session, finalize_staff_build);
            report(
                out,
                changed,
                "Staff build completed. Strategy meeting unlocked.",
                "Staff build was already finalized.",
            )?;
        }

        Commands::Strategy {
            draft,
            fa,
            extensions,
        } => {
            if let Some(v) = draft {
                mutate(session, move |s| set_draft_philosophy(s, v));
            }
            if let Some(v) = fa {
                mutate(session, move |s| set_fa_aggressiveness(s, v));
            }
            if let Some(v) = extensions {
                mutate(session, move |s| set_extension_priority(s, v));
            }
            let career = &session.save().career;
            writeln!(
                out,
                "Draft: {}  FA: {}  Extensions: {}",
                career.draft_philosophy, career.fa_aggressiveness, career.extension_priority
            )?;
        }

        Commands::CompleteMeeting => {
            let changed = mutate(session, complete_org_meeting);
            report(
                out,
                changed,
                "Organizational strategy set.",
                "Strategy meeting unavailable or already done.",
            )?;
        }

        Commands::Advance => {
            let changed = mutate(session, advance_timeline);
            let step = session.save().timeline.current_step;
            if changed {
                writeln!(out, "Now at: {} (week {})", step.label(), session.save().league.week)?;
            } else {
                writeln!(out, "Cannot advance from {} yet.", step.label())?;
            }
        }

        Commands::Draft { action } => run_draft(action, session, out)?,

        Commands::News { limit } => {
            let news = &session.save().news;
            if news.is_empty() {
                writeln!(out, "No news yet.")?;
            }
            for item in news.iter().take(limit) {
                writeln!(out, "[{}] {}", item.timestamp, item.headline)?;
                writeln!(out, "    {}", item.description)?;
            }
        }

        Commands::Reset => {
            session.clear_save();
            writeln!(out, "Career reset.")?;
        }
    }
    Ok(())
}

fn run_draft<S: SaveStore, W: Write>(
    action: DraftCommand,
    session: &mut SaveSession<S>,
    out: &mut W,
) -> Result<()> {
    match action {
        DraftCommand::Board { limit } => {
            let draft = &session.save().draft;
            if !draft.class_generated {
                writeln!(out, "No draft class yet. Run `ugf draft start`.")?;
                return Ok(());
            }
            for (rank, id) in draft.board.iter().take(limit).enumerate() {
                if let Some(p) = draft.prospect(id) {
                    writeln!(
                        out,
                        "{:>2}. {:<12} {:<4} {:<20} {:<16} age {} ovr {}",
                        rank + 1,
                        p.id,
                        p.position,
                        p.name,
                        p.archetype,
                        p.age,
                        p.ovr
                    )?;
                }
            }
        }
        DraftCommand::Start => {
            mutate(session, start_draft);
            writeln!(
                out,
                "Draft open. {} prospects on the board; you are on the clock at pick 1.",
                session.save().draft.board.len()
            )?;
        }
        DraftCommand::Pick { prospect_id } => {
            let id = prospect_id.clone();
            let changed = mutate(session, move |s| make_pick(s, &id));
            match (changed, session.save().news.first()) {
                (true, Some(item)) => writeln!(out, "{}", item.description)?,
                _ => writeln!(out, "Pick of {prospect_id} not made.")?,
            }
            if changed && session.save().draft.completed {
                writeln!(out, "Draft complete.")?;
            }
        }
    }
    Ok(())
}

/// Apply `f` through the session and report whether the save changed.
fn mutate<S: SaveStore>(
    session: &mut SaveSession<S>,
    f: impl FnOnce(SaveData) -> SaveData + 'static,
) -> bool {
    let before = session.save().clone();
    session.apply(f) != &before
}

fn report<W: Write>(out: &mut W, changed: bool, done: &str, skipped: &str) -> Result<()> {
    writeln!(out, "{}", if changed { done } else { skipped })?;
    Ok(())
}

fn print_status<W: Write>(save: &SaveData, league: &LeagueDb, out: &mut W) -> Result<()> {
    let vm = select_hub_view_model(save, league);

    writeln!(out, "{} | {}", vm.phase_label, vm.step_label)?;
    match (&save.coach, &vm.team_summary) {
        (None, _) => writeln!(out, "No coach yet. Run `ugf coach <name>`.")?,
        (Some(coach), None) => writeln!(
            out,
            "Coach {} | interviews {}/{}, no team yet",
            coach.name,
            save.onboarding.interviews_completed.len(),
            INTERVIEW_TEAMS.len()
        )?,
        (Some(coach), Some(team)) => writeln!(
            out,
            "Coach {} | {} ({}) | roster {} avg {} OVR",
            coach.name, team.name, team.abbrev, team.roster_size, team.avg_ovr
        )?,
    }
    writeln!(
        out,
        "Next: {}{}",
        vm.primary_cta.label,
        if vm.can_advance { " (ready to advance)" } else { "" }
    )?;
    if let Some(item) = vm.news.first() {
        writeln!(out, "Latest: {}", item.headline)?;
    }
    Ok(())
}
